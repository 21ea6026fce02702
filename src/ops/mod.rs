pub(crate) mod blur;
pub mod composite;
/// Depth darkening gradients.
pub mod darken;
pub mod scale;
/// Unsharp masking.
pub mod sharpen;
/// 3x3 softening.
pub mod soften;
/// Perspective warping.
pub mod warp;

pub use darken::{GradientDirection, darken};
pub use scale::{ResizeStrategy, ScalingMethod, scale};
pub use sharpen::{UnsharpenLevel, unsharpen};
pub use soften::soften;
pub use warp::warp;
