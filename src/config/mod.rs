/// Output colors.
pub mod colors;
/// Configuration document loading and queries.
pub mod manager;
pub mod presets;
pub mod profile;

pub use colors::OutputColors;
pub use manager::{ConfigManager, OutputFileType};
pub use presets::Presets;
pub use profile::{AtlasLayout, OutputConfig, OutputKind, ResolutionProfile};
