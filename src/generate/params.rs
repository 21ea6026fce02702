use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::foundation::core::{Rgb8, Size};
use crate::foundation::error::{WallgenError, WallgenResult};
use crate::ops::{ScalingMethod, UnsharpenLevel, scale, soften, unsharpen};

/// Order of the two post-scale filters when both are active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterOrder {
    /// Unsharp mask first, then soften.
    #[default]
    UnsharpThenSoften,
    /// Soften first, then unsharp mask.
    SoftenThenUnsharp,
}

/// Per-request processing settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PostProcessingParameters {
    /// Blend strength applied to near segments, `0..=1`.
    pub near_darkening: f32,
    /// Blend strength reached by far segments, `0..=1`.
    pub far_darkening: f32,
    /// Softening factor; `None` disables softening.
    pub softening: Option<f32>,
    /// Unsharp-mask preset.
    pub unsharpen: UnsharpenLevel,
    /// Filter order when both filters are active.
    pub filter_order: FilterOrder,
    /// Resize method.
    pub scaling_method: ScalingMethod,
    /// Color blended into darkened segments.
    pub blend_color: Rgb8,
}

impl Default for PostProcessingParameters {
    fn default() -> Self {
        Self {
            near_darkening: 0.0,
            far_darkening: 0.0,
            softening: None,
            unsharpen: UnsharpenLevel::None,
            filter_order: FilterOrder::default(),
            scaling_method: ScalingMethod::NearestNeighbour,
            blend_color: Rgb8::BLACK,
        }
    }
}

impl PostProcessingParameters {
    /// Reject out-of-range ratios.
    pub fn validate(&self) -> WallgenResult<()> {
        let unit = |name: &str, v: f32| {
            if v.is_finite() && (0.0..=1.0).contains(&v) {
                Ok(())
            } else {
                Err(WallgenError::validation(format!(
                    "{name} must be within 0..=1, got {v}"
                )))
            }
        };
        unit("near darkening", self.near_darkening)?;
        unit("far darkening", self.far_darkening)?;
        if let Some(s) = self.softening {
            if !s.is_finite() || !(0.0..1.0).contains(&s) {
                return Err(WallgenError::validation(format!(
                    "softening must be within 0..1, got {s}"
                )));
            }
        }
        Ok(())
    }

    /// Scale `image` to `target`, running the post-scale filters only if a resize happened.
    pub fn resize(&self, image: &RgbaImage, target: Size) -> WallgenResult<RgbaImage> {
        if image.dimensions() == (target.width, target.height) {
            return Ok(image.clone());
        }
        let scaled = scale(image, target, self.scaling_method)?;
        self.post_process(&scaled)
    }

    /// Unsharp mask and softening in the configured order.
    pub fn post_process(&self, image: &RgbaImage) -> WallgenResult<RgbaImage> {
        let either_off = self.softening.is_none() || self.unsharpen.is_none();
        if either_off || self.filter_order == FilterOrder::UnsharpThenSoften {
            let sharpened = unsharpen(image, self.unsharpen)?;
            Ok(soften(&sharpened, self.softening))
        } else {
            unsharpen(&soften(image, self.softening), self.unsharpen)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/generate/params.rs"]
mod tests;
