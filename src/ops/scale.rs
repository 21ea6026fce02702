//! Resizing strategies.

use image::RgbaImage;
use image::imageops::{self, FilterType};
use serde::{Deserialize, Serialize};

use crate::foundation::core::Size;
use crate::foundation::error::{WallgenError, WallgenResult};

/// Smallest source edge the resample filter accepts.
const RESAMPLE_MIN_EDGE: u32 = 3;

/// Interpolation used when scaling sources to wall sizes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalingMethod {
    /// Nearest-neighbor; keeps hard pixel edges.
    #[default]
    NearestNeighbour,
    /// Bilinear interpolation.
    Bilinear,
    /// Bicubic interpolation.
    Bicubic,
    /// Single-pass Lanczos resampling.
    Resample,
}

impl ScalingMethod {
    /// All methods, in menu order.
    pub const ALL: [Self; 4] = [
        Self::NearestNeighbour,
        Self::Bilinear,
        Self::Bicubic,
        Self::Resample,
    ];

    /// Resizer implementing this method.
    pub fn strategy(self) -> Box<dyn ResizeStrategy> {
        match self {
            Self::NearestNeighbour => Box::new(MultiStepRescale {
                filter: FilterType::Nearest,
            }),
            Self::Bilinear => Box::new(MultiStepRescale {
                filter: FilterType::Triangle,
            }),
            Self::Bicubic => Box::new(MultiStepRescale {
                filter: FilterType::CatmullRom,
            }),
            Self::Resample => Box::new(Resample),
        }
    }
}

impl std::str::FromStr for ScalingMethod {
    type Err = WallgenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "nearestneighbour" | "nearestneighbor" | "nearest" => Ok(Self::NearestNeighbour),
            "bilinear" => Ok(Self::Bilinear),
            "bicubic" => Ok(Self::Bicubic),
            "resample" => Ok(Self::Resample),
            _ => Err(WallgenError::validation(format!(
                "unknown scaling method \"{s}\""
            ))),
        }
    }
}

/// A way of resizing an RGBA raster to an exact target size.
pub trait ResizeStrategy {
    /// Resize `image` to `target`. Both sizes are non-empty.
    fn resize(&self, image: &RgbaImage, target: Size) -> WallgenResult<RgbaImage>;
}

/// Interpolating resize that halves the image until it is within 2x of the target.
///
/// One large downscale with a small-support filter skips source pixels; stepping keeps every
/// source row and column contributing.
pub struct MultiStepRescale {
    /// Filter used for each step.
    pub filter: FilterType,
}

impl ResizeStrategy for MultiStepRescale {
    fn resize(&self, image: &RgbaImage, target: Size) -> WallgenResult<RgbaImage> {
        let mut cur = image.clone();
        loop {
            let (w, h) = cur.dimensions();
            let next_w = if w > target.width { (w / 2).max(target.width) } else { target.width };
            let next_h = if h > target.height { (h / 2).max(target.height) } else { target.height };
            cur = imageops::resize(&cur, next_w, next_h, self.filter);
            if next_w == target.width && next_h == target.height {
                return Ok(cur);
            }
        }
    }
}

/// High-quality single-pass Lanczos resample.
pub struct Resample;

impl ResizeStrategy for Resample {
    fn resize(&self, image: &RgbaImage, target: Size) -> WallgenResult<RgbaImage> {
        let (w, h) = image.dimensions();
        if w < RESAMPLE_MIN_EDGE || h < RESAMPLE_MIN_EDGE {
            return Err(WallgenError::scaling(format!(
                "resample needs a source of at least {RESAMPLE_MIN_EDGE}x{RESAMPLE_MIN_EDGE}, got {w}x{h}"
            )));
        }
        Ok(imageops::resize(
            image,
            target.width,
            target.height,
            FilterType::Lanczos3,
        ))
    }
}

/// Scale `image` to exactly `target` with `method`.
///
/// Returns the image unchanged when it already has the target size. Width and height scale
/// independently.
pub fn scale(image: &RgbaImage, target: Size, method: ScalingMethod) -> WallgenResult<RgbaImage> {
    let (w, h) = image.dimensions();
    if (w, h) == (target.width, target.height) {
        return Ok(image.clone());
    }
    if w == 0 || h == 0 || target.is_empty() {
        return Err(WallgenError::scaling(format!(
            "cannot scale {w}x{h} to {target}"
        )));
    }
    tracing::debug!(?method, from = %Size::new(w, h), to = %target, "scale");
    method.strategy().resize(image, target)
}

#[cfg(test)]
#[path = "../../tests/unit/ops/scale.rs"]
mod tests;
