use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::foundation::error::{WallgenError, WallgenResult};
use crate::foundation::math::{
    clamp_u8, premultiply_rgba8_in_place, unpremultiply_rgba8_in_place,
};
use crate::ops::blur::blur_rgba8_premul;

const MASK_RADIUS: u32 = 1;
const MASK_SIGMA: f32 = 1.0;

/// Unsharp-mask strength presets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnsharpenLevel {
    /// No sharpening.
    #[default]
    None,
    /// Light sharpening.
    Soft,
    /// Moderate sharpening.
    Normal,
    /// Strong sharpening.
    VerySharp,
    /// Exaggerated sharpening.
    Oversharpened,
}

impl UnsharpenLevel {
    /// All levels, weakest first.
    pub const ALL: [Self; 5] = [
        Self::None,
        Self::Soft,
        Self::Normal,
        Self::VerySharp,
        Self::Oversharpened,
    ];

    /// Mask amount, `0.0` for [`UnsharpenLevel::None`].
    pub fn amount(self) -> f32 {
        match self {
            Self::None => 0.0,
            Self::Soft => 0.15,
            Self::Normal => 0.3,
            Self::VerySharp => 0.45,
            Self::Oversharpened => 0.6,
        }
    }

    /// `true` for the preset that leaves images untouched.
    pub fn is_none(self) -> bool {
        self == Self::None
    }
}

impl std::str::FromStr for UnsharpenLevel {
    type Err = WallgenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "none" => Ok(Self::None),
            "soft" => Ok(Self::Soft),
            "normal" => Ok(Self::Normal),
            "verysharp" => Ok(Self::VerySharp),
            "oversharpened" => Ok(Self::Oversharpened),
            _ => Err(WallgenError::validation(format!(
                "unknown unsharpen level \"{s}\""
            ))),
        }
    }
}

/// Sharpen with an unsharp mask: `out = src + amount * (src - blur(src))`.
///
/// Runs in premultiplied space so transparent fringes do not bleed; alpha is kept as is.
pub fn unsharpen(image: &RgbaImage, level: UnsharpenLevel) -> WallgenResult<RgbaImage> {
    if level.is_none() {
        return Ok(image.clone());
    }
    let amount = level.amount();
    let (w, h) = image.dimensions();

    let mut premul = image.as_raw().clone();
    premultiply_rgba8_in_place(&mut premul);
    let blurred = blur_rgba8_premul(&premul, w, h, MASK_RADIUS, MASK_SIGMA)?;

    for (px, bl) in premul.chunks_exact_mut(4).zip(blurred.chunks_exact(4)) {
        let a = px[3];
        for c in 0..3 {
            let s = f32::from(px[c]);
            let v = s + amount * (s - f32::from(bl[c]));
            px[c] = clamp_u8(v).min(a);
        }
    }
    unpremultiply_rgba8_in_place(&mut premul);

    RgbaImage::from_raw(w, h, premul)
        .ok_or_else(|| WallgenError::validation("unsharpen produced a mismatched buffer"))
}

#[cfg(test)]
#[path = "../../tests/unit/ops/sharpen.rs"]
mod tests;
