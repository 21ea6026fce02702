use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgb8;

/// Colors used when composing output files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OutputColors {
    /// Caption text.
    pub text: Rgb8,
    /// Atlas background.
    pub background: Rgb8,
    /// Color-key marker for cut-out regions when real alpha is not used.
    pub transparency: Rgb8,
    /// Outline around cut-out regions.
    pub border: Rgb8,
}

impl Default for OutputColors {
    fn default() -> Self {
        Self {
            text: Rgb8::RED,
            background: Rgb8::BLACK,
            transparency: Rgb8::CYAN,
            border: Rgb8::MAGENTA,
        }
    }
}
