//! Saved user settings.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::colors::OutputColors;
use crate::foundation::core::Rgb8;
use crate::foundation::error::{WallgenError, WallgenResult};
use crate::generate::params::{FilterOrder, PostProcessingParameters};
use crate::ops::{ScalingMethod, UnsharpenLevel};

/// File picked up by [`Presets::load_default`].
pub const DEFAULT_PRESETS_FILE: &str = "default-settings.json";

/// Profile and output selection.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BasicOptions {
    /// Resolution profile name.
    pub resolution: Option<String>,
    /// Output name within the profile.
    pub output_format: Option<String>,
    /// Output file type name.
    pub output_file_type: Option<String>,
}

/// Image processing settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProcessingOptions {
    /// Near darkening ratio.
    pub near_darkening: f32,
    /// Far darkening ratio.
    pub far_darkening: f32,
    /// Resize method.
    pub scaling_method: ScalingMethod,
    /// Unsharp-mask preset.
    pub unsharp_mask: UnsharpenLevel,
    /// Softening factor, absent when disabled.
    pub soften: Option<f32>,
    /// Filter order.
    pub filter_order: FilterOrder,
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self::from(&PostProcessingParameters::default())
    }
}

impl From<&PostProcessingParameters> for ProcessingOptions {
    fn from(p: &PostProcessingParameters) -> Self {
        Self {
            near_darkening: p.near_darkening,
            far_darkening: p.far_darkening,
            scaling_method: p.scaling_method,
            unsharp_mask: p.unsharpen,
            soften: p.softening,
            filter_order: p.filter_order,
        }
    }
}

/// Output colors and transparency mode.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColorOptions {
    /// Caption color.
    pub text_color: Rgb8,
    /// Distance blend color.
    pub distance_blend_color: Rgb8,
    /// Atlas background.
    pub background_color: Rgb8,
    /// Region outline color.
    pub border_color: Rgb8,
    /// Color-key marker.
    pub transparency_color: Rgb8,
    /// Write real alpha where the file type supports it.
    pub use_alpha_transparency: bool,
}

impl Default for ColorOptions {
    fn default() -> Self {
        let c = OutputColors::default();
        Self {
            text_color: c.text,
            distance_blend_color: Rgb8::BLACK,
            background_color: c.background,
            border_color: c.border,
            transparency_color: c.transparency,
            use_alpha_transparency: false,
        }
    }
}

/// Complete saved settings document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Presets {
    /// Profile and output selection.
    pub basic_options: BasicOptions,
    /// Processing settings.
    pub processing_options: ProcessingOptions,
    /// Colors.
    pub color_options: ColorOptions,
}

impl Presets {
    /// Capture the given settings.
    pub fn capture(
        basic: BasicOptions,
        params: &PostProcessingParameters,
        colors: &OutputColors,
        use_alpha_transparency: bool,
    ) -> Self {
        Self {
            basic_options: basic,
            processing_options: ProcessingOptions::from(params),
            color_options: ColorOptions {
                text_color: colors.text,
                distance_blend_color: params.blend_color,
                background_color: colors.background,
                border_color: colors.border,
                transparency_color: colors.transparency,
                use_alpha_transparency,
            },
        }
    }

    /// Processing parameters described by these presets.
    pub fn post_processing(&self) -> PostProcessingParameters {
        let p = &self.processing_options;
        PostProcessingParameters {
            near_darkening: p.near_darkening,
            far_darkening: p.far_darkening,
            softening: p.soften,
            unsharpen: p.unsharp_mask,
            filter_order: p.filter_order,
            scaling_method: p.scaling_method,
            blend_color: self.color_options.distance_blend_color,
        }
    }

    /// Output colors described by these presets.
    pub fn output_colors(&self) -> OutputColors {
        let c = &self.color_options;
        OutputColors {
            text: c.text_color,
            background: c.background_color,
            transparency: c.transparency_color,
            border: c.border_color,
        }
    }

    /// Parse presets from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> WallgenResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| WallgenError::serde(format!("parse presets JSON: {e}")))
    }

    /// Parse a presets file.
    pub fn from_path(path: impl AsRef<Path>) -> WallgenResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            WallgenError::io(format!("open presets '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Write presets as pretty JSON.
    pub fn to_path(&self, path: impl AsRef<Path>) -> WallgenResult<()> {
        let path = path.as_ref();
        let f = File::create(path).map_err(|e| {
            WallgenError::io(format!("create presets '{}': {e}", path.display()))
        })?;
        let mut w = BufWriter::new(f);
        serde_json::to_writer_pretty(&mut w, self)
            .map_err(|e| WallgenError::serde(format!("write presets JSON: {e}")))?;
        w.flush()
            .map_err(|e| WallgenError::io(format!("flush presets '{}': {e}", path.display())))?;
        tracing::info!(path = %path.display(), "presets saved");
        Ok(())
    }

    /// Load `default-settings.json` from `dir`, `None` when it does not exist.
    pub fn load_default(dir: impl AsRef<Path>) -> WallgenResult<Option<Self>> {
        let path = dir.as_ref().join(DEFAULT_PRESETS_FILE);
        if !path.is_file() {
            return Ok(None);
        }
        tracing::info!(path = %path.display(), "loading default presets");
        Self::from_path(&path).map(Some)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/presets.rs"]
mod tests;
