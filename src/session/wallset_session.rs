use std::path::PathBuf;

use image::RgbaImage;

use crate::config::colors::OutputColors;
use crate::config::manager::ConfigManager;
use crate::foundation::error::{WallgenError, WallgenResult};
use crate::generate::params::PostProcessingParameters;
use crate::generate::segment::{StorySequence, WallSet};
use crate::generate::service::{FileSelection, WallGenerationService};
use crate::output::{OutputRequest, PreviewGenerationService, create_generator};

/// Everything that determines the generated story sequence.
///
/// Two requests with equal inputs produce the same stories, so the session reuses them.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationInputs {
    /// Source files and story layout.
    pub selection: FileSelection,
    /// Processing settings.
    pub params: PostProcessingParameters,
    /// Resolution profile name.
    pub resolution: String,
}

/// Where and how a generated wallset is written.
#[derive(Clone, Debug)]
pub struct OutputTarget {
    /// Output configuration name within the profile.
    pub output_format: String,
    /// Output file type name (e.g. `PNG`).
    pub file_type: String,
    /// Directory receiving the files.
    pub target_dir: PathBuf,
    /// Base file name.
    pub base_name: String,
    /// Request real alpha transparency; ignored for file types without alpha.
    pub use_transparency: bool,
    /// Output colors.
    pub colors: OutputColors,
}

/// Session owning the loaded configuration and the last generated story sequence.
pub struct WallsetSession {
    config: ConfigManager,
    cache: Option<(GenerationInputs, StorySequence)>,
}

impl WallsetSession {
    /// New session over a loaded configuration.
    pub fn new(config: ConfigManager) -> Self {
        Self {
            config,
            cache: None,
        }
    }

    /// Loaded configuration.
    pub fn config(&self) -> &ConfigManager {
        &self.config
    }

    /// Whether a story sequence is cached.
    pub fn has_generated(&self) -> bool {
        self.cache.is_some()
    }

    /// Drop the cached story sequence.
    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    /// Generate (or reuse) the story sequence for `inputs`.
    pub fn stories(&mut self, inputs: &GenerationInputs) -> WallgenResult<&[WallSet]> {
        let stale = self.cache.as_ref().is_none_or(|(key, _)| key != inputs);
        if stale {
            self.cache = None;
            let profile = self.config.require_profile(&inputs.resolution)?;
            let stories =
                WallGenerationService.fetch_images(&inputs.selection, &inputs.params, profile)?;
            tracing::info!(stories = stories.len(), "story sequence generated");
            self.cache = Some((inputs.clone(), stories));
        } else {
            tracing::debug!("reusing cached story sequence");
        }
        Ok(self
            .cache
            .as_ref()
            .map(|(_, stories)| stories.as_slice())
            .unwrap_or_default())
    }

    /// Preview strip for `inputs`.
    pub fn generate_preview(&mut self, inputs: &GenerationInputs) -> WallgenResult<RgbaImage> {
        let stories = self.stories(inputs)?;
        PreviewGenerationService.generate_preview(stories)
    }

    /// Generate and write the wallset, returning the written paths.
    ///
    /// The target is validated before any source is decoded.
    #[tracing::instrument(skip_all, fields(resolution = %inputs.resolution, output = %target.output_format))]
    pub fn generate_output(
        &mut self,
        inputs: &GenerationInputs,
        target: &OutputTarget,
    ) -> WallgenResult<Vec<PathBuf>> {
        if target.base_name.trim().is_empty() {
            return Err(WallgenError::validation(
                "no base output file name specified",
            ));
        }
        let profile = self.config.require_profile(&inputs.resolution)?;
        let output = profile.output(&target.output_format).ok_or_else(|| {
            WallgenError::validation(format!(
                "unknown output format \"{}\" for resolution \"{}\"",
                target.output_format, inputs.resolution
            ))
        })?;
        if inputs.selection.story_count > 1 && !output.supports_multi_story {
            return Err(WallgenError::validation(format!(
                "output format \"{}\" does not support multiple stories",
                output.name
            )));
        }
        let file_type = self
            .config
            .output_file_type(&target.file_type)
            .ok_or_else(|| {
                WallgenError::validation(format!("unknown output file type \"{}\"", target.file_type))
            })?
            .clone();
        let output = output.clone();

        let stories = self.stories(inputs)?;
        let req = OutputRequest {
            target_dir: &target.target_dir,
            base_name: &target.base_name,
            file_type: &file_type,
            use_transparency: target.use_transparency,
            colors: &target.colors,
        };
        let generator = create_generator(&output);
        let written = generator.generate(&req, stories)?;
        Ok(written)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/wallset_session.rs"]
mod tests;
