//! Per-story source acquisition.

use std::path::PathBuf;

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::assets::{load_source, placeholder};
use crate::config::profile::ResolutionProfile;
use crate::foundation::error::{WallgenError, WallgenResult};
use crate::generate::generator::Generator;
use crate::generate::params::PostProcessingParameters;
use crate::generate::segment::StorySequence;

/// Most stories a wallset can have.
pub const MAX_STORIES: u32 = 3;

/// How the sources of a multi-story wallset are obtained.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StoryMethod {
    /// One source image, treated as a vertically repeating tile and sliced per story.
    #[default]
    Tiled,
    /// One source image, reused unchanged for every story.
    #[serde(rename = "Single File")]
    SingleFile,
    /// One source image per story.
    #[serde(rename = "Individual Files")]
    IndividualFiles,
}

impl std::str::FromStr for StoryMethod {
    type Err = WallgenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "tiled" => Ok(Self::Tiled),
            "singlefile" => Ok(Self::SingleFile),
            "individualfiles" => Ok(Self::IndividualFiles),
            _ => Err(WallgenError::validation(format!("unknown story method \"{s}\""))),
        }
    }
}

/// Which source files feed a generation request.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSelection {
    /// Source slots; slot `i` feeds story `i + 1` in individual-files mode.
    pub sources: Vec<Option<PathBuf>>,
    /// Number of stories, `1..=3`.
    pub story_count: u32,
    /// How multi-story sources are obtained.
    pub story_method: StoryMethod,
}

impl FileSelection {
    /// Single-story selection of one file.
    pub fn single(path: impl Into<PathBuf>) -> Self {
        Self {
            sources: vec![Some(path.into())],
            story_count: 1,
            story_method: StoryMethod::Tiled,
        }
    }

    /// Reject story counts and slot lists outside the supported range.
    pub fn validate(&self) -> WallgenResult<()> {
        if !(1..=MAX_STORIES).contains(&self.story_count) {
            return Err(WallgenError::validation(format!(
                "story count must be within 1..={MAX_STORIES}, got {}",
                self.story_count
            )));
        }
        if self.sources.len() > MAX_STORIES as usize {
            return Err(WallgenError::validation(format!(
                "at most {MAX_STORIES} source files can be selected"
            )));
        }
        Ok(())
    }

    fn primary(&self) -> WallgenResult<&PathBuf> {
        self.sources
            .first()
            .and_then(Option::as_ref)
            .ok_or_else(|| WallgenError::source_not_found("no source image selected"))
    }
}

/// Runs the generator once per story.
#[derive(Clone, Copy, Debug, Default)]
pub struct WallGenerationService;

impl WallGenerationService {
    /// Decode the selected sources and generate every story, ground story first.
    #[tracing::instrument(skip(self, params, profile), fields(profile = %profile.name()))]
    pub fn fetch_images(
        &self,
        selection: &FileSelection,
        params: &PostProcessingParameters,
        profile: &ResolutionProfile,
    ) -> WallgenResult<StorySequence> {
        selection.validate()?;
        let generator = Generator::new(profile, params.clone())?;
        let stories = selection.story_count;

        if stories == 1 {
            let source = load_source(selection.primary()?)?;
            return Ok(vec![generator.generate(&source, 1, 1)?]);
        }

        let mut out = StorySequence::with_capacity(stories as usize);
        match selection.story_method {
            StoryMethod::Tiled => {
                let source = load_source(selection.primary()?)?;
                for story in 1..=stories {
                    out.push(generator.generate(&source, story, stories)?);
                }
            }
            StoryMethod::SingleFile => {
                let source = load_source(selection.primary()?)?;
                for story in 1..=stories {
                    out.push(generator.generate(&source, story, 1)?);
                }
            }
            StoryMethod::IndividualFiles => {
                let slots = selection.sources.iter().take(stories as usize);
                if slots.flatten().next().is_none() {
                    return Err(WallgenError::source_not_found(
                        "no source file selected for any story",
                    ));
                }
                for story in 1..=stories {
                    let slot = selection.sources.get(story as usize - 1).and_then(Option::as_ref);
                    let source: RgbaImage = match slot {
                        Some(path) => load_source(path)?,
                        None => {
                            tracing::info!(story, "empty source slot, using placeholder");
                            placeholder()
                        }
                    };
                    out.push(generator.generate(&source, story, 1)?);
                }
            }
        }
        tracing::info!(stories = out.len(), method = ?selection.story_method, "stories generated");
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/generate/service.rs"]
mod tests;
