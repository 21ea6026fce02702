use std::path::PathBuf;

use crate::foundation::error::{WallgenError, WallgenResult};
use crate::generate::segment::{WallSegment, WallSet};
use crate::output::format::{output_path, write_image};
use crate::output::{OutputGenerator, OutputRequest};

/// Writes one file per segment per story.
#[derive(Clone, Copy, Debug, Default)]
pub struct IndividualFileOutputGenerator;

/// File stem for `segment` of 1-based `story`.
pub fn segment_file_stem(base_name: &str, segment: WallSegment, story: usize) -> String {
    if story <= 1 {
        format!("{}_{segment}", base_name.trim())
    } else {
        format!("{}_{segment}_Story{story}", base_name.trim())
    }
}

impl OutputGenerator for IndividualFileOutputGenerator {
    #[tracing::instrument(skip_all, fields(stories = stories.len()))]
    fn generate(&self, req: &OutputRequest<'_>, stories: &[WallSet]) -> WallgenResult<Vec<PathBuf>> {
        if stories.is_empty() {
            return Err(WallgenError::validation("no stories to write"));
        }
        let keep_alpha = req.effective_transparency();
        let ext = req.file_type.extension();
        let mut written = Vec::new();
        for (i, set) in stories.iter().enumerate() {
            for (segment, image) in set.iter() {
                let stem = segment_file_stem(req.base_name, segment, i + 1);
                let path = output_path(req.target_dir, &stem, &ext);
                write_image(image, &path, req.file_type, keep_alpha, req.colors.transparency)?;
                written.push(path);
            }
        }
        tracing::info!(files = written.len(), "individual files written");
        Ok(written)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/output/individual.rs"]
mod tests;
