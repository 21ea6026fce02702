//! Output writers and the preview strip.

use std::path::{Path, PathBuf};

use crate::config::colors::OutputColors;
use crate::config::manager::OutputFileType;
use crate::config::profile::{OutputConfig, OutputKind};
use crate::foundation::error::WallgenResult;
use crate::generate::segment::WallSet;

pub mod atlas;
pub mod caption;
/// File naming and encoding.
pub mod format;
/// One file per segment.
pub mod individual;
/// Preview strip.
pub mod preview;

pub use atlas::SingleFileOutputGenerator;
pub use individual::IndividualFileOutputGenerator;
pub use preview::PreviewGenerationService;

/// Where and how output files are written.
#[derive(Clone, Copy, Debug)]
pub struct OutputRequest<'a> {
    /// Existing directory receiving the files.
    pub target_dir: &'a Path,
    /// Base file name; spaces become underscores.
    pub base_name: &'a str,
    /// Encoder.
    pub file_type: &'a OutputFileType,
    /// Requested alpha transparency.
    pub use_transparency: bool,
    /// Colors for backgrounds, borders, captions and color keys.
    pub colors: &'a OutputColors,
}

impl OutputRequest<'_> {
    /// Transparency as honored by the file type.
    pub fn effective_transparency(&self) -> bool {
        self.use_transparency && self.file_type.supports_transparency()
    }
}

/// Writes a generated story sequence to disk.
pub trait OutputGenerator {
    /// Write `stories` (ground story first) and return the written paths.
    fn generate(&self, req: &OutputRequest<'_>, stories: &[WallSet]) -> WallgenResult<Vec<PathBuf>>;
}

/// Writer implementation for an output config.
pub fn create_generator(config: &OutputConfig) -> Box<dyn OutputGenerator + '_> {
    match &config.kind {
        OutputKind::SingleFile(layout) => Box::new(SingleFileOutputGenerator::new(layout)),
        OutputKind::IndividualFiles => Box::new(IndividualFileOutputGenerator),
    }
}
