//! Wallset generator for tile-based games.
//!
//! A flat source texture is resized, perspective-warped and darkened into the fourteen wall
//! segments a first-person dungeon view is assembled from. Segments can be stacked into
//! multi-story walls and written as one atlas, as one file per segment, or composed into a
//! preview strip:
//!
//! - Load a [`ConfigManager`] and pick a [`ResolutionProfile`]
//! - Generate a [`StorySequence`] with [`WallGenerationService`] (or through a
//!   [`WallsetSession`], which also validates and writes output requests)
//! - Write it with the [`output::OutputGenerator`] matching the profile's output config
#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Source image decoding.
pub mod assets;
/// Resolution profiles, output file types, colors and presets.
pub mod config;
/// Core value types, errors and pixel math.
pub mod foundation;
/// Wall segments, post-processing and per-story generation.
pub mod generate;
/// Perspective transforms and opaque footprints.
pub mod geometry;
/// Pixel operations.
pub mod ops;
pub mod output;
pub mod session;

pub use crate::config::{ConfigManager, OutputColors, OutputFileType, Presets, ResolutionProfile};
pub use crate::foundation::core::{PixelRect, Rgb8, Size};
pub use crate::foundation::error::{WallgenError, WallgenResult};
pub use crate::generate::{
    FileSelection, Generator, PostProcessingParameters, StoryMethod, StorySequence,
    WallGenerationService, WallSegment, WallSet,
};
pub use crate::ops::{ScalingMethod, UnsharpenLevel};
pub use crate::output::{
    IndividualFileOutputGenerator, OutputGenerator, OutputRequest, PreviewGenerationService,
    SingleFileOutputGenerator, create_generator,
};
pub use crate::session::{GenerationInputs, OutputTarget, WallsetSession};
