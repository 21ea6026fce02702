pub mod generator;
/// Post-processing parameters.
pub mod params;
/// Wall segment names and sets.
pub mod segment;
pub mod service;
/// Multi-story stacking.
pub mod stacking;

pub use generator::Generator;
pub use params::{FilterOrder, PostProcessingParameters};
pub use segment::{StorySequence, WallSegment, WallSet};
pub use service::{FileSelection, StoryMethod, WallGenerationService};
