use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::foundation::error::{WallgenError, WallgenResult};

/// One named piece of a wallset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WallSegment {
    /// Close side wall on the left, warped from the right half of the front.
    CloseLeft,
    /// Left edge strip of the close front.
    CloseFrontLeft,
    /// The straight-on close front.
    CloseFront,
    /// Right edge strip of the close front.
    CloseFrontRight,
    /// Close side wall on the right, warped from the left half of the front.
    CloseRight,
    /// Near side wall on the left.
    NearLeft,
    /// Left edge strip of the near front.
    NearFrontLeft,
    /// The near front.
    NearFront,
    /// Right edge strip of the near front.
    NearFrontRight,
    /// Near side wall on the right.
    NearRight,
    /// Far side wall on the left.
    FarLeft,
    /// The far front.
    FarFront,
    /// Second copy of the far front, for atlases that place it twice.
    FarFrontSecondary,
    /// Far side wall on the right.
    FarRight,
}

impl WallSegment {
    /// Every segment a generator produces.
    pub const ALL: [Self; 14] = [
        Self::CloseLeft,
        Self::CloseFrontLeft,
        Self::CloseFront,
        Self::CloseFrontRight,
        Self::CloseRight,
        Self::NearLeft,
        Self::NearFrontLeft,
        Self::NearFront,
        Self::NearFrontRight,
        Self::NearRight,
        Self::FarLeft,
        Self::FarFront,
        Self::FarFrontSecondary,
        Self::FarRight,
    ];

    /// Configuration key for this segment.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CloseLeft => "CloseLeft",
            Self::CloseFrontLeft => "CloseFrontLeft",
            Self::CloseFront => "CloseFront",
            Self::CloseFrontRight => "CloseFrontRight",
            Self::CloseRight => "CloseRight",
            Self::NearLeft => "NearLeft",
            Self::NearFrontLeft => "NearFrontLeft",
            Self::NearFront => "NearFront",
            Self::NearFrontRight => "NearFrontRight",
            Self::NearRight => "NearRight",
            Self::FarLeft => "FarLeft",
            Self::FarFront => "FarFront",
            Self::FarFrontSecondary => "FarFrontSecondary",
            Self::FarRight => "FarRight",
        }
    }
}

impl fmt::Display for WallSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WallSegment {
    type Err = WallgenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|seg| seg.as_str() == s)
            .ok_or_else(|| WallgenError::validation(format!("unknown wall segment \"{s}\"")))
    }
}

/// Segment images for one story.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WallSet {
    images: BTreeMap<WallSegment, RgbaImage>,
}

impl WallSet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the image for `segment`.
    pub fn insert(&mut self, segment: WallSegment, image: RgbaImage) {
        self.images.insert(segment, image);
    }

    /// Image for `segment`, if present.
    pub fn get(&self, segment: WallSegment) -> Option<&RgbaImage> {
        self.images.get(&segment)
    }

    /// Image for `segment`, or a validation error naming it.
    pub fn require(&self, segment: WallSegment) -> WallgenResult<&RgbaImage> {
        self.get(segment).ok_or_else(|| {
            WallgenError::validation(format!("wall set has no \"{segment}\" image"))
        })
    }

    /// Segments and images in segment order.
    pub fn iter(&self) -> impl Iterator<Item = (WallSegment, &RgbaImage)> {
        self.images.iter().map(|(k, v)| (*k, v))
    }

    /// Number of segments present.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// `true` when no segment is present.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Per-story wall sets; index 0 is the ground story.
pub type StorySequence = Vec<WallSet>;

#[cfg(test)]
#[path = "../../tests/unit/generate/segment.rs"]
mod tests;
