//! Resolution profiles: wall sizes, transforms, output layouts and footprints.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::foundation::core::{PixelRect, Size};
use crate::foundation::error::{WallgenError, WallgenResult};
use crate::generate::segment::WallSegment;
use crate::geometry::footprint::Footprint;
use crate::geometry::homography::QuadTransform;

/// Named target size used by the generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WallSizeKey {
    /// Straight-on close front; every source is first scaled to this.
    CloseFront,
    /// Width of the close front edge strips.
    CloseFrontSide,
    /// Near front.
    NearFront,
    /// Width of the near front edge strips.
    NearFrontSide,
    /// Far front.
    FarFront,
    /// Buffer for the close side walls.
    CloseSide,
    /// Buffer for the near side walls.
    NearSide,
    /// Buffer for the far side walls.
    FarSide,
}

impl WallSizeKey {
    /// Every size a profile must define.
    pub const ALL: [Self; 8] = [
        Self::CloseFront,
        Self::CloseFrontSide,
        Self::NearFront,
        Self::NearFrontSide,
        Self::FarFront,
        Self::CloseSide,
        Self::NearSide,
        Self::FarSide,
    ];
}

/// Named perspective transform used by the generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TransformKey {
    /// Right half of the close front onto the left close side wall.
    CloseLeft,
    /// Left half of the close front onto the right close side wall.
    CloseRight,
    /// Close front onto the left near side wall.
    NearLeft,
    /// Close front onto the right near side wall.
    NearRight,
    /// Near front onto the left far side wall.
    FarLeft,
    /// Near front onto the right far side wall.
    FarRight,
}

impl TransformKey {
    /// Every transform a profile must define.
    pub const ALL: [Self; 6] = [
        Self::CloseLeft,
        Self::CloseRight,
        Self::NearLeft,
        Self::NearRight,
        Self::FarLeft,
        Self::FarRight,
    ];
}

/// Wall segment name to pixel size, complete for every [`WallSizeKey`].
#[derive(Clone, Debug, PartialEq)]
pub struct WallSizeTable {
    sizes: BTreeMap<WallSizeKey, Size>,
}

impl WallSizeTable {
    /// Validate that every key is present and non-empty.
    pub fn new(sizes: BTreeMap<WallSizeKey, Size>) -> WallgenResult<Self> {
        for key in WallSizeKey::ALL {
            match sizes.get(&key) {
                None => {
                    return Err(WallgenError::validation(format!(
                        "wall size {key:?} is not configured"
                    )));
                }
                Some(s) if s.is_empty() => {
                    return Err(WallgenError::validation(format!(
                        "wall size {key:?} is empty ({s})"
                    )));
                }
                Some(_) => {}
            }
        }
        Ok(Self { sizes })
    }

    /// Size for `key`.
    pub fn get(&self, key: WallSizeKey) -> WallgenResult<Size> {
        self.sizes
            .get(&key)
            .copied()
            .ok_or_else(|| WallgenError::validation(format!("wall size {key:?} is not configured")))
    }
}

/// Transform name to homography, complete for every [`TransformKey`].
#[derive(Clone, Debug, PartialEq)]
pub struct TransformTable {
    transforms: BTreeMap<TransformKey, QuadTransform>,
}

impl TransformTable {
    /// Build every transform from its 16 control coordinates.
    pub fn from_coords(coords: &BTreeMap<TransformKey, [f64; 16]>) -> WallgenResult<Self> {
        let mut transforms = BTreeMap::new();
        for key in TransformKey::ALL {
            let c = coords.get(&key).ok_or_else(|| {
                WallgenError::validation(format!("transform {key:?} is not configured"))
            })?;
            let t = QuadTransform::from_coords(c)
                .map_err(|e| WallgenError::geometry(format!("transform {key:?}: {e}")))?;
            transforms.insert(key, t);
        }
        Ok(Self { transforms })
    }

    /// Transform for `key`.
    pub fn get(&self, key: TransformKey) -> WallgenResult<&QuadTransform> {
        self.transforms
            .get(&key)
            .ok_or_else(|| WallgenError::validation(format!("transform {key:?} is not configured")))
    }
}

/// Draw position of a segment inside an atlas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtlasPosition {
    /// Left edge.
    pub x: i64,
    /// Top edge of the ground story.
    pub y: i64,
}

/// Area of the atlas that is cut out (made transparent) and outlined.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransparentRegion {
    /// Segment whose drawing is clipped to this region.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment: Option<WallSegment>,
    /// Left edge.
    pub x: i64,
    /// Top edge.
    pub y: i64,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl TransparentRegion {
    /// Region bounds.
    pub fn rect(&self) -> PixelRect {
        PixelRect::new(self.x, self.y, self.width, self.height)
    }
}

fn default_border_thickness() -> u32 {
    2
}

/// Layout of a single-file atlas.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtlasLayout {
    /// Atlas width.
    pub width: u32,
    /// Atlas height.
    pub height: u32,
    /// Where each segment is drawn.
    pub positions: BTreeMap<WallSegment, AtlasPosition>,
    /// Cut-out regions.
    #[serde(default)]
    pub transparent_regions: Vec<TransparentRegion>,
    /// Number of outline rings drawn around each region.
    #[serde(default = "default_border_thickness")]
    pub border_thickness: u32,
}

impl AtlasLayout {
    /// Atlas dimensions.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Clip rectangle for `segment`: the region tagged with it, if any.
    pub fn clip_for(&self, segment: WallSegment) -> Option<PixelRect> {
        self.transparent_regions
            .iter()
            .find(|r| r.segment == Some(segment))
            .map(TransparentRegion::rect)
    }

    fn validate(&self, output: &str) -> WallgenResult<()> {
        if self.size().is_empty() {
            return Err(WallgenError::validation(format!(
                "output \"{output}\" has an empty atlas size"
            )));
        }
        let mut tagged = std::collections::BTreeSet::new();
        for r in &self.transparent_regions {
            if r.width == 0 || r.height == 0 {
                return Err(WallgenError::validation(format!(
                    "output \"{output}\" has an empty transparent region at {},{}",
                    r.x, r.y
                )));
            }
            if let Some(seg) = r.segment {
                if !tagged.insert(seg) {
                    return Err(WallgenError::validation(format!(
                        "output \"{output}\" tags more than one region with {seg}"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// What kind of files an output writes.
#[derive(Clone, Debug, PartialEq)]
pub enum OutputKind {
    /// One atlas with every segment and story.
    SingleFile(AtlasLayout),
    /// One file per segment per story.
    IndividualFiles,
}

/// A named output of a resolution profile.
#[derive(Clone, Debug, PartialEq)]
pub struct OutputConfig {
    /// Output name (the "output format" offered to users).
    pub name: String,
    /// Whether stories above the ground can be written.
    pub supports_multi_story: bool,
    /// Writer selection and layout.
    pub kind: OutputKind,
}

/// JSON shape of an output entry.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputDef {
    /// Whether stories above the ground can be written.
    #[serde(default)]
    pub supports_multi_story: bool,
    /// Atlas layout, for single-file outputs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub single_file: Option<AtlasLayout>,
    /// Present (as `{}`) for per-segment file outputs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub individual_files: Option<serde_json::Map<String, serde_json::Value>>,
}

fn default_sort_order() -> i64 {
    i64::MAX
}

/// JSON shape of a resolution profile.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDef {
    /// Profile name, e.g. `"640x480"`.
    pub resolution: String,
    /// Menu position; lower sorts first.
    #[serde(default = "default_sort_order")]
    pub sort_order: i64,
    /// Target sizes.
    pub wall_sizes: BTreeMap<WallSizeKey, Size>,
    /// Control points: source `x0,y0..x3,y3` then destination `x0,y0..x3,y3`.
    pub transforms: BTreeMap<TransformKey, [f64; 16]>,
    /// Named outputs.
    #[serde(default)]
    pub outputs: BTreeMap<String, OutputDef>,
}

/// Validated, immutable resolution profile.
#[derive(Clone, Debug)]
pub struct ResolutionProfile {
    name: String,
    sort_order: i64,
    wall_sizes: WallSizeTable,
    transforms: TransformTable,
    outputs: BTreeMap<String, OutputConfig>,
    footprints: BTreeMap<WallSegment, Footprint>,
}

impl ResolutionProfile {
    /// Validate a profile definition and precompute segment footprints.
    pub fn from_def(def: ProfileDef) -> WallgenResult<Self> {
        let name = def.resolution.trim().to_owned();
        if name.is_empty() {
            return Err(WallgenError::validation("profile resolution must not be empty"));
        }
        let in_profile = |e: WallgenError| match e {
            WallgenError::Geometry(m) => WallgenError::geometry(format!("profile \"{name}\": {m}")),
            WallgenError::Validation(m) => {
                WallgenError::validation(format!("profile \"{name}\": {m}"))
            }
            other => other,
        };

        let wall_sizes = WallSizeTable::new(def.wall_sizes).map_err(in_profile)?;
        check_strip_width(&wall_sizes, WallSizeKey::CloseFrontSide, WallSizeKey::CloseFront)
            .map_err(in_profile)?;
        check_strip_width(&wall_sizes, WallSizeKey::NearFrontSide, WallSizeKey::NearFront)
            .map_err(in_profile)?;
        if wall_sizes.get(WallSizeKey::CloseFront)?.width < 2 {
            return Err(in_profile(WallgenError::validation(
                "CloseFront must be at least 2 pixels wide",
            )));
        }
        let transforms = TransformTable::from_coords(&def.transforms).map_err(in_profile)?;

        let mut outputs = BTreeMap::new();
        for (output_name, out) in def.outputs {
            let kind = match (out.single_file, out.individual_files) {
                (Some(layout), None) => {
                    layout.validate(&output_name).map_err(in_profile)?;
                    OutputKind::SingleFile(layout)
                }
                (None, Some(_)) => OutputKind::IndividualFiles,
                _ => {
                    return Err(in_profile(WallgenError::validation(format!(
                        "output \"{output_name}\" must be exactly one of singleFile or individualFiles"
                    ))));
                }
            };
            outputs.insert(
                output_name.clone(),
                OutputConfig {
                    name: output_name,
                    supports_multi_story: out.supports_multi_story,
                    kind,
                },
            );
        }

        let mut profile = Self {
            name,
            sort_order: def.sort_order,
            wall_sizes,
            transforms,
            outputs,
            footprints: BTreeMap::new(),
        };
        for seg in WallSegment::ALL {
            let fp = profile.compute_footprint(seg)?;
            tracing::debug!(
                profile = %profile.name,
                segment = %seg,
                size = %fp.size(),
                covered_columns = fp.covered_columns(),
                "segment footprint"
            );
            profile.footprints.insert(seg, fp);
        }
        Ok(profile)
    }

    /// Profile name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Menu position.
    pub fn sort_order(&self) -> i64 {
        self.sort_order
    }

    /// Size for `key`.
    pub fn wall_size(&self, key: WallSizeKey) -> WallgenResult<Size> {
        self.wall_sizes.get(key)
    }

    /// Transform for `key`.
    pub fn transform(&self, key: TransformKey) -> WallgenResult<&QuadTransform> {
        self.transforms.get(key)
    }

    /// Output config by name.
    pub fn output(&self, name: &str) -> Option<&OutputConfig> {
        self.outputs.get(name)
    }

    /// Output names, sorted.
    pub fn output_names(&self) -> impl Iterator<Item = &str> {
        self.outputs.keys().map(String::as_str)
    }

    /// Opaque footprint of a single-story `segment`.
    pub fn footprint(&self, segment: WallSegment) -> WallgenResult<&Footprint> {
        self.footprints.get(&segment).ok_or_else(|| {
            WallgenError::validation(format!("no footprint for segment {segment}"))
        })
    }

    /// Size of the single-story image produced for `segment`.
    pub fn segment_size(&self, segment: WallSegment) -> WallgenResult<Size> {
        let cf = self.wall_size(WallSizeKey::CloseFront)?;
        let nf = self.wall_size(WallSizeKey::NearFront)?;
        Ok(match segment {
            WallSegment::CloseFront => cf,
            WallSegment::CloseFrontLeft | WallSegment::CloseFrontRight => {
                Size::new(self.wall_size(WallSizeKey::CloseFrontSide)?.width, cf.height)
            }
            WallSegment::NearFront => nf,
            WallSegment::NearFrontLeft | WallSegment::NearFrontRight => {
                Size::new(self.wall_size(WallSizeKey::NearFrontSide)?.width, nf.height)
            }
            WallSegment::FarFront | WallSegment::FarFrontSecondary => {
                self.wall_size(WallSizeKey::FarFront)?
            }
            WallSegment::CloseLeft | WallSegment::CloseRight => {
                self.wall_size(WallSizeKey::CloseSide)?
            }
            WallSegment::NearLeft | WallSegment::NearRight => {
                self.wall_size(WallSizeKey::NearSide)?
            }
            WallSegment::FarLeft | WallSegment::FarRight => self.wall_size(WallSizeKey::FarSide)?,
        })
    }

    /// Source size and transform for warped segments, `None` for plain crops and fronts.
    pub fn warp_source(
        &self,
        segment: WallSegment,
    ) -> WallgenResult<Option<(Size, &QuadTransform)>> {
        let cf = self.wall_size(WallSizeKey::CloseFront)?;
        let nf = self.wall_size(WallSizeKey::NearFront)?;
        let half = Size::new(cf.width / 2, cf.height);
        let (source, key) = match segment {
            WallSegment::CloseLeft => (half, TransformKey::CloseLeft),
            WallSegment::CloseRight => (half, TransformKey::CloseRight),
            WallSegment::NearLeft => (cf, TransformKey::NearLeft),
            WallSegment::NearRight => (cf, TransformKey::NearRight),
            WallSegment::FarLeft => (nf, TransformKey::FarLeft),
            WallSegment::FarRight => (nf, TransformKey::FarRight),
            _ => return Ok(None),
        };
        Ok(Some((source, self.transform(key)?)))
    }

    fn compute_footprint(&self, segment: WallSegment) -> WallgenResult<Footprint> {
        let dest = self.segment_size(segment)?;
        Ok(match self.warp_source(segment)? {
            Some((source, t)) => Footprint::of_warp(t, source, dest),
            None => Footprint::full(dest),
        })
    }
}

fn check_strip_width(table: &WallSizeTable, strip: WallSizeKey, of: WallSizeKey) -> WallgenResult<()> {
    let s = table.get(strip)?;
    let f = table.get(of)?;
    if s.width > f.width {
        return Err(WallgenError::validation(format!(
            "{strip:?} width {} exceeds {of:?} width {}",
            s.width, f.width
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/config/profile.rs"]
mod tests;
