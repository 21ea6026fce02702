//! Per-story wall set generation.

use image::RgbaImage;

use crate::config::profile::{ResolutionProfile, TransformKey, WallSizeKey};
use crate::foundation::core::Size;
use crate::foundation::error::{WallgenError, WallgenResult};
use crate::generate::params::PostProcessingParameters;
use crate::generate::segment::{WallSegment, WallSet};
use crate::generate::stacking::stack_stories;
use crate::ops::composite::crop;
use crate::ops::{GradientDirection, darken, warp};

/// Turns one source image into the segments of one story.
///
/// Borrowing the profile keeps wall sizes, transforms and footprints shared across stories.
pub struct Generator<'a> {
    profile: &'a ResolutionProfile,
    params: PostProcessingParameters,
}

impl<'a> Generator<'a> {
    /// Generator for `profile` with validated `params`.
    pub fn new(profile: &'a ResolutionProfile, params: PostProcessingParameters) -> WallgenResult<Self> {
        params.validate()?;
        Ok(Self { profile, params })
    }

    /// Processing parameters in use.
    pub fn params(&self) -> &PostProcessingParameters {
        &self.params
    }

    /// Generate the wall set for `story` (1 = ground).
    ///
    /// With `stories_if_tiled > 1` the source is one tile of a vertically repeated texture and
    /// only its slice for `story` is used. Above the ground story every segment is stacked to
    /// `story` tiers along its opaque footprint.
    #[tracing::instrument(skip(self, source), fields(profile = %self.profile.name()))]
    pub fn generate(
        &self,
        source: &RgbaImage,
        story: u32,
        stories_if_tiled: u32,
    ) -> WallgenResult<WallSet> {
        if story == 0 {
            return Err(WallgenError::validation("story index starts at 1"));
        }
        if stories_if_tiled > 1 && story > stories_if_tiled {
            return Err(WallgenError::validation(format!(
                "story {story} is outside a {stories_if_tiled}-story tile"
            )));
        }

        let p = &self.params;
        let blend = p.blend_color;
        let cf = self.profile.wall_size(WallSizeKey::CloseFront)?;
        let cfs = self.profile.wall_size(WallSizeKey::CloseFrontSide)?;
        let nf = self.profile.wall_size(WallSizeKey::NearFront)?;
        let nfs = self.profile.wall_size(WallSizeKey::NearFrontSide)?;
        let ff = self.profile.wall_size(WallSizeKey::FarFront)?;

        let sliced;
        let source = if stories_if_tiled > 1 {
            sliced = self.tile_slice(source, story, stories_if_tiled, cf)?;
            &sliced
        } else {
            source
        };

        let base = p.resize(source, cf)?;
        let half_w = base.width() / 2;
        let left_half = crop(&base, 0, 0, half_w, base.height());
        let right_half = crop(&base, half_w, 0, half_w, base.height());

        let mut set = WallSet::new();
        set.insert(
            WallSegment::CloseFrontLeft,
            crop(&base, 0, 0, cfs.width, base.height()),
        );
        set.insert(
            WallSegment::CloseFrontRight,
            crop(&base, base.width() - cfs.width, 0, cfs.width, base.height()),
        );

        let near_plain = p.resize(&base, nf)?;
        let near = darken(
            &near_plain,
            p.near_darkening,
            p.near_darkening,
            GradientDirection::LeftToRight,
            blend,
        );
        set.insert(
            WallSegment::NearFrontLeft,
            crop(&near, 0, 0, nfs.width, near.height()),
        );
        set.insert(
            WallSegment::NearFrontRight,
            crop(&near, near.width() - nfs.width, 0, nfs.width, near.height()),
        );

        let far = darken(
            &p.resize(&near_plain, ff)?,
            p.far_darkening,
            p.far_darkening,
            GradientDirection::LeftToRight,
            blend,
        );
        set.insert(WallSegment::FarFrontSecondary, far.clone());
        set.insert(WallSegment::FarFront, far);
        set.insert(WallSegment::NearFront, near);

        let close_side = self.profile.wall_size(WallSizeKey::CloseSide)?;
        set.insert(
            WallSegment::CloseLeft,
            warp(&right_half, close_side, self.profile.transform(TransformKey::CloseLeft)?),
        );
        set.insert(
            WallSegment::CloseRight,
            warp(&left_half, close_side, self.profile.transform(TransformKey::CloseRight)?),
        );

        let near_side = self.profile.wall_size(WallSizeKey::NearSide)?;
        for (segment, key, dir) in [
            (WallSegment::NearLeft, TransformKey::NearLeft, GradientDirection::LeftToRight),
            (WallSegment::NearRight, TransformKey::NearRight, GradientDirection::RightToLeft),
        ] {
            let shaded = darken(&base, 0.0, p.near_darkening, dir, blend);
            set.insert(segment, warp(&shaded, near_side, self.profile.transform(key)?));
        }

        let far_side = self.profile.wall_size(WallSizeKey::FarSide)?;
        for (segment, key, dir) in [
            (WallSegment::FarLeft, TransformKey::FarLeft, GradientDirection::LeftToRight),
            (WallSegment::FarRight, TransformKey::FarRight, GradientDirection::RightToLeft),
        ] {
            let shaded = darken(&near_plain, p.near_darkening, p.far_darkening, dir, blend);
            set.insert(segment, warp(&shaded, far_side, self.profile.transform(key)?));
        }

        set.insert(WallSegment::CloseFront, base);

        if story > 1 {
            return self.stack(set, story);
        }
        Ok(set)
    }

    // Scale the tile to `stories` CloseFront heights and cut out the slice for `story`,
    // counting from the bottom.
    fn tile_slice(
        &self,
        source: &RgbaImage,
        story: u32,
        stories: u32,
        cf: Size,
    ) -> WallgenResult<RgbaImage> {
        let tall_h = cf
            .height
            .checked_mul(stories)
            .ok_or_else(|| WallgenError::scaling("tiled source height overflows"))?;
        let tall = self.params.resize(source, Size::new(cf.width, tall_h))?;
        let y = (stories - story) * cf.height;
        tracing::debug!(story, stories, y, "tile slice");
        Ok(crop(&tall, 0, y, cf.width, cf.height))
    }

    fn stack(&self, set: WallSet, story: u32) -> WallgenResult<WallSet> {
        let mut stacked = WallSet::new();
        for (segment, image) in set.iter() {
            let fp = self.profile.footprint(segment)?;
            stacked.insert(segment, stack_stories(image, fp, story)?);
        }
        Ok(stacked)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/generate/generator.rs"]
mod tests;
