//! Per-column opaque footprints of wall segments.
//!
//! A warped segment only covers a trapezoid inside its rectangular buffer. Story stacking has to
//! line up those opaque regions, not the buffer edges, so each segment carries a table of the
//! first and last covered row for every column.

use crate::foundation::core::Size;
use crate::geometry::homography::QuadTransform;

/// Inclusive row interval covered in one column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnSpan {
    /// First covered row.
    pub start: u32,
    /// Last covered row (inclusive).
    pub end: u32,
}

impl ColumnSpan {
    /// Number of covered rows.
    pub fn len(self) -> u32 {
        self.end - self.start + 1
    }
}

/// Opaque footprint of a segment: one optional span per column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Footprint {
    size: Size,
    columns: Vec<Option<ColumnSpan>>,
}

impl Footprint {
    /// Footprint of an unwarped rectangle: every column fully covered.
    pub fn full(size: Size) -> Self {
        let span = (size.height > 0).then(|| ColumnSpan {
            start: 0,
            end: size.height - 1,
        });
        Self {
            size,
            columns: vec![span; size.width as usize],
        }
    }

    /// Footprint of `source`-sized opaque content warped into a `dest`-sized buffer.
    pub fn of_warp(transform: &QuadTransform, source: Size, dest: Size) -> Self {
        let columns = (0..dest.width)
            .map(|x| {
                let mut span: Option<ColumnSpan> = None;
                for y in 0..dest.height {
                    if transform.source_pixel(x, y, source).is_some() {
                        span = Some(match span {
                            None => ColumnSpan { start: y, end: y },
                            Some(s) => ColumnSpan { start: s.start, end: y },
                        });
                    }
                }
                span
            })
            .collect();
        Self {
            size: dest,
            columns,
        }
    }

    /// Footprint read back from an image: rows with non-zero alpha.
    #[cfg(test)]
    pub(crate) fn from_alpha(image: &image::RgbaImage) -> Self {
        let (w, h) = image.dimensions();
        let columns = (0..w)
            .map(|x| {
                let first = (0..h).find(|&y| image.get_pixel(x, y)[3] != 0)?;
                let last = (0..h).rev().find(|&y| image.get_pixel(x, y)[3] != 0)?;
                Some(ColumnSpan {
                    start: first,
                    end: last,
                })
            })
            .collect();
        Self {
            size: Size::new(w, h),
            columns,
        }
    }

    /// Buffer size the footprint was computed for.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Span of column `x`, `None` if the column is empty or out of range.
    pub fn column(&self, x: u32) -> Option<ColumnSpan> {
        self.columns.get(x as usize).copied().flatten()
    }

    /// Number of columns with at least one covered row.
    pub fn covered_columns(&self) -> usize {
        self.columns.iter().filter(|c| c.is_some()).count()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/footprint.rs"]
mod tests;
