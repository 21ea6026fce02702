//! Quad-to-quad perspective transforms.

use crate::foundation::core::{Point, Size};
use crate::foundation::error::{WallgenError, WallgenResult};

/// Smallest pivot / determinant accepted before a system is treated as singular.
const SINGULAR_EPS: f64 = 1e-12;
/// Absorbs round-off so corners that map exactly onto pixel edges stay inside.
const SAMPLE_EPS: f64 = 1e-9;

/// A homography mapping one quadrilateral onto another.
///
/// Points are given in the same winding order for both quads; corner `i` of the source maps to
/// corner `i` of the destination. Construction rejects degenerate quads (three collinear
/// corners) and non-invertible systems, so `map` and `inverse_map` are always well defined up to
/// points on the horizon line.
#[derive(Clone, Debug, PartialEq)]
pub struct QuadTransform {
    forward: [f64; 9],
    inverse: [f64; 9],
}

impl QuadTransform {
    /// Build the transform taking `src[i]` to `dst[i]` for all four corners.
    pub fn quad_to_quad(src: [Point; 4], dst: [Point; 4]) -> WallgenResult<Self> {
        check_quad("source", &src)?;
        check_quad("destination", &dst)?;

        let forward = solve_homography(&src, &dst)?;
        let inverse = invert(&forward)?;
        Ok(Self {
            forward,
            inverse,
        })
    }

    /// Build from 16 numbers: source `x0,y0 .. x3,y3` followed by destination `x0,y0 .. x3,y3`.
    pub fn from_coords(c: &[f64; 16]) -> WallgenResult<Self> {
        let pt = |i: usize| Point::new(c[2 * i], c[2 * i + 1]);
        Self::quad_to_quad([pt(0), pt(1), pt(2), pt(3)], [pt(4), pt(5), pt(6), pt(7)])
    }

    /// Map a source-space point into destination space.
    pub fn map(&self, p: Point) -> Option<Point> {
        apply(&self.forward, p)
    }

    /// Map a destination-space point back into source space.
    pub fn inverse_map(&self, p: Point) -> Option<Point> {
        apply(&self.inverse, p)
    }

    /// Source pixel sampled for destination pixel `(x, y)`, nearest-neighbor.
    ///
    /// Returns `None` when the inverse-mapped coordinate falls outside a `source`-sized raster.
    pub fn source_pixel(&self, x: u32, y: u32, source: Size) -> Option<(u32, u32)> {
        let p = self.inverse_map(Point::new(f64::from(x), f64::from(y)))?;
        let sx = (p.x + SAMPLE_EPS).floor();
        let sy = (p.y + SAMPLE_EPS).floor();
        if sx < 0.0 || sy < 0.0 || sx >= f64::from(source.width) || sy >= f64::from(source.height)
        {
            return None;
        }
        Some((sx as u32, sy as u32))
    }
}

fn check_quad(which: &str, quad: &[Point; 4]) -> WallgenResult<()> {
    if quad.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
        return Err(WallgenError::geometry(format!(
            "{which} quad has non-finite coordinates"
        )));
    }

    let extent = quad
        .iter()
        .flat_map(|p| [p.x.abs(), p.y.abs()])
        .fold(1.0f64, f64::max);
    let tol = 1e-9 * extent * extent;

    for skip in 0..4 {
        let tri: Vec<Point> = (0..4).filter(|&i| i != skip).map(|i| quad[i]).collect();
        let cross = (tri[1] - tri[0]).cross(tri[2] - tri[0]);
        if cross.abs() <= tol {
            return Err(WallgenError::geometry(format!(
                "{which} quad is degenerate (three collinear corners)"
            )));
        }
    }
    Ok(())
}

// Direct linear transform with h9 fixed to 1: two equations per correspondence.
fn solve_homography(src: &[Point; 4], dst: &[Point; 4]) -> WallgenResult<[f64; 9]> {
    let mut a = [[0.0f64; 8]; 8];
    let mut b = [0.0f64; 8];

    for i in 0..4 {
        let (x, y) = (src[i].x, src[i].y);
        let (xp, yp) = (dst[i].x, dst[i].y);

        let r1 = i * 2;
        let r2 = r1 + 1;
        a[r1] = [x, y, 1.0, 0.0, 0.0, 0.0, -xp * x, -xp * y];
        b[r1] = xp;
        a[r2] = [0.0, 0.0, 0.0, x, y, 1.0, -yp * x, -yp * y];
        b[r2] = yp;
    }

    let h = solve_linear_system(a, b)?;
    Ok([h[0], h[1], h[2], h[3], h[4], h[5], h[6], h[7], 1.0])
}

fn solve_linear_system(mut a: [[f64; 8]; 8], mut b: [f64; 8]) -> WallgenResult<[f64; 8]> {
    const N: usize = 8;

    for col in 0..N {
        let pivot_row = (col..N)
            .max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))
            .unwrap_or(col);
        if a[pivot_row][col].abs() < SINGULAR_EPS {
            return Err(WallgenError::geometry(
                "perspective transform system is singular",
            ));
        }
        a.swap(col, pivot_row);
        b.swap(col, pivot_row);

        for row in (col + 1)..N {
            let factor = a[row][col] / a[col][col];
            for k in col..N {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = [0.0f64; N];
    for row in (0..N).rev() {
        let mut acc = b[row];
        for k in (row + 1)..N {
            acc -= a[row][k] * x[k];
        }
        x[row] = acc / a[row][row];
    }

    if x.iter().any(|v| !v.is_finite()) {
        return Err(WallgenError::geometry(
            "perspective transform has non-finite coefficients",
        ));
    }
    Ok(x)
}

fn invert(h: &[f64; 9]) -> WallgenResult<[f64; 9]> {
    let det = h[0] * (h[4] * h[8] - h[5] * h[7]) - h[1] * (h[3] * h[8] - h[5] * h[6])
        + h[2] * (h[3] * h[7] - h[4] * h[6]);
    if !det.is_finite() || det.abs() < SINGULAR_EPS {
        return Err(WallgenError::geometry(
            "perspective transform is not invertible",
        ));
    }

    let adj = [
        h[4] * h[8] - h[5] * h[7],
        -(h[1] * h[8] - h[2] * h[7]),
        h[1] * h[5] - h[2] * h[4],
        -(h[3] * h[8] - h[5] * h[6]),
        h[0] * h[8] - h[2] * h[6],
        -(h[0] * h[5] - h[2] * h[3]),
        h[3] * h[7] - h[4] * h[6],
        -(h[0] * h[7] - h[1] * h[6]),
        h[0] * h[4] - h[1] * h[3],
    ];
    Ok(adj.map(|v| v / det))
}

fn apply(h: &[f64; 9], p: Point) -> Option<Point> {
    let w = h[6] * p.x + h[7] * p.y + h[8];
    if w.abs() < 1e-12 {
        return None;
    }
    let x = (h[0] * p.x + h[1] * p.y + h[2]) / w;
    let y = (h[3] * p.x + h[4] * p.y + h[5]) / w;
    Some(Point::new(x, y))
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/homography.rs"]
mod tests;
