//! Homogeneous 4×4 matrix construction and application.
//!
//! Every matrix in this crate is a [`DMat4`] describing an affine map in
//! homogeneous coordinates. glam stores matrices column-major; the row-major
//! view used for display and for the construction tables below is available
//! through [`to_rows`] and [`from_rows`].
//!
//! ```
//! use affine_viz::matrix::{self, Axis};
//! use affine_viz::DVec3;
//!
//! let m = matrix::multiply(&matrix::translation(1.0, 0.0, 0.0), &matrix::scaling(2.0, 2.0, 2.0));
//! let p = matrix::apply_to_point(&m, DVec3::ONE);
//! assert_eq!(p, DVec3::new(3.0, 2.0, 2.0));
//!
//! let r = matrix::rotation(Axis::Z, 90.0);
//! let q = matrix::apply_to_point(&r, DVec3::X);
//! assert!((q - DVec3::Y).length() < 1e-9);
//! ```
//!
//! # Row 3
//!
//! All constructors leave the bottom row at `[0, 0, 0, 1]`, and the product of
//! two such matrices keeps it there. [`apply_to_point`] still divides by the
//! resulting `w` so a caller-supplied projective matrix is handled (or fails
//! visibly with non-finite output when `w` is zero).

use glam::{DMat4, DVec3, DVec4};
use std::fmt;
use std::str::FromStr;

use crate::transform::TransformError;

/// A principal rotation axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in `X, Y, Z` order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Lowercase axis name, as used in transformation labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }

    /// Unit vector along this axis.
    pub fn unit(&self) -> DVec3 {
        match self {
            Axis::X => DVec3::X,
            Axis::Y => DVec3::Y,
            Axis::Z => DVec3::Z,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Axis {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            "z" => Ok(Axis::Z),
            _ => Err(TransformError::UnknownAxis(s.to_string())),
        }
    }
}

/// Builds a matrix from row-major rows.
pub fn from_rows(rows: [[f64; 4]; 4]) -> DMat4 {
    DMat4::from_cols_array_2d(&rows).transpose()
}

/// Returns the row-major rows of a matrix.
pub fn to_rows(m: &DMat4) -> [[f64; 4]; 4] {
    m.transpose().to_cols_array_2d()
}

/// Returns the 4×4 identity.
pub fn identity() -> DMat4 {
    DMat4::IDENTITY
}

/// Translation by `(dx, dy, dz)`.
#[rustfmt::skip]
pub fn translation(dx: f64, dy: f64, dz: f64) -> DMat4 {
    from_rows([
        [1.0, 0.0, 0.0, dx],
        [0.0, 1.0, 0.0, dy],
        [0.0, 0.0, 1.0, dz],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Axis-aligned scaling by `(sx, sy, sz)`.
///
/// Negative factors reflect. A zero factor collapses that axis; the result is
/// not invertible, which is fine because nothing here ever inverts a matrix.
#[rustfmt::skip]
pub fn scaling(sx: f64, sy: f64, sz: f64) -> DMat4 {
    from_rows([
        [sx,  0.0, 0.0, 0.0],
        [0.0, sy,  0.0, 0.0],
        [0.0, 0.0, sz,  0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Right-handed rotation about `axis` by `degrees`.
///
/// A positive angle turns counter-clockwise when looking from the positive end
/// of the axis toward the origin.
#[rustfmt::skip]
pub fn rotation(axis: Axis, degrees: f64) -> DMat4 {
    let rad = degrees.to_radians();
    let (s, c) = rad.sin_cos();

    let rows = match axis {
        Axis::X => [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c,   -s,  0.0],
            [0.0, s,   c,   0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
        Axis::Y => [
            [c,   0.0, s,   0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-s,  0.0, c,   0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
        Axis::Z => [
            [c,   -s,  0.0, 0.0],
            [s,   c,   0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    from_rows(rows)
}

/// Matrix product `a · b`. Not commutative: `b` acts on a point first.
pub fn multiply(a: &DMat4, b: &DMat4) -> DMat4 {
    *a * *b
}

/// Applies `m` to a point in homogeneous coordinates.
///
/// The point is lifted to `(x, y, z, 1)`, multiplied, and the first three
/// components are divided by the resulting `w`. A `w` of zero produces
/// infinities or NaN, which are returned as-is.
pub fn apply_to_point(m: &DMat4, v: DVec3) -> DVec3 {
    let h = *m * DVec4::new(v.x, v.y, v.z, 1.0);
    h.truncate() / h.w
}

/// Applies `m` to every vertex, preserving order and length.
pub fn apply_to_vertices(m: &DMat4, vertices: &[DVec3]) -> Vec<DVec3> {
    vertices.iter().map(|&v| apply_to_point(m, v)).collect()
}

/// Applies the combined transformation matrix to a figure's baseline.
///
/// Always called with the untransformed baseline so replaying the same history
/// reproduces the same output bit-for-bit.
pub fn apply(combined: &DMat4, base: &[DVec3]) -> Vec<DVec3> {
    apply_to_vertices(combined, base)
}

/// True when the bottom row is exactly `[0, 0, 0, 1]`.
pub fn is_affine(m: &DMat4) -> bool {
    m.row(3) == DVec4::W
}
