//! Built-in polyhedra and user-defined figures.
//!
//! A [`Figure`] is a vertex set plus a fixed topology: edges as index pairs and
//! faces as index loops of three or four vertices. Transformations only move
//! vertices; the topology never changes for the lifetime of a figure.
//!
//! # Built-in figures
//!
//! | Kind | Vertices | Edges | Faces |
//! |------|----------|-------|-------|
//! | [`FigureKind::Cube`] | 8 | 12 | 6 quads |
//! | [`FigureKind::TriangularPyramid`] | 4 | 6 | 4 triangles |
//! | [`FigureKind::SquarePyramid`] | 5 | 8 | 1 quad, 4 triangles |
//! | [`FigureKind::Rhombus`] | 6 | 12 | 8 triangles |
//!
//! ```
//! use affine_viz::figure::{Figure, FigureKind};
//!
//! let cube = Figure::new(FigureKind::Cube, 2.0);
//! assert_eq!(cube.vertices.len(), 8);
//! assert_eq!(cube.triangle_indices().len(), 6 * 2 * 3);
//! ```

use glam::DVec3;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Largest vertex count accepted for a user-defined figure.
pub const MAX_CUSTOM_VERTICES: usize = 20;

/// Errors raised when building or validating a figure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FigureError {
    /// Fewer vertices than the figure kind needs.
    #[error("{kind} needs at least {required} vertices, got {actual}")]
    TooFewVertices {
        kind: FigureKind,
        required: usize,
        actual: usize,
    },

    /// More vertices than a user-defined figure may have.
    #[error("at most {max} vertices are allowed, got {actual}")]
    TooManyVertices { max: usize, actual: usize },

    /// A coordinate is NaN or infinite.
    #[error("vertex {index} has a non-finite coordinate")]
    NonFiniteVertex { index: usize },

    /// An edge or face refers to a vertex that does not exist.
    #[error("{element} {index} refers to vertex {vertex}, but only {count} vertices exist")]
    IndexOutOfRange {
        element: &'static str,
        index: usize,
        vertex: usize,
        count: usize,
    },

    /// A face has fewer than three corners.
    #[error("face {index} has {len} corners, need at least 3")]
    DegenerateFace { index: usize, len: usize },

    /// A face has more than four corners.
    #[error("face {index} has {len} corners, at most 4 are supported")]
    UnsupportedFace { index: usize, len: usize },

    /// The figure kind name was not recognized.
    #[error("unknown figure kind: '{0}'")]
    UnknownKind(String),
}

/// The polyhedra the tool knows how to build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FigureKind {
    Cube,
    TriangularPyramid,
    SquarePyramid,
    /// Six-vertex bipyramid: apex, four-vertex middle ring, nadir.
    Rhombus,
}

impl FigureKind {
    pub const ALL: [FigureKind; 4] = [
        FigureKind::Cube,
        FigureKind::TriangularPyramid,
        FigureKind::SquarePyramid,
        FigureKind::Rhombus,
    ];

    /// Number of vertices the built-in figure of this kind has.
    pub fn vertex_count(&self) -> usize {
        match self {
            FigureKind::Cube => 8,
            FigureKind::TriangularPyramid => 4,
            FigureKind::SquarePyramid => 5,
            FigureKind::Rhombus => 6,
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            FigureKind::Cube => "cube",
            FigureKind::TriangularPyramid => "triangular pyramid",
            FigureKind::SquarePyramid => "square pyramid",
            FigureKind::Rhombus => "rhombus",
        }
    }
}

impl fmt::Display for FigureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FigureKind {
    type Err = FigureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        match key.as_str() {
            "cube" => Ok(FigureKind::Cube),
            "triangular_pyramid" | "tetrahedron" => Ok(FigureKind::TriangularPyramid),
            "square_pyramid" => Ok(FigureKind::SquarePyramid),
            "rhombus" | "bipyramid" => Ok(FigureKind::Rhombus),
            _ => Err(FigureError::UnknownKind(s.to_string())),
        }
    }
}

/// A vertex set with fixed edge and face topology.
#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
    /// Which built-in shape this is, if any.
    pub kind: Option<FigureKind>,
    pub vertices: Vec<DVec3>,
    pub edges: Vec<[usize; 2]>,
    /// Index loops of three or four vertices.
    pub faces: Vec<Vec<usize>>,
}

impl Figure {
    /// Builds a figure of `kind` with the given overall size.
    ///
    /// Pyramids are as tall as they are wide; use
    /// [`triangular_pyramid`](Self::triangular_pyramid) or
    /// [`square_pyramid`](Self::square_pyramid) for other heights.
    pub fn new(kind: FigureKind, size: f64) -> Self {
        match kind {
            FigureKind::Cube => Self::cube(size),
            FigureKind::TriangularPyramid => Self::triangular_pyramid(size, size),
            FigureKind::SquarePyramid => Self::square_pyramid(size, size),
            FigureKind::Rhombus => Self::rhombus(size),
        }
    }

    /// Axis-aligned cube centered at the origin with edge length `size`.
    ///
    /// Vertices 0–3 are the `z = -size/2` face, 4–7 the `z = +size/2` face.
    pub fn cube(size: f64) -> Self {
        let h = size / 2.0;

        #[rustfmt::skip]
        let vertices = vec![
            DVec3::new(-h, -h, -h),
            DVec3::new( h, -h, -h),
            DVec3::new( h,  h, -h),
            DVec3::new(-h,  h, -h),
            DVec3::new(-h, -h,  h),
            DVec3::new( h, -h,  h),
            DVec3::new( h,  h,  h),
            DVec3::new(-h,  h,  h),
        ];

        #[rustfmt::skip]
        let edges = vec![
            [0, 1], [1, 2], [2, 3], [3, 0], // back
            [4, 5], [5, 6], [6, 7], [7, 4], // front
            [0, 4], [1, 5], [2, 6], [3, 7], // sides
        ];

        let faces = vec![
            vec![0, 1, 2, 3],
            vec![4, 5, 6, 7],
            vec![0, 1, 5, 4],
            vec![2, 3, 7, 6],
            vec![0, 3, 7, 4],
            vec![1, 2, 6, 5],
        ];

        Self {
            kind: Some(FigureKind::Cube),
            vertices,
            edges,
            faces,
        }
    }

    /// Pyramid over an equilateral triangle of side `base` lying in `y = 0`,
    /// apex at `(0, height, 0)`.
    pub fn triangular_pyramid(base: f64, height: f64) -> Self {
        let h = base / 2.0;
        // circumradius of the base triangle
        let r = (3.0f64.sqrt() / 2.0) * base / 1.5;

        let vertices = vec![
            DVec3::new(0.0, 0.0, r),
            DVec3::new(-h, 0.0, -r / 2.0),
            DVec3::new(h, 0.0, -r / 2.0),
            DVec3::new(0.0, height, 0.0),
        ];

        let edges = vec![[0, 1], [1, 2], [2, 0], [0, 3], [1, 3], [2, 3]];

        let faces = vec![vec![0, 1, 2], vec![0, 1, 3], vec![1, 2, 3], vec![2, 0, 3]];

        Self {
            kind: Some(FigureKind::TriangularPyramid),
            vertices,
            edges,
            faces,
        }
    }

    /// Pyramid over a square of side `base` lying in `y = 0`, apex at
    /// `(0, height, 0)`.
    pub fn square_pyramid(base: f64, height: f64) -> Self {
        let h = base / 2.0;

        let vertices = vec![
            DVec3::new(-h, 0.0, -h),
            DVec3::new(h, 0.0, -h),
            DVec3::new(h, 0.0, h),
            DVec3::new(-h, 0.0, h),
            DVec3::new(0.0, height, 0.0),
        ];

        #[rustfmt::skip]
        let edges = vec![
            [0, 1], [1, 2], [2, 3], [3, 0],
            [0, 4], [1, 4], [2, 4], [3, 4],
        ];

        let faces = vec![
            vec![0, 1, 2, 3],
            vec![0, 1, 4],
            vec![1, 2, 4],
            vec![2, 3, 4],
            vec![3, 0, 4],
        ];

        Self {
            kind: Some(FigureKind::SquarePyramid),
            vertices,
            edges,
            faces,
        }
    }

    /// Bipyramid of height `size` whose middle ring spans `0.7 * size`.
    pub fn rhombus(size: f64) -> Self {
        let h = size / 2.0;
        let w = size * 0.7 / 2.0;

        let vertices = vec![
            DVec3::new(0.0, h, 0.0),
            DVec3::new(-w, 0.0, 0.0),
            DVec3::new(0.0, 0.0, w),
            DVec3::new(w, 0.0, 0.0),
            DVec3::new(0.0, 0.0, -w),
            DVec3::new(0.0, -h, 0.0),
        ];

        #[rustfmt::skip]
        let edges = vec![
            [0, 1], [0, 2], [0, 3], [0, 4],
            [1, 2], [2, 3], [3, 4], [4, 1],
            [1, 5], [2, 5], [3, 5], [4, 5],
        ];

        let faces = vec![
            vec![0, 1, 2],
            vec![0, 2, 3],
            vec![0, 3, 4],
            vec![0, 4, 1],
            vec![5, 2, 1],
            vec![5, 3, 2],
            vec![5, 4, 3],
            vec![5, 1, 4],
        ];

        Self {
            kind: Some(FigureKind::Rhombus),
            vertices,
            edges,
            faces,
        }
    }

    /// A figure of `kind` with caller-supplied vertex positions.
    ///
    /// The topology comes from the built-in figure of the same kind, so at
    /// least [`FigureKind::vertex_count`] vertices are required. Extra
    /// vertices (up to [`MAX_CUSTOM_VERTICES`]) are kept but left unconnected.
    pub fn custom(kind: FigureKind, vertices: Vec<DVec3>) -> Result<Self, FigureError> {
        let required = kind.vertex_count();
        if vertices.len() < required {
            return Err(FigureError::TooFewVertices {
                kind,
                required,
                actual: vertices.len(),
            });
        }
        let template = Self::new(kind, 2.0);
        let figure = Self {
            kind: Some(kind),
            vertices,
            edges: template.edges,
            faces: template.faces,
        };
        figure.validate()?;
        Ok(figure)
    }

    /// Builds a figure from raw parts, checking the topology.
    ///
    /// At most [`MAX_CUSTOM_VERTICES`] vertices are accepted.
    pub fn from_parts(
        vertices: Vec<DVec3>,
        edges: Vec<[usize; 2]>,
        faces: Vec<Vec<usize>>,
    ) -> Result<Self, FigureError> {
        let figure = Self {
            kind: None,
            vertices,
            edges,
            faces,
        };
        figure.validate()?;
        Ok(figure)
    }

    /// Checks the vertex count, that coordinates are finite, that faces are
    /// triangles or quads, and that every index is in range.
    pub fn validate(&self) -> Result<(), FigureError> {
        let count = self.vertices.len();

        if count > MAX_CUSTOM_VERTICES {
            return Err(FigureError::TooManyVertices {
                max: MAX_CUSTOM_VERTICES,
                actual: count,
            });
        }

        if let Some(index) = self.vertices.iter().position(|v| !v.is_finite()) {
            return Err(FigureError::NonFiniteVertex { index });
        }

        for (index, edge) in self.edges.iter().enumerate() {
            if let Some(&vertex) = edge.iter().find(|&&i| i >= count) {
                return Err(FigureError::IndexOutOfRange {
                    element: "edge",
                    index,
                    vertex,
                    count,
                });
            }
        }

        for (index, face) in self.faces.iter().enumerate() {
            if face.len() < 3 {
                return Err(FigureError::DegenerateFace {
                    index,
                    len: face.len(),
                });
            }
            if face.len() > 4 {
                return Err(FigureError::UnsupportedFace {
                    index,
                    len: face.len(),
                });
            }
            if let Some(&vertex) = face.iter().find(|&&i| i >= count) {
                return Err(FigureError::IndexOutOfRange {
                    element: "face",
                    index,
                    vertex,
                    count,
                });
            }
        }

        Ok(())
    }

    /// Triangle index list for the faces.
    ///
    /// Triangles pass through; quads `[a, b, c, d]` split into `[a, b, c]` and
    /// `[a, c, d]`. Faces of any other length are skipped.
    pub fn triangle_indices(&self) -> Vec<u32> {
        let mut indices = Vec::with_capacity(self.faces.len() * 6);
        for face in &self.faces {
            match face.as_slice() {
                &[a, b, c] => indices.extend([a, b, c].map(|i| i as u32)),
                &[a, b, c, d] => indices.extend([a, b, c, a, c, d].map(|i| i as u32)),
                _ => {}
            }
        }
        indices
    }

    /// Line-list index buffer for the edges.
    pub fn line_indices(&self) -> Vec<u32> {
        self.edges
            .iter()
            .flat_map(|&[a, b]| [a as u32, b as u32])
            .collect()
    }
}

/// Axis-aligned bounding box of a vertex set, as `(min, max)`.
///
/// An empty slice yields infinite bounds.
pub fn bounds(vertices: &[DVec3]) -> (DVec3, DVec3) {
    vertices.iter().fold(
        (DVec3::splat(f64::INFINITY), DVec3::splat(f64::NEG_INFINITY)),
        |(min, max), &v| (min.min(v), max.max(v)),
    )
}

/// Center of the bounding box.
pub fn center(vertices: &[DVec3]) -> DVec3 {
    let (min, max) = bounds(vertices);
    (min + max) * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn built_in_figures_are_consistent() {
        for kind in FigureKind::ALL {
            let fig = Figure::new(kind, 2.0);
            assert_eq!(fig.kind, Some(kind));
            assert_eq!(fig.vertices.len(), kind.vertex_count());
            assert!(fig.validate().is_ok(), "{} failed validation", kind);
            assert!(fig.faces.iter().all(|f| f.len() == 3 || f.len() == 4));
        }
    }

    #[test]
    fn cube_corners_are_at_half_size() {
        let cube = Figure::cube(2.0);
        assert!(cube.vertices.iter().all(|v| v.abs() == DVec3::ONE));
        assert_eq!(cube.edges.len(), 12);
        assert_eq!(center(&cube.vertices), DVec3::ZERO);
    }

    #[test]
    fn triangular_pyramid_base_is_equilateral() {
        let fig = Figure::triangular_pyramid(2.0, 3.0);
        let [a, b, c] = [fig.vertices[0], fig.vertices[1], fig.vertices[2]];
        assert!((a.distance(b) - 2.0).abs() < 1e-9);
        assert!((b.distance(c) - 2.0).abs() < 1e-9);
        assert!((c.distance(a) - 2.0).abs() < 1e-9);
        assert_eq!(fig.vertices[3], DVec3::new(0.0, 3.0, 0.0));
    }

    #[test]
    fn rhombus_spans_size_vertically() {
        let (min, max) = bounds(&Figure::rhombus(2.0).vertices);
        assert_eq!(min.y, -1.0);
        assert_eq!(max.y, 1.0);
        assert!((max.x - 0.7).abs() < 1e-12);
    }

    #[test]
    fn quads_split_along_first_diagonal() {
        let fig = Figure::square_pyramid(2.0, 2.0);
        let tris = fig.triangle_indices();
        assert_eq!(&tris[..6], &[0, 1, 2, 0, 2, 3]);
        assert_eq!(tris.len(), 6 + 4 * 3);
    }

    #[test]
    fn odd_faces_are_skipped_by_triangulation() {
        let fig = Figure {
            kind: None,
            vertices: vec![DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z, DVec3::ONE],
            edges: vec![],
            faces: vec![vec![0, 1, 2, 3, 4], vec![0, 1, 2]],
        };
        assert_eq!(fig.triangle_indices(), vec![0, 1, 2]);
    }

    #[test]
    fn line_indices_flatten_edges() {
        let fig = Figure::triangular_pyramid(1.0, 1.0);
        assert_eq!(&fig.line_indices()[..4], &[0, 1, 1, 2]);
    }

    #[test]
    fn custom_figure_borrows_topology() {
        let verts = vec![
            DVec3::new(-1.0, 0.0, -1.0),
            DVec3::new(1.0, 0.0, -1.0),
            DVec3::new(1.0, 0.0, 1.0),
            DVec3::new(-1.0, 0.0, 1.0),
            DVec3::new(0.0, 2.0, 0.0),
        ];
        let fig = Figure::custom(FigureKind::SquarePyramid, verts.clone()).unwrap();
        assert_eq!(fig.vertices, verts);
        assert_eq!(fig.edges, Figure::square_pyramid(2.0, 2.0).edges);
    }

    #[test]
    fn custom_figure_rejects_bad_input() {
        assert_eq!(
            Figure::custom(FigureKind::Cube, vec![DVec3::ZERO; 3]),
            Err(FigureError::TooFewVertices {
                kind: FigureKind::Cube,
                required: 8,
                actual: 3,
            })
        );
        assert_eq!(
            Figure::custom(FigureKind::Cube, vec![DVec3::ZERO; 21]),
            Err(FigureError::TooManyVertices { max: 20, actual: 21 })
        );

        let mut verts = vec![DVec3::ZERO; 4];
        verts[2].y = f64::INFINITY;
        assert_eq!(
            Figure::custom(FigureKind::TriangularPyramid, verts),
            Err(FigureError::NonFiniteVertex { index: 2 })
        );
    }

    #[test]
    fn from_parts_checks_indices() {
        let err = Figure::from_parts(vec![DVec3::ZERO; 3], vec![[0, 3]], vec![]).unwrap_err();
        assert_eq!(
            err,
            FigureError::IndexOutOfRange {
                element: "edge",
                index: 0,
                vertex: 3,
                count: 3,
            }
        );

        let err = Figure::from_parts(vec![DVec3::ZERO; 3], vec![], vec![vec![0, 1]]).unwrap_err();
        assert_eq!(err, FigureError::DegenerateFace { index: 0, len: 2 });

        let err = Figure::from_parts(vec![DVec3::ZERO; 5], vec![], vec![vec![0, 1, 2, 3, 4]])
            .unwrap_err();
        assert_eq!(err, FigureError::UnsupportedFace { index: 0, len: 5 });
    }

    #[test]
    fn from_parts_caps_vertex_count() {
        let err = Figure::from_parts(vec![DVec3::ZERO; 25], vec![], vec![]).unwrap_err();
        assert_eq!(err, FigureError::TooManyVertices { max: 20, actual: 25 });
        assert!(Figure::from_parts(vec![DVec3::ZERO; 20], vec![], vec![]).is_ok());
    }

    #[test]
    fn kind_parses_common_spellings() {
        assert_eq!(
            "Square Pyramid".parse::<FigureKind>(),
            Ok(FigureKind::SquarePyramid)
        );
        assert_eq!(
            "triangular-pyramid".parse::<FigureKind>(),
            Ok(FigureKind::TriangularPyramid)
        );
        assert!("dodecahedron".parse::<FigureKind>().is_err());
    }
}
