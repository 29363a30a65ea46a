//! Renderer-facing vertex buffers.
//!
//! The engine works in `f64`; GPUs want packed `f32`. A [`RenderBuffer`] takes
//! the figure's current vertex positions plus its topology and produces:
//!
//! - [`RenderVertex`] data with smooth normals, castable to bytes
//! - a triangle index list (quads split along their first diagonal)
//! - a line index list for drawing edges
//!
//! # Vertex Layout
//!
//! | Attribute | Format    | Offset |
//! |-----------|-----------|--------|
//! | position  | Float32x3 | 0      |
//! | normal    | Float32x3 | 12     |
//!
//! Rebuild the buffer every tick while an animation is running; the topology
//! does not change, so index lists can be cached by the renderer.

use glam::{DVec3, Vec3};

use crate::figure::Figure;

/// A packed vertex with position and normal.
///
/// `#[repr(C)]` plus [`bytemuck::Pod`] allow zero-copy upload.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RenderVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl RenderVertex {
    pub fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Self { position, normal }
    }
}

/// Vertex and index data for one frame of a figure.
#[derive(Clone, Debug, Default)]
pub struct RenderBuffer {
    pub vertices: Vec<RenderVertex>,
    /// Triangle list, three indices per triangle.
    pub triangles: Vec<u32>,
    /// Line list, two indices per edge.
    pub lines: Vec<u32>,
}

impl RenderBuffer {
    /// Packs `positions` using the topology of `figure`.
    ///
    /// `positions` is normally the interpolated vertex set of the current tick
    /// and must have the same length as `figure.vertices`.
    pub fn build(figure: &Figure, positions: &[DVec3]) -> Self {
        debug_assert_eq!(figure.vertices.len(), positions.len());

        let mut buffer = Self {
            vertices: positions
                .iter()
                .map(|p| RenderVertex::new(p.as_vec3().into(), [0.0; 3]))
                .collect(),
            triangles: figure.triangle_indices(),
            lines: figure.line_indices(),
        };
        buffer.recalculate_normals();
        buffer
    }

    /// Recomputes smooth vertex normals from the triangles.
    ///
    /// Each triangle adds its unnormalized face normal (so larger faces weigh
    /// more) to its three corners; the sums are then normalized. Vertices not
    /// touched by any triangle keep a zero normal.
    pub fn recalculate_normals(&mut self) {
        for v in &mut self.vertices {
            v.normal = [0.0; 3];
        }

        for tri in self.triangles.chunks_exact(3) {
            let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let p0 = Vec3::from(self.vertices[i0].position);
            let p1 = Vec3::from(self.vertices[i1].position);
            let p2 = Vec3::from(self.vertices[i2].position);

            let face_normal = (p1 - p0).cross(p2 - p0);

            for i in [i0, i1, i2] {
                let n = Vec3::from(self.vertices[i].normal) + face_normal;
                self.vertices[i].normal = n.into();
            }
        }

        for v in &mut self.vertices {
            v.normal = Vec3::from(v.normal).normalize_or_zero().into();
        }
    }

    /// Vertex data as raw bytes for buffer upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Triangle indices as raw bytes for buffer upload.
    pub fn triangle_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.triangles)
    }

    /// Line indices as raw bytes for buffer upload.
    pub fn line_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.lines)
    }
}
