//! Text helpers for inspecting matrices, transformation history and vertices.
//!
//! Every matrix shown here is rebuilt from the requests through
//! [`TransformationRequest::matrix`], the same constructor the engine uses, so
//! what is displayed is exactly what was applied.

use glam::{DMat4, DVec3};
use std::fmt::Write;

use crate::matrix;
use crate::transform::{TransformKind, TransformationRequest, compose};

/// Tolerance below which a value or difference is shown as zero.
pub const DISPLAY_EPSILON: f64 = 1e-4;

/// Formats a number for display.
///
/// Values within [`DISPLAY_EPSILON`] of zero print as `0`, values within it of
/// an integer print as that integer, everything else gets three decimals.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value.abs() < DISPLAY_EPSILON {
        return "0".to_string();
    }
    let rounded = value.round();
    if (value - rounded).abs() < DISPLAY_EPSILON {
        return format!("{}", rounded);
    }
    format!("{:.3}", value)
}

/// One line per row: `[a, b, c, d]`.
pub fn format_matrix(m: &DMat4) -> String {
    let mut out = String::new();
    for (i, row) in matrix::to_rows(m).iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let cells: Vec<String> = row.iter().map(|&v| format_number(v)).collect();
        let _ = write!(out, "[{}]", cells.join(", "));
    }
    out
}

/// Short label for the `index`-th (zero-based) request, e.g. `T1(2, 0, 0)` or
/// `R3z(90°)`.
pub fn label(request: &TransformationRequest, index: usize) -> String {
    let n = index + 1;
    let sym = request.kind.symbol();
    match request.kind {
        TransformKind::Translation | TransformKind::Scaling => {
            let v = request.values;
            format!(
                "{}{}({}, {}, {})",
                sym,
                n,
                format_number(v.x),
                format_number(v.y),
                format_number(v.z)
            )
        }
        TransformKind::Rotation => {
            let axis = request.axis.map_or("?", |a| a.as_str());
            let angle = request.angle.map_or("?".to_string(), format_number);
            format!("{}{}{}({}°)", sym, n, axis, angle)
        }
    }
}

/// Composition formula with the most recent transformation leftmost, matching
/// the order in which the matrices are multiplied.
///
/// ```
/// use affine_viz::display::composition_formula;
/// use affine_viz::transform::TransformationRequest;
/// use affine_viz::Axis;
///
/// let reqs = [
///     TransformationRequest::translation(2.0, 0.0, 0.0),
///     TransformationRequest::rotation(Axis::Z, 90.0),
/// ];
/// assert_eq!(composition_formula(&reqs), "M = R2z(90°) × T1(2, 0, 0)");
/// ```
pub fn composition_formula(requests: &[TransformationRequest]) -> String {
    if requests.is_empty() {
        return "M = I".to_string();
    }
    let terms: Vec<String> = requests
        .iter()
        .enumerate()
        .rev()
        .map(|(i, r)| label(r, i))
        .collect();
    format!("M = {}", terms.join(" × "))
}

/// Labelled matrix for each request, in application order.
pub fn individual_matrices(requests: &[TransformationRequest]) -> Vec<(String, DMat4)> {
    requests
        .iter()
        .enumerate()
        .map(|(i, r)| (label(r, i), r.matrix()))
        .collect()
}

/// Combined matrix rebuilt from the requests.
pub fn combined_matrix(requests: &[TransformationRequest]) -> DMat4 {
    let matrices: Vec<DMat4> = requests.iter().map(|r| r.matrix()).collect();
    compose(&matrices)
}

/// Before/after record for a single vertex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VertexDelta {
    pub index: usize,
    pub original: DVec3,
    pub current: DVec3,
}

impl VertexDelta {
    /// `current - original`.
    pub fn delta(&self) -> DVec3 {
        self.current - self.original
    }

    /// True if any coordinate moved by more than [`DISPLAY_EPSILON`].
    pub fn changed(&self) -> bool {
        self.delta().abs().max_element() > DISPLAY_EPSILON
    }

    /// Signed difference per coordinate, e.g. `+2.000`, `0.000`, `-0.500`.
    pub fn format_delta(&self) -> [String; 3] {
        self.delta().to_array().map(|d| {
            if d.abs() < DISPLAY_EPSILON {
                "0.000".to_string()
            } else {
                format!("{:+.3}", d)
            }
        })
    }
}

/// Pairs baseline and current vertices index by index.
pub fn compare_vertices(original: &[DVec3], current: &[DVec3]) -> Vec<VertexDelta> {
    original
        .iter()
        .zip(current)
        .enumerate()
        .map(|(index, (&original, &current))| VertexDelta {
            index,
            original,
            current,
        })
        .collect()
}
