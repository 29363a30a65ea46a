//! Transformation requests and their composition into a single matrix.
//!
//! A [`TransformationRequest`] is what the user asks for ("translate by
//! (2, 0, 0)", "rotate 90° about z"). Each request maps to one matrix, and the
//! [`TransformationHistory`] keeps requests and matrices side by side in the
//! order they were applied.
//!
//! # Composition order
//!
//! Matrices are folded so the most recently applied transformation ends up
//! leftmost: for `[M1, M2, ..., Mn]` the combined matrix is
//! `Mn · ... · M2 · M1`. Points are multiplied on the right, so `M1` acts first.
//!
//! ```
//! use affine_viz::transform::{compose, TransformationRequest};
//! use affine_viz::{matrix, DVec3};
//!
//! let scale = TransformationRequest::scaling(2.0, 2.0, 2.0).matrix();
//! let shift = TransformationRequest::translation(1.0, 0.0, 0.0).matrix();
//! let combined = compose(&[scale, shift]);
//!
//! assert_eq!(matrix::apply_to_point(&combined, DVec3::ONE), DVec3::new(3.0, 2.0, 2.0));
//! ```

use glam::{DMat4, DVec3};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::matrix::{self, Axis};

/// Errors raised while parsing or validating a transformation request.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    /// The transformation kind name was not recognized.
    #[error("unknown transformation kind: '{0}'")]
    UnknownKind(String),

    /// The rotation axis name was not recognized.
    #[error("unknown rotation axis: '{0}'")]
    UnknownAxis(String),

    /// A rotation request lacks its axis or its angle.
    #[error("rotation request is missing its {missing}")]
    IncompleteRotation { missing: &'static str },

    /// A component is NaN or infinite.
    #[error("{kind} request has a non-finite {field}")]
    NonFiniteValue {
        kind: TransformKind,
        field: &'static str,
    },
}

/// The three supported affine transformation families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransformKind {
    Translation,
    Scaling,
    Rotation,
}

impl TransformKind {
    /// Single-letter prefix used in labels (`T`, `S`, `R`).
    pub fn symbol(&self) -> char {
        match self {
            TransformKind::Translation => 'T',
            TransformKind::Scaling => 'S',
            TransformKind::Rotation => 'R',
        }
    }
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransformKind::Translation => "translation",
            TransformKind::Scaling => "scaling",
            TransformKind::Rotation => "rotation",
        };
        f.write_str(name)
    }
}

impl FromStr for TransformKind {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "translation" | "translate" => Ok(TransformKind::Translation),
            "scaling" | "scale" => Ok(TransformKind::Scaling),
            "rotation" | "rotate" => Ok(TransformKind::Rotation),
            _ => Err(TransformError::UnknownKind(s.to_string())),
        }
    }
}

/// A single user-issued transformation.
///
/// Translation and scaling read `values`; rotation reads `axis` and `angle`
/// (degrees). The rotation fields are optional because requests arrive from
/// form input where either may be left blank.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformationRequest {
    pub kind: TransformKind,
    pub values: DVec3,
    pub axis: Option<Axis>,
    pub angle: Option<f64>,
}

impl TransformationRequest {
    /// Translation by `(x, y, z)`.
    pub fn translation(x: f64, y: f64, z: f64) -> Self {
        Self {
            kind: TransformKind::Translation,
            values: DVec3::new(x, y, z),
            axis: None,
            angle: None,
        }
    }

    /// Scaling by `(x, y, z)`.
    pub fn scaling(x: f64, y: f64, z: f64) -> Self {
        Self {
            kind: TransformKind::Scaling,
            values: DVec3::new(x, y, z),
            axis: None,
            angle: None,
        }
    }

    /// Rotation about `axis` by `degrees`.
    pub fn rotation(axis: Axis, degrees: f64) -> Self {
        Self {
            kind: TransformKind::Rotation,
            values: DVec3::ZERO,
            axis: Some(axis),
            angle: Some(degrees),
        }
    }

    /// Builds the matrix for this request.
    ///
    /// A rotation without an axis or an angle degrades to the identity.
    pub fn matrix(&self) -> DMat4 {
        let v = self.values;
        match self.kind {
            TransformKind::Translation => matrix::translation(v.x, v.y, v.z),
            TransformKind::Scaling => matrix::scaling(v.x, v.y, v.z),
            TransformKind::Rotation => match (self.axis, self.angle) {
                (Some(axis), Some(angle)) => matrix::rotation(axis, angle),
                _ => matrix::identity(),
            },
        }
    }

    /// Checks that the request is complete and finite.
    pub fn validate(&self) -> Result<(), TransformError> {
        match self.kind {
            TransformKind::Translation | TransformKind::Scaling => {
                if !self.values.is_finite() {
                    return Err(TransformError::NonFiniteValue {
                        kind: self.kind,
                        field: "component",
                    });
                }
            }
            TransformKind::Rotation => {
                if self.axis.is_none() {
                    return Err(TransformError::IncompleteRotation { missing: "axis" });
                }
                match self.angle {
                    None => return Err(TransformError::IncompleteRotation { missing: "angle" }),
                    Some(a) if !a.is_finite() => {
                        return Err(TransformError::NonFiniteValue {
                            kind: self.kind,
                            field: "angle",
                        });
                    }
                    Some(_) => {}
                }
            }
        }
        Ok(())
    }
}

/// Folds matrices in application order into one combined matrix.
///
/// Each matrix is left-multiplied onto the accumulator, so the first matrix
/// acts first on a point. An empty slice yields the identity and a single
/// matrix is returned unchanged.
pub fn compose(matrices: &[DMat4]) -> DMat4 {
    match matrices {
        [] => matrix::identity(),
        [only] => *only,
        [first, rest @ ..] => rest
            .iter()
            .fold(*first, |acc, m| matrix::multiply(m, &acc)),
    }
}

/// Append-only record of applied transformations.
///
/// Requests and their matrices are stored in lock-step: index `i` of
/// [`requests`](Self::requests) produced index `i` of
/// [`matrices`](Self::matrices).
#[derive(Clone, Debug, Default)]
pub struct TransformationHistory {
    requests: Vec<TransformationRequest>,
    matrices: Vec<DMat4>,
}

impl TransformationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a request and returns the matrix built for it.
    pub fn push(&mut self, request: TransformationRequest) -> DMat4 {
        let m = request.matrix();
        self.requests.push(request);
        self.matrices.push(m);
        m
    }

    /// Removes every request and matrix.
    pub fn clear(&mut self) {
        self.requests.clear();
        self.matrices.clear();
    }

    pub fn requests(&self) -> &[TransformationRequest] {
        &self.requests
    }

    pub fn matrices(&self) -> &[DMat4] {
        &self.matrices
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// The combined matrix of the whole history.
    pub fn combined(&self) -> DMat4 {
        compose(&self.matrices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_composition_is_identity() {
        assert_eq!(compose(&[]), DMat4::IDENTITY);
    }

    #[test]
    fn single_matrix_is_returned_unchanged() {
        let m = matrix::rotation(Axis::X, 17.0);
        assert_eq!(compose(&[m]), m);
    }

    #[test]
    fn later_matrices_are_left_multiplied() {
        let a = matrix::scaling(2.0, 3.0, 4.0);
        let b = matrix::rotation(Axis::Z, 30.0);
        let c = matrix::translation(1.0, -1.0, 0.5);

        assert_eq!(compose(&[a, b]), matrix::multiply(&b, &a));
        assert_eq!(
            compose(&[a, b, c]),
            matrix::multiply(&c, &matrix::multiply(&b, &a))
        );
    }

    #[test]
    fn combined_matrix_matches_sequential_application() {
        let a = TransformationRequest::rotation(Axis::Y, 45.0).matrix();
        let b = TransformationRequest::translation(0.5, 2.0, -3.0).matrix();
        let p = DVec3::new(1.0, -2.0, 0.25);

        let combined = matrix::apply_to_point(&compose(&[a, b]), p);
        let sequential = matrix::apply_to_point(&b, matrix::apply_to_point(&a, p));
        assert!((combined - sequential).abs().max_element() < 1e-9);
    }

    #[test]
    fn incomplete_rotation_degrades_to_identity() {
        let mut req = TransformationRequest::rotation(Axis::Z, 90.0);
        req.angle = None;
        assert_eq!(req.matrix(), DMat4::IDENTITY);

        let mut req = TransformationRequest::rotation(Axis::Z, 90.0);
        req.axis = None;
        assert_eq!(req.matrix(), DMat4::IDENTITY);
    }

    #[test]
    fn validate_reports_missing_rotation_fields() {
        let mut req = TransformationRequest::rotation(Axis::Z, 90.0);
        req.axis = None;
        assert_eq!(
            req.validate(),
            Err(TransformError::IncompleteRotation { missing: "axis" })
        );

        req.axis = Some(Axis::X);
        req.angle = None;
        assert_eq!(
            req.validate(),
            Err(TransformError::IncompleteRotation { missing: "angle" })
        );
    }

    #[test]
    fn validate_rejects_non_finite_values() {
        let req = TransformationRequest::scaling(1.0, f64::NAN, 1.0);
        assert!(matches!(
            req.validate(),
            Err(TransformError::NonFiniteValue { kind: TransformKind::Scaling, .. })
        ));
        assert!(TransformationRequest::translation(1.0, 2.0, 3.0).validate().is_ok());
    }

    #[test]
    fn kind_parses_from_names() {
        assert_eq!("Rotation".parse::<TransformKind>(), Ok(TransformKind::Rotation));
        assert_eq!("scale".parse::<TransformKind>(), Ok(TransformKind::Scaling));
        assert_eq!(
            "shear".parse::<TransformKind>(),
            Err(TransformError::UnknownKind("shear".to_string()))
        );
    }

    #[test]
    fn history_keeps_requests_and_matrices_in_step() {
        let mut history = TransformationHistory::new();
        history.push(TransformationRequest::translation(2.0, 0.0, 0.0));
        history.push(TransformationRequest::rotation(Axis::Z, 90.0));

        assert_eq!(history.len(), 2);
        assert_eq!(history.requests().len(), history.matrices().len());
        for (req, m) in history.requests().iter().zip(history.matrices()) {
            assert_eq!(req.matrix(), *m);
        }

        history.clear();
        assert!(history.is_empty());
        assert!(history.matrices().is_empty());
        assert_eq!(history.combined(), DMat4::IDENTITY);
    }
}
