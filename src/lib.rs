//! # affine-viz
//!
//! **An engine for watching 3D affine transformations happen.**
//!
//! Pick a polyhedron, stack translations, scalings and rotations on it, and
//! get back both the numbers (4×4 homogeneous matrices) and smoothly animated
//! vertex positions ready for any renderer.
//!
//! ## Quick Start
//!
//! ```
//! use affine_viz::*;
//!
//! let mut session = Session::new(SessionConfig::new().animation_duration(1.0));
//! session.select_figure(FigureKind::Cube);
//!
//! session.apply(TransformationRequest::scaling(2.0, 2.0, 2.0)).unwrap();
//! session.apply(TransformationRequest::rotation(Axis::Z, 90.0)).unwrap();
//!
//! // Drive the animation from your frame loop.
//! while session.advance(1.0 / 60.0) != Tick::Completed {
//!     let _frame = session.render_buffer();
//! }
//!
//! assert_eq!(session.current(), session.target());
//! println!("{}", display::composition_formula(session.history().requests()));
//! ```
//!
//! ## Pieces
//!
//! - [`matrix`] builds and applies homogeneous matrices.
//! - [`transform`] turns requests into matrices and composes them.
//! - [`animation`] eases a vertex set toward its target, one tick at a time.
//! - [`figure`] provides the built-in polyhedra and validates custom ones.
//! - [`mesh`] packs vertices for GPU upload.
//! - [`display`] formats matrices, labels and vertex comparisons.
//! - [`session`] ties everything together behind a single owner.

pub mod animation;
pub mod display;
pub mod figure;
pub mod matrix;
pub mod mesh;
pub mod session;
pub mod transform;

pub use animation::{Easing, Interpolator, Tick};
pub use figure::{Figure, FigureError, FigureKind};
pub use matrix::Axis;
pub use mesh::{RenderBuffer, RenderVertex};
pub use session::{Session, SessionConfig, SessionError};
pub use transform::{
    TransformError, TransformKind, TransformationHistory, TransformationRequest, compose,
};

// Re-export glam math types for convenience
pub use glam::{DMat4, DVec3, DVec4};
