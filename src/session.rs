//! The session: one owner for figure, history and animation state.
//!
//! A [`Session`] is what a UI talks to. It holds the selected figure and its
//! baseline vertices, the transformation history, and the interpolator. Every
//! request replays the full history against the baseline, so results never
//! drift no matter how many transformations are stacked.
//!
//! # Example
//!
//! ```
//! use affine_viz::{Axis, FigureKind, Session, SessionConfig, TransformationRequest};
//!
//! let mut session = Session::new(SessionConfig::new().animate(false));
//! session.select_figure(FigureKind::Cube);
//! session.apply(TransformationRequest::rotation(Axis::Z, 90.0)).unwrap();
//!
//! assert_eq!(session.history().len(), 1);
//! ```
//!
//! # Ticking
//!
//! With animation enabled, [`Session::apply`] only sets a target. The host
//! calls [`Session::advance`] from its frame loop and draws
//! [`Session::current`] (or [`Session::render_buffer`]) afterwards.

use glam::{DMat4, DVec3};
use thiserror::Error;

use crate::animation::{DEFAULT_DURATION, Easing, Interpolator, Tick};
use crate::figure::{Figure, FigureError, FigureKind};
use crate::matrix;
use crate::mesh::RenderBuffer;
use crate::transform::{TransformError, TransformationHistory, TransformationRequest};

/// Errors returned by [`Session`] operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    /// A transformation was requested before any figure was selected.
    #[error("no figure is selected")]
    NoFigure,

    /// The request failed strict validation.
    #[error(transparent)]
    Transform(#[from] TransformError),

    /// A user-defined figure was rejected.
    #[error(transparent)]
    Figure(#[from] FigureError),
}

/// Configuration for a [`Session`].
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Seconds an animated transformation takes.
    pub animation_duration: f64,
    /// Whether new transformations animate or snap.
    pub animate: bool,
    /// Easing curve for animations.
    pub easing: Easing,
    /// Size used when building figures by kind.
    pub figure_size: f64,
    /// Reject incomplete or non-finite requests instead of treating them as
    /// the identity.
    pub strict_requests: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            animation_duration: DEFAULT_DURATION,
            animate: true,
            easing: Easing::EaseInOutCubic,
            figure_size: 2.0,
            strict_requests: false,
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn animation_duration(mut self, seconds: f64) -> Self {
        self.animation_duration = seconds;
        self
    }

    pub fn animate(mut self, animate: bool) -> Self {
        self.animate = animate;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn figure_size(mut self, size: f64) -> Self {
        self.figure_size = size;
        self
    }

    pub fn strict_requests(mut self, strict: bool) -> Self {
        self.strict_requests = strict;
        self
    }
}

/// Owns the figure, its transformation history and its animation.
pub struct Session {
    config: SessionConfig,
    figure: Option<Figure>,
    history: TransformationHistory,
    /// Where the current history lands when any animation finishes.
    target: Vec<DVec3>,
    /// Last settled vertex set, updated when an animation completes.
    transformed: Vec<DVec3>,
    interpolator: Interpolator,
    on_complete: Option<Box<dyn FnMut(&[DVec3])>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl Session {
    /// Create a session with no figure selected.
    pub fn new(config: SessionConfig) -> Self {
        let interpolator = Self::make_interpolator(&config, Vec::new());
        Self {
            config,
            figure: None,
            history: TransformationHistory::new(),
            target: Vec::new(),
            transformed: Vec::new(),
            interpolator,
            on_complete: None,
        }
    }

    fn make_interpolator(config: &SessionConfig, vertices: Vec<DVec3>) -> Interpolator {
        Interpolator::new(vertices)
            .duration(config.animation_duration)
            .easing(config.easing)
    }

    /// Set a callback to run when an animation reaches its target.
    ///
    /// Receives the final vertex positions. Called once per finished
    /// animation; cancelled animations do not call it.
    pub fn on_animation_complete<F: FnMut(&[DVec3]) + 'static>(&mut self, callback: F) {
        self.on_complete = Some(Box::new(callback));
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Whether the next request animates. Does not affect a running animation.
    pub fn set_animation_enabled(&mut self, enabled: bool) {
        self.config.animate = enabled;
    }

    pub fn animation_enabled(&self) -> bool {
        self.config.animate
    }

    /// Select a built-in figure, discarding any history and animation.
    pub fn select_figure(&mut self, kind: FigureKind) {
        self.load(Figure::new(kind, self.config.figure_size));
    }

    /// Replace the figure with a user-defined one.
    pub fn define_figure(&mut self, figure: Figure) -> Result<(), SessionError> {
        figure.validate()?;
        self.load(figure);
        Ok(())
    }

    /// Replace the figure with user-supplied vertices for a built-in kind.
    pub fn define_vertices(
        &mut self,
        kind: FigureKind,
        vertices: Vec<DVec3>,
    ) -> Result<(), SessionError> {
        let figure = Figure::custom(kind, vertices)?;
        self.load(figure);
        Ok(())
    }

    fn load(&mut self, figure: Figure) {
        log::debug!(
            "figure loaded: {} ({} vertices)",
            figure.kind.map_or("custom", |k| k.name()),
            figure.vertices.len()
        );
        self.history.clear();
        self.target = figure.vertices.clone();
        self.transformed = figure.vertices.clone();
        // Fresh interpolator: start, target and current all equal the baseline.
        self.interpolator = Self::make_interpolator(&self.config, figure.vertices.clone());
        self.figure = Some(figure);
    }

    /// Append a transformation and retarget the figure.
    ///
    /// The whole history is recomposed and applied to the baseline. With
    /// animation enabled the figure eases from wherever it currently is to the
    /// new target; otherwise it moves there immediately.
    pub fn apply(&mut self, request: TransformationRequest) -> Result<DMat4, SessionError> {
        if self.figure.is_none() {
            return Err(SessionError::NoFigure);
        }
        if self.config.strict_requests {
            request.validate()?;
        }

        if request.validate().is_err() {
            log::warn!(
                "recording malformed {} request as identity: {:?}",
                request.kind,
                request
            );
        }
        let m = self.history.push(request);
        log::debug!(
            "applied {} #{}: {:?}",
            request.kind,
            self.history.len(),
            matrix::to_rows(&m)
        );

        let target = matrix::apply(&self.history.combined(), self.baseline());
        self.retarget(target);
        Ok(m)
    }

    /// Clear the history and return the figure to its baseline.
    ///
    /// Animates back when animation is enabled.
    pub fn reset(&mut self) {
        if self.figure.is_none() {
            return;
        }
        log::debug!("transformations reset ({} cleared)", self.history.len());
        self.history.clear();
        let baseline = self.baseline().to_vec();
        self.retarget(baseline);
    }

    fn retarget(&mut self, target: Vec<DVec3>) {
        self.target = target.clone();
        if self.config.animate {
            self.interpolator.start(target);
        } else {
            self.transformed = target.clone();
            self.interpolator.jump_to(target);
        }
    }

    /// Advance any running animation by `elapsed` seconds.
    pub fn advance(&mut self, elapsed: f64) -> Tick {
        let tick = self.interpolator.advance(elapsed);
        if tick == Tick::Completed {
            self.transformed = self.interpolator.current().to_vec();
            if let Some(ref mut callback) = self.on_complete {
                callback(&self.transformed);
            }
        }
        tick
    }

    pub fn figure(&self) -> Option<&Figure> {
        self.figure.as_ref()
    }

    /// Untransformed vertices of the selected figure.
    pub fn baseline(&self) -> &[DVec3] {
        match &self.figure {
            Some(f) => &f.vertices,
            None => &[],
        }
    }

    /// Vertex positions to draw this frame.
    pub fn current(&self) -> &[DVec3] {
        self.interpolator.current()
    }

    /// Where the figure ends up once any animation finishes.
    pub fn target(&self) -> &[DVec3] {
        &self.target
    }

    /// Last settled vertex positions.
    ///
    /// Lags behind [`target`](Self::target) while an animation is running.
    pub fn transformed(&self) -> &[DVec3] {
        &self.transformed
    }

    pub fn is_animating(&self) -> bool {
        self.interpolator.is_running()
    }

    pub fn history(&self) -> &TransformationHistory {
        &self.history
    }

    /// The combined matrix of the whole history.
    pub fn combined_matrix(&self) -> DMat4 {
        self.history.combined()
    }

    /// Packs the current frame for a renderer, if a figure is selected.
    pub fn render_buffer(&self) -> Option<RenderBuffer> {
        self.figure
            .as_ref()
            .map(|f| RenderBuffer::build(f, self.current()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::Axis;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use std::rc::Rc;

    fn instant() -> Session {
        let mut s = Session::new(SessionConfig::new().animate(false));
        s.select_figure(FigureKind::Cube);
        s
    }

    fn animated() -> Session {
        let mut s = Session::new(SessionConfig::new().animation_duration(1.0));
        s.select_figure(FigureKind::Cube);
        s
    }

    #[test]
    fn apply_without_figure_fails() {
        let mut s = Session::default();
        assert_eq!(
            s.apply(TransformationRequest::translation(1.0, 0.0, 0.0)),
            Err(SessionError::NoFigure)
        );
    }

    #[test]
    fn instant_apply_moves_current_immediately() {
        let mut s = instant();
        s.apply(TransformationRequest::translation(2.0, 0.0, 0.0))
            .unwrap();

        assert!(!s.is_animating());
        for (b, c) in s.baseline().iter().zip(s.current()) {
            assert_eq!(*c, *b + DVec3::new(2.0, 0.0, 0.0));
        }
        assert_eq!(s.transformed(), s.current());
    }

    #[test]
    fn history_is_replayed_from_baseline() {
        let mut s = instant();
        s.apply(TransformationRequest::scaling(2.0, 2.0, 2.0))
            .unwrap();
        s.apply(TransformationRequest::translation(1.0, 0.0, 0.0))
            .unwrap();

        let expected = matrix::apply(
            &matrix::multiply(
                &matrix::translation(1.0, 0.0, 0.0),
                &matrix::scaling(2.0, 2.0, 2.0),
            ),
            s.baseline(),
        );
        assert_eq!(s.current(), expected.as_slice());
    }

    #[test]
    fn reset_restores_baseline_exactly() {
        let mut s = instant();
        s.apply(TransformationRequest::rotation(Axis::X, 33.0))
            .unwrap();
        s.reset();
        assert!(s.history().is_empty());
        assert_eq!(s.current(), s.baseline());
    }

    #[test]
    fn animated_apply_eases_then_settles() {
        let mut s = animated();
        s.apply(TransformationRequest::translation(0.0, 4.0, 0.0))
            .unwrap();

        assert!(s.is_animating());
        assert_eq!(s.current(), s.baseline());
        assert_eq!(s.transformed(), s.baseline());

        assert_eq!(s.advance(0.5), Tick::Frame);
        assert_eq!(s.current()[0].y, s.baseline()[0].y + 2.0);

        assert_eq!(s.advance(0.5), Tick::Completed);
        assert_eq!(s.current(), s.target());
        assert_eq!(s.transformed(), s.target());
        assert_eq!(s.advance(0.5), Tick::Idle);
    }

    #[test]
    fn completion_callback_fires_once() {
        let calls = Rc::new(Cell::new(0));
        let mut s = animated();
        let seen = calls.clone();
        s.on_animation_complete(move |_| seen.set(seen.get() + 1));

        s.apply(TransformationRequest::scaling(2.0, 1.0, 1.0))
            .unwrap();
        for _ in 0..10 {
            s.advance(0.25);
        }
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn toggling_animation_mid_run_keeps_running() {
        let mut s = animated();
        s.apply(TransformationRequest::translation(1.0, 0.0, 0.0))
            .unwrap();
        s.set_animation_enabled(false);
        assert!(s.is_animating());
        assert_eq!(s.advance(0.25), Tick::Frame);
    }

    #[test]
    fn selecting_figure_cancels_animation() {
        let calls = Rc::new(Cell::new(0));
        let mut s = animated();
        let seen = calls.clone();
        s.on_animation_complete(move |_| seen.set(seen.get() + 1));

        s.apply(TransformationRequest::translation(1.0, 0.0, 0.0))
            .unwrap();
        s.advance(0.3);
        s.select_figure(FigureKind::SquarePyramid);

        assert!(!s.is_animating());
        assert!(s.history().is_empty());
        assert_eq!(s.current().len(), 5);
        assert_eq!(s.current(), s.baseline());
        assert_eq!(s.advance(1.0), Tick::Idle);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn strict_mode_rejects_incomplete_rotation() {
        let mut s = Session::new(SessionConfig::new().animate(false).strict_requests(true));
        s.select_figure(FigureKind::Rhombus);

        let mut req = TransformationRequest::rotation(Axis::Y, 10.0);
        req.angle = None;
        assert!(matches!(s.apply(req), Err(SessionError::Transform(_))));
        assert!(s.history().is_empty());
    }

    #[test]
    fn permissive_mode_records_incomplete_rotation_as_identity() {
        let mut s = instant();
        let mut req = TransformationRequest::rotation(Axis::Y, 10.0);
        req.axis = None;
        assert_eq!(s.apply(req), Ok(DMat4::IDENTITY));
        assert_eq!(s.history().len(), 1);
        assert_eq!(s.current(), s.baseline());
    }

    #[test]
    fn define_figure_accepts_valid_topology() {
        let mut s = Session::new(SessionConfig::new().animate(false));
        let tri = Figure::from_parts(
            vec![DVec3::ZERO, DVec3::X, DVec3::Y],
            vec![[0, 1], [1, 2], [2, 0]],
            vec![vec![0, 1, 2]],
        )
        .unwrap();
        s.define_figure(tri).unwrap();

        assert_eq!(s.baseline().len(), 3);
        s.apply(TransformationRequest::translation(0.0, 0.0, 1.0))
            .unwrap();
        assert_eq!(s.current()[1], DVec3::new(1.0, 0.0, 1.0));
    }

    #[test]
    fn define_figure_rejects_too_many_vertices() {
        let mut s = Session::default();
        s.select_figure(FigureKind::Cube);
        let crowded = Figure {
            kind: None,
            vertices: vec![DVec3::ZERO; 25],
            edges: vec![],
            faces: vec![],
        };

        assert_eq!(
            s.define_figure(crowded),
            Err(SessionError::Figure(FigureError::TooManyVertices {
                max: 20,
                actual: 25,
            }))
        );
        assert_eq!(s.baseline().len(), 8);
    }

    #[test]
    fn define_vertices_validates_input() {
        let mut s = Session::default();
        assert!(matches!(
            s.define_vertices(FigureKind::Cube, vec![DVec3::ZERO; 2]),
            Err(SessionError::Figure(FigureError::TooFewVertices { .. }))
        ));
        assert!(s.figure().is_none());
    }

    #[test]
    fn render_buffer_follows_current_frame() {
        let mut s = instant();
        assert!(Session::default().render_buffer().is_none());

        s.apply(TransformationRequest::translation(1.0, 0.0, 0.0))
            .unwrap();
        let buf = s.render_buffer().unwrap();
        assert_eq!(buf.vertices.len(), 8);
        assert_eq!(buf.vertices[0].position, [0.0, -1.0, -1.0]);
    }
}
