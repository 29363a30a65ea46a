//! Easing curves and the vertex interpolator that animates a figure between
//! its current and target positions.
//!
//! The interpolator does not own a clock. The host calls
//! [`Interpolator::advance`] with the seconds elapsed since the previous tick,
//! from whatever drives it: a render loop, a timer, or a test stepping by hand.

use glam::DVec3;

/// Default animation length in seconds.
pub const DEFAULT_DURATION: f64 = 1.5;

/// Easing functions for vertex animation.
///
/// These control the acceleration curve between start and target positions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    /// Constant speed throughout.
    Linear,
    /// Start slow, accelerate.
    EaseIn,
    /// Start fast, decelerate.
    EaseOut,
    /// Quadratic slow-fast-slow.
    EaseInOut,
    /// Cubic slow-fast-slow.
    #[default]
    EaseInOutCubic,
}

impl Easing {
    /// Apply the easing function to a linear progress value (0.0 to 1.0).
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// Blends two vertex sets index by index at eased parameter `t`.
///
/// `start` and `target` must describe the same topology; extra trailing
/// vertices on either side are ignored.
pub fn interpolate(start: &[DVec3], target: &[DVec3], t: f64) -> Vec<DVec3> {
    debug_assert_eq!(start.len(), target.len());
    start
        .iter()
        .zip(target)
        .map(|(&s, &e)| s + (e - s) * t)
        .collect()
}

/// What happened during one [`Interpolator::advance`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// Nothing is animating.
    Idle,
    /// An intermediate frame was produced.
    Frame,
    /// The animation reached its target on this tick. Reported once.
    Completed,
}

#[derive(Clone, Debug)]
enum State {
    Idle,
    Running {
        start: Vec<DVec3>,
        target: Vec<DVec3>,
        progress: f64,
    },
}

/// Idle/running state machine that eases a vertex set toward a target.
///
/// [`start`](Self::start) snapshots the current positions and begins a run;
/// [`advance`](Self::advance) moves progress forward and refreshes
/// [`current`](Self::current). When progress reaches 1 the current set is
/// replaced by the target exactly and the interpolator goes back to idle.
#[derive(Clone, Debug)]
pub struct Interpolator {
    state: State,
    current: Vec<DVec3>,
    duration: f64,
    easing: Easing,
}

impl Interpolator {
    /// Create an idle interpolator resting at `vertices`.
    pub fn new(vertices: Vec<DVec3>) -> Self {
        Self {
            state: State::Idle,
            current: vertices,
            duration: DEFAULT_DURATION,
            easing: Easing::default(),
        }
    }

    /// Set the animation duration in seconds.
    pub fn duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    /// Set the easing function.
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// The vertex positions to display right now.
    pub fn current(&self) -> &[DVec3] {
        &self.current
    }

    /// The target of the running animation, if any.
    pub fn target(&self) -> Option<&[DVec3]> {
        match &self.state {
            State::Running { target, .. } => Some(target),
            State::Idle => None,
        }
    }

    /// Linear progress of the running animation, or `None` when idle.
    pub fn progress(&self) -> Option<f64> {
        match self.state {
            State::Running { progress, .. } => Some(progress),
            State::Idle => None,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, State::Running { .. })
    }

    /// Begin animating from the current positions toward `target`.
    ///
    /// Calling this while a run is in progress restarts from the current
    /// interpolated positions, so queued transformations do not snap.
    pub fn start(&mut self, target: Vec<DVec3>) {
        debug_assert_eq!(self.current.len(), target.len());
        log::debug!(
            "animation started ({} vertices, restart: {})",
            target.len(),
            self.is_running()
        );
        self.state = State::Running {
            start: self.current.clone(),
            target,
            progress: 0.0,
        };
    }

    /// Move to `vertices` immediately, cancelling any running animation.
    pub fn jump_to(&mut self, vertices: Vec<DVec3>) {
        if self.is_running() {
            log::debug!("animation cancelled");
        }
        self.state = State::Idle;
        self.current = vertices;
    }

    /// Advance the animation by `elapsed` seconds.
    ///
    /// A non-positive or non-finite `elapsed` leaves progress where it is.
    pub fn advance(&mut self, elapsed: f64) -> Tick {
        let State::Running {
            start,
            target,
            progress,
        } = &mut self.state
        else {
            return Tick::Idle;
        };

        if elapsed.is_finite() && elapsed > 0.0 {
            if self.duration > 0.0 {
                *progress += elapsed / self.duration;
            } else {
                *progress = 1.0;
            }
        }

        if *progress >= 1.0 {
            self.current = std::mem::take(target);
            self.state = State::Idle;
            log::debug!("animation completed");
            return Tick::Completed;
        }

        let t = self.easing.apply(*progress);
        log::trace!("animation progress {:.3} (eased {:.3})", progress, t);
        self.current = interpolate(start, target, t);
        Tick::Frame
    }
}
