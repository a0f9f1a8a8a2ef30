//! Gaze-driven opacity fade with a one-way latch.
//!
//! A label fades in while the camera looks at it and fades back out when the
//! gaze leaves. Once alpha passes `minimum_alpha_before_auto_fade` the fade in
//! continues regardless of gaze, and once it reaches full opacity the state
//! latches and never changes again.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::gaze;
use crate::math::approximately;
use crate::traits::{OpacitySink, PoseProvider, PositionProvider};

pub const MINIMUM_ALPHA: f32 = 0.0;
pub const MAXIMUM_ALPHA: f32 = 1.0;

pub const VISIBILITY_ANGLE_RANGE: (f32, f32) = (1.0, 90.0);
pub const FADE_SCALE_RANGE: (f32, f32) = (0.01, 1.0);
pub const AUTO_FADE_ALPHA_RANGE: (f32, f32) = (0.1, 1.0);

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FadeConfigError {
    #[error("visibility angle must be within [1, 90] degrees, got {0}")]
    VisibilityAngle(f32),
    #[error("fade scale must be within [0.01, 1.0], got {0}")]
    FadeScale(f32),
    #[error("minimum alpha before auto fade must be within [0.1, 1.0], got {0}")]
    AutoFadeAlpha(f32),
}

/// Tuning for a fade controller
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FadeConfig {
    /// Half-angle of the gaze cone in degrees
    pub visibility_angle_degrees: f32,
    /// Alpha change per second
    pub fade_scale: f32,
    /// Alpha above which the fade in no longer needs the gaze
    pub minimum_alpha_before_auto_fade: f32,
}

impl Default for FadeConfig {
    fn default() -> Self {
        Self {
            visibility_angle_degrees: 5.0,
            fade_scale: 0.5,
            minimum_alpha_before_auto_fade: 0.5,
        }
    }
}

fn in_range(value: f32, (lo, hi): (f32, f32)) -> bool {
    (lo..=hi).contains(&value)
}

impl FadeConfig {
    pub fn validate(&self) -> Result<(), FadeConfigError> {
        if !in_range(self.visibility_angle_degrees, VISIBILITY_ANGLE_RANGE) {
            return Err(FadeConfigError::VisibilityAngle(
                self.visibility_angle_degrees,
            ));
        }
        if !in_range(self.fade_scale, FADE_SCALE_RANGE) {
            return Err(FadeConfigError::FadeScale(self.fade_scale));
        }
        if !in_range(self.minimum_alpha_before_auto_fade, AUTO_FADE_ALPHA_RANGE) {
            return Err(FadeConfigError::AutoFadeAlpha(
                self.minimum_alpha_before_auto_fade,
            ));
        }
        Ok(())
    }
}

/// Alpha plus the terminal latch flag
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FadeState {
    alpha: f32,
    latched: bool,
}

impl FadeState {
    pub const fn new() -> Self {
        Self {
            alpha: MINIMUM_ALPHA,
            latched: false,
        }
    }

    /// Resume from a known alpha, clamped into range
    pub fn from_alpha(alpha: f32) -> Self {
        let alpha = if alpha.is_nan() {
            MINIMUM_ALPHA
        } else {
            alpha.clamp(MINIMUM_ALPHA, MAXIMUM_ALPHA)
        };
        Self {
            alpha,
            latched: approximately(alpha, MAXIMUM_ALPHA),
        }
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn is_latched(&self) -> bool {
        self.latched
    }
}

impl Default for FadeState {
    fn default() -> Self {
        Self::new()
    }
}

/// Which way the fade went on the last tick
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FadePhase {
    Hidden,
    FadingIn,
    FadingOut,
    Latched,
}

/// Advance a fade state by `dt` seconds given whether the target is gazed at.
///
/// Negative or NaN `dt` counts as no time passing.
pub fn advance(state: FadeState, config: &FadeConfig, gazing: bool, dt: f32) -> FadeState {
    advance_with_phase(state, config, gazing, dt).0
}

/// Same as `advance`, also reporting the direction the fade was driven in.
///
/// The phase follows the chosen direction, not the alpha difference, so a
/// gazed label ticked with `dt = 0` still reports `FadingIn`.
pub fn advance_with_phase(
    state: FadeState,
    config: &FadeConfig,
    gazing: bool,
    dt: f32,
) -> (FadeState, FadePhase) {
    if state.latched {
        return (state, FadePhase::Latched);
    }

    let dt = dt.max(0.0);
    let fading_in = gazing || state.alpha > config.minimum_alpha_before_auto_fade;
    let sign = if fading_in { 1.0 } else { -1.0 };

    let alpha = (state.alpha + dt * config.fade_scale * sign).clamp(MINIMUM_ALPHA, MAXIMUM_ALPHA);
    let next = FadeState {
        alpha,
        latched: approximately(alpha, MAXIMUM_ALPHA),
    };

    let phase = if next.latched {
        FadePhase::Latched
    } else if fading_in {
        FadePhase::FadingIn
    } else if alpha <= MINIMUM_ALPHA {
        FadePhase::Hidden
    } else {
        FadePhase::FadingOut
    };
    (next, phase)
}

fn is_gazed_at<P, T>(config: &FadeConfig, camera: &P, target: &T) -> bool
where
    P: PoseProvider + ?Sized,
    T: PositionProvider + ?Sized,
{
    gaze::is_facing_object(camera, target, config.visibility_angle_degrees)
}

/// One frame of the fade for `target` seen from `camera`
pub fn update<P, T>(state: FadeState, config: &FadeConfig, camera: &P, target: &T, dt: f32) -> FadeState
where
    P: PoseProvider + ?Sized,
    T: PositionProvider + ?Sized,
{
    if state.latched {
        return state;
    }
    advance(state, config, is_gazed_at(config, camera, target), dt)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct LabelId(pub u32);

impl fmt::Display for LabelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub type CompletionCallback = Box<dyn FnMut(LabelId)>;

/// Stateful wrapper that owns a target and writes its opacity every tick
pub struct FadeController<T> {
    id: LabelId,
    config: FadeConfig,
    state: FadeState,
    phase: FadePhase,
    target: T,
    on_complete: Option<CompletionCallback>,
}

impl<T: PositionProvider + OpacitySink> FadeController<T> {
    /// Validates `config` and hides the target
    pub fn new(id: LabelId, config: FadeConfig, mut target: T) -> Result<Self, FadeConfigError> {
        config.validate()?;
        let state = FadeState::new();
        target.set_alpha(state.alpha);
        Ok(Self {
            id,
            config,
            state,
            phase: FadePhase::Hidden,
            target,
            on_complete: None,
        })
    }

    /// Invoked once, on the tick the target reaches full opacity
    pub fn with_completion(mut self, callback: impl FnMut(LabelId) + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    /// Returns true on the tick that completes the transition
    pub fn tick<P: PoseProvider + ?Sized>(&mut self, camera: &P, dt: f32) -> bool {
        if self.state.latched {
            return false;
        }

        let gazing = is_gazed_at(&self.config, camera, &self.target);
        let (state, phase) = advance_with_phase(self.state, &self.config, gazing, dt);
        self.state = state;
        self.phase = phase;
        self.target.set_alpha(self.state.alpha);

        if self.state.latched {
            log::info!("label {} transition complete", self.id);
            if let Some(callback) = self.on_complete.as_mut() {
                callback(self.id);
            }
            return true;
        }
        false
    }

    pub fn id(&self) -> LabelId {
        self.id
    }

    pub fn config(&self) -> &FadeConfig {
        &self.config
    }

    pub fn state(&self) -> FadeState {
        self.state
    }

    pub fn phase(&self) -> FadePhase {
        self.phase
    }

    pub fn target(&self) -> &T {
        &self.target
    }
}

impl<T: fmt::Debug> fmt::Debug for FadeController<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FadeController")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("state", &self.state)
            .field("phase", &self.phase)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}
