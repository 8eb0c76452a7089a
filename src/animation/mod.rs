//! Frame animations
//!
//! Tick-driven interpolation of view frames, used by the window for modal
//! transitions. Nothing blocks while an animation runs: each
//! [`AnimationScheduler::update`] advances the clocks and reports the
//! handles that completed during that tick.

pub mod easing;
pub mod scheduler;

pub use easing::AnimationCurve;
pub use scheduler::{AnimationConfig, AnimationHandle, AnimationScheduler, AnimationTarget, Completion};
