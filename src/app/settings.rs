//! Window Settings
//!
//! Tunables for a [`Window`](crate::scene::Window). All fields have
//! defaults, so a partial JSON document is enough:
//!
//! ```rust,ignore
//! let settings: WindowSettings = serde_json::from_str(r#"{ "clear_depth": 0.5 }"#)?;
//! ```

use serde::{Deserialize, Serialize};

use crate::animation::{AnimationConfig, AnimationCurve};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    /// Timing of the modal present/dismiss slide.
    pub modal_transition: TransitionSettings,
    pub default_camera: DefaultCameraSettings,
    /// Depth each camera clears to before its layer is drawn.
    pub clear_depth: f32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            modal_transition: TransitionSettings::default(),
            default_camera: DefaultCameraSettings::default(),
            clear_depth: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionSettings {
    /// Seconds.
    pub duration: f32,
    /// Seconds.
    pub delay: f32,
    pub curve: AnimationCurve,
}

impl Default for TransitionSettings {
    fn default() -> Self {
        Self {
            duration: 0.25,
            delay: 0.1,
            curve: AnimationCurve::Linear,
        }
    }
}

impl TransitionSettings {
    #[must_use]
    pub fn to_config(self, tag: &'static str) -> AnimationConfig {
        AnimationConfig {
            tag: tag.into(),
            duration: self.duration,
            delay: self.delay,
            curve: self.curve,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultCameraSettings {
    pub fov_degrees: f32,
    pub near: f32,
    pub clear_color: [f32; 4],
}

impl Default for DefaultCameraSettings {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            near: 10.0,
            clear_color: [0.0, 0.0, 0.0, 1.0],
        }
    }
}
