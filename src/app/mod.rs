//! Application context
//!
//! State the window layer shares across windows: the logical window size,
//! the global matrix stacks, the input dispatch gate, the animation
//! scheduler and the visiting-camera marker.
//!
//! Everything here is threaded explicitly through the window calls that
//! need it, instead of living in globals. Only one render pass may run
//! against a context at a time.

pub mod input;
pub mod settings;

use glam::{Mat4, Vec2};

use crate::animation::AnimationScheduler;
use crate::render::MatrixStacks;
use crate::scene::{CameraFlag, CameraKey};

pub use input::InputGate;
pub use settings::{DefaultCameraSettings, TransitionSettings, WindowSettings};

/// The camera rendering the current slice of a render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisitingCamera {
    pub key: CameraKey,
    pub flag: CameraFlag,
    /// Top of the projection stack while this camera is active.
    pub view_projection: Mat4,
}

pub struct AppContext {
    win_size: Vec2,
    pub matrix_stacks: MatrixStacks,
    pub input: InputGate,
    pub animations: AnimationScheduler,
    visiting_camera: Option<VisitingCamera>,
}

impl AppContext {
    #[must_use]
    pub fn new(win_size: Vec2) -> Self {
        Self {
            win_size,
            matrix_stacks: MatrixStacks::new(),
            input: InputGate::new(),
            animations: AnimationScheduler::new(),
            visiting_camera: None,
        }
    }

    #[must_use]
    pub fn win_size(&self) -> Vec2 {
        self.win_size
    }

    /// `Some` only while a render pass is inside a camera slice.
    #[must_use]
    pub fn visiting_camera(&self) -> Option<&VisitingCamera> {
        self.visiting_camera.as_ref()
    }

    pub(crate) fn set_visiting_camera(&mut self, camera: Option<VisitingCamera>) {
        self.visiting_camera = camera;
    }
}
