//! Render Backend Interface
//!
//! The window layer does not own a GPU backend. It drives one through the
//! [`Renderer`] trait:
//! - cameras bind their viewport and clear the targets
//! - view traversal queues [`DrawCommand`]s
//! - [`Renderer::execute`] flushes the queue once per camera slice
//!
//! [`CommandQueue`] is an in-memory implementation used for headless runs and tests.

pub mod matrix_stack;
pub mod queue;

use glam::{Mat4, Vec4};

use crate::scene::{CameraKey, ViewKey};
use crate::scene::camera::Viewport;

pub use matrix_stack::{MatrixStack, MatrixStackType, MatrixStacks};
pub use queue::{CommandQueue, RenderOp};

/// What a camera clears before its layer is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClearState {
    /// `None` keeps the color target of the previous layer.
    pub color: Option<Vec4>,
    pub depth: f32,
}

/// A single queued draw of a view's frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub view: ViewKey,
    /// Camera that was visiting when the command was queued.
    pub camera: CameraKey,
    pub model: Mat4,
    pub view_projection: Mat4,
    pub color: Vec4,
    /// Global z-order of the view inside its window.
    pub z_order: i32,
}

/// Backend consumed by [`Window::render`](crate::scene::window::Window::render).
pub trait Renderer {
    /// Returns the currently bound viewport.
    fn viewport(&self) -> Viewport;

    fn set_viewport(&mut self, viewport: Viewport);

    fn clear(&mut self, state: ClearState);

    /// Queues a draw command. Nothing is drawn until [`execute`](Self::execute).
    fn submit(&mut self, command: DrawCommand);

    /// Flushes every queued command.
    fn execute(&mut self);
}
