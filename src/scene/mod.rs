//! Window scene layer
//!
//! - Camera: render viewpoint with ordering key, visibility and role flag
//! - View: leaf of the window's subview storage
//! - ViewTree: subview storage and camera registry
//! - ViewController: owner of a root view with lifecycle hooks
//! - Window: root surface driving the render pass and modal presentation

pub mod camera;
pub mod controller;
pub mod tree;
pub mod view;
pub mod window;

pub use camera::{Camera, CameraFlag, CameraRole, ProjectionType, Viewport};
pub use controller::{BasicViewController, ControllerState, ViewController};
pub use tree::{Subview, ViewTree};
pub use view::{Rect, View, WindowZOrder};
pub use window::{ModalState, Window};

use slotmap::new_key_type;

new_key_type! {
    pub struct ViewKey;
    pub struct CameraKey;
}
