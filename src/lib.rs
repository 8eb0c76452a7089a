#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

//! # Myth Window
//!
//! The root surface of a Myth application:
//! - an ordered set of cameras composited by a multi-pass render
//! - a root view controller pinned to the bottom of the window
//! - an animated, input-gated modal presentation slot
//!
//! ```rust,ignore
//! use myth_window::{AppContext, BasicViewController, CommandQueue, View, Window, WindowSettings};
//!
//! let mut ctx = AppContext::new(glam::Vec2::new(1280.0, 720.0));
//! let mut window = Window::new(&ctx, WindowSettings::default())?;
//! window.set_root_view_controller(Some(Box::new(BasicViewController::new(View::new("home")))));
//!
//! let mut renderer = CommandQueue::default();
//! window.render(&mut ctx, &mut renderer, &glam::Mat4::IDENTITY, None);
//! ```

pub mod animation;
pub mod app;
pub mod errors;
pub mod render;
pub mod scene;

pub use animation::{AnimationConfig, AnimationCurve, AnimationHandle, AnimationScheduler};
pub use app::{AppContext, InputGate, VisitingCamera, WindowSettings};
pub use errors::{Result, WindowError};
pub use render::{ClearState, CommandQueue, DrawCommand, MatrixStackType, Renderer};
pub use scene::{
    BasicViewController, Camera, CameraFlag, CameraKey, CameraRole, ControllerState, ModalState,
    Rect, View, ViewController, ViewKey, ViewTree, Window, WindowZOrder,
};
