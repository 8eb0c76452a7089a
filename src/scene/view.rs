use std::borrow::Cow;

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::scene::camera::CameraFlag;

/// Reserved z-orders inside a window.
///
/// The root controller's view always sits at [`BOTTOM`](Self::BOTTOM),
/// a presented modal at [`MODAL`](Self::MODAL), above any regular content.
pub struct WindowZOrder;

impl WindowZOrder {
    pub const BOTTOM: i32 = i32::MIN;
    pub const MODAL: i32 = i32::MAX - 1;
}

/// Axis-aligned rectangle in window units, origin at the top-left, y down.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[must_use]
    pub const fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    #[must_use]
    pub const fn from_size(size: Vec2) -> Self {
        Self {
            origin: Vec2::ZERO,
            size,
        }
    }

    #[must_use]
    pub fn offset(self, delta: Vec2) -> Self {
        Self {
            origin: self.origin + delta,
            size: self.size,
        }
    }

    #[must_use]
    pub fn lerp(self, end: Self, t: f32) -> Self {
        Self {
            origin: self.origin.lerp(end.origin, t),
            size: self.size.lerp(end.size, t),
        }
    }

    /// Maps the unit quad onto this rectangle.
    #[must_use]
    pub fn to_mat4(self) -> Mat4 {
        Mat4::from_translation(self.origin.extend(0.0))
            * Mat4::from_scale(Vec3::new(self.size.x, self.size.y, 1.0))
    }
}

/// A leaf of the window's subview storage.
#[derive(Debug, Clone)]
pub struct View {
    pub name: Cow<'static, str>,
    pub frame: Rect,
    pub visible: bool,
    pub background: Vec4,
    /// Cameras allowed to draw this view.
    pub camera_mask: CameraFlag,
    pub(crate) z_order: i32,
}

impl Default for View {
    fn default() -> Self {
        Self::new("View")
    }
}

impl View {
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            frame: Rect::default(),
            visible: true,
            background: Vec4::ONE,
            camera_mask: CameraFlag::DEFAULT,
            z_order: 0,
        }
    }

    #[must_use]
    pub fn with_frame(mut self, frame: Rect) -> Self {
        self.frame = frame;
        self
    }

    #[must_use]
    pub fn with_z_order(mut self, z_order: i32) -> Self {
        self.z_order = z_order;
        self
    }

    #[must_use]
    pub fn with_camera_mask(mut self, mask: CameraFlag) -> Self {
        self.camera_mask = mask;
        self
    }

    #[must_use]
    pub fn z_order(&self) -> i32 {
        self.z_order
    }

    #[must_use]
    pub fn is_visible_to(&self, flag: CameraFlag) -> bool {
        self.visible && self.camera_mask.intersects(flag)
    }
}
