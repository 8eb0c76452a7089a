use std::borrow::Cow;

use bitflags::bitflags;
use glam::{Affine3A, Mat4, Vec2, Vec3, Vec4};
use uuid::Uuid;

use crate::app::settings::DefaultCameraSettings;
use crate::render::{ClearState, Renderer};

bitflags! {
    /// Which cameras a view is visible to.
    ///
    /// A camera carries exactly one flag; a view carries a mask and is drawn
    /// only by cameras whose flag intersects it.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct CameraFlag: u16 {
        const DEFAULT = 1 << 0;
        const USER1   = 1 << 1;
        const USER2   = 1 << 2;
        const USER3   = 1 << 3;
        const USER4   = 1 << 4;
        const USER5   = 1 << 5;
        const USER6   = 1 << 6;
        const USER7   = 1 << 7;
        const USER8   = 1 << 8;
    }
}

impl Default for CameraFlag {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraRole {
    Default,
    Custom,
}

/// Viewport rectangle in window pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[must_use]
    pub fn from_size(size: Vec2) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: size.x,
            height: size.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectionType {
    Perspective,
    Orthographic,
}

#[derive(Debug, Clone)]
pub struct Camera {
    pub uuid: Uuid,
    pub name: Cow<'static, str>,

    // === Projection ===
    pub projection_type: ProjectionType,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub ortho_size: f32,

    pub visible: bool,
    /// `None` keeps whatever viewport the renderer has bound.
    pub viewport: Option<Viewport>,
    /// `None` clears depth only.
    pub clear_color: Option<Vec4>,

    flag: CameraFlag,
    render_order: i32,

    // Cached matrices, read-only for the render pass
    pub(crate) world_matrix: Affine3A,
    pub(crate) view_matrix: Mat4,
    pub(crate) projection_matrix: Mat4,

    // Per-frame overrides, dropped by `restore`
    additional_projection: Option<Mat4>,
    additional_transform: Option<Mat4>,
    saved_viewport: Option<Viewport>,
}

impl Camera {
    #[must_use]
    pub fn new_perspective(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut cam = Self::base(ProjectionType::Perspective, fov, aspect, near, far);
        cam.update_projection_matrix();
        cam
    }

    #[must_use]
    pub fn new_orthographic(ortho_size: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut cam = Self::base(ProjectionType::Orthographic, 60.0, aspect, near, far);
        cam.ortho_size = ortho_size;
        cam.update_projection_matrix();
        cam
    }

    /// The camera every window starts with.
    ///
    /// Looks at the window centre from `z_eye`, chosen so that one window unit
    /// covers one pixel on the `z = 0` plane.
    #[must_use]
    pub fn new_default(size: Vec2, settings: &DefaultCameraSettings) -> Self {
        let half_fov = settings.fov_degrees.to_radians() * 0.5;
        let z_eye = size.y / (2.0 * half_fov.tan());
        let aspect = if size.y > 0.0 { size.x / size.y } else { 1.0 };

        let mut cam = Self::new_perspective(
            settings.fov_degrees,
            aspect,
            settings.near,
            z_eye + size.y * 0.5,
        );
        cam.name = Cow::Borrowed("DefaultCamera");
        cam.clear_color = Some(Vec4::from_array(settings.clear_color));

        let eye = Vec3::new(size.x * 0.5, size.y * 0.5, z_eye);
        let target = Vec3::new(size.x * 0.5, size.y * 0.5, 0.0);
        let world = Affine3A::look_at_rh(eye, target, Vec3::Y).inverse();
        cam.update_view_projection(&world);
        cam
    }

    fn base(projection_type: ProjectionType, fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: Cow::Borrowed("Camera"),
            projection_type,
            fov: fov.to_radians(),
            aspect,
            near,
            far,
            ortho_size: 10.0,

            visible: true,
            viewport: None,
            clear_color: None,

            flag: CameraFlag::DEFAULT,
            render_order: 0,

            world_matrix: Affine3A::IDENTITY,
            view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,

            additional_projection: None,
            additional_transform: None,
            saved_viewport: None,
        }
    }

    #[must_use]
    pub fn with_flag(mut self, flag: CameraFlag) -> Self {
        self.flag = flag;
        self
    }

    /// Sets the ordering key before the camera is added to a window.
    /// Once registered, use `Window::set_camera_render_order`.
    #[must_use]
    pub fn with_render_order(mut self, order: i32) -> Self {
        self.render_order = order;
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn flag(&self) -> CameraFlag {
        self.flag
    }

    #[must_use]
    pub fn role(&self) -> CameraRole {
        if self.flag == CameraFlag::DEFAULT {
            CameraRole::Default
        } else {
            CameraRole::Custom
        }
    }

    #[must_use]
    pub fn render_order(&self) -> i32 {
        self.render_order
    }

    pub(crate) fn set_render_order(&mut self, order: i32) {
        self.render_order = order;
    }

    pub fn update_projection_matrix(&mut self) {
        self.projection_matrix = match self.projection_type {
            ProjectionType::Perspective => {
                Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
            }
            ProjectionType::Orthographic => {
                let w = self.ortho_size * self.aspect;
                let h = self.ortho_size;
                Mat4::orthographic_rh(-w, w, -h, h, self.near, self.far)
            }
        };
    }

    pub fn update_view_projection(&mut self, world_transform: &Affine3A) {
        self.world_matrix = *world_transform;
        // View matrix = world inverse
        self.view_matrix = Mat4::from(*world_transform).inverse();
    }

    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection_matrix
    }

    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        self.view_matrix
    }

    /// View-projection with the per-frame overrides folded in.
    ///
    /// `additional_projection * projection * inverse(world * additional_transform)`
    #[must_use]
    pub fn view_projection_matrix(&self) -> Mat4 {
        let view = match self.additional_transform {
            Some(extra) => (Mat4::from(self.world_matrix) * extra).inverse(),
            None => self.view_matrix,
        };
        let projection = match self.additional_projection {
            Some(extra) => extra * self.projection_matrix,
            None => self.projection_matrix,
        };
        projection * view
    }

    pub fn set_additional_projection(&mut self, matrix: Mat4) {
        self.additional_projection = Some(matrix);
    }

    pub fn set_additional_transform(&mut self, matrix: Mat4) {
        self.additional_transform = Some(matrix);
    }

    #[must_use]
    pub fn additional_projection(&self) -> Option<Mat4> {
        self.additional_projection
    }

    #[must_use]
    pub fn additional_transform(&self) -> Option<Mat4> {
        self.additional_transform
    }

    /// Binds this camera's viewport, remembering the one it replaces.
    pub fn apply(&mut self, renderer: &mut dyn Renderer) {
        if let Some(viewport) = self.viewport {
            self.saved_viewport = Some(renderer.viewport());
            renderer.set_viewport(viewport);
        }
    }

    pub fn clear_background(&self, renderer: &mut dyn Renderer, depth: f32) {
        renderer.clear(ClearState {
            color: self.clear_color,
            depth,
        });
    }

    /// Undoes [`apply`](Self::apply) and drops the per-frame overrides.
    pub fn restore(&mut self, renderer: &mut dyn Renderer) {
        if let Some(viewport) = self.saved_viewport.take() {
            renderer.set_viewport(viewport);
        }
        self.additional_projection = None;
        self.additional_transform = None;
    }
}
