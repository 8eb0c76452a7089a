use glam::Mat4;
use slotmap::SlotMap;
use smallvec::SmallVec;

use crate::animation::AnimationTarget;
use crate::app::VisitingCamera;
use crate::render::{DrawCommand, Renderer};
use crate::scene::camera::Camera;
use crate::scene::view::{Rect, View};
use crate::scene::{CameraKey, ViewKey};

/// One entry of the subview list, in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subview {
    View(ViewKey),
    Camera(CameraKey),
}

/// Subview storage of a window.
///
/// Owns every view and camera attached to the window. Cameras are also
/// registered in a separate list that is re-sorted by render order lazily,
/// the first time it is read after a structural change.
#[derive(Default)]
pub struct ViewTree {
    views: SlotMap<ViewKey, View>,
    camera_store: SlotMap<CameraKey, Camera>,
    subviews: Vec<Subview>,

    cameras: Vec<CameraKey>,
    camera_order_dirty: bool,
}

impl ViewTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Views
    // ========================================================================

    pub fn add_view(&mut self, view: View) -> ViewKey {
        let key = self.views.insert(view);
        self.subviews.push(Subview::View(key));
        key
    }

    /// Detaches a view, handing it back. Stale keys are ignored.
    pub fn remove_view(&mut self, key: ViewKey) -> Option<View> {
        let view = self.views.remove(key)?;
        self.subviews.retain(|s| *s != Subview::View(key));
        Some(view)
    }

    #[must_use]
    pub fn view(&self, key: ViewKey) -> Option<&View> {
        self.views.get(key)
    }

    pub fn view_mut(&mut self, key: ViewKey) -> Option<&mut View> {
        self.views.get_mut(key)
    }

    #[must_use]
    pub fn contains_view(&self, key: ViewKey) -> bool {
        self.views.contains_key(key)
    }

    pub fn set_z_order(&mut self, key: ViewKey, z_order: i32) -> bool {
        match self.views.get_mut(key) {
            Some(view) => {
                view.z_order = z_order;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn subviews(&self) -> &[Subview] {
        &self.subviews
    }

    /// Views in back-to-front order: ascending z, ties keep insertion order.
    #[must_use]
    pub fn draw_order(&self) -> SmallVec<[ViewKey; 16]> {
        let mut keys: SmallVec<[ViewKey; 16]> = self
            .subviews
            .iter()
            .filter_map(|s| match s {
                Subview::View(key) => Some(*key),
                Subview::Camera(_) => None,
            })
            .collect();
        keys.sort_by_key(|key| self.views.get(*key).map_or(0, |v| v.z_order));
        keys
    }

    // ========================================================================
    // Cameras
    // ========================================================================

    /// Stores the camera as a subview and registers it for rendering.
    pub fn add_camera(&mut self, camera: Camera) -> CameraKey {
        let key = self.camera_store.insert(camera);
        self.subviews.push(Subview::Camera(key));
        self.cameras.push(key);
        self.camera_order_dirty = true;
        key
    }

    pub fn remove_camera(&mut self, key: CameraKey) -> Option<Camera> {
        let camera = self.camera_store.remove(key)?;
        self.subviews.retain(|s| *s != Subview::Camera(key));
        self.cameras.retain(|k| *k != key);
        self.camera_order_dirty = true;
        Some(camera)
    }

    #[must_use]
    pub fn camera(&self, key: CameraKey) -> Option<&Camera> {
        self.camera_store.get(key)
    }

    pub fn camera_mut(&mut self, key: CameraKey) -> Option<&mut Camera> {
        self.camera_store.get_mut(key)
    }

    pub fn set_camera_render_order(&mut self, key: CameraKey, order: i32) -> bool {
        match self.camera_store.get_mut(key) {
            Some(camera) => {
                if camera.render_order() != order {
                    camera.set_render_order(order);
                    self.camera_order_dirty = true;
                }
                true
            }
            None => false,
        }
    }

    /// Registered cameras, ascending by render order.
    ///
    /// The sort is stable, so cameras sharing an order keep their
    /// registration order.
    pub fn cameras(&mut self) -> &[CameraKey] {
        if self.camera_order_dirty {
            let store = &self.camera_store;
            self.cameras
                .sort_by_key(|key| store.get(*key).map_or(0, Camera::render_order));
            self.camera_order_dirty = false;
        }
        &self.cameras
    }

    #[must_use]
    pub fn is_camera_order_dirty(&self) -> bool {
        self.camera_order_dirty
    }

    // ========================================================================
    // Bulk operations
    // ========================================================================

    /// Drops every view and camera, deregistering the cameras.
    pub fn clear(&mut self) {
        self.views.clear();
        self.camera_store.clear();
        self.subviews.clear();
        self.cameras.clear();
        self.camera_order_dirty = false;
    }

    /// Drops every view and every camera except `keep`, which stays
    /// registered under the same key. A stale `keep` clears everything.
    pub fn clear_except_camera(&mut self, keep: CameraKey) {
        self.views.clear();
        self.camera_store.retain(|key, _| key == keep);
        self.subviews.clear();
        self.cameras.clear();
        if self.camera_store.contains_key(keep) {
            self.subviews.push(Subview::Camera(keep));
            self.cameras.push(keep);
        }
        self.camera_order_dirty = true;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.subviews.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subviews.is_empty()
    }

    /// Queues one draw per view the visiting camera can see.
    pub fn visit(
        &self,
        renderer: &mut dyn Renderer,
        parent_transform: &Mat4,
        visiting: &VisitingCamera,
    ) {
        for key in self.draw_order() {
            let Some(view) = self.views.get(key) else {
                continue;
            };
            if !view.is_visible_to(visiting.flag) {
                continue;
            }
            renderer.submit(DrawCommand {
                view: key,
                camera: visiting.key,
                model: *parent_transform * view.frame.to_mat4(),
                view_projection: visiting.view_projection,
                color: view.background,
                z_order: view.z_order,
            });
        }
    }
}

impl AnimationTarget for ViewTree {
    fn frame(&self, view: ViewKey) -> Option<Rect> {
        self.views.get(view).map(|v| v.frame)
    }

    fn set_frame(&mut self, view: ViewKey, frame: Rect) -> bool {
        match self.views.get_mut(view) {
            Some(v) => {
                v.frame = frame;
                true
            }
            None => false,
        }
    }
}
