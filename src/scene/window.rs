use std::sync::atomic::{AtomicU32, Ordering};

use glam::{Mat4, Vec2};
use smallvec::SmallVec;

use crate::animation::{AnimationHandle, AnimationTarget};
use crate::app::{AppContext, VisitingCamera, WindowSettings};
use crate::errors::{Result, WindowError};
use crate::render::{MatrixStackType, Renderer};
use crate::scene::camera::Camera;
use crate::scene::controller::ViewController;
use crate::scene::tree::ViewTree;
use crate::scene::view::{Rect, View, WindowZOrder};
use crate::scene::{CameraKey, ViewKey};

static NEXT_WINDOW_ID: AtomicU32 = AtomicU32::new(1);

/// Where the modal slot is in its present/dismiss cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalState {
    /// No modal controller.
    #[default]
    Idle,
    /// Modal attached, input suppressed, transition running.
    Presenting,
    /// Modal covers the root, input dispatching again.
    Presented,
    /// Root re-appeared, input suppressed, modal still attached.
    Dismissing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TransitionKind {
    Present,
    Dismiss,
}

/// An animated transition waiting for its completion.
#[derive(Debug, Clone, Copy)]
struct PendingTransition {
    kind: TransitionKind,
    handle: AnimationHandle,
}

/// Root surface of an application.
///
/// A window owns:
/// - its subview storage, including every camera it renders through
/// - a default camera that survives [`remove_all_subviews`](Self::remove_all_subviews)
/// - at most one root controller, kept at the bottom of the z-order
/// - at most one modal controller, presented above all root content
///
/// Transitions are assumed to run to completion. Presenting while a modal is
/// active, or dismissing with none, is ignored; interrupting a running
/// transition is not supported and only logged.
pub struct Window {
    pub id: u32,
    frame: Rect,
    transform: Mat4,
    settings: WindowSettings,

    tree: ViewTree,
    default_camera: CameraKey,

    root_controller: Option<Box<dyn ViewController>>,
    modal_controller: Option<Box<dyn ViewController>>,
    modal_state: ModalState,
    pending: Option<PendingTransition>,
}

impl Window {
    /// Creates a window sized to the application context.
    ///
    /// Fails when the context reports a size that cannot be laid out against.
    pub fn new(ctx: &AppContext, settings: WindowSettings) -> Result<Self> {
        let size = ctx.win_size();
        if !(size.x.is_finite() && size.y.is_finite() && size.x > 0.0 && size.y > 0.0) {
            return Err(WindowError::InvalidWindowSize {
                width: size.x,
                height: size.y,
            });
        }

        let frame = Rect::from_size(size);
        let mut tree = ViewTree::new();
        let default_camera = tree.add_camera(Camera::new_default(size, &settings.default_camera));

        let id = NEXT_WINDOW_ID.fetch_add(1, Ordering::Relaxed);
        log::info!("Window {id} created ({}x{})", size.x, size.y);

        Ok(Self {
            id,
            frame,
            transform: Mat4::from_translation(frame.origin.extend(0.0)),
            settings,
            tree,
            default_camera,
            root_controller: None,
            modal_controller: None,
            modal_state: ModalState::Idle,
            pending: None,
        })
    }

    #[must_use]
    pub fn settings(&self) -> &WindowSettings {
        &self.settings
    }

    #[must_use]
    pub fn frame(&self) -> Rect {
        self.frame
    }

    #[must_use]
    pub fn content_size(&self) -> Vec2 {
        self.frame.size
    }

    /// The window's own rectangle in its local space.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.frame.size)
    }

    #[must_use]
    pub fn view_to_superview_transform(&self) -> Mat4 {
        self.transform
    }

    #[must_use]
    pub fn tree(&self) -> &ViewTree {
        &self.tree
    }

    // ========================================================================
    // Subviews
    // ========================================================================

    pub fn add_subview(&mut self, view: View) -> ViewKey {
        self.tree.add_view(view)
    }

    pub fn remove_subview(&mut self, key: ViewKey) -> Option<View> {
        self.tree.remove_view(key)
    }

    #[must_use]
    pub fn view(&self, key: ViewKey) -> Option<&View> {
        self.tree.view(key)
    }

    pub fn view_mut(&mut self, key: ViewKey) -> Option<&mut View> {
        self.tree.view_mut(key)
    }

    #[must_use]
    pub fn subview_count(&self) -> usize {
        self.tree.len()
    }

    /// Clears the subview storage, keeping only the default camera.
    ///
    /// Root and modal controller views are subviews like any other and are
    /// dropped too. The controllers stay owned by the window; re-establish
    /// their views explicitly if they must survive the clear.
    pub fn remove_all_subviews(&mut self) {
        self.tree.clear_except_camera(self.default_camera);

        if self.root_controller.is_some() || self.modal_controller.is_some() {
            log::debug!("Window {}: controller views removed by bulk clear", self.id);
        }
    }

    // ========================================================================
    // Cameras
    // ========================================================================

    pub fn add_camera(&mut self, camera: Camera) -> CameraKey {
        self.tree.add_camera(camera)
    }

    /// Removes a camera. The default camera cannot be removed.
    pub fn remove_camera(&mut self, key: CameraKey) -> Option<Camera> {
        if key == self.default_camera {
            log::warn!("Window {}: refusing to remove the default camera", self.id);
            return None;
        }
        self.tree.remove_camera(key)
    }

    pub fn set_camera_render_order(&mut self, key: CameraKey, order: i32) -> bool {
        self.tree.set_camera_render_order(key, order)
    }

    #[must_use]
    pub fn default_camera(&self) -> CameraKey {
        self.default_camera
    }

    #[must_use]
    pub fn camera(&self, key: CameraKey) -> Option<&Camera> {
        self.tree.camera(key)
    }

    pub fn camera_mut(&mut self, key: CameraKey) -> Option<&mut Camera> {
        self.tree.camera_mut(key)
    }

    /// Registered cameras ascending by render order, ties in registration order.
    pub fn cameras(&mut self) -> &[CameraKey] {
        self.tree.cameras()
    }

    // ========================================================================
    // Render
    // ========================================================================

    /// Renders the window once per visible camera, in camera order.
    ///
    /// For each camera the projection stack is pushed and loaded with the
    /// camera's composed view-projection, the background is cleared to the
    /// configured depth, the subviews are visited and the renderer flushed.
    /// Invisible cameras are skipped without touching the renderer or the
    /// matrix stacks.
    ///
    /// The window's own transform is read, never restored or written.
    pub fn render(
        &mut self,
        ctx: &mut AppContext,
        renderer: &mut dyn Renderer,
        eye_transform: &Mat4,
        eye_projection: Option<&Mat4>,
    ) {
        let transform = self.view_to_superview_transform();
        let eye_inverse = eye_transform.inverse();
        let clear_depth = self.settings.clear_depth;
        let keys: SmallVec<[CameraKey; 4]> = self.tree.cameras().iter().copied().collect();

        for key in keys {
            let Some(camera) = self.tree.camera_mut(key) else {
                continue;
            };
            if !camera.visible {
                continue;
            }

            if let Some(eye_projection) = eye_projection {
                let extra = *eye_projection * camera.projection_matrix().inverse();
                camera.set_additional_projection(extra);
            }
            camera.set_additional_transform(eye_inverse);

            ctx.matrix_stacks.push(MatrixStackType::Projection);
            ctx.matrix_stacks
                .load(MatrixStackType::Projection, camera.view_projection_matrix());
            let slice = VisitingCamera {
                key,
                flag: camera.flag(),
                view_projection: ctx.matrix_stacks.top(MatrixStackType::Projection),
            };
            ctx.set_visiting_camera(Some(slice));
            log::trace!("Window {}: rendering camera '{}'", self.id, camera.name);

            camera.apply(renderer);
            camera.clear_background(renderer, clear_depth);

            if let Some(visiting) = ctx.visiting_camera() {
                self.tree.visit(renderer, &transform, visiting);
            }
            renderer.execute();

            if let Some(camera) = self.tree.camera_mut(key) {
                camera.restore(renderer);
            }
            if let Err(err) = ctx.matrix_stacks.pop(MatrixStackType::Projection) {
                log::error!("Window {}: {err}", self.id);
            }
        }

        ctx.set_visiting_camera(None);
    }

    // ========================================================================
    // Root Controller
    // ========================================================================

    /// Replaces the root controller.
    ///
    /// The previous controller is detached and dropped before the new one is
    /// attached. The new root view is forced to the bottom of the z-order.
    /// `None` just clears the slot.
    pub fn set_root_view_controller(&mut self, controller: Option<Box<dyn ViewController>>) {
        if let Some(mut old) = self.root_controller.take() {
            old.detach_from_parent(&mut self.tree);
            drop(old);
        }

        if let Some(mut controller) = controller {
            let key = controller.attach_to_parent(&mut self.tree);
            self.tree.set_z_order(key, WindowZOrder::BOTTOM);
            self.root_controller = Some(controller);
        }
    }

    #[must_use]
    pub fn root_view_controller(&self) -> Option<&dyn ViewController> {
        self.root_controller.as_deref()
    }

    pub fn root_view_controller_mut(&mut self) -> Option<&mut (dyn ViewController + 'static)> {
        self.root_controller.as_deref_mut()
    }

    /// Puts the current root controller's view back into the window, pinned
    /// to the bottom of the z-order. Used to recover after
    /// [`remove_all_subviews`](Self::remove_all_subviews).
    ///
    /// The appear hook fires again unless a modal covers the root.
    pub fn reattach_root_view(&mut self) -> Option<ViewKey> {
        let root = self.root_controller.as_mut()?;
        let already_attached = root.view().is_some_and(|key| self.tree.contains_view(key));

        let key = root.attach_to_parent(&mut self.tree);
        self.tree.set_z_order(key, WindowZOrder::BOTTOM);
        if !already_attached && self.modal_state == ModalState::Idle {
            root.view_did_appear();
        }
        Some(key)
    }

    // ========================================================================
    // Modal Presentation
    // ========================================================================

    #[must_use]
    pub fn modal_view_controller(&self) -> Option<&dyn ViewController> {
        self.modal_controller.as_deref()
    }

    #[must_use]
    pub fn modal_state(&self) -> ModalState {
        self.modal_state
    }

    /// `true` while a present or dismiss animation has not completed.
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.pending.is_some()
    }

    /// Presents `controller` above all root content.
    ///
    /// The modal's appear hook fires immediately and input is suppressed
    /// until the transition ends. Animated presentations slide the view up
    /// from below the window and finish on a later [`update`](Self::update);
    /// otherwise the transition finishes before this returns.
    ///
    /// When a modal is already active nothing happens and the controller is
    /// handed back.
    pub fn present_modal_view_controller(
        &mut self,
        ctx: &mut AppContext,
        mut controller: Box<dyn ViewController>,
        animated: bool,
    ) -> Option<Box<dyn ViewController>> {
        if self.modal_controller.is_some() {
            log::debug!("Window {}: a modal controller is already presented", self.id);
            return Some(controller);
        }

        let bounds = self.bounds();
        let key = controller.attach_to_parent(&mut self.tree);
        self.tree.set_z_order(key, WindowZOrder::MODAL);
        self.tree.set_frame(key, bounds);
        controller.view_did_appear();
        self.modal_controller = Some(controller);

        self.modal_state = ModalState::Presenting;
        ctx.input.suppress();
        log::debug!("Window {}: presenting modal (animated: {animated})", self.id);

        if animated {
            let staged = self.staged_frame();
            self.tree.set_frame(key, staged);
            let handle = ctx.animations.schedule(
                key,
                staged,
                bounds,
                self.settings.modal_transition.to_config("present_modal"),
            );
            self.pending = Some(PendingTransition {
                kind: TransitionKind::Present,
                handle,
            });
        } else {
            self.finish_presentation(ctx);
        }
        None
    }

    /// Dismisses the active modal.
    ///
    /// The root's appear hook fires immediately and input is suppressed until
    /// the modal has been detached and dropped. Does nothing without a modal.
    pub fn dismiss_modal_view_controller(&mut self, ctx: &mut AppContext, animated: bool) {
        let Some(modal) = self.modal_controller.as_ref() else {
            log::debug!("Window {}: no modal controller to dismiss", self.id);
            return;
        };
        let modal_view = modal.view();

        if let Some(superseded) = self.pending.take() {
            log::warn!(
                "Window {}: dismissing while a modal transition is still running",
                self.id
            );
            ctx.animations.cancel(superseded.handle);
            ctx.input.resume();
        }

        if let Some(root) = self.root_controller.as_mut() {
            root.view_did_appear();
        }

        self.modal_state = ModalState::Dismissing;
        ctx.input.suppress();
        log::debug!("Window {}: dismissing modal (animated: {animated})", self.id);

        if animated && let Some(key) = modal_view {
            let from = self.tree.frame(key).unwrap_or_else(|| self.bounds());
            let handle = ctx.animations.schedule(
                key,
                from,
                self.staged_frame(),
                self.settings.modal_transition.to_config("dismiss_modal"),
            );
            self.pending = Some(PendingTransition {
                kind: TransitionKind::Dismiss,
                handle,
            });
        } else {
            self.finish_dismissal(ctx);
        }
    }

    /// Advances the animation clocks by `dt` seconds and finishes the pending
    /// transition once its animation has completed.
    pub fn update(&mut self, ctx: &mut AppContext, dt: f32) {
        let completions = ctx.animations.update(dt, &mut self.tree);

        for completion in completions {
            let Some(pending) = self.pending else {
                break;
            };
            if pending.handle != completion.handle {
                continue;
            }
            match pending.kind {
                TransitionKind::Present => self.finish_presentation(ctx),
                TransitionKind::Dismiss => self.finish_dismissal(ctx),
            }
        }
    }

    /// Below the visible area, one content height down.
    fn staged_frame(&self) -> Rect {
        self.bounds().offset(Vec2::new(0.0, self.frame.size.y))
    }

    fn finish_presentation(&mut self, ctx: &mut AppContext) {
        self.pending = None;
        if let Some(root) = self.root_controller.as_mut() {
            root.view_did_disappear();
        }
        self.modal_state = ModalState::Presented;
        ctx.input.resume();
        log::debug!("Window {}: modal presented", self.id);
    }

    fn finish_dismissal(&mut self, ctx: &mut AppContext) {
        self.pending = None;
        if let Some(mut modal) = self.modal_controller.take() {
            modal.view_did_disappear();
            modal.detach_from_parent(&mut self.tree);
        }
        self.modal_state = ModalState::Idle;
        ctx.input.resume();
        log::debug!("Window {}: modal dismissed", self.id);
    }
}
