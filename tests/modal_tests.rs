//! Window Controller Tests
//!
//! Tests for:
//! - Root controller replacement ordering and z-order pinning
//! - Modal presentation (animated / immediate) and input gating
//! - Modal dismissal and the full present/dismiss cycle
//! - Bulk subview clear preserving the default camera

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;

use myth_window::scene::Viewport;
use myth_window::scene::tree::ViewTree;
use myth_window::{
    AppContext, BasicViewController, ControllerState, ModalState, View, ViewController, ViewKey,
    Window, WindowError, WindowSettings, WindowZOrder,
};

const EPSILON: f32 = 1e-3;
const SIZE: Vec2 = Vec2::new(800.0, 600.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Event {
    Attach(&'static str),
    Detach(&'static str),
    Appear(&'static str),
    Disappear(&'static str),
    Dropped(&'static str),
}

type EventLog = Rc<RefCell<Vec<Event>>>;

/// Controller that records every call the window makes on it.
struct Recording {
    name: &'static str,
    log: EventLog,
    inner: BasicViewController,
}

impl Recording {
    fn boxed(name: &'static str, log: &EventLog) -> Box<dyn ViewController> {
        Box::new(Self {
            name,
            log: log.clone(),
            inner: BasicViewController::new(View::new(name)),
        })
    }
}

impl ViewController for Recording {
    fn view(&self) -> Option<ViewKey> {
        self.inner.view()
    }

    fn attach_to_parent(&mut self, parent: &mut ViewTree) -> ViewKey {
        self.log.borrow_mut().push(Event::Attach(self.name));
        self.inner.attach_to_parent(parent)
    }

    fn detach_from_parent(&mut self, parent: &mut ViewTree) {
        self.log.borrow_mut().push(Event::Detach(self.name));
        self.inner.detach_from_parent(parent);
    }

    fn view_did_appear(&mut self) {
        self.log.borrow_mut().push(Event::Appear(self.name));
        self.inner.view_did_appear();
    }

    fn view_did_disappear(&mut self) {
        self.log.borrow_mut().push(Event::Disappear(self.name));
        self.inner.view_did_disappear();
    }

    fn state(&self) -> ControllerState {
        self.inner.state()
    }
}

impl Drop for Recording {
    fn drop(&mut self) {
        self.log.borrow_mut().push(Event::Dropped(self.name));
    }
}

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn setup() -> (AppContext, Window, EventLog) {
    init_logger();
    let ctx = AppContext::new(SIZE);
    let window = Window::new(&ctx, WindowSettings::default()).expect("valid window size");
    (ctx, window, Rc::new(RefCell::new(Vec::new())))
}

fn take(log: &EventLog) -> Vec<Event> {
    std::mem::take(&mut *log.borrow_mut())
}

fn modal_view(window: &Window) -> ViewKey {
    window
        .modal_view_controller()
        .and_then(|c| c.view())
        .expect("modal view attached")
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn window_rejects_empty_context_size() {
    let ctx = AppContext::new(Vec2::ZERO);
    let result = Window::new(&ctx, WindowSettings::default());
    assert!(matches!(
        result,
        Err(WindowError::InvalidWindowSize { width, height }) if width == 0.0 && height == 0.0
    ));
}

#[test]
fn window_rejects_non_finite_size() {
    let ctx = AppContext::new(Vec2::new(f32::NAN, 100.0));
    assert!(Window::new(&ctx, WindowSettings::default()).is_err());
}

#[test]
fn fresh_window_has_only_default_camera() {
    let (_ctx, mut window, _log) = setup();
    assert_eq!(window.subview_count(), 1);
    let default_camera = window.default_camera();
    assert_eq!(window.cameras(), &[default_camera]);
    assert_eq!(window.content_size(), SIZE);
    assert_eq!(window.modal_state(), ModalState::Idle);
}

// ============================================================================
// Root Controller
// ============================================================================

#[test]
fn replacing_root_releases_old_before_attaching_new() {
    let (_ctx, mut window, log) = setup();

    window.set_root_view_controller(Some(Recording::boxed("a", &log)));
    let a_view = window.root_view_controller().and_then(|c| c.view()).unwrap();
    take(&log);

    window.set_root_view_controller(Some(Recording::boxed("b", &log)));
    assert_eq!(
        take(&log),
        vec![Event::Detach("a"), Event::Dropped("a"), Event::Attach("b")]
    );

    assert!(window.view(a_view).is_none());
    let b_view = window.root_view_controller().and_then(|c| c.view()).unwrap();
    assert_eq!(window.view(b_view).unwrap().z_order(), WindowZOrder::BOTTOM);
}

#[test]
fn root_view_is_pinned_below_existing_content() {
    let (_ctx, mut window, log) = setup();
    let low = window.add_subview(View::new("low").with_z_order(-100));

    window.set_root_view_controller(Some(Recording::boxed("root", &log)));
    let root_view = window.root_view_controller().and_then(|c| c.view()).unwrap();

    let order = window.tree().draw_order();
    assert_eq!(order.as_slice(), &[root_view, low]);
}

#[test]
fn clearing_root_detaches_and_drops() {
    let (_ctx, mut window, log) = setup();
    window.set_root_view_controller(Some(Recording::boxed("root", &log)));
    take(&log);

    window.set_root_view_controller(None);
    assert_eq!(take(&log), vec![Event::Detach("root"), Event::Dropped("root")]);
    assert!(window.root_view_controller().is_none());
    assert_eq!(window.subview_count(), 1);
}

// ============================================================================
// Modal Presentation
// ============================================================================

#[test]
fn immediate_presentation_completes_inside_the_call() {
    let (mut ctx, mut window, log) = setup();
    window.set_root_view_controller(Some(Recording::boxed("root", &log)));
    take(&log);

    let rejected = window.present_modal_view_controller(&mut ctx, Recording::boxed("modal", &log), false);
    assert!(rejected.is_none());

    assert_eq!(
        take(&log),
        vec![Event::Attach("modal"), Event::Appear("modal"), Event::Disappear("root")]
    );
    // Closed once, reopened before returning
    assert_eq!(ctx.input.suppress_count(), 1);
    assert!(ctx.input.is_dispatching());
    assert_eq!(window.modal_state(), ModalState::Presented);
    assert!(!window.is_transitioning());

    let view = window.view(modal_view(&window)).unwrap();
    assert_eq!(view.z_order(), WindowZOrder::MODAL);
    assert_eq!(view.frame, window.bounds());
}

#[test]
fn animated_presentation_gates_input_until_completion() {
    let (mut ctx, mut window, log) = setup();
    window.set_root_view_controller(Some(Recording::boxed("root", &log)));
    take(&log);

    window.present_modal_view_controller(&mut ctx, Recording::boxed("modal", &log), true);

    // Appear fires at the start, root stays uncovered until completion
    assert_eq!(take(&log), vec![Event::Attach("modal"), Event::Appear("modal")]);
    assert!(!ctx.input.is_dispatching());
    assert_eq!(window.modal_state(), ModalState::Presenting);

    let key = modal_view(&window);
    assert!((window.view(key).unwrap().frame.origin.y - SIZE.y).abs() < EPSILON);

    // Still inside the delay
    window.update(&mut ctx, 0.05);
    assert!(!ctx.input.is_dispatching());
    assert!((window.view(key).unwrap().frame.origin.y - SIZE.y).abs() < EPSILON);

    // 20% through the slide
    window.update(&mut ctx, 0.1);
    let y = window.view(key).unwrap().frame.origin.y;
    assert!((y - SIZE.y * 0.8).abs() < EPSILON, "got {y}");
    assert!(take(&log).is_empty());

    window.update(&mut ctx, 0.3);
    assert_eq!(take(&log), vec![Event::Disappear("root")]);
    assert!(ctx.input.is_dispatching());
    assert_eq!(window.modal_state(), ModalState::Presented);
    assert_eq!(window.view(key).unwrap().frame, window.bounds());
}

#[test]
fn presenting_twice_hands_the_second_controller_back() {
    let (mut ctx, mut window, log) = setup();
    window.present_modal_view_controller(&mut ctx, Recording::boxed("first", &log), false);
    take(&log);
    let suppressed = ctx.input.suppress_count();

    let rejected = window.present_modal_view_controller(&mut ctx, Recording::boxed("second", &log), false);
    assert!(rejected.is_some());
    assert!(take(&log).is_empty());
    assert_eq!(ctx.input.suppress_count(), suppressed);

    drop(rejected);
    assert_eq!(take(&log), vec![Event::Dropped("second")]);
    assert_eq!(window.modal_state(), ModalState::Presented);
}

#[test]
fn presentation_without_root_still_reopens_input() {
    let (mut ctx, mut window, log) = setup();
    window.present_modal_view_controller(&mut ctx, Recording::boxed("modal", &log), true);
    window.update(&mut ctx, 1.0);

    assert!(ctx.input.is_dispatching());
    assert_eq!(window.modal_state(), ModalState::Presented);
}

#[test]
fn cancelled_presentation_still_reopens_input() {
    let (mut ctx, mut window, log) = setup();
    window.present_modal_view_controller(&mut ctx, Recording::boxed("modal", &log), true);
    assert_eq!(ctx.animations.remove_animations("present_modal"), 1);

    window.update(&mut ctx, 0.0);
    assert!(ctx.input.is_dispatching());
    assert_eq!(window.modal_state(), ModalState::Presented);
}

// ============================================================================
// Modal Dismissal
// ============================================================================

#[test]
fn dismiss_without_modal_is_a_noop() {
    let (mut ctx, mut window, log) = setup();
    window.set_root_view_controller(Some(Recording::boxed("root", &log)));
    take(&log);

    window.dismiss_modal_view_controller(&mut ctx, true);
    window.dismiss_modal_view_controller(&mut ctx, false);

    assert!(take(&log).is_empty());
    assert_eq!(ctx.input.suppress_count(), 0);
    assert!(ctx.input.is_dispatching());
    assert!(ctx.animations.is_empty());
}

#[test]
fn immediate_dismissal_releases_modal() {
    let (mut ctx, mut window, log) = setup();
    window.set_root_view_controller(Some(Recording::boxed("root", &log)));
    window.present_modal_view_controller(&mut ctx, Recording::boxed("modal", &log), false);
    let key = modal_view(&window);
    take(&log);

    window.dismiss_modal_view_controller(&mut ctx, false);
    assert_eq!(
        take(&log),
        vec![
            Event::Appear("root"),
            Event::Disappear("modal"),
            Event::Detach("modal"),
            Event::Dropped("modal"),
        ]
    );
    assert!(window.modal_view_controller().is_none());
    assert!(window.view(key).is_none());
    assert!(ctx.input.is_dispatching());
    assert_eq!(window.modal_state(), ModalState::Idle);
}

#[test]
fn animated_dismissal_slides_out_before_release() {
    let (mut ctx, mut window, log) = setup();
    window.set_root_view_controller(Some(Recording::boxed("root", &log)));
    window.present_modal_view_controller(&mut ctx, Recording::boxed("modal", &log), false);
    let key = modal_view(&window);
    take(&log);

    window.dismiss_modal_view_controller(&mut ctx, true);
    assert_eq!(take(&log), vec![Event::Appear("root")]);
    assert!(!ctx.input.is_dispatching());
    assert_eq!(window.modal_state(), ModalState::Dismissing);
    assert!(window.view(key).is_some());

    window.update(&mut ctx, 0.1 + 0.125);
    let y = window.view(key).unwrap().frame.origin.y;
    assert!((y - SIZE.y * 0.5).abs() < EPSILON, "got {y}");

    window.update(&mut ctx, 0.2);
    assert_eq!(
        take(&log),
        vec![Event::Disappear("modal"), Event::Detach("modal"), Event::Dropped("modal")]
    );
    assert!(ctx.input.is_dispatching());
    assert_eq!(window.modal_state(), ModalState::Idle);
}

#[test]
fn present_dismiss_cycle_restores_idle_state() {
    let (mut ctx, mut window, log) = setup();
    window.set_root_view_controller(Some(Recording::boxed("root", &log)));
    let subviews = window.subview_count();

    for _ in 0..2 {
        window.present_modal_view_controller(&mut ctx, Recording::boxed("modal", &log), true);
        window.update(&mut ctx, 1.0);
        window.dismiss_modal_view_controller(&mut ctx, true);
        window.update(&mut ctx, 1.0);

        assert!(ctx.input.is_dispatching());
        assert!(window.modal_view_controller().is_none());
        assert_eq!(window.modal_state(), ModalState::Idle);
        assert_eq!(window.subview_count(), subviews);
        assert_eq!(
            window.root_view_controller().map(|c| c.state()),
            Some(ControllerState::Appeared)
        );
        assert!(ctx.animations.is_empty());
    }
}

#[test]
fn dismissal_during_presentation_supersedes_it() {
    let (mut ctx, mut window, log) = setup();
    window.set_root_view_controller(Some(Recording::boxed("root", &log)));
    window.present_modal_view_controller(&mut ctx, Recording::boxed("modal", &log), true);
    window.update(&mut ctx, 0.05);
    assert!(window.is_transitioning());

    window.dismiss_modal_view_controller(&mut ctx, true);
    assert!(!ctx.input.is_dispatching());
    assert_eq!(window.modal_state(), ModalState::Dismissing);

    // The superseded presentation reports its cancellation without finishing anything
    window.update(&mut ctx, 0.0);
    assert_eq!(window.modal_state(), ModalState::Dismissing);
    assert!(window.modal_view_controller().is_some());

    window.update(&mut ctx, 1.0);
    assert_eq!(window.modal_state(), ModalState::Idle);
    assert!(window.modal_view_controller().is_none());
    assert!(ctx.input.is_dispatching());
    assert!(ctx.animations.is_empty());
}

// ============================================================================
// Bulk Clear
// ============================================================================

#[test]
fn bulk_clear_keeps_only_default_camera() {
    let (mut ctx, mut window, log) = setup();
    window.set_root_view_controller(Some(Recording::boxed("root", &log)));
    let root_view = window.root_view_controller().and_then(|c| c.view()).unwrap();
    window.add_subview(View::new("extra"));
    window.add_camera(myth_window::Camera::new_perspective(60.0, 1.0, 0.1, 100.0));

    window.remove_all_subviews();

    let default_camera = window.default_camera();
    assert_eq!(window.cameras(), &[default_camera]);
    assert_eq!(window.camera(default_camera).unwrap().name, "DefaultCamera");
    assert_eq!(window.subview_count(), 1);

    // The controller survives, its view does not
    assert!(window.root_view_controller().is_some());
    assert!(window.view(root_view).is_none());

    // The stale root view does not break a later replacement
    take(&log);
    window.set_root_view_controller(Some(Recording::boxed("next", &log)));
    assert_eq!(
        take(&log),
        vec![Event::Detach("root"), Event::Dropped("root"), Event::Attach("next")]
    );
    assert_eq!(window.subview_count(), 2);
    assert!(ctx.input.is_dispatching());
    window.update(&mut ctx, 0.016);
}

#[test]
fn bulk_clear_keeps_default_camera_identity() {
    let (_ctx, mut window, _log) = setup();
    let before = window.default_camera();
    window.camera_mut(before).unwrap().viewport = Some(Viewport::from_size(Vec2::new(320.0, 240.0)));

    window.remove_all_subviews();

    assert_eq!(window.default_camera(), before);
    assert_eq!(window.cameras(), &[before]);
    let camera = window.camera(before).expect("key captured before the clear still resolves");
    assert_eq!(camera.viewport, Some(Viewport::from_size(Vec2::new(320.0, 240.0))));
}

#[test]
fn root_view_can_be_reattached_after_bulk_clear() {
    let (_ctx, mut window, log) = setup();
    window.set_root_view_controller(Some(Recording::boxed("root", &log)));
    window.add_subview(View::new("low").with_z_order(-10));
    window.remove_all_subviews();
    let low = window.add_subview(View::new("low").with_z_order(-10));
    take(&log);

    let key = window.reattach_root_view().expect("root controller present");
    assert_eq!(take(&log), vec![Event::Attach("root"), Event::Appear("root")]);
    assert_eq!(window.root_view_controller().and_then(|c| c.view()), Some(key));
    assert_eq!(window.view(key).unwrap().z_order(), WindowZOrder::BOTTOM);
    assert_eq!(window.tree().draw_order().as_slice(), &[key, low]);

    // Already attached: same key, no second appear
    assert_eq!(window.reattach_root_view(), Some(key));
    assert_eq!(take(&log), vec![Event::Attach("root")]);
}

#[test]
fn reattach_without_root_is_a_noop() {
    let (_ctx, mut window, _log) = setup();
    assert!(window.reattach_root_view().is_none());
    assert_eq!(window.subview_count(), 1);
}

#[test]
fn default_camera_cannot_be_removed() {
    let (_ctx, mut window, _log) = setup();
    let default_camera = window.default_camera();
    assert!(window.remove_camera(default_camera).is_none());
    assert_eq!(window.cameras(), &[default_camera]);
}
