//! View controllers
//!
//! A controller owns one root view and reacts to lifecycle hooks fired by
//! the window it is presented in. The window never touches the controller's
//! view directly except for z-order and frame; attaching and detaching go
//! through the controller so it can keep its own state in sync.

use crate::scene::ViewKey;
use crate::scene::tree::ViewTree;
use crate::scene::view::View;

/// Lifecycle of a controller relative to its window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControllerState {
    #[default]
    Detached,
    /// Attached, appear hook not fired yet.
    Appearing,
    Appeared,
    /// Covered or leaving, still attached.
    Disappearing,
}

pub trait ViewController {
    /// Key of the root view while attached.
    fn view(&self) -> Option<ViewKey>;

    /// Inserts the root view into `parent` and returns its key.
    fn attach_to_parent(&mut self, parent: &mut ViewTree) -> ViewKey;

    /// Removes the root view from `parent`. A view already gone is not an error.
    fn detach_from_parent(&mut self, parent: &mut ViewTree);

    fn view_did_appear(&mut self);

    fn view_did_disappear(&mut self);

    fn state(&self) -> ControllerState;
}

type Hook = Box<dyn FnMut()>;

/// Default [`ViewController`] backed by a single [`View`].
///
/// While detached the view is held by value; attaching moves it into the
/// window, detaching moves it back out with whatever frame it ended with.
pub struct BasicViewController {
    template: View,
    view: Option<ViewKey>,
    state: ControllerState,
    on_appear: Option<Hook>,
    on_disappear: Option<Hook>,
}

impl BasicViewController {
    #[must_use]
    pub fn new(view: View) -> Self {
        Self {
            template: view,
            view: None,
            state: ControllerState::Detached,
            on_appear: None,
            on_disappear: None,
        }
    }

    #[must_use]
    pub fn on_appear(mut self, hook: impl FnMut() + 'static) -> Self {
        self.on_appear = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub fn on_disappear(mut self, hook: impl FnMut() + 'static) -> Self {
        self.on_disappear = Some(Box::new(hook));
        self
    }

    /// The detached view, or the last state it was detached with.
    #[must_use]
    pub fn template(&self) -> &View {
        &self.template
    }
}

impl ViewController for BasicViewController {
    fn view(&self) -> Option<ViewKey> {
        self.view
    }

    fn attach_to_parent(&mut self, parent: &mut ViewTree) -> ViewKey {
        if let Some(key) = self.view
            && parent.contains_view(key)
        {
            return key;
        }
        let key = parent.add_view(self.template.clone());
        self.view = Some(key);
        self.state = ControllerState::Appearing;
        key
    }

    fn detach_from_parent(&mut self, parent: &mut ViewTree) {
        if let Some(key) = self.view.take()
            && let Some(view) = parent.remove_view(key)
        {
            self.template = view;
        }
        self.state = ControllerState::Detached;
    }

    fn view_did_appear(&mut self) {
        self.state = ControllerState::Appeared;
        if let Some(hook) = self.on_appear.as_mut() {
            hook();
        }
    }

    fn view_did_disappear(&mut self) {
        self.state = ControllerState::Disappearing;
        if let Some(hook) = self.on_disappear.as_mut() {
            hook();
        }
    }

    fn state(&self) -> ControllerState {
        self.state
    }
}
