/// Process-wide switch deciding whether input events reach the view tree.
///
/// Writers pair every [`suppress`](Self::suppress) with a
/// [`resume`](Self::resume). Both calls are idempotent.
#[derive(Debug, Clone)]
pub struct InputGate {
    dispatching: bool,
    suppress_count: u64,
}

impl Default for InputGate {
    fn default() -> Self {
        Self::new()
    }
}

impl InputGate {
    #[must_use]
    pub fn new() -> Self {
        Self {
            dispatching: true,
            suppress_count: 0,
        }
    }

    pub fn suppress(&mut self) {
        if self.dispatching {
            log::trace!("Input dispatch suppressed");
        }
        self.dispatching = false;
        self.suppress_count += 1;
    }

    pub fn resume(&mut self) {
        if !self.dispatching {
            log::trace!("Input dispatch resumed");
        }
        self.dispatching = true;
    }

    #[must_use]
    pub fn is_dispatching(&self) -> bool {
        self.dispatching
    }

    /// Number of `suppress` calls so far. Diagnostic only.
    #[must_use]
    pub fn suppress_count(&self) -> u64 {
        self.suppress_count
    }

    /// Hands `event` to `handler` when dispatching, drops it otherwise.
    pub fn dispatch<E, R>(&self, event: E, handler: impl FnOnce(E) -> R) -> Option<R> {
        if self.dispatching {
            Some(handler(event))
        } else {
            None
        }
    }
}
