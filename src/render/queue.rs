use crate::render::{ClearState, DrawCommand, Renderer};
use crate::scene::camera::Viewport;

/// One event observed by a [`CommandQueue`], in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOp {
    SetViewport(Viewport),
    Clear(ClearState),
    Submit(DrawCommand),
    Execute { flushed: usize },
}

/// In-memory [`Renderer`].
///
/// Queued commands move to [`executed`](Self::executed) on every
/// [`execute`](Renderer::execute), and every call is appended to an op log.
#[derive(Debug, Clone, Default)]
pub struct CommandQueue {
    viewport: Viewport,
    pending: Vec<DrawCommand>,
    executed: Vec<DrawCommand>,
    ops: Vec<RenderOp>,
}

impl CommandQueue {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn pending(&self) -> &[DrawCommand] {
        &self.pending
    }

    #[must_use]
    pub fn executed(&self) -> &[DrawCommand] {
        &self.executed
    }

    #[must_use]
    pub fn ops(&self) -> &[RenderOp] {
        &self.ops
    }

    /// Forgets executed commands and the op log. Call once per frame.
    pub fn begin_frame(&mut self) {
        self.executed.clear();
        self.ops.clear();
    }
}

impl Renderer for CommandQueue {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.ops.push(RenderOp::SetViewport(viewport));
    }

    fn clear(&mut self, state: ClearState) {
        self.ops.push(RenderOp::Clear(state));
    }

    fn submit(&mut self, command: DrawCommand) {
        self.pending.push(command);
        self.ops.push(RenderOp::Submit(command));
    }

    fn execute(&mut self) {
        let flushed = self.pending.len();
        self.executed.append(&mut self.pending);
        self.ops.push(RenderOp::Execute { flushed });
    }
}
