use glam::Mat4;

use crate::errors::{Result, WindowError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatrixStackType {
    ModelView,
    Projection,
    Texture,
}

/// A matrix stack with a permanent base entry.
///
/// `push` duplicates the top, `load` replaces it, `pop` discards it.
/// The base entry can never be popped.
#[derive(Debug, Clone)]
pub struct MatrixStack {
    kind: MatrixStackType,
    stack: Vec<Mat4>,
    push_count: u64,
}

impl MatrixStack {
    #[must_use]
    pub fn new(kind: MatrixStackType) -> Self {
        Self {
            kind,
            stack: vec![Mat4::IDENTITY],
            push_count: 0,
        }
    }

    #[must_use]
    pub fn kind(&self) -> MatrixStackType {
        self.kind
    }

    pub fn push(&mut self) {
        let top = self.top();
        self.stack.push(top);
        self.push_count += 1;
    }

    pub fn load(&mut self, matrix: Mat4) {
        if let Some(top) = self.stack.last_mut() {
            *top = matrix;
        }
    }

    pub fn pop(&mut self) -> Result<Mat4> {
        if self.stack.len() <= 1 {
            return Err(WindowError::MatrixStackUnderflow(self.kind));
        }
        Ok(self.stack.pop().unwrap_or(Mat4::IDENTITY))
    }

    #[must_use]
    pub fn top(&self) -> Mat4 {
        self.stack.last().copied().unwrap_or(Mat4::IDENTITY)
    }

    /// Number of pushed entries above the base.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }

    /// Total pushes since creation. Diagnostic only.
    #[must_use]
    pub fn push_count(&self) -> u64 {
        self.push_count
    }
}

/// The three global stacks of the application context.
#[derive(Debug, Clone)]
pub struct MatrixStacks {
    model_view: MatrixStack,
    projection: MatrixStack,
    texture: MatrixStack,
}

impl Default for MatrixStacks {
    fn default() -> Self {
        Self::new()
    }
}

impl MatrixStacks {
    #[must_use]
    pub fn new() -> Self {
        Self {
            model_view: MatrixStack::new(MatrixStackType::ModelView),
            projection: MatrixStack::new(MatrixStackType::Projection),
            texture: MatrixStack::new(MatrixStackType::Texture),
        }
    }

    #[must_use]
    pub fn get(&self, kind: MatrixStackType) -> &MatrixStack {
        match kind {
            MatrixStackType::ModelView => &self.model_view,
            MatrixStackType::Projection => &self.projection,
            MatrixStackType::Texture => &self.texture,
        }
    }

    pub fn get_mut(&mut self, kind: MatrixStackType) -> &mut MatrixStack {
        match kind {
            MatrixStackType::ModelView => &mut self.model_view,
            MatrixStackType::Projection => &mut self.projection,
            MatrixStackType::Texture => &mut self.texture,
        }
    }

    pub fn push(&mut self, kind: MatrixStackType) {
        self.get_mut(kind).push();
    }

    pub fn load(&mut self, kind: MatrixStackType, matrix: Mat4) {
        self.get_mut(kind).load(matrix);
    }

    pub fn pop(&mut self, kind: MatrixStackType) -> Result<Mat4> {
        self.get_mut(kind).pop()
    }

    #[must_use]
    pub fn top(&self, kind: MatrixStackType) -> Mat4 {
        self.get(kind).top()
    }
}
