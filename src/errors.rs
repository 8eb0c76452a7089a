//! Error Types
//!
//! This module defines the error types used by the window layer.
//!
//! # Overview
//!
//! Most window operations follow a "precondition not met means no-op" policy
//! and never fail. The few operations that can fail return [`Result<T>`],
//! an alias for `std::result::Result<T, WindowError>`:
//! - window construction against an unusable application context
//! - unbalanced matrix stack manipulation
//!
//! ```rust,ignore
//! use myth_window::{AppContext, Window, WindowSettings};
//!
//! let ctx = AppContext::new(glam::Vec2::new(1280.0, 720.0));
//! let window = Window::new(&ctx, WindowSettings::default())?;
//! ```

use thiserror::Error;

use crate::render::MatrixStackType;

/// The main error type for the window layer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WindowError {
    // ========================================================================
    // Construction Errors
    // ========================================================================
    /// The application context supplied a size the window cannot be laid out against.
    #[error("Invalid window size: {width}x{height}")]
    InvalidWindowSize {
        /// Logical width reported by the application context
        width: f32,
        /// Logical height reported by the application context
        height: f32,
    },

    // ========================================================================
    // Render State Errors
    // ========================================================================
    /// A matrix stack was popped below its base entry.
    #[error("Matrix stack underflow: {0:?}")]
    MatrixStackUnderflow(MatrixStackType),
}

/// Alias for `Result<T, WindowError>`.
pub type Result<T> = std::result::Result<T, WindowError>;
