//! Error types for the animator.
//!
//! Everything that can fail does so while bringing the window and pixel
//! surface up or tearing them down; the simulation itself is total over
//! its inputs.

use std::fmt;

/// Errors that can occur while setting up or running the windowed animator.
#[derive(Debug)]
pub enum AnimatorError {
    /// Failed to create the event loop.
    EventLoop(winit::error::EventLoopError),
    /// Failed to create the window.
    Window(winit::error::OsError),
    /// Failed to create or present the pixel surface.
    Surface(pixels::Error),
    /// Failed to resize the pixel surface or its buffer.
    Resize(pixels::TextureError),
}

impl fmt::Display for AnimatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnimatorError::EventLoop(e) => write!(f, "Failed to create event loop: {}", e),
            AnimatorError::Window(e) => write!(f, "Failed to create window: {}", e),
            AnimatorError::Surface(e) => write!(f, "Pixel surface error: {}", e),
            AnimatorError::Resize(e) => write!(f, "Failed to resize pixel surface: {}", e),
        }
    }
}

impl std::error::Error for AnimatorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnimatorError::EventLoop(e) => Some(e),
            AnimatorError::Window(e) => Some(e),
            AnimatorError::Surface(e) => Some(e),
            AnimatorError::Resize(e) => Some(e),
        }
    }
}

impl From<winit::error::EventLoopError> for AnimatorError {
    fn from(e: winit::error::EventLoopError) -> Self {
        AnimatorError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for AnimatorError {
    fn from(e: winit::error::OsError) -> Self {
        AnimatorError::Window(e)
    }
}

impl From<pixels::Error> for AnimatorError {
    fn from(e: pixels::Error) -> Self {
        AnimatorError::Surface(e)
    }
}

impl From<pixels::TextureError> for AnimatorError {
    fn from(e: pixels::TextureError) -> Self {
        AnimatorError::Resize(e)
    }
}
