//! Pointer tracking over raw window events.
//!
//! The field wants the pointer in surface-centered coordinates, and it
//! wants an off-surface sentinel until the pointer has actually appeared.
//! `PointerTracker` owns that conversion so the event loop can stay a thin
//! match over `WindowEvent`.

use glam::Vec2;
use winit::event::WindowEvent;

use crate::field::POINTER_SENTINEL;

/// Tracks the cursor in window pixels and converts to centered coordinates.
#[derive(Debug)]
pub struct PointerTracker {
    /// Absolute cursor position; `None` until the first move event.
    position: Option<Vec2>,
    window_size: (u32, u32),
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerTracker {
    pub fn new() -> Self {
        Self {
            position: None,
            window_size: (800, 600),
        }
    }

    // ========== Queries ==========

    /// Absolute cursor position in window pixels, if the pointer has ever
    /// been seen.
    pub fn position(&self) -> Option<Vec2> {
        self.position
    }

    /// Cursor position relative to the window center, or the engine's
    /// off-surface sentinel before any pointer contact.
    ///
    /// X grows rightward and Y grows downward, matching surface pixels.
    pub fn centered(&self) -> Vec2 {
        match self.position {
            Some(pos) => {
                let (w, h) = self.window_size;
                pos - Vec2::new(w as f32, h as f32) * 0.5
            }
            None => POINTER_SENTINEL,
        }
    }

    // ========== Internal Methods ==========

    /// Update window size for the centering calculation.
    pub(crate) fn set_window_size(&mut self, width: u32, height: u32) {
        self.window_size = (width, height);
    }

    /// Process a winit window event. Returns true when the cursor moved,
    /// so the caller knows to refresh the field's pointer state.
    pub(crate) fn handle_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.position = Some(Vec2::new(position.x as f32, position.y as f32));
                true
            }
            _ => false,
        }
    }
}
