//! # Globefield - Particle Globe Animator
//!
//! A software-rendered particle globe: points scattered over a jittered
//! spherical shell, spun slowly, nudged by the pointer, and linked by
//! hairline edges when they drift close in 3D.
//!
//! The crate splits into a pure simulation core ([`ParticleField`]) that
//! draws into anything implementing [`Canvas`], and a windowed front end
//! ([`Animator`]) that owns the event loop and pixel surface.
//!
//! ## Quick Start
//!
//! ```ignore
//! use globefield::prelude::*;
//!
//! fn main() -> Result<(), AnimatorError> {
//!     env_logger::init();
//!
//!     Animator::new()
//!         .with_title("globe")
//!         .with_size(1280, 720)
//!         .with_field(|f| {
//!             f.particle_count(800).globe_radius(260.0);
//!         })
//!         .with_visuals(|v| {
//!             v.ink(Rgba::new(16, 46, 90, 255));
//!         })
//!         .run()
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Particles
//!
//! Each [`Particle`] owns a fixed rest position on the shell. Every frame
//! the rest position is re-rotated by the field's current yaw and pitch,
//! and a spring pulls the particle toward that moving target. Pointer
//! repulsion and friction act on the velocity before integration, so the
//! globe deforms under the cursor and relaxes back on its own.
//!
//! ### The Field
//!
//! [`ParticleField`] advances rotation, steps every particle, and paints
//! dots and links. It never touches a window, which makes headless use
//! straightforward:
//!
//! ```ignore
//! let mut field = ParticleField::seeded(FieldConfig::default(), VisualConfig::default(), 1280, 720, 7);
//! let mut canvas = PixelCanvas::new(1280, 720);
//! for _ in 0..300 {
//!     field.frame(&mut canvas);
//! }
//! // canvas.as_bytes() is tightly packed RGBA8, ready for an encoder.
//! ```
//!
//! ### Rendering
//!
//! Drawing goes through the [`Canvas`] trait. [`PixelCanvas`] is the
//! bundled implementation: a plain RGBA8 buffer with alpha-blended
//! circles and lines, which [`Animator`] copies to the window surface
//! each redraw.
//!
//! ## Linking
//!
//! The link pass connects particles closer than
//! [`link_distance`](VisualConfig::link_distance) in 3D. Candidate pairs
//! come from a uniform [`SpatialGrid`] rather than an all-pairs scan, so
//! the cost tracks the number of nearby pairs instead of the square of
//! the particle count.
//!
//! ## Feature Overview
//!
//! | Concern | Types |
//! |---------|-------|
//! | Windowed playback | [`Animator`] |
//! | Simulation | [`ParticleField`], [`Particle`] |
//! | Tuning | [`FieldConfig`], [`VisualConfig`] |
//! | Software rendering | [`Canvas`], [`PixelCanvas`], [`Rgba`] |
//! | Neighbor search | [`SpatialGrid`] |
//! | Input and timing | [`PointerTracker`], [`FrameClock`] |

mod animator;
pub mod canvas;
pub mod config;
mod error;
pub mod field;
pub mod input;
pub mod particle;
pub mod spatial;
pub mod time;

pub use animator::Animator;
pub use canvas::{Canvas, PixelCanvas, Rgba};
pub use config::{FieldConfig, VisualConfig};
pub use error::AnimatorError;
pub use field::{ParticleField, POINTER_SENTINEL};
pub use glam::{Vec2, Vec3};
pub use input::PointerTracker;
pub use particle::Particle;
pub use spatial::{brute_force_pairs, SpatialGrid};
pub use time::FrameClock;

/// Convenient re-exports for common usage.
///
/// # Usage
///
/// ```ignore
/// use globefield::prelude::*;
/// ```
///
/// This imports:
/// - [`Animator`] - the windowed animation builder
/// - [`ParticleField`] and [`Particle`] - the simulation core
/// - [`FieldConfig`] and [`VisualConfig`] - tunables
/// - [`Canvas`], [`PixelCanvas`], [`Rgba`] - software rendering
/// - [`Vec2`], [`Vec3`] - glam vector types
pub mod prelude {
    pub use crate::animator::Animator;
    pub use crate::canvas::{Canvas, PixelCanvas, Rgba};
    pub use crate::config::{FieldConfig, VisualConfig};
    pub use crate::error::AnimatorError;
    pub use crate::field::{ParticleField, POINTER_SENTINEL};
    pub use crate::input::PointerTracker;
    pub use crate::particle::Particle;
    pub use crate::time::FrameClock;
    pub use crate::{Vec2, Vec3};
}
