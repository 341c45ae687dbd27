//! Configuration for field physics and rendering.
//!
//! This module provides the tunables that control how the particle globe
//! moves ([`FieldConfig`]) and how it is painted ([`VisualConfig`]),
//! separate from the engine itself.
//!
//! # Usage
//!
//! ```ignore
//! Animator::new()
//!     .with_field(|f| {
//!         f.particle_count(800);
//!         f.globe_radius(250.0);
//!     })
//!     .with_visuals(|v| {
//!         v.ink(Rgba::new(32, 33, 36, 255));
//!         v.link_distance(90.0);
//!     })
//!     .run()?;
//! ```

use crate::canvas::Rgba;

/// Physics and topology tunables for a [`ParticleField`](crate::ParticleField).
///
/// The defaults reproduce the classic dark particle-globe look: 500 points
/// on a 300px shell with gentle drift and a 200px pointer repulsion halo.
#[derive(Debug, Clone)]
pub struct FieldConfig {
    /// Number of particles in the field.
    pub particle_count: usize,
    /// Base radius of the spherical shell, in pixels.
    pub globe_radius: f32,
    /// Maximum radial offset from the shell, in pixels. Rest positions land
    /// in `[globe_radius - radial_jitter, globe_radius + radial_jitter]`.
    pub radial_jitter: f32,
    /// Spring constant pulling each particle toward its rotated rest
    /// position (per frame).
    pub spring_factor: f32,
    /// Velocity damping factor applied every frame (< 1).
    pub friction: f32,
    /// Perspective focal length. Must exceed `globe_radius + radial_jitter`
    /// so `focal + z` stays positive for every particle.
    pub focal_length: f32,
    /// Radius of the pointer repulsion halo, in projected pixels.
    pub interaction_radius: f32,
    /// Strength multiplier for the pointer repulsion force.
    pub push_strength: f32,
    /// Base rotation increment per frame, applied to both axes.
    pub base_spin: f32,
    /// Per-frame decay factor for pointer-induced spin (< 1).
    pub spin_decay: f32,
    /// Scale applied to normalized pointer offset when deriving spin.
    pub pointer_sensitivity: f32,
    /// Smallest per-particle dot radius factor. Dot sizes are sampled
    /// uniformly from `[base_size_min, base_size_min + base_size_span)`.
    pub base_size_min: f32,
    /// Width of the dot radius band.
    pub base_size_span: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: 500,
            globe_radius: 300.0,
            radial_jitter: 70.0,
            spring_factor: 0.05,
            friction: 0.92,
            focal_length: 800.0,
            interaction_radius: 200.0,
            push_strength: 15.0,
            base_spin: 0.003,
            spin_decay: 0.95,
            pointer_sensitivity: 0.02,
            base_size_min: 1.0,
            base_size_span: 2.0,
        }
    }
}

impl FieldConfig {
    /// Create a field config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of particles.
    pub fn particle_count(&mut self, count: usize) -> &mut Self {
        self.particle_count = count;
        self
    }

    /// Set the shell radius in pixels.
    pub fn globe_radius(&mut self, radius: f32) -> &mut Self {
        self.globe_radius = radius;
        self
    }

    /// Set the radial jitter band in pixels.
    pub fn radial_jitter(&mut self, jitter: f32) -> &mut Self {
        self.radial_jitter = jitter;
        self
    }

    /// Set the spring constant.
    pub fn spring_factor(&mut self, spring: f32) -> &mut Self {
        self.spring_factor = spring;
        self
    }

    /// Set the per-frame velocity damping factor.
    pub fn friction(&mut self, friction: f32) -> &mut Self {
        self.friction = friction;
        self
    }

    /// Set the perspective focal length.
    pub fn focal_length(&mut self, focal: f32) -> &mut Self {
        self.focal_length = focal;
        self
    }

    /// Set the pointer repulsion radius in projected pixels.
    pub fn interaction_radius(&mut self, radius: f32) -> &mut Self {
        self.interaction_radius = radius;
        self
    }

    /// Set the pointer repulsion strength.
    pub fn push_strength(&mut self, strength: f32) -> &mut Self {
        self.push_strength = strength;
        self
    }

    /// Set the base per-frame rotation increment.
    pub fn base_spin(&mut self, spin: f32) -> &mut Self {
        self.base_spin = spin;
        self
    }

    /// Set the pointer-spin decay factor.
    pub fn spin_decay(&mut self, decay: f32) -> &mut Self {
        self.spin_decay = decay;
        self
    }

    /// Set the pointer-to-spin sensitivity.
    pub fn pointer_sensitivity(&mut self, sensitivity: f32) -> &mut Self {
        self.pointer_sensitivity = sensitivity;
        self
    }

    /// Depth of the deepest possible particle. `focal_length + min_z()` is
    /// the smallest perspective denominator the config can produce.
    #[inline]
    pub fn min_z(&self) -> f32 {
        -(self.globe_radius + self.radial_jitter)
    }
}

/// Paint settings for a [`ParticleField`](crate::ParticleField).
///
/// Colors carry their own alpha ceiling; per-particle opacity is derived
/// from depth at draw time and floored so nothing ever vanishes entirely.
#[derive(Debug, Clone)]
pub struct VisualConfig {
    /// Dot and line ink color. Alpha is ignored; depth drives opacity.
    pub ink: Rgba,
    /// Surface clear color.
    pub background: Rgba,
    /// Maximum 3D distance between particles that still draws a link.
    pub link_distance: f32,
    /// Global opacity multiplier for links.
    pub link_opacity: f32,
    /// Base link stroke width, scaled by the particle's projection scale.
    pub link_width: f32,
    /// Lowest opacity a dot can fade to.
    pub dot_alpha_floor: f32,
    /// Lowest opacity a link can fade to (before `link_opacity` scaling).
    pub link_alpha_floor: f32,
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            ink: Rgba::new(32, 33, 36, 255),
            background: Rgba::new(255, 255, 255, 255),
            link_distance: 70.0,
            link_opacity: 0.25,
            link_width: 0.5,
            dot_alpha_floor: 0.1,
            link_alpha_floor: 0.05,
        }
    }
}

impl VisualConfig {
    /// Create a visual config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the dot/line ink color.
    pub fn ink(&mut self, ink: Rgba) -> &mut Self {
        self.ink = ink;
        self
    }

    /// Set the clear color.
    pub fn background(&mut self, background: Rgba) -> &mut Self {
        self.background = background;
        self
    }

    /// Set the link distance threshold in 3D units.
    pub fn link_distance(&mut self, distance: f32) -> &mut Self {
        self.link_distance = distance;
        self
    }

    /// Set the global link opacity multiplier.
    pub fn link_opacity(&mut self, opacity: f32) -> &mut Self {
        self.link_opacity = opacity;
        self
    }

    /// Set the base link stroke width.
    pub fn link_width(&mut self, width: f32) -> &mut Self {
        self.link_width = width;
        self
    }
}
