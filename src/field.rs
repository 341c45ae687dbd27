//! The particle field engine.
//!
//! [`ParticleField`] owns everything that was per-page state in the classic
//! canvas globe: the particle collection, the accumulated rotation angles,
//! the pointer-driven spin perturbation, the pointer position, and the
//! surface dimensions. One call to [`step`](ParticleField::step) advances a
//! frame of simulation; one call to [`draw`](ParticleField::draw) paints it
//! onto any [`Canvas`].
//!
//! # Frame order
//!
//! Each frame advances the global rotation (base drift plus pointer spin),
//! decays the spin, updates every particle against the fresh angles, and
//! then paints dots followed by proximity links. Links read the positions
//! written by the same frame's updates.

use glam::{Vec2, Vec3};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::canvas::Canvas;
use crate::config::{FieldConfig, VisualConfig};
use crate::particle::Particle;
use crate::spatial::SpatialGrid;

/// Pointer position used until the pointer first appears. Far enough off
/// the surface that the repulsion halo can never reach a particle.
pub const POINTER_SENTINEL: Vec2 = Vec2::new(-9999.0, -9999.0);

/// The animation engine context.
pub struct ParticleField {
    config: FieldConfig,
    visuals: VisualConfig,
    particles: Vec<Particle>,
    /// Accumulated rotation angles: `x` pitch, `y` yaw.
    rotation: Vec2,
    /// Pointer-driven angular velocity perturbation, decaying each frame.
    spin: Vec2,
    /// Last pointer position in surface-centered coordinates.
    pointer: Vec2,
    width: f32,
    height: f32,
    grid: SpatialGrid,
    /// Scratch copy of dynamic positions for the grid rebuild.
    positions: Vec<Vec3>,
    rng: SmallRng,
}

impl ParticleField {
    /// Create a field with freshly sampled particles and an entropy seed.
    pub fn new(config: FieldConfig, visuals: VisualConfig, width: u32, height: u32) -> Self {
        Self::from_rng(config, visuals, width, height, SmallRng::from_entropy())
    }

    /// Create a field with a fixed seed. Sampling (and therefore every
    /// subsequent frame) is reproducible.
    pub fn seeded(
        config: FieldConfig,
        visuals: VisualConfig,
        width: u32,
        height: u32,
        seed: u64,
    ) -> Self {
        Self::from_rng(config, visuals, width, height, SmallRng::seed_from_u64(seed))
    }

    fn from_rng(
        config: FieldConfig,
        visuals: VisualConfig,
        width: u32,
        height: u32,
        rng: SmallRng,
    ) -> Self {
        // A cell never narrower than the link distance keeps the grid's
        // one-cell neighborhood sufficient.
        let grid = SpatialGrid::new(visuals.link_distance.max(1.0));
        let mut field = Self {
            particles: Vec::with_capacity(config.particle_count),
            rotation: Vec2::ZERO,
            spin: Vec2::ZERO,
            pointer: POINTER_SENTINEL,
            width: width as f32,
            height: height as f32,
            grid,
            positions: Vec::with_capacity(config.particle_count),
            config,
            visuals,
            rng,
        };
        field.reseed();
        field
    }

    /// Discard all particles and sample a fresh set. Rotation, spin and
    /// pointer state carry over.
    pub fn reseed(&mut self) {
        self.particles.clear();
        for _ in 0..self.config.particle_count {
            self.particles.push(Particle::sample(&mut self.rng, &self.config));
        }
        log::debug!("field reseeded with {} particles", self.particles.len());
    }

    /// Adopt new surface dimensions and reinitialize the particle set.
    /// Prior dynamic state is discarded, not interpolated.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width as f32;
        self.height = height as f32;
        self.reseed();
    }

    /// Record a pointer position (surface-centered coordinates) and derive
    /// the spin perturbation from it. Horizontal offset drives yaw,
    /// vertical offset drives pitch with the sign flipped so the globe
    /// tilts the way the pointer moves.
    pub fn pointer_moved(&mut self, centered: Vec2) {
        self.pointer = centered;
        self.spin.y = (centered.x / self.width) * self.config.pointer_sensitivity;
        self.spin.x = -(centered.y / self.height) * self.config.pointer_sensitivity;
    }

    /// Advance one frame of simulation: rotation drift plus spin, spin
    /// decay, then every particle's spring/repulsion update against the
    /// new angles.
    pub fn step(&mut self) {
        self.rotation.y += self.config.base_spin + self.spin.y;
        self.rotation.x += self.config.base_spin + self.spin.x;
        self.spin *= self.config.spin_decay;

        let center = Vec2::new(self.width, self.height) * 0.5;
        for particle in &mut self.particles {
            particle.update(self.rotation, self.pointer, center, &self.config);
        }
    }

    /// Paint the current frame: clear, dots, then proximity links.
    pub fn draw<C: Canvas>(&mut self, canvas: &mut C) {
        canvas.clear(self.visuals.background);

        for particle in &self.particles {
            let alpha = particle.dot_alpha(self.config.globe_radius, self.visuals.dot_alpha_floor);
            canvas.fill_circle(
                particle.screen,
                particle.base_size * particle.scale,
                self.visuals.ink.with_alpha(alpha),
            );
        }

        if self.visuals.link_distance <= 0.0 {
            return;
        }

        self.positions.clear();
        self.positions.extend(self.particles.iter().map(|p| p.position));
        self.grid.rebuild(&self.positions);

        // Styling keys off the lower-indexed endpoint, and pairs arrive in
        // ascending order, so overdraw matches a plain nested scan.
        for (i, j) in self.grid.collect_pairs(&self.positions, self.visuals.link_distance) {
            let a = &self.particles[i];
            let b = &self.particles[j];
            let alpha = a.link_alpha(self.config.globe_radius, self.visuals.link_alpha_floor)
                * self.visuals.link_opacity;
            canvas.stroke_line(
                a.screen,
                b.screen,
                self.visuals.link_width * a.scale,
                self.visuals.ink.with_alpha(alpha),
            );
        }
    }

    /// One whole frame: [`step`](Self::step) then [`draw`](Self::draw).
    pub fn frame<C: Canvas>(&mut self, canvas: &mut C) {
        self.step();
        self.draw(canvas);
    }

    // ========== Accessors ==========

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub fn rotation(&self) -> Vec2 {
        self.rotation
    }

    #[inline]
    pub fn spin(&self) -> Vec2 {
        self.spin
    }

    #[inline]
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    #[inline]
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    #[inline]
    pub fn visuals(&self) -> &VisualConfig {
        &self.visuals
    }

    #[inline]
    pub fn surface_size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{PixelCanvas, Rgba};

    fn small_field(count: usize) -> ParticleField {
        let mut config = FieldConfig::default();
        config.particle_count(count);
        ParticleField::seeded(config, VisualConfig::default(), 800, 600, 11)
    }

    #[test]
    fn new_field_has_configured_count() {
        let field = small_field(64);
        assert_eq!(field.particles().len(), 64);
    }

    #[test]
    fn step_advances_rotation_by_base_spin() {
        let mut field = small_field(4);
        field.step();
        let rotation = field.rotation();
        assert!((rotation.x - 0.003).abs() < 1e-6);
        assert!((rotation.y - 0.003).abs() < 1e-6);
    }

    #[test]
    fn pointer_offsets_map_to_spin_axes() {
        let mut field = small_field(4);

        // Pointer at the right edge: pure yaw.
        field.pointer_moved(Vec2::new(400.0, 0.0));
        assert!((field.spin().y - 0.01).abs() < 1e-6);
        assert!(field.spin().x.abs() < 1e-6);

        // Pointer at the bottom edge: pure pitch, sign flipped.
        field.pointer_moved(Vec2::new(0.0, 300.0));
        assert!((field.spin().x + 0.01).abs() < 1e-6);
        assert!(field.spin().y.abs() < 1e-6);
    }

    #[test]
    fn spin_decays_to_zero_without_pointer_input() {
        let mut field = small_field(4);
        field.pointer_moved(Vec2::new(400.0, 300.0));
        let mut last = field.spin().length();
        assert!(last > 0.0);

        for _ in 0..400 {
            field.step();
            let magnitude = field.spin().length();
            assert!(magnitude < last);
            last = magnitude;
        }
        assert!(last < 1e-9);
    }

    #[test]
    fn resize_keeps_count_and_resamples() {
        let mut field = small_field(32);
        let before: Vec<_> = field.particles().iter().map(|p| p.rest).collect();

        // Dirty the dynamic state first.
        for _ in 0..10 {
            field.step();
        }
        field.resize(1920, 1080);

        assert_eq!(field.particles().len(), 32);
        let moved = field
            .particles()
            .iter()
            .zip(&before)
            .any(|(p, old)| (p.rest - *old).length() > 1.0);
        assert!(moved); // fresh sampling, not a copy
        for p in field.particles() {
            assert_eq!(p.position, p.rest);
            assert_eq!(p.velocity, Vec3::ZERO);
        }
        assert!((field.surface_size().x - 1920.0).abs() < f32::EPSILON);
    }

    #[test]
    fn frame_paints_something() {
        let mut field = small_field(100);
        let mut canvas = PixelCanvas::new(800, 600);
        field.frame(&mut canvas);

        let background = Rgba::new(255, 255, 255, 255).to_u32();
        let inked = canvas.data().iter().filter(|&&p| p != background).count();
        assert!(inked > 0);
    }

    #[test]
    fn seeded_fields_agree_frame_by_frame() {
        let mut a = small_field(50);
        let mut b = small_field(50);
        for _ in 0..5 {
            a.step();
            b.step();
        }
        for (pa, pb) in a.particles().iter().zip(b.particles()) {
            assert_eq!(pa.position, pb.position);
        }
    }

    #[test]
    fn pointer_defaults_to_off_surface_sentinel() {
        let field = small_field(4);
        assert_eq!(field.pointer(), POINTER_SENTINEL);
    }
}
