//! A single simulated point on the globe.
//!
//! Every particle keeps an immutable rest position sampled on the shell at
//! creation. Each frame the current global rotation is applied to that rest
//! position from scratch, and spring physics pulls the dynamic position
//! toward the rotated target. Rotation never accumulates into the particle.

use glam::{Vec2, Vec3};
use rand::Rng;
use std::f32::consts::TAU;

use crate::config::FieldConfig;

/// One point of the field.
#[derive(Debug, Clone)]
pub struct Particle {
    /// Shell position sampled at creation. Never mutated.
    pub rest: Vec3,
    /// Current simulated position.
    pub position: Vec3,
    /// Current velocity.
    pub velocity: Vec3,
    /// Per-particle dot radius before perspective scaling.
    pub base_size: f32,
    /// Projected surface position, refreshed every update.
    pub screen: Vec2,
    /// Perspective factor `focal / (focal + z)`, refreshed every update.
    pub scale: f32,
}

impl Particle {
    /// Sample a fresh particle on the configured shell.
    ///
    /// Azimuth is uniform in `[0, 2π)`; the polar angle comes from the
    /// arccosine of a uniform variate so the poles are not overdense.
    pub fn sample<R: Rng>(rng: &mut R, config: &FieldConfig) -> Self {
        let theta = rng.gen_range(0.0..TAU);
        let phi = rng.gen_range(-1.0f32..1.0).acos();
        let r = config.globe_radius
            + (rng.gen::<f32>() * 2.0 - 1.0) * config.radial_jitter;

        let rest = Vec3::new(
            r * phi.sin() * theta.cos(),
            r * phi.sin() * theta.sin(),
            r * phi.cos(),
        );

        Self {
            rest,
            position: rest,
            velocity: Vec3::ZERO,
            base_size: config.base_size_min + rng.gen::<f32>() * config.base_size_span,
            screen: Vec2::ZERO,
            scale: 1.0,
        }
    }

    /// Rest position rotated by the current global angles: yaw about Y by
    /// `rotation.y`, then pitch about X by `rotation.x`, in that order.
    #[inline]
    pub fn rotated_target(&self, rotation: Vec2) -> Vec3 {
        let (sin_y, cos_y) = rotation.y.sin_cos();
        let tx = self.rest.x * cos_y - self.rest.z * sin_y;
        let tz = self.rest.z * cos_y + self.rest.x * sin_y;

        let (sin_x, cos_x) = rotation.x.sin_cos();
        Vec3::new(
            tx,
            self.rest.y * cos_x - tz * sin_x,
            tz * cos_x + self.rest.y * sin_x,
        )
    }

    /// Advance one frame.
    ///
    /// `pointer` is in surface-centered coordinates (or the off-surface
    /// sentinel); `center` is half the surface dimensions, used only for
    /// the final screen projection.
    pub fn update(&mut self, rotation: Vec2, pointer: Vec2, center: Vec2, config: &FieldConfig) {
        // Spring toward the freshly rotated rest position.
        let target = self.rotated_target(rotation);
        self.velocity += (target - self.position) * config.spring_factor;

        // Project the pre-integration position for the pointer test. Both
        // sides live in surface-centered coordinates here.
        let ratio = config.focal_length / (config.focal_length + self.position.z);
        let projected = self.position.truncate() * ratio;

        let offset = projected - pointer;
        let dist = offset.length();
        if dist < config.interaction_radius {
            let force = (config.interaction_radius - dist) / config.interaction_radius;
            let angle = offset.y.atan2(offset.x);
            let push = force * config.push_strength;
            self.velocity.x += angle.cos() * push;
            self.velocity.y += angle.sin() * push;
        }

        self.velocity *= config.friction;
        self.position += self.velocity;

        // Final projection from the post-integration position.
        self.scale = config.focal_length / (config.focal_length + self.position.z);
        self.screen = center + self.position.truncate() * self.scale;
    }

    /// Depth-derived dot opacity, floored so the far side stays visible.
    #[inline]
    pub fn dot_alpha(&self, globe_radius: f32, floor: f32) -> f32 {
        ((self.position.z + globe_radius * 1.5) / (globe_radius * 3.0)).max(floor)
    }

    /// Depth-derived link opacity before the global link multiplier.
    #[inline]
    pub fn link_alpha(&self, globe_radius: f32, floor: f32) -> f32 {
        ((self.position.z + globe_radius) / (globe_radius * 2.0)).max(floor)
    }
}
