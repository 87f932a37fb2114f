use super::color::Rgb;
use super::random_range;

pub const GRAVITY: f32 = 0.03;
pub const FRICTION: f32 = 0.99;
pub const OPACITY_DECAY: f32 = 0.005;

const RADIUS_MIN: f32 = 1.5;
const RADIUS_MAX: f32 = 3.0;

/// A glowing point: either a shell's rising trail or one fragment of an
/// explosion. Opacity only ever goes down; once it crosses zero the particle
/// is dead and must leave the active set.
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub color: Rgb,
    pub opacity: f32,
    pub radius: f32,
}

impl Particle {
    pub fn new(x: f32, y: f32, vx: f32, vy: f32, color: Rgb, rng: &mut fastrand::Rng) -> Self {
        Self {
            x,
            y,
            vx,
            vy,
            color,
            opacity: 1.0,
            radius: random_range(rng, RADIUS_MIN, RADIUS_MAX),
        }
    }

    /// One tick of integration: damp, pull down, move, dim. Opacity is not
    /// clamped here; it may sit slightly below zero for the one tick before
    /// removal.
    pub fn step(&mut self) {
        self.vx *= FRICTION;
        self.vy *= FRICTION;
        self.vy += GRAVITY;
        self.x += self.vx;
        self.y += self.vy;
        self.opacity -= OPACITY_DECAY;
    }

    pub fn alive(&self) -> bool {
        self.opacity > 0.0
    }
}
