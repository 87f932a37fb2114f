pub mod color;
pub mod firework;
pub mod particle;
pub mod scheduler;
pub mod state;

/// Uniform sample from [min, max).
pub fn random_range(rng: &mut fastrand::Rng, min: f32, max: f32) -> f32 {
    min + rng.f32() * (max - min)
}
