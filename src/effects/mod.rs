use std::io::{BufWriter, Stdout};

pub mod burst;
pub mod fireworks;

// Simulation units per canvas cell. The virtual viewport is finer than the
// cell grid so launch velocities and burst powers read the same at any
// terminal size.
pub(crate) const CELL_UNITS: f32 = 10.0;

pub trait Effect {
    fn new(width: usize, height: usize, rng: fastrand::Rng) -> Self
    where
        Self: Sized;
    fn update(&mut self, dt: f32);
    fn render(&mut self, stdout: &mut BufWriter<Stdout>) -> std::io::Result<()>;
    fn resize(&mut self, width: usize, height: usize);
}
