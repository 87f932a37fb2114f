use super::{CELL_UNITS, Effect};
use crate::canvas::Canvas;
use crate::overlay::BurstOverlay;
use std::io::{BufWriter, Stdout, Write};

/// The confetti burst on its own, for previewing the flourish without the
/// rest of the show.
pub struct BurstEffect {
    overlay: BurstOverlay,
    canvas: Canvas,
    rng: fastrand::Rng,
}

impl Effect for BurstEffect {
    fn new(width: usize, height: usize, rng: fastrand::Rng) -> Self {
        let center = (
            width as f32 * CELL_UNITS / 2.0,
            height as f32 * CELL_UNITS / 2.0,
        );
        Self {
            overlay: BurstOverlay::new(center),
            canvas: Canvas::new(width, height, crate::get_bg_color()),
            rng,
        }
    }

    fn update(&mut self, dt: f32) {
        self.overlay.step(dt, &mut self.rng);
    }

    fn render(&mut self, stdout: &mut BufWriter<Stdout>) -> std::io::Result<()> {
        self.canvas.fade();

        let center = self.overlay.center();
        for node in self.overlay.nodes() {
            if !node.visible() {
                continue;
            }
            let (x, y) = node.position(center);
            self.canvas.fill_circle(
                x / CELL_UNITS,
                y / CELL_UNITS,
                node.radius() / CELL_UNITS,
                node.color(),
                node.opacity(),
            );
        }

        self.canvas.render(stdout)?;
        stdout.flush()
    }

    fn resize(&mut self, width: usize, height: usize) {
        self.canvas.resize(width, height);
        self.overlay.recenter((
            width as f32 * CELL_UNITS / 2.0,
            height as f32 * CELL_UNITS / 2.0,
        ));
    }
}
