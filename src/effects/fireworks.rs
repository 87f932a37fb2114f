use super::{CELL_UNITS, Effect};
use crate::canvas::Canvas;
use crate::overlay::BurstOverlay;
use crate::sim::color::Rgb;
use crate::sim::state::{Simulation, StepOutcome, Viewport};
use std::io::{BufWriter, Stdout, Write};

const BANNER_FADE: f32 = 0.05;

/// Message revealed when the opening shell detonates. Fades in over the
/// show; redrawn on top of the canvas every frame.
struct Banner {
    text: String,
    opacity: f32,
    revealed: bool,
}

impl Banner {
    fn new(text: String) -> Self {
        Self {
            text,
            opacity: 0.0,
            revealed: false,
        }
    }

    fn reveal(&mut self) {
        self.revealed = true;
    }

    fn step(&mut self) {
        if self.revealed && self.opacity < 1.0 {
            self.opacity = (self.opacity + BANNER_FADE).min(1.0);
        }
    }

    fn render(
        &self,
        stdout: &mut BufWriter<Stdout>,
        cols: usize,
        rows: usize,
        bg: Rgb,
    ) -> std::io::Result<()> {
        if !self.revealed || self.text.is_empty() {
            return Ok(());
        }
        let text_cols = self.text.chars().count();
        if text_cols > cols || rows == 0 {
            return Ok(());
        }

        let row = rows / 2;
        let col = (cols - text_cols) / 2;
        let fg = (
            (bg.0 as f32 + (255.0 - bg.0 as f32) * self.opacity) as u8,
            (bg.1 as f32 + (255.0 - bg.1 as f32) * self.opacity) as u8,
            (bg.2 as f32 + (255.0 - bg.2 as f32) * self.opacity) as u8,
        );
        write!(
            stdout,
            "\x1b[{};{}H\x1b[1m\x1b[38;2;{};{};{}m\x1b[48;2;{};{};{}m{}\x1b[0m",
            row + 1,
            col + 1,
            fg.0,
            fg.1,
            fg.2,
            bg.0,
            bg.1,
            bg.2,
            self.text
        )
    }
}

/// The full show: the particle engine on the trail canvas, the one-shot
/// confetti burst composited above it, and the banner. The two visual
/// subsystems share the output surface and nothing else; the burst even
/// keeps its own forked random stream.
pub struct FireworksEffect {
    sim: Simulation,
    overlay: BurstOverlay,
    canvas: Canvas,
    banner: Banner,
    rng: fastrand::Rng,
    overlay_rng: fastrand::Rng,
}

impl Effect for FireworksEffect {
    fn new(width: usize, height: usize, mut rng: fastrand::Rng) -> Self {
        let overlay_rng = rng.fork();
        let view = Viewport::new(width as f32 * CELL_UNITS, height as f32 * CELL_UNITS);
        let sim = Simulation::new(view, &mut rng);
        let overlay = BurstOverlay::new((view.width / 2.0, view.height / 2.0));
        Self {
            sim,
            overlay,
            canvas: Canvas::new(width, height, crate::get_bg_color()),
            banner: Banner::new(crate::get_message().to_string()),
            rng,
            overlay_rng,
        }
    }

    fn update(&mut self, dt: f32) {
        let StepOutcome { large_detonated } = self.sim.step(&mut self.rng);
        if large_detonated {
            self.banner.reveal();
        }
        self.banner.step();
        self.overlay.step(dt, &mut self.overlay_rng);
    }

    fn render(&mut self, stdout: &mut BufWriter<Stdout>) -> std::io::Result<()> {
        self.canvas.fade();

        for shell in &self.sim.shells {
            let trail = &shell.trail;
            self.canvas.fill_circle(
                trail.x / CELL_UNITS,
                trail.y / CELL_UNITS,
                trail.radius / CELL_UNITS,
                trail.color,
                trail.opacity,
            );
        }

        for fragment in &self.sim.fragments {
            if fragment.alive() {
                self.canvas.fill_circle(
                    fragment.x / CELL_UNITS,
                    fragment.y / CELL_UNITS,
                    fragment.radius / CELL_UNITS,
                    fragment.color,
                    fragment.opacity,
                );
            }
        }

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
        self.banner.render(
            stdout,
            self.canvas.width(),
            self.canvas.height() / 2,
            crate::get_bg_color(),
        )?;
        stdout.flush()
    }

    fn resize(&mut self, width: usize, height: usize) {
        self.canvas.resize(width, height);
        let view = Viewport::new(width as f32 * CELL_UNITS, height as f32 * CELL_UNITS);
        self.sim.resize(view);
        self.overlay
            .recenter((view.width / 2.0, view.height / 2.0));
    }
}
