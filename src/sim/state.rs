use tracing::debug;

use super::color::hsl_to_rgb;
use super::firework::{Firework, ShellSize};
use super::particle::Particle;
use super::random_range;
use super::scheduler::LaunchScheduler;

// Below this virtual width the fragment counts are scaled down.
const NARROW_WIDTH: f32 = 600.0;

#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_narrow(self) -> bool {
        self.width < NARROW_WIDTH
    }
}

/// What a tick reported back to the host effect.
pub struct StepOutcome {
    pub large_detonated: bool,
}

/// The whole particle engine: the two active-entity collections, the
/// viewport they launch into, and the volley scheduler. Entities are only
/// ever touched from `step`, one tick at a time.
pub struct Simulation {
    pub view: Viewport,
    pub shells: Vec<Firework>,
    pub fragments: Vec<Particle>,
    pub scheduler: LaunchScheduler,
}

impl Simulation {
    /// Opens the show with a single large shell, horizontally centered,
    /// detonating a third of the way down from the top.
    pub fn new(view: Viewport, rng: &mut fastrand::Rng) -> Self {
        let color = hsl_to_rgb(random_range(rng, 0.0, 360.0), 1.0, 0.7);
        let opener = Firework::launch(
            view.width / 2.0,
            view.height,
            view.height / 3.0,
            color,
            ShellSize::Large,
            rng,
        );
        Self {
            view,
            shells: vec![opener],
            fragments: Vec::new(),
            scheduler: LaunchScheduler::new(),
        }
    }

    /// Updates the launch sampling bounds. Entities already in flight keep
    /// their positions and targets.
    pub fn resize(&mut self, view: Viewport) {
        self.view = view;
    }

    /// One tick: volley launches first, then shells, then fragments. Shells
    /// that reach their target detonate and leave the set in the same pass;
    /// fragments spawned by those detonations are not advanced until the
    /// next tick. Dead fragments leave in the same pass as well.
    pub fn step(&mut self, rng: &mut fastrand::Rng) -> StepOutcome {
        let launched = self.scheduler.tick(self.view, rng);
        self.shells.extend(launched);

        let existing = self.fragments.len();
        let narrow = self.view.is_narrow();

        let mut large_detonated = false;
        let fragments = &mut self.fragments;
        self.shells.retain_mut(|shell| {
            if shell.step() {
                shell.explode(narrow, fragments, rng);
                if shell.size == ShellSize::Large {
                    large_detonated = true;
                }
                false
            } else {
                true
            }
        });

        if large_detonated {
            self.scheduler.start();
            debug!(fragments = self.fragments.len(), "opening shell detonated");
        }

        for fragment in &mut self.fragments[..existing] {
            fragment.step();
        }
        self.fragments.retain(Particle::alive);

        StepOutcome { large_detonated }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::particle::OPACITY_DECAY;

    const VIEW: Viewport = Viewport {
        width: 1000.0,
        height: 800.0,
    };

    #[test]
    fn show_opens_with_one_centered_large_shell() {
        let mut rng = fastrand::Rng::with_seed(2026);
        let sim = Simulation::new(VIEW, &mut rng);

        assert_eq!(sim.shells.len(), 1);
        assert!(sim.fragments.is_empty());
        assert!(!sim.scheduler.is_active());

        let opener = &sim.shells[0];
        assert_eq!(opener.size, ShellSize::Large);
        assert_eq!(opener.trail.x, VIEW.width / 2.0);
        assert_eq!(opener.trail.y, VIEW.height);
        assert_eq!(opener.target_y, VIEW.height / 3.0);
    }

    #[test]
    fn seeded_show_detonates_arms_scheduler_and_keeps_volleying() {
        let mut rng = fastrand::Rng::with_seed(2026);
        let mut sim = Simulation::new(VIEW, &mut rng);

        let mut detonation_tick = None;
        for tick in 0..200 {
            if sim.step(&mut rng).large_detonated {
                detonation_tick = Some(tick);
                break;
            }
        }
        assert!(detonation_tick.is_some(), "opening shell never detonated");

        // The detonation tick: shell gone, full large burst in, timer armed.
        assert!(sim.shells.is_empty());
        assert_eq!(sim.fragments.len(), 1500);
        assert!(sim.scheduler.is_active());

        // A later volley firing must put small shells up.
        let mut saw_small = false;
        for _ in 0..200 {
            sim.step(&mut rng);
            if sim.shells.iter().any(|s| s.size == ShellSize::Small) {
                saw_small = true;
                break;
            }
        }
        assert!(saw_small, "volley scheduler produced no small shells");
    }

    #[test]
    fn same_tick_append_and_remove_is_exact() {
        let mut rng = fastrand::Rng::with_seed(11);
        let mut sim = Simulation::new(VIEW, &mut rng);

        // Pin the opener one step above its target so the next tick detonates.
        sim.shells[0].vy = -5.0;
        sim.shells[0].trail.y = sim.shells[0].target_y + 5.0;

        // One fragment about to die, one healthy survivor.
        let mut dying = Particle::new(1.0, 1.0, 0.0, 0.0, (9, 9, 9), &mut rng);
        dying.opacity = OPACITY_DECAY / 2.0;
        let survivor = Particle::new(5.0, 5.0, 1.0, 0.0, (9, 9, 9), &mut rng);
        let survivor_x = survivor.x;
        let survivor_vx = survivor.vx;
        sim.fragments.push(dying);
        sim.fragments.push(survivor);

        let outcome = sim.step(&mut rng);
        assert!(outcome.large_detonated);

        // Dying fragment removed, 1500 newcomers appended, survivor kept.
        assert_eq!(sim.fragments.len(), 1 + 1500);

        // The survivor advanced exactly once.
        let survivor = &sim.fragments[0];
        assert!((survivor.x - (survivor_x + survivor_vx * 0.99)).abs() < 1e-5);

        // Newcomers were appended, not advanced: still at full opacity.
        for fragment in &sim.fragments[1..] {
            assert_eq!(fragment.opacity, 1.0);
        }
    }

    #[test]
    fn resize_moves_launch_bounds_not_entities() {
        let mut rng = fastrand::Rng::with_seed(8);
        let mut sim = Simulation::new(VIEW, &mut rng);
        let opener_x = sim.shells[0].trail.x;
        let opener_target = sim.shells[0].target_y;

        let grown = Viewport::new(2000.0, 1600.0);
        sim.resize(grown);

        assert_eq!(sim.shells[0].trail.x, opener_x);
        assert_eq!(sim.shells[0].target_y, opener_target);

        // Volleys sampled after the resize land in the new bands.
        sim.scheduler.start();
        let mut checked = 0;
        for _ in 0..600 {
            sim.step(&mut rng);
            for shell in sim.shells.iter().filter(|s| s.size == ShellSize::Small) {
                assert!(shell.trail.x >= grown.width * 0.1);
                assert!(shell.trail.x < grown.width * 0.9);
                assert!(shell.target_y >= grown.height * 0.1);
                assert!(shell.target_y < grown.height * 0.6);
                checked += 1;
            }
        }
        assert!(checked > 0);
    }

    #[test]
    fn narrow_viewport_detonation_uses_reduced_count() {
        let narrow = Viewport::new(400.0, 800.0);
        let mut rng = fastrand::Rng::with_seed(13);
        let mut sim = Simulation::new(narrow, &mut rng);

        for _ in 0..200 {
            if sim.step(&mut rng).large_detonated {
                break;
            }
        }
        assert_eq!(sim.fragments.len(), 500);
    }
}
