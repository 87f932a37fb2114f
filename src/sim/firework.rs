use super::color::Rgb;
use super::particle::Particle;
use super::random_range;

// Upward launch velocity range, sim units per tick (up is negative y).
const ASCENT_MIN: f32 = -11.0;
const ASCENT_MAX: f32 = -7.0;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ShellSize {
    Large,
    Small,
}

impl ShellSize {
    /// Fragments released at detonation. Never zero; narrow viewports get a
    /// reduced count so the burst still resolves into distinct points.
    pub fn fragment_count(self, narrow: bool) -> usize {
        match self {
            ShellSize::Large => {
                if narrow {
                    500
                } else {
                    1500
                }
            }
            ShellSize::Small => {
                if narrow {
                    50
                } else {
                    150
                }
            }
        }
    }

    pub fn power_range(self) -> (f32, f32) {
        match self {
            ShellSize::Large => (5.0, 18.0),
            ShellSize::Small => (2.0, 6.0),
        }
    }
}

/// A shell climbing toward its detonation height. The trail particle exists
/// for its position and rendering only; the ascent itself is constant
/// velocity.
pub struct Firework {
    pub target_y: f32,
    pub color: Rgb,
    pub size: ShellSize,
    pub vy: f32,
    pub exploded: bool,
    pub trail: Particle,
}

impl Firework {
    pub fn launch(
        x: f32,
        y: f32,
        target_y: f32,
        color: Rgb,
        size: ShellSize,
        rng: &mut fastrand::Rng,
    ) -> Self {
        let vy = random_range(rng, ASCENT_MIN, ASCENT_MAX);
        let trail = Particle::new(x, y, 0.0, vy, color, rng);
        Self {
            target_y,
            color,
            size,
            vy,
            exploded: false,
            trail,
        }
    }

    /// Advances the ascent one tick. Returns true on the tick the trail
    /// reaches the target height (y <= target, overshoot included); a shell
    /// that has detonated is inert and never advances again.
    pub fn step(&mut self) -> bool {
        if self.exploded {
            return false;
        }
        self.trail.y += self.vy;
        if self.trail.y <= self.target_y {
            self.exploded = true;
            true
        } else {
            false
        }
    }

    /// Radial burst: the full circle split into N equal slices, one fragment
    /// per slice with an independently sampled power.
    pub fn explode(&self, narrow: bool, fragments: &mut Vec<Particle>, rng: &mut fastrand::Rng) {
        let count = self.size.fragment_count(narrow);
        let slice = std::f32::consts::TAU / count as f32;
        let (lo, hi) = self.size.power_range();
        for i in 0..count {
            let angle = slice * i as f32;
            let power = random_range(rng, lo, hi);
            fragments.push(Particle::new(
                self.trail.x,
                self.trail.y,
                angle.cos() * power,
                angle.sin() * power,
                self.color,
                rng,
            ));
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;

    fn rng() -> fastrand::Rng {
        fastrand::Rng::with_seed(42)
    }

    #[test]
    fn ascent_velocity_sampled_from_range() {
        let mut rng = rng();
        for _ in 0..50 {
            let shell = Firework::launch(50.0, 800.0, 300.0, (255, 255, 255), ShellSize::Small, &mut rng);
            assert!(shell.vy >= ASCENT_MIN && shell.vy < ASCENT_MAX);
            assert!(!shell.exploded);
        }
    }

    #[test]
    fn trail_y_strictly_decreases_until_detonation() {
        let mut rng = rng();
        let mut shell =
            Firework::launch(50.0, 800.0, 300.0, (255, 255, 255), ShellSize::Small, &mut rng);
        let mut prev = shell.trail.y;
        while !shell.step() {
            assert!(shell.trail.y < prev);
            prev = shell.trail.y;
        }
        assert!(shell.exploded);
        assert!(shell.trail.y <= shell.target_y);
    }

    #[test]
    fn detonates_on_exact_target_height() {
        let mut rng = rng();
        let mut shell =
            Firework::launch(0.0, 105.0, 100.0, (255, 255, 255), ShellSize::Small, &mut rng);
        shell.vy = -5.0;
        assert!(shell.step());
        assert_eq!(shell.trail.y, 100.0);
    }

    #[test]
    fn detonated_shell_is_inert() {
        let mut rng = rng();
        let mut shell =
            Firework::launch(0.0, 105.0, 100.0, (255, 255, 255), ShellSize::Small, &mut rng);
        shell.vy = -5.0;
        assert!(shell.step());
        let y = shell.trail.y;
        assert!(!shell.step());
        assert_eq!(shell.trail.y, y);
    }

    #[test]
    fn large_burst_is_1500_uniform_slices_within_power_range() {
        let mut rng = rng();
        let shell = Firework::launch(400.0, 800.0, 300.0, (200, 40, 40), ShellSize::Large, &mut rng);
        let mut fragments = Vec::new();
        shell.explode(false, &mut fragments, &mut rng);

        assert_eq!(fragments.len(), 1500);
        let slice = TAU / 1500.0;
        for (i, f) in fragments.iter().enumerate() {
            let speed = (f.vx * f.vx + f.vy * f.vy).sqrt();
            assert!(speed >= 5.0 && speed < 18.0, "speed {speed} out of range");
            let angle = slice * i as f32;
            assert!((f.vx - angle.cos() * speed).abs() < 1e-3);
            assert!((f.vy - angle.sin() * speed).abs() < 1e-3);
            assert_eq!(f.color, shell.color);
            assert_eq!((f.x, f.y), (shell.trail.x, shell.trail.y));
        }
    }

    #[test]
    fn small_burst_count_and_power() {
        let mut rng = rng();
        let shell = Firework::launch(400.0, 800.0, 300.0, (40, 200, 40), ShellSize::Small, &mut rng);
        let mut fragments = Vec::new();
        shell.explode(false, &mut fragments, &mut rng);

        assert_eq!(fragments.len(), 150);
        for f in &fragments {
            let speed = (f.vx * f.vx + f.vy * f.vy).sqrt();
            assert!(speed >= 2.0 && speed < 6.0);
        }
    }

    #[test]
    fn narrow_viewport_scales_counts_down() {
        assert_eq!(ShellSize::Large.fragment_count(true), 500);
        assert_eq!(ShellSize::Small.fragment_count(true), 50);
        assert!(ShellSize::Large.fragment_count(true) > 0);
        assert!(ShellSize::Small.fragment_count(true) > 0);
    }
}
