use super::color::hsl_to_rgb;
use super::firework::{Firework, ShellSize};
use super::random_range;
use super::state::Viewport;

pub const TICK_RATE: u32 = 60;

const fn ticks(ms: u32) -> u32 {
    ms * TICK_RATE / 1000
}

const VOLLEY_PERIOD_MS: u32 = 500;
const VOLLEY_MIN: usize = 2;
const VOLLEY_MAX: usize = 5;
const SUB_DELAY_MAX_MS: u32 = 700;

/// Fixed-period repeating timer counted in simulation ticks. Created idle;
/// `start` arms it, `cancel` disarms it for good.
pub struct RepeatingTimer {
    period: u32,
    elapsed: u32,
    active: bool,
}

impl RepeatingTimer {
    pub fn new(period: u32) -> Self {
        Self {
            period,
            elapsed: 0,
            active: false,
        }
    }

    pub fn start(&mut self) {
        self.active = true;
    }

    #[allow(dead_code)]
    pub fn cancel(&mut self) {
        self.active = false;
        self.elapsed = 0;
    }

    #[allow(dead_code)]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Counts one tick; returns true each time a full period elapses.
    pub fn tick(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.elapsed += 1;
        if self.elapsed >= self.period {
            self.elapsed = 0;
            true
        } else {
            false
        }
    }
}

/// The rolling volley launcher armed by the opening shell's detonation.
/// Every period it books a handful of small launches, each behind its own
/// sub-delay; position, target and color are sampled only when the sub-delay
/// expires, so a resize in between lands in the new bounds.
pub struct LaunchScheduler {
    timer: RepeatingTimer,
    pending: Vec<u32>,
}

impl LaunchScheduler {
    pub fn new() -> Self {
        Self {
            timer: RepeatingTimer::new(ticks(VOLLEY_PERIOD_MS)),
            pending: Vec::new(),
        }
    }

    pub fn start(&mut self) {
        self.timer.start();
    }

    /// Stops future volleys and drops launches already booked. The shipped
    /// show never calls this; it exists so an owner can tear the schedule
    /// down.
    #[allow(dead_code)]
    pub fn cancel(&mut self) {
        self.timer.cancel();
        self.pending.clear();
    }

    #[allow(dead_code)]
    pub fn is_active(&self) -> bool {
        self.timer.is_active()
    }

    pub fn tick(&mut self, view: Viewport, rng: &mut fastrand::Rng) -> Vec<Firework> {
        if self.timer.tick() {
            let volley = rng.usize(VOLLEY_MIN..=VOLLEY_MAX);
            for _ in 0..volley {
                self.pending.push(rng.u32(0..=ticks(SUB_DELAY_MAX_MS)));
            }
        }

        let mut due = 0;
        self.pending.retain_mut(|delay| {
            if *delay == 0 {
                due += 1;
                false
            } else {
                *delay -= 1;
                true
            }
        });

        let mut launched = Vec::with_capacity(due);
        for _ in 0..due {
            launched.push(Self::launch_small(view, rng));
        }
        launched
    }

    fn launch_small(view: Viewport, rng: &mut fastrand::Rng) -> Firework {
        let x = random_range(rng, view.width * 0.1, view.width * 0.9);
        let target_y = random_range(rng, view.height * 0.1, view.height * 0.6);
        let color = hsl_to_rgb(random_range(rng, 0.0, 360.0), 1.0, 0.5);
        Firework::launch(x, view.height, target_y, color, ShellSize::Small, rng)
    }
}
