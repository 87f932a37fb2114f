//! One-shot confetti burst, independent of the particle engine. Nodes are
//! declarative: position, radius and opacity are pure functions of age, and
//! each node removes itself once its delay plus duration has elapsed.

use crate::sim::color::Rgb;
use crate::sim::random_range;
use std::f32::consts::TAU;

// Seconds from effect start to the burst.
const TRIGGER_DELAY: f32 = 1.2;

const NODE_COUNT: usize = 36;
const NODE_RADIUS: f32 = 14.0;

const DISTANCE_MIN: f32 = 60.0;
const DISTANCE_MAX: f32 = 180.0;
const DURATION_MIN: f32 = 0.9;
const DURATION_MAX: f32 = 1.8;
const DELAY_MAX: f32 = 0.5;

const PALETTE: [Rgb; 6] = [
    (255, 215, 90),  // gold
    (255, 105, 180), // pink
    (80, 220, 255),  // cyan
    (255, 255, 255), // white
    (190, 120, 255), // violet
    (255, 150, 60),  // orange
];

pub struct BurstNode {
    angle: f32,
    distance: f32,
    duration: f32,
    delay: f32,
    color: Rgb,
    age: f32,
}

fn ease_out(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

impl BurstNode {
    fn progress(&self) -> f32 {
        ((self.age - self.delay) / self.duration).clamp(0.0, 1.0)
    }

    pub fn visible(&self) -> bool {
        self.age >= self.delay
    }

    pub fn position(&self, center: (f32, f32)) -> (f32, f32) {
        let travel = self.distance * ease_out(self.progress());
        (
            center.0 + self.angle.cos() * travel,
            center.1 + self.angle.sin() * travel,
        )
    }

    pub fn radius(&self) -> f32 {
        NODE_RADIUS * (1.0 - self.progress())
    }

    pub fn opacity(&self) -> f32 {
        1.0 - self.progress()
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    fn expired(&self) -> bool {
        self.age >= self.delay + self.duration
    }
}

pub struct BurstOverlay {
    center: (f32, f32),
    countdown: f32,
    fired: bool,
    nodes: Vec<BurstNode>,
}

impl BurstOverlay {
    pub fn new(center: (f32, f32)) -> Self {
        Self {
            center,
            countdown: TRIGGER_DELAY,
            fired: false,
            nodes: Vec::new(),
        }
    }

    pub fn center(&self) -> (f32, f32) {
        self.center
    }

    /// Follows a resize only while the burst is still pending; once fired,
    /// nodes keep the center they launched from.
    pub fn recenter(&mut self, center: (f32, f32)) {
        if !self.fired {
            self.center = center;
        }
    }

    pub fn nodes(&self) -> &[BurstNode] {
        &self.nodes
    }

    pub fn step(&mut self, dt: f32, rng: &mut fastrand::Rng) {
        if !self.fired {
            self.countdown -= dt;
            if self.countdown > 0.0 {
                return;
            }
            self.fired = true;
            for _ in 0..NODE_COUNT {
                self.nodes.push(BurstNode {
                    angle: random_range(rng, 0.0, TAU),
                    distance: random_range(rng, DISTANCE_MIN, DISTANCE_MAX),
                    duration: random_range(rng, DURATION_MIN, DURATION_MAX),
                    delay: random_range(rng, 0.0, DELAY_MAX),
                    color: PALETTE[rng.usize(0..PALETTE.len())],
                    age: 0.0,
                });
            }
            return;
        }

        for node in &mut self.nodes {
            node.age += dt;
        }
        self.nodes.retain(|node| !node.expired());
    }
}
