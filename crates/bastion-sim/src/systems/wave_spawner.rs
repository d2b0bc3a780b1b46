//! Spawn scheduler — releases enemies onto the path at timed intervals.
//!
//! Finite mode drains a queued wave and flips `spawning` off when the
//! queue empties. Continuous mode refills the queue round-robin from a
//! pattern and never terminates. Unknown enemy keys are skipped with a
//! warning, without resetting the spawn timer, so the next entry goes
//! out immediately.

use std::collections::VecDeque;

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use bastion_core::catalog::{bounty_for, EntityCatalog};
use bastion_core::components::{
    Bounty, Defense, Enemy, Health, Mobility, PathFollower, Raider, StatusEffects,
};
use bastion_core::constants::{CONTINUOUS_SPAWN_INTERVAL, SPAWN_LATERAL_SPREAD};
use bastion_core::enums::AlertLevel;
use bastion_core::events::{Alert, GameEvent};
use bastion_core::types::{Position, Velocity};
use bastion_core::waves::{SpawnEntry, WaveDefinition};

/// Scheduler mode.
#[derive(Debug, Clone)]
enum SpawnMode {
    Finite,
    Continuous { pattern: Vec<String>, next: usize },
}

/// Timed release of queued spawn entries.
#[derive(Debug)]
pub struct SpawnScheduler {
    queue: VecDeque<SpawnEntry>,
    interval: f64,
    timer: f64,
    mode: SpawnMode,
    spawning: bool,
}

impl Default for SpawnScheduler {
    fn default() -> Self {
        Self {
            queue: VecDeque::new(),
            interval: bastion_core::constants::DEFAULT_SPAWN_INTERVAL,
            timer: 0.0,
            mode: SpawnMode::Finite,
            spawning: false,
        }
    }
}

impl SpawnScheduler {
    /// Queue a finite wave, replacing anything still pending.
    pub fn start_wave(&mut self, wave: WaveDefinition) {
        self.queue = wave.entries.into();
        self.interval = wave.interval.max(0.05);
        // First spawn goes out on the next run.
        self.timer = self.interval;
        self.mode = SpawnMode::Finite;
        self.spawning = !self.queue.is_empty();
    }

    /// Switch to endless spawning over the pattern. A non-positive
    /// interval falls back to the continuous default.
    pub fn start_continuous(&mut self, interval: f64, pattern: Vec<String>) {
        self.queue.clear();
        self.interval = if interval > 0.0 {
            interval.max(0.05)
        } else {
            CONTINUOUS_SPAWN_INTERVAL
        };
        self.timer = self.interval;
        self.spawning = !pattern.is_empty();
        self.mode = SpawnMode::Continuous { pattern, next: 0 };
    }

    /// Whether entries remain to be released.
    pub fn is_spawning(&self) -> bool {
        self.spawning
    }

    /// Whether the scheduler is in continuous mode.
    pub fn is_continuous(&self) -> bool {
        matches!(self.mode, SpawnMode::Continuous { .. })
    }

    /// Stop without draining (used when a new mission starts).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Release due spawn entries into the world.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    scheduler: &mut SpawnScheduler,
    catalog: &EntityCatalog,
    path: &[Position],
    rng: &mut ChaCha8Rng,
    events: &mut Vec<GameEvent>,
    alerts: &mut Vec<Alert>,
    tick: u64,
    dt: f64,
) {
    if !scheduler.spawning || path.is_empty() {
        return;
    }

    scheduler.timer += dt;

    // Bounds the loop when a continuous pattern is entirely unknown keys
    // (skips never consume timer).
    let mut budget = 64;

    while scheduler.timer >= scheduler.interval && budget > 0 {
        budget -= 1;
        // Continuous mode refills from the pattern as the queue drains.
        if scheduler.queue.is_empty() {
            match &mut scheduler.mode {
                SpawnMode::Continuous { pattern, next } => {
                    let kind = pattern[*next % pattern.len()].clone();
                    *next = (*next + 1) % pattern.len();
                    scheduler.queue.push_back(SpawnEntry::basic(&kind));
                }
                SpawnMode::Finite => {
                    scheduler.spawning = false;
                    break;
                }
            }
        }

        let entry = match scheduler.queue.pop_front() {
            Some(entry) => entry,
            None => break,
        };

        let spec = match catalog.enemy_by_key(&entry.kind) {
            Some(spec) => *spec,
            None => {
                alerts.push(Alert::new(
                    AlertLevel::Warning,
                    format!("Unknown enemy type '{}', skipped", entry.kind),
                    tick,
                ));
                // Timer untouched: the next entry releases immediately.
                if scheduler.queue.is_empty() && !scheduler.is_continuous() {
                    scheduler.spawning = false;
                }
                continue;
            }
        };

        let health = spec.health * entry.health.multiplier(spec.health);
        let speed = entry.speed.unwrap_or(spec.speed);

        // Spread stacked spawns across the road width.
        let offset = rng.gen_range(-SPAWN_LATERAL_SPREAD..=SPAWN_LATERAL_SPREAD);
        let spawn = offset_spawn_point(path, offset);

        world.spawn((
            Enemy { kind: spec.kind },
            spawn,
            Velocity::default(),
            Health::new(health),
            Mobility::new(speed),
            Defense {
                armour: spec.armour,
                magic_resist: spec.magic_resist,
            },
            PathFollower {
                waypoint: 1,
                reached_end: false,
            },
            Raider {
                attack_damage: spec.attack_damage,
            },
            Bounty {
                gold: bounty_for(health),
            },
            StatusEffects::default(),
        ));

        events.push(GameEvent::EnemySpawned { kind: spec.kind });
        scheduler.timer -= scheduler.interval;

        if scheduler.queue.is_empty() && !scheduler.is_continuous() {
            scheduler.spawning = false;
        }
    }
}

/// Spawn point shifted perpendicular to the first path segment.
fn offset_spawn_point(path: &[Position], offset: f64) -> Position {
    let start = path[0];
    if path.len() < 2 {
        return start;
    }
    let dir = (path[1].to_vec2() - start.to_vec2()).normalize_or_zero();
    let perp = glam::DVec2::new(-dir.y, dir.x);
    Position::from_vec2(start.to_vec2() + perp * offset)
}
