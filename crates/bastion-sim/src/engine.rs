//! Simulation engine — the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player
//! commands, runs all systems with a single scaled time delta, and
//! produces `GameStateSnapshot`s. Completely headless, enabling
//! deterministic testing.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use bastion_core::catalog::EntityCatalog;
use bastion_core::commands::PlayerCommand;
use bastion_core::components::{
    ArrowMods, Building, ElementSlot, ElementalBonuses, MineState, Tower, Weapon,
};
use bastion_core::constants::{
    BUILDING_FOOTPRINT, KILL_GOLD_BASE, MAX_TIME_SCALE, MINE_COLLECT_PERIOD, SELL_REFUND_FRACTION,
    TOWER_FOOTPRINT, WAVE_BREAK_SECS,
};
use bastion_core::enums::{AlertLevel, BuildingKind, Element, GamePhase, TowerKind};
use bastion_core::events::{Alert, GameEvent};
use bastion_core::state::{GameStateSnapshot, TickReport};
use bastion_core::types::{GridPos, Position, SimTime};

use crate::grid::OccupancyGrid;
use crate::progression::UnlockState;
use crate::scenario::LevelPlan;
use crate::systems;
use crate::systems::snapshot::SnapshotContext;
use crate::systems::wave_spawner::SpawnScheduler;

/// Configuration for starting a new simulation.
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Initial time scale (1.0 = normal).
    pub time_scale: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
        }
    }
}

/// An action scheduled to fire after a countdown of scaled time.
#[derive(Debug)]
struct PendingAction {
    remaining: f64,
    action: DeferredAction,
}

#[derive(Debug)]
enum DeferredAction {
    StartNextWave,
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    time_scale: f64,
    rng: ChaCha8Rng,
    catalog: EntityCatalog,
    level: LevelPlan,
    gold: u64,
    castle_health: f64,
    wave: u32,
    wave_active: bool,
    scheduler: SpawnScheduler,
    unlocks: UnlockState,
    grid: OccupancyGrid,
    pending: Vec<PendingAction>,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<GameEvent>,
    alerts: Vec<Alert>,
    report: TickReport,
}

impl SimulationEngine {
    /// Create a new simulation engine for the given level.
    pub fn new(config: SimConfig, level: LevelPlan) -> Self {
        let gold = level.starting_gold;
        let castle_health = level.castle_health;
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            time_scale: config.time_scale.clamp(0.1, MAX_TIME_SCALE),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            catalog: EntityCatalog::standard(),
            level,
            gold,
            castle_health,
            wave: 0,
            wave_active: false,
            scheduler: SpawnScheduler::default(),
            unlocks: UnlockState::new(),
            grid: OccupancyGrid::new(),
            pending: Vec::new(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            alerts: Vec::new(),
            report: TickReport::default(),
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick of `dt` wall seconds and
    /// return the resulting snapshot. Time scale is applied here, once;
    /// every system below receives the already-scaled delta.
    pub fn tick(&mut self, dt: f64) -> GameStateSnapshot {
        self.process_commands();
        self.report = TickReport::default();

        if self.phase == GamePhase::Active {
            let scaled = dt * self.time_scale;
            self.run_pending(scaled);
            self.run_systems(scaled);
            self.check_wave_completion();
            self.time.advance(scaled);
        }

        let events = std::mem::take(&mut self.events);
        let alerts = std::mem::take(&mut self.alerts);
        systems::snapshot::build_snapshot(
            &self.world,
            SnapshotContext {
                time: self.time,
                phase: self.phase,
                time_scale: self.time_scale,
                gold: self.gold,
                castle_health: self.castle_health,
                wave: self.wave,
                spawning: self.scheduler.is_spawning(),
                unlocks: &self.unlocks,
                report: self.report.clone(),
            },
            events,
            alerts,
        )
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn gold(&self) -> u64 {
        self.gold
    }

    pub fn castle_health(&self) -> f64 {
        self.castle_health
    }

    pub fn unlocks(&self) -> &UnlockState {
        &self.unlocks
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable world access for constructing test scenarios.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Grant gold directly (for tests exercising purchases).
    #[cfg(test)]
    pub fn grant_gold(&mut self, amount: u64) {
        self.gold += amount;
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command. Rejected purchases leave all
    /// state untouched and push a warning alert.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartMission => {
                if matches!(
                    self.phase,
                    GamePhase::Idle | GamePhase::Victory | GamePhase::Defeat
                ) {
                    self.world.clear();
                    self.grid = OccupancyGrid::new();
                    self.unlocks = UnlockState::new();
                    self.scheduler.reset();
                    self.pending.clear();
                    self.gold = self.level.starting_gold;
                    self.castle_health = self.level.castle_health;
                    self.wave = 0;
                    self.wave_active = false;
                    self.time = SimTime::default();
                    self.phase = GamePhase::Active;
                    self.begin_wave(1);
                }
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
            PlayerCommand::SetTimeScale { scale } => {
                if scale > 0.0 {
                    self.time_scale = scale.min(MAX_TIME_SCALE);
                } else {
                    self.warn("Time scale must be positive");
                }
            }
            PlayerCommand::PlaceTower { kind, grid, x, y } => {
                self.place_tower(&kind, grid, Position::new(x, y));
            }
            PlayerCommand::PlaceBuilding { kind, grid, x, y } => {
                self.place_building(&kind, grid, Position::new(x, y));
            }
            PlayerCommand::SellTower { grid } => {
                self.sell_tower(grid);
            }
            PlayerCommand::SelectElement { grid, element } => {
                self.select_element(grid, element);
            }
            PlayerCommand::UpgradeForge => match self.unlocks.upgrade_forge(self.gold) {
                Ok(cost) => {
                    self.gold -= cost;
                    self.events.push(GameEvent::ForgeUpgraded {
                        level: self.unlocks.forge_level,
                    });
                }
                Err(reason) => self.warn(reason),
            },
            PlayerCommand::BuyForgeUpgrade { upgrade } => {
                match self.unlocks.buy_upgrade(upgrade, self.gold) {
                    Ok(cost) => self.gold -= cost,
                    Err(reason) => self.warn(reason),
                }
            }
            PlayerCommand::BuyAcademyUpgrade { element } => {
                match self.unlocks.buy_element_upgrade(element, self.gold) {
                    Ok(cost) => self.gold -= cost,
                    Err(reason) => self.warn(reason),
                }
            }
            PlayerCommand::StartWave { wave } => {
                self.wave += 1;
                self.wave_active = true;
                self.scheduler.start_wave(wave);
            }
            PlayerCommand::StartContinuous { interval, pattern } => {
                self.wave_active = false;
                self.pending.clear();
                self.scheduler.start_continuous(interval, pattern);
            }
        }
    }

    /// Run due pending actions, counting down by scaled time.
    fn run_pending(&mut self, dt: f64) {
        let mut due = Vec::new();
        self.pending.retain_mut(|pending| {
            pending.remaining -= dt;
            if pending.remaining <= 0.0 {
                due.push(match pending.action {
                    DeferredAction::StartNextWave => DeferredAction::StartNextWave,
                });
                false
            } else {
                true
            }
        });
        for action in due {
            match action {
                DeferredAction::StartNextWave => self.begin_wave(self.wave + 1),
            }
        }
    }

    /// Run all systems in order with the scaled delta.
    fn run_systems(&mut self, dt: f64) {
        // 1. Spawning
        systems::wave_spawner::run(
            &mut self.world,
            &mut self.scheduler,
            &self.catalog,
            &self.level.path,
            &mut self.rng,
            &mut self.events,
            &mut self.alerts,
            self.time.tick,
            dt,
        );
        // 2. Building buffs (idempotent recompute from base stats)
        systems::building_effects::run(&mut self.world, &self.unlocks);
        // 3. Mine income
        let income = systems::income::run(&mut self.world, &self.unlocks, dt);
        self.gold += income;
        self.report.gold_earned += income;
        // 4. Targeting and firing
        systems::combat::run(&mut self.world, dt);
        // 5. Projectile flight and resolution
        systems::projectile::run(&mut self.world, &mut self.despawn_buffer, dt);
        // 6. Ground zones (slow easing, poison application)
        systems::zones::run(&mut self.world, &mut self.despawn_buffer, dt);
        // 7. Status timers and speed finalization
        systems::status::run(&mut self.world, dt);
        // 8. Path movement
        systems::movement::run(&mut self.world, &self.level.path, dt);
        // 9. Reaping (after every damage source has landed)
        let kill_gold = KILL_GOLD_BASE + (self.wave as u64) / 2;
        let outcome = systems::cleanup::run(
            &mut self.world,
            &mut self.despawn_buffer,
            kill_gold,
            &mut self.events,
            &mut self.report,
        );
        self.gold += outcome.gold_earned;
        if outcome.castle_damage > 0.0 {
            self.castle_health = (self.castle_health - outcome.castle_damage).max(0.0);
            if self.castle_health <= 0.0 {
                self.alerts.push(Alert::new(
                    AlertLevel::Critical,
                    "The castle has fallen",
                    self.time.tick,
                ));
                self.events.push(GameEvent::CastleDestroyed);
                self.phase = GamePhase::Defeat;
            }
        }
    }

    /// A finite wave is complete once spawning has drained and the
    /// field is clear; the next wave starts after a short break.
    /// Defeat latches: a castle that fell this tick must not be
    /// overwritten by victory even if the field cleared with it.
    fn check_wave_completion(&mut self) {
        if self.phase != GamePhase::Active {
            return;
        }
        if !self.wave_active || self.scheduler.is_continuous() || self.scheduler.is_spawning() {
            return;
        }
        let enemies_left = self
            .world
            .query::<&bastion_core::components::Enemy>()
            .iter()
            .count();
        if enemies_left > 0 {
            return;
        }

        self.wave_active = false;
        self.report.wave_completed = true;
        self.events.push(GameEvent::WaveCompleted { wave: self.wave });

        if (self.wave as usize) < self.level.waves.len() {
            self.pending.push(PendingAction {
                remaining: WAVE_BREAK_SECS,
                action: DeferredAction::StartNextWave,
            });
        } else {
            self.report.level_completed = true;
            self.events.push(GameEvent::LevelCompleted);
            self.phase = GamePhase::Victory;
        }
    }

    /// Start wave `number` (1-based) from the level plan.
    fn begin_wave(&mut self, number: u32) {
        let Some(wave) = self.level.waves.get(number as usize - 1).cloned() else {
            return;
        };
        self.wave = number;
        self.wave_active = true;
        self.scheduler.start_wave(wave);
        self.alerts.push(Alert::new(
            AlertLevel::Info,
            format!("Wave {} incoming", number),
            self.time.tick,
        ));
    }

    /// Place a tower: unlock, occupancy, and gold checks all pass
    /// before anything mutates.
    fn place_tower(&mut self, kind: &str, grid: GridPos, pos: Position) {
        let spec = match self.catalog.tower_by_key(kind) {
            Some(spec) => *spec,
            None => {
                self.warn(format!("Unknown tower type '{}'", kind));
                return;
            }
        };
        if !self.unlocks.tower_unlocked(spec.kind) {
            self.warn(format!("{} tower not yet unlocked", kind));
            return;
        }
        if !self.grid.is_free(grid, TOWER_FOOTPRINT) {
            self.warn("Cells occupied");
            return;
        }
        if self.gold < spec.cost {
            self.warn(format!(
                "Insufficient gold: have {}, need {}",
                self.gold, spec.cost
            ));
            return;
        }

        self.grid.claim(grid, TOWER_FOOTPRINT);
        self.gold -= spec.cost;

        let stats = spec.weapon_stats();
        let entity = self.world.spawn((
            Tower {
                kind: spec.kind,
                grid,
            },
            pos,
            Weapon {
                base: stats,
                effective: stats,
                cooldown: 0.0,
                target: None,
            },
        ));
        match spec.kind {
            TowerKind::Magic => {
                let _ = self.world.insert_one(
                    entity,
                    ElementSlot {
                        element: Element::Fire,
                        bonuses: ElementalBonuses::default(),
                    },
                );
            }
            TowerKind::Archer | TowerKind::Poison => {
                let _ = self.world.insert_one(entity, ArrowMods::default());
            }
            _ => {}
        }
        self.events.push(GameEvent::TowerPlaced { kind: spec.kind });
    }

    /// Place a support building. The cap check and unlock side effects
    /// happen atomically inside `register_building`, after every other
    /// check has passed.
    fn place_building(&mut self, kind: &str, grid: GridPos, pos: Position) {
        let spec = match self.catalog.building_by_key(kind) {
            Some(spec) => *spec,
            None => {
                self.warn(format!("Unknown building type '{}'", kind));
                return;
            }
        };
        if !self.unlocks.building_unlocked(spec.kind) {
            self.warn(format!("{} not yet unlocked", kind));
            return;
        }
        if !self.grid.is_free(grid, BUILDING_FOOTPRINT) {
            self.warn("Cells occupied");
            return;
        }
        if self.gold < spec.cost {
            self.warn(format!(
                "Insufficient gold: have {}, need {}",
                self.gold, spec.cost
            ));
            return;
        }
        if let Err(reason) = self.unlocks.register_building(spec.kind) {
            self.warn(reason);
            return;
        }

        self.grid.claim(grid, BUILDING_FOOTPRINT);
        self.gold -= spec.cost;

        let entity = self.world.spawn((
            Building {
                kind: spec.kind,
                grid,
            },
            pos,
        ));
        if spec.kind == BuildingKind::Mine {
            let _ = self.world.insert_one(
                entity,
                MineState {
                    accrued: 0.0,
                    collect_timer: MINE_COLLECT_PERIOD,
                },
            );
        }
        self.events.push(GameEvent::BuildingPlaced { kind: spec.kind });
    }

    /// Sell the tower anchored at `grid`, refunding half its cost and
    /// freeing its cells.
    fn sell_tower(&mut self, grid: GridPos) {
        let found = self
            .world
            .query::<&Tower>()
            .iter()
            .find(|(_, tower)| tower.grid == grid)
            .map(|(entity, tower)| (entity, tower.kind));
        let Some((entity, kind)) = found else {
            self.warn("No tower at that position");
            return;
        };

        let refund = self
            .catalog
            .tower(kind)
            .map(|spec| (spec.cost as f64 * SELL_REFUND_FRACTION).floor() as u64)
            .unwrap_or(0);

        let _ = self.world.despawn(entity);
        self.grid.release(grid, TOWER_FOOTPRINT);
        self.gold += refund;
        self.events.push(GameEvent::TowerSold { kind, refund });
    }

    /// Change the element of the magic tower anchored at `grid`.
    fn select_element(&mut self, grid: GridPos, element: Element) {
        for (_entity, (tower, slot)) in self.world.query_mut::<(&Tower, &mut ElementSlot)>() {
            if tower.grid == grid {
                slot.element = element;
                return;
            }
        }
        self.warn("No magic tower at that position");
    }

    fn warn(&mut self, message: impl Into<String>) {
        self.alerts
            .push(Alert::new(AlertLevel::Warning, message, self.time.tick));
    }
}
