//! Snapshot system: queries the ECS world and builds a complete
//! GameStateSnapshot.
//!
//! This system is read-only over the world; views are sorted on stable
//! keys so equal simulations serialize identically.

use hecs::World;

use bastion_core::components::*;
use bastion_core::enums::{GamePhase, ZoneKind};
use bastion_core::state::*;
use bastion_core::types::{Position, SimTime};

use crate::progression::UnlockState;

/// Inputs that live on the engine rather than in the world.
pub struct SnapshotContext<'a> {
    pub time: SimTime,
    pub phase: GamePhase,
    pub time_scale: f64,
    pub gold: u64,
    pub castle_health: f64,
    pub wave: u32,
    pub spawning: bool,
    pub unlocks: &'a UnlockState,
    pub report: TickReport,
}

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    ctx: SnapshotContext<'_>,
    events: Vec<bastion_core::events::GameEvent>,
    alerts: Vec<bastion_core::events::Alert>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: ctx.time,
        phase: ctx.phase,
        time_scale: ctx.time_scale,
        gold: ctx.gold,
        castle_health: ctx.castle_health,
        wave: ctx.wave,
        spawning: ctx.spawning,
        enemies: build_enemies(world),
        towers: build_towers(world),
        projectiles: build_projectiles(world),
        zones: build_zones(world),
        buildings: build_buildings(world, ctx.unlocks),
        progression: build_progression(ctx.unlocks),
        report: ctx.report,
        events,
        alerts,
    }
}

fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut views: Vec<EnemyView> = world
        .query::<(&Enemy, &Position, &Health, &Mobility, &StatusEffects)>()
        .iter()
        .map(|(entity, (enemy, pos, health, mobility, status))| EnemyView {
            id: entity.to_bits().get(),
            kind: enemy.kind,
            position: *pos,
            health: health.current,
            max_health: health.max,
            speed: mobility.speed,
            frozen: status.freeze.is_some(),
            slowed: status.slow.is_some() || mobility.zone_factor < 0.999,
            burning: status.burn.is_some(),
            poisoned: status.poison.is_some(),
        })
        .collect();

    views.sort_by_key(|v| v.id);
    views
}

fn build_towers(world: &World) -> Vec<TowerView> {
    let mut views: Vec<TowerView> = world
        .query::<(&Tower, &Weapon, &Position, Option<&ElementSlot>)>()
        .iter()
        .map(|(_, (tower, weapon, pos, slot))| TowerView {
            kind: tower.kind,
            grid: tower.grid,
            position: *pos,
            damage: weapon.effective.damage,
            range: weapon.effective.range,
            fire_rate: weapon.effective.fire_rate,
            cooldown: weapon.cooldown,
            target: weapon.target.map(|t| t.to_bits().get()),
            element: slot.map(|s| s.element),
        })
        .collect();

    views.sort_by_key(|v| (v.grid.col, v.grid.row));
    views
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut views: Vec<ProjectileView> = world
        .query::<(&Projectile, &Position)>()
        .iter()
        .map(|(_, (projectile, pos))| ProjectileView {
            position: *pos,
            lifetime: projectile.lifetime,
        })
        .collect();

    views.sort_by(|a, b| {
        a.position
            .x
            .total_cmp(&b.position.x)
            .then(a.position.y.total_cmp(&b.position.y))
            .then(a.lifetime.total_cmp(&b.lifetime))
    });
    views
}

fn build_zones(world: &World) -> Vec<ZoneView> {
    let mut views: Vec<ZoneView> = world
        .query::<(&SlowZone, &Position)>()
        .iter()
        .map(|(_, (zone, pos))| ZoneView {
            kind: ZoneKind::Slow,
            position: *pos,
            radius: zone.radius,
            remaining: zone.remaining,
        })
        .collect();

    views.extend(
        world
            .query::<(&PoisonCloud, &Position)>()
            .iter()
            .map(|(_, (cloud, pos))| ZoneView {
                kind: ZoneKind::Poison,
                position: *pos,
                radius: cloud.radius,
                remaining: cloud.remaining,
            }),
    );

    views.sort_by(|a, b| {
        a.position
            .x
            .total_cmp(&b.position.x)
            .then(a.position.y.total_cmp(&b.position.y))
    });
    views
}

fn build_buildings(world: &World, unlocks: &UnlockState) -> Vec<BuildingView> {
    let mut views: Vec<BuildingView> = world
        .query::<(&Building, &Position)>()
        .iter()
        .map(|(_, (building, pos))| BuildingView {
            kind: building.kind,
            grid: building.grid,
            position: *pos,
            level: match building.kind {
                bastion_core::enums::BuildingKind::Forge => Some(unlocks.forge_level),
                _ => None,
            },
        })
        .collect();

    views.sort_by_key(|v| (v.grid.col, v.grid.row));
    views
}

fn build_progression(unlocks: &UnlockState) -> ProgressionView {
    ProgressionView {
        unlocked_towers: unlocks.unlocked_tower_keys(),
        unlocked_buildings: unlocks.unlocked_building_keys(),
        unlocked_upgrades: unlocks.unlocked_upgrade_ids(),
        forge_level: unlocks.forge_level,
        mine_count: unlocks.mine_count(),
        max_mines: unlocks.max_mines(),
        income_multiplier: unlocks.income_multiplier(),
    }
}
