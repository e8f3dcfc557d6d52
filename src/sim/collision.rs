//! Pairwise collision detection and resolution
//!
//! Once per tick every ordered pair of distinct live entities is tested
//! with a half-extent-centered AABB overlap and resolved against the role
//! table. Pairs are ordered, so (A, B) and (B, A) are evaluated
//! separately and each rule is written per-role.
//!
//! Resolution is sequential within the tick: damage applied by an earlier
//! pair is visible to later pairs in the same scan. The outcome is still
//! fully reproducible because the scan walks the ascending-id snapshot
//! taken at pass start, and the registry itself is never mutated mid-scan
//! (kills only enqueue removals).

use super::entity::{Body, VariantTag};
use super::registry::Registry;
use super::state::SimEvent;
use crate::config::Config;

/// Half-extent-centered AABB overlap. A zero half-extent is a valid
/// degenerate box; two coincident points share no overlap region, so the
/// comparison is strict.
pub fn overlaps(a: &Body, b: &Body) -> bool {
    let delta = (a.pos - b.pos).abs();
    let extent = a.half_size() + b.half_size();
    delta.x < extent.x && delta.y < extent.y
}

/// Kill and hit tallies for one collision pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub player_hits: u32,
    pub enemies_killed: u32,
    pub bosses_killed: u32,
}

/// Run the collision pass for one tick.
///
/// Bodies that died earlier in the scan stop colliding immediately; they
/// stay in the registry (queued for removal) until the end-of-tick flush.
pub fn resolve_collisions(
    registry: &mut Registry,
    config: &Config,
    events: &mut Vec<SimEvent>,
) -> CollisionReport {
    let mut report = CollisionReport::default();
    let ids = registry.ids();

    for &a_id in &ids {
        for &b_id in &ids {
            // Ids are unique in the registry, so this id check is an
            // identity check even for zero-size coincident bodies.
            if a_id == b_id {
                continue;
            }
            let (Some(a), Some(b)) = (registry.get(a_id), registry.get(b_id)) else {
                continue;
            };
            if a.is_dead() || b.is_dead() || !overlaps(a, b) {
                continue;
            }
            let (a_tag, b_tag) = (a.kind.tag(), b.kind.tag());

            match (a_tag, b_tag) {
                (VariantTag::Player, VariantTag::Enemy) => {
                    let Some(player) = registry.get_mut(a_id) else { continue };
                    player.health -= config.enemy_contact_damage;
                    report.player_hits += 1;
                    events.push(SimEvent::PlayerHit { remaining: player.health });
                }
                (VariantTag::Player, VariantTag::Boss) => {
                    let Some(player) = registry.get_mut(a_id) else { continue };
                    player.health -= config.boss_contact_damage;
                    report.player_hits += 1;
                    events.push(SimEvent::PlayerHit { remaining: player.health });
                }
                // Ramming the player is as lethal to an enemy as a shot
                (VariantTag::Enemy, VariantTag::Player)
                | (VariantTag::Enemy, VariantTag::Projectile) => {
                    let Some(enemy) = registry.get_mut(a_id) else { continue };
                    enemy.health -= config.projectile_damage;
                    if enemy.is_dead() {
                        registry.mark_removed(a_id);
                        report.enemies_killed += 1;
                        events.push(SimEvent::EnemyKilled { id: a_id });
                    }
                }
                (VariantTag::Boss, VariantTag::Projectile) => {
                    let Some(boss) = registry.get_mut(a_id) else { continue };
                    boss.health -= config.boss_hit_damage;
                    if boss.is_dead() {
                        registry.mark_removed(a_id);
                        report.bosses_killed += 1;
                        events.push(SimEvent::BossKilled { id: a_id });
                    } else {
                        // One projectile is consumed per hit unless it
                        // already killed the boss
                        registry.mark_removed(b_id);
                    }
                }
                _ => {}
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn insert(registry: &mut Registry, body: Body) -> u32 {
        let id = body.id;
        registry.insert(body);
        id
    }

    fn spawn(registry: &mut Registry, config: &Config, kind: VariantTag, pos: Vec2) -> u32 {
        let id = registry.allocate_id();
        let body = match kind {
            VariantTag::Player => {
                let mut player = Body::player(id, config);
                player.pos = pos;
                player
            }
            VariantTag::Enemy => {
                let mut enemy = Body::enemy(id, pos.x, config);
                enemy.pos = pos;
                enemy
            }
            VariantTag::Boss => {
                let mut boss = Body::boss(id, pos.x, config);
                boss.pos = pos;
                boss
            }
            VariantTag::Projectile => Body::projectile(id, pos, config),
        };
        insert(registry, body)
    }

    #[test]
    fn overlap_uses_half_extents() {
        let config = Config::default();
        let a = Body::enemy(1, 100.0, &config); // 40x40 box centered at (100, 0)
        let mut b = Body::enemy(2, 139.0, &config);
        assert!(overlaps(&a, &b)); // centers 39 apart, combined half extent 40
        b.pos.x = 141.0;
        assert!(!overlaps(&a, &b));
    }

    #[test]
    fn zero_size_bodies_never_overlap() {
        let config = Config::default();
        let mut a = Body::enemy(1, 100.0, &config);
        let mut b = Body::enemy(2, 100.0, &config);
        a.size = Vec2::ZERO;
        b.size = Vec2::ZERO;
        // Coincident points share no overlap region beyond the point
        assert!(!overlaps(&a, &b));
    }

    #[test]
    fn overlapping_player_and_enemy_trade_damage() {
        // World 300x500, player and enemy fully overlapping at (150, 400)
        let config = Config::default();
        let mut registry = Registry::new();
        let mut events = Vec::new();
        let player = spawn(&mut registry, &config, VariantTag::Player, Vec2::new(150.0, 400.0));
        let enemy = spawn(&mut registry, &config, VariantTag::Enemy, Vec2::new(150.0, 400.0));

        let report = resolve_collisions(&mut registry, &config, &mut events);

        assert_eq!(registry.get(player).unwrap().health, 75.0);
        assert_eq!(registry.get(enemy).unwrap().health, 0.0);
        assert!(registry.pending_removals().contains(&enemy));
        assert!(!registry.pending_removals().contains(&player));
        assert_eq!(report.enemies_killed, 1);
        assert_eq!(report.player_hits, 1);
    }

    #[test]
    fn projectile_kills_enemy() {
        let config = Config::default();
        let mut registry = Registry::new();
        let mut events = Vec::new();
        let enemy = spawn(&mut registry, &config, VariantTag::Enemy, Vec2::new(150.0, 200.0));
        spawn(&mut registry, &config, VariantTag::Projectile, Vec2::new(150.0, 200.0));

        let report = resolve_collisions(&mut registry, &config, &mut events);

        assert_eq!(report.enemies_killed, 1);
        assert!(registry.pending_removals().contains(&enemy));
        assert!(events.contains(&SimEvent::EnemyKilled { id: enemy }));
    }

    #[test]
    fn boss_consumes_projectile_it_survives() {
        let config = Config::default();
        let mut registry = Registry::new();
        let mut events = Vec::new();
        let boss = spawn(&mut registry, &config, VariantTag::Boss, Vec2::new(150.0, 100.0));
        let projectile =
            spawn(&mut registry, &config, VariantTag::Projectile, Vec2::new(150.0, 100.0));

        let report = resolve_collisions(&mut registry, &config, &mut events);

        assert_eq!(registry.get(boss).unwrap().health, 993.0);
        assert!(!registry.pending_removals().contains(&boss));
        assert!(registry.pending_removals().contains(&projectile));
        assert_eq!(report.bosses_killed, 0);
    }

    #[test]
    fn killing_shot_is_not_consumed() {
        let config = Config::default();
        let mut registry = Registry::new();
        let mut events = Vec::new();
        let boss = spawn(&mut registry, &config, VariantTag::Boss, Vec2::new(150.0, 100.0));
        registry.get_mut(boss).unwrap().health = 5.0;
        let projectile =
            spawn(&mut registry, &config, VariantTag::Projectile, Vec2::new(150.0, 100.0));

        let report = resolve_collisions(&mut registry, &config, &mut events);

        assert_eq!(report.bosses_killed, 1);
        assert!(registry.pending_removals().contains(&boss));
        assert!(!registry.pending_removals().contains(&projectile));
        assert!(events.contains(&SimEvent::BossKilled { id: boss }));
    }

    #[test]
    fn dead_bodies_stop_colliding() {
        // Two projectiles over one enemy: the first kill ends the enemy's
        // participation, so only one kill is tallied.
        let config = Config::default();
        let mut registry = Registry::new();
        let mut events = Vec::new();
        spawn(&mut registry, &config, VariantTag::Enemy, Vec2::new(150.0, 200.0));
        spawn(&mut registry, &config, VariantTag::Projectile, Vec2::new(150.0, 200.0));
        spawn(&mut registry, &config, VariantTag::Projectile, Vec2::new(150.0, 200.0));

        let report = resolve_collisions(&mut registry, &config, &mut events);
        assert_eq!(report.enemies_killed, 1);
    }

    #[test]
    fn resolution_is_reproducible() {
        let config = Config::default();
        let build = || {
            let mut registry = Registry::new();
            spawn(&mut registry, &config, VariantTag::Player, Vec2::new(150.0, 400.0));
            spawn(&mut registry, &config, VariantTag::Enemy, Vec2::new(150.0, 400.0));
            spawn(&mut registry, &config, VariantTag::Boss, Vec2::new(150.0, 100.0));
            spawn(&mut registry, &config, VariantTag::Projectile, Vec2::new(150.0, 100.0));
            registry
        };
        let mut first = build();
        let mut second = build();
        let mut events = Vec::new();
        let report_a = resolve_collisions(&mut first, &config, &mut events);
        let report_b = resolve_collisions(&mut second, &config, &mut events);
        assert_eq!(report_a, report_b);
        let healths = |r: &Registry| r.iter().map(|b| b.health).collect::<Vec<_>>();
        assert_eq!(healths(&first), healths(&second));
    }
}
