//! Tests for the universe registry, staging, notifications, links and object behaviors.

use glam::Vec2;
use hecs::Entity;

use starbase_core::constants::*;
use starbase_core::enums::*;
use starbase_core::events::UniverseEvent;

use crate::bus::NotificationBus;
use crate::config::{ConfigError, SimConfig};
use crate::error::SimError;
use crate::links::{plan_links, LinkGraph};
use crate::objects::{object_id, Asteroid, Behavior, Hull, Missile, Blueprint};
use crate::placement::Placement;
use crate::universe::Universe;
use crate::world_setup;

fn universe() -> Universe {
    Universe::new(SimConfig::default())
}

fn add_asteroid(universe: &mut Universe, x: f32, y: f32, minerals: i32) -> Entity {
    universe.add_object(Blueprint::Asteroid {
        position: Vec2::new(x, y),
        minerals,
    })
}

fn add_relay(universe: &mut Universe, x: f32, y: f32) -> Entity {
    universe.add_object(Blueprint::PowerRelay {
        position: Vec2::new(x, y),
    })
}

fn add_ship(universe: &mut Universe, x: f32, y: f32, heading: f32) -> Entity {
    universe.add_object(Blueprint::EnemyShip {
        position: Vec2::new(x, y),
        heading,
    })
}

fn ship_state(universe: &Universe, ship: Entity) -> (ShipTask, Option<Entity>) {
    universe
        .inspect(ship, |behavior| match behavior {
            Behavior::EnemyShip(s) => (s.task(), s.target()),
            other => panic!("expected an enemy ship, got {other:?}"),
        })
        .unwrap()
}

fn turret_missiles(universe: &Universe, turret: Entity) -> [Entity; TURRET_MISSILE_COUNT] {
    universe
        .inspect(turret, |behavior| match behavior {
            Behavior::Turret(t) => t.missiles(),
            other => panic!("expected a turret, got {other:?}"),
        })
        .unwrap()
}

fn miner_asteroids(universe: &Universe, miner: Entity) -> Vec<Entity> {
    universe
        .inspect(miner, |behavior| match behavior {
            Behavior::Miner(m) => m.asteroids().to_vec(),
            other => panic!("expected a miner, got {other:?}"),
        })
        .unwrap()
}

fn spawn_entities(count: usize) -> Vec<Entity> {
    let mut world = hecs::World::new();
    (0..count).map(|_| world.spawn(())).collect()
}

// ---- Registry ordering ----

#[test]
fn test_objects_sorted_by_kind_stably() {
    let mut u = universe();
    let ship = add_ship(&mut u, 5000.0, 0.0, 0.0);
    let rock_a = add_asteroid(&mut u, 0.0, 0.0, 100);
    let cc = u.add_object(Blueprint::CommandCenter {
        position: Vec2::new(3000.0, 0.0),
    });
    let rock_b = add_asteroid(&mut u, 10.0, 0.0, 100);

    let order: Vec<Entity> = u.objects().collect();
    assert_eq!(order, vec![rock_a, rock_b, cc, ship]);
}

#[test]
fn test_add_outside_tick_is_immediate() {
    let mut u = universe();
    let rock = add_asteroid(&mut u, 0.0, 0.0, 100);
    assert!(u.is_live(rock));
    assert_eq!(u.len(), 1);
    assert_eq!(u.find_object_at(Vec2::ZERO), Some(rock));
}

// ---- Staging ----

#[test]
fn test_add_during_tick_is_staged() {
    let mut u = universe();
    let rock = u.during_tick(|u| {
        let rock = add_asteroid(u, 0.0, 0.0, 100);
        assert!(!u.is_live(rock), "Staged object must not be live yet");
        assert!(u.find_object_at(Vec2::ZERO).is_none());
        assert!(u
            .find_objects_in_radius(&[ObjectType::Asteroid], Vec2::ZERO, 10.0)
            .is_empty());
        assert!(u
            .find_closest_object_of_type(Vec2::ZERO, ObjectType::Asteroid, f32::MAX)
            .is_none());
        rock
    });
    assert!(u.is_live(rock), "Staged object should join after the tick");
    assert_eq!(u.find_object_at(Vec2::ZERO), Some(rock));
}

#[test]
fn test_remove_during_tick_is_deferred() {
    let mut u = universe();
    let rock = add_asteroid(&mut u, 0.0, 0.0, 100);
    u.during_tick(|u| {
        u.remove_object(rock);
        assert!(u.is_live(rock), "Removal must wait for the end of the tick");
        assert_eq!(u.find_object_at(Vec2::ZERO), Some(rock));
    });
    assert!(!u.is_live(rock));
    assert!(u.position(rock).is_none(), "Released handle should not resolve");
}

#[test]
fn test_remove_of_staged_addition_is_not_resurrected() {
    let mut u = universe();
    let rock = u.during_tick(|u| {
        let rock = add_asteroid(u, 0.0, 0.0, 100);
        u.remove_object(rock);
        rock
    });
    assert!(!u.is_live(rock));
    assert!(u.is_empty());
}

#[test]
fn test_removing_absent_object_is_a_no_op() {
    let mut u = universe();
    let rock = add_asteroid(&mut u, 0.0, 0.0, 100);
    u.remove_object(rock);
    u.remove_object(rock);
    assert!(u.is_empty());
}

#[test]
fn test_object_added_mid_tick_is_not_ticked_that_tick() {
    let mut u = universe();
    u.add_object(Blueprint::CommandCenter {
        position: Vec2::ZERO,
    });
    // Facing the command center and inside engagement range: fires on the first tick
    let start = Vec2::new(500.0, 0.0);
    let ship = u.add_object(Blueprint::EnemyShip {
        position: start,
        heading: starbase_core::steering::direction_between(start, Vec2::ZERO),
    });

    u.tick(1.0);
    assert_eq!(ship_state(&u, ship).0, ShipTask::Attacking);
    assert_eq!(u.count_of(ObjectType::Bullet), 1);
    let bullet = u
        .objects()
        .find(|&e| u.kind(e) == Some(ObjectType::Bullet))
        .unwrap();
    let bullet_at = u.position(bullet).unwrap();
    let ship_at = u.position(ship).unwrap();
    assert!(
        bullet_at.distance(ship_at) < 1e-3,
        "Bullet must still be where it was fired"
    );

    u.tick(1.0);
    let moved = u.position(bullet).unwrap().distance(bullet_at);
    assert!((moved - SHIP_TRAVEL_SPEED * BULLET_SPEED_FACTOR).abs() < 1e-3);
}

// ---- Queries ----

#[test]
fn test_find_object_at_prefers_later_kind() {
    let mut u = universe();
    let rock = add_asteroid(&mut u, 0.0, 0.0, 100);
    let cc = u.add_object(Blueprint::CommandCenter {
        position: Vec2::ZERO,
    });
    let ship = add_ship(&mut u, 0.0, 0.0, 0.0);

    assert_eq!(u.find_object_at(Vec2::ZERO), Some(ship));
    assert_eq!(u.find_object_at(Vec2::new(50.0, 50.0)), Some(cc));
    assert_eq!(u.find_object_at(Vec2::new(500.0, 0.0)), None);
    u.remove_object(cc);
    u.remove_object(ship);
    assert_eq!(u.find_object_at(Vec2::new(50.0, 50.0)), Some(rock));
}

#[test]
fn test_find_closest_with_zero_range_finds_nothing() {
    let mut u = universe();
    add_asteroid(&mut u, 10.0, 0.0, 100);
    add_asteroid(&mut u, 0.0, 20.0, 100);
    assert!(u
        .find_closest_object_of_type(Vec2::ZERO, ObjectType::Asteroid, 0.0)
        .is_none());
}

#[test]
fn test_find_closest_picks_nearest_of_kind() {
    let mut u = universe();
    let far = add_asteroid(&mut u, 300.0, 0.0, 100);
    let near = add_asteroid(&mut u, 0.0, 50.0, 100);
    add_relay(&mut u, 1.0, 1.0);

    let found = u.find_closest_object_of_type(Vec2::ZERO, ObjectType::Asteroid, f32::MAX);
    assert_eq!(found, Some(near));
    let found = u.find_closest_object_of_type(Vec2::new(290.0, 0.0), ObjectType::Asteroid, 20.0);
    assert_eq!(found, Some(far));
}

#[test]
fn test_find_closest_tie_goes_to_first_found() {
    let mut u = universe();
    let first = add_asteroid(&mut u, 10.0, 0.0, 100);
    add_asteroid(&mut u, -10.0, 0.0, 100);
    let found = u.find_closest_object_of_type(Vec2::ZERO, ObjectType::Asteroid, f32::MAX);
    assert_eq!(found, Some(first));
}

#[test]
fn test_find_objects_in_radius_is_inclusive_and_filtered() {
    let mut u = universe();
    let edge = add_asteroid(&mut u, 100.0, 0.0, 100);
    add_asteroid(&mut u, 101.0, 0.0, 100);
    let relay = add_relay(&mut u, 0.0, 50.0);

    let rocks = u.find_objects_in_radius(&[ObjectType::Asteroid], Vec2::ZERO, 100.0);
    assert_eq!(rocks, vec![edge]);

    let both = u.find_objects_in_radius(
        &[ObjectType::Asteroid, ObjectType::PowerRelay],
        Vec2::ZERO,
        100.0,
    );
    assert_eq!(both, vec![edge, relay], "Results should be in registry order");
}

// ---- Resources ----

#[test]
fn test_command_center_power_after_one_tick() {
    let mut u = universe();
    u.add_object(Blueprint::CommandCenter {
        position: Vec2::ZERO,
    });
    u.tick(1.0);
    assert_eq!(u.power(), 1000);
}

#[test]
fn test_power_is_rebuilt_every_tick() {
    let mut u = universe();
    u.add_object(Blueprint::CommandCenter {
        position: Vec2::ZERO,
    });
    add_relay(&mut u, 100.0, 0.0);
    u.tick(1.0);
    assert_eq!(u.power(), 500);
    u.tick(1.0);
    assert_eq!(u.power(), 500, "Power must not accumulate across ticks");
}

#[test]
fn test_minerals_persist_across_ticks() {
    let mut u = Universe::new(SimConfig {
        starting_minerals: 0,
        ..Default::default()
    });
    u.adjust_minerals(250);
    u.tick(1.0);
    u.tick(1.0);
    assert_eq!(u.minerals(), 250);
}

// ---- Notification bus ----

#[test]
fn test_bus_preserves_subscription_order() {
    let entities = spawn_entities(3);
    let mut bus = NotificationBus::new();
    let ids: Vec<_> = entities.iter().map(|&e| bus.subscribe(e)).collect();
    assert_eq!(bus.subscribers(), entities);

    assert!(bus.unsubscribe(ids[1]));
    assert_eq!(bus.subscribers(), vec![entities[0], entities[2]]);
    assert!(!bus.is_subscribed(entities[1]));
    assert!(!bus.unsubscribe(ids[1]), "Second unsubscribe should report false");
    assert_eq!(bus.len(), 2);
}

#[test]
#[should_panic(expected = "still subscribed")]
fn test_release_while_subscribed_panics() {
    let mut u = universe();
    let cc = u.add_object(Blueprint::CommandCenter {
        position: Vec2::ZERO,
    });
    u.bus_mut().subscribe(cc);
    u.remove_object(cc);
}

#[test]
fn test_subscribers_are_released_cleanly() {
    let mut u = universe();
    let ship = add_ship(&mut u, 0.0, 0.0, 0.0);
    let miner = u.add_object(Blueprint::Miner {
        position: Vec2::new(100.0, 0.0),
    });
    assert!(u.bus().is_subscribed(ship));
    assert!(u.bus().is_subscribed(miner));
    u.remove_object(ship);
    u.remove_object(miner);
    assert!(u.bus().is_empty());
}

// ---- Link graph ----

#[test]
fn test_link_graph_rejects_self_and_duplicate_links() {
    let e = spawn_entities(2);
    let mut graph = LinkGraph::new();
    assert!(!graph.add(e[0], e[0]));
    assert!(graph.add(e[0], e[1]));
    assert!(!graph.add(e[1], e[0]), "Reversed pair is a duplicate");
    assert_eq!(graph.len(), 1);
    assert_eq!(graph.neighbours(e[1]).collect::<Vec<_>>(), vec![e[0]]);
    assert_eq!(graph.prune(e[0]), 1);
    assert!(graph.is_empty());
}

#[test]
fn test_plan_links_hops_one_relay_further() {
    let e = spawn_entities(3);
    let (structure, near_relay, far_relay) = (e[0], e[1], e[2]);
    let relays = [(near_relay, Vec2::ZERO), (far_relay, Vec2::new(800.0, 0.0))];

    let planned = plan_links(structure, ObjectType::Miner, Vec2::new(100.0, 0.0), &relays);
    assert_eq!(
        planned,
        vec![(structure, near_relay), (near_relay, far_relay)]
    );
}

#[test]
fn test_relays_link_to_all_relays_in_range() {
    let mut u = universe();
    let a = add_relay(&mut u, 0.0, 0.0);
    let b = add_relay(&mut u, 900.0, 0.0);
    let c = add_relay(&mut u, 2500.0, 0.0);

    let graph = u.link_graph();
    assert!(graph.contains(a, b));
    assert!(!graph.contains(a, c));
    assert!(!graph.contains(b, c), "1600 apart is out of relay range");
    assert_eq!(graph.len(), 1);
}

#[test]
fn test_structure_links_to_nearest_relay_only() {
    let mut u = universe();
    let a = add_relay(&mut u, 0.0, 0.0);
    let b = add_relay(&mut u, 600.0, 0.0);
    let cc = u.add_object(Blueprint::CommandCenter {
        position: Vec2::new(400.0, 0.0),
    });

    let graph = u.link_graph();
    assert!(graph.contains(cc, b));
    assert!(!graph.contains(cc, a));
    assert_eq!(graph.len(), 2);
}

#[test]
fn test_structure_out_of_range_stays_unlinked() {
    let mut u = universe();
    add_relay(&mut u, 0.0, 0.0);
    let miner = u.add_object(Blueprint::Miner {
        position: Vec2::new(2000.0, 2000.0),
    });
    assert_eq!(u.link_graph().neighbours(miner).count(), 0);
}

#[test]
fn test_links_pruned_on_removal() {
    let mut u = universe();
    add_relay(&mut u, 0.0, 0.0);
    let b = add_relay(&mut u, 600.0, 0.0);
    u.add_object(Blueprint::CommandCenter {
        position: Vec2::new(700.0, 0.0),
    });
    assert_eq!(u.links().len(), 2);

    u.remove_object(b);
    assert!(
        u.links().iter().all(|link| !link.touches(b)),
        "No link may reference a removed object"
    );
    assert!(u.links().is_empty());
}

// ---- Destruction ----

#[test]
fn test_hull_reports_destruction_once() {
    let mut hull = Hull { hit_points: 10 };
    assert!(!hull.take_damage(10));
    assert!(hull.take_damage(1));
    assert!(!hull.take_damage(5), "Already below zero");
}

#[test]
fn test_structure_removed_when_hit_points_drop_below_zero() {
    let mut u = universe();
    let relay = add_relay(&mut u, 0.0, 0.0);
    assert!(!u.shoot(relay, 500));
    assert_eq!(u.hit_points(relay), Some(0));
    assert!(u.is_live(relay), "Zero hit points is still alive");

    assert!(u.shoot(relay, 1));
    assert!(!u.is_live(relay));
    assert!(!u.shoot(relay, 1), "Shooting a released handle does nothing");
}

// ---- Asteroids and miners ----

#[test]
fn test_asteroid_mine_returns_yield_and_depletion() {
    let mut rock = Asteroid::new(100, 0.0);
    assert_eq!(rock.mine(60), (60, false));
    assert_eq!(rock.minerals(), 40);
    assert_eq!(rock.mine(60), (40, true));
    assert_eq!(rock.mine(10), (0, false), "Depletion is reported once");
}

#[test]
fn test_mining_an_asteroid_to_depletion_removes_it() {
    let mut u = universe();
    let rock = add_asteroid(&mut u, 0.0, 0.0, 100);
    assert_eq!(u.mine_asteroid(rock, 60), 60);
    assert_eq!(u.asteroid_minerals(rock), Some(40));
    assert!(u.is_live(rock));

    assert_eq!(u.mine_asteroid(rock, 60), 40);
    assert!(!u.is_live(rock));
    assert_eq!(u.mine_asteroid(rock, 60), 0);
}

#[test]
fn test_miner_tracks_asteroids_in_range() {
    let mut u = universe();
    let near = add_asteroid(&mut u, 100.0, 0.0, 100);
    let far = add_asteroid(&mut u, 1000.0, 0.0, 100);
    let miner = u.add_object(Blueprint::Miner {
        position: Vec2::ZERO,
    });
    assert_eq!(miner_asteroids(&u, miner), vec![near]);

    u.move_object(miner, Vec2::new(1000.0, 50.0));
    assert_eq!(miner_asteroids(&u, miner), vec![far]);
}

#[test]
fn test_miner_rescans_when_an_asteroid_is_removed() {
    let mut u = universe();
    let a = add_asteroid(&mut u, 100.0, 0.0, 100);
    let b = add_asteroid(&mut u, 0.0, 100.0, 100);
    let miner = u.add_object(Blueprint::Miner {
        position: Vec2::ZERO,
    });
    assert_eq!(miner_asteroids(&u, miner), vec![a, b]);

    u.remove_object(a);
    assert_eq!(miner_asteroids(&u, miner), vec![b]);
}

#[test]
fn test_miner_mines_on_cadence() {
    let mut u = universe();
    let rock = add_asteroid(&mut u, 100.0, 0.0, 1000);
    u.add_object(Blueprint::Miner {
        position: Vec2::ZERO,
    });
    let start = u.minerals();

    for _ in 0..101 {
        u.tick(1.0);
    }
    assert_eq!(u.minerals(), start, "No mining before the interval elapses");

    u.tick(1.0);
    assert_eq!(u.minerals(), start + MINER_YIELD);
    assert_eq!(u.asteroid_minerals(rock), Some(1000 - MINER_YIELD));
}

// ---- Enemy ships ----

#[test]
fn test_enemy_ship_targets_by_priority() {
    let mut u = universe();
    u.add_object(Blueprint::CommandCenter {
        position: Vec2::ZERO,
    });
    let miner = u.add_object(Blueprint::Miner {
        position: Vec2::new(3000.0, 0.0),
    });
    let ship = add_ship(&mut u, 100.0, 100.0, 0.0);

    u.tick(1.0);
    let (task, target) = ship_state(&u, ship);
    assert_eq!(task, ShipTask::Travel);
    assert_eq!(target, Some(miner), "Miners outrank a nearer command center");
}

#[test]
fn test_enemy_ship_without_targets_waits() {
    let mut u = universe();
    let ship = add_ship(&mut u, 100.0, 100.0, 45.0);
    u.tick(1.0);
    assert_eq!(ship_state(&u, ship), (ShipTask::Nothing, None));
    assert_eq!(u.position(ship), Some(Vec2::new(100.0, 100.0)));
}

#[test]
fn test_enemy_ship_target_removed_returns_to_nothing() {
    let mut u = universe();
    let cc = u.add_object(Blueprint::CommandCenter {
        position: Vec2::ZERO,
    });
    let ship = add_ship(&mut u, 3000.0, 0.0, 180.0);

    u.tick(1.0);
    assert_eq!(ship_state(&u, ship), (ShipTask::Travel, Some(cc)));

    u.during_tick(|u| u.remove_object(cc));
    assert_eq!(ship_state(&u, ship), (ShipTask::Nothing, None));

    u.tick(1.0);
    assert_eq!(ship_state(&u, ship).0, ShipTask::Nothing);
}

// ---- Bullets ----

#[test]
fn test_bullet_damages_first_structure_and_is_removed() {
    let mut u = universe();
    let relay = add_relay(&mut u, 20.0, 0.0);
    let bullet = u.add_object(Blueprint::Bullet {
        position: Vec2::ZERO,
        heading: 0.0,
        speed: 10.0,
    });

    u.tick(1.0);
    assert_eq!(u.hit_points(relay), Some(500 - BULLET_DAMAGE));
    assert!(!u.is_live(bullet));
}

#[test]
fn test_bullet_expires_beyond_range() {
    let mut u = universe();
    let bullet = u.add_object(Blueprint::Bullet {
        position: Vec2::ZERO,
        heading: 0.0,
        speed: 100.0,
    });
    for _ in 0..14 {
        u.tick(1.0);
    }
    assert!(u.is_live(bullet));
    u.tick(1.0);
    u.tick(1.0);
    assert!(!u.is_live(bullet));
}

// ---- Turrets ----

#[test]
fn test_turret_spawns_three_missiles_on_its_rail() {
    let mut u = universe();
    let turret = u.add_object(Blueprint::Turret {
        position: Vec2::ZERO,
    });
    assert_eq!(u.count_of(ObjectType::Missile), TURRET_MISSILE_COUNT);

    let missiles = turret_missiles(&u, turret);
    let expected = [
        Vec2::new(0.0, -TURRET_RAIL_SPACING),
        Vec2::ZERO,
        Vec2::new(0.0, TURRET_RAIL_SPACING),
    ];
    for (missile, want) in missiles.iter().zip(expected) {
        assert_eq!(u.missile_task(*missile), Some(MissileTask::Idle));
        let at = u.position(*missile).unwrap();
        assert!(at.distance(want) < 1e-4, "missile at {at}, expected {want}");
    }
}

#[test]
fn test_turret_replaces_removed_missile() {
    let mut u = universe();
    let turret = u.add_object(Blueprint::Turret {
        position: Vec2::ZERO,
    });
    let lost = turret_missiles(&u, turret)[0];

    u.remove_object(lost);
    assert_eq!(u.count_of(ObjectType::Missile), TURRET_MISSILE_COUNT);
    let replacement = turret_missiles(&u, turret)[0];
    assert_ne!(replacement, lost);
    assert_eq!(u.missile_task(replacement), Some(MissileTask::Idle));

    u.tick(1.0);
    assert_eq!(u.count_of(ObjectType::Missile), TURRET_MISSILE_COUNT);
}

#[test]
fn test_turret_replaces_missile_removed_mid_tick() {
    let mut u = universe();
    let turret = u.add_object(Blueprint::Turret {
        position: Vec2::ZERO,
    });
    let lost = turret_missiles(&u, turret)[2];

    u.during_tick(|u| u.remove_object(lost));
    u.tick(1.0);
    assert_eq!(u.count_of(ObjectType::Missile), TURRET_MISSILE_COUNT);
    assert!(!turret_missiles(&u, turret).contains(&lost));
}

#[test]
fn test_turret_removal_takes_unlaunched_missiles() {
    let mut u = universe();
    let turret = u.add_object(Blueprint::Turret {
        position: Vec2::ZERO,
    });
    u.remove_object(turret);
    assert_eq!(u.count_of(ObjectType::Missile), 0);
    assert!(u.is_empty());
    assert!(u.bus().is_empty());
}

#[test]
fn test_turret_sweeps_while_idle() {
    let mut u = universe();
    let turret = u.add_object(Blueprint::Turret {
        position: Vec2::ZERO,
    });
    u.tick(1.0);
    u.tick(1.0);
    let heading = u.heading(turret).unwrap();
    assert!((heading - 2.0 * TURRET_SCAN_RATE).abs() < 1e-4);
    let middle = turret_missiles(&u, turret)[1];
    assert_eq!(u.heading(middle), Some(heading), "Rail missiles follow the turret");
}

#[test]
fn test_turret_engages_and_launches() {
    let mut u = universe();
    let turret = u.add_object(Blueprint::Turret {
        position: Vec2::ZERO,
    });
    add_ship(&mut u, 2000.0, 0.0, 0.0);

    let mut launched = false;
    for _ in 0..150 {
        u.tick(1.0);
        let events = u.take_events();
        if events
            .iter()
            .any(|e| matches!(e, UniverseEvent::MissileLaunched { .. }))
        {
            launched = true;
            break;
        }
    }
    assert!(launched, "Turret should launch within its fire interval");
    let task = u.inspect(turret, |b| b.agent_view()).flatten();
    assert_eq!(
        task,
        Some(starbase_core::state::AgentView::Turret(TurretTask::Attacking))
    );
    let in_flight = turret_missiles(&u, turret)
        .iter()
        .filter(|&&m| u.missile_task(m).is_some_and(|t| t.is_launched()))
        .count();
    assert_eq!(in_flight, 1);
}

#[test]
fn test_turret_stands_down_when_target_removed() {
    let mut u = universe();
    let turret = u.add_object(Blueprint::Turret {
        position: Vec2::ZERO,
    });
    let ship = add_ship(&mut u, 1000.0, 0.0, 0.0);
    u.tick(1.0);
    let attacking = u.inspect(turret, |b| b.agent_view()).flatten();
    assert_eq!(
        attacking,
        Some(starbase_core::state::AgentView::Turret(TurretTask::Attacking))
    );

    u.remove_object(ship);
    let idle = u.inspect(turret, |b| b.agent_view()).flatten();
    assert_eq!(
        idle,
        Some(starbase_core::state::AgentView::Turret(TurretTask::Idle))
    );
}

// ---- Missiles ----

fn launch_standalone(u: &mut Universe, at: Vec2, target: Entity) -> Entity {
    let missile = u.add_object(Blueprint::Missile {
        position: at,
        heading: 0.0,
    });
    assert!(u.launch_missile(missile, missile, target));
    missile
}

#[test]
fn test_missile_launches_only_once() {
    let mut u = universe();
    let ship = add_ship(&mut u, 500.0, 0.0, 0.0);
    let missile = launch_standalone(&mut u, Vec2::ZERO, ship);
    assert_eq!(u.missile_task(missile), Some(MissileTask::Launching));
    assert!(!u.launch_missile(missile, missile, ship));
}

#[test]
fn test_missile_hits_ship_in_radius() {
    let mut u = universe();
    // No structures, so the ship holds still
    let ship = add_ship(&mut u, 15.0, 0.0, 0.0);
    let missile = launch_standalone(&mut u, Vec2::ZERO, ship);

    u.tick(1.0);
    assert_eq!(u.hit_points(ship), Some(SHIP_HIT_POINTS - MISSILE_DAMAGE));
    assert!(!u.is_live(missile), "Missile detonates on the hit");
}

#[test]
fn test_missile_tracks_toward_target() {
    let mut u = universe();
    let ship = add_ship(&mut u, 0.0, 500.0, 0.0);
    let missile = launch_standalone(&mut u, Vec2::ZERO, ship);

    u.tick(1.0);
    assert_eq!(u.missile_task(missile), Some(MissileTask::Tracking));
    assert!((u.heading(missile).unwrap() - MISSILE_TURN_RATE).abs() < 1e-4);
    assert!((u.position(missile).unwrap().length() - MISSILE_SPEED).abs() < 1e-3);
}

#[test]
fn test_missile_self_destructs_when_target_removed() {
    let mut u = universe();
    let ship = add_ship(&mut u, 500.0, 0.0, 0.0);
    let missile = launch_standalone(&mut u, Vec2::ZERO, ship);
    u.tick(1.0);
    assert!(u.is_live(missile));

    u.during_tick(|u| u.remove_object(ship));
    assert!(!u.is_live(missile), "Missile goes down with its target");
    assert!(u.position(missile).is_none());
    u.tick(1.0);
    assert!(u.is_empty());
}

#[test]
fn test_missile_flight_clock_restarts_at_zero() {
    let entities = spawn_entities(2);
    let mut bus = NotificationBus::new();
    let mut missile = Missile::new(bus.subscribe(entities[0]));
    assert!(missile.launch_at(entities[1]));

    for _ in 0..251 {
        assert!(!missile.advance_flight_clock(1.0));
    }
    assert!(missile.advance_flight_clock(1.0));
    assert_eq!(missile.time_since_launch(), 0.0);
}

#[test]
fn test_missile_expires_after_flight_budget() {
    let mut u = universe();
    let ship = add_ship(&mut u, 100_000.0, 0.0, 0.0);
    let missile = launch_standalone(&mut u, Vec2::ZERO, ship);
    for _ in 0..260 {
        u.tick(1.0);
    }
    assert!(!u.is_live(missile));
    assert_eq!(u.hit_points(ship), Some(SHIP_HIT_POINTS));
}

// ---- Placement ----

#[test]
fn test_placement_commit_charges_minerals() {
    let mut u = universe();
    let mut placement = Placement::new();
    placement
        .begin(ObjectType::Turret, Vec2::new(100.0, 100.0))
        .unwrap();
    assert!(u.is_empty(), "Ghosts are not in the universe");
    placement.move_to(Vec2::new(200.0, 200.0)).unwrap();

    let turret = placement.commit(&mut u).unwrap();
    assert_eq!(u.kind(turret), Some(ObjectType::Turret));
    assert_eq!(u.position(turret), Some(Vec2::new(200.0, 200.0)));
    assert_eq!(u.minerals(), 5000 - 1000);
    assert!(!placement.is_placing());
}

#[test]
fn test_placement_insufficient_minerals_keeps_ghost() {
    let mut u = Universe::new(SimConfig {
        starting_minerals: 500,
        ..Default::default()
    });
    let mut placement = Placement::new();
    placement.begin(ObjectType::Miner, Vec2::ZERO).unwrap();

    let err = placement.commit(&mut u).unwrap_err();
    assert_eq!(
        err,
        SimError::InsufficientMinerals {
            needed: 1500,
            available: 500
        }
    );
    assert!(placement.is_placing());
    assert!(u.is_empty());
    assert_eq!(u.minerals(), 500);
}

#[test]
fn test_placement_free_when_costs_disabled() {
    let mut u = Universe::new(SimConfig {
        starting_minerals: 0,
        charge_placement_costs: false,
        ..Default::default()
    });
    let mut placement = Placement::new();
    placement.begin(ObjectType::PowerRelay, Vec2::ZERO).unwrap();
    placement.commit(&mut u).unwrap();
    assert_eq!(u.minerals(), 0);
    assert_eq!(u.count_of(ObjectType::PowerRelay), 1);
}

#[test]
fn test_placement_cancel_adds_nothing() {
    let mut u = universe();
    let mut placement = Placement::new();
    placement.begin(ObjectType::Miner, Vec2::ZERO).unwrap();
    let ghost = placement.cancel().unwrap();
    assert_eq!(ghost.kind, ObjectType::Miner);
    assert_eq!(placement.commit(&mut u), Err(SimError::NoGhost));
    assert!(u.is_empty());
}

#[test]
fn test_placement_rejects_non_structures() {
    let mut placement = Placement::new();
    assert_eq!(
        placement.begin(ObjectType::EnemyShip, Vec2::ZERO),
        Err(SimError::NotPlaceable(ObjectType::EnemyShip))
    );
    assert_eq!(placement.move_to(Vec2::ONE), Err(SimError::NoGhost));
    assert!(placement.ghost_bounds().is_none());
}

#[test]
fn test_ghost_bounds_follow_position() {
    let mut placement = Placement::new();
    placement.begin(ObjectType::PowerRelay, Vec2::ZERO).unwrap();
    placement.move_to(Vec2::new(100.0, 0.0)).unwrap();
    let bounds = placement.ghost_bounds().unwrap();
    assert_eq!(bounds.center(), Vec2::new(100.0, 0.0));
    assert_eq!(bounds.max - bounds.min, Vec2::splat(2.0 * POWER_RELAY_HALF_EXTENT));
}

// ---- Config ----

#[test]
fn test_config_from_toml_fills_defaults() {
    let config = SimConfig::from_toml_str("seed = 7\nstarting_minerals = 100\n").unwrap();
    assert_eq!(config.seed, 7);
    assert_eq!(config.starting_minerals, 100);
    assert!(config.charge_placement_costs);
}

#[test]
fn test_config_parse_error() {
    let err = SimConfig::from_toml_str("seed = \"seven\"").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_config_missing_file() {
    let err = SimConfig::load("/nonexistent/starbase.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

// ---- Events and snapshots ----

#[test]
fn test_events_record_lifecycle() {
    let mut u = universe();
    let rock = add_asteroid(&mut u, 0.0, 0.0, 100);
    u.remove_object(rock);
    let events = u.take_events();
    assert_eq!(
        events,
        vec![
            UniverseEvent::ObjectAdded {
                id: object_id(rock),
                kind: ObjectType::Asteroid
            },
            UniverseEvent::ObjectRemoved {
                id: object_id(rock),
                kind: ObjectType::Asteroid
            },
        ]
    );
    assert!(u.take_events().is_empty());
}

#[test]
fn test_snapshot_reflects_outpost() {
    let mut u = universe();
    let outpost = world_setup::setup_outpost(&mut u);
    u.tick(1.0);
    let snapshot = u.snapshot();

    assert_eq!(snapshot.objects.len(), u.len());
    assert_eq!(snapshot.links.len(), u.links().len());
    assert_eq!(snapshot.time.tick, 1);

    let cc = snapshot
        .objects
        .iter()
        .find(|o| o.id == object_id(outpost.command_center))
        .unwrap();
    assert_eq!(cc.texture, TextureKey::CommandCenter);
    assert_eq!(cc.hit_points, Some(5000));

    let rock = snapshot
        .objects
        .iter()
        .find(|o| o.kind == ObjectType::Asteroid)
        .unwrap();
    assert!(rock.minerals.is_some());
    assert!(rock.hit_points.is_none());
    assert!(rock.spin.is_some_and(|spin| spin.abs() <= ASTEROID_MAX_SPIN));
    assert!(cc.spin.is_none(), "Only asteroids spin");
}

#[test]
fn test_outpost_grid() {
    let mut u = universe();
    let outpost = world_setup::setup_outpost(&mut u);
    let graph = u.link_graph();
    assert!(graph.contains(outpost.relays[0], outpost.relays[1]));
    assert!(graph.contains(outpost.miner, outpost.relays[0]));
    assert!(graph.contains(outpost.turret, outpost.relays[1]));
    assert_eq!(graph.len(), 3);
}

// ---- Determinism ----

fn run_session(seed: u64, ticks: usize) -> Vec<String> {
    let mut u = Universe::new(SimConfig {
        seed,
        ..Default::default()
    });
    world_setup::setup_outpost(&mut u);
    world_setup::spawn_raid(&mut u, 3, 2000.0);
    (0..ticks)
        .map(|_| {
            u.tick(1.0);
            serde_json::to_string(&u.snapshot()).unwrap()
        })
        .collect()
}

#[test]
fn test_determinism_same_seed() {
    let a = run_session(12345, 300);
    let b = run_session(12345, 300);
    for (tick, (snap_a, snap_b)) in a.iter().zip(&b).enumerate() {
        assert_eq!(snap_a, snap_b, "Snapshots diverged at tick {tick}");
    }
}

#[test]
fn test_different_seeds_diverge() {
    let a = run_session(111, 1);
    let b = run_session(222, 1);
    assert_ne!(a, b, "Seeded asteroid fields should differ");
}

// ---- Whole-session invariants ----

#[test]
fn test_long_session_keeps_registry_consistent() {
    let mut u = universe();
    world_setup::setup_outpost(&mut u);
    for wave in 0..3 {
        world_setup::spawn_raid(&mut u, 2 + wave, 2500.0);
        for _ in 0..400 {
            u.tick(1.0);

            let live: Vec<Entity> = u.objects().collect();
            for link in u.links() {
                assert!(live.contains(&link.source) && live.contains(&link.destination));
            }
            for &turret in live
                .iter()
                .filter(|&&e| u.kind(e) == Some(ObjectType::Turret))
            {
                for missile in turret_missiles(&u, turret) {
                    assert!(u.is_live(missile), "Rail slots always resolve");
                }
            }
        }
    }

    u.clear();
    assert!(u.is_empty());
    assert!(u.bus().is_empty());
    assert!(u.links().is_empty());
}
