//! The universe: registry and frame driver for every object in play.
//!
//! `Universe` owns the hecs world, keeps live objects in a list sorted by
//! `ObjectType`, and ticks them in that order. Objects may add, remove and
//! query other objects from inside their own tick: additions and removals
//! requested while ticking are staged and applied once the tick loop is
//! over, so the live list never changes under iteration.

use glam::Vec2;
use hecs::{Entity, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use starbase_core::constants::{ASTEROID_MAX_SPIN, MINER_RANGE, TURRET_MISSILE_COUNT};
use starbase_core::enums::{MissileTask, ObjectType};
use starbase_core::events::UniverseEvent;
use starbase_core::profiles::initial_hit_points;
use starbase_core::state::UniverseSnapshot;
use starbase_core::steering::distance_between;
use starbase_core::types::{Rect, SimTime};

use crate::bus::NotificationBus;
use crate::config::SimConfig;
use crate::links::{self, Link, LinkGraph};
use crate::objects::turret::rail_offset;
use crate::objects::{
    object_id, Asteroid, Behavior, Body, Bullet, EnemyShip, Hull, Miner, Missile, Blueprint,
    Reaction, Turret,
};
use crate::snapshot;

/// Entry in the type-sorted live list.
#[derive(Debug, Clone, Copy)]
struct LiveObject {
    kind: ObjectType,
    entity: Entity,
}

/// Extra work after an object moves.
enum MoveHook {
    RescanAsteroids,
    SeatMissiles([Entity; TURRET_MISSILE_COUNT]),
}

/// Owns every object and advances them once per frame.
pub struct Universe {
    world: World,
    /// Live objects, stably sorted by kind.
    objects: Vec<LiveObject>,
    pending_add: Vec<Entity>,
    pending_remove: Vec<Entity>,
    /// Objects whose removal is in progress, to ignore re-entrant requests.
    finalizing: Vec<Entity>,
    ticking: bool,
    bus: NotificationBus,
    links: LinkGraph,
    power: i32,
    minerals: i32,
    time: SimTime,
    rng: ChaCha8Rng,
    events: Vec<UniverseEvent>,
    config: SimConfig,
}

impl Default for Universe {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}

impl Universe {
    /// Create an empty universe with the given config.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            objects: Vec::new(),
            pending_add: Vec::new(),
            pending_remove: Vec::new(),
            finalizing: Vec::new(),
            ticking: false,
            bus: NotificationBus::new(),
            links: LinkGraph::new(),
            power: 0,
            minerals: config.starting_minerals,
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            events: Vec::new(),
            config,
        }
    }

    // --- Lifecycle ---

    /// Create an object from `blueprint` and add it.
    ///
    /// While ticking, the object is staged and only joins the live list
    /// after the tick; it is neither ticked nor visible to queries before
    /// then. Its handle is valid immediately.
    pub fn add_object(&mut self, blueprint: Blueprint) -> Entity {
        let kind = blueprint.kind();
        let body = Body::new(kind, blueprint.position(), blueprint.heading());
        let entity = match initial_hit_points(kind) {
            Some(hit_points) => self
                .world
                .spawn((body, Hull { hit_points }, Behavior::Inert)),
            None => self.world.spawn((body, Behavior::Inert)),
        };

        let behavior = self.build_behavior(entity, blueprint);
        let missiles = match &behavior {
            Behavior::Turret(turret) => Some(turret.missiles()),
            _ => None,
        };
        if let Ok(slot) = self.world.query_one_mut::<&mut Behavior>(entity) {
            *slot = behavior;
        }
        if let Some(missiles) = missiles {
            self.seat_missiles(entity, &missiles);
        }

        self.emit(UniverseEvent::ObjectAdded {
            id: object_id(entity),
            kind,
        });
        if self.ticking {
            log::debug!("staging {kind:?} {entity:?} for addition");
            self.pending_add.push(entity);
        } else {
            self.insert_live(entity);
        }
        entity
    }

    fn build_behavior(&mut self, entity: Entity, blueprint: Blueprint) -> Behavior {
        match blueprint {
            Blueprint::Asteroid { minerals, .. } => {
                let spin = self.rng.gen_range(-ASTEROID_MAX_SPIN..=ASTEROID_MAX_SPIN);
                Behavior::Asteroid(Asteroid::new(minerals, spin))
            }
            Blueprint::CommandCenter { .. } | Blueprint::PowerRelay { .. } => {
                Behavior::Structure
            }
            Blueprint::Miner { position } => {
                let subscription = self.bus.subscribe(entity);
                let asteroids = self.asteroids_near(position, None);
                Behavior::Miner(Miner::new(subscription, asteroids))
            }
            Blueprint::Turret { position } => {
                let subscription = self.bus.subscribe(entity);
                let missiles = std::array::from_fn(|_| {
                    self.add_object(Blueprint::Missile {
                        position,
                        heading: 0.0,
                    })
                });
                Behavior::Turret(Turret::new(subscription, missiles))
            }
            Blueprint::EnemyShip { .. } => {
                let subscription = self.bus.subscribe(entity);
                Behavior::EnemyShip(EnemyShip::new(subscription))
            }
            Blueprint::Bullet {
                position, speed, ..
            } => Behavior::Bullet(Bullet::new(position, speed)),
            Blueprint::Missile { .. } => {
                let subscription = self.bus.subscribe(entity);
                Behavior::Missile(Missile::new(subscription))
            }
        }
    }

    /// Remove an object.
    ///
    /// While ticking the request is staged until the tick loop ends.
    /// Otherwise it takes effect now: subscribers are notified while the
    /// object is still present, then it leaves the live list and the link
    /// graph, then its behavior is torn down and its storage released.
    pub fn remove_object(&mut self, entity: Entity) {
        if self.ticking {
            log::debug!("staging {entity:?} for removal");
            self.pending_remove.push(entity);
        } else {
            self.finalize_removal(entity);
        }
    }

    fn finalize_removal(&mut self, entity: Entity) {
        if self.finalizing.contains(&entity) {
            log::warn!("remove_object: {entity:?} is already being removed");
            return;
        }
        let staged = self.pending_add.contains(&entity);
        if !staged && !self.is_live(entity) {
            log::error!("remove_object: {entity:?} is not in the universe");
            return;
        }
        let kind = self.kind(entity).unwrap_or_default();
        log::debug!("removing {kind:?} {entity:?}");
        self.finalizing.push(entity);

        // 1. Notify while the object can still be resolved
        for subscriber in self.bus.subscribers() {
            self.notify_removed(subscriber, entity);
        }

        // 2. Leave the live list and the grid
        if let Some(index) = self.objects.iter().position(|o| o.entity == entity) {
            self.objects.remove(index);
        }
        self.pending_add.retain(|&e| e != entity);
        self.links.prune(entity);

        // 3. Tear down and release
        if let Ok(behavior) = self.world.remove_one::<Behavior>(entity) {
            behavior.teardown(self);
        }
        assert!(
            !self.bus.is_subscribed(entity),
            "{kind:?} {entity:?} released while still subscribed to removal notifications"
        );
        if self.world.despawn(entity).is_err() {
            log::warn!("remove_object: {entity:?} storage was already released");
        }

        self.finalizing.retain(|&e| e != entity);
        self.emit(UniverseEvent::ObjectRemoved {
            id: object_id(entity),
            kind,
        });
    }

    fn notify_removed(&mut self, subscriber: Entity, removed: Entity) {
        // Subscribers released earlier in this dispatch no longer resolve
        let reaction = match self.world.query_one_mut::<&mut Behavior>(subscriber) {
            Ok(behavior) => behavior.on_object_removed(removed),
            Err(_) => return,
        };
        if let Some(reaction) = reaction {
            self.apply_reaction(subscriber, reaction);
        }
    }

    fn apply_reaction(&mut self, subscriber: Entity, reaction: Reaction) {
        match reaction {
            Reaction::SelfDestruct => self.remove_object(subscriber),
            Reaction::ReplaceMissile { slot } => self.replace_missile(subscriber, slot),
            Reaction::RescanAsteroids { excluding } => {
                self.rescan_asteroids(subscriber, Some(excluding))
            }
        }
    }

    fn insert_live(&mut self, entity: Entity) {
        let Some(body) = self.body(entity) else {
            log::warn!("{entity:?} was released before joining the universe");
            return;
        };
        let index = self.objects.partition_point(|o| o.kind <= body.kind);
        self.objects.insert(
            index,
            LiveObject {
                kind: body.kind,
                entity,
            },
        );
        log::debug!("added {:?} {entity:?} at {}", body.kind, body.position);

        if body.kind.is_structure() {
            self.connect(entity, body);
        }
    }

    fn connect(&mut self, entity: Entity, body: Body) {
        let relays: Vec<(Entity, Vec2)> = self
            .objects
            .iter()
            .filter(|o| o.kind == ObjectType::PowerRelay && o.entity != entity)
            .filter_map(|o| self.position(o.entity).map(|p| (o.entity, p)))
            .collect();
        for (source, destination) in links::plan_links(entity, body.kind, body.position, &relays)
        {
            self.links.add(source, destination);
        }
    }

    /// Remove every object through the normal removal path.
    ///
    /// Removal runs front to back so structures go before their projectiles
    /// and no turret is left to replace a missile.
    pub fn clear(&mut self) {
        assert!(!self.ticking, "Universe::clear called during a tick");
        while let Some(first) = self.objects.first() {
            let entity = first.entity;
            self.finalize_removal(entity);
        }
        assert!(
            self.bus.is_empty(),
            "{} removal subscriptions outlived their objects",
            self.bus.len()
        );
    }

    // --- Frame ---

    /// Advance every live object by one frame.
    ///
    /// Power is rebuilt from zero each tick. Staged removals are applied
    /// before staged additions, each in request order.
    pub fn tick(&mut self, adjustment: f32) {
        assert!(!self.ticking, "Universe::tick is not re-entrant");
        self.power = 0;

        self.ticking = true;
        for index in 0..self.objects.len() {
            let entity = self.objects[index].entity;
            self.tick_object(entity, adjustment);
        }
        self.ticking = false;

        self.apply_staged();
        self.time.advance(adjustment);
    }

    /// Run one object's behavior with its state taken out of the world, so
    /// the behavior can borrow the universe mutably.
    fn tick_object(&mut self, entity: Entity, adjustment: f32) {
        let mut behavior = match self.world.query_one_mut::<&mut Behavior>(entity) {
            Ok(behavior) => std::mem::take(behavior),
            Err(_) => return,
        };
        behavior.tick(entity, self, adjustment);
        // Nothing is released while ticking, so the slot is still there
        if let Ok(slot) = self.world.query_one_mut::<&mut Behavior>(entity) {
            *slot = behavior;
        }
    }

    fn apply_staged(&mut self) {
        let removals = std::mem::take(&mut self.pending_remove);
        for entity in removals {
            self.finalize_removal(entity);
        }
        let additions = std::mem::take(&mut self.pending_add);
        for entity in additions {
            self.insert_live(entity);
        }
    }

    /// Run `f` as if from inside a tick, then apply whatever it staged.
    #[cfg(test)]
    pub(crate) fn during_tick<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.ticking = true;
        let result = f(self);
        self.ticking = false;
        self.apply_staged();
        result
    }

    // --- Queries ---

    /// Topmost object whose bounds contain `position`.
    ///
    /// Scans from the back, so later kinds win where bounds overlap.
    pub fn find_object_at(&self, position: Vec2) -> Option<Entity> {
        self.objects
            .iter()
            .rev()
            .find(|o| self.bounds(o.entity).is_some_and(|b| b.contains(position)))
            .map(|o| o.entity)
    }

    /// Objects of any of `types` within `radius` of `origin`, in registry order.
    pub fn find_objects_in_radius(
        &self,
        types: &[ObjectType],
        origin: Vec2,
        radius: f32,
    ) -> Vec<Entity> {
        self.objects
            .iter()
            .filter(|o| types.contains(&o.kind))
            .filter(|o| {
                self.position(o.entity)
                    .is_some_and(|p| distance_between(origin, p) <= radius)
            })
            .map(|o| o.entity)
            .collect()
    }

    /// Nearest object of `kind` no farther than `max_range`. Ties go to the
    /// object found first.
    pub fn find_closest_object_of_type(
        &self,
        origin: Vec2,
        kind: ObjectType,
        max_range: f32,
    ) -> Option<Entity> {
        let mut closest: Option<(Entity, f32)> = None;
        for object in self.objects.iter().filter(|o| o.kind == kind) {
            let Some(position) = self.position(object.entity) else {
                continue;
            };
            let distance = distance_between(origin, position);
            if distance > max_range {
                continue;
            }
            if closest.map_or(true, |(_, best)| distance < best) {
                closest = Some((object.entity, distance));
            }
        }
        closest.map(|(entity, _)| entity)
    }

    fn asteroids_near(&self, position: Vec2, excluding: Option<Entity>) -> Vec<Entity> {
        self.find_objects_in_radius(&[ObjectType::Asteroid], position, MINER_RANGE)
            .into_iter()
            .filter(|&asteroid| Some(asteroid) != excluding)
            .collect()
    }

    // --- Accessors ---

    /// Live objects in tick order.
    pub fn objects(&self) -> impl Iterator<Item = Entity> + '_ {
        self.objects.iter().map(|o| o.entity)
    }

    /// Number of live objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Whether `entity` is in the live list. Staged additions are not.
    pub fn is_live(&self, entity: Entity) -> bool {
        self.objects.iter().any(|o| o.entity == entity)
    }

    /// Live objects of `kind`, in registry order.
    pub fn count_of(&self, kind: ObjectType) -> usize {
        self.objects.iter().filter(|o| o.kind == kind).count()
    }

    pub fn body(&self, entity: Entity) -> Option<Body> {
        self.world.get::<&Body>(entity).ok().map(|body| *body)
    }

    pub fn kind(&self, entity: Entity) -> Option<ObjectType> {
        self.body(entity).map(|b| b.kind)
    }

    pub fn position(&self, entity: Entity) -> Option<Vec2> {
        self.body(entity).map(|b| b.position)
    }

    pub fn heading(&self, entity: Entity) -> Option<f32> {
        self.body(entity).map(|b| b.heading)
    }

    pub fn bounds(&self, entity: Entity) -> Option<Rect> {
        self.body(entity).map(|b| b.bounds())
    }

    pub fn hit_points(&self, entity: Entity) -> Option<i32> {
        self.world.get::<&Hull>(entity).ok().map(|hull| hull.hit_points)
    }

    pub fn asteroid_minerals(&self, entity: Entity) -> Option<i32> {
        self.inspect(entity, |behavior| match behavior {
            Behavior::Asteroid(asteroid) => Some(asteroid.minerals()),
            _ => None,
        })
        .flatten()
    }

    pub fn asteroid_spin(&self, entity: Entity) -> Option<f32> {
        self.inspect(entity, |behavior| match behavior {
            Behavior::Asteroid(asteroid) => Some(asteroid.spin()),
            _ => None,
        })
        .flatten()
    }

    pub fn missile_task(&self, entity: Entity) -> Option<MissileTask> {
        self.inspect(entity, |behavior| match behavior {
            Behavior::Missile(missile) => Some(missile.task()),
            _ => None,
        })
        .flatten()
    }

    /// Read an object's behavior. `None` if the handle no longer resolves.
    pub fn inspect<R>(&self, entity: Entity, f: impl FnOnce(&Behavior) -> R) -> Option<R> {
        self.world.get::<&Behavior>(entity).ok().map(|behavior| f(&*behavior))
    }

    /// Power balance accumulated so far this tick.
    pub fn power(&self) -> i32 {
        self.power
    }

    pub fn minerals(&self) -> i32 {
        self.minerals
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn links(&self) -> &[Link] {
        self.links.links()
    }

    pub fn link_graph(&self) -> &LinkGraph {
        &self.links
    }

    pub fn bus(&self) -> &NotificationBus {
        &self.bus
    }

    pub(crate) fn bus_mut(&mut self) -> &mut NotificationBus {
        &mut self.bus
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub(crate) fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    // --- Resources ---

    pub fn adjust_power(&mut self, delta: i32) {
        self.power += delta;
    }

    pub fn adjust_minerals(&mut self, delta: i32) {
        self.minerals += delta;
    }

    // --- Mutation on behalf of objects ---

    /// Move an object and run its move hook.
    pub fn move_object(&mut self, entity: Entity, position: Vec2) {
        match self.world.query_one_mut::<&mut Body>(entity) {
            Ok(body) => body.position = position,
            Err(_) => return,
        }

        let hook = match self.world.query_one_mut::<&Behavior>(entity) {
            Ok(Behavior::Miner(_)) => MoveHook::RescanAsteroids,
            Ok(Behavior::Turret(turret)) => MoveHook::SeatMissiles(turret.missiles()),
            _ => return,
        };
        match hook {
            MoveHook::RescanAsteroids => self.rescan_asteroids(entity, None),
            MoveHook::SeatMissiles(missiles) => self.seat_missiles(entity, &missiles),
        }
    }

    pub fn set_heading(&mut self, entity: Entity, heading: f32) {
        if let Ok(body) = self.world.query_one_mut::<&mut Body>(entity) {
            body.heading = heading;
        }
    }

    /// Apply projectile damage. Returns true if this hit destroyed the target,
    /// in which case its removal has been requested.
    pub fn shoot(&mut self, target: Entity, damage: i32) -> bool {
        let destroyed = match self.world.query_one_mut::<&mut Hull>(target) {
            Ok(hull) => hull.take_damage(damage),
            Err(_) => return false,
        };
        if destroyed {
            let kind = self.kind(target).unwrap_or_default();
            log::debug!("{kind:?} {target:?} destroyed");
            self.emit(UniverseEvent::ObjectDestroyed {
                id: object_id(target),
                kind,
            });
            self.remove_object(target);
        }
        destroyed
    }

    /// Mine up to `amount` from an asteroid. A mined-out asteroid is removed.
    pub fn mine_asteroid(&mut self, asteroid: Entity, amount: i32) -> i32 {
        let (mined, depleted) = match self.world.query_one_mut::<&mut Behavior>(asteroid) {
            Ok(Behavior::Asteroid(deposit)) => deposit.mine(amount),
            _ => return 0,
        };
        if depleted {
            self.emit(UniverseEvent::AsteroidDepleted {
                id: object_id(asteroid),
            });
            self.remove_object(asteroid);
        }
        mined
    }

    /// Launch a rail missile at `target`.
    pub fn launch_missile(&mut self, turret: Entity, missile: Entity, target: Entity) -> bool {
        let launched = match self.world.query_one_mut::<&mut Behavior>(missile) {
            Ok(Behavior::Missile(m)) => m.launch_at(target),
            _ => false,
        };
        if launched {
            log::debug!("turret {turret:?} launched {missile:?} at {target:?}");
            self.emit(UniverseEvent::MissileLaunched {
                turret: object_id(turret),
                missile: object_id(missile),
                target: object_id(target),
            });
        }
        launched
    }

    /// Line up a turret's idle missiles along its rail.
    pub(crate) fn seat_missiles(&mut self, turret: Entity, missiles: &[Entity]) {
        let Some(body) = self.body(turret) else {
            return;
        };
        for (slot, &missile) in missiles.iter().enumerate() {
            if self.missile_task(missile) != Some(MissileTask::Idle) {
                continue;
            }
            self.set_heading(missile, body.heading);
            self.move_object(missile, body.position + rail_offset(slot, body.heading));
        }
    }

    fn replace_missile(&mut self, turret: Entity, slot: usize) {
        let Some(body) = self.body(turret) else {
            return;
        };
        let missile = self.add_object(Blueprint::Missile {
            position: body.position,
            heading: body.heading,
        });
        let missiles = match self.world.query_one_mut::<&mut Behavior>(turret) {
            Ok(Behavior::Turret(t)) => {
                t.replace_missile(slot, missile);
                t.missiles()
            }
            _ => {
                self.remove_object(missile);
                return;
            }
        };
        self.seat_missiles(turret, &missiles);
    }

    fn rescan_asteroids(&mut self, miner: Entity, excluding: Option<Entity>) {
        let Some(position) = self.position(miner) else {
            return;
        };
        let asteroids = self.asteroids_near(position, excluding);
        if let Ok(Behavior::Miner(m)) = self.world.query_one_mut::<&mut Behavior>(miner) {
            m.set_asteroids(asteroids);
        }
    }

    // --- Events and snapshots ---

    pub(crate) fn emit(&mut self, event: UniverseEvent) {
        self.events.push(event);
    }

    /// Drain events recorded since the last call.
    pub fn take_events(&mut self) -> Vec<UniverseEvent> {
        std::mem::take(&mut self.events)
    }

    /// Snapshot of the current state, draining pending events into it.
    pub fn snapshot(&mut self) -> UniverseSnapshot {
        let events = self.take_events();
        snapshot::build_snapshot(self, events)
    }
}
