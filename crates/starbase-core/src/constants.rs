//! Simulation constants and tuning parameters.
//!
//! Distances are world units, angles are degrees, and timers count frame
//! adjustments (1.0 per nominal frame).

/// Frames per second the per-tick rates are tuned for.
pub const NOMINAL_FRAME_RATE: f32 = 60.0;

// --- Economy ---

/// Power produced by a command center each tick.
pub const COMMAND_CENTER_POWER_OUTPUT: i32 = 1000;

/// Minerals in a freshly spawned asteroid when none is specified.
pub const ASTEROID_DEFAULT_MINERALS: i32 = 1000;

/// Asteroids below this many minerals render as partially mined.
pub const ASTEROID_PARTIAL_THRESHOLD: i32 = 700;

/// Asteroids below this many minerals render as nearly depleted.
pub const ASTEROID_DEPLETED_THRESHOLD: i32 = 400;

/// Maximum asteroid spin, degrees per tick either way.
pub const ASTEROID_MAX_SPIN: f32 = 0.5;

// --- Power grid ---

/// Relays link to every other relay within this range.
pub const RELAY_LINK_RANGE: f32 = 1000.0;

/// Non-relay structures link to the nearest relay within this range.
pub const STRUCTURE_LINK_RANGE: f32 = 500.0;

// --- Miner ---

/// Asteroids within this range of a miner are mined.
pub const MINER_RANGE: f32 = 500.0;

/// Adjustment units between mining passes.
pub const MINER_INTERVAL: f32 = 100.0;

/// Minerals extracted from each asteroid per pass.
pub const MINER_YIELD: i32 = 10;

// --- Turret ---

/// Missile slots on a turret rail.
pub const TURRET_MISSILE_COUNT: usize = 3;

/// Range at which an idle turret acquires an enemy ship.
pub const TURRET_ACQUISITION_RANGE: f32 = 2500.0;

/// Idle rail sweep, degrees per adjustment unit.
pub const TURRET_SCAN_RATE: f32 = 1.0;

/// Adjustment units between missile launches.
pub const TURRET_FIRE_INTERVAL: f32 = 100.0;

/// Lateral spacing between rail slots.
pub const TURRET_RAIL_SPACING: f32 = 15.0;

// --- Missile ---

/// Maximum missile turn per tick (degrees).
pub const MISSILE_TURN_RATE: f32 = 5.0;

/// Missile speed per tick.
pub const MISSILE_SPEED: f32 = 10.0;

/// A missile detonates when any enemy ship is this close.
pub const MISSILE_HIT_RADIUS: f32 = 10.0;

/// Damage a missile delivers to its target.
pub const MISSILE_DAMAGE: i32 = 50;

/// Adjustment units a missile flies before self-destructing.
pub const MISSILE_FLIGHT_BUDGET: f32 = 250.0;

// --- Bullet ---

/// A bullet hits the first structure this close.
pub const BULLET_HIT_RADIUS: f32 = 10.0;

/// Bullets expire beyond this distance from where they were fired.
pub const BULLET_RANGE: f32 = 1500.0;

/// Damage a bullet delivers to the structure it hits.
pub const BULLET_DAMAGE: i32 = 25;

/// Bullet speed as a multiple of the firing ship's speed.
pub const BULLET_SPEED_FACTOR: f32 = 2.0;

// --- Enemy ship ---

/// Enemy ship hit points.
pub const SHIP_HIT_POINTS: i32 = 250;

/// Maximum ship turn per tick (degrees).
pub const SHIP_TURN_RATE: f32 = 1.5;

/// Speed while travelling and egressing.
pub const SHIP_TRAVEL_SPEED: f32 = 5.0;

/// Speed during an attack run.
pub const SHIP_ATTACK_SPEED: f32 = 3.0;

/// Distance to the way-point at which an attack run starts.
pub const SHIP_ENGAGEMENT_RANGE: f32 = 750.0;

/// Adjustment units between shots.
pub const SHIP_FIRE_INTERVAL: f32 = 100.0;

/// Egress turn rate as a fraction of the normal turn rate.
pub const SHIP_EGRESS_TURN_FACTOR: f32 = 1.0 / 3.0;

/// Egress ends once this many engagement ranges from the way-point.
pub const SHIP_EGRESS_RANGE_FACTOR: f32 = 1.5;

// --- Bounds (half extents) ---

pub const COMMAND_CENTER_HALF_EXTENT: f32 = 100.0;
pub const POWER_RELAY_HALF_EXTENT: f32 = 40.0;
pub const MINER_HALF_EXTENT: f32 = 60.0;
pub const TURRET_HALF_EXTENT: f32 = 50.0;
pub const ASTEROID_HALF_EXTENT: f32 = 64.0;
pub const SHIP_HALF_EXTENT: f32 = 30.0;
pub const MISSILE_HALF_EXTENT: f32 = 8.0;
pub const BULLET_HALF_EXTENT: f32 = 4.0;
