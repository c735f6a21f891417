//! Mineable asteroid.

use hecs::Entity;

use starbase_core::steering::wrap_degrees;

use crate::universe::Universe;

#[derive(Debug, Clone, PartialEq)]
pub struct Asteroid {
    minerals: i32,
    /// Render-only rotation, degrees per adjustment unit.
    spin: f32,
}

impl Asteroid {
    pub fn new(minerals: i32, spin: f32) -> Self {
        Self { minerals, spin }
    }

    pub fn minerals(&self) -> i32 {
        self.minerals
    }

    pub fn spin(&self) -> f32 {
        self.spin
    }

    /// Extract up to `amount` minerals.
    ///
    /// Returns what was mined and whether this call took the asteroid below
    /// zero. The full `amount` is always subtracted; the yield never goes
    /// negative.
    pub fn mine(&mut self, amount: i32) -> (i32, bool) {
        let was_intact = self.minerals >= 0;
        let mined = self.minerals.min(amount).max(0);
        self.minerals -= amount;
        (mined, was_intact && self.minerals < 0)
    }

    pub(crate) fn tick(&mut self, me: Entity, universe: &mut Universe, adjustment: f32) {
        if let Some(heading) = universe.heading(me) {
            universe.set_heading(me, wrap_degrees(heading + self.spin * adjustment));
        }
    }
}
