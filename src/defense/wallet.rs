//! Attack points
//!
//! The player pays for every attack and loses points when a monster gets
//! through. At zero the run is over until the wallet is refilled.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointWallet {
    points: u32,
    refill_to: u32,
}

impl PointWallet {
    pub fn new(starting: u32, refill_to: u32) -> Self {
        Self {
            points: starting,
            refill_to,
        }
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn can_afford(&self, cost: u32) -> bool {
        self.points >= cost
    }

    /// Pay `cost` if possible; leaves the balance untouched otherwise
    pub fn try_spend(&mut self, cost: u32) -> bool {
        if !self.can_afford(cost) {
            return false;
        }
        self.points -= cost;
        true
    }

    pub fn earn(&mut self, amount: u32) {
        self.points = self.points.saturating_add(amount);
    }

    /// Lose points, never below zero
    pub fn drain(&mut self, amount: u32) {
        self.points = self.points.saturating_sub(amount);
    }

    pub fn is_depleted(&self) -> bool {
        self.points == 0
    }

    pub fn refill(&mut self) {
        self.points = self.refill_to;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spend_requires_full_cost() {
        let mut w = PointWallet::new(10, 100);
        assert!(w.try_spend(10));
        assert_eq!(w.points(), 0);
        assert!(!w.try_spend(10));
        assert_eq!(w.points(), 0);
        assert!(w.is_depleted());
    }

    #[test]
    fn test_drain_clamps_and_refill_restores() {
        let mut w = PointWallet::new(10, 100);
        w.earn(5);
        w.drain(40);
        assert_eq!(w.points(), 0);
        w.refill();
        assert_eq!(w.points(), 100);
    }
}
