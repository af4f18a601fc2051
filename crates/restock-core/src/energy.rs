//! Energy budget: supply versus demand with a binary powered state.
//!
//! Each node declares a fixed per-tick energy usage; the network sums the
//! usage of its connected nodes and compares it against the budget's
//! capacity. There is no partial satisfaction -- a network that cannot cover
//! its demand runs no node updates at all.

use serde::{Deserialize, Serialize};

/// Available energy supply for one network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnergyBudget {
    /// Energy available per tick.
    pub capacity: u32,
}

impl EnergyBudget {
    pub fn new(capacity: u32) -> Self {
        Self { capacity }
    }

    /// Whether the given demand is fully covered.
    pub fn is_powered(&self, demand: u32) -> bool {
        demand <= self.capacity
    }

    /// Remaining capacity after the given demand, `None` when over budget.
    pub fn headroom(&self, demand: u32) -> Option<u32> {
        self.capacity.checked_sub(demand)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn powered_iff_demand_covered() {
        let budget = EnergyBudget::new(100);
        assert!(budget.is_powered(0));
        assert!(budget.is_powered(100));
        assert!(!budget.is_powered(101));
    }

    #[test]
    fn headroom_reports_slack() {
        let budget = EnergyBudget::new(50);
        assert_eq!(budget.headroom(30), Some(20));
        assert_eq!(budget.headroom(50), Some(0));
        assert_eq!(budget.headroom(60), None);
    }
}
