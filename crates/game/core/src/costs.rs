//! Purchase and upgrade price formulas.
use serde::{Deserialize, Serialize};

/// Linear price formula: `price(count) = base + multiply * count`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cost {
    pub base: i64,
    pub multiply: i64,
}

impl Cost {
    pub const fn new(base: i64, multiply: i64) -> Self {
        Self { base, multiply }
    }

    /// Price of the next purchase given how many the player already holds.
    /// Pure and total; callers are trusted not to supply nonsense values.
    pub const fn price(&self, count: i64) -> i64 {
        self.base + self.multiply * count
    }
}

/// The six independent cost entries, one per purchasable attribute. All six
/// are overwritten atomically by the initial load message; the defaults below
/// match the server's table and only matter before the load arrives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Costs {
    pub new_tile: Cost,
    pub defence: Cost,
    pub offence: Cost,
    pub productivity: Cost,
    pub attack_range: Cost,
    pub attack: Cost,
}

impl Default for Costs {
    fn default() -> Self {
        Self {
            new_tile: Cost::new(15, 0),
            defence: Cost::new(5, 0),
            offence: Cost::new(20, 1),
            productivity: Cost::new(10, 1),
            attack_range: Cost::new(25, 5),
            attack: Cost::new(4, 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_is_linear_in_count() {
        let cost = Cost::new(25, 5);
        for count in 0..32 {
            assert_eq!(cost.price(count + 1) - cost.price(count), cost.multiply);
        }
        assert_eq!(cost.price(0), 25);
        assert_eq!(cost.price(3), 40);
    }

    #[test]
    fn flat_cost_ignores_count() {
        let cost = Cost::new(15, 0);
        assert_eq!(cost.price(0), 15);
        assert_eq!(cost.price(100), 15);
    }

    #[test]
    fn default_table_matches_server() {
        let costs = Costs::default();
        assert_eq!(costs.new_tile, Cost::new(15, 0));
        assert_eq!(costs.defence, Cost::new(5, 0));
        assert_eq!(costs.offence, Cost::new(20, 1));
        assert_eq!(costs.productivity, Cost::new(10, 1));
        assert_eq!(costs.attack_range, Cost::new(25, 5));
        assert_eq!(costs.attack, Cost::new(4, 1));
    }
}
