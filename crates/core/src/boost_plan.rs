//! Catalog of purchasable boost plans.

use serde::Serialize;

use crate::error::CoreError;

/// A purchasable boost: what it costs and what it buys.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoostPlan {
    pub key: &'static str,
    pub credits_required: i64,
    pub duration_hours: i32,
    pub multiplier: f64,
}

/// All plans offered to artists, cheapest first.
pub const BOOST_PLANS: &[BoostPlan] = &[
    BoostPlan {
        key: "spark",
        credits_required: 10,
        duration_hours: 24,
        multiplier: 1.5,
    },
    BoostPlan {
        key: "surge",
        credits_required: 25,
        duration_hours: 72,
        multiplier: 2.0,
    },
    BoostPlan {
        key: "spotlight",
        credits_required: 60,
        duration_hours: 168,
        multiplier: 3.0,
    },
];

/// Look up a plan by key.
pub fn find_plan(key: &str) -> Result<&'static BoostPlan, CoreError> {
    BOOST_PLANS.iter().find(|p| p.key == key).ok_or_else(|| {
        let known: Vec<&str> = BOOST_PLANS.iter().map(|p| p.key).collect();
        CoreError::Validation(format!(
            "Unknown boost plan '{key}'. Must be one of: {}",
            known.join(", ")
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_known_plan() {
        let plan = find_plan("surge").unwrap();
        assert_eq!(plan.credits_required, 25);
        assert_eq!(plan.duration_hours, 72);
    }

    #[test]
    fn rejects_unknown_plan() {
        let err = find_plan("mega").unwrap_err();
        assert!(err.to_string().contains("spark, surge, spotlight"));
    }

    #[test]
    fn plans_are_ordered_by_cost() {
        assert!(BOOST_PLANS
            .windows(2)
            .all(|w| w[0].credits_required < w[1].credits_required));
    }
}
