//! Vote accounting policy.
//!
//! A listener holds at most one vote record per track and may raise or
//! lower its allocation. Only the net change touches the track tally and
//! the listener's monthly allowance.

use serde::Serialize;

use crate::error::CoreError;

/// Upper bound on the votes a single allocation may carry.
pub const MAX_VOTES_PER_ALLOCATION: i32 = 100;

/// Category recorded when the caller does not supply one.
pub const DEFAULT_VOTE_TYPE: &str = "discover";

/// Maximum length of a free-text vote category.
pub const MAX_VOTE_TYPE_LEN: usize = 32;

/// Outcome of [`plan_vote`], applied verbatim by the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VotePlan {
    /// Change to apply to the track's `total_votes`. Negative when the
    /// listener lowers an existing allocation.
    pub delta: i32,
    /// The listener's remaining votes after the change.
    pub remaining_after: i32,
    /// `true` when no vote record existed yet.
    pub created: bool,
}

/// Decide how an allocation of `requested` votes changes the tallies.
///
/// `previous` is the listener's current allocation on the track, if any.
/// The request is rejected unless `requested <= remaining`, even when it
/// only raises an existing allocation. Only the net change is charged;
/// lowering an allocation refunds the difference, but never lifts the
/// remaining votes above `max(allowance, remaining)`, so allocations made
/// in an earlier month cannot be cashed in on top of a fresh allowance.
pub fn plan_vote(
    previous: Option<i32>,
    requested: i32,
    remaining: i32,
    allowance: i32,
) -> Result<VotePlan, CoreError> {
    if !(1..=MAX_VOTES_PER_ALLOCATION).contains(&requested) {
        return Err(CoreError::Validation(format!(
            "Vote count must be between 1 and {MAX_VOTES_PER_ALLOCATION}, got {requested}"
        )));
    }

    if requested > remaining {
        return Err(CoreError::InsufficientVotes {
            requested,
            remaining,
        });
    }

    let delta = requested - previous.unwrap_or(0);
    let remaining_after = if delta < 0 {
        (remaining - delta).min(allowance.max(remaining))
    } else {
        remaining - delta
    };

    Ok(VotePlan {
        delta,
        remaining_after,
        created: previous.is_none(),
    })
}

/// Normalize an optional caller-supplied vote category.
pub fn normalize_vote_type(vote_type: Option<&str>) -> Result<String, CoreError> {
    let value = vote_type.map(str::trim).unwrap_or(DEFAULT_VOTE_TYPE);
    if value.is_empty() || value.len() > MAX_VOTE_TYPE_LEN {
        return Err(CoreError::Validation(format!(
            "Vote type must be 1 to {MAX_VOTE_TYPE_LEN} characters"
        )));
    }
    Ok(value.to_lowercase())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const ALLOWANCE: i32 = 10;

    #[test]
    fn first_vote_consumes_full_request() {
        let plan = plan_vote(None, 3, 10, ALLOWANCE).unwrap();
        assert_eq!(
            plan,
            VotePlan {
                delta: 3,
                remaining_after: 7,
                created: true
            }
        );
    }

    #[test]
    fn lowering_allocation_refunds_difference() {
        let plan = plan_vote(Some(3), 1, 7, ALLOWANCE).unwrap();
        assert_eq!(plan.delta, -2);
        assert_eq!(plan.remaining_after, 9);
        assert!(!plan.created);
    }

    #[test]
    fn raising_allocation_charges_increase_only() {
        let plan = plan_vote(Some(2), 5, 5, ALLOWANCE).unwrap();
        assert_eq!(plan.delta, 3);
        assert_eq!(plan.remaining_after, 2);
    }

    #[test]
    fn raise_must_fit_whole_request_in_remaining() {
        // Holding 2 with 3 left: the increase of 3 would fit, the request of 5 does not.
        assert_matches!(
            plan_vote(Some(2), 5, 3, ALLOWANCE),
            Err(CoreError::InsufficientVotes {
                requested: 5,
                remaining: 3
            })
        );
    }

    #[test]
    fn same_allocation_is_a_no_op() {
        let plan = plan_vote(Some(4), 4, 4, ALLOWANCE).unwrap();
        assert_eq!(plan.delta, 0);
        assert_eq!(plan.remaining_after, 4);
    }

    #[test]
    fn request_beyond_remaining_is_rejected() {
        assert_matches!(
            plan_vote(None, 5, 2, ALLOWANCE),
            Err(CoreError::InsufficientVotes {
                requested: 5,
                remaining: 2
            })
        );
    }

    #[test]
    fn lowering_with_too_few_remaining_is_rejected() {
        assert_matches!(
            plan_vote(Some(6), 2, 1, ALLOWANCE),
            Err(CoreError::InsufficientVotes { .. })
        );
    }

    #[test]
    fn refund_never_exceeds_allowance() {
        // Five votes carried over from last month, lowered after a refill to 10.
        let plan = plan_vote(Some(5), 1, 8, ALLOWANCE).unwrap();
        assert_eq!(plan.delta, -4);
        assert_eq!(plan.remaining_after, ALLOWANCE);
    }

    #[test]
    fn refund_keeps_balance_already_above_allowance() {
        let plan = plan_vote(Some(5), 1, 15, ALLOWANCE).unwrap();
        assert_eq!(plan.remaining_after, 15);
    }

    #[test]
    fn zero_or_oversized_request_is_invalid() {
        assert_matches!(
            plan_vote(None, 0, 10, ALLOWANCE),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            plan_vote(None, MAX_VOTES_PER_ALLOCATION + 1, 1_000, ALLOWANCE),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn vote_type_defaults_and_normalizes() {
        assert_eq!(normalize_vote_type(None).unwrap(), "discover");
        assert_eq!(
            normalize_vote_type(Some(" Leaderboard ")).unwrap(),
            "leaderboard"
        );
        assert!(normalize_vote_type(Some("   ")).is_err());
    }
}
