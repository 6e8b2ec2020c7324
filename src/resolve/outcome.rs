//! The turn result record and the adjudication error taxonomy.

use thiserror::Error;

use crate::board::geography::{Location, ProvinceId};
use crate::board::unit::{Power, UnitClass, UnitId};
use crate::hypergraph::{OrderId, VoidReason};

/// Where a unit ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Standing in (or moved to) this location.
    At(Location),
    /// Forced out; `attacker_from` feeds the retreat phase.
    Dislodged { at: Location, attacker_from: ProvinceId },
}

/// One unit's post-turn situation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitReport {
    pub unit: UnitId,
    pub power: Power,
    pub class: UnitClass,
    pub position: Position,
}

/// Per-order adjudication status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Success,
    Failed,
    Void,
    Cut,
}

/// One order's line in the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderRecord {
    pub order: OrderId,
    pub status: OrderStatus,
    /// Present exactly when `status` is `Void`.
    pub void_reason: Option<VoidReason>,
}

/// How a contested province resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The winning move entered an empty or vacated province.
    Taken,
    /// The winning move forced the resident out.
    Dislodged,
    /// The strongest attacks tied; everyone stays.
    Standoff,
    /// The defender's strength held off the strongest attack.
    Repelled,
    /// The strongest attack targeted a unit of its own power.
    SelfBlocked,
    /// A swap attempt failed the head-to-head comparison.
    HeadToHeadStand,
    /// Every attack lost its convoy path.
    NoEffectiveAttack,
}

/// One competing move in a contest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackReport {
    pub order: OrderId,
    pub from: ProvinceId,
    pub strength: u8,
    /// True when the move travelled (or would have travelled) by convoy.
    pub convoyed: bool,
    /// True when the move's convoy path collapsed.
    pub pathless: bool,
}

/// The per-province reasoning record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContestReport {
    pub province: ProvinceId,
    pub attackers: Vec<AttackReport>,
    pub hold_strength: u8,
    pub winner: Option<OrderId>,
    pub verdict: Verdict,
    /// True when the convoy tiebreak decided this province.
    pub szykman: bool,
}

/// The complete outcome of one adjudicated turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnResult {
    /// Every unit accounted for, in unit-id order.
    pub units_after: Vec<UnitReport>,
    /// Every order accounted for, in order-id order (implicit holds
    /// included).
    pub order_outcomes: Vec<OrderRecord>,
    /// One entry per province that saw at least one live attack.
    pub details: Vec<ContestReport>,
}

impl TurnResult {
    /// The status of one order.
    pub fn status(&self, order: OrderId) -> OrderStatus {
        self.order_outcomes[order.index()].status
    }

    /// The post-turn report for one unit.
    pub fn unit(&self, unit: UnitId) -> &UnitReport {
        &self.units_after[unit.index()]
    }

    /// The contest report for a province, if it was contested.
    pub fn contest(&self, province: ProvinceId) -> Option<&ContestReport> {
        self.details.iter().find(|c| c.province == province)
    }
}

/// Fatal adjudication failures. Both indicate a bug in the constraint
/// encoding rather than bad input: adjudication of legal positions always
/// has exactly one answer.
#[derive(Debug, Error)]
pub enum AdjudicationError {
    /// The solver found no consistent assignment.
    #[error("orders admit no consistent resolution (suspect constraints: {constraints:?}; orders: {orders:?})")]
    Inconsistent {
        /// Labels of constraints observed failing during the search.
        constraints: Vec<String>,
        /// A rendering of every input hyperedge.
        orders: Vec<String>,
    },

    /// More than one assignment survived the convoy tiebreak.
    #[error("{count} resolutions survive the convoy tiebreak (orders: {orders:?})")]
    Ambiguous { count: usize, orders: Vec<String> },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::geography::Location;

    #[test]
    fn result_lookup_helpers() {
        let loc = Location::new(ProvinceId(4));
        let result = TurnResult {
            units_after: vec![UnitReport {
                unit: UnitId(0),
                power: Power::France,
                class: UnitClass::Army,
                position: Position::At(loc),
            }],
            order_outcomes: vec![OrderRecord {
                order: OrderId(0),
                status: OrderStatus::Success,
                void_reason: None,
            }],
            details: vec![],
        };
        assert_eq!(result.status(OrderId(0)), OrderStatus::Success);
        assert_eq!(result.unit(UnitId(0)).position, Position::At(loc));
        assert_eq!(result.contest(ProvinceId(4)), None);
    }

    #[test]
    fn errors_render_their_context() {
        let err = AdjudicationError::Inconsistent {
            constraints: vec!["move(par)".to_string()],
            orders: vec!["A par - bur".to_string()],
        };
        let text = err.to_string();
        assert!(text.contains("move(par)"));
        assert!(text.contains("A par - bur"));
    }
}
