//! Raw movement-phase orders.
//!
//! One tagged variant per order kind, mirroring the text notation the
//! external parser consumes. The ordered unit is identified by the province
//! it stands in (a province holds at most one unit); only a move destination
//! carries a coast. Reference resolution against the game state happens in
//! the hypergraph, not here.

use super::geography::{Location, ProvinceId};

/// Route hint on a move order.
///
/// `Auto` lets the adjudicator pick between a land route and a convoy;
/// `ViaConvoy` commits the move to the convoy and fails it when no chain
/// survives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Auto,
    ViaConvoy,
}

/// A movement-phase order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    /// Hold: `par H`
    Hold { unit: ProvinceId },

    /// Move: `par - bur` or `nrg - stp/nc`, optionally `... vc`
    Move { from: ProvinceId, to: Location, route: Route },

    /// Support hold: `mar S bur`
    SupportHold { by: ProvinceId, at: ProvinceId },

    /// Support move: `mar S par - bur`
    SupportMove { by: ProvinceId, from: ProvinceId, to: ProvinceId },

    /// Convoy: `nth C lon - nwy`
    Convoy { by: ProvinceId, from: ProvinceId, to: ProvinceId },
}

impl Order {
    /// Returns the province of the ordered unit.
    pub fn unit_province(&self) -> ProvinceId {
        match *self {
            Order::Hold { unit } => unit,
            Order::Move { from, .. } => from,
            Order::SupportHold { by, .. } => by,
            Order::SupportMove { by, .. } => by,
            Order::Convoy { by, .. } => by,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_province_extraction() {
        let p = |n| ProvinceId(n);
        assert_eq!(Order::Hold { unit: p(3) }.unit_province(), p(3));
        assert_eq!(
            Order::Move { from: p(1), to: Location::new(p(2)), route: Route::Auto }
                .unit_province(),
            p(1)
        );
        assert_eq!(Order::SupportHold { by: p(4), at: p(5) }.unit_province(), p(4));
        assert_eq!(
            Order::SupportMove { by: p(4), from: p(1), to: p(2) }.unit_province(),
            p(4)
        );
        assert_eq!(Order::Convoy { by: p(6), from: p(1), to: p(2) }.unit_province(), p(6));
    }
}
