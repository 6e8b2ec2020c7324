//! The order hypergraph.
//!
//! Each order is one hyperedge over units and provinces. Assembly
//! canonicalises references against the game state: the ordered unit is
//! resolved from its province, supported and convoyed actions are matched to
//! the concrete order they name, units left without orders receive implicit
//! holds, and unresolvable references are flagged void. Two derived indexes
//! come out of assembly: `attackers(province)` and `supports_of(order)`
//! (plus `convoys_of(move)` for convoy chains).
//!
//! The hypergraph is purely a data structure. Geometric legality (adjacency,
//! terrain, convoy routes) is the encoder's business, not assembled here.

use crate::board::geography::{Location, Map, ProvinceId};
use crate::board::order::{Order, Route};
use crate::board::state::GameState;
use crate::board::unit::{Power, UnitClass, UnitId};

/// Dense identifier of a hyperedge (one order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrderId(pub usize);

impl OrderId {
    /// Returns the id as a usize index.
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Why an order contributes nothing to the turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoidReason {
    /// No unit of the ordering power stands in the named province.
    UnknownUnit,
    /// A later order for the same unit replaced this one.
    Superseded,
    /// The supported action was not issued (or the target unit is moving).
    UnmatchedSupport,
    /// No matching army move exists for this convoy.
    UnmatchedConvoy,
    /// The moving unit cannot reach the destination by any route.
    Unreachable,
    /// The supporter cannot reach the site of the supported action.
    SupporterOutOfRange,
    /// The convoying unit is not a fleet in a sea province.
    IllegalConvoyer,
}

/// The canonical payload of a hyperedge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Hold,
    Move { to: Location, route: Route },
    SupportHold { at: ProvinceId },
    SupportMove { from: ProvinceId, to: ProvinceId },
    Convoy { from: ProvinceId, to: ProvinceId },
}

impl Action {
    /// Returns true for the two support variants.
    pub fn is_support(&self) -> bool {
        matches!(self, Action::SupportHold { .. } | Action::SupportMove { .. })
    }

    /// Returns true for a move.
    pub fn is_move(&self) -> bool {
        matches!(self, Action::Move { .. })
    }
}

/// One order as a hyperedge.
#[derive(Debug, Clone)]
pub struct Hyperedge {
    pub id: OrderId,
    pub power: Power,
    /// The ordered unit, when the reference resolved.
    pub unit: Option<UnitId>,
    /// The ordered unit's full location at the start of the turn.
    pub origin: Option<Location>,
    pub action: Action,
    /// Reference-level void flag. The encoder adds geometric voids on top.
    pub void: Option<VoidReason>,
    /// True for holds synthesized for units that received no order.
    pub implicit: bool,
}

impl Hyperedge {
    /// True when the edge is the active order of a real unit and not void.
    fn is_live(&self) -> bool {
        self.unit.is_some() && self.void.is_none()
    }
}

/// The assembled hypergraph for one turn.
#[derive(Debug)]
pub struct Hypergraph {
    edges: Vec<Hyperedge>,
    /// Active order per unit, indexed by `UnitId`.
    order_of_unit: Vec<OrderId>,
    /// Active order of the unit occupying each province, indexed by province.
    edge_at: Vec<Option<OrderId>>,
    /// Live moves into each province, indexed by province.
    attackers: Vec<Vec<OrderId>>,
    /// Supports attached to each order, indexed by supported `OrderId`.
    supports_of: Vec<Vec<OrderId>>,
    /// Convoys attached to each move, indexed by move `OrderId`.
    convoys_of: Vec<Vec<OrderId>>,
}

impl Hypergraph {
    /// Assembles the hypergraph from raw `(order, power)` submissions.
    ///
    /// Submissions are processed in sequence; when several orders name the
    /// same unit, the last one stands and earlier ones are marked
    /// `Superseded`. Every unit ends up with exactly one active edge.
    pub fn assemble(map: &Map, state: &GameState, orders: &[(Order, Power)]) -> Hypergraph {
        let mut edges: Vec<Hyperedge> = Vec::with_capacity(orders.len() + state.units().len());
        let mut order_of_unit: Vec<Option<OrderId>> = vec![None; state.units().len()];

        for &(order, power) in orders {
            let id = OrderId(edges.len());
            let action = action_of(&order);
            let unit = state
                .unit_at(order.unit_province())
                .filter(|u| u.power == power);
            match unit {
                Some(u) => {
                    if let Some(prev) = order_of_unit[u.id.index()] {
                        edges[prev.index()].void = Some(VoidReason::Superseded);
                    }
                    order_of_unit[u.id.index()] = Some(id);
                    edges.push(Hyperedge {
                        id,
                        power,
                        unit: Some(u.id),
                        origin: Some(u.location),
                        action,
                        void: None,
                        implicit: false,
                    });
                }
                None => edges.push(Hyperedge {
                    id,
                    power,
                    unit: None,
                    origin: None,
                    action,
                    void: Some(VoidReason::UnknownUnit),
                    implicit: false,
                }),
            }
        }

        // Units without orders hold implicitly.
        for u in state.units() {
            if order_of_unit[u.id.index()].is_none() {
                let id = OrderId(edges.len());
                order_of_unit[u.id.index()] = Some(id);
                edges.push(Hyperedge {
                    id,
                    power: u.power,
                    unit: Some(u.id),
                    origin: Some(u.location),
                    action: Action::Hold,
                    void: None,
                    implicit: true,
                });
            }
        }

        let order_of_unit: Vec<OrderId> =
            order_of_unit.into_iter().map(|o| o.expect("every unit has an edge")).collect();

        let mut edge_at: Vec<Option<OrderId>> = vec![None; map.province_count()];
        for u in state.units() {
            edge_at[u.location.province.index()] = Some(order_of_unit[u.id.index()]);
        }

        let mut graph = Hypergraph {
            attackers: vec![Vec::new(); map.province_count()],
            supports_of: vec![Vec::new(); edges.len()],
            convoys_of: vec![Vec::new(); edges.len()],
            edges,
            order_of_unit,
            edge_at,
        };
        graph.resolve_references(state);
        graph.index_attackers();
        graph
    }

    /// Matches support and convoy edges to the order they reference,
    /// voiding the ones that name an action nobody issued.
    fn resolve_references(&mut self, state: &GameState) {
        let mut attach_support: Vec<(OrderId, OrderId)> = Vec::new();
        let mut attach_convoy: Vec<(OrderId, OrderId)> = Vec::new();
        let mut voids: Vec<(OrderId, VoidReason)> = Vec::new();

        for edge in &self.edges {
            if !edge.is_live() {
                continue;
            }
            match edge.action {
                Action::SupportHold { at } => match self.live_edge_at(at) {
                    Some(target) if !target.action.is_move() => {
                        attach_support.push((target.id, edge.id));
                    }
                    // A unit ordered to move is not holding, even when the
                    // move itself later turns out void.
                    _ => voids.push((edge.id, VoidReason::UnmatchedSupport)),
                },
                Action::SupportMove { from, to } => match self.live_edge_at(from) {
                    Some(target)
                        if matches!(target.action, Action::Move { to: dest, .. }
                            if dest.province == to) =>
                    {
                        attach_support.push((target.id, edge.id));
                    }
                    _ => voids.push((edge.id, VoidReason::UnmatchedSupport)),
                },
                Action::Convoy { from, to } => match self.live_edge_at(from) {
                    Some(target)
                        if matches!(target.action, Action::Move { to: dest, .. }
                            if dest.province == to)
                            && target
                                .unit
                                .is_some_and(|u| state.unit(u).class == UnitClass::Army) =>
                    {
                        attach_convoy.push((target.id, edge.id));
                    }
                    _ => voids.push((edge.id, VoidReason::UnmatchedConvoy)),
                },
                Action::Hold | Action::Move { .. } => {}
            }
        }

        for (target, support) in attach_support {
            self.supports_of[target.index()].push(support);
        }
        for (target, convoy) in attach_convoy {
            self.convoys_of[target.index()].push(convoy);
        }
        for (id, reason) in voids {
            self.edges[id.index()].void = Some(reason);
        }
    }

    fn index_attackers(&mut self) {
        for edge in &self.edges {
            if !edge.is_live() {
                continue;
            }
            if let Action::Move { to, .. } = edge.action {
                self.attackers[to.province.index()].push(edge.id);
            }
        }
    }

    fn live_edge_at(&self, province: ProvinceId) -> Option<&Hyperedge> {
        self.edge_at[province.index()]
            .map(|id| &self.edges[id.index()])
            .filter(|e| e.void.is_none())
    }

    /// Number of hyperedges (orders, including implicit holds).
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// True when no orders were assembled.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// All hyperedges in id order.
    pub fn edges(&self) -> &[Hyperedge] {
        &self.edges
    }

    /// One hyperedge by id.
    pub fn edge(&self, id: OrderId) -> &Hyperedge {
        &self.edges[id.index()]
    }

    /// The active order of a unit.
    pub fn order_of_unit(&self, unit: UnitId) -> OrderId {
        self.order_of_unit[unit.index()]
    }

    /// The active order of the unit occupying a province, if any.
    pub fn edge_at(&self, province: ProvinceId) -> Option<OrderId> {
        self.edge_at[province.index()]
    }

    /// Every live move whose destination is the given province.
    pub fn attackers(&self, province: ProvinceId) -> &[OrderId] {
        &self.attackers[province.index()]
    }

    /// Support edges attached to an order's action.
    pub fn supports_of(&self, order: OrderId) -> &[OrderId] {
        &self.supports_of[order.index()]
    }

    /// Convoy edges attached to a move.
    pub fn convoys_of(&self, order: OrderId) -> &[OrderId] {
        &self.convoys_of[order.index()]
    }
}

fn action_of(order: &Order) -> Action {
    match *order {
        Order::Hold { .. } => Action::Hold,
        Order::Move { to, route, .. } => Action::Move { to, route },
        Order::SupportHold { at, .. } => Action::SupportHold { at },
        Order::SupportMove { from, to, .. } => Action::SupportMove { from, to },
        Order::Convoy { from, to, .. } => Action::Convoy { from, to },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::geography::{Coast, Location};
    use crate::board::standard::standard_map;
    use crate::board::state::{GameState, Season};
    use crate::board::unit::Power;

    fn setup() -> (Map, GameState) {
        let map = standard_map();
        let mut state = GameState::new(1901, Season::Spring);
        for (power, class, abbr) in [
            (Power::France, UnitClass::Army, "par"),
            (Power::France, UnitClass::Army, "mar"),
            (Power::Germany, UnitClass::Army, "mun"),
            (Power::England, UnitClass::Fleet, "nth"),
            (Power::England, UnitClass::Army, "lon"),
        ] {
            let p = map.by_abbr(abbr).unwrap();
            state.add_unit(&map, power, class, Location::new(p)).unwrap();
        }
        (map, state)
    }

    fn p(map: &Map, abbr: &str) -> ProvinceId {
        map.by_abbr(abbr).unwrap()
    }

    #[test]
    fn implicit_holds_fill_in_missing_orders() {
        let (map, state) = setup();
        let graph = Hypergraph::assemble(&map, &state, &[]);
        assert_eq!(graph.len(), 5);
        assert!(graph.edges().iter().all(|e| e.implicit && e.action == Action::Hold));
    }

    #[test]
    fn unknown_unit_is_void() {
        let (map, state) = setup();
        let orders = vec![
            // Nobody stands in Burgundy.
            (Order::Hold { unit: p(&map, "bur") }, Power::France),
            // Paris is French, not German.
            (Order::Hold { unit: p(&map, "par") }, Power::Germany),
        ];
        let graph = Hypergraph::assemble(&map, &state, &orders);
        assert_eq!(graph.edge(OrderId(0)).void, Some(VoidReason::UnknownUnit));
        assert_eq!(graph.edge(OrderId(1)).void, Some(VoidReason::UnknownUnit));
        // All five units still got edges.
        assert_eq!(graph.len(), 7);
    }

    #[test]
    fn last_order_wins() {
        let (map, state) = setup();
        let par = p(&map, "par");
        let orders = vec![
            (Order::Hold { unit: par }, Power::France),
            (
                Order::Move { from: par, to: Location::new(p(&map, "bur")), route: Route::Auto },
                Power::France,
            ),
        ];
        let graph = Hypergraph::assemble(&map, &state, &orders);
        assert_eq!(graph.edge(OrderId(0)).void, Some(VoidReason::Superseded));
        assert!(graph.edge(OrderId(1)).void.is_none());
        assert_eq!(graph.edge_at(par), Some(OrderId(1)));
    }

    #[test]
    fn support_move_attaches_to_its_move() {
        let (map, state) = setup();
        let par = p(&map, "par");
        let bur = p(&map, "bur");
        let orders = vec![
            (Order::Move { from: par, to: Location::new(bur), route: Route::Auto }, Power::France),
            (Order::SupportMove { by: p(&map, "mar"), from: par, to: bur }, Power::France),
        ];
        let graph = Hypergraph::assemble(&map, &state, &orders);
        assert_eq!(graph.supports_of(OrderId(0)), &[OrderId(1)]);
        assert!(graph.edge(OrderId(1)).void.is_none());
        assert_eq!(graph.attackers(bur), &[OrderId(0)]);
    }

    #[test]
    fn support_for_unissued_action_is_void() {
        let (map, state) = setup();
        let orders = vec![
            // Paris is ordered to hold, so supporting a Paris -> Burgundy
            // move matches nothing.
            (Order::Hold { unit: p(&map, "par") }, Power::France),
            (
                Order::SupportMove { by: p(&map, "mar"), from: p(&map, "par"), to: p(&map, "bur") },
                Power::France,
            ),
        ];
        let graph = Hypergraph::assemble(&map, &state, &orders);
        assert_eq!(graph.edge(OrderId(1)).void, Some(VoidReason::UnmatchedSupport));
        assert!(graph.supports_of(OrderId(0)).is_empty());
    }

    #[test]
    fn support_hold_on_moving_unit_is_void() {
        let (map, state) = setup();
        let par = p(&map, "par");
        let orders = vec![
            (Order::Move { from: par, to: Location::new(p(&map, "bur")), route: Route::Auto }, Power::France),
            (Order::SupportHold { by: p(&map, "mar"), at: par }, Power::France),
        ];
        let graph = Hypergraph::assemble(&map, &state, &orders);
        assert_eq!(graph.edge(OrderId(1)).void, Some(VoidReason::UnmatchedSupport));
    }

    #[test]
    fn convoy_attaches_to_army_move() {
        let (map, state) = setup();
        let lon = p(&map, "lon");
        let nwy = p(&map, "nwy");
        let orders = vec![
            (Order::Move { from: lon, to: Location::new(nwy), route: Route::Auto }, Power::England),
            (Order::Convoy { by: p(&map, "nth"), from: lon, to: nwy }, Power::England),
        ];
        let graph = Hypergraph::assemble(&map, &state, &orders);
        assert_eq!(graph.convoys_of(OrderId(0)), &[OrderId(1)]);
        assert!(graph.edge(OrderId(1)).void.is_none());
    }

    #[test]
    fn convoy_without_matching_move_is_void() {
        let (map, state) = setup();
        let lon = p(&map, "lon");
        let wal = p(&map, "wal");
        // London holds, so convoying a London -> Wales move matches nothing.
        let orders = vec![
            (Order::Hold { unit: lon }, Power::England),
            (Order::Convoy { by: p(&map, "nth"), from: lon, to: wal }, Power::England),
        ];
        let graph = Hypergraph::assemble(&map, &state, &orders);
        assert_eq!(graph.edge(OrderId(1)).void, Some(VoidReason::UnmatchedConvoy));
    }

    #[test]
    fn origin_keeps_placement_coast() {
        // Assembly carries the coast the unit was placed with.
        let map = standard_map();
        let mut state = GameState::new(1901, Season::Spring);
        let stp = map.by_abbr("stp").unwrap();
        state
            .add_unit(&map, Power::Russia, UnitClass::Fleet, Location::with_coast(stp, Coast::South))
            .unwrap();
        let graph = Hypergraph::assemble(&map, &state, &[]);
        let edge = &graph.edges()[0];
        assert_eq!(edge.origin.unwrap().coast, Coast::South);
    }
}
