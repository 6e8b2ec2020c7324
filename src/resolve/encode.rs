//! CSP encoding of one turn.
//!
//! Houses all rule knowledge: a pre-solve pass marks geometrically
//! impossible orders void and pins their domains, convoy chains are
//! enumerated, and the constraint families are emitted over per-unit
//! outcomes, per-order strengths, support and convoy statuses, and path
//! choices for convoy-capable moves. The solver never sees an exceptional
//! state: everything void is pinned before search begins.

use crate::board::geography::{Coast, Location, Map, ProvinceId, Terrain};
use crate::board::order::Route;
use crate::board::state::GameState;
use crate::board::unit::{Unit, UnitClass};
use crate::csp::{Domain, Problem, Tier, Value, VarId};
use crate::hypergraph::{Action, Hypergraph, OrderId, VoidReason};

/// Value encodings for the CSP variables.
pub(crate) mod val {
    use super::Value;

    pub const HOLDS: Value = 0;
    pub const MOVES: Value = 1;
    pub const BOUNCED: Value = 2;
    pub const DISLODGED: Value = 3;

    pub const VALID: Value = 0;
    pub const CUT: Value = 1;
    pub const SUPPORT_VOID: Value = 2;

    pub const ACTIVE: Value = 0;
    pub const DISRUPTED: Value = 1;
    pub const CONVOY_VOID: Value = 2;

    pub const LAND: Value = 0;
    pub const CONVOYED: Value = 1;
    pub const NO_PATH: Value = 2;
}

/// The encoded problem plus the variable handles the driver needs to read
/// a solution back.
pub(crate) struct Encoding {
    pub problem: Problem,
    /// Merged void reasons: the hypergraph's reference voids plus the
    /// encoder's geometric ones, per order.
    pub void: Vec<Option<VoidReason>>,
    /// Per-order strength variable (pinned 0 for void orders).
    pub strength: Vec<VarId>,
    /// Per-order support status, present on support edges.
    pub support_status: Vec<Option<VarId>>,
    /// Per-order convoy status, present on convoy edges.
    pub convoy_status: Vec<Option<VarId>>,
    /// Per-order path status, present on convoy-capable moves.
    pub path_status: Vec<Option<VarId>>,
    /// Per-unit outcome variable.
    pub outcome: Vec<VarId>,
    /// Resolved landing location for live moves (fleet coasts canonicalised).
    pub landing: Vec<Option<Location>>,
}

impl Encoding {
    /// True when the order survived both void passes.
    pub fn is_live(&self, id: OrderId) -> bool {
        self.void[id.index()].is_none()
    }
}

/// Encodes map + state + hypergraph into a constraint problem.
pub(crate) fn encode(map: &Map, state: &GameState, graph: &Hypergraph) -> Encoding {
    let mut enc = Encoder {
        map,
        state,
        graph,
        problem: Problem::new(),
        void: graph.edges().iter().map(|e| e.void).collect(),
        strength: Vec::new(),
        support_status: vec![None; graph.len()],
        convoy_status: vec![None; graph.len()],
        path_status: vec![None; graph.len()],
        outcome: Vec::new(),
        landing: vec![None; graph.len()],
        chains: vec![Vec::new(); graph.len()],
        land_ok: vec![false; graph.len()],
    };
    enc.void_illegal_orders();
    enc.add_variables();
    enc.add_strength_constraints();
    enc.add_cut_constraints();
    enc.add_convoy_constraints();
    enc.add_path_constraints();
    enc.add_move_constraints();
    enc.add_occupancy_constraints();

    Encoding {
        problem: enc.problem,
        void: enc.void,
        strength: enc.strength,
        support_status: enc.support_status,
        convoy_status: enc.convoy_status,
        path_status: enc.path_status,
        outcome: enc.outcome,
        landing: enc.landing,
    }
}

struct Encoder<'a> {
    map: &'a Map,
    state: &'a GameState,
    graph: &'a Hypergraph,
    problem: Problem,
    void: Vec<Option<VoidReason>>,
    strength: Vec<VarId>,
    support_status: Vec<Option<VarId>>,
    convoy_status: Vec<Option<VarId>>,
    path_status: Vec<Option<VarId>>,
    outcome: Vec<VarId>,
    landing: Vec<Option<Location>>,
    /// Enumerated convoy chains per move, each a set of convoy order ids.
    chains: Vec<Vec<Vec<OrderId>>>,
    /// Whether each move has a usable land route.
    land_ok: Vec<bool>,
}

impl Encoder<'_> {
    fn abbr(&self, p: ProvinceId) -> &str {
        self.map.abbr(p)
    }

    fn unit_of(&self, id: OrderId) -> Option<Unit> {
        self.graph.edge(id).unit.map(|u| *self.state.unit(u))
    }

    /// Live moves into `province`, under the encoder's merged void view.
    fn live_attackers(&self, province: ProvinceId) -> Vec<OrderId> {
        self.graph
            .attackers(province)
            .iter()
            .copied()
            .filter(|id| self.void[id.index()].is_none())
            .collect()
    }

    /// Non-void supports attached to an order.
    fn live_supports(&self, id: OrderId) -> Vec<OrderId> {
        self.graph
            .supports_of(id)
            .iter()
            .copied()
            .filter(|s| self.void[s.index()].is_none())
            .collect()
    }

    // -----------------------------------------------------------------
    // Pre-solve voiding
    // -----------------------------------------------------------------

    /// Marks geometrically impossible orders void. Runs in dependency
    /// order: convoyer legality first (chains need it), then supports,
    /// then moves, then supports/convoys of moves that just died.
    fn void_illegal_orders(&mut self) {
        for i in 0..self.graph.len() {
            if self.void[i].is_some() {
                continue;
            }
            let edge = self.graph.edge(OrderId(i));
            let Some(unit) = self.unit_of(edge.id) else { continue };
            match edge.action {
                Action::Convoy { .. } => {
                    if unit.class != UnitClass::Fleet
                        || self.map.terrain(unit.location.province) != Terrain::Sea
                    {
                        self.void[i] = Some(VoidReason::IllegalConvoyer);
                    }
                }
                Action::SupportHold { at } => {
                    if !self.map.adjacent(unit.location, Location::new(at), unit.class) {
                        self.void[i] = Some(VoidReason::SupporterOutOfRange);
                    }
                }
                Action::SupportMove { to, .. } => {
                    if !self.map.adjacent(unit.location, Location::new(to), unit.class) {
                        self.void[i] = Some(VoidReason::SupporterOutOfRange);
                    }
                }
                Action::Hold | Action::Move { .. } => {}
            }
        }

        for i in 0..self.graph.len() {
            if self.void[i].is_some() {
                continue;
            }
            let edge = self.graph.edge(OrderId(i));
            let Action::Move { to, route } = edge.action else { continue };
            let unit = self.unit_of(edge.id).expect("live move has a unit");
            match unit.class {
                UnitClass::Fleet => self.resolve_fleet_move(i, unit.location, to, route),
                UnitClass::Army => self.resolve_army_move(i, unit.location, to, route),
            }
        }

        // Supports and convoys whose move just died reference an action
        // that is no longer happening.
        for i in 0..self.graph.len() {
            if self.void[i].is_some() {
                continue;
            }
            let edge = self.graph.edge(OrderId(i));
            match edge.action {
                Action::SupportMove { from, to } => {
                    let target = self.graph.edge_at(from);
                    let dead = target.map_or(true, |t| {
                        self.void[t.index()].is_some()
                            || !matches!(self.graph.edge(t).action, Action::Move { to: d, .. }
                                if d.province == to)
                    });
                    if dead {
                        self.void[i] = Some(VoidReason::UnmatchedSupport);
                    }
                }
                Action::Convoy { from, to } => {
                    let target = self.graph.edge_at(from);
                    let dead = target.map_or(true, |t| {
                        self.void[t.index()].is_some()
                            || !matches!(self.graph.edge(t).action, Action::Move { to: d, .. }
                                if d.province == to)
                    });
                    if dead {
                        self.void[i] = Some(VoidReason::UnmatchedConvoy);
                    }
                }
                _ => {}
            }
        }
    }

    fn resolve_fleet_move(&mut self, i: usize, from: Location, to: Location, route: Route) {
        // Fleets cannot be convoyed.
        if route == Route::ViaConvoy {
            self.void[i] = Some(VoidReason::Unreachable);
            return;
        }
        if to.coast == Coast::None && !self.map.split_coasts(to.province).is_empty() {
            // Destination coast left open: legal only when exactly one
            // coast is reachable.
            let coasts = self.map.fleet_coasts_to(from, to.province);
            match coasts.as_slice() {
                [only] => self.landing[i] = Some(Location::with_coast(to.province, *only)),
                _ => self.void[i] = Some(VoidReason::Unreachable),
            }
        } else if self.map.adjacent(from, to, UnitClass::Fleet) {
            self.landing[i] = Some(to);
        } else {
            self.void[i] = Some(VoidReason::Unreachable);
        }
    }

    fn resolve_army_move(&mut self, i: usize, from: Location, to: Location, route: Route) {
        if self.map.terrain(to.province) == Terrain::Sea {
            self.void[i] = Some(VoidReason::Unreachable);
            return;
        }
        let land_ok = self.map.adjacent(from, Location::new(to.province), UnitClass::Army);
        self.land_ok[i] = land_ok;
        let fleets: Vec<(OrderId, ProvinceId)> = self
            .graph
            .convoys_of(OrderId(i))
            .iter()
            .copied()
            .filter(|c| self.void[c.index()].is_none())
            .filter_map(|c| self.unit_of(c).map(|u| (c, u.location.province)))
            .collect();
        self.chains[i] = enumerate_chains(self.map, from.province, to.province, &fleets);
        let convoy_possible = !self.chains[i].is_empty();
        let reachable = match route {
            Route::ViaConvoy => convoy_possible,
            Route::Auto => land_ok || convoy_possible,
        };
        if reachable {
            self.landing[i] = Some(Location::new(to.province));
        } else {
            self.void[i] = Some(VoidReason::Unreachable);
        }
    }

    // -----------------------------------------------------------------
    // Variables
    // -----------------------------------------------------------------

    fn add_variables(&mut self) {
        for u in self.state.units() {
            let id = self.graph.order_of_unit(u.id);
            let is_mover = self.void[id.index()].is_none() && self.graph.edge(id).action.is_move();
            let domain = if is_mover {
                Domain::of(&[val::MOVES, val::BOUNCED, val::DISLODGED])
            } else {
                Domain::of(&[val::HOLDS, val::DISLODGED])
            };
            let var = self.problem.add_var(
                format!("outcome({})", self.abbr(u.location.province)),
                Tier::Outcome,
                domain,
            );
            self.outcome.push(var);
        }

        for i in 0..self.graph.len() {
            let id = OrderId(i);
            let edge = self.graph.edge(id);
            let name = match edge.origin {
                Some(l) => format!("strength({})", self.abbr(l.province)),
                None => format!("strength(#{i})"),
            };
            let domain = if self.void[i].is_some() {
                Domain::singleton(0)
            } else {
                let k = self.live_supports(id).len() as Value;
                Domain::range(1, 1 + k)
            };
            let var = self.problem.add_var(name, Tier::Strength, domain);
            self.strength.push(var);

            if edge.action.is_support() {
                let name = match edge.origin {
                    Some(l) => format!("support({})", self.abbr(l.province)),
                    None => format!("support(#{i})"),
                };
                let domain = if self.void[i].is_some() {
                    Domain::singleton(val::SUPPORT_VOID)
                } else {
                    Domain::of(&[val::VALID, val::CUT])
                };
                self.support_status[i] = Some(self.problem.add_var(
                    name,
                    Tier::SupportStatus,
                    domain,
                ));
            }

            if matches!(edge.action, Action::Convoy { .. }) {
                let name = match edge.origin {
                    Some(l) => format!("convoy({})", self.abbr(l.province)),
                    None => format!("convoy(#{i})"),
                };
                let domain = if self.void[i].is_some() {
                    Domain::singleton(val::CONVOY_VOID)
                } else {
                    Domain::of(&[val::ACTIVE, val::DISRUPTED])
                };
                self.convoy_status[i] = Some(self.problem.add_var(
                    name,
                    Tier::ConvoyStatus,
                    domain,
                ));
            }

            if self.void[i].is_none() {
                if let Action::Move { route, .. } = edge.action {
                    if !self.chains[i].is_empty() || route == Route::ViaConvoy {
                        let origin = edge.origin.expect("live move has an origin");
                        let domain = if route == Route::Auto && self.land_ok[i] {
                            // Land route preferred when the order leaves the
                            // choice open.
                            Domain::singleton(val::LAND)
                        } else {
                            Domain::of(&[val::CONVOYED, val::NO_PATH])
                        };
                        self.path_status[i] = Some(self.problem.add_var(
                            format!("path({})", self.abbr(origin.province)),
                            Tier::PathStatus,
                            domain,
                        ));
                    }
                }
            }
        }
    }

    // -----------------------------------------------------------------
    // Constraint families
    // -----------------------------------------------------------------

    /// strength[o] = 1 + count of valid supports (family 3).
    fn add_strength_constraints(&mut self) {
        for i in 0..self.graph.len() {
            if self.void[i].is_some() {
                continue;
            }
            let supports = self.live_supports(OrderId(i));
            if supports.is_empty() {
                continue; // domain is already the singleton {1}
            }
            let mut scope = vec![self.strength[i]];
            for s in &supports {
                scope.push(self.support_status[s.index()].expect("support edge has a status var"));
            }
            let label = format!("strength({})", self.var_label(OrderId(i)));
            self.problem.add_constraint(label, scope, |v| {
                let valid = v[1..].iter().filter(|&&s| s == val::VALID).count() as Value;
                v[0] == 1 + valid
            });
        }
    }

    /// Support cut by a foreign attack on the supporter, except from the
    /// supported move's destination (family 2).
    fn add_cut_constraints(&mut self) {
        for i in 0..self.graph.len() {
            let Some(status) = self.support_status[i] else { continue };
            if self.void[i].is_some() {
                continue;
            }
            let edge = self.graph.edge(OrderId(i));
            let origin = edge.origin.expect("live support has an origin");
            let exempt = match edge.action {
                Action::SupportMove { to, .. } => Some(to),
                _ => None,
            };

            let mut static_cut = false;
            let mut dynamic: Vec<VarId> = Vec::new();
            for m in self.live_attackers(origin.province) {
                let attacker = self.graph.edge(m);
                if attacker.power == edge.power {
                    continue;
                }
                let attacker_origin =
                    attacker.origin.expect("live move has an origin").province;
                if exempt == Some(attacker_origin) {
                    continue;
                }
                match self.path_status[m.index()] {
                    None => static_cut = true,
                    Some(path) => dynamic.push(path),
                }
            }

            if static_cut {
                self.problem.pin(status, val::CUT);
            } else if dynamic.is_empty() {
                self.problem.pin(status, val::VALID);
            } else {
                let mut scope = vec![status];
                scope.extend(dynamic);
                let label = format!("cut({})", self.abbr(origin.province));
                self.problem.add_constraint(label, scope, |v| {
                    let attacked = v[1..].iter().any(|&p| p != val::NO_PATH);
                    (v[0] == val::CUT) == attacked
                });
            }
        }
    }

    /// A convoy is disrupted exactly when its fleet is dislodged (family 4).
    fn add_convoy_constraints(&mut self) {
        for i in 0..self.graph.len() {
            let Some(status) = self.convoy_status[i] else { continue };
            if self.void[i].is_some() {
                continue;
            }
            let unit = self.graph.edge(OrderId(i)).unit.expect("live convoy has a unit");
            let outcome = self.outcome[unit.index()];
            let label = format!("convoy({})", self.var_label(OrderId(i)));
            self.problem.add_constraint(label, vec![status, outcome], |v| {
                (v[0] == val::DISRUPTED) == (v[1] == val::DISLODGED)
            });
        }
    }

    /// A convoyed path exists iff some enumerated chain is fully active
    /// (family 5). Pinned-land moves carry no constraint.
    fn add_path_constraints(&mut self) {
        for i in 0..self.graph.len() {
            let Some(path) = self.path_status[i] else { continue };
            if self.problem.domain(path).as_singleton() == Some(val::LAND) {
                continue;
            }
            let chains = &self.chains[i];
            // Unique convoy vars across all chains, in id order.
            let mut fleet_ids: Vec<OrderId> = chains.iter().flatten().copied().collect();
            fleet_ids.sort_unstable();
            fleet_ids.dedup();
            let positions: Vec<Vec<usize>> = chains
                .iter()
                .map(|chain| {
                    chain
                        .iter()
                        .map(|c| {
                            1 + fleet_ids.iter().position(|f| f == c).expect("chain fleet indexed")
                        })
                        .collect()
                })
                .collect();

            let mut scope = vec![path];
            for f in &fleet_ids {
                scope.push(self.convoy_status[f.index()].expect("convoy edge has a status var"));
            }
            let label = format!("path({})", self.var_label(OrderId(i)));
            self.problem.add_constraint(label, scope, move |v| {
                let open = positions
                    .iter()
                    .any(|chain| chain.iter().all(|&p| v[p] == val::ACTIVE));
                v[0] == if open { val::CONVOYED } else { val::NO_PATH }
            });
        }
    }

    /// Move resolution (families 5–8 and 12–13): a move succeeds iff it has
    /// a path, strictly out-strengths every competing effective move, and
    /// defeats the destination's defense, with head-to-head and
    /// self-dislodgement treated specially.
    fn add_move_constraints(&mut self) {
        for i in 0..self.graph.len() {
            if self.void[i].is_some() {
                continue;
            }
            let edge = self.graph.edge(OrderId(i));
            let Action::Move { .. } = edge.action else { continue };
            let unit = self.unit_of(edge.id).expect("live move has a unit");
            let dest =
                self.landing[i].expect("live move has a landing location").province;

            let mut scope: Vec<VarId> = Vec::new();
            let push = |scope: &mut Vec<VarId>, var: VarId| -> usize {
                scope.push(var);
                scope.len() - 1
            };

            let outcome_pos = push(&mut scope, self.outcome[unit.id.index()]);
            let strength_pos = push(&mut scope, self.strength[i]);
            let path_pos = self.path_status[i].map(|v| push(&mut scope, v));

            // Own supports, with a flag telling whether each counts toward
            // dislodging the resident (supports from the resident's power
            // never do).
            let resident = self
                .graph
                .edge_at(dest)
                .map(|r| (r, self.unit_of(r).expect("resident edge has a unit")));
            let own_supports: Vec<(usize, bool)> = self
                .live_supports(OrderId(i))
                .iter()
                .map(|&s| {
                    let var = self.support_status[s.index()].expect("support has a status var");
                    let counts =
                        resident.map_or(true, |(_, r)| self.graph.edge(s).power != r.power);
                    (push(&mut scope, var), counts)
                })
                .collect();

            // Competing moves into the same destination.
            let competitors: Vec<(usize, Option<usize>)> = self
                .live_attackers(dest)
                .into_iter()
                .filter(|&m| m != OrderId(i))
                .map(|m| {
                    let s = push(&mut scope, self.strength[m.index()]);
                    let p = self.path_status[m.index()].map(|v| push(&mut scope, v));
                    (s, p)
                })
                .collect();

            // Destination resident: outcome, hold supports, head-to-head.
            // A stationary resident (valid or void order alike) defends at
            // 1 plus its valid hold supports; a resident whose move failed
            // defends at flat 1, so movers contribute no support positions.
            let resident_ctx = resident.map(|(r_edge, r_unit)| {
                let outcome = push(&mut scope, self.outcome[r_unit.id.index()]);
                let hold_supports: Vec<usize> = if self.graph.edge(r_edge).action.is_move() {
                    Vec::new()
                } else {
                    self.live_supports(r_edge)
                        .iter()
                        .map(|&s| {
                            let var = self.support_status[s.index()]
                                .expect("support has a status var");
                            push(&mut scope, var)
                        })
                        .collect()
                };
                let h2h = if self.void[r_edge.index()].is_none()
                    && matches!(self.graph.edge(r_edge).action, Action::Move { to, .. }
                        if to.province == unit.location.province)
                {
                    let s = push(&mut scope, self.strength[r_edge.index()]);
                    let p = self.path_status[r_edge.index()].map(|v| push(&mut scope, v));
                    Some((s, p))
                } else {
                    None
                };
                ResidentCtx {
                    outcome,
                    same_power: r_unit.power == unit.power,
                    hold_supports,
                    h2h,
                }
            });

            let ctx = MoveCtx {
                outcome: outcome_pos,
                strength: strength_pos,
                path: path_pos,
                own_supports,
                competitors,
                resident: resident_ctx,
            };
            let label = format!("move({})", self.abbr(unit.location.province));
            self.problem
                .add_constraint(label, scope, move |v| (v[ctx.outcome] == val::MOVES) == ctx.wins(v));
        }
    }

    /// Outcome projection (families 6–7): dislodged iff invaded while
    /// staying, bounced/holding iff nobody got in.
    fn add_occupancy_constraints(&mut self) {
        for u in self.state.units() {
            let province = u.location.province;
            let attackers: Vec<VarId> = self
                .live_attackers(province)
                .into_iter()
                .filter_map(|m| self.graph.edge(m).unit)
                .map(|a| self.outcome[a.index()])
                .collect();
            let outcome = self.outcome[u.id.index()];
            if attackers.is_empty() {
                // Nobody can dislodge this unit.
                let mut d = self.problem.domain(outcome);
                d.remove(val::DISLODGED);
                self.problem.restrict(outcome, d);
                continue;
            }
            let mut scope = vec![outcome];
            scope.extend(attackers);
            let label = format!("occupancy({})", self.abbr(province));
            self.problem.add_constraint(label, scope, |v| {
                let invaded = v[1..].iter().any(|&o| o == val::MOVES);
                match v[0] {
                    val::MOVES => true,
                    val::DISLODGED => invaded,
                    _ => !invaded,
                }
            });
        }
    }

    fn var_label(&self, id: OrderId) -> String {
        match self.graph.edge(id).origin {
            Some(l) => self.abbr(l.province).to_string(),
            None => format!("#{}", id.index()),
        }
    }
}

/// Scope positions and static facts for one move-resolution predicate.
struct MoveCtx {
    outcome: usize,
    strength: usize,
    path: Option<usize>,
    own_supports: Vec<(usize, bool)>,
    competitors: Vec<(usize, Option<usize>)>,
    resident: Option<ResidentCtx>,
}

struct ResidentCtx {
    outcome: usize,
    same_power: bool,
    /// Status positions of the hold supports defending the resident.
    hold_supports: Vec<usize>,
    /// Present when the resident's move targets this move's origin:
    /// (strength position, path position).
    h2h: Option<(usize, Option<usize>)>,
}

impl MoveCtx {
    fn wins(&self, v: &[Value]) -> bool {
        if let Some(p) = self.path {
            if v[p] == val::NO_PATH {
                return false;
            }
        }
        // Strictly stronger than every competing move that has a path.
        let full = v[self.strength];
        for &(s, p) in &self.competitors {
            let effective = p.map_or(true, |p| v[p] != val::NO_PATH);
            if effective && full <= v[s] {
                return false;
            }
        }
        let Some(r) = &self.resident else { return true };

        // Supports from the resident's power never help dislodge it.
        let adjusted = 1 + self
            .own_supports
            .iter()
            .filter(|&&(pos, counts)| counts && v[pos] == val::VALID)
            .count() as Value;

        if let Some((r_strength, r_path)) = r.h2h {
            let ours_by_land = self.path.map_or(true, |p| v[p] == val::LAND);
            let theirs_by_land = r_path.map_or(true, |p| v[p] == val::LAND);
            if ours_by_land && theirs_by_land {
                // Head-to-head: the resident defends with its move's full
                // strength, and a tie bounces both. Vacating does not help
                // the attacker here.
                return !r.same_power && adjusted > v[r_strength];
            }
        }

        if v[r.outcome] == val::MOVES {
            return true;
        }
        if r.same_power {
            return false;
        }
        let defense =
            1 + r.hold_supports.iter().filter(|&&pos| v[pos] == val::VALID).count() as Value;
        adjusted > defense
    }
}

/// Enumerates every simple convoy chain from `src` to `dst` through the
/// given convoying fleets. Each chain is the ordered set of convoy order
/// ids whose fleets carry the army; a chain is recorded as soon as it
/// reaches the destination (extensions of a reaching chain are weaker, not
/// different).
fn enumerate_chains(
    map: &Map,
    src: ProvinceId,
    dst: ProvinceId,
    fleets: &[(OrderId, ProvinceId)],
) -> Vec<Vec<OrderId>> {
    let mut chains = Vec::new();
    let mut used = vec![false; fleets.len()];
    let mut path = Vec::new();
    extend_chain(map, src, dst, fleets, &mut used, &mut path, &mut chains);
    chains
}

fn extend_chain(
    map: &Map,
    at: ProvinceId,
    dst: ProvinceId,
    fleets: &[(OrderId, ProvinceId)],
    used: &mut Vec<bool>,
    path: &mut Vec<OrderId>,
    chains: &mut Vec<Vec<OrderId>>,
) {
    for (i, &(id, sea)) in fleets.iter().enumerate() {
        if used[i] || !map.adjacent(Location::new(at), Location::new(sea), UnitClass::Fleet) {
            continue;
        }
        used[i] = true;
        path.push(id);
        if map.adjacent(Location::new(sea), Location::new(dst), UnitClass::Fleet) {
            chains.push(path.clone());
        } else {
            extend_chain(map, sea, dst, fleets, used, path, chains);
        }
        path.pop();
        used[i] = false;
    }
}
