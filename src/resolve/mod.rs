//! Turn adjudication.
//!
//! `adjudicate` is the pure entry point: it assembles the hypergraph,
//! encodes the CSP, enumerates every consistent assignment, applies the
//! Szykman convoy tiebreak, verifies the answer is unique, and projects the
//! chosen assignment into a `TurnResult`. The map and state are only read;
//! all search state is private to the call.

mod encode;
pub mod outcome;

use std::collections::BTreeSet;

use crate::board::geography::{Map, ProvinceId};
use crate::board::order::Order;
use crate::board::state::GameState;
use crate::board::unit::{Power, UnitClass};
use crate::csp::{solve_all, Solution};
use crate::hypergraph::{Action, Hypergraph, OrderId};

use encode::{encode, val, Encoding};
pub use outcome::{
    AdjudicationError, AttackReport, ContestReport, OrderRecord, OrderStatus, Position,
    TurnResult, UnitReport, Verdict,
};

/// Upper bound on enumerated assignments. Real positions produce one or
/// (per convoy paradox) two; anything near the cap is already a bug.
const SOLUTION_CAP: usize = 32;

/// Adjudicates one movement turn.
///
/// Order ids in the result index the submission slice first, then the
/// implicit holds synthesized for unordered units.
pub fn adjudicate(
    map: &Map,
    state: &GameState,
    orders: &[(Order, Power)],
) -> Result<TurnResult, AdjudicationError> {
    let graph = Hypergraph::assemble(map, state, orders);
    let enc = encode(map, state, &graph);
    let report = solve_all(&enc.problem, SOLUTION_CAP);

    if report.solutions.is_empty() {
        return Err(AdjudicationError::Inconsistent {
            constraints: report
                .conflicts
                .iter()
                .map(|&c| enc.problem.constraint(c).label.clone())
                .collect(),
            orders: render_edges(map, state, &graph),
        });
    }
    if report.truncated {
        return Err(AdjudicationError::Ambiguous {
            count: report.solutions.len(),
            orders: render_edges(map, state, &graph),
        });
    }

    let (solution, szykman_moves) = match select_resolution(&enc, &report.solutions) {
        Some(chosen) => chosen,
        None => {
            return Err(AdjudicationError::Ambiguous {
                count: report.solutions.len(),
                orders: render_edges(map, state, &graph),
            })
        }
    };

    Ok(project(map, state, &graph, &enc, solution, &szykman_moves))
}

/// Picks the canonical assignment out of everything the solver found.
///
/// Two tiebreaks, in order. First the Szykman rule: only assignments whose
/// set of convoy-borne moves is a subset of every other's survive (the
/// paradoxical convoy is treated as if it failed). Then rotation: a closed
/// cycle of moves satisfies the constraints both rotating and standing
/// still, and the rulebook rotates it, so among the survivors the one whose
/// set of successful moves contains every other's wins. Anything still
/// ambiguous after both is an encoding bug. Also returns the moves the
/// Szykman rule forced off their convoys.
fn select_resolution<'a>(
    enc: &Encoding,
    solutions: &'a [Solution],
) -> Option<(&'a Solution, BTreeSet<usize>)> {
    let convoyed_set = |s: &Solution| -> BTreeSet<usize> {
        enc.path_status
            .iter()
            .enumerate()
            .filter_map(|(i, var)| var.map(|v| (i, v)))
            .filter(|&(_, v)| s.value(v) == val::CONVOYED)
            .map(|(i, _)| i)
            .collect()
    };
    let moved_set = |s: &Solution| -> BTreeSet<usize> {
        enc.outcome
            .iter()
            .enumerate()
            .filter(|&(_, &v)| s.value(v) == val::MOVES)
            .map(|(i, _)| i)
            .collect()
    };

    let convoy_sets: Vec<BTreeSet<usize>> = solutions.iter().map(convoyed_set).collect();
    let minimal: Vec<usize> = (0..solutions.len())
        .filter(|&i| convoy_sets.iter().all(|other| convoy_sets[i].is_subset(other)))
        .collect();
    let &first = minimal.first()?;
    let mut forced_off: BTreeSet<usize> = BTreeSet::new();
    for set in &convoy_sets {
        forced_off.extend(set.difference(&convoy_sets[first]));
    }

    let move_sets: Vec<BTreeSet<usize>> = minimal
        .iter()
        .map(|&i| moved_set(&solutions[i]))
        .collect();
    let maximal: Vec<usize> = (0..minimal.len())
        .filter(|&i| move_sets.iter().all(|other| other.is_subset(&move_sets[i])))
        .collect();
    match maximal.as_slice() {
        [only] => Some((&solutions[minimal[*only]], forced_off)),
        _ => None,
    }
}

/// Translates the chosen assignment into the result record.
fn project(
    map: &Map,
    state: &GameState,
    graph: &Hypergraph,
    enc: &Encoding,
    solution: &Solution,
    szykman_moves: &BTreeSet<usize>,
) -> TurnResult {
    let outcome_of = |unit: crate::board::unit::UnitId| solution.value(enc.outcome[unit.index()]);

    // Winning attacker per province (unique: victory needs strict majority).
    let winner_into = |province: ProvinceId| -> Option<OrderId> {
        graph
            .attackers(province)
            .iter()
            .copied()
            .filter(|id| enc.is_live(*id))
            .filter(|id| {
                graph.edge(*id).unit.is_some_and(|u| outcome_of(u) == val::MOVES)
            })
            .min_by_key(|id| graph.edge(*id).origin.map(|l| l.province))
    };

    let units_after: Vec<UnitReport> = state
        .units()
        .iter()
        .map(|u| {
            let position = match outcome_of(u.id) {
                val::MOVES => {
                    let order = graph.order_of_unit(u.id);
                    Position::At(enc.landing[order.index()].expect("winning move has a landing"))
                }
                val::DISLODGED => {
                    let attacker = winner_into(u.location.province)
                        .expect("dislodged units have a winning attacker");
                    Position::Dislodged {
                        at: u.location,
                        attacker_from: graph
                            .edge(attacker)
                            .origin
                            .expect("live move has an origin")
                            .province,
                    }
                }
                _ => Position::At(u.location),
            };
            UnitReport { unit: u.id, power: u.power, class: u.class, position }
        })
        .collect();

    let order_outcomes: Vec<OrderRecord> = graph
        .edges()
        .iter()
        .map(|edge| {
            let i = edge.id.index();
            let status = if enc.void[i].is_some() {
                OrderStatus::Void
            } else {
                match edge.action {
                    Action::Move { .. } => {
                        let unit = edge.unit.expect("live move has a unit");
                        if outcome_of(unit) == val::MOVES {
                            OrderStatus::Success
                        } else {
                            OrderStatus::Failed
                        }
                    }
                    Action::SupportHold { .. } | Action::SupportMove { .. } => {
                        let var = enc.support_status[i].expect("support has a status var");
                        if solution.value(var) == val::VALID {
                            OrderStatus::Success
                        } else {
                            OrderStatus::Cut
                        }
                    }
                    Action::Convoy { .. } => {
                        let var = enc.convoy_status[i].expect("convoy has a status var");
                        if solution.value(var) == val::ACTIVE {
                            OrderStatus::Success
                        } else {
                            OrderStatus::Failed
                        }
                    }
                    Action::Hold => {
                        let unit = edge.unit.expect("hold has a unit");
                        if outcome_of(unit) == val::DISLODGED {
                            OrderStatus::Failed
                        } else {
                            OrderStatus::Success
                        }
                    }
                }
            };
            OrderRecord { order: edge.id, status, void_reason: enc.void[i] }
        })
        .collect();

    let details = build_details(map, state, graph, enc, solution, szykman_moves, &winner_into);

    TurnResult { units_after, order_outcomes, details }
}

fn build_details(
    map: &Map,
    state: &GameState,
    graph: &Hypergraph,
    enc: &Encoding,
    solution: &Solution,
    szykman_moves: &BTreeSet<usize>,
    winner_into: &dyn Fn(ProvinceId) -> Option<OrderId>,
) -> Vec<ContestReport> {
    let outcome_of = |unit: crate::board::unit::UnitId| solution.value(enc.outcome[unit.index()]);

    let mut details = Vec::new();
    for province in map.provinces() {
        let live: Vec<OrderId> = graph
            .attackers(province)
            .iter()
            .copied()
            .filter(|id| enc.is_live(*id))
            .collect();
        if live.is_empty() {
            continue;
        }

        let attackers: Vec<AttackReport> = live
            .iter()
            .map(|&id| {
                let path = enc.path_status[id.index()].map(|v| solution.value(v));
                AttackReport {
                    order: id,
                    from: graph.edge(id).origin.expect("live move has an origin").province,
                    strength: solution.value(enc.strength[id.index()]),
                    convoyed: path == Some(val::CONVOYED),
                    pathless: path == Some(val::NO_PATH),
                }
            })
            .collect();

        let resident = graph.edge_at(province);
        let hold_strength = match resident {
            None => 0,
            Some(r) => {
                let unit = graph.edge(r).unit.expect("resident edge has a unit");
                if outcome_of(unit) == val::MOVES {
                    0
                } else if graph.edge(r).action.is_move() {
                    1
                } else if enc.is_live(r) {
                    solution.value(enc.strength[r.index()])
                } else {
                    // A void stationary order still holds with its valid
                    // hold supports.
                    1 + graph
                        .supports_of(r)
                        .iter()
                        .filter(|s| enc.is_live(**s))
                        .filter(|s| {
                            let var = enc.support_status[s.index()]
                                .expect("support has a status var");
                            solution.value(var) == val::VALID
                        })
                        .count() as u8
                }
            }
        };

        let winner = winner_into(province);
        let verdict = classify(map, state, graph, enc, solution, province, &attackers, winner);
        let szykman = live.iter().any(|id| szykman_moves.contains(&id.index()));

        details.push(ContestReport {
            province,
            attackers,
            hold_strength,
            winner,
            verdict,
            szykman,
        });
    }
    details
}

fn classify(
    _map: &Map,
    state: &GameState,
    graph: &Hypergraph,
    enc: &Encoding,
    solution: &Solution,
    province: ProvinceId,
    attackers: &[AttackReport],
    winner: Option<OrderId>,
) -> Verdict {
    let resident = state.unit_at(province);
    if winner.is_some() {
        let dislodged = resident
            .is_some_and(|r| solution.value(enc.outcome[r.id.index()]) == val::DISLODGED);
        return if dislodged { Verdict::Dislodged } else { Verdict::Taken };
    }

    let effective: Vec<&AttackReport> = attackers.iter().filter(|a| !a.pathless).collect();
    if effective.is_empty() {
        return Verdict::NoEffectiveAttack;
    }
    let max = effective.iter().map(|a| a.strength).max().expect("nonempty");
    let best: Vec<&&AttackReport> = effective.iter().filter(|a| a.strength == max).collect();
    if best.len() > 1 {
        return Verdict::Standoff;
    }
    let best = best[0];
    let Some(resident) = resident else {
        return Verdict::Standoff;
    };
    let resident_edge = graph.order_of_unit(resident.id);
    let swaps_back = enc.is_live(resident_edge)
        && matches!(graph.edge(resident_edge).action, Action::Move { to, .. }
            if to.province == best.from)
        && !best.convoyed;
    if swaps_back {
        return Verdict::HeadToHeadStand;
    }
    let best_power = graph.edge(best.order).power;
    if best_power == resident.power {
        return Verdict::SelfBlocked;
    }
    Verdict::Repelled
}

/// Renders every hyperedge in order notation for error payloads.
fn render_edges(map: &Map, state: &GameState, graph: &Hypergraph) -> Vec<String> {
    graph
        .edges()
        .iter()
        .map(|edge| {
            let letter = edge
                .unit
                .map(|u| state.unit(u).class)
                .map_or('?', UnitClass::letter);
            let origin = edge
                .origin
                .map(|l| map.abbr(l.province).to_string())
                .unwrap_or_else(|| "???".to_string());
            match edge.action {
                Action::Hold => format!("{letter} {origin} H"),
                Action::Move { to, .. } => {
                    format!("{letter} {origin} - {}", map.abbr(to.province))
                }
                Action::SupportHold { at } => {
                    format!("{letter} {origin} S {}", map.abbr(at))
                }
                Action::SupportMove { from, to } => {
                    format!("{letter} {origin} S {} - {}", map.abbr(from), map.abbr(to))
                }
                Action::Convoy { from, to } => {
                    format!("{letter} {origin} C {} - {}", map.abbr(from), map.abbr(to))
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::geography::Location;
    use crate::board::order::Route;
    use crate::board::standard::standard_map;
    use crate::board::state::Season;

    fn p(map: &Map, abbr: &str) -> ProvinceId {
        map.by_abbr(abbr).unwrap()
    }

    fn mv(map: &Map, from: &str, to: &str) -> Order {
        Order::Move {
            from: p(map, from),
            to: Location::new(p(map, to)),
            route: Route::Auto,
        }
    }

    #[test]
    fn uncontested_move_succeeds() {
        let map = standard_map();
        let mut state = GameState::new(1901, Season::Spring);
        state
            .add_unit(&map, Power::France, UnitClass::Army, Location::new(p(&map, "par")))
            .unwrap();
        let orders = vec![(mv(&map, "par", "bur"), Power::France)];
        let result = adjudicate(&map, &state, &orders).unwrap();
        assert_eq!(result.status(OrderId(0)), OrderStatus::Success);
        assert_eq!(
            result.units_after[0].position,
            Position::At(Location::new(p(&map, "bur")))
        );
        let contest = result.contest(p(&map, "bur")).unwrap();
        assert_eq!(contest.verdict, Verdict::Taken);
        assert_eq!(contest.winner, Some(OrderId(0)));
    }

    #[test]
    fn supported_attack_dislodges_and_reports() {
        let map = standard_map();
        let mut state = GameState::new(1901, Season::Spring);
        state
            .add_unit(&map, Power::France, UnitClass::Army, Location::new(p(&map, "par")))
            .unwrap();
        state
            .add_unit(&map, Power::France, UnitClass::Army, Location::new(p(&map, "pic")))
            .unwrap();
        state
            .add_unit(&map, Power::Germany, UnitClass::Army, Location::new(p(&map, "bur")))
            .unwrap();
        let orders = vec![
            (mv(&map, "par", "bur"), Power::France),
            (
                Order::SupportMove { by: p(&map, "pic"), from: p(&map, "par"), to: p(&map, "bur") },
                Power::France,
            ),
        ];
        let result = adjudicate(&map, &state, &orders).unwrap();
        assert_eq!(result.status(OrderId(0)), OrderStatus::Success);
        assert_eq!(result.status(OrderId(1)), OrderStatus::Success);
        // Burgundy's implicit hold failed.
        assert_eq!(result.status(OrderId(2)), OrderStatus::Failed);
        assert_eq!(
            result.units_after[2].position,
            Position::Dislodged { at: Location::new(p(&map, "bur")), attacker_from: p(&map, "par") }
        );
        let contest = result.contest(p(&map, "bur")).unwrap();
        assert_eq!(contest.verdict, Verdict::Dislodged);
        assert_eq!(contest.hold_strength, 1);
        assert_eq!(contest.attackers[0].strength, 2);
    }

    #[test]
    fn adjudication_is_deterministic() {
        let map = standard_map();
        let mut state = GameState::new(1901, Season::Spring);
        for (power, abbr) in [
            (Power::France, "par"),
            (Power::Germany, "mun"),
            (Power::Germany, "ruh"),
            (Power::France, "mar"),
        ] {
            state
                .add_unit(&map, power, UnitClass::Army, Location::new(p(&map, abbr)))
                .unwrap();
        }
        let orders = vec![
            (mv(&map, "par", "bur"), Power::France),
            (mv(&map, "mun", "bur"), Power::Germany),
            (mv(&map, "ruh", "bur"), Power::Germany),
            (mv(&map, "mar", "bur"), Power::France),
        ];
        let a = adjudicate(&map, &state, &orders).unwrap();
        let b = adjudicate(&map, &state, &orders).unwrap();
        assert_eq!(a, b);
        let contest = a.contest(p(&map, "bur")).unwrap();
        assert_eq!(contest.verdict, Verdict::Standoff);
        assert_eq!(contest.winner, None);
    }
}
