//! Visualiser push payloads.
//!
//! The driver around the core pushes four message kinds to the visualiser;
//! their payload shapes are dictated by the core and assembled here from
//! `(Map, GameState, TurnResult)`. Everything is string-keyed the way a
//! JSON consumer expects: provinces by short id, powers by name, locations
//! in `abbr` or `abbr/coast` notation.

use serde::Serialize;

use crate::board::geography::{Coast, Location, Map, Terrain};
use crate::board::order::Order;
use crate::board::state::GameState;
use crate::board::unit::{Power, UnitClass};
use crate::notation;
use crate::resolve::{Position, TurnResult, Verdict};

/// One province in the `initial_state` payload.
#[derive(Debug, Clone, Serialize)]
pub struct ProvincePayload {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub supply_center: bool,
    pub coasts: Vec<String>,
}

/// One adjacency edge in the `initial_state` payload.
#[derive(Debug, Clone, Serialize)]
pub struct BorderPayload {
    pub from: String,
    pub to: String,
    pub class: String,
}

/// One unit position.
#[derive(Debug, Clone, Serialize)]
pub struct UnitPayload {
    pub power: String,
    pub class: String,
    pub location: String,
}

/// One unit's post-adjudication position.
#[derive(Debug, Clone, Serialize)]
pub struct UnitAfterPayload {
    pub power: String,
    pub class: String,
    pub location: String,
    pub dislodged: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attacker_from: Option<String>,
}

/// One order's status line.
#[derive(Debug, Clone, Serialize)]
pub struct OrderPayload {
    pub order_id: usize,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub void_reason: Option<String>,
}

/// One competing move inside a contest payload.
#[derive(Debug, Clone, Serialize)]
pub struct ContestAttackPayload {
    pub from: String,
    pub strength: u8,
    pub convoyed: bool,
}

/// One contested province.
#[derive(Debug, Clone, Serialize)]
pub struct ContestPayload {
    pub province: String,
    pub attackers: Vec<ContestAttackPayload>,
    pub hold_strength: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner_from: Option<String>,
    pub verdict: String,
    pub szykman: bool,
}

/// A message pushed to the visualiser.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Push {
    InitialState {
        provinces: Vec<ProvincePayload>,
        borders: Vec<BorderPayload>,
        units: Vec<UnitPayload>,
        year: u16,
        season: String,
    },
    TurnUpdate {
        units: Vec<UnitPayload>,
        year: u16,
        season: String,
    },
    AddOrder {
        power: String,
        order: String,
    },
    AdjudicationResult {
        orders: Vec<OrderPayload>,
        units: Vec<UnitAfterPayload>,
        contests: Vec<ContestPayload>,
    },
}

impl Push {
    /// The handshake payload: full map plus the current position.
    pub fn initial_state(map: &Map, state: &GameState) -> Push {
        let provinces = map
            .provinces()
            .map(|p| {
                let data = map.province(p);
                ProvincePayload {
                    id: data.abbr.clone(),
                    name: data.name.clone(),
                    kind: terrain_name(data.terrain).to_string(),
                    supply_center: data.supply_center,
                    coasts: data.coasts.iter().map(|c| c.abbr().to_string()).collect(),
                }
            })
            .collect();

        let mut borders = Vec::new();
        for p in map.provinces() {
            for q in map.army_neighbors(p) {
                borders.push(BorderPayload {
                    from: map.abbr(p).to_string(),
                    to: map.abbr(q).to_string(),
                    class: "army".to_string(),
                });
            }
            for l in map.fleet_neighbors(Location::new(p)) {
                borders.push(BorderPayload {
                    from: map.abbr(p).to_string(),
                    to: location_text(map, l),
                    class: "fleet".to_string(),
                });
            }
        }

        Push::InitialState {
            provinces,
            borders,
            units: unit_payloads(map, state),
            year: state.year,
            season: state.season.name().to_string(),
        }
    }

    /// The start-of-turn position.
    pub fn turn_update(map: &Map, state: &GameState) -> Push {
        Push::TurnUpdate {
            units: unit_payloads(map, state),
            year: state.year,
            season: state.season.name().to_string(),
        }
    }

    /// One interactively entered order.
    pub fn add_order(map: &Map, power: Power, order: &Order) -> Push {
        Push::AddOrder {
            power: power.name().to_string(),
            order: notation::format_order(map, order),
        }
    }

    /// The adjudicated turn.
    pub fn adjudication_result(map: &Map, result: &TurnResult) -> Push {
        let orders = result
            .order_outcomes
            .iter()
            .map(|record| OrderPayload {
                order_id: record.order.index(),
                status: match record.status {
                    crate::resolve::OrderStatus::Success => "success",
                    crate::resolve::OrderStatus::Failed => "failed",
                    crate::resolve::OrderStatus::Void => "void",
                    crate::resolve::OrderStatus::Cut => "cut",
                }
                .to_string(),
                void_reason: record.void_reason.map(|r| format!("{r:?}")),
            })
            .collect();

        let units = result
            .units_after
            .iter()
            .map(|u| match u.position {
                Position::At(location) => UnitAfterPayload {
                    power: u.power.name().to_string(),
                    class: class_name(u.class).to_string(),
                    location: location_text(map, location),
                    dislodged: false,
                    attacker_from: None,
                },
                Position::Dislodged { at, attacker_from } => UnitAfterPayload {
                    power: u.power.name().to_string(),
                    class: class_name(u.class).to_string(),
                    location: location_text(map, at),
                    dislodged: true,
                    attacker_from: Some(map.abbr(attacker_from).to_string()),
                },
            })
            .collect();

        let contests = result
            .details
            .iter()
            .map(|c| ContestPayload {
                province: map.abbr(c.province).to_string(),
                attackers: c
                    .attackers
                    .iter()
                    .map(|a| ContestAttackPayload {
                        from: map.abbr(a.from).to_string(),
                        strength: a.strength,
                        convoyed: a.convoyed,
                    })
                    .collect(),
                hold_strength: c.hold_strength,
                winner_from: c.winner.map(|w| {
                    let report = c
                        .attackers
                        .iter()
                        .find(|a| a.order == w)
                        .expect("winner is among the attackers");
                    map.abbr(report.from).to_string()
                }),
                verdict: verdict_name(c.verdict).to_string(),
                szykman: c.szykman,
            })
            .collect();

        Push::AdjudicationResult { orders, units, contests }
    }
}

fn unit_payloads(map: &Map, state: &GameState) -> Vec<UnitPayload> {
    state
        .units()
        .iter()
        .map(|u| UnitPayload {
            power: u.power.name().to_string(),
            class: class_name(u.class).to_string(),
            location: location_text(map, u.location),
        })
        .collect()
}

fn location_text(map: &Map, location: Location) -> String {
    match location.coast {
        Coast::None => map.abbr(location.province).to_string(),
        coast => format!("{}/{}", map.abbr(location.province), coast.abbr()),
    }
}

fn terrain_name(terrain: Terrain) -> &'static str {
    match terrain {
        Terrain::Inland => "inland",
        Terrain::Coastal => "coastal",
        Terrain::Sea => "sea",
    }
}

fn class_name(class: UnitClass) -> &'static str {
    match class {
        UnitClass::Army => "army",
        UnitClass::Fleet => "fleet",
    }
}

fn verdict_name(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Taken => "taken",
        Verdict::Dislodged => "dislodged",
        Verdict::Standoff => "standoff",
        Verdict::Repelled => "repelled",
        Verdict::SelfBlocked => "self_blocked",
        Verdict::HeadToHeadStand => "head_to_head_stand",
        Verdict::NoEffectiveAttack => "no_effective_attack",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::order::Route;
    use crate::board::standard::{opening_position, standard_map};
    use crate::resolve::adjudicate;

    #[test]
    fn initial_state_serializes_with_tag() {
        let map = standard_map();
        let state = opening_position(&map);
        let push = Push::initial_state(&map, &state);
        let json = serde_json::to_value(&push).unwrap();
        assert_eq!(json["type"], "initial_state");
        assert_eq!(json["provinces"].as_array().unwrap().len(), 75);
        assert_eq!(json["units"].as_array().unwrap().len(), 22);
        assert_eq!(json["season"], "spring");
        assert_eq!(json["year"], 1901);
    }

    #[test]
    fn add_order_renders_notation() {
        let map = standard_map();
        let par = map.by_abbr("par").unwrap();
        let bur = map.by_abbr("bur").unwrap();
        let order =
            Order::Move { from: par, to: Location::new(bur), route: Route::Auto };
        let push = Push::add_order(&map, Power::France, &order);
        let json = serde_json::to_value(&push).unwrap();
        assert_eq!(json["type"], "add_order");
        assert_eq!(json["power"], "france");
        assert_eq!(json["order"], "par - bur");
    }

    #[test]
    fn adjudication_result_carries_contests() {
        let map = standard_map();
        let state = opening_position(&map);
        let par = map.by_abbr("par").unwrap();
        let bur = map.by_abbr("bur").unwrap();
        let orders = vec![(
            Order::Move { from: par, to: Location::new(bur), route: Route::Auto },
            Power::France,
        )];
        let result = adjudicate(&map, &state, &orders).unwrap();
        let push = Push::adjudication_result(&map, &result);
        let json = serde_json::to_value(&push).unwrap();
        assert_eq!(json["type"], "adjudication_result");
        assert_eq!(json["orders"].as_array().unwrap().len(), 22);
        let contests = json["contests"].as_array().unwrap();
        assert_eq!(contests.len(), 1);
        assert_eq!(contests[0]["province"], "bur");
        assert_eq!(contests[0]["verdict"], "taken");
        assert_eq!(contests[0]["winner_from"], "par");
    }
}
