//! Order text notation.
//!
//! The compact notation the command-line collaborator feeds the core:
//!
//! ```text
//! par H                hold
//! par - bur            move
//! gre - syr vc         move, committed to the convoy route
//! mar S bur            support hold
//! mar S par - bur      support move
//! nth C lon - nwy      convoy
//! ```
//!
//! Provinces are short identifiers from the map; a fleet destination on a
//! split-coast province takes a `/coast` suffix (`nrg - stp/nc`).

use thiserror::Error;

use crate::board::geography::{Coast, Location, Map};
use crate::board::order::{Order, Route};

/// Errors raised while parsing order text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotationError {
    #[error("empty input")]
    EmptyInput,

    #[error("unknown province '{0}'")]
    UnknownProvince(String),

    #[error("unknown coast in '{0}'")]
    UnknownCoast(String),

    #[error("unexpected end of input, expected {0}")]
    UnexpectedEnd(String),

    #[error("unexpected token '{found}', expected {expected}")]
    UnexpectedToken { expected: String, found: String },

    #[error("trailing input '{0}'")]
    TrailingInput(String),
}

/// Parses one order line.
pub fn parse_order(map: &Map, s: &str) -> Result<Order, NotationError> {
    let tokens: Vec<&str> = s.split_whitespace().collect();
    if tokens.is_empty() {
        return Err(NotationError::EmptyInput);
    }

    let unit = parse_location(map, tokens[0])?.province;
    let verb = tokens
        .get(1)
        .ok_or_else(|| NotationError::UnexpectedEnd("an order verb (H, -, S, C)".to_string()))?;

    match *verb {
        "H" => {
            expect_end(&tokens, 2)?;
            Ok(Order::Hold { unit })
        }

        "-" => {
            let to = parse_location(map, expect_token(&tokens, 2, "a destination")?)?;
            let route = match tokens.get(3) {
                Some(&"vc") => {
                    expect_end(&tokens, 4)?;
                    Route::ViaConvoy
                }
                Some(other) => {
                    return Err(NotationError::UnexpectedToken {
                        expected: "'vc' or end of order".to_string(),
                        found: other.to_string(),
                    })
                }
                None => Route::Auto,
            };
            Ok(Order::Move { from: unit, to, route })
        }

        "S" => {
            let at = parse_location(map, expect_token(&tokens, 2, "a supported location")?)?
                .province;
            match tokens.get(3) {
                None => Ok(Order::SupportHold { by: unit, at }),
                Some(&"-") => {
                    let to = parse_location(map, expect_token(&tokens, 4, "a destination")?)?
                        .province;
                    expect_end(&tokens, 5)?;
                    Ok(Order::SupportMove { by: unit, from: at, to })
                }
                Some(other) => Err(NotationError::UnexpectedToken {
                    expected: "'-' or end of order".to_string(),
                    found: other.to_string(),
                }),
            }
        }

        "C" => {
            let from = parse_location(map, expect_token(&tokens, 2, "a convoy origin")?)?
                .province;
            let dash = expect_token(&tokens, 3, "'-'")?;
            if dash != "-" {
                return Err(NotationError::UnexpectedToken {
                    expected: "-".to_string(),
                    found: dash.to_string(),
                });
            }
            let to =
                parse_location(map, expect_token(&tokens, 4, "a destination")?)?.province;
            expect_end(&tokens, 5)?;
            Ok(Order::Convoy { by: unit, from, to })
        }

        other => Err(NotationError::UnexpectedToken {
            expected: "H, -, S or C".to_string(),
            found: other.to_string(),
        }),
    }
}

/// Parses a newline-separated block of orders, skipping blank lines.
pub fn parse_orders(map: &Map, s: &str) -> Result<Vec<Order>, NotationError> {
    s.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| parse_order(map, line))
        .collect()
}

/// Formats one order in canonical notation.
pub fn format_order(map: &Map, order: &Order) -> String {
    match *order {
        Order::Hold { unit } => format!("{} H", map.abbr(unit)),
        Order::Move { from, to, route } => {
            let suffix = match route {
                Route::Auto => "",
                Route::ViaConvoy => " vc",
            };
            format!("{} - {}{}", map.abbr(from), format_location(map, to), suffix)
        }
        Order::SupportHold { by, at } => format!("{} S {}", map.abbr(by), map.abbr(at)),
        Order::SupportMove { by, from, to } => {
            format!("{} S {} - {}", map.abbr(by), map.abbr(from), map.abbr(to))
        }
        Order::Convoy { by, from, to } => {
            format!("{} C {} - {}", map.abbr(by), map.abbr(from), map.abbr(to))
        }
    }
}

fn format_location(map: &Map, location: Location) -> String {
    match location.coast {
        Coast::None => map.abbr(location.province).to_string(),
        coast => format!("{}/{}", map.abbr(location.province), coast.abbr()),
    }
}

fn parse_location(map: &Map, token: &str) -> Result<Location, NotationError> {
    let (abbr, coast) = match token.split_once('/') {
        Some((a, c)) => {
            let coast = Coast::from_abbr(c)
                .filter(|&c| c != Coast::None)
                .ok_or_else(|| NotationError::UnknownCoast(token.to_string()))?;
            (a, coast)
        }
        None => (token, Coast::None),
    };
    let province = map
        .by_abbr(abbr)
        .ok_or_else(|| NotationError::UnknownProvince(abbr.to_string()))?;
    Ok(Location::with_coast(province, coast))
}

fn expect_token<'a>(
    tokens: &[&'a str],
    index: usize,
    expected: &str,
) -> Result<&'a str, NotationError> {
    tokens
        .get(index)
        .copied()
        .ok_or_else(|| NotationError::UnexpectedEnd(expected.to_string()))
}

fn expect_end(tokens: &[&str], from: usize) -> Result<(), NotationError> {
    if tokens.len() > from {
        Err(NotationError::TrailingInput(tokens[from..].join(" ")))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::standard::standard_map;

    #[test]
    fn parse_each_variant() {
        let map = standard_map();
        let par = map.by_abbr("par").unwrap();
        let bur = map.by_abbr("bur").unwrap();
        let mar = map.by_abbr("mar").unwrap();

        assert_eq!(parse_order(&map, "par H"), Ok(Order::Hold { unit: par }));
        assert_eq!(
            parse_order(&map, "par - bur"),
            Ok(Order::Move { from: par, to: Location::new(bur), route: Route::Auto })
        );
        assert_eq!(
            parse_order(&map, "mar S bur"),
            Ok(Order::SupportHold { by: mar, at: bur })
        );
        assert_eq!(
            parse_order(&map, "mar S par - bur"),
            Ok(Order::SupportMove { by: mar, from: par, to: bur })
        );
        let nth = map.by_abbr("nth").unwrap();
        let lon = map.by_abbr("lon").unwrap();
        let nwy = map.by_abbr("nwy").unwrap();
        assert_eq!(
            parse_order(&map, "nth C lon - nwy"),
            Ok(Order::Convoy { by: nth, from: lon, to: nwy })
        );
    }

    #[test]
    fn parse_coast_and_via_convoy() {
        let map = standard_map();
        let nrg = map.by_abbr("nrg").unwrap();
        let stp = map.by_abbr("stp").unwrap();
        assert_eq!(
            parse_order(&map, "nrg - stp/nc"),
            Ok(Order::Move {
                from: nrg,
                to: Location::with_coast(stp, Coast::North),
                route: Route::Auto,
            })
        );
        let lon = map.by_abbr("lon").unwrap();
        let nwy = map.by_abbr("nwy").unwrap();
        assert_eq!(
            parse_order(&map, "lon - nwy vc"),
            Ok(Order::Move { from: lon, to: Location::new(nwy), route: Route::ViaConvoy })
        );
    }

    #[test]
    fn parse_errors() {
        let map = standard_map();
        assert_eq!(parse_order(&map, "   "), Err(NotationError::EmptyInput));
        assert_eq!(
            parse_order(&map, "xyz H"),
            Err(NotationError::UnknownProvince("xyz".to_string()))
        );
        assert_eq!(
            parse_order(&map, "par - stp/wc"),
            Err(NotationError::UnknownCoast("stp/wc".to_string()))
        );
        assert!(matches!(parse_order(&map, "par"), Err(NotationError::UnexpectedEnd(_))));
        assert!(matches!(
            parse_order(&map, "par X bur"),
            Err(NotationError::UnexpectedToken { .. })
        ));
        assert!(matches!(
            parse_order(&map, "par H please"),
            Err(NotationError::TrailingInput(_))
        ));
    }

    #[test]
    fn format_round_trip() {
        let map = standard_map();
        for text in [
            "par H",
            "par - bur",
            "nrg - stp/nc",
            "lon - nwy vc",
            "mar S bur",
            "mar S par - bur",
            "nth C lon - nwy",
        ] {
            let order = parse_order(&map, text).unwrap();
            assert_eq!(format_order(&map, &order), text);
        }
    }

    #[test]
    fn parse_orders_block() {
        let map = standard_map();
        let orders = parse_orders(&map, "par - bur\n\n  mar S par - bur\n").unwrap();
        assert_eq!(orders.len(), 2);
    }
}
