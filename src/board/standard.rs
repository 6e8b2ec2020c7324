//! The standard 1901 map and opening position.
//!
//! Data tables for the 75 provinces and their borders, fed through
//! `MapBuilder`. Borders are undirected pairs, each listed once; fleet
//! endpoints on split-coast provinces carry a `/coast` suffix. Coast
//! structure: Bulgaria (ec, sc), Spain (nc, sc), St. Petersburg (nc, sc).

use super::geography::{Coast, Location, Map, MapBuilder, Terrain};
use super::state::{GameState, Season};
use super::unit::{Power, UnitClass};

#[rustfmt::skip]
const PROVINCES: &[(&str, &str, Terrain, bool, &[Coast])] = &[
    ("adr", "Adriatic Sea", Terrain::Sea, false, &[]),
    ("aeg", "Aegean Sea", Terrain::Sea, false, &[]),
    ("alb", "Albania", Terrain::Coastal, false, &[]),
    ("ank", "Ankara", Terrain::Coastal, true, &[]),
    ("apu", "Apulia", Terrain::Coastal, false, &[]),
    ("arm", "Armenia", Terrain::Coastal, false, &[]),
    ("bal", "Baltic Sea", Terrain::Sea, false, &[]),
    ("bar", "Barents Sea", Terrain::Sea, false, &[]),
    ("bel", "Belgium", Terrain::Coastal, true, &[]),
    ("ber", "Berlin", Terrain::Coastal, true, &[]),
    ("bla", "Black Sea", Terrain::Sea, false, &[]),
    ("boh", "Bohemia", Terrain::Inland, false, &[]),
    ("bot", "Gulf of Bothnia", Terrain::Sea, false, &[]),
    ("bre", "Brest", Terrain::Coastal, true, &[]),
    ("bud", "Budapest", Terrain::Inland, true, &[]),
    ("bul", "Bulgaria", Terrain::Coastal, true, &[Coast::East, Coast::South]),
    ("bur", "Burgundy", Terrain::Inland, false, &[]),
    ("cly", "Clyde", Terrain::Coastal, false, &[]),
    ("con", "Constantinople", Terrain::Coastal, true, &[]),
    ("den", "Denmark", Terrain::Coastal, true, &[]),
    ("eas", "Eastern Mediterranean", Terrain::Sea, false, &[]),
    ("edi", "Edinburgh", Terrain::Coastal, true, &[]),
    ("eng", "English Channel", Terrain::Sea, false, &[]),
    ("fin", "Finland", Terrain::Coastal, false, &[]),
    ("gal", "Galicia", Terrain::Inland, false, &[]),
    ("gas", "Gascony", Terrain::Coastal, false, &[]),
    ("gol", "Gulf of Lyon", Terrain::Sea, false, &[]),
    ("gre", "Greece", Terrain::Coastal, true, &[]),
    ("hel", "Heligoland Bight", Terrain::Sea, false, &[]),
    ("hol", "Holland", Terrain::Coastal, true, &[]),
    ("ion", "Ionian Sea", Terrain::Sea, false, &[]),
    ("iri", "Irish Sea", Terrain::Sea, false, &[]),
    ("kie", "Kiel", Terrain::Coastal, true, &[]),
    ("lon", "London", Terrain::Coastal, true, &[]),
    ("lvn", "Livonia", Terrain::Coastal, false, &[]),
    ("lvp", "Liverpool", Terrain::Coastal, true, &[]),
    ("mao", "Mid-Atlantic Ocean", Terrain::Sea, false, &[]),
    ("mar", "Marseilles", Terrain::Coastal, true, &[]),
    ("mos", "Moscow", Terrain::Inland, true, &[]),
    ("mun", "Munich", Terrain::Inland, true, &[]),
    ("naf", "North Africa", Terrain::Coastal, false, &[]),
    ("nao", "North Atlantic Ocean", Terrain::Sea, false, &[]),
    ("nap", "Naples", Terrain::Coastal, true, &[]),
    ("nrg", "Norwegian Sea", Terrain::Sea, false, &[]),
    ("nth", "North Sea", Terrain::Sea, false, &[]),
    ("nwy", "Norway", Terrain::Coastal, true, &[]),
    ("par", "Paris", Terrain::Inland, true, &[]),
    ("pic", "Picardy", Terrain::Coastal, false, &[]),
    ("pie", "Piedmont", Terrain::Coastal, false, &[]),
    ("por", "Portugal", Terrain::Coastal, true, &[]),
    ("pru", "Prussia", Terrain::Coastal, false, &[]),
    ("rom", "Rome", Terrain::Coastal, true, &[]),
    ("ruh", "Ruhr", Terrain::Inland, false, &[]),
    ("rum", "Rumania", Terrain::Coastal, true, &[]),
    ("ser", "Serbia", Terrain::Inland, true, &[]),
    ("sev", "Sevastopol", Terrain::Coastal, true, &[]),
    ("sil", "Silesia", Terrain::Inland, false, &[]),
    ("ska", "Skagerrak", Terrain::Sea, false, &[]),
    ("smy", "Smyrna", Terrain::Coastal, true, &[]),
    ("spa", "Spain", Terrain::Coastal, true, &[Coast::North, Coast::South]),
    ("stp", "St. Petersburg", Terrain::Coastal, true, &[Coast::North, Coast::South]),
    ("swe", "Sweden", Terrain::Coastal, true, &[]),
    ("syr", "Syria", Terrain::Coastal, false, &[]),
    ("tri", "Trieste", Terrain::Coastal, true, &[]),
    ("tun", "Tunisia", Terrain::Coastal, true, &[]),
    ("tus", "Tuscany", Terrain::Coastal, false, &[]),
    ("tyr", "Tyrolia", Terrain::Inland, false, &[]),
    ("tys", "Tyrrhenian Sea", Terrain::Sea, false, &[]),
    ("ukr", "Ukraine", Terrain::Inland, false, &[]),
    ("ven", "Venice", Terrain::Coastal, true, &[]),
    ("vie", "Vienna", Terrain::Inland, true, &[]),
    ("wal", "Wales", Terrain::Coastal, false, &[]),
    ("war", "Warsaw", Terrain::Inland, true, &[]),
    ("wes", "Western Mediterranean", Terrain::Sea, false, &[]),
    ("yor", "Yorkshire", Terrain::Coastal, false, &[]),
];

#[rustfmt::skip]
const ARMY_BORDERS: &[(&str, &str)] = &[
    ("alb", "gre"), ("alb", "ser"), ("alb", "tri"), ("ank", "arm"),
    ("ank", "con"), ("ank", "smy"), ("apu", "nap"), ("apu", "rom"),
    ("apu", "ven"), ("arm", "sev"), ("arm", "smy"), ("arm", "syr"),
    ("bel", "bur"), ("bel", "hol"), ("bel", "pic"), ("bel", "ruh"),
    ("ber", "kie"), ("ber", "mun"), ("ber", "pru"), ("ber", "sil"),
    ("boh", "gal"), ("boh", "mun"), ("boh", "sil"), ("boh", "tyr"),
    ("boh", "vie"), ("bre", "gas"), ("bre", "par"), ("bre", "pic"),
    ("bud", "gal"), ("bud", "rum"), ("bud", "ser"), ("bud", "tri"),
    ("bud", "vie"), ("bul", "con"), ("bul", "gre"), ("bul", "rum"),
    ("bul", "ser"), ("bur", "gas"), ("bur", "mar"), ("bur", "mun"),
    ("bur", "par"), ("bur", "pic"), ("bur", "ruh"), ("cly", "edi"),
    ("cly", "lvp"), ("con", "smy"), ("den", "kie"), ("den", "swe"),
    ("edi", "lvp"), ("edi", "yor"), ("fin", "nwy"), ("fin", "stp"),
    ("fin", "swe"), ("gal", "rum"), ("gal", "sil"), ("gal", "ukr"),
    ("gal", "vie"), ("gal", "war"), ("gas", "mar"), ("gas", "par"),
    ("gas", "spa"), ("gre", "ser"), ("hol", "ruh"), ("kie", "mun"),
    ("kie", "ruh"), ("lon", "wal"), ("lon", "yor"), ("lvn", "mos"),
    ("lvn", "pru"), ("lvn", "stp"), ("lvn", "war"), ("lvp", "wal"),
    ("lvp", "yor"), ("mar", "pie"), ("mar", "spa"), ("mos", "sev"),
    ("mos", "stp"), ("mos", "ukr"), ("mos", "war"), ("mun", "ruh"),
    ("mun", "sil"), ("mun", "tyr"), ("naf", "tun"), ("nap", "rom"),
    ("nwy", "stp"), ("nwy", "swe"), ("par", "pic"), ("pie", "tus"),
    ("pie", "tyr"), ("pie", "ven"), ("por", "spa"), ("pru", "sil"),
    ("pru", "war"), ("rom", "tus"), ("rom", "ven"), ("rum", "ser"),
    ("rum", "sev"), ("rum", "ukr"), ("ser", "tri"), ("sev", "ukr"),
    ("sil", "war"), ("smy", "syr"), ("tri", "tyr"), ("tri", "ven"),
    ("tri", "vie"), ("tus", "ven"), ("tyr", "ven"), ("tyr", "vie"),
    ("ukr", "war"), ("wal", "yor"),
];

#[rustfmt::skip]
const FLEET_BORDERS: &[(&str, &str)] = &[
    ("adr", "alb"), ("adr", "apu"), ("adr", "ion"), ("adr", "tri"),
    ("adr", "ven"), ("aeg", "bul/sc"), ("aeg", "con"), ("aeg", "eas"),
    ("aeg", "gre"), ("aeg", "ion"), ("aeg", "smy"), ("alb", "gre"),
    ("alb", "ion"), ("alb", "tri"), ("ank", "arm"), ("ank", "bla"),
    ("ank", "con"), ("apu", "ion"), ("apu", "nap"), ("apu", "ven"),
    ("arm", "bla"), ("arm", "sev"), ("bal", "ber"), ("bal", "bot"),
    ("bal", "den"), ("bal", "kie"), ("bal", "lvn"), ("bal", "pru"),
    ("bal", "swe"), ("bar", "nrg"), ("bar", "nwy"), ("bar", "stp/nc"),
    ("bel", "eng"), ("bel", "hol"), ("bel", "nth"), ("bel", "pic"),
    ("ber", "kie"), ("ber", "pru"), ("bla", "bul/ec"), ("bla", "con"),
    ("bla", "rum"), ("bla", "sev"), ("bot", "fin"), ("bot", "lvn"),
    ("bot", "stp/sc"), ("bot", "swe"), ("bre", "eng"), ("bre", "gas"),
    ("bre", "mao"), ("bre", "pic"), ("bul/ec", "con"), ("bul/ec", "rum"),
    ("bul/sc", "con"), ("bul/sc", "gre"), ("cly", "edi"), ("cly", "lvp"),
    ("cly", "nao"), ("cly", "nrg"), ("con", "smy"), ("den", "hel"),
    ("den", "kie"), ("den", "nth"), ("den", "ska"), ("den", "swe"),
    ("eas", "ion"), ("eas", "smy"), ("eas", "syr"), ("edi", "nrg"),
    ("edi", "nth"), ("edi", "yor"), ("eng", "iri"), ("eng", "lon"),
    ("eng", "mao"), ("eng", "nth"), ("eng", "pic"), ("eng", "wal"),
    ("fin", "stp/sc"), ("fin", "swe"), ("gas", "mao"), ("gas", "spa/nc"),
    ("gol", "mar"), ("gol", "pie"), ("gol", "spa/sc"), ("gol", "tus"),
    ("gol", "tys"), ("gol", "wes"), ("gre", "ion"), ("hel", "hol"),
    ("hel", "kie"), ("hel", "nth"), ("hol", "nth"), ("ion", "nap"),
    ("ion", "tun"), ("ion", "tys"), ("iri", "lvp"), ("iri", "mao"),
    ("iri", "nao"), ("iri", "wal"), ("lon", "nth"), ("lon", "wal"),
    ("lon", "yor"), ("lvn", "pru"), ("lvn", "stp/sc"), ("lvp", "nao"),
    ("lvp", "wal"), ("mao", "naf"), ("mao", "nao"), ("mao", "por"),
    ("mao", "spa/nc"), ("mao", "spa/sc"), ("mao", "wes"), ("mar", "pie"),
    ("mar", "spa/sc"), ("naf", "tun"), ("naf", "wes"), ("nao", "nrg"),
    ("nap", "rom"), ("nap", "tys"), ("nrg", "nth"), ("nrg", "nwy"),
    ("nth", "nwy"), ("nth", "ska"), ("nth", "yor"), ("nwy", "ska"),
    ("nwy", "stp/nc"), ("nwy", "swe"), ("pie", "tus"), ("por", "spa/nc"),
    ("por", "spa/sc"), ("rom", "tus"), ("rom", "tys"), ("rum", "sev"),
    ("ska", "swe"), ("smy", "syr"), ("spa/sc", "wes"), ("tri", "ven"),
    ("tun", "tys"), ("tun", "wes"), ("tus", "tys"), ("tys", "wes"),
];

/// Builds the standard map.
pub fn standard_map() -> Map {
    let mut b = MapBuilder::new();
    for &(abbr, name, terrain, sc, coasts) in PROVINCES {
        b.province(abbr, name, terrain, sc, coasts)
            .expect("standard province table is consistent");
    }
    for &(a, bb) in ARMY_BORDERS {
        b.army_border(a, bb).expect("standard army border table is consistent");
    }
    for &(a, bb) in FLEET_BORDERS {
        b.fleet_border(a, bb).expect("standard fleet border table is consistent");
    }
    b.finish()
}

/// The Spring 1901 opening: 22 units across the seven powers.
pub fn opening_position(map: &Map) -> GameState {
    let mut state = GameState::new(1901, Season::Spring);
    let setup: &[(Power, UnitClass, &str, Coast)] = &[
        (Power::Austria, UnitClass::Army, "vie", Coast::None),
        (Power::Austria, UnitClass::Army, "bud", Coast::None),
        (Power::Austria, UnitClass::Fleet, "tri", Coast::None),
        (Power::England, UnitClass::Fleet, "lon", Coast::None),
        (Power::England, UnitClass::Fleet, "edi", Coast::None),
        (Power::England, UnitClass::Army, "lvp", Coast::None),
        (Power::France, UnitClass::Fleet, "bre", Coast::None),
        (Power::France, UnitClass::Army, "par", Coast::None),
        (Power::France, UnitClass::Army, "mar", Coast::None),
        (Power::Germany, UnitClass::Fleet, "kie", Coast::None),
        (Power::Germany, UnitClass::Army, "ber", Coast::None),
        (Power::Germany, UnitClass::Army, "mun", Coast::None),
        (Power::Italy, UnitClass::Fleet, "nap", Coast::None),
        (Power::Italy, UnitClass::Army, "rom", Coast::None),
        (Power::Italy, UnitClass::Army, "ven", Coast::None),
        (Power::Russia, UnitClass::Fleet, "stp", Coast::South),
        (Power::Russia, UnitClass::Army, "mos", Coast::None),
        (Power::Russia, UnitClass::Army, "war", Coast::None),
        (Power::Russia, UnitClass::Fleet, "sev", Coast::None),
        (Power::Turkey, UnitClass::Fleet, "ank", Coast::None),
        (Power::Turkey, UnitClass::Army, "con", Coast::None),
        (Power::Turkey, UnitClass::Army, "smy", Coast::None),
    ];
    for &(power, class, abbr, coast) in setup {
        let province = map.by_abbr(abbr).expect("opening position names a standard province");
        state
            .add_unit(map, power, class, Location::with_coast(province, coast))
            .expect("opening position is a legal setup");
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::geography::Location;
    use crate::board::unit::UnitClass;

    #[test]
    fn province_and_supply_center_counts() {
        let map = standard_map();
        assert_eq!(map.province_count(), 75);
        let sc = map.provinces().filter(|&p| map.is_supply_center(p)).count();
        assert_eq!(sc, 34);
    }

    #[test]
    fn terrain_counts() {
        let map = standard_map();
        let count = |t: Terrain| map.provinces().filter(|&p| map.terrain(p) == t).count();
        assert_eq!(count(Terrain::Inland), 14);
        assert_eq!(count(Terrain::Sea), 19);
        assert_eq!(count(Terrain::Coastal), 42);
    }

    #[test]
    fn split_coast_provinces() {
        let map = standard_map();
        let bul = map.by_abbr("bul").unwrap();
        let spa = map.by_abbr("spa").unwrap();
        let stp = map.by_abbr("stp").unwrap();
        assert_eq!(map.split_coasts(bul), &[Coast::East, Coast::South]);
        assert_eq!(map.split_coasts(spa), &[Coast::North, Coast::South]);
        assert_eq!(map.split_coasts(stp), &[Coast::North, Coast::South]);
        assert_eq!(map.provinces().filter(|&p| !map.split_coasts(p).is_empty()).count(), 3);
    }

    #[test]
    fn smyrna_ankara_is_army_only() {
        let map = standard_map();
        let smy = Location::new(map.by_abbr("smy").unwrap());
        let ank = Location::new(map.by_abbr("ank").unwrap());
        assert!(map.adjacent(smy, ank, UnitClass::Army));
        assert!(!map.adjacent(smy, ank, UnitClass::Fleet));
    }

    #[test]
    fn vienna_venice_not_adjacent() {
        let map = standard_map();
        let vie = Location::new(map.by_abbr("vie").unwrap());
        let ven = Location::new(map.by_abbr("ven").unwrap());
        assert!(!map.adjacent(vie, ven, UnitClass::Army));
        assert!(!map.adjacent(vie, ven, UnitClass::Fleet));
    }

    #[test]
    fn marseilles_reaches_spain_south_coast_only() {
        let map = standard_map();
        let mar = Location::new(map.by_abbr("mar").unwrap());
        let spa = map.by_abbr("spa").unwrap();
        assert_eq!(map.fleet_coasts_to(mar, spa), vec![Coast::South]);
    }

    #[test]
    fn gascony_burgundy_army_only() {
        let map = standard_map();
        let gas = Location::new(map.by_abbr("gas").unwrap());
        let bur = Location::new(map.by_abbr("bur").unwrap());
        assert!(map.adjacent(gas, bur, UnitClass::Army));
        assert!(!map.adjacent(gas, bur, UnitClass::Fleet));
    }

    #[test]
    fn north_sea_fleet_neighbors() {
        let map = standard_map();
        let nth = map.by_abbr("nth").unwrap();
        let mut reachable: Vec<&str> = map
            .fleet_neighbors(Location::new(nth))
            .map(|l| map.abbr(l.province))
            .collect();
        reachable.sort_unstable();
        reachable.dedup();
        assert_eq!(
            reachable,
            ["bel", "den", "edi", "eng", "hel", "hol", "lon", "nrg", "nwy", "ska", "yor"]
        );
    }

    #[test]
    fn opening_position_has_22_units() {
        let map = standard_map();
        let state = opening_position(&map);
        assert_eq!(state.units().len(), 22);
        let stp = map.by_abbr("stp").unwrap();
        let fleet = state.unit_at(stp).unwrap();
        assert_eq!(fleet.class, UnitClass::Fleet);
        assert_eq!(fleet.location.coast, Coast::South);
    }
}
