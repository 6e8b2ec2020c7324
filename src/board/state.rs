//! Game state: the unit set at the start of a turn.

use thiserror::Error;

use super::geography::{Coast, Location, Map, ProvinceId, Terrain};
use super::unit::{Power, Unit, UnitClass, UnitId};

/// The season of a game turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Season {
    Spring,
    Fall,
}

impl Season {
    /// Returns the lowercase season name.
    pub const fn name(self) -> &'static str {
        match self {
            Season::Spring => "spring",
            Season::Fall => "fall",
        }
    }
}

/// Errors raised when placing units.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("province '{0}' is already occupied")]
    Occupied(String),

    #[error("a {class:?} cannot stand in {terrain:?} province '{province}'")]
    TerrainMismatch { class: UnitClass, terrain: Terrain, province: String },

    #[error("coast '{coast}' is not a coast of province '{province}'")]
    BadCoast { province: String, coast: String },
}

/// Snapshot of a game at the start of a turn: season/year tag and unit set.
///
/// Units get dense ids in insertion order; occupancy and terrain legality
/// are enforced at insertion so the adjudicator never sees an impossible
/// position.
#[derive(Debug, Clone)]
pub struct GameState {
    pub year: u16,
    pub season: Season,
    units: Vec<Unit>,
}

impl GameState {
    /// Creates an empty state for the given turn tag.
    pub fn new(year: u16, season: Season) -> Self {
        GameState { year, season, units: Vec::new() }
    }

    /// Places a unit, assigning it the next id.
    pub fn add_unit(
        &mut self,
        map: &Map,
        power: Power,
        class: UnitClass,
        location: Location,
    ) -> Result<UnitId, StateError> {
        let terrain = map.terrain(location.province);
        let legal = match class {
            UnitClass::Army => matches!(terrain, Terrain::Inland | Terrain::Coastal),
            UnitClass::Fleet => matches!(terrain, Terrain::Coastal | Terrain::Sea),
        };
        if !legal {
            return Err(StateError::TerrainMismatch {
                class,
                terrain,
                province: map.abbr(location.province).to_string(),
            });
        }
        if location.coast != Coast::None
            && !map.split_coasts(location.province).contains(&location.coast)
        {
            return Err(StateError::BadCoast {
                province: map.abbr(location.province).to_string(),
                coast: location.coast.abbr().to_string(),
            });
        }
        if self.unit_at(location.province).is_some() {
            return Err(StateError::Occupied(map.abbr(location.province).to_string()));
        }
        let id = UnitId(self.units.len() as u16);
        self.units.push(Unit { id, power, class, location });
        Ok(id)
    }

    /// Returns the unit occupying a province, if any.
    pub fn unit_at(&self, province: ProvinceId) -> Option<&Unit> {
        self.units.iter().find(|u| u.location.province == province)
    }

    /// Returns a unit by id.
    pub fn unit(&self, id: UnitId) -> &Unit {
        &self.units[id.index()]
    }

    /// All units, in id order.
    pub fn units(&self) -> &[Unit] {
        &self.units
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::geography::MapBuilder;

    fn tiny_map() -> Map {
        let mut b = MapBuilder::new();
        b.province("aaa", "Alpha", Terrain::Inland, false, &[]).unwrap();
        b.province("bbb", "Beta", Terrain::Coastal, false, &[]).unwrap();
        b.province("sss", "Sigma Sea", Terrain::Sea, false, &[]).unwrap();
        b.province("ccc", "Gamma", Terrain::Coastal, false, &[Coast::North, Coast::South])
            .unwrap();
        b.finish()
    }

    #[test]
    fn add_unit_assigns_dense_ids() {
        let map = tiny_map();
        let mut state = GameState::new(1901, Season::Spring);
        let aaa = map.by_abbr("aaa").unwrap();
        let bbb = map.by_abbr("bbb").unwrap();
        let a = state
            .add_unit(&map, Power::France, UnitClass::Army, Location::new(aaa))
            .unwrap();
        let b = state
            .add_unit(&map, Power::Germany, UnitClass::Fleet, Location::new(bbb))
            .unwrap();
        assert_eq!(a, UnitId(0));
        assert_eq!(b, UnitId(1));
        assert_eq!(state.unit(a).power, Power::France);
        assert_eq!(state.unit_at(bbb).unwrap().class, UnitClass::Fleet);
    }

    #[test]
    fn add_unit_rejects_double_occupancy() {
        let map = tiny_map();
        let mut state = GameState::new(1901, Season::Spring);
        let aaa = map.by_abbr("aaa").unwrap();
        state.add_unit(&map, Power::France, UnitClass::Army, Location::new(aaa)).unwrap();
        assert_eq!(
            state.add_unit(&map, Power::Italy, UnitClass::Army, Location::new(aaa)),
            Err(StateError::Occupied("aaa".to_string()))
        );
    }

    #[test]
    fn add_unit_rejects_terrain_mismatch() {
        let map = tiny_map();
        let mut state = GameState::new(1901, Season::Spring);
        let aaa = map.by_abbr("aaa").unwrap();
        let sss = map.by_abbr("sss").unwrap();
        assert!(matches!(
            state.add_unit(&map, Power::England, UnitClass::Fleet, Location::new(aaa)),
            Err(StateError::TerrainMismatch { .. })
        ));
        assert!(matches!(
            state.add_unit(&map, Power::England, UnitClass::Army, Location::new(sss)),
            Err(StateError::TerrainMismatch { .. })
        ));
    }

    #[test]
    fn add_unit_checks_declared_coasts() {
        let map = tiny_map();
        let mut state = GameState::new(1901, Season::Spring);
        let ccc = map.by_abbr("ccc").unwrap();
        assert!(state
            .add_unit(&map, Power::Russia, UnitClass::Fleet, Location::with_coast(ccc, Coast::North))
            .is_ok());
        let bbb = map.by_abbr("bbb").unwrap();
        assert!(matches!(
            state.add_unit(
                &map,
                Power::Russia,
                UnitClass::Fleet,
                Location::with_coast(bbb, Coast::North)
            ),
            Err(StateError::BadCoast { .. })
        ));
    }
}
