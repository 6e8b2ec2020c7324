//! Province geography and the immutable map.
//!
//! A `Map` is built once from loader-supplied data through `MapBuilder` and
//! never mutated afterwards. Provinces are interned as dense `ProvinceId`s;
//! adjacency is stored per unit class because armies and fleets see
//! different graphs. Fleet adjacency is coast-aware: on split-coast
//! provinces (bul, spa, stp on the standard map) a fleet edge names the
//! coast it touches, and `Coast::None` in a query acts as a wildcard.

use std::collections::HashMap;

use thiserror::Error;

use super::unit::UnitClass;

/// Dense identifier of a province within one `Map`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProvinceId(pub u16);

impl ProvinceId {
    /// Returns the id as a usize index.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Classifies a province by terrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Terrain {
    Inland,
    Coastal,
    Sea,
}

/// Coast specifier for split-coast provinces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Coast {
    None,
    North,
    South,
    East,
}

impl Coast {
    /// Returns the 2-letter abbreviation (empty string for None).
    pub const fn abbr(self) -> &'static str {
        match self {
            Coast::None => "",
            Coast::North => "nc",
            Coast::South => "sc",
            Coast::East => "ec",
        }
    }

    /// Parses a coast from its 2-letter abbreviation.
    pub fn from_abbr(s: &str) -> Option<Coast> {
        match s {
            "" => Some(Coast::None),
            "nc" => Some(Coast::North),
            "sc" => Some(Coast::South),
            "ec" => Some(Coast::East),
            _ => Option::None,
        }
    }
}

/// A position on the board: a province with an optional coast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    pub province: ProvinceId,
    pub coast: Coast,
}

impl Location {
    /// Creates a location without a coast.
    pub fn new(province: ProvinceId) -> Self {
        Self { province, coast: Coast::None }
    }

    /// Creates a location with a coast specifier.
    pub fn with_coast(province: ProvinceId, coast: Coast) -> Self {
        Self { province, coast }
    }
}

/// Metadata for one province.
#[derive(Debug, Clone)]
pub struct ProvinceData {
    pub abbr: String,
    pub name: String,
    pub terrain: Terrain,
    pub supply_center: bool,
    pub coasts: Vec<Coast>,
}

/// A directed fleet edge: leaving `from_coast`, arriving at `(to, to_coast)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FleetEdge {
    from_coast: Coast,
    to: ProvinceId,
    to_coast: Coast,
}

/// Errors raised while assembling a map.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError {
    #[error("duplicate province '{0}'")]
    DuplicateProvince(String),

    #[error("unknown province '{0}'")]
    UnknownProvince(String),

    #[error("invalid coast tag in '{0}'")]
    InvalidCoast(String),

    #[error("coast '{coast}' not declared for province '{province}'")]
    UndeclaredCoast { province: String, coast: String },

    #[error("fleet border touches inland province '{0}'")]
    FleetBorderInland(String),

    #[error("army border touches sea province '{0}'")]
    ArmyBorderSea(String),
}

/// The immutable game map: province identity, terrain, supply centers,
/// and per-class adjacency.
#[derive(Debug, Clone)]
pub struct Map {
    provinces: Vec<ProvinceData>,
    by_abbr: HashMap<String, ProvinceId>,
    army_adj: Vec<Vec<ProvinceId>>,
    fleet_adj: Vec<Vec<FleetEdge>>,
}

impl Map {
    /// Returns the number of provinces.
    pub fn province_count(&self) -> usize {
        self.provinces.len()
    }

    /// Iterates all province ids in index order.
    pub fn provinces(&self) -> impl Iterator<Item = ProvinceId> + '_ {
        (0..self.provinces.len() as u16).map(ProvinceId)
    }

    /// Returns the metadata for a province.
    pub fn province(&self, id: ProvinceId) -> &ProvinceData {
        &self.provinces[id.index()]
    }

    /// Returns the terrain kind of a province.
    pub fn terrain(&self, id: ProvinceId) -> Terrain {
        self.provinces[id.index()].terrain
    }

    /// Returns true if the province is a supply center.
    pub fn is_supply_center(&self, id: ProvinceId) -> bool {
        self.provinces[id.index()].supply_center
    }

    /// Returns the declared coasts of a split-coast province, empty otherwise.
    pub fn split_coasts(&self, id: ProvinceId) -> &[Coast] {
        &self.provinces[id.index()].coasts
    }

    /// Returns the short identifier of a province.
    pub fn abbr(&self, id: ProvinceId) -> &str {
        &self.provinces[id.index()].abbr
    }

    /// Looks up a province by its short identifier.
    pub fn by_abbr(&self, abbr: &str) -> Option<ProvinceId> {
        self.by_abbr.get(abbr).copied()
    }

    /// Returns true if a unit of the given class can move from `from` to `to`.
    ///
    /// Army queries ignore coasts entirely. Fleet queries match coasts where
    /// both sides specify one; `Coast::None` on either side of the query
    /// matches any edge coast.
    pub fn adjacent(&self, from: Location, to: Location, class: UnitClass) -> bool {
        match class {
            UnitClass::Army => self.army_adj[from.province.index()].contains(&to.province),
            UnitClass::Fleet => self.fleet_adj[from.province.index()].iter().any(|e| {
                e.to == to.province
                    && coast_matches(from.coast, e.from_coast)
                    && coast_matches(to.coast, e.to_coast)
            }),
        }
    }

    /// Iterates the provinces an army can reach from `p`.
    pub fn army_neighbors(&self, p: ProvinceId) -> impl Iterator<Item = ProvinceId> + '_ {
        self.army_adj[p.index()].iter().copied()
    }

    /// Iterates the locations a fleet at `from` can reach.
    pub fn fleet_neighbors(&self, from: Location) -> impl Iterator<Item = Location> + '_ {
        self.fleet_adj[from.province.index()]
            .iter()
            .filter(move |e| coast_matches(from.coast, e.from_coast))
            .map(|e| Location::with_coast(e.to, e.to_coast))
    }

    /// Returns the coasts of `to` a fleet at `from` can arrive on.
    pub fn fleet_coasts_to(&self, from: Location, to: ProvinceId) -> Vec<Coast> {
        let mut coasts = Vec::new();
        for e in &self.fleet_adj[from.province.index()] {
            if e.to != to || !coast_matches(from.coast, e.from_coast) {
                continue;
            }
            if !coasts.contains(&e.to_coast) {
                coasts.push(e.to_coast);
            }
        }
        coasts
    }
}

fn coast_matches(query: Coast, edge: Coast) -> bool {
    query == Coast::None || edge == Coast::None || query == edge
}

/// One-shot map construction.
///
/// Provinces are declared first, then borders; `finish` consumes the builder.
/// Border endpoints accept `"abbr"` or `"abbr/coast"` notation for fleet
/// edges onto split coasts.
#[derive(Debug, Default)]
pub struct MapBuilder {
    provinces: Vec<ProvinceData>,
    by_abbr: HashMap<String, ProvinceId>,
    army_pairs: Vec<(ProvinceId, ProvinceId)>,
    fleet_pairs: Vec<(Location, Location)>,
}

impl MapBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a province. Split coasts are declared in the same call.
    pub fn province(
        &mut self,
        abbr: &str,
        name: &str,
        terrain: Terrain,
        supply_center: bool,
        coasts: &[Coast],
    ) -> Result<ProvinceId, MapError> {
        if self.by_abbr.contains_key(abbr) {
            return Err(MapError::DuplicateProvince(abbr.to_string()));
        }
        let id = ProvinceId(self.provinces.len() as u16);
        self.provinces.push(ProvinceData {
            abbr: abbr.to_string(),
            name: name.to_string(),
            terrain,
            supply_center,
            coasts: coasts.to_vec(),
        });
        self.by_abbr.insert(abbr.to_string(), id);
        Ok(id)
    }

    /// Declares a symmetric army border between two provinces.
    pub fn army_border(&mut self, a: &str, b: &str) -> Result<(), MapError> {
        let a = self.resolve_plain(a)?;
        let b = self.resolve_plain(b)?;
        for p in [a, b] {
            if self.provinces[p.index()].terrain == Terrain::Sea {
                return Err(MapError::ArmyBorderSea(self.provinces[p.index()].abbr.clone()));
            }
        }
        self.army_pairs.push((a, b));
        Ok(())
    }

    /// Declares a symmetric fleet border between two locations.
    pub fn fleet_border(&mut self, a: &str, b: &str) -> Result<(), MapError> {
        let a = self.resolve_coastal(a)?;
        let b = self.resolve_coastal(b)?;
        for l in [a, b] {
            if self.provinces[l.province.index()].terrain == Terrain::Inland {
                return Err(MapError::FleetBorderInland(
                    self.provinces[l.province.index()].abbr.clone(),
                ));
            }
        }
        self.fleet_pairs.push((a, b));
        Ok(())
    }

    /// Finalizes the map.
    pub fn finish(self) -> Map {
        let n = self.provinces.len();
        let mut army_adj = vec![Vec::new(); n];
        let mut fleet_adj: Vec<Vec<FleetEdge>> = vec![Vec::new(); n];

        for (a, b) in self.army_pairs {
            if !army_adj[a.index()].contains(&b) {
                army_adj[a.index()].push(b);
            }
            if !army_adj[b.index()].contains(&a) {
                army_adj[b.index()].push(a);
            }
        }
        for (a, b) in self.fleet_pairs {
            let fwd = FleetEdge { from_coast: a.coast, to: b.province, to_coast: b.coast };
            let rev = FleetEdge { from_coast: b.coast, to: a.province, to_coast: a.coast };
            if !fleet_adj[a.province.index()].contains(&fwd) {
                fleet_adj[a.province.index()].push(fwd);
            }
            if !fleet_adj[b.province.index()].contains(&rev) {
                fleet_adj[b.province.index()].push(rev);
            }
        }

        Map { provinces: self.provinces, by_abbr: self.by_abbr, army_adj, fleet_adj }
    }

    fn resolve_plain(&self, abbr: &str) -> Result<ProvinceId, MapError> {
        self.by_abbr
            .get(abbr)
            .copied()
            .ok_or_else(|| MapError::UnknownProvince(abbr.to_string()))
    }

    fn resolve_coastal(&self, spec: &str) -> Result<Location, MapError> {
        let (abbr, coast) = match spec.split_once('/') {
            Some((a, c)) => {
                let coast =
                    Coast::from_abbr(c).ok_or_else(|| MapError::InvalidCoast(spec.to_string()))?;
                (a, coast)
            }
            None => (spec, Coast::None),
        };
        let id = self.resolve_plain(abbr)?;
        if coast != Coast::None && !self.provinces[id.index()].coasts.contains(&coast) {
            return Err(MapError::UndeclaredCoast {
                province: abbr.to_string(),
                coast: coast.abbr().to_string(),
            });
        }
        Ok(Location::with_coast(id, coast))
    }
}
