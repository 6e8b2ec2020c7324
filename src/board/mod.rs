//! Board representation: geography, units, orders, and game state.

pub mod geography;
pub mod order;
pub mod standard;
pub mod state;
pub mod unit;

pub use geography::{Coast, Location, Map, MapBuilder, MapError, ProvinceData, ProvinceId, Terrain};
pub use order::{Order, Route};
pub use standard::{opening_position, standard_map};
pub use state::{GameState, Season, StateError};
pub use unit::{Power, Unit, UnitClass, UnitId, ALL_POWERS};
