//! Units and the powers that own them.

use super::geography::Location;

/// One of the seven great powers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Power {
    Austria,
    England,
    France,
    Germany,
    Italy,
    Russia,
    Turkey,
}

/// All seven powers in standard order.
pub const ALL_POWERS: [Power; 7] = [
    Power::Austria,
    Power::England,
    Power::France,
    Power::Germany,
    Power::Italy,
    Power::Russia,
    Power::Turkey,
];

impl Power {
    /// Returns the lowercase full name of this power.
    pub const fn name(self) -> &'static str {
        match self {
            Power::Austria => "austria",
            Power::England => "england",
            Power::France => "france",
            Power::Germany => "germany",
            Power::Italy => "italy",
            Power::Russia => "russia",
            Power::Turkey => "turkey",
        }
    }

    /// Parses a power from its lowercase full name.
    pub fn from_name(name: &str) -> Option<Power> {
        ALL_POWERS.into_iter().find(|p| p.name() == name)
    }
}

/// The class of a military unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitClass {
    Army,
    Fleet,
}

impl UnitClass {
    /// Returns the uppercase single-letter abbreviation used in notation.
    pub const fn letter(self) -> char {
        match self {
            UnitClass::Army => 'A',
            UnitClass::Fleet => 'F',
        }
    }
}

/// Dense identifier of a unit within one `GameState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitId(pub u16);

impl UnitId {
    /// Returns the id as a usize index.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A military unit on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unit {
    pub id: UnitId,
    pub power: Power,
    pub class: UnitClass,
    pub location: Location,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_name_roundtrip() {
        for p in ALL_POWERS {
            assert_eq!(Power::from_name(p.name()), Some(p));
        }
        assert_eq!(Power::from_name("atlantis"), None);
    }

    #[test]
    fn class_letters() {
        assert_eq!(UnitClass::Army.letter(), 'A');
        assert_eq!(UnitClass::Fleet.letter(), 'F');
    }
}
