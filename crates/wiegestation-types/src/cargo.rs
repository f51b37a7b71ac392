//! Cargo (material) labels accepted at the weighbridge

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Material category of a load. The set is closed; labels are matched exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CargoType {
    #[serde(rename = "Holz")]
    Holz,
    #[serde(rename = "Kies")]
    Kies,
    #[serde(rename = "Müll")]
    Muell,
    #[serde(rename = "Papier")]
    Papier,
    #[serde(rename = "Sand")]
    Sand,
    #[serde(rename = "Aushub")]
    Aushub,
    #[serde(rename = "gesiebte Erde fein")]
    GesiebteErdeFein,
    #[serde(rename = "gesiebte Erde Grob")]
    GesiebteErdeGrob,
    #[serde(rename = "Steine")]
    Steine,
    #[serde(rename = "Lego Steine (Beton)")]
    LegoSteineBeton,
    #[serde(rename = "Chipsi Mais")]
    ChipsiMais,
    #[serde(rename = "Seramis")]
    Seramis,
    #[serde(rename = "Kronkorken")]
    Kronkorken,
    #[serde(rename = "Dosen")]
    Dosen,
}

impl CargoType {
    /// Every label in the order the weighing form offers them
    pub const ALL: [CargoType; 14] = [
        CargoType::Holz,
        CargoType::Kies,
        CargoType::Muell,
        CargoType::Papier,
        CargoType::Sand,
        CargoType::Aushub,
        CargoType::GesiebteErdeFein,
        CargoType::GesiebteErdeGrob,
        CargoType::Steine,
        CargoType::LegoSteineBeton,
        CargoType::ChipsiMais,
        CargoType::Seramis,
        CargoType::Kronkorken,
        CargoType::Dosen,
    ];

    /// Display label, identical to the persisted form
    pub fn label(&self) -> &'static str {
        match self {
            CargoType::Holz => "Holz",
            CargoType::Kies => "Kies",
            CargoType::Muell => "Müll",
            CargoType::Papier => "Papier",
            CargoType::Sand => "Sand",
            CargoType::Aushub => "Aushub",
            CargoType::GesiebteErdeFein => "gesiebte Erde fein",
            CargoType::GesiebteErdeGrob => "gesiebte Erde Grob",
            CargoType::Steine => "Steine",
            CargoType::LegoSteineBeton => "Lego Steine (Beton)",
            CargoType::ChipsiMais => "Chipsi Mais",
            CargoType::Seramis => "Seramis",
            CargoType::Kronkorken => "Kronkorken",
            CargoType::Dosen => "Dosen",
        }
    }
}

impl fmt::Display for CargoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CargoType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CargoType::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| Error::InvalidCargoType(s.to_string()))
    }
}
