use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Measurement unit of an inventory item.
///
/// Serialised with the short tags used in the stored snapshot (`pcs`, `g`, ...).
/// No conversion between units is ever performed: a recipe requirement is
/// compared against an inventory quantity numerically, whatever the units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "pcs")]
    Piece,
    #[serde(rename = "g")]
    Gram,
    #[serde(rename = "kg")]
    Kilogram,
    #[serde(rename = "ml")]
    Milliliter,
    #[serde(rename = "l")]
    Liter,
    #[serde(rename = "tbsp")]
    Tablespoon,
    #[serde(rename = "tsp")]
    Teaspoon,
}

impl Unit {
    pub const ALL: [Unit; 7] = [
        Unit::Piece,
        Unit::Gram,
        Unit::Kilogram,
        Unit::Milliliter,
        Unit::Liter,
        Unit::Tablespoon,
        Unit::Teaspoon,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            Unit::Piece => "pcs",
            Unit::Gram => "g",
            Unit::Kilogram => "kg",
            Unit::Milliliter => "ml",
            Unit::Liter => "l",
            Unit::Tablespoon => "tbsp",
            Unit::Teaspoon => "tsp",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.tag())
    }
}

impl FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Unit::ALL
            .iter()
            .copied()
            .find(|unit| unit.tag() == wanted)
            .ok_or_else(|| format!("unknown unit '{}' (expected one of pcs, g, kg, ml, l, tbsp, tsp)", s))
    }
}

/// Shelf category an inventory item is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Produce,
    Dairy,
    Meat,
    Grains,
    Spices,
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Produce,
        Category::Dairy,
        Category::Meat,
        Category::Grains,
        Category::Spices,
        Category::Other,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            Category::Produce => "produce",
            Category::Dairy => "dairy",
            Category::Meat => "meat",
            Category::Grains => "grains",
            Category::Spices => "spices",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.tag())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Category::ALL
            .iter()
            .copied()
            .find(|category| category.tag() == wanted)
            .ok_or_else(|| format!("unknown category '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Fixed ordering used by the difficulty sort: easy=1, medium=2, hard=3.
    pub fn rank(&self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.pad(label)
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty '{}'", other)),
        }
    }
}

/// `true` when the quantity on hand covers the required amount.
pub fn is_sufficient(have: f64, need: f64) -> bool {
    have >= need
}

/// `true` when any amount at all is on hand.
pub fn is_present(have: f64) -> bool {
    have > 0.0
}

/// Case-insensitive ingredient name comparison.
pub fn names_match(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
