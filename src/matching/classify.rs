use serde::Serialize;
use std::fmt;

use crate::storage::{InventoryStore, Recipe, RecipeCatalog, RecipeIngredient};
use crate::units::{is_present, is_sufficient, Unit};

/// Availability of a recipe against the current inventory.
///
/// Always derived on demand; the inventory mutates independently so the
/// value is never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchClassification {
    /// Every requirement has a matching item with enough quantity.
    Makeable,
    /// Not makeable, but at least one requirement has some quantity on hand.
    Partial,
    Unmakeable,
}

impl fmt::Display for MatchClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MatchClassification::Makeable => "makeable",
            MatchClassification::Partial => "partial",
            MatchClassification::Unmakeable => "unmakeable",
        };
        f.pad(label)
    }
}

pub fn classify(recipe: &Recipe, inventory: &InventoryStore) -> MatchClassification {
    let makeable = recipe.ingredients.iter().all(|requirement| {
        inventory
            .find_by_name(&requirement.name)
            .is_some_and(|item| is_sufficient(item.quantity, requirement.quantity))
    });
    if makeable {
        return MatchClassification::Makeable;
    }

    let partial = recipe.ingredients.iter().any(|requirement| {
        inventory
            .find_by_name(&requirement.name)
            .is_some_and(|item| is_present(item.quantity))
    });
    if partial {
        MatchClassification::Partial
    } else {
        MatchClassification::Unmakeable
    }
}

/// Every recipe paired with its classification, in catalog order.
pub fn classify_all<'a>(
    catalog: &'a RecipeCatalog,
    inventory: &InventoryStore,
) -> Vec<(&'a Recipe, MatchClassification)> {
    catalog
        .recipes()
        .iter()
        .map(|recipe| (recipe, classify(recipe, inventory)))
        .collect()
}

/// One line of the "required ingredients" checklist.
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientAvailability<'a> {
    pub requirement: &'a RecipeIngredient,
    /// Quantity and unit of the first matching inventory item.
    pub on_hand: Option<(f64, Unit)>,
    pub sufficient: bool,
}

pub fn ingredient_report<'a>(
    recipe: &'a Recipe,
    inventory: &InventoryStore,
) -> Vec<IngredientAvailability<'a>> {
    recipe
        .ingredients
        .iter()
        .map(|requirement| {
            let matched = inventory.find_by_name(&requirement.name);
            IngredientAvailability {
                requirement,
                on_hand: matched.map(|item| (item.quantity, item.unit)),
                sufficient: matched
                    .is_some_and(|item| is_sufficient(item.quantity, requirement.quantity)),
            }
        })
        .collect()
}

pub fn missing_ingredients<'a>(
    recipe: &'a Recipe,
    inventory: &InventoryStore,
) -> Vec<&'a RecipeIngredient> {
    ingredient_report(recipe, inventory)
        .into_iter()
        .filter(|line| !line.sufficient)
        .map(|line| line.requirement)
        .collect()
}
