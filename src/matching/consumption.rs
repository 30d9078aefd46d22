use tracing::{info, warn};

use super::classify::{classify, MatchClassification};
use crate::error::{KitchenError, Result};
use crate::storage::{InventoryStore, Recipe};
use crate::units::is_sufficient;

/// What a consumption pass actually did, item by item.
///
/// There is no rollback: a skipped requirement does not undo deductions
/// already applied to other items, so partial application shows up here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConsumptionReport {
    /// (inventory item id, amount deducted)
    pub applied: Vec<(String, f64)>,
    /// Requirements whose matched item no longer held enough.
    pub skipped: Vec<String>,
    /// Requirements with no matching item at all.
    pub missing: Vec<String>,
}

impl ConsumptionReport {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty() && self.missing.is_empty()
    }
}

/// Deducts the recipe's requirements from the inventory.
///
/// Refuses with [`KitchenError::NotMakeable`] unless the recipe classifies
/// as makeable on entry. Each requirement is then deducted from its first
/// case-insensitive match; a deduction that would drive the quantity below
/// zero is skipped rather than clamped.
pub fn consume(recipe: &Recipe, inventory: &mut InventoryStore) -> Result<ConsumptionReport> {
    if classify(recipe, inventory) != MatchClassification::Makeable {
        return Err(KitchenError::NotMakeable(recipe.name.clone()));
    }

    let mut report = ConsumptionReport::default();
    for requirement in &recipe.ingredients {
        match inventory.find_by_name_mut(&requirement.name) {
            Some(item) if is_sufficient(item.quantity, requirement.quantity) => {
                item.quantity -= requirement.quantity;
                report.applied.push((item.id.clone(), requirement.quantity));
            }
            Some(item) => {
                warn!(
                    "Skipping '{}': need {} but only {} left",
                    requirement.name, requirement.quantity, item.quantity
                );
                report.skipped.push(requirement.name.clone());
            }
            None => report.missing.push(requirement.name.clone()),
        }
    }

    info!(
        "Used ingredients for '{}': {} deducted, {} skipped",
        recipe.name,
        report.applied.len(),
        report.skipped.len() + report.missing.len()
    );
    Ok(report)
}
