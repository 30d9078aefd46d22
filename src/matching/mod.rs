//! Inventory-aware recipe matching.
//!
//! Ingredient lookup is a linear scan keyed on the case-folded name, first
//! match wins. Quantities are compared as plain numbers.

pub mod classify;
pub mod consumption;
pub mod query;

pub use classify::{
    classify, classify_all, ingredient_report, missing_ingredients, IngredientAvailability,
    MatchClassification,
};
pub use consumption::{consume, ConsumptionReport};
pub use query::{search, RecipeFilter, RecipeQuery, SortKey};

#[cfg(test)]
pub(crate) mod test_support {
    use crate::storage::{InventoryItem, InventoryStore, Recipe, RecipeIngredient, RecipeStep};
    use crate::units::{Category, Difficulty, Unit};

    pub fn inventory_of(stock: &[(&str, f64)]) -> InventoryStore {
        InventoryStore::new(
            stock
                .iter()
                .enumerate()
                .map(|(i, (name, quantity))| InventoryItem {
                    id: format!("item-{}", i),
                    name: name.to_string(),
                    quantity: *quantity,
                    unit: Unit::Piece,
                    category: Category::Other,
                    expiry_date: None,
                })
                .collect(),
        )
    }

    pub fn recipe_needing(id: &str, requirements: &[(&str, f64)]) -> Recipe {
        Recipe {
            id: id.to_string(),
            name: format!("Recipe {}", id),
            description: String::new(),
            image: None,
            model: None,
            prep_time: 0,
            cooking_time: 10,
            difficulty: Difficulty::Medium,
            servings: 1,
            ingredients: requirements
                .iter()
                .map(|(name, quantity)| RecipeIngredient {
                    name: name.to_string(),
                    quantity: *quantity,
                    unit: "pcs".to_string(),
                })
                .collect(),
            steps: vec![
                RecipeStep {
                    title: "Prepare".to_string(),
                    description: "Get everything ready.".to_string(),
                    timer: None,
                },
                RecipeStep {
                    title: "Cook".to_string(),
                    description: "Cook it.".to_string(),
                    timer: Some(300),
                },
                RecipeStep {
                    title: "Serve".to_string(),
                    description: "Plate and serve.".to_string(),
                    timer: None,
                },
            ],
            tips: None,
            nutrition: None,
        }
    }
}
