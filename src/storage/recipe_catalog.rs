use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::kv_store::{KeyValueStore, RECIPES_KEY};
use super::sample_data::sample_recipes;
use crate::error::{KitchenError, Result};
use crate::units::Difficulty;

/// One ingredient line of a recipe. `unit` is free text and is never
/// reconciled with the inventory unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeStep {
    pub title: String,
    pub description: String,
    /// Suggested duration of the step in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timer: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeNutrition {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Minutes.
    pub prep_time: u32,
    /// Minutes.
    pub cooking_time: u32,
    pub difficulty: Difficulty,
    pub servings: u32,
    pub ingredients: Vec<RecipeIngredient>,
    pub steps: Vec<RecipeStep>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tips: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<RecipeNutrition>,
}

impl Recipe {
    pub fn total_time(&self) -> u32 {
        self.prep_time + self.cooking_time
    }

    /// Rejects definitions the matching engine cannot handle: requirement
    /// quantities must be finite and positive, and there must be at least
    /// one step to walk through.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| KitchenError::InvalidRecipe {
            id: self.id.clone(),
            reason,
        };
        if self.steps.is_empty() {
            return Err(invalid("it has no steps".to_string()));
        }
        if let Some(bad) = self
            .ingredients
            .iter()
            .find(|ingredient| !ingredient.quantity.is_finite() || ingredient.quantity <= 0.0)
        {
            return Err(invalid(format!(
                "ingredient '{}' needs a positive quantity, got {}",
                bad.name, bad.quantity
            )));
        }
        Ok(())
    }
}

/// Owned collection of recipe definitions, in catalog order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeCatalog {
    recipes: Vec<Recipe>,
}

impl RecipeCatalog {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    /// Loads the catalog snapshot from `kv`, falling back to the built-in
    /// sample recipes when the key is absent or unreadable.
    pub fn load(kv: &KeyValueStore) -> Self {
        match kv.get(RECIPES_KEY) {
            Some(snapshot) => match Self::from_snapshot(snapshot) {
                Ok(catalog) => {
                    debug!("Loaded {} recipes", catalog.recipes.len());
                    catalog
                }
                Err(e) => {
                    warn!("Recipe snapshot is malformed ({}); using sample recipes", e);
                    Self::new(sample_recipes())
                }
            },
            None => {
                info!("No saved recipes; using sample recipes");
                Self::new(sample_recipes())
            }
        }
    }

    pub fn save(&self, kv: &mut KeyValueStore) -> Result<()> {
        kv.set(RECIPES_KEY, self.to_snapshot()?);
        Ok(())
    }

    pub fn to_snapshot(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.recipes)?)
    }

    pub fn from_snapshot(snapshot: &str) -> Result<Self> {
        let recipes: Vec<Recipe> = serde_json::from_str(snapshot)?;
        Ok(Self { recipes })
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|recipe| recipe.id == id)
    }

    pub fn add(&mut self, recipe: Recipe) -> Result<()> {
        recipe.validate()?;
        if self.get(&recipe.id).is_some() {
            return Err(KitchenError::DuplicateId(recipe.id));
        }
        debug!("Adding recipe '{}' ({})", recipe.name, recipe.id);
        self.recipes.push(recipe);
        Ok(())
    }

    pub fn update(&mut self, recipe: Recipe) -> Result<()> {
        recipe.validate()?;
        let slot = self
            .recipes
            .iter_mut()
            .find(|existing| existing.id == recipe.id)
            .ok_or_else(|| KitchenError::RecipeNotFound(recipe.id.clone()))?;
        *slot = recipe;
        Ok(())
    }

    pub fn remove(&mut self, id: &str) -> Result<Recipe> {
        let pos = self
            .recipes
            .iter()
            .position(|recipe| recipe.id == id)
            .ok_or_else(|| KitchenError::RecipeNotFound(id.to_string()))?;
        Ok(self.recipes.remove(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_catalog_is_walkable() {
        let catalog = RecipeCatalog::new(sample_recipes());
        assert_eq!(catalog.len(), 3);
        assert!(catalog.recipes().iter().all(|r| !r.steps.is_empty()));
        assert_eq!(catalog.get("1").unwrap().name, "Tomato Chicken Rice");
    }

    #[test]
    fn test_add_update_remove() {
        let mut catalog = RecipeCatalog::new(sample_recipes());
        let mut salad = catalog.get("3").unwrap().clone();
        assert!(matches!(catalog.add(salad.clone()), Err(KitchenError::DuplicateId(_))));

        salad.servings = 4;
        catalog.update(salad).unwrap();
        assert_eq!(catalog.get("3").unwrap().servings, 4);

        catalog.remove("3").unwrap();
        assert!(catalog.get("3").is_none());
        assert!(matches!(catalog.remove("3"), Err(KitchenError::RecipeNotFound(_))));
    }

    #[test]
    fn test_snapshot_uses_camel_case_and_inline_steps() {
        let catalog = RecipeCatalog::new(sample_recipes());
        let snapshot = catalog.to_snapshot().unwrap();
        assert!(snapshot.contains("\"cookingTime\":30"));
        assert!(snapshot.contains("\"prepTime\":15"));
        assert!(snapshot.contains("\"timer\":420"));

        let restored = RecipeCatalog::from_snapshot(&snapshot).unwrap();
        assert_eq!(restored, catalog);
    }

    #[test]
    fn test_minimal_web_recipe_parses() {
        let snapshot = r#"[{
            "id": "10", "name": "Toast", "description": "Bread, toasted.",
            "prepTime": 1, "cookingTime": 3, "difficulty": "easy", "servings": 1,
            "ingredients": [{"name": "Bread", "quantity": 2, "unit": "pcs"}],
            "steps": [{"title": "Toast", "description": "Toast the bread.", "timer": 180}]
        }]"#;
        let catalog = RecipeCatalog::from_snapshot(snapshot).unwrap();
        let toast = catalog.get("10").unwrap();
        assert_eq!(toast.total_time(), 4);
        assert!(toast.tips.is_none());
        assert_eq!(toast.steps[0].timer, Some(180));
    }

    #[test]
    fn test_add_and_update_reject_invalid_recipes() {
        let mut catalog = RecipeCatalog::new(sample_recipes());
        let mut salad = catalog.get("3").unwrap().clone();
        salad.ingredients[0].quantity = -3.0;
        assert!(matches!(
            catalog.update(salad.clone()),
            Err(KitchenError::InvalidRecipe { .. })
        ));
        assert_eq!(catalog.get("3").unwrap().ingredients[0].quantity, 3.0);

        salad.id = "4".to_string();
        salad.ingredients[0].quantity = f64::NAN;
        assert!(matches!(catalog.add(salad.clone()), Err(KitchenError::InvalidRecipe { .. })));

        salad.ingredients[0].quantity = 0.0;
        assert!(catalog.add(salad.clone()).is_err());

        salad.ingredients[0].quantity = 2.0;
        salad.steps.clear();
        let err = catalog.add(salad).unwrap_err();
        assert!(err.to_string().contains("no steps"));
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_negative_time_fails_to_parse() {
        let snapshot = r#"[{
            "id": "11", "name": "Bad", "description": "",
            "prepTime": 1, "cookingTime": -5, "difficulty": "easy", "servings": 1,
            "ingredients": [], "steps": [{"title": "Wait", "description": ""}]
        }]"#;
        assert!(RecipeCatalog::from_snapshot(snapshot).is_err());
    }

    #[test]
    fn test_load_falls_back_on_corruption() {
        let mut kv = KeyValueStore::in_memory();
        kv.set(RECIPES_KEY, "not json at all");
        assert_eq!(RecipeCatalog::load(&kv).len(), 3);
    }
}
