pub mod inventory;
pub mod kv_store;
pub mod profile;
pub mod recipe_catalog;
pub mod sample_data;

pub use inventory::{InventoryItem, InventoryStore};
pub use kv_store::KeyValueStore;
pub use profile::{Language, UserProfile};
pub use recipe_catalog::{Recipe, RecipeCatalog, RecipeIngredient, RecipeNutrition, RecipeStep};
