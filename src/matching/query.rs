use std::cmp::Ordering;
use std::str::FromStr;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::classify::{classify, MatchClassification};
use crate::storage::{InventoryStore, Recipe, RecipeCatalog};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecipeFilter {
    #[default]
    All,
    /// Exactly `makeable`.
    Makeable,
    /// Exactly `partial`; makeable recipes are excluded.
    Partial,
}

impl RecipeFilter {
    fn admits(&self, class: MatchClassification) -> bool {
        match self {
            RecipeFilter::All => true,
            RecipeFilter::Makeable => class == MatchClassification::Makeable,
            RecipeFilter::Partial => class == MatchClassification::Partial,
        }
    }
}

impl FromStr for RecipeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(RecipeFilter::All),
            "makeable" => Ok(RecipeFilter::Makeable),
            "partial" => Ok(RecipeFilter::Partial),
            other => Err(format!("unknown filter '{}' (expected all, makeable or partial)", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Name,
    /// Ascending cooking time.
    Time,
    /// Ascending difficulty rank.
    Difficulty,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "time" => Ok(SortKey::Time),
            "difficulty" => Ok(SortKey::Difficulty),
            other => Err(format!("unknown sort key '{}' (expected name, time or difficulty)", other)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeQuery {
    pub text: String,
    pub filter: RecipeFilter,
    pub sort: SortKey,
}

impl RecipeQuery {
    pub fn new(text: impl Into<String>, filter: RecipeFilter, sort: SortKey) -> Self {
        Self {
            text: text.into(),
            filter,
            sort,
        }
    }
}

fn matches_text(recipe: &Recipe, needle: &str) -> bool {
    needle.is_empty()
        || recipe.name.to_lowercase().contains(needle)
        || recipe.description.to_lowercase().contains(needle)
}

// Base letters only: decomposed, combining marks dropped, lowercased.
fn collation_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

// Dictionary order: base letters first, then accents, then case
// (lowercase before uppercase).
fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| b.cmp(a))
}

fn compare(sort: SortKey, a: &Recipe, b: &Recipe) -> Ordering {
    match sort {
        SortKey::Name => compare_names(&a.name, &b.name),
        SortKey::Time => a.cooking_time.cmp(&b.cooking_time),
        SortKey::Difficulty => a.difficulty.rank().cmp(&b.difficulty.rank()),
    }
}

/// Filters then sorts the catalog into a fresh list.
///
/// The text filter is a case-insensitive substring match on name or
/// description. The sort is stable, so ties keep catalog order. The catalog
/// itself is left untouched.
pub fn search<'a>(
    catalog: &'a RecipeCatalog,
    inventory: &InventoryStore,
    query: &RecipeQuery,
) -> Vec<&'a Recipe> {
    let needle = query.text.to_lowercase();
    let mut results: Vec<&Recipe> = catalog
        .recipes()
        .iter()
        .filter(|recipe| matches_text(recipe, &needle))
        .filter(|recipe| {
            query.filter == RecipeFilter::All || query.filter.admits(classify(recipe, inventory))
        })
        .collect();
    results.sort_by(|a, b| compare(query.sort, a, b));
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::test_support::{inventory_of, recipe_needing};
    use crate::storage::sample_data::{sample_inventory, sample_recipes};
    use crate::units::Difficulty;
    use proptest::prelude::*;

    fn names<'a>(recipes: &[&'a Recipe]) -> Vec<&'a str> {
        recipes.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_default_query_sorts_by_name() {
        let catalog = RecipeCatalog::new(sample_recipes());
        let inventory = InventoryStore::new(sample_inventory());
        let results = search(&catalog, &inventory, &RecipeQuery::default());
        assert_eq!(
            names(&results),
            vec!["Garlic Olive Oil Pasta", "Tomato and Onion Salad", "Tomato Chicken Rice"]
        );
    }

    #[test]
    fn test_text_matches_name_or_description() {
        let catalog = RecipeCatalog::new(sample_recipes());
        let inventory = InventoryStore::default();

        let by_name = search(&catalog, &inventory, &RecipeQuery::new("PASTA", RecipeFilter::All, SortKey::Name));
        assert_eq!(names(&by_name), vec!["Garlic Olive Oil Pasta"]);

        let by_description = search(&catalog, &inventory, &RecipeQuery::new("one-pot", RecipeFilter::All, SortKey::Name));
        assert_eq!(names(&by_description), vec!["Tomato Chicken Rice"]);

        let none = search(&catalog, &inventory, &RecipeQuery::new("sushi", RecipeFilter::All, SortKey::Name));
        assert!(none.is_empty());
    }

    #[test]
    fn test_sample_data_filters() {
        // Pasta is not stocked, and the rice requirement (300 g) is compared
        // numerically against 2 kg on hand, so only the salad is makeable.
        let catalog = RecipeCatalog::new(sample_recipes());
        let inventory = InventoryStore::new(sample_inventory());

        let makeable = search(&catalog, &inventory, &RecipeQuery::new("", RecipeFilter::Makeable, SortKey::Name));
        assert_eq!(names(&makeable), vec!["Tomato and Onion Salad"]);

        let partial = search(&catalog, &inventory, &RecipeQuery::new("", RecipeFilter::Partial, SortKey::Name));
        assert_eq!(names(&partial), vec!["Garlic Olive Oil Pasta", "Tomato Chicken Rice"]);
    }

    #[test]
    fn test_sort_by_time_and_difficulty() {
        let catalog = RecipeCatalog::new(sample_recipes());
        let inventory = InventoryStore::default();

        let by_time = search(&catalog, &inventory, &RecipeQuery::new("", RecipeFilter::All, SortKey::Time));
        assert_eq!(
            names(&by_time),
            vec!["Tomato and Onion Salad", "Garlic Olive Oil Pasta", "Tomato Chicken Rice"]
        );

        // Pasta and salad are both easy; catalog order (pasta first) is kept.
        let by_difficulty = search(&catalog, &inventory, &RecipeQuery::new("", RecipeFilter::All, SortKey::Difficulty));
        assert_eq!(
            names(&by_difficulty),
            vec!["Garlic Olive Oil Pasta", "Tomato and Onion Salad", "Tomato Chicken Rice"]
        );
    }

    #[test]
    fn test_search_leaves_catalog_order_untouched() {
        let catalog = RecipeCatalog::new(sample_recipes());
        let before = catalog.clone();
        let query = RecipeQuery::new("", RecipeFilter::All, SortKey::Name);
        let first = names(&search(&catalog, &InventoryStore::default(), &query));
        let second = names(&search(&catalog, &InventoryStore::default(), &query));
        assert_eq!(first, second);
        assert_eq!(catalog, before);
    }

    #[test]
    fn test_name_sort_ignores_accents_first() {
        let recipes: Vec<Recipe> = ["Crepes", "Crème brûlée", "Éclair", "Flan", "résumé", "resume", "Resume"]
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let mut recipe = recipe_needing(&i.to_string(), &[]);
                recipe.name = name.to_string();
                recipe
            })
            .collect();
        let catalog = RecipeCatalog::new(recipes);
        let sorted = search(&catalog, &inventory_of(&[]), &RecipeQuery::new("", RecipeFilter::All, SortKey::Name));
        assert_eq!(
            names(&sorted),
            vec!["Crème brûlée", "Crepes", "Éclair", "Flan", "resume", "Resume", "résumé"]
        );
    }

    #[test]
    fn test_parse_filter_and_sort() {
        assert_eq!("Makeable".parse::<RecipeFilter>().unwrap(), RecipeFilter::Makeable);
        assert_eq!("time".parse::<SortKey>().unwrap(), SortKey::Time);
        assert!("cheapest".parse::<SortKey>().is_err());
    }

    proptest! {
        #[test]
        fn time_sort_is_stable(times in proptest::collection::vec(0u32..4, 0..12)) {
            let recipes: Vec<Recipe> = times
                .iter()
                .enumerate()
                .map(|(i, t)| {
                    let mut recipe = recipe_needing(&i.to_string(), &[]);
                    recipe.cooking_time = *t;
                    recipe.difficulty = Difficulty::Easy;
                    recipe
                })
                .collect();
            let catalog = RecipeCatalog::new(recipes);
            let inventory = inventory_of(&[]);
            let query = RecipeQuery::new("", RecipeFilter::All, SortKey::Time);
            let sorted = search(&catalog, &inventory, &query);

            prop_assert_eq!(sorted.len(), times.len());
            for pair in sorted.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                prop_assert!(a.cooking_time <= b.cooking_time);
                if a.cooking_time == b.cooking_time {
                    let ia: usize = a.id.parse().unwrap();
                    let ib: usize = b.id.parse().unwrap();
                    prop_assert!(ia < ib);
                }
            }
        }
    }
}
