//! Built-in demo data used when nothing (or nothing readable) is stored.

use chrono::NaiveDate;

use super::inventory::InventoryItem;
use super::recipe_catalog::{Recipe, RecipeIngredient, RecipeNutrition, RecipeStep};
use crate::units::{Category, Difficulty, Unit};

fn item(id: &str, name: &str, quantity: f64, unit: Unit, category: Category) -> InventoryItem {
    InventoryItem {
        id: id.to_string(),
        name: name.to_string(),
        quantity,
        unit,
        category,
        expiry_date: None,
    }
}

pub fn sample_inventory() -> Vec<InventoryItem> {
    vec![
        item("1", "Tomatoes", 5.0, Unit::Piece, Category::Produce),
        InventoryItem {
            expiry_date: NaiveDate::from_ymd_opt(2025, 6, 10),
            ..item("2", "Chicken Breast", 500.0, Unit::Gram, Category::Meat)
        },
        item("3", "Rice", 2.0, Unit::Kilogram, Category::Grains),
        item("4", "Olive Oil", 500.0, Unit::Milliliter, Category::Other),
        item("5", "Garlic", 3.0, Unit::Piece, Category::Produce),
        item("6", "Salt", 200.0, Unit::Gram, Category::Spices),
        item("7", "Pepper", 100.0, Unit::Gram, Category::Spices),
        item("8", "Onions", 4.0, Unit::Piece, Category::Produce),
    ]
}

fn ingredient(name: &str, quantity: f64, unit: &str) -> RecipeIngredient {
    RecipeIngredient {
        name: name.to_string(),
        quantity,
        unit: unit.to_string(),
    }
}

fn step(title: &str, description: &str, timer: Option<u64>) -> RecipeStep {
    RecipeStep {
        title: title.to_string(),
        description: description.to_string(),
        timer,
    }
}

fn tips(lines: &[&str]) -> Option<Vec<String>> {
    Some(lines.iter().map(|line| line.to_string()).collect())
}

pub fn sample_recipes() -> Vec<Recipe> {
    vec![
        Recipe {
            id: "1".to_string(),
            name: "Tomato Chicken Rice".to_string(),
            description: "A delicious one-pot meal with chicken, rice, and fresh tomatoes.".to_string(),
            image: None,
            model: None,
            prep_time: 15,
            cooking_time: 30,
            difficulty: Difficulty::Medium,
            servings: 4,
            ingredients: vec![
                ingredient("Chicken Breast", 400.0, "g"),
                ingredient("Rice", 300.0, "g"),
                ingredient("Tomatoes", 3.0, "pcs"),
                ingredient("Onions", 1.0, "pcs"),
                ingredient("Garlic", 2.0, "pcs"),
                ingredient("Olive Oil", 30.0, "ml"),
                ingredient("Salt", 5.0, "g"),
                ingredient("Pepper", 3.0, "g"),
            ],
            steps: vec![
                step(
                    "Prepare ingredients",
                    "Dice the chicken breast into 1-inch cubes. Chop the tomatoes and onions. Mince the garlic.",
                    None,
                ),
                step(
                    "Cook chicken",
                    "Heat olive oil in a large pan over medium heat. Add chicken and cook until browned on all sides, about 5-7 minutes.",
                    Some(420),
                ),
                step(
                    "Add vegetables",
                    "Add onions and garlic to the pan. Cook for 2-3 minutes until softened.",
                    Some(180),
                ),
                step("Add rice and tomatoes", "Add rice and tomatoes to the pan. Stir to combine.", None),
                step(
                    "Add liquid and seasonings",
                    "Add 600ml of water, salt, and pepper. Bring to a boil, then reduce heat to low.",
                    None,
                ),
                step(
                    "Simmer",
                    "Cover and simmer for 20 minutes, or until rice is tender and liquid is absorbed.",
                    Some(1200),
                ),
                step("Serve", "Let stand for 5 minutes, then fluff with a fork and serve hot.", Some(300)),
            ],
            tips: tips(&[
                "For extra flavor, add a bay leaf or some dried herbs like thyme or oregano.",
                "You can substitute chicken with tofu for a vegetarian version.",
                "Leftovers can be stored in the refrigerator for up to 3 days.",
            ]),
            nutrition: Some(RecipeNutrition {
                calories: 420.0,
                protein: 28.0,
                carbs: 45.0,
                fat: 12.0,
            }),
        },
        Recipe {
            id: "2".to_string(),
            name: "Garlic Olive Oil Pasta".to_string(),
            description: "A simple and flavorful pasta dish with garlic and olive oil.".to_string(),
            image: None,
            model: None,
            prep_time: 5,
            cooking_time: 15,
            difficulty: Difficulty::Easy,
            servings: 2,
            ingredients: vec![
                ingredient("Pasta", 200.0, "g"),
                ingredient("Garlic", 3.0, "pcs"),
                ingredient("Olive Oil", 45.0, "ml"),
                ingredient("Salt", 5.0, "g"),
                ingredient("Pepper", 2.0, "g"),
            ],
            steps: vec![
                step(
                    "Cook pasta",
                    "Bring a large pot of salted water to a boil. Add pasta and cook according to package instructions until al dente.",
                    Some(600),
                ),
                step(
                    "Prepare garlic oil",
                    "While pasta is cooking, heat olive oil in a large pan over low heat. Add minced garlic and cook gently until fragrant but not browned, about 2 minutes.",
                    Some(120),
                ),
                step(
                    "Combine",
                    "Drain pasta, reserving 1/4 cup of pasta water. Add pasta to the pan with garlic oil. Toss to coat, adding pasta water as needed to create a light sauce.",
                    None,
                ),
                step("Season", "Season with salt and pepper to taste. Serve immediately.", None),
            ],
            tips: tips(&[
                "Add red pepper flakes for a spicy kick.",
                "Fresh herbs like parsley or basil make a great garnish.",
                "For a more substantial meal, add grilled chicken or sautéed vegetables.",
            ]),
            nutrition: Some(RecipeNutrition {
                calories: 380.0,
                protein: 10.0,
                carbs: 50.0,
                fat: 15.0,
            }),
        },
        Recipe {
            id: "3".to_string(),
            name: "Tomato and Onion Salad".to_string(),
            description: "A refreshing salad with ripe tomatoes and onions.".to_string(),
            image: None,
            model: None,
            prep_time: 10,
            cooking_time: 0,
            difficulty: Difficulty::Easy,
            servings: 2,
            ingredients: vec![
                ingredient("Tomatoes", 3.0, "pcs"),
                ingredient("Onions", 1.0, "pcs"),
                ingredient("Olive Oil", 15.0, "ml"),
                ingredient("Salt", 2.0, "g"),
                ingredient("Pepper", 1.0, "g"),
            ],
            steps: vec![
                step("Prepare vegetables", "Slice tomatoes and thinly slice onions.", None),
                step("Combine", "Arrange tomatoes and onions on a plate or in a bowl.", None),
                step("Dress", "Drizzle with olive oil and season with salt and pepper.", None),
                step(
                    "Serve",
                    "Serve immediately or chill for 15-30 minutes for a more refreshing salad.",
                    Some(900),
                ),
            ],
            tips: tips(&[
                "Add fresh herbs like basil or parsley for extra flavor.",
                "A splash of vinegar or lemon juice adds brightness.",
                "For a more substantial salad, add cucumber, feta cheese, or olives.",
            ]),
            nutrition: Some(RecipeNutrition {
                calories: 120.0,
                protein: 2.0,
                carbs: 10.0,
                fat: 8.0,
            }),
        },
    ]
}
