use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::matching::{RecipeFilter, SortKey};
use crate::storage::Language;
use crate::units::{Category, Unit};

#[derive(Parser, Debug)]
#[command(author, version, about = "Kitchen inventory, recipes and cooking assistant", long_about = None)]
pub struct Cli {
    /// Path to the data file (overrides CHEFFY_DATA_FILE)
    #[arg(long, global = true)]
    pub data_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the local user profile that unlocks the kitchen commands
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Remove the local user profile
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Show or set the language preference
    Lang {
        language: Option<Language>,
    },
    /// Manage the ingredient inventory
    #[command(subcommand)]
    Inventory(InventoryCommand),
    /// Browse and manage recipes
    #[command(subcommand)]
    Recipes(RecipeCommand),
    /// Walk through a recipe step by step
    Cook {
        recipe_id: String,
    },
    /// Deduct a recipe's ingredients from the inventory
    Use {
        recipe_id: String,
    },
    /// Ask the kitchen assistant (interactive when no message is given)
    Chat {
        message: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum InventoryCommand {
    /// List items, optionally filtered by name or category
    List {
        #[arg(short, long, default_value = "")]
        search: String,
    },
    Add(ItemFields),
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, value_parser = parse_quantity)]
        quantity: Option<f64>,
        #[arg(long)]
        unit: Option<Unit>,
        #[arg(long)]
        category: Option<Category>,
        /// Expiry date (YYYY-MM-DD); pass an empty string to clear it
        #[arg(long)]
        expiry: Option<String>,
    },
    Remove {
        id: String,
    },
}

#[derive(Args, Debug)]
pub struct ItemFields {
    #[arg(long)]
    pub name: String,
    #[arg(long, value_parser = parse_quantity)]
    pub quantity: f64,
    #[arg(long, default_value = "pcs")]
    pub unit: Unit,
    #[arg(long, default_value = "other")]
    pub category: Category,
    /// Expiry date (YYYY-MM-DD)
    #[arg(long)]
    pub expiry: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum RecipeCommand {
    /// List recipes with their availability
    List {
        #[arg(short, long, default_value = "")]
        search: String,
        #[arg(short, long, default_value = "all")]
        filter: RecipeFilter,
        #[arg(long, default_value = "name")]
        sort: SortKey,
    },
    /// Show one recipe with its ingredient checklist
    Show {
        id: String,
    },
    /// Add a recipe from a JSON file
    Add {
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Replace a recipe with the contents of a JSON file (ids must match)
    Update {
        #[arg(short, long)]
        file: PathBuf,
    },
    Remove {
        id: String,
    },
}

/// Quantities must be finite and non-negative.
pub fn parse_quantity(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", raw))?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!("quantity must be a non-negative number, got {}", raw));
    }
    Ok(value)
}

impl Command {
    /// Account and preference commands work without a profile.
    pub fn requires_profile(&self) -> bool {
        !matches!(
            self,
            Command::Signup { .. } | Command::Logout | Command::Whoami | Command::Lang { .. }
        )
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
