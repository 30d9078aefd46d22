use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use std::path::Path;
use tokio::fs;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cheffy::api_connection::Provider;
use cheffy::assistant::{ChatSession, OpenRouterBackend};
use cheffy::cli::{parse_args, Command, InventoryCommand, RecipeCommand};
use cheffy::config::AppConfig;
use cheffy::matching::{classify, consume, ingredient_report, search, ConsumptionReport, RecipeQuery};
use cheffy::step_session::{format_clock, StepSession, TimerState};
use cheffy::storage::profile::{self, UserProfile};
use cheffy::storage::{InventoryItem, InventoryStore, KeyValueStore, Language, Recipe, RecipeCatalog};
use cheffy::KitchenError;

/// Everything loaded from the data file for one command.
struct Kitchen {
    kv: KeyValueStore,
    inventory: InventoryStore,
    catalog: RecipeCatalog,
}

impl Kitchen {
    fn open(data_file: &Path) -> Result<Self> {
        let kv = KeyValueStore::open(data_file)
            .with_context(|| format!("Failed to open data file '{}'", data_file.display()))?;
        let inventory = InventoryStore::load(&kv);
        let catalog = RecipeCatalog::load(&kv);
        Ok(Self { kv, inventory, catalog })
    }

    fn save(&mut self) -> Result<()> {
        self.inventory.save(&mut self.kv)?;
        self.catalog.save(&mut self.kv)?;
        self.kv.save().context("Failed to write data file")?;
        Ok(())
    }

    fn recipe(&self, id: &str) -> Result<Recipe> {
        self.catalog
            .get(id)
            .cloned()
            .ok_or_else(|| KitchenError::RecipeNotFound(id.to_string()).into())
    }
}

fn parse_expiry(raw: &str) -> Result<Option<NaiveDate>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("Invalid expiry date '{}' (expected YYYY-MM-DD)", raw))?;
    Ok(Some(date))
}

fn print_inventory(items: &[&InventoryItem]) {
    if items.is_empty() {
        println!("No items found.");
        return;
    }
    let today = Local::now().date_naive();
    for item in items {
        let expiry = match item.expiry_date {
            Some(date) if item.is_expired(today) => format!("  EXPIRED {}", date),
            Some(date) => format!("  expires {}", date),
            None => String::new(),
        };
        println!(
            "[{}] {:<20} {:>8} {:<4} {:<8}{}",
            item.id, item.name, item.quantity, item.unit, item.category, expiry
        );
    }
}

fn print_recipe(recipe: &Recipe, inventory: &InventoryStore) {
    println!("{} [{}]", recipe.name, classify(recipe, inventory));
    println!("{}", recipe.description);
    println!(
        "Prep {} min, cook {} min, {} servings, {}",
        recipe.prep_time, recipe.cooking_time, recipe.servings, recipe.difficulty
    );

    println!("\nIngredients:");
    for line in ingredient_report(recipe, inventory) {
        let mark = if line.sufficient { "x" } else { " " };
        let on_hand = line
            .on_hand
            .map(|(quantity, unit)| format!("have {} {}", quantity, unit))
            .unwrap_or_else(|| "not in inventory".to_string());
        println!(
            "  [{}] {} {} {} ({})",
            mark, line.requirement.quantity, line.requirement.unit, line.requirement.name, on_hand
        );
    }

    println!("\nSteps:");
    for (i, step) in recipe.steps.iter().enumerate() {
        let timer = step
            .timer
            .map(|secs| format!(" [{}]", format_clock(secs)))
            .unwrap_or_default();
        println!("  {}. {}{}: {}", i + 1, step.title, timer, step.description);
    }

    if let Some(tips) = &recipe.tips {
        println!("\nTips:");
        for tip in tips {
            println!("  - {}", tip);
        }
    }
    if let Some(nutrition) = &recipe.nutrition {
        println!(
            "\nNutrition per serving: {} kcal, {} g protein, {} g carbs, {} g fat",
            nutrition.calories, nutrition.protein, nutrition.carbs, nutrition.fat
        );
    }
}

fn print_consumption(report: &ConsumptionReport) {
    println!("Deducted {} ingredient(s) from inventory.", report.applied.len());
    for name in &report.skipped {
        println!("  skipped {} (not enough left)", name);
    }
    for name in &report.missing {
        println!("  skipped {} (not in inventory)", name);
    }
}

fn print_step(session: &StepSession) {
    let step = session.current_step();
    println!(
        "\nStep {} / {}: {}\n{}",
        session.index() + 1,
        session.step_count(),
        step.title,
        step.description
    );
    if let Some(target) = session.target_duration() {
        let state = match session.timer_state() {
            TimerState::Idle => "idle",
            TimerState::Running => "running",
            TimerState::Paused => "paused",
        };
        println!(
            "Timer {} / {} ({})",
            session.format_elapsed(),
            format_clock(target.as_secs()),
            state
        );
    }
    println!("[n]ext [p]revious [s]tart [x] pause [r]eset [t]imer [u]se ingredients [q]uit");
}

async fn run_cook_session(kitchen: &mut Kitchen, recipe_id: &str) -> Result<()> {
    let mut session = StepSession::open(kitchen.recipe(recipe_id)?)?;
    println!("Cooking {}", session.recipe().name);
    print_step(&session);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read from stdin")? {
        match line.trim() {
            "n" => session.next(),
            "p" => session.previous(),
            "s" => session.start()?,
            "x" => session.pause(),
            "r" => session.reset(),
            "t" => {}
            "u" => match session.complete(&mut kitchen.inventory) {
                Ok(report) => {
                    print_consumption(&report);
                    kitchen.save()?;
                }
                Err(KitchenError::NotMakeable(name)) => {
                    println!("Not enough ingredients in inventory to make {}.", name);
                }
                Err(e) => return Err(e.into()),
            },
            "q" => break,
            other => println!("Unknown command '{}'", other),
        }
        print_step(&session);
    }
    Ok(())
}

async fn run_chat(kitchen: &Kitchen, config: &AppConfig, message: Option<String>) -> Result<()> {
    let backend = OpenRouterBackend::new(Provider::from_config(config), config.model.clone());
    let mut chat = ChatSession::new();

    if let Some(message) = message {
        if let Some(reply) = chat
            .send(&backend, &message, &kitchen.inventory, &kitchen.catalog)
            .await?
        {
            println!("{}", reply.content);
        }
        return Ok(());
    }

    if let Some(welcome) = chat.messages().first() {
        println!("assistant> {}", welcome.content);
    }
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read from stdin")? {
        if line.trim() == "/quit" {
            break;
        }
        if let Some(reply) = chat
            .send(&backend, &line, &kitchen.inventory, &kitchen.catalog)
            .await?
        {
            println!("assistant> {}", reply.content);
        }
    }
    Ok(())
}

async fn read_recipe_file(path: &Path) -> Result<Recipe> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read recipe file '{}'", path.display()))?;
    let recipe: Recipe = serde_json::from_str(&content)
        .with_context(|| format!("Recipe file '{}' is not a valid recipe", path.display()))?;
    recipe
        .validate()
        .with_context(|| format!("Recipe file '{}' was rejected", path.display()))?;
    Ok(recipe)
}

fn run_inventory(kitchen: &mut Kitchen, command: InventoryCommand) -> Result<()> {
    match command {
        InventoryCommand::List { search } => {
            print_inventory(&kitchen.inventory.search(&search));
            return Ok(());
        }
        InventoryCommand::Add(fields) => {
            let mut item = InventoryItem::new(fields.name, fields.quantity, fields.unit, fields.category);
            if let Some(date) = parse_expiry(fields.expiry.as_deref().unwrap_or_default())? {
                item = item.with_expiry(date);
            }
            let label = format!("{} ({})", item.name, item.id);
            kitchen.inventory.add(item)?;
            println!("Added {}", label);
        }
        InventoryCommand::Update {
            id,
            name,
            quantity,
            unit,
            category,
            expiry,
        } => {
            let mut item = kitchen
                .inventory
                .get(&id)
                .cloned()
                .ok_or_else(|| KitchenError::ItemNotFound(id.clone()))?;
            if let Some(name) = name {
                item.name = name;
            }
            if let Some(quantity) = quantity {
                item.quantity = quantity;
            }
            if let Some(unit) = unit {
                item.unit = unit;
            }
            if let Some(category) = category {
                item.category = category;
            }
            if let Some(raw) = expiry.as_deref() {
                item.expiry_date = parse_expiry(raw)?;
            }
            kitchen.inventory.update(item)?;
            println!("Updated {}", id);
        }
        InventoryCommand::Remove { id } => {
            let removed = kitchen.inventory.remove(&id)?;
            println!("Removed {}", removed.name);
        }
    }
    kitchen.save()
}

async fn run_recipes(kitchen: &mut Kitchen, command: RecipeCommand) -> Result<()> {
    match command {
        RecipeCommand::List { search: text, filter, sort } => {
            let query = RecipeQuery::new(text, filter, sort);
            let results = search(&kitchen.catalog, &kitchen.inventory, &query);
            if results.is_empty() {
                println!("No recipes match your search or filter criteria.");
            }
            for recipe in results {
                println!(
                    "[{}] {:<28} {:>3} min  {:<6}  {}",
                    recipe.id,
                    recipe.name,
                    recipe.cooking_time,
                    recipe.difficulty,
                    classify(recipe, &kitchen.inventory)
                );
            }
            return Ok(());
        }
        RecipeCommand::Show { id } => {
            let recipe = kitchen.recipe(&id)?;
            print_recipe(&recipe, &kitchen.inventory);
            return Ok(());
        }
        RecipeCommand::Add { file } => {
            let recipe = read_recipe_file(&file).await?;
            let label = format!("{} ({})", recipe.name, recipe.id);
            kitchen.catalog.add(recipe)?;
            println!("Added recipe {}", label);
        }
        RecipeCommand::Update { file } => {
            let recipe = read_recipe_file(&file).await?;
            let id = recipe.id.clone();
            kitchen.catalog.update(recipe)?;
            println!("Updated recipe {}", id);
        }
        RecipeCommand::Remove { id } => {
            let removed = kitchen.catalog.remove(&id)?;
            println!("Removed recipe {}", removed.name);
        }
    }
    kitchen.save()
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = parse_args();

    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::from_env().with_data_file(cli.data_file.clone());
    debug!("Using data file {}", config.data_file.display());
    let mut kitchen = Kitchen::open(&config.data_file)?;

    if cli.command.requires_profile() {
        profile::require_user(&kitchen.kv)?;
    }

    match cli.command {
        Command::Signup { name, email, password } => {
            profile::sign_up(&mut kitchen.kv, &UserProfile { name, email, password })?;
            kitchen.save()?;
            println!("Welcome to Cheffy!");
        }
        Command::Logout => {
            profile::log_out(&mut kitchen.kv);
            kitchen.kv.save().context("Failed to write data file")?;
        }
        Command::Whoami => match profile::current_user(&kitchen.kv) {
            Some(user) => println!("{} <{}>", user.name, user.email),
            None => println!("Not signed in."),
        },
        Command::Lang { language } => match language {
            Some(language) => {
                language.save(&mut kitchen.kv);
                kitchen.kv.save().context("Failed to write data file")?;
                info!("Language set to {}", language);
            }
            None => println!("{}", Language::load(&kitchen.kv)),
        },
        Command::Inventory(command) => run_inventory(&mut kitchen, command)?,
        Command::Recipes(command) => run_recipes(&mut kitchen, command).await?,
        Command::Cook { recipe_id } => run_cook_session(&mut kitchen, &recipe_id).await?,
        Command::Use { recipe_id } => {
            let recipe = kitchen.recipe(&recipe_id)?;
            let report = consume(&recipe, &mut kitchen.inventory)?;
            print_consumption(&report);
            kitchen.save()?;
        }
        Command::Chat { message } => run_chat(&kitchen, &config, message).await?,
    }

    Ok(())
}
