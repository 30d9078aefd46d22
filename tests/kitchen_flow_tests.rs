use cheffy::matching::{classify, search, MatchClassification, RecipeFilter, RecipeQuery, SortKey};
use cheffy::step_session::StepSession;
use cheffy::storage::profile::{self, UserProfile};
use cheffy::storage::{InventoryStore, KeyValueStore, Language, RecipeCatalog};
use cheffy::KitchenError;
use tempfile::tempdir;

fn quantity_of(inventory: &InventoryStore, name: &str) -> f64 {
    inventory.find_by_name(name).map(|item| item.quantity).unwrap()
}

#[test]
fn test_cook_salad_and_reload_kitchen() {
    let dir = tempdir().unwrap();
    let data_file = dir.path().join("kitchen.json");

    let mut kv = KeyValueStore::open(&data_file).unwrap();
    assert!(profile::require_user(&kv).is_err());
    profile::sign_up(
        &mut kv,
        &UserProfile {
            name: "Sam".to_string(),
            email: "sam@example.com".to_string(),
            password: "secret".to_string(),
        },
    )
    .unwrap();
    Language::Spanish.save(&mut kv);

    let mut inventory = InventoryStore::load(&kv);
    let catalog = RecipeCatalog::load(&kv);
    assert_eq!(inventory.len(), 8);
    assert_eq!(catalog.len(), 3);

    let query = RecipeQuery::new("", RecipeFilter::Makeable, SortKey::Name);
    let makeable: Vec<&str> = search(&catalog, &inventory, &query)
        .into_iter()
        .map(|recipe| recipe.id.as_str())
        .collect();
    assert_eq!(makeable, vec!["3"]);

    let mut session = StepSession::open(catalog.get("3").cloned().unwrap()).unwrap();
    while !session.is_last() {
        session.next();
    }
    let report = session.complete(&mut inventory).unwrap();
    assert!(report.is_complete());

    inventory.save(&mut kv).unwrap();
    catalog.save(&mut kv).unwrap();
    kv.save().unwrap();

    let kv = KeyValueStore::open(&data_file).unwrap();
    assert_eq!(profile::require_user(&kv).unwrap().name, "Sam");
    assert_eq!(Language::load(&kv), Language::Spanish);

    let mut inventory = InventoryStore::load(&kv);
    let catalog = RecipeCatalog::load(&kv);
    assert_eq!(quantity_of(&inventory, "Tomatoes"), 2.0);
    assert_eq!(quantity_of(&inventory, "Onions"), 3.0);
    assert_eq!(quantity_of(&inventory, "Olive Oil"), 485.0);
    assert_eq!(quantity_of(&inventory, "Salt"), 198.0);
    assert_eq!(quantity_of(&inventory, "Pepper"), 99.0);

    let salad = catalog.get("3").unwrap();
    assert_eq!(classify(salad, &inventory), MatchClassification::Partial);

    let session = StepSession::open(salad.clone()).unwrap();
    let again = session.complete(&mut inventory);
    assert!(matches!(again, Err(KitchenError::NotMakeable(_))));
    assert_eq!(quantity_of(&inventory, "Tomatoes"), 2.0);
}

#[test]
fn test_log_out_locks_kitchen_but_keeps_data() {
    let dir = tempdir().unwrap();
    let data_file = dir.path().join("kitchen.json");

    let mut kv = KeyValueStore::open(&data_file).unwrap();
    profile::sign_up(
        &mut kv,
        &UserProfile {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            password: "pw".to_string(),
        },
    )
    .unwrap();
    let mut inventory = InventoryStore::load(&kv);
    let tomatoes = inventory.find_by_name("tomatoes").unwrap().id.clone();
    inventory.remove(&tomatoes).unwrap();
    inventory.save(&mut kv).unwrap();
    profile::log_out(&mut kv);
    kv.save().unwrap();

    let kv = KeyValueStore::open(&data_file).unwrap();
    assert!(matches!(profile::require_user(&kv), Err(KitchenError::NotSignedIn)));
    let inventory = InventoryStore::load(&kv);
    assert_eq!(inventory.len(), 7);
    assert!(inventory.find_by_name("Tomatoes").is_none());
}
