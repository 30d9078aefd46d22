use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::kv_store::{KeyValueStore, INVENTORY_KEY};
use super::sample_data::sample_inventory;
use crate::error::{KitchenError, Result};
use crate::units::{names_match, Category, Unit};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    /// Never negative; the input layer constrains it.
    pub quantity: f64,
    pub unit: Unit,
    pub category: Category,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "empty_string_as_none"
    )]
    pub expiry_date: Option<NaiveDate>,
}

// The web form stored an empty string when no expiry date was picked.
fn empty_string_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

impl InventoryItem {
    /// Builds an item with a freshly generated id.
    pub fn new(name: impl Into<String>, quantity: f64, unit: Unit, category: Category) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            quantity,
            unit,
            category,
            expiry_date: None,
        }
    }

    pub fn with_expiry(mut self, expiry_date: NaiveDate) -> Self {
        self.expiry_date = Some(expiry_date);
        self
    }

    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expiry_date.is_some_and(|date| date < today)
    }
}

/// Owned collection of inventory records, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryStore {
    items: Vec<InventoryItem>,
}

impl InventoryStore {
    pub fn new(items: Vec<InventoryItem>) -> Self {
        Self { items }
    }

    /// Loads the inventory snapshot from `kv`, falling back to the sample
    /// inventory when the key is absent or its document is malformed.
    pub fn load(kv: &KeyValueStore) -> Self {
        match kv.get(INVENTORY_KEY) {
            Some(snapshot) => match Self::from_snapshot(snapshot) {
                Ok(store) => {
                    debug!("Loaded {} inventory items", store.items.len());
                    store
                }
                Err(e) => {
                    warn!("Inventory snapshot is malformed ({}); using sample inventory", e);
                    Self::new(sample_inventory())
                }
            },
            None => {
                info!("No saved inventory; using sample inventory");
                Self::new(sample_inventory())
            }
        }
    }

    pub fn save(&self, kv: &mut KeyValueStore) -> Result<()> {
        kv.set(INVENTORY_KEY, self.to_snapshot()?);
        Ok(())
    }

    pub fn to_snapshot(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.items)?)
    }

    pub fn from_snapshot(snapshot: &str) -> Result<Self> {
        let items: Vec<InventoryItem> = serde_json::from_str(snapshot)?;
        Ok(Self { items })
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&InventoryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// First item whose name matches case-insensitively. Duplicates are
    /// not merged; later ones are simply never found.
    pub fn find_by_name(&self, name: &str) -> Option<&InventoryItem> {
        self.items.iter().find(|item| names_match(&item.name, name))
    }

    pub(crate) fn find_by_name_mut(&mut self, name: &str) -> Option<&mut InventoryItem> {
        self.items.iter_mut().find(|item| names_match(&item.name, name))
    }

    /// Case-insensitive substring search over item name or category tag.
    pub fn search(&self, text: &str) -> Vec<&InventoryItem> {
        let needle = text.to_lowercase();
        self.items
            .iter()
            .filter(|item| {
                item.name.to_lowercase().contains(&needle) || item.category.tag().contains(&needle)
            })
            .collect()
    }

    pub fn add(&mut self, item: InventoryItem) -> Result<()> {
        if self.get(&item.id).is_some() {
            return Err(KitchenError::DuplicateId(item.id));
        }
        debug!("Adding inventory item '{}' ({})", item.name, item.id);
        self.items.push(item);
        Ok(())
    }

    /// Replaces the item carrying the same id.
    pub fn update(&mut self, item: InventoryItem) -> Result<()> {
        let slot = self
            .items
            .iter_mut()
            .find(|existing| existing.id == item.id)
            .ok_or_else(|| KitchenError::ItemNotFound(item.id.clone()))?;
        *slot = item;
        Ok(())
    }

    pub fn remove(&mut self, id: &str) -> Result<InventoryItem> {
        let pos = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| KitchenError::ItemNotFound(id.to_string()))?;
        Ok(self.items.remove(pos))
    }
}
