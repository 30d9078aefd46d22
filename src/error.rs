use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum KitchenError {
    Io(std::io::Error),
    Serialization(serde_json::Error),
    ItemNotFound(String),
    RecipeNotFound(String),
    DuplicateId(String),
    /// A recipe without steps cannot be walked through.
    EmptyRecipe(String),
    /// A recipe definition with out-of-range values.
    InvalidRecipe { id: String, reason: String },
    NotMakeable(String),
    /// The step timer needs a tokio runtime to drive its tick task.
    NoRuntime,
    NotSignedIn,
    /// A chat request is already in flight.
    ChatBusy,
}

pub type Result<T> = std::result::Result<T, KitchenError>;

impl fmt::Display for KitchenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KitchenError::Io(err) => write!(f, "I/O error: {}", err),
            KitchenError::Serialization(err) => write!(f, "Serialization error: {}", err),
            KitchenError::ItemNotFound(id) => write!(f, "Inventory item not found: {}", id),
            KitchenError::RecipeNotFound(id) => write!(f, "Recipe not found: {}", id),
            KitchenError::DuplicateId(id) => write!(f, "An entry with id '{}' already exists", id),
            KitchenError::EmptyRecipe(id) => {
                write!(f, "Recipe '{}' has no steps to walk through", id)
            }
            KitchenError::InvalidRecipe { id, reason } => {
                write!(f, "Recipe '{}' is invalid: {}", id, reason)
            }
            KitchenError::NotMakeable(name) => {
                write!(f, "Not enough ingredients in inventory to make '{}'", name)
            }
            KitchenError::NoRuntime => write!(f, "Step timer requires a running tokio runtime"),
            KitchenError::NotSignedIn => write!(f, "No user is signed in; run `cheffy signup` first"),
            KitchenError::ChatBusy => {
                write!(f, "The assistant is still answering the previous message")
            }
        }
    }
}

impl Error for KitchenError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            KitchenError::Io(err) => Some(err),
            KitchenError::Serialization(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for KitchenError {
    fn from(err: std::io::Error) -> Self {
        KitchenError::Io(err)
    }
}

impl From<serde_json::Error> for KitchenError {
    fn from(err: serde_json::Error) -> Self {
        KitchenError::Serialization(err)
    }
}
