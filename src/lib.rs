pub mod api_connection;
pub mod assistant;
pub mod cli;
pub mod config;
pub mod error;
pub mod matching;
pub mod step_session;
pub mod storage;
pub mod units;

pub use error::{KitchenError, Result};
