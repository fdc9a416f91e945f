//! Command handlers for the ItemCode CLI

pub mod brands;
pub mod config;
pub mod extract;
pub mod fetch;
pub mod train;

pub use brands::handle_brand_command;
pub use config::handle_config_command;
pub use extract::{handle_extract_command, handle_extract_text_command};
pub use fetch::handle_fetch_command;
pub use train::handle_train_command;
