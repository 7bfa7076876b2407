pub mod commands;
pub mod models;
pub mod types;
pub mod utils;
