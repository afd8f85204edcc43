/// Database connection and schema creation
pub mod database;

/// Settings loading from config.toml
pub mod settings;
