pub mod plugin;
pub mod types;
