pub mod args;
pub mod builder;
pub mod config;
pub mod export;
pub mod gesture;
pub mod matcher;
pub mod store;
pub mod types;
