pub mod batch;
pub mod cli;
pub mod client;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod interactive;
pub mod render;
pub mod store;
pub mod terminal;
