pub mod cloner;
pub mod config;
pub mod domain;
pub mod errors;
pub mod identity;

pub mod app_context;
pub use app_context::AppContext;
pub mod database;
pub mod services;
pub mod store;
