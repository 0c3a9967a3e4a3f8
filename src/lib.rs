pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod web;

pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();
