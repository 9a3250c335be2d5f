pub mod db;
pub mod dto;
pub mod error;
pub mod models;
pub mod repository;

pub use db::Database;

pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();
