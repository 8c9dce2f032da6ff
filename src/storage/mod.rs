pub mod config;
pub mod activity_db;
