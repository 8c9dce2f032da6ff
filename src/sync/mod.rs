pub mod activity_api;
pub mod activity_store;
