pub mod json_store_connection;
pub mod repositories;
