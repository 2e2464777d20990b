pub mod db;
pub mod handlers;
pub mod models;
pub mod validation;

pub use db::create_pool;
