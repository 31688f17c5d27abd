pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod resolver;
pub mod routes;
pub mod state;
pub mod structs;
pub mod utils;

pub use errors::{Result, ShortenerError};
