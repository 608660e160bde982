pub mod db;
pub mod generator;
pub mod models;

pub use rusqlite;
