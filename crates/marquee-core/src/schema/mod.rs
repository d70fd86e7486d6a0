mod artists;
pub mod db;
pub mod migrations;
mod shows;
mod venues;

pub use db::Database;
