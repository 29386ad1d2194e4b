//! Infrastructure: database bootstrap, error translation and state wiring.

pub mod db;
pub mod db_errors;
pub mod state;
