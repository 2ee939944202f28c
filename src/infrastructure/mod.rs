pub mod database;
pub mod reconciler;
pub mod repositories;
pub mod search;
pub mod time;
