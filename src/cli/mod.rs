//! Terminal front end: tables, progress and messages around the store.

pub mod positions;
pub mod refresh;
pub mod setup;
pub mod summary;
pub mod ui;
