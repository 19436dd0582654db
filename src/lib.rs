pub mod api;
pub mod config;
pub mod containers;
pub mod document;
pub mod format;
mod macros;
pub mod model;
pub mod routes;
pub mod storage;
pub mod store;
pub mod views;
