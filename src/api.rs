mod client;
mod models;

pub use client::{ApiBills, ApiStore};
