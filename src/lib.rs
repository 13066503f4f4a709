pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod database;
pub mod error;
pub mod geometry;
pub mod handlers;
pub mod middleware;

pub use app::{app, AppState};
