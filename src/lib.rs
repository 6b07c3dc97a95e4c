pub mod api;
pub mod config;
pub mod error;
pub mod feed;
pub mod models;
pub mod seed;
pub mod views;
pub mod workers;
