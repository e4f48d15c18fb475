// src/lib.rs

pub mod config;
pub mod db;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod html;
pub mod models;
pub mod routes;
pub mod state;
pub mod urls;
pub mod utils;
