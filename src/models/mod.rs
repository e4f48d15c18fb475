// src/models/mod.rs

pub mod comment;
pub mod news;
pub mod user;
