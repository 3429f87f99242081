// src/handlers/mod.rs

pub mod files;
pub mod render;
