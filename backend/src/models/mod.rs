// src/models/mod.rs

pub mod document;
pub mod file;
pub mod view;
