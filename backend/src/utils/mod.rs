// src/utils/mod.rs

pub mod delta;
pub mod html;
pub mod json;
