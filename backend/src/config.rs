// src/config.rs

use std::env;
use dotenvy::dotenv;

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: String,
    pub static_dir: String,
    pub bind_addr: String,
    pub log_dir: String,
    pub rust_log: String,
    /// Fixed list of file stems to offer instead of scanning `data_dir`.
    pub file_list: Option<Vec<String>>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let data_dir = env::var("DATA_DIR")
            .unwrap_or_else(|_| "data".to_string());

        let static_dir = env::var("STATIC_DIR")
            .unwrap_or_else(|_| "static".to_string());

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let log_dir = env::var("LOG_DIR")
            .unwrap_or_else(|_| "logs".to_string());

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let file_list = env::var("FILE_LIST").ok().map(|list| parse_file_list(&list));

        Self {
            data_dir,
            static_dir,
            bind_addr,
            log_dir,
            rust_log,
            file_list,
        }
    }
}

/// Splits a comma-separated list of file stems, dropping blanks.
pub fn parse_file_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
