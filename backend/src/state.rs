use std::sync::Arc;

use crate::{catalog::FileCatalog, config::Config};
use axum::extract::FromRef;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<FileCatalog>,
    pub config: Config,
}

impl FromRef<AppState> for Arc<FileCatalog> {
    fn from_ref(state: &AppState) -> Self {
        state.catalog.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
