// src/api/state.rs
use crate::compiler::LatexCompiler;
use crate::config::AppConfig;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub compiler: Arc<LatexCompiler>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let compiler = Arc::new(LatexCompiler::new(config.compiler.clone()));
        Self {
            config: Arc::new(config),
            compiler,
        }
    }
}
