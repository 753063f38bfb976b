use std::env;

use serde::{Deserialize, Serialize};

use self::corpus::CorpusConfig;
use self::lexicon::LexiconConfig;
use self::server::ServerConfig;

pub mod corpus;
pub mod lexicon;
pub mod server;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid language pair (expected src-tgt): {0}")]
    InvalidLanguagePair(String),
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub lexicon: LexiconConfig,
    pub corpus: CorpusConfig,
    /// Log as JSON even on a terminal
    pub log_json: bool,
}

impl Config {
    /// Defaults overridden by `GLOSSA_*` environment variables
    pub fn new() -> Self {
        Self::default().with_env()
    }

    /// Override fields with any `GLOSSA_*` variables set in the environment
    pub fn with_env(self) -> Self {
        self.with_vars(|key| env::var(key).ok())
    }

    pub fn with_vars(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(addr) = var("GLOSSA_BIND_ADDR") {
            self.server.bind_addr = addr;
        }
        if let Some(workers) = var("GLOSSA_WORKERS").and_then(|v| v.parse().ok()) {
            self.server.workers = workers;
        }
        if let Some(capacity) = var("GLOSSA_QUEUE_CAPACITY").and_then(|v| v.parse().ok()) {
            self.server.queue_capacity = capacity;
        }
        if let Some(paths) = var("GLOSSA_LEXICON_PATHS") {
            self.lexicon.paths = split_list(&paths);
        }
        if let Some(path) = var("GLOSSA_CORPUS_PATH") {
            self.corpus.path = Some(path);
        }
        if let Some(pairs) = var("GLOSSA_CORPUS_PAIRS") {
            self.corpus.pairs = split_list(&pairs);
        }
        if let Some(max) = var("GLOSSA_CORPUS_MAX").and_then(|v| v.parse().ok()) {
            self.corpus.max_sentences = max;
        }
        if let Some(json) = var("GLOSSA_LOG_JSON") {
            self.log_json = matches!(json.trim(), "1" | "true" | "yes");
        }
        self
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
