use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct CorpusConfig {
    /// Common prefix of the parallel corpus files
    pub path: Option<String>,
    /// Language pairs as `src-tgt`
    pub pairs: Vec<String>,
    /// Sentences read per pair; 0 reads everything
    pub max_sentences: usize,
}

impl CorpusConfig {
    pub fn language_pairs(&self) -> Result<Vec<(String, String)>, ConfigError> {
        self.pairs
            .iter()
            .map(|pair| match pair.split_once('-') {
                Some((source, target)) if !source.is_empty() && !target.is_empty() => {
                    Ok((source.to_string(), target.to_string()))
                }
                _ => Err(ConfigError::InvalidLanguagePair(pair.clone())),
            })
            .collect()
    }
}
