use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct LexiconConfig {
    /// JSON meaning files, loaded in order
    pub paths: Vec<String>,
    /// Languages to load; empty loads all
    pub languages: Vec<String>,
    /// Drop translations identical to their source
    pub skip_identity: bool,
}
