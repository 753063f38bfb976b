use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use glossa_config::Config;

/// Load a JSON profile, or defaults when none is given. Environment
/// variables override both.
pub fn load_config(profile: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = profile else {
        return Ok(Config::new());
    };

    Ok(read_profile(path)?.with_env())
}

/// A profile as written, without environment overrides
pub fn read_profile(path: &Path) -> anyhow::Result<Config> {
    let file =
        File::open(path).with_context(|| format!("Failed to open profile {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Invalid profile {}", path.display()))
}
