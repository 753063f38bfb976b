use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use glossa_core::{LoadError, Meaning};

use crate::lexicon::Lexicon;

/// Reads and writes lexicons as JSON arrays of meanings.
#[derive(Debug, Default)]
pub struct LexiconLoader {
    /// Languages to keep; empty keeps everything
    languages: HashSet<String>,
}

impl LexiconLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_languages(languages: &[String]) -> Self {
        Self {
            languages: languages.iter().cloned().collect(),
        }
    }

    fn accepts(&self, meaning: &Meaning) -> bool {
        self.languages.is_empty() || self.languages.contains(&meaning.expression.language)
    }

    /// Add every meaning read from `reader` to `lexicon`, returning how many were read
    pub fn read_json<R: Read>(&self, reader: R, lexicon: &mut Lexicon) -> Result<usize, LoadError> {
        let meanings: Vec<Meaning> = serde_json::from_reader(reader)?;
        let total = meanings.len();
        let mut skipped = 0;

        for meaning in meanings {
            if self.accepts(&meaning) {
                lexicon.add(meaning);
            } else {
                skipped += 1;
            }
        }

        if skipped > 0 {
            tracing::debug!("Skipped {} meanings in unsupported languages", skipped);
        }
        Ok(total - skipped)
    }

    /// Load meanings from a file into `lexicon`
    pub fn load_into(&self, path: &Path, lexicon: &mut Lexicon) -> Result<usize, LoadError> {
        tracing::info!("Loading lexicon from file: {}", path.display());
        if !path.exists() {
            return Err(LoadError::FileNotFound(path.display().to_string()));
        }

        let file = File::open(path)?;
        let count = self.read_json(BufReader::new(file), lexicon)?;
        tracing::info!("Loaded {} meanings from {}", count, path.display());
        Ok(count)
    }

    /// Load a fresh lexicon from several files, in order
    pub fn load_files<P: AsRef<Path>>(
        &self,
        paths: &[P],
        skip_identity: bool,
    ) -> Result<Lexicon, LoadError> {
        let mut lexicon = Lexicon::with_skip_identity(skip_identity);
        for path in paths {
            self.load_into(path.as_ref(), &mut lexicon)?;
        }

        if skip_identity {
            tracing::info!(
                "Total removed due to identity: {}",
                lexicon.removed_identities()
            );
        }
        tracing::info!(
            expressions = lexicon.len(),
            languages = ?lexicon.languages(),
            "Lexicon ready"
        );
        Ok(lexicon)
    }

    /// Write every meaning of `lexicon` as one JSON array
    pub fn write_json<W: Write>(lexicon: &Lexicon, writer: W) -> Result<usize, LoadError> {
        let meanings: Vec<&Meaning> = lexicon.meanings().collect();
        serde_json::to_writer_pretty(writer, &meanings)?;
        Ok(meanings.len())
    }

    pub fn write_file(lexicon: &Lexicon, path: &Path) -> Result<usize, LoadError> {
        tracing::info!("Writing {}", path.display());
        let mut writer = BufWriter::new(File::create(path)?);
        let count = Self::write_json(lexicon, &mut writer)?;
        writer.flush()?;
        Ok(count)
    }
}
