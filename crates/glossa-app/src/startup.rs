use anyhow::Context;
use glossa_config::Config;
use glossa_config::corpus::CorpusConfig;
use glossa_config::lexicon::LexiconConfig;
use glossa_corpus::IndexedAlignedCorpus;
use glossa_lexicon::{Lexicon, LexiconLoader};

use crate::state::AppState;

pub fn load_lexicon(config: &LexiconConfig) -> anyhow::Result<Lexicon> {
    let loader = LexiconLoader::with_languages(&config.languages);
    let lexicon = loader
        .load_files(&config.paths, config.skip_identity)
        .context("Failed to load lexicon")?;

    if lexicon.is_empty() {
        tracing::warn!("Lexicon is empty; set GLOSSA_LEXICON_PATHS");
    }
    Ok(lexicon)
}

/// Read every configured language pair, or nothing when no corpus is set
pub fn load_corpus(config: &CorpusConfig) -> anyhow::Result<Option<IndexedAlignedCorpus>> {
    let Some(path) = &config.path else {
        tracing::info!("No corpus configured; frequencies and examples disabled");
        return Ok(None);
    };

    let mut corpus = IndexedAlignedCorpus::new();
    for (source, target) in config.language_pairs()? {
        corpus
            .read(path, &source, &target, config.max_sentences)
            .with_context(|| format!("Failed to read corpus {path}.{source}-{target}"))?;
    }

    for stats in corpus.stats() {
        tracing::info!(
            language = %stats.language,
            sentences = stats.sentences,
            word_types = stats.word_types,
            "Corpus language"
        );
    }
    Ok(Some(corpus))
}

/// Load, annotate with frequencies, then freeze for serving
pub fn build_state(config: Config) -> anyhow::Result<AppState> {
    let mut lexicon = load_lexicon(&config.lexicon)?;
    let corpus = load_corpus(&config.corpus)?;

    if let Some(corpus) = &corpus {
        lexicon.add_frequencies(corpus);
    }

    Ok(AppState::new(config, lexicon, corpus))
}
