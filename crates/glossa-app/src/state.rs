use std::sync::Arc;

use glossa_config::Config;
use glossa_corpus::{Concordance, IndexedAlignedCorpus};
use glossa_lexicon::Lexicon;
use glossa_protocol::LexiconProtocol;

/// Everything the request workers share. Read-only once built.
pub struct AppState {
    pub config: Config,
    pub lexicon: Arc<Lexicon>,
    pub protocol: LexiconProtocol,
}

impl AppState {
    /// Freeze an annotated lexicon and optional corpus for sharing
    pub fn new(config: Config, lexicon: Lexicon, corpus: Option<IndexedAlignedCorpus>) -> Self {
        let lexicon = Arc::new(lexicon);
        let corpus = corpus.map(|c| Arc::new(c) as Arc<dyn Concordance>);
        let protocol = LexiconProtocol::new(lexicon.clone(), corpus);

        Self {
            config,
            lexicon,
            protocol,
        }
    }
}
