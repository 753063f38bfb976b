use glossa_corpus::CorpusError;

/// Failure of a single aspect handler. Never fails a whole response.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("Corpus error: {0}")]
    Corpus(#[from] CorpusError),

    #[error("Handler panicked: {0}")]
    Panicked(String),
}
