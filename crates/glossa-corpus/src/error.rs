#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("Malformed alignment link: {0:?}")]
    MalformedLink(String),

    #[error("Alignment link {link} outside a {source_len}x{target_len} sentence pair")]
    LinkOutOfRange {
        link: String,
        source_len: usize,
        target_len: usize,
    },

    #[error("Line {line}: {message}")]
    Line { line: usize, message: String },

    #[error("Parallel files of {pair} differ in length at line {line}")]
    LengthMismatch { line: usize, pair: String },

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
