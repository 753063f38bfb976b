pub mod corpus;
pub mod error;
pub mod example;
pub mod sentence;

pub use corpus::{IndexedAlignedCorpus, LanguageStats, TranslationCounts};
pub use error::CorpusError;
pub use example::{Concordance, SentenceExample, Span};
pub use sentence::{AlignedSentence, SentencePair, Side};
