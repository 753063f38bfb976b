use std::sync::Arc;

use serde::Serialize;

use crate::error::CorpusError;
use crate::sentence::{AlignedSentence, SentencePair, Side};

/// A span of a token sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: usize,
    pub length: usize,
}

impl Span {
    pub fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    pub fn end(&self) -> usize {
        self.start + self.length
    }
}

/// An aligned sentence containing a matched span.
#[derive(Debug, Clone)]
pub struct SentenceExample {
    pub pair: Arc<SentencePair>,
    /// Which side of the pair holds the query
    pub side: Side,
    pub source_span: Span,
    pub target_span: Span,
    /// Similarity to the request context, 0 unless a ranker sets it
    pub similarity: f64,
    /// Memory the example came from; -1 for the background corpus
    pub memory_id: i64,
}

impl SentenceExample {
    /// An example whose target span covers every position linked to the
    /// source span. Without any link the target span is `(0, 1)`.
    pub fn create(pair: Arc<SentencePair>, side: Side, source_span: Span, memory_id: i64) -> Self {
        let sentence = pair.side(side);
        let linked = (source_span.start..source_span.end()).flat_map(|i| sentence.links(i));
        let target_span = match (linked.clone().min(), linked.max()) {
            (Some(&min), Some(&max)) => Span::new(min, max - min + 1),
            _ => Span::new(0, 1),
        };

        Self {
            pair,
            side,
            source_span,
            target_span,
            similarity: 0.0,
            memory_id,
        }
    }

    /// The sentence holding the query
    pub fn sentence(&self) -> &AlignedSentence {
        self.pair.side(self.side)
    }

    /// Its translation
    pub fn aligned(&self) -> &AlignedSentence {
        self.pair.side(self.side.other())
    }
}

/// Source of usage examples.
pub trait Concordance: Send + Sync {
    /// Sentences in `source` containing `query` whose translation is in
    /// `target`, at most `max` when `max > 0`.
    fn examples(
        &self,
        query: &str,
        source: &str,
        target: &str,
        max: i64,
        memory_id: i64,
    ) -> Result<Vec<SentenceExample>, CorpusError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_span_covers_all_links() {
        let pair = SentencePair::parse(
            "I like hot dogs",
            "me gustan los perros calientes",
            "0-0 1-1 2-4 3-2 3-3",
            "en",
            "es",
        )
        .expect("valid pair");
        let pair = Arc::new(pair);

        let example = SentenceExample::create(pair.clone(), Side::Source, Span::new(3, 1), 0);
        assert_eq!(example.target_span, Span::new(2, 2));

        let phrase = SentenceExample::create(pair, Side::Source, Span::new(2, 2), 0);
        assert_eq!(phrase.target_span, Span::new(2, 3));
        assert_eq!(phrase.sentence().language, "en");
        assert_eq!(phrase.aligned().language, "es");
    }

    #[test]
    fn unlinked_span_collapses() {
        let pair = SentencePair::parse("a dog", "perro", "1-0", "en", "es").expect("valid pair");
        let example = SentenceExample::create(Arc::new(pair), Side::Source, Span::new(0, 1), -1);
        assert_eq!(example.target_span, Span::new(0, 1));
        assert_eq!(example.memory_id, -1);
        assert_eq!(example.similarity, 0.0);
    }

    #[test]
    fn target_side_examples_use_reverse_links() {
        let pair = SentencePair::parse("a dog runs", "un perro corre", "0-0 1-1 2-2", "en", "es")
            .expect("valid pair");
        let example = SentenceExample::create(Arc::new(pair), Side::Target, Span::new(1, 1), 0);
        assert_eq!(example.sentence().tokens[1], "perro");
        assert_eq!(example.target_span, Span::new(1, 1));
    }
}
