use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use glossa_core::{Expression, FrequencyFn, FrequencyProvider, zero_frequency};

use crate::error::CorpusError;
use crate::example::{Concordance, SentenceExample, Span};
use crate::sentence::{SentencePair, Side};

/// A token position in the corpus
#[derive(Debug, Clone, Copy)]
struct Location {
    pair: usize,
    side: Side,
    token: usize,
}

/// Counts of one-to-one aligned counterparts of a word, per target language.
#[derive(Debug, Default, Clone)]
pub struct TranslationCounts {
    // language -> token -> count
    counts: HashMap<String, HashMap<String, u64>>,
    totals: HashMap<String, u64>,
}

impl TranslationCounts {
    fn add(&mut self, language: &str, token: &str) {
        *self
            .counts
            .entry(language.to_string())
            .or_default()
            .entry(token.to_string())
            .or_default() += 1;
        *self.totals.entry(language.to_string()).or_default() += 1;
    }

    pub fn count(&self, target: &Expression) -> u64 {
        self.counts
            .get(&target.language)
            .and_then(|by_token| by_token.get(&target.text))
            .copied()
            .unwrap_or(0)
    }

    /// Count of `target` over all counted tokens in its language
    pub fn frequency(&self, target: &Expression) -> f64 {
        let count = self.count(target);
        match self.totals.get(&target.language) {
            Some(&total) if count > 0 && total > 0 => count as f64 / total as f64,
            _ => 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageStats {
    pub language: String,
    pub sentences: usize,
    pub word_types: usize,
}

/// Word-aligned sentence pairs indexed by language and word type.
///
/// Both sides of every pair are indexed, each under its own language.
#[derive(Debug, Default)]
pub struct IndexedAlignedCorpus {
    pairs: Vec<Arc<SentencePair>>,
    // language -> word -> locations
    index: HashMap<String, HashMap<String, Vec<Location>>>,
}

impl IndexedAlignedCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, pair: SentencePair) {
        let id = self.pairs.len();
        for side in [Side::Source, Side::Target] {
            let sentence = pair.side(side);
            let words = self.index.entry(sentence.language.clone()).or_default();
            for (token, word) in sentence.tokens.iter().enumerate() {
                words
                    .entry(word.clone())
                    .or_default()
                    .push(Location { pair: id, side, token });
            }
        }
        self.pairs.push(Arc::new(pair));
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Files of a corpus: `{path}.{source}-{target}.{source|target|align}`
    pub fn paths(path: &str, source: &str, target: &str) -> [PathBuf; 3] {
        [source, target, "align"]
            .map(|extension| PathBuf::from(format!("{path}.{source}-{target}.{extension}")))
    }

    pub fn exists(path: &str, source: &str, target: &str) -> bool {
        Self::paths(path, source, target).iter().all(|p| p.exists())
    }

    /// Read and index a parallel corpus, at most `max` lines when `max > 0`.
    pub fn read(
        &mut self,
        path: &str,
        source: &str,
        target: &str,
        max: usize,
    ) -> Result<usize, CorpusError> {
        tracing::info!("Reading sentences: {}-{}", source, target);
        let [source_path, target_path, align_path] = Self::paths(path, source, target);
        let mut sources = open_lines(&source_path)?;
        let mut targets = open_lines(&target_path)?;
        let mut aligns = open_lines(&align_path)?;

        let limit = if max > 0 { max } else { usize::MAX };
        let mut read = 0;
        while read < limit {
            let line = read + 1;
            let (s, t, a) = match (sources.next(), targets.next(), aligns.next()) {
                (None, None, None) => break,
                (Some(s), Some(t), Some(a)) => (s?, t?, a?),
                _ => {
                    return Err(CorpusError::LengthMismatch {
                        line,
                        pair: format!("{source}-{target}"),
                    });
                }
            };
            let pair = SentencePair::parse(&s, &t, &a, source, target).map_err(|e| {
                CorpusError::Line {
                    line,
                    message: e.to_string(),
                }
            })?;
            self.add(pair);
            read += 1;
        }

        tracing::info!("Read {} sentence pairs for {}-{}", read, source, target);
        Ok(read)
    }

    pub fn stats(&self) -> Vec<LanguageStats> {
        let mut stats: Vec<LanguageStats> = self
            .index
            .iter()
            .map(|(language, words)| LanguageStats {
                language: language.clone(),
                sentences: self
                    .pairs
                    .iter()
                    .filter(|p| p.source.language == *language || p.target.language == *language)
                    .count(),
                word_types: words.len(),
            })
            .collect();
        stats.sort_by(|a, b| a.language.cmp(&b.language));
        stats
    }

    fn locations(&self, word: &str, language: &str) -> Option<&[Location]> {
        self.index.get(language)?.get(word).map(Vec::as_slice)
    }

    /// Tally one-to-one aligned counterparts of `source` across the corpus.
    /// Many-to-many links are discarded.
    pub fn translation_counts(&self, source: &Expression) -> Option<TranslationCounts> {
        let locations = self.locations(&source.text, &source.language)?;
        let mut counts = TranslationCounts::default();
        for loc in locations {
            let pair = &self.pairs[loc.pair];
            if let Some(token) = pair.one_to_one(loc.side, loc.token) {
                counts.add(&pair.side(loc.side.other()).language, token);
            }
        }
        Some(counts)
    }
}

fn open_lines(path: &Path) -> Result<std::io::Lines<BufReader<File>>, CorpusError> {
    if !path.exists() {
        return Err(CorpusError::FileNotFound(path.display().to_string()));
    }
    Ok(BufReader::new(File::open(path)?).lines())
}

impl FrequencyProvider for IndexedAlignedCorpus {
    fn translation_frequencies(&self, source: &Expression) -> FrequencyFn<'_> {
        let Some(counts) = self.translation_counts(source) else {
            return zero_frequency();
        };
        Box::new(move |target: &Expression| counts.frequency(target))
    }
}

impl Concordance for IndexedAlignedCorpus {
    fn examples(
        &self,
        query: &str,
        source: &str,
        target: &str,
        max: i64,
        memory_id: i64,
    ) -> Result<Vec<SentenceExample>, CorpusError> {
        let Some(locations) = self.locations(query, source) else {
            return Ok(Vec::new());
        };

        let limit = if max > 0 { max as usize } else { usize::MAX };
        Ok(locations
            .iter()
            .filter(|loc| self.pairs[loc.pair].side(loc.side.other()).language == target)
            .take(limit)
            .map(|loc| {
                SentenceExample::create(
                    Arc::clone(&self.pairs[loc.pair]),
                    loc.side,
                    Span::new(loc.token, 1),
                    memory_id,
                )
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn corpus(lines: &[(&str, &str, &str)], source: &str, target: &str) -> IndexedAlignedCorpus {
        let mut corpus = IndexedAlignedCorpus::new();
        for (s, t, a) in lines {
            corpus.add(SentencePair::parse(s, t, a, source, target).expect("valid pair"));
        }
        corpus
    }

    #[test]
    fn single_pair_frequency() {
        let corpus = corpus(&[("a dog runs", "un perro corre", "0-0 1-1 2-2")], "en", "es");
        let frequency = corpus.translation_frequencies(&Expression::new("dog", "en"));
        assert_eq!(frequency(&Expression::new("perro", "es")), 1.0);
        assert_eq!(frequency(&Expression::new("corre", "es")), 0.0);
    }

    #[test]
    fn frequencies_normalize_per_language() {
        let corpus = corpus(
            &[
                ("dog", "a", "0-0"),
                ("the dog", "x a", "0-0 1-1"),
                ("dog", "a", "0-0"),
                ("dog", "b", "0-0"),
                // many-to-one: discarded
                ("big dog", "b", "0-0 1-0"),
                // unaligned: discarded
                ("dog", "b", ""),
            ],
            "en",
            "es",
        );

        let frequency = corpus.translation_frequencies(&Expression::new("dog", "en"));
        assert_eq!(frequency(&Expression::new("a", "es")), 0.75);
        assert_eq!(frequency(&Expression::new("b", "es")), 0.25);
        assert_eq!(frequency(&Expression::new("c", "es")), 0.0);
        assert_eq!(frequency(&Expression::new("a", "fr")), 0.0);
    }

    #[test]
    fn each_target_language_sums_to_one() {
        let mut corpus = corpus(&[("dog", "perro", "0-0"), ("dog", "can", "0-0")], "en", "es");
        corpus.add(SentencePair::parse("dog", "chien", "0-0", "en", "fr").expect("valid pair"));

        let frequency = corpus.translation_frequencies(&Expression::new("dog", "en"));
        assert_eq!(frequency(&Expression::new("perro", "es")), 0.5);
        assert_eq!(frequency(&Expression::new("can", "es")), 0.5);
        assert_eq!(frequency(&Expression::new("chien", "fr")), 1.0);
    }

    #[test]
    fn target_side_is_indexed_too() {
        let corpus = corpus(&[("a dog runs", "un perro corre", "0-0 1-1 2-2")], "en", "es");
        let frequency = corpus.translation_frequencies(&Expression::new("perro", "es"));
        assert_eq!(frequency(&Expression::new("dog", "en")), 1.0);
    }

    #[test]
    fn unknown_sources_have_zero_frequency() {
        let corpus = corpus(&[("a dog runs", "un perro corre", "0-0 1-1 2-2")], "en", "es");
        let unknown_language = corpus.translation_frequencies(&Expression::new("dog", "de"));
        let unknown_word = corpus.translation_frequencies(&Expression::new("cat", "en"));
        let perro = Expression::new("perro", "es");
        assert_eq!(unknown_language(&perro), 0.0);
        assert_eq!(unknown_word(&perro), 0.0);
    }

    #[test]
    fn examples_filter_by_target_and_cap() {
        let mut corpus = corpus(
            &[
                ("a dog runs", "un perro corre", "0-0 1-1 2-2"),
                ("the dog sleeps", "el perro duerme", "0-0 1-1 2-2"),
                ("dog", "perro", ""),
            ],
            "en",
            "es",
        );
        corpus.add(SentencePair::parse("dog", "chien", "0-0", "en", "fr").expect("valid pair"));

        let all = corpus.examples("dog", "en", "es", 0, 0).expect("examples");
        assert_eq!(all.len(), 3);
        assert!(all.iter().all(|ex| ex.aligned().language == "es"));
        assert_eq!(all[0].source_span, Span::new(1, 1));
        assert_eq!(all[0].target_span, Span::new(1, 1));
        assert_eq!(all[2].target_span, Span::new(0, 1));

        let capped = corpus.examples("dog", "en", "es", 2, 7).expect("examples");
        assert_eq!(capped.len(), 2);
        assert_eq!(capped[0].memory_id, 7);

        assert_eq!(corpus.examples("dog", "en", "fr", 0, 0).expect("examples").len(), 1);
        assert!(corpus.examples("cat", "en", "es", 0, 0).expect("examples").is_empty());
        assert!(corpus.examples("dog", "de", "es", 0, 0).expect("examples").is_empty());
    }

    #[test]
    fn read_parallel_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let base = dir.path().join("corpus");
        let base = base.to_str().expect("utf-8 path");
        fs::write(format!("{base}.en-es.en"), "a dog runs\nthe cat\nmore lines\n").expect("write");
        fs::write(format!("{base}.en-es.es"), "un perro corre\nel gato\nmás líneas\n").expect("write");
        fs::write(format!("{base}.en-es.align"), "0-0 1-1 2-2\n0-0 1-1\n0-0 1-1\n").expect("write");

        assert!(IndexedAlignedCorpus::exists(base, "en", "es"));
        assert!(!IndexedAlignedCorpus::exists(base, "en", "fr"));

        let mut corpus = IndexedAlignedCorpus::new();
        assert_eq!(corpus.read(base, "en", "es", 2).expect("readable"), 2);
        assert_eq!(corpus.len(), 2);

        let stats = corpus.stats();
        assert_eq!(stats[0].language, "en");
        assert_eq!(stats[0].sentences, 2);
        assert_eq!(stats[0].word_types, 5);

        let frequency = corpus.translation_frequencies(&Expression::new("cat", "en"));
        assert_eq!(frequency(&Expression::new("gato", "es")), 1.0);
    }

    #[test]
    fn malformed_line_reports_position() {
        let dir = tempfile::tempdir().expect("tempdir");
        let base = dir.path().join("bad");
        let base = base.to_str().expect("utf-8 path");
        fs::write(format!("{base}.en-es.en"), "a dog\nthe cat\n").expect("write");
        fs::write(format!("{base}.en-es.es"), "un perro\nel gato\n").expect("write");
        fs::write(format!("{base}.en-es.align"), "0-0 1-1\n0-0 9-9\n").expect("write");

        let mut corpus = IndexedAlignedCorpus::new();
        let result = corpus.read(base, "en", "es", 0);
        assert!(matches!(result, Err(CorpusError::Line { line: 2, .. })));

        let missing = IndexedAlignedCorpus::new().read(base, "en", "fr", 0);
        assert!(matches!(missing, Err(CorpusError::FileNotFound(_))));
    }

    #[test]
    fn uneven_files_are_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let base = dir.path().join("uneven");
        let base = base.to_str().expect("utf-8 path");
        fs::write(format!("{base}.en-es.en"), "a dog\nthe cat\nhi\n").expect("write");
        fs::write(format!("{base}.en-es.es"), "un perro\n").expect("write");
        fs::write(format!("{base}.en-es.align"), "0-0 1-1\n0-0 1-1\n0-0\n").expect("write");

        let mut corpus = IndexedAlignedCorpus::new();
        let result = corpus.read(base, "en", "es", 0);
        assert!(matches!(
            result,
            Err(CorpusError::LengthMismatch { line: 2, ref pair }) if pair == "en-es"
        ));

        // A cap inside the common prefix never reaches the mismatch
        let capped = IndexedAlignedCorpus::new().read(base, "en", "es", 1);
        assert!(matches!(capped, Ok(1)));
    }
}
