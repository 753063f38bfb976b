use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::ops::Bound;

use glossa_core::order::{by_frequency, by_length, by_max_translation_frequency};
use glossa_core::{
    Definition, Dictionary, Expression, FrequencyProvider, Meaning, Translation, degrade,
};

/// Everything known about the meanings of one expression.
#[derive(Debug, Clone)]
pub struct Meanings {
    pub expression: Expression,
    pub meanings: Vec<Meaning>,
    pub has_definition: bool,
    /// Languages of all translation targets seen for this expression
    pub translation_languages: HashSet<String>,
}

impl Meanings {
    pub fn new(expression: Expression) -> Self {
        Self {
            expression,
            meanings: Vec::with_capacity(1),
            has_definition: false,
            translation_languages: HashSet::new(),
        }
    }

    pub fn add(&mut self, meaning: Meaning) {
        self.has_definition |= !meaning.definitions.is_empty();
        self.translation_languages
            .extend(meaning.translations.iter().map(|t| t.target.language.clone()));
        self.meanings.push(meaning);
    }
}

/// Expressions sharing one degraded text. Expressions are unique within a bucket.
type Bucket = Vec<Meanings>;

/// A map from expressions to meanings, partitioned by language and keyed by
/// degraded text.
///
/// Built once, then annotated with `add_frequencies`, then read-only. The
/// `&mut self` receivers of the build methods keep readers out until the
/// build is done.
#[derive(Debug, Default)]
pub struct Lexicon {
    // language -> degraded text -> expressions -> meanings
    index: HashMap<String, BTreeMap<String, Bucket>>,
    skip_identity: bool,
    removed_identities: usize,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop translations whose target text equals the source text on `add`
    pub fn with_skip_identity(skip_identity: bool) -> Self {
        Self {
            skip_identity,
            ..Self::default()
        }
    }

    /* Construction */

    pub fn add(&mut self, mut meaning: Meaning) {
        if meaning.is_empty() {
            return;
        }

        if self.skip_identity {
            let before = meaning.translations.len();
            let text = &meaning.expression.text;
            meaning.translations.retain(|t| t.target.text != *text);
            self.removed_identities += before - meaning.translations.len();
        }

        let bucket = self
            .index
            .entry(meaning.expression.language.clone())
            .or_default()
            .entry(meaning.expression.degraded_text().to_string())
            .or_default();

        match bucket
            .iter_mut()
            .find(|ms| ms.expression == meaning.expression)
        {
            Some(meanings) => meanings.add(meaning),
            None => {
                let mut meanings = Meanings::new(meaning.expression.clone());
                meanings.add(meaning);
                bucket.push(meanings);
            }
        }
    }

    /// Add every meaning of another lexicon
    pub fn merge(&mut self, other: Lexicon) {
        tracing::info!("Merging lexicons");
        for meanings in other.index.into_values().flat_map(BTreeMap::into_values).flatten() {
            for meaning in meanings.meanings {
                self.add(meaning);
            }
        }
    }

    /// Annotate every translation with its corpus frequency and re-rank.
    ///
    /// Must run after construction and before the lexicon is shared for reads.
    pub fn add_frequencies(&mut self, provider: &dyn FrequencyProvider) {
        tracing::info!("Computing translation frequencies");
        let mut annotated = 0usize;

        for meanings in self.entries_mut() {
            for meaning in &mut meanings.meanings {
                let frequency = provider.translation_frequencies(&meaning.expression);
                for translation in &mut meaning.translations {
                    translation.frequency = frequency(&translation.target);
                }
                meaning.translations.sort_by(by_frequency);
                annotated += meaning.translations.len();
            }
            meanings.meanings.sort_by(by_max_translation_frequency);
        }

        tracing::info!("Annotated {} translations with frequencies", annotated);
    }

    /* Access */

    /// Aggregates for every indexed expression
    pub fn entries(&self) -> impl Iterator<Item = &Meanings> {
        self.index.values().flat_map(BTreeMap::values).flatten()
    }

    fn entries_mut(&mut self) -> impl Iterator<Item = &mut Meanings> {
        self.index.values_mut().flat_map(BTreeMap::values_mut).flatten()
    }

    pub fn meanings(&self) -> impl Iterator<Item = &Meaning> {
        self.entries().flat_map(|ms| ms.meanings.iter())
    }

    /// Meanings of exactly this expression
    pub fn meanings_for(&self, expression: &Expression) -> &[Meaning] {
        self.bucket(expression.degraded_text(), &expression.language)
            .and_then(|bucket| bucket.iter().find(|ms| ms.expression == *expression))
            .map(|ms| ms.meanings.as_slice())
            .unwrap_or(&[])
    }

    pub fn vocabulary(&self, language: &str) -> BTreeSet<String> {
        self.index
            .get(language)
            .into_iter()
            .flat_map(BTreeMap::values)
            .flatten()
            .map(|ms| ms.expression.text.clone())
            .collect()
    }

    pub fn languages(&self) -> Vec<&str> {
        let mut languages: Vec<&str> = self.index.keys().map(String::as_str).collect();
        languages.sort_unstable();
        languages
    }

    /// Number of distinct expressions
    pub fn len(&self) -> usize {
        self.entries().count()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn removed_identities(&self) -> usize {
        self.removed_identities
    }

    fn bucket(&self, degraded: &str, language: &str) -> Option<&Bucket> {
        self.index.get(language)?.get(degraded)
    }

    fn matching(&self, query: &str, language: &str) -> impl Iterator<Item = &Meaning> {
        self.bucket(&degrade(query), language)
            .into_iter()
            .flatten()
            .flat_map(|ms| ms.meanings.iter())
    }
}

// Prefer the first translation that carries a part of speech
fn pick_translation<'a>(group: &[&'a Translation]) -> &'a Translation {
    group
        .iter()
        .find(|t| !t.pos.is_empty())
        .copied()
        .unwrap_or(group[0])
}

impl Dictionary for Lexicon {
    fn lookup(&self, query: &str, language: &str) -> Vec<Meaning> {
        self.matching(query, language).cloned().collect()
    }

    fn translate(&self, query: &str, source: &str, target: &str) -> Vec<Translation> {
        // Group textual duplicates, keeping groups in first-seen order
        let mut groups: Vec<Vec<&Translation>> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();
        for translation in self
            .matching(query, source)
            .flat_map(|m| m.translations.iter())
            .filter(|t| t.target.language == target)
        {
            match positions.get(translation.target.text.as_str()) {
                Some(&i) => groups[i].push(translation),
                None => {
                    positions.insert(&translation.target.text, groups.len());
                    groups.push(vec![translation]);
                }
            }
        }

        let mut translations: Vec<Translation> = groups
            .iter()
            .map(|group| pick_translation(group).clone())
            .collect();
        translations.sort_by(by_frequency);
        translations
    }

    fn define(&self, query: &str, source: &str) -> Vec<Definition> {
        self.matching(query, source)
            .flat_map(|m| m.definitions.iter().cloned())
            .collect()
    }

    fn extend(
        &self,
        query: &str,
        language: &str,
        translation_language: Option<&str>,
        max: i64,
    ) -> Vec<Expression> {
        let Some(trie) = self.index.get(language) else {
            return Vec::new();
        };

        let prefix = degrade(query);
        let candidates: Vec<&Meanings> = trie
            .range::<str, _>((Bound::Included(prefix.as_str()), Bound::Unbounded))
            .take_while(|(key, _)| key.starts_with(&prefix))
            .flat_map(|(_, bucket)| bucket.iter())
            .filter(|ms| translation_language.is_none_or(|l| ms.translation_languages.contains(l)))
            .collect();

        // Prefer completions that keep the query's exact case
        let exact_case: Vec<&Meanings> = candidates
            .iter()
            .copied()
            .filter(|ms| ms.expression.text.starts_with(query))
            .collect();
        let chosen = if exact_case.is_empty() {
            candidates
        } else {
            exact_case
        };

        let mut expressions: Vec<Expression> =
            chosen.into_iter().map(|ms| ms.expression.clone()).collect();
        expressions.sort_by(by_length);
        if max > 0 {
            expressions.truncate(max as usize);
        }
        expressions
    }
}
