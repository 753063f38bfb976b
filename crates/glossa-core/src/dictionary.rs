use crate::types::{Definition, Expression, Meaning, Translation};

/// Read access to a lexical index.
///
/// Unknown languages and absent text yield empty results, never errors.
pub trait Dictionary: Send + Sync {
    /// All meanings of all expressions whose degraded text equals the query's
    fn lookup(&self, query: &str, language: &str) -> Vec<Meaning>;

    /// Translations into `target`, one per target text, most frequent first
    fn translate(&self, query: &str, source: &str, target: &str) -> Vec<Translation>;

    /// All definitions of the matching expressions
    fn define(&self, query: &str, source: &str) -> Vec<Definition>;

    /// Expressions whose degraded text starts with the degraded query,
    /// shortest first. `max <= 0` means no limit.
    fn extend(
        &self,
        query: &str,
        language: &str,
        translation_language: Option<&str>,
        max: i64,
    ) -> Vec<Expression>;
}

/// Frequency of a target expression as a translation of a fixed source.
pub type FrequencyFn<'a> = Box<dyn Fn(&Expression) -> f64 + Send + Sync + 'a>;

/// Source of empirical translation frequencies
pub trait FrequencyProvider: Send + Sync {
    /// Returns a function from target expressions to relative frequencies.
    /// Frequencies sum to 1.0 within each target language.
    fn translation_frequencies(&self, source: &Expression) -> FrequencyFn<'_>;
}

/// The frequency function of an unknown source word.
pub fn zero_frequency<'a>() -> FrequencyFn<'a> {
    Box::new(|_: &Expression| 0.0)
}
