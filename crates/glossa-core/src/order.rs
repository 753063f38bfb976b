//! Orderings on lexical items.

use std::cmp::Ordering;

use crate::types::{Expression, Meaning, Translation};

/// Highest frequency first.
pub fn by_frequency(a: &Translation, b: &Translation) -> Ordering {
    b.frequency.total_cmp(&a.frequency)
}

/// Meanings whose best translation is most frequent first; meanings without
/// translations sort last.
pub fn by_max_translation_frequency(a: &Meaning, b: &Meaning) -> Ordering {
    match (a.translations.first(), b.translations.first()) {
        (Some(x), Some(y)) => y.frequency.total_cmp(&x.frequency),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Shortest text first.
pub fn by_length(a: &Expression, b: &Expression) -> Ordering {
    a.text.chars().count().cmp(&b.text.chars().count())
}
