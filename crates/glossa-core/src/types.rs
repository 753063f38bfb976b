use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::preprocess::degrade;

/// A written form of a lexeme in a language.
///
/// Identity is `(text, language)`. The degraded text is derived on
/// construction and only used as an index key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "ExpressionRecord")]
pub struct Expression {
    pub text: String,
    /// ISO 639-1 code, e.g. "en"
    pub language: String,
    #[serde(skip)]
    degraded_text: String,
}

#[derive(Deserialize)]
struct ExpressionRecord {
    text: String,
    language: String,
}

impl From<ExpressionRecord> for Expression {
    fn from(record: ExpressionRecord) -> Self {
        Expression::new(record.text, record.language)
    }
}

impl Expression {
    pub fn new(text: impl Into<String>, language: impl Into<String>) -> Self {
        let text = text.into();
        let degraded_text = degrade(&text);
        Self {
            text,
            language: language.into(),
            degraded_text,
        }
    }

    pub fn degraded_text(&self) -> &str {
        &self.degraded_text
    }
}

impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text && self.language == other.language
    }
}

impl Eq for Expression {}

impl Hash for Expression {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
        self.language.hash(state);
    }
}

/// A translation of an expression into another language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    #[serde(alias = "translation")]
    pub target: Expression,
    #[serde(default)]
    pub pos: Vec<String>,
    /// Empirical translation frequency, filled in by `Lexicon::add_frequencies`
    #[serde(default)]
    pub frequency: f64,
    #[serde(default, alias = "sourceTag")]
    pub source_tag: String,
}

impl Translation {
    pub fn new(target: Expression, pos: Vec<String>) -> Self {
        Self {
            target,
            pos,
            frequency: 0.0,
            source_tag: String::new(),
        }
    }

    pub fn first_pos(&self) -> &str {
        self.pos.first().map(String::as_str).unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Definition {
    pub text: String,
    #[serde(default)]
    pub pos: Vec<String>,
    #[serde(default, alias = "languageTag")]
    pub language_tag: String,
    #[serde(default, alias = "dataSource")]
    pub data_source: String,
}

impl Definition {
    pub fn new(text: impl Into<String>, pos: Vec<String>, language_tag: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            pos,
            language_tag: language_tag.into(),
            data_source: String::new(),
        }
    }

    pub fn first_pos(&self) -> &str {
        self.pos.first().map(String::as_str).unwrap_or("")
    }
}

/// One sense of an expression from one data source.
///
/// Meanings of the same expression are never merged; the lexicon keeps them
/// side by side and aggregates at query time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meaning {
    pub expression: Expression,
    #[serde(default)]
    pub pos: Vec<String>,
    #[serde(default)]
    pub definitions: Vec<Definition>,
    #[serde(default)]
    pub translations: Vec<Translation>,
    #[serde(default)]
    pub synonyms: Vec<Expression>,
    #[serde(default, alias = "dataSource")]
    pub data_source: String,
}

impl Meaning {
    pub fn new(expression: Expression) -> Self {
        Self {
            expression,
            pos: Vec::new(),
            definitions: Vec::new(),
            translations: Vec::new(),
            synonyms: Vec::new(),
            data_source: String::new(),
        }
    }

    pub fn with_data_source(mut self, data_source: impl Into<String>) -> Self {
        self.data_source = data_source.into();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty() && self.translations.is_empty()
    }
}
