use glossa_corpus::{SentenceExample, Span};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseTranslation {
    pub source: String,
    pub pos: String,
    pub target: String,
    pub frequency: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResponseDefinition {
    pub source: String,
    pub pos: String,
    pub text: String,
}

/// A usage example, oriented so the query is on the source side.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseExample {
    pub source_tokens: Vec<String>,
    pub source_delimiters: Vec<String>,
    pub target_tokens: Vec<String>,
    pub target_delimiters: Vec<String>,
    pub alignment: Vec<Vec<usize>>,
    pub source_span: Span,
    pub target_span: Span,
    pub similarity: f64,
}

impl From<&SentenceExample> for ResponseExample {
    fn from(example: &SentenceExample) -> Self {
        let sentence = example.sentence();
        let aligned = example.aligned();
        Self {
            source_tokens: sentence.tokens.clone(),
            source_delimiters: sentence.delimiters.clone(),
            target_tokens: aligned.tokens.clone(),
            target_delimiters: aligned.delimiters.clone(),
            alignment: sentence.alignment.clone(),
            source_span: example.source_span,
            target_span: example.target_span,
            similarity: example.similarity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResponseSynonymSet {
    pub pos: String,
    pub synonyms: Vec<String>,
}

/// Aggregated answer to a `Request`. Aspects not asked for stay empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Response {
    pub translations: Vec<ResponseTranslation>,
    pub definitions: Vec<ResponseDefinition>,
    pub examples: Vec<ResponseExample>,
    pub extensions: Vec<ResponseTranslation>,
    pub synonyms: Vec<ResponseSynonymSet>,
    pub error: Option<String>,
}

impl Response {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use glossa_corpus::{SentencePair, Side};

    use super::*;

    #[test]
    fn example_fields_use_camel_case() {
        let pair = SentencePair::parse("a dog", "un perro", "0-0 1-1", "en", "es").expect("valid pair");
        let example = SentenceExample::create(Arc::new(pair), Side::Source, Span::new(1, 1), 0);

        let json = serde_json::to_value(ResponseExample::from(&example)).expect("serializable");
        assert_eq!(json["sourceTokens"], serde_json::json!(["a", "dog"]));
        assert_eq!(json["targetTokens"], serde_json::json!(["un", "perro"]));
        assert_eq!(json["sourceSpan"], serde_json::json!({"start": 1, "length": 1}));
        assert_eq!(json["targetSpan"], serde_json::json!({"start": 1, "length": 1}));
        assert_eq!(json["alignment"], serde_json::json!([[0], [1]]));
    }

    #[test]
    fn target_side_example_is_reoriented() {
        let pair = SentencePair::parse("a dog", "un perro", "0-0 1-1", "en", "es").expect("valid pair");
        let example = SentenceExample::create(Arc::new(pair), Side::Target, Span::new(1, 1), 0);

        let response = ResponseExample::from(&example);
        assert_eq!(response.source_tokens, ["un", "perro"]);
        assert_eq!(response.target_tokens, ["a", "dog"]);
    }

    #[test]
    fn error_response_is_otherwise_empty() {
        let response = Response::error("Invalid request");
        let json = serde_json::to_value(&response).expect("serializable");
        assert_eq!(json["error"], "Invalid request");
        assert_eq!(json["translations"], serde_json::json!([]));
        assert!(response.is_error());
        assert!(!Response::default().is_error());
    }
}
