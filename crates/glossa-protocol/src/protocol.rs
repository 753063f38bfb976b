use std::any::Any;
use std::collections::HashSet;
use std::hash::Hash;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use glossa_core::Dictionary;
use glossa_corpus::Concordance;

use crate::error::ProtocolError;
use crate::request::{Aspect, Request};
use crate::response::{
    Response, ResponseDefinition, ResponseExample, ResponseSynonymSet, ResponseTranslation,
};

/// Result of one aspect handler
enum Outcome {
    Translations(Vec<ResponseTranslation>),
    Definitions(Vec<ResponseDefinition>),
    Examples(Vec<ResponseExample>),
    Extensions(Vec<ResponseTranslation>),
    Synonyms(Vec<ResponseSynonymSet>),
}

/// Answers requests from a dictionary and an optional example corpus.
///
/// Each requested aspect is computed independently. A failing aspect is
/// logged and left empty; the others are still returned.
#[derive(Clone)]
pub struct LexiconProtocol {
    dictionary: Arc<dyn Dictionary>,
    concordance: Option<Arc<dyn Concordance>>,
}

impl LexiconProtocol {
    pub fn new(dictionary: Arc<dyn Dictionary>, concordance: Option<Arc<dyn Concordance>>) -> Self {
        Self {
            dictionary,
            concordance,
        }
    }

    pub fn respond(&self, request: &Request) -> Response {
        if !request.is_valid() {
            tracing::debug!(?request, "Rejecting request");
            return Response::error("Invalid request");
        }

        tracing::debug!(
            query = %request.query,
            source = %request.source,
            target = %request.target,
            aspects = ?request.aspects(),
            "Responding"
        );

        let mut response = Response::default();
        for aspect in request.aspects() {
            match self.run(aspect, request) {
                Ok(outcome) => response.apply(outcome),
                Err(e) => tracing::warn!("Aspect {} failed for {:?}: {}", aspect.as_str(), request.query, e),
            }
        }
        response
    }

    fn run(&self, aspect: Aspect, request: &Request) -> Result<Outcome, ProtocolError> {
        panic::catch_unwind(AssertUnwindSafe(|| self.handle(aspect, request)))
            .unwrap_or_else(|payload| Err(ProtocolError::Panicked(panic_message(payload))))
    }

    fn handle(&self, aspect: Aspect, request: &Request) -> Result<Outcome, ProtocolError> {
        Ok(match aspect {
            Aspect::Translate => Outcome::Translations(self.translations(request)),
            Aspect::Define => Outcome::Definitions(self.definitions(request)),
            Aspect::Example => Outcome::Examples(self.examples(request)?),
            Aspect::Extend => Outcome::Extensions(self.extensions(request)),
            Aspect::Synonym => Outcome::Synonyms(self.synonyms(request)),
        })
    }

    /// The top translation is always kept; the rest must reach `min_frequency`.
    fn translations(&self, request: &Request) -> Vec<ResponseTranslation> {
        self.dictionary
            .translate(&request.query, &request.source, &request.target)
            .into_iter()
            .enumerate()
            .filter(|(i, t)| *i == 0 || t.frequency >= request.min_frequency)
            .take(request.max_count)
            .map(|(_, t)| ResponseTranslation {
                source: request.query.clone(),
                pos: t.first_pos().to_string(),
                target: t.target.text.clone(),
                frequency: t.frequency,
            })
            .collect()
    }

    fn definitions(&self, request: &Request) -> Vec<ResponseDefinition> {
        let definitions = self
            .dictionary
            .define(&request.query, &request.source)
            .into_iter()
            .map(|d| ResponseDefinition {
                source: request.query.clone(),
                pos: d.first_pos().to_string(),
                text: d.text,
            });

        let mut definitions = distinct(definitions);
        definitions.truncate(request.max_count);
        definitions
    }

    fn examples(&self, request: &Request) -> Result<Vec<ResponseExample>, ProtocolError> {
        let Some(concordance) = &self.concordance else {
            return Ok(Vec::new());
        };

        let examples = concordance.examples(
            &request.query,
            &request.source,
            &request.target,
            as_limit(request.max_count),
            request.memory,
        )?;
        Ok(examples.iter().map(ResponseExample::from).collect())
    }

    /// Completions of the query paired with their top translation.
    ///
    /// Candidates whose top translation reaches `min_frequency` are preferred.
    /// When none does, the top translations are returned unfiltered.
    fn extensions(&self, request: &Request) -> Vec<ResponseTranslation> {
        let max = request.max_count;
        let pool = as_limit(max).saturating_mul(20).saturating_add(20);
        let candidates =
            self.dictionary
                .extend(&request.query, &request.source, Some(request.target.as_str()), pool);

        let mut strict = Vec::new();
        let mut visited = Vec::new();
        for candidate in candidates {
            if strict.len() >= max {
                break;
            }
            let Some(first) = self
                .dictionary
                .translate(&candidate.text, &request.source, &request.target)
                .into_iter()
                .next()
            else {
                continue;
            };

            let extension = ResponseTranslation {
                source: candidate.text,
                pos: first.first_pos().to_string(),
                target: first.target.text,
                frequency: first.frequency,
            };
            if extension.frequency >= request.min_frequency {
                strict.push(extension.clone());
            }
            visited.push(extension);
        }

        if !strict.is_empty() {
            return strict;
        }
        // Nothing was accepted, so every candidate was visited
        visited.truncate(max);
        visited
    }

    /// One synonym set per part of speech of each meaning.
    fn synonyms(&self, request: &Request) -> Vec<ResponseSynonymSet> {
        let sets = self
            .dictionary
            .lookup(&request.query, &request.source)
            .into_iter()
            .filter(|m| !m.synonyms.is_empty())
            .flat_map(|m| {
                let synonyms: Vec<String> = m.synonyms.iter().map(|e| e.text.clone()).collect();
                let pos = if m.pos.is_empty() {
                    vec![String::new()]
                } else {
                    distinct(m.pos)
                };
                pos.into_iter()
                    .map(move |pos| ResponseSynonymSet {
                        pos,
                        synonyms: synonyms.clone(),
                    })
                    .collect::<Vec<_>>()
            });
        distinct(sets)
    }
}

impl Response {
    fn apply(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Translations(t) => self.translations = t,
            Outcome::Definitions(d) => self.definitions = d,
            Outcome::Examples(e) => self.examples = e,
            Outcome::Extensions(e) => self.extensions = e,
            Outcome::Synonyms(s) => self.synonyms = s,
        }
    }
}

/// A count as a collaborator limit, saturating at `i64::MAX`
fn as_limit(count: usize) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}

/// Drop repeated items, keeping first occurrences in order
fn distinct<T: Eq + Hash + Clone>(items: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
