use serde::{Deserialize, Serialize};

/// A part of the response a client can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aspect {
    Translate,
    Define,
    Example,
    Extend,
    Synonym,
}

impl Aspect {
    pub const ALL: [Aspect; 5] = [
        Aspect::Translate,
        Aspect::Define,
        Aspect::Example,
        Aspect::Extend,
        Aspect::Synonym,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Aspect::Translate => "translate",
            Aspect::Define => "define",
            Aspect::Example => "example",
            Aspect::Extend => "extend",
            Aspect::Synonym => "synonym",
        }
    }
}

fn default_min_frequency() -> f64 {
    1e-4
}

fn default_max_count() -> usize {
    10
}

/// A lexicon query. Aspects travel as one boolean flag each.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Request {
    pub query: String,
    pub source: String,
    pub target: String,
    pub context: String,
    pub translate: bool,
    pub define: bool,
    pub example: bool,
    pub extend: bool,
    pub synonym: bool,
    #[serde(default = "default_min_frequency")]
    pub min_frequency: f64,
    #[serde(default = "default_max_count")]
    pub max_count: usize,
    pub memory: i64,
}

impl Default for Request {
    fn default() -> Self {
        Self {
            query: String::new(),
            source: String::new(),
            target: String::new(),
            context: String::new(),
            translate: false,
            define: false,
            example: false,
            extend: false,
            synonym: false,
            min_frequency: default_min_frequency(),
            max_count: default_max_count(),
            memory: 0,
        }
    }
}

impl Request {
    pub fn new(query: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            source: source.into(),
            target: target.into(),
            ..Self::default()
        }
    }

    pub fn with_aspects(mut self, aspects: &[Aspect]) -> Self {
        for aspect in aspects {
            *self.flag_mut(*aspect) = true;
        }
        self
    }

    fn flag_mut(&mut self, aspect: Aspect) -> &mut bool {
        match aspect {
            Aspect::Translate => &mut self.translate,
            Aspect::Define => &mut self.define,
            Aspect::Example => &mut self.example,
            Aspect::Extend => &mut self.extend,
            Aspect::Synonym => &mut self.synonym,
        }
    }

    pub fn wants(&self, aspect: Aspect) -> bool {
        match aspect {
            Aspect::Translate => self.translate,
            Aspect::Define => self.define,
            Aspect::Example => self.example,
            Aspect::Extend => self.extend,
            Aspect::Synonym => self.synonym,
        }
    }

    /// Requested aspects in response order
    pub fn aspects(&self) -> Vec<Aspect> {
        Aspect::ALL.into_iter().filter(|a| self.wants(*a)).collect()
    }

    /// Query, source and target are required; nothing else is checked
    pub fn is_valid(&self) -> bool {
        !self.query.is_empty() && !self.source.is_empty() && !self.target.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let request: Request =
            serde_json::from_str(r#"{"query":"dog","source":"en","target":"es","translate":true}"#)
                .expect("valid request");

        assert_eq!(request.min_frequency, 1e-4);
        assert_eq!(request.max_count, 10);
        assert_eq!(request.memory, 0);
        assert_eq!(request.context, "");
        assert_eq!(request.aspects(), vec![Aspect::Translate]);
        assert!(request.is_valid());
    }

    #[test]
    fn camel_case_fields() {
        let request: Request = serde_json::from_str(
            r#"{"query":"dog","source":"en","target":"es","minFrequency":0.5,"maxCount":3,"extend":true,"define":true}"#,
        )
        .expect("valid request");

        assert_eq!(request.min_frequency, 0.5);
        assert_eq!(request.max_count, 3);
        assert_eq!(request.aspects(), vec![Aspect::Define, Aspect::Extend]);
    }

    #[test]
    fn empty_required_field_is_invalid() {
        assert!(!Request::new("", "en", "es").is_valid());
        assert!(!Request::new("dog", "", "es").is_valid());
        assert!(!Request::new("dog", "en", "").is_valid());
    }

    #[test]
    fn with_aspects_sets_flags() {
        let request = Request::new("dog", "en", "es").with_aspects(&[Aspect::Synonym, Aspect::Translate]);
        assert!(request.translate && request.synonym);
        assert_eq!(request.aspects(), vec![Aspect::Translate, Aspect::Synonym]);
    }
}
