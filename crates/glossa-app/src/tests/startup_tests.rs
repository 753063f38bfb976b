use std::fs;
use std::path::Path;

use glossa_config::Config;
use glossa_protocol::{Aspect, Request};

use crate::profile::{load_config, read_profile};
use crate::startup::build_state;

const LEXICON: &str = r#"[
    {
        "expression": {"text": "dog", "language": "en"},
        "pos": ["noun"],
        "translations": [
            {"target": {"text": "can", "language": "es"}},
            {"target": {"text": "perro", "language": "es"}}
        ]
    }
]"#;

fn write_corpus(dir: &Path) -> String {
    let prefix = dir.join("corpus");
    let prefix = prefix.display().to_string();
    fs::write(format!("{prefix}.en-es.en"), "a dog\nthe dog\n").expect("write en");
    fs::write(format!("{prefix}.en-es.es"), "un perro\nel perro\n").expect("write es");
    fs::write(format!("{prefix}.en-es.align"), "0-0 1-1\n0-0 1-1\n").expect("write align");
    prefix
}

#[test]
fn test_pipeline_annotates_frequencies() {
    let dir = tempfile::tempdir().expect("tempdir");
    let lexicon_path = dir.path().join("lexicon.json");
    fs::write(&lexicon_path, LEXICON).expect("write lexicon");

    let mut config = Config::default();
    config.lexicon.paths = vec![lexicon_path.display().to_string()];
    config.corpus.path = Some(write_corpus(dir.path()));
    config.corpus.pairs = vec!["en-es".into()];

    let state = build_state(config).expect("pipeline succeeds");
    let request = Request::new("dog", "en", "es").with_aspects(&[Aspect::Translate, Aspect::Example]);
    let response = state.protocol.respond(&request);

    assert_eq!(response.translations[0].target, "perro");
    assert_eq!(response.translations[0].frequency, 1.0);
    assert_eq!(response.translations[0].pos, "noun");
    assert_eq!(response.examples.len(), 2);
}

#[test]
fn test_pipeline_without_corpus() {
    let dir = tempfile::tempdir().expect("tempdir");
    let lexicon_path = dir.path().join("lexicon.json");
    fs::write(&lexicon_path, LEXICON).expect("write lexicon");

    let mut config = Config::default();
    config.lexicon.paths = vec![lexicon_path.display().to_string()];

    let state = build_state(config).expect("pipeline succeeds");
    let mut request = Request::new("dog", "en", "es").with_aspects(&[Aspect::Translate, Aspect::Example]);
    request.min_frequency = 0.0;
    let response = state.protocol.respond(&request);

    // No corpus, so every frequency is zero
    assert_eq!(response.translations.len(), 2);
    assert!(response.examples.is_empty());
}

#[test]
fn test_missing_lexicon_aborts_startup() {
    let mut config = Config::default();
    config.lexicon.paths = vec!["/nonexistent/lexicon.json".into()];
    assert!(build_state(config).is_err());
}

#[test]
fn test_missing_corpus_aborts_startup() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut config = Config::default();
    config.corpus.path = Some(dir.path().join("missing").display().to_string());
    config.corpus.pairs = vec!["en-es".into()];
    assert!(build_state(config).is_err());
}

#[test]
fn test_profile_sets_subset() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("profile.json");
    fs::write(&path, r#"{"server": {"queue_capacity": 7}}"#).expect("write profile");

    let config = read_profile(&path)
        .expect("valid profile")
        .with_vars(|_| None);
    assert_eq!(config.server.queue_capacity, 7);
    assert_eq!(config.server.workers, 4);
}

#[test]
fn test_invalid_profile_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("profile.json");
    fs::write(&path, "{ nope").expect("write profile");
    assert!(load_config(Some(path.as_path())).is_err());
}
