use std::fs;
use tempfile::TempDir;

use faqmatch_core::config::{Config, EmbedBackend};
use faqmatch_core::corpus::CorpusLoader;
use faqmatch_core::{Error, Method};

#[test]
fn load_json_list_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("faq.json");
    fs::write(
        &path,
        r#"[{"question": " What are your business hours? ", "answer": "9-6 EST"},
            {"question": "How do I reset my password?", "answer": "Use forgot-password link"}]"#,
    )
    .unwrap();

    let corpus = CorpusLoader::new().load(&path).expect("load");

    assert_eq!(corpus.len(), 2);
    assert_eq!(corpus.get(0).unwrap().question, "What are your business hours?", "questions are trimmed");
    assert_eq!(corpus.get(1).unwrap().answer, "Use forgot-password link");
}

#[test]
fn load_directory_concatenates_in_path_order() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    fs::create_dir(dir.join("nested")).unwrap();
    fs::write(dir.join("b.json"), r#"{"entries": [{"question": "second", "answer": "2"}]}"#).unwrap();
    fs::write(
        dir.join("a.toml"),
        "[[entry]]\nquestion = \"first\"\nanswer = \"1\"\n",
    )
    .unwrap();
    fs::write(dir.join("nested/c.json"), r#"[{"question": "third", "answer": "3"}]"#).unwrap();
    fs::write(dir.join("notes.txt"), "ignored").unwrap();

    let corpus = CorpusLoader::new().load(dir).expect("load dir");

    let questions: Vec<&str> = corpus.questions().collect();
    assert_eq!(questions, vec!["first", "second", "third"]);
}

#[test]
fn empty_directory_yields_empty_corpus() {
    let tmp = TempDir::new().unwrap();
    let corpus = CorpusLoader::new().load(tmp.path()).expect("load empty dir");
    assert!(corpus.is_empty());
}

#[test]
fn malformed_and_missing_files_are_load_errors() {
    let tmp = TempDir::new().unwrap();
    let bad = tmp.path().join("bad.json");
    fs::write(&bad, "{not json").unwrap();

    let loader = CorpusLoader::new();
    assert!(matches!(loader.load(&bad), Err(Error::CorpusLoad { .. })));
    assert!(matches!(loader.load(&tmp.path().join("missing.json")), Err(Error::CorpusLoad { .. })));
}

#[test]
fn settings_from_file_resolve_relative_paths() {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("config.toml");
    fs::write(
        &config_path,
        r#"
[matcher]
threshold = 0.45
method = "semantic"

[data]
corpus_path = "data/faq.json"

[text]
synonyms = { open = "hour" }

[embed]
backend = "word-vectors"
word_vectors_path = "vectors/glove.txt"
"#,
    )
    .unwrap();

    let settings = Config::load_from(&config_path).unwrap().settings().unwrap();

    assert!((settings.matcher.threshold - 0.45).abs() < 1e-6);
    assert_eq!(settings.matcher.method, Method::Semantic);
    assert_eq!(settings.data.corpus_path, Some(tmp.path().join("data/faq.json")));
    assert_eq!(settings.embed.backend, EmbedBackend::WordVectors);
    assert_eq!(settings.embed.word_vectors_path, Some(tmp.path().join("vectors/glove.txt")));
    assert_eq!(settings.text.synonyms.get("open").map(String::as_str), Some("hour"));
}

#[test]
fn missing_config_file_gives_defaults() {
    let tmp = TempDir::new().unwrap();
    let settings = Config::load_from(&tmp.path().join("config.toml")).unwrap().settings().unwrap();

    assert!((settings.matcher.threshold - 0.3).abs() < 1e-6);
    assert_eq!(settings.matcher.method, Method::Lexical);
    assert!(settings.data.corpus_path.is_none());
}

#[test]
fn method_in_config_file_ignores_case() {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("config.toml");

    fs::write(&config_path, "[matcher]\nmethod = \"TFIDF\"\n").unwrap();
    let settings = Config::load_from(&config_path).unwrap().settings().unwrap();
    assert_eq!(settings.matcher.method, Method::Lexical);

    fs::write(&config_path, "[matcher]\nmethod = \"Semantic\"\n").unwrap();
    let settings = Config::load_from(&config_path).unwrap().settings().unwrap();
    assert_eq!(settings.matcher.method, Method::Semantic);

    fs::write(&config_path, "[matcher]\nmethod = \"bm25\"\n").unwrap();
    assert!(Config::load_from(&config_path).unwrap().settings().is_err());
}

#[test]
fn out_of_range_threshold_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("config.toml");
    fs::write(&config_path, "[matcher]\nthreshold = 1.7\n").unwrap();

    assert!(Config::load_from(&config_path).unwrap().settings().is_err());
}
