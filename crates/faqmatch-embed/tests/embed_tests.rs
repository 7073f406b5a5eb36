use std::io::Write;

use faqmatch_core::config::{EmbedBackend, EmbedSettings};
use faqmatch_core::traits::{Embedder, Similarity};
use faqmatch_embed::{EmbeddingSimilarity, FakeEmbedder, WordVectors, embedder_from_settings};

#[test]
fn fake_embedder_shapes_and_determinism() {
    let embedder = FakeEmbedder::default();
    let texts = vec!["hello world".to_string(), "hello world".to_string()];
    let embs = embedder.embed_batch(&texts).expect("embed_batch");
    let v1 = &embs[0];
    let v2 = &embs[1];

    assert_eq!(v1.len(), 1024, "embedding dim is 1024");

    let norm: f32 = v1.iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() <= 1e-3, "vector is L2-normalized (norm={norm})");

    for (a, b) in v1.iter().zip(v2.iter()) { assert!((a - b).abs() <= 1e-6); }
}

#[test]
fn fake_similarity_is_bounded_and_reflexive() {
    let sim = EmbeddingSimilarity::new(Box::new(FakeEmbedder::default()));
    let same = sim.similarity("How do I reset my password?", "how do i reset my password").unwrap();
    assert!((same - 1.0).abs() < 1e-4, "case and punctuation do not matter (got {same})");

    let other = sim.similarity("reset password", "student discounts").unwrap();
    assert!((0.0..=1.0).contains(&other));
    assert!(other < same);

    assert_eq!(sim.similarity("", "anything").unwrap(), 0.0);
}

#[test]
fn word_vector_backend_from_settings() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "hours 1.0 0.0 0.0").unwrap();
    writeln!(file, "business 0.7 0.0 0.3").unwrap();
    writeln!(file, "time 0.9 0.1 0.0").unwrap();
    writeln!(file, "open 0.8 0.3 0.0").unwrap();
    writeln!(file, "password 0.0 0.0 1.0").unwrap();
    writeln!(file, "reset 0.0 0.2 0.9").unwrap();

    let settings = EmbedSettings {
        backend: EmbedBackend::WordVectors,
        word_vectors_path: Some(file.path().to_path_buf()),
        model_dir: None,
    };
    let embedder = embedder_from_settings(&settings).expect("word vectors");
    assert_eq!(embedder.dim(), 3);

    let sim = EmbeddingSimilarity::new(embedder);
    let hours = sim.similarity("what time are you open", "What are your business hours?").unwrap();
    let password = sim.similarity("what time are you open", "How do I reset my password?").unwrap();
    assert!(hours > 0.9, "hours similarity {hours}");
    assert!(password < 0.3, "password similarity {password}");
}

#[test]
fn word_vector_sentence_without_known_words_is_zero() {
    let wv = WordVectors::parse("hour 1.0 0.0\n".as_bytes()).unwrap();
    let sim = EmbeddingSimilarity::new(Box::new(wv));
    assert_eq!(sim.similarity("quantum physics", "hour").unwrap(), 0.0);
}

#[test]
fn missing_word_vector_file_is_an_error() {
    let settings = EmbedSettings {
        backend: EmbedBackend::WordVectors,
        word_vectors_path: Some("/nonexistent/glove.txt".into()),
        model_dir: None,
    };
    assert!(embedder_from_settings(&settings).is_err());
}

#[test]
fn fake_backend_from_settings_needs_no_files() {
    let settings = EmbedSettings { backend: EmbedBackend::Fake, word_vectors_path: None, model_dir: None };
    let embedder = embedder_from_settings(&settings).expect("fake backend");
    assert_eq!(embedder.dim(), FakeEmbedder::default().dim());
}
