//! Generation pipeline tests with a fake generator

use std::cell::Cell;
use tempfile::tempdir;
use thai_vocab::common::{GenerationPrompt, VocabularyRecord};
use thai_vocab::generator::Generator;
use thai_vocab::pipeline::{IngestionPipeline, IngestionRequest};
use thai_vocab::store::WordSetStore;
use thai_vocab::{Result, VocabError};

enum Reply {
    Text(&'static str),
    Fail,
}

struct FakeGenerator {
    reply: Reply,
    calls: Cell<usize>,
}

impl FakeGenerator {
    fn new(reply: Reply) -> Self {
        Self {
            reply,
            calls: Cell::new(0),
        }
    }
}

impl Generator for FakeGenerator {
    async fn generate(&self, _prompt: &GenerationPrompt) -> Result<String> {
        self.calls.set(self.calls.get() + 1);
        match self.reply {
            Reply::Text(text) => Ok(text.to_string()),
            Reply::Fail => Err(VocabError::Generation("HTTP 500".into())),
        }
    }
}

fn seeded_store(dir: &std::path::Path) -> WordSetStore {
    let store = WordSetStore::new(dir);
    store
        .save("greetings", &[VocabularyRecord::new("สวัสดี").with("meaning_ko", "안녕")])
        .unwrap();
    store
}

/// Known terms are filtered out of the generated set
#[tokio::test]
async fn test_known_terms_are_dropped() {
    let dir = tempdir().unwrap();
    let store = seeded_store(dir.path());
    let generator = FakeGenerator::new(Reply::Text(
        "물론입니다! 아래 목록을 확인하세요.\n```json\n[{\"thai\":\"สวัสดี\",\"meaning_ko\":\"안녕\"},{\"thai\":\"ขอบคุณ\",\"meaning_ko\":\"감사\"}]\n```",
    ));

    let report = IngestionPipeline::new(&store, &generator)
        .run(&IngestionRequest::new("new-words", 5))
        .await
        .unwrap();

    assert_eq!(report.dropped_known, 1);
    let saved = store.load("new-words").unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].thai, "ขอบคุณ");
    assert_eq!(saved[0].meaning_ko, "감사");
    assert_eq!(generator.calls.get(), 1);
}

#[tokio::test]
async fn test_failed_generation_leaves_store_unchanged() {
    let dir = tempdir().unwrap();
    let store = seeded_store(dir.path());
    store.save("target", &[VocabularyRecord::new("เก่า")]).unwrap();
    let generator = FakeGenerator::new(Reply::Fail);

    let result = IngestionPipeline::new(&store, &generator)
        .run(&IngestionRequest::new("target", 5))
        .await;

    assert!(matches!(result, Err(VocabError::Generation(_))));
    assert_eq!(store.list().unwrap(), vec!["greetings", "target"]);
    assert_eq!(store.load("target").unwrap()[0].thai, "เก่า");
}

/// Unreadable output is a parse error carrying the raw text
#[tokio::test]
async fn test_garbage_response_is_parse_error() {
    let dir = tempdir().unwrap();
    let store = seeded_store(dir.path());
    let generator = FakeGenerator::new(Reply::Text("죄송합니다, 요청을 처리할 수 없습니다."));

    let err = IngestionPipeline::new(&store, &generator)
        .run(&IngestionRequest::new("new-words", 5))
        .await
        .unwrap_err();

    assert!(matches!(err, VocabError::Parse { .. }));
    assert_eq!(err.raw_response(), Some("죄송합니다, 요청을 처리할 수 없습니다."));
    assert!(!store.exists("new-words"));
}

/// Everything was already known: the set is still saved, empty
#[tokio::test]
async fn test_all_known_saves_empty_set() {
    let dir = tempdir().unwrap();
    let store = seeded_store(dir.path());
    let generator = FakeGenerator::new(Reply::Text(r#"[{"thai": "สวัสดี"}]"#));

    let report = IngestionPipeline::new(&store, &generator)
        .run(&IngestionRequest::new("repeat", 3))
        .await
        .unwrap();

    assert!(report.saved.is_empty());
    assert!(store.exists("repeat"));
    assert!(store.load("repeat").unwrap().is_empty());
}

/// Broken JSON is salvaged object by object, then capped at the request
#[tokio::test]
async fn test_salvage_and_truncate() {
    let dir = tempdir().unwrap();
    let store = seeded_store(dir.path());
    let generator = FakeGenerator::new(Reply::Text(
        r#"[{"thai": "หนึ่ง",}, {"thai": "สอง"}, {"thai": "สาม"}, {"thai": "หนึ่ง"}"#,
    ));

    let report = IngestionPipeline::new(&store, &generator)
        .run(&IngestionRequest::new("numbers", 2))
        .await
        .unwrap();

    assert_eq!(report.parsed, 4);
    assert_eq!(report.dropped_repeats, 1);
    assert_eq!(report.truncated, 1);
    let terms: Vec<_> = report.saved.iter().map(|r| r.thai.as_str()).collect();
    assert_eq!(terms, vec!["หนึ่ง", "สอง"]);
}
