//! Error display and conversion

use thai_vocab::auth::{AdminCredential, AdminSession};
use thai_vocab::VocabError;

#[test]
fn test_error_display() {
    let errors = vec![
        VocabError::Config("설정".to_string()),
        VocabError::Validation("세트 이름".to_string()),
        VocabError::NotFound("demo".to_string()),
        VocabError::Generation("HTTP 429".to_string()),
        VocabError::parse("no JSON"),
        VocabError::Store("broken.json".to_string()),
        VocabError::Unauthorized,
        VocabError::MissingApiKey,
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "Error display should not be empty");
    }
}

#[test]
fn test_not_found_names_the_set() {
    let err = VocabError::NotFound("여행".to_string());
    assert!(err.to_string().contains("여행"));
}

#[test]
fn test_from_conversions() {
    let io: VocabError = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
    assert!(matches!(io, VocabError::Io(_)));

    let json: VocabError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
    assert!(matches!(json, VocabError::JsonParse(_)));

    let common: VocabError = thai_vocab::common::extract_json("no brackets").unwrap_err().into();
    assert!(matches!(common, VocabError::Common(_)));
}

#[test]
fn test_raw_response_only_on_parse_errors() {
    let err = VocabError::Parse {
        message: "empty".into(),
        raw: Some("model said no".into()),
    };
    assert_eq!(err.raw_response(), Some("model said no"));
    assert_eq!(VocabError::parse("x").raw_response(), None);
    assert_eq!(VocabError::Unauthorized.raw_response(), None);
}

#[test]
fn test_wrong_password_is_unauthorized() {
    let credential = AdminCredential::from_password("correct horse");
    assert!(AdminSession::login(&credential, "correct horse").is_ok());
    assert!(matches!(
        AdminSession::login(&credential, "wrong"),
        Err(VocabError::Unauthorized)
    ));
}
