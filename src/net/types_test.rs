use super::*;

#[test]
fn parse_history_keeps_array_order() {
    let body = r#"[{"content":"hi","is_user":true},{"content":"there","is_user":false}]"#;
    let messages = parse_history(body).expect("history");
    assert_eq!(
        messages,
        vec![
            HistoryMessage { content: "hi".to_owned(), is_user: true },
            HistoryMessage { content: "there".to_owned(), is_user: false },
        ]
    );
}

#[test]
fn parse_history_ignores_extra_fields() {
    let body = r#"[{"id":3,"content":"x","is_user":false,"timestamp":"2024-01-01T00:00:00Z"}]"#;
    let messages = parse_history(body).expect("history");
    assert_eq!(messages.len(), 1);
    assert!(!messages[0].is_user);
}

#[test]
fn parse_history_rejects_non_array_body() {
    let err = parse_history(r#"{"detail":"nope"}"#).expect_err("object body");
    assert!(matches!(err, ApiError::Decode(_)));
}

#[test]
fn chat_request_serializes_message_field() {
    let body = serde_json::to_value(ChatRequest { message: "hello".to_owned() }).expect("json");
    assert_eq!(body, serde_json::json!({ "message": "hello" }));
}

#[test]
fn status_error_message_includes_code_and_text() {
    let err = ApiError::Status { status: 500, status_text: "Internal Server Error".to_owned() };
    assert_eq!(err.to_string(), "server responded 500 Internal Server Error");
}
