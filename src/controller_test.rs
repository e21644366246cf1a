use std::cell::RefCell;
use std::collections::VecDeque;

use futures::executor::block_on;
use futures::future::ready;

use super::*;
use crate::state::chat::{Author, BubbleBody};

const APOLOGY: &str = "Sorry, an error occurred. Please try again.";

impl ChatStore for RefCell<ChatState> {
    fn apply<F: FnOnce(&mut ChatState)>(&self, f: F) {
        f(&mut self.borrow_mut());
    }
}

struct ScriptedReply {
    reads: VecDeque<Result<Vec<u8>, ApiError>>,
}

impl ScriptedReply {
    fn text(parts: &[&str]) -> Self {
        Self { reads: parts.iter().map(|p| Ok(p.as_bytes().to_vec())).collect() }
    }
}

impl ReplyStream for ScriptedReply {
    async fn next_chunk(&mut self) -> Result<Option<Vec<u8>>, ApiError> {
        self.reads.pop_front().transpose()
    }
}

fn submitted(text: &str) -> RefCell<ChatState> {
    let mut state = ChatState::default();
    state.submit(text);
    RefCell::new(state)
}

fn last_body(store: &RefCell<ChatState>) -> Option<BubbleBody> {
    store.borrow().messages.last().map(|m| m.body.clone())
}

// =============================================================
// History loader
// =============================================================

#[test]
fn history_load_renders_messages_in_order() {
    let store = RefCell::new(ChatState::default());
    let history = vec![
        HistoryMessage { content: "hi".to_owned(), is_user: true },
        HistoryMessage { content: "there".to_owned(), is_user: false },
    ];

    let count = block_on(load_history(&store, ready(Ok(history)))).expect("history");

    assert_eq!(count, 2);
    let state = store.borrow();
    let authors: Vec<Author> = state.messages.iter().map(|m| m.author).collect();
    assert_eq!(authors, vec![Author::User, Author::Assistant]);
}

#[test]
fn history_failure_leaves_view_empty_without_apology() {
    let store = RefCell::new(ChatState::default());

    let result = block_on(load_history(&store, ready(Err(ApiError::Decode("bad json".to_owned())))));

    assert!(result.is_err());
    assert!(store.borrow().messages.is_empty());
}

#[test]
fn history_failure_keeps_live_exchange() {
    let store = submitted("hello");

    let result = block_on(load_history(&store, ready(Err(ApiError::Transport("offline".to_owned())))));

    assert!(result.is_err());
    let state = store.borrow();
    assert_eq!(state.messages.len(), 1);
    assert_eq!(state.messages[0].body, BubbleBody::Text("hello".to_owned()));
    assert!(state.is_busy());
}

#[test]
fn history_arriving_mid_stream_does_not_drop_reply() {
    let store = submitted("hello");
    store.borrow_mut().open_reply();
    let history = vec![HistoryMessage { content: "before".to_owned(), is_user: true }];

    block_on(load_history(&store, ready(Ok(history)))).expect("history");
    let chunks = block_on(run_exchange(&store, ready(Ok(ScriptedReply::text(&["done"]))), APOLOGY)).expect("exchange");

    assert_eq!(chunks, 1);
    let state = store.borrow();
    let bodies: Vec<BubbleBody> = state.messages.iter().map(|m| m.body.clone()).collect();
    assert_eq!(
        bodies,
        vec![
            BubbleBody::Text("before".to_owned()),
            BubbleBody::Text("hello".to_owned()),
            BubbleBody::Html("done".to_owned()),
        ]
    );
}

// =============================================================
// Chat exchange
// =============================================================

#[test]
fn successful_exchange_streams_into_one_reply_bubble() {
    let store = submitted("hello");

    let chunks = block_on(run_exchange(&store, ready(Ok(ScriptedReply::text(&["**bo", "ld** and ", "*it*"]))), APOLOGY))
        .expect("exchange");

    assert_eq!(chunks, 3);
    let state = store.borrow();
    assert_eq!(state.messages.len(), 2);
    assert_eq!(state.messages[1].author, Author::Assistant);
    assert_eq!(state.messages[1].body, BubbleBody::Html("<strong>bold</strong> and <em>it</em>".to_owned()));
    assert!(!state.is_busy());
}

#[test]
fn non_success_status_shows_exactly_one_apology() {
    let store = submitted("hello");
    let status = ApiError::Status { status: 500, status_text: "Internal Server Error".to_owned() };

    let result = block_on(run_exchange::<_, ScriptedReply, _>(&store, ready(Err(status)), APOLOGY));

    assert!(matches!(result, Err(ApiError::Status { status: 500, .. })));
    let state = store.borrow();
    assert_eq!(state.messages.len(), 2);
    assert_eq!(state.messages[1].body, BubbleBody::Html(APOLOGY.to_owned()));
    assert!(!state.is_busy());
}

#[test]
fn transport_failure_shows_apology() {
    let store = submitted("hello");

    let result = block_on(run_exchange::<_, ScriptedReply, _>(
        &store,
        ready(Err(ApiError::Transport("offline".to_owned()))),
        APOLOGY,
    ));

    assert!(result.is_err());
    assert_eq!(last_body(&store), Some(BubbleBody::Html(APOLOGY.to_owned())));
}

#[test]
fn stream_error_mid_reply_keeps_partial_text_then_apologizes() {
    let store = submitted("hello");
    let reply = ScriptedReply {
        reads: VecDeque::from(vec![Ok(b"half".to_vec()), Err(ApiError::Stream("reset".to_owned()))]),
    };

    let result = block_on(run_exchange(&store, ready(Ok(reply)), APOLOGY));

    assert_eq!(result, Err(ApiError::Stream("reset".to_owned())));
    let state = store.borrow();
    let bodies: Vec<BubbleBody> = state.messages.iter().map(|m| m.body.clone()).collect();
    assert_eq!(
        bodies,
        vec![
            BubbleBody::Text("hello".to_owned()),
            BubbleBody::Html("half".to_owned()),
            BubbleBody::Html(APOLOGY.to_owned()),
        ]
    );
}

#[test]
fn empty_reply_leaves_empty_assistant_bubble() {
    let store = submitted("hello");

    let chunks = block_on(run_exchange(&store, ready(Ok(ScriptedReply::text(&[]))), APOLOGY)).expect("exchange");

    assert_eq!(chunks, 0);
    assert_eq!(last_body(&store), Some(BubbleBody::Html(String::new())));
    assert!(!store.borrow().is_busy());
}
