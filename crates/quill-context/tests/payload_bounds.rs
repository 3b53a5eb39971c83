// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property tests for payload sizing.

use proptest::prelude::*;
use quill_context::{ContextBuilder, ContextPolicy};
use quill_core::types::{Message, MessageKind, Sender};

fn arb_message() -> impl Strategy<Value = Message> {
    (
        prop_oneof![Just(Sender::User), Just(Sender::Assistant)],
        prop_oneof![Just(MessageKind::Display), Just(MessageKind::ContextOnly)],
        ".{0,40}",
    )
        .prop_map(|(sender, kind, text)| Message::new(sender, kind, text))
}

proptest! {
    #[test]
    fn no_document_payload_is_history_plus_one(
        history in prop::collection::vec(arb_message(), 0..64),
        text in ".{1,40}",
    ) {
        let payload = ContextBuilder::default().assemble(&history, None, Message::user(text.clone()));
        prop_assert_eq!(payload.policy, ContextPolicy::FullHistory);
        prop_assert_eq!(payload.messages.len(), history.len() + 1);
        prop_assert_eq!(&payload.messages[..history.len()], &history[..]);
        prop_assert_eq!(payload.messages.last().map(Message::text), Some(text.as_str()));
    }

    #[test]
    fn document_payload_is_always_three_entries(
        history in prop::collection::vec(arb_message(), 0..256),
        document in ".{0,200}",
        text in ".{1,40}",
    ) {
        let payload = ContextBuilder::default().assemble(&history, Some(&document), Message::user(text));
        prop_assert_eq!(payload.policy, ContextPolicy::DocumentReset);
        prop_assert_eq!(payload.messages.len(), 3);
        prop_assert!(payload.messages[0].text().ends_with(document.as_str()));
    }
}
