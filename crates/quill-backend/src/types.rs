// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request and response bodies of the document backend.

use quill_core::types::{Message, SynthesisResult};
use serde::{Deserialize, Serialize};

/// Body of `POST chat/`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub messages: &'a [Message],
}

/// Body returned by `POST chat/`.
///
/// The backend tags documents with `"document"`; anything else (it
/// currently sends `"question"`) is a conversational reply.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub text: String,
}

impl From<ChatResponse> for SynthesisResult {
    fn from(response: ChatResponse) -> Self {
        if response.kind == "document" {
            SynthesisResult::Document {
                text: response.text,
            }
        } else {
            SynthesisResult::Reply {
                text: response.text,
            }
        }
    }
}

/// Body returned by `POST conversations/`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedResponse {
    #[serde(alias = "_id")]
    pub id: String,
}

/// Body of `POST download-pdf/`.
#[derive(Debug, Clone, Serialize)]
pub struct PdfRequest<'a> {
    pub document_content: &'a str,
}

/// Error body sent with non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_tag_maps_to_document() {
        let response: ChatResponse =
            serde_json::from_str(r##"{"type":"document","text":"# NDA"}"##).unwrap();
        assert_eq!(
            SynthesisResult::from(response),
            SynthesisResult::Document {
                text: "# NDA".into()
            }
        );
    }

    #[test]
    fn question_and_unknown_tags_map_to_reply() {
        for body in [
            r#"{"type":"question","text":"Which state?"}"#,
            r#"{"type":"reply","text":"Which state?"}"#,
            r#"{"text":"Which state?"}"#,
        ] {
            let response: ChatResponse = serde_json::from_str(body).unwrap();
            assert!(!SynthesisResult::from(response).is_document(), "{body}");
        }
    }

    #[test]
    fn chat_request_wraps_messages() {
        let messages = [Message::user("hi")];
        let json = serde_json::to_value(ChatRequest {
            messages: &messages,
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"messages": [{"sender": "user", "type": "display", "text": "hi"}]})
        );
    }
}
