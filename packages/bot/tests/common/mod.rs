// Shared test harness: a kernel wired with recording mocks plus helpers
// for fabricating incoming Telegram updates.
//
// Not every test binary uses every helper.
#![allow(dead_code)]

use std::sync::Arc;

use bot_core::kernel::test_dependencies::{MockAssistant, MockChat, MockDirectory};
use bot_core::kernel::BotKernel;
use serde_json::json;
use telegram_client::Update;

/// The single moderator identity used across tests.
pub const MODERATOR_ID: i64 = 99;

pub struct TestHarness {
    pub kernel: BotKernel,
    pub chat: Arc<MockChat>,
    pub directory: Arc<MockDirectory>,
    pub assistant: Arc<MockAssistant>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::build(MockDirectory::new(), MockAssistant::new())
    }

    pub fn with_directory(directory: MockDirectory) -> Self {
        Self::build(directory, MockAssistant::new())
    }

    pub fn with_assistant(assistant: MockAssistant) -> Self {
        Self::build(MockDirectory::new(), assistant)
    }

    pub fn build(directory: MockDirectory, assistant: MockAssistant) -> Self {
        let chat = Arc::new(MockChat::new());
        let directory = Arc::new(directory);
        let assistant = Arc::new(assistant);

        let kernel = BotKernel::new(
            chat.clone(),
            directory.clone(),
            assistant.clone(),
            vec![MODERATOR_ID],
        );

        Self {
            kernel,
            chat,
            directory,
            assistant,
        }
    }
}

/// An incoming text message from `user_id` in their private chat.
pub fn text_update(user_id: i64, text: &str) -> Update {
    serde_json::from_value(json!({
        "update_id": 1,
        "message": {
            "message_id": 1,
            "from": { "id": user_id, "first_name": "Test" },
            "chat": { "id": user_id },
            "text": text
        }
    }))
    .expect("valid update json")
}

/// A button press by `user_id` on a message in `origin_chat`.
pub fn callback_update(
    user_id: i64,
    data: &str,
    origin_chat: i64,
    origin_message_id: i64,
) -> Update {
    serde_json::from_value(json!({
        "update_id": 2,
        "callback_query": {
            "id": "cb1",
            "from": { "id": user_id, "first_name": "Test" },
            "message": {
                "message_id": origin_message_id,
                "chat": { "id": origin_chat },
                "text": "..."
            },
            "data": data
        }
    }))
    .expect("valid update json")
}
