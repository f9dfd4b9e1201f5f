// Query flow - one prompt, then an LLM answer over the approved records.
//
// The completion is invoked even when zero records are approved; the model
// gets an empty context block and answers accordingly.

use airtable_client::BusinessRecord;
use anyhow::Result;

use crate::kernel::BotKernel;
use crate::session::Session;

pub const PROMPT: &str = "✏️ Опишите ваш запрос:";
pub const SEARCHING: &str = "🔍 Ищу подходящие предложения...";
pub const ANSWER_PREFIX: &str = "📢 Ответ:";
pub const GENERIC_ERR: &str = "⚠️ Не удалось обработать запрос. Попробуйте позже.";

/// Begin a query, replacing any session in progress.
pub async fn start(kernel: &BotKernel, chat_id: i64, user_id: i64) -> Result<()> {
    kernel.sessions.set(user_id, Session::AwaitingQuery).await;
    kernel.chat.send_message(chat_id, PROMPT).await
}

/// Answer the user's free-text request. The session was already cleared by
/// the dispatcher; every outcome returns the user to idle.
pub async fn handle_text(kernel: &BotKernel, chat_id: i64, text: &str) -> Result<()> {
    kernel.chat.send_message(chat_id, SEARCHING).await?;

    let records = match kernel.directory.list_approved().await {
        Ok(records) => records,
        Err(e) => {
            tracing::error!(error = %e, "Airtable approved read failed");
            return kernel.chat.send_message(chat_id, GENERIC_ERR).await;
        }
    };

    let prompt = build_prompt(text, &build_context(&records));
    let reply = match kernel.assistant.complete(&prompt).await {
        Ok(reply) => reply,
        Err(e) => {
            tracing::error!(error = %e, "LLM completion failed");
            return kernel.chat.send_message(chat_id, GENERIC_ERR).await;
        }
    };

    kernel
        .chat
        .send_message(chat_id, &format!("{ANSWER_PREFIX}\n{reply}"))
        .await
}

/// One line per approved record; empty string for an empty directory.
pub fn build_context(records: &[BusinessRecord]) -> String {
    let mut context = String::new();
    for record in records {
        context.push_str(&format!(
            "- {} ({}): {} | {}\n",
            record.name, record.city, record.services, record.contact
        ));
    }
    context
}

/// Fixed instructional template embedding the request and the context block.
/// A blank line separates the context block from the answer cue.
pub fn build_prompt(user_request: &str, context: &str) -> String {
    format!(
        "Ты — помощник для украинских военных. Ответь на запрос на основе базы предложений от бизнеса.\n\n\
         Запрос: {user_request}\n\n\
         Предложения:\n{context}\n\n\
         Ответ:"
    )
}
