// Update routing for the helper bot.
//
// Commands start flows; free text is routed by the sender's stored session;
// button presses are moderation decisions. The session is taken (cleared)
// before a flow step runs and re-stored by the step if the flow continues,
// so each user's messages are handled one state at a time.

use anyhow::Result;
use telegram_client::{CallbackQuery, Message, Update};

use crate::domains::{moderation, query, submission};
use crate::domains::moderation::ModerationAction;
use crate::kernel::BotKernel;
use crate::session::Session;

pub const GREETING: &str = "Привет! Я бот-помощник. Используй /request или /submit.";
pub const IDLE_HINT: &str = "Используй /request, чтобы найти предложения, или /submit, чтобы добавить анкету.";

/// Route one incoming update.
pub async fn handle_update(kernel: &BotKernel, update: Update) -> Result<()> {
    if let Some(callback) = update.callback_query {
        return handle_callback(kernel, callback).await;
    }
    if let Some(message) = update.message {
        return handle_message(kernel, message).await;
    }
    Ok(())
}

async fn handle_message(kernel: &BotKernel, message: Message) -> Result<()> {
    let (Some(from), Some(text)) = (message.from, message.text) else {
        return Ok(());
    };
    let chat_id = message.chat.id;
    let user_id = from.id;

    match text.trim() {
        "/start" => kernel.chat.send_message(chat_id, GREETING).await,
        "/submit" => submission::start(kernel, chat_id, user_id).await,
        "/request" => query::start(kernel, chat_id, user_id).await,
        "/list_pending" => moderation::list_pending(kernel, user_id, chat_id).await,
        // Flow input is passed on untrimmed: fields are stored verbatim.
        _ => match kernel.sessions.take(user_id).await {
            Some(Session::Submitting(draft)) => {
                submission::handle_text(kernel, chat_id, draft, &text).await
            }
            Some(Session::AwaitingQuery) => query::handle_text(kernel, chat_id, &text).await,
            None => kernel.chat.send_message(chat_id, IDLE_HINT).await,
        },
    }
}

async fn handle_callback(kernel: &BotKernel, callback: CallbackQuery) -> Result<()> {
    let data = callback.data.as_deref().unwrap_or_default();

    let Some((action, record_id, submitter_id)) = ModerationAction::parse(data) else {
        // Stale or foreign payload: clear the spinner and move on.
        tracing::debug!(data, "Ignoring unrecognized callback payload");
        return kernel.chat.answer_callback(&callback.id, None, false).await;
    };

    let origin = callback
        .message
        .as_ref()
        .map(|m| (m.chat.id, m.message_id));

    moderation::handle_decision(
        kernel,
        callback.from.id,
        &callback.id,
        origin,
        action,
        &record_id,
        submitter_id,
    )
    .await
}
