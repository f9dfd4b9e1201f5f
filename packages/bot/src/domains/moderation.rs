// Moderation gateway - approve/reject decisions and the pending listing.
//
// Both decisions are gated on the configured moderator set; anyone else gets
// a transient notice and no state changes. Repeated decisions on the same
// record are last-write-wins patches against the store.

use anyhow::Result;

use airtable_client::BusinessRecord;
use crate::kernel::{BotKernel, Button};

pub const NO_RIGHTS_ALERT: &str = "🚫 У вас нет прав";
pub const NO_RIGHTS_MESSAGE: &str = "🚫 У вас нет прав.";
pub const APPROVED_EDIT: &str = "✅ Анкета одобрена.";
pub const REJECTED_EDIT: &str = "❌ Анкета отклонена.";
pub const APPROVED_NOTICE: &str = "✅ Ваша анкета одобрена и теперь доступна военным.";
pub const REJECTED_NOTICE: &str = "❌ Ваша анкета отклонена модератором.";
pub const APPROVE_ERR: &str = "⚠️ Ошибка при подтверждении.";
pub const REJECT_ERR: &str = "⚠️ Ошибка при отклонении.";
pub const NO_PENDING: &str = "📭 Нет неподтверждённых анкет.";
pub const LIST_ERR: &str = "⚠️ Не удалось получить список анкет.";

const APPROVE_TOKEN: &str = "approve";
const REJECT_TOKEN: &str = "reject";

/// The two terminal moderation decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationAction {
    Approve,
    Reject,
}

impl ModerationAction {
    fn token(self) -> &'static str {
        match self {
            Self::Approve => APPROVE_TOKEN,
            Self::Reject => REJECT_TOKEN,
        }
    }

    /// Button payload wire format: `action:recordId:submitterId`.
    pub fn callback_data(self, record_id: &str, submitter_id: i64) -> String {
        format!("{}:{}:{}", self.token(), record_id, submitter_id)
    }

    /// Parse a button payload back into (action, record id, submitter id).
    /// Returns None for anything that is not a moderation payload.
    pub fn parse(data: &str) -> Option<(Self, String, i64)> {
        let mut parts = data.splitn(3, ':');
        let action = match parts.next()? {
            APPROVE_TOKEN => Self::Approve,
            REJECT_TOKEN => Self::Reject,
            _ => return None,
        };
        let record_id = parts.next()?.to_string();
        let submitter_id = parts.next()?.parse().ok()?;
        Some((action, record_id, submitter_id))
    }

    /// The status flags this decision patches onto the record.
    fn status_flags(self) -> (bool, bool) {
        match self {
            Self::Approve => (true, false),
            Self::Reject => (false, true),
        }
    }
}

/// One approve/reject button row bound to a specific record and submitter.
pub fn review_buttons(record_id: &str, submitter_id: i64) -> Vec<Vec<Button>> {
    vec![vec![
        Button::new(
            "✅ Одобрить",
            ModerationAction::Approve.callback_data(record_id, submitter_id),
        ),
        Button::new(
            "❌ Отклонить",
            ModerationAction::Reject.callback_data(record_id, submitter_id),
        ),
    ]]
}

/// Handle a pressed approve/reject button.
///
/// `origin` is the chat/message the button lives on; it is edited to a
/// confirmation on success and left untouched on store failure.
pub async fn handle_decision(
    kernel: &BotKernel,
    invoker_id: i64,
    callback_id: &str,
    origin: Option<(i64, i64)>,
    action: ModerationAction,
    record_id: &str,
    submitter_id: i64,
) -> Result<()> {
    if !kernel.is_moderator(invoker_id) {
        // Expected traffic, not an error: deny with a transient alert.
        return kernel
            .chat
            .answer_callback(callback_id, Some(NO_RIGHTS_ALERT), true)
            .await;
    }

    let (verified, rejected) = action.status_flags();
    match kernel
        .directory
        .set_status(record_id, verified, rejected)
        .await
    {
        Ok(()) => {
            let (edit_text, notice) = match action {
                ModerationAction::Approve => (APPROVED_EDIT, APPROVED_NOTICE),
                ModerationAction::Reject => (REJECTED_EDIT, REJECTED_NOTICE),
            };
            tracing::info!(record_id, ?action, moderator = invoker_id, "Moderation decision applied");

            if let Some((chat_id, message_id)) = origin {
                kernel.chat.edit_message(chat_id, message_id, edit_text).await?;
            }
            kernel.chat.send_message(submitter_id, notice).await?;
            kernel.chat.answer_callback(callback_id, None, false).await
        }
        Err(e) => {
            tracing::error!(error = %e, record_id, ?action, "Airtable status update failed");
            let error_text = match action {
                ModerationAction::Approve => APPROVE_ERR,
                ModerationAction::Reject => REJECT_ERR,
            };
            if let Some((chat_id, _)) = origin {
                kernel.chat.send_message(chat_id, error_text).await?;
            }
            kernel.chat.answer_callback(callback_id, None, false).await
        }
    }
}

/// Moderator-only listing of every unverified record, one message per
/// record, each with its own approve/reject pair. No pagination.
pub async fn list_pending(kernel: &BotKernel, invoker_id: i64, chat_id: i64) -> Result<()> {
    if !kernel.is_moderator(invoker_id) {
        return kernel.chat.send_message(chat_id, NO_RIGHTS_MESSAGE).await;
    }

    let records = match kernel.directory.list_pending().await {
        Ok(records) => records,
        Err(e) => {
            tracing::error!(error = %e, "Airtable pending read failed");
            return kernel.chat.send_message(chat_id, LIST_ERR).await;
        }
    };

    if records.is_empty() {
        return kernel.chat.send_message(chat_id, NO_PENDING).await;
    }

    for record in &records {
        kernel
            .chat
            .send_with_buttons(
                chat_id,
                &render_record(record),
                review_buttons(&record.id, record.submitter_id),
            )
            .await?;
    }
    Ok(())
}

fn render_record(record: &BusinessRecord) -> String {
    format!(
        "📛 {}\n🏙️ {}\n🛠️ {}\n📞 {}",
        record.name, record.city, record.services, record.contact
    )
}
