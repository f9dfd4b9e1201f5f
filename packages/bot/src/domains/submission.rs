// Submission flow - a fixed linear sequence of four prompts.
//
// START -> name -> city -> services -> contact -> persisted as pending.
// Input is stored verbatim; there is no validation and no back-navigation.
// The draft lives in the session store between messages and is cleared on
// every exit, success or failure.

use airtable_client::NewBusiness;
use anyhow::Result;

use crate::domains::moderation;
use crate::kernel::BotKernel;
use crate::session::{Session, SubmissionDraft, SubmitStep};

pub const PROMPT_NAME: &str = "📛 Название вашей компании:";
pub const PROMPT_CITY: &str = "🏙️ Город:";
pub const PROMPT_SERVICES: &str = "🛠️ Услуги / скидки:";
pub const PROMPT_CONTACT: &str = "📞 Контакт:";
pub const SUBMITTED_OK: &str = "✅ Анкета добавлена! Ожидайте проверки.";
pub const SUBMITTED_ERR: &str = "❌ Ошибка при добавлении анкеты.";

/// Begin collecting a submission, replacing any session in progress.
pub async fn start(kernel: &BotKernel, chat_id: i64, user_id: i64) -> Result<()> {
    kernel
        .sessions
        .set(user_id, Session::Submitting(SubmissionDraft::new(user_id)))
        .await;
    kernel.chat.send_message(chat_id, PROMPT_NAME).await
}

/// Consume the next message from the session owner: store it under the
/// current step's field and either prompt for the next field or persist.
pub async fn handle_text(
    kernel: &BotKernel,
    chat_id: i64,
    mut draft: SubmissionDraft,
    text: &str,
) -> Result<()> {
    let next_prompt = match draft.step {
        SubmitStep::Name => {
            draft.name = text.to_string();
            draft.step = SubmitStep::City;
            PROMPT_CITY
        }
        SubmitStep::City => {
            draft.city = text.to_string();
            draft.step = SubmitStep::Services;
            PROMPT_SERVICES
        }
        SubmitStep::Services => {
            draft.services = text.to_string();
            draft.step = SubmitStep::Contact;
            PROMPT_CONTACT
        }
        SubmitStep::Contact => {
            draft.contact = text.to_string();
            return submit(kernel, chat_id, draft).await;
        }
    };

    kernel
        .sessions
        .set(draft.user_id, Session::Submitting(draft))
        .await;
    kernel.chat.send_message(chat_id, next_prompt).await
}

/// All four fields collected: write the pending record and hand the
/// moderator an approve/reject pair bound to it.
async fn submit(kernel: &BotKernel, chat_id: i64, draft: SubmissionDraft) -> Result<()> {
    let business = NewBusiness {
        name: draft.name,
        city: draft.city,
        services: draft.services,
        contact: draft.contact,
        submitter_id: draft.user_id,
    };

    match kernel.directory.create(&business).await {
        Ok(record_id) => {
            tracing::info!(record_id = %record_id, user_id = draft.user_id, "Submission stored");
            kernel
                .chat
                .send_with_buttons(
                    chat_id,
                    SUBMITTED_OK,
                    moderation::review_buttons(&record_id, draft.user_id),
                )
                .await
        }
        Err(e) => {
            // The store's raw complaint goes to the log, never to the user.
            tracing::error!(error = %e, user_id = draft.user_id, "Airtable create failed");
            kernel.chat.send_message(chat_id, SUBMITTED_ERR).await
        }
    }
}
