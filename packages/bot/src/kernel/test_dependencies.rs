// Mock implementations of the kernel traits for tests.
//
// Each mock records its calls so tests can assert on exactly what went out
// (message texts, button payloads, store mutations) and can be scripted to
// fail to exercise error paths.

use std::sync::{Arc, Mutex};

use airtable_client::{BusinessRecord, NewBusiness};
use anyhow::{anyhow, Result};
use async_trait::async_trait;

use super::traits::{BaseAssistant, BaseChat, BaseDirectory, BaseRates, Button};

// =============================================================================
// Mock Chat
// =============================================================================

/// One outbound message captured by `MockChat`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub chat_id: i64,
    pub text: String,
    /// Button rows attached to the message; empty for plain sends.
    pub buttons: Vec<Vec<Button>>,
}

/// One message edit captured by `MockChat`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditedMessage {
    pub chat_id: i64,
    pub message_id: i64,
    pub text: String,
}

/// One callback acknowledgement captured by `MockChat`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackAnswer {
    pub callback_id: String,
    pub text: Option<String>,
    pub show_alert: bool,
}

#[derive(Default)]
pub struct MockChat {
    sent: Arc<Mutex<Vec<SentMessage>>>,
    edits: Arc<Mutex<Vec<EditedMessage>>>,
    answers: Arc<Mutex<Vec<CallbackAnswer>>>,
}

impl MockChat {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn edits(&self) -> Vec<EditedMessage> {
        self.edits.lock().unwrap().clone()
    }

    pub fn answers(&self) -> Vec<CallbackAnswer> {
        self.answers.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseChat for MockChat {
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<()> {
        self.sent.lock().unwrap().push(SentMessage {
            chat_id,
            text: text.to_string(),
            buttons: Vec::new(),
        });
        Ok(())
    }

    async fn send_with_buttons(
        &self,
        chat_id: i64,
        text: &str,
        rows: Vec<Vec<Button>>,
    ) -> Result<()> {
        self.sent.lock().unwrap().push(SentMessage {
            chat_id,
            text: text.to_string(),
            buttons: rows,
        });
        Ok(())
    }

    async fn edit_message(&self, chat_id: i64, message_id: i64, text: &str) -> Result<()> {
        self.edits.lock().unwrap().push(EditedMessage {
            chat_id,
            message_id,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn answer_callback(
        &self,
        callback_id: &str,
        text: Option<&str>,
        show_alert: bool,
    ) -> Result<()> {
        self.answers.lock().unwrap().push(CallbackAnswer {
            callback_id: callback_id.to_string(),
            text: text.map(str::to_string),
            show_alert,
        });
        Ok(())
    }
}

// =============================================================================
// Mock Directory
// =============================================================================

/// Arguments captured from a `set_status` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCall {
    pub record_id: String,
    pub verified: bool,
    pub rejected: bool,
}

#[derive(Default)]
pub struct MockDirectory {
    records: Arc<Mutex<Vec<BusinessRecord>>>,
    create_calls: Arc<Mutex<Vec<NewBusiness>>>,
    status_calls: Arc<Mutex<Vec<StatusCall>>>,
    fail_creates: bool,
    fail_status: bool,
    fail_reads: bool,
}

impl MockDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the in-memory store.
    pub fn with_records(self, records: Vec<BusinessRecord>) -> Self {
        *self.records.lock().unwrap() = records;
        self
    }

    /// Make `create` return an error, as the remote store would on a bad write.
    pub fn failing_creates(mut self) -> Self {
        self.fail_creates = true;
        self
    }

    /// Make `set_status` return an error.
    pub fn failing_status(mut self) -> Self {
        self.fail_status = true;
        self
    }

    /// Make both list operations return an error.
    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    pub fn records(&self) -> Vec<BusinessRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn create_calls(&self) -> Vec<NewBusiness> {
        self.create_calls.lock().unwrap().clone()
    }

    pub fn status_calls(&self) -> Vec<StatusCall> {
        self.status_calls.lock().unwrap().clone()
    }

    /// Total store mutations (creates + status patches).
    pub fn mutation_count(&self) -> usize {
        self.create_calls.lock().unwrap().len() + self.status_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl BaseDirectory for MockDirectory {
    async fn list_approved(&self) -> Result<Vec<BusinessRecord>> {
        if self.fail_reads {
            return Err(anyhow!("mock directory: read failure"));
        }
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.verified)
            .cloned()
            .collect())
    }

    async fn list_pending(&self) -> Result<Vec<BusinessRecord>> {
        if self.fail_reads {
            return Err(anyhow!("mock directory: read failure"));
        }
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| !r.verified)
            .cloned()
            .collect())
    }

    async fn create(&self, business: &NewBusiness) -> Result<String> {
        self.create_calls.lock().unwrap().push(business.clone());
        if self.fail_creates {
            return Err(anyhow!("mock directory: create failure"));
        }

        let mut records = self.records.lock().unwrap();
        let id = format!("rec{}", records.len() + 1);
        records.push(BusinessRecord {
            id: id.clone(),
            name: business.name.clone(),
            city: business.city.clone(),
            services: business.services.clone(),
            contact: business.contact.clone(),
            verified: false,
            rejected: false,
            submitter_id: business.submitter_id,
        });
        Ok(id)
    }

    async fn set_status(&self, record_id: &str, verified: bool, rejected: bool) -> Result<()> {
        self.status_calls.lock().unwrap().push(StatusCall {
            record_id: record_id.to_string(),
            verified,
            rejected,
        });
        if self.fail_status {
            return Err(anyhow!("mock directory: status failure"));
        }

        // Last write wins, exactly like a PATCH against the store.
        let mut records = self.records.lock().unwrap();
        if let Some(record) = records.iter_mut().find(|r| r.id == record_id) {
            record.verified = verified;
            record.rejected = rejected;
        }
        Ok(())
    }
}

// =============================================================================
// Mock Assistant
// =============================================================================

pub struct MockAssistant {
    reply: String,
    prompts: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl MockAssistant {
    pub fn new() -> Self {
        Self {
            reply: "mock reply".to_string(),
            prompts: Arc::new(Mutex::new(Vec::new())),
            fail: false,
        }
    }

    pub fn with_reply(mut self, reply: &str) -> Self {
        self.reply = reply.to_string();
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// All prompts the flow sent to the model.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Default for MockAssistant {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseAssistant for MockAssistant {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if self.fail {
            return Err(anyhow!("mock assistant: completion failure"));
        }
        Ok(self.reply.clone())
    }
}

// =============================================================================
// Mock Rates
// =============================================================================

pub struct MockRates {
    result: f64,
    calls: Arc<Mutex<Vec<(f64, String, String)>>>,
    fail: bool,
}

impl MockRates {
    pub fn with_result(result: f64) -> Self {
        Self {
            result,
            calls: Arc::new(Mutex::new(Vec::new())),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            result: 0.0,
            calls: Arc::new(Mutex::new(Vec::new())),
            fail: true,
        }
    }

    pub fn calls(&self) -> Vec<(f64, String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseRates for MockRates {
    async fn convert(&self, amount: f64, from: &str, to: &str) -> Result<f64> {
        self.calls
            .lock()
            .unwrap()
            .push((amount, from.to_string(), to.to_string()));
        if self.fail {
            return Err(anyhow!("mock rates: lookup failure"));
        }
        Ok(self.result)
    }
}
