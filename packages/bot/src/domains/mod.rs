// Conversation flows.
//
// submission: five-step collection of a business offer, persisted as pending
// moderation: approve/reject gate plus the pending-records listing
// query:      free-text request answered by the LLM over approved records
// currency:   the rates bot's conversion conversation

pub mod currency;
pub mod moderation;
pub mod query;
pub mod submission;
