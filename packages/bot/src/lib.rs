// Pidtrymka bots - core library
//
// Two Telegram front-ends share this crate: the helper bot (business
// directory with submission, moderation and LLM-assisted queries) and the
// rates bot (currency conversion). Flows talk to external services through
// the kernel traits so tests can swap in recording mocks.

pub mod config;
pub mod dispatch;
pub mod domains;
pub mod kernel;
pub mod session;

pub use config::Config;
