// Kernel - infrastructure traits and their production implementations
//
// Flows depend on the Base* traits only; binaries wire in the real clients,
// tests wire in the recording mocks from test_dependencies.

pub mod adapters;
pub mod bot_kernel;
pub mod test_dependencies;
pub mod traits;

pub use adapters::{AirtableDirectory, ExchangeRates, OpenAiAssistant, TelegramChat};
pub use bot_kernel::BotKernel;
pub use traits::{BaseAssistant, BaseChat, BaseDirectory, BaseRates, Button};
