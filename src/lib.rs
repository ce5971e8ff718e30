pub mod error;
pub mod io_struct;
pub mod prompt;
pub mod relay_state;
pub mod schema;
pub mod server;

pub use error::{RelayError, RelayResult};
pub use io_struct::{BotResponse, ChatMessage, ChatTurn, ExtractionRecord};
pub use relay_state::{RelayConfig, RelayState};
