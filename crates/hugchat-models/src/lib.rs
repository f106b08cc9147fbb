// Models module - data structures for the chat completion API
pub mod types;
pub mod requests;
pub mod responses;
pub mod hub;


// Re-export commonly used types
pub use types::{Message, Role};
pub use requests::ChatPayload;
pub use responses::{ChatResponse, Choice, Usage, FINISH_REASON_STOP};
pub use hub::HubModel;
