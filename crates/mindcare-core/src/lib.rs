//! mindcare-core – pure domain logic for the MindCare service.
//!
//! Nothing in this crate performs I/O. The server crate owns the HTTP
//! surface and the upstream API clients; this crate shapes what goes into
//! those calls and what comes back out of them.

pub mod extract;
pub mod history;
pub mod journal;
pub mod mood;
pub mod progress;
pub mod prompt;
pub mod selfcare;

pub use extract::{JsonShape, extract, extract_or, recommendations_fallback, sentiment_fallback};
pub use history::{ConversationTurn, HistoryPolicy, MappedTurn, Role, TextPart, normalize};
pub use journal::{JournalEntry, JournalError, SentimentLabel};
pub use mood::Mood;
