//! Conversation orchestration: intent detection, the bounded-retry loop,
//! per-repository enrichment, and turn state for the chat surface.

pub mod enrich;
pub mod intent;
pub mod retry;
pub mod session;
pub mod turn;

pub use enrich::{ProfileEnricher, MAX_ENRICHED_REPOS};
pub use intent::detect_portfolio_intent;
pub use retry::RetryController;
pub use session::{PortfolioSession, StatusCallback};
pub use turn::ConversationTurn;
