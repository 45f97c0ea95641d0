//! zshanten sessions
//!
//! Interactive layers over `zshanten-engine`: the Analyze page stack for free
//! exploration, the Practice discard quiz, deterministic dealing and the
//! application configuration.

pub mod analyze;
pub mod config;
pub mod practice;
pub mod seeding;
pub mod session;

pub use analyze::AnalyzeSession;
pub use config::AppConfig;
pub use practice::{PracticeSession, PracticeState};
pub use session::{display_order, validate_hand, Navigation, Phase};
