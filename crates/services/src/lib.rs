#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod sessions;

pub use config::{FunnelConfig, FunnelVariant, MAX_SELECT_DELAY, MIN_SELECT_DELAY};
pub use error::{ConfigError, SessionError};

pub use sessions::{
    PendingTimer, QuizController, SessionEvent, SessionHandle, SessionSnapshot, TimerPurpose,
    TimerToken,
};
