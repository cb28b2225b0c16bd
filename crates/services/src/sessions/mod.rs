mod controller;
mod driver;
mod events;
mod snapshot;
mod timer;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use controller::QuizController;
pub use driver::SessionHandle;
pub use events::SessionEvent;
pub use snapshot::SessionSnapshot;
pub use timer::{PendingTimer, TimerPurpose, TimerToken};
