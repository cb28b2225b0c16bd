mod answer;
mod catalog;
mod checkout;
mod ids;
mod selection;
mod session;
mod step;

pub use answer::{Answer, AnswerMap};
pub use catalog::{CatalogError, StepCatalog};
pub use checkout::{CheckoutLink, CheckoutLinkError};
pub use ids::{IdError, OptionId, SessionId, StepId};
pub use selection::{SelectionBuffer, Toggle};
pub use session::{BIRTH_DATE_FORMAT, BirthDate, SessionState, StepProgress};
pub use step::{QuizOption, SelectionMode, StepDefinition, StepKind};
