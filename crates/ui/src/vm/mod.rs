mod birth_date;
mod option_label;
mod quiz_vm;

pub use birth_date::{BirthDateError, parse_birth_date};
pub use option_label::split_label;
pub use quiz_vm::{OptionVm, QuestionVm, QuizVm, StepVm, map_quiz_vm};
