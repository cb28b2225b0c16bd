mod scripts;
mod steps;
#[allow(clippy::module_inception)]
mod quiz;

pub use quiz::QuizView;
#[cfg(test)]
pub(crate) use quiz::QuizTestHandles;
