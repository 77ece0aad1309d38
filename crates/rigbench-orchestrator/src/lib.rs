//! High-level flows coordinating the advisor, the event bus and persistence.

mod matrix;
mod session;
mod translation;

pub use matrix::{MatrixOrchestrator, MatrixRunner};
pub use session::AnalysisSession;
pub use translation::{language_key, Localizer};

use rigbench_types::RigbenchError;

pub fn validation_error(message: impl Into<String>) -> RigbenchError {
    RigbenchError::Validation(message.into())
}
