//! Purpose: Define the stable public API boundary for quizmaster.
//! Exports: The quiz pipeline types and operations needed by callers and the CLI.
//! Role: Public surface; internal module layout stays private behind it.
//! Invariants: `QuizData`/`QuizQuestion` are only constructed through the mapper.

mod client;
mod quiz;
mod request;
mod schema;

#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::error::{Error, ErrorKind};
pub use client::{DEFAULT_BASE_URL, QuizClient, decode_quiz};
pub use quiz::{QuizData, QuizQuestion};
pub use request::QuizRequest;
pub use schema::map_quiz;
