//! Purpose: Hand-rolled JSON boundary shared by the client and the CLI.
//! Exports: `value`, `parse`, `encode`.
//! Role: Single seam for payload decoding so callsites avoid ad hoc logic.
//! Invariants: Only the subset needed by the quiz payload is implemented.

pub mod encode;
pub mod parse;
pub mod value;
