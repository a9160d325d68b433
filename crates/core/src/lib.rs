//! Domain vocabulary shared by the persistence and HTTP crates.
//!
//! Nothing in here performs I/O: identifiers, timestamps, the error enum,
//! order statuses, settings categories and input validation helpers.

pub mod error;
pub mod order_status;
pub mod settings;
pub mod types;
pub mod validation;
