//! Error types for evalkit
//!
//! Every fallible operation in the workspace returns [`EvalKitResult`]. Variants
//! carry a human-readable message plus optional context describing where the
//! failure happened.

mod constructors;
mod conversions;
mod types;

pub use types::{EvalKitError, EvalKitResult};
