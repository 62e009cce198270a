//! Command implementations for the CLI.

mod explain;
mod suggest;

pub use explain::{build_pair, execute_explain};
pub use suggest::{execute_suggest, load_request};
