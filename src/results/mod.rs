//! Result selection module

mod selector;

pub use selector::{select, SelectionResult};
