//! X DevAPI expression tree
//!
//! This crate defines the expression node types, spans for source
//! locations, caret diagnostics and the canonical text printer.

mod span;
mod expr;
mod query;
mod diagnostic;
mod printer;

pub use span::*;
pub use expr::*;
pub use query::*;
pub use diagnostic::*;
pub use printer::*;
