//! mysqlx-expr - X DevAPI expression parser
//!
//! This is the root workspace crate that provides integration tests.
//! The actual implementation is in the workspace member crates.

// Re-export main crates for convenience
pub use mysqlx_expr_ast as ast;
pub use mysqlx_expr_lexer as lexer;
pub use mysqlx_expr_parser as parser;
