//! Rule parsing module
//!
//! This module turns rule strings like "(x AND y) OR z" into a tree of
//! [`Node`] values. Evaluating that tree against data is left to callers.

mod ast;
pub mod cache;
pub mod lexer;
pub mod parser;
pub mod trace;


pub use ast::*;
pub use cache::*;
pub use parser::*;
pub use trace::*;
