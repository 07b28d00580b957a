/*!
## Language Module

This Rust module provides lexical analysis of the mailroom assembly
language and the diagnostics shared with the machine.

*/

pub type LineNumber = usize;
pub type Column = usize;

#[macro_use]
mod error;
mod lex;
mod token;

pub use error::Error;
pub use error::ErrorCode;
pub use lex::Scanner;
pub use token::Kind;
pub use token::Token;
