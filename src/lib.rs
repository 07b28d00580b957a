//! # Mailroom assembly
//!
//! A compiler and register machine for the assembly language the office
//! workers of Human Resource Machine are programmed in.
//!
//! Programs read values from an inbox, shuffle them through one hand and
//! a floor of numbered tiles, and write results to an outbox.
//! ```text
//! start:
//!     INBOX
//!     COPYTO 0
//!     ADD 0
//!     OUTBOX
//!     JUMP start
//! ```
//!
//! Run a program from a file with the `hrm` binary, or from Rust:
//! ```
//! use hrm::mach::{Runtime, State, Val};
//! let mut runtime = Runtime::new(vec![Val::Int(21)], vec![Val::Empty]);
//! let (state, metrics) = runtime.interpret("INBOX\nCOPYTO 0\nADD 0\nOUTBOX\n");
//! assert_eq!(state, State::Ok);
//! assert_eq!(runtime.outbox(), &[Val::Int(42)]);
//! assert_eq!(metrics.steps, 4);
//! ```

pub mod lang;
pub mod mach;
pub mod term;
