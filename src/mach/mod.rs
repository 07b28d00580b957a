/*!
## Machine Module

A single-pass compiler from mailroom assembly to bytecode,
and the register machine that runs it.

*/

pub type Address = usize;

mod chunk;
mod compile;
mod link;
mod listing;
mod opcode;
mod operation;
mod runtime;
mod stack;
mod val;

#[cfg(test)]
mod tests;

pub use chunk::Chunk;
pub use compile::compile;
pub use link::Link;
pub use listing::{Instruction, Listing};
pub use opcode::{Opcode, Operand};
pub use operation::Operation;
pub use runtime::{Event, Metrics, Runtime, State};
pub(crate) use stack::Stack;
pub use val::Val;
