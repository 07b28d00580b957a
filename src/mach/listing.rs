use super::{Address, Chunk, Opcode, Operand, Val};
use crate::lang::LineNumber;
use std::convert::TryFrom;

/// ## Disassembly of a chunk
///
/// Walks the code one instruction at a time. Each offset is visited
/// exactly once and the walk ends at the last byte.

#[derive(Debug, Clone)]
pub struct Listing<'a> {
    chunk: &'a Chunk,
    offset: Address,
}

/// One decoded instruction.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    pub offset: Address,
    /// `None` when the source line is the same as the previous byte's.
    pub line: Option<LineNumber>,
    pub byte: u8,
    pub opcode: Option<Opcode>,
    pub operand: Option<u8>,
    pub constant: Option<Val>,
}

impl<'a> Listing<'a> {
    pub fn new(chunk: &'a Chunk) -> Listing<'a> {
        Listing { chunk, offset: 0 }
    }

    pub fn decode(chunk: &Chunk, offset: Address) -> Option<Instruction> {
        let byte = chunk.byte(offset)?;
        let line = match (offset.checked_sub(1).and_then(|o| chunk.line(o)), chunk.line(offset)) {
            (Some(prev), Some(this)) if prev == this => None,
            (_, this) => this,
        };
        let opcode = Opcode::try_from(byte).ok();
        let operand = match opcode.map(|op| op.operand()) {
            Some(Operand::Constant) | Some(Operand::Target) => chunk.byte(offset + 1),
            Some(Operand::None) | None => None,
        };
        let constant = match (opcode, operand) {
            (Some(Opcode::Constant), Some(index)) => chunk.constant(index as usize).cloned(),
            _ => None,
        };
        Some(Instruction {
            offset,
            line,
            byte,
            opcode,
            operand,
            constant,
        })
    }
}

impl<'a> Iterator for Listing<'a> {
    type Item = Instruction;

    fn next(&mut self) -> Option<Self::Item> {
        let instruction = Listing::decode(self.chunk, self.offset)?;
        self.offset += instruction.width();
        Some(instruction)
    }
}

impl Instruction {
    pub fn width(&self) -> usize {
        match self.operand {
            Some(_) => 2,
            None => 1,
        }
    }
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:04} ", self.offset)?;
        match self.line {
            Some(line) => write!(f, "{:4} ", line)?,
            None => write!(f, "   | ")?,
        }
        let opcode = match self.opcode {
            Some(opcode) => opcode,
            None => return write!(f, "UNKNOWN {}", self.byte),
        };
        match (self.operand, &self.constant) {
            (None, _) => write!(f, "{}", opcode),
            (Some(index), Some(val)) => write!(f, "{:<16} {:4} '{}'", opcode, index, val),
            (Some(operand), None) => write!(f, "{:<16} {:4}", opcode, operand),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk() -> Chunk {
        let mut chunk = Chunk::new();
        chunk.write(Opcode::Inbox.into(), 1);
        let index = chunk.add_constant(Val::Int(3));
        chunk.write(Opcode::Constant.into(), 2);
        chunk.write(index as u8, 2);
        chunk.write(Opcode::CopyTo.into(), 2);
        chunk.write(Opcode::Jump.into(), 3);
        chunk.write(0, 3);
        chunk.write(Opcode::Halt.into(), 3);
        chunk
    }

    #[test]
    fn test_offsets() {
        let offsets: Vec<Address> = chunk().listing().map(|i| i.offset).collect();
        assert_eq!(offsets, vec![0, 1, 3, 4, 6]);
    }

    #[test]
    fn test_render() {
        let lines: Vec<String> = chunk().listing().map(|i| i.to_string()).collect();
        assert_eq!(lines[0], "0000    1 INBOX");
        assert_eq!(lines[1], "0001    2 CONSTANT            0 '3'");
        assert_eq!(lines[2], "0003    | COPYTO");
        assert_eq!(lines[3], "0004    3 JUMP                0");
        assert_eq!(lines[4], "0006    | HALT");
    }

    #[test]
    fn test_unknown_opcode() {
        let mut chunk = Chunk::new();
        chunk.write(200, 1);
        let instruction = chunk.listing().next().unwrap();
        assert_eq!(instruction.opcode, None);
        assert_eq!(instruction.to_string(), "0000    1 UNKNOWN 200");
        assert_eq!(chunk.disassemble_instruction(0).1, 1);
    }
}
