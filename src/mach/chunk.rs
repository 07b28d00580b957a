use super::{Address, Listing, Val};
use crate::lang::LineNumber;

/// ## Compiled program
///
/// Code bytes with a parallel table of source lines, plus the
/// constant pool that `CONSTANT` operands index into.

#[derive(Debug, Clone, Default)]
pub struct Chunk {
    code: Vec<u8>,
    lines: Vec<LineNumber>,
    constants: Vec<Val>,
}

impl Chunk {
    pub fn new() -> Chunk {
        Chunk::default()
    }

    pub fn write(&mut self, byte: u8, line: LineNumber) {
        self.code.push(byte);
        self.lines.push(line);
    }

    /// Callers keep the pool within the reach of a one-byte operand.
    pub fn add_constant(&mut self, val: Val) -> usize {
        self.constants.push(val);
        self.constants.len() - 1
    }

    pub fn patch(&mut self, offset: Address, byte: u8) {
        debug_assert!(offset < self.code.len());
        if let Some(b) = self.code.get_mut(offset) {
            *b = byte;
        }
    }

    pub fn len(&self) -> usize {
        self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    pub fn code(&self) -> &[u8] {
        &self.code
    }

    pub fn byte(&self, offset: Address) -> Option<u8> {
        self.code.get(offset).copied()
    }

    pub fn line(&self, offset: Address) -> Option<LineNumber> {
        self.lines.get(offset).copied()
    }

    pub fn constant(&self, index: usize) -> Option<&Val> {
        self.constants.get(index)
    }

    pub fn constants(&self) -> &[Val] {
        &self.constants
    }

    pub fn listing(&self) -> Listing<'_> {
        Listing::new(self)
    }

    pub fn disassemble(&self, name: &str) -> String {
        let mut s = format!("[{}]\n", name);
        for instruction in self.listing() {
            s.push_str(&format!("{}\n", instruction));
        }
        s
    }

    /// Renders the instruction at `offset` and returns the offset after it.
    pub fn disassemble_instruction(&self, offset: Address) -> (String, Address) {
        match Listing::decode(self, offset) {
            Some(instruction) => (instruction.to_string(), offset + instruction.width()),
            None => (format!("{:04} <end>", offset), offset + 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::Opcode;
    use super::*;

    #[test]
    fn test_write_and_patch() {
        let mut chunk = Chunk::new();
        chunk.write(Opcode::Jump.into(), 1);
        chunk.write(0, 1);
        chunk.write(Opcode::Halt.into(), 2);
        chunk.patch(1, 2);
        assert_eq!(chunk.code(), &[5, 2, 0]);
        assert_eq!(chunk.line(2), Some(2));
        assert_eq!(chunk.line(3), None);
    }

    #[test]
    fn test_constant_pool() {
        let mut chunk = Chunk::new();
        assert_eq!(chunk.add_constant(Val::Int(3)), 0);
        assert_eq!(chunk.add_constant(Val::Char('x')), 1);
        assert_eq!(chunk.constant(1), Some(&Val::Char('x')));
        assert_eq!(chunk.constant(2), None);
    }
}
