use crate::error;
use crate::lang::Error;
use std::convert::TryFrom;

/// ## Virtual machine instruction set
///
/// One opcode byte, then zero or one operand byte. Tile addresses travel
/// on the operand stack: `COPYFROM 3` compiles to `[CONSTANT(3), COPYFROM]`.
/// Jump targets are immediate: `JUMP a` compiles to `[JUMP, offset_of_a]`.
///
/// `BumpUp` and `BumpDn` are executed by the machine but have no surface
/// syntax yet.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Opcode {
    Halt = 0,
    Pop,
    Constant,
    Inbox,
    Outbox,
    Jump,
    JumpZ,
    JumpN,
    CopyFrom,
    CopyTo,
    Add,
    Sub,
    BumpUp,
    BumpDn,
    Negate,
}

/// What follows the opcode byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    None,
    /// Index into the constant pool.
    Constant,
    /// Absolute code offset.
    Target,
}

impl Opcode {
    pub fn operand(&self) -> Operand {
        use Opcode::*;
        match self {
            Constant => Operand::Constant,
            Jump | JumpZ | JumpN => Operand::Target,
            Halt | Pop | Inbox | Outbox | CopyFrom | CopyTo | Add | Sub | BumpUp | BumpDn
            | Negate => Operand::None,
        }
    }

    /// Encoded length in bytes, opcode included.
    pub fn width(&self) -> usize {
        match self.operand() {
            Operand::None => 1,
            Operand::Constant | Operand::Target => 2,
        }
    }

    /// Instructions the worker performs; these count as steps.
    pub fn is_step(&self) -> bool {
        use Opcode::*;
        match self {
            Inbox | Outbox | Jump | JumpZ | JumpN | CopyFrom | CopyTo | Add | Sub | BumpUp
            | BumpDn => true,
            Halt | Pop | Constant | Negate => false,
        }
    }
}

impl TryFrom<u8> for Opcode {
    type Error = Error;
    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        use Opcode::*;
        Ok(match byte {
            0 => Halt,
            1 => Pop,
            2 => Constant,
            3 => Inbox,
            4 => Outbox,
            5 => Jump,
            6 => JumpZ,
            7 => JumpN,
            8 => CopyFrom,
            9 => CopyTo,
            10 => Add,
            11 => Sub,
            12 => BumpUp,
            13 => BumpDn,
            14 => Negate,
            _ => return Err(error!(InternalError; format!("Unknown opcode {}.", byte))),
        })
    }
}

impl From<Opcode> for u8 {
    fn from(opcode: Opcode) -> u8 {
        opcode as u8
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Opcode::*;
        let s = match self {
            Halt => "HALT",
            Pop => "POP",
            Constant => "CONSTANT",
            Inbox => "INBOX",
            Outbox => "OUTBOX",
            Jump => "JUMP",
            JumpZ => "JUMPZ",
            JumpN => "JUMPN",
            CopyFrom => "COPYFROM",
            CopyTo => "COPYTO",
            Add => "ADD",
            Sub => "SUB",
            BumpUp => "BUMPUP",
            BumpDn => "BUMPDN",
            Negate => "NEGATE",
        };
        f.pad(s)
    }
}
