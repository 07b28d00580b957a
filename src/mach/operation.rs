use super::{Opcode, Val};
use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

pub struct Operation {}

impl Operation {
    pub fn negate(val: Val) -> Result<Val> {
        let n = Self::integer(Opcode::Negate, &val)?;
        match n.checked_neg() {
            Some(n) => Ok(Val::Int(n)),
            None => Err(Self::overflow(Opcode::Negate)),
        }
    }

    pub fn sum(op: Opcode, hand: &Val, tile: &Val) -> Result<Val> {
        let (l, r) = Self::operands(op, hand, tile)?;
        match l.checked_add(r) {
            Some(n) => Ok(Val::Int(n)),
            None => Err(Self::overflow(op)),
        }
    }

    pub fn subtract(op: Opcode, hand: &Val, tile: &Val) -> Result<Val> {
        let (l, r) = Self::operands(op, hand, tile)?;
        match l.checked_sub(r) {
            Some(n) => Ok(Val::Int(n)),
            None => Err(Self::overflow(op)),
        }
    }

    pub fn bump(op: Opcode, tile: &Val, delta: i64) -> Result<Val> {
        let n = Self::integer(op, tile)?;
        match n.checked_add(delta) {
            Some(n) => Ok(Val::Int(n)),
            None => Err(Self::overflow(op)),
        }
    }

    fn operands(op: Opcode, hand: &Val, tile: &Val) -> Result<(i64, i64)> {
        if hand.is_empty() {
            return Err(error!(EmptyHand;
                format!("Empty value! You can't {} with empty hands!", op)));
        }
        Ok((Self::integer(op, hand)?, Self::integer(op, tile)?))
    }

    fn integer(op: Opcode, val: &Val) -> Result<i64> {
        match val {
            Val::Int(n) => Ok(*n),
            Val::Empty | Val::Char(_) | Val::Label(_) => Err(error!(NotANumber;
                format!("Value is not a number, cannot {}!", op))),
        }
    }

    fn overflow(op: Opcode) -> Error {
        error!(Overflow; format!("The result of {} is too large!", op))
    }
}
