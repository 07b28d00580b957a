use crate::error;
use crate::lang::Error;
use std::rc::Rc;

/// ## Runtime values
///
/// Whatever sits in the worker's hands, on a floor tile, in the
/// INBOX or OUTBOX, or in the constant pool.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Val {
    Empty,
    Int(i64),
    Char(char),
    Label(Rc<str>),
}

impl Default for Val {
    fn default() -> Val {
        Val::Empty
    }
}

impl Val {
    pub fn is_empty(&self) -> bool {
        matches!(self, Val::Empty)
    }
}

impl std::fmt::Display for Val {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Val::*;
        match self {
            Empty => write!(f, "."),
            Int(n) => write!(f, "{}", n),
            Char(c) => write!(f, "{}", c),
            Label(s) => write!(f, "{}", s),
        }
    }
}

impl std::str::FromStr for Val {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "." {
            return Ok(Val::Empty);
        }
        if let Ok(n) = s.parse::<i64>() {
            return Ok(Val::Int(n));
        }
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(Val::Char(c)),
            _ => Err(error!(SyntaxError; format!("Invalid value '{}'.", s))),
        }
    }
}
