use super::{Column, LineNumber};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    // Literals
    Int,
    Label,

    // Punctuation
    Minus,
    Colon,

    // Keywords
    Inbox,
    Outbox,
    Jump,
    JumpZ,
    JumpN,
    CopyFrom,
    CopyTo,
    Add,
    Sub,

    Newline,
    Eof,
    Error,
}

impl Kind {
    /// Keywords are case-sensitive and must match exactly.
    pub fn keyword(s: &str) -> Option<Kind> {
        use Kind::*;
        match s {
            "INBOX" => Some(Inbox),
            "OUTBOX" => Some(Outbox),
            "JUMP" => Some(Jump),
            "JUMPZ" => Some(JumpZ),
            "JUMPN" => Some(JumpN),
            "COPYFROM" => Some(CopyFrom),
            "COPYTO" => Some(CopyTo),
            "ADD" => Some(Add),
            "SUB" => Some(Sub),
            _ => None,
        }
    }

    pub fn is_keyword(&self) -> bool {
        use Kind::*;
        match self {
            Inbox | Outbox | Jump | JumpZ | JumpN | CopyFrom | CopyTo | Add | Sub => true,
            Int | Label | Minus | Colon | Newline | Eof | Error => false,
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Kind::*;
        match self {
            Int => write!(f, "INTEGER"),
            Label => write!(f, "LABEL"),
            Minus => write!(f, "-"),
            Colon => write!(f, ":"),
            Inbox => write!(f, "INBOX"),
            Outbox => write!(f, "OUTBOX"),
            Jump => write!(f, "JUMP"),
            JumpZ => write!(f, "JUMPZ"),
            JumpN => write!(f, "JUMPN"),
            CopyFrom => write!(f, "COPYFROM"),
            CopyTo => write!(f, "COPYTO"),
            Add => write!(f, "ADD"),
            Sub => write!(f, "SUB"),
            Newline => write!(f, "NEWLINE"),
            Eof => write!(f, "EOF"),
            Error => write!(f, "ERROR"),
        }
    }
}

/// A single lexeme. The literal of an `Error` token is the scanner's message.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: Kind,
    pub literal: String,
    pub line: LineNumber,
    pub column: Column,
}

impl Token {
    pub fn new<S: Into<String>>(kind: Kind, literal: S, line: LineNumber, column: Column) -> Token {
        Token {
            kind,
            literal: literal.into(),
            line,
            column,
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.literal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword() {
        assert_eq!(Kind::keyword("JUMPZ"), Some(Kind::JumpZ));
        assert_eq!(Kind::keyword("COPYTO"), Some(Kind::CopyTo));
        assert_eq!(Kind::keyword("inbox"), None);
        assert_eq!(Kind::keyword("JUMPS"), None);
    }

    #[test]
    fn test_is_keyword() {
        assert!(Kind::Sub.is_keyword());
        assert!(!Kind::Label.is_keyword());
        assert!(!Kind::Newline.is_keyword());
    }
}
