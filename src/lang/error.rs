use super::{Column, LineNumber};

#[derive(Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    line: Option<LineNumber>,
    column: Option<Column>,
    message: String,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident, $line:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_line($line)
    };
    ($err:ident, $line:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_line($line)
            .message($msg)
    };
    ($err:ident, $line:expr, ..$col:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_line($line)
            .in_column($col)
    };
    ($err:ident, $line:expr, ..$col:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_line($line)
            .in_column($col)
            .message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code,
            line: None,
            column: None,
            message: String::new(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn line(&self) -> Option<LineNumber> {
        self.line
    }

    pub fn column(&self) -> Option<Column> {
        self.column
    }

    pub fn text(&self) -> &str {
        &self.message
    }

    pub fn in_line(self, line: LineNumber) -> Error {
        debug_assert!(self.line.is_none());
        Error {
            line: Some(line),
            ..self
        }
    }

    pub fn in_column(self, column: Column) -> Error {
        debug_assert!(self.column.is_none());
        Error {
            column: Some(column),
            ..self
        }
    }

    pub fn message<S: Into<String>>(self, message: S) -> Error {
        debug_assert!(self.message.is_empty());
        Error {
            message: message.into(),
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    SyntaxError,
    UnexpectedCharacter,
    DuplicateLabel,
    UndefinedLabel,
    TypeMismatch,
    ProgramTooLarge,
    Overflow,
    EmptyHand,
    EmptyTile,
    EmptyValue,
    NotANumber,
    TileOutOfRange,
    StackOverflow,
    FileNotFound,
    CyclesExceeded,
    InternalError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use ErrorCode::*;
        let code_str = match self {
            SyntaxError => "SYNTAX ERROR",
            UnexpectedCharacter => "UNEXPECTED CHARACTER",
            DuplicateLabel => "DUPLICATE LABEL",
            UndefinedLabel => "UNDEFINED LABEL",
            TypeMismatch => "TYPE MISMATCH",
            ProgramTooLarge => "PROGRAM TOO LARGE",
            Overflow => "OVERFLOW",
            EmptyHand => "EMPTY HAND",
            EmptyTile => "EMPTY TILE",
            EmptyValue => "EMPTY VALUE",
            NotANumber => "NOT A NUMBER",
            TileOutOfRange => "TILE OUT OF RANGE",
            StackOverflow => "STACK OVERFLOW",
            FileNotFound => "FILE NOT FOUND",
            CyclesExceeded => "CYCLES EXCEEDED",
            InternalError => "INTERNAL ERROR",
        };
        write!(f, "{}", code_str)
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut suffix = String::new();
        if let Some(line) = self.line {
            suffix.push_str(&format!(" {}", line));
            if let Some(column) = self.column {
                suffix.push_str(&format!(":{}", column));
            }
        }
        if suffix.is_empty() {
            write!(f, "{}", self.code)?;
        } else {
            write!(f, "{} IN{}", self.code, suffix)?;
        }
        if !self.message.is_empty() {
            write!(f, "; {}", self.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {}
