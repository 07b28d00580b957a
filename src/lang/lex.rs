use super::{token::*, Column, LineNumber};

fn is_hrm_whitespace(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\r'
}

fn is_hrm_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_hrm_alphabetic(c: char) -> bool {
    c.is_ascii_alphabetic()
}

fn is_hrm_identifier(c: char) -> bool {
    is_hrm_alphabetic(c) || is_hrm_digit(c)
}

/// ## Lazy token source
///
/// Tokens are produced one at a time with a single character of
/// lookahead. After the end of input every call yields `Eof`.
pub struct Scanner<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: LineNumber,
    column: Column,
    done: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Scanner<'a> {
        Scanner {
            chars: source.chars().peekable(),
            line: 1,
            column: 1,
            done: false,
        }
    }

    pub fn scan_token(&mut self) -> Token {
        self.skip_whitespace();
        let (line, column) = (self.line, self.column);
        let ch = match self.chars.peek() {
            Some(ch) => *ch,
            None => return Token::new(Kind::Eof, "EOF", line, column),
        };
        if is_hrm_digit(ch) {
            return self.integer(line, column);
        }
        if is_hrm_alphabetic(ch) {
            return self.identifier(line, column);
        }
        self.advance();
        match ch {
            '-' => {
                if let Some('-') = self.chars.peek() {
                    self.skip_comment();
                    return self.scan_token();
                }
                Token::new(Kind::Minus, "-", line, column)
            }
            ':' => Token::new(Kind::Colon, ":", line, column),
            '\n' => Token::new(Kind::Newline, "NEWLINE", line, column),
            _ => Token::new(
                Kind::Error,
                format!("Unexpected character '{}'.", ch),
                line,
                column,
            ),
        }
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.chars.peek() {
            if !is_hrm_whitespace(*ch) {
                break;
            }
            self.advance();
        }
    }

    // Stops short of the newline so the statement still ends there.
    fn skip_comment(&mut self) {
        while let Some(ch) = self.chars.peek() {
            if *ch == '\n' {
                break;
            }
            self.advance();
        }
    }

    fn integer(&mut self, line: LineNumber, column: Column) -> Token {
        let mut s = String::new();
        while let Some(ch) = self.chars.peek() {
            if !is_hrm_digit(*ch) {
                break;
            }
            s.push(*ch);
            self.advance();
        }
        Token::new(Kind::Int, s, line, column)
    }

    fn identifier(&mut self, line: LineNumber, column: Column) -> Token {
        let mut s = String::new();
        while let Some(ch) = self.chars.peek() {
            if !is_hrm_identifier(*ch) {
                break;
            }
            s.push(*ch);
            self.advance();
        }
        let kind = Kind::keyword(&s).unwrap_or(Kind::Label);
        Token::new(kind, s, line, column)
    }
}

/// Yields every token up to and including the first `Eof`.
impl<'a> Iterator for Scanner<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let token = self.scan_token();
        if token.kind == Kind::Eof {
            self.done = true;
        }
        Some(token)
    }
}
