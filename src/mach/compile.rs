use super::{Chunk, Link, Opcode, Operand, Val};
use crate::lang::{Error, ErrorCode, Kind, Scanner, Token};
use std::convert::TryFrom;
use tracing::debug;

/// Compiles `source` into `chunk` and returns the number of instructions
/// the program is made of. Every reported diagnostic is returned on failure.
pub fn compile(source: &str, chunk: &mut Chunk) -> Result<usize, Vec<Error>> {
    Compiler::compile(source, chunk)
}

/// A statement operand before anything is emitted for it.
enum Argument {
    Number(Token),
    Label(Token),
}

struct Compiler<'a, 'b> {
    scanner: Scanner<'a>,
    chunk: &'b mut Chunk,
    link: Link,
    current: Token,
    previous: Token,
    errors: Vec<Error>,
    panic: bool,
    size: usize,
}

impl<'a, 'b> Compiler<'a, 'b> {
    fn compile(source: &'a str, chunk: &'b mut Chunk) -> Result<usize, Vec<Error>> {
        let start = Token::new(Kind::Newline, "", 1, 1);
        let mut this = Compiler {
            scanner: Scanner::new(source),
            chunk,
            link: Link::new(),
            current: start.clone(),
            previous: start,
            errors: vec![],
            panic: false,
            size: 0,
        };
        this.advance();
        while !this.check(Kind::Eof) {
            this.statement();
            if this.panic {
                this.synchronize();
            }
        }
        this.emit_op(Opcode::Halt);
        let unlinked = this.link.link();
        this.errors.extend(unlinked);
        debug!(
            size = this.size,
            bytes = this.chunk.len(),
            errors = this.errors.len(),
            "compiled"
        );
        if this.errors.is_empty() {
            Ok(this.size)
        } else {
            Err(this.errors)
        }
    }

    fn statement(&mut self) {
        let kind = self.current.kind;
        match kind {
            Kind::Newline => self.advance(),
            Kind::Inbox | Kind::Outbox => {
                self.advance();
                self.emit_op(Self::opcode(kind));
                self.size += 1;
            }
            Kind::Jump | Kind::JumpZ | Kind::JumpN => {
                self.advance();
                self.jump(Self::opcode(kind));
                self.size += 1;
            }
            Kind::CopyFrom | Kind::CopyTo | Kind::Add | Kind::Sub => {
                self.advance();
                self.address(Self::opcode(kind));
                self.size += 1;
            }
            Kind::Label => {
                self.advance();
                self.label_declaration();
            }
            Kind::Int | Kind::Minus | Kind::Colon | Kind::Eof | Kind::Error => {
                self.expression_statement()
            }
        }
    }

    fn opcode(kind: Kind) -> Opcode {
        match kind {
            Kind::Inbox => Opcode::Inbox,
            Kind::Outbox => Opcode::Outbox,
            Kind::Jump => Opcode::Jump,
            Kind::JumpZ => Opcode::JumpZ,
            Kind::JumpN => Opcode::JumpN,
            Kind::CopyFrom => Opcode::CopyFrom,
            Kind::CopyTo => Opcode::CopyTo,
            Kind::Add => Opcode::Add,
            Kind::Sub => Opcode::Sub,
            _ => unreachable!("{} is not a statement keyword", kind),
        }
    }

    fn label_declaration(&mut self) {
        let label = self.previous.clone();
        if !self.consume(Kind::Colon, "Expected ':' after label declaration.") {
            return;
        }
        if let Err(error) = self.link.declare(self.chunk, &label) {
            self.report(error);
        }
    }

    fn jump(&mut self, op: Opcode) {
        let expected = format!("Expected a label after {}.", op);
        match self.operand(&expected) {
            Some((0, Argument::Label(token))) => self.emit_jump(op, &token),
            Some((_, Argument::Label(token))) | Some((_, Argument::Number(token))) => {
                self.error_at(&token, ErrorCode::SyntaxError, expected)
            }
            None => {}
        }
    }

    fn address(&mut self, op: Opcode) {
        let expected = format!("Expected a tile address after {}.", op);
        match self.operand(&expected) {
            Some((negations, Argument::Number(token))) => {
                self.number(&token, negations);
                self.emit_op(op);
            }
            Some((_, Argument::Label(token))) => {
                let message = format!("Label '{}' cannot be used as a tile address.", token);
                self.error_at(&token, ErrorCode::TypeMismatch, message)
            }
            None => {}
        }
    }

    fn expression_statement(&mut self) {
        let expected = format!("Unexpected token '{}'.", self.current);
        if let Some((negations, argument)) = self.operand(&expected) {
            match argument {
                Argument::Number(token) => self.number(&token, negations),
                Argument::Label(token) => {
                    self.emit_constant(Val::Label(token.literal.into()));
                    self.negate(negations);
                }
            }
            self.emit_op(Opcode::Pop);
        }
    }

    fn operand(&mut self, expected: &str) -> Option<(usize, Argument)> {
        let mut negations = 0;
        while self.matches(Kind::Minus) {
            negations += 1;
        }
        match self.current.kind {
            Kind::Int => {
                self.advance();
                Some((negations, Argument::Number(self.previous.clone())))
            }
            Kind::Label => {
                self.advance();
                Some((negations, Argument::Label(self.previous.clone())))
            }
            kind => {
                let token = self.current.clone();
                self.error_at(&token, ErrorCode::SyntaxError, expected);
                // A statement may begin here; leave it for synchronize.
                if !(kind.is_keyword() || kind == Kind::Newline || kind == Kind::Eof) {
                    self.advance();
                }
                None
            }
        }
    }

    /// One minus is folded into a literal that only fits negated.
    fn number(&mut self, token: &Token, negations: usize) {
        let parsed = match token.literal.parse::<i64>() {
            Ok(n) => Ok((n, negations)),
            Err(_) if negations > 0 => format!("-{}", token.literal)
                .parse::<i64>()
                .map(|n| (n, negations - 1)),
            Err(e) => Err(e),
        };
        match parsed {
            Ok((n, negations)) => {
                self.emit_constant(Val::Int(n));
                self.negate(negations);
            }
            Err(_) => {
                let message = format!("Number '{}' is too large.", token);
                self.error_at(token, ErrorCode::Overflow, message)
            }
        }
    }

    fn negate(&mut self, negations: usize) {
        for _ in 0..negations {
            self.emit_op(Opcode::Negate);
        }
    }

    fn emit_byte(&mut self, byte: u8) {
        self.chunk.write(byte, self.previous.line);
    }

    fn emit_op(&mut self, op: Opcode) {
        debug_assert_eq!(op.operand(), Operand::None);
        self.emit_byte(op.into());
    }

    fn emit_constant(&mut self, val: Val) {
        if self.chunk.constants().len() > u8::max_value() as usize {
            let token = self.previous.clone();
            let message = format!("More than {} constants.", u8::max_value() as usize + 1);
            return self.error_at(&token, ErrorCode::ProgramTooLarge, message);
        }
        let index = self.chunk.add_constant(val);
        self.emit_byte(Opcode::Constant.into());
        self.emit_byte(u8::try_from(index).unwrap_or_default());
    }

    fn emit_jump(&mut self, op: Opcode, label: &Token) {
        debug_assert_eq!(op.operand(), Operand::Target);
        self.emit_byte(op.into());
        match self.link.resolve(&label.literal) {
            Some(offset) => self.emit_byte(offset),
            None => {
                self.link.link_addr_to_label(self.chunk.len(), label);
                self.emit_byte(0);
            }
        }
    }

    fn advance(&mut self) {
        self.previous = std::mem::replace(&mut self.current, self.scanner.scan_token());
        while self.current.kind == Kind::Error {
            let token = self.current.clone();
            self.error_at(&token, ErrorCode::UnexpectedCharacter, token.literal.as_str());
            self.current = self.scanner.scan_token();
        }
    }

    fn check(&self, kind: Kind) -> bool {
        self.current.kind == kind
    }

    fn matches(&mut self, kind: Kind) -> bool {
        if !self.check(kind) {
            return false;
        }
        self.advance();
        true
    }

    fn consume(&mut self, kind: Kind, message: &str) -> bool {
        if self.matches(kind) {
            return true;
        }
        let token = self.current.clone();
        self.error_at(&token, ErrorCode::SyntaxError, message);
        false
    }

    fn error_at<S: Into<String>>(&mut self, token: &Token, code: ErrorCode, message: S) {
        let error = Error::new(code)
            .in_line(token.line)
            .in_column(token.column)
            .message(message);
        self.report(error);
    }

    /// Only the first error is kept until the parser is back in step.
    fn report(&mut self, error: Error) {
        if self.panic {
            return;
        }
        self.panic = true;
        self.errors.push(error);
    }

    fn synchronize(&mut self) {
        while !self.check(Kind::Eof) {
            if self.previous.kind == Kind::Newline {
                break;
            }
            match self.current.kind {
                Kind::Inbox | Kind::Outbox | Kind::Jump | Kind::JumpZ => break,
                _ => self.advance(),
            }
        }
        self.panic = false;
    }
}
