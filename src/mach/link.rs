use super::{Address, Chunk};
use crate::error;
use crate::lang::{Error, Token};
use std::collections::{HashMap, HashSet};
use std::convert::TryFrom;

type Result<T> = std::result::Result<T, Error>;

/// ## Label table
///
/// Offsets of declared labels, and the jump operands still waiting
/// for a label that has not been declared yet. A label rejected for being
/// out of reach is remembered so its jumps are not reported again.

#[derive(Debug, Default)]
pub struct Link {
    symbols: HashMap<String, u8>,
    unlinked: HashMap<String, Vec<(Address, Token)>>,
    rejected: HashSet<String>,
}

impl Link {
    pub fn new() -> Link {
        Link::default()
    }

    pub fn resolve(&self, name: &str) -> Option<u8> {
        self.symbols.get(name).copied()
    }

    /// Records a placeholder operand at `addr` for the label named by `token`.
    pub fn link_addr_to_label(&mut self, addr: Address, token: &Token) {
        if self.rejected.contains(&token.literal) {
            return;
        }
        self.unlinked
            .entry(token.literal.clone())
            .or_insert_with(Vec::new)
            .push((addr, token.clone()));
    }

    /// Declares a label at the end of `chunk` and patches its pending uses.
    pub fn declare(&mut self, chunk: &mut Chunk, token: &Token) -> Result<()> {
        let name = &token.literal;
        if self.symbols.contains_key(name) {
            return Err(error!(DuplicateLabel, token.line, ..token.column;
                format!("Label '{}' already used.", name)));
        }
        let offset = match u8::try_from(chunk.len()) {
            Ok(offset) => offset,
            Err(_) => {
                self.unlinked.remove(name);
                self.rejected.insert(name.clone());
                return Err(error!(ProgramTooLarge, token.line, ..token.column;
                    format!("Label '{}' is past offset {}, the last one a jump can reach.",
                        name, u8::max_value())));
            }
        };
        self.symbols.insert(name.clone(), offset);
        if let Some(uses) = self.unlinked.remove(name) {
            for (addr, _) in uses {
                chunk.patch(addr, offset);
            }
        }
        Ok(())
    }

    /// One error per label never declared, at its first use, in program order.
    pub fn link(&mut self) -> Vec<Error> {
        let mut first_uses: Vec<(Address, Token)> = std::mem::take(&mut self.unlinked)
            .into_iter()
            .filter(|(name, _)| !self.rejected.contains(name))
            .filter_map(|(_, uses)| uses.into_iter().next())
            .collect();
        first_uses.sort_by_key(|(addr, _)| *addr);
        first_uses
            .into_iter()
            .map(|(_, token)| {
                error!(UndefinedLabel, token.line, ..token.column;
                    format!("Unknown label '{}'.", token.literal))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::{ErrorCode, Kind};

    fn label(name: &str, line: usize) -> Token {
        Token::new(Kind::Label, name, line, 1)
    }

    #[test]
    fn test_forward_reference_is_patched() {
        let mut chunk = Chunk::new();
        let mut link = Link::new();
        chunk.write(5, 1);
        link.link_addr_to_label(chunk.len(), &label("end", 1));
        chunk.write(0, 1);
        chunk.write(3, 2);
        link.declare(&mut chunk, &label("end", 3)).unwrap();
        assert_eq!(chunk.code(), &[5, 3, 3]);
        assert_eq!(link.resolve("end"), Some(3));
        assert!(link.link().is_empty());
    }

    #[test]
    fn test_duplicate() {
        let mut chunk = Chunk::new();
        let mut link = Link::new();
        link.declare(&mut chunk, &label("a", 1)).unwrap();
        chunk.write(3, 2);
        let e = link.declare(&mut chunk, &label("a", 3)).unwrap_err();
        assert_eq!(e.code(), ErrorCode::DuplicateLabel);
        assert_eq!(link.resolve("a"), Some(0));
    }

    #[test]
    fn test_unresolved_in_program_order() {
        let mut link = Link::new();
        link.link_addr_to_label(9, &label("late", 4));
        link.link_addr_to_label(1, &label("early", 1));
        link.link_addr_to_label(5, &label("early", 2));
        let errors = link.link();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].line(), Some(1));
        assert_eq!(errors[0].text(), "Unknown label 'early'.");
        assert_eq!(errors[1].text(), "Unknown label 'late'.");
        assert!(link.link().is_empty());
    }

    #[test]
    fn test_too_far() {
        let mut chunk = Chunk::new();
        let mut link = Link::new();
        for _ in 0..256 {
            chunk.write(3, 1);
        }
        link.link_addr_to_label(0, &label("far", 1));
        let e = link.declare(&mut chunk, &label("far", 2)).unwrap_err();
        assert_eq!(e.code(), ErrorCode::ProgramTooLarge);
        assert_eq!(link.resolve("far"), None);
        link.link_addr_to_label(300, &label("far", 3));
        assert!(link.link().is_empty());
    }
}
