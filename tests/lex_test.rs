use hrm::lang::{Kind, Scanner, Token};

fn tokens(s: &str) -> Vec<Token> {
    Scanner::new(s).collect()
}

#[test]
fn test_program_tokens() {
    use Kind::*;
    let kinds: Vec<Kind> = tokens("loop:\n  INBOX\n  JUMPZ loop -- skip zeros\n  COPYTO -3\n")
        .into_iter()
        .map(|t| t.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            Label, Colon, Newline, Inbox, Newline, JumpZ, Label, Newline, CopyTo, Minus, Int,
            Newline, Eof
        ]
    );
}

#[test]
fn test_literals() {
    let t = tokens("COPYFROM 0042 ab9");
    assert_eq!(t[0].literal, "COPYFROM");
    assert_eq!(t[1], Token::new(Kind::Int, "0042", 1, 10));
    assert_eq!(t[2], Token::new(Kind::Label, "ab9", 1, 15));
}

#[test]
fn test_windows_line_endings() {
    let t = tokens("INBOX\r\nOUTBOX\r\n");
    assert_eq!(t[1].kind, Kind::Newline);
    assert_eq!(t[2], Token::new(Kind::Outbox, "OUTBOX", 2, 1));
}

#[test]
fn test_eof_position() {
    let t = tokens("INBOX\n");
    assert_eq!(t.last(), Some(&Token::new(Kind::Eof, "EOF", 2, 1)));
}
