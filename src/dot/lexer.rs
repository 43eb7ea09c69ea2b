//! DOT lexer. Tokenizes graph-description text.

use crate::{Error, Result};

/// A token from the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub text: String,
}

/// Source span (byte offsets).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// Token kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Keywords (case-insensitive)
    Strict, Graph, Digraph, Node, Edge, Subgraph,

    // IDs
    Identifier,     // alphanumeric identifier or numeral
    QuotedString,   // "..." with escapes resolved
    Html,           // <...> including the outer brackets

    // Punctuation
    LBrace, RBrace, LBracket, RBracket,
    Eq, Semicolon, Comma, Colon, Plus,
    DirectedEdge,   // ->
    UndirectedEdge, // --

    Eof,
}

impl TokenKind {
    /// Token kinds that can serve as an ID.
    pub fn is_id(self) -> bool {
        matches!(self, TokenKind::Identifier | TokenKind::QuotedString | TokenKind::Html)
    }
}

/// Tokenize DOT source text.
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(pos, ch)) = chars.peek() {
        match ch {
            c if c.is_whitespace() => { chars.next(); }

            // Block comments /* ... */
            '/' if matches!(chars.clone().nth(1), Some((_, '*'))) => {
                chars.next();
                chars.next();
                loop {
                    match chars.next() {
                        Some((_, '*')) if matches!(chars.peek(), Some(&(_, '/'))) => {
                            chars.next();
                            break;
                        }
                        Some(_) => {}
                        None => {
                            return Err(Error::SyntaxError {
                                position: pos,
                                message: "Unterminated block comment".into(),
                            });
                        }
                    }
                }
            }

            // Line comments: `// ...` and preprocessor-style `# ...`
            '/' if matches!(chars.clone().nth(1), Some((_, '/'))) => skip_line(&mut chars),
            '#' => skip_line(&mut chars),

            '"' => {
                chars.next();
                let mut s = String::new();
                loop {
                    match chars.next() {
                        Some((_, '\\')) => match chars.peek() {
                            Some(&(_, '"')) => { chars.next(); s.push('"'); }
                            // backslash-newline continues the string on the next line
                            Some(&(_, '\n')) => { chars.next(); }
                            _ => s.push('\\'),
                        },
                        Some((end, '"')) => {
                            tokens.push(Token {
                                kind: TokenKind::QuotedString,
                                span: Span { start: pos, end: end + 1 },
                                text: s,
                            });
                            break;
                        }
                        Some((_, c)) => s.push(c),
                        None => return Err(Error::SyntaxError {
                            position: pos,
                            message: "Unterminated string literal".into(),
                        }),
                    }
                }
            }

            '<' => {
                let mut depth = 0usize;
                let mut s = String::new();
                loop {
                    match chars.next() {
                        Some((_, '<')) => { depth += 1; s.push('<'); }
                        Some((end, '>')) => {
                            depth -= 1;
                            s.push('>');
                            if depth == 0 {
                                tokens.push(Token {
                                    kind: TokenKind::Html,
                                    span: Span { start: pos, end: end + 1 },
                                    text: s,
                                });
                                break;
                            }
                        }
                        Some((_, c)) => s.push(c),
                        None => return Err(Error::SyntaxError {
                            position: pos,
                            message: "Unterminated HTML string".into(),
                        }),
                    }
                }
            }

            '-' => {
                match chars.clone().nth(1) {
                    Some((_, '>')) => {
                        chars.next();
                        chars.next();
                        tokens.push(punct(TokenKind::DirectedEdge, pos, "->"));
                    }
                    Some((_, '-')) => {
                        chars.next();
                        chars.next();
                        tokens.push(punct(TokenKind::UndirectedEdge, pos, "--"));
                    }
                    Some((_, c)) if c.is_ascii_digit() || c == '.' => {
                        tokens.push(numeral(&mut chars, pos));
                    }
                    _ => {
                        return Err(Error::SyntaxError {
                            position: pos,
                            message: "Unexpected character: '-'".into(),
                        });
                    }
                }
            }

            c if c.is_ascii_digit() || c == '.' => tokens.push(numeral(&mut chars, pos)),

            c if is_ident_start(c) => {
                let mut ident = String::new();
                while let Some(&(_, c)) = chars.peek() {
                    if is_ident_start(c) || c.is_ascii_digit() {
                        ident.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token {
                    kind: keyword_or_ident(&ident),
                    span: Span { start: pos, end: pos + ident.len() },
                    text: ident,
                });
            }

            '{' => { chars.next(); tokens.push(punct(TokenKind::LBrace, pos, "{")); }
            '}' => { chars.next(); tokens.push(punct(TokenKind::RBrace, pos, "}")); }
            '[' => { chars.next(); tokens.push(punct(TokenKind::LBracket, pos, "[")); }
            ']' => { chars.next(); tokens.push(punct(TokenKind::RBracket, pos, "]")); }
            '=' => { chars.next(); tokens.push(punct(TokenKind::Eq, pos, "=")); }
            ';' => { chars.next(); tokens.push(punct(TokenKind::Semicolon, pos, ";")); }
            ',' => { chars.next(); tokens.push(punct(TokenKind::Comma, pos, ",")); }
            ':' => { chars.next(); tokens.push(punct(TokenKind::Colon, pos, ":")); }
            '+' => { chars.next(); tokens.push(punct(TokenKind::Plus, pos, "+")); }

            other => {
                return Err(Error::SyntaxError {
                    position: pos,
                    message: format!("Unexpected character: '{other}'"),
                });
            }
        }
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        span: Span { start: input.len(), end: input.len() },
        text: String::new(),
    });

    Ok(tokens)
}

fn skip_line(chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>) {
    while chars.peek().is_some_and(|&(_, c)| c != '\n') {
        chars.next();
    }
}

/// Numeral: `[-]?(.[0-9]+ | [0-9]+(.[0-9]*)?)`
fn numeral(chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>, start: usize) -> Token {
    let mut num = String::new();
    if matches!(chars.peek(), Some(&(_, '-'))) {
        num.push('-');
        chars.next();
    }
    let mut seen_dot = false;
    while let Some(&(_, c)) = chars.peek() {
        if c.is_ascii_digit() {
            num.push(c);
            chars.next();
        } else if c == '.' && !seen_dot {
            seen_dot = true;
            num.push(c);
            chars.next();
        } else {
            break;
        }
    }
    Token {
        kind: TokenKind::Identifier,
        span: Span { start, end: start + num.len() },
        text: num,
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

fn punct(kind: TokenKind, pos: usize, text: &str) -> Token {
    Token {
        kind,
        span: Span { start: pos, end: pos + text.len() },
        text: text.to_string(),
    }
}

fn keyword_or_ident(s: &str) -> TokenKind {
    match s.to_ascii_lowercase().as_str() {
        "strict" => TokenKind::Strict,
        "graph" => TokenKind::Graph,
        "digraph" => TokenKind::Digraph,
        "node" => TokenKind::Node,
        "edge" => TokenKind::Edge,
        "subgraph" => TokenKind::Subgraph,
        _ => TokenKind::Identifier,
    }
}
