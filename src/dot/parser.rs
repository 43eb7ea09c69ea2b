//! DOT recursive descent parser.
//!
//! Builds a [`Graph`] directly from the token stream. Supports:
//! - `strict`, `graph` / `digraph`, optional graph id
//! - node statements, edge chains, repeated attribute lists
//! - `graph` / `node` / `edge` default attribute statements
//! - `key = value` graph attributes
//! - subgraphs (named or anonymous) with scoped defaults, also as edge endpoints
//! - node ports (`n:port:compass`), which do not affect node identity
//! - `+` concatenation of quoted strings

use crate::model::{AttrMap, Graph, NodeKey, Value};
use crate::{Error, Result};
use super::lexer::{Token, TokenKind};

/// Deepest `{ ... }` nesting accepted below the graph body.
pub const MAX_NESTING: usize = 128;

/// Parser state: wraps a token slice with cursor.
struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
    depth: usize,
    directed: bool,
    graph: Graph,
}

/// Default attributes in effect inside a `{ ... }` block.
#[derive(Debug, Clone, Default)]
struct Scope {
    node_defaults: AttrMap,
    edge_defaults: AttrMap,
}

impl<'t> Parser<'t> {
    fn new(tokens: &'t [Token]) -> Self {
        Self { tokens, pos: 0, depth: 0, directed: true, graph: Graph::new() }
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    fn peek_kind_at(&self, offset: usize) -> TokenKind {
        self.tokens[(self.pos + offset).min(self.tokens.len() - 1)].kind
    }

    fn advance(&mut self) -> &Token {
        let tok = &self.tokens[self.pos.min(self.tokens.len() - 1)];
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn expect(&mut self, kind: TokenKind) -> Result<&Token> {
        let tok = self.peek();
        if tok.kind == kind {
            Ok(self.advance())
        } else {
            Err(self.error(format!("Expected {:?}, got {:?} '{}'", kind, tok.kind, tok.text)))
        }
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn at_edge_op(&self) -> bool {
        matches!(self.peek_kind(), TokenKind::DirectedEdge | TokenKind::UndirectedEdge)
    }

    fn error(&self, msg: String) -> Error {
        Error::SyntaxError {
            position: self.peek().span.start,
            message: msg,
        }
    }

    /// ID, including `"a" + "b"` concatenation of quoted strings.
    fn parse_id(&mut self) -> Result<String> {
        let tok = self.peek();
        if !tok.kind.is_id() {
            return Err(self.error(format!("Expected ID, got {:?} '{}'", tok.kind, tok.text)));
        }
        let kind = tok.kind;
        let mut id = self.advance().text.clone();
        if kind == TokenKind::QuotedString {
            while self.at(TokenKind::Plus) {
                self.advance();
                let tok = self.expect(TokenKind::QuotedString)?;
                id.push_str(&tok.text);
            }
        }
        Ok(id)
    }
}

/// Parse a complete DOT graph from tokens.
pub fn parse_graph(tokens: &[Token]) -> Result<Graph> {
    let mut p = Parser::new(tokens);

    p.eat(TokenKind::Strict);
    p.directed = match p.peek_kind() {
        TokenKind::Digraph => true,
        TokenKind::Graph => false,
        kind => return Err(p.error(format!("Expected 'graph' or 'digraph', got {:?}", kind))),
    };
    p.advance();

    if p.peek_kind().is_id() {
        let name = p.parse_id()?;
        p.graph.set_name(Some(name));
    }

    p.expect(TokenKind::LBrace)?;
    let mut scope = Scope::default();
    parse_stmt_list(&mut p, &mut scope, true)?;
    p.expect(TokenKind::RBrace)?;

    if !p.at(TokenKind::Eof) {
        return Err(p.error(format!("Unexpected token after graph: {:?}", p.peek_kind())));
    }

    Ok(p.graph)
}

// ============================================================================
// Statements
// ============================================================================

/// Parse statements up to (not including) the closing brace.
/// Returns every node referenced inside the block, in first-seen order.
fn parse_stmt_list(p: &mut Parser, scope: &mut Scope, top_level: bool) -> Result<Vec<String>> {
    let mut members: Vec<String> = Vec::new();

    while !p.at(TokenKind::RBrace) {
        if p.at(TokenKind::Eof) {
            return Err(p.error("Unexpected end of input, expected '}'".into()));
        }

        let touched = parse_stmt(p, scope, top_level)?;
        for id in touched {
            if !members.contains(&id) {
                members.push(id);
            }
        }
        p.eat(TokenKind::Semicolon);
    }

    Ok(members)
}

fn parse_stmt(p: &mut Parser, scope: &mut Scope, top_level: bool) -> Result<Vec<String>> {
    match p.peek_kind() {
        TokenKind::Graph => {
            p.advance();
            let attrs = parse_attr_lists(p)?;
            if top_level {
                p.graph.attrs_mut().extend(attrs);
            }
            Ok(Vec::new())
        }
        TokenKind::Node => {
            p.advance();
            let attrs = parse_attr_lists(p)?;
            scope.node_defaults.extend(attrs);
            Ok(Vec::new())
        }
        TokenKind::Edge => {
            p.advance();
            let attrs = parse_attr_lists(p)?;
            scope.edge_defaults.extend(attrs);
            Ok(Vec::new())
        }
        // `key = value` at statement level
        kind if kind.is_id() && p.peek_kind_at(1) == TokenKind::Eq => {
            let key = p.parse_id()?;
            p.expect(TokenKind::Eq)?;
            let value = p.parse_id()?;
            if top_level {
                p.graph.attrs_mut().insert(NodeKey::Str(key), Value::String(value));
            }
            Ok(Vec::new())
        }
        kind if kind.is_id() || kind == TokenKind::Subgraph || kind == TokenKind::LBrace => {
            parse_node_or_edge_stmt(p, scope)
        }
        kind => Err(p.error(format!("Unexpected token {:?} at start of statement", kind))),
    }
}

/// Node statement, or edge statement when an edge operator follows the
/// first operand.
fn parse_node_or_edge_stmt(p: &mut Parser, scope: &Scope) -> Result<Vec<String>> {
    let mut operands: Vec<Vec<String>> = vec![parse_edge_operand(p, scope)?];
    let is_node_stmt = !p.at_edge_op();

    while p.at_edge_op() {
        let op = p.peek_kind();
        match (p.directed, op) {
            (true, TokenKind::UndirectedEdge) => {
                return Err(p.error("'--' is not allowed in a digraph".into()));
            }
            (false, TokenKind::DirectedEdge) => {
                return Err(p.error("'->' is not allowed in an undirected graph".into()));
            }
            _ => {}
        }
        p.advance();
        operands.push(parse_edge_operand(p, scope)?);
    }

    let explicit = parse_attr_lists(p)?;

    if is_node_stmt {
        // Single node: explicit attributes apply to the node itself.
        for id in &operands[0] {
            p.graph.add_node(id.as_str(), explicit.clone());
        }
        return Ok(operands.swap_remove(0));
    }

    let mut edge_attrs = scope.edge_defaults.clone();
    edge_attrs.extend(explicit);

    for pair in operands.windows(2) {
        for u in &pair[0] {
            for v in &pair[1] {
                p.graph.add_edge(u.as_str(), v.as_str(), edge_attrs.clone());
                if !p.directed && u != v {
                    p.graph.add_edge(v.as_str(), u.as_str(), edge_attrs.clone());
                }
            }
        }
    }

    let mut touched = Vec::new();
    for id in operands.into_iter().flatten() {
        if !touched.contains(&id) {
            touched.push(id);
        }
    }
    Ok(touched)
}

/// A node id (with optional port) or a subgraph. Nodes seen for the first
/// time pick up the node defaults of the current scope.
fn parse_edge_operand(p: &mut Parser, scope: &Scope) -> Result<Vec<String>> {
    match p.peek_kind() {
        TokenKind::Subgraph | TokenKind::LBrace => parse_subgraph(p, scope),
        _ => {
            let id = p.parse_id()?;
            parse_port(p)?;
            let key = NodeKey::Str(id.clone());
            if !p.graph.contains_node(&key) {
                p.graph.add_node(key, scope.node_defaults.clone());
            }
            Ok(vec![id])
        }
    }
}

/// `: port [: compass]`, consumed and discarded.
fn parse_port(p: &mut Parser) -> Result<()> {
    if p.eat(TokenKind::Colon) {
        p.parse_id()?;
        if p.eat(TokenKind::Colon) {
            p.parse_id()?;
        }
    }
    Ok(())
}

/// `[subgraph [ID]] { stmt_list }` with its own copy of the enclosing scope.
fn parse_subgraph(p: &mut Parser, scope: &Scope) -> Result<Vec<String>> {
    if p.eat(TokenKind::Subgraph) && p.peek_kind().is_id() {
        p.parse_id()?;
    }
    if p.depth == MAX_NESTING {
        return Err(p.error("subgraph nesting too deep".into()));
    }
    p.expect(TokenKind::LBrace)?;
    p.depth += 1;
    let mut inner = scope.clone();
    let members = parse_stmt_list(p, &mut inner, false)?;
    p.expect(TokenKind::RBrace)?;
    p.depth -= 1;
    Ok(members)
}

// ============================================================================
// Attribute lists
// ============================================================================

/// Zero or more `[ k = v (,|;) ... ]` lists, merged left to right.
fn parse_attr_lists(p: &mut Parser) -> Result<AttrMap> {
    let mut attrs = AttrMap::new();
    while p.eat(TokenKind::LBracket) {
        while !p.at(TokenKind::RBracket) {
            let key = p.parse_id()?;
            p.expect(TokenKind::Eq)?;
            let value = p.parse_id()?;
            attrs.insert(NodeKey::Str(key), Value::String(value));
            if !p.eat(TokenKind::Comma) {
                p.eat(TokenKind::Semicolon);
            }
        }
        p.expect(TokenKind::RBracket)?;
    }
    Ok(attrs)
}
