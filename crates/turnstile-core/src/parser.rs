//! Strict and permissive sentence grammars.
//!
//! Both grammars share the primary routine (atom, negation, group) and
//! the token cursor. They differ only in what a group may contain and in
//! how binary connectives combine:
//!
//! - **Strict**: `WFF := Atom | Not WFF | "(" WFF BinOp WFF ")"`. Every
//!   binary application is parenthesized; brackets are rejected.
//! - **Permissive**: outer parentheses may be omitted, `[...]` groups like
//!   `(...)`, `∧`/`∨` bind tighter than `→`/`↔`, and chains fold to the
//!   left. `∧` and `∨` may not be mixed at one scope without grouping.

use crate::ast::Node;
use crate::error::ParseError;
use crate::lexer::TokenStream;
use crate::limits::Limits;
use crate::token::{Connective, Token, TokenKind};

/// Which grammar a parser applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grammar {
    /// Fully parenthesized sentences only.
    Strict,
    /// Abbreviated sentences with precedence and grouping brackets.
    Permissive,
}

/// Parse a complete sentence with the strict grammar.
pub fn parse_strict(tokens: TokenStream, limits: Limits) -> Result<Node, ParseError> {
    Parser::new(tokens, Grammar::Strict, limits).parse()
}

/// Parse a complete sentence with the permissive grammar.
pub fn parse_permissive(tokens: TokenStream, limits: Limits) -> Result<Node, ParseError> {
    Parser::new(tokens, Grammar::Permissive, limits).parse()
}

/// Lowest precedence; accepts every connective.
const LOWEST: u8 = 0;

/// Recursive-descent parser over a token stream.
#[derive(Debug)]
pub struct Parser {
    tokens: TokenStream,
    grammar: Grammar,
    limits: Limits,
    depth: usize,
}

impl Parser {
    /// Create a parser for one sentence.
    pub fn new(tokens: TokenStream, grammar: Grammar, limits: Limits) -> Self {
        Self {
            tokens,
            grammar,
            limits,
            depth: 0,
        }
    }

    /// The grammar this parser applies.
    pub fn grammar(&self) -> Grammar {
        self.grammar
    }

    /// Parse the whole stream as one sentence.
    ///
    /// # Errors
    ///
    /// Fails on any token the grammar does not allow, on premature end of
    /// input, and on tokens left over after the sentence.
    pub fn parse(mut self) -> Result<Node, ParseError> {
        let tree = match self.grammar {
            Grammar::Strict => self.parse_primary()?,
            Grammar::Permissive => self.parse_binary(LOWEST)?,
        };
        match self.tokens.peek() {
            Some(token) => Err(ParseError::TrailingTokens(token.clone())),
            None => Ok(tree),
        }
    }

    /// Atom, negation of a primary, or a group.
    fn parse_primary(&mut self) -> Result<Node, ParseError> {
        self.enter()?;
        let token = self.tokens.peek().cloned().ok_or(ParseError::UnexpectedEnd)?;
        let node = match token.kind {
            TokenKind::Atom => {
                self.tokens.advance()?;
                Node::Atom(token.text)
            }
            TokenKind::Not => {
                self.tokens.advance()?;
                Node::not(self.parse_primary()?)
            }
            TokenKind::LParen => self.parse_group(TokenKind::LParen, TokenKind::RParen)?,
            TokenKind::LBracket if self.grammar == Grammar::Permissive => {
                self.parse_group(TokenKind::LBracket, TokenKind::RBracket)?
            }
            _ => return Err(ParseError::UnexpectedToken(token)),
        };
        self.leave();
        Ok(node)
    }

    /// A group delimited by `open` and `close`.
    fn parse_group(&mut self, open: TokenKind, close: TokenKind) -> Result<Node, ParseError> {
        self.tokens.expect(open)?;
        let inner = match self.grammar {
            Grammar::Strict => {
                let left = self.parse_primary()?;
                let op = self.parse_connective()?;
                let right = self.parse_primary()?;
                Node::binary(op, left, right)
            }
            // A new group starts a fresh scope for the and/or mixing check.
            Grammar::Permissive => self.parse_binary(LOWEST)?,
        };
        self.tokens.expect(close)?;
        Ok(inner)
    }

    /// Exactly one binary connective.
    fn parse_connective(&mut self) -> Result<Connective, ParseError> {
        let token = self.tokens.advance()?;
        token
            .kind
            .as_connective()
            .ok_or(ParseError::ExpectedConnective(token))
    }

    /// Precedence climbing over connectives binding at least `min_prec`.
    ///
    /// Right operands are parsed at `prec + 1`, so equal-precedence chains
    /// fold to the left. `last` remembers the level-2 connective folded at
    /// this scope; meeting the other one is an ambiguity.
    fn parse_binary(&mut self, min_prec: u8) -> Result<Node, ParseError> {
        let mut left = self.parse_primary()?;
        let mut last: Option<Token> = None;

        while let Some(token) = self.tokens.peek() {
            let Some(op) = token.kind.as_connective() else {
                break;
            };
            let prec = op.precedence();
            if prec < min_prec {
                break;
            }
            if prec == 2 {
                if let Some(prev) = &last {
                    if prev.kind != token.kind {
                        return Err(ParseError::Ambiguity {
                            first: prev.clone(),
                            second: token.clone(),
                        });
                    }
                }
            }

            let token = self.tokens.advance()?;
            self.enter()?;
            let right = self.parse_binary(prec + 1)?;
            self.leave();
            left = Node::binary(op, left, right);
            last = (prec == 2).then_some(token);
        }

        Ok(left)
    }

    fn enter(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > self.limits.max_depth {
            return Err(ParseError::DepthExceeded(self.limits.max_depth));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }
}
