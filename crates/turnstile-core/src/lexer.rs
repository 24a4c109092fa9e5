//! Tokenizer and token cursor.
//!
//! The lexer compiles one pattern from every spelling in its symbol
//! table, longest spelling first, followed by the atom pattern. Text
//! between matches that is not whitespace is a lexical error.

use std::sync::OnceLock;

use log::trace;
use regex::Regex;

use crate::error::{DefinitionError, LexError, ParseError};
use crate::token::{SymbolTable, Token, TokenKind};

/// Atom pattern: one letter `P`..`Z`, optionally `_` and digits.
pub const ATOM_PATTERN: &str = r"[P-Z](?:_[0-9]+)?";

/// Check whether `name` is a valid atom name.
pub fn is_atom_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some('P'..='Z') => {}
        _ => return false,
    }
    match chars.next() {
        None => true,
        Some('_') => {
            let digits = chars.as_str();
            !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
        }
        Some(_) => false,
    }
}

static STANDARD_LEXER: OnceLock<Result<Lexer, DefinitionError>> = OnceLock::new();

/// Text-to-token converter built from a symbol table.
#[derive(Debug, Clone)]
pub struct Lexer {
    symbols: SymbolTable,
    pattern: Regex,
}

impl Lexer {
    /// Create a lexer over the built-in spellings.
    pub fn new() -> Result<Self, DefinitionError> {
        Self::from_table(SymbolTable::standard()?)
    }

    /// Shared lexer over the built-in spellings, built on first use.
    pub fn standard() -> Result<&'static Lexer, DefinitionError> {
        STANDARD_LEXER
            .get_or_init(Lexer::new)
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Create a lexer over caller-supplied spellings.
    pub fn with_definitions(definitions: &[(TokenKind, &[&str])]) -> Result<Self, DefinitionError> {
        Self::from_table(SymbolTable::from_definitions(definitions)?)
    }

    fn from_table(symbols: SymbolTable) -> Result<Self, DefinitionError> {
        let mut alternatives: Vec<String> = symbols
            .spellings_longest_first()
            .into_iter()
            .map(regex::escape)
            .collect();
        alternatives.push(ATOM_PATTERN.to_string());
        let pattern = Regex::new(&format!(r"\s*({})\s*", alternatives.join("|")))
            .map_err(|e| DefinitionError::InvalidPattern(e.to_string()))?;
        Ok(Self { symbols, pattern })
    }

    /// The symbol table this lexer was built from.
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Split `text` into tokens.
    ///
    /// # Errors
    ///
    /// Returns [`LexError::UnknownToken`] naming the first stretch of text
    /// that is neither a known spelling nor an atom.
    pub fn tokenize(&self, text: &str) -> Result<TokenStream, LexError> {
        let mut tokens = Vec::new();
        let mut last = 0;

        for caps in self.pattern.captures_iter(text) {
            let (Some(whole), Some(matched)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            check_gap(&text[last..whole.start()])?;
            last = whole.end();

            let raw = matched.as_str();
            let kind = match self.symbols.get(raw) {
                Some(kind) => kind,
                None if is_atom_name(raw) => TokenKind::Atom,
                None => return Err(LexError::UnknownToken(raw.to_string())),
            };
            trace!("token {:?} '{}'", kind, raw);
            tokens.push(Token::new(kind, raw));
        }
        check_gap(&text[last..])?;

        Ok(TokenStream::new(tokens))
    }
}

/// Unmatched text between two tokens must be whitespace.
fn check_gap(gap: &str) -> Result<(), LexError> {
    let gap = gap.trim();
    if gap.is_empty() {
        Ok(())
    } else {
        Err(LexError::UnknownToken(gap.to_string()))
    }
}

/// Cursor over a token sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStream {
    tokens: Vec<Token>,
    pos: usize,
}

impl TokenStream {
    /// Wrap an already lexed sequence.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Current token without consuming it.
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    /// Kind of the current token.
    pub fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    /// Consume the current token.
    pub fn advance(&mut self) -> Result<Token, ParseError> {
        let token = self.peek().cloned().ok_or(ParseError::UnexpectedEnd)?;
        self.pos += 1;
        Ok(token)
    }

    /// Consume the current token, requiring it to be of `kind`.
    pub fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        match self.peek() {
            None => Err(ParseError::UnexpectedEndExpecting(kind)),
            Some(token) if token.kind != kind => Err(ParseError::Mismatch {
                expected: kind,
                found: token.clone(),
            }),
            Some(_) => self.advance(),
        }
    }

    /// Whether every token has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// All tokens, consumed or not.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the stream holds no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<TokenKind> {
        let lexer = Lexer::new().unwrap();
        lexer
            .tokenize(text)
            .unwrap()
            .tokens()
            .iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_atom_names() {
        assert!(is_atom_name("P"));
        assert!(is_atom_name("Z"));
        assert!(is_atom_name("Q_1"));
        assert!(is_atom_name("R_042"));
        assert!(!is_atom_name("A"));
        assert!(!is_atom_name("p"));
        assert!(!is_atom_name("P_"));
        assert!(!is_atom_name("P1"));
        assert!(!is_atom_name("P_1a"));
        assert!(!is_atom_name(""));
    }

    #[test]
    fn test_tokenize_simple() {
        use TokenKind::*;
        assert_eq!(kinds("P→Q"), vec![Atom, Implies, Atom]);
        assert_eq!(
            kinds("(P_1 & ~Q)"),
            vec![LParen, Atom, And, Not, Atom, RParen]
        );
        assert_eq!(kinds("[P]"), vec![LBracket, Atom, RBracket]);
    }

    #[test]
    fn test_longest_match_wins() {
        use TokenKind::*;
        assert_eq!(kinds("P<->Q"), vec![Atom, Equiv, Atom]);
        assert_eq!(kinds("P<=>Q"), vec![Atom, Equiv, Atom]);
        assert_eq!(kinds("P=>Q"), vec![Atom, Implies, Atom]);
        assert_eq!(kinds("P/\\Q\\/R"), vec![Atom, And, Atom, Or, Atom]);
    }

    #[test]
    fn test_whitespace_discarded() {
        use TokenKind::*;
        assert_eq!(kinds("  P \t ∧\nQ  "), vec![Atom, And, Atom]);
        assert!(kinds("   ").is_empty());
    }

    #[test]
    fn test_token_text_preserved() {
        let lexer = Lexer::new().unwrap();
        let stream = lexer.tokenize("S_12 ↔ ～T").unwrap();
        let texts: Vec<&str> = stream.tokens().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["S_12", "↔", "～", "T"]);
    }

    #[test]
    fn test_unknown_token() {
        let lexer = Lexer::new().unwrap();
        assert_eq!(
            lexer.tokenize("P#Q"),
            Err(LexError::UnknownToken("#".to_string()))
        );
        assert_eq!(
            lexer.tokenize("P ∧ abc"),
            Err(LexError::UnknownToken("abc".to_string()))
        );
        assert_eq!(
            lexer.tokenize("A"),
            Err(LexError::UnknownToken("A".to_string()))
        );
    }

    #[test]
    fn test_standard_lexer_is_shared() {
        let first = Lexer::standard().unwrap();
        let second = Lexer::standard().unwrap();
        assert!(std::ptr::eq(first, second));
        assert_eq!(first.symbols().len(), Lexer::new().unwrap().symbols().len());
    }

    #[test]
    fn test_custom_definitions() {
        let defs: &[(TokenKind, &[&str])] = &[
            (TokenKind::Not, &["not"]),
            (TokenKind::And, &["and"]),
            (TokenKind::Or, &["or"]),
        ];
        let lexer = Lexer::with_definitions(defs).unwrap();
        let stream = lexer.tokenize("not P and Q").unwrap();
        assert_eq!(stream.len(), 4);
        assert_eq!(
            lexer.tokenize("P & Q"),
            Err(LexError::UnknownToken("&".to_string()))
        );
    }

    #[test]
    fn test_duplicate_definition_fails_fast() {
        let defs: &[(TokenKind, &[&str])] = &[
            (TokenKind::Implies, &["->"]),
            (TokenKind::Equiv, &["->"]),
        ];
        assert!(matches!(
            Lexer::with_definitions(defs),
            Err(DefinitionError::DuplicateSpelling { .. })
        ));
    }

    #[test]
    fn test_cursor() {
        let lexer = Lexer::new().unwrap();
        let mut stream = lexer.tokenize("(P").unwrap();
        assert_eq!(stream.peek_kind(), Some(TokenKind::LParen));
        stream.expect(TokenKind::LParen).unwrap();
        assert_eq!(
            stream.expect(TokenKind::RParen),
            Err(ParseError::Mismatch {
                expected: TokenKind::RParen,
                found: Token::new(TokenKind::Atom, "P"),
            })
        );
        assert_eq!(stream.advance().unwrap().text, "P");
        assert!(stream.is_exhausted());
        assert_eq!(stream.advance(), Err(ParseError::UnexpectedEnd));
        assert_eq!(
            stream.expect(TokenKind::RParen),
            Err(ParseError::UnexpectedEndExpecting(TokenKind::RParen))
        );
    }
}
