//! Token vocabulary for propositional sentences.
//!
//! This module defines the closed set of token kinds, the literal
//! spellings accepted for each connective and delimiter, and the symbol
//! table that maps spellings back to kinds.

use std::collections::HashMap;
use std::fmt;

use crate::error::DefinitionError;

/// Token kinds - closed, finite set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenKind {
    /// Propositional variable: `P`, `Q_1`, ...
    Atom,

    // === Connectives ===
    /// Negation: ¬A
    Not,
    /// Conjunction: A ∧ B
    And,
    /// Disjunction: A ∨ B
    Or,
    /// Material implication: A → B
    Implies,
    /// Biconditional: A ↔ B
    Equiv,

    // === Grouping ===
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
}

impl TokenKind {
    /// Convert to a binary connective if this is one.
    pub fn as_connective(self) -> Option<Connective> {
        match self {
            TokenKind::And => Some(Connective::And),
            TokenKind::Or => Some(Connective::Or),
            TokenKind::Implies => Some(Connective::Implies),
            TokenKind::Equiv => Some(Connective::Equiv),
            _ => None,
        }
    }

    /// Check if this kind is a binary connective.
    pub fn is_connective(self) -> bool {
        self.as_connective().is_some()
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Atom => "atom",
            TokenKind::Not => "negation",
            TokenKind::And => "conjunction",
            TokenKind::Or => "disjunction",
            TokenKind::Implies => "implication",
            TokenKind::Equiv => "equivalence",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
        };
        f.write_str(name)
    }
}

/// Built-in spellings for every non-atom kind.
pub const STANDARD_SPELLINGS: &[(TokenKind, &[&str])] = &[
    (TokenKind::Not, &["!", "~", "～", "¬"]),
    (TokenKind::And, &["&", "∧", "/\\"]),
    (TokenKind::Or, &["|", "∨", "\\/"]),
    (TokenKind::Implies, &["->", "→", "=>"]),
    (TokenKind::Equiv, &["<->", "↔", "<=>"]),
    (TokenKind::LParen, &["("]),
    (TokenKind::RParen, &[")"]),
    (TokenKind::LBracket, &["["]),
    (TokenKind::RBracket, &["]"]),
];

/// A lexed token: its kind and the exact spelling that matched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.text)
    }
}

/// Binary connective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Connective {
    /// Conjunction: A ∧ B
    And,
    /// Disjunction: A ∨ B
    Or,
    /// Material implication: A → B
    Implies,
    /// Biconditional: A ↔ B
    Equiv,
}

impl Connective {
    /// Evaluate this connective on two boolean values.
    #[inline]
    pub fn eval(self, a: bool, b: bool) -> bool {
        match self {
            Connective::And => a && b,
            Connective::Or => a || b,
            Connective::Implies => !a || b,
            Connective::Equiv => a == b,
        }
    }

    /// Binding strength in the permissive grammar. Higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            Connective::And | Connective::Or => 2,
            Connective::Implies | Connective::Equiv => 1,
        }
    }

    /// Spelling used by the canonical render.
    pub fn symbol(self) -> &'static str {
        match self {
            Connective::And => "&",
            Connective::Or => "|",
            Connective::Implies => "->",
            Connective::Equiv => "<->",
        }
    }
}

/// Spelling-to-kind table.
///
/// Every spelling maps to exactly one kind; registering the same spelling
/// twice is rejected at construction time, before any text is lexed.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: HashMap<String, TokenKind>,
}

impl SymbolTable {
    /// Build the table from the built-in spellings.
    pub fn standard() -> Result<Self, DefinitionError> {
        Self::from_definitions(STANDARD_SPELLINGS)
    }

    /// Build the table from caller-supplied spellings.
    pub fn from_definitions(definitions: &[(TokenKind, &[&str])]) -> Result<Self, DefinitionError> {
        let mut table = Self::default();
        for &(kind, spellings) in definitions {
            for &spelling in spellings {
                table.insert(kind, spelling)?;
            }
        }
        Ok(table)
    }

    fn insert(&mut self, kind: TokenKind, spelling: &str) -> Result<(), DefinitionError> {
        if kind == TokenKind::Atom {
            return Err(DefinitionError::AtomSpelling(spelling.to_string()));
        }
        if spelling.trim().is_empty() {
            return Err(DefinitionError::EmptySpelling(kind));
        }
        if let Some(&first) = self.symbols.get(spelling) {
            return Err(DefinitionError::DuplicateSpelling {
                spelling: spelling.to_string(),
                first,
                second: kind,
            });
        }
        self.symbols.insert(spelling.to_string(), kind);
        Ok(())
    }

    /// Look up the kind for an exact spelling.
    pub fn get(&self, spelling: &str) -> Option<TokenKind> {
        self.symbols.get(spelling).copied()
    }

    /// All spellings, longest first. Ties are broken lexicographically so
    /// the order is stable.
    pub fn spellings_longest_first(&self) -> Vec<&str> {
        let mut spellings: Vec<&str> = self.symbols.keys().map(String::as_str).collect();
        spellings.sort_by(|a, b| {
            b.chars()
                .count()
                .cmp(&a.chars().count())
                .then_with(|| a.cmp(b))
        });
        spellings
    }

    /// Number of registered spellings.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether no spellings are registered.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
