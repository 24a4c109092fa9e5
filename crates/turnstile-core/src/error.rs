//! Error types for tokenizing, parsing, evaluation and inference.

use thiserror::Error;

use crate::token::{Token, TokenKind};

/// Errors in a symbol table definition.
///
/// These are programming errors in the spelling table, detected when the
/// table is built and independent of any input text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DefinitionError {
    /// The same spelling was registered for two kinds.
    #[error("definition error: symbol '{spelling}' is registered for both {first} and {second}")]
    DuplicateSpelling {
        spelling: String,
        first: TokenKind,
        second: TokenKind,
    },

    /// A spelling was empty or whitespace only.
    #[error("definition error: empty spelling registered for {0}")]
    EmptySpelling(TokenKind),

    /// Atoms are matched by pattern and cannot carry literal spellings.
    #[error("definition error: atoms cannot have literal spelling '{0}'")]
    AtomSpelling(String),

    /// The combined token pattern failed to compile.
    #[error("definition error: invalid token pattern: {0}")]
    InvalidPattern(String),
}

/// Errors raised while splitting text into tokens.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    /// Text that is neither a known symbol nor an atom.
    #[error("unknown token: '{0}'")]
    UnknownToken(String),

    /// A name that does not follow the atom pattern `[P-Z](_[0-9]+)?`.
    #[error("invalid atom name: '{0}'")]
    InvalidAtom(String),
}

/// Errors raised by either grammar.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Input ended where a token was required.
    #[error("unexpected end of input")]
    UnexpectedEnd,

    /// Input ended where a specific kind was required.
    #[error("unexpected end of input: expected {0}")]
    UnexpectedEndExpecting(TokenKind),

    /// A token of the wrong kind was found.
    #[error("expected {expected} but found {found}")]
    Mismatch { expected: TokenKind, found: Token },

    /// A strict group did not contain a binary connective.
    #[error("expected a binary connective but found {0}")]
    ExpectedConnective(Token),

    /// A token that cannot start a sentence.
    #[error("unexpected token {0}")]
    UnexpectedToken(Token),

    /// Tokens left over after a complete sentence.
    #[error("extra tokens at end, starting at {0}")]
    TrailingTokens(Token),

    /// Conjunction and disjunction mixed at one scope without parentheses.
    #[error(
        "connectives {first} and {second} appear at the same precedence level; \
         parentheses are required"
    )]
    Ambiguity { first: Token, second: Token },

    /// Nesting exceeded the configured limit.
    #[error("maximum nesting depth exceeded ({0})")]
    DepthExceeded(usize),
}

/// Errors building a [`Formula`](crate::Formula).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormulaError {
    /// Input was empty or whitespace only.
    #[error("input is empty; not a sentence")]
    Empty,

    /// The symbol table could not be built.
    #[error(transparent)]
    Definition(#[from] DefinitionError),

    /// The input could not be tokenized.
    #[error("not a sentence: {0}")]
    Lex(#[from] LexError),

    /// Neither grammar accepted the input. Carries the permissive
    /// grammar's diagnostic.
    #[error("not a sentence: '{input}': {source}")]
    Malformed {
        input: String,
        #[source]
        source: ParseError,
    },
}

/// Errors building an [`Inference`](crate::Inference).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InferenceError {
    /// A premise is not a sentence.
    #[error("premise {index} is not well-formed: '{sentence}'")]
    IllFormedPremise {
        index: usize,
        sentence: String,
        #[source]
        source: Option<FormulaError>,
    },

    /// The conclusion is not a sentence.
    #[error("conclusion is not well-formed: '{sentence}'")]
    IllFormedConclusion {
        sentence: String,
        #[source]
        source: Option<FormulaError>,
    },

    /// Too many distinct atoms to enumerate.
    #[error("too many atoms to enumerate ({count} > {max})")]
    TooManyAtoms { count: usize, max: usize },

    /// A sentence could not be compiled against the atom columns.
    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// Errors during evaluation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// The environment has no value for an atom in the sentence.
    #[error("missing value for atom {0}")]
    MissingAtom(String),
}
