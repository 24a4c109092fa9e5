//! Turnstile: propositional sentences and truth-table validity.
//!
//! # Overview
//!
//! Turnstile reads sentences of zero-order propositional logic, decides
//! whether they are well-formed, and checks inferences for semantic
//! validity by enumerating every truth assignment.
//!
//! - **Two grammars**: a strict, fully parenthesized grammar and a
//!   permissive one with precedence, left associativity and `[...]` groups
//! - **Closed syntax tree**: atoms plus five connectives
//! - **Exhaustive truth tables**: `2^n` rows in a fixed, documented order
//! - **Counterexamples**: the first row where the premises hold and the
//!   conclusion fails
//!
//! # Example
//!
//! ```
//! use turnstile_core::{Formula, Inference};
//!
//! // "(P→Q)" is fully parenthesized; "P→Q" omits the outer parentheses.
//! let formal = Formula::parse("(P→Q)").unwrap();
//! let informal = Formula::parse("P→Q").unwrap();
//! assert!(formal.is_formal());
//! assert!(!informal.is_formal());
//! assert_eq!(informal.render(), "(P->Q)");
//!
//! // Modus ponens is valid.
//! let inference = Inference::from_sentences(&["P", "P→Q"], "Q").unwrap();
//! assert_eq!(inference.truth_table().len(), 4);
//! assert!(inference.is_valid());
//!
//! // Affirming the consequent is not.
//! let fallacy = Inference::from_sentences(&["Q", "P→Q"], "P").unwrap();
//! let row = fallacy.counterexample().unwrap();
//! assert_eq!(row.value("P"), Some(false));
//! assert_eq!(row.value("Q"), Some(true));
//! ```
//!
//! # Ambiguity
//!
//! `∧` and `∨` share a precedence level and may not be mixed without
//! grouping:
//!
//! ```
//! use turnstile_core::{Formula, FormulaError, ParseError};
//!
//! let err = Formula::parse("P∧Q∨R").unwrap_err();
//! assert!(matches!(
//!     err,
//!     FormulaError::Malformed { source: ParseError::Ambiguity { .. }, .. }
//! ));
//! assert!(Formula::parse("(P∧Q)∨R").is_ok());
//! ```
//!
//! # Limits
//!
//! Parsing is recursive, so nesting deeper than [`Limits::max_depth`]
//! (1024 by default) fails with [`ParseError::DepthExceeded`] instead of
//! exhausting the stack. Truth tables are not bounded beyond the 63 atoms
//! a `u64` row index can address; pass [`Limits::strict`] to
//! [`Formula::with_limits`] or [`Inference::with_limits`] for a tighter
//! bound on untrusted input.

pub mod ast;
pub mod circuit;
pub mod error;
pub mod formula;
pub mod inference;
pub mod lexer;
pub mod limits;
pub mod parser;
pub mod token;

pub use ast::{Node, Valuation};
pub use circuit::Circuit;
pub use error::{
    DefinitionError, EvalError, FormulaError, InferenceError, LexError, ParseError,
};
pub use formula::Formula;
pub use inference::{Inference, Row, Rows};
pub use lexer::{Lexer, TokenStream};
pub use limits::Limits;
pub use parser::{parse_permissive, parse_strict, Grammar, Parser};
pub use token::{Connective, SymbolTable, Token, TokenKind};

/// Parse a sentence. Shorthand for [`Formula::parse`].
pub fn parse_formula(text: &str) -> Result<Formula, FormulaError> {
    Formula::parse(text)
}

/// Build an inference. Shorthand for [`Inference::new`].
pub fn make_inference(
    premises: Vec<Formula>,
    conclusion: Formula,
) -> Result<Inference, InferenceError> {
    Inference::new(premises, conclusion)
}
