//! Sentences classified by the grammar that accepts them.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::ast::{Node, Valuation};
use crate::error::{EvalError, FormulaError, LexError};
use crate::lexer::{is_atom_name, Lexer};
use crate::limits::Limits;
use crate::parser::{parse_permissive, parse_strict, Grammar};

/// A well-formed sentence.
///
/// A `Formula` only exists for input that one of the two grammars
/// accepts: construction either yields a complete tree or fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formula {
    input: String,
    tree: Node,
    grammar: Grammar,
}

impl Formula {
    /// Parse `text` with default limits.
    pub fn parse(text: &str) -> Result<Self, FormulaError> {
        Self::with_limits(text, Limits::default())
    }

    /// Parse `text` with custom limits.
    pub fn with_limits(text: &str, limits: Limits) -> Result<Self, FormulaError> {
        Self::with_lexer(text, Lexer::standard()?, limits)
    }

    /// Parse `text` using a caller-built lexer.
    ///
    /// The strict grammar is tried first. If it fails, the text is
    /// tokenized again and handed to the permissive grammar.
    ///
    /// # Errors
    ///
    /// - [`FormulaError::Empty`] for empty or whitespace-only input
    /// - [`FormulaError::Lex`] for text that cannot be tokenized
    /// - [`FormulaError::Malformed`] carrying the permissive grammar's
    ///   diagnostic when neither grammar accepts the tokens
    pub fn with_lexer(text: &str, lexer: &Lexer, limits: Limits) -> Result<Self, FormulaError> {
        if text.trim().is_empty() {
            return Err(FormulaError::Empty);
        }

        let (tree, grammar) = match parse_strict(lexer.tokenize(text)?, limits) {
            Ok(tree) => (tree, Grammar::Strict),
            Err(strict_err) => {
                debug!("'{}' is not formal ({}); trying permissive grammar", text, strict_err);
                let tree = parse_permissive(lexer.tokenize(text)?, limits).map_err(|source| {
                    FormulaError::Malformed {
                        input: text.to_string(),
                        source,
                    }
                })?;
                (tree, Grammar::Permissive)
            }
        };
        debug!("parsed '{}' as {:?}: {}", text, grammar, tree);

        Ok(Self {
            input: text.to_string(),
            tree,
            grammar,
        })
    }

    /// Wrap a directly built tree. The result is formal and its input is
    /// the canonical render.
    ///
    /// # Errors
    ///
    /// Returns [`LexError::InvalidAtom`] if an atom was built through the
    /// public variant with a name outside the atom pattern, since its
    /// render would not parse back.
    pub fn from_node(tree: Node) -> Result<Self, FormulaError> {
        if let Some(name) = tree.atoms().into_iter().find(|a| !is_atom_name(a)) {
            return Err(LexError::InvalidAtom(name).into());
        }
        Ok(Self {
            input: tree.render(),
            tree,
            grammar: Grammar::Strict,
        })
    }

    /// The original text.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Root of the sentence tree.
    pub fn tree(&self) -> &Node {
        &self.tree
    }

    /// Grammar that accepted the sentence.
    pub fn grammar(&self) -> Grammar {
        self.grammar
    }

    /// Always `true`: ill-formed input never produces a `Formula`.
    pub fn is_well_formed(&self) -> bool {
        true
    }

    /// Whether the strict grammar accepted the sentence.
    pub fn is_formal(&self) -> bool {
        self.grammar == Grammar::Strict
    }

    /// Distinct atom names in the sentence.
    pub fn atoms(&self) -> BTreeSet<String> {
        self.tree.atoms()
    }

    /// Evaluate under an environment that assigns every atom.
    pub fn evaluate<V: Valuation + ?Sized>(&self, env: &V) -> Result<bool, EvalError> {
        self.tree.evaluate(env)
    }

    /// Canonical fully parenthesized form.
    pub fn render(&self) -> String {
        self.tree.render()
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.tree, f)
    }
}

impl FromStr for Formula {
    type Err = FormulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{LexError, ParseError};
    use crate::token::{Token, TokenKind};
    use std::collections::HashMap;

    #[test]
    fn test_formal_sentences() {
        for text in ["P", "~P", "(P∧Q)", "(P∨Q)", "(P→Q)", "(P↔Q)", "((P∧Q)→R)", "(  P  →  Q  )"] {
            let formula = Formula::parse(text).unwrap();
            assert!(formula.is_well_formed(), "{}", text);
            assert!(formula.is_formal(), "{}", text);
        }
    }

    #[test]
    fn test_informal_sentences() {
        for text in ["P∧Q", "[P∧Q]", "P∧Q→R", "P∧Q∧R", "P∨Q∨R", "P&Q", "P|Q", "P->Q", "(P)"] {
            let formula = Formula::parse(text).unwrap();
            assert!(formula.is_well_formed(), "{}", text);
            assert!(!formula.is_formal(), "{}", text);
            assert_eq!(formula.grammar(), Grammar::Permissive);
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(Formula::parse(""), Err(FormulaError::Empty));
        assert_eq!(Formula::parse(" \t\n"), Err(FormulaError::Empty));
    }

    #[test]
    fn test_lex_error() {
        assert_eq!(
            Formula::parse("P#Q"),
            Err(FormulaError::Lex(LexError::UnknownToken("#".to_string())))
        );
    }

    #[test]
    fn test_malformed_carries_permissive_diagnostic() {
        assert_eq!(
            Formula::parse("P∧Q∨R"),
            Err(FormulaError::Malformed {
                input: "P∧Q∨R".to_string(),
                source: ParseError::Ambiguity {
                    first: Token::new(TokenKind::And, "∧"),
                    second: Token::new(TokenKind::Or, "∨"),
                },
            })
        );
        assert!(matches!(
            Formula::parse("(P∧Q"),
            Err(FormulaError::Malformed {
                source: ParseError::UnexpectedEndExpecting(TokenKind::RParen),
                ..
            })
        ));
    }

    #[test]
    fn test_atoms_and_evaluate() {
        let formula = Formula::parse("(P_1→Q_2)∧(R_3∨S_4)").unwrap();
        let atoms: Vec<String> = formula.atoms().into_iter().collect();
        assert_eq!(atoms, vec!["P_1", "Q_2", "R_3", "S_4"]);

        let env: HashMap<String, bool> = [
            ("P_1".to_string(), true),
            ("Q_2".to_string(), false),
            ("R_3".to_string(), true),
            ("S_4".to_string(), false),
        ]
        .into();
        assert!(!formula.evaluate(&env).unwrap());
    }

    #[test]
    fn test_render_and_display() {
        let formula = Formula::parse("[P∧Q]→~R").unwrap();
        assert_eq!(formula.render(), "((P&Q)->~R)");
        assert_eq!(formula.to_string(), "((P&Q)->~R)");
        assert_eq!(formula.input(), "[P∧Q]→~R");
    }

    #[test]
    fn test_from_node_is_formal() {
        let tree = Formula::parse("P∨Q").unwrap().tree().clone();
        let formula = Formula::from_node(tree).unwrap();
        assert!(formula.is_formal());
        assert_eq!(formula.input(), "(P|Q)");
        assert_eq!(Formula::parse(formula.input()).unwrap().tree(), formula.tree());
    }

    #[test]
    fn test_from_node_rejects_invalid_atom() {
        let tree = Node::not(Node::Atom("abc".to_string()));
        assert_eq!(
            Formula::from_node(tree),
            Err(FormulaError::Lex(LexError::InvalidAtom("abc".to_string())))
        );
    }

    #[test]
    fn test_from_str() {
        let formula: Formula = "P→Q".parse().unwrap();
        assert_eq!(formula.render(), "(P->Q)");
    }
}
