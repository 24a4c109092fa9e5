//! Syntax tree for propositional sentences.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use crate::error::{EvalError, LexError};
use crate::lexer::is_atom_name;
use crate::token::Connective;

/// Spelling used by the canonical render for negation.
pub const NOT_SYMBOL: &str = "~";

/// A node in a sentence tree.
///
/// Every subtree is owned by exactly one parent; trees never share nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    /// Propositional variable.
    Atom(String),
    /// Negation.
    Not(Box<Node>),
    /// Conjunction.
    And(Box<Node>, Box<Node>),
    /// Disjunction.
    Or(Box<Node>, Box<Node>),
    /// Material implication.
    Implies(Box<Node>, Box<Node>),
    /// Biconditional.
    Equivalence(Box<Node>, Box<Node>),
}

impl Node {
    /// Create an atom, checking the name against the atom pattern.
    pub fn atom(name: impl Into<String>) -> Result<Self, LexError> {
        let name = name.into();
        if is_atom_name(&name) {
            Ok(Node::Atom(name))
        } else {
            Err(LexError::InvalidAtom(name))
        }
    }

    /// Negate a node.
    #[allow(clippy::should_implement_trait)]
    pub fn not(child: Node) -> Self {
        Node::Not(Box::new(child))
    }

    /// Join two nodes with a binary connective.
    pub fn binary(op: Connective, left: Node, right: Node) -> Self {
        let (left, right) = (Box::new(left), Box::new(right));
        match op {
            Connective::And => Node::And(left, right),
            Connective::Or => Node::Or(left, right),
            Connective::Implies => Node::Implies(left, right),
            Connective::Equiv => Node::Equivalence(left, right),
        }
    }

    /// Split a binary node into its connective and operands.
    pub fn as_binary(&self) -> Option<(Connective, &Node, &Node)> {
        match self {
            Node::And(l, r) => Some((Connective::And, l, r)),
            Node::Or(l, r) => Some((Connective::Or, l, r)),
            Node::Implies(l, r) => Some((Connective::Implies, l, r)),
            Node::Equivalence(l, r) => Some((Connective::Equiv, l, r)),
            Node::Atom(_) | Node::Not(_) => None,
        }
    }

    /// Evaluate under an environment.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::MissingAtom`] if the environment has no value
    /// for an atom in the tree.
    pub fn evaluate<V: Valuation + ?Sized>(&self, env: &V) -> Result<bool, EvalError> {
        match self {
            Node::Atom(name) => env
                .value(name)
                .ok_or_else(|| EvalError::MissingAtom(name.clone())),
            Node::Not(child) => Ok(!child.evaluate(env)?),
            Node::And(l, r) => eval_binary(Connective::And, l, r, env),
            Node::Or(l, r) => eval_binary(Connective::Or, l, r, env),
            Node::Implies(l, r) => eval_binary(Connective::Implies, l, r, env),
            Node::Equivalence(l, r) => eval_binary(Connective::Equiv, l, r, env),
        }
    }

    /// Distinct atom names in the tree.
    pub fn atoms(&self) -> BTreeSet<String> {
        let mut atoms = BTreeSet::new();
        self.collect_atoms(&mut atoms);
        atoms
    }

    fn collect_atoms(&self, atoms: &mut BTreeSet<String>) {
        match self {
            Node::Atom(name) => {
                atoms.insert(name.clone());
            }
            Node::Not(child) => child.collect_atoms(atoms),
            Node::And(l, r) | Node::Or(l, r) | Node::Implies(l, r) | Node::Equivalence(l, r) => {
                l.collect_atoms(atoms);
                r.collect_atoms(atoms);
            }
        }
    }

    /// Height of the tree. An atom has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            Node::Atom(_) => 1,
            Node::Not(child) => 1 + child.depth(),
            Node::And(l, r) | Node::Or(l, r) | Node::Implies(l, r) | Node::Equivalence(l, r) => {
                1 + l.depth().max(r.depth())
            }
        }
    }

    /// Canonical fully parenthesized form.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Atom(name) => f.write_str(name),
            Node::Not(child) => write!(f, "{}{}", NOT_SYMBOL, child),
            Node::And(l, r) => write!(f, "({}{}{})", l, Connective::And.symbol(), r),
            Node::Or(l, r) => write!(f, "({}{}{})", l, Connective::Or.symbol(), r),
            Node::Implies(l, r) => write!(f, "({}{}{})", l, Connective::Implies.symbol(), r),
            Node::Equivalence(l, r) => write!(f, "({}{}{})", l, Connective::Equiv.symbol(), r),
        }
    }
}

/// Evaluate both operands, then apply the connective.
fn eval_binary<V: Valuation + ?Sized>(
    op: Connective,
    left: &Node,
    right: &Node,
    env: &V,
) -> Result<bool, EvalError> {
    let left = left.evaluate(env)?;
    let right = right.evaluate(env)?;
    Ok(op.eval(left, right))
}

/// Truth assignment lookup.
pub trait Valuation {
    /// Value of `atom`, if assigned.
    fn value(&self, atom: &str) -> Option<bool>;
}

impl<S: std::hash::BuildHasher> Valuation for HashMap<String, bool, S> {
    fn value(&self, atom: &str) -> Option<bool> {
        self.get(atom).copied()
    }
}

impl Valuation for BTreeMap<String, bool> {
    fn value(&self, atom: &str) -> Option<bool> {
        self.get(atom).copied()
    }
}

impl Valuation for [(&str, bool)] {
    fn value(&self, atom: &str) -> Option<bool> {
        self.iter().find(|(name, _)| *name == atom).map(|&(_, v)| v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom(name: &str) -> Node {
        Node::atom(name).unwrap()
    }

    fn env(pairs: &[(&str, bool)]) -> HashMap<String, bool> {
        pairs.iter().map(|&(k, v)| (k.to_string(), v)).collect()
    }

    #[test]
    fn test_atom_validation() {
        assert!(Node::atom("P_3").is_ok());
        assert_eq!(
            Node::atom("A"),
            Err(LexError::InvalidAtom("A".to_string()))
        );
        assert_eq!(
            Node::atom("Q_"),
            Err(LexError::InvalidAtom("Q_".to_string()))
        );
    }

    #[test]
    fn test_render_atom_and_not() {
        assert_eq!(atom("P").render(), "P");
        assert_eq!(Node::not(atom("P")).render(), "~P");
        assert_eq!(Node::not(Node::not(atom("Q_1"))).render(), "~~Q_1");
    }

    #[test]
    fn test_render_binary() {
        let tree = Node::binary(
            Connective::Implies,
            Node::binary(Connective::And, atom("P"), atom("Q")),
            Node::not(Node::binary(Connective::Equiv, atom("R"), atom("S"))),
        );
        assert_eq!(tree.render(), "((P&Q)->~(R<->S))");
    }

    #[test]
    fn test_evaluate_connectives() {
        let p_or_q = Node::binary(Connective::Or, atom("P"), atom("Q"));
        assert!(!p_or_q.evaluate(&env(&[("P", false), ("Q", false)])).unwrap());
        assert!(p_or_q.evaluate(&env(&[("P", false), ("Q", true)])).unwrap());

        let p_implies_q = Node::binary(Connective::Implies, atom("P"), atom("Q"));
        assert!(p_implies_q.evaluate(&env(&[("P", false), ("Q", false)])).unwrap());
        assert!(!p_implies_q.evaluate(&env(&[("P", true), ("Q", false)])).unwrap());

        let not_p = Node::not(atom("P"));
        assert!(not_p.evaluate(&env(&[("P", false)])).unwrap());
    }

    #[test]
    fn test_evaluate_missing_atom() {
        let tree = Node::binary(Connective::And, atom("P"), atom("Q"));
        assert_eq!(
            tree.evaluate(&env(&[("P", true)])),
            Err(EvalError::MissingAtom("Q".to_string()))
        );
    }

    #[test]
    fn test_evaluate_slice_valuation() {
        let tree = Node::binary(Connective::Equiv, atom("P"), atom("Q"));
        let pairs: &[(&str, bool)] = &[("P", true), ("Q", true)];
        assert!(tree.evaluate(pairs).unwrap());
    }

    #[test]
    fn test_atoms_and_depth() {
        let tree = Node::binary(
            Connective::Or,
            Node::binary(Connective::And, atom("Q"), atom("P")),
            Node::not(atom("P")),
        );
        let atoms: Vec<String> = tree.atoms().into_iter().collect();
        assert_eq!(atoms, vec!["P".to_string(), "Q".to_string()]);
        assert_eq!(tree.depth(), 3);
        assert_eq!(atom("P").depth(), 1);
    }
}
