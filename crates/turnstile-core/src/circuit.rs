//! Sentence trees lowered to gate lists over truth-table columns.
//!
//! Atom lookups are resolved to column indices once, when the circuit is
//! compiled, so evaluating a row cannot fail. Gates are stored in
//! topological order and every source refers to an earlier gate.

use crate::ast::Node;
use crate::error::EvalError;
use crate::token::Connective;

/// Operand of a gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    /// Truth-table column (atom position in sorted order).
    Column(usize),
    /// Output of an earlier gate.
    Gate(usize),
}

/// A single gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Not(Source),
    Binary(Connective, Source, Source),
}

/// A compiled sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Circuit {
    columns: usize,
    gates: Vec<Gate>,
    output: Source,
}

impl Circuit {
    /// Lower `tree` against the sorted column names.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::MissingAtom`] if the tree names an atom that
    /// has no column.
    pub fn compile(tree: &Node, columns: &[String]) -> Result<Self, EvalError> {
        let mut gates = Vec::new();
        let output = lower(tree, columns, &mut gates)?;
        Ok(Self {
            columns: columns.len(),
            gates,
            output,
        })
    }

    /// Number of gates (excluding columns).
    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }

    /// Number of columns the circuit reads.
    pub fn column_count(&self) -> usize {
        self.columns
    }

    /// Evaluate on row `row` of the table: column `j` is bit
    /// `columns - 1 - j` of `row`.
    pub fn eval_row(&self, row: u64) -> bool {
        let mut values = Vec::with_capacity(self.gates.len());
        for gate in &self.gates {
            let value = match *gate {
                Gate::Not(src) => !self.resolve(src, row, &values),
                Gate::Binary(op, left, right) => op.eval(
                    self.resolve(left, row, &values),
                    self.resolve(right, row, &values),
                ),
            };
            values.push(value);
        }
        self.resolve(self.output, row, &values)
    }

    fn resolve(&self, source: Source, row: u64, values: &[bool]) -> bool {
        match source {
            Source::Column(j) => column_value(row, self.columns, j),
            Source::Gate(g) => values[g],
        }
    }
}

/// Value of column `j` in row `row` of an `n`-column table.
pub fn column_value(row: u64, n: usize, j: usize) -> bool {
    (row >> (n - 1 - j)) & 1 == 1
}

fn lower(node: &Node, columns: &[String], gates: &mut Vec<Gate>) -> Result<Source, EvalError> {
    let gate = match node {
        Node::Atom(name) => {
            return columns
                .binary_search(name)
                .map(Source::Column)
                .map_err(|_| EvalError::MissingAtom(name.clone()));
        }
        Node::Not(child) => Gate::Not(lower(child, columns, gates)?),
        Node::And(l, r) => binary(Connective::And, l, r, columns, gates)?,
        Node::Or(l, r) => binary(Connective::Or, l, r, columns, gates)?,
        Node::Implies(l, r) => binary(Connective::Implies, l, r, columns, gates)?,
        Node::Equivalence(l, r) => binary(Connective::Equiv, l, r, columns, gates)?,
    };
    gates.push(gate);
    Ok(Source::Gate(gates.len() - 1))
}

fn binary(
    op: Connective,
    left: &Node,
    right: &Node,
    columns: &[String],
    gates: &mut Vec<Gate>,
) -> Result<Gate, EvalError> {
    let left = lower(left, columns, gates)?;
    let right = lower(right, columns, gates)?;
    Ok(Gate::Binary(op, left, right))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::Formula;

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_single_atom() {
        let tree = Formula::parse("Q").unwrap().tree().clone();
        let circuit = Circuit::compile(&tree, &columns(&["P", "Q"])).unwrap();
        assert_eq!(circuit.gate_count(), 0);
        // Q is the low bit.
        assert!(!circuit.eval_row(0b00));
        assert!(circuit.eval_row(0b01));
        assert!(!circuit.eval_row(0b10));
        assert!(circuit.eval_row(0b11));
    }

    #[test]
    fn test_gates_in_topological_order() {
        let tree = Formula::parse("~(P→Q)").unwrap().tree().clone();
        let circuit = Circuit::compile(&tree, &columns(&["P", "Q"])).unwrap();
        assert_eq!(circuit.gate_count(), 2);
        assert_eq!(
            circuit.gates[0],
            Gate::Binary(Connective::Implies, Source::Column(0), Source::Column(1))
        );
        assert_eq!(circuit.gates[1], Gate::Not(Source::Gate(0)));
        assert_eq!(circuit.output, Source::Gate(1));
    }

    #[test]
    fn test_matches_tree_evaluation() {
        let tree = Formula::parse("(P↔R)∨~Q").unwrap().tree().clone();
        let cols = columns(&["P", "Q", "R"]);
        let circuit = Circuit::compile(&tree, &cols).unwrap();
        for row in 0..8u64 {
            let env: std::collections::BTreeMap<String, bool> = cols
                .iter()
                .enumerate()
                .map(|(j, name)| (name.clone(), column_value(row, 3, j)))
                .collect();
            assert_eq!(circuit.eval_row(row), tree.evaluate(&env).unwrap(), "row {}", row);
        }
    }

    #[test]
    fn test_missing_column() {
        let tree = Formula::parse("P∧S").unwrap().tree().clone();
        assert_eq!(
            Circuit::compile(&tree, &columns(&["P", "Q"])),
            Err(EvalError::MissingAtom("S".to_string()))
        );
    }
}
