//! Truth-table enumeration and semantic validity.
//!
//! An inference over `n` distinct atoms has a table of `2^n` rows. Atoms
//! are sorted by name; in row `i`, atom `j` is true iff bit `n - 1 - j`
//! of `i` is set, so the first atom is the most significant bit and row
//! 0 assigns false to every atom.

use std::cell::OnceCell;
use std::collections::{BTreeMap, BTreeSet};

use log::{debug, trace};

use crate::circuit::{column_value, Circuit};
use crate::error::InferenceError;
use crate::formula::Formula;
use crate::limits::Limits;

/// One assignment and the resulting truth values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    index: u64,
    assignment: BTreeMap<String, bool>,
    premises: Vec<bool>,
    conclusion: bool,
}

impl Row {
    /// Position of the row in the table.
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Value of every atom, keyed by name.
    pub fn assignment(&self) -> &BTreeMap<String, bool> {
        &self.assignment
    }

    /// Value assigned to `atom`.
    pub fn value(&self, atom: &str) -> Option<bool> {
        self.assignment.get(atom).copied()
    }

    /// Value of the premise at `index`.
    pub fn premise(&self, index: usize) -> Option<bool> {
        self.premises.get(index).copied()
    }

    /// Values of all premises, by position.
    pub fn premises(&self) -> &[bool] {
        &self.premises
    }

    /// Value of the conclusion.
    pub fn conclusion(&self) -> bool {
        self.conclusion
    }

    /// Whether every premise is true. Vacuously true with no premises.
    pub fn all_premises_true(&self) -> bool {
        self.premises.iter().all(|&p| p)
    }

    /// Whether the premises hold and the conclusion does not.
    pub fn is_counterexample(&self) -> bool {
        self.all_premises_true() && !self.conclusion
    }
}

/// Premises and a conclusion, with a lazily built truth table.
#[derive(Debug, Clone)]
pub struct Inference {
    premises: Vec<Formula>,
    conclusion: Formula,
    atoms: Vec<String>,
    premise_circuits: Vec<Circuit>,
    conclusion_circuit: Circuit,
    table: OnceCell<Vec<Row>>,
    valid: OnceCell<bool>,
}

impl Inference {
    /// Create an inference with default limits.
    pub fn new(premises: Vec<Formula>, conclusion: Formula) -> Result<Self, InferenceError> {
        Self::with_limits(premises, conclusion, Limits::default())
    }

    /// Create an inference with custom limits.
    ///
    /// # Errors
    ///
    /// - [`InferenceError::IllFormedPremise`] / [`InferenceError::IllFormedConclusion`]
    ///   if a sentence is not well-formed
    /// - [`InferenceError::TooManyAtoms`] if the combined atom set exceeds
    ///   the enumeration bound
    pub fn with_limits(
        premises: Vec<Formula>,
        conclusion: Formula,
        limits: Limits,
    ) -> Result<Self, InferenceError> {
        if let Some((index, premise)) = premises
            .iter()
            .enumerate()
            .find(|(_, p)| !p.is_well_formed())
        {
            return Err(InferenceError::IllFormedPremise {
                index,
                sentence: premise.input().to_string(),
                source: None,
            });
        }
        if !conclusion.is_well_formed() {
            return Err(InferenceError::IllFormedConclusion {
                sentence: conclusion.input().to_string(),
                source: None,
            });
        }

        let mut atoms = BTreeSet::new();
        for formula in premises.iter().chain(std::iter::once(&conclusion)) {
            atoms.extend(formula.atoms());
        }
        let max = limits.atom_bound();
        if atoms.len() > max {
            return Err(InferenceError::TooManyAtoms {
                count: atoms.len(),
                max,
            });
        }

        let atoms: Vec<String> = atoms.into_iter().collect();
        let premise_circuits = premises
            .iter()
            .map(|p| Circuit::compile(p.tree(), &atoms))
            .collect::<Result<Vec<_>, _>>()?;
        let conclusion_circuit = Circuit::compile(conclusion.tree(), &atoms)?;

        Ok(Self {
            premises,
            conclusion,
            atoms,
            premise_circuits,
            conclusion_circuit,
            table: OnceCell::new(),
            valid: OnceCell::new(),
        })
    }

    /// Parse every sentence, then build the inference.
    ///
    /// # Errors
    ///
    /// Names the first sentence that fails to parse, carrying its
    /// [`FormulaError`](crate::FormulaError).
    pub fn from_sentences(premises: &[&str], conclusion: &str) -> Result<Self, InferenceError> {
        let premises = premises
            .iter()
            .enumerate()
            .map(|(index, &sentence)| {
                Formula::parse(sentence).map_err(|e| InferenceError::IllFormedPremise {
                    index,
                    sentence: sentence.to_string(),
                    source: Some(e),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let conclusion =
            Formula::parse(conclusion).map_err(|e| InferenceError::IllFormedConclusion {
                sentence: conclusion.to_string(),
                source: Some(e),
            })?;
        Self::new(premises, conclusion)
    }

    /// The premises, in order.
    pub fn premises(&self) -> &[Formula] {
        &self.premises
    }

    /// The conclusion.
    pub fn conclusion(&self) -> &Formula {
        &self.conclusion
    }

    /// Every atom in the premises and conclusion.
    pub fn all_atoms(&self) -> BTreeSet<String> {
        self.atoms.iter().cloned().collect()
    }

    /// Atoms in table column order.
    pub fn sorted_atoms(&self) -> &[String] {
        &self.atoms
    }

    /// Number of rows in the table: `2^n`.
    pub fn row_count(&self) -> u64 {
        1u64 << self.atoms.len()
    }

    /// Iterate rows in table order without materializing the table.
    ///
    /// Each call starts a fresh enumeration.
    pub fn rows(&self) -> Rows<'_> {
        Rows {
            inference: self,
            next: 0,
            end: self.row_count(),
        }
    }

    /// The full truth table, built on first call.
    pub fn truth_table(&self) -> &[Row] {
        self.table.get_or_init(|| {
            debug!(
                "generating {} rows over atoms {:?}",
                self.row_count(),
                self.atoms
            );
            self.rows().collect()
        })
    }

    /// Whether every row that makes all premises true makes the
    /// conclusion true.
    pub fn is_valid(&self) -> bool {
        *self.valid.get_or_init(|| {
            let valid = !self.truth_table().iter().any(Row::is_counterexample);
            debug!("inference {} valid: {}", self, valid);
            valid
        })
    }

    /// First row, in table order, where all premises are true and the
    /// conclusion is false.
    pub fn counterexample(&self) -> Option<&Row> {
        self.truth_table().iter().find(|row| row.is_counterexample())
    }

    /// Build row `index`.
    fn row(&self, index: u64) -> Row {
        let n = self.atoms.len();
        let assignment: BTreeMap<String, bool> = self
            .atoms
            .iter()
            .enumerate()
            .map(|(j, atom)| (atom.clone(), column_value(index, n, j)))
            .collect();
        let premises: Vec<bool> = self
            .premise_circuits
            .iter()
            .map(|c| c.eval_row(index))
            .collect();
        let conclusion = self.conclusion_circuit.eval_row(index);
        trace!(
            "row {}: {:?} premises={:?} conclusion={}",
            index,
            assignment,
            premises,
            conclusion
        );
        Row {
            index,
            assignment,
            premises,
            conclusion,
        }
    }
}

impl std::fmt::Display for Inference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, premise) in self.premises.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", premise)?;
        }
        write!(f, " ⊢ {}", self.conclusion)
    }
}

/// Lazy iterator over an inference's rows, in table order.
#[derive(Debug, Clone)]
pub struct Rows<'a> {
    inference: &'a Inference,
    next: u64,
    end: u64,
}

impl Iterator for Rows<'_> {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        if self.next >= self.end {
            return None;
        }
        let row = self.inference.row(self.next);
        self.next += 1;
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.end - self.next).ok();
        (remaining.unwrap_or(usize::MAX), remaining)
    }
}
