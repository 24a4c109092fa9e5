//! Resource limits for parsing and truth-table enumeration.

/// Largest atom count whose row indices fit in a `u64`.
pub const MAX_ENUMERABLE_ATOMS: usize = 63;

/// Resource limits for parsing and enumeration.
///
/// Parsing recurses once per nesting level, and a truth table over `n`
/// atoms has `2^n` rows. The default atom bound is only the hard
/// [`MAX_ENUMERABLE_ATOMS`] cap; callers handling untrusted input should
/// pass [`Limits::strict`] or their own bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum nesting depth of a sentence (groups and negations).
    pub max_depth: usize,
    /// Maximum number of distinct atoms across an inference.
    pub max_atoms: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: 1024,
            max_atoms: MAX_ENUMERABLE_ATOMS,
        }
    }
}

impl Limits {
    /// Create limits with custom values.
    pub fn new(max_depth: usize, max_atoms: usize) -> Self {
        Self {
            max_depth,
            max_atoms,
        }
    }

    /// Permissive limits for offline use.
    pub fn permissive() -> Self {
        Self {
            max_depth: 2048,
            max_atoms: MAX_ENUMERABLE_ATOMS,
        }
    }

    /// Strict limits for interactive use.
    pub fn strict() -> Self {
        Self {
            max_depth: 64,
            max_atoms: 12,
        }
    }

    /// Effective atom bound, never above [`MAX_ENUMERABLE_ATOMS`].
    pub fn atom_bound(&self) -> usize {
        self.max_atoms.min(MAX_ENUMERABLE_ATOMS)
    }
}
