use indexmap::IndexMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableauError {
    #[error("Tableau has no rows")]
    Empty,
    #[error("Tableau has {0} columns, at least 2 are required")]
    TooNarrow(usize),
    #[error("Tableau row {row} has {found} columns, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// One solver step: a rectangular tableau whose row 0 is the objective row
/// and whose last column is the right-hand side
#[derive(Debug, Clone, PartialEq)]
pub struct Iteration {
    tableau: Vec<Vec<f64>>,
}

impl Iteration {
    pub fn new(tableau: Vec<Vec<f64>>) -> Result<Self, TableauError> {
        let width = tableau.first().map(Vec::len).ok_or(TableauError::Empty)?;
        if width < 2 {
            return Err(TableauError::TooNarrow(width));
        }
        if let Some((row, r)) = tableau.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(TableauError::Ragged {
                row,
                expected: width,
                found: r.len(),
            });
        }
        Ok(Self { tableau })
    }

    pub fn tableau(&self) -> &[Vec<f64>] {
        &self.tableau
    }

    /// Number of columns, right-hand side included
    pub fn width(&self) -> usize {
        self.tableau[0].len()
    }

    pub fn height(&self) -> usize {
        self.tableau.len()
    }
}

/// Canonical form of a solver response
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SolveResult {
    /// Variable name to value, in the order the solver reported them
    pub optimal_solution: IndexMap<String, f64>,
    /// Objective value as reported by the solver (minimization form)
    pub optimal_value: Option<f64>,
    /// Tableaus in solve order
    pub iterations: Vec<Iteration>,
    /// Status string reported alongside the solution, if any
    pub status: Option<String>,
    /// Free-form solver message, if any
    pub message: Option<String>,
}

impl SolveResult {
    /// Builds the mapping for a solver that reports values by position
    pub fn indexed(values: &[f64]) -> IndexMap<String, f64> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| (variable_name(i), v))
            .collect()
    }

    pub fn has_solution(&self) -> bool {
        !self.optimal_solution.is_empty()
    }

    /// The objective value shown to the user.
    ///
    /// The solver reports a minimization-form value, so it is negated.
    pub fn display_value(&self) -> Option<f64> {
        self.optimal_value.map(|v| -1.0 * v)
    }
}

/// `x1`, `x2`, ... for zero-based column `index`
pub fn variable_name(index: usize) -> String {
    format!("x{}", index + 1)
}
