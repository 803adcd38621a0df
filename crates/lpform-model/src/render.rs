use std::fmt;

use crate::solution::{variable_name, Iteration, SolveResult};

/// Shown in place of variable values when the solver returned none
pub const NO_SOLUTION: &str = "no solution found";

/// Format a value the way every tableau cell and result value is shown:
/// 4 fractional digits, exact ties rounded away from zero.
pub fn format_value(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    // An f64 near a 4-digit tie but not on it differs from it by far more than
    // 1e-30, so the 5th digit of this expansion decides the rounding.
    let text = format!("{:.30}", value.abs());
    let (int_part, frac) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let mut digits: Vec<u8> = int_part.bytes().chain(frac.bytes().take(4)).collect();

    if frac.as_bytes().get(4).is_some_and(|&d| d >= b'5') {
        let mut carry = true;
        for d in digits.iter_mut().rev() {
            if *d == b'9' {
                *d = b'0';
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let (int_digits, frac_digits) = digits.split_at(digits.len() - 4);
    // -0.0 is not below zero, so it prints unsigned
    let sign = if value < 0.0 { "-" } else { "" };
    format!(
        "{}{}.{}",
        sign,
        int_digits.iter().map(|&d| char::from(d)).collect::<String>(),
        frac_digits.iter().map(|&d| char::from(d)).collect::<String>()
    )
}

/// A labeled tableau ready for display
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableauGrid {
    /// `Iteration N`, one-based
    pub title: String,
    /// `Base`, `x1`..`x(width-1)`, `RHS`
    pub header: Vec<String>,
    pub rows: Vec<GridRow>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRow {
    /// `Z` for the objective row, `s1`, `s2`, ... below it
    pub label: String,
    pub cells: Vec<String>,
}

impl GridRow {
    /// Label followed by the cells, in header order
    pub fn to_vec(&self) -> Vec<String> {
        std::iter::once(self.label.clone())
            .chain(self.cells.iter().cloned())
            .collect()
    }
}

/// Render the `index`-th (zero-based) iteration of a solve.
///
/// Row labels are positional: the objective row is `Z` and row `r` is `s{r}`
/// whatever variable is actually basic there.
pub fn render(iteration: &Iteration, index: usize) -> TableauGrid {
    let width = iteration.width();

    let mut header = Vec::with_capacity(width + 1);
    header.push("Base".to_string());
    header.extend((0..width - 1).map(variable_name));
    header.push("RHS".to_string());

    let rows = iteration
        .tableau()
        .iter()
        .enumerate()
        .map(|(r, row)| GridRow {
            label: if r == 0 { "Z".to_string() } else { format!("s{}", r) },
            cells: row.iter().map(|&v| format_value(v)).collect(),
        })
        .collect();

    TableauGrid {
        title: format!("Iteration {}", index + 1),
        header,
        rows,
    }
}

/// Render every iteration of a result in solve order
pub fn render_iterations(result: &SolveResult) -> Vec<TableauGrid> {
    result
        .iterations
        .iter()
        .enumerate()
        .map(|(i, it)| render(it, i))
        .collect()
}

impl fmt::Display for TableauGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<Vec<String>> = std::iter::once(self.header.clone())
            .chain(self.rows.iter().map(GridRow::to_vec))
            .collect();

        let mut widths = vec![0; self.header.len()];
        for line in &lines {
            for (w, cell) in widths.iter_mut().zip(line) {
                *w = (*w).max(cell.chars().count());
            }
        }

        writeln!(f, "{}", self.title)?;
        for line in &lines {
            let padded: Vec<String> = line
                .iter()
                .zip(&widths)
                .map(|(cell, &w)| format!("{:>w$}", cell, w = w))
                .collect();
            writeln!(f, "  {}", padded.join("  ").trim_end())?;
        }
        Ok(())
    }
}

/// User-facing view of the optimal solution and value
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionSummary {
    /// `(name, formatted value)` pairs; empty when no solution was found
    pub variables: Vec<(String, String)>,
    /// Sign-normalized optimal value, absent when the solver gave none
    pub optimal_value: Option<String>,
    pub status: Option<String>,
    pub message: Option<String>,
}

impl SolutionSummary {
    pub fn new(result: &SolveResult) -> Self {
        Self {
            variables: result
                .optimal_solution
                .iter()
                .map(|(name, &v)| (name.clone(), format_value(v)))
                .collect(),
            optimal_value: result.display_value().map(format_value),
            status: result.status.clone(),
            message: result.message.clone(),
        }
    }
}

impl fmt::Display for SolutionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(message) = &self.message {
            writeln!(f, "{}", message)?;
        }
        writeln!(f, "Optimal solution:")?;
        if self.variables.is_empty() {
            writeln!(f, "  {}", NO_SOLUTION)?;
        }
        for (name, value) in &self.variables {
            writeln!(f, "  {} = {}", name, value)?;
        }
        match (&self.optimal_value, &self.status) {
            (Some(value), _) => writeln!(f, "Optimal value: {}", value),
            (None, Some(status)) => writeln!(f, "Optimal value: none ({})", status),
            (None, None) => writeln!(f, "Optimal value: none"),
        }
    }
}
