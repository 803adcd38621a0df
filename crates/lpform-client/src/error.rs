use lpform_model::TableauError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SolveError {
    #[error("Solver request failed: {0}")]
    Transport(String),
    #[error("Solver responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid tableau in iteration {iteration}: {source}")]
    InvalidTableau {
        iteration: usize,
        #[source]
        source: TableauError,
    },
}

impl SolveError {
    /// The message shown to the user; every failure looks the same from outside
    pub fn notice(&self) -> Notice {
        Notice::transport_failure()
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("A solve request is already in flight")]
    InFlight,
}

/// A recoverable, user-visible failure report
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
    pub suggestions: Vec<String>,
}

impl Notice {
    pub fn transport_failure() -> Self {
        Self {
            title: "Solve failed".to_string(),
            message: "The solver could not handle the supplied problem. Check your inputs and try again."
                .to_string(),
            suggestions: [
                "Check that every constraint is fully defined",
                "Make sure the objective function is correctly formulated",
                "Check that every coefficient is a valid number",
                "Check that the system is not overdetermined",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", self.message)?;
        writeln!(f, "Suggestions:")?;
        for s in &self.suggestions {
            writeln!(f, "  - {}", s)?;
        }
        Ok(())
    }
}
