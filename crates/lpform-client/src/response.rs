//! Solver response normalization.
//!
//! Solver versions disagree on how `optimal_solution` is encoded: older ones
//! send a positional array, newer ones a `{"x1": ..}` object. Both decode to
//! the same [`SolveResult`].

use indexmap::IndexMap;
use lpform_model::{Iteration, SolveResult};
use serde::{Deserialize, Serialize};

use crate::error::SolveError;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum SolutionShape {
    /// Values by position; names are synthesized as `x1`, `x2`, ...
    Indexed(Vec<f64>),
    /// Values already keyed by variable name
    Named(IndexMap<String, f64>),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct IterationPayload {
    pub tableau: Vec<Vec<f64>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SolveResponse {
    pub optimal_solution: SolutionShape,
    #[serde(default)]
    pub optimal_value: Option<f64>,
    pub iterations: Vec<IterationPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl TryFrom<SolveResponse> for SolveResult {
    type Error = SolveError;

    fn try_from(response: SolveResponse) -> Result<Self, Self::Error> {
        let optimal_solution = match response.optimal_solution {
            SolutionShape::Indexed(values) => SolveResult::indexed(&values),
            SolutionShape::Named(map) => map,
        };

        let iterations = response
            .iterations
            .into_iter()
            .enumerate()
            .map(|(iteration, it)| {
                Iteration::new(it.tableau)
                    .map_err(|source| SolveError::InvalidTableau { iteration, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SolveResult {
            optimal_solution,
            optimal_value: response.optimal_value,
            iterations,
            status: response.status,
            message: response.message,
        })
    }
}

/// Canonical encoding: always the named shape
impl From<&SolveResult> for SolveResponse {
    fn from(result: &SolveResult) -> Self {
        Self {
            optimal_solution: SolutionShape::Named(result.optimal_solution.clone()),
            optimal_value: result.optimal_value,
            iterations: result
                .iterations
                .iter()
                .map(|it| IterationPayload {
                    tableau: it.tableau().to_vec(),
                })
                .collect(),
            status: result.status.clone(),
            message: result.message.clone(),
        }
    }
}

/// Parse and normalize a solver response body
pub fn decode_response(body: &str) -> Result<SolveResult, SolveError> {
    let response: SolveResponse = serde_json::from_str(body)?;
    SolveResult::try_from(response)
}

/// Serialize a result in the canonical response shape
pub fn encode_response(result: &SolveResult) -> Result<String, SolveError> {
    Ok(serde_json::to_string(&SolveResponse::from(result))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_shapes_normalize_identically() {
        let indexed = decode_response(
            r#"{"optimal_solution":[3.0,2.0],"optimal_value":-13.0,"iterations":[]}"#,
        )
        .unwrap();
        let named = decode_response(
            r#"{"optimal_solution":{"x1":3.0,"x2":2.0},"optimal_value":-13.0,"iterations":[]}"#,
        )
        .unwrap();

        assert_eq!(indexed, named);
        assert_eq!(indexed.optimal_solution["x1"], 3.0);
        assert_eq!(indexed.optimal_solution["x2"], 2.0);
    }

    #[test]
    fn test_named_keeps_solver_order() {
        let body = r#"{
            "optimal_solution": {"x1": 1, "x2": 2, "x10": 10, "x3": 3},
            "optimal_value": 0,
            "iterations": []
        }"#;
        let result = decode_response(body).unwrap();
        let names: Vec<_> = result.optimal_solution.keys().map(String::as_str).collect();
        assert_eq!(names, ["x1", "x2", "x10", "x3"]);
    }

    #[test]
    fn test_scenario_response() {
        let body = r#"{
            "status": "success",
            "message": "Solution found",
            "optimal_solution": {"x1": 10, "x2": 0},
            "optimal_value": -10,
            "iterations": [{"tableau": [[0, 0, 1, 10], [1, 1, 0, 10]]}]
        }"#;
        let result = decode_response(body).unwrap();

        assert_eq!(result.display_value(), Some(10.0));
        assert_eq!(result.iterations.len(), 1);
        assert_eq!(result.iterations[0].tableau()[1], vec![1.0, 1.0, 0.0, 10.0]);
        assert_eq!(result.status.as_deref(), Some("success"));
        assert_eq!(result.message.as_deref(), Some("Solution found"));
    }

    #[test]
    fn test_empty_solution_is_not_an_error() {
        let result = decode_response(
            r#"{"optimal_solution":{},"optimal_value":null,"iterations":[],"status":"unbounded"}"#,
        )
        .unwrap();
        assert!(!result.has_solution());
        assert_eq!(result.display_value(), None);
    }

    #[test]
    fn test_ragged_tableau_is_rejected() {
        let err = decode_response(
            r#"{"optimal_solution":[],"optimal_value":0,"iterations":[
                {"tableau":[[1,2,3]]},
                {"tableau":[[1,2,3],[4,5]]}
            ]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, SolveError::InvalidTableau { iteration: 1, .. }));
    }

    #[test]
    fn test_missing_fields_are_rejected() {
        assert!(matches!(decode_response("{}"), Err(SolveError::Json(_))));
        assert!(matches!(
            decode_response(r#"{"optimal_solution":"x1=3","iterations":[]}"#),
            Err(SolveError::Json(_))
        ));
    }

    #[test]
    fn test_encode_uses_named_shape() {
        let result = decode_response(
            r#"{"optimal_solution":[4.5],"optimal_value":-4.5,"iterations":[{"tableau":[[1,4.5]]}]}"#,
        )
        .unwrap();
        let text = encode_response(&result).unwrap();
        assert_eq!(
            text,
            r#"{"optimal_solution":{"x1":4.5},"optimal_value":-4.5,"iterations":[{"tableau":[[1.0,4.5]]}]}"#
        );
        assert_eq!(decode_response(&text).unwrap(), result);
    }
}
