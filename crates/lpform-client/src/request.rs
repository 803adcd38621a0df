use lpform_model::{
    Constraint, Method, ObjectiveType, ProblemError, ProblemSpec, Relation, MAX_DIMENSION,
    MIN_DIMENSION,
};
use serde::{Deserialize, Serialize};

/// Body of `POST /solve`. Coefficient tokens are forwarded exactly as typed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SolveRequest {
    pub num_variables: usize,
    pub num_constraints: usize,
    pub objective: Vec<String>,
    pub objective_type: ObjectiveType,
    pub constraints: Vec<ConstraintPayload>,
    pub method: Method,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ConstraintPayload {
    pub coefficients: Vec<String>,
    #[serde(rename = "type")]
    pub relation: Relation,
    pub rhs: String,
}

impl SolveRequest {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

impl From<&ProblemSpec> for SolveRequest {
    fn from(spec: &ProblemSpec) -> Self {
        Self {
            num_variables: spec.num_variables(),
            num_constraints: spec.num_constraints(),
            objective: spec.objective().to_vec(),
            objective_type: spec.objective_type(),
            constraints: spec
                .constraints()
                .iter()
                .map(|c| ConstraintPayload {
                    coefficients: c.coefficients.clone(),
                    relation: c.relation,
                    rhs: c.rhs.clone(),
                })
                .collect(),
            method: spec.method(),
        }
    }
}

impl TryFrom<SolveRequest> for ProblemSpec {
    type Error = ProblemError;

    fn try_from(request: SolveRequest) -> Result<Self, Self::Error> {
        let range = MIN_DIMENSION..=MAX_DIMENSION;
        if !range.contains(&request.num_variables) {
            return Err(ProblemError::VariableCount(request.num_variables));
        }
        if !range.contains(&request.num_constraints) {
            return Err(ProblemError::ConstraintCount(request.num_constraints));
        }
        if request.objective.len() != request.num_variables {
            return Err(ProblemError::ObjectiveLength {
                expected: request.num_variables,
                found: request.objective.len(),
            });
        }
        if request.constraints.len() != request.num_constraints {
            return Err(ProblemError::ConstraintListLength {
                declared: request.num_constraints,
                found: request.constraints.len(),
            });
        }

        let constraints = request
            .constraints
            .into_iter()
            .map(|c| Constraint {
                coefficients: c.coefficients,
                relation: c.relation,
                rhs: c.rhs,
            })
            .collect();
        ProblemSpec::from_parts(
            request.objective,
            request.objective_type,
            constraints,
            request.method,
        )
    }
}
