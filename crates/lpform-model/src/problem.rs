use std::fmt;
use std::str::FromStr;

use log::trace;
use thiserror::Error;

/// Smallest number of variables or constraints a form may hold
pub const MIN_DIMENSION: usize = 1;
/// Largest number of variables or constraints a form may hold
pub const MAX_DIMENSION: usize = 10;

/// Token placed in every freshly created coefficient cell
pub const DEFAULT_COEFFICIENT: &str = "1";
/// Token placed in the right-hand side of every freshly created constraint
pub const DEFAULT_RHS: &str = "10";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProblemError {
    #[error("Variable count {0} is outside 1..=10")]
    VariableCount(usize),
    #[error("Constraint count {0} is outside 1..=10")]
    ConstraintCount(usize),
    #[error("Objective has {found} coefficients, expected {expected}")]
    ObjectiveLength { expected: usize, found: usize },
    #[error("Constraint {index} has {found} coefficients, expected {expected}")]
    ConstraintLength {
        index: usize,
        expected: usize,
        found: usize,
    },
    #[error("Problem declares {declared} constraints but lists {found}")]
    ConstraintListLength { declared: usize, found: usize },
    #[error("Unknown objective type: {0}")]
    UnknownObjectiveType(String),
    #[error("Unknown relation: {0}")]
    UnknownRelation(String),
    #[error("Unknown method: {0}")]
    UnknownMethod(String),
}

/// Direction of the objective function
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObjectiveType {
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "max", alias = "maximize"))]
    Maximize,
    #[cfg_attr(feature = "serde", serde(rename = "min", alias = "minimize"))]
    Minimize,
}

impl ObjectiveType {
    /// Spelling used in solve requests
    pub fn as_wire(&self) -> &'static str {
        match self {
            ObjectiveType::Maximize => "max",
            ObjectiveType::Minimize => "min",
        }
    }
}

impl FromStr for ObjectiveType {
    type Err = ProblemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "max" | "maximize" => Ok(ObjectiveType::Maximize),
            "min" | "minimize" => Ok(ObjectiveType::Minimize),
            other => Err(ProblemError::UnknownObjectiveType(other.to_string())),
        }
    }
}

impl fmt::Display for ObjectiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectiveType::Maximize => write!(f, "maximize"),
            ObjectiveType::Minimize => write!(f, "minimize"),
        }
    }
}

/// Comparison between a constraint's left-hand side and its right-hand side
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Relation {
    /// Less than or equal (<=)
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "<=", alias = "≤"))]
    Le,
    /// Greater than or equal (>=)
    #[cfg_attr(feature = "serde", serde(rename = ">=", alias = "≥"))]
    Ge,
    /// Equal (=)
    #[cfg_attr(feature = "serde", serde(rename = "="))]
    Eq,
}

impl Relation {
    /// Spelling used in solve requests
    pub fn as_wire(&self) -> &'static str {
        match self {
            Relation::Le => "<=",
            Relation::Ge => ">=",
            Relation::Eq => "=",
        }
    }
}

impl FromStr for Relation {
    type Err = ProblemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "<=" | "≤" => Ok(Relation::Le),
            ">=" | "≥" => Ok(Relation::Ge),
            "=" | "==" => Ok(Relation::Eq),
            other => Err(ProblemError::UnknownRelation(other.to_string())),
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relation::Le => write!(f, "≤"),
            Relation::Ge => write!(f, "≥"),
            Relation::Eq => write!(f, "="),
        }
    }
}

/// Algorithm variant requested from the external solver
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "simplexe", alias = "simplex"))]
    Simplex,
    #[cfg_attr(feature = "serde", serde(rename = "deux-phases", alias = "two-phase"))]
    TwoPhaseSimplex,
    #[cfg_attr(feature = "serde", serde(rename = "big-m"))]
    BigM,
}

impl Method {
    /// Spelling used in solve requests
    pub fn as_wire(&self) -> &'static str {
        match self {
            Method::Simplex => "simplexe",
            Method::TwoPhaseSimplex => "deux-phases",
            Method::BigM => "big-m",
        }
    }
}

impl FromStr for Method {
    type Err = ProblemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "simplexe" | "simplex" => Ok(Method::Simplex),
            "deux-phases" | "two-phase" | "two-phase-simplex" => Ok(Method::TwoPhaseSimplex),
            "big-m" => Ok(Method::BigM),
            other => Err(ProblemError::UnknownMethod(other.to_string())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Simplex => write!(f, "simplex"),
            Method::TwoPhaseSimplex => write!(f, "two-phase simplex"),
            Method::BigM => write!(f, "big-M"),
        }
    }
}

/// One row of the constraint system; coefficients are raw user text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    pub coefficients: Vec<String>,
    pub relation: Relation,
    pub rhs: String,
}

impl Constraint {
    /// A fresh `1 x1 + ... + 1 xn <= 10` row
    pub fn with_width(num_variables: usize) -> Self {
        Self {
            coefficients: default_tokens(num_variables),
            relation: Relation::Le,
            rhs: DEFAULT_RHS.to_string(),
        }
    }
}

/// Immutable snapshot of a linear program as edited in a form.
///
/// Every edit returns a new snapshot. The objective and each constraint always
/// hold exactly `num_variables` coefficient tokens, and there are always
/// exactly `num_constraints` constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemSpec {
    num_variables: usize,
    objective: Vec<String>,
    objective_type: ObjectiveType,
    constraints: Vec<Constraint>,
    method: Method,
}

impl Default for ProblemSpec {
    fn default() -> Self {
        Self {
            num_variables: 2,
            objective: default_tokens(2),
            objective_type: ObjectiveType::default(),
            constraints: vec![Constraint::with_width(2), Constraint::with_width(2)],
            method: Method::default(),
        }
    }
}

impl ProblemSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a snapshot from already structured parts, checking every shape rule
    pub fn from_parts(
        objective: Vec<String>,
        objective_type: ObjectiveType,
        constraints: Vec<Constraint>,
        method: Method,
    ) -> Result<Self, ProblemError> {
        let num_variables = objective.len();
        if !in_range(num_variables) {
            return Err(ProblemError::VariableCount(num_variables));
        }
        if !in_range(constraints.len()) {
            return Err(ProblemError::ConstraintCount(constraints.len()));
        }
        for (index, c) in constraints.iter().enumerate() {
            if c.coefficients.len() != num_variables {
                return Err(ProblemError::ConstraintLength {
                    index,
                    expected: num_variables,
                    found: c.coefficients.len(),
                });
            }
        }
        Ok(Self {
            num_variables,
            objective,
            objective_type,
            constraints,
            method,
        })
    }

    pub fn num_variables(&self) -> usize {
        self.num_variables
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn objective(&self) -> &[String] {
        &self.objective
    }

    pub fn objective_type(&self) -> ObjectiveType {
        self.objective_type
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// Resize every coefficient row to `n` variables.
    ///
    /// Out-of-range counts return an unchanged copy. Existing tokens keep their
    /// positions; new trailing cells hold `"1"`.
    pub fn with_variable_count(&self, n: usize) -> Self {
        if !in_range(n) {
            trace!("ignoring variable count {}", n);
            return self.clone();
        }
        let mut next = self.clone();
        next.num_variables = n;
        resize_tokens(&mut next.objective, n);
        for c in &mut next.constraints {
            resize_tokens(&mut c.coefficients, n);
        }
        next
    }

    /// Grow or shrink the constraint list to `n` rows, keeping the leading rows intact
    pub fn with_constraint_count(&self, n: usize) -> Self {
        if !in_range(n) {
            trace!("ignoring constraint count {}", n);
            return self.clone();
        }
        let mut next = self.clone();
        let width = next.num_variables;
        let current = next.constraints.len();
        if n > current {
            next.constraints
                .extend((current..n).map(|_| Constraint::with_width(width)));
        } else {
            next.constraints.truncate(n);
        }
        next
    }

    pub fn with_objective_type(&self, objective_type: ObjectiveType) -> Self {
        Self {
            objective_type,
            ..self.clone()
        }
    }

    pub fn with_method(&self, method: Method) -> Self {
        Self {
            method,
            ..self.clone()
        }
    }

    pub fn with_objective_coefficient(&self, index: usize, token: impl Into<String>) -> Self {
        let mut next = self.clone();
        match next.objective.get_mut(index) {
            Some(cell) => *cell = token.into(),
            None => trace!("ignoring objective edit at {}", index),
        }
        next
    }

    pub fn with_constraint_coefficient(
        &self,
        constraint: usize,
        index: usize,
        token: impl Into<String>,
    ) -> Self {
        let mut next = self.clone();
        match next
            .constraints
            .get_mut(constraint)
            .and_then(|c| c.coefficients.get_mut(index))
        {
            Some(cell) => *cell = token.into(),
            None => trace!("ignoring coefficient edit at ({}, {})", constraint, index),
        }
        next
    }

    pub fn with_constraint_relation(&self, constraint: usize, relation: Relation) -> Self {
        let mut next = self.clone();
        match next.constraints.get_mut(constraint) {
            Some(c) => c.relation = relation,
            None => trace!("ignoring relation edit at {}", constraint),
        }
        next
    }

    pub fn with_constraint_rhs(&self, constraint: usize, token: impl Into<String>) -> Self {
        let mut next = self.clone();
        match next.constraints.get_mut(constraint) {
            Some(c) => c.rhs = token.into(),
            None => trace!("ignoring rhs edit at {}", constraint),
        }
        next
    }
}

fn in_range(n: usize) -> bool {
    (MIN_DIMENSION..=MAX_DIMENSION).contains(&n)
}

fn default_tokens(n: usize) -> Vec<String> {
    vec![DEFAULT_COEFFICIENT.to_string(); n]
}

fn resize_tokens(tokens: &mut Vec<String>, n: usize) {
    tokens.resize(n, DEFAULT_COEFFICIENT.to_string());
}
