mod problem;
mod render;
mod solution;

pub use problem::{
    Constraint, Method, ObjectiveType, ProblemError, ProblemSpec, Relation, DEFAULT_COEFFICIENT,
    DEFAULT_RHS, MAX_DIMENSION, MIN_DIMENSION,
};
pub use render::{
    format_value, render, render_iterations, GridRow, SolutionSummary, TableauGrid, NO_SOLUTION,
};
pub use solution::{variable_name, Iteration, SolveResult, TableauError};
