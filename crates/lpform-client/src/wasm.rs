//! WASM bindings for lpform
//!
//! The browser front end keeps its problem as a plain JSON object in the
//! solve-request shape. Every edit goes through these functions and returns a
//! new object, so the form never holds an inconsistent problem. The browser
//! performs the `fetch` itself and hands the body back to
//! [`results_url`].

use std::fmt::Display;

use wasm_bindgen::prelude::*;

use crate::error::Notice;
use crate::navigation;
use crate::request::SolveRequest;
use crate::response::decode_response;
use lpform_model::{render_iterations, ProblemSpec, Relation, SolutionSummary, TableauGrid};

fn js_error(e: impl Display) -> JsValue {
    js_sys::Error::new(&e.to_string()).into()
}

fn from_js(problem: JsValue) -> Result<ProblemSpec, JsValue> {
    let request: SolveRequest = serde_wasm_bindgen::from_value(problem).map_err(js_error)?;
    ProblemSpec::try_from(request).map_err(js_error)
}

fn to_js(problem: &ProblemSpec) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&SolveRequest::from(problem)).map_err(js_error)
}

/// A fresh 2-variable, 2-constraint problem
#[wasm_bindgen]
pub fn default_problem() -> Result<JsValue, JsValue> {
    to_js(&ProblemSpec::new())
}

#[wasm_bindgen]
pub fn set_variable_count(problem: JsValue, n: usize) -> Result<JsValue, JsValue> {
    to_js(&from_js(problem)?.with_variable_count(n))
}

#[wasm_bindgen]
pub fn set_constraint_count(problem: JsValue, n: usize) -> Result<JsValue, JsValue> {
    to_js(&from_js(problem)?.with_constraint_count(n))
}

#[wasm_bindgen]
pub fn set_objective_coefficient(problem: JsValue, index: usize, token: String) -> Result<JsValue, JsValue> {
    to_js(&from_js(problem)?.with_objective_coefficient(index, token))
}

#[wasm_bindgen]
pub fn set_constraint_coefficient(
    problem: JsValue,
    constraint: usize,
    index: usize,
    token: String,
) -> Result<JsValue, JsValue> {
    to_js(&from_js(problem)?.with_constraint_coefficient(constraint, index, token))
}

#[wasm_bindgen]
pub fn set_constraint_relation(problem: JsValue, constraint: usize, relation: &str) -> Result<JsValue, JsValue> {
    let relation: Relation = relation.parse().map_err(js_error)?;
    to_js(&from_js(problem)?.with_constraint_relation(constraint, relation))
}

#[wasm_bindgen]
pub fn set_constraint_rhs(problem: JsValue, constraint: usize, token: String) -> Result<JsValue, JsValue> {
    to_js(&from_js(problem)?.with_constraint_rhs(constraint, token))
}

/// JSON body for `POST /solve`
#[wasm_bindgen]
pub fn request_body(problem: JsValue) -> Result<String, JsValue> {
    SolveRequest::from(&from_js(problem)?).to_json().map_err(js_error)
}

/// Normalize a successful solver body and build the results-view URL
#[wasm_bindgen]
pub fn results_url(body: &str) -> Result<String, JsValue> {
    let result = decode_response(body).map_err(js_error)?;
    navigation::results_url(&result).map_err(js_error)
}

/// Message and suggestions for a failed solve
#[wasm_bindgen]
pub fn failure_notice() -> JsValue {
    serde_wasm_bindgen::to_value(&Notice::transport_failure()).unwrap_or(JsValue::NULL)
}

#[derive(serde::Serialize)]
struct ResultsView {
    summary: SolutionSummary,
    iterations: Vec<TableauGrid>,
}

/// Decode the `data` parameter into a renderable view, or `null` when there
/// is nothing to show
#[wasm_bindgen]
pub fn load_results(data: &str) -> JsValue {
    let Some(result) = navigation::decode(data) else {
        return JsValue::NULL;
    };
    let view = ResultsView {
        summary: SolutionSummary::new(&result),
        iterations: render_iterations(&result),
    };
    serde_wasm_bindgen::to_value(&view).unwrap_or(JsValue::NULL)
}
