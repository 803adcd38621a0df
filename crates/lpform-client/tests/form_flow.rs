use std::cell::RefCell;

use lpform_client::{
    navigation, FormSession, GatewayConfig, HttpReply, SolveError, SolveGateway, SubmitOutcome,
    Transport,
};
use lpform_model::{render_iterations, ObjectiveType, Relation, SolutionSummary};
use serde_json::{json, Value};

/// Stands in for the solving service: remembers the request, answers with `reply`
struct FakeSolver {
    reply: Value,
    seen: RefCell<Option<Value>>,
}

impl Transport for &FakeSolver {
    fn post_json(&self, url: &str, body: &str) -> Result<HttpReply, SolveError> {
        assert_eq!(url, "http://solver.test/solve");
        *self.seen.borrow_mut() = Some(serde_json::from_str(body)?);
        Ok(HttpReply {
            status: 200,
            body: self.reply.to_string(),
        })
    }
}

fn solve_and_follow(session: &mut FormSession, solver: &FakeSolver) -> lpform_model::SolveResult {
    let gateway = SolveGateway::new(GatewayConfig::new("http://solver.test"), solver);
    match session.submit(&gateway).unwrap() {
        SubmitOutcome::Navigate(url) => navigation::decode_url(&url).expect("results decode"),
        SubmitOutcome::Failed(notice) => panic!("solve failed: {}", notice),
    }
}

#[test]
fn maximize_single_constraint() {
    let solver = FakeSolver {
        reply: json!({
            "optimal_solution": {"x1": 10, "x2": 0},
            "optimal_value": -10,
            "iterations": [{"tableau": [[0, 0, 1, 10], [1, 1, 0, 10]]}]
        }),
        seen: RefCell::new(None),
    };

    let mut session = FormSession::new();
    session.edit(|p| p.with_constraint_count(1));
    let result = solve_and_follow(&mut session, &solver);

    let sent = solver.seen.borrow().clone().unwrap();
    assert_eq!(sent["numVariables"], 2);
    assert_eq!(sent["numConstraints"], 1);
    assert_eq!(sent["objectiveType"], "max");
    assert_eq!(sent["method"], "simplexe");

    let summary = SolutionSummary::new(&result);
    assert_eq!(summary.optimal_value.as_deref(), Some("10.0000"));

    let grids = render_iterations(&result);
    assert_eq!(grids.len(), 1);
    assert_eq!(grids[0].header, ["Base", "x1", "x2", "x3", "RHS"]);
    assert_eq!(
        grids[0].rows[0].to_vec(),
        ["Z", "0.0000", "0.0000", "1.0000", "10.0000"]
    );
}

#[test]
fn indexed_solver_with_resized_form() {
    let solver = FakeSolver {
        reply: json!({
            "optimal_solution": [1.5, 0, 2],
            "optimal_value": 7.5,
            "iterations": [
                {"tableau": [[1, 2, 3, 0, 0, 0, 0], [1, 1, 1, 1, 0, 0, 4], [2, 0, 1, 0, 1, 0, 5], [0, 1, 1, 0, 0, 1, 2]]},
                {"tableau": [[0, 1, 0, 0, 0, 1, 7.5], [1, 0, 0, 1, 0, 0, 1.5], [0, 0, 1, 0, 1, 0, 2], [0, 1, 0, 0, 0, 1, 0]]}
            ]
        }),
        seen: RefCell::new(None),
    };

    let mut session = FormSession::new();
    session.edit(|p| {
        p.with_variable_count(3)
            .with_constraint_count(3)
            .with_objective_type(ObjectiveType::Minimize)
            .with_constraint_relation(2, Relation::Ge)
            .with_constraint_coefficient(1, 2, "0.5")
    });
    let result = solve_and_follow(&mut session, &solver);

    let sent = solver.seen.borrow().clone().unwrap();
    assert_eq!(sent["constraints"][1]["coefficients"], json!(["1", "1", "0.5"]));
    assert_eq!(sent["constraints"][2]["type"], ">=");
    assert_eq!(sent["objective"], json!(["1", "1", "1"]));

    let names: Vec<_> = result.optimal_solution.keys().cloned().collect();
    assert_eq!(names, ["x1", "x2", "x3"]);
    assert_eq!(result.display_value(), Some(-7.5));

    let grids = render_iterations(&result);
    assert_eq!(grids[1].title, "Iteration 2");
    let labels: Vec<_> = grids[1].rows.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, ["Z", "s1", "s2", "s3"]);
    assert_eq!(grids[1].header.len(), 8);
}

#[test]
fn empty_solution_renders_placeholder() {
    let solver = FakeSolver {
        reply: json!({
            "optimal_solution": {},
            "optimal_value": null,
            "iterations": [],
            "status": "infeasible"
        }),
        seen: RefCell::new(None),
    };

    let mut session = FormSession::new();
    session.edit(|p| p.with_method(lpform_model::Method::BigM));
    let result = solve_and_follow(&mut session, &solver);

    let text = SolutionSummary::new(&result).to_string();
    assert!(text.contains(lpform_model::NO_SOLUTION));
    assert!(render_iterations(&result).is_empty());
}
