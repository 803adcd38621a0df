use log::{debug, error, info};
use lpform_model::{ProblemSpec, SolveResult};

use crate::error::{Notice, SessionError, SolveError};
use crate::gateway::{SolveGateway, Transport};
use crate::navigation;
use crate::request::SolveRequest;

/// What the view should do once a submission settles
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Go to the results view at this URL
    Navigate(String),
    /// Stay on the form and show this notice
    Failed(Notice),
}

/// State of one problem form: the current snapshot, the single in-flight flag
/// and the last failure shown to the user
#[derive(Debug, Clone, Default)]
pub struct FormSession {
    problem: ProblemSpec,
    in_flight: bool,
    notice: Option<Notice>,
}

impl FormSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_problem(problem: ProblemSpec) -> Self {
        Self {
            problem,
            ..Self::default()
        }
    }

    pub fn problem(&self) -> &ProblemSpec {
        &self.problem
    }

    /// Replace the snapshot with `f(current)`
    pub fn edit(&mut self, f: impl FnOnce(&ProblemSpec) -> ProblemSpec) {
        self.problem = f(&self.problem);
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Claim the in-flight slot and produce the payload to send
    pub fn begin_submission(&mut self) -> Result<SolveRequest, SessionError> {
        if self.in_flight {
            return Err(SessionError::InFlight);
        }
        self.in_flight = true;
        self.notice = None;
        Ok(SolveRequest::from(&self.problem))
    }

    /// Release the in-flight slot and turn the solver's answer into a view transition
    pub fn complete_submission(&mut self, outcome: Result<SolveResult, SolveError>) -> SubmitOutcome {
        self.in_flight = false;
        match outcome.and_then(|result| navigation::results_url(&result)) {
            Ok(url) => {
                info!("solve succeeded, {} bytes of result data", url.len());
                SubmitOutcome::Navigate(url)
            }
            Err(e) => {
                error!("solve failed: {}", e);
                let notice = e.notice();
                self.notice = Some(notice.clone());
                SubmitOutcome::Failed(notice)
            }
        }
    }

    /// Submit synchronously through `gateway`
    pub fn submit<T: Transport>(
        &mut self,
        gateway: &SolveGateway<T>,
    ) -> Result<SubmitOutcome, SessionError> {
        let request = self.begin_submission()?;
        debug!(
            "submitting {}x{} problem",
            request.num_constraints, request.num_variables
        );
        let outcome = gateway.solve(&request);
        Ok(self.complete_submission(outcome))
    }
}
