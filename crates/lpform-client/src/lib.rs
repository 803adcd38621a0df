pub mod error;
pub mod gateway;
pub mod navigation;
pub mod request;
pub mod response;
pub mod session;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{Notice, SessionError, SolveError};
pub use gateway::{GatewayConfig, HttpReply, SolveGateway, Transport, DEFAULT_SOLVER_URL};
#[cfg(feature = "http")]
pub use gateway::HttpTransport;
pub use request::{ConstraintPayload, SolveRequest};
pub use response::{decode_response, encode_response, SolutionShape, SolveResponse};
pub use session::{FormSession, SubmitOutcome};
