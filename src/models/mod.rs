// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{CandidateRecord, CorrelationId, RecordError, RestaurantOption};
pub use requests::{RestaurantEnvelope, RestaurantRequest};
pub use responses::{
    ErrorResponse, HealthResponse, KeyValue, ResponseMessage, SelectionResponse, SessionResponse,
    UAgentResponse, UAgentResponseType, NO_RESULTS_MESSAGE,
};
