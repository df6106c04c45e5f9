//! Restaurant Agent - finds nearby restaurants and offers them as selectable options
//!
//! Each request is filtered against a locale's dataset, the matches are stored
//! under a fresh request id, and the caller gets either the options, a final
//! "no results" message, or an error. A booking workflow later resolves the
//! selected option through the session store.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{filter_restaurants, format_option, FilterCriteria, FilterValue, RestaurantProtocol};
pub use models::{CandidateRecord, CorrelationId, ResponseMessage, RestaurantRequest, UAgentResponse};
pub use services::{DatasetProvider, InMemoryDataset, ReplySlot, SessionStore, Transport};
