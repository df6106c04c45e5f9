use crate::core::{
    filters::{filter_restaurants, FilterCriteria},
    formatter::format_option,
};
use crate::models::{
    CorrelationId, RecordError, ResponseMessage, RestaurantOption, RestaurantRequest,
    UAgentResponse, NO_RESULTS_MESSAGE,
};
use crate::services::{DatasetProvider, SessionError, SessionStore, Transport, TransportError};
use std::sync::Arc;
use thiserror::Error;

/// Anything that can go wrong between receiving a request and responding
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error(transparent)]
    DataAccess(#[from] RecordError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Phases of one invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationPhase {
    Received,
    Filtering,
    Formatting,
    Storing,
    Responding,
    Failed,
}

/// Restaurant protocol handler
///
/// # Invocation
/// 1. Generate a correlation id
/// 2. Filter the dataset with the request's radius, amenity and cuisine
/// 3. Format every match into an option
/// 4. Store the offered options under the correlation id
/// 5. Respond with the options, the no-results message, or the error
///
/// Safe to share between concurrent invocations; the only shared mutable
/// state is the session store.
#[derive(Clone)]
pub struct RestaurantProtocol {
    dataset: Arc<dyn DatasetProvider>,
    sessions: Arc<SessionStore>,
}

impl RestaurantProtocol {
    pub fn new(dataset: Arc<dyn DatasetProvider>, sessions: Arc<SessionStore>) -> Self {
        Self { dataset, sessions }
    }

    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    pub fn dataset(&self) -> &Arc<dyn DatasetProvider> {
        &self.dataset
    }

    /// Handle one inbound message and send exactly one reply to `sender`
    pub async fn handle<T>(
        &self,
        transport: &T,
        sender: &str,
        request: RestaurantRequest,
    ) -> Result<(), TransportError>
    where
        T: Transport + ?Sized,
    {
        tracing::info!("Received message from {}.", sender);

        let response = self.respond(&request);
        transport.send(sender, UAgentResponse::from(response)).await
    }

    /// Run the invocation and build its response without sending it
    pub fn respond(&self, request: &RestaurantRequest) -> ResponseMessage {
        let correlation_id = CorrelationId::new();
        tracing::debug!(
            "{:?}: request {} at ({}, {}) radius={} amenity={:?} cuisine={:?}",
            InvocationPhase::Received,
            correlation_id,
            request.latitude,
            request.longitude,
            request.miles_radius,
            request.additional_amenities,
            request.cuisine_type,
        );

        let options = match self.offer_options(correlation_id, request) {
            Ok(options) => options,
            Err(e) => {
                tracing::debug!("{:?}: request {}", InvocationPhase::Failed, correlation_id);
                tracing::error!("{}", e);
                return ResponseMessage::Error {
                    message: e.to_string(),
                };
            }
        };

        tracing::debug!(
            "{:?}: request {} with {} options",
            InvocationPhase::Responding,
            correlation_id,
            options.len()
        );

        if options.is_empty() {
            ResponseMessage::Final {
                message: NO_RESULTS_MESSAGE.to_string(),
                correlation_id,
            }
        } else {
            ResponseMessage::OptionsToSelect {
                options,
                correlation_id,
            }
        }
    }

    /// Filter, format and store; nothing is stored unless every step succeeds
    fn offer_options(
        &self,
        correlation_id: CorrelationId,
        request: &RestaurantRequest,
    ) -> Result<Vec<RestaurantOption>, ProtocolError> {
        tracing::debug!("{:?}: request {}", InvocationPhase::Filtering, correlation_id);
        let criteria = FilterCriteria::from_request(request);
        let filtered = filter_restaurants(self.dataset.records(), &criteria)?;

        tracing::debug!(
            "{:?}: request {}, {} of {} candidates matched",
            InvocationPhase::Formatting,
            correlation_id,
            filtered.len(),
            self.dataset.records().len()
        );
        let options = filtered
            .into_iter()
            .enumerate()
            .map(|(index, record)| format_option(index, record))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("{:?}: request {}", InvocationPhase::Storing, correlation_id);
        let entry = options
            .iter()
            .map(|option| (option.index, option.description.clone()))
            .collect();
        self.sessions.put(correlation_id, entry)?;

        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CandidateRecord;
    use crate::services::InMemoryDataset;

    fn protocol(records: Vec<CandidateRecord>) -> RestaurantProtocol {
        RestaurantProtocol::new(
            Arc::new(InMemoryDataset::from_records("test", records)),
            Arc::new(SessionStore::new()),
        )
    }

    fn request(radius: f64, amenity: Option<&str>, cuisine: Option<&str>) -> RestaurantRequest {
        RestaurantRequest {
            latitude: 50.087,
            longitude: 14.421,
            miles_radius: radius,
            additional_amenities: amenity.map(str::to_string),
            cuisine_type: cuisine.map(str::to_string),
        }
    }

    #[test]
    fn test_options_are_stored_before_responding() {
        let protocol = protocol(vec![
            CandidateRecord::new("A", 1.0, "wifi", "italian"),
            CandidateRecord::new("B", 2.0, "wifi", "thai"),
        ]);

        let response = protocol.respond(&request(0.0, Some("wifi"), None));

        let (options, correlation_id) = match response {
            ResponseMessage::OptionsToSelect { options, correlation_id } => (options, correlation_id),
            other => panic!("expected options, got {:?}", other),
        };
        let stored = protocol.sessions().get(&correlation_id).unwrap().unwrap();

        assert_eq!(options.len(), 2);
        assert_eq!(stored.keys().copied().collect::<Vec<_>>(), vec![0, 1]);
        for option in &options {
            assert_eq!(stored[&option.index], option.description);
        }
    }

    #[test]
    fn test_format_failure_stores_nothing() {
        let protocol = protocol(vec![CandidateRecord {
            cuisine_type: None,
            ..CandidateRecord::new("A", 1.0, "wifi", "")
        }]);

        let response = protocol.respond(&request(0.0, None, None));

        assert_eq!(
            response,
            ResponseMessage::Error {
                message: "candidate record #0 is missing field 'cuisine_type'".to_string()
            }
        );
        assert_eq!(response.correlation_id(), None);
        assert!(protocol.sessions().is_empty().unwrap());
    }
}
