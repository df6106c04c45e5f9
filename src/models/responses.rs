use serde::{Deserialize, Serialize};
use crate::models::domain::{CorrelationId, RestaurantOption};

/// Message sent back when nothing matched
pub const NO_RESULTS_MESSAGE: &str = "No restaurant are available for this context";

/// Outcome of one invocation of the restaurant protocol
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseMessage {
    OptionsToSelect {
        options: Vec<RestaurantOption>,
        correlation_id: CorrelationId,
    },
    Final {
        message: String,
        correlation_id: CorrelationId,
    },
    /// Carries no correlation id, even when one was generated before the failure
    Error { message: String },
}

impl ResponseMessage {
    pub fn correlation_id(&self) -> Option<CorrelationId> {
        match self {
            Self::OptionsToSelect { correlation_id, .. } | Self::Final { correlation_id, .. } => {
                Some(*correlation_id)
            }
            Self::Error { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UAgentResponseType {
    SelectFromOptions,
    Final,
    Error,
}

/// Selectable entry on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyValue {
    pub key: usize,
    pub value: String,
}

impl From<RestaurantOption> for KeyValue {
    fn from(option: RestaurantOption) -> Self {
        Self {
            key: option.index,
            value: option.description,
        }
    }
}

/// Outbound `UAgentResponse` message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UAgentResponse {
    #[serde(rename = "type")]
    pub response_type: UAgentResponseType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<KeyValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl From<ResponseMessage> for UAgentResponse {
    fn from(response: ResponseMessage) -> Self {
        match response {
            ResponseMessage::OptionsToSelect {
                options,
                correlation_id,
            } => Self {
                response_type: UAgentResponseType::SelectFromOptions,
                options: Some(options.into_iter().map(KeyValue::from).collect()),
                message: None,
                request_id: Some(correlation_id.to_string()),
            },
            ResponseMessage::Final {
                message,
                correlation_id,
            } => Self {
                response_type: UAgentResponseType::Final,
                options: None,
                message: Some(message),
                request_id: Some(correlation_id.to_string()),
            },
            ResponseMessage::Error { message } => Self {
                response_type: UAgentResponseType::Error,
                options: None,
                message: Some(message),
                request_id: None,
            },
        }
    }
}

/// Options stored for one request, as served to the booking workflow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub request_id: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub options: Vec<KeyValue>,
}

/// A single selected option
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionResponse {
    pub request_id: String,
    pub key: usize,
    pub value: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub locale: String,
    pub records: usize,
    /// Absent when the session store cannot be read
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sessions: Option<usize>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
