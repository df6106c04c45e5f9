use crate::models::UAgentResponse;
use async_trait::async_trait;
use std::sync::Mutex;
use thiserror::Error;

/// Errors that can occur when delivering a message
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("a reply has already been sent to {0}")]
    AlreadyReplied(String),

    #[error("transport lock poisoned")]
    Poisoned,

    #[error("delivery failed: {0}")]
    Delivery(String),
}

/// Outbound side of the agent runtime
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, recipient: &str, message: UAgentResponse) -> Result<(), TransportError>;
}

/// Captures the single reply of one request/response exchange
#[derive(Debug, Default)]
pub struct ReplySlot {
    reply: Mutex<Option<(String, UAgentResponse)>>,
}

impl ReplySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// The recipient and message, if a reply was sent
    pub fn into_reply(self) -> Option<(String, UAgentResponse)> {
        self.reply.into_inner().ok().flatten()
    }
}

#[async_trait]
impl Transport for ReplySlot {
    async fn send(&self, recipient: &str, message: UAgentResponse) -> Result<(), TransportError> {
        let mut reply = self.reply.lock().map_err(|_| TransportError::Poisoned)?;
        if let Some((previous, _)) = reply.as_ref() {
            return Err(TransportError::AlreadyReplied(previous.clone()));
        }
        *reply = Some((recipient.to_string(), message));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UAgentResponseType;

    fn final_message() -> UAgentResponse {
        UAgentResponse {
            response_type: UAgentResponseType::Final,
            options: None,
            message: Some("done".to_string()),
            request_id: None,
        }
    }

    #[tokio::test]
    async fn test_reply_slot_accepts_one_reply() {
        let slot = ReplySlot::new();

        slot.send("agent1q", final_message()).await.unwrap();
        let second = slot.send("agent1q", final_message()).await;
        assert!(matches!(second, Err(TransportError::AlreadyReplied(_))));

        let (recipient, message) = slot.into_reply().unwrap();
        assert_eq!(recipient, "agent1q");
        assert_eq!(message.message.as_deref(), Some("done"));
    }

    #[test]
    fn test_empty_slot() {
        assert!(ReplySlot::new().into_reply().is_none());
    }
}
