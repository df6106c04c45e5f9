use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::RestaurantProtocol;
use crate::models::{
    CorrelationId, ErrorResponse, HealthResponse, KeyValue, RestaurantEnvelope,
    SelectionResponse, SessionResponse,
};
use crate::services::{ReplySlot, SessionStore};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub protocol: RestaurantProtocol,
}

impl AppState {
    fn sessions(&self) -> &Arc<SessionStore> {
        self.protocol.sessions()
    }
}

/// Configure all restaurant-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/restaurants", web::post().to(find_restaurants))
        .route("/sessions/{request_id}", web::get().to(get_session))
        .route("/sessions/{request_id}/options/{key}", web::get().to(get_selection));
}

fn error_response(status: actix_web::http::StatusCode, error: &str, message: String) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: status.as_u16(),
    })
}

fn parse_request_id(raw: &str) -> Result<CorrelationId, HttpResponse> {
    raw.parse().map_err(|e: uuid::Error| {
        error_response(
            actix_web::http::StatusCode::BAD_REQUEST,
            "Invalid request id",
            e.to_string(),
        )
    })
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let dataset = state.protocol.dataset();
    let sessions = match state.sessions().len() {
        Ok(count) => Some(count),
        Err(e) => {
            tracing::error!("Health check could not count sessions: {}", e);
            None
        }
    };

    HttpResponse::Ok().json(HealthResponse {
        status: if sessions.is_some() { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        locale: dataset.locale().to_string(),
        records: dataset.records().len(),
        sessions,
    })
}

/// Find restaurants endpoint
///
/// POST /api/v1/restaurants
///
/// Request body:
/// ```json
/// {
///   "sender": "agent1q...",
///   "message": {
///     "latitude": 50.087,
///     "longitude": 14.421,
///     "miles_radius": 2.0,
///     "additional_amenities": "wifi",
///     "cuisine_type": null
///   }
/// }
/// ```
///
/// Always answers with a `UAgentResponse`; protocol errors are a 200 with
/// `"type": "error"`.
async fn find_restaurants(
    state: web::Data<AppState>,
    req: web::Json<RestaurantEnvelope>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for restaurant request: {:?}", errors);
        return error_response(
            actix_web::http::StatusCode::BAD_REQUEST,
            "Validation failed",
            errors.to_string(),
        );
    }

    let RestaurantEnvelope { sender, message } = req.into_inner();
    let reply = ReplySlot::new();

    if let Err(e) = state.protocol.handle(&reply, &sender, message).await {
        tracing::error!("Failed to reply to {}: {}", sender, e);
        return error_response(
            actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to send reply",
            e.to_string(),
        );
    }

    match reply.into_reply() {
        Some((_, response)) => HttpResponse::Ok().json(response),
        None => error_response(
            actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
            "No reply",
            format!("no reply was produced for {}", sender),
        ),
    }
}

/// Options offered under a request id
///
/// GET /api/v1/sessions/{request_id}
async fn get_session(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let request_id = match parse_request_id(&path) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.sessions().session(&request_id) {
        Ok(Some(session)) => HttpResponse::Ok().json(SessionResponse {
            request_id: request_id.to_string(),
            created_at: session.created_at,
            options: session
                .options
                .into_iter()
                .map(|(key, value)| KeyValue { key, value })
                .collect(),
        }),
        Ok(None) => error_response(
            actix_web::http::StatusCode::NOT_FOUND,
            "Session not found",
            format!("no options were offered under {}", request_id),
        ),
        Err(e) => {
            tracing::error!("Failed to read session {}: {}", request_id, e);
            error_response(
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to read session",
                e.to_string(),
            )
        }
    }
}

/// Resolve the option a user selected, for the booking workflow
///
/// GET /api/v1/sessions/{request_id}/options/{key}
async fn get_selection(
    state: web::Data<AppState>,
    path: web::Path<(String, usize)>,
) -> impl Responder {
    let (raw_id, key) = path.into_inner();
    let request_id = match parse_request_id(&raw_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.sessions().select(&request_id, key) {
        Ok(Some(value)) => HttpResponse::Ok().json(SelectionResponse {
            request_id: request_id.to_string(),
            key,
            value,
        }),
        Ok(None) => error_response(
            actix_web::http::StatusCode::NOT_FOUND,
            "Option not found",
            format!("option {} was not offered under {}", key, request_id),
        ),
        Err(e) => {
            tracing::error!("Failed to read session {}: {}", request_id, e);
            error_response(
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to read session",
                e.to_string(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{UAgentResponse, UAgentResponseType};
    use crate::services::InMemoryDataset;
    use actix_web::{test, App};

    fn state() -> AppState {
        state_with(Arc::new(SessionStore::new()))
    }

    fn state_with(sessions: Arc<SessionStore>) -> AppState {
        AppState {
            protocol: RestaurantProtocol::new(Arc::new(InMemoryDataset::prague()), sessions),
        }
    }

    #[actix_web::test]
    async fn test_find_then_select() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .service(web::scope("/api/v1").configure(configure)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/restaurants")
            .set_json(serde_json::json!({
                "sender": "agent1qtest",
                "message": {
                    "latitude": 50.087,
                    "longitude": 14.421,
                    "miles_radius": 0.0,
                    "additional_amenities": "WIFI",
                    "cuisine_type": "undefined"
                }
            }))
            .to_request();
        let response: UAgentResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(response.response_type, UAgentResponseType::SelectFromOptions);
        let options = response.options.unwrap();
        assert_eq!(options.len(), 2);
        let request_id = response.request_id.unwrap();

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/sessions/{}/options/1", request_id))
            .to_request();
        let selection: SelectionResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(selection.value, options[1].value);

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/sessions/{}", request_id))
            .to_request();
        let session: SessionResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(session.options, options);
        assert!(session.created_at <= chrono::Utc::now());
    }

    #[actix_web::test]
    async fn test_health_reports_session_count() {
        let sessions = Arc::new(SessionStore::new());
        sessions.put(CorrelationId::new(), Default::default()).unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_with(sessions)))
                .service(web::scope("/api/v1").configure(configure)),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/v1/health").to_request();
        let health: HealthResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(health.status, "healthy");
        assert_eq!(health.sessions, Some(1));
        assert_eq!(health.records, 10);
    }

    #[actix_web::test]
    async fn test_health_degraded_on_poisoned_store() {
        let sessions = Arc::new(SessionStore::new());
        sessions.poison();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_with(sessions)))
                .service(web::scope("/api/v1").configure(configure)),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/v1/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "degraded");
        assert!(body.get("sessions").is_none());
    }

    #[actix_web::test]
    async fn test_empty_sender_rejected() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .service(web::scope("/api/v1").configure(configure)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/restaurants")
            .set_json(serde_json::json!({
                "sender": "",
                "message": {"latitude": 0.0, "longitude": 0.0, "miles_radius": 1.0}
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_unknown_and_malformed_session_ids() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .service(web::scope("/api/v1").configure(configure)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/sessions/{}", CorrelationId::new()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);

        let req = test::TestRequest::get()
            .uri("/api/v1/sessions/not-a-uuid/options/0")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }
}
