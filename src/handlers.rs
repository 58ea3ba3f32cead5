use crate::config::Config;
use crate::errors::{AppError, ResultExt};
use crate::models::*;
use crate::orchestrator::FiscalCodeOrchestrator;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use std::sync::Arc;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Client-side pipeline for the remote fiscal-code service.
    pub orchestrator: FiscalCodeOrchestrator,
}

/// Health check endpoint.
pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "cfiscale-api",
            "version": env!("CARGO_PKG_VERSION"),
            "upstream": state.config.service.base_url,
        })),
    )
}

/// POST /api/v1/fiscal-codes
///
/// Computes the fiscal code for the identity in the body, without verifying it.
pub async fn compute_fiscal_code(
    State(state): State<Arc<AppState>>,
    Json(identity): Json<Identity>,
) -> Result<Json<FiscalCodeResponse>, AppError> {
    tracing::info!("POST /fiscal-codes - surname: {}", identity.surname);
    identity.require_fields()?;

    let fiscal_code = state
        .orchestrator
        .compute(&identity)
        .await
        .context("computing fiscal code")?;

    Ok(Json(FiscalCodeResponse { fiscal_code }))
}

/// GET /api/v1/fiscal-codes/:code/verification
pub async fn verify_fiscal_code(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<VerificationResponse>, AppError> {
    tracing::info!("GET /fiscal-codes/{}/verification", code);
    if code.trim().is_empty() {
        return Err(AppError::BadRequest("fiscal code is required".to_string()));
    }

    let valid = state
        .orchestrator
        .verify(&code)
        .await
        .with_context(|| format!("verifying fiscal code {}", code))?;

    Ok(Json(VerificationResponse {
        fiscal_code: code,
        valid,
    }))
}

/// POST /api/v1/fiscal-codes/verified
///
/// Computes and then verifies. A code is returned whenever creation succeeded; a
/// verification failure travels in the `error` field next to it.
pub async fn compute_verified_fiscal_code(
    State(state): State<Arc<AppState>>,
    Json(identity): Json<Identity>,
) -> Result<Json<VerifiedFiscalCodeResponse>, AppError> {
    tracing::info!("POST /fiscal-codes/verified - surname: {}", identity.surname);
    identity.require_fields()?;

    match state.orchestrator.do_request(&identity).await {
        RequestOutcome::Completed {
            code,
            verified,
            error,
        } => Ok(Json(VerifiedFiscalCodeResponse {
            fiscal_code: code,
            verified,
            error: error.map(|e| e.to_string()),
        })),
        RequestOutcome::Failed(e) => Err(AppError::WithContext {
            source: Box::new(e),
            context: "computing fiscal code".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServiceConfig;

    fn test_state() -> Arc<AppState> {
        let service = ServiceConfig {
            timeout_secs: 1,
            ..ServiceConfig::new("http://127.0.0.1:9")
        };
        Arc::new(AppState {
            config: Config {
                port: 3000,
                service: service.clone(),
            },
            orchestrator: FiscalCodeOrchestrator::new(service).unwrap(),
        })
    }

    #[tokio::test]
    async fn test_compute_rejects_blank_fields() {
        let identity = Identity::new("", "rossi", "roma", "01/01/1970", "M");
        let result = compute_fiscal_code(State(test_state()), Json(identity)).await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_verify_rejects_blank_code() {
        let result = verify_fiscal_code(State(test_state()), Path("  ".to_string())).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_health_reports_upstream() {
        let (status, Json(body)) = health(State(test_state())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["upstream"], "http://127.0.0.1:9");
    }
}
