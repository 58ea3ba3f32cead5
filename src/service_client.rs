use crate::config::ServiceConfig;
use crate::endpoint::BuiltEndpoint;
use crate::errors::AppError;

/// HTTP client for the remote fiscal-code service.
///
/// Holds a pooled `reqwest::Client`; cloning is cheap and clones share the pool.
#[derive(Clone)]
pub struct FiscalCodeServiceClient {
    client: reqwest::Client,
}

impl FiscalCodeServiceClient {
    /// Creates a new `FiscalCodeServiceClient` using the timeout from `config`.
    pub fn new(config: &ServiceConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| {
                AppError::InternalError(format!("Failed to create fiscal code client: {}", e))
            })?;

        Ok(Self { client })
    }

    /// Issues a single GET against `endpoint` and returns the whole body as text.
    ///
    /// Non-2xx answers are reported as [`AppError::NetworkError`]; their body is still
    /// drained so the connection goes back to the pool.
    ///
    /// The request is bounded by the client timeout (`ServiceConfig::timeout_secs`,
    /// 30 seconds unless configured), not by the bare `reqwest` default of no timeout.
    /// A request that runs past it fails with [`AppError::NetworkError`].
    pub async fn fetch(&self, endpoint: &BuiltEndpoint) -> Result<String, AppError> {
        tracing::info!("Fetching {} endpoint: {}", endpoint.kind(), endpoint);

        let response = self
            .client
            .get(endpoint.url())
            .send()
            .await
            .map_err(|e| {
                tracing::error!("{} request failed: {}", endpoint.kind(), e);
                AppError::from(e)
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!("Fiscal code service returned {}: {}", status, error_text);
            return Err(AppError::NetworkError(format!(
                "fiscal code service returned {}: {}",
                status, error_text
            )));
        }

        let body = response.text().await.map_err(|e| {
            tracing::error!("Failed to read {} response body: {}", endpoint.kind(), e);
            AppError::BodyReadError(format!(
                "failed to read {} response body: {}",
                endpoint.kind(),
                e
            ))
        })?;

        tracing::debug!("{} response body: {}", endpoint.kind(), body);
        Ok(body)
    }
}
