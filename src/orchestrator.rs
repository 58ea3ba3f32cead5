use crate::config::ServiceConfig;
use crate::errors::AppError;
use crate::models::{Identity, RequestOutcome};
use crate::service_client::FiscalCodeServiceClient;
use crate::session::RequestSession;

/// Entry point for computing and verifying fiscal codes.
///
/// Holds only immutable configuration and a pooled client, so one instance can serve
/// concurrent requests; each call runs in its own [`RequestSession`].
#[derive(Clone)]
pub struct FiscalCodeOrchestrator {
    client: FiscalCodeServiceClient,
    config: ServiceConfig,
}

impl FiscalCodeOrchestrator {
    pub fn new(config: ServiceConfig) -> Result<Self, AppError> {
        let client = FiscalCodeServiceClient::new(&config)?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn session(&self) -> RequestSession<'_> {
        RequestSession::new(&self.client, &self.config)
    }

    /// Asks the service to compute the fiscal code for `identity`.
    pub async fn compute(&self, identity: &Identity) -> Result<String, AppError> {
        let mut session = self.session();
        session.build_creation_endpoint(identity);
        let code = session.fetch_creation().await?;

        tracing::info!("Fiscal code computed: {}", code);
        Ok(code)
    }

    /// Asks the service whether `fiscal_code` is valid.
    ///
    /// `Ok(false)` means the service answered and said no; an error means the
    /// verification could not be carried out.
    pub async fn verify(&self, fiscal_code: &str) -> Result<bool, AppError> {
        let mut session = self.session();
        session.build_verification_endpoint(fiscal_code);
        let verified = session.fetch_verification().await?;

        tracing::info!("Fiscal code {} verified: {}", fiscal_code, verified);
        Ok(verified)
    }

    /// Computes the fiscal code for `identity`, then verifies it.
    ///
    /// A failed creation short-circuits. Once a code exists it is always returned,
    /// even when verification failed or said no.
    pub async fn do_request(&self, identity: &Identity) -> RequestOutcome {
        let mut session = self.session();

        session.build_creation_endpoint(identity);
        let code = match session.fetch_creation().await {
            Ok(code) => code,
            Err(e) => {
                tracing::error!("Fiscal code creation failed: {}", e);
                return RequestOutcome::Failed(e);
            }
        };

        session.build_verification_endpoint(&code);
        match session.fetch_verification().await {
            Ok(verified) => {
                tracing::info!("Fiscal code {} verified: {}", code, verified);
                RequestOutcome::Completed {
                    code,
                    verified,
                    error: None,
                }
            }
            Err(e) => {
                tracing::warn!("Returning unverified fiscal code {}: {}", code, e);
                RequestOutcome::Completed {
                    code,
                    verified: false,
                    error: Some(e),
                }
            }
        }
    }
}
