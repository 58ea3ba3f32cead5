//! Per-request pipeline state.
//!
//! A [`RequestSession`] walks one request through
//! `Unstarted -> CreationBuilt -> CodeDecoded -> VerificationBuilt -> Done | Failed`.
//! Fetch steps check the state first, so fetching an endpoint that was never built
//! returns [`AppError::SequencingError`] without touching the network.

use crate::config::ServiceConfig;
use crate::endpoint::{self, BuiltEndpoint};
use crate::errors::AppError;
use crate::models::Identity;
use crate::service_client::FiscalCodeServiceClient;
use crate::xml::unwrap_string;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Unstarted,
    CreationBuilt(BuiltEndpoint),
    /// The creation answer was decoded into a fiscal code.
    CodeDecoded(String),
    VerificationBuilt(BuiltEndpoint),
    /// Verification ran; `verified` is the comparison result.
    Done { verified: bool },
    Failed(AppError),
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Unstarted => "unstarted",
            SessionState::CreationBuilt(_) => "creation_built",
            SessionState::CodeDecoded(_) => "code_decoded",
            SessionState::VerificationBuilt(_) => "verification_built",
            SessionState::Done { .. } => "done",
            SessionState::Failed(_) => "failed",
        }
    }
}

pub struct RequestSession<'a> {
    client: &'a FiscalCodeServiceClient,
    config: &'a ServiceConfig,
    state: SessionState,
}

impl<'a> RequestSession<'a> {
    pub fn new(client: &'a FiscalCodeServiceClient, config: &'a ServiceConfig) -> Self {
        Self {
            client,
            config,
            state: SessionState::Unstarted,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Normalizes `identity` and derives the creation endpoint from it.
    pub fn build_creation_endpoint(&mut self, identity: &Identity) -> BuiltEndpoint {
        let built = endpoint::build_creation(&self.config.base_url, &identity.normalize());
        self.state = SessionState::CreationBuilt(built.clone());
        built
    }

    pub fn build_verification_endpoint(&mut self, fiscal_code: &str) -> BuiltEndpoint {
        let built = endpoint::build_verification(&self.config.base_url, fiscal_code);
        self.state = SessionState::VerificationBuilt(built.clone());
        built
    }

    /// Fetches the creation endpoint and decodes the fiscal code out of the answer.
    pub async fn fetch_creation(&mut self) -> Result<String, AppError> {
        let built = match &self.state {
            SessionState::CreationBuilt(built) => built.clone(),
            other => {
                return Err(AppError::SequencingError(format!(
                    "creation endpoint not built (session is {})",
                    other.name()
                )))
            }
        };

        let decoded = self.fetch_and_unwrap(&built).await.and_then(|code| {
            if code.trim().is_empty() {
                Err(AppError::DecodeError(
                    "service returned an empty fiscal code".to_string(),
                ))
            } else {
                Ok(code)
            }
        });

        match decoded {
            Ok(code) => {
                self.state = SessionState::CodeDecoded(code.clone());
                Ok(code)
            }
            Err(e) => {
                self.state = SessionState::Failed(e.clone());
                Err(e)
            }
        }
    }

    /// Fetches the verification endpoint and compares the answer with the validity marker.
    ///
    /// Any answer other than the exact marker is `Ok(false)`.
    pub async fn fetch_verification(&mut self) -> Result<bool, AppError> {
        let built = match &self.state {
            SessionState::VerificationBuilt(built) => built.clone(),
            other => {
                return Err(AppError::SequencingError(format!(
                    "verification endpoint not built (session is {})",
                    other.name()
                )))
            }
        };

        match self.fetch_and_unwrap(&built).await {
            Ok(answer) => {
                let verified = answer == self.config.validity_marker;
                if !verified {
                    tracing::warn!("Fiscal code not validated by service: {}", answer);
                }
                self.state = SessionState::Done { verified };
                Ok(verified)
            }
            Err(e) => {
                self.state = SessionState::Failed(e.clone());
                Err(e)
            }
        }
    }

    async fn fetch_and_unwrap(&self, built: &BuiltEndpoint) -> Result<String, AppError> {
        let body = self.client.fetch(built).await?;
        unwrap_string(&body).map_err(|e| {
            tracing::error!("Failed to decode {} response: {}", built.kind(), e);
            e
        })
    }
}
