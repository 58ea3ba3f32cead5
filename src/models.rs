use crate::errors::AppError;
use serde::{Deserialize, Serialize};

/// Personal data the remote service derives a fiscal code from.
///
/// All fields are free text. Nothing is checked locally: a malformed birth date
/// is forwarded as-is and the service decides what to answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub surname: String,
    pub birth_city: String,
    /// DD/MM/YYYY
    pub birth_date: String,
    /// Single letter, `M` or `F`.
    pub gender: String,
}

impl Identity {
    pub fn new(
        name: impl Into<String>,
        surname: impl Into<String>,
        birth_city: impl Into<String>,
        birth_date: impl Into<String>,
        gender: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            surname: surname.into(),
            birth_city: birth_city.into(),
            birth_date: birth_date.into(),
            gender: gender.into(),
        }
    }

    /// Query-encodes every field so it can be interpolated into a URL.
    pub fn normalize(&self) -> NormalizedIdentity {
        NormalizedIdentity {
            name: query_escape(&self.name),
            surname: query_escape(&self.surname),
            birth_city: query_escape(&self.birth_city),
            birth_date: query_escape(&self.birth_date),
            gender: query_escape(&self.gender),
        }
    }

    /// Rejects blank fields. Used by the HTTP facade only; the core pipeline
    /// forwards whatever it is given.
    pub fn require_fields(&self) -> Result<(), AppError> {
        let fields = [
            ("name", &self.name),
            ("surname", &self.surname),
            ("birth_city", &self.birth_city),
            ("birth_date", &self.birth_date),
            ("gender", &self.gender),
        ];
        for (field, value) in fields {
            if value.trim().is_empty() {
                return Err(AppError::BadRequest(format!("{} is required", field)));
            }
        }
        Ok(())
    }
}

/// An [`Identity`] whose fields are already query-encoded.
///
/// Only [`Identity::normalize`] produces one, so the endpoint builder never sees raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedIdentity {
    name: String,
    surname: String,
    birth_city: String,
    birth_date: String,
    gender: String,
}

impl NormalizedIdentity {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn surname(&self) -> &str {
        &self.surname
    }

    pub fn birth_city(&self) -> &str {
        &self.birth_city
    }

    pub fn birth_date(&self) -> &str {
        &self.birth_date
    }

    pub fn gender(&self) -> &str {
        &self.gender
    }
}

/// `application/x-www-form-urlencoded` encoding of a single value.
pub fn query_escape(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Result of a compute-then-verify request.
///
/// A code can come back without being verified: either the service said it is not
/// valid (`error` is `None`) or the verification call itself failed (`error` is set).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    Completed {
        code: String,
        verified: bool,
        error: Option<AppError>,
    },
    /// Creation failed, verification never ran.
    Failed(AppError),
}

impl RequestOutcome {
    pub fn code(&self) -> Option<&str> {
        match self {
            RequestOutcome::Completed { code, .. } => Some(code),
            RequestOutcome::Failed(_) => None,
        }
    }

    pub fn is_verified(&self) -> bool {
        matches!(self, RequestOutcome::Completed { verified: true, .. })
    }

    pub fn error(&self) -> Option<&AppError> {
        match self {
            RequestOutcome::Completed { error, .. } => error.as_ref(),
            RequestOutcome::Failed(err) => Some(err),
        }
    }
}

// ============ HTTP facade payloads ============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiscalCodeResponse {
    pub fiscal_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResponse {
    pub fiscal_code: String,
    pub valid: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifiedFiscalCodeResponse {
    pub fiscal_code: String,
    pub verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
