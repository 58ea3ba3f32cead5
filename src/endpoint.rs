//! Request URLs for the two remote operations.

use crate::models::{query_escape, NormalizedIdentity};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointKind {
    Creation,
    Verification,
}

impl fmt::Display for EndpointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndpointKind::Creation => write!(f, "creation"),
            EndpointKind::Verification => write!(f, "verification"),
        }
    }
}

/// A fully interpolated request URL.
///
/// The fields are private: the only way to get one is through [`build_creation`] or
/// [`build_verification`], which is what lets the fetcher accept it without checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltEndpoint {
    kind: EndpointKind,
    url: String,
}

impl BuiltEndpoint {
    pub fn kind(&self) -> EndpointKind {
        self.kind
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for BuiltEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// `{base}/CalcolaCodiceFiscale?Nome=..&Cognome=..&ComuneNascita=..&DataNascita=..&Sesso=..`
pub fn build_creation(base_url: &str, identity: &NormalizedIdentity) -> BuiltEndpoint {
    let url = format!(
        "{}/CalcolaCodiceFiscale?Nome={}&Cognome={}&ComuneNascita={}&DataNascita={}&Sesso={}",
        base_url.trim_end_matches('/'),
        identity.name(),
        identity.surname(),
        identity.birth_city(),
        identity.birth_date(),
        identity.gender(),
    );

    BuiltEndpoint {
        kind: EndpointKind::Creation,
        url,
    }
}

/// `{base}/ControllaCodiceFiscale?CodiceFiscale=..`
pub fn build_verification(base_url: &str, fiscal_code: &str) -> BuiltEndpoint {
    let url = format!(
        "{}/ControllaCodiceFiscale?CodiceFiscale={}",
        base_url.trim_end_matches('/'),
        query_escape(fiscal_code),
    );

    BuiltEndpoint {
        kind: EndpointKind::Verification,
        url,
    }
}
