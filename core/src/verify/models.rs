use serde::{Deserialize, Serialize};

pub const LABEL_INVALID_NIP: &str = "Nieprawidłowy NIP";
pub const STATUS_INVALID_NIP: &str = "Błąd";
pub const LABEL_NO_DATA: &str = "Brak danych";
pub const STATUS_UNKNOWN: &str = "Nieznany";
pub const LABEL_NOT_FOUND: &str = "Nie znaleziono w rejestrze";
pub const STATUS_NOT_FOUND: &str = "Brak";
pub const LABEL_BAD_RESPONSE: &str = "Błąd odpowiedzi";
pub const LABEL_REQUEST_ERROR: &str = "Błąd zapytania";

/// One output row: `(nip, label, status)`.
///
/// `nip` is always the normalized identifier, even when verification failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub nip: String,
    pub label: String,
    pub status: String,
}

impl VerificationResult {
    pub fn new(nip: impl Into<String>, label: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            nip: nip.into(),
            label: label.into(),
            status: status.into(),
        }
    }

    pub fn invalid(nip: impl Into<String>) -> Self {
        Self::new(nip, LABEL_INVALID_NIP, STATUS_INVALID_NIP)
    }

    pub fn as_row(&self) -> [&str; 3] {
        [&self.nip, &self.label, &self.status]
    }
}

/// Ordered results of one submitted batch, one entry per input identifier.
pub type ResultSet = Vec<VerificationResult>;

/// What the registry said about a single well-formed NIP.
///
/// Every variant is data: a lookup never fails the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Found {
        name: Option<String>,
        status_vat: Option<String>,
    },
    NotFound,
    BadStatus(u16),
    Transport(String),
}

impl LookupOutcome {
    pub fn into_result(self, nip: String) -> VerificationResult {
        match self {
            Self::Found { name, status_vat } => VerificationResult::new(
                nip,
                name.unwrap_or_else(|| LABEL_NO_DATA.to_string()),
                status_vat.unwrap_or_else(|| STATUS_UNKNOWN.to_string()),
            ),
            Self::NotFound => VerificationResult::new(nip, LABEL_NOT_FOUND, STATUS_NOT_FOUND),
            Self::BadStatus(code) => {
                VerificationResult::new(nip, LABEL_BAD_RESPONSE, format!("Kod {code}"))
            }
            Self::Transport(message) => VerificationResult::new(nip, LABEL_REQUEST_ERROR, message),
        }
    }
}
