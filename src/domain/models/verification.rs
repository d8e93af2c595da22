use std::fmt;

use crate::domain::models::account::Account;

/// Why a credential was rejected. Only ever used for audit logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    NotFound,
    BadSecret,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::NotFound => f.write_str("account not found"),
            RejectionReason::BadSecret => f.write_str("bad secret"),
        }
    }
}

#[derive(Debug, Clone)]
pub enum VerificationResult {
    Authenticated(Account),
    Rejected(RejectionReason),
}
