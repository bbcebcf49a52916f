//! Harness error taxonomy.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("fixture `{name}`: {reason}")]
    BadFixture { name: String, reason: String },
}

impl HarnessError {
    pub fn bad_fixture(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::BadFixture {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
