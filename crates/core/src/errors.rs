use thiserror::Error;

/// Unified error type for the entire portfolio-dashboard-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Storage ─────────────────────────────────────────────────────
    #[error("Stored investments are corrupted: {0}")]
    Corruption(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Storage write failed: {0}")]
    StorageWrite(String),

    // ── File I/O (native only) ──────────────────────────────────────
    #[error("File I/O error: {0}")]
    FileIO(String),

    // ── Remote completion ───────────────────────────────────────────
    #[error("Simulated failure during {operation}: {message}")]
    SimulatedFailure {
        operation: String,
        message: String,
    },

    // ── Business Logic ──────────────────────────────────────────────
    #[error("Investment not found: {0}")]
    InvestmentNotFound(u64),

    #[error("Investment id {0} is already in use")]
    DuplicateId(u64),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}

impl CoreError {
    /// `true` for the structural "no such investment" condition.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, CoreError::InvestmentNotFound(_))
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}
