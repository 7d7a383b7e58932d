/// Corpus store adapter errors.
///
/// Both variants are distinguishable from a legitimate empty result: a
/// store call that finds nothing returns `Ok(vec![])`, never an error.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Transient connectivity failure. The caller may retry with backoff;
    /// the engine itself never retries.
    #[error("corpus store unavailable: {reason}")]
    Unavailable { reason: String },

    /// The configured store does not support a required capability.
    /// Fatal for that store configuration, never silently downgraded.
    #[error("corpus store does not support {capability}")]
    CapabilityMissing { capability: String },
}

impl StoreError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn capability_missing(capability: impl Into<String>) -> Self {
        Self::CapabilityMissing {
            capability: capability.into(),
        }
    }
}
