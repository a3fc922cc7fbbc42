pub type RuntimeError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    MalformedModelOutput(#[from] relisten_transcript::Error),

    #[error("alignment service unavailable: {0}")]
    AlignmentUnavailable(#[from] relisten_align_client::Error),

    /// The alignment backend restructured the segment list. Merging would
    /// pair the wrong timestamps with the wrong speaker/text, so this fails
    /// closed with the same retryable surface as service unavailability.
    #[error("alignment response has {received} segments for {sent} sent")]
    AlignmentContractViolation { sent: usize, received: usize },

    #[error("audio load failed: {0}")]
    AudioLoad(#[source] RuntimeError),

    #[error("persistence failed: {0}")]
    Persist(#[source] RuntimeError),
}
