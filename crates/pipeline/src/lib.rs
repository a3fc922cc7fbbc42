pub mod error;
pub mod guard;
pub mod runtime;
pub mod stages;

pub use error::{Error, RuntimeError};
pub use guard::DriftGuard;
pub use runtime::PipelineRuntime;
pub use stages::{AlignFailed, MIN_ALIGN_CONFIDENCE};

use relisten_align_client::AlignClient;
use relisten_http::HttpClient;
use relisten_speaker_review::SpeakerReviewer;
use relisten_transcript::{Conversation, RawTranscription};

/// Orchestrates the transcript pipeline against one host runtime and one
/// alignment backend.
///
/// Each operation consumes a `Conversation` by value and returns the
/// fully-updated one; nothing is ever partially committed. Persistence runs
/// after every stage (so stage 5's status write is durable before playback
/// ever evaluates stage 6), and per-conversation sequencing is the caller's
/// contract: at most one network stage in flight per conversation, stage 4
/// finishing (or being skipped) before stage 5 starts. There is no global
/// lock; unrelated conversations never block each other.
pub struct Pipeline<R, C> {
    runtime: R,
    align_client: AlignClient<C>,
    drift_guard: DriftGuard,
}

impl<R: PipelineRuntime, C: HttpClient> Pipeline<R, C> {
    pub fn new(runtime: R, align_client: AlignClient<C>) -> Self {
        Self {
            runtime,
            align_client,
            drift_guard: DriftGuard::new(),
        }
    }

    /// Stages 1–3: parse the model's wire payload, normalize, resolve topics,
    /// index terms, persist the new conversation.
    ///
    /// A payload that fails schema validation commits nothing and surfaces as
    /// [`Error::MalformedModelOutput`].
    pub async fn ingest(&self, payload: &str) -> Result<Conversation, Error> {
        let raw = match RawTranscription::from_json(payload) {
            Ok(raw) => raw,
            Err(error) => {
                tracing::warn!(%error, "transcription payload failed validation");
                return Err(error.into());
            }
        };
        let conversation = stages::normalize_and_index(raw);
        self.persist(&conversation).await?;
        Ok(conversation)
    }

    /// Stage 4. Reviewer failures are absorbed: the conversation comes back
    /// unmodified (and re-persisted) rather than as an error, so a broken
    /// review backend never blocks alignment.
    pub async fn correct_speakers(
        &self,
        conversation: Conversation,
        reviewer: &dyn SpeakerReviewer,
    ) -> Result<Conversation, Error> {
        let updated = stages::correct_speakers(conversation, reviewer).await;
        self.persist(&updated).await?;
        Ok(updated)
    }

    /// Stage 5. Loads audio through the runtime, runs forced alignment, and
    /// persists the outcome — `Aligned` with merged timestamps on success,
    /// `Error` with untouched timestamps on failure (then returns the
    /// retryable error).
    pub async fn align(
        &self,
        conversation: Conversation,
        audio_ref: &str,
    ) -> Result<Conversation, Error> {
        let audio = match self.runtime.load_audio(audio_ref).await {
            Ok(audio) => audio,
            Err(error) => {
                let failed = AlignFailed::from_load_failure(conversation, error);
                self.persist(&failed.conversation).await?;
                return Err(failed.error);
            }
        };

        match stages::align(conversation, &audio, &self.align_client).await {
            Ok(updated) => {
                self.persist(&updated).await?;
                Ok(updated)
            }
            Err(failed) => {
                self.persist(&failed.conversation).await?;
                Err(failed.error)
            }
        }
    }

    /// Stage 6: drift evaluation on the playback metadata-loaded event.
    /// Single-flight per conversation id — a re-fired event while an
    /// evaluation is still in flight is a no-op.
    pub async fn on_audio_metadata_loaded(
        &self,
        conversation: Conversation,
        actual_duration_ms: i64,
    ) -> Result<Conversation, Error> {
        let Some(_permit) = self.drift_guard.try_begin(&conversation.id) else {
            tracing::debug!(conversation = %conversation.id, "drift evaluation already in flight");
            return Ok(conversation);
        };

        let updated = stages::on_audio_metadata_loaded(conversation, actual_duration_ms);
        self.persist(&updated).await?;
        Ok(updated)
    }

    async fn persist(&self, conversation: &Conversation) -> Result<(), Error> {
        self.runtime.persist(conversation).await.map_err(Error::Persist)
    }
}
