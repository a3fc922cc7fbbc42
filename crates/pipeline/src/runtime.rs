use std::future::Future;

use relisten_transcript::Conversation;

use crate::error::RuntimeError;

/// Host seam for the collaborators the pipeline invokes but does not own:
/// durable persistence and audio byte loading. Backed by whatever
/// storage/auth layer the host application chooses.
pub trait PipelineRuntime: Send + Sync {
    fn persist(
        &self,
        conversation: &Conversation,
    ) -> impl Future<Output = Result<(), RuntimeError>> + Send;

    fn load_audio(
        &self,
        audio_ref: &str,
    ) -> impl Future<Output = Result<Vec<u8>, RuntimeError>> + Send;
}
