pub mod drift;
pub mod id;
pub mod input;
pub mod normalize;
pub mod terms;
pub mod topics;
pub mod types;

pub use drift::{DriftDecision, MIN_DRIFT_RATIO, SkipReason};
pub use input::{
    Error, RawPerson, RawSegment, RawSpeaker, RawTerm, RawTopic, RawTranscription,
};
pub use normalize::{Normalized, TempId, normalize, reindex};
pub use types::{
    AlignmentStatus, Conversation, DriftCorrection, Person, Segment, Speaker, Term,
    TermOccurrence, Topic, TopicKind,
};
