mod apply;
mod parse;
mod reviewer;
mod types;

pub use apply::apply_corrections;
pub use parse::parse_corrections;
pub use reviewer::{BoxFuture, ReviewError, SpeakerReviewer};
pub use types::{CorrectionAction, SpeakerCorrection};
