mod participant;
mod participant_id;
mod review;
mod status;

pub use participant::{Biodata, ParticipantRecord, CATEGORY_OPTIONS, PROGRAM_OPTIONS};
pub use participant_id::{ParticipantId, ID_PREFIX};
pub use review::{DraftReview, ReviewBand, SENTINEL_FEEDBACK};
pub use status::{CheckInOutcome, ParticipantStatus};
