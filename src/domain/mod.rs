mod attempt_policy;
mod audio_upload;
mod call_failure;
mod transcript;

pub use attempt_policy::{
    AttemptPolicy, AttemptPolicyError, DEFAULT_BACKOFF_MULTIPLIER, DEFAULT_INITIAL_DELAY,
    DEFAULT_MAX_ATTEMPTS,
};
pub use audio_upload::{AudioUpload, DEFAULT_ACCEPTED_CONTENT_TYPE, UploadError};
pub use call_failure::CallFailure;
pub use transcript::Transcript;
