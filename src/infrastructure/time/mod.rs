mod recording_sleeper;
mod tokio_sleeper;

pub use recording_sleeper::RecordingSleeper;
pub use tokio_sleeper::TokioSleeper;
