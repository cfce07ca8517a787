/// Failures of instrument actions. All of them are recoverable: the action is
/// dropped, the state is left unchanged and the user sees a notice.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InstrumentError {
    #[error("Mic access denied or error: {0}")]
    PermissionDenied(String),
    #[error("Already recording! Stop first.")]
    Busy,
    #[error("Slot {} is not recording", .0 + 1)]
    NotActive(usize),
    #[error("No recording in slot {}", .0 + 1)]
    Empty(usize),
    #[error("There is no slot {}", .0 + 1)]
    NoSuchSlot(usize),
    #[error("Press Enter to start audio first")]
    NotStarted,
}

#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),
    #[error("Session metadata error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unsupported WAV format in {path} ({bits}-bit {format:?})")]
    UnsupportedFormat {
        path: String,
        bits: u16,
        format: hound::SampleFormat,
    },
}
