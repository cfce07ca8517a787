pub const SAMPLE_RATE: u32 = 44_100;
/// UI refresh rate target
pub const UI_FPS: u64 = 60;
/// Channel capacity for inter-thread messages
pub const CHANNEL_CAPACITY: usize = 1024;

/// Tempo used to resolve musical durations ("8n" and friends)
pub const TEMPO_BPM: f32 = 120.0;
/// Samples per analyser snapshot
pub const ANALYSER_SIZE: usize = 256;
/// How long a pressed key stays highlighted
pub const KEY_FLASH_MS: u64 = 100;
/// How long an error notice stays in the status line
pub const NOTICE_SECS: u64 = 4;

/// Maximum (and default) number of recording slots
pub const MAX_SLOTS: usize = 10;
/// Number of clip playback keys
pub const CLIP_COUNT: usize = 7;
/// Samples per `Data` fragment delivered by the recorder
pub const CAPTURE_CHUNK: usize = SAMPLE_RATE as usize / 10;
/// Mic samples buffered between input and output callbacks (one second)
pub const MIC_RING_CAPACITY: usize = SAMPLE_RATE as usize;

pub const DELAY_FEEDBACK: f32 = 0.5;
pub const REVERB_DECAY_SECS: f32 = 2.0;
pub const REVERB_WET: f32 = 0.5;
