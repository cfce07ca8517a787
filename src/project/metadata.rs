use serde::{Deserialize, Serialize};

use crate::constants::SAMPLE_RATE;

/// `session.json` written next to the exported slot files.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SessionMeta {
    pub name: String,
    pub sample_rate: u32,
    pub slots: Vec<SlotMeta>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SlotMeta {
    pub index: usize,
    pub key: char,
    pub filename: String,
    pub duration_secs: f32,
}

impl SessionMeta {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            sample_rate: SAMPLE_RATE,
            slots: Vec::new(),
        }
    }
}
