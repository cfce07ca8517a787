mod app;
mod audio;
mod capture;
mod config;
mod constants;
mod effects;
mod error;
mod graph;
mod input;
mod instrument;
mod messages;
mod mode;
mod project;
mod recording;
mod synth;
#[cfg(test)]
mod testing;
mod ui;

use std::fs::File;
use std::io;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossbeam_channel::{bounded, Receiver, Sender};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::app::{AppState, NoticeKind};
use crate::audio::capture::CpalCapture;
use crate::audio::engine::AudioEngine;
use crate::audio::handle::{ClipPlayer, EngineGraph, NodeIds};
use crate::capture::CaptureEvent;
use crate::config::Args;
use crate::constants::*;
use crate::instrument::Instrument;
use crate::messages::AudioCmd;

type LiveInstrument = Instrument<EngineGraph, CpalCapture, ClipPlayer>;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    // --- Setup channels ---
    let (audio_cmd_tx, audio_cmd_rx): (Sender<AudioCmd>, Receiver<AudioCmd>) =
        bounded(CHANNEL_CAPACITY);
    let (event_tx, event_rx): (Sender<CaptureEvent>, Receiver<CaptureEvent>) =
        bounded(CHANNEL_CAPACITY);

    // --- Audio engine setup ---
    let engine = AudioEngine::new();
    let ids = NodeIds::default();

    let mut state = AppState::new(args.slots, args.export_dir.clone());
    if let Some(dir) = &args.clips {
        match project::load::load_clip_dir(dir) {
            Ok(clips) => {
                for (index, (path, clip)) in clips.into_iter().enumerate() {
                    tracing::info!(path = %path.display(), index, "clip loaded");
                    state.clips.assign(index, clip);
                }
            }
            Err(e) => tracing::warn!("Could not load clips from {}: {}", dir.display(), e),
        }
    }

    let output_stream = match engine.start(audio_cmd_rx, event_tx.clone()) {
        Ok(stream) => Some(stream),
        Err(e) => {
            tracing::warn!("Audio engine failed to start: {}", e);
            tracing::warn!("Running in UI-only mode (no audio).");
            state.notify(
                NoticeKind::Error,
                format!("No audio output: {e}"),
                Instant::now(),
            );
            None
        }
    };

    let capture = CpalCapture::new(
        audio_cmd_tx.clone(),
        event_tx,
        ids.clone(),
        Arc::clone(&engine.mic_ring),
    );
    let instrument = Instrument::new(
        state,
        EngineGraph::new(audio_cmd_tx.clone(), ids),
        capture,
        ClipPlayer::new(audio_cmd_tx),
    );

    // Keep the stream alive for as long as the UI runs
    let result = run_ui_loop(instrument, event_rx);
    drop(output_stream);
    result
}

fn init_logging(args: &Args) -> anyhow::Result<()> {
    let file = File::create(&args.log_file)
        .with_context(|| format!("creating log file {}", args.log_file.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run_ui_loop(
    mut instrument: LiveInstrument,
    event_rx: Receiver<CaptureEvent>,
) -> anyhow::Result<()> {
    // --- Terminal setup ---
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let frame_duration = Duration::from_millis(1000 / UI_FPS);
    let result = (|| -> anyhow::Result<()> {
        loop {
            let frame_start = Instant::now();

            // --- Completions from the capture side (non-blocking) ---
            while let Ok(event) = event_rx.try_recv() {
                instrument.on_capture_event(event, frame_start);
            }

            // --- Process keyboard input ---
            if event::poll(Duration::from_millis(1))? {
                if let Event::Key(key) = event::read()? {
                    if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                        let slots = instrument.state.bank.capacity();
                        if let Some(evt) = input::handle_key(key, slots) {
                            instrument.handle(evt, Instant::now());
                        }
                    }
                }
            }

            instrument.tick(Instant::now());
            if instrument.state.should_quit {
                break;
            }

            // --- Render ---
            terminal.draw(|frame| ui::draw(frame, &instrument.state))?;

            // --- Frame rate limiting ---
            let elapsed = frame_start.elapsed();
            if elapsed < frame_duration {
                std::thread::sleep(frame_duration - elapsed);
            }
        }
        Ok(())
    })();

    // --- Cleanup ---
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
