//! Background music playback
//!
//! Best-effort looping of a fixed music file. A missing file or audio device
//! is a logged warning and the feature stays disabled; nothing here is fatal.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

/// Fixed background track filename, looked up in the working directory
pub const MUSIC_FILE: &str = "music.wav";

/// Owns the audio output stream and the currently playing track
pub struct MusicPlayer {
    // The stream must stay alive for the sink to produce sound
    _stream: Option<OutputStream>,
    handle: Option<OutputStreamHandle>,
    sink: Option<Sink>,
    volume: f32,
}

impl MusicPlayer {
    /// Acquire the default output device; on failure audio is disabled
    pub fn new(volume: f32) -> Self {
        match OutputStream::try_default() {
            Ok((stream, handle)) => Self {
                _stream: Some(stream),
                handle: Some(handle),
                sink: None,
                volume,
            },
            Err(err) => {
                log::warn!("No audio output device: {err} - music disabled");
                Self {
                    _stream: None,
                    handle: None,
                    sink: None,
                    volume,
                }
            }
        }
    }

    /// Start looping the background track, replacing any current playback
    pub fn play(&mut self) {
        self.stop();
        let Some(handle) = &self.handle else {
            return;
        };
        if !Path::new(MUSIC_FILE).exists() {
            log::warn!("{MUSIC_FILE} not found - music disabled");
            return;
        }
        let source = match File::open(MUSIC_FILE).map(BufReader::new) {
            Ok(reader) => match Decoder::new(reader) {
                Ok(decoder) => decoder,
                Err(err) => {
                    log::warn!("Failed to decode {MUSIC_FILE}: {err}");
                    return;
                }
            },
            Err(err) => {
                log::warn!("Failed to open {MUSIC_FILE}: {err}");
                return;
            }
        };
        match Sink::try_new(handle) {
            Ok(sink) => {
                sink.set_volume(self.volume);
                sink.append(source.repeat_infinite());
                self.sink = Some(sink);
                log::info!("Playing {MUSIC_FILE} on loop");
            }
            Err(err) => log::warn!("Failed to start playback: {err}"),
        }
    }

    /// Stop playback, if any
    pub fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }

    pub fn is_playing(&self) -> bool {
        self.sink.is_some()
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        if let Some(sink) = &self.sink {
            sink.set_volume(self.volume);
        }
    }
}
