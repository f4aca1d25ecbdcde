//! Sound effects
//!
//! Every cue is synthesized from a few chip-style voices (square, triangle,
//! noise) with linear decay and an optional pitch sweep, so the game ships
//! without audio files.
//!
//! Platform support:
//! - Native: cpal output stream pulling from shared state
//! - WASM: no output stream; cues are accepted and dropped

use std::sync::{Arc, Mutex};
use crate::game::SoundCue;

pub const SAMPLE_RATE: u32 = 44100;
/// Voices beyond this are dropped rather than mixed
const MAX_VOICES: usize = 32;

/// Receives fire-and-forget sound requests from the game
pub trait AudioNotifier {
    fn play(&mut self, cue: SoundCue);
    fn set_muted(&mut self, muted: bool);
    fn is_muted(&self) -> bool;
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("no audio output device")]
    NoDevice,
    #[error("failed to build output stream: {0}")]
    Build(#[from] cpal::BuildStreamError),
    #[error("failed to start output stream: {0}")]
    Play(#[from] cpal::PlayStreamError),
}

// =============================================================================
// Voices
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Wave {
    Square,
    Triangle,
    Noise,
}

#[derive(Debug, Clone)]
struct Voice {
    wave: Wave,
    freq_start: f32,
    freq_end: f32,
    gain: f32,
    /// Samples to wait before sounding
    delay: u32,
    /// Length in samples once started
    length: u32,
    elapsed: u32,
    phase: f32,
    /// 15-bit LFSR for the noise wave
    lfsr: u16,
    noise_out: f32,
}

impl Voice {
    fn new(wave: Wave, freq_start: f32, freq_end: f32, seconds: f32, delay_seconds: f32, gain: f32) -> Self {
        Self {
            wave,
            freq_start,
            freq_end,
            gain,
            delay: (delay_seconds * SAMPLE_RATE as f32) as u32,
            length: ((seconds * SAMPLE_RATE as f32) as u32).max(1),
            elapsed: 0,
            phase: 0.0,
            lfsr: 0x7fff,
            noise_out: 1.0,
        }
    }

    fn tone(wave: Wave, freq: f32, seconds: f32, delay_seconds: f32, gain: f32) -> Self {
        Self::new(wave, freq, freq, seconds, delay_seconds, gain)
    }

    fn finished(&self) -> bool {
        self.delay == 0 && self.elapsed >= self.length
    }

    fn next_sample(&mut self) -> f32 {
        if self.delay > 0 {
            self.delay -= 1;
            return 0.0;
        }
        if self.elapsed >= self.length {
            return 0.0;
        }

        let t = self.elapsed as f32 / self.length as f32;
        // Exponential sweep sounds even across octaves
        let freq = self.freq_start * (self.freq_end / self.freq_start).powf(t);
        let envelope = 1.0 - t;

        let value = match self.wave {
            Wave::Square => if self.phase < 0.5 { 1.0 } else { -1.0 },
            Wave::Triangle => 4.0 * (self.phase - 0.5).abs() - 1.0,
            Wave::Noise => self.noise_out,
        };

        self.phase += freq / SAMPLE_RATE as f32;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
            if self.wave == Wave::Noise {
                let bit = (self.lfsr ^ (self.lfsr >> 1)) & 1;
                self.lfsr = (self.lfsr >> 1) | (bit << 14);
                self.noise_out = if self.lfsr & 1 == 0 { 1.0 } else { -1.0 };
            }
        }
        self.elapsed += 1;

        value * envelope * self.gain
    }
}

/// The voices that make up one cue
fn cue_voices(cue: SoundCue) -> Vec<Voice> {
    use Wave::*;
    match cue {
        SoundCue::Jump => vec![Voice::new(Square, 330.0, 660.0, 0.12, 0.0, 0.25)],
        SoundCue::Coin => vec![
            Voice::tone(Square, 987.77, 0.07, 0.0, 0.2),   // B5
            Voice::tone(Square, 1318.51, 0.2, 0.07, 0.2),  // E6
        ],
        SoundCue::EnemyHit => vec![
            Voice::tone(Noise, 4000.0, 0.15, 0.0, 0.3),
            Voice::new(Square, 220.0, 80.0, 0.25, 0.0, 0.2),
        ],
        SoundCue::LevelComplete => vec![
            Voice::tone(Triangle, 523.25, 0.12, 0.0, 0.35),   // C5
            Voice::tone(Triangle, 659.25, 0.12, 0.12, 0.35),  // E5
            Voice::tone(Triangle, 783.99, 0.12, 0.24, 0.35),  // G5
            Voice::tone(Triangle, 1046.50, 0.3, 0.36, 0.35),  // C6
        ],
        SoundCue::GameOver => vec![
            Voice::tone(Triangle, 392.00, 0.2, 0.0, 0.35),   // G4
            Voice::tone(Triangle, 329.63, 0.2, 0.2, 0.35),   // E4
            Voice::tone(Triangle, 261.63, 0.2, 0.4, 0.35),   // C4
            Voice::new(Square, 130.81, 110.0, 0.5, 0.6, 0.2),
        ],
    }
}

// =============================================================================
// Mixer state (shared with the audio thread)
// =============================================================================

pub struct SfxState {
    voices: Vec<Voice>,
    pub muted: bool,
    /// Master volume (0.0 to 1.0)
    pub volume: f32,
}

impl SfxState {
    pub fn new(volume: f32, muted: bool) -> Self {
        Self {
            voices: Vec::new(),
            muted,
            volume: volume.clamp(0.0, 1.0),
        }
    }

    /// Queue every voice of a cue
    pub fn trigger(&mut self, cue: SoundCue) {
        if self.muted {
            return;
        }
        for voice in cue_voices(cue) {
            if self.voices.len() >= MAX_VOICES {
                break;
            }
            self.voices.push(voice);
        }
    }

    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }

    /// Mix into an interleaved buffer with `channels` channels
    pub fn render(&mut self, out: &mut [f32], channels: usize) {
        let channels = channels.max(1);
        let gain = if self.muted { 0.0 } else { self.volume };

        for frame in out.chunks_mut(channels) {
            let mut sample = 0.0;
            for voice in &mut self.voices {
                sample += voice.next_sample();
            }
            let sample = (sample * gain).clamp(-1.0, 1.0);
            for s in frame.iter_mut() {
                *s = sample;
            }
        }
        self.voices.retain(|v| !v.finished());
    }
}

// =============================================================================
// Native audio output using cpal
// =============================================================================

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use super::*;
    use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
    use cpal::{SampleRate, Stream, StreamConfig};

    pub fn init_audio_stream(state: Arc<Mutex<SfxState>>) -> Result<Stream, AudioError> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(AudioError::NoDevice)?;

        let config = StreamConfig {
            channels: 2,
            sample_rate: SampleRate(SAMPLE_RATE),
            buffer_size: cpal::BufferSize::Default,
        };
        let channels = config.channels as usize;

        let stream = device.build_output_stream(
            &config,
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                if let Ok(mut state) = state.lock() {
                    state.render(data, channels);
                } else {
                    data.fill(0.0);
                }
            },
            |err| log::warn!("Audio stream error: {}", err),
            None,
        )?;

        stream.play()?;
        Ok(stream)
    }
}

// =============================================================================
// SfxEngine - cross-platform wrapper
// =============================================================================

pub struct SfxEngine {
    state: Arc<Mutex<SfxState>>,
    /// False when nothing is pulling samples; cues are then dropped
    has_output: bool,
    /// The audio stream (native only, kept alive)
    #[cfg(not(target_arch = "wasm32"))]
    _stream: Option<cpal::Stream>,
}

impl SfxEngine {
    pub fn new(volume: f32, muted: bool) -> Self {
        let state = Arc::new(Mutex::new(SfxState::new(volume, muted)));

        #[cfg(not(target_arch = "wasm32"))]
        {
            let stream = match native::init_audio_stream(Arc::clone(&state)) {
                Ok(stream) => {
                    log::info!("Audio output started at {} Hz", SAMPLE_RATE);
                    Some(stream)
                }
                Err(e) => {
                    log::warn!("Running without sound: {}", e);
                    None
                }
            };
            Self {
                state,
                has_output: stream.is_some(),
                _stream: stream,
            }
        }

        #[cfg(target_arch = "wasm32")]
        {
            log::info!("No audio backend on this platform, sound effects disabled");
            Self { state, has_output: false }
        }
    }
}

impl AudioNotifier for SfxEngine {
    fn play(&mut self, cue: SoundCue) {
        if !self.has_output {
            return;
        }
        if let Ok(mut state) = self.state.lock() {
            log::debug!("Sound: {}", cue.name());
            state.trigger(cue);
        }
    }

    fn set_muted(&mut self, muted: bool) {
        if let Ok(mut state) = self.state.lock() {
            state.muted = muted;
            if muted {
                state.voices.clear();
            }
        }
    }

    fn is_muted(&self) -> bool {
        self.state.lock().map(|s| s.muted).unwrap_or(false)
    }
}
