//! Sound cues and voice resolution
//!
//! The simulation only queues cues. `AudioManager` turns them into voices
//! (volume, stereo pan, pitch) and hands those to whatever backend is
//! plugged in; synthesis is the backend's business.

use glam::Vec2;

use crate::engine::Camera;
use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Ball hits anything
    Bounce,
    /// Brick breaks
    Break,
    /// Ball spawned
    Start,
}

/// Share of the range over which a sound fades out
pub const DEFAULT_TAPER: f32 = 0.7;
/// Audible range in world units for sounds that fall off with distance
pub const DEFAULT_RANGE: f32 = 40.0;

impl SoundEffect {
    /// Audible distance from the camera (0 = heard everywhere)
    pub fn range(&self) -> f32 {
        match self {
            SoundEffect::Bounce | SoundEffect::Break => 0.0,
            SoundEffect::Start => DEFAULT_RANGE,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEffect::Bounce => "bounce",
            SoundEffect::Break => "break",
            SoundEffect::Start => "start",
        }
    }
}

/// A request to play a sound
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoundCue {
    pub effect: SoundEffect,
    /// World position for panning and falloff; None plays centred
    pub pos: Option<Vec2>,
    pub volume: f32,
    /// Playback rate multiplier
    pub pitch: f32,
}

impl SoundCue {
    /// Non-positional cue at full volume
    pub fn new(effect: SoundEffect) -> Self {
        Self {
            effect,
            pos: None,
            volume: 1.0,
            pitch: 1.0,
        }
    }

    /// Cue emitted from a world position
    pub fn at(effect: SoundEffect, pos: Vec2) -> Self {
        Self {
            pos: Some(pos),
            ..Self::new(effect)
        }
    }

    pub fn with_pitch(mut self, pitch: f32) -> Self {
        self.pitch = pitch;
        self
    }
}

/// A resolved cue ready for a backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Voice {
    pub effect: SoundEffect,
    pub volume: f32,
    /// -1 (left) to 1 (right)
    pub pan: f32,
    pub pitch: f32,
}

/// Something that can actually make noise
pub trait SoundBackend {
    fn play(&mut self, voice: &Voice);
}

/// Backend that writes every voice to the log
#[derive(Debug, Default)]
pub struct LogBackend {
    pub played: u64,
}

impl SoundBackend for LogBackend {
    fn play(&mut self, voice: &Voice) {
        self.played += 1;
        log::trace!(
            "sfx {} vol={:.2} pan={:+.2} pitch={:.2}",
            voice.effect.as_str(),
            voice.volume,
            voice.pan,
            voice.pitch
        );
    }
}

/// Audio manager for the game
#[derive(Debug, Clone)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut audio = Self::new();
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);
        audio
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Turn a cue into a voice, or None if it would be inaudible
    pub fn resolve(&self, cue: &SoundCue, camera: &Camera) -> Option<Voice> {
        let mut volume = cue.volume * self.effective_volume();
        let mut pan = 0.0;

        if let Some(pos) = cue.pos {
            let range = cue.effect.range();
            if range > 0.0 {
                let distance = camera.pos.distance(pos);
                if distance > range {
                    return None;
                }
                volume *= crate::percent(distance, range, range * DEFAULT_TAPER);
            }
            pan = camera.pan_of(pos);
        }

        if volume <= 0.0 {
            return None;
        }

        Some(Voice {
            effect: cue.effect,
            volume,
            pan,
            pitch: cue.pitch,
        })
    }

    /// Resolve and play a batch of cues. Returns how many were audible.
    pub fn play_all<B: SoundBackend + ?Sized>(
        &self,
        cues: &[SoundCue],
        camera: &Camera,
        backend: &mut B,
    ) -> usize {
        let mut played = 0;
        for cue in cues {
            if let Some(voice) = self.resolve(cue, camera) {
                backend.play(&voice);
                played += 1;
            }
        }
        played
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::centered_on(Vec2::new(19.0, 10.0))
    }

    #[test]
    fn test_non_positional_cue_is_centered() {
        let audio = AudioManager::new();
        let voice = audio.resolve(&SoundCue::new(SoundEffect::Start), &camera()).unwrap();
        assert_eq!(voice.pan, 0.0);
        assert!((voice.volume - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_bounce_pans_and_keeps_pitch() {
        let audio = AudioManager::new();
        let cue = SoundCue::at(SoundEffect::Bounce, Vec2::new(1.0, 5.0)).with_pitch(0.3);
        let voice = audio.resolve(&cue, &camera()).unwrap();
        assert!(voice.pan < -0.5);
        assert_eq!(voice.pitch, 0.3);
        // No range: no falloff
        assert!((voice.volume - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_ranged_cue_falls_off() {
        let audio = AudioManager::new();
        let cam = camera();
        let near = SoundCue::at(SoundEffect::Start, cam.pos + Vec2::new(10.0, 0.0));
        let mid = SoundCue::at(SoundEffect::Start, cam.pos + Vec2::new(0.0, 34.0));
        let far = SoundCue::at(SoundEffect::Start, cam.pos + Vec2::new(0.0, 41.0));

        assert!((audio.resolve(&near, &cam).unwrap().volume - 0.8).abs() < 1e-6);
        let mid_vol = audio.resolve(&mid, &cam).unwrap().volume;
        assert!(mid_vol > 0.0 && mid_vol < 0.8);
        assert!(audio.resolve(&far, &cam).is_none());
    }

    #[test]
    fn test_muted_plays_nothing() {
        let mut audio = AudioManager::new();
        audio.set_muted(true);
        let mut backend = LogBackend::default();
        let cues = [SoundCue::new(SoundEffect::Break), SoundCue::new(SoundEffect::Start)];
        assert_eq!(audio.play_all(&cues, &camera(), &mut backend), 0);
        assert_eq!(backend.played, 0);
    }

    #[test]
    fn test_volume_setters_clamp() {
        let mut audio = AudioManager::new();
        audio.set_master_volume(3.0);
        audio.set_sfx_volume(-1.0);
        assert_eq!(audio.effective_volume(), 0.0);
        audio.set_sfx_volume(0.5);
        assert_eq!(audio.effective_volume(), 0.5);
    }
}
