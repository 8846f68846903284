//! Audio surface - fire-and-forget sound cues
//!
//! The session only asks for cues; what a cue sounds like is up to the sink.
//! The terminal has no mixer, so [`BellAudio`] maps the explode cue to the
//! terminal bell and treats the music switch as the master mute.

use std::io::Write;

use crate::types::Cue;

pub trait AudioSink {
    fn play(&mut self, cue: Cue);
    fn set_music(&mut self, on: bool);
    fn music_on(&self) -> bool;
}

/// Silent sink that only remembers the music switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NullAudio {
    music: bool,
}

impl NullAudio {
    pub fn new(music: bool) -> Self {
        Self { music }
    }
}

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: Cue) {}

    fn set_music(&mut self, on: bool) {
        self.music = on;
    }

    fn music_on(&self) -> bool {
        self.music
    }
}

/// Rings the terminal bell on the explode cue while sound is on.
#[derive(Debug)]
pub struct BellAudio<W: Write> {
    out: W,
    music: bool,
    rung: u64,
}

impl<W: Write> BellAudio<W> {
    pub fn new(out: W, music: bool) -> Self {
        Self {
            out,
            music,
            rung: 0,
        }
    }

    /// Bells written so far.
    pub fn rung(&self) -> u64 {
        self.rung
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> AudioSink for BellAudio<W> {
    fn play(&mut self, cue: Cue) {
        if !self.music || cue != Cue::Explode {
            return;
        }
        match self.out.write_all(b"\x07").and_then(|_| self.out.flush()) {
            Ok(()) => self.rung += 1,
            Err(e) => tracing::trace!(error = %e, "bell write failed"),
        }
    }

    fn set_music(&mut self, on: bool) {
        self.music = on;
    }

    fn music_on(&self) -> bool {
        self.music
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bell_rings_on_explode_only() {
        let mut audio = BellAudio::new(Vec::new(), true);
        audio.play(Cue::Click);
        audio.play(Cue::Explode);
        assert_eq!(audio.rung(), 1);
        assert_eq!(audio.into_inner(), vec![0x07]);
    }

    #[test]
    fn muted_bell_is_silent() {
        let mut audio = BellAudio::new(Vec::new(), true);
        audio.set_music(false);
        audio.play(Cue::Explode);
        assert!(!audio.music_on());
        assert!(audio.into_inner().is_empty());
    }

    #[test]
    fn null_audio_tracks_music() {
        let mut audio = NullAudio::new(true);
        audio.play(Cue::Explode);
        audio.set_music(false);
        assert!(!audio.music_on());
    }
}
