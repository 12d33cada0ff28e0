//! Sound feedback for game events
//!
//! The engine only defines which notifications exist; this module decides what
//! they sound like. Playback failures never reach the game.

use std::io::Write;

use crate::game::GameEvent;

/// The sounds a game can make
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    Eat,
    Die,
    /// Short click when a game starts
    Move,
}

impl Sound {
    /// Sound associated with an engine notification, if any
    pub fn for_event(event: &GameEvent) -> Option<Sound> {
        match event {
            GameEvent::Ate { .. } => Some(Sound::Eat),
            GameEvent::Died(_) => Some(Sound::Die),
            GameEvent::Started => Some(Sound::Move),
            _ => None,
        }
    }
}

/// Something that can make noise
pub trait AudioSink {
    fn play(&mut self, sound: Sound);
}

/// Rings the terminal bell: once for food, twice for death
///
/// A terminal has no way to play a soft click, so [`Sound::Move`] is silent.
pub struct TerminalBell<W: Write> {
    out: W,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn pattern(sound: Sound) -> &'static [u8] {
        match sound {
            Sound::Eat => b"\x07",
            Sound::Die => b"\x07\x07",
            Sound::Move => b"",
        }
    }
}

impl<W: Write> AudioSink for TerminalBell<W> {
    fn play(&mut self, sound: Sound) {
        let pattern = Self::pattern(sound);
        if pattern.is_empty() {
            return;
        }

        let result = self.out.write_all(pattern).and_then(|_| self.out.flush());
        if let Err(err) = result {
            tracing::debug!(?sound, "terminal bell unavailable: {}", err);
        }
    }
}

/// Routes engine events to a sink, with a mute switch
pub struct AudioPlayer {
    sink: Box<dyn AudioSink>,
    muted: bool,
}

impl AudioPlayer {
    pub fn new(sink: Box<dyn AudioSink>, muted: bool) -> Self {
        Self { sink, muted }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Play whatever `event` sounds like, unless muted
    pub fn on_event(&mut self, event: &GameEvent) {
        if self.muted {
            return;
        }

        if let Some(sound) = Sound::for_event(event) {
            self.sink.play(sound);
        }
    }
}
