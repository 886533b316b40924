use wasm_bindgen::JsValue;
use web_sys::{AudioContext, OscillatorType};

/// Short synthesized sounds played on game events.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Cue {
    Flip,
    Match,
    Win,
    Lose,
}

impl Cue {
    /// `(frequency in Hz, duration in ms)` for each tone, played back to back.
    pub(crate) const fn tones(self) -> &'static [(f32, u32)] {
        use Cue::*;
        match self {
            Flip => &[(300., 50)],
            Match => &[(600., 150)],
            Win => &[(600., 150), (800., 150), (1000., 300)],
            Lose => &[(400., 150), (300., 150), (200., 300)],
        }
    }
}

/// Plays [`Cue`]s through Web Audio. The audio context is created on first
/// use, which happens inside a click handler as browsers require.
#[derive(Debug, Default)]
pub(crate) struct SoundBoard {
    context: Option<AudioContext>,
}

impl SoundBoard {
    const VOLUME: f32 = 0.2;

    pub(crate) fn play(&mut self, cue: Cue) {
        log::trace!("play {:?}", cue);
        if let Err(err) = self.try_play(cue) {
            log::error!("failed to play {:?}: {:?}", cue, err);
        }
    }

    fn context(&mut self) -> Result<&AudioContext, JsValue> {
        if self.context.is_none() {
            self.context = Some(AudioContext::new()?);
        }
        self.context
            .as_ref()
            .ok_or_else(|| JsValue::from_str("audio context unavailable"))
    }

    fn try_play(&mut self, cue: Cue) -> Result<(), JsValue> {
        let context = self.context()?;
        let gain = context.create_gain()?;
        gain.gain().set_value(Self::VOLUME);
        gain.connect_with_audio_node(&context.destination())?;

        let mut start = context.current_time();
        for &(frequency, ms) in cue.tones() {
            let end = start + f64::from(ms) / 1000.;
            let oscillator = context.create_oscillator()?;
            oscillator.set_type(OscillatorType::Sine);
            oscillator.frequency().set_value(frequency);
            oscillator.connect_with_audio_node(&gain)?;
            oscillator.start_with_when(start)?;
            oscillator.stop_with_when(end)?;
            start = end;
        }
        Ok(())
    }
}
