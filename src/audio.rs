//! Audio cues
//!
//! Jump and death effects are synthesized with the Web Audio API; the
//! background track is a looping media element. Every failure is ignored:
//! the game plays on silently.

/// One-shot sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Avatar jumped
    Jump,
    /// Run ended
    Death,
}

/// Fire-and-forget audio sink
pub trait AudioCues {
    /// Play a cue from its beginning
    fn play(&mut self, cue: Cue);
    /// Start the background loop from the top
    fn start_music(&mut self);
    /// Stop the background loop and rewind it
    fn stop_music(&mut self);
}

/// No-op sink that remembers what it was asked to do
#[derive(Debug, Clone, Default)]
pub struct SilentAudio {
    pub played: Vec<Cue>,
    pub music_playing: bool,
}

impl AudioCues for SilentAudio {
    fn play(&mut self, cue: Cue) {
        self.played.push(cue);
    }

    fn start_music(&mut self) {
        self.music_playing = true;
    }

    fn stop_music(&mut self) {
        self.music_playing = false;
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen_futures::{JsFuture, spawn_local};
    use web_sys::{AudioContext, GainNode, HtmlAudioElement, OscillatorNode, OscillatorType};

    use super::{AudioCues, Cue};
    use crate::settings::Settings;

    /// Background track location
    const MUSIC_SRC: &str = "./assets/bcg.mp3";

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        music: Option<HtmlAudioElement>,
        master_volume: f32,
        sfx_volume: f32,
        muted: bool,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - effects disabled");
            }

            let music = HtmlAudioElement::new_with_src(MUSIC_SRC).ok();
            match &music {
                Some(music) => {
                    music.set_loop(true);
                    music.set_volume(settings.effective_music_volume() as f64);
                }
                None => log::warn!("Failed to create music element - music disabled"),
            }

            Self {
                ctx,
                music,
                master_volume: settings.master_volume,
                sfx_volume: settings.sfx_volume,
                muted: settings.muted,
            }
        }

        fn effective_volume(&self) -> f32 {
            if self.muted {
                0.0
            } else {
                self.master_volume * self.sfx_volume
            }
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Jump - quick upward chirp
        fn play_jump(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 400.0, OscillatorType::Sine) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.4, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                .ok();
            osc.frequency().set_value_at_time(400.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(800.0, t + 0.08)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.14).ok();
        }

        /// Death - falling sawtooth over a descending sine line
        fn play_death(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();

            if let Some((osc, gain)) = self.create_osc(ctx, 400.0, OscillatorType::Sawtooth) {
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.5)
                    .ok();
                osc.frequency().set_value_at_time(400.0, t).ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(80.0, t + 0.4)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.55).ok();
            }

            for (i, freq) in [350.0, 300.0, 200.0].iter().enumerate() {
                let delay = i as f64 * 0.15;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                    let t = t + delay;
                    gain.gain().set_value_at_time(vol * 0.2, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.3).ok();
                }
            }
        }
    }

    impl AudioCues for AudioManager {
        fn play(&mut self, cue: Cue) {
            let vol = self.effective_volume();
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Browsers keep the context suspended until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match cue {
                Cue::Jump => self.play_jump(ctx, vol),
                Cue::Death => self.play_death(ctx, vol),
            }
        }

        fn start_music(&mut self) {
            if self.muted {
                return;
            }
            if let Some(music) = &self.music {
                music.set_current_time(0.0);
                // Autoplay blocking rejects the returned promise later
                match music.play() {
                    Ok(promise) => spawn_local(async move {
                        if JsFuture::from(promise).await.is_err() {
                            log::info!("Background music play blocked");
                        }
                    }),
                    Err(_) => log::info!("Background music unavailable"),
                }
            }
        }

        fn stop_music(&mut self) {
            if let Some(music) = &self.music {
                let _ = music.pause();
                music.set_current_time(0.0);
            }
        }
    }
}
