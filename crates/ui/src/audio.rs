//! Click sound played when an option is picked.
//!
//! The audio context is a scoped resource: the quiz screen acquires it on
//! mount and releases it on unmount, so nothing keeps running once the
//! funnel is gone. When effects are disabled every script is `None` and the
//! webview never touches the audio API.

const STATE: &str = "window.__quizSfx";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SoundEffects {
    enabled: bool,
}

impl SoundEffects {
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    #[must_use]
    pub fn acquire_script(self) -> Option<String> {
        self.enabled.then(|| {
            format!(
                r"(function() {{
                    const Ctx = window.AudioContext || window.webkitAudioContext;
                    if (!Ctx || {STATE}) return;
                    {STATE} = {{ ctx: new Ctx() }};
                }})();"
            )
        })
    }

    #[must_use]
    pub fn click_script(self) -> Option<String> {
        self.enabled.then(|| {
            format!(
                r#"(function() {{
                    const sfx = {STATE};
                    if (!sfx) return;
                    const ctx = sfx.ctx;
                    if (ctx.state === "suspended") ctx.resume();
                    const osc = ctx.createOscillator();
                    const gain = ctx.createGain();
                    osc.type = "sine";
                    osc.frequency.setValueAtTime(660, ctx.currentTime);
                    gain.gain.setValueAtTime(0.08, ctx.currentTime);
                    gain.gain.exponentialRampToValueAtTime(0.001, ctx.currentTime + 0.12);
                    osc.connect(gain);
                    gain.connect(ctx.destination);
                    osc.start();
                    osc.stop(ctx.currentTime + 0.12);
                }})();"#
            )
        })
    }

    #[must_use]
    pub fn release_script(self) -> Option<String> {
        self.enabled.then(|| {
            format!(
                r"(function() {{
                    const sfx = {STATE};
                    if (!sfx) return;
                    {STATE} = null;
                    sfx.ctx.close();
                }})();"
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_effects_emit_no_scripts() {
        let sfx = SoundEffects::new(false);
        assert!(sfx.acquire_script().is_none());
        assert!(sfx.click_script().is_none());
        assert!(sfx.release_script().is_none());
    }

    #[test]
    fn enabled_effects_share_one_audio_context() {
        let sfx = SoundEffects::new(true);
        let acquire = sfx.acquire_script().unwrap();
        let release = sfx.release_script().unwrap();
        assert!(acquire.contains("window.__quizSfx = { ctx: new Ctx() }"));
        assert!(release.contains("sfx.ctx.close()"));
        assert!(sfx.click_script().unwrap().contains("createOscillator"));
    }
}
