use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use quiz_core::model::CheckoutLink;

use crate::error::ConfigError;

/// Lower bound for the single-select auto-advance delay.
pub const MIN_SELECT_DELAY: Duration = Duration::from_millis(300);

/// Upper bound for the single-select auto-advance delay.
pub const MAX_SELECT_DELAY: Duration = Duration::from_secs(2);

//
// ─── VARIANTS ──────────────────────────────────────────────────────────────────
//

/// Known presets of the funnel.
///
/// Both variants run the same controller; they only differ in timing,
/// selection-cap enforcement and sound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FunnelVariant {
    #[default]
    A,
    B,
}

impl FromStr for FunnelVariant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" => Ok(Self::A),
            "b" => Ok(Self::B),
            other => Err(ConfigError::UnknownVariant(other.to_string())),
        }
    }
}

impl fmt::Display for FunnelVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FunnelVariant::A => f.write_str("a"),
            FunnelVariant::B => f.write_str("b"),
        }
    }
}

//
// ─── CONFIG ────────────────────────────────────────────────────────────────────
//

/// Runtime knobs for one funnel session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunnelConfig {
    select_delay: Duration,
    analysis_duration: Duration,
    enforce_selection_cap: bool,
    sound_effects: bool,
    checkout_url: Option<CheckoutLink>,
}

impl Default for FunnelConfig {
    fn default() -> Self {
        Self::variant_a()
    }
}

impl FunnelConfig {
    /// 400 ms select delay, 5 s analysis, capped multi-select, silent.
    #[must_use]
    pub fn variant_a() -> Self {
        Self {
            select_delay: Duration::from_millis(400),
            analysis_duration: Duration::from_millis(5_000),
            enforce_selection_cap: true,
            sound_effects: false,
            checkout_url: None,
        }
    }

    /// 300 ms select delay, 6 s analysis, uncapped multi-select, click sound.
    #[must_use]
    pub fn variant_b() -> Self {
        Self {
            select_delay: Duration::from_millis(300),
            analysis_duration: Duration::from_millis(6_000),
            enforce_selection_cap: false,
            sound_effects: true,
            checkout_url: None,
        }
    }

    #[must_use]
    pub fn for_variant(variant: FunnelVariant) -> Self {
        match variant {
            FunnelVariant::A => Self::variant_a(),
            FunnelVariant::B => Self::variant_b(),
        }
    }

    #[must_use]
    pub fn with_select_delay(mut self, delay: Duration) -> Self {
        self.select_delay = delay;
        self
    }

    #[must_use]
    pub fn with_analysis_duration(mut self, duration: Duration) -> Self {
        self.analysis_duration = duration;
        self
    }

    #[must_use]
    pub fn with_selection_cap(mut self, enforce: bool) -> Self {
        self.enforce_selection_cap = enforce;
        self
    }

    #[must_use]
    pub fn with_sound_effects(mut self, enabled: bool) -> Self {
        self.sound_effects = enabled;
        self
    }

    #[must_use]
    pub fn with_checkout_url(mut self, link: CheckoutLink) -> Self {
        self.checkout_url = Some(link);
        self
    }

    /// Checks the timing values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::SelectDelayTooShort` or `SelectDelayTooLong` for an
    /// out-of-range select delay, and `ZeroAnalysisDuration` for a zero
    /// analysis duration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.select_delay < MIN_SELECT_DELAY {
            return Err(ConfigError::SelectDelayTooShort(self.select_delay));
        }
        if self.select_delay > MAX_SELECT_DELAY {
            return Err(ConfigError::SelectDelayTooLong(self.select_delay));
        }
        if self.analysis_duration.is_zero() {
            return Err(ConfigError::ZeroAnalysisDuration);
        }
        Ok(())
    }

    #[must_use]
    pub fn select_delay(&self) -> Duration {
        self.select_delay
    }

    #[must_use]
    pub fn analysis_duration(&self) -> Duration {
        self.analysis_duration
    }

    #[must_use]
    pub fn enforce_selection_cap(&self) -> bool {
        self.enforce_selection_cap
    }

    #[must_use]
    pub fn sound_effects(&self) -> bool {
        self.sound_effects
    }

    #[must_use]
    pub fn checkout_url(&self) -> Option<&CheckoutLink> {
        self.checkout_url.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_variant_a() {
        let config = FunnelConfig::default();
        assert_eq!(config.select_delay(), Duration::from_millis(400));
        assert_eq!(config.analysis_duration(), Duration::from_secs(5));
        assert!(config.enforce_selection_cap());
        assert!(!config.sound_effects());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn variant_b_differs_only_in_knobs() {
        let config = FunnelConfig::for_variant(FunnelVariant::B);
        assert_eq!(config.select_delay(), Duration::from_millis(300));
        assert_eq!(config.analysis_duration(), Duration::from_secs(6));
        assert!(!config.enforce_selection_cap());
        assert!(config.sound_effects());
    }

    #[test]
    fn short_select_delay_is_rejected() {
        for delay in [Duration::ZERO, Duration::from_nanos(1), Duration::from_millis(299)] {
            let config = FunnelConfig::default().with_select_delay(delay);
            assert_eq!(config.validate(), Err(ConfigError::SelectDelayTooShort(delay)));
        }
        let config = FunnelConfig::default().with_select_delay(MIN_SELECT_DELAY);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn long_select_delay_is_rejected() {
        let config = FunnelConfig::default().with_select_delay(Duration::from_secs(3));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SelectDelayTooLong(_))
        ));
    }

    #[test]
    fn zero_analysis_is_rejected() {
        let config = FunnelConfig::default().with_analysis_duration(Duration::ZERO);
        assert_eq!(config.validate(), Err(ConfigError::ZeroAnalysisDuration));
    }

    #[test]
    fn parses_variant_names() {
        assert_eq!("B".parse::<FunnelVariant>(), Ok(FunnelVariant::B));
        assert_eq!(
            "c".parse::<FunnelVariant>(),
            Err(ConfigError::UnknownVariant("c".to_string()))
        );
    }
}
