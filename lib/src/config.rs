use crate::consts::*;
use crate::errors::*;

use smart_default::SmartDefault;

/// The fixed two-level toggle scheme: one threshold, two target levels.
///
/// The defaults are the compiled-in levels; there is no configuration file.
#[derive(Clone, Copy, Debug, SmartDefault)]
pub struct ToggleConfig {
    /// Reading above which [`ToggleConfig::target_for`] picks `low`
    #[default(BRIGHTNESS_THRESHOLD)]
    pub threshold: f64,

    /// Target level for bright readings
    #[default(LOW_TARGET)]
    pub low: f64,

    /// Target level for dim readings
    #[default(HIGH_TARGET)]
    pub high: f64,
}

impl ToggleConfig {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.low > self.high {
            return Err(TogglebrightError::InvalidToggleLevels {
                low: self.low,
                high: self.high,
            });
        }
        Ok(())
    }

    /// The level to apply for the given brightness reading. Strictly above
    /// the threshold goes to `low`; everything else, the threshold itself
    /// included, goes to `high`.
    pub fn target_for(&self, reading: f64) -> f64 {
        if reading > self.threshold {
            self.low
        } else {
            self.high
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bright_reading_goes_low() {
        let config = ToggleConfig::default();
        assert_eq!(config.target_for(0.90), LOW_TARGET);
        assert_eq!(config.target_for(0.86), LOW_TARGET);
    }

    #[test]
    fn dim_reading_goes_high() {
        let config = ToggleConfig::default();
        assert_eq!(config.target_for(0.50), HIGH_TARGET);
        assert_eq!(config.target_for(0.0), HIGH_TARGET);
    }

    #[test]
    fn threshold_reading_goes_high() {
        let config = ToggleConfig::default();
        assert_eq!(config.target_for(BRIGHTNESS_THRESHOLD), HIGH_TARGET);
    }

    #[test]
    fn defaults_are_the_compiled_levels() {
        let config = ToggleConfig::default();
        assert_eq!(config.threshold, 0.85);
        assert_eq!(config.low, 0.75);
        assert_eq!(config.high, 0.95);
    }

    #[test]
    fn inverted_levels_are_rejected() {
        let config = ToggleConfig {
            low: 0.9,
            high: 0.2,
            ..ToggleConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(TogglebrightError::InvalidToggleLevels { .. })
        ));
    }

    #[test]
    fn equal_levels_are_allowed() {
        let config = ToggleConfig {
            low: 0.8,
            high: 0.8,
            ..ToggleConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
