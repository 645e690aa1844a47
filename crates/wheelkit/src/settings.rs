use crate::error::WheelError;
use crate::panel::PanelField;
use serde::{Deserialize, Serialize};
use serde_with::{DurationMilliSeconds, serde_as};
use std::time::Duration;

pub const TARGET_POSITION: f64 = 270.12; // active slot, degrees
pub const PROXIMITY_TOLERANCE: f64 = 5.0;
pub const AUTO_ROTATE_SPEED: f64 = 0.08; // degrees per tick
pub const TICK_PERIOD: Duration = Duration::from_millis(20);
pub const FADE_OUT: Duration = Duration::from_millis(300);
pub const REVEAL_TITLE: Duration = Duration::from_millis(50);
pub const REVEAL_DESCRIPTION: Duration = Duration::from_millis(200);
pub const REVEAL_BUTTON: Duration = Duration::from_millis(350);
pub const ITEM_CLICK_COOLDOWN: Duration = Duration::from_millis(5000);
pub const NAVIGATION_COOLDOWN: Duration = Duration::from_millis(3000);
pub const TRUNCATE_WORDS: usize = 3;
pub const NARROW_BREAKPOINT: u32 = 768;
pub const ELLIPSIS: &str = "...";

/// Tunables of a single wheel. Every field falls back to its default when
/// absent from the config.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelSettings {
    pub target_position: f64,
    pub tolerance: f64,
    pub speed: f64,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "tick_period_ms")]
    pub tick_period: Duration,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "fade_out_ms")]
    pub fade_out: Duration,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "reveal_title_ms")]
    pub reveal_title: Duration,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "reveal_description_ms")]
    pub reveal_description: Duration,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "reveal_button_ms")]
    pub reveal_button: Duration,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "click_cooldown_ms")]
    pub click_cooldown: Duration,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "navigation_cooldown_ms")]
    pub navigation_cooldown: Duration,
    pub truncate_words: usize,
    pub narrow_breakpoint: u32,
}

impl Default for WheelSettings {
    fn default() -> Self {
        Self {
            target_position: TARGET_POSITION,
            tolerance: PROXIMITY_TOLERANCE,
            speed: AUTO_ROTATE_SPEED,
            tick_period: TICK_PERIOD,
            fade_out: FADE_OUT,
            reveal_title: REVEAL_TITLE,
            reveal_description: REVEAL_DESCRIPTION,
            reveal_button: REVEAL_BUTTON,
            click_cooldown: ITEM_CLICK_COOLDOWN,
            navigation_cooldown: NAVIGATION_COOLDOWN,
            truncate_words: TRUNCATE_WORDS,
            narrow_breakpoint: NARROW_BREAKPOINT,
        }
    }
}

impl WheelSettings {
    pub fn reveal_delay(&self, field: PanelField) -> Duration {
        match field {
            PanelField::Title => self.reveal_title,
            PanelField::Description => self.reveal_description,
            PanelField::Button => self.reveal_button,
        }
    }

    pub fn is_narrow(&self, viewport_width: u32) -> bool {
        viewport_width <= self.narrow_breakpoint
    }

    /// Rejects values the wheel cannot run with: a reversing or non-finite
    /// speed, a tolerance that never matches and a zero tick period.
    pub fn validate(&self) -> Result<(), WheelError> {
        let invalid = |field, reason: String| Err(WheelError::InvalidSetting { field, reason });

        if !self.target_position.is_finite() {
            return invalid(
                "target_position",
                format!("{} is not a number of degrees", self.target_position),
            );
        }
        if !self.speed.is_finite() || self.speed < 0.0 {
            return invalid("speed", format!("{} is not a forward speed", self.speed));
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return invalid("tolerance", format!("{} must be positive", self.tolerance));
        }
        if self.tick_period.is_zero() {
            return invalid("tick_period_ms", "must be at least 1".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings_keep_defaults() {
        let json = r#"{ "tolerance": 2.5, "tick_period_ms": 40 }"#;
        let settings: WheelSettings = serde_json::from_str(json).unwrap();

        assert_eq!(settings.tolerance, 2.5);
        assert_eq!(settings.tick_period, Duration::from_millis(40));
        assert_eq!(settings.target_position, TARGET_POSITION);
        assert_eq!(settings.click_cooldown, ITEM_CLICK_COOLDOWN);
        assert_eq!(settings.truncate_words, TRUNCATE_WORDS);
    }

    #[test]
    fn test_reveal_delays_are_staggered() {
        let settings = WheelSettings::default();
        let title = settings.reveal_delay(PanelField::Title);
        let description = settings.reveal_delay(PanelField::Description);
        let button = settings.reveal_delay(PanelField::Button);

        assert!(title < description && description < button);
    }

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(WheelSettings::default().validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_unusable_values() {
        let field_of = |json: &str| {
            let settings: WheelSettings = serde_json::from_str(json).unwrap();
            match settings.validate() {
                Err(WheelError::InvalidSetting { field, .. }) => Some(field),
                _ => None,
            }
        };

        assert_eq!(field_of(r#"{ "speed": -0.08 }"#), Some("speed"));
        assert_eq!(field_of(r#"{ "tolerance": 0.0 }"#), Some("tolerance"));
        assert_eq!(field_of(r#"{ "tolerance": -1.0 }"#), Some("tolerance"));
        assert_eq!(field_of(r#"{ "tick_period_ms": 0 }"#), Some("tick_period_ms"));
        assert_eq!(field_of(r#"{ "speed": 0.0 }"#), None);
    }

    #[test]
    fn test_breakpoint_is_inclusive() {
        let settings = WheelSettings::default();
        assert!(settings.is_narrow(768));
        assert!(!settings.is_narrow(769));
    }
}
