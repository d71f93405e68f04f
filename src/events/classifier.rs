/// Shelly BLU device classes, recognised from the advertised name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    WindowSensor,
    ButtonPad,
    TemperatureHumiditySensor,
    MotionSensor,
    Unknown,
}

// Checked in order, first match wins
const NAME_PATTERNS: [(&str, DeviceClass); 4] = [
    ("SBDW", DeviceClass::WindowSensor),
    ("SBBT", DeviceClass::ButtonPad),
    ("SBHT", DeviceClass::TemperatureHumiditySensor),
    ("SBMO", DeviceClass::MotionSensor),
];

impl DeviceClass {
    /// Classify a device by case-sensitive substring of its advertised name
    pub fn classify(advertised_name: &str) -> Self {
        NAME_PATTERNS
            .iter()
            .find(|(pattern, _)| advertised_name.contains(pattern))
            .map(|(_, class)| *class)
            .unwrap_or(DeviceClass::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_shelly_names() {
        assert_eq!(DeviceClass::classify("SBDW-002C"), DeviceClass::WindowSensor);
        assert_eq!(DeviceClass::classify("SBBT-004CEU"), DeviceClass::ButtonPad);
        assert_eq!(
            DeviceClass::classify("SBHT-003C"),
            DeviceClass::TemperatureHumiditySensor
        );
        assert_eq!(DeviceClass::classify("SBMO-003Z"), DeviceClass::MotionSensor);
    }

    #[test]
    fn matches_anywhere_in_name() {
        assert_eq!(
            DeviceClass::classify("Shelly SBHT kitchen"),
            DeviceClass::TemperatureHumiditySensor
        );
    }

    #[test]
    fn match_is_case_sensitive() {
        assert_eq!(DeviceClass::classify("sbdw-002c"), DeviceClass::Unknown);
    }

    #[test]
    fn first_pattern_wins() {
        assert_eq!(DeviceClass::classify("SBMO-SBDW"), DeviceClass::WindowSensor);
    }

    #[test]
    fn unknown_names() {
        assert_eq!(DeviceClass::classify(""), DeviceClass::Unknown);
        assert_eq!(DeviceClass::classify("ATC_1A2B3C"), DeviceClass::Unknown);
    }
}
