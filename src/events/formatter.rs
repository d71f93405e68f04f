/// Turn decoded readings into `<device>/<field>:<value>` event strings
use super::classifier::DeviceClass;
use crate::models::Readings;

/// Button value reported while a button is held; such packets are not relayed
const BUTTON_HOLD: f64 = 254.0;
/// Button value normalized to released
const BUTTON_RELEASE: f64 = 4.0;
const BUTTON_SLOTS: usize = 4;

fn format_value(value: Option<f64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "undefined".to_string(),
    }
}

fn field_event(device_name: &str, readings: &Readings, field: &str) -> String {
    format!(
        "{}/{}:{}",
        device_name,
        field,
        format_value(readings.get(field))
    )
}

/// Build the events for one decoded packet
///
/// Missing readings are rendered as `undefined` rather than skipped.
///
/// # Arguments
/// * `class` - Device class from the advertised name
/// * `readings` - Decoded BTHome readings
/// * `device_name` - Friendly name for the sender address
/// * `button_label` - Fixed label used for button press events
///
/// # Returns
/// None if a held button suppresses the whole packet, otherwise the events
/// in emission order (empty for unknown devices)
pub fn format_events(
    class: DeviceClass,
    readings: &Readings,
    device_name: &str,
    button_label: &str,
) -> Option<Vec<String>> {
    let events = match class {
        DeviceClass::WindowSensor => ["illuminance", "window", "rotation"]
            .iter()
            .map(|field| field_event(device_name, readings, field))
            .collect(),
        DeviceClass::TemperatureHumiditySensor => ["temperature", "humidity"]
            .iter()
            .map(|field| field_event(device_name, readings, field))
            .collect(),
        DeviceClass::MotionSensor => vec![field_event(device_name, readings, "motion")],
        DeviceClass::ButtonPad => return button_events(readings, device_name, button_label),
        DeviceClass::Unknown => Vec::new(),
    };

    Some(events)
}

fn button_events(
    readings: &Readings,
    device_name: &str,
    button_label: &str,
) -> Option<Vec<String>> {
    let mut presses = Vec::with_capacity(BUTTON_SLOTS);
    let mut resets = Vec::with_capacity(BUTTON_SLOTS);

    for slot in 0..BUTTON_SLOTS {
        let number = slot + 1;
        let value = readings.get(&format!("button{}", slot));

        if value == Some(BUTTON_HOLD) {
            return None;
        }

        let value = value.map(|v| if v == BUTTON_RELEASE { 0.0 } else { v });
        if let Some(v) = value.filter(|v| *v >= 0.0) {
            presses.push(format!("{}_{}:{}", button_label, number, v));
        }
        resets.push(format!("{}_{}:0", device_name, number));
    }

    presses.extend(resets);
    Some(presses)
}
