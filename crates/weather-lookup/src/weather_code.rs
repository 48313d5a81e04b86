use serde::{Deserialize, Serialize};

/// Coarse icon category for a WMO weather code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherIcon {
    Clear,
    PartlyCloudy,
    Cloudy,
    Fog,
    Rain,
    Snow,
    Thunder,
    Unknown,
}

/// Upper bounds are inclusive; the first band that fits wins.
const ICON_BANDS: [(i32, WeatherIcon); 7] = [
    (0, WeatherIcon::Clear),
    (1, WeatherIcon::PartlyCloudy),
    (3, WeatherIcon::Cloudy),
    (48, WeatherIcon::Fog),
    (67, WeatherIcon::Rain),
    (86, WeatherIcon::Snow),
    (95, WeatherIcon::Thunder),
];

impl WeatherIcon {
    pub fn from_code(code: i32) -> Self {
        if code < 0 {
            return Self::Unknown;
        }

        ICON_BANDS
            .iter()
            .find(|(upper, _)| code <= *upper)
            .map(|(_, icon)| *icon)
            .unwrap_or(Self::Unknown)
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::Clear => "fa-sun",
            Self::PartlyCloudy => "fa-cloud-sun",
            Self::Cloudy => "fa-cloud",
            Self::Fog => "fa-smog",
            Self::Rain => "fa-cloud-showers-heavy",
            Self::Snow => "fa-snowflake",
            Self::Thunder => "fa-bolt",
            Self::Unknown => "fa-question",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::PartlyCloudy => "Partly cloudy",
            Self::Cloudy => "Cloudy",
            Self::Fog => "Fog",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::Thunder => "Thunder",
            Self::Unknown => "Unknown",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Self::Clear => "☀",
            Self::PartlyCloudy => "⛅",
            Self::Cloudy => "☁",
            Self::Fog => "🌫",
            Self::Rain => "🌧",
            Self::Snow => "❄",
            Self::Thunder => "⚡",
            Self::Unknown => "?",
        }
    }
}
