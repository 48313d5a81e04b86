//! Render surface for the search session.
//!
//! The session never looks regions up on its own; it is handed a
//! `WeatherView` and pushes state into it.

use serde::{Deserialize, Serialize};

use crate::model::{LocationCandidate, WeatherReading};
use crate::weather_code::WeatherIcon;

pub const HUMIDITY_PLACEHOLDER: &str = "--";

/// Display strings for one reading at one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingCard {
    pub title: String,
    pub temperature: String,
    pub icon: WeatherIcon,
    pub humidity: String,
    pub wind_speed: String,
    pub wind_direction: String,
}

impl ReadingCard {
    pub fn new(location: &LocationCandidate, reading: &WeatherReading) -> Self {
        Self {
            title: location.label(),
            temperature: format!("{}°C", reading.temperature_c),
            icon: WeatherIcon::from_code(reading.condition_code),
            humidity: reading
                .humidity_pct
                .map(|value| format!("{value}%"))
                .unwrap_or_else(|| HUMIDITY_PLACEHOLDER.to_string()),
            wind_speed: format!("{} km/h", reading.wind_speed_kmh),
            wind_direction: format!("{}°", reading.wind_direction_deg),
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "{} {} {}",
            self.icon.glyph(),
            self.icon.label(),
            self.temperature
        )
    }

    pub fn to_lines(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.summary(),
            format!("Humidity: {}", self.humidity),
            format!("Wind: {}", self.wind_speed),
            format!("Direction: {}", self.wind_direction),
        ]
    }
}

pub trait WeatherView {
    fn set_input(&mut self, text: &str);
    fn show_suggestions(&mut self, candidates: &[LocationCandidate]);
    fn clear_suggestions(&mut self);
    fn show_reading(&mut self, card: &ReadingCard);
    /// Replaces any message already on screen.
    fn show_error(&mut self, message: &str);
    fn clear_error(&mut self);
}

/// In-memory panel: what a user would currently see.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelView {
    pub input: String,
    pub suggestions: Vec<String>,
    pub card: Option<ReadingCard>,
    pub error: Option<String>,
}

impl WeatherView for PanelView {
    fn set_input(&mut self, text: &str) {
        self.input = text.to_string();
    }

    fn show_suggestions(&mut self, candidates: &[LocationCandidate]) {
        self.suggestions = candidates.iter().map(LocationCandidate::label).collect();
    }

    fn clear_suggestions(&mut self) {
        self.suggestions.clear();
    }

    fn show_reading(&mut self, card: &ReadingCard) {
        self.card = Some(card.clone());
    }

    fn show_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }

    fn clear_error(&mut self) {
        self.error = None;
    }
}

impl<V: WeatherView + ?Sized> WeatherView for &mut V {
    fn set_input(&mut self, text: &str) {
        (**self).set_input(text);
    }

    fn show_suggestions(&mut self, candidates: &[LocationCandidate]) {
        (**self).show_suggestions(candidates);
    }

    fn clear_suggestions(&mut self) {
        (**self).clear_suggestions();
    }

    fn show_reading(&mut self, card: &ReadingCard) {
        (**self).show_reading(card);
    }

    fn show_error(&mut self, message: &str) {
        (**self).show_error(message);
    }

    fn clear_error(&mut self) {
        (**self).clear_error();
    }
}

impl PanelView {
    /// Plain-text rendering of the panel.
    pub fn render(&self) -> String {
        let mut lines = vec![format!("> {}", self.input)];

        for (index, label) in self.suggestions.iter().enumerate() {
            lines.push(format!("  [{}] {label}", index + 1));
        }
        if let Some(card) = &self.card {
            lines.extend(card.to_lines());
        }
        if let Some(error) = &self.error {
            lines.push(format!("! {error}"));
        }

        lines.join("\n")
    }
}
