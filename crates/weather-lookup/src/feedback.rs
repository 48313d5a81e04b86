//! Alfred script-filter output.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::{LocationCandidate, coordinate_label};
use crate::view::ReadingCard;

const NO_SUGGESTIONS_TITLE: &str = "No matching cities";
const NO_SUGGESTIONS_SUBTITLE: &str = "Keep typing, or press Enter to search anyway.";
const ERROR_TITLE_PREFIX: &str = "Error";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Feedback {
    pub items: Vec<Item>,
}

impl Feedback {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Item {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arg: Option<String>,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autocomplete: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub variables: BTreeMap<String, String>,
}

impl Item {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            arg: None,
            valid: false,
            autocomplete: None,
            variables: BTreeMap::new(),
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.arg = Some(arg.into());
        self.valid = true;
        self
    }

    pub fn with_autocomplete(mut self, autocomplete: impl Into<String>) -> Self {
        self.autocomplete = Some(autocomplete.into());
        self
    }

    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }
}

/// One actionable item per candidate; coordinates travel as variables so the
/// next step can skip geocoding.
pub fn suggestions_feedback(candidates: &[LocationCandidate]) -> Feedback {
    if candidates.is_empty() {
        return Feedback::new(vec![
            Item::new(NO_SUGGESTIONS_TITLE).with_subtitle(NO_SUGGESTIONS_SUBTITLE),
        ]);
    }

    Feedback::new(
        candidates
            .iter()
            .map(|candidate| {
                let label = candidate.label();
                Item::new(&label)
                    .with_subtitle(coordinate_label(candidate.latitude, candidate.longitude))
                    .with_arg(&label)
                    .with_autocomplete(&label)
                    .with_variable("name", &candidate.name)
                    .with_variable("country", &candidate.country)
                    .with_variable("lat", candidate.latitude.to_string())
                    .with_variable("lon", candidate.longitude.to_string())
            })
            .collect(),
    )
}

pub fn reading_feedback(card: &ReadingCard) -> Feedback {
    Feedback::new(vec![
        Item::new(format!("{} {}", card.title, card.temperature))
            .with_subtitle(format!("{} {}", card.icon.glyph(), card.icon.label()))
            .with_arg(&card.title),
        Item::new(format!("Humidity: {}", card.humidity)),
        Item::new(format!("Wind: {}", card.wind_speed))
            .with_subtitle(format!("Direction: {}", card.wind_direction)),
    ])
}

pub fn error_feedback(code: &str, message: &str) -> Feedback {
    Feedback::new(vec![
        Item::new(format!("{ERROR_TITLE_PREFIX} [{code}]")).with_subtitle(message),
    ])
}
