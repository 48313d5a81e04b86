use std::time::Instant;

use tracing::{debug, info};

use crate::config::RuntimeConfig;
use crate::debounce::{Debouncer, SuggestionGate};
use crate::error::LookupError;
use crate::fetcher::WeatherFetcher;
use crate::model::LocationCandidate;
use crate::providers::ProviderApi;
use crate::resolver::LocationResolver;
use crate::view::{ReadingCard, WeatherView};

/// A suggestion request in flight, tagged with its sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestTicket {
    pub seq: u64,
    pub query: String,
}

/// Drives one search box: debounced autocomplete, selection and submit.
pub struct SearchSession<P, V> {
    resolver: LocationResolver<P>,
    fetcher: WeatherFetcher<P>,
    view: V,
    debouncer: Debouncer,
    gate: SuggestionGate,
    input: String,
    suggestions: Vec<LocationCandidate>,
}

impl<P, V> SearchSession<P, V>
where
    P: ProviderApi + Clone,
    V: WeatherView,
{
    pub fn new(providers: P, view: V, config: &RuntimeConfig) -> Self {
        Self {
            resolver: LocationResolver::new(providers.clone(), config.suggest_limit),
            fetcher: WeatherFetcher::new(providers),
            view,
            debouncer: Debouncer::new(config.debounce()),
            gate: SuggestionGate::default(),
            input: String::new(),
            suggestions: Vec::new(),
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn input_text(&self) -> &str {
        &self.input
    }

    pub fn suggestions(&self) -> &[LocationCandidate] {
        &self.suggestions
    }

    pub fn has_pending_suggestion(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// A keystroke: records the text and restarts the quiet period.
    pub fn input(&mut self, text: &str, now: Instant) {
        self.input = text.to_string();
        self.view.set_input(text);
        self.debouncer.schedule(text.trim(), now);
    }

    /// Fires the pending suggestion query once it is due. Returns whether
    /// anything fired.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(query) = self.debouncer.take_due(now) else {
            return false;
        };

        if query.is_empty() {
            self.gate.invalidate();
            self.set_suggestions(Vec::new());
            return true;
        }

        let ticket = self.begin_suggest(query);
        let candidates = self.resolver.suggest(&ticket.query);
        self.complete_suggest(ticket, candidates);
        true
    }

    pub fn begin_suggest(&mut self, query: impl Into<String>) -> SuggestTicket {
        SuggestTicket {
            seq: self.gate.issue(),
            query: query.into(),
        }
    }

    /// Renders `candidates` unless a newer request has been issued since
    /// `ticket`. Returns whether they were rendered.
    pub fn complete_suggest(
        &mut self,
        ticket: SuggestTicket,
        candidates: Vec<LocationCandidate>,
    ) -> bool {
        if !self.gate.is_current(ticket.seq) {
            debug!(seq = ticket.seq, query = %ticket.query, "discarding stale suggestions");
            return false;
        }

        self.set_suggestions(candidates);
        true
    }

    /// Click outside the suggestion list.
    pub fn dismiss_suggestions(&mut self) {
        self.set_suggestions(Vec::new());
    }

    /// Picks an entry from the suggestion list and loads its weather.
    pub fn select(&mut self, candidate: LocationCandidate) -> Result<ReadingCard, LookupError> {
        let label = candidate.label();
        self.input = label.clone();
        self.view.set_input(&label);
        self.settle_for_search();

        self.load_weather(&candidate)
    }

    /// Enter key or the search button.
    pub fn submit(&mut self) -> Result<ReadingCard, LookupError> {
        self.settle_for_search();

        let location = match self.resolver.resolve_by_name(&self.input) {
            Ok(location) => location,
            Err(error) => {
                self.report(&error);
                return Err(error);
            }
        };

        self.load_weather(&location)
    }

    fn load_weather(&mut self, location: &LocationCandidate) -> Result<ReadingCard, LookupError> {
        let outcome = self
            .fetcher
            .fetch(location.latitude, location.longitude)
            .map(|reading| ReadingCard::new(location, &reading));

        match &outcome {
            Ok(card) => {
                info!(location = %card.title, temperature = %card.temperature, "weather rendered");
                self.view.show_reading(card);
            }
            Err(error) => self.report(error),
        }
        outcome
    }

    fn settle_for_search(&mut self) {
        self.debouncer.cancel();
        self.gate.invalidate();
        self.set_suggestions(Vec::new());
        self.view.clear_error();
    }

    fn set_suggestions(&mut self, candidates: Vec<LocationCandidate>) {
        if candidates.is_empty() {
            self.view.clear_suggestions();
        } else {
            self.view.show_suggestions(&candidates);
        }
        self.suggestions = candidates;
    }

    fn report(&mut self, error: &LookupError) {
        debug!(%error, "lookup failed");
        self.view.show_error(error.user_message());
    }
}
