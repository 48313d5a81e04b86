//! City weather lookup.
//!
//! - `resolver`: geocoding suggestions and best-match resolution.
//! - `fetcher`: current conditions with hour-aligned humidity.
//! - `hour_key`: timestamp parsing and exact hour matching.
//! - `session`: debounced search box driving a `view::WeatherView`.
//! - `feedback`: Alfred script-filter items.

pub mod config;
pub mod debounce;
pub mod error;
pub mod feedback;
pub mod fetcher;
pub mod hour_key;
pub mod logging;
pub mod model;
pub mod providers;
pub mod resolver;
pub mod session;
pub mod view;
pub mod weather_code;

pub use error::{LookupError, Upstream};
pub use fetcher::WeatherFetcher;
pub use model::{LocationCandidate, WeatherReading};
pub use resolver::LocationResolver;
pub use session::{SearchSession, SuggestTicket};
pub use view::{PanelView, ReadingCard, WeatherView};
pub use weather_code::WeatherIcon;
