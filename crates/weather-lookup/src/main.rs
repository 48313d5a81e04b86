use std::io::{BufRead, Write};
use std::time::Instant;

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use tracing::debug;

use weather_lookup::{
    LocationCandidate, LocationResolver, LookupError, PanelView, ReadingCard, SearchSession,
    WeatherFetcher, WeatherReading, WeatherView,
    config::RuntimeConfig,
    error::{
        AppError, ERROR_CODE_RUNTIME_IO, ERROR_CODE_RUNTIME_PROVIDER_INIT,
        ERROR_CODE_RUNTIME_SERIALIZE, ERROR_CODE_USER_OUTPUT_MODE_CONFLICT,
    },
    feedback, logging,
    model::{LocationQuery, coordinate_label},
    providers::{HttpProviders, ProviderApi},
};

#[derive(Debug, Parser)]
#[command(author, version, about = "City weather lookup (Open-Meteo, no token required)")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Autocomplete city names (at most 5 matches).
    Suggest {
        #[arg(long)]
        query: String,
        #[arg(long, value_enum)]
        output: Option<OutputModeArg>,
        #[arg(long)]
        json: bool,
    },
    /// Current weather for a city name or a coordinate pair.
    Current {
        #[arg(long)]
        city: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        lat: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        lon: Option<f64>,
        /// Display name for --lat/--lon.
        #[arg(long)]
        name: Option<String>,
        /// Display country for --lat/--lon.
        #[arg(long)]
        country: Option<String>,
        #[arg(long, value_enum)]
        output: Option<OutputModeArg>,
        #[arg(long)]
        json: bool,
    },
    /// Line-driven search box: type text, `:N` picks suggestion N, an empty
    /// line or `:` searches, `:dismiss` closes the list, `:quit` exits.
    Interactive,
}

const ENVELOPE_SCHEMA_VERSION: &str = "v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputModeArg {
    Human,
    Json,
    AlfredJson,
}

impl Cli {
    fn command_name(&self) -> &'static str {
        match &self.command {
            Commands::Suggest { .. } => "weather.suggest",
            Commands::Current { .. } => "weather.current",
            Commands::Interactive => "weather.interactive",
        }
    }

    fn output_mode_hint(&self) -> OutputModeArg {
        match &self.command {
            Commands::Suggest { output, json, .. } | Commands::Current { output, json, .. } => {
                if *json {
                    OutputModeArg::Json
                } else {
                    output.unwrap_or(OutputModeArg::Human)
                }
            }
            Commands::Interactive => OutputModeArg::Human,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let command = cli.command_name();
    let output_mode = cli.output_mode_hint();
    let config = RuntimeConfig::from_env();
    logging::init(&config.log_filter);

    match run(cli, &config) {
        Ok(output) if output.is_empty() => {}
        Ok(output) => println!("{output}"),
        Err(error) => {
            emit_error(command, output_mode, &error);
            std::process::exit(error.exit_code());
        }
    }
}

fn run(cli: Cli, config: &RuntimeConfig) -> Result<String, AppError> {
    let providers = HttpProviders::new(config)
        .map_err(|error| AppError::runtime(ERROR_CODE_RUNTIME_PROVIDER_INIT, error.to_string()))?;

    if let Commands::Interactive = cli.command {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        run_interactive(config, &providers, stdin.lock(), stdout.lock(), Instant::now)?;
        return Ok(String::new());
    }

    run_with(cli, config, &providers)
}

fn run_with<P>(cli: Cli, config: &RuntimeConfig, providers: &P) -> Result<String, AppError>
where
    P: ProviderApi,
{
    match cli.command {
        Commands::Suggest {
            query,
            output,
            json,
        } => {
            let mode = resolve_output_mode(output, json)?;
            let resolver = LocationResolver::new(providers, config.suggest_limit);
            let suggestions = resolver.suggest(&query);
            render_suggestions(mode, query.trim(), &suggestions)
        }
        Commands::Current {
            city,
            lat,
            lon,
            name,
            country,
            output,
            json,
        } => {
            let mode = resolve_output_mode(output, json)?;
            let query = LocationQuery::new(
                city.as_deref(),
                lat,
                lon,
                name.as_deref(),
                country.as_deref(),
            )?;
            let (location, reading) = lookup_current(providers, &query)?;
            render_current(mode, &location, &reading)
        }
        Commands::Interactive => Ok(String::new()),
    }
}

fn lookup_current<P: ProviderApi>(
    providers: &P,
    query: &LocationQuery,
) -> Result<(LocationCandidate, WeatherReading), LookupError> {
    let location = match query {
        LocationQuery::City(city) => LocationResolver::new(providers, 1).resolve_by_name(city)?,
        LocationQuery::Coordinates(candidate) => candidate.clone(),
    };
    let reading = WeatherFetcher::new(providers).fetch(location.latitude, location.longitude)?;
    Ok((location, reading))
}

fn run_interactive<P, R, W, N>(
    config: &RuntimeConfig,
    providers: &P,
    reader: R,
    mut writer: W,
    now_fn: N,
) -> Result<(), AppError>
where
    P: ProviderApi,
    R: BufRead,
    W: Write,
    N: Fn() -> Instant,
{
    let mut session = SearchSession::new(providers, PanelView::default(), config);

    for line in reader.lines() {
        let line = line.map_err(io_error)?;
        let command = line.trim_end_matches(['\r', '\n']);

        match command.strip_prefix(':') {
            Some("quit") => break,
            Some("dismiss") => session.dismiss_suggestions(),
            Some(index) if !index.trim().is_empty() => {
                let index = index.trim();
                let picked = index
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|n| session.suggestions().get(n).cloned());
                match picked {
                    // The session has already put the message on the panel.
                    Some(candidate) => {
                        if let Err(error) = session.select(candidate) {
                            debug!(%error, "interactive selection failed");
                        }
                    }
                    None => writeln!(writer, "no suggestion '{index}'").map_err(io_error)?,
                }
            }
            Some(_) => submit_interactive(&mut session),
            None if command.trim().is_empty() => submit_interactive(&mut session),
            None => {
                // One line is one burst of typing followed by a pause.
                session.input(command, now_fn());
                if let Some(deadline) = session.next_deadline() {
                    session.poll(deadline);
                }
            }
        }

        writeln!(writer, "{}\n", session.view().render()).map_err(io_error)?;
    }

    writer.flush().map_err(io_error)
}

fn submit_interactive<P, V>(session: &mut SearchSession<P, V>)
where
    P: ProviderApi + Clone,
    V: WeatherView,
{
    // Failures are already rendered on the panel.
    if let Err(error) = session.submit() {
        debug!(%error, "interactive search failed");
    }
}

fn io_error(error: std::io::Error) -> AppError {
    AppError::runtime(ERROR_CODE_RUNTIME_IO, error.to_string())
}

fn resolve_output_mode(
    output: Option<OutputModeArg>,
    json_flag: bool,
) -> Result<OutputModeArg, AppError> {
    match (output, json_flag) {
        (Some(mode), true) if mode != OutputModeArg::Json => Err(AppError::user(
            ERROR_CODE_USER_OUTPUT_MODE_CONFLICT,
            format!(
                "conflicting output flags: --json requires --output json (got {})",
                output_mode_label(mode)
            ),
        )),
        (Some(mode), _) => Ok(mode),
        (None, true) => Ok(OutputModeArg::Json),
        (None, false) => Ok(OutputModeArg::Human),
    }
}

fn render_suggestions(
    mode: OutputModeArg,
    query: &str,
    suggestions: &[LocationCandidate],
) -> Result<String, AppError> {
    match mode {
        OutputModeArg::Human => Ok(suggestions
            .iter()
            .enumerate()
            .map(|(index, candidate)| {
                format!(
                    "{}. {} ({})",
                    index + 1,
                    candidate.label(),
                    coordinate_label(candidate.latitude, candidate.longitude)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")),
        OutputModeArg::Json => render_envelope(
            "weather.suggest",
            json!({ "query": query, "suggestions": suggestions }),
        ),
        OutputModeArg::AlfredJson => feedback::suggestions_feedback(suggestions)
            .to_json()
            .map_err(serialize_error),
    }
}

fn render_current(
    mode: OutputModeArg,
    location: &LocationCandidate,
    reading: &WeatherReading,
) -> Result<String, AppError> {
    let card = ReadingCard::new(location, reading);
    match mode {
        OutputModeArg::Human => Ok(card.to_lines().join("\n")),
        OutputModeArg::Json => {
            let result = json!({
                "location": location,
                "reading": reading,
                "card": card,
                "icon_class": card.icon.css_class(),
            });
            render_envelope("weather.current", result)
        }
        OutputModeArg::AlfredJson => feedback::reading_feedback(&card)
            .to_json()
            .map_err(serialize_error),
    }
}

fn render_envelope(command: &str, result: serde_json::Value) -> Result<String, AppError> {
    serde_json::to_string(&json!({
        "schema_version": ENVELOPE_SCHEMA_VERSION,
        "command": command,
        "ok": true,
        "result": result,
    }))
    .map_err(serialize_error)
}

fn serialize_error(error: serde_json::Error) -> AppError {
    AppError::runtime(
        ERROR_CODE_RUNTIME_SERIALIZE,
        format!("failed to serialize output: {error}"),
    )
}

fn emit_error(command: &str, output_mode: OutputModeArg, error: &AppError) {
    match output_mode {
        OutputModeArg::Json => {
            let payload = json!({
                "schema_version": ENVELOPE_SCHEMA_VERSION,
                "command": command,
                "ok": false,
                "error": {
                    "code": error.code,
                    "message": error.message,
                    "details": {
                        "kind": error.kind.as_str(),
                        "exit_code": error.exit_code(),
                    }
                }
            });
            println!("{payload}");
        }
        OutputModeArg::AlfredJson => {
            let rendered = feedback::error_feedback(error.code, &error.message)
                .to_json()
                .unwrap_or_else(|_| {
                    "{\"items\":[{\"title\":\"Error\",\"valid\":false}]}".to_string()
                });
            println!("{rendered}");
        }
        OutputModeArg::Human => {
            eprintln!("error[{}]: {}", error.code, error.message);
        }
    }
}

fn output_mode_label(mode: OutputModeArg) -> &'static str {
    match mode {
        OutputModeArg::Human => "human",
        OutputModeArg::Json => "json",
        OutputModeArg::AlfredJson => "alfred-json",
    }
}
