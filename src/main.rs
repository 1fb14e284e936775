//! Mamãe Zen command-line interface
//!
//! Serves the JSON API or runs single features from the terminal, with the
//! device capabilities replaced by logged and simulated stand-ins.

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use mamaezen::api::AppState;
use mamaezen::config::MamaeZenConfig;
use mamaezen::cry::{AudioClip, CryAnalyzer};
use mamaezen::gemini::{GeminiClient, GenerativeModel};
use mamaezen::models::{Coordinate, SpecialistType};
use mamaezen::navigation::devices::{FixedGeolocation, LoggedSpeech, LoggedWidget};
use mamaezen::navigation::{LocationProvider, NavigationController, SpeechAnnouncer};
use mamaezen::pregnancy::{self, PregnancyTracker};
use mamaezen::sounds::{self, AmbientPlayer, CategoryFilter};
use mamaezen::storage::{FjallPreferenceStore, MemoryPreferenceStore, PreferenceStore};
use mamaezen::{PlaceSearchClient, RecipeFinder, SpecialistChat, telemetry, web};

/// Mamãe Zen - companion for new and expecting parents
#[derive(Parser, Debug)]
#[command(name = "mamaezen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to the user config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output in JSON format for scripting
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the JSON API
    Serve {
        /// Port to listen on (overrides configuration)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Search nearby places
    Search {
        query: String,
        #[command(flatten)]
        origin: OriginArgs,
    },
    /// Emergency search for maternity hospitals
    Sos {
        #[command(flatten)]
        origin: OriginArgs,
    },
    /// Simulated guided navigation to a search result
    Navigate {
        /// What to look for
        #[arg(default_value = "Hospitais")]
        query: String,

        /// Result to navigate to (defaults to the first one)
        #[arg(long)]
        place: Option<String>,

        /// Stop after this many seconds (runs until Ctrl-C otherwise)
        #[arg(long)]
        seconds: Option<u64>,

        #[command(flatten)]
        origin: OriginArgs,
    },
    /// Ask a specialist
    Chat {
        /// pediatrician, psychologist or nutritionist
        #[arg(short, long, value_parser = parse_specialist, default_value = "pediatrician")]
        specialist: SpecialistType,

        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },
    /// Suggest a recipe
    Recipe { query: String },
    /// Classify a recorded cry
    Cry {
        /// Audio file (wav, mp3, ogg, webm...)
        file: PathBuf,
    },
    /// Pregnancy week tracker
    Pregnancy {
        /// Record the last menstrual period date (YYYY-MM-DD)
        #[arg(long)]
        lmp: Option<String>,

        /// Show a specific week instead of the current one
        #[arg(long)]
        week: Option<u8>,
    },
    /// List ambient sounds
    Sounds {
        /// all, womb, baby, nature or mom
        #[arg(long, default_value = "all")]
        category: String,

        /// Track to play
        #[arg(long)]
        play: Option<String>,
    },
}

#[derive(clap::Args, Debug, Clone)]
struct OriginArgs {
    /// Latitude of the search origin
    #[arg(long, allow_hyphen_values = true, requires = "lng")]
    lat: Option<f64>,

    /// Longitude of the search origin
    #[arg(long, allow_hyphen_values = true, requires = "lat")]
    lng: Option<f64>,
}

impl OriginArgs {
    fn coordinate(&self, config: &MamaeZenConfig) -> Coordinate {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Coordinate::new(lat, lng),
            _ => config.location.default_coordinate(),
        }
    }
}

fn parse_specialist(value: &str) -> std::result::Result<SpecialistType, String> {
    serde_json::from_value(serde_json::Value::String(value.to_lowercase()))
        .map_err(|_| format!("unknown specialist '{value}'"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = MamaeZenConfig::load_from_path(cli.config.clone())?;
    let _telemetry = telemetry::init(&config.logging)?;
    tracing::debug!("Configuration loaded");

    let model: Arc<dyn GenerativeModel> = Arc::new(GeminiClient::new(config.gemini.clone())?);

    match cli.command {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            let state = AppState::new(&config, model, open_store(&config)).await?;
            web::run(&config.server, Arc::new(state)).await?;
        }
        Commands::Search { query, origin } => {
            let client = place_client(&config, model);
            let outcome = client.search(&query, origin.coordinate(&config)).await;
            print(&outcome, cli.json, |o| {
                for place in o.value() {
                    println!(
                        "[{}] {} ({}) - {} ⭐ {:.1}",
                        place.id, place.name, place.distance_label, place.address, place.rating
                    );
                }
            })?;
        }
        Commands::Sos { origin } => {
            let client = place_client(&config, model);
            let outcome = client.sos(origin.coordinate(&config)).await;
            print(&outcome, cli.json, |o| {
                for place in o.value() {
                    println!("🚨 [{}] {} - {}", place.id, place.name, place.address);
                }
            })?;
        }
        Commands::Navigate {
            query,
            place,
            seconds,
            origin,
        } => navigate(&config, model, &query, place, seconds, origin, cli.json).await?,
        Commands::Chat {
            specialist,
            message,
        } => {
            let chat = SpecialistChat::new(model);
            println!("{}:", specialist.title());
            let outcome = chat
                .reply(specialist, &[], &message.join(" "), |fragment| {
                    print!("{fragment}");
                    let _ = std::io::stdout().flush();
                })
                .await?;
            if outcome.is_fallback() {
                print!("{}", outcome.value());
            }
            println!();
        }
        Commands::Recipe { query } => {
            let outcome = RecipeFinder::new(model).find(&query).await?;
            print(&outcome, cli.json, |o| {
                let recipe = o.value();
                println!("{}\n{}\n", recipe.title, recipe.description);
                for ingredient in &recipe.ingredients {
                    println!("  • {ingredient}");
                }
                println!();
                for (i, step) in recipe.instructions.iter().enumerate() {
                    println!("  {}. {step}", i + 1);
                }
                println!("\n{}", recipe.benefits);
            })?;
        }
        Commands::Cry { file } => {
            let bytes = tokio::fs::read(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let mime = AudioClip::mime_for_extension(
                file.extension().and_then(|e| e.to_str()).unwrap_or_default(),
            );
            let outcome = CryAnalyzer::new(model)
                .analyze(&AudioClip::new(bytes, mime))
                .await?;
            print(&outcome, cli.json, |o| {
                let analysis = o.value();
                println!(
                    "{} ({:.0}%) - {}\n{}",
                    analysis.category, analysis.probability, analysis.emotional_tone, analysis.advice
                );
            })?;
        }
        Commands::Pregnancy { lmp, week } => {
            let today = Local::now().date_naive();
            let mut tracker = PregnancyTracker::load(open_store(&config)).await?;
            if let Some(lmp) = lmp {
                tracker.onboard(&lmp, today).await?;
            }
            let progress = tracker.progress(today);
            let selected = match week.or(progress.as_ref().map(|p| p.current_week)) {
                Some(week) => Some(pregnancy::week_info(week)?),
                None => None,
            };
            let report = serde_json::json!({ "progress": progress, "week": selected });
            print(&report, cli.json, |_| {
                match &progress {
                    Some(p) => println!(
                        "Semana {} de 40 ({}%) - parto previsto {} - faltam {} dias",
                        p.current_week, p.progress_percent, p.due_date, p.days_left
                    ),
                    None => println!("Informe a data da última menstruação com --lmp AAAA-MM-DD"),
                }
                if let Some(w) = selected {
                    println!(
                        "\n{} Semana {}: {} ({}, {})\n{}\n{}\nComer: {}\nEvitar: {}\nDica: {}",
                        w.fruit,
                        w.week,
                        w.size_comparison,
                        w.weight,
                        w.length,
                        w.description,
                        w.development,
                        w.nutrition,
                        w.avoid,
                        w.health_tip
                    );
                }
            })?;
        }
        Commands::Sounds { category, play } => {
            let filter: CategoryFilter = category.parse()?;
            let tracks = sounds::tracks(filter);
            print(&tracks, cli.json, |tracks| {
                for track in tracks {
                    println!(
                        "[{}] {} ({}, {})",
                        track.id,
                        track.title,
                        track.category.label(),
                        track.duration
                    );
                }
            })?;
            if let Some(id) = play {
                let mut player = AmbientPlayer::new(LoggedWidget::default());
                player.click(&id)?;
            }
        }
    }

    Ok(())
}

fn place_client(config: &MamaeZenConfig, model: Arc<dyn GenerativeModel>) -> PlaceSearchClient {
    PlaceSearchClient::new(model, config.navigation.max_places as usize)
}

/// The on-disk store, or an in-memory one when the data directory is unusable
fn open_store(config: &MamaeZenConfig) -> Arc<dyn PreferenceStore> {
    match FjallPreferenceStore::open(&config.storage.location) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::warn!("{}; preferences will not be saved", e);
            Arc::new(MemoryPreferenceStore::default())
        }
    }
}

fn print<T: Serialize>(value: &T, json: bool, human: impl FnOnce(&T)) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        human(value);
    }
    Ok(())
}

async fn navigate(
    config: &MamaeZenConfig,
    model: Arc<dyn GenerativeModel>,
    query: &str,
    place: Option<String>,
    seconds: Option<u64>,
    origin: OriginArgs,
    json: bool,
) -> Result<()> {
    let device = Arc::new(FixedGeolocation::new(
        origin.coordinate(config),
        Duration::from_secs(5),
    ));
    let announcer = SpeechAnnouncer::new(
        Arc::new(LoggedSpeech),
        config.navigation.words_per_minute,
    );
    let mut controller = NavigationController::new(
        Arc::new(place_client(config, model)),
        LocationProvider::new(device, &config.location),
        announcer,
        &config.navigation,
    )?;

    let places = controller.search(query).await?.into_value();
    let target = place
        .or_else(|| places.first().map(|p| p.id.clone()))
        .context("No places found")?;
    controller.start_navigation(&target).await?;

    if let Some(view) = controller.route_view() {
        print(&view, json, |v| {
            println!(
                "➡ {} ({}) - {:.1} km, ~{} min\n{}",
                v.destination_name, v.destination_address, v.distance_km, v.eta_minutes, v.map_url
            );
        })?;
    }

    match seconds {
        Some(seconds) => tokio::time::sleep(Duration::from_secs(seconds)).await,
        None => {
            tokio::signal::ctrl_c()
                .await
                .context("Failed to listen for Ctrl-C")?;
        }
    }

    controller.exit();
    Ok(())
}
