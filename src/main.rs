use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use condor::config::{FileConfig, FramingConfig};
use condor::domain::{Round, RoundId};
use condor::geometry::Coordinate;
use condor::location::LocationFeed;
use condor::logging;
use condor::map::{AnnotationStyle, RecordingSurface};
use condor::replay::{ScriptEvent, SessionScript};
use condor::scorecard::{RoundSummary, ScorecardScreen, ScreenEffect, ScreenView};
use condor::store::{JsonFileStore, ScoreStore};

/// Hole-by-hole golf scorecard
///
/// Examples:
///   # Start a round and set up its first hole
///   condor new-round --course "Pebble Beach"
///   condor edit-hole --round 1 --number 1 --par 4 --flag-lat 36.5681 --flag-lon -121.9497
///
///   # Replay a recorded session against the round
///   condor play --round 1 --script session.toml
///
///   # Show the scorecard of a round
///   condor summary --round 1
#[derive(Parser, Debug)]
#[command(name = "condor")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches condor.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON store file holding rounds, holes and shots
    #[arg(short = 's', long)]
    store: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new round
    NewRound {
        /// Course name (defaults to the `course` config key)
        #[arg(short = 'c', long)]
        course: Option<String>,
    },
    /// List all rounds
    Rounds,
    /// List the holes of a round
    Holes {
        #[arg(short = 'r', long)]
        round: u64,
    },
    /// Set par and flag position of a hole, creating the hole if needed
    EditHole {
        #[arg(short = 'r', long)]
        round: u64,
        #[arg(short = 'n', long)]
        number: u16,
        #[arg(short = 'p', long)]
        par: u8,
        #[arg(long, allow_hyphen_values = true)]
        flag_lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        flag_lon: f64,
    },
    /// Replay a scripted session on the scorecard of a round
    Play {
        #[arg(short = 'r', long)]
        round: u64,
        /// TOML script with one [[event]] table per step
        #[arg(long)]
        script: PathBuf,
    },
    /// Print the scorecard of a round
    Summary {
        #[arg(short = 'r', long)]
        round: u64,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let file_config = if let Some(ref config_path) = args.config {
        if !config_path.exists() {
            bail!("Config file not found: {:?}", config_path);
        }
        FileConfig::from_path(config_path)?
    } else {
        FileConfig::load().unwrap_or_default()
    };

    logging::init(args.verbose || file_config.verbose);

    let store_path = args.store.clone().unwrap_or_else(|| file_config.store_path());
    let mut store = JsonFileStore::open(&store_path)
        .with_context(|| format!("Failed to open store {}", store_path.display()))?;
    tracing::debug!(store = %store_path.display(), "store opened");

    match args.command {
        Command::NewRound { course } => {
            let course = course.or_else(|| file_config.course.clone());
            let round = store.create_round(course)?;
            store.save().context("Failed to save new round")?;
            println!("Created round {} ({})", round.id, round.title());
        }
        Command::Rounds => {
            let rounds = store.fetch_rounds()?;
            if rounds.is_empty() {
                println!("No rounds yet");
            }
            for round in rounds {
                let holes = store.fetch_holes(round.id)?.len();
                let status = if round.completed { "completed" } else { "open" };
                println!(
                    "{:>4}  {:<24} {:>2} holes  {}",
                    round.id,
                    round.title(),
                    holes,
                    status
                );
            }
        }
        Command::Holes { round } => {
            let round = find_round(&store, round)?;
            println!("{}", round.title());
            for hole in store.fetch_holes(round.id)? {
                let shots = store.fetch_shots(hole.id)?.len();
                println!(
                    "  Hole {:>2}  par {}  flag {}  shots {}",
                    hole.number, hole.par, hole.flag, shots
                );
            }
        }
        Command::EditHole {
            round,
            number,
            par,
            flag_lat,
            flag_lon,
        } => {
            let round = find_round(&store, round)?;
            let existing = store
                .fetch_holes(round.id)?
                .into_iter()
                .find(|h| h.number == number);
            let hole = match existing {
                Some(hole) => hole,
                None => store.create_hole(round.id, number)?,
            };
            let hole = hole.with_details(par, Coordinate::new(flag_lat, flag_lon));
            store.update_hole(&hole)?;
            store.save().context("Failed to save hole")?;
            println!(
                "Hole {} of round {}: par {}, flag {}",
                hole.number, round.id, hole.par, hole.flag
            );
        }
        Command::Play { round, script } => {
            let round = find_round(&store, round)?;
            let script = SessionScript::load(&script)?;
            play(store, round, &script, &file_config.framing);
        }
        Command::Summary { round } => {
            let round = find_round(&store, round)?;
            let summary = RoundSummary::collect(&store, &round)?;
            println!("{}", summary);
        }
    }

    Ok(())
}

fn find_round(store: &impl ScoreStore, id: u64) -> Result<Round> {
    store
        .fetch_round(RoundId(id))
        .with_context(|| format!("No round with id {}", id))
}

fn play(store: JsonFileStore, round: Round, script: &SessionScript, framing: &FramingConfig) {
    let (sender, feed) = LocationFeed::channel();
    let mut screen = ScorecardScreen::new(store, feed, round, framing);
    let mut surface = RecordingSurface::new();

    println!("{}", screen.title());
    println!("{}", "=".repeat(screen.title().len().max(8)));

    script.run(
        &mut screen,
        &sender,
        &mut surface,
        |step, event, screen, surface, effect| {
            println!();
            println!("[{}] {}", step + 1, describe_event(event));
            print_view(&screen.view());

            if matches!(screen.view(), ScreenView::Playing(_)) {
                if let Some(region) = surface.region {
                    println!(
                        "  Map: center {}  span {:.4} x {:.4}",
                        region.center, region.latitude_span, region.longitude_span
                    );
                }
                for annotation in &surface.annotations {
                    match annotation.style() {
                        AnnotationStyle::Marker { tint, glyph } => println!(
                            "  {:?} {:?} marker \"{}\" at {}",
                            tint, glyph, annotation.title, annotation.coordinate
                        ),
                        AnnotationStyle::Label => {
                            println!("  Label {} at {}", annotation.title, annotation.coordinate)
                        }
                    }
                }
                println!("  {} line(s)", surface.overlays.len());
            }

            match effect {
                ScreenEffect::ConfirmFinishPrompt => {
                    println!("  Finish Round: Do you want to finish the round?")
                }
                ScreenEffect::NavigateToSummary(summary) => {
                    println!();
                    println!("{}", summary);
                }
                ScreenEffect::None => {}
            }
        },
    );
}

fn describe_event(event: &ScriptEvent) -> String {
    match event {
        ScriptEvent::Location { lat, lon } => {
            format!("location fix {}", Coordinate::new(*lat, *lon))
        }
        ScriptEvent::Tap { lat, lon } => format!("map tap {}", Coordinate::new(*lat, *lon)),
        ScriptEvent::Digit { digit } => format!("keypad {}", digit),
        other => format!("{:?}", other).to_lowercase(),
    }
}

fn print_view(view: &ScreenView) {
    match view {
        ScreenView::NoHoles { next_hole_number } => {
            println!("  No holes available (Start Hole {})", next_hole_number)
        }
        ScreenView::AwaitingLocation => println!("  Fetching location..."),
        ScreenView::Playing(panel) => {
            let prev = if panel.can_go_previous { "<" } else { " " };
            let next = if panel.can_go_next { ">" } else { " " };
            println!(
                "  {} Hole {}  Par: {}  Distance: {} m {}   strokes {}",
                prev, panel.number, panel.par, panel.distance_to_flag, next, panel.strokes
            );
        }
        ScreenView::Finished(_) => println!("  Round finished"),
    }
}
