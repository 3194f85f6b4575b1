//! `scratch-card`: headless scratch card session driver
//!
//! Plays a full session against a JSON state file standing in for browser
//! local storage: prize assignment, scripted scratch strokes, completion,
//! redemption webhook and reveal.

mod config;
mod overlay;
mod strokes;

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use config::AppConfig;
use rand::rngs::StdRng;
use rand::SeedableRng;
use scratch_core::{
    ClientRect, EphemeralPersistence, JsonFileStore, LogSink, NotificationSink, OverlayImage,
    OverlayPlacement, Persistence, PrizeStore, ScratchSurface, SessionBuilder,
    StoragePersistence, TermsAndConditions, Viewport,
};
use scratch_webhook::WebhookSink;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_STATE_FILE: &str = "scratch-state.json";

fn cli() -> Command {
    let config_arg = Arg::new("config")
        .long("config")
        .short('c')
        .value_parser(value_parser!(PathBuf))
        .help("TOML configuration file ([scratch] and [webhook] sections)");
    let state_arg = Arg::new("state")
        .long("state")
        .default_value(DEFAULT_STATE_FILE)
        .value_parser(value_parser!(PathBuf))
        .help("JSON file holding the persisted assignment");

    Command::new("scratch-card")
        .version(scratch_core::VERSION)
        .about("Scratch-to-reveal promotional card simulator")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines"),
        )
        .subcommand(
            Command::new("play")
                .about("Load a session and scratch the card")
                .arg(config_arg.clone())
                .arg(state_arg.clone())
                .arg(
                    Arg::new("query")
                        .long("query")
                        .default_value("")
                        .help("Landing page query string, e.g. ?email=a@b.com&first_name=Jo"),
                )
                .arg(
                    Arg::new("width")
                        .long("width")
                        .default_value("640")
                        .value_parser(value_parser!(f64))
                        .help("Rendered artwork width in CSS pixels"),
                )
                .arg(
                    Arg::new("height")
                        .long("height")
                        .default_value("400")
                        .value_parser(value_parser!(f64))
                        .help("Rendered artwork height in CSS pixels"),
                )
                .arg(
                    Arg::new("dpr")
                        .long("dpr")
                        .default_value("1")
                        .value_parser(value_parser!(f64))
                        .help("Device pixel ratio"),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .default_value("42")
                        .value_parser(value_parser!(u64))
                        .help("Random seed for prize pick and stroke jitter"),
                )
                .arg(
                    Arg::new("coverage")
                        .long("coverage")
                        .default_value("1.0")
                        .value_parser(value_parser!(f64))
                        .help("Share of the overlay height to sweep (0.0 - 1.0)"),
                )
                .arg(
                    Arg::new("overlay")
                        .long("overlay")
                        .value_parser(value_parser!(PathBuf))
                        .help("PNG scratch cover (defaults to solid gold)"),
                )
                .arg(
                    Arg::new("resize-after")
                        .long("resize-after")
                        .value_parser(value_parser!(usize))
                        .help("Resize the container after this many strokes"),
                ),
        )
        .subcommand(
            Command::new("status")
                .about("Show the persisted assignment")
                .arg(config_arg)
                .arg(state_arg),
        )
        .subcommand(Command::new("terms").about("Print the terms and conditions"))
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

fn arg<T: Clone + Send + Sync + 'static>(args: &ArgMatches, name: &str) -> anyhow::Result<T> {
    args.get_one::<T>(name)
        .cloned()
        .with_context(|| format!("missing --{name}"))
}

fn finite_arg(args: &ArgMatches, name: &str) -> anyhow::Result<f64> {
    let value: f64 = arg(args, name)?;
    if !value.is_finite() {
        anyhow::bail!("--{name} must be a finite number, got {value}");
    }
    Ok(value)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("log-json"));

    match matches.subcommand() {
        Some(("play", args)) => play(args).await,
        Some(("status", args)) => status(args),
        Some(("terms", _)) => {
            println!("{}", TermsAndConditions::default());
            Ok(())
        }
        Some((other, _)) => anyhow::bail!("unknown subcommand {other}"),
        None => anyhow::bail!("no subcommand given"),
    }
}

async fn play(args: &ArgMatches) -> anyhow::Result<()> {
    let config = AppConfig::load(args.get_one::<PathBuf>("config").map(PathBuf::as_path))?;
    let state: PathBuf = arg(args, "state")?;
    let query: String = arg(args, "query")?;
    let seed: u64 = arg(args, "seed")?;
    let coverage = finite_arg(args, "coverage")?;
    let resize_after = args.get_one::<usize>("resize-after").copied();

    let artwork = ClientRect::new(
        0.0,
        0.0,
        finite_arg(args, "width")?,
        finite_arg(args, "height")?,
    );
    let viewport = Viewport::new(
        OverlayPlacement::default().container_rect(artwork),
        finite_arg(args, "dpr")?,
    );
    let cover = match args.get_one::<PathBuf>("overlay") {
        Some(path) => overlay::load_png(path)?,
        None => OverlayImage::gold(),
    };

    let webhook = match config.webhook.endpoint {
        Some(_) => Some(Arc::new(
            WebhookSink::new(&config.webhook).context("failed to create webhook sink")?,
        )),
        None => {
            tracing::warn!("no webhook endpoint configured, redemptions will only be logged");
            None
        }
    };
    let sink: Arc<dyn NotificationSink> = match &webhook {
        Some(webhook) => webhook.clone(),
        None => Arc::new(LogSink),
    };

    let builder = match JsonFileStore::open(&state) {
        Ok(store) => SessionBuilder::new(config.scratch.clone()).with_store(store),
        Err(error) => {
            tracing::warn!(
                path = %state.display(),
                %error,
                "state file unusable, continuing without persistence"
            );
            SessionBuilder::new(config.scratch.clone())
                .with_persistence(Arc::new(EphemeralPersistence))
        }
    };
    let mut rng = StdRng::seed_from_u64(seed);
    let mut surface = builder
        .with_query(query)
        .with_sink(sink)
        .build(&mut rng)
        .context("failed to start session")?;

    tracing::info!(
        prize = %surface.prize().id,
        state = ?surface.state(),
        "session loaded"
    );

    surface.artwork_loaded();
    surface.overlay_decoded(cover);
    surface.resize(viewport);

    let strokes = strokes::serpentine(
        viewport.rect,
        config.scratch.scratch_radius_px,
        coverage,
        &mut rng,
    );
    let mut last_fraction = surface.erased_fraction();
    for (index, stroke) in strokes.iter().enumerate() {
        if surface.is_complete() {
            break;
        }
        if resize_after == Some(index) {
            tracing::info!(strokes = index, "resizing container mid-scratch");
            surface.resize(viewport);
        }
        scratch_stroke(&mut surface, stroke);
        if let Some(fraction) = surface.erased_fraction() {
            last_fraction = Some(fraction);
        }
    }

    print_report(&surface, last_fraction);

    if let Some(webhook) = webhook {
        webhook.flush().await;
    }
    Ok(())
}

fn scratch_stroke(surface: &mut ScratchSurface, stroke: &[(f64, f64)]) {
    const POINTER: i32 = 1;
    let Some((&(x, y), rest)) = stroke.split_first() else {
        return;
    };
    surface.pointer_down(POINTER, x, y);
    for &(x, y) in rest {
        surface.pointer_move(POINTER, x, y);
    }
    surface.pointer_up(POINTER);
}

fn print_report(surface: &ScratchSurface, last_fraction: Option<f64>) {
    let prize = surface.prize();
    println!("Prize:   {} ({})", prize.id, prize.alt);
    println!("State:   {:?}", surface.state());
    match last_fraction {
        Some(fraction) => println!("Erased:  {:.1}%", fraction * 100.0),
        None => println!("Erased:  -"),
    }
    if let Some(panel) = surface.reveal_panel() {
        println!();
        println!("{panel}");
    }
}

fn status(args: &ArgMatches) -> anyhow::Result<()> {
    let config = AppConfig::load(args.get_one::<PathBuf>("config").map(PathBuf::as_path))?;
    let state: PathBuf = arg(args, "state")?;
    print_status(&config, &state)
}

fn print_status(config: &AppConfig, state: &Path) -> anyhow::Result<()> {
    if !config.scratch.enable_persistence {
        println!("Persistence disabled: every load draws a new prize");
        return Ok(());
    }

    let store = JsonFileStore::open(state)
        .with_context(|| format!("failed to open state file {}", state.display()))?;
    let persistence = StoragePersistence::new(store, config.scratch.storage_keys.clone());
    let prizes = PrizeStore::default();

    match persistence.assigned_prize_id() {
        Some(id) => match prizes.get(&id) {
            Some(card) => println!("Prize:    {} ({})", card.id, card.promo),
            None => println!("Prize:    {id} (not in catalog, reassigned on next load)"),
        },
        None => println!("Prize:    unassigned"),
    }
    println!(
        "Complete: {}",
        if persistence.is_scratch_complete() { "yes" } else { "no" }
    );
    Ok(())
}
