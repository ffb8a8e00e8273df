use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pitch_lens::api::{build_router, state::AppState};
use pitch_lens::calculate::{extract_shots, GridAggregator, MatchStatsReducer};
use pitch_lens::config::AppConfig;
use pitch_lens::models::{
    team_filter, GridHistogram, MatchEventLog, MatchInfo, Side, TeamDirectory,
};
use pitch_lens::storage::{self, StorageConfig};

#[derive(Parser)]
#[command(name = "pitch-lens")]
#[command(about = "Heatmaps, match stats and shot maps from football event logs")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Where to read the event log from.
#[derive(Args)]
struct SourceArgs {
    /// Match id under <data_dir>/events
    #[arg(long = "match", conflicts_with = "file", required_unless_present = "file")]
    match_id: Option<String>,

    /// Event log file (.json or .jsonl)
    #[arg(long)]
    file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a positional heatmap
    Heatmap {
        #[command(flatten)]
        source: SourceArgs,

        /// Only count events by this team ("both" for all)
        #[arg(long)]
        team: Option<String>,

        /// Only count events of this type (e.g. Pass, Carry, Pressure, Duel)
        #[arg(long)]
        event_type: Option<String>,

        /// Latest match minute to include
        #[arg(long)]
        minute: Option<i32>,

        /// Mirror the horizontal axis
        #[arg(long)]
        flip_x: bool,

        /// Cell edge length in pitch units
        #[arg(long)]
        cell_size: Option<f64>,

        /// Print the histogram as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print head-to-head match statistics
    Stats {
        #[command(flatten)]
        source: SourceArgs,

        /// Home team (defaults to the fixture header)
        #[arg(long)]
        home: Option<String>,

        /// Away team (defaults to the fixture header)
        #[arg(long)]
        away: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// List shots with locations normalized to one attacking direction
    Shots {
        #[command(flatten)]
        source: SourceArgs,

        /// Only list shots by this team
        #[arg(long)]
        team: Option<String>,

        /// Team whose shots are mirrored (defaults to the away side)
        #[arg(long)]
        away: Option<String>,

        /// Only list shots taken up to this minute
        #[arg(long)]
        minute: Option<i32>,

        #[arg(long)]
        json: bool,
    },

    /// Summarize an event log
    Summary {
        #[command(flatten)]
        source: SourceArgs,

        #[arg(long)]
        json: bool,
    },

    /// Start the API server
    Serve {
        /// Bind address (defaults to the config file)
        #[arg(long)]
        host: Option<String>,

        /// Port number (defaults to the config file)
        #[arg(long)]
        port: Option<u16>,
    },
}

/// An event log plus its fixture header, when one is known.
struct Loaded {
    log: MatchEventLog,
    fixture: Option<MatchInfo>,
}

impl Loaded {
    fn sides(&self, home: Option<&str>, away: Option<&str>) -> Result<(String, String)> {
        self.log
            .resolve_sides(home, away, self.fixture.as_ref())
            .context("pass --home and --away")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config {}", cli.config.display()))?;
    if let Some(data_dir) = cli.data_dir.clone() {
        config.data_dir = data_dir;
    }
    if let Some(log_level) = cli.log_level.clone() {
        config.log_level = log_level;
    }

    init_tracing(&config.log_level, cli.json_logs);
    tracing::debug!("Starting pitch-lens v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Heatmap {
            source,
            team,
            event_type,
            minute,
            flip_x,
            cell_size,
            json,
        } => {
            let loaded = load_source(&config, &source)?;

            let mut params = config.heatmap.base_params().with_flip_x(flip_x);
            if let Some(cell_size) = cell_size {
                params = params.with_cell_size(cell_size);
            }
            params.validate()?;
            if let Some(team) = team_filter(team.as_deref()) {
                params = params.with_team(team);
            }
            if let Some(event_type) = event_type {
                params = params.with_event_type(event_type);
            }
            if let Some(minute) = minute {
                params = params.with_minute_cutoff(minute);
            }

            let grid = GridAggregator::aggregate(loaded.log.events(), &params);
            if json {
                println!("{}", serde_json::to_string_pretty(&grid)?);
            } else {
                print!("{}", render_grid(&grid));
                println!(
                    "{} events, busiest cell {}, {} active cells",
                    grid.total_events, grid.max_count, grid.active_cell_count
                );
            }
        }
        Commands::Stats {
            source,
            home,
            away,
            json,
        } => {
            let loaded = load_source(&config, &source)?;
            let (home, away) = loaded.sides(home.as_deref(), away.as_deref())?;
            let stats = MatchStatsReducer::reduce(loaded.log.events(), &home, &away);

            if json {
                let body = json!({
                    "home_team": home,
                    "away_team": away,
                    "stats": stats,
                    "rows": stats.rows(),
                });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                let teams = config.team_directory()?;
                println!(
                    "{:<18} {:>8} {:>8}",
                    "",
                    teams.acronym(&home),
                    teams.acronym(&away)
                );
                for row in stats.rows() {
                    let mark = |side: Side| if row.leader == Some(side) { "*" } else { " " };
                    println!(
                        "{:<18} {:>7}{} {:>7}{}",
                        row.label,
                        row.home,
                        mark(Side::Home),
                        row.away,
                        mark(Side::Away)
                    );
                }
                println!(
                    "Goals: {} {} - {} {}",
                    home, stats.goals.home, stats.goals.away, away
                );
            }
        }
        Commands::Shots {
            source,
            team,
            away,
            minute,
            json,
        } => {
            let loaded = load_source(&config, &source)?;
            let mirror = match away {
                Some(away) => Some(away),
                None => loaded.sides(None, None).ok().map(|(_, away)| away),
            };

            let team = team_filter(team.as_deref());
            let shots: Vec<_> = extract_shots(loaded.log.events(), team.as_deref(), mirror.as_deref())
                .into_iter()
                .filter(|s| minute.map_or(true, |m| s.visible_at(m)))
                .collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&shots)?);
            } else {
                for shot in &shots {
                    println!(
                        "{:>3}' {:<28} {:<20} xG {:.2}  {:<10} ({:.1}, {:.1})",
                        shot.minute.unwrap_or(0),
                        shot.player.as_deref().unwrap_or("-"),
                        shot.team.as_deref().unwrap_or("-"),
                        shot.xg,
                        shot.outcome.as_deref().unwrap_or("-"),
                        shot.location.x,
                        shot.location.y
                    );
                }
                println!("{} shots", shots.len());
            }
        }
        Commands::Summary { source, json } => {
            let loaded = load_source(&config, &source)?;
            let summary = loaded.log.summary();

            if json {
                let body = json!({ "fixture": loaded.fixture, "summary": summary });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                let teams = config.team_directory()?;
                if let Some(fixture) = &loaded.fixture {
                    print_fixture(fixture, &teams);
                }
                println!("Events:      {}", summary.event_count);
                println!("Teams:       {}", summary.teams.join(", "));
                println!("Last minute: {}", summary.last_minute);
                for (event_type, count) in &summary.event_types {
                    println!("  {:<24} {:>6}", event_type, count);
                }
            }
        }
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            let addr = format!("{}:{}", config.server.host, config.server.port);

            let state = AppState::load(config)?;
            let app = build_router(state);
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("binding {}", addr))?;
            tracing::info!("Serving API on http://{}", addr);
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}

/// `RUST_LOG` wins over the configured level. Logs go to stderr so command
/// output stays pipeable.
fn init_tracing(log_level: &str, json_logs: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if json_logs {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn load_source(config: &AppConfig, source: &SourceArgs) -> Result<Loaded> {
    if let Some(path) = &source.file {
        return Ok(Loaded {
            log: read_file(path)?,
            fixture: None,
        });
    }

    let Some(match_id) = source.match_id.as_deref() else {
        bail!("either --match or --file is required");
    };
    let storage = StorageConfig::new(config.data_dir.clone());
    let log = storage::load_match(&storage, match_id)
        .with_context(|| format!("loading match {}", match_id))?;
    let fixtures = storage::read_fixtures(&storage).context("reading fixtures")?;

    Ok(Loaded {
        log,
        fixture: storage::find_fixture(&fixtures, match_id).cloned(),
    })
}

fn read_file(path: &Path) -> Result<MatchEventLog> {
    storage::read_event_log(path).with_context(|| format!("reading {}", path.display()))
}

fn print_fixture(fixture: &MatchInfo, teams: &TeamDirectory) {
    println!(
        "{} {} {}",
        teams.acronym(fixture.home_team_name()),
        fixture.scoreline(),
        teams.acronym(fixture.away_team_name())
    );
    print!("{}", fixture.display_date());
    if let Some(stadium) = fixture.stadium_name() {
        print!(", {}", stadium);
    }
    println!();
}

/// One character per cell: `.` for empty, `1`-`9` scaled to the busiest cell.
fn render_grid(grid: &GridHistogram) -> String {
    let mut out = String::with_capacity((grid.column_count + 1) * grid.row_count);
    for row in 0..grid.row_count {
        for col in 0..grid.column_count {
            let level = grid.intensity(col, row).unwrap_or(0.0);
            if level <= 0.0 {
                out.push('.');
            } else {
                let digit = ((level * 9.0).ceil() as u32).clamp(1, 9);
                out.push(char::from_digit(digit, 10).unwrap_or('9'));
            }
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_grid() {
        let grid = GridHistogram::from_counts(40.0, vec![vec![0, 1, 0], vec![4, 0, 2]]);
        assert_eq!(render_grid(&grid), ".3.\n9.5\n");
    }

    #[test]
    fn test_sides_fall_back_to_log_order() {
        use pitch_lens::models::MatchEvent;

        let loaded = Loaded {
            log: MatchEventLog::new(vec![
                MatchEvent::new("Pass").with_team("Arsenal"),
                MatchEvent::new("Pass").with_team("Stoke City"),
            ]),
            fixture: None,
        };

        let (home, away) = loaded.sides(None, None).unwrap();
        assert_eq!((home.as_str(), away.as_str()), ("Arsenal", "Stoke City"));

        let sides = loaded.sides(Some("Stoke City"), None).unwrap();
        assert_eq!(sides, ("Stoke City".to_string(), "Arsenal".to_string()));

        assert!(loaded.sides(Some("Arsenal"), Some("Arsenal")).is_err());

        let empty = Loaded {
            log: MatchEventLog::default(),
            fixture: None,
        };
        assert!(empty.sides(None, None).is_err());
    }
}
