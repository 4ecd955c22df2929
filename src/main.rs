use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process;

use chrono::Utc;
use clap::Parser;
use tracing::{info, warn};

use beadview::config::{Config, ThemeColors, ThemeConfig};
use beadview::loader::{load_insights, load_issues, resolve_issues_path};
use beadview::logging::{init_logging, LogTarget};
use beadview::render::Render;
use beadview::tui::theme::{IconSet, Theme};
use beadview::tui::widgets::issue_row::Tier;
use beadview::tui::{self, App, ViewMode};
use beadview::{BeadviewError, Result};

const HELP_TEXT: &str = r#"
  Examples
    $ bv
    $ bv --graph --select bd-42
    $ bv --file other/.beads/issues.jsonl --insights insights.json
    $ bv --plain --width 160
    $ bv --plain --graph --select bd-42 --height 30
"#;

#[derive(Parser)]
#[command(
    name = "bv",
    version = env!("CARGO_PKG_VERSION"),
    about = "Browse issues and their dependency graph in the terminal",
    after_help = HELP_TEXT
)]
struct Cli {
    /// Issues file (defaults to .beads/issues.jsonl)
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Graph metrics JSON (pageRank, criticalPathScore, betweenness)
    #[arg(long, value_name = "PATH")]
    insights: Option<PathBuf>,

    /// Print once to stdout instead of starting the interactive view
    #[arg(long)]
    plain: bool,

    /// Start in (or print) the dependency graph view
    #[arg(long)]
    graph: bool,

    /// Issue to select initially
    #[arg(long, value_name = "ID")]
    select: Option<String>,

    /// Output width for --plain (defaults to the terminal width)
    #[arg(long)]
    width: Option<u16>,

    /// Output height for --plain --graph (defaults to the terminal height)
    #[arg(long)]
    height: Option<u16>,

    /// Theme preset: default, catppuccin-mocha, catppuccin-latte, high-contrast
    #[arg(long, value_name = "NAME")]
    theme: Option<String>,

    /// Append logs to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load_or_default();
    if let Some(name) = cli.theme.as_deref() {
        if ThemeColors::from_name(name).is_none() {
            return Err(BeadviewError::Config(format!("unknown theme '{}'", name)));
        }
        config.theme = ThemeConfig::Preset(name.to_string());
    }

    let log_path = cli.log_file.clone().or_else(|| config.log_path());
    init_logging(
        LogTarget::choose(log_path.as_deref(), !cli.plain),
        &config.log_level,
    )?;

    let path = resolve_issues_path(cli.file.as_deref());
    let issues = load_issues(&path)?;
    let insights = cli.insights.as_deref().map(load_insights).transpose()?;

    if cli.plain {
        return print_plain(&cli, &config, issues, insights);
    }

    let mut app = App::new(issues, insights, config);
    if let Some(id) = cli.select.as_deref() {
        if !app.select_id(id) {
            warn!(%id, "selected issue not found");
        }
    }
    if cli.graph {
        app.view = ViewMode::Graph;
    }
    tui::run(app)
}

fn print_plain(
    cli: &Cli,
    config: &Config,
    issues: Vec<beadview::models::Issue>,
    insights: Option<beadview::insights::Insights>,
) -> Result<()> {
    let (term_width, term_height) = crossterm::terminal::size().unwrap_or((80, 24));
    let width = cli.width.unwrap_or(term_width);
    let height = cli.height.unwrap_or(term_height);

    let icons = if config.ascii_icons {
        IconSet::Ascii
    } else {
        IconSet::Emoji
    };
    let render = Render::new(Theme::from(&config.theme.resolve()).with_icons(icons))
        .with_color(io::stdout().is_terminal());

    if issues.is_empty() {
        render.no_issues();
        return Ok(());
    }

    info!(issues = issues.len(), width, "plain output");
    let lines = if cli.graph || config.default_view == ViewMode::Graph {
        render.graph(issues, insights, cli.select.as_deref(), width, height)
    } else {
        let tier = config.tier.unwrap_or_else(|| Tier::for_width(width));
        render.list(&issues, insights.as_ref(), tier, width, Utc::now())
    };
    render.display(&lines);
    Ok(())
}
