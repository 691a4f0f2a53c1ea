//! Command-line front-end for the catalog browser.
//!
//! Reads one command per line from stdin and prints each surface whenever its
//! visible state changes. Commands are applied as soon as they are typed, while
//! earlier fetches are still in flight, so issuing `list page=1` and then
//! `list page=2` in quick succession races the two requests exactly like two
//! clicks in a browser would. Only the newer one is ever shown.
//!
//! # Commands
//!
//! - `list [query]`: Point the listing's address bar at `query` (e.g. `page=3`)
//! - `search [query]`: Point the search address bar at `query` (e.g. `q=bebop&type=manga`)
//! - `find <anime|manga> <text>`: Submit the search form
//! - `ai <text>`: Submit the AI-search form
//! - `retry <listing|search|ai>`: Retry a surface's last request
//! - `show <listing|search|ai>`: Print a surface again
//! - `detail <anime|manga> <id>`: Print one record (anime also list their characters)
//! - `character <id>`: Print one character
//! - `help`, `quit`
//!
//! On end of input every in-flight request is awaited before exiting.

#![allow(clippy::multiple_crate_versions)]

use catalog_browser::app::SurfaceKind;
use catalog_browser::domain::{CastMember, CharacterRecord, DetailRecord};
use catalog_browser::ui::{self, ResultsView};
use catalog_browser::{observability, BrowseSession, CatalogKind, Config, HttpCatalogApi, Resolution, Result};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Browse a media catalog from the terminal.
#[derive(Debug, Parser)]
#[command(name = "catalog-browser", version, about)]
struct Cli {
    /// Config file (default: ~/.config/catalog-browser/config.toml when present)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Catalog API base URL
    #[arg(long, env = "CATALOG_API_URL")]
    api_url: Option<String>,

    /// AI search endpoint
    #[arg(long, env = "CATALOG_AI_URL")]
    ai_url: Option<String>,

    /// Per-request timeout in milliseconds
    #[arg(long, value_name = "MS")]
    timeout_ms: Option<u64>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long)]
    trace_level: Option<String>,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<String>,
}

impl Cli {
    fn config(&self) -> Result<Config> {
        let base = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::load_default()?,
        };
        Ok(self.apply_overrides(base))
    }

    fn apply_overrides(&self, mut config: Config) -> Config {
        if let Some(url) = &self.api_url {
            config.api_base_url.clone_from(url);
        }
        if self.ai_url.is_some() {
            config.ai_search_url.clone_from(&self.ai_url);
        }
        if let Some(ms) = self.timeout_ms {
            config.request_timeout_ms = (ms > 0).then_some(ms);
        }
        if self.trace_level.is_some() {
            config.trace_level.clone_from(&self.trace_level);
        }
        if self.log_file.is_some() {
            config.log_file.clone_from(&self.log_file);
        }
        config
    }
}

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Navigate { surface: SurfaceKind, raw_query: String },
    Find { kind: CatalogKind, text: String },
    Ai { text: String },
    Retry { surface: SurfaceKind },
    Show { surface: SurfaceKind },
    Detail { kind: CatalogKind, id: u64 },
    Character { id: u64 },
    Help,
    Quit,
}

const HELP: &str = "\
commands:
  list [query]                 navigate the listing (e.g. list page=2)
  search [query]               navigate search (e.g. search q=bebop&type=anime)
  find <anime|manga> <text>    submit the search form
  ai <text>                    submit the AI search form
  retry <listing|search|ai>    retry the last request of a surface
  show <listing|search|ai>     print a surface
  detail <anime|manga> <id>    print one record
  character <id>               print one character
  quit";

fn parse_command(line: &str) -> std::result::Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(verb, rest)| (verb, rest.trim()));

    let surface = |value: &str| {
        SurfaceKind::parse(value).ok_or_else(|| format!("unknown surface: {value:?}"))
    };
    let kind = |value: &str| CatalogKind::parse(value).ok_or_else(|| format!("unknown kind: {value:?}"));

    let command = match verb {
        "list" => Command::Navigate {
            surface: SurfaceKind::Listing,
            raw_query: rest.to_string(),
        },
        "search" => Command::Navigate {
            surface: SurfaceKind::Search,
            raw_query: rest.to_string(),
        },
        "find" => {
            let (kind_arg, text) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| "usage: find <anime|manga> <text>".to_string())?;
            Command::Find {
                kind: kind(kind_arg)?,
                text: text.trim().to_string(),
            }
        }
        "ai" if !rest.is_empty() => Command::Ai { text: rest.to_string() },
        "ai" => return Err("usage: ai <text>".to_string()),
        "retry" => Command::Retry { surface: surface(rest)? },
        "show" => Command::Show { surface: surface(rest)? },
        "detail" => {
            let (kind_arg, id) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| "usage: detail <anime|manga> <id>".to_string())?;
            Command::Detail {
                kind: kind(kind_arg)?,
                id: parse_id(id)?,
            }
        }
        "character" => Command::Character {
            id: parse_id(rest)?,
        },
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("unknown command: {other:?} (try `help`)")),
    };

    Ok(Some(command))
}

fn parse_id(value: &str) -> std::result::Result<u64, String> {
    let value = value.trim();
    value.parse().map_err(|_| format!("invalid id: {value:?}"))
}

/// Characters listed under an anime before the remainder is summarized.
const CAST_PREVIEW: usize = 10;

enum Step {
    Input(Option<String>),
    Resolved(Resolution),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.config()?;
    observability::init_tracing(&config);

    tracing::info!(
        api = %config.api_base_url,
        ai = config.ai_search_url.as_deref().unwrap_or("<unset>"),
        "starting catalog browser"
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run(&config))
}

async fn run(config: &Config) -> Result<()> {
    let api = Arc::new(HttpCatalogApi::new(config)?);
    let mut session = BrowseSession::new(api);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let step = tokio::select! {
            line = lines.next_line() => Step::Input(line?),
            Some(resolution) = session.next_resolution(), if session.has_in_flight() => {
                Step::Resolved(resolution)
            }
        };

        match step {
            Step::Resolved(resolution) => {
                if resolution.applied {
                    show(&session, resolution.surface)?;
                }
            }
            Step::Input(None) => break,
            Step::Input(Some(line)) => match parse_command(&line) {
                Ok(None) => {}
                Ok(Some(Command::Quit)) => return Ok(()),
                Ok(Some(command)) => execute(&mut session, command).await?,
                Err(message) => eprintln!("{message}"),
            },
        }
    }

    for resolution in session.settle().await {
        if resolution.applied {
            show(&session, resolution.surface)?;
        }
    }
    Ok(())
}

async fn execute(session: &mut BrowseSession<HttpCatalogApi>, command: Command) -> Result<()> {
    let (render, surface) = match command {
        Command::Navigate { surface, raw_query } => (session.navigate(surface, &raw_query), surface),
        Command::Find { kind, text } => (session.submit_search(&text, kind), SurfaceKind::Search),
        Command::Ai { text } => (session.submit_ai(&text), SurfaceKind::AiSearch),
        Command::Retry { surface } => (session.retry(surface), surface),
        Command::Show { surface } => (true, surface),
        Command::Detail { kind, id } => {
            match load_detail(session, kind, id).await {
                Ok((record, cast)) => {
                    let mut out = std::io::stdout().lock();
                    write_detail(&mut out, &record, cast.as_deref())?;
                }
                Err(e) => {
                    tracing::warn!(kind = %kind, id, error = %e, "detail lookup failed");
                    eprintln!("Failed to fetch {kind} details. Please try again later.");
                }
            }
            return Ok(());
        }
        Command::Character { id } => {
            match session.fetch_character(id).await {
                Ok(record) => {
                    let mut out = std::io::stdout().lock();
                    write_character(&mut out, &record)?;
                }
                Err(e) => {
                    tracing::warn!(id, error = %e, "character lookup failed");
                    eprintln!("Failed to fetch character details. Please try again later.");
                }
            }
            return Ok(());
        }
        Command::Help => {
            println!("{HELP}");
            return Ok(());
        }
        Command::Quit => return Ok(()),
    };

    if render {
        show(session, surface)?;
    }
    Ok(())
}

fn show(session: &BrowseSession<HttpCatalogApi>, surface: SurfaceKind) -> Result<()> {
    let view = ResultsView::compute(session.state(), surface);
    let mut stdout = std::io::stdout().lock();
    ui::render(&view, &mut stdout)
}

/// Loads a record and, for anime, its characters. Either failure fails the
/// whole lookup.
async fn load_detail(
    session: &BrowseSession<HttpCatalogApi>,
    kind: CatalogKind,
    id: u64,
) -> Result<(DetailRecord, Option<Vec<CastMember>>)> {
    let record = session.fetch_detail(kind, id).await?;
    let cast = match kind {
        CatalogKind::Anime => Some(session.fetch_cast(id).await?),
        CatalogKind::Manga => None,
    };
    Ok((record, cast))
}

fn write_detail<W: Write>(out: &mut W, record: &DetailRecord, cast: Option<&[CastMember]>) -> Result<()> {
    writeln!(out, "== {} ({} #{}) ==", record.title, record.kind, record.id)?;
    if let Some(english) = record.title_english.as_ref().filter(|english| **english != record.title) {
        writeln!(out, "English title: {english}")?;
    }
    if let Some(score) = record.score {
        match record.scored_by {
            Some(votes) => writeln!(out, "Score: {score:.2} ({votes} votes)")?,
            None => writeln!(out, "Score: {score:.2}")?,
        }
    }
    if let Some(status) = &record.status {
        writeln!(out, "Status: {status}")?;
    }
    if let Some(episodes) = record.episodes {
        writeln!(out, "Episodes: {episodes}")?;
    }
    if let Some(chapters) = record.chapters {
        writeln!(out, "Chapters: {chapters}")?;
    }
    if !record.genres.is_empty() {
        writeln!(out, "Genres: {}", record.genres.join(", "))?;
    }
    if !record.themes.is_empty() {
        writeln!(out, "Themes: {}", record.themes.join(", "))?;
    }
    writeln!(
        out,
        "{}",
        record.synopsis.as_deref().unwrap_or("No synopsis available.")
    )?;
    if let Some(background) = &record.background {
        writeln!(out, "Background: {background}")?;
    }
    if let Some(cast) = cast {
        writeln!(out, "Characters:")?;
        if cast.is_empty() {
            writeln!(out, "  No character information available.")?;
        }
        for member in cast.iter().take(CAST_PREVIEW) {
            writeln!(out, "  {} (#{}), Role: {}", member.name, member.id, member.role)?;
        }
        if cast.len() > CAST_PREVIEW {
            writeln!(out, "  ... and {} more", cast.len() - CAST_PREVIEW)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn write_character<W: Write>(out: &mut W, record: &CharacterRecord) -> Result<()> {
    writeln!(out, "== {} (character #{}) ==", record.name, record.id)?;
    if let Some(kanji) = &record.name_kanji {
        writeln!(out, "{kanji}")?;
    }
    if !record.nicknames.is_empty() {
        writeln!(out, "Nicknames: {}", record.nicknames.join(", "))?;
    }
    writeln!(out, "Favorites: {} fans", record.favorites)?;
    writeln!(
        out,
        "{}",
        record.about.as_deref().unwrap_or("No information available.")
    )?;

    for (heading, kind, appearances) in [
        ("Anime Appearances", CatalogKind::Anime, &record.anime),
        ("Manga Appearances", CatalogKind::Manga, &record.manga),
    ] {
        if appearances.is_empty() {
            continue;
        }
        writeln!(out, "{heading}:")?;
        for appearance in appearances {
            writeln!(
                out,
                "  {} ({kind} #{}), Role: {}",
                appearance.title, appearance.id, appearance.role
            )?;
        }
    }

    if !record.voices.is_empty() {
        writeln!(out, "Voice Actors:")?;
        for voice in &record.voices {
            writeln!(out, "  {}, Language: {}", voice.name, voice.language)?;
        }
    }
    out.flush()?;
    Ok(())
}
