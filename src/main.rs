use std::path::PathBuf;
use std::time::Duration;

use eyre::{Result, WrapErr, bail, eyre};
use log::{debug, info};

mod cli;

use cli::{Cli, Command, OutputFormat};
use ytdeck::clip::{DEFAULT_ENDS_IN, EndsIn};
use ytdeck::config::Config;
use ytdeck::store::TrackStore;
use ytdeck::{Track, TrackDraft};

fn setup_logging() -> Result<()> {
    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let log_file = log_dir.join("ytdeck.log");

    let target = Box::new(std::fs::OpenOptions::new().create(true).append(true).open(&log_file)?);

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized: {}", log_file.display());
    Ok(())
}

fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ytdeck")
        .join("logs")
}

fn build_after_help(store: &TrackStore) -> String {
    let saved = store.load().map(|tracks| tracks.len()).unwrap_or(0);
    let log_path = log_dir().join("ytdeck.log");

    format!(
        "\nSTATE:\n  tracks  {} ({saved} saved)\n  config  {}\n\nLogs are written to: {}",
        store.path().display(),
        ytdeck::config::config_path().display(),
        log_path.display(),
    )
}

/// Retry an async operation with exponential backoff
async fn retry<F, Fut, T>(max_attempts: u32, operation: F) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<T>>,
{
    let mut last_err = None;
    for attempt in 0..max_attempts {
        match operation().await {
            Ok(val) => return Ok(val),
            Err(e) => {
                if attempt + 1 < max_attempts {
                    let delay = Duration::from_millis(500 * 2u64.pow(attempt));
                    debug!("Attempt {} failed: {e}, retrying in {delay:?}", attempt + 1);
                    tokio::time::sleep(delay).await;
                }
                last_err = Some(e);
            }
        }
    }
    Err(last_err.unwrap())
}

fn track_at(tracks: &[Track], index: usize) -> Result<&Track> {
    if index == 0 || index > tracks.len() {
        bail!("no track #{index}; run `ytdeck list` to see valid numbers");
    }
    Ok(&tracks[index - 1])
}

fn track_at_mut(tracks: &mut [Track], index: usize) -> Result<&mut Track> {
    if index == 0 || index > tracks.len() {
        bail!("no track #{index}; run `ytdeck list` to see valid numbers");
    }
    Ok(&mut tracks[index - 1])
}

fn resolve_or_explain(url: &str) -> Result<ytdeck::VideoReference> {
    ytdeck::youtube::resolve(url).ok_or_else(|| {
        eyre!(
            "could not resolve video URL: {url}\n\nSupported formats:\n  https://www.youtube.com/watch?v=ID\n  https://www.youtube.com/embed/ID\n  https://www.youtube.com/v/ID\n  https://youtu.be/ID"
        )
    })
}

fn cmd_add(store: &TrackStore, config: &Config, url: String, title: String, ends_in: Option<EndsIn>) -> Result<()> {
    let reference = resolve_or_explain(&url)?;
    let ends_in = ends_in.or_else(|| config.ends_in_default()).unwrap_or(DEFAULT_ENDS_IN);
    let track = TrackDraft { reference, ends_in, title }.into_track()?;

    let mut tracks = store.load()?;
    info!("Adding track {} ({})", track.id, track.title);
    println!(
        "Saved \"{}\" [{}]  {}  {}",
        track.title,
        track.id,
        ytdeck::output::window_label(&track),
        ytdeck::youtube::share_url(&track.id, track.start_time),
    );
    tracks.insert(0, track);
    store.save(&tracks)
}

fn cmd_list(store: &TrackStore, format: OutputFormat) -> Result<()> {
    let tracks = store.load()?;

    if tracks.is_empty() && format == OutputFormat::Text {
        println!("No tracks yet. Spice things up with your first track from a YouTube video:");
        println!("  ytdeck add <URL> --title <TITLE>");
        println!("  ytdeck seed");
        return Ok(());
    }

    let rendered = match format {
        OutputFormat::Text => ytdeck::output::render_text(&tracks),
        OutputFormat::Json => ytdeck::output::render_json(&tracks)?,
    };
    println!("{rendered}");
    Ok(())
}

fn cmd_edit(
    store: &TrackStore,
    index: usize,
    url: Option<String>,
    ends_in: Option<EndsIn>,
    title: Option<String>,
) -> Result<()> {
    if url.is_none() && ends_in.is_none() && title.is_none() {
        bail!("nothing to change; pass --url, --ends-in and/or --title");
    }

    let mut tracks = store.load()?;
    let track = track_at_mut(&mut tracks, index)?;

    // Identifier, start and end always travel together: rebuild the whole
    // window from a fresh resolver+calculator run, even for a title-only
    // edit.
    let reference = match url {
        Some(url) => resolve_or_explain(&url)?,
        None => track.reference(),
    };
    let draft = TrackDraft {
        reference,
        ends_in: ends_in.unwrap_or_else(|| track.ends_in()),
        title: title.unwrap_or_else(|| track.title.clone()),
    };
    track.apply_draft(draft)?;
    info!("Updated track {} ({})", track.id, track.title);
    println!(
        "Updated \"{}\" [{}]  {}",
        track.title,
        track.id,
        ytdeck::output::window_label(track),
    );
    store.save(&tracks)
}

fn cmd_remove(store: &TrackStore, index: usize) -> Result<()> {
    let mut tracks = store.load()?;
    track_at(&tracks, index)?;
    let removed = tracks.remove(index - 1);
    info!("Removed track {} ({})", removed.id, removed.title);
    println!("Removed \"{}\"", removed.title);
    store.save(&tracks)
}

async fn cmd_play(
    store: &TrackStore,
    config: &Config,
    client: &reqwest::Client,
    index: usize,
    no_autoplay: bool,
    verbose: bool,
) -> Result<()> {
    let tracks = store.load()?;
    let track = track_at(&tracks, index)?;

    let auto_play = if no_autoplay { false } else { config.autoplay.unwrap_or(true) };
    let params = ytdeck::player::PlayerParameters::for_track(track, auto_play);

    println!("{} [{}]", track.title, track.id);
    println!("  window  {}", ytdeck::output::window_label(track));
    println!("  embed   {}", params.embed_url());
    println!("  share   {}", ytdeck::youtube::share_url(&track.id, track.start_time));

    if verbose {
        eprintln!("Player: {}", ytdeck::player::PlayerState::default());
    }
    let state = ytdeck::player::probe(client, &track.id).await;
    println!("  player  {state}");
    Ok(())
}

fn cmd_share(store: &TrackStore, index: usize) -> Result<()> {
    let tracks = store.load()?;
    let track = track_at(&tracks, index)?;
    println!("{}", ytdeck::youtube::share_url(&track.id, track.start_time));
    Ok(())
}

async fn cmd_thumb(store: &TrackStore, client: &reqwest::Client, index: usize, output: Option<PathBuf>) -> Result<()> {
    let tracks = store.load()?;
    let track = track_at(&tracks, index)?;

    let bytes = retry(3, || {
        let video_id = &track.id;
        async move { ytdeck::thumbnail::fetch(client, video_id).await }
    })
    .await
    .wrap_err("thumbnail fetch failed")?;

    let path = output.unwrap_or_else(|| PathBuf::from(format!("{}.jpg", track.id)));
    std::fs::write(&path, &bytes)?;
    info!("Wrote thumbnail for {} to {}", track.id, path.display());
    println!("Wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

fn cmd_seed(store: &TrackStore) -> Result<()> {
    let tracks = store.load()?;
    if !tracks.is_empty() {
        bail!(
            "library already has {} track(s); seeding is only for an empty library",
            tracks.len()
        );
    }

    let seeded = ytdeck::recommended_tracks();
    store.save(&seeded)?;
    info!("Seeded library with {} tracks", seeded.len());
    println!("Added {} sample tracks. Run `ytdeck list` to see them.", seeded.len());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging()?;

    // Load config file (non-fatal if missing/invalid)
    let config = Config::load().unwrap_or_default();

    let store = match config.data_dir {
        Some(ref dir) => TrackStore::in_dir(dir),
        None => TrackStore::open_default(),
    };

    let after_help = build_after_help(&store);
    let cmd = <Cli as clap::CommandFactory>::command().after_help(after_help);
    let matches = cmd.get_matches();
    let cli = <Cli as clap::FromArgMatches>::from_arg_matches(&matches)?;

    if cli.verbose {
        let config_path = ytdeck::config::config_path();
        if config_path.exists() {
            eprintln!("Config: {}", config_path.display());
        }
        if let Some(ref default_ends_in) = config.default_ends_in {
            debug!("Config default_ends_in: {default_ends_in}");
        }
        if let Some(autoplay) = config.autoplay {
            debug!("Config autoplay: {autoplay}");
        }
        eprintln!("Tracks: {}", store.path().display());
    }

    let client = reqwest::Client::new();

    match cli.command {
        Command::Add { url, title, ends_in } => cmd_add(&store, &config, url, title, ends_in),
        Command::List { format } => cmd_list(&store, format),
        Command::Edit { index, url, ends_in, title } => cmd_edit(&store, index, url, ends_in, title),
        Command::Remove { index } => cmd_remove(&store, index),
        Command::Play { index, no_autoplay } => {
            cmd_play(&store, &config, &client, index, no_autoplay, cli.verbose).await
        }
        Command::Share { index } => cmd_share(&store, index),
        Command::Thumb { index, output } => cmd_thumb(&store, &client, index, output).await,
        Command::Seed => cmd_seed(&store),
    }
}
