use isaithalam::utils::error_handling::create_runtime;
use isaithalam::{CatalogService, Config, Track};
use serde::Serialize;
use std::error::Error;

// App version and metadata
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const APP_NAME: &str = "isaithalam";

const USAGE: &str = "usage: isaithalam <command>

commands:
  search <query>      local matches, then remote results
  trending            top local tracks, then remote trending
  song <id>           local track, else remote lookup
  all                 every local track
  featured            featured local tracks
  liked               liked local tracks
  genres              distinct local genres
  genre <name>        local tracks of a genre
  play <id>           count one play of a local track
  like <id>           toggle like on a local track
  import <file.json>  add local tracks from a JSON array";

fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    // Set RUST_LOG=debug for verbose output, RUST_LOG=info for normal logs
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .filter_module("reqwest", log::LevelFilter::Warn)
        .filter_module("hyper_util", log::LevelFilter::Warn)
        .init();

    log::info!("[Main] Starting {} v{}", APP_NAME, APP_VERSION);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        eprintln!("{}", USAGE);
        std::process::exit(2);
    };

    let config = Config::from_env()?;
    log::debug!("[Main] Config: {:?}", config);
    let catalog = isaithalam::open_catalog(&config)?;

    let rt = create_runtime()?;
    rt.block_on(run(&catalog, command, &args[1..]))
}

async fn run(
    catalog: &CatalogService,
    command: &str,
    rest: &[String],
) -> Result<(), Box<dyn Error + Send + Sync>> {
    match command {
        "search" => {
            let query = rest.join(" ");
            if query.trim().is_empty() {
                return Err("search needs a query".into());
            }
            print_json(&catalog.search(&query).await)
        }
        "trending" => print_json(&catalog.trending().await),
        "song" => {
            let id = parse_id(rest)?;
            match catalog.lookup_by_id(id).await {
                Some(track) => print_json(&track),
                None => not_found(id),
            }
        }
        "all" => print_json(&catalog.all_tracks()),
        "featured" => print_json(&catalog.featured()),
        "liked" => print_json(&catalog.liked()),
        "genres" => print_json(&catalog.genres()),
        "genre" => {
            let genre = rest.first().ok_or("genre needs a name")?;
            print_json(&catalog.by_genre(genre))
        }
        "play" => {
            let id = parse_id(rest)?;
            match catalog.increment_plays(id)? {
                Some(track) => print_json(&track),
                None => not_found(id),
            }
        }
        "like" => {
            let id = parse_id(rest)?;
            match catalog.toggle_like(id)? {
                Some(track) => print_json(&serde_json::json!({ "liked": track.liked })),
                None => not_found(id),
            }
        }
        "import" => {
            let path = rest.first().ok_or("import needs a file")?;
            let tracks: Vec<Track> = serde_json::from_str(&std::fs::read_to_string(path)?)?;
            let mut saved = Vec::with_capacity(tracks.len());
            for track in &tracks {
                saved.push(catalog.add_local(track)?);
            }
            log::info!("[Main] Imported {} tracks from {}", saved.len(), path);
            print_json(&saved)
        }
        other => {
            eprintln!("unknown command '{}'\n\n{}", other, USAGE);
            std::process::exit(2);
        }
    }
}

fn parse_id(rest: &[String]) -> Result<i64, Box<dyn Error + Send + Sync>> {
    let raw = rest.first().ok_or("missing track id")?;
    raw.parse::<i64>()
        .map_err(|e| format!("invalid track id '{}': {}", raw, e).into())
}

fn not_found(id: i64) -> Result<(), Box<dyn Error + Send + Sync>> {
    eprintln!("track {} not found", id);
    std::process::exit(1);
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), Box<dyn Error + Send + Sync>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
