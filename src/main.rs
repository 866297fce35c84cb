use anyhow::{Context, Result};
use clap::Parser;
use land_core::engine::config::EngineConfig;
use land_core::session::{Session, ENGINE_NAME};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Land game engine for a line-protocol game manager",
    long_about = None
)]
struct Args {
    /// Name announced to the game manager
    #[arg(long, default_value = ENGINE_NAME)]
    name: String,

    /// JSON file with engine settings (cutoff evaluation, cache policy)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let args = Args::parse();

    // stdout carries the protocol, so every log line goes to stderr
    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .format(|buf, record| {
        writeln!(
            buf,
            "[{}] {}: {}",
            record.level(),
            record.target(),
            record.args()
        )
    })
    .write_style(env_logger::WriteStyle::Never)
    .target(env_logger::Target::Stderr)
    .init();

    if let Err(e) = run(&args) {
        log::error!("Fatal error: {e:#}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let engine_config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading engine config {}", path.display()))?;
            EngineConfig::load_from_json(&json)
                .with_context(|| format!("parsing engine config {}", path.display()))?
        }
        None => EngineConfig::default(),
    };
    log::debug!("Engine config: {engine_config:?}");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut session = Session::new(
        stdin.lock(),
        stdout.lock(),
        args.name.as_str(),
        Arc::new(engine_config),
    );
    let (dark, light) = session.run()?;
    log::info!("Session finished with dark {dark}, light {light}");
    Ok(())
}
