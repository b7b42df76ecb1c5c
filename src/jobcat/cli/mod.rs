//! Terminal client over [`JobcatApi`]. Everything that touches stdout, stderr
//! or the environment lives here.

mod handlers;
mod print;

use crate::args::{Cli, Commands};
use directories::ProjectDirs;
use jobcat::api::JobcatApi;
use jobcat::config::JobcatConfig;
use jobcat::error::{JobcatError, Result};
use jobcat::store::fs::FileStore;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const HOME_ENV: &str = "JOBCAT_HOME";

pub(crate) struct AppContext {
    pub api: JobcatApi<FileStore>,
    pub config: JobcatConfig,
    pub data_dir: PathBuf,
}

/// Log to stderr; `RUST_LOG` wins over the verbosity flag.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "jobcat=debug" } else { "jobcat=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub fn run(cli: Cli) -> Result<()> {
    let data_dir = resolve_data_dir(&cli)?;
    let config = JobcatConfig::load(&data_dir)?.with_env_overrides();

    // `config` runs without the API so broken storage keys can still be fixed.
    match cli.command {
        Some(Commands::Config { key, value }) => handlers::config(&data_dir, &config, key, value),
        command => dispatch(&mut init_context(data_dir, config)?, command),
    }
}

fn dispatch(ctx: &mut AppContext, command: Option<Commands>) -> Result<()> {
    match command {
        Some(Commands::List(args)) => handlers::list(ctx, args),
        Some(Commands::View { id }) => handlers::view(ctx, &id),
        Some(Commands::Add(fields)) => handlers::add(ctx, fields),
        Some(Commands::Update { id, fields }) => handlers::update(ctx, &id, fields),
        Some(Commands::Delete { ids }) => handlers::delete(ctx, &ids),
        Some(Commands::Purge { yes }) => handlers::purge(ctx, yes),
        Some(Commands::Sync { from }) => handlers::sync(ctx, from),
        Some(Commands::Stats) => handlers::stats(ctx),
        Some(Commands::Login { passcode }) => handlers::login(ctx, &passcode),
        Some(Commands::Logout) => handlers::logout(ctx),
        Some(Commands::Status) => handlers::status(ctx),
        Some(Commands::Config { key, value }) => {
            handlers::config(&ctx.data_dir, &ctx.config, key, value)
        }
        None => handlers::list(ctx, Default::default()),
    }
}

fn init_context(data_dir: PathBuf, config: JobcatConfig) -> Result<AppContext> {
    let store = FileStore::new(data_dir.clone());
    let api = JobcatApi::new(store, &config)?;

    Ok(AppContext {
        api,
        config,
        data_dir,
    })
}

fn resolve_data_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.data_dir {
        return Ok(dir.clone());
    }
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "jobcat", "jobcat")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| JobcatError::Config("Could not determine data directory".into()))
}
