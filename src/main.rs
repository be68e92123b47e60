mod viewer;

use mapfgrid::config::{Config, DEFAULT_CONFIG_PATH};
use mapfgrid::Instance;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::process::ExitCode;

const USAGE: &str = "Usage: mapfgrid [--config <file>] [--map <file>] [--agents <file>] \
[--seed <n>] [--snapshot <file.json>] [--no-window]";

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    map: Option<String>,
    agents: Option<String>,
    seed: Option<u64>,
    snapshot: Option<PathBuf>,
    no_window: bool,
}

fn parse_args(raw: impl IntoIterator<Item = String>) -> Result<Args, String> {
    let mut args = Args::default();
    let mut raw = raw.into_iter();
    while let Some(flag) = raw.next() {
        let mut value = || raw.next().ok_or_else(|| format!("{} expects a value", flag));
        match flag.as_str() {
            "--config" => args.config = Some(PathBuf::from(value()?)),
            "--map" => args.map = Some(value()?),
            "--agents" => args.agents = Some(value()?),
            "--seed" => {
                let seed = value()?;
                args.seed = Some(seed.parse().map_err(|_| format!("invalid seed '{}'", seed))?);
            }
            "--snapshot" => args.snapshot = Some(PathBuf::from(value()?)),
            "--no-window" => args.no_window = true,
            other => return Err(format!("unknown argument '{}'", other)),
        }
    }
    Ok(args)
}

fn init_logging(level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> ExitCode {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{}", msg);
            eprintln!("{}", USAGE);
            return ExitCode::FAILURE;
        }
    };

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let mut config = Config::load(&config_path);
    if let Some(map) = args.map {
        config.map.path = map;
    }
    if let Some(agents) = args.agents {
        config.agents.path = agents;
    }
    init_logging(&config.logging.level);

    let seed = args
        .seed
        .or(config.random.seed)
        .unwrap_or_else(rand::random::<u64>);
    log::info!("Random seed {}", seed);
    let mut rng = SmallRng::seed_from_u64(seed);

    let instance = match Instance::load_or_generate(&config.map, &config.agents, &mut rng) {
        Ok(instance) => instance,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    print!("{}", instance.report());

    if let Some(path) = &args.snapshot {
        if let Err(e) = instance.snapshot().save_to_file(path) {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
        log::info!("Wrote snapshot to {}", path.display());
    }

    if !args.no_window {
        viewer::open(instance, config.viewer);
    }
    ExitCode::SUCCESS
}
