use clap::Parser;
use herald::core::config::{self, EnvOverrides};
use herald::service::{AnswerService, HttpAnswerService};
use herald::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "herald", about = "Ask a portfolio assistant from the terminal")]
struct Args {
    /// Answer service base URL (overrides config and HERALD_BASE_URL)
    #[arg(short, long)]
    base_url: Option<String>,

    /// Probe the answer service's health endpoint and exit
    #[arg(long)]
    check: bool,

    /// Log level written to herald.log
    #[arg(long, default_value_t = LevelFilter::Debug)]
    log_level: LevelFilter,
}

#[tokio::main]
async fn main() -> std::io::Result<ExitCode> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to herald.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("herald.log") {
        let _ = WriteLogger::init(args.log_level, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Falling back to default config: {}", e);
            Default::default()
        }
    };
    let resolved = config::resolve(
        &file_config,
        &EnvOverrides::from_env(),
        args.base_url.as_deref(),
    );

    log::info!("Herald starting up against {}", resolved.base_url);

    if args.check {
        return Ok(check(&resolved).await);
    }

    tui::run(resolved)?;
    Ok(ExitCode::SUCCESS)
}

/// `--check`: one health probe, result on stdout.
async fn check(resolved: &config::ResolvedConfig) -> ExitCode {
    let service = match HttpAnswerService::new(&resolved.base_url, resolved.timeout) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match service.health().await {
        Ok(health) => {
            let version = health.version.as_deref().unwrap_or("unknown");
            println!(
                "{}: {} (version {})",
                service.base_url(),
                health.status,
                version
            );
            if !health.features.is_empty() {
                println!("features: {}", health.features.join(", "));
            }
            if health.is_healthy() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            log::warn!("Health check failed: {}", e);
            eprintln!("{}: {}", service.base_url(), e);
            ExitCode::FAILURE
        }
    }
}
