use std::fs::OpenOptions;
use std::net::SocketAddr;
use std::sync::Mutex;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use scapegpt::connector::{api::stub_server, tui};
use scapegpt::{AskController, Commands, Container, ContainerConfig, RateLimitQuota, StubServerConfig};

const LOG_FILE_NAME: &str = "scapegpt.log";

#[derive(Parser)]
#[command(name = "scapegpt")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Query endpoint (defaults to $SCAPEGPT_URL or http://localhost:4747/)
    #[arg(long, global = true)]
    url: Option<String>,

    /// Caller token sent with every query; omitted when absent
    #[arg(long, global = true)]
    identity: Option<String>,

    /// Identify with a freshly generated session UUID
    #[arg(long, global = true)]
    new_session: bool,

    /// End-to-end deadline for one query (defaults to $SCAPEGPT_TIMEOUT_SECS or 45)
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: Option<u64>,

    /// Answer locally without calling the endpoint
    #[arg(long, global = true)]
    mock: bool,

    /// Queries per minute quoted in the rate-limit message
    #[arg(long, global = true, default_value_t = 3)]
    per_minute: u32,

    /// Queries per day quoted in the rate-limit message
    #[arg(long, global = true, default_value_t = 30)]
    per_day: u32,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl Cli {
    fn container_config(&self) -> ContainerConfig {
        ContainerConfig {
            endpoint: self.url.clone(),
            timeout_secs: self.timeout_secs,
            identity: self.identity.clone(),
            new_session: self.new_session,
            mock: self.mock,
            quota: RateLimitQuota {
                per_minute: self.per_minute,
                per_day: self.per_day,
            },
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.clone().unwrap_or(Commands::Tui);

    // The panel owns the screen, so its logs go to a file instead.
    init_logging(cli.verbose, command == Commands::Tui)?;

    match command {
        Commands::Tui => {
            let container = Container::new(cli.container_config())?;
            info!("Starting panel against {}", container.endpoint());
            tui::run(container.submit_use_case()).await?;
        }

        Commands::Ask { prompt } => {
            let container = Container::new(cli.container_config())?;
            let text = AskController::new(&container).ask(prompt).await?;
            println!("{}", text);
        }

        Commands::StubServer {
            port,
            reply,
            status,
            public,
        } => {
            let host = if public { [0, 0, 0, 0] } else { [127, 0, 0, 1] };
            let config = StubServerConfig {
                addr: SocketAddr::from((host, port)),
                reply,
                status,
            };
            stub_server::serve(config).await?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool, to_file: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false);

    if to_file {
        let path = std::env::temp_dir().join(LOG_FILE_NAME);
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let subscriber = builder.with_ansi(false).with_writer(Mutex::new(file)).finish();
        tracing::subscriber::set_global_default(subscriber)?;
    } else {
        let subscriber = builder.with_writer(std::io::stderr).finish();
        tracing::subscriber::set_global_default(subscriber)?;
    }

    Ok(())
}

#[cfg(test)]
mod cli_tests {
    use super::*;

    #[test]
    fn no_command_means_panel() {
        let cli = Cli::try_parse_from(["scapegpt"]).unwrap();
        assert_eq!(cli.command, None);
    }

    #[test]
    fn global_flags_feed_container_config() {
        let cli = Cli::try_parse_from([
            "scapegpt",
            "ask",
            "where is the grand exchange?",
            "--url",
            "http://10.0.0.5/",
            "--identity",
            "abc",
            "--per-day",
            "20",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Some(Commands::Ask {
                prompt: "where is the grand exchange?".into()
            })
        );
        let config = cli.container_config();
        assert_eq!(config.endpoint.as_deref(), Some("http://10.0.0.5/"));
        assert_eq!(config.identity.as_deref(), Some("abc"));
        assert_eq!(config.quota.per_minute, 3);
        assert_eq!(config.quota.per_day, 20);
    }

    #[test]
    fn timeout_must_be_positive() {
        assert!(Cli::try_parse_from(["scapegpt", "--timeout-secs", "0", "ask", "hi"]).is_err());

        let cli = Cli::try_parse_from(["scapegpt", "--timeout-secs", "5", "ask", "hi"]).unwrap();
        assert_eq!(cli.container_config().timeout_secs, Some(5));
    }

    #[test]
    fn stub_server_defaults() {
        let cli = Cli::try_parse_from(["scapegpt", "stub-server"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::StubServer {
                port: 4747,
                reply: "yay".into(),
                status: 200,
                public: false,
            })
        );
    }
}
