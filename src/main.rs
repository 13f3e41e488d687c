//! db-chat - A chat-style natural-language front-end for MySQL databases.

use std::process::ExitCode;

use tracing::{error, info, warn};

use db_chat::agent::AgentBridge;
use db_chat::cli::Cli;
use db_chat::config::{Config, DEFAULT_MODEL, GroqConfig, MysqlConfig};
use db_chat::db::{self, DatabaseClient, FailingDatabaseClient, MockDatabaseClient};
use db_chat::error::Result;
use db_chat::llm::{GroqClient, LlmClient, MockLlmClient};
use db_chat::{headless, logging, tui};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // File logging in TUI mode keeps tracing output off the terminal;
    // headless mode logs to stderr and answers on stdout.
    if cli.is_headless() {
        logging::init_stderr_logging();
    } else {
        logging::init_file_logging();
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}: {e}", e.category());
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;

    let (llm, db) = build_clients(&config, cli.mock).await?;

    // Snapshot the schema for the sidebar and the system prompt, over a
    // connection of its own. Failures collapse to an empty map, which the
    // UI renders as a warning; the shell itself stays up.
    let schema = if cli.mock {
        db.fetch_schema_map().await.unwrap_or_default()
    } else {
        db::fetch_schema(&config.mysql).await
    };
    info!(tables = schema.len(), "Schema snapshot loaded");

    let connection_info = if cli.mock {
        "mock".to_string()
    } else {
        config.mysql.display_string()
    };

    let bridge = AgentBridge::new(llm, db, schema.clone(), config.timeout_secs);

    match cli.ask {
        Some(question) => headless::run(bridge, &question).await,
        None => tui::run(bridge, schema, connection_info).await,
    }
}

/// Assembles the configuration from the environment and CLI overrides.
///
/// Validation is fail-fast: every missing credential is reported in one
/// error before any connection is attempted. Mock mode needs none of it.
fn load_config(cli: &Cli) -> Result<Config> {
    // Seed the environment from a .env file if one is available
    match &cli.env_file {
        Some(path) => {
            dotenvy::from_path(path).map_err(|e| {
                db_chat::error::ChatError::config(format!(
                    "Could not load env file {}: {e}",
                    path.display()
                ))
            })?;
        }
        None => {
            let _ = dotenvy::dotenv();
        }
    }

    if cli.mock {
        return Ok(Config {
            mysql: MysqlConfig {
                host: "mock".to_string(),
                port: 0,
                user: "mock".to_string(),
                password: String::new(),
                database: "mock".to_string(),
            },
            groq: GroqConfig {
                api_key: String::new(),
                model: DEFAULT_MODEL.to_string(),
            },
            timeout_secs: cli.timeout_secs,
        });
    }

    let mut config = Config::from_env()?.with_timeout(cli.timeout_secs);

    if let Some(url) = &cli.database_url {
        config.mysql = MysqlConfig::from_connection_string(url)?;
    }
    if let Some(model) = &cli.model {
        config = config.with_model(model.clone());
    }

    Ok(config)
}

/// Builds the LLM and database clients, real or mock.
///
/// A failed database connection does not abort startup: the shell runs
/// with an unreachable-database client so the sidebar shows the warning
/// and every question surfaces the connection error.
async fn build_clients(
    config: &Config,
    mock: bool,
) -> Result<(Box<dyn LlmClient>, Box<dyn DatabaseClient>)> {
    if mock {
        let llm = MockLlmClient::with_tool_call(
            "list_tables",
            "{}",
            "This is the mock model. The sample database has tables 'users' and 'orders'.",
        );
        return Ok((Box::new(llm), Box::new(MockDatabaseClient::sample())));
    }

    let llm = GroqClient::new(config.groq.clone())?;

    let db: Box<dyn DatabaseClient> = match db::connect(&config.mysql).await {
        Ok(client) => {
            info!("Connected to {}", config.mysql.display_string());
            client
        }
        Err(e) => {
            warn!("Database connection failed: {e}");
            Box::new(FailingDatabaseClient::new())
        }
    };

    Ok((Box::new(llm), db))
}
