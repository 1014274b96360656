use std::net::SocketAddr;

use clap::{Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use userbase::accounts::{validate_credentials, ExtraFields, UserManager};
use userbase::config::Config;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Create an account with staff and superuser rights
    CreateSuperuser {
        #[arg(long)]
        email: String,
        /// Leave unset to create an account without a usable password
        #[arg(long, env = "USERBASE_SUPERUSER_PASSWORD")]
        password: Option<String>,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(&config.log_level)
        }))
        .init();

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let pool = connect(&config).await?;
            serve(pool, config).await
        }
        Command::CreateSuperuser {
            email,
            password,
            first_name,
            last_name,
        } => {
            validate_credentials(&email, password.as_deref())?;
            let manager = UserManager::new(connect(&config).await?);
            let extra = ExtraFields {
                first_name,
                last_name,
                ..Default::default()
            };
            let user = manager
                .create_superuser(&email, password.as_deref(), extra)
                .await?;
            println!("Superuser created: {user} ({})", user.id);
            Ok(())
        }
    }
}

async fn connect(config: &Config) -> Result<PgPool, Box<dyn std::error::Error>> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Migrations applied");

    Ok(pool)
}

async fn serve(pool: PgPool, config: Config) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Starting userbase");

    let addr = SocketAddr::new(config.host, config.port);
    let app = userbase::build_app(pool, config);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
