use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use create_admin::{admin, config::Config, db, password};

/// Create an admin user for the course platform web application.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Username for the new admin user (e.g., 'admin').
    #[arg(long)]
    username: String,

    /// Email address for the new admin user (e.g., 'admin@example.com').
    #[arg(long)]
    email: String,

    /// Password for the new admin user. Choose a strong password.
    #[arg(long)]
    password: String,
}

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "create_admin=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    if let Err(e) = run(args).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    // Validated before the pool is opened: a short password never touches the database
    password::validate_password(&args.password)?;

    let config = Config::from_env()?;
    let pool = db::create_pool(&config.database_url).await?;
    tracing::info!("Database connection pool created");

    let user = admin::create_admin(&pool, &args.username, &args.email, &args.password).await?;
    tracing::info!(id = %user.id, "Admin user created");

    println!("Admin user '{}' created successfully.", user.username);

    Ok(())
}
