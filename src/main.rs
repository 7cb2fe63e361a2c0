use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use proticket_auth::{
    AccountService, Argon2Hasher, Config, Database, Locale, SqliteAccountStore,
};

#[derive(Debug, Parser)]
#[command(name = "proticket-auth", version, about = "ProTicket account administration")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create or migrate the database and seed the configured roles
    Init,
    /// Register a new account
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "customer")]
        role: String,
    },
    /// Check a password and record the login time
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Load configuration
    let config = match Config::load_with_env(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {}: {e}", args.config.display());
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    // Initialize logging
    if let Err(e) = proticket_auth::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        proticket_auth::logging::init_console_only(&config.logging.level);
    }

    if let Err(e) = config.validate() {
        error!("{e}");
        return ExitCode::FAILURE;
    }

    let db = match Database::open(&config.database).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to open database: {e}");
            return ExitCode::FAILURE;
        }
    };

    let code = run(&args.command, &config, &db).await;
    db.close().await;
    code
}

async fn run(command: &Command, config: &Config, db: &Database) -> ExitCode {
    if let Err(e) = db.seed_roles(&config.auth.seed_roles).await {
        error!("Failed to seed roles: {e}");
        return ExitCode::FAILURE;
    }

    let hasher = match Argon2Hasher::from_config(&config.auth) {
        Ok(hasher) => hasher,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let service = AccountService::new(SqliteAccountStore::new(db), hasher);
    let locale = Locale::from_code(&config.locale.language);

    let result = match command {
        Command::Init => {
            info!(database = %config.database.path, "Database initialized");
            return ExitCode::SUCCESS;
        }
        Command::Register {
            email,
            password,
            role,
        } => service.register(email, password, role).await,
        Command::Login { email, password } => service.authenticate(email, password).await,
    };

    match result {
        Ok(user) => {
            println!(
                "{} (id {}, role {}, last login {})",
                user.email,
                user.id,
                user.role.name,
                user.last_login
                    .map(|t| t.to_rfc3339())
                    .unwrap_or_else(|| "never".to_string())
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e.user_message(locale));
            ExitCode::FAILURE
        }
    }
}
