use anyhow::anyhow;
use anyhow::Context;
use clap::Parser;
use clap::Subcommand;
use serde_json::Value;
use ticket_auth::AuthConfig;
use ticket_auth::Claims;
use ticket_auth::CredentialHasher;
use ticket_auth::TokenSigner;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Operator tool for credentials and tokens
#[derive(Parser)]
#[command(name = "ticket-auth")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hash a password with the configured strategy
    Hash { password: String },

    /// Check a password against a stored hash
    VerifyPassword { password: String, hash: String },

    /// Issue a token for a user id
    Issue {
        #[arg(long)]
        sub: i64,

        /// Lifetime in seconds (defaults to jwt.ttl_seconds)
        #[arg(long)]
        ttl: Option<i64>,

        /// Extra claim as key=value; the value is parsed as JSON when possible
        #[arg(long = "claim", value_parser = parse_claim)]
        claims: Vec<(String, Value)>,
    },

    /// Verify a token and print its claims
    Verify { token: String },

    /// Print a token's claims without verifying it
    Inspect { token: String },
}

fn parse_claim(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got {raw:?}"))?;
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::from(value));
    Ok((key.to_string(), value))
}

fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ticket_auth=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = AuthConfig::load().context("Failed to load configuration")?;

    tracing::debug!(
        ttl_seconds = config.jwt.ttl_seconds,
        strategy = ?config.password.strategy,
        "Configuration loaded"
    );

    let signer = TokenSigner::new(config.signing_key());

    match cli.command {
        Commands::Hash { password } => {
            config
                .password_policy()
                .check(&password)
                .context("Password rejected")?;
            let hash = config.password_hasher().hash(&password)?;
            println!("{hash}");
        }
        Commands::VerifyPassword { password, hash } => {
            if !config.password_hasher().verify(&password, &hash) {
                return Err(anyhow!("Password does not match"));
            }
            println!("ok");
        }
        Commands::Issue { sub, ttl, claims } => {
            let claims = claims
                .into_iter()
                .fold(Claims::new(), |claims, (key, value)| {
                    claims.with_claim(key, value)
                })
                .with_subject(sub);
            let token = signer.issue(claims, ttl.unwrap_or(config.jwt.ttl_seconds));
            println!("{token}");
        }
        Commands::Verify { token } => {
            let claims = signer.verify(&token).context("Token rejected")?;
            println!("{}", serde_json::to_string_pretty(&claims)?);
        }
        Commands::Inspect { token } => {
            let claims = signer.decode_unverified(&token)?;
            println!("{}", serde_json::to_string_pretty(&claims)?);
        }
    }

    Ok(())
}
