//! bankfront - command-line companion to the banking frontend
//!
//! Exposes the client-side utilities from a terminal:
//! - Field validation with the same rules the web forms use
//! - Currency and date formatting
//! - Theme persistence
//! - Account listing through the backend API

use anyhow::{Context, Result};
use bankfront::utils::formatting::{format_currency, format_date};
use bankfront::utils::sanitize::sanitize_input;
use bankfront::validation::{parse_rules, resolve_label, validate, Rule};
use bankfront::{AccountCache, ApiClient, Config, Theme};
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Backend base URL (overrides the config file)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a value against a rule list, e.g. `required,minLength:8`
    Validate {
        #[arg(short, long)]
        rules: String,

        /// Label used in error messages
        #[arg(short, long)]
        label: Option<String>,

        value: String,
    },

    /// List the available rule names
    Rules,

    /// Format an amount as Indian rupees
    Currency {
        #[arg(allow_negative_numbers = true)]
        amount: f64,
    },

    /// Format a backend timestamp (JSON array/object, ISO string or epoch millis)
    Date { value: String },

    /// Strip markup from a piece of text
    Sanitize { text: String },

    /// Show, toggle or set the colour theme
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },

    /// List accounts from the backend
    Accounts {
        /// Print only the account with this number
        #[arg(short, long)]
        find: Option<String>,

        /// Keep refreshing on the configured interval until Ctrl+C
        #[arg(short, long)]
        watch: bool,
    },
}

impl Command {
    /// Only theme and account commands read the config file
    fn uses_config(&self) -> bool {
        matches!(self, Command::Theme { .. } | Command::Accounts { .. })
    }
}

#[derive(Subcommand, Debug)]
enum ThemeAction {
    Show,
    Toggle,
    Set { theme: Theme },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let Args { base_url, command } = Args::parse();
    let mut config = if command.uses_config() {
        load_config(base_url)?
    } else {
        Config::default()
    };

    match command {
        Command::Validate {
            rules,
            label,
            value,
        } => {
            let rules = parse_rules(&rules)?;
            let label = resolve_label(label.as_deref(), None);
            let result = validate(&value, label, &rules);
            match result.message {
                Some(message) => {
                    println!("{}", message);
                    return Ok(ExitCode::FAILURE);
                }
                None => println!("ok"),
            }
        }
        Command::Rules => {
            for name in Rule::NAMES {
                println!("{}", name);
            }
        }
        Command::Currency { amount } => println!("{}", format_currency(amount)),
        Command::Date { value } => {
            let parsed = serde_json::from_str(&value)
                .unwrap_or_else(|_| serde_json::Value::String(value.clone()));
            println!("{}", format_date(&parsed));
        }
        Command::Sanitize { text } => println!("{}", sanitize_input(&text)),
        Command::Theme { action } => run_theme(&mut config, action)?,
        Command::Accounts { find, watch } => run_accounts(&config, find, watch).await?,
    }

    Ok(ExitCode::SUCCESS)
}

fn load_config(base_url: Option<String>) -> Result<Config> {
    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(base_url) = base_url {
        config.base_url = base_url;
    }
    Ok(config)
}

fn run_theme(config: &mut Config, action: Option<ThemeAction>) -> Result<()> {
    match action.unwrap_or(ThemeAction::Show) {
        ThemeAction::Show => {}
        ThemeAction::Toggle => {
            config.toggle_theme();
            config.save()?;
        }
        ThemeAction::Set { theme } => {
            config.theme = theme;
            config.save()?;
        }
    }
    println!("{}", config.theme);
    Ok(())
}

async fn run_accounts(config: &Config, find: Option<String>, follow: bool) -> Result<()> {
    let client = ApiClient::new(config.base_url.clone())?;
    let mut cache = AccountCache::new(Arc::new(client), config.account_refresh_interval());

    if follow {
        let (tx, rx) = watch::channel(false);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                let _ = tx.send(true);
            }
        });
        tracing::info!(interval = ?cache.refresh_interval(), "watching accounts");
        cache.run(rx).await;
    } else {
        cache.refresh().await;
    }

    match find {
        Some(account_no) => match cache.get(&account_no) {
            Some(account) => println!(
                "{}\t{}\t{}\t{}",
                account.account_no,
                account.customer_name,
                account.account_type,
                format_currency(account.balance)
            ),
            None => anyhow::bail!("Account {} not found", account_no),
        },
        None => {
            for (value, label) in cache.options() {
                println!("{}\t{}", value, label);
            }
        }
    }

    Ok(())
}
