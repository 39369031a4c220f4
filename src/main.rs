//! Command-line checker for seo-guard rules.
//!
//! Runs the same schemas and sanitizers the API uses, so operators can see
//! why a value was rejected without going through HTTP.
//!
//! # Usage
//!
//! ```bash
//! # Validate a single value
//! seo-guard check shop my-store.myshopify.com
//! seo-guard check email Test@Example.COM
//!
//! # Validate a JSON payload from a file or stdin
//! seo-guard payload product-seo update.json
//! echo '{"page": "2"}' | seo-guard payload pagination
//!
//! # Sanitize text
//! seo-guard sanitize html '<div onclick="x()">hi</div>'
//!
//! # Check an origin against ALLOWED_ORIGINS or explicit entries
//! seo-guard origin https://my-app.vercel.app --allow 'https://*.vercel.app'
//! ```
//!
//! Exit code is 0 when the input is accepted and 1 when it is rejected.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use seo_guard::config::{self, Config};
use seo_guard::sanitize;
use seo_guard::schema::{
    Connection, DateRange, Email, ExecutionMode, ObjectId, Pagination, ProductSeoUpdate,
    ResourceUrl, SafeString, Schema, ShopDomain, SiteIssue, WebhookRegistration,
};
use seo_guard::{SchemaError, telemetry};

/// Check values against seo-guard validation and sanitization rules.
#[derive(Parser)]
#[command(name = "seo-guard")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log the loaded configuration
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a single value
    Check {
        #[arg(value_enum)]
        kind: ValueKind,
        value: String,
    },

    /// Validate a JSON payload read from FILE or stdin
    Payload {
        #[arg(value_enum)]
        schema: PayloadKind,
        file: Option<PathBuf>,
    },

    /// Print sanitized text
    Sanitize {
        #[arg(value_enum)]
        mode: SanitizeMode,
        text: String,

        /// Minimum raw length for `safe-string`
        #[arg(long, default_value_t = 1)]
        min: usize,

        /// Maximum raw length for `safe-string`
        #[arg(long, default_value_t = 1000)]
        max: usize,
    },

    /// Check a request origin against the allow-list
    Origin {
        origin: String,

        /// Allowed origin (repeatable); defaults to ALLOWED_ORIGINS
        #[arg(short, long)]
        allow: Vec<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ValueKind {
    Shop,
    Id,
    Uuid,
    Email,
    Url,
    ExecutionMode,
}

#[derive(Clone, Copy, ValueEnum)]
enum PayloadKind {
    Pagination,
    DateRange,
    ProductSeo,
    Connection,
    Issue,
    Webhook,
}

#[derive(Clone, Copy, ValueEnum)]
enum SanitizeMode {
    Tags,
    Html,
    Schemes,
    Sql,
    Path,
    SafeString,
}

fn main() -> Result<ExitCode> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Invalid configuration")?;
    telemetry::init(&config);

    if cli.verbose {
        config.print_summary();
    }

    match cli.command {
        Commands::Check { kind, value } => {
            ensure_size(&config, value.len())?;
            Ok(check_value(kind, value))
        }
        Commands::Payload { schema, file } => {
            let raw = read_payload(&config, file)?;
            Ok(check_payload(schema, &raw))
        }
        Commands::Sanitize {
            mode,
            text,
            min,
            max,
        } => {
            ensure_size(&config, text.len())?;
            Ok(sanitize_text(mode, &text, min, max))
        }
        Commands::Origin { origin, allow } => {
            let allowed = if allow.is_empty() {
                config.allowed_origins
            } else {
                allow
            };
            Ok(check_origin(&origin, &allowed))
        }
    }
}

fn ensure_size(config: &Config, len: usize) -> Result<()> {
    if len > config.max_input_bytes {
        anyhow::bail!(
            "Input is {} bytes, larger than MAX_INPUT_BYTES ({})",
            len,
            config.max_input_bytes
        );
    }
    Ok(())
}

/// Dispatches single-value checks.
fn check_value(kind: ValueKind, value: String) -> ExitCode {
    let raw = Value::String(value);

    match kind {
        ValueKind::Shop => report(ShopDomain::safe_parse(&raw)),
        ValueKind::Id => report(ObjectId::safe_parse(&raw)),
        ValueKind::Uuid => report(Uuid::safe_parse(&raw)),
        ValueKind::Email => report(Email::safe_parse(&raw)),
        ValueKind::Url => report(ResourceUrl::safe_parse(&raw)),
        ValueKind::ExecutionMode => report(ExecutionMode::safe_parse(&raw)),
    }
}

/// Reads a JSON document from a file, or from stdin when no file is given.
fn read_payload(config: &Config, file: Option<PathBuf>) -> Result<Value> {
    let text = match file {
        Some(path) => fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => io::read_to_string(io::stdin()).context("Failed to read stdin")?,
    };

    ensure_size(config, text.len())?;
    tracing::debug!(bytes = text.len(), "Read payload");

    serde_json::from_str(&text).context("Input is not valid JSON")
}

/// Dispatches payload checks.
fn check_payload(kind: PayloadKind, raw: &Value) -> ExitCode {
    match kind {
        PayloadKind::Pagination => report(Pagination::safe_parse(raw)),
        PayloadKind::DateRange => report(DateRange::safe_parse(raw)),
        PayloadKind::ProductSeo => report(ProductSeoUpdate::safe_parse(raw)),
        PayloadKind::Connection => report(Connection::safe_parse(raw)),
        PayloadKind::Issue => report(SiteIssue::safe_parse(raw)),
        PayloadKind::Webhook => report(WebhookRegistration::safe_parse(raw)),
    }
}

fn sanitize_text(mode: SanitizeMode, text: &str, min: usize, max: usize) -> ExitCode {
    let output = match mode {
        SanitizeMode::Tags => sanitize::strip_html_tags(text),
        SanitizeMode::Html => sanitize::sanitize_html(text),
        SanitizeMode::Schemes => sanitize::strip_dangerous_schemes(text),
        SanitizeMode::Sql => sanitize::escape_sql(text),
        SanitizeMode::Path => sanitize::sanitize_file_path(text),
        SanitizeMode::SafeString => return report(SafeString::new(min, max).parse(text)),
    };

    println!("{output}");
    ExitCode::SUCCESS
}

fn check_origin(origin: &str, allowed: &[String]) -> ExitCode {
    tracing::debug!(entries = allowed.len(), "Checking origin {}", origin);

    if sanitize::validate_request_origin(Some(origin), allowed) {
        println!("{} {}", "allowed".green().bold(), origin);
        ExitCode::SUCCESS
    } else {
        println!("{} {}", "denied".red().bold(), origin);
        if allowed.is_empty() {
            println!("{}", "No allowed origins configured".yellow());
        }
        ExitCode::FAILURE
    }
}

/// Prints an accepted value as JSON, or the issue list.
fn report<T: Serialize>(result: Result<T, SchemaError>) -> ExitCode {
    match result {
        Ok(value) => {
            println!("{}", "accepted".green().bold());
            match serde_json::to_string_pretty(&value) {
                Ok(json) => println!("{json}"),
                Err(e) => tracing::warn!("Failed to render accepted value: {}", e),
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            println!("{}", "rejected".red().bold());
            for issue in err.issues() {
                let path = if issue.path.is_empty() {
                    "(root)".to_string()
                } else {
                    issue.path.join(".")
                };
                println!("  {} {}", path.cyan(), issue.message);
            }
            ExitCode::FAILURE
        }
    }
}
