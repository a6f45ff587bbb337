use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use http::Method;

use crate::config::RouterConfig;
use crate::middleware::cors::headers;

/// Command-line interface for restroute
#[derive(Parser)]
#[command(name = "restroute")]
#[command(about = "Inspect restroute router configuration", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a configuration file and print the effective CORS policy
    Check {
        /// Path to the configuration file (YAML, TOML or JSON)
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Print the CORS headers a request would receive
    Cors {
        /// Path to the configuration file (YAML, TOML or JSON)
        #[arg(short, long)]
        config: PathBuf,

        /// Value of the request's Origin header; omit for an originless request
        #[arg(short, long)]
        origin: Option<String>,

        /// Request method
        #[arg(short, long, default_value = "GET")]
        method: String,

        /// Force always-on mode regardless of the file
        #[arg(long, default_value_t = false)]
        always_on: bool,
    },
}

/// Effective policy and resolver mode as YAML
pub fn describe_config(config: &RouterConfig) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "cors_always_on: {}", config.cors_always_on)?;
    if config.cors.is_none() {
        writeln!(out, "# no cors section, using the permissive default")?;
    }
    let policy = serde_yaml::to_string(&config.effective_cors())
        .context("failed to render CORS policy")?;
    writeln!(out, "cors:")?;
    for line in policy.lines() {
        writeln!(out, "  {}", line)?;
    }
    Ok(out)
}

/// The headers the resolver would emit, one `name: value` per line
pub fn render_cors(
    config: &RouterConfig,
    origin: Option<&str>,
    method: &str,
    always_on: bool,
) -> Result<String> {
    let method = Method::from_bytes(method.to_uppercase().as_bytes())
        .with_context(|| format!("invalid HTTP method '{}'", method))?;
    let mut resolver = config.resolver();
    if always_on {
        resolver = crate::middleware::cors::CorsResolver::always_on();
    }
    let Some(h) = resolver.resolve(&config.effective_cors(), origin, &method) else {
        return Ok("no CORS headers\n".to_string());
    };
    let mut out = String::new();
    writeln!(out, "{}: {}", headers::ALLOW_ORIGIN, h.allow_origin)?;
    writeln!(out, "{}: {}", headers::ALLOW_METHODS, h.allow_methods)?;
    writeln!(out, "{}: {}", headers::ALLOW_HEADERS, h.allow_headers)?;
    writeln!(out, "{}: {}", headers::ALLOW_CREDENTIALS, h.allow_credentials)?;
    if let Some(max_age) = h.max_age {
        writeln!(out, "{}: {}", headers::MAX_AGE, max_age)?;
    }
    Ok(out)
}

pub fn run_cli(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Check { config } => {
            let loaded = RouterConfig::load(&config)?;
            println!("✅ {} is valid", config.display());
            print!("{}", describe_config(&loaded)?);
        }
        Commands::Cors {
            config,
            origin,
            method,
            always_on,
        } => {
            let loaded = RouterConfig::load(&config)?;
            print!(
                "{}",
                render_cors(&loaded, origin.as_deref(), &method, always_on)?
            );
        }
    }
    Ok(())
}
