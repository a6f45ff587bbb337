//! Unit tests for CLI commands

use crate::cli::{describe_config, render_cors, Cli, Commands};
use crate::config::RouterConfig;
use crate::middleware::CorsConfig;
use clap::Parser;

fn config(origins: &[&str], credentials: bool) -> RouterConfig {
    RouterConfig {
        cors: Some(CorsConfig {
            allowed_origins: origins.iter().map(|s| s.to_string()).collect(),
            allow_credentials: credentials,
            max_age: 300,
            ..CorsConfig::default()
        }),
        cors_always_on: false,
    }
}

#[test]
fn test_check_command_parses() {
    let cli = Cli::try_parse_from(["restroute", "check", "--config", "router.yaml"]).unwrap();
    match cli.command {
        Commands::Check { config } => assert_eq!(config.to_string_lossy(), "router.yaml"),
        _ => panic!("Expected Check command"),
    }
}

#[test]
fn test_cors_command_defaults() {
    let cli = Cli::try_parse_from(["restroute", "cors", "-c", "router.toml"]).unwrap();
    match cli.command {
        Commands::Cors {
            origin,
            method,
            always_on,
            ..
        } => {
            assert_eq!(origin, None);
            assert_eq!(method, "GET");
            assert!(!always_on);
        }
        _ => panic!("Expected Cors command"),
    }
}

#[test]
fn test_cors_command_requires_config() {
    assert!(Cli::try_parse_from(["restroute", "cors", "--origin", "https://a.com"]).is_err());
}

#[test]
fn test_render_cors_preflight() {
    let out = render_cors(
        &config(&["https://a.com"], true),
        Some("https://a.com"),
        "options",
        false,
    )
    .unwrap();
    assert!(out.contains("access-control-allow-origin: https://a.com"));
    assert!(out.contains("access-control-allow-credentials: true"));
    assert!(out.contains("access-control-max-age: 300"));
}

#[test]
fn test_render_cors_originless_respects_always_on() {
    let cfg = config(&["*"], false);
    assert_eq!(render_cors(&cfg, None, "GET", false).unwrap(), "no CORS headers\n");
    let out = render_cors(&cfg, None, "GET", true).unwrap();
    assert!(out.contains("access-control-allow-origin: *"));
    assert!(!out.contains("max-age"));
}

#[test]
fn test_render_cors_rejects_bad_method() {
    assert!(render_cors(&config(&["*"], false), None, "GE T", false).is_err());
}

#[test]
fn test_describe_default_config() {
    let out = describe_config(&RouterConfig::default()).unwrap();
    assert!(out.contains("cors_always_on: false"));
    assert!(out.contains("permissive default"));
    assert!(out.contains("allowed_origins:"));
    assert!(out.contains('*'));
}
