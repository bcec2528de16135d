//! Configuration loader for the WMTS enricher.
//!
//! Loads the locator options from a YAML file. Every option is optional;
//! a missing file path means the Swiss grid defaults.
//!
//! Supports environment variable substitution using `${VAR}` and
//! `${VAR:-default}` syntax.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tile_locator::LocatorConfig;

/// Load and validate the locator configuration.
pub fn load_config(path: Option<&Path>) -> Result<LocatorConfig> {
    let Some(path) = path else {
        return Ok(LocatorConfig::default());
    };

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_config(&content).with_context(|| format!("Invalid config file: {}", path.display()))
}

/// Parse a YAML document after environment substitution.
pub fn parse_config(content: &str) -> Result<LocatorConfig> {
    let expanded = expand_env_vars(content)?;

    let config: LocatorConfig = if is_empty_document(&expanded) {
        LocatorConfig::default()
    } else {
        serde_yaml::from_str(&expanded).context("Failed to parse YAML")?
    };

    config.validate()?;
    Ok(config)
}

/// True when the document holds nothing but whitespace and comments.
fn is_empty_document(content: &str) -> bool {
    content
        .lines()
        .map(str::trim)
        .all(|line| line.is_empty() || line.starts_with('#') || line == "---")
}

// ============================================================================
// Environment Variable Substitution
// ============================================================================

/// Expand `${VAR}` and `${VAR:-default}` in the given content.
fn expand_env_vars(content: &str) -> Result<String> {
    let mut result = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && chars.peek() == Some(&'{') {
            chars.next(); // consume '{'

            let mut var_expr = String::new();
            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(c) => var_expr.push(c),
                    None => anyhow::bail!("Unclosed variable substitution: ${{{}", var_expr),
                }
            }

            result.push_str(&resolve_var_expr(&var_expr)?);
        } else {
            result.push(ch);
        }
    }

    Ok(result)
}

/// Resolve a variable expression (`VAR` or `VAR:-default`).
fn resolve_var_expr(expr: &str) -> Result<String> {
    if let Some((var_name, default)) = expr.split_once(":-") {
        match std::env::var(var_name.trim()) {
            Ok(val) if !val.is_empty() => Ok(val),
            _ => Ok(default.to_string()),
        }
    } else {
        std::env::var(expr.trim())
            .with_context(|| format!("Environment variable {} not set", expr.trim()))
    }
}
