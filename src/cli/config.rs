//! `titools config` command
//!
//! Get or set configuration values.
//!
//! # Usage
//! ```bash
//! titools config                          # Show config file
//! titools config knowledge.version        # Get specific value
//! titools config source.branch develop    # Set value
//! titools config --path                   # Show config file path
//! ```

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Args;
use toml_edit::{value, DocumentMut};

use crate::config::Config;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Config key (e.g., knowledge.version, source.branch)
    pub key: Option<String>,

    /// Value to set
    pub value: Option<String>,

    /// List all config values
    #[arg(long)]
    pub list: bool,

    /// Edit config file in $EDITOR
    #[arg(short, long)]
    pub edit: bool,

    /// Show config file path
    #[arg(long)]
    pub path: bool,
}

pub fn run(args: ConfigArgs, config_path: Option<&Path>) -> Result<()> {
    let config_path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(Config::default_path);

    if args.path {
        if config_path.exists() {
            println!("✓ Active: {}", config_path.display());
        } else {
            println!("⚠ No config file found at {}", config_path.display());
        }
        return Ok(());
    }

    if args.edit {
        let editor = std::env::var("EDITOR").unwrap_or_else(|_| default_editor().to_string());

        if !config_path.exists() {
            Config::default().save_to(&config_path)?;
            println!("Created {}", config_path.display());
        }

        std::process::Command::new(&editor)
            .arg(&config_path)
            .status()
            .with_context(|| format!("Failed to open editor: {}", editor))?;
        return Ok(());
    }

    if args.list || args.key.is_none() {
        if config_path.exists() {
            let content = fs::read_to_string(&config_path)?;
            println!("Configuration ({}):\n", config_path.display());
            println!("{}", content);
        } else {
            println!("No config file at {} (using defaults)", config_path.display());
            println!();
            println!("{}", toml::to_string_pretty(&Config::default())?);
        }
        return Ok(());
    }

    if let Some(key) = &args.key {
        if let Some(val) = &args.value {
            set_config_value(&config_path, key, val)?;
            println!("✅ Set {} = {} (in {})", key, val, config_path.display());
        } else {
            match get_config_value(&config_path, key)? {
                Some(v) => println!("{}", v),
                None => println!("(not set)"),
            }
        }
    }

    Ok(())
}

fn default_editor() -> &'static str {
    if cfg!(windows) {
        "notepad"
    } else {
        "vi"
    }
}

/// Set a config value using dot notation (e.g., "knowledge.version")
///
/// The edited file must still load as a valid config; otherwise nothing
/// is written.
pub fn set_config_value(path: &Path, key: &str, val: &str) -> Result<()> {
    let content = if path.exists() {
        fs::read_to_string(path)?
    } else {
        String::new()
    };

    let mut doc: DocumentMut = content.parse().context("Failed to parse config.toml")?;

    let parts: Vec<&str> = key.split('.').collect();
    match parts.as_slice() {
        [top] => doc[*top] = value(parse_toml_value(val)),
        [section, field] => {
            if doc.get(section).is_none() {
                doc[*section] = toml_edit::table();
            }
            doc[*section][*field] = value(parse_toml_value(val));
        }
        _ => bail!("Key too deep: {}. Max depth is section.key", key),
    }

    let updated = doc.to_string();
    toml::from_str::<Config>(&updated)
        .with_context(|| format!("Invalid value for {}: {}", key, val))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, updated)?;
    Ok(())
}

/// Get a config value by dot notation key
///
/// Values missing from the file fall back to the defaults.
pub fn get_config_value(path: &Path, key: &str) -> Result<Option<String>> {
    let doc = if path.exists() {
        let config = Config::load_from(path)?;
        toml::Value::try_from(config)?
    } else {
        toml::Value::try_from(Config::default())?
    };

    let parts: Vec<&str> = key.split('.').collect();
    let val = match parts.as_slice() {
        [top] => doc.get(*top),
        [section, field] => doc.get(*section).and_then(|t| t.get(*field)),
        _ => None,
    };

    Ok(val.map(|v| match v {
        toml::Value::String(s) => s.clone(),
        other => other.to_string(),
    }))
}

/// Parse string value to appropriate TOML type
fn parse_toml_value(s: &str) -> toml_edit::Value {
    if let Ok(b) = s.parse::<bool>() {
        return b.into();
    }

    if let Ok(i) = s.parse::<i64>() {
        return i.into();
    }

    if let Ok(f) = s.parse::<f64>() {
        return f.into();
    }

    s.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::policy::TargetFile;
    use tempfile::tempdir;

    #[test]
    fn test_set_and_get() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        set_config_value(&path, "knowledge.version", "v1.1.0").unwrap();
        set_config_value(&path, "source.timeout_secs", "10").unwrap();

        assert_eq!(
            get_config_value(&path, "knowledge.version").unwrap().as_deref(),
            Some("v1.1.0")
        );
        assert_eq!(
            get_config_value(&path, "source.timeout_secs").unwrap().as_deref(),
            Some("10")
        );

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.knowledge.version, "v1.1.0");
        assert_eq!(config.source.timeout_secs, 10);
    }

    #[test]
    fn test_get_default_value() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        assert_eq!(
            get_config_value(&path, "source.branch").unwrap().as_deref(),
            Some("main")
        );
        assert_eq!(get_config_value(&path, "source.missing").unwrap(), None);
    }

    #[test]
    fn test_set_default_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        set_config_value(&path, "knowledge.default_file", "GEMINI.md").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.knowledge.default_file, TargetFile::Gemini);
    }

    #[test]
    fn test_invalid_value_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[source]\nbranch = \"main\"\n").unwrap();

        assert!(set_config_value(&path, "knowledge.default_file", "README.md").is_err());
        assert!(set_config_value(&path, "source.timeout_secs", "soon").is_err());
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "[source]\nbranch = \"main\"\n"
        );
    }

    #[test]
    fn test_key_too_deep() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert!(set_config_value(&path, "a.b.c", "x").is_err());
    }

    #[test]
    fn test_parse_toml_value() {
        assert_eq!(parse_toml_value("true").as_bool(), Some(true));
        assert_eq!(parse_toml_value("42").as_integer(), Some(42));
        assert_eq!(parse_toml_value("1.5").as_float(), Some(1.5));
        assert_eq!(parse_toml_value("v1.0.0").as_str(), Some("v1.0.0"));
    }
}
