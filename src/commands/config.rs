use std::path::Path;

use anyhow::{Result, bail};
use colored::Colorize;
use liftplan::config::{Config, DB_ENV, DB_PATH_KEY, KNOWN_KEYS, is_known_key};

use crate::cli::ConfigCmd;

fn warn_unknown(key: &str) {
    if !is_known_key(key) {
        println!(
            "{} `{}` is not a liftplan setting (known: {})",
            "warning:".yellow().bold(),
            key,
            KNOWN_KEYS.join(", ")
        );
    }
}

pub async fn handle(cmd: ConfigCmd, config_path: &Path, db_flag: Option<&str>) -> Result<()> {
    let mut cfg = Config::load(config_path)?;
    let env_db = std::env::var(DB_ENV).ok();

    match cmd {
        ConfigCmd::List => {
            println!("{} {}", "Config:".cyan().bold(), config_path.display().to_string().dimmed());
            if cfg.map.is_empty() {
                println!("  {}", "(no keys set)".dimmed());
            }
            for (k, v) in &cfg.map {
                let key = if is_known_key(k) { k.green() } else { k.yellow() };
                println!("  {} = {}", key, v);
            }
            println!(
                "{} {} ({})",
                "Database:".cyan().bold(),
                cfg.db_path(db_flag, env_db.as_deref()),
                cfg.db_path_origin(db_flag, env_db.as_deref())
            );
        }

        ConfigCmd::Get { key } => match cfg.map.get(&key) {
            Some(val) => println!("{}", val),
            None if key == DB_PATH_KEY => println!(
                "{} ({})",
                cfg.db_path(db_flag, env_db.as_deref()),
                cfg.db_path_origin(db_flag, env_db.as_deref())
            ),
            None => println!("{} key `{}` not found", "warning:".yellow().bold(), key),
        },

        ConfigCmd::Set { key, val } => {
            if key == DB_PATH_KEY && val.trim().is_empty() {
                bail!("`{DB_PATH_KEY}` cannot be empty; use `config unset {DB_PATH_KEY}` instead");
            }
            warn_unknown(&key);
            cfg.map.insert(key.clone(), val.clone());
            cfg.save(config_path)?;
            println!("{} set `{}` = `{}`", "ok:".green().bold(), key.green(), val);
        }

        ConfigCmd::Unset { key } => {
            if cfg.map.remove(&key).is_some() {
                cfg.save(config_path)?;
                println!("{} removed `{}`", "ok:".green().bold(), key.green());
            } else {
                println!("{} key `{}` not found", "warning:".yellow().bold(), key);
            }
        }
    }

    Ok(())
}
