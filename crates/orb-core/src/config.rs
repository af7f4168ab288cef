use std::{env, fs, path::Path};

use crate::{domain::UserId, errors::Error, Result};

/// Typed configuration for the relay.
#[derive(Clone, Debug)]
pub struct Config {
    pub telegram_bot_token: String,
    /// Operator ids in configuration order. The first entry receives
    /// forwarded user messages and the startup notice.
    pub operator_ids: Vec<i64>,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));

        let telegram_bot_token = env_str("TELEGRAM_BOT_TOKEN").unwrap_or_default();
        if telegram_bot_token.trim().is_empty() {
            return Err(Error::Config(
                "TELEGRAM_BOT_TOKEN environment variable is required".to_string(),
            ));
        }

        let operator_ids = parse_operator_ids(env_str("TELEGRAM_OPERATOR_IDS"))?;

        Ok(Self {
            telegram_bot_token,
            operator_ids,
        })
    }

    pub fn is_operator(&self, user: UserId) -> bool {
        self.operator_ids.contains(&user.0)
    }

    /// First configured operator; `load` rejects empty lists.
    pub fn primary_operator(&self) -> UserId {
        UserId(self.operator_ids.first().copied().unwrap_or_default())
    }
}

/// Comma-separated operator ids. Any entry that fails to parse as an integer
/// is a startup error, not a skipped value.
fn parse_operator_ids(v: Option<String>) -> Result<Vec<i64>> {
    let raw = v.unwrap_or_default();
    let mut ids = Vec::new();
    for part in raw.split(',').map(|s| s.trim()).filter(|s| !s.is_empty()) {
        let id = part.parse::<i64>().map_err(|_| {
            Error::Config(format!(
                "TELEGRAM_OPERATOR_IDS entry is not an integer: {part}"
            ))
        })?;
        ids.push(id);
    }

    if ids.is_empty() {
        return Err(Error::Config(
            "TELEGRAM_OPERATOR_IDS environment variable is required".to_string(),
        ));
    }
    Ok(ids)
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }
        if env::var_os(key).is_some() {
            continue; // do not override existing env
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        env::set_var(key, val);
    }
}
