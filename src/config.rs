use std::fmt;

use teloxide::types::ParseMode;

use crate::responder::MAINTENANCE_MESSAGE;

/// Environment variable holding the bot token.
pub const TOKEN_ENV_VAR: &str = "TELEGRAM_BOT_TOKEN";

/// Errors that can occur when loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// The token environment variable is unset or empty.
    MissingToken,
    /// The token doesn't look like a Telegram bot token.
    InvalidToken(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingToken => {
                write!(f, "no {TOKEN_ENV_VAR} found in environment")
            }
            Self::InvalidToken(msg) => write!(f, "invalid bot token: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Process configuration, assembled once at startup and handed to the
/// responder and transport explicitly.
#[derive(Debug)]
pub struct Config {
    pub telegram_bot_token: String,
    /// The reply template, fixed for the process lifetime.
    pub reply_text: String,
    pub parse_mode: ParseMode,
}

impl Config {
    /// Load configuration from the environment. A missing or malformed token
    /// is fatal; the caller is expected to log and exit non-zero.
    pub fn from_env() -> Result<Self, ConfigError> {
        let token = std::env::var(TOKEN_ENV_VAR)
            .ok()
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingToken)?;
        Self::from_token(token)
    }

    fn from_token(token: String) -> Result<Self, ConfigError> {
        // Telegram tokens are formatted as {bot_id}:{secret} where bot_id is numeric
        let parts: Vec<&str> = token.split(':').collect();
        if parts.len() != 2 || parts[0].parse::<u64>().is_err() || parts[1].is_empty() {
            return Err(ConfigError::InvalidToken(
                "expected format: 123456789:ABCdefGHI...".into(),
            ));
        }

        Ok(Self {
            telegram_bot_token: token,
            reply_text: MAINTENANCE_MESSAGE.to_string(),
            parse_mode: ParseMode::MarkdownV2,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_token() {
        let config = Config::from_token("123456789:ABCdefGHIjklMNOpqrsTUVwxyz".into())
            .expect("should accept well-formed token");
        assert_eq!(
            config.telegram_bot_token,
            "123456789:ABCdefGHIjklMNOpqrsTUVwxyz"
        );
        assert_eq!(config.reply_text, MAINTENANCE_MESSAGE);
        assert_eq!(config.parse_mode, ParseMode::MarkdownV2);
    }

    #[test]
    fn test_token_without_colon() {
        let err = Config::from_token("invalid_token_no_colon".into()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidToken(_)));
    }

    #[test]
    fn test_token_non_numeric_id() {
        let err = Config::from_token("notanumber:ABCdef".into()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidToken(_)));
    }

    #[test]
    fn test_token_empty_secret() {
        let err = Config::from_token("123456789:".into()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidToken(_)));
    }

    #[test]
    fn test_missing_token_message_names_env_var() {
        assert!(
            ConfigError::MissingToken
                .to_string()
                .contains(TOKEN_ENV_VAR)
        );
    }
}
