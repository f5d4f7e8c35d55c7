use crate::errors::{SvodkaError, SvodkaResult};

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_token: String,
    pub telegram_chat_id: Option<i64>,
    pub vk_token: Option<String>,
    pub vk_groups: Vec<String>,
    pub keywords: Vec<String>,
    pub excluded_keywords: Vec<String>,
    pub db_path: String,
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<std::path::PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    pub fn from_env() -> SvodkaResult<Self> {
        let exe_dir = Self::exe_dir();

        // Try to load .env from executable's directory first
        if let Some(ref dir) = exe_dir {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();

        let telegram_token = std::env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| SvodkaError::MissingEnvVar("TELEGRAM_BOT_TOKEN".to_string()))?;

        let telegram_chat_id = match std::env::var("TELEGRAM_CHAT_ID") {
            Ok(raw) => Some(raw.parse::<i64>().map_err(|_| {
                SvodkaError::Config("TELEGRAM_CHAT_ID must be a numeric chat id".to_string())
            })?),
            Err(_) => None,
        };

        let vk_token = std::env::var("VK_ACCESS_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());

        let vk_groups = parse_list(&std::env::var("VK_GROUPS").unwrap_or_default());

        let keywords = parse_list(&std::env::var("KEYWORDS").unwrap_or_default());
        if keywords.is_empty() {
            return Err(SvodkaError::MissingEnvVar("KEYWORDS".to_string()));
        }

        let excluded_keywords =
            parse_list(&std::env::var("EXCLUDED_KEYWORDS").unwrap_or_default());

        // Default db_path is relative to executable directory
        let db_path = std::env::var("SVODKA_DB_PATH").unwrap_or_else(|_| {
            exe_dir
                .map(|d| d.join("news.db").to_string_lossy().into_owned())
                .unwrap_or_else(|| "./news.db".to_string())
        });

        Ok(Self {
            telegram_token,
            telegram_chat_id,
            vk_token,
            vk_groups,
            keywords,
            excluded_keywords,
            db_path,
        })
    }
}

/// Comma-separated list variable; blanks are dropped.
fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_splits_and_trims() {
        let parsed = parse_list("волгоград, вода ,свет");
        assert_eq!(parsed, vec!["волгоград", "вода", "свет"]);
    }

    #[test]
    fn test_parse_list_drops_blanks() {
        assert!(parse_list("").is_empty());
        assert!(parse_list(" , ,").is_empty());
        assert_eq!(parse_list("a,,b").len(), 2);
    }
}
