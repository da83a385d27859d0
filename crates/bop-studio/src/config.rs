use bop_feed::ApiConfig;
use bop_ui::looping::CarouselConfig;
use bop_ui::swipe::SwipeConfig;
use serde::Deserialize;
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    /// TOML could not be parsed into the expected structure.
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("[{section}] {message}")]
    Invalid { section: &'static str, message: String },
}

impl ConfigError {
    fn invalid(section: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid { section, message: message.into() }
    }
}

///
/// StudioConfig
///
/// Everything the studio reads from its TOML file. Every section and every
/// key is optional.
///

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StudioConfig {
    pub api: ApiConfig,
    pub deck: SwipeConfig,
    pub carousel: CarouselConfig,
    pub screen: ScreenConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScreenConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self { width: 390.0, height: 844.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    pub user_id: u64,
    /// Fraction of the held cards decided before the next page is fetched.
    pub prefetch_ratio: f32,
    /// Decided cards kept for rewind once a new page arrives.
    pub history_limit: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { user_id: 1, prefetch_ratio: 0.75, history_limit: 1 }
    }
}

impl StudioConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|e| ConfigError::Parse {
            line: e.span().map_or(1, |span| line_of(text, span.start)),
            message: e.message().to_string(),
        })?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.checked_base_url().map_err(|e| ConfigError::invalid("api", e.to_string()))?;
        if self.api.timeout_ms == 0 {
            return Err(ConfigError::invalid("api", "timeout_ms must be non-zero"));
        }
        if self.api.page_size == 0 {
            return Err(ConfigError::invalid("api", "page_size must be non-zero"));
        }

        self.deck.validate().map_err(|m| ConfigError::invalid("deck", m))?;
        self.carousel.validate().map_err(|m| ConfigError::invalid("carousel", m))?;

        if !(self.screen.width > 0.0 && self.screen.height > 0.0) {
            return Err(ConfigError::invalid("screen", "width and height must be positive"));
        }
        if !(self.session.prefetch_ratio > 0.0 && self.session.prefetch_ratio <= 1.0) {
            return Err(ConfigError::invalid("session", "prefetch_ratio must be in (0, 1]"));
        }

        Ok(())
    }
}

/// 1-based line holding byte `offset`.
fn line_of(text: &str, offset: usize) -> usize {
    let end = offset.min(text.len());
    text.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count() + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_all_defaults() {
        let cfg = StudioConfig::from_toml("").unwrap();
        assert_eq!(cfg.screen, ScreenConfig::default());
        assert_eq!(cfg.session, SessionConfig::default());
        assert_eq!(cfg.deck, SwipeConfig::default());
    }

    #[test]
    fn sections_override_defaults() {
        let cfg = StudioConfig::from_toml(
            r#"
[api]
base_url = "https://feed.example.com/"
page_size = 25

[deck]
threshold_ratio = 0.25

[carousel]
autoplay = false

[screen]
width = 320.0

[session]
user_id = 42
"#,
        )
        .unwrap();

        assert_eq!(cfg.api.page_size, 25);
        assert_eq!(cfg.deck.threshold_ratio, 0.25);
        assert!(!cfg.carousel.autoplay);
        assert_eq!(cfg.screen.width, 320.0);
        assert_eq!(cfg.screen.height, 844.0);
        assert_eq!(cfg.session.user_id, 42);
    }

    #[test]
    fn unknown_key_reports_its_line() {
        let err = StudioConfig::from_toml("[screen]\nwidth = 300.0\ndepth = 3\n").unwrap_err();
        match err {
            ConfigError::Parse { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("depth"), "{message}");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let err = StudioConfig::from_toml("[deck]\nthreshold_ratio = 1.5\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { section: "deck", .. }));

        let err = StudioConfig::from_toml("[api]\nbase_url = \"ftp://nope\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { section: "api", .. }));

        let err = StudioConfig::from_toml("[screen]\nheight = 0.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { section: "screen", .. }));
    }

    #[test]
    fn example_config_parses() {
        let cfg = StudioConfig::from_toml(include_str!("../studio.toml")).unwrap();
        assert_eq!(cfg.api.page_size, 10);
        assert_eq!(cfg.session.user_id, 1);
    }

    #[test]
    fn line_of_counts_newlines() {
        assert_eq!(line_of("a\nb\nc", 0), 1);
        assert_eq!(line_of("a\nb\nc", 2), 2);
        assert_eq!(line_of("a\nb\nc", 99), 3);
    }
}
