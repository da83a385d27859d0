use std::path::PathBuf;

use clap::Parser;

/// Replays a swipe script against the bop feed, headless.
///
/// Without `--feed` cards come from the API in `[api]` and decisions are
/// posted back to it; with `--feed` everything stays local.
#[derive(Debug, Clone, Parser)]
#[command(name = "bop-studio", version)]
pub struct Cli {
    /// TOML config ([api], [deck], [carousel], [screen], [session]).
    #[arg(long, value_name = "TOML")]
    pub config: Option<PathBuf>,

    /// Offline mode: read cards from a JSON array of API items.
    #[arg(long, value_name = "JSON")]
    pub feed: Option<PathBuf>,

    /// Script file, one step per line.
    #[arg(long, value_name = "FILE", conflicts_with = "steps")]
    pub script: Option<PathBuf>,

    /// Inline steps separated by ';' (e.g. "swipe right; wait 500; like").
    #[arg(long, value_name = "STEPS")]
    pub steps: Option<String>,

    /// Overrides [session] user_id.
    #[arg(long, value_name = "ID")]
    pub user: Option<u64>,

    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,

    /// Log filter in env_logger syntax; falls back to RUST_LOG.
    #[arg(long, value_name = "FILTER")]
    pub log: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["bop-studio"]).unwrap();
        assert_eq!(cli.fps, 60);
        assert!(cli.config.is_none() && cli.feed.is_none() && cli.steps.is_none());
    }

    #[test]
    fn all_flags() {
        let cli = Cli::try_parse_from([
            "bop-studio",
            "--config",
            "studio.toml",
            "--feed",
            "fixtures/feed.json",
            "--steps",
            "swipe right",
            "--user",
            "9",
            "--fps",
            "30",
            "--log",
            "debug",
        ])
        .unwrap();

        assert_eq!(cli.feed, Some(PathBuf::from("fixtures/feed.json")));
        assert_eq!(cli.steps.as_deref(), Some("swipe right"));
        assert_eq!((cli.user, cli.fps), (Some(9), 30));
    }

    #[test]
    fn script_and_steps_conflict() {
        let args = ["bop-studio", "--script", "a.txt", "--steps", "like"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn fps_is_bounded() {
        assert!(Cli::try_parse_from(["bop-studio", "--fps", "0"]).is_err());
        assert!(Cli::try_parse_from(["bop-studio", "--fps", "500"]).is_err());
    }
}
