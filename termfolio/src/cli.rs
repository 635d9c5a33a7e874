//! Command-line interface

use std::path::PathBuf;

use clap::Parser;
use libtermfolio::{logging::LogFormat, Config};

use crate::ui::theme::ThemeId;

#[derive(Parser, Debug)]
#[command(name = "termfolio", version)]
#[command(about = "A developer portfolio you browse from the terminal", long_about = None)]
pub struct Cli {
    /// Color theme (default, hacker, dracula, space, digimon)
    #[arg(short, long)]
    pub theme: Option<ThemeId>,

    /// Serve sessions over TCP instead of using this terminal
    #[arg(long)]
    pub serve: bool,

    /// Address to listen on with --serve (overrides the config file)
    #[arg(long, value_name = "ADDR")]
    pub listen: Option<String>,

    /// GitHub user whose repositories and stats are shown
    #[arg(short, long, env = "TERMFOLIO_USER")]
    pub user: Option<String>,

    /// Path to the config file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log format (text, json or pretty)
    #[arg(long, default_value = "text", env = "TERMFOLIO_LOG_FORMAT")]
    pub log_format: LogFormat,

    /// Minimum log level
    #[arg(long, default_value = "info", env = "TERMFOLIO_LOG_LEVEL")]
    pub log_level: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Fold command-line overrides into the loaded config
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(user) = &self.user {
            config.github.username = user.clone();
        }
        if let Some(listen) = &self.listen {
            config.server.listen = listen.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_theme_and_serve() {
        let cli = Cli::try_parse_from(["termfolio", "--theme", "hacker", "--serve", "--listen", "127.0.0.1:2323"]).unwrap();
        assert_eq!(cli.theme, Some(ThemeId::Hacker));
        assert!(cli.serve);
        assert_eq!(cli.listen.as_deref(), Some("127.0.0.1:2323"));
    }

    #[test]
    fn test_unknown_theme_is_rejected() {
        assert!(Cli::try_parse_from(["termfolio", "--theme", "neon"]).is_err());
    }

    #[test]
    fn test_overrides_apply_to_config() {
        let cli = Cli::try_parse_from(["termfolio", "--user", "octocat", "--listen", "[::1]:23"]).unwrap();
        let mut config = Config::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.github.username, "octocat");
        assert_eq!(config.server.listen, "[::1]:23");
    }
}
