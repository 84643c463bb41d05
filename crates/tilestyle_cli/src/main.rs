//! tilestyle CLI — compiles and patches Mapnik style themes.
//!
//! `tilestyle <themes...>` builds each theme once; `--smart` splits the
//! output into per-render-pass documents with halo variants; `--watch`
//! keeps rebuilding whenever a stylesheet fragment changes.

#![warn(missing_docs)]

mod run;

use std::process;

use clap::Parser;

/// tilestyle — build and patch Mapnik map styles.
#[derive(Parser, Debug)]
#[command(name = "tilestyle", version, about = "Mapnik style build tool")]
pub struct Cli {
    /// Theme names to build (one or more).
    #[arg(required = true)]
    pub themes: Vec<String>,

    /// Generate smart-halo styles: four documents per theme instead of one.
    #[arg(long)]
    pub smart: bool,

    /// After the initial build, poll for fragment changes and rebuild.
    #[arg(short, long)]
    pub watch: bool,

    /// Project root directory. Defaults to the current working directory.
    #[arg(long)]
    pub root: Option<String>,

    /// Stylesheet compiler command.
    #[arg(long, default_value = "carto")]
    pub carto: String,

    /// Suppress all output except errors.
    #[arg(short, long)]
    pub quiet: bool,
}

fn main() {
    let cli = Cli::parse();
    match run::run(&cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_single_theme() {
        let cli = Cli::parse_from(["tilestyle", "dark"]);
        assert_eq!(cli.themes, vec!["dark"]);
        assert!(!cli.smart);
        assert!(!cli.watch);
        assert!(!cli.quiet);
        assert!(cli.root.is_none());
        assert_eq!(cli.carto, "carto");
    }

    #[test]
    fn parse_multiple_themes() {
        let cli = Cli::parse_from(["tilestyle", "dark", "light", "print"]);
        assert_eq!(cli.themes, vec!["dark", "light", "print"]);
    }

    #[test]
    fn themes_are_required() {
        assert!(Cli::try_parse_from(["tilestyle"]).is_err());
    }

    #[test]
    fn parse_smart_flag() {
        let cli = Cli::parse_from(["tilestyle", "--smart", "dark"]);
        assert!(cli.smart);
    }

    #[test]
    fn parse_watch_long_and_short() {
        assert!(Cli::parse_from(["tilestyle", "--watch", "dark"]).watch);
        assert!(Cli::parse_from(["tilestyle", "-w", "dark"]).watch);
    }

    #[test]
    fn parse_root_override() {
        let cli = Cli::parse_from(["tilestyle", "--root", "/srv/styles", "dark"]);
        assert_eq!(cli.root.as_deref(), Some("/srv/styles"));
    }

    #[test]
    fn parse_carto_override() {
        let cli = Cli::parse_from(["tilestyle", "--carto", "./node_modules/.bin/carto", "dark"]);
        assert_eq!(cli.carto, "./node_modules/.bin/carto");
    }

    #[test]
    fn parse_quiet_flag() {
        assert!(Cli::parse_from(["tilestyle", "-q", "dark"]).quiet);
        assert!(Cli::parse_from(["tilestyle", "--quiet", "dark"]).quiet);
    }

    #[test]
    fn flags_combine_with_themes() {
        let cli = Cli::parse_from(["tilestyle", "--smart", "-w", "dark", "light"]);
        assert!(cli.smart);
        assert!(cli.watch);
        assert_eq!(cli.themes, vec!["dark", "light"]);
    }
}
