use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Recommend interview practice problems for a free-text request.
#[derive(Parser, Debug)]
#[command(name = "questfinder", version)]
#[command(about = "Find coding interview practice problems with Gemini")]
#[command(long_about = r#"
Questfinder turns a request such as "Amazon dynamic programming questions"
into five practice problems from LeetCode, GeeksforGeeks, HackerRank and
similar platforms.

The API key is read from llm.api_key in the config file, from
QUESTFINDER_LLM__API_KEY, or from GOOGLE_API_KEY.

Example:
  questfinder search "Google graph questions for SDE-2"
  questfinder health --live
"#)]
pub struct Cli {
    /// YAML config file; skipped when it does not exist
    #[arg(long, value_name = "PATH", default_value = "questfinder.yaml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate practice problems for a query
    Search {
        /// What to prepare for, in plain words
        query: String,
    },
    /// Report backend configuration and availability
    Health {
        /// Also send a short prompt through the model fallback chain
        #[arg(long)]
        live: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_takes_the_query_positionally() {
        let cli = Cli::try_parse_from(["questfinder", "search", "amazon dp"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("questfinder.yaml"));
        assert!(matches!(cli.command, Command::Search { query } if query == "amazon dp"));
    }

    #[test]
    fn health_accepts_live_and_config() {
        let cli =
            Cli::try_parse_from(["questfinder", "--config", "alt.yaml", "health", "--live"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("alt.yaml"));
        assert!(matches!(cli.command, Command::Health { live: true }));
    }

    #[test]
    fn command_is_required() {
        assert!(Cli::try_parse_from(["questfinder"]).is_err());
    }
}
