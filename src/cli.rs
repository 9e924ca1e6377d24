use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "quiztrainer", version, about = "Terminal trainer for multiple-choice question sets")]
pub struct Cli {
    /// Question set files, directories or manifest.json files
    /// [default: question_dirs from the config file]
    pub paths: Vec<PathBuf>,

    /// Questions per test
    #[arg(short = 'n', long, value_name = "N", allow_negative_numbers = true)]
    pub count: Option<i64>,

    /// Preselect the question set with this name
    #[arg(short, long, value_name = "name")]
    pub set: Option<String>,

    /// Sign in as this user, skipping the name prompt when no passcode is set
    #[arg(long, value_name = "name")]
    pub name: Option<String>,

    /// List the loaded question sets and exit
    #[arg(long)]
    pub list: bool,

    /// Print lifetime stats and exit
    #[arg(long)]
    pub stats: bool,

    /// Clear lifetime stats
    #[arg(long)]
    pub reset_stats: bool,

    /// Write the selected set in keyed form to a file and exit
    #[arg(long, value_name = "path")]
    pub export: Option<PathBuf>,

    /// Write manifest.json for the .json files in a directory and exit
    #[arg(long, value_name = "dir")]
    pub write_manifest: Option<PathBuf>,

    /// Config file [default: per-user config.yaml]
    #[arg(long, value_name = "path")]
    pub config: Option<PathBuf>,

    /// Directory for stats and sign-in data
    #[arg(long, value_name = "dir")]
    pub data_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from(["quiztrainer", "sets", "extra.json", "-n", "-3", "--set", "law", "--list"]);
        assert_eq!(cli.paths, vec![PathBuf::from("sets"), PathBuf::from("extra.json")]);
        assert_eq!(cli.count, Some(-3));
        assert_eq!(cli.set.as_deref(), Some("law"));
        assert!(cli.list);
        assert!(!cli.stats);
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
