use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Dataset to read items from (CSV, or JSON with a `.json` extension)
    #[arg(short, long, value_name = "FILE")]
    pub input_file: PathBuf,
    #[arg(short, long, value_name = "FOLDER")]
    pub solution_folder: PathBuf,
    #[arg(short, long, value_name = "FILE")]
    pub config_file: Option<PathBuf>,
    /// Group (e.g. city) to solve. If omitted, every group is solved in turn
    #[arg(short, long)]
    pub group: Option<String>,
    /// List the groups present in the dataset and exit
    #[arg(long)]
    pub list_groups: bool,
    #[arg(short = 'k', long, default_value_t = 3)]
    pub num_bins: usize,
    #[arg(short = 'w', long, default_value_t = 50.0)]
    pub max_weight: f64,
    #[arg(short = 'p', long, default_value_t = 100.0)]
    pub max_price: f64,
    #[arg(
        short,
        long,
        value_name = "[off, error, warn, info, debug, trace]",
        default_value = "info"
    )]
    pub log_level: LevelFilter,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_reference_run() {
        let cli = Cli::try_parse_from(["bnb", "-i", "data.csv", "-s", "out"]).unwrap();
        assert_eq!(cli.num_bins, 3);
        assert_eq!(cli.max_weight, 50.0);
        assert_eq!(cli.max_price, 100.0);
        assert_eq!(cli.group, None);
        assert!(!cli.list_groups);
        assert_eq!(cli.log_level, LevelFilter::Info);
    }

    #[test]
    fn group_and_budgets_are_parsed() {
        let cli = Cli::try_parse_from([
            "bnb", "-i", "data.csv", "-s", "out", "--group", "Ghent", "--num-bins", "2",
            "--max-weight", "12.5", "--max-price", "0",
        ])
        .unwrap();
        assert_eq!(cli.group.as_deref(), Some("Ghent"));
        assert_eq!(cli.num_bins, 2);
        assert_eq!(cli.max_weight, 12.5);
        assert_eq!(cli.max_price, 0.0);
    }
}
