//! Command-line interface definitions for news_clipper.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Run parameters can be provided via command-line flags or environment
//! variables.

use clap::Parser;

/// Command-line arguments for the news_clipper application.
///
/// # Examples
///
/// ```sh
/// # Search for climate change coverage from the current month
/// news_clipper -s "climate change"
///
/// # Three months of business coverage with wider download fan-out
/// news_clipper -s "interest rates" -c business -n 3 --concurrency 8
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Search phrase for news articles
    #[arg(short, long, env = "SEARCH_PHRASE", default_value = "default search")]
    pub search_phrase: String,

    /// News category/section/topic (passed through to the listing source;
    /// not used by filtering)
    #[arg(short = 'c', long, env = "NEWS_CATEGORY", default_value = "general")]
    pub news_category: String,

    /// Number of months of news to keep (0 and 1 both mean the current month)
    #[arg(short = 'n', long, default_value_t = 1)]
    pub num_months: u32,

    /// Maximum concurrent image downloads
    #[arg(long, default_value_t = 4)]
    pub concurrency: usize,

    /// Per-request timeout for each image download, in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,

    /// Directory for downloaded images and tabular output
    #[arg(short, long, env = "OUTPUT_DIR", default_value = "output")]
    pub output_dir: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["news_clipper"]);

        assert_eq!(cli.search_phrase, "default search");
        assert_eq!(cli.news_category, "general");
        assert_eq!(cli.num_months, 1);
        assert_eq!(cli.concurrency, 4);
        assert_eq!(cli.timeout_secs, 10);
        assert_eq!(cli.output_dir, "output");
    }

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "news_clipper",
            "--search-phrase",
            "climate change",
            "--news-category",
            "science",
            "--num-months",
            "3",
            "--concurrency",
            "8",
            "--timeout-secs",
            "5",
            "--output-dir",
            "/tmp/run",
        ]);

        assert_eq!(cli.search_phrase, "climate change");
        assert_eq!(cli.news_category, "science");
        assert_eq!(cli.num_months, 3);
        assert_eq!(cli.concurrency, 8);
        assert_eq!(cli.timeout_secs, 5);
        assert_eq!(cli.output_dir, "/tmp/run");
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(["news_clipper", "-s", "rates", "-c", "business", "-n", "2", "-o", "/tmp/out"]);

        assert_eq!(cli.search_phrase, "rates");
        assert_eq!(cli.news_category, "business");
        assert_eq!(cli.num_months, 2);
        assert_eq!(cli.output_dir, "/tmp/out");
    }
}
