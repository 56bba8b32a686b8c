//! Tabular sink implementations.
//!
//! # Submodules
//!
//! - [`table`]: writes the run's rows as `news_articles.csv` plus a
//!   `run_report.json` copy carrying per-record download status
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── news_articles.csv   # Title, Date, Description, Image Filename, Count Phrases, Contains Money
//! ├── run_report.json     # same rows plus download success/failure detail
//! ├── summit.jpg          # one image per successfully fetched record
//! └── ...
//! ```

pub mod table;
