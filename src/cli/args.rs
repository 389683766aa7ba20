//! Command-line argument definitions for the statement processor.
//!
//! Defines the CLI interface using the clap derive API: a `convert`
//! command for the statement-to-CSV batch conversion, plus the `merge`
//! and `archive` companions operating on converted outputs.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::error::{BillError, Result};

/// CLI arguments for the statement processor
///
/// Converts pipe-delimited brokerage statement text files into normalized
/// balance, position and trade CSV tables.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "bill-processor",
    version,
    about = "Convert pipe-delimited brokerage statements into normalized CSV tables",
    long_about = "Converts fixed-layout brokerage statement text files into normalized \
                  CSV outputs (account balances, open positions, trade confirmations), \
                  and optionally merges per-account tables from two directories and \
                  bundles the results into zip archives."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the statement processor
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Convert statement text files into CSV tables (main command)
    Convert(ConvertArgs),
    /// Merge per-account CSV tables from a main and a sub directory
    Merge(MergeArgs),
    /// Bundle converted CSV tables into zip archives
    Archive(ArchiveArgs),
}

/// Arguments for the convert command
#[derive(Debug, Clone, Parser)]
pub struct ConvertArgs {
    /// Folder holding the statement .txt files
    #[arg(
        short = 's',
        long = "src",
        value_name = "PATH",
        default_value = "./src",
        help = "Source folder holding statement text files"
    )]
    pub source_path: PathBuf,

    /// Destination folder for the generated CSV tables
    ///
    /// An existing destination is cleared before converting; pass --force
    /// to skip the confirmation prompt.
    #[arg(
        short = 'd',
        long = "dst",
        value_name = "PATH",
        default_value = "./dst",
        help = "Destination folder for generated CSV tables"
    )]
    pub destination_path: PathBuf,

    /// Number of statement files converted concurrently
    ///
    /// Defaults to the number of CPU cores, capped at 8.
    #[arg(
        short = 'j',
        long = "workers",
        value_name = "COUNT",
        help = "Number of files converted concurrently"
    )]
    pub workers: Option<usize>,

    /// Abort the whole batch on the first failed file
    ///
    /// By default per-file errors are collected and reported while the
    /// remaining files continue converting.
    #[arg(long = "fail-fast", help = "Abort the batch on the first failed file")]
    pub fail_fast: bool,

    /// Clear an existing destination folder without asking
    #[arg(long = "force", help = "Clear an existing destination without asking")]
    pub force: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the merge command
#[derive(Debug, Clone, Parser)]
pub struct MergeArgs {
    /// Folder holding the main account's converted tables
    #[arg(
        long = "main",
        value_name = "PATH",
        default_value = "./dst",
        help = "Folder holding the main account's tables"
    )]
    pub main_path: PathBuf,

    /// Folder holding the sub accounts' converted tables
    #[arg(
        long = "sub",
        value_name = "PATH",
        default_value = "./dst_sub",
        help = "Folder holding the sub accounts' tables"
    )]
    pub sub_path: PathBuf,

    /// Destination folder for the merged tables
    #[arg(
        long = "dest",
        value_name = "PATH",
        default_value = "./dst_merge",
        help = "Destination folder for merged tables"
    )]
    pub destination_path: PathBuf,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,
}

/// Arguments for the archive command
#[derive(Debug, Clone, Parser)]
pub struct ArchiveArgs {
    /// Folder holding the main account's converted tables
    #[arg(
        long = "main",
        value_name = "PATH",
        default_value = "./dst",
        help = "Folder holding the main account's tables"
    )]
    pub main_path: PathBuf,

    /// Folder holding the sub accounts' converted tables
    #[arg(
        long = "sub",
        value_name = "PATH",
        default_value = "./dst_sub",
        help = "Folder holding the sub accounts' tables"
    )]
    pub sub_path: PathBuf,

    /// Destination folder for the zip archives
    #[arg(
        long = "dest",
        value_name = "PATH",
        default_value = "./dst_zip",
        help = "Destination folder for zip archives"
    )]
    pub destination_path: PathBuf,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,
}

impl ConvertArgs {
    /// Validate the convert command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.source_path.exists() {
            return Err(BillError::Configuration {
                message: format!("Source path does not exist: {}", self.source_path.display()),
            });
        }

        if !self.source_path.is_dir() {
            return Err(BillError::Configuration {
                message: format!(
                    "Source path is not a directory: {}",
                    self.source_path.display()
                ),
            });
        }

        if let Some(workers) = self.workers {
            if workers == 0 {
                return Err(BillError::Configuration {
                    message: "Number of workers must be greater than 0".to_string(),
                });
            }
            if workers > 100 {
                return Err(BillError::Configuration {
                    message: "Number of workers cannot exceed 100".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            verbosity_level(self.verbose)
        }
    }
}

impl MergeArgs {
    /// Validate the merge command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        validate_input_dir("Main path", &self.main_path)?;
        validate_input_dir("Sub path", &self.sub_path)
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        verbosity_level(self.verbose)
    }
}

impl ArchiveArgs {
    /// Validate the archive command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        validate_input_dir("Main path", &self.main_path)
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        verbosity_level(self.verbose)
    }
}

fn verbosity_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn validate_input_dir(label: &str, path: &std::path::Path) -> Result<()> {
    if !path.is_dir() {
        return Err(BillError::Configuration {
            message: format!("{label} is not an existing directory: {}", path.display()),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn convert_args(source: PathBuf) -> ConvertArgs {
        ConvertArgs {
            source_path: source,
            destination_path: PathBuf::from("./dst"),
            workers: None,
            fail_fast: false,
            force: false,
            verbose: 0,
            quiet: false,
        }
    }

    #[test]
    fn test_convert_args_validation() {
        let temp_dir = TempDir::new().unwrap();
        let args = convert_args(temp_dir.path().to_path_buf());
        assert!(args.validate().is_ok());

        let mut invalid = args.clone();
        invalid.workers = Some(0);
        assert!(invalid.validate().is_err());

        let mut invalid = args.clone();
        invalid.workers = Some(101);
        assert!(invalid.validate().is_err());

        let mut invalid = args;
        invalid.source_path = PathBuf::from("/nonexistent/path");
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let temp_dir = TempDir::new().unwrap();
        let mut args = convert_args(temp_dir.path().to_path_buf());

        assert_eq!(args.get_log_level(), "warn");
        args.verbose = 1;
        assert_eq!(args.get_log_level(), "info");
        args.verbose = 2;
        assert_eq!(args.get_log_level(), "debug");
        args.verbose = 3;
        assert_eq!(args.get_log_level(), "trace");

        args.verbose = 0;
        args.quiet = true;
        assert_eq!(args.get_log_level(), "error");
    }

    #[test]
    fn test_parse_convert_command() {
        let args = Args::try_parse_from([
            "bill-processor",
            "convert",
            "--src",
            "/tmp/statements",
            "--fail-fast",
            "-j",
            "4",
        ])
        .unwrap();

        match args.command {
            Some(Commands::Convert(convert)) => {
                assert_eq!(convert.source_path, PathBuf::from("/tmp/statements"));
                assert!(convert.fail_fast);
                assert_eq!(convert.workers, Some(4));
            }
            other => panic!("expected convert command, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_merge_defaults() {
        let args = Args::try_parse_from(["bill-processor", "merge"]).unwrap();
        match args.command {
            Some(Commands::Merge(merge)) => {
                assert_eq!(merge.main_path, PathBuf::from("./dst"));
                assert_eq!(merge.sub_path, PathBuf::from("./dst_sub"));
                assert_eq!(merge.destination_path, PathBuf::from("./dst_merge"));
            }
            other => panic!("expected merge command, got {other:?}"),
        }
    }
}
