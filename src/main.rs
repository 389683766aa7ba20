use clap::Parser;
use std::process;
use tokio_util::sync::CancellationToken;

use bill_processor::cli::{args::Args, commands};

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show the command overview.
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        // Cancellation token coordinating graceful shutdown on ctrl-c.
        let cancellation_token = CancellationToken::new();

        let shutdown_signal = async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to install CTRL+C signal handler");

            cancellation_token.cancel();
        };

        tokio::select! {
            result = commands::run(args, cancellation_token.clone()) => {
                result
            }
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, shutting down gracefully...");
                Err(bill_processor::BillError::Interrupted {
                    reason: "interrupted by user".to_string(),
                })
            }
        }
    });

    match result {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show the command overview when no subcommand is provided
fn show_help_and_commands() {
    println!("Bill Processor - Brokerage Statement Converter");
    println!("==============================================");
    println!();
    println!("Convert pipe-delimited brokerage statement text files into normalized");
    println!("balance, position and trade CSV tables.");
    println!();
    println!("USAGE:");
    println!("    bill-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    convert     Convert statement text files into CSV tables (main command)");
    println!("    merge       Merge per-account CSV tables from a main and a sub directory");
    println!("    archive     Bundle converted CSV tables into zip archives");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("EXAMPLES:");
    println!("    # Convert statements from ./src into ./dst:");
    println!("    bill-processor convert --src ./src --dst ./dst");
    println!();
    println!("    # Merge sub-account tables into the main account's files:");
    println!("    bill-processor merge --main ./dst --sub ./dst_sub --dest ./dst_merge");
    println!();
    println!("    # Bundle converted tables into zip archives:");
    println!("    bill-processor archive --main ./dst --sub ./dst_sub --dest ./dst_zip");
    println!();
    println!("For detailed help on any command, use:");
    println!("    bill-processor <COMMAND> --help");
}
