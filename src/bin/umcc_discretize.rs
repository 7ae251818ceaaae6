/*
 * Galileo Network Analytics (GNA) Toolkit
 *
 * Copyright 2024-2025 Fidelis Farm & Technologies, LLC
 * All Rights Reserved.
 * See license information in LICENSE.
 */

use anyhow::Context;
use clap::Parser;
use umcc::pipeline::discretize::DiscretizeProcessor;
use umcc::pipeline::FileProcessor;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Args {
    /// .csv or .jsonl file holding the sample
    #[arg(long)]
    input: String,

    /// .csv or .jsonl file receiving the bin of every record
    #[arg(long)]
    output: String,

    /// CSV column or JSON field to read
    #[arg(long)]
    column: Option<String>,

    /// max_contrast=<f64>;min_samples=<usize>;scale=<bool>
    #[arg(long)]
    options: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut discretize_processor = match DiscretizeProcessor::new(
        "umcc_discretize",
        &args.input,
        &args.output,
        args.column.as_deref(),
        &args.options.clone().unwrap_or(String::new()),
    ) {
        Ok(processor) => processor,
        Err(error) => {
            eprintln!("commandline error: {}", error);
            std::process::exit(exitcode::CONFIG)
        }
    };

    discretize_processor
        .run()
        .context("umcc_discretize failed")?;

    Ok(())
}
