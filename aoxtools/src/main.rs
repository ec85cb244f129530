use std::{env, path::PathBuf, process};

use chrono::NaiveDate;
use clap::Parser;
use dotenvy::dotenv;
use spapi_tools::{DateWindow, Marketplace};

use crate::{
    export::load_and_run,
    sinks::{ConsoleSink, CsvSink, OutputSink},
};

mod export;
mod sinks;

/// Exports Amazon marketplace orders created in a date window to a console table or a CSV file.
#[derive(Parser, Debug)]
#[command(version)]
pub struct Arguments {
    /// The marketplace to fetch orders from
    #[arg(short, long, default_value = "US")]
    marketplace: Marketplace,
    /// Only export orders created on or after this date (YYYY-MM-DD)
    #[arg(short = 'a', long = "created-after", default_value = "2017-03-30")]
    created_after: NaiveDate,
    /// Only export orders created before this date (YYYY-MM-DD). Defaults to the current UTC date.
    #[arg(short = 'b', long = "created-before")]
    created_before: Option<NaiveDate>,
    /// Write the export to this CSV file instead of printing a table
    #[arg(short, long)]
    csv: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init();
    let args = Arguments::parse();
    println!("Starting Amazon order export.");
    let window = DateWindow::new(args.created_after, args.created_before);
    let mut sink: Box<dyn OutputSink> = match &args.csv {
        Some(path) => match CsvSink::create(path) {
            Ok(sink) => Box::new(sink),
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            },
        },
        None => Box::new(ConsoleSink),
    };
    match load_and_run(|key| env::var(key).ok(), args.marketplace, window, sink.as_mut()).await {
        Ok(count) => {
            println!("Exported {count} orders.");
            println!("Done.");
        },
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        },
    }
}
