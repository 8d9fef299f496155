use anyhow::Result;
use clap::Parser;

use yamlsift::config::Config;
use yamlsift::file::loader::{load_document, load_from_stdin};

/// yamlsift - query YAML documents with compact path expressions
#[derive(Parser)]
#[command(name = "yamlsift")]
#[command(version)]
#[command(about = "Query YAML documents with compact path expressions", long_about = None)]
struct Cli {
    /// Path expression, e.g. "name.last" or "friends.#(age>45)#.first"
    path: String,

    /// YAML file to query (reads stdin when omitted; .gz files are
    /// decompressed)
    file: Option<String>,

    /// Print the raw YAML fragment instead of the decoded string form
    #[arg(short, long)]
    raw: bool,

    /// Exit with status 1 when the path matches nothing
    #[arg(short, long)]
    exit_status: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load();

    let yaml = match &cli.file {
        Some(path) => load_document(path)?,
        None => load_from_stdin()?,
    };

    let value = yamlsift::get(&yaml, &cli.path);

    if cli.raw || config.raw_output {
        println!("{}", value.raw());
    } else {
        println!("{}", value);
    }

    if !value.exists() && (cli.exit_status || config.exit_status) {
        std::process::exit(1);
    }
    Ok(())
}
