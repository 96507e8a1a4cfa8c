use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use momo_core::{ParsedRecord, RecordStore};
use momo_extract::parse_backup;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "momo", version, about = "MoMo SMS backup to structured transaction records")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert an SMS backup XML into structured JSON records
    Parse {
        /// Path to the backup XML (defaults to ./sms_backup.xml)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// JSON output path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Look up one parsed record by transaction id
    Query {
        /// Path to a parsed JSON file, as written by `momo parse`
        #[arg(long, default_value = "parsed_sms.json")]
        data: PathBuf,

        /// Transaction id to look up
        #[arg(long)]
        id: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Parse { input, output } => {
            let input = input.unwrap_or_else(default_backup_path);
            if !input.exists() {
                bail!("backup not found: {} (pass --input <path>)", input.display());
            }

            let records = parse_backup(&input)
                .with_context(|| format!("parsing {}", input.display()))?;
            let json = serde_json::to_string_pretty(&records)?;

            match output {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("writing {}", path.display()))?;

                    let with_amount =
                        records.iter().filter(|r| r.transaction.has_amount()).count();
                    println!(
                        "Wrote {} records ({} with amounts) to {}",
                        records.len(),
                        with_amount,
                        path.display()
                    );
                }
                None => println!("{json}"),
            }
        }

        Command::Query { data, id } => {
            let raw = std::fs::read_to_string(&data)
                .with_context(|| format!("reading {}", data.display()))?;
            let records: Vec<ParsedRecord> = serde_json::from_str(&raw)
                .with_context(|| format!("decoding {}", data.display()))?;

            let store = RecordStore::from_records(records);
            match store.get(&id) {
                Some(record) => println!("{}", serde_json::to_string_pretty(record)?),
                None => bail!("transaction not found: {id}"),
            }
        }
    }

    Ok(())
}

fn default_backup_path() -> PathBuf {
    // Prefer a workspace-root backup when running from the repo
    PathBuf::from("sms_backup.xml")
}
