use std::path::Path;

use clap::{Parser, Subcommand};

use yomi_cli::commands::{config_ops, dict_ops, gap_ops, index_ops, search_ops};
use yomi_cli::trace_init::init_tracing;

#[derive(Parser)]
#[command(name = "yomitool", about = "Card reading dictionary maintenance tool")]
struct Cli {
    /// Custom settings TOML (see `settings-export`)
    #[arg(long, global = true)]
    settings: Option<String>,
    /// Directory for trace logs (requires --features trace)
    #[arg(long, global = true)]
    log_dir: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Inspect or edit the reading dictionary
    Dict {
        #[command(subcommand)]
        action: DictAction,
    },
    /// Recompute the reading index of every record
    Index {
        /// Dictionary file (.json or .tsv)
        dict_file: String,
        /// Record store (JSON array)
        records_file: String,
        /// Write the indexed records here instead of in place
        #[arg(short, long)]
        output: Option<String>,
        /// Report counts without writing
        #[arg(long)]
        dry_run: bool,
    },
    /// List tokens that still need a dictionary entry
    Gaps {
        /// Dictionary file (.json or .tsv)
        dict_file: String,
        /// Record store (JSON array)
        records_file: String,
        /// Include tokens seen in a single record
        #[arg(long)]
        all: bool,
        /// Maximum rows to print
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        /// Write an empty-reading template for `dict merge`
        #[arg(long)]
        template: Option<String>,
    },
    /// List dictionary keys that occur in no record
    Unused {
        /// Dictionary file (.json or .tsv)
        dict_file: String,
        /// Record store (JSON array)
        records_file: String,
    },
    /// Search records the way the card browser does
    Search {
        /// Record store (JSON array)
        records_file: String,
        /// Query text
        query: String,
        /// Show which test matched each record
        #[arg(long)]
        explain: bool,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
}

#[derive(Subcommand)]
enum DictAction {
    /// Show entry counts
    Info {
        /// Dictionary file
        dict_file: String,
    },
    /// Show the readings a text would be indexed with
    Lookup {
        /// Dictionary file
        dict_file: String,
        /// Text to scan
        text: String,
    },
    /// Add or replace an entry
    Add {
        /// Dictionary file
        dict_file: String,
        /// Literal substring
        key: String,
        /// Reading (kana)
        reading: String,
    },
    /// Remove an entry
    Remove {
        /// Dictionary file
        dict_file: String,
        /// Literal substring
        key: String,
    },
    /// Merge accepted entries (e.g. a filled-in gap template)
    Merge {
        /// Dictionary file to update
        dict_file: String,
        /// Dictionary file with accepted entries
        accepted_file: String,
    },
    /// Re-save in key order
    Sort {
        /// Dictionary file
        dict_file: String,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Some(file) = &cli.settings {
        config_ops::load_custom(file);
    }
    if let Some(dir) = &cli.log_dir {
        init_tracing(Path::new(dir));
    }

    match cli.command {
        Command::Dict { action } => match action {
            DictAction::Info { dict_file } => dict_ops::info(&dict_file),
            DictAction::Lookup { dict_file, text } => dict_ops::lookup(&dict_file, &text),
            DictAction::Add {
                dict_file,
                key,
                reading,
            } => dict_ops::add(&dict_file, &key, &reading),
            DictAction::Remove { dict_file, key } => dict_ops::remove(&dict_file, &key),
            DictAction::Merge {
                dict_file,
                accepted_file,
            } => dict_ops::merge(&dict_file, &accepted_file),
            DictAction::Sort { dict_file } => dict_ops::sort(&dict_file),
        },
        Command::Index {
            dict_file,
            records_file,
            output,
            dry_run,
        } => index_ops::index(&dict_file, &records_file, output.as_deref(), dry_run),
        Command::Gaps {
            dict_file,
            records_file,
            all,
            limit,
            template,
        } => gap_ops::gaps(&dict_file, &records_file, all, limit, template.as_deref()),
        Command::Unused {
            dict_file,
            records_file,
        } => gap_ops::unused(&dict_file, &records_file),
        Command::Search {
            records_file,
            query,
            explain,
        } => search_ops::search(&records_file, &query, explain),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
