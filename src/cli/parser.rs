use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface definition for shiftledger
/// Shift matrix export and payroll reconciliation for attendance rosters
#[derive(Parser)]
#[command(
    name = "shiftledger",
    version = env!("CARGO_PKG_VERSION"),
    about = "Build date × shift attendance matrices from a roster template and reconcile payroll sign-offs",
    long_about = None
)]
pub struct Cli {
    /// Override audit database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override the ledger directory
    #[arg(global = true, long = "data-dir")]
    pub data_dir: Option<String>,

    /// Override the roster template
    #[arg(global = true, long = "template")]
    pub template: Option<String>,

    /// Name recorded in ledgers and audit log
    #[arg(global = true, long = "actor")]
    pub actor: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize configuration, ledger directory and audit database
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// List teams and employees of the roster template
    Teams,

    /// Build the shift matrix for a date range and project entries into it
    Export {
        /// First day of the range (YYYY-MM-DD)
        #[arg(long = "from")]
        from: String,

        /// Last day of the range, inclusive (YYYY-MM-DD)
        #[arg(long = "to")]
        to: String,

        /// JSON file with the entries to project
        #[arg(long = "entries")]
        entries: PathBuf,

        /// Output .xlsx file
        #[arg(long = "file")]
        file: PathBuf,

        /// Overwrite the output file without asking
        #[arg(long = "force")]
        force: bool,
    },

    /// Record edits of attendance entries
    Touch {
        /// JSON file with the edited entries
        #[arg(long = "entries")]
        entries: PathBuf,
    },

    /// Import an exported matrix marked by payroll
    Import {
        /// The marked .xlsx file
        #[arg(long = "file")]
        file: PathBuf,
    },

    /// Show the payroll ledger
    Payroll {
        #[arg(long = "json", help = "Print as JSON")]
        json: bool,
    },

    /// Show entries changed after payroll processing
    Dirty {
        #[arg(long = "json", help = "Print as JSON")]
        json: bool,
    },

    /// Clear both ledgers and the audit log
    Reset {
        #[arg(long = "yes", help = "Confirm the full wipe")]
        yes: bool,
    },

    /// Print the audit log
    Log {
        #[arg(long = "print", help = "Print rows from the audit log")]
        print: bool,
    },
}
