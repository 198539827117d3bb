use crate::export::ExportFormat;
use crate::models::Language;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for internlog
/// CLI application to keep internship reports and export them
#[derive(Parser)]
#[command(
    name = "internlog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track internship work entries in bi-weekly reports and export them to PDF or DOCX",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Act as this user (email) instead of the signed-in one
    #[arg(global = true, long = "user")]
    pub user: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Show the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,
    },

    /// Sign in, show or delete the current user
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Show or edit the internship profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Manage bi-weekly reports
    Report {
        #[command(subcommand)]
        action: ReportAction,
    },

    /// Manage the entries of a report
    Entry {
        #[command(subcommand)]
        action: EntryAction,
    },

    /// Show internship progress and total hours
    Status,

    /// Export a report to PDF or DOCX
    Export {
        /// Report id (e.g. 1)
        report: String,

        #[arg(long = "format", value_enum, default_value = "pdf")]
        format: ExportFormat,

        /// Document language (defaults to the configured one)
        #[arg(long = "lang", value_enum)]
        lang: Option<Language>,

        /// Output directory (defaults to the configured one)
        #[arg(long = "out")]
        out: Option<String>,

        /// TrueType font to embed in the PDF
        #[arg(long = "font")]
        font: Option<String>,

        /// Overwrite existing files without asking
        #[arg(long = "force")]
        force: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}

#[derive(Subcommand)]
pub enum UserAction {
    /// Sign in (the account is created on first sign-in)
    Login {
        #[arg(long = "email")]
        email: String,

        #[arg(long = "name")]
        name: Option<String>,
    },

    /// Show the current user
    Whoami,

    /// Delete the current user and all of their data
    Delete {
        #[arg(long = "yes", help = "Confirm the deletion")]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Print the profile
    Show,

    /// Update profile fields; omitted fields are kept
    Set(ProfileArgs),
}

#[derive(Args, Debug, Default)]
pub struct ProfileArgs {
    #[arg(long = "first-name")]
    pub first_name: Option<String>,

    #[arg(long = "last-name")]
    pub last_name: Option<String>,

    #[arg(long = "student-id")]
    pub student_id: Option<String>,

    #[arg(long = "company")]
    pub company_name: Option<String>,

    #[arg(long = "position")]
    pub position: Option<String>,

    /// Internship start (YYYY-MM-DD)
    #[arg(long = "start")]
    pub start_date: Option<String>,

    /// Internship end (YYYY-MM-DD)
    #[arg(long = "end")]
    pub end_date: Option<String>,

    #[arg(long = "supervisor")]
    pub supervisor_name: Option<String>,

    #[arg(long = "supervisor-position")]
    pub supervisor_position: Option<String>,

    #[arg(long = "department")]
    pub department: Option<String>,
}

#[derive(Subcommand)]
pub enum ReportAction {
    /// Create the next report
    Add,

    /// List reports with their totals
    List,

    /// Show the entries of a report
    Show { id: String },

    /// Delete a report and its entries
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum EntryAction {
    /// Append an entry to a report
    Add {
        report: String,

        /// Date (YYYY-MM-DD); defaults to the day after the last entry
        #[arg(long = "date")]
        date: Option<String>,

        /// Hours worked (default 8)
        #[arg(long = "hours")]
        hours: Option<String>,

        #[arg(long = "desc")]
        description: Option<String>,
    },

    /// Edit an entry
    Edit {
        report: String,
        entry: String,

        #[arg(long = "date")]
        date: Option<String>,

        #[arg(long = "hours")]
        hours: Option<String>,

        #[arg(long = "desc")]
        description: Option<String>,
    },

    /// Delete an entry
    Del { report: String, entry: String },
}
