//! Clap derive structures for the `loandesk` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// loandesk -- back-office CLI for auto-loan servicing
#[derive(Debug, Parser)]
#[command(
    name = "loandesk",
    version,
    about = "Service auto loans from the command line",
    long_about = "Manage customers and loans, read portfolio statistics, and record\n\
        call-center outcomes against the loan-servicing REST API.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// API base URL (overrides LOANDESK_API_URL and the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Target environment when no API URL is configured
    #[arg(long = "env", global = true, value_enum)]
    pub environment: Option<EnvironmentArg>,

    /// Output format [default: from config, else table]
    #[arg(long, short = 'o', global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output [default: from config, else auto]
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,
}

impl GlobalOpts {
    pub fn format(&self) -> OutputFormat {
        self.output.clone().unwrap_or(OutputFormat::Table)
    }

    pub fn color_mode(&self) -> ColorMode {
        self.color.clone().unwrap_or(ColorMode::Auto)
    }
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EnvironmentArg {
    /// Local backend at http://localhost:5000/api
    Development,
    /// Hosted backend
    Production,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage customers
    #[command(alias = "cust", alias = "c")]
    Customers(CustomersArgs),

    /// Manage loans
    #[command(alias = "l")]
    Loans(LoansArgs),

    /// View and log customer interactions
    #[command(alias = "int")]
    Interactions(InteractionsArgs),

    /// Show portfolio statistics
    #[command(alias = "dash")]
    Dashboard,

    /// Look up callers and record call outcomes
    Call(CallArgs),

    /// List every API operation this tool can issue
    Catalog,

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CUSTOMERS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CustomersArgs {
    #[command(subcommand)]
    pub command: CustomersCommand,
}

#[derive(Debug, Subcommand)]
pub enum CustomersCommand {
    /// List customers
    #[command(alias = "ls")]
    List {
        /// Match name or email (case-insensitive) or phone
        #[arg(long, short = 's')]
        search: Option<String>,
    },

    /// Show one customer with their loans and contact history
    Get {
        /// Customer ID
        id: String,
    },

    /// Create a customer
    Create {
        #[command(flatten)]
        fields: CustomerFieldArgs,

        /// Read fields from a JSON file (flags override file values)
        #[arg(long, short = 'F')]
        from_file: Option<PathBuf>,
    },

    /// Update a customer (unset fields keep their current values)
    Update {
        /// Customer ID
        id: String,

        #[command(flatten)]
        fields: CustomerFieldArgs,

        /// Read fields from a JSON file (flags override file values)
        #[arg(long, short = 'F')]
        from_file: Option<PathBuf>,
    },

    /// Delete a customer
    #[command(alias = "rm")]
    Delete {
        /// Customer ID
        id: String,
    },
}

#[derive(Debug, Default, Args)]
pub struct CustomerFieldArgs {
    /// Account number
    #[arg(long)]
    pub account_number: Option<String>,

    /// First name
    #[arg(long)]
    pub first_name: Option<String>,

    /// Last name
    #[arg(long)]
    pub last_name: Option<String>,

    /// Email address
    #[arg(long)]
    pub email: Option<String>,

    /// Primary phone number
    #[arg(long)]
    pub phone: Option<String>,

    /// Social security number
    #[arg(long)]
    pub ssn: Option<String>,

    /// Date of birth (YYYY-MM-DD)
    #[arg(long)]
    pub dob: Option<String>,

    /// Street address
    #[arg(long)]
    pub address_line_1: Option<String>,

    /// Apartment, suite, unit
    #[arg(long)]
    pub address_line_2: Option<String>,

    #[arg(long)]
    pub city: Option<String>,

    #[arg(long)]
    pub state: Option<String>,

    #[arg(long)]
    pub zip_code: Option<String>,

    #[arg(long)]
    pub customer_number: Option<String>,

    /// responsible_party, co_signer, or guarantor
    #[arg(long)]
    pub record_type: Option<String>,

    #[arg(long)]
    pub borrower_first_name: Option<String>,

    #[arg(long)]
    pub borrower_last_name: Option<String>,

    /// Whether the customer may be called
    #[arg(long)]
    pub eligible_to_call: Option<bool>,

    #[arg(long)]
    pub transfer_phone_number: Option<String>,

    #[arg(long)]
    pub transfer_ip_address: Option<String>,

    #[arg(long)]
    pub credit_score: Option<String>,

    #[arg(long)]
    pub monthly_income: Option<String>,

    #[arg(long)]
    pub employment_status: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  LOANS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct LoansArgs {
    #[command(subcommand)]
    pub command: LoansCommand,
}

#[derive(Debug, Subcommand)]
pub enum LoansCommand {
    /// List loans
    #[command(alias = "ls")]
    List {
        /// Match borrower, vehicle, product, or loan ID
        #[arg(long, short = 's')]
        search: Option<String>,

        /// Only loans with this status ("all" for every loan)
        #[arg(long, default_value = "all")]
        status: String,
    },

    /// Show one loan
    Get {
        /// Loan ID
        id: String,
    },

    /// Create a loan
    Create {
        #[command(flatten)]
        fields: LoanFieldArgs,

        /// Read fields from a JSON file (flags override file values)
        #[arg(long, short = 'F')]
        from_file: Option<PathBuf>,
    },

    /// Update a loan (unset fields keep their current values)
    Update {
        /// Loan ID
        id: String,

        #[command(flatten)]
        fields: LoanFieldArgs,

        /// Read fields from a JSON file (flags override file values)
        #[arg(long, short = 'F')]
        from_file: Option<PathBuf>,
    },

    /// Delete a loan
    #[command(alias = "rm")]
    Delete {
        /// Loan ID
        id: String,
    },
}

#[derive(Debug, Default, Args)]
pub struct LoanFieldArgs {
    /// Owning customer ID
    #[arg(long)]
    pub customer_id: Option<String>,

    /// Product name
    #[arg(long)]
    pub product_name: Option<String>,

    /// Loan status
    #[arg(long)]
    pub status: Option<String>,

    /// Amount currently due
    #[arg(long)]
    pub due_amount: Option<String>,

    #[arg(long)]
    pub missed_installments: Option<String>,

    /// Contractual installment amount
    #[arg(long)]
    pub installment_amount: Option<String>,

    #[arg(long)]
    pub interest_late_fee: Option<String>,

    #[arg(long)]
    pub minimum_amount: Option<String>,

    #[arg(long)]
    pub pay_later_date: Option<String>,

    #[arg(long)]
    pub already_paid_date: Option<String>,

    #[arg(long)]
    pub grace_period_date: Option<String>,

    /// Next due date (YYYY-MM-DD)
    #[arg(long)]
    pub due_date: Option<String>,

    #[arg(long)]
    pub vehicle_id: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  INTERACTIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct InteractionsArgs {
    #[command(subcommand)]
    pub command: InteractionsCommand,
}

#[derive(Debug, Subcommand)]
pub enum InteractionsCommand {
    /// List a customer's interactions
    #[command(alias = "ls")]
    List {
        /// Customer ID
        customer_id: String,
    },

    /// Log an interaction
    Create {
        /// Customer ID
        customer_id: String,

        /// Interaction type (e.g. Call, Email, SMS)
        #[arg(long = "type")]
        kind: Option<String>,

        /// Interaction status (e.g. Completed, Pending)
        #[arg(long)]
        status: Option<String>,

        #[arg(long)]
        notes: Option<String>,

        /// Read fields from a JSON file (flags override file values)
        #[arg(long, short = 'F')]
        from_file: Option<PathBuf>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CALL CENTER
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CallArgs {
    #[command(subcommand)]
    pub command: CallCommand,
}

#[derive(Debug, Subcommand)]
pub enum CallCommand {
    /// Look up a caller by phone number
    Lookup {
        /// Caller phone number
        phone: String,
    },

    /// Look up a caller and record the outcome of the call
    Outcome {
        /// Caller phone number
        phone: String,

        /// Final disposition
        #[arg(
            long,
            short = 'd',
            value_parser = [
                "Promise_to_Pay",
                "Resolved",
                "No_Answer",
                "Callback_Scheduled",
                "Refused_to_Pay",
                "Dispute",
            ]
        )]
        disposition: String,

        /// Payment amount the customer agreed to
        #[arg(long)]
        amount: Option<String>,

        /// Date the customer promised to pay
        #[arg(long)]
        pay_later_date: Option<String>,

        #[arg(long, default_value = "Phone")]
        contact_type: String,

        /// Call duration (e.g. 4m30s)
        #[arg(long)]
        duration: Option<String>,

        #[arg(long, default_value = "OUTBOUND")]
        call_type: String,

        #[arg(long)]
        end_status: Option<String>,

        #[arg(long, short = 'n')]
        notes: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display the configuration and the resolved API URL
    Show,

    /// Print the config file path
    Path,

    /// Set the API base URL
    SetUrl {
        /// Base URL, e.g. http://localhost:5000/api
        url: String,
    },

    /// Remove the configured API base URL
    UnsetUrl,

    /// Set the default environment
    SetEnv {
        #[arg(value_enum)]
        environment: EnvironmentArg,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
