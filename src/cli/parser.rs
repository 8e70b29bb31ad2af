use crate::export::ExportFormat;
use crate::models::break_type::BreakType;
use clap::{Parser, Subcommand};

/// Command-line interface definition for worktracker
/// CLI application to track shifts, breaks and task timers with SQLite
#[derive(Parser)]
#[command(
    name = "worktracker",
    version = env!("CARGO_PKG_VERSION"),
    about = "Work-time tracking: daily shifts, breaks, task timers and reports on SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Act as this employee (overrides `user` in the config file)
    #[arg(global = true, long = "user", short = 'u')]
    pub user: Option<String>,

    /// Print structured JSON responses instead of human-readable output
    #[arg(global = true, long = "json")]
    pub json: bool,

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

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Start or end the daily shift
    Shift {
        #[command(subcommand)]
        action: ShiftAction,
    },

    /// Start, end or record a break inside the open shift
    Break {
        #[command(subcommand)]
        action: BreakAction,
    },

    /// Task timers and task administration
    Task {
        #[command(subcommand)]
        action: TaskAction,
    },

    /// Show what is currently running for the user
    Status,

    /// List past intervals of the user
    History {
        #[arg(long, help = "Only this kind: shift, task or break")]
        kind: Option<String>,

        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,
    },

    /// Shift report: total, break and net minutes per shift
    Report {
        #[arg(long, help = "Report on another employee (admin only)")]
        employee: Option<String>,

        #[arg(long, conflicts_with = "employee", help = "Report on all employees (admin only)")]
        all: bool,

        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,
    },

    /// Minutes spent on task timers, per employee
    TaskReport {
        #[arg(long, help = "Report on another employee (admin only)")]
        employee: Option<String>,

        #[arg(long, conflicts_with = "employee", help = "Report on all employees (admin only)")]
        all: bool,

        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,
    },

    /// Counters for administrators
    Dashboard,

    /// Manage employees
    Employee {
        #[command(subcommand)]
        action: EmployeeAction,
    },

    /// Manage projects
    Project {
        #[command(subcommand)]
        action: ProjectAction,
    },

    /// Export the shift report
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,

        #[arg(long, help = "Export another employee's shifts (admin only)")]
        employee: Option<String>,

        #[arg(long, conflicts_with = "employee", help = "Export all employees (admin only)")]
        all: bool,

        #[arg(long, short = 'f', help = "Overwrite the file without asking")]
        force: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f', help = "Overwrite the file without asking")]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum ShiftAction {
    /// Open the daily shift
    Start {
        #[arg(long, help = "Backdate: YYYY-MM-DD HH:MM[:SS] (UTC) or RFC 3339")]
        at: Option<String>,
    },
    /// Close the daily shift
    End {
        #[arg(long, help = "Backdate: YYYY-MM-DD HH:MM[:SS] (UTC) or RFC 3339")]
        at: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum BreakAction {
    /// Start a break now
    Start {
        #[arg(long = "type", value_enum, help = "Break type (default from config)")]
        kind: Option<BreakType>,

        #[arg(long, help = "Backdate: YYYY-MM-DD HH:MM[:SS] (UTC) or RFC 3339")]
        at: Option<String>,
    },
    /// End the running break
    End {
        #[arg(long, help = "Backdate: YYYY-MM-DD HH:MM[:SS] (UTC) or RFC 3339")]
        at: Option<String>,
    },
    /// Record a finished break with explicit start and end
    Add {
        #[arg(long = "type", value_enum, help = "Break type (default from config)")]
        kind: Option<BreakType>,

        #[arg(long)]
        from: String,

        #[arg(long)]
        to: String,
    },
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Start the timer on a task
    Start {
        task_id: i64,

        #[arg(long, help = "Backdate: YYYY-MM-DD HH:MM[:SS] (UTC) or RFC 3339")]
        at: Option<String>,
    },
    /// Stop the timer on a task
    Stop {
        task_id: i64,

        #[arg(long, help = "Backdate: YYYY-MM-DD HH:MM[:SS] (UTC) or RFC 3339")]
        at: Option<String>,
    },
    /// Add a task to a project (admin only)
    Add {
        #[arg(long)]
        project: i64,

        title: String,
    },
    /// List tasks
    List {
        #[arg(long)]
        project: Option<i64>,
    },
}

#[derive(Subcommand)]
pub enum EmployeeAction {
    /// Register an employee (admin only, except for the very first one)
    Add {
        username: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long, default_value = "")]
        position: String,

        #[arg(long, default_value = "")]
        department: String,

        #[arg(long, help = "Grant administrative rights")]
        admin: bool,
    },
    /// List employees
    List,
}

#[derive(Subcommand)]
pub enum ProjectAction {
    /// Add a project (admin only)
    Add { title: String },
    /// List projects
    List,
}
