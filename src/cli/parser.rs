use crate::export::ExportFormat;
use crate::models::preferences::{SortMode, SortOrder};
use clap::{Parser, Subcommand};

/// Command-line interface definition for rMealLog
#[derive(Parser)]
#[command(
    name = "rmeallog",
    version = env!("CARGO_PKG_VERSION"),
    about = "A personal food journal: log restaurant meals and dishes, browse, search and follow your monthly spending",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

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

    /// Manage the configuration file (view, check, migrate or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields with their defaults")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Specify the editor to use (vim, nano, or custom path)")]
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

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Add a meal, or replace an existing one with --edit
    Add {
        #[arg(long, short = 'r', help = "Restaurant name (created if new)")]
        restaurant: String,

        #[arg(long, short = 'c', help = "City name (created if new)")]
        city: String,

        #[arg(long, short = 'n', help = "Meal name, e.g. 'Birthday dinner'")]
        name: String,

        #[arg(long, default_value = "")]
        comment: String,

        #[arg(long, help = "Meal date (YYYY-MM-DD), default today")]
        date: Option<String>,

        #[arg(long, help = "Meal time (HH:MM), default now")]
        time: Option<String>,

        #[arg(long, help = "Meal rating, 0 to 5")]
        rating: Option<String>,

        #[arg(long, help = "Total price, default the sum of the dishes")]
        price: Option<String>,

        #[arg(long = "photo", value_name = "PATH", help = "Photo reference (repeatable)")]
        photos: Vec<String>,

        #[arg(
            long = "dish",
            short = 'd',
            value_name = "SPEC",
            help = "Dish as name;type;price[;rating[;description]] (repeatable)"
        )]
        dishes: Vec<String>,

        #[arg(long = "edit", value_name = "ID", help = "Replace the meal with this id")]
        edit: Option<i64>,
    },

    /// Delete a meal and its dishes
    Del {
        id: i64,

        #[arg(long, short = 'f', help = "Do not ask for confirmation")]
        force: bool,
    },

    /// Show one meal in detail
    Show {
        id: i64,

        #[arg(long, help = "Print as JSON")]
        json: bool,
    },

    /// List meals grouped by date, restaurant or rating
    List {
        #[arg(long, value_enum, help = "Grouping (saved as preference)")]
        sort: Option<SortMode>,

        #[arg(long, value_enum, help = "Order (saved as preference)")]
        order: Option<SortOrder>,
    },

    /// Monthly statistics
    Stats {
        #[arg(long, value_name = "YYYY-MM", help = "Month to show, default current")]
        month: Option<String>,

        #[arg(long, help = "Number of top restaurants")]
        top: Option<usize>,

        #[arg(long, help = "Print as JSON")]
        json: bool,
    },

    /// Search restaurants, meals and dishes
    Search {
        query: Option<String>,

        #[arg(long, help = "Remember the query in recent searches")]
        save: bool,

        #[arg(long, help = "List recent searches")]
        recent: bool,

        #[arg(long = "clear-recent", help = "Forget all recent searches")]
        clear_recent: bool,

        #[arg(
            long,
            short = 'i',
            help = "Read queries line by line from stdin and search as you type"
        )]
        interactive: bool,
    },

    /// Show or change list preferences
    Prefs {
        #[arg(long, value_enum)]
        sort: Option<SortMode>,

        #[arg(long, value_enum)]
        order: Option<SortOrder>,

        #[arg(long)]
        print: bool,
    },

    /// Autocomplete restaurant names
    Restaurants {
        #[arg(long, default_value = "")]
        prefix: String,

        #[arg(long, help = "Only restaurants in this city")]
        city: Option<String>,

        #[arg(long, default_value_t = 20)]
        limit: usize,
    },

    /// Autocomplete city names
    Cities {
        #[arg(long, default_value = "")]
        prefix: String,

        #[arg(long, default_value_t = 20)]
        limit: usize,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Export meals and dishes
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter by YYYY, YYYY-MM, YYYY-MM-DD or START:END"
        )]
        range: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
