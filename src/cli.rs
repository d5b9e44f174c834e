use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "liftplan", version, about = "Workout plans from plain text or JSON")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Emit machine-readable JSON instead of colorful text.
    #[arg(global = true, long)]
    pub json: bool,

    /// Database file (overrides config and LIFTPLAN_DB)
    #[arg(global = true, long)]
    pub db: Option<String>,

    /// Log progress to stderr
    #[arg(global = true, short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Plan management
    #[command(subcommand, visible_alias = "p")]
    Plan(PlanCmd),

    /// Exercise management
    #[command(subcommand, visible_alias = "ex")]
    Exercise(ExerciseCmd),

    /// View or edit liftplan config
    #[command(subcommand)]
    Config(ConfigCmd),
}

//
// Commands
//

#[derive(Subcommand)]
pub enum PlanCmd {
    /// Import one or more plan files (text or JSON)
    #[command(visible_alias = "i")]
    Import { files: Vec<String> },

    /// Parse a plan file and print it without saving
    #[command(visible_alias = "c")]
    Check { file: String },

    /// Print the text form of a JSON plan
    Convert { file: String },

    /// List plans
    #[command(visible_alias = "l")]
    List,

    /// Show a single plan in detail
    #[command(visible_alias = "s")]
    Show {
        /// Plan index (from `p list`) or exact name
        plan: String,
    },

    /// Print a stored plan as plan text
    #[command(visible_alias = "e")]
    Export {
        /// Plan index (from `p list`) or exact name
        plan: String,
    },

    /// Delete a plan
    #[command(visible_alias = "d")]
    Delete {
        /// Plan index (from `p list`) or exact name
        plan: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum ExerciseCmd {
    /// Add a new exercise
    #[command(visible_alias = "a")]
    Add {
        /// Exercise name
        name: String,

        /// Exercise description
        #[arg(short, long)]
        desc: Option<String>,

        /// MET value used for calorie estimates
        #[arg(short, long)]
        met: Option<f64>,
    },

    /// List all exercises
    #[command(visible_alias = "l")]
    List,

    /// Delete an exercise
    #[command(visible_alias = "d")]
    Delete {
        /// Exercise id or name
        exercise: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigCmd {
    /// Show all config keys
    List,

    /// Get the value of a key
    Get { key: String },

    /// Set or override a key
    Set { key: String, val: String },

    /// Remove a key
    Unset { key: String },
}
