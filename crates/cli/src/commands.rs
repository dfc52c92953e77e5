use clap::{Subcommand, ValueEnum};

#[derive(Subcommand)]
pub enum Commands {
    /// Translate a saved compile API response into an access decision
    Translate {
        #[arg(long, help = "Path to the compile API response JSON")]
        input: String,

        #[arg(long, default_value = "posts", help = "Protected relation name")]
        relation: String,

        #[arg(long, help = "Fail on malformed expressions instead of skipping them")]
        strict: bool,

        #[arg(long, value_enum, default_value_t = OutputFormat::Tree)]
        format: OutputFormat,
    },
    /// Search posts as a user, restricted by the policy
    Search {
        #[arg(long, help = "Principal the search runs for")]
        user: String,

        #[arg(long, help = "Fetch a single post by id instead of listing")]
        id: Option<String>,

        #[arg(long, help = "Load settings from this .env file")]
        env_file: Option<String>,
    },
    /// Create the posts index with its mapping if it does not exist
    InitIndex {
        #[arg(long, help = "Load settings from this .env file")]
        env_file: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The decision with its filter tree
    Tree,
    /// The filter rendered as an Elasticsearch query
    Es,
}
