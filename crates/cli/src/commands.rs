use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Migrate every configured order grid document
    Migrate {
        #[arg(long, help = "Config file path")]
        config: String,
    },
    /// Print the validated document list without touching a database
    Documents {
        #[arg(long, help = "Config file path")]
        config: String,

        #[arg(long, help = "Print the documents as JSON instead of a table")]
        json: bool,
    },
    /// Connect to both databases and report which source documents exist
    Check {
        #[arg(long, help = "Config file path")]
        config: String,
    },
}
