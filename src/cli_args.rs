use clap::Parser;

/// In-memory book CRUD service over HTTP.
#[derive(Parser)]
#[command(author, about, version)]
pub struct CliArgs {
    /// Path to the YAML configuration file holding the socket address,
    /// the error verbosity and the optional seed book list.
    #[clap(long, env = "CONFIG_FILE", default_value = "config.yaml")]
    pub config_file: String,
}
