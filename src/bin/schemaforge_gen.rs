use schemaforge::cli::run_cli;
use schemaforge::logging::{init_logging, LogConfig};

fn main() -> anyhow::Result<()> {
    if let Err(e) = init_logging(&LogConfig::from_env()) {
        eprintln!("Warning: {e:#}");
    }
    run_cli()
}
