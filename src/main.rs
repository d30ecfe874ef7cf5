use tracing_subscriber::EnvFilter;

mod cli_commands;
mod cli_exec;
mod cli_runtime;

pub(crate) use cli_commands::{
    Commands, DeleteCommands, DownloadCommands, ListCommands, PeersCommands, SettingsCommands,
    SupportsCommands,
};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("lbry_bulk=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();
    match cli_runtime::run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(1);
        }
    }
}
