mod config;
mod error;
mod models;
mod ui;
mod utils;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;
use error::VdiskError;
use ui::app::{VdiskManagerApp, is_input_error};
use ui::cli::{Cli, Commands};
use utils::DiskPart;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let mut config = Config::from_env(cli.diskpart.clone());
    if let Commands::Info { width, height } = &cli.command {
        config = config.with_map_size(*width, *height);
    }

    let mut app = VdiskManagerApp::new(DiskPart::new(config.diskpart_bin.clone()), &config);

    let result = match &cli.command {
        Commands::Create {
            file,
            size,
            partitions,
        } => app.create_custom_vhd(file, size, partitions).map(|_| {
            println!("VHD created and partitioned.");
        }),
        Commands::Attach { file } => app.attach_vhd(file).map(|_| println!("VHD attached.")),
        Commands::Detach { file } => app.detach_vhd(file).map(|_| println!("VHD detached.")),
        Commands::Info { .. } => app.load_disk_info().map(|_| ()),
    };

    match result {
        Ok(()) => {
            if let Some(text) = app.disk_info_text() {
                println!("{}", text);
            }
            Ok(())
        }
        Err(e) => {
            report(&e);
            std::process::exit(if is_input_error(&e) { 2 } else { 1 });
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn report(err: &VdiskError) {
    match err {
        VdiskError::Validation(e) => eprintln!("Invalid input: {}", e),
        VdiskError::Launch { .. } => eprintln!("{}\nIs DiskPart installed, and are you running as administrator?", err),
        _ => eprintln!("{}", err),
    }
}
