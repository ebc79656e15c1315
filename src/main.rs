use anyhow::Result;
use clap::Parser;

use headerpack::amalgamate::Amalgamator;
use headerpack::config;
use headerpack::markers::MarkerStore;
use headerpack::ui;
use headerpack::version::Version;

#[derive(clap::Parser)]
#[command(
    name = "headerpack",
    about = "Bump embedded version markers and assemble single-header releases"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Print the version currently stored in the source header
    Version,
    /// Rewrite the version markers to a new version
    Set {
        #[arg(help = "New version, e.g. 1.5.0 or 1.5.0-beta.2")]
        version: String,
    },
    /// Inline local includes into the release artifact
    Assemble,
    /// Remove the release artifact once it has been consumed
    Clean,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    match args.command {
        Command::Version => {
            let store = MarkerStore::new(&config);
            match store.get() {
                Ok(version) => println!("{}", version),
                Err(e) => {
                    ui::display_error(&format!("Failed to read version: {}", e));
                    std::process::exit(1);
                }
            }
        }
        Command::Set { version } => {
            let parsed = match Version::parse(&version) {
                Ok(v) => v,
                Err(e) => {
                    ui::display_error(&e.to_string());
                    std::process::exit(1);
                }
            };

            let store = MarkerStore::new(&config);
            if let Err(e) = store.set(&parsed) {
                ui::display_error(&format!("Failed to update version markers: {}", e));
                std::process::exit(1);
            }
            ui::display_success(&format!("Updated {} to version {}", config.source, parsed));
        }
        Command::Assemble => {
            ui::display_status(&format!("Assembling {}", config.source));
            let amalgamator = Amalgamator::new(&config);
            match amalgamator.assemble() {
                Ok(path) => {
                    ui::display_success(&format!("Wrote {}", path.display()));
                }
                Err(e) => {
                    ui::display_error(&format!("Assembly failed: {}", e));
                    std::process::exit(1);
                }
            }
        }
        Command::Clean => {
            let amalgamator = Amalgamator::new(&config);
            if let Err(e) = amalgamator.cleanup() {
                ui::display_error(&format!("Failed to remove artifact: {}", e));
                std::process::exit(1);
            }
            ui::display_status(&format!(
                "Removed {}",
                amalgamator.artifact_path().display()
            ));
        }
    }

    Ok(())
}
