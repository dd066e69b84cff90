mod terminal;

use std::time::Instant;

use clap::Parser;
use terminal::{print, spinner};

#[derive(Parser)]
#[command(name = "lansight")]
#[command(about = "Discover and classify devices on the local network.")]
struct CommandLine {
    /// Emit the device list as JSON instead of the tree view
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CommandLine::parse();
    terminal::logging::init(args.verbose);

    if !args.json {
        print::header("local network scan");
    }
    let progress = (!args.json).then(spinner::start);

    let start_time = Instant::now();
    let result = lansight_core::scan_network().await;

    if let Some(progress) = &progress {
        progress.finish_and_clear();
    }

    let devices = result?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&devices)?);
    } else {
        print::devices(&devices);
        print::summary(devices.len(), start_time.elapsed());
    }
    Ok(())
}
