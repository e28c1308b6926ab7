use std::fs::File;
use std::path::PathBuf;

use captr::Screen;
use captr::core::config::{self, CliOverrides};
use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "captr", about = "Turn videos into research notes and prototypes")]
struct Args {
    /// Screen to open on
    #[arg(short, long, value_enum)]
    screen: Option<Screen>,

    /// Chat name shown in the header and used for exported notes
    #[arg(long)]
    chat_name: Option<String>,

    /// Delay before the simulated assistant replies
    #[arg(long)]
    reply_delay_ms: Option<u64>,

    /// Markdown file to show in the notes canvas
    #[arg(long, value_name = "FILE")]
    notes: Option<PathBuf>,

    /// Directory for downloaded notes
    #[arg(long, value_name = "DIR")]
    export_dir: Option<PathBuf>,

    /// Log file path
    #[arg(long, value_name = "FILE", default_value = "captr.log")]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger; the terminal belongs to the TUI
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Falling back to default config: {}", e);
            config::CaptrConfig::default()
        }
    };
    let cli = CliOverrides {
        screen: args.screen,
        chat_name: args.chat_name,
        reply_delay_ms: args.reply_delay_ms,
        notes_file: args.notes,
        export_dir: args.export_dir,
    };
    let resolved = config::resolve(&file_config, &cli);

    log::info!(
        "Captr starting on {:?} (reply delay {}ms)",
        resolved.start_screen,
        resolved.reply_delay.as_millis()
    );

    captr::tui::run(resolved)
}
