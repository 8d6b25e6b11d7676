use clap::Parser;
use shellmind::cli::Cli;
use shellmind::commands;
use shellmind::error_translation::ErrorTranslator;
use shellmind::ui::Console;
use std::io;
use tracing::debug;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = commands::run(cli).await {
        debug!("command failed: {:?}", e);

        let friendly = ErrorTranslator::translate_app_error(&e);
        let mut console = Console::new(io::stderr());
        let _ = console.user_error(&friendly);
        if friendly.raw_error != friendly.simple_message {
            let _ = console.plain(&format!("Details: {}", friendly.raw_error));
        }

        std::process::exit(1);
    }
}
