// Entrypoint for the CLI application.
// - Keeps `main` small: load the library and hand it to the menu loop.

use library_manager::{config::Config, ui::main_menu, ui::TerminalConsole, Library};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr and stay quiet unless RUST_LOG asks for more.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::default();
    let library = Library::open(&config);

    // Blocks until the user exits; always ends with a save.
    main_menu(library, &mut TerminalConsole::new())?;
    Ok(())
}
