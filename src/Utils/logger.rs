use log::LevelFilter;
use simplelog::{ColorChoice, Config, SimpleLogger, TermLogger, TerminalMode};

/// Installs a terminal logger at the given level.
///
/// Falls back to a plain stdout logger when no terminal is available. Calling it again
/// once a logger is installed does nothing, so tests may call it freely.
pub fn init_logger(level: LevelFilter) {
    if TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .is_err()
    {
        let _ = SimpleLogger::init(level, Config::default());
    }
}
