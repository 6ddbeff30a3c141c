use env_logger::Builder;
use log::LevelFilter;
use std::io::Write;

pub fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Logs to stderr as `[LEVEL target] message`. Level comes from the flags only.
pub fn init_logging(verbose: u8, quiet: bool) {
    Builder::new()
        .filter_level(level_for(verbose, quiet))
        .format(|buf, record| writeln!(buf, "[{} {}] {}", record.level(), record.target(), record.args()))
        .init();
}
