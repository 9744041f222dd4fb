//! File logging for the binary.
//!
//! Stdout belongs to the TUI, so records only go to a file, and only when
//! `BLOCKFALL_LOG_PATH` is set. `BLOCKFALL_LOG_LEVEL` picks the threshold
//! (`error`, `warn`, `info`, `debug`, `trace`, `off`; default `info`).

use std::str::FromStr;

use anyhow::Result;
use log::LevelFilter;
use log4rs::{
    append::file::FileAppender,
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
};

pub const LOG_PATH_VAR: &str = "BLOCKFALL_LOG_PATH";
pub const LOG_LEVEL_VAR: &str = "BLOCKFALL_LOG_LEVEL";

/// Parse a level name, falling back to `Info`
pub fn parse_level(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|s| LevelFilter::from_str(s.trim()).ok())
        .unwrap_or(LevelFilter::Info)
}

/// Install a file logger at `path`
pub fn init_log(level: LevelFilter, path: &str) -> Result<()> {
    let logfile = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} {l} {t} {m}{n}",
        )))
        .build(path)?;
    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(level)))
                .build("logfile", Box::new(logfile)),
        )
        .build(Root::builder().appender("logfile").build(level))?;
    log4rs::init_config(config)?;
    Ok(())
}

/// Install the file logger if the environment asks for one.
///
/// Returns whether a logger was installed.
pub fn init_from_env() -> Result<bool> {
    let Ok(path) = std::env::var(LOG_PATH_VAR) else {
        return Ok(false);
    };
    let level = parse_level(std::env::var(LOG_LEVEL_VAR).ok().as_deref());
    init_log(level, &path)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level(Some("debug")), LevelFilter::Debug);
        assert_eq!(parse_level(Some(" TRACE ")), LevelFilter::Trace);
        assert_eq!(parse_level(Some("off")), LevelFilter::Off);
        assert_eq!(parse_level(Some("loud")), LevelFilter::Info);
        assert_eq!(parse_level(None), LevelFilter::Info);
    }
}
