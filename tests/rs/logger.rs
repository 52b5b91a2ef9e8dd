//! Integration tests for logger behavior.

use check_my_grade::logger::{set_level, set_level_from_str, Level};
use check_my_grade::{debug, error, info, warn};

#[test]
fn level_parse_accepts_valid() {
    assert!(set_level_from_str("error"));
    assert!(set_level_from_str("warn"));
    assert!(set_level_from_str("info"));
    assert!(set_level_from_str("debug"));
}

#[test]
fn level_parse_rejects_invalid() {
    assert!(!set_level_from_str("invalid"));
    assert!(!set_level_from_str(""));
}

#[test]
fn level_ordering_follows_severity() {
    assert!(Level::Error < Level::Warn);
    assert!(Level::Info < Level::Debug);
    assert_eq!("WARNING".parse::<Level>(), Ok(Level::Warn));
}

#[test]
fn logs_do_not_panic() {
    set_level(Level::Debug);
    info!("info integration");
    warn!("warn integration");
    error!("error integration");
    debug!("debug integration");
}

#[cfg(feature = "file-logging")]
#[test]
fn file_logging_creates_parent_directories() {
    use check_my_grade::logger::init_file_logging;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logs").join("checkmygrade.log");
    assert!(init_file_logging(&path));
    set_level(Level::Warn);
    error!("to file");
    assert!(path.exists());
}
