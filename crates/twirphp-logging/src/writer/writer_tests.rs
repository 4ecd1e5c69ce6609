#![allow(non_snake_case)]

use super::*;
use std::sync::Mutex;
use std::sync::atomic::AtomicUsize;

static CALL_COUNT: AtomicUsize = AtomicUsize::new(0);
static WRITER_TEST_LOCK: Mutex<()> = Mutex::new(());

fn counting_writer(_level: LogLevel, _target: &str, _message: &str) {
    CALL_COUNT.fetch_add(1, Ordering::SeqCst);
}

#[test]
fn LogWriterManager___new___default_level_is_warn() {
    let manager = LogWriterManager::new();

    assert_eq!(manager.level(), LogLevel::Warn);
}

#[test]
fn LogWriterManager___set_level___changes_level() {
    let manager = LogWriterManager::new();

    manager.set_level(LogLevel::Debug);

    assert_eq!(manager.level(), LogLevel::Debug);
}

#[test]
fn LogWriterManager___is_enabled___respects_level_ordering() {
    let manager = LogWriterManager::new();
    manager.set_level(LogLevel::Info);

    assert!(!manager.is_enabled(LogLevel::Trace));
    assert!(!manager.is_enabled(LogLevel::Debug));
    assert!(manager.is_enabled(LogLevel::Info));
    assert!(manager.is_enabled(LogLevel::Warn));
    assert!(manager.is_enabled(LogLevel::Error));
}

#[test]
fn LogWriterManager___level_off___disables_everything() {
    let manager = LogWriterManager::new();
    manager.set_level(LogLevel::Off);

    assert!(!manager.is_enabled(LogLevel::Error));
    assert!(!manager.is_enabled(LogLevel::Off));
}

#[test]
fn LogWriterManager___log___invokes_writer_when_enabled() {
    let _guard = WRITER_TEST_LOCK.lock().unwrap();
    let manager = LogWriterManager::new();
    manager.set_writer(counting_writer);
    manager.set_level(LogLevel::Info);

    let before = CALL_COUNT.load(Ordering::SeqCst);
    manager.log(LogLevel::Info, "test", "message");
    let after = CALL_COUNT.load(Ordering::SeqCst);

    assert_eq!(after - before, 1);
}

#[test]
fn LogWriterManager___log___skips_writer_below_level() {
    let _guard = WRITER_TEST_LOCK.lock().unwrap();
    let manager = LogWriterManager::new();
    manager.set_writer(counting_writer);
    manager.set_level(LogLevel::Error);

    let before = CALL_COUNT.load(Ordering::SeqCst);
    manager.log(LogLevel::Warn, "test", "message");
    let after = CALL_COUNT.load(Ordering::SeqCst);

    assert_eq!(after, before);
}

#[test]
fn LogWriterManager___reset_writer___restores_stderr() {
    let _guard = WRITER_TEST_LOCK.lock().unwrap();
    let manager = LogWriterManager::new();
    manager.set_writer(counting_writer);
    manager.reset_writer();
    manager.set_level(LogLevel::Trace);

    let before = CALL_COUNT.load(Ordering::SeqCst);
    manager.log(LogLevel::Info, "test", "goes to stderr");
    let after = CALL_COUNT.load(Ordering::SeqCst);

    assert_eq!(after, before);
}

#[test]
fn LogWriterManager___global___returns_same_instance() {
    let first = LogWriterManager::global() as *const LogWriterManager;
    let second = LogWriterManager::global() as *const LogWriterManager;

    assert_eq!(first, second);
}
