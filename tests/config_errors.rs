use brewbot::config::MachineConfig;
use brewbot::effects::AudioCue;
use brewbot::error;
use brewbot::BrewError;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn test_config_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("brewbot.toml");

    let config = MachineConfig::default()
        .with_brew_seconds(5)
        .with_serve_delay(Duration::from_millis(1500))
        .with_typed_reveal(false)
        .with_muted_cue(AudioCue::Steam);
    config.save_to(&path).unwrap();

    let loaded = MachineConfig::load_from(&path).unwrap();
    assert_eq!(loaded, config);
    let timings = loaded.timings().unwrap();
    assert_eq!(timings.brew_seconds, 5);
    assert_eq!(timings.serve_delay, Duration::from_millis(1500));
    assert!(!timings.typed_reveal);
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempdir().unwrap();
    let loaded = MachineConfig::load_from(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(loaded, MachineConfig::default());
}

#[test]
fn test_partial_file_fills_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("brewbot.toml");
    fs::write(&path, "brew_seconds = 3\nmuted_cues = [\"ice_drop\"]\n").unwrap();

    let loaded = MachineConfig::load_from(&path).unwrap();
    assert_eq!(loaded.brew_seconds, 3);
    assert_eq!(loaded.muted_cues, vec![AudioCue::IceDrop]);
    assert_eq!(loaded.reset_delay, "3s");
}

#[test]
fn test_invalid_files_are_config_errors() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("brewbot.toml");

    for content in [
        "brew_seconds = \"ten\"",
        "this is not toml",
        "brew_seconds = 0",
        "serve_delay = \"soon\"",
        "reset_delay = \"5m\"",
    ] {
        fs::write(&path, content).unwrap();
        match MachineConfig::load_from(&path) {
            Err(BrewError::ConfigError(_)) => {}
            other => panic!("expected config error for {:?}, got {:?}", content, other),
        }
    }
}

#[test]
fn test_user_friendly_messages() {
    let msg = error::user_friendly_message(&BrewError::ConfigError("bad brew_seconds".into()));
    assert!(msg.contains("bad brew_seconds"));
    assert!(msg.contains("brewbot.toml"));

    assert!(error::is_cosmetic(&BrewError::EffectError("no audio".into())));
    assert!(!error::is_cosmetic(&BrewError::SchedulerError("closed".into())));
}
