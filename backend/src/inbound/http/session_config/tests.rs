//! Unit tests for session configuration.

use std::io::Write;

use super::*;
use rstest::{fixture, rstest};
use tempfile::NamedTempFile;

fn key_file(len: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create key file");
    file.write_all(&vec![b'k'; len]).expect("write key file");
    file
}

fn toggles(file: Option<&NamedTempFile>, secure: Option<bool>) -> SessionToggles {
    SessionToggles {
        key_file: file.map(|file| file.path().to_path_buf()),
        cookie_secure: secure,
        allow_ephemeral: false,
    }
}

#[fixture]
fn missing_path() -> PathBuf {
    std::env::temp_dir().join(format!("todo-session-key-{}", uuid::Uuid::new_v4()))
}

#[rstest]
fn release_accepts_a_long_key_and_explicit_flag() {
    let file = key_file(SESSION_KEY_MIN_LEN);
    let settings = session_settings(&toggles(Some(&file), Some(false)), BuildMode::Release)
        .expect("valid release settings");
    assert!(!settings.cookie_secure);
    assert_eq!(
        settings.key_fingerprint(),
        key_fingerprint(&Key::derive_from(&[b'k'; SESSION_KEY_MIN_LEN]))
    );
}

#[rstest]
fn release_requires_the_secure_flag() {
    let file = key_file(SESSION_KEY_MIN_LEN);
    let error = session_settings(&toggles(Some(&file), None), BuildMode::Release)
        .err()
        .expect("missing flag rejected");
    assert!(matches!(
        error,
        SessionConfigError::MissingSetting {
            name: "TODO_SESSION_COOKIE_SECURE"
        }
    ));
}

#[rstest]
fn debug_defaults_to_secure_cookies(missing_path: PathBuf) {
    let toggles = SessionToggles {
        key_file: Some(missing_path),
        ..SessionToggles::default()
    };
    let settings = session_settings(&toggles, BuildMode::Debug).expect("debug tolerates gaps");
    assert!(settings.cookie_secure);
}

#[rstest]
#[case(BuildMode::Release, 40, true)]
#[case(BuildMode::Debug, 40, false)]
#[case(BuildMode::Debug, 16, true)]
fn short_keys_depend_on_mode(
    #[case] mode: BuildMode,
    #[case] length: usize,
    #[case] rejected: bool,
) {
    let file = key_file(length);
    let result = session_settings(&toggles(Some(&file), Some(true)), mode);
    match result {
        Err(SessionConfigError::KeyTooShort { length: got, .. }) => {
            assert!(rejected);
            assert_eq!(got, length);
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => assert!(!rejected),
    }
}

#[rstest]
fn release_rejects_an_unreadable_key(missing_path: PathBuf) {
    let toggles = SessionToggles {
        key_file: Some(missing_path),
        cookie_secure: Some(true),
        allow_ephemeral: false,
    };
    let error = session_settings(&toggles, BuildMode::Release)
        .err()
        .expect("unreadable key rejected");
    assert!(matches!(error, SessionConfigError::KeyRead { .. }));
}

#[rstest]
fn release_refuses_ephemeral_keys(missing_path: PathBuf) {
    let toggles = SessionToggles {
        key_file: Some(missing_path),
        cookie_secure: Some(true),
        allow_ephemeral: true,
    };
    let error = session_settings(&toggles, BuildMode::Release)
        .err()
        .expect("ephemeral rejected");
    assert!(matches!(error, SessionConfigError::EphemeralNotAllowed));
}

#[rstest]
fn debug_generates_distinct_ephemeral_keys(missing_path: PathBuf) {
    let toggles = SessionToggles {
        key_file: Some(missing_path),
        cookie_secure: Some(false),
        allow_ephemeral: true,
    };
    let first = session_settings(&toggles, BuildMode::Debug).expect("first key");
    let second = session_settings(&toggles, BuildMode::Debug).expect("second key");
    assert_ne!(first.key_fingerprint(), second.key_fingerprint());
}

#[rstest]
fn fingerprint_is_stable_for_a_key() {
    let key = Key::derive_from(&[7_u8; SESSION_KEY_MIN_LEN]);
    assert_eq!(key_fingerprint(&key), key_fingerprint(&key.clone()));
    assert_eq!(key_fingerprint(&key).len(), FINGERPRINT_BYTES * 2);
}
