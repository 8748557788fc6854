//! Tests for load failures, exit codes and recoverable save failures.

use crate::support::*;
use rsa::pkcs8::DecodePublicKey;
use rsa::{Oaep, RsaPublicKey};
use sha2::Sha256;

/// Encrypt arbitrary bytes the same way a store file is encrypted.
fn encrypt_raw(t: &Test, payload: &[u8]) -> Vec<u8> {
    let pem = std::fs::read_to_string(t.path(PUBLIC_KEY)).unwrap();
    let key = RsaPublicKey::from_public_key_pem(&pem).unwrap();
    loop {
        let ciphertext = key
            .encrypt(&mut rand::thread_rng(), Oaep::new::<Sha256>(), payload)
            .unwrap();
        if ciphertext[0] != b'{' {
            return ciphertext;
        }
    }
}

#[test]
fn test_malformed_plaintext_exits_2() {
    let t = Test::new();
    t.write_store(b"{\"a\": ");

    let output = t.session("quit\n");
    assert_exit_code(&output, 2);
    assert_stderr_contains(&output, "invalid store file");
}

#[test]
fn test_non_string_values_exit_2() {
    let t = Test::new();
    t.write_store(br#"{"a": 1}"#);

    assert_exit_code(&t.session("quit\n"), 2);
}

#[test]
fn test_empty_store_file_exits_2() {
    let t = Test::new();
    t.write_store(b"");

    let output = t.session("quit\n");
    assert_exit_code(&output, 2);
    assert_stderr_contains(&output, "is empty");
}

#[test]
fn test_wrong_private_key_exits_3() {
    let t = Test::with_keys();
    assert_success(&t.session(&set_and_save(&[("a", "1")], PUBLIC_KEY)));
    let before = t.read_store();

    let output = t.session(&format!("{}\nlist\nquit\n", OTHER_PRIVATE_KEY));
    assert_exit_code(&output, 3);
    assert_stderr_contains(&output, "decryption failed");
    assert!(!stdout(&output).contains("a  1"));
    assert_eq!(t.read_store(), before);
}

#[test]
fn test_garbage_ciphertext_exits_3() {
    let t = Test::with_keys();
    t.write_store(&[0x42; 256]);

    assert_exit_code(&t.unlocked_session("quit\n"), 3);
}

#[test]
fn test_decrypted_non_json_exits_2() {
    let t = Test::with_keys();
    let ciphertext = encrypt_raw(&t, b"definitely not json");
    t.write_store(&ciphertext);

    let output = t.unlocked_session("quit\n");
    assert_exit_code(&output, 2);
    assert_stderr_contains(&output, "invalid store file");
}

#[test]
fn test_unusable_private_key_exits_2() {
    let t = Test::with_keys();
    assert_success(&t.session(&set_and_save(&[("a", "1")], PUBLIC_KEY)));

    let output = t.session(&format!("{}\nquit\n", PUBLIC_KEY));
    assert_exit_code(&output, 2);
    assert_stderr_contains(&output, "invalid private key file");

    let output = t.session("missing.pem\nquit\n");
    assert_exit_code(&output, 2);
}

#[test]
fn test_no_private_key_answer_exits_2() {
    let t = Test::with_keys();
    assert_success(&t.session(&set_and_save(&[("a", "1")], PUBLIC_KEY)));

    let output = t.session("");
    assert_exit_code(&output, 2);
    assert_stderr_contains(&output, "no private key path provided");
}

#[test]
fn test_invalid_public_key_is_recoverable() {
    let t = Test::with_keys();

    let output = t.session(&format!(
        "set\nk\nv\nsave\nmissing.pem\nsave\n{}\nsave\n{}\n",
        PRIVATE_KEY, PUBLIC_KEY
    ));
    assert_success(&output);
    assert_stderr_contains(&output, "failed to read key file");
    assert_stderr_contains(&output, "invalid public key file");
    assert_stdout_contains(&output, "saved");

    let output = t.unlocked_session("list\nquit\n");
    assert_stdout_contains(&output, "k  v");
}

#[test]
fn test_store_too_large_is_recoverable() {
    let t = Test::with_keys();
    let big = "x".repeat(300);

    let output = t.session(&format!("set\nbig\n{}\nsave\n{}\nquit\n", big, PUBLIC_KEY));
    assert_success(&output);
    assert_stderr_contains(&output, "encryption failed");
    assert_stderr_contains(&output, "at most 190 bytes");
    assert_stdout_contains(&output, "larger key");
    assert!(!t.store().exists());
}

#[test]
fn test_failed_save_keeps_previous_file() {
    let t = Test::with_keys();
    assert_success(&t.session(&set_and_save(&[("a", "1")], PUBLIC_KEY)));
    let before = t.read_store();

    let big = "y".repeat(250);
    let output = t.unlocked_session(&format!("set\nbig\n{}\nsave\n{}\nquit\n", big, PUBLIC_KEY));
    assert_success(&output);
    assert_eq!(t.read_store(), before);
}
