//! Tests for interactive sessions: load, mutate, save.

use crate::support::*;

#[test]
fn test_new_store_set_and_save() {
    let t = Test::with_keys();

    let output = t.session(&set_and_save(&[("api key", "s3cret")], PUBLIC_KEY));
    assert_success(&output);
    assert_stdout_contains(&output, "new store");
    assert_stdout_contains(&output, "saved");

    let bytes = t.read_store();
    assert_eq!(bytes.len(), 256);
    assert_ne!(bytes[0], b'{');
    assert!(!String::from_utf8_lossy(&bytes).contains("s3cret"));
}

#[test]
fn test_reopen_encrypted_store() {
    let t = Test::with_keys();
    assert_success(&t.session(&set_and_save(&[("db", "postgres://x")], PUBLIC_KEY)));

    let output = t.unlocked_session("list\nquit\n");
    assert_success(&output);
    assert_stdout_contains(&output, "1 entries (decrypted)");
    assert_stdout_contains(&output, "postgres://x");
}

#[test]
fn test_private_key_flag_skips_prompt() {
    let t = Test::with_keys();
    assert_success(&t.session(&set_and_save(&[("a", "1")], PUBLIC_KEY)));

    let output = t
        .cmd()
        .args([STORE, "--private-key", PRIVATE_KEY])
        .write_stdin("list\nquit\n")
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "a  1");
}

#[test]
fn test_private_key_env_var() {
    let t = Test::with_keys();
    assert_success(&t.session(&set_and_save(&[("a", "1")], PUBLIC_KEY)));

    let output = t
        .cmd()
        .arg(STORE)
        .env("LOCKBOX_PRIVATE_KEY", t.path(PRIVATE_KEY))
        .write_stdin("list\nquit\n")
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "decrypted");
}

#[test]
fn test_plaintext_store_needs_no_key() {
    let t = Test::new();
    t.write_store(br#"{"zeta":"1","alpha":"2"}"#);

    let output = t.session("list\nquit\n");
    assert_success(&output);
    assert_stdout_contains(&output, "2 entries (plaintext)");

    let out = stdout(&output);
    let zeta = out.find("zeta").unwrap();
    let alpha = out.find("alpha").unwrap();
    assert!(zeta < alpha, "entries should keep file order");
}

#[test]
fn test_plaintext_store_is_encrypted_on_save() {
    let t = Test::with_keys();
    t.write_store(br#"{"a":"1"}"#);

    assert_success(&t.session(&format!("save\n{}\n", PUBLIC_KEY)));
    assert_ne!(t.read_store()[0], b'{');

    let output = t.unlocked_session("list\nquit\n");
    assert_success(&output);
    assert_stdout_contains(&output, "a  1");
}

#[test]
fn test_overwrite_warns_once() {
    let t = Test::with_keys();
    t.write_store(b"{}");

    let output = t.session("set\na\n1\nset\na\n2\nlist\nsave\npublic.pem\n");
    assert_success(&output);
    assert_eq!(stdout(&output).matches("overwrote existing value").count(), 1);

    let output = t.unlocked_session("list\nquit\n");
    assert_stdout_contains(&output, "a  2");
    assert_stdout_contains(&output, "1 entries");
}

#[test]
fn test_delete_present_and_absent_keys() {
    let t = Test::with_keys();
    t.write_store(br#"{"keep":"1","drop":"2"}"#);

    let output = t.session("delete\nmissing\ndelete\ndrop\nsave\npublic.pem\n");
    assert_success(&output);
    assert_stdout_contains(&output, "key not found: missing");
    assert_stdout_contains(&output, "deleted drop");

    let output = t.unlocked_session("list\nquit\n");
    assert_stdout_contains(&output, "1 entries");
    assert!(!stdout(&output).contains("drop"));
}

#[test]
fn test_invalid_key_reported_inline() {
    let t = Test::new();

    let output = t.session("set\nbad!key\nset\n leading\nlist\nquit\n");
    assert_success(&output);
    assert_stderr_contains(&output, "invalid character '!'");
    assert_stderr_contains(&output, "cannot start or end with a space");
    assert_stdout_contains(&output, "store is empty");
}

#[test]
fn test_empty_value_is_allowed() {
    let t = Test::with_keys();

    assert_success(&t.session(&set_and_save(&[("blank", "")], PUBLIC_KEY)));

    let output = t.unlocked_session("list\nquit\n");
    assert_stdout_contains(&output, "1 entries");
    assert_stdout_contains(&output, "blank");
}

#[test]
fn test_quit_leaves_file_untouched() {
    let t = Test::new();
    t.write_store(br#"{"a":"1"}"#);

    let output = t.session("set\nb\n2\nquit\n");
    assert_success(&output);
    assert_stdout_contains(&output, "unsaved changes discarded");
    assert_eq!(t.read_store(), br#"{"a":"1"}"#);
}

#[test]
fn test_end_of_input_exits_cleanly() {
    let t = Test::new();

    let output = t.session("");
    assert_success(&output);
    assert!(!t.store().exists());

    let output = t.session("set\nhalf");
    assert_success(&output);
    assert!(!t.store().exists());
}

#[test]
fn test_menu_accepts_numbers() {
    let t = Test::with_keys();

    let output = t.session("2\nk\nv\n1\n4\npublic.pem\n");
    assert_success(&output);
    assert_stdout_contains(&output, "k  v");
    assert!(t.store().exists());
}

#[test]
fn test_unknown_menu_choice_reprompts() {
    let t = Test::new();

    let output = t.session("frobnicate\nquit\n");
    assert_success(&output);
    assert_stdout_contains(&output, "unknown choice 'frobnicate'");
}

#[test]
fn test_save_expands_home_in_public_key_path() {
    let t = Test::with_keys();
    std::fs::copy(t.path(PUBLIC_KEY), t.home.path().join("pub.pem")).unwrap();

    let output = t.session("set\nk\nv\nsave\n~/pub.pem\nquit\n");
    assert_success(&output);
    assert_stdout_contains(&output, "saved");
    assert!(t.store().exists(), "save with ~/pub.pem should write the store");

    let output = t.unlocked_session("list\nquit\n");
    assert_stdout_contains(&output, "k  v");
}

#[test]
fn test_list_shows_entries_in_insertion_order() {
    let t = Test::new();
    t.write_store(br#"{"zeta":"1","alpha":"2"}"#);

    let output = t.session("list\nquit\n");
    assert_success(&output);
    let out = stdout(&output);
    let zeta = out.find("zeta  1").expect("zeta listed");
    let alpha = out.find("alpha  2").expect("alpha listed");
    assert!(zeta < alpha);
}
