use std::io::Cursor;

use stockroom_console::{ConsoleConfig, Retention, Seed, SeedSource, Session};

fn run_script(session: &mut Session, script: &str) -> String {
    let mut out = Vec::new();
    session
        .run(Cursor::new(script.to_string()), &mut out)
        .expect("in-memory I/O cannot fail");
    String::from_utf8(out).expect("output is UTF-8")
}

fn config(seed_json: &str, retention: Retention) -> ConsoleConfig {
    ConsoleConfig {
        seed: Seed::from_json(seed_json).expect("valid seed json"),
        seed_source: SeedSource::Builtin,
        retention,
        ..ConsoleConfig::default()
    }
}

#[test]
fn scripted_session_keeps_stock_between_actions() {
    let cfg = config(
        r#"{"stock": {"Monitor LG": 5}, "targets": {"Monitor LG": 10, "Cable": 2}}"#,
        Retention::Session,
    );
    let mut session = Session::from_config(&cfg).unwrap();

    let output = run_script(
        &mut session,
        "add Cable 2\nremove Monitor LG 5\nremove Monitor LG 1\nshortages\nlist\nquit\nadd Never 1\n",
    );

    assert!(output.contains("[ok] Added new item 'Cable' (2 on hand)"));
    assert!(output.contains("[ok] Removed 'Monitor LG' from inventory (all 5 taken)"));
    assert!(output.contains("[error] item not found: Monitor LG"));
    assert!(output.contains("Monitor LG |       0 |     10 |      10"));
    assert!(output.contains(" 1 | Cable | "));
    assert!(output.contains("Unique items: 1"));
    assert!(!output.contains("Never"));

    assert_eq!(session.ledger().on_hand("Cable"), 2);
    assert!(!session.ledger().contains("Monitor LG"));
}

#[test]
fn reset_retention_discards_every_change() {
    let cfg = config(r#"{"stock": {"D": 8}}"#, Retention::Reset);
    let mut session = Session::from_config(&cfg).unwrap();

    let output = run_script(&mut session, "remove D 8\nremove D 8\nlist\n");

    // Both removals succeed because each one starts from the seed again.
    assert_eq!(output.matches("[ok] Removed 'D' from inventory").count(), 2);
    assert!(output.contains(" 1 | D    |        8"));
}

#[test]
fn over_removal_warns_and_leaves_stock() {
    let cfg = config(r#"{"stock": {"D": 8}}"#, Retention::Session);
    let mut session = Session::from_config(&cfg).unwrap();

    let output = run_script(&mut session, "remove D 9\n");

    assert!(output.contains("[warn] insufficient stock for D: requested 9, on hand 8"));
    assert_eq!(session.ledger().on_hand("D"), 8);
}

#[test]
fn invalid_input_is_reported_not_fatal() {
    let mut session = Session::from_config(&ConsoleConfig::default()).unwrap();

    let output = run_script(&mut session, "add Mouse 0\nadd Mouse x\n\nhelp\n");

    assert!(output.contains("[error] invalid input: quantity must be greater than zero (got 0)"));
    assert!(output.contains("[error] 'x' is not a whole number"));
    assert!(output.contains("Commands:"));
    assert_eq!(session.ledger().len(), 4);
}
