use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn skirmish() -> Command {
    Command::cargo_bin("skirmish").expect("skirmish binary")
}

#[test]
fn roll_is_seeded() {
    let first = skirmish()
        .args(["roll", "--seed", "9", "--rolls", "4"])
        .output()
        .expect("run");
    let second = skirmish()
        .args(["roll", "--seed", "9", "--rolls", "4"])
        .output()
        .expect("run");
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
    assert_eq!(String::from_utf8_lossy(&first.stdout).lines().count(), 4);
}

#[test]
fn run_reports_a_party_win() {
    skirmish()
        .args([
            "run", "--party", "fighter,cleric,rogue,wizard", "--level", "20", "--mob", "Goblin=1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("party wins"))
        .stdout(predicate::str::contains("wizard"));
}

#[test]
fn run_prints_the_log_on_request() {
    skirmish()
        .args([
            "run", "--party", "fighter", "--level", "3", "--mob", "Goblin=2", "--seed", "5", "--log",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[INIT]"))
        .stdout(predicate::str::contains("[ATTACK]"));
}

#[test]
fn run_json_report() {
    let out = skirmish()
        .args([
            "run", "--party", "rogue", "--level", "1", "--mob", "Young Green Dragon=1", "--json",
        ])
        .output()
        .expect("run");
    assert!(out.status.success());
    let report: serde_json::Value = serde_json::from_slice(&out.stdout).expect("json report");
    assert_eq!(report["outcome"]["winner"], "adversaries_won");
}

#[test]
fn run_reads_a_config_file_with_bom() {
    let dir = std::env::temp_dir().join(format!("skirmish-cli-{}", std::process::id()));
    fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join("encounter.json");
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice(
        br#"{ "party": ["fighter", "fighter"], "level": 20, "adversaries": { "Goblin": 1 }, "seed": 3 }"#,
    );
    fs::write(&path, bytes).expect("write config");

    skirmish()
        .args(["run", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("fighter (2)"));
}

#[test]
fn unknown_class_is_an_error() {
    skirmish()
        .args(["run", "--party", "bard", "--level", "3", "--mob", "Goblin=1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown character class"));
}

#[test]
fn empty_group_is_an_error() {
    skirmish()
        .args(["run", "--party", "fighter", "--level", "3", "--mob", "Goblin=0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("count of zero"));
}

#[test]
fn build_dumps_json() {
    let out = skirmish()
        .args(["build", "--class", "fighter", "--level", "20"])
        .output()
        .expect("run");
    assert!(out.status.success());
    let actor: serde_json::Value = serde_json::from_slice(&out.stdout).expect("actor json");
    assert_eq!(actor["kind"], "fighter");
    assert_eq!(actor["actions"], 4);
}

#[test]
fn bestiary_lists_builtin_monsters() {
    skirmish()
        .arg("bestiary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Goblin"))
        .stdout(predicate::str::contains("Mind Flayer"));
}

#[test]
fn simulate_party_prints_rates() {
    Command::cargo_bin("simulate-party")
        .expect("simulate-party binary")
        .args([
            "--party", "fighter,cleric", "--level", "5", "--mob", "Goblin=3", "--trials", "30",
            "--workers", "2",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("trials:             30"))
        .stdout(predicate::str::contains("party win rate:"))
        .stdout(predicate::str::contains("100% standing:"))
        .stdout(predicate::str::contains("50% standing:"))
        .stdout(predicate::str::contains("survival by member:"))
        .stdout(predicate::str::contains("cleric"));
}
