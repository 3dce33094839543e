use std::fs;

use anyhow::anyhow;
use fanout::core::telemetry::{telemetry_dir, write_dispatch_record, DispatchRecord};
use fanout::{Action, Config, ConnectorKind, ConnectorManager, DataRecord};

fn config_in(dir: &std::path::Path, enabled: bool) -> Config {
    Config {
        session_id: "TEST-SESSION".into(),
        telemetry: enabled,
        telemetry_dir: Some(dir.to_path_buf()),
        ..Config::default()
    }
}

#[test]
fn disabled_telemetry_writes_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = config_in(tmp.path(), false);
    let rec = DispatchRecord::from_fault(&cfg, Action(1), &DataRecord::new(), &anyhow!("boom"));

    write_dispatch_record(&cfg, &rec).unwrap();
    assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);
}

#[test]
fn dispatch_is_appended_as_jsonl_and_log() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = config_in(tmp.path(), true);
    assert_eq!(telemetry_dir(&cfg).as_deref(), Some(tmp.path()));

    let mut manager = ConnectorManager::new();
    manager.register(ConnectorKind::Stateful.build(&cfg));
    manager.register(ConnectorKind::OpenAiGym.build(&cfg));

    let record = DataRecord::new().with("symbol", "ABC").with("close", 12.5);
    for action in [Action(1), Action(9)] {
        let report = manager.dispatch_report(action, &record).unwrap();
        let rec = DispatchRecord::from_report(&cfg, action, &record, &report);
        write_dispatch_record(&cfg, &rec).unwrap();
    }

    let jsonl = fs::read_to_string(tmp.path().join("fanout_dispatch_TEST-SESSION.jsonl")).unwrap();
    let lines: Vec<serde_json::Value> = jsonl
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["action"], 1);
    assert_eq!(lines[0]["status"], "valid");
    assert_eq!(lines[0]["record"]["symbol"], "ABC");
    assert_eq!(lines[1]["status"], "invalid");
    assert_eq!(lines[1]["verdicts"][1]["connector"], "openai-gym");
    assert_eq!(lines[1]["verdicts"][1]["accepted"], false);

    let log = fs::read_to_string(tmp.path().join("fanout_dispatch_TEST-SESSION.log")).unwrap();
    assert!(log.contains("SESSION   : TEST-SESSION"));
    assert!(log.contains("CONNECTOR : openai-gym -> rejected"));
}

#[test]
fn fault_record_keeps_error_chain() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = config_in(tmp.path(), true);
    let err = anyhow!("socket closed").context("connector #0 'feed' failed on action 3");
    let rec = DispatchRecord::from_fault(&cfg, Action(3), &DataRecord::new(), &err);
    assert_eq!(rec.status, "fault");
    assert_eq!(rec.details, "connector #0 'feed' failed on action 3: socket closed");

    write_dispatch_record(&cfg, &rec).unwrap();
    let log = fs::read_to_string(tmp.path().join("fanout_dispatch_TEST-SESSION.log")).unwrap();
    assert!(log.contains("DETAILS   : connector #0 'feed'"));
}
