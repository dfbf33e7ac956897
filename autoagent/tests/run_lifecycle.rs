//! End-to-end run lifecycle with a scripted gateway: orchestrate, evaluate,
//! persist, reload and validate against the bundled run log schema.

use std::fs;
use std::path::{Path, PathBuf};

use autoagent::agents::roles;
use autoagent::core::evaluate::evaluate;
use autoagent::core::types::{RunMode, RunResult};
use autoagent::io::run_log::{LoggedMetadata, RunLogRequest, load_run_log, save_run_log_at};
use autoagent::orchestrate::{Orchestrator, RunSelection};
use autoagent::test_support::{ScriptedGateway, ScriptedReply};
use chrono::NaiveDate;
use jsonschema::Draft;
use serde_json::Value;

fn schema_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("schemas/run_log/v1.schema.json")
}

fn assert_valid_run_log(path: &Path) {
    let schema: Value =
        serde_json::from_str(&fs::read_to_string(schema_path()).expect("read schema"))
            .expect("parse schema");
    let instance: Value = serde_json::from_str(&fs::read_to_string(path).expect("read log"))
        .expect("parse log");
    let compiled = jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(&schema)
        .expect("compile schema");
    let errors: Vec<String> = compiled
        .iter_errors(&instance)
        .map(|err| err.to_string())
        .collect();
    assert!(errors.is_empty(), "schema errors: {errors:?}");
}

fn persist(out_dir: &Path, task: &str, mode: RunMode, result: &RunResult) -> PathBuf {
    let metrics = evaluate(&result.final_answer, result.metadata.rounds);
    let at = NaiveDate::from_ymd_opt(2024, 3, 9)
        .and_then(|d| d.and_hms_opt(7, 5, 1))
        .expect("valid datetime");
    save_run_log_at(
        out_dir,
        &RunLogRequest {
            task,
            mode,
            messages: &result.agent_messages,
            final_answer: &result.final_answer,
            metadata: LoggedMetadata::new(&result.metadata, Some(&metrics)),
        },
        at,
    )
    .expect("save run log")
}

#[test]
fn multi_run_with_one_revision_persists_full_transcript() {
    let gateway = ScriptedGateway::new([
        "Understanding: greet\nPlan:\n- say hello",
        "hello",
        "REVISION REQUIRED\n- use three words",
        "1. Hello there friend",
        "Looks good. APPROVED",
    ]);
    let orchestrator = Orchestrator::new(&gateway, "gpt-4o-deploy");
    let task = "Say hello in 3 words.";

    let results = orchestrator
        .run(RunSelection::Multi, task, 2)
        .expect("multi run");
    let result = &results[&RunMode::Multi];

    assert_eq!(result.metadata.rounds, 2);
    assert_eq!(result.final_answer, "1. Hello there friend");
    let names: Vec<&str> = result
        .agent_messages
        .iter()
        .map(|m| m.agent_name.as_str())
        .collect();
    assert_eq!(
        names,
        ["Planner", "Executor", "Critic", "Executor", "Critic"]
    );

    let temp = tempfile::tempdir().expect("tempdir");
    let path = persist(temp.path(), task, RunMode::Multi, result);
    assert!(path.ends_with("20240309_070501_multi.json"));
    assert_valid_run_log(&path);

    let log = load_run_log(&path).expect("load");
    assert_eq!(log.task, task);
    assert_eq!(log.mode, RunMode::Multi);
    assert_eq!(log.agent_messages, result.agent_messages);
    assert_eq!(log.final_answer, result.final_answer);
    assert_eq!(log.metadata.model, "gpt-4o-deploy");
    assert_eq!(log.metadata.rounds, 2);
    assert_eq!(log.metadata.output_chars, Some(21));
    assert_eq!(log.metadata.has_steps, Some(true));
}

#[test]
fn both_mode_runs_baseline_first_and_logs_each_mode() {
    let gateway = ScriptedGateway::new([
        "Hello there friend",
        "plan",
        "Hi dear friend",
        "APPROVED",
    ]);
    let orchestrator = Orchestrator::new(&gateway, "gpt-4o-deploy");

    let results = orchestrator
        .run_both("Say hello in 3 words.", 2)
        .expect("both run");

    assert_eq!(
        results.keys().copied().collect::<Vec<_>>(),
        [RunMode::Single, RunMode::Multi]
    );
    assert_eq!(
        gateway.systems().first().map(String::as_str),
        Some(roles::SINGLE_AGENT.system_message)
    );
    assert_eq!(gateway.remaining(), 0);

    let temp = tempfile::tempdir().expect("tempdir");
    for (mode, result) in &results {
        let path = persist(temp.path(), "Say hello in 3 words.", *mode, result);
        assert_valid_run_log(&path);
    }
    assert_eq!(fs::read_dir(temp.path()).expect("read dir").count(), 2);
}

#[test]
fn failure_in_multi_discards_completed_baseline() {
    let gateway = ScriptedGateway::from_replies(vec![
        ScriptedReply::Text("Hello there friend".to_string()),
        ScriptedReply::Text("plan".to_string()),
        ScriptedReply::Fail {
            status: 503,
            body: "overloaded".to_string(),
        },
    ]);
    let orchestrator = Orchestrator::new(&gateway, "gpt-4o-deploy");

    let err = orchestrator
        .run(RunSelection::Both, "t", 2)
        .expect_err("executor failure aborts");

    assert!(format!("{err:#}").contains("503"));
    assert_eq!(gateway.calls().len(), 3);
}

#[test]
fn schema_rejects_unknown_role() {
    let temp = tempfile::tempdir().expect("tempdir");
    let gateway = ScriptedGateway::new(["Hello there friend"]);
    let result = Orchestrator::new(&gateway, "m")
        .run_single("t")
        .expect("single run");
    let path = persist(temp.path(), "t", RunMode::Single, &result);

    let mut instance: Value =
        serde_json::from_str(&fs::read_to_string(&path).expect("read")).expect("parse");
    instance["agent_messages"][0]["role"] = Value::from("user");

    let schema: Value =
        serde_json::from_str(&fs::read_to_string(schema_path()).expect("read schema"))
            .expect("parse schema");
    let compiled = jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(&schema)
        .expect("compile schema");
    assert!(!compiled.is_valid(&instance));
}
