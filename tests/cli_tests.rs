use assert_cmd::{cargo::cargo_bin_cmd, Command};
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn flowpath() -> Command {
    cargo_bin_cmd!("flowpath")
}

const INVOICE_DIAGRAM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<bpmn:definitions xmlns:bpmn="http://www.omg.org/spec/BPMN/20100524/MODEL">
  <bpmn:process id="invoice" isExecutable="true">
    <bpmn:startEvent id="StartEvent_1" name="Invoice received"/>
    <bpmn:userTask id="approveInvoice" name="Approve Invoice"/>
    <bpmn:exclusiveGateway id="invoice_approved" name="Invoice approved?"/>
    <bpmn:userTask id="reviewInvoice" name="Review Invoice"/>
    <bpmn:endEvent id="invoiceProcessed" name="Invoice processed"/>
    <bpmn:sequenceFlow id="flow1" sourceRef="StartEvent_1" targetRef="approveInvoice"/>
    <bpmn:sequenceFlow id="flow2" sourceRef="approveInvoice" targetRef="invoice_approved"/>
    <bpmn:sequenceFlow id="flow3" sourceRef="invoice_approved" targetRef="invoiceProcessed"/>
    <bpmn:sequenceFlow id="flow4" sourceRef="invoice_approved" targetRef="reviewInvoice"/>
    <bpmn:sequenceFlow id="flow5" sourceRef="reviewInvoice" targetRef="approveInvoice"/>
  </bpmn:process>
</bpmn:definitions>"#;

fn write_diagram(dir: &Path) -> PathBuf {
    write_named_diagram(dir, INVOICE_DIAGRAM)
}

fn write_named_diagram(dir: &Path, xml: &str) -> PathBuf {
    let path = dir.join("diagram.bpmn");
    fs::write(&path, xml).unwrap();
    path
}

// ============================================================================
// Path command tests
// ============================================================================

#[test]
fn test_path_basic() {
    let dir = tempdir().unwrap();
    let diagram = write_diagram(dir.path());

    flowpath()
        .arg("--input")
        .arg(&diagram)
        .args(["path", "StartEvent_1", "invoiceProcessed"])
        .assert()
        .success()
        .stdout("StartEvent_1 -> approveInvoice -> invoice_approved -> invoiceProcessed\n");
}

#[test]
fn test_path_to_self() {
    let dir = tempdir().unwrap();
    let diagram = write_diagram(dir.path());

    flowpath()
        .arg("--input")
        .arg(&diagram)
        .args(["path", "approveInvoice", "approveInvoice"])
        .assert()
        .success()
        .stdout("approveInvoice\n");
}

#[test]
fn test_path_through_cycle_terminates() {
    let dir = tempdir().unwrap();
    let diagram = write_diagram(dir.path());

    // reviewInvoice -> approveInvoice -> invoice_approved closes a cycle;
    // the search must still terminate and find the end event
    flowpath()
        .arg("--input")
        .arg(&diagram)
        .args(["path", "reviewInvoice", "invoiceProcessed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("invoiceProcessed"));
}

#[test]
fn test_path_json_format() {
    let dir = tempdir().unwrap();
    let diagram = write_diagram(dir.path());

    let output = flowpath()
        .arg("--input")
        .arg(&diagram)
        .args(["--format", "json", "path", "StartEvent_1", "invoiceProcessed"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["from"], "StartEvent_1");
    assert_eq!(json["to"], "invoiceProcessed");
    assert_eq!(json["found"], true);
    assert_eq!(json["path_length"], 3);
    assert_eq!(json["nodes"][0], "StartEvent_1");
    assert_eq!(json["nodes"][3], "invoiceProcessed");
}

#[test]
fn test_path_not_found_is_not_an_error() {
    let dir = tempdir().unwrap();
    let diagram = write_diagram(dir.path());

    // Nothing flows back into the start event
    flowpath()
        .arg("--input")
        .arg(&diagram)
        .args(["path", "invoiceProcessed", "StartEvent_1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No path found"));
}

#[test]
fn test_path_not_found_json() {
    let dir = tempdir().unwrap();
    let diagram = write_diagram(dir.path());

    let output = flowpath()
        .arg("--input")
        .arg(&diagram)
        .args(["--format", "json", "path", "invoiceProcessed", "StartEvent_1"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["found"], false);
    assert_eq!(json["nodes"], serde_json::json!([]));
}

#[test]
fn test_path_quiet_suppresses_not_found_message() {
    let dir = tempdir().unwrap();
    let diagram = write_diagram(dir.path());

    flowpath()
        .arg("--input")
        .arg(&diagram)
        .args(["--quiet", "path", "invoiceProcessed", "StartEvent_1"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_path_unknown_node_exits_with_data_error() {
    let dir = tempdir().unwrap();
    let diagram = write_diagram(dir.path());

    flowpath()
        .arg("--input")
        .arg(&diagram)
        .args(["path", "nope", "invoiceProcessed"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("nope"));
}

#[test]
fn test_path_unknown_node_json_error_envelope() {
    let dir = tempdir().unwrap();
    let diagram = write_diagram(dir.path());

    let output = flowpath()
        .arg("--input")
        .arg(&diagram)
        .args(["--format", "json", "path", "nope", "invoiceProcessed"])
        .assert()
        .code(3)
        .get_output()
        .stderr
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["code"], 3);
    assert_eq!(json["type"], "node_not_found");
}

#[test]
fn test_path_dangling_flow_reference() {
    let dir = tempdir().unwrap();
    let diagram = write_named_diagram(
        dir.path(),
        r#"<definitions><process id="p">
            <startEvent id="s"/>
            <endEvent id="e"/>
            <sequenceFlow sourceRef="s" targetRef="ghost"/>
        </process></definitions>"#,
    );

    flowpath()
        .arg("--input")
        .arg(&diagram)
        .args(["path", "s", "e"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("ghost"));
}

#[test]
fn test_path_invalid_diagram_file() {
    let dir = tempdir().unwrap();
    let diagram = write_named_diagram(dir.path(), "this is not BPMN");

    flowpath()
        .arg("--input")
        .arg(&diagram)
        .args(["path", "a", "b"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid BPMN diagram"));
}

#[test]
fn test_path_missing_input_file() {
    flowpath()
        .args(["--input", "/nonexistent/diagram.bpmn", "path", "a", "b"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error"));
}

// ============================================================================
// Nodes command tests
// ============================================================================

#[test]
fn test_nodes_lists_sorted_ids() {
    let dir = tempdir().unwrap();
    let diagram = write_diagram(dir.path());

    flowpath()
        .arg("--input")
        .arg(&diagram)
        .arg("nodes")
        .assert()
        .success()
        .stdout("StartEvent_1\napproveInvoice\ninvoiceProcessed\ninvoice_approved\nreviewInvoice\n");
}

#[test]
fn test_nodes_json_includes_flows() {
    let dir = tempdir().unwrap();
    let diagram = write_diagram(dir.path());

    let output = flowpath()
        .arg("--input")
        .arg(&diagram)
        .args(["--format", "json", "nodes"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["nodes"].as_array().unwrap().len(), 5);
    assert_eq!(json["flows"].as_array().unwrap().len(), 5);
    assert_eq!(json["flows"][0]["source"], "StartEvent_1");
    assert_eq!(json["flows"][0]["target"], "approveInvoice");
}

// ============================================================================
// Dump command tests
// ============================================================================

#[test]
fn test_dump_prints_raw_xml() {
    let dir = tempdir().unwrap();
    let diagram = write_diagram(dir.path());

    flowpath()
        .arg("--input")
        .arg(&diagram)
        .arg("dump")
        .assert()
        .success()
        .stdout(predicate::str::contains("bpmn:definitions"));
}

// ============================================================================
// Argument handling tests
// ============================================================================

#[test]
fn test_missing_arguments_is_usage_error() {
    flowpath().arg("path").assert().failure();
}

#[test]
fn test_usage_error_json_envelope() {
    let output = flowpath()
        .args(["--format", "json", "path"])
        .assert()
        .code(2)
        .get_output()
        .stderr
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["code"], 2);
    assert_eq!(json["type"], "usage_error");
}

#[test]
fn test_unknown_format_rejected() {
    flowpath()
        .args(["--format", "records", "nodes"])
        .assert()
        .failure();
}
