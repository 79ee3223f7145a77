//! BPMN 2.0 XML scanning
//!
//! Reduces a diagram document to the two flat lists the graph needs:
//! flow-node ids and (sourceRef, targetRef) pairs from `sequenceFlow`
//! elements, both in document order. No semantic validation is done;
//! gateway/event/task distinctions are irrelevant to path search.

use quick_xml::events::BytesStart;
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Serialize;

use crate::error::{FlowpathError, Result};

/// Element local names that declare flow nodes (BPMN 2.0 `flowNode`
/// substitution group members that carry sequence flows).
const FLOW_NODE_ELEMENTS: &[&str] = &[
    "startEvent",
    "endEvent",
    "intermediateCatchEvent",
    "intermediateThrowEvent",
    "boundaryEvent",
    "task",
    "userTask",
    "serviceTask",
    "scriptTask",
    "sendTask",
    "receiveTask",
    "manualTask",
    "businessRuleTask",
    "callActivity",
    "subProcess",
    "adHocSubProcess",
    "transaction",
    "exclusiveGateway",
    "parallelGateway",
    "inclusiveGateway",
    "complexGateway",
    "eventBasedGateway",
];

/// One directed sequence flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub source: String,
    pub target: String,
}

/// Flat node/flow lists scanned from a diagram, in document order
#[derive(Debug, Clone, Default)]
pub struct Diagram {
    pub nodes: Vec<String>,
    pub flows: Vec<Flow>,
}

/// Scan BPMN XML into a [`Diagram`].
///
/// Namespace-prefix agnostic: elements are matched by local name, so
/// `<bpmn:userTask>` and `<userTask>` are equivalent. A document that
/// declares no flow nodes at all is rejected as invalid rather than
/// treated as an empty diagram.
pub fn parse_diagram(xml: &str) -> Result<Diagram> {
    let mut reader = Reader::from_str(xml);
    let mut diagram = Diagram::default();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => scan_element(&e, &mut diagram)?,
            Ok(Event::Eof) => break,
            Err(e) => return Err(FlowpathError::invalid_diagram(e)),
            Ok(_) => {}
        }
    }

    if diagram.nodes.is_empty() {
        return Err(FlowpathError::invalid_diagram(
            "document declares no flow nodes",
        ));
    }

    Ok(diagram)
}

fn scan_element(e: &BytesStart<'_>, diagram: &mut Diagram) -> Result<()> {
    let local = e.local_name();
    let local = std::str::from_utf8(local.as_ref())
        .map_err(|err| FlowpathError::invalid_diagram(err))?;

    if local == "sequenceFlow" {
        let id = attr_value(e, "id")?;
        let source = attr_value(e, "sourceRef")?.ok_or_else(|| {
            FlowpathError::invalid_diagram("sequenceFlow is missing sourceRef")
        })?;
        let target = attr_value(e, "targetRef")?.ok_or_else(|| {
            FlowpathError::invalid_diagram("sequenceFlow is missing targetRef")
        })?;
        diagram.flows.push(Flow { id, source, target });
    } else if FLOW_NODE_ELEMENTS.contains(&local) {
        // An id-less flow node cannot participate in flows; skip it
        if let Some(id) = attr_value(e, "id")? {
            diagram.nodes.push(id);
        }
    }

    Ok(())
}

fn attr_value(e: &BytesStart<'_>, name: &str) -> Result<Option<String>> {
    match e.try_get_attribute(name) {
        Ok(Some(attr)) => {
            let value = attr
                .unescape_value()
                .map_err(|err| FlowpathError::invalid_diagram(err))?;
            Ok(Some(value.into_owned()))
        }
        Ok(None) => Ok(None),
        Err(err) => Err(FlowpathError::invalid_diagram(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<bpmn:definitions xmlns:bpmn="http://www.omg.org/spec/BPMN/20100524/MODEL">
  <bpmn:process id="invoice" isExecutable="true">
    <bpmn:startEvent id="StartEvent_1" name="Invoice received"/>
    <bpmn:userTask id="approveInvoice" name="Approve Invoice"/>
    <bpmn:exclusiveGateway id="invoice_approved" name="Invoice approved?"/>
    <bpmn:endEvent id="invoiceProcessed" name="Invoice processed"/>
    <bpmn:sequenceFlow id="flow1" sourceRef="StartEvent_1" targetRef="approveInvoice"/>
    <bpmn:sequenceFlow id="flow2" sourceRef="approveInvoice" targetRef="invoice_approved"/>
    <bpmn:sequenceFlow id="flow3" sourceRef="invoice_approved" targetRef="invoiceProcessed"/>
  </bpmn:process>
</bpmn:definitions>"#;

    #[test]
    fn test_parse_sample_document_order() {
        let diagram = parse_diagram(SAMPLE).unwrap();
        assert_eq!(
            diagram.nodes,
            vec![
                "StartEvent_1",
                "approveInvoice",
                "invoice_approved",
                "invoiceProcessed"
            ]
        );
        assert_eq!(diagram.flows.len(), 3);
        assert_eq!(diagram.flows[0].source, "StartEvent_1");
        assert_eq!(diagram.flows[0].target, "approveInvoice");
        assert_eq!(diagram.flows[2].id.as_deref(), Some("flow3"));
    }

    #[test]
    fn test_unprefixed_elements_accepted() {
        let xml = r#"<definitions><process id="p">
            <startEvent id="s"/>
            <endEvent id="e"/>
            <sequenceFlow sourceRef="s" targetRef="e"/>
        </process></definitions>"#;
        let diagram = parse_diagram(xml).unwrap();
        assert_eq!(diagram.nodes, vec!["s", "e"]);
        assert_eq!(diagram.flows.len(), 1);
        assert_eq!(diagram.flows[0].id, None);
    }

    #[test]
    fn test_non_flow_elements_ignored() {
        let xml = r#"<definitions><process id="p">
            <startEvent id="s"/>
            <laneSet id="lanes"><lane id="lane1"/></laneSet>
            <dataObject id="data1"/>
        </process></definitions>"#;
        let diagram = parse_diagram(xml).unwrap();
        assert_eq!(diagram.nodes, vec!["s"]);
        assert!(diagram.flows.is_empty());
    }

    #[test]
    fn test_flow_missing_source_ref_rejected() {
        let xml = r#"<definitions><process id="p">
            <startEvent id="s"/>
            <sequenceFlow targetRef="s"/>
        </process></definitions>"#;
        assert!(matches!(
            parse_diagram(xml),
            Err(FlowpathError::InvalidDiagram { .. })
        ));
    }

    #[test]
    fn test_document_without_flow_nodes_rejected() {
        assert!(matches!(
            parse_diagram("<definitions/>"),
            Err(FlowpathError::InvalidDiagram { .. })
        ));
        assert!(matches!(
            parse_diagram("not xml at all"),
            Err(FlowpathError::InvalidDiagram { .. })
        ));
    }

    #[test]
    fn test_nested_subprocess_nodes_collected() {
        let xml = r#"<definitions><process id="p">
            <startEvent id="s"/>
            <subProcess id="sub">
              <task id="inner"/>
            </subProcess>
        </process></definitions>"#;
        let diagram = parse_diagram(xml).unwrap();
        assert_eq!(diagram.nodes, vec!["s", "sub", "inner"]);
    }
}
