use z3950_dissector::{
    config::{DissectorConfig, Protocol},
    Dissector,
};
use z3950_transcoder::value::{DiagnosticKind, Node};

const SIMPDU: [u8; 11] = [9, 1, 5, 1, 0x00, 0x00, 0x00, 0x01, 2, 1, 2];

fn dissector() -> Dissector {
    Dissector::new(DissectorConfig::default().pdc_ports([6010]))
}

#[test]
fn decodes_a_start_initialise_mpdu() {
    let node = dissector().dissect(Protocol::Pdc, &SIMPDU).unwrap();
    assert_eq!(node.name, "SIMPDU");
    assert_eq!(node.get("credit").and_then(Node::as_integer), Some(5));
    let state = node.get("state").unwrap();
    assert_eq!(state.as_integer(), Some(1));
    assert_eq!(state.display.as_deref(), Some("Operational"));
    assert_eq!(node.get("yr_admu_nr").and_then(Node::as_integer), Some(1));
    let parameters = node.get("parameters").unwrap().children();
    assert_eq!(parameters.len(), 1);
    assert_eq!(parameters[0].name, "Version Number");
    assert_eq!(parameters[0].as_integer(), Some(2));
    assert!(node.all_diagnostics().is_empty());
}

#[test]
fn frames_back_to_back_mpdus() {
    let dissector = dissector();
    let mut framer = dissector.framer(Protocol::Pdc);
    let acknowledge: [u8; 5] = [3, 8, 4, 0x00, 0x07];
    let stream = [&SIMPDU[..], &acknowledge[..]].concat();
    let (first, second) = stream.split_at(7);
    assert!(dissector.dissect_segment(&mut framer, 6010, first).is_empty());
    let results = dissector.dissect_segment(&mut framer, 6010, second);
    assert_eq!(results.len(), 2);
    let acknowledge = results[1].as_ref().unwrap();
    assert_eq!(acknowledge.name, "AKMPDU");
    assert_eq!(acknowledge.get("seq_nr").and_then(Node::as_integer), Some(7));
}

#[test]
fn reports_unknown_mpdu_codes() {
    let node = dissector().dissect(Protocol::Pdc, &[2, 7, 0, 0]).unwrap();
    assert_eq!(node.name, "PDC");
    assert_eq!(node.children().len(), 2);
    let diagnostics = node.all_diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::InvalidValue);
}

#[test]
fn flags_octets_the_layout_leaves_over() {
    // DRMPDU with a dangling parameter type octet
    let node = dissector()
        .dissect(Protocol::Pdc, &[6, 3, 0, 0, 0, 9, 2, 4])
        .unwrap();
    assert_eq!(node.get("reason").and_then(|r| r.display.as_deref()), Some("Protocol Error"));
    assert!(!node.all_diagnostics().is_empty());
}
