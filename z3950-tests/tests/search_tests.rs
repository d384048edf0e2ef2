use z3950_dissector::{
    config::{DissectorConfig, Protocol},
    Dissector, DissectError,
};
use z3950_tests::{nested_rpn_operators, result_set_operand, rpn_rpn_op, search_request, SEARCH_REQUEST};
use z3950_transcoder::{context::DecoderOptions, error::DecodingErrorType, value::Node};

fn dissect(message: &[u8]) -> Node {
    Dissector::default().dissect(Protocol::Z3950, message).unwrap()
}

#[test]
fn decodes_a_minimal_search_request() {
    let pdu = dissect(&SEARCH_REQUEST);
    let request = pdu.get("searchRequest").unwrap();
    assert!(request.get("referenceId").is_none());
    assert_eq!(request.get("smallSetUpperBound").and_then(Node::as_integer), Some(0));
    assert_eq!(request.get("largeSetLowerBound").and_then(Node::as_integer), Some(1));
    assert_eq!(request.get("resultSetName").and_then(Node::as_str), Some("default"));
    assert_eq!(request.get("databaseNames.0").and_then(Node::as_str), Some("Default"));
    assert_eq!(
        request.get("query.rpn.op.attrTerm.term").and_then(Node::as_str),
        Some("dog")
    );
    let attribute_set = request.get("query.attributeSet").unwrap();
    assert_eq!(attribute_set.as_oid().map(|oid| oid.to_string()).as_deref(), Some("1.2.840.10003.3.1"));
    assert_eq!(attribute_set.display.as_deref(), Some("bib-1"));

    let element = request.get("query.rpn.op.attrTerm.attributes.0").unwrap();
    let attribute_type = element.get("attributeType").unwrap();
    assert_eq!(attribute_type.as_integer(), Some(1));
    assert_eq!(attribute_type.display.as_deref(), Some("Use"));
    let attribute_value = element.get("attributeValue.numeric").unwrap();
    assert_eq!(attribute_value.as_integer(), Some(4));
    assert_eq!(attribute_value.display.as_deref(), Some("Title"));
}

#[test]
fn keeps_the_byte_range_of_every_leaf() {
    let pdu = dissect(&SEARCH_REQUEST);
    assert_eq!(pdu.span, 0..SEARCH_REQUEST.len());
    let term = pdu.get("searchRequest.query.rpn.op.attrTerm.term").unwrap();
    assert_eq!(&SEARCH_REQUEST[term.span.clone()], &[0x9F, 0x81, 0x58, 0x03, b'd', b'o', b'g']);
    for record in pdu.flatten() {
        assert!(record.span.start <= record.span.end, "{}", record.path);
        assert!(record.span.end <= SEARCH_REQUEST.len(), "{}", record.path);
    }
    assert!(pdu
        .flatten()
        .iter()
        .any(|record| record.path.ends_with("attributes.0.attributeType")));
}

#[test]
fn decodes_recursive_rpn_structures() {
    let inner = rpn_rpn_op(&result_set_operand("B"), &result_set_operand("C"), 1);
    let outer = rpn_rpn_op(&result_set_operand("A"), &inner, 0);
    let pdu = dissect(&search_request(&outer));
    let rpn = pdu.get("searchRequest.query.rpn").unwrap();
    assert_eq!(rpn.chosen(), Some("rpnRpnOp"));
    assert_eq!(rpn.get("rpnRpnOp.op").and_then(Node::chosen), Some("and"));
    assert_eq!(rpn.get("rpnRpnOp.rpn1.op.resultSet").and_then(Node::as_str), Some("A"));
    let nested = rpn.get("rpnRpnOp.rpn2.rpnRpnOp").unwrap();
    assert_eq!(nested.get("op").and_then(Node::chosen), Some("or"));
    assert_eq!(nested.get("rpn1.op.resultSet").and_then(Node::as_str), Some("B"));
    assert_eq!(nested.get("rpn2.op.resultSet").and_then(Node::as_str), Some("C"));
}

#[test]
fn rejects_decode_bombs_with_a_depth_error() {
    let bomb = search_request(&nested_rpn_operators(10_000));
    let error = Dissector::default()
        .dissect(Protocol::Z3950, &bomb)
        .unwrap_err();
    let DissectError::Ber(error) = error else {
        panic!("expected a BER error")
    };
    assert_eq!(error.kind, DecodingErrorType::DepthLimitExceeded);
}

#[test]
fn honours_configured_limits() {
    let dissector = Dissector::new(
        DissectorConfig::default().decoder(DecoderOptions::default().max_nodes(8)),
    );
    let Err(DissectError::Ber(error)) = dissector.dissect(Protocol::Z3950, &SEARCH_REQUEST) else {
        panic!("expected the node budget to run out")
    };
    assert_eq!(error.kind, DecodingErrorType::NodeLimitExceeded);
    let partial = error.partial.expect("partial tree");
    assert_eq!(partial.name, "PDU");
}

#[test]
fn reassembles_segmented_requests() {
    let dissector = Dissector::default();
    let mut framer = dissector.framer(Protocol::Z3950);
    let (first, second) = SEARCH_REQUEST.split_at(30);
    assert!(dissector.dissect_segment(&mut framer, 210, first).is_empty());
    let results = dissector.dissect_segment(&mut framer, 210, second);
    assert_eq!(results.len(), 1);
    let pdu = results[0].as_ref().unwrap();
    assert_eq!(pdu.chosen(), Some("searchRequest"));
}
