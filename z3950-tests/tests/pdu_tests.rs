use z3950_dissector::router::dissect_z3950;
use z3950_tests::{concat, tlv, SEARCH_REQUEST};
use z3950_transcoder::{context::DecoderOptions, value::Node};

/// Identifier octets of a constructed tag `id` in `class`.
fn identifier(class: u8, id: u8) -> Vec<u8> {
    match id {
        id if id < 31 => vec![class | 0x20 | id],
        id => vec![class | 0x3F, id],
    }
}

fn int(identifier: &[u8], value: u8) -> Vec<u8> {
    tlv(identifier, &[value])
}

/// The required members of every PDU, with its tag and name.
fn minimal_pdus() -> Vec<(u8, &'static str, Vec<u8>)> {
    let init = concat(&[
        vec![0x83, 0x01, 0x00],
        vec![0x84, 0x01, 0x00],
        tlv(&[0x85], &[0x10, 0x00]),
        tlv(&[0x86], &[0x10, 0x00]),
    ]);
    let database_names = tlv(&[0xA3], &tlv(&[0x9F, 0x69], b"Default"));
    let attributes_plus_term = tlv(
        &[0xBF, 0x66],
        &concat(&[tlv(&[0xBF, 0x2C], &[]), tlv(&[0x9F, 0x2D], b"dog")]),
    );
    vec![
        (20, "initRequest", init.clone()),
        (21, "initResponse", concat(&[init, int(&[0x8C], 0xFF)])),
        (22, "searchRequest", SEARCH_REQUEST[2..].to_vec()),
        (
            23,
            "searchResponse",
            concat(&[int(&[0x97], 0), int(&[0x98], 0), int(&[0x99], 1), int(&[0x96], 0xFF)]),
        ),
        (
            24,
            "presentRequest",
            concat(&[tlv(&[0x9F, 0x1F], b"default"), int(&[0x9E], 1), int(&[0x9D], 1)]),
        ),
        (
            25,
            "presentResponse",
            concat(&[int(&[0x98], 0), int(&[0x99], 1), int(&[0x9B], 0)]),
        ),
        (26, "deleteResultSetRequest", int(&[0x9F, 0x20], 1)),
        (27, "deleteResultSetResponse", int(&[0x80], 0)),
        (28, "accessControlRequest", tlv(&[0x9F, 0x25], b"ok")),
        (29, "accessControlResponse", Vec::new()),
        (30, "resourceControlRequest", int(&[0x9F, 0x2A], 0)),
        (31, "resourceControlResponse", int(&[0x9F, 0x2C], 0xFF)),
        (32, "triggerResourceControlRequest", int(&[0x9F, 0x2E], 3)),
        (33, "resourceReportRequest", Vec::new()),
        (34, "resourceReportResponse", int(&[0x9F, 0x32], 0)),
        (
            35,
            "scanRequest",
            concat(&[database_names, attributes_plus_term, int(&[0x86], 20)]),
        ),
        (36, "scanResponse", concat(&[int(&[0x84], 0), int(&[0x85], 0)])),
        (
            43,
            "sortRequest",
            concat(&[
                tlv(&[0xA3], &tlv(&[0x1B], b"default")),
                tlv(&[0x84], b"sorted"),
                tlv(&[0xA5], &[]),
            ]),
        ),
        (44, "sortResponse", int(&[0x83], 0)),
        (45, "segmentRequest", concat(&[int(&[0x98], 0), tlv(&[0xA0], &[])])),
        (
            46,
            "extendedServicesRequest",
            concat(&[
                int(&[0x83], 1),
                tlv(&[0x84], &[0x2A, 0x03, 0x04]),
                int(&[0x8B], 1),
            ]),
        ),
        (47, "extendedServicesResponse", int(&[0x83], 1)),
        (48, "close", int(&[0x9F, 0x81, 0x53], 0)),
    ]
}

#[test]
fn decodes_every_pdu_alternative() {
    let pdus = minimal_pdus();
    assert_eq!(pdus.len(), 23);
    for (id, name, body) in pdus {
        for class in [0x80, 0x40] {
            let message = tlv(&identifier(class, id), &body);
            let node = dissect_z3950(&message, DecoderOptions::default())
                .unwrap_or_else(|e| panic!("{name} with class {class:#x}: {e}"));
            assert_eq!(node.name, "PDU");
            assert_eq!(node.chosen(), Some(name));
            assert_eq!(node.span, 0..message.len());
            assert!(node.all_diagnostics().is_empty(), "{name}: {:?}", node.all_diagnostics());
        }
    }
}

#[test]
fn names_the_fields_of_minimal_pdus() {
    let message = tlv(&identifier(0x80, 46), &minimal_pdus()[20].2);
    let node = dissect_z3950(&message, DecoderOptions::default()).unwrap();
    assert_eq!(
        node.get("extendedServicesRequest.function").and_then(|f| f.display.as_deref()),
        Some("create")
    );
    assert_eq!(node.get("waitAction").and_then(Node::as_integer), Some(1));
}
