//! Message builders shared by the integration tests and benches.

/// One TLV with a definite length in the shortest form.
pub fn tlv(identifier: &[u8], content: &[u8]) -> Vec<u8> {
    let mut encoding = identifier.to_vec();
    match content.len() {
        n if n < 0x80 => encoding.push(n as u8),
        n => {
            let octets: Vec<u8> = n
                .to_be_bytes()
                .into_iter()
                .skip_while(|b| *b == 0)
                .collect();
            encoding.push(0x80 | octets.len() as u8);
            encoding.extend(octets);
        }
    }
    encoding.extend_from_slice(content);
    encoding
}

pub fn concat(parts: &[Vec<u8>]) -> Vec<u8> {
    parts.concat()
}

/// A SearchRequest for the title "dog" in the bib-1 attribute set.
pub const SEARCH_REQUEST: [u8; 73] = [
    0xB6, 0x47, 0x8D, 0x01, 0x00, 0x8E, 0x01, 0x01, 0x8F, 0x01, 0x00, 0x90, 0x01, 0xFF, 0x91,
    0x07, b'd', b'e', b'f', b'a', b'u', b'l', b't', 0xB2, 0x0A, 0x9F, 0x69, 0x07, b'D', b'e',
    b'f', b'a', b'u', b'l', b't', 0xB5, 0x24, 0xA1, 0x22, 0x06, 0x07, 0x2A, 0x86, 0x48, 0xCE,
    0x13, 0x03, 0x01, 0xA0, 0x17, 0xBF, 0x66, 0x14, 0xBF, 0x2C, 0x0A, 0x30, 0x08, 0x9F, 0x78,
    0x01, 0x01, 0x9F, 0x79, 0x01, 0x04, 0x9F, 0x81, 0x58, 0x03, b'd', b'o', b'g',
];

pub const BIB_1: [u8; 9] = [0x06, 0x07, 0x2A, 0x86, 0x48, 0xCE, 0x13, 0x03, 0x01];
pub const USMARC: [u8; 9] = [0x06, 0x07, 0x2A, 0x86, 0x48, 0xCE, 0x13, 0x05, 0x0A];
pub const GRS_1: [u8; 9] = [0x06, 0x07, 0x2A, 0x86, 0x48, 0xCE, 0x13, 0x05, 0x69];

/// `op: resultSet` operand naming `name`.
pub fn result_set_operand(name: &str) -> Vec<u8> {
    tlv(&[0xA0], &tlv(&[0x9F, 0x1F], name.as_bytes()))
}

/// `rpnRpnOp { rpn1, rpn2, op }` with `operator` 0 (and) to 2 (and-not).
pub fn rpn_rpn_op(rpn1: &[u8], rpn2: &[u8], operator: u8) -> Vec<u8> {
    let op = tlv(&[0xBF, 0x2E], &[0x80 | operator, 0x00]);
    tlv(&[0xA1], &[rpn1, rpn2, &op[..]].concat())
}

/// A type-1 SearchRequest around `rpn`.
pub fn search_request(rpn: &[u8]) -> Vec<u8> {
    let query = tlv(&[0xB5], &tlv(&[0xA1], &[&BIB_1[..], rpn].concat()));
    let content = concat(&[
        vec![0x8D, 0x01, 0x00, 0x8E, 0x01, 0x01, 0x8F, 0x01, 0x00, 0x90, 0x01, 0xFF],
        tlv(&[0x91], b"default"),
        tlv(&[0xB2], &tlv(&[0x9F, 0x69], b"Default")),
        query,
    ]);
    tlv(&[0xB6], &content)
}

/// `levels` indefinite `rpnRpnOp`s, each opening as the `rpn1` of
/// the one before. Nothing but the nesting is ever encoded.
pub fn nested_rpn_operators(levels: usize) -> Vec<u8> {
    let mut encoding = Vec::with_capacity(levels * 4);
    for _ in 0..levels {
        encoding.extend([0xA1, 0x80]);
    }
    for _ in 0..levels {
        encoding.extend([0x00, 0x00]);
    }
    encoding
}

/// A MARC21 record with a 4-5 directory built from `(tag, content)`
/// pairs. Content includes its field terminator.
pub fn marc_record(fields: &[(&str, &[u8])]) -> Vec<u8> {
    let mut directory: Vec<u8> = Vec::new();
    let mut data: Vec<u8> = Vec::new();
    for (tag, content) in fields {
        directory.extend(format!("{tag}{:04}{:05}", content.len(), data.len()).bytes());
        data.extend_from_slice(content);
    }
    directory.push(marc21::FIELD_TERMINATOR);
    let base = marc21::LEADER_LENGTH + directory.len();
    let length = base + data.len() + 1;
    let mut record = format!("{length:05}nam a22{base:05} a 4500").into_bytes();
    record.extend(directory);
    record.extend(data);
    record.push(marc21::RECORD_TERMINATOR);
    record
}

pub fn sample_marc_record() -> Vec<u8> {
    marc_record(&[
        ("001", b"ocm123\x1e"),
        ("245", b"10\x1faThe dog\x1fcby Someone\x1e"),
        ("650", b" 0\x1faDogs\x1e"),
    ])
}

/// A NamePlusRecord whose retrievalRecord is an EXTERNAL with
/// `direct_reference` and `encoding`.
pub fn name_plus_record(direct_reference: &[u8], encoding: &[u8]) -> Vec<u8> {
    let external = tlv(&[0x28], &[direct_reference, encoding].concat());
    let record = tlv(&[0xA1], &tlv(&[0xA1], &external));
    tlv(&[0x30], &[tlv(&[0x80], b"Default"), record].concat())
}

/// A successful PresentResponse returning `records`.
pub fn present_response(records: &[Vec<u8>]) -> Vec<u8> {
    let content = concat(&[
        vec![0x98, 0x01, records.len() as u8],
        vec![0x99, 0x01, records.len() as u8 + 1],
        vec![0x9B, 0x01, 0x00],
        tlv(&[0xBC], &records.concat()),
    ]);
    tlv(&[0xB9], &content)
}

/// A PresentResponse carrying MARC21 `records` octet-aligned.
pub fn marc_present_response(records: &[Vec<u8>]) -> Vec<u8> {
    let encoding = tlv(&[0x81], &records.concat());
    present_response(&[name_plus_record(&USMARC, &encoding)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_long_form_lengths() {
        let encoding = tlv(&[0x04], &[0; 300]);
        assert_eq!(&encoding[..4], &[0x04, 0x82, 0x01, 0x2C]);
        assert_eq!(encoding.len(), 304);
    }

    #[test]
    fn rebuilds_the_sample_search_request() {
        let term = tlv(&[0x9F, 0x81, 0x58], b"dog");
        let attributes = tlv(&[0xBF, 0x2C], &tlv(&[0x30], &[0x9F, 0x78, 0x01, 0x01, 0x9F, 0x79, 0x01, 0x04]));
        let operand = tlv(&[0xA0], &tlv(&[0xBF, 0x66], &[attributes, term].concat()));
        assert_eq!(search_request(&operand), SEARCH_REQUEST.to_vec());
    }
}
