//! Presents decoded PDC MPDUs as value trees.
use pdc::{Mpdu, ParameterValue, HEADER_LENGTH};
use z3950_transcoder::value::{Node, Value};

/// `input` is the message the MPDU was dissected from and `origin`
/// its absolute offset.
pub fn mpdu_node(mpdu: &Mpdu, input: &[u8], origin: usize) -> Node {
    let mut components = vec![
        Node::new(
            "lengthIndicator",
            origin..origin + 1,
            Value::Integer(i64::from(mpdu.length_indicator)),
        ),
        Node::new(
            "mpduType",
            origin + 1..origin + HEADER_LENGTH,
            Value::Integer(i64::from(mpdu.code)),
        )
        .with_display(mpdu.kind.map(|kind| kind.name().to_string())),
    ];
    components.extend(mpdu.fields.iter().map(|field| {
        Node::new(field.name, field.span.clone(), Value::Integer(field.value as i64))
            .with_display(field.display.map(String::from))
    }));
    if !mpdu.parameters.is_empty() {
        let parameters = mpdu
            .parameters
            .iter()
            .map(|parameter| {
                let value = match &parameter.value {
                    ParameterValue::Number(n) => Value::Integer(*n as i64),
                    ParameterValue::Text(text) => Value::CharacterString(text.clone()),
                    ParameterValue::Raw(bytes) => Value::OctetString(bytes.clone()),
                };
                Node::new(parameter.name(), parameter.span.clone(), value)
            })
            .collect();
        components.push(Node::new(
            "parameters",
            parameters_span(mpdu),
            Value::SequenceOf(parameters),
        ));
    }
    if let Some(range) = &mpdu.user_data {
        let bytes = input
            .get(range.start - origin..range.end - origin)
            .unwrap_or_default()
            .to_vec();
        components.push(Node::new("userData", range.clone(), Value::OctetString(bytes)));
    }
    let name = mpdu.kind.map_or("PDC", |kind| kind.name());
    Node::new(name, mpdu.span.clone(), Value::Sequence(components))
        .with_diagnostics(mpdu.diagnostics.clone())
}

fn parameters_span(mpdu: &Mpdu) -> std::ops::Range<usize> {
    let start = mpdu.parameters.first().map_or(0, |p| p.span.start);
    let end = mpdu.parameters.last().map_or(0, |p| p.span.end);
    start..end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presents_the_fixed_and_variable_parts() {
        let input = [9, 1, 5, 1, 0, 0, 0, 1, 2, 1, 2];
        let mpdu = pdc::dissect(&input, 0).unwrap();
        let node = mpdu_node(&mpdu, &input, 0);
        assert_eq!(node.name, "SIMPDU");
        assert_eq!(node.get("credit").and_then(Node::as_integer), Some(5));
        let state = node.get("state").unwrap();
        assert_eq!(state.display.as_deref(), Some("Operational"));
        let version = node.get("parameters.0").unwrap();
        assert_eq!(version.name, "Version Number");
        assert_eq!(version.as_integer(), Some(2));
        assert_eq!(version.span, 8..11);
    }

    #[test]
    fn keeps_user_data_octets() {
        let input = [5, 4, 0x80, 0, 7, b'h', b'i'];
        let mpdu = pdc::dissect(&input, 100).unwrap();
        let node = mpdu_node(&mpdu, &input, 100);
        let data = node.get("userData").unwrap();
        assert_eq!(data.span, 105..107);
        assert_eq!(data.as_str(), Some("hi"));
        assert_eq!(node.get("eot").and_then(Node::as_integer), Some(1));
    }
}
