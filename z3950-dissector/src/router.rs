//! Selects the top-level PDU of a complete message.
use z3950_grammar::{z3950::PDU, ASN1Type, AsnTag, TagClass, Tagging};
use z3950_transcoder::{
    ber::{header::identifier, Ber},
    context::DecoderOptions,
    error::{DecodingError, DecodingErrorType},
    value::{Node, Value},
};

use crate::{mpdu::mpdu_node, profile::Z3950Profile};

/// Decodes one Z39.50 APDU.
///
/// The outer tag selects the PDU. Context-specific tags are the
/// alternatives of the `PDU` CHOICE. Application tags with the same
/// numbers are accepted as well and decoded as the same alternative.
pub fn dissect_z3950(message: &[u8], options: DecoderOptions) -> Result<Node, DecodingError> {
    if message.is_empty() {
        return Err(DecodingError::new("empty message", DecodingErrorType::OutOfBounds));
    }
    let (_, (tag, _)) = identifier(message).map_err(|_| {
        DecodingError::new("unterminated or oversized tag number", DecodingErrorType::MalformedTag)
    })?;
    match tag.tag_class {
        TagClass::Application => dissect_application(message, tag, options),
        _ => {
            log::debug!("routing Z39.50 APDU {tag}");
            Ber::decode_with(&PDU, message, options, &Z3950Profile)
        }
    }
}

fn dissect_application(
    message: &[u8],
    tag: AsnTag,
    options: DecoderOptions,
) -> Result<Node, DecodingError> {
    let option = match PDU.r#type {
        ASN1Type::Choice(pdu) => pdu
            .options
            .iter()
            .find(|option| option.tag.tag().map(|t| t.id) == Some(tag.id)),
        _ => None,
    };
    let Some(option) = option else {
        return Err(DecodingError::new(
            &format!("{tag} selects no PDU"),
            DecodingErrorType::UnknownChoiceAlternative,
        ));
    };
    log::debug!("routing Z39.50 APDU {tag} as {}", option.name);
    Ber::decode_component(
        option.name,
        Tagging::Implicit(AsnTag::application(tag.id)),
        option.r#type,
        message,
        options,
        &Z3950Profile,
    )
    .map(pdu_node)
    .map_err(|mut e| {
        e.partial = e.partial.take().map(|partial| Box::new(pdu_node(*partial)));
        e
    })
}

fn pdu_node(chosen: Node) -> Node {
    Node::new(PDU.name, chosen.span.clone(), Value::Choice(Box::new(chosen)))
}

/// Decodes one PDC MPDU. `origin` is the absolute offset of `message`.
pub fn dissect_pdc(message: &[u8], origin: usize) -> Result<Node, pdc::PdcError> {
    let mpdu = pdc::dissect(message, origin)?;
    Ok(mpdu_node(&mpdu, message, origin))
}
