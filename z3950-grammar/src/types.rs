use crate::{Tagging, ToplevelDeclaration};

/// A named number or a named bit, `name(value)`.
pub type DistinguishedValue = (i64, &'static str);

/// Representation of an ASN1 INTEGER data element
/// with its distinguished values
#[derive(Debug, Clone, Copy)]
pub struct AsnInteger {
    pub distinguished_values: Option<&'static [DistinguishedValue]>,
}

impl AsnInteger {
    pub const PLAIN: AsnInteger = AsnInteger {
        distinguished_values: None,
    };

    pub const fn named(values: &'static [DistinguishedValue]) -> Self {
        AsnInteger {
            distinguished_values: Some(values),
        }
    }
}

/// Representation of an ASN1 BIT STRING data element
/// with the distinguished values defining the individual bits
#[derive(Debug, Clone, Copy)]
pub struct AsnBitString {
    pub distinguished_values: Option<&'static [DistinguishedValue]>,
}

/// Representation of an ASN1 SEQUENCE or SET data element
#[derive(Debug, Clone, Copy)]
pub struct AsnSequence {
    pub members: &'static [SequenceMember],
}

/// Representation of an single ASN1 SEQUENCE member
#[derive(Debug, Clone, Copy)]
pub struct SequenceMember {
    pub name: &'static str,
    pub tag: Tagging,
    pub r#type: &'static ToplevelDeclaration,
    pub is_optional: bool,
}

/// `name [tag] Type`
pub const fn required(
    name: &'static str,
    tag: Tagging,
    r#type: &'static ToplevelDeclaration,
) -> SequenceMember {
    SequenceMember {
        name,
        tag,
        r#type,
        is_optional: false,
    }
}

/// `name [tag] Type OPTIONAL`
pub const fn optional(
    name: &'static str,
    tag: Tagging,
    r#type: &'static ToplevelDeclaration,
) -> SequenceMember {
    SequenceMember {
        name,
        tag,
        r#type,
        is_optional: true,
    }
}

/// Representation of an ASN1 CHOICE data element
#[derive(Debug, Clone, Copy)]
pub struct AsnChoice {
    pub options: &'static [ChoiceOption],
}

impl AsnChoice {
    pub fn option_for(&self, tag: &crate::AsnTag) -> Option<&'static ChoiceOption> {
        self.options
            .iter()
            .find(|o| crate::component_accepts(o.tag, o.r#type, tag))
    }
}

/// Representation of an single ASN1 CHOICE alternative
#[derive(Debug, Clone, Copy)]
pub struct ChoiceOption {
    pub name: &'static str,
    pub tag: Tagging,
    pub r#type: &'static ToplevelDeclaration,
}

/// `name [tag] Type` inside a CHOICE
pub const fn alternative(
    name: &'static str,
    tag: Tagging,
    r#type: &'static ToplevelDeclaration,
) -> ChoiceOption {
    ChoiceOption { name, tag, r#type }
}

/// Looks up the name of a distinguished value.
pub fn distinguished_name(
    values: &'static [DistinguishedValue],
    value: i64,
) -> Option<&'static str> {
    values
        .iter()
        .find_map(|(v, name)| (*v == value).then_some(*name))
}
