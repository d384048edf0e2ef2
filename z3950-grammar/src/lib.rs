//! The `z3950-grammar` crate describes the ASN1 type descriptors
//! that drive the BER decoding engine of `z3950-transcoder`.
//! It includes the tag and tagging model, the descriptor types
//! for SEQUENCE, SET, SEQUENCE OF and CHOICE data elements, and
//! the static grammar tables of the Z39.50-1995 APDU module and
//! the record syntaxes carried inside its EXTERNALs.
//!
//! The grammar is plain data: every declaration is a `static`
//! and composite declarations refer to their components by
//! `&'static` reference. Self-referential types such as
//! `RPNStructure` or `TaggedElement` simply point back at their
//! own static, so the whole module forms one immutable graph that
//! is shared by every decode.
#![no_std]

/// Declares a SEQUENCE (or SET) and its member table as one static.
macro_rules! sequence {
    ($(#[$meta:meta])* $decl:ident = $name:literal, $tag:expr, [$($member:expr),+ $(,)?]) => {
        sequence!(@declare $(#[$meta])* $decl, Sequence, $name, $tag, [$($member),+]);
    };
    ($(#[$meta:meta])* set $decl:ident = $name:literal, $tag:expr, [$($member:expr),+ $(,)?]) => {
        sequence!(@declare $(#[$meta])* $decl, Set, $name, $tag, [$($member),+]);
    };
    (@declare $(#[$meta:meta])* $decl:ident, $variant:ident, $name:literal, $tag:expr, [$($member:expr),+]) => {
        $(#[$meta])*
        pub static $decl: $crate::ToplevelDeclaration = {
            static MEMBERS: [$crate::types::SequenceMember; [$(stringify!($member)),+].len()] =
                [$($member),+];
            $crate::ToplevelDeclaration::new(
                $name,
                $tag,
                $crate::ASN1Type::$variant($crate::types::AsnSequence { members: &MEMBERS }),
            )
        };
    };
}

/// Declares a CHOICE and its alternative table as one static.
macro_rules! choice {
    ($(#[$meta:meta])* $decl:ident = $name:literal, $tag:expr, [$($option:expr),+ $(,)?]) => {
        $(#[$meta])*
        pub static $decl: $crate::ToplevelDeclaration = {
            static OPTIONS: [$crate::types::ChoiceOption; [$(stringify!($option)),+].len()] =
                [$($option),+];
            $crate::ToplevelDeclaration::new(
                $name,
                $tag,
                $crate::ASN1Type::Choice($crate::types::AsnChoice { options: &OPTIONS }),
            )
        };
    };
}

pub mod records;
pub mod types;
pub mod values;
pub mod z3950;

use core::fmt::{Display, Formatter, Result};

use types::*;

// Tagging tokens
pub const UNIVERSAL: &'static str = "UNIVERSAL";
pub const PRIVATE: &'static str = "PRIVATE";
pub const APPLICATION: &'static str = "APPLICATION";
pub const IMPLICIT: &'static str = "IMPLICIT";
pub const EXPLICIT: &'static str = "EXPLICIT";

/// Tag classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagClass {
    Universal,
    Application,
    ContextSpecific,
    Private,
}

impl TagClass {
    /// Maps the two class bits of a BER identifier octet.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => TagClass::Universal,
            1 => TagClass::Application,
            2 => TagClass::ContextSpecific,
            _ => TagClass::Private,
        }
    }
}

/// Representation of a tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AsnTag {
    pub tag_class: TagClass,
    pub id: u64,
}

impl AsnTag {
    pub const BOOLEAN: AsnTag = AsnTag::universal(1);
    pub const INTEGER: AsnTag = AsnTag::universal(2);
    pub const BIT_STRING: AsnTag = AsnTag::universal(3);
    pub const OCTET_STRING: AsnTag = AsnTag::universal(4);
    pub const NULL: AsnTag = AsnTag::universal(5);
    pub const OBJECT_IDENTIFIER: AsnTag = AsnTag::universal(6);
    pub const OBJECT_DESCRIPTOR: AsnTag = AsnTag::universal(7);
    pub const EXTERNAL: AsnTag = AsnTag::universal(8);
    pub const ENUMERATED: AsnTag = AsnTag::universal(10);
    pub const UTF8_STRING: AsnTag = AsnTag::universal(12);
    pub const SEQUENCE: AsnTag = AsnTag::universal(16);
    pub const SET: AsnTag = AsnTag::universal(17);
    pub const NUMERIC_STRING: AsnTag = AsnTag::universal(18);
    pub const PRINTABLE_STRING: AsnTag = AsnTag::universal(19);
    pub const TELETEX_STRING: AsnTag = AsnTag::universal(20);
    pub const VIDEOTEX_STRING: AsnTag = AsnTag::universal(21);
    pub const IA5_STRING: AsnTag = AsnTag::universal(22);
    pub const GENERALIZED_TIME: AsnTag = AsnTag::universal(24);
    pub const GRAPHIC_STRING: AsnTag = AsnTag::universal(25);
    pub const VISIBLE_STRING: AsnTag = AsnTag::universal(26);
    pub const GENERAL_STRING: AsnTag = AsnTag::universal(27);

    pub const fn new(tag_class: TagClass, id: u64) -> Self {
        AsnTag { tag_class, id }
    }

    pub const fn universal(id: u64) -> Self {
        AsnTag::new(TagClass::Universal, id)
    }

    pub const fn context(id: u64) -> Self {
        AsnTag::new(TagClass::ContextSpecific, id)
    }

    pub const fn application(id: u64) -> Self {
        AsnTag::new(TagClass::Application, id)
    }
}

impl Display for AsnTag {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self.tag_class {
            TagClass::Universal => write!(f, "[{UNIVERSAL} {}]", self.id),
            TagClass::Application => write!(f, "[{APPLICATION} {}]", self.id),
            TagClass::ContextSpecific => write!(f, "[{}]", self.id),
            TagClass::Private => write!(f, "[{PRIVATE} {}]", self.id),
        }
    }
}

/// How a declaration or a component is tagged on top of its type.
///
/// An implicit tag replaces the outermost tag of the tagged type, so
/// its content octets are the content octets of that type. An explicit
/// tag wraps the complete encoding of the tagged type in one more
/// constructed TLV.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tagging {
    Untagged,
    Implicit(AsnTag),
    Explicit(AsnTag),
}

impl Tagging {
    pub const fn tag(&self) -> Option<AsnTag> {
        match self {
            Tagging::Untagged => None,
            Tagging::Implicit(t) | Tagging::Explicit(t) => Some(*t),
        }
    }
}

impl Display for Tagging {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            Tagging::Untagged => Ok(()),
            Tagging::Implicit(t) => write!(f, "{t} {IMPLICIT}"),
            Tagging::Explicit(t) => write!(f, "{t} {EXPLICIT}"),
        }
    }
}

/// Shorthand for an untagged component.
pub const UNTAGGED: Tagging = Tagging::Untagged;

/// Shorthand for `[id] IMPLICIT` with a context-specific tag.
pub const fn implicit(id: u64) -> Tagging {
    Tagging::Implicit(AsnTag::context(id))
}

/// Shorthand for `[id]` (explicit) with a context-specific tag.
pub const fn explicit(id: u64) -> Tagging {
    Tagging::Explicit(AsnTag::context(id))
}

/// Interpretation hints consumed by the decode context and the
/// presentation profile. They never change how bytes are consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Semantic {
    Plain,
    /// Opaque octets that are often printable text
    ReferenceId,
    PrintableOctets,
    /// Selects the attribute set for the enclosing scope
    AttributeSetId,
    AttributeType,
    AttributeValue,
    /// Selects the diagnostic set for the enclosing scope
    DiagnosticSetId,
    DiagnosticCondition,
}

/// The possible types of an ASN1 data element.
#[derive(Debug, Clone, Copy)]
pub enum ASN1Type {
    Null,
    Boolean,
    Integer(AsnInteger),
    BitString(AsnBitString),
    CharacterString(CharacterStringType),
    ObjectIdentifier,
    GeneralizedTime,
    External,
    /// Open type, any single TLV is accepted
    Any,
    Sequence(AsnSequence),
    Set(AsnSequence),
    SequenceOf(&'static ToplevelDeclaration),
    Choice(AsnChoice),
}

impl ASN1Type {
    /// The universal tag of an untagged value of this type.
    /// CHOICE and open types do not have one.
    pub const fn universal_tag(&self) -> Option<AsnTag> {
        match self {
            ASN1Type::Null => Some(AsnTag::NULL),
            ASN1Type::Boolean => Some(AsnTag::BOOLEAN),
            ASN1Type::Integer(_) => Some(AsnTag::INTEGER),
            ASN1Type::BitString(_) => Some(AsnTag::BIT_STRING),
            ASN1Type::CharacterString(c) => Some(c.universal_tag()),
            ASN1Type::ObjectIdentifier => Some(AsnTag::OBJECT_IDENTIFIER),
            ASN1Type::GeneralizedTime => Some(AsnTag::GENERALIZED_TIME),
            ASN1Type::External => Some(AsnTag::EXTERNAL),
            ASN1Type::Sequence(_) | ASN1Type::SequenceOf(_) => Some(AsnTag::SEQUENCE),
            ASN1Type::Set(_) => Some(AsnTag::SET),
            ASN1Type::Any | ASN1Type::Choice(_) => None,
        }
    }
}

/// The types of an ASN1 character strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterStringType {
    OctetString,
    NumericString,
    VisibleString,
    IA5String,
    TeletexString,
    VideotexString,
    GraphicString,
    GeneralString,
    UTF8String,
    PrintableString,
    ObjectDescriptor,
}

impl CharacterStringType {
    pub const fn universal_tag(&self) -> AsnTag {
        match self {
            CharacterStringType::OctetString => AsnTag::OCTET_STRING,
            CharacterStringType::NumericString => AsnTag::NUMERIC_STRING,
            CharacterStringType::VisibleString => AsnTag::VISIBLE_STRING,
            CharacterStringType::IA5String => AsnTag::IA5_STRING,
            CharacterStringType::TeletexString => AsnTag::TELETEX_STRING,
            CharacterStringType::VideotexString => AsnTag::VIDEOTEX_STRING,
            CharacterStringType::GraphicString => AsnTag::GRAPHIC_STRING,
            CharacterStringType::GeneralString => AsnTag::GENERAL_STRING,
            CharacterStringType::UTF8String => AsnTag::UTF8_STRING,
            CharacterStringType::PrintableString => AsnTag::PRINTABLE_STRING,
            CharacterStringType::ObjectDescriptor => AsnTag::OBJECT_DESCRIPTOR,
        }
    }

    /// OCTET STRING keeps its bytes, every other variant is text.
    pub const fn is_text(&self) -> bool {
        !matches!(self, CharacterStringType::OctetString)
    }
}

/// A named ASN1 type assignment, `Name ::= [tag] Type`.
#[derive(Clone, Copy)]
pub struct ToplevelDeclaration {
    pub name: &'static str,
    pub tag: Tagging,
    pub r#type: ASN1Type,
    pub semantic: Semantic,
}

impl ToplevelDeclaration {
    pub const fn new(name: &'static str, tag: Tagging, r#type: ASN1Type) -> Self {
        ToplevelDeclaration {
            name,
            tag,
            r#type,
            semantic: Semantic::Plain,
        }
    }

    pub const fn with_semantic(mut self, semantic: Semantic) -> Self {
        self.semantic = semantic;
        self
    }

    /// The tag an encoding of this declaration starts with, if it has
    /// a single one.
    pub const fn outer_tag(&self) -> Option<AsnTag> {
        match self.tag {
            Tagging::Implicit(t) | Tagging::Explicit(t) => Some(t),
            Tagging::Untagged => self.r#type.universal_tag(),
        }
    }

    /// Checks whether a TLV carrying `tag` can start an encoding of
    /// this declaration. Untagged CHOICEs accept the tags of all of
    /// their alternatives.
    pub fn accepts(&self, tag: &AsnTag) -> bool {
        match (self.tag, &self.r#type) {
            (Tagging::Implicit(t) | Tagging::Explicit(t), _) => t == *tag,
            (Tagging::Untagged, ASN1Type::Any) => true,
            (Tagging::Untagged, ASN1Type::Choice(c)) => {
                c.options.iter().any(|o| component_accepts(o.tag, o.r#type, tag))
            }
            (Tagging::Untagged, ty) => ty.universal_tag().map_or(false, |t| t == *tag),
        }
    }
}

// Declarations form cycles, so only the head of one is printed.
impl core::fmt::Debug for ToplevelDeclaration {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self.tag {
            Tagging::Untagged => write!(f, "{}", self.name),
            tag => write!(f, "{} ::= {}", self.name, tag),
        }
    }
}

/// Checks whether a TLV carrying `tag` can start a component that is
/// tagged with `tagging` on top of `decl`.
pub fn component_accepts(
    tagging: Tagging,
    decl: &'static ToplevelDeclaration,
    tag: &AsnTag,
) -> bool {
    match tagging {
        Tagging::Implicit(t) | Tagging::Explicit(t) => t == *tag,
        Tagging::Untagged => decl.accepts(tag),
    }
}

#[cfg(test)]
mod tests {
    extern crate alloc;

    use alloc::format;

    use crate::{records::*, z3950::*, *};

    #[test]
    fn resolves_outer_tags() {
        assert_eq!(REFERENCE_ID.outer_tag(), Some(AsnTag::context(2)));
        assert_eq!(INTEGER.outer_tag(), Some(AsnTag::INTEGER));
        assert_eq!(RPN_STRUCTURE.outer_tag(), None);
        assert_eq!(OPERATOR.outer_tag(), Some(AsnTag::context(46)));
    }

    #[test]
    fn untagged_choice_accepts_alternative_tags() {
        assert!(OPERAND.accepts(&AsnTag::context(102)));
        assert!(OPERAND.accepts(&AsnTag::context(31)));
        assert!(OPERAND.accepts(&AsnTag::context(214)));
        assert!(!OPERAND.accepts(&AsnTag::context(45)));
        assert!(ELEMENT_DATA.accepts(&AsnTag::OCTET_STRING));
        assert!(ELEMENT_DATA.accepts(&AsnTag::context(6)));
    }

    #[test]
    fn recursive_declarations_point_back_at_themselves() {
        let ASN1Type::Choice(rpn) = RPN_STRUCTURE.r#type else {
            panic!("RPNStructure is not a CHOICE")
        };
        let ASN1Type::Sequence(op) = rpn.options[1].r#type.r#type else {
            panic!("rpnRpnOp is not a SEQUENCE")
        };
        assert!(core::ptr::eq(op.members[0].r#type, &RPN_STRUCTURE));
        assert!(core::ptr::eq(op.members[1].r#type, &RPN_STRUCTURE));
    }

    #[test]
    fn displays_tagging() {
        assert_eq!(format!("{}", implicit(13)), "[13] IMPLICIT");
        assert_eq!(
            format!("{}", Tagging::Explicit(AsnTag::application(1))),
            "[APPLICATION 1] EXPLICIT"
        );
    }
}
