//! Type descriptors of the record syntaxes that are carried as
//! `single-ASN1-type` EXTERNALs: GRS-1 generic records, the
//! record syntax and category parts of Explain, and SUTRS.
use crate::{
    explicit, implicit,
    types::{alternative, optional, required, AsnInteger},
    z3950::{
        BOOLEAN, EXTERNAL, GENERALIZED_TIME, INTEGER, INTERNATIONAL_STRING, INT_UNIT, NULL,
        OBJECT_IDENTIFIER, OBJECT_IDENTIFIER_LIST, OCTET_STRING, OTHER_INFORMATION,
        STRING_OR_NUMERIC, TERM, UNIT,
    },
    ASN1Type, CharacterStringType, ToplevelDeclaration, UNTAGGED,
};

// GRS-1

pub static GENERIC_RECORD: ToplevelDeclaration =
    ToplevelDeclaration::new("GenericRecord", UNTAGGED, ASN1Type::SequenceOf(&TAGGED_ELEMENT));

sequence!(TAGGED_ELEMENT = "TaggedElement", UNTAGGED, [
    optional("tagType", implicit(1), &INTEGER),
    required("tagValue", explicit(2), &STRING_OR_NUMERIC),
    optional("tagOccurrence", implicit(3), &INTEGER),
    required("content", explicit(4), &ELEMENT_DATA),
    optional("metaData", implicit(5), &ELEMENT_META_DATA),
    optional("appliedVariant", implicit(6), &VARIANT),
]);

choice!(ELEMENT_DATA = "ElementData", UNTAGGED, [
    alternative("octets", UNTAGGED, &OCTET_STRING),
    alternative("numeric", UNTAGGED, &INTEGER),
    alternative("date", UNTAGGED, &GENERALIZED_TIME),
    alternative("ext", UNTAGGED, &EXTERNAL),
    alternative("string", UNTAGGED, &INTERNATIONAL_STRING),
    alternative("trueOrFalse", UNTAGGED, &BOOLEAN),
    alternative("oid", UNTAGGED, &OBJECT_IDENTIFIER),
    alternative("intUnit", implicit(1), &INT_UNIT),
    alternative("elementNotThere", implicit(2), &NULL),
    alternative("elementEmpty", implicit(3), &NULL),
    alternative("noDataRequested", implicit(4), &NULL),
    alternative("diagnostic", implicit(5), &EXTERNAL),
    alternative("subtree", explicit(6), &GENERIC_RECORD),
]);

sequence!(ELEMENT_META_DATA = "ElementMetaData", UNTAGGED, [
    optional("seriesOrder", implicit(1), &ORDER),
    optional("usageRight", implicit(2), &USAGE),
    optional("hits", implicit(3), &HIT_VECTORS),
    optional("displayName", implicit(4), &INTERNATIONAL_STRING),
    optional("supportedVariants", implicit(5), &VARIANTS),
    optional("message", implicit(6), &INTERNATIONAL_STRING),
    optional("elementDescriptor", implicit(7), &OCTET_STRING),
    optional("surrogateFor", implicit(8), &TAG_PATH),
    optional("surrogateElement", implicit(9), &TAG_PATH),
    optional("other", implicit(99), &EXTERNAL),
]);

pub static TAG_PATH: ToplevelDeclaration =
    ToplevelDeclaration::new("TagPath", UNTAGGED, ASN1Type::SequenceOf(&TAG_PATH_ITEM));

sequence!(TAG_PATH_ITEM = "TagPath.item", UNTAGGED, [
    optional("tagType", implicit(1), &INTEGER),
    required("tagValue", explicit(2), &STRING_OR_NUMERIC),
    optional("tagOccurrence", implicit(3), &INTEGER),
]);

sequence!(ORDER = "Order", UNTAGGED, [
    required("ascending", implicit(1), &BOOLEAN),
    required("order", implicit(2), &INTEGER),
]);

sequence!(USAGE = "Usage", UNTAGGED, [
    required("type", implicit(1), &USAGE_TYPE),
    optional("restriction", implicit(2), &INTERNATIONAL_STRING),
]);

pub static USAGE_TYPE: ToplevelDeclaration = ToplevelDeclaration::new(
    "Usage.type",
    UNTAGGED,
    ASN1Type::Integer(AsnInteger::named(&[
        (1, "redistributable"),
        (2, "restricted"),
        (3, "licensePointer"),
    ])),
);

pub static HIT_VECTORS: ToplevelDeclaration =
    ToplevelDeclaration::new("SEQUENCE OF HitVector", UNTAGGED, ASN1Type::SequenceOf(&HIT_VECTOR));

sequence!(HIT_VECTOR = "HitVector", UNTAGGED, [
    optional("satisfier", UNTAGGED, &TERM),
    optional("offsetIntoElement", implicit(1), &INT_UNIT),
    optional("length", implicit(2), &INT_UNIT),
    optional("hitRank", implicit(3), &INTEGER),
    optional("targetToken", implicit(4), &OCTET_STRING),
]);

pub static VARIANTS: ToplevelDeclaration =
    ToplevelDeclaration::new("SEQUENCE OF Variant", UNTAGGED, ASN1Type::SequenceOf(&VARIANT));

sequence!(VARIANT = "Variant", UNTAGGED, [
    optional("globalVariantSetId", implicit(1), &OBJECT_IDENTIFIER),
    required("triples", implicit(2), &TRIPLES),
]);

pub static TRIPLES: ToplevelDeclaration =
    ToplevelDeclaration::new("Variant.triples", UNTAGGED, ASN1Type::SequenceOf(&TRIPLE));

sequence!(TRIPLE = "Variant.triples.item", UNTAGGED, [
    optional("variantSetId", implicit(0), &OBJECT_IDENTIFIER),
    required("class", implicit(1), &INTEGER),
    required("type", implicit(2), &INTEGER),
    required("value", explicit(3), &TRIPLE_VALUE),
]);

choice!(TRIPLE_VALUE = "Variant.triples.item.value", UNTAGGED, [
    alternative("integer", UNTAGGED, &INTEGER),
    alternative("internationalString", UNTAGGED, &INTERNATIONAL_STRING),
    alternative("octetString", UNTAGGED, &OCTET_STRING),
    alternative("objectIdentifier", UNTAGGED, &OBJECT_IDENTIFIER),
    alternative("boolean", UNTAGGED, &BOOLEAN),
    alternative("null", UNTAGGED, &NULL),
    alternative("unit", implicit(1), &UNIT),
    alternative("valueAndUnit", implicit(2), &INT_UNIT),
]);

// Explain

choice!(EXPLAIN_RECORD = "Explain-Record", UNTAGGED, [
    alternative("recordSyntaxInfo", implicit(6), &RECORD_SYNTAX_INFO),
    alternative("categoryList", implicit(11), &CATEGORY_LIST),
]);

sequence!(RECORD_SYNTAX_INFO = "RecordSyntaxInfo", UNTAGGED, [
    optional("commonInfo", implicit(0), &COMMON_INFO),
    required("recordSyntax", implicit(1), &OBJECT_IDENTIFIER),
    required("name", implicit(2), &INTERNATIONAL_STRING),
    optional("transferSyntaxes", implicit(3), &OBJECT_IDENTIFIER_LIST),
    optional("description", explicit(4), &HUMAN_STRING),
    optional("asn1Module", implicit(5), &INTERNATIONAL_STRING),
    optional("abstractStructure", implicit(6), &ELEMENT_INFOS),
]);

pub static ELEMENT_INFOS: ToplevelDeclaration =
    ToplevelDeclaration::new("SEQUENCE OF ElementInfo", UNTAGGED, ASN1Type::SequenceOf(&ELEMENT_INFO));

sequence!(ELEMENT_INFO = "ElementInfo", UNTAGGED, [
    required("elementName", implicit(1), &INTERNATIONAL_STRING),
    required("elementTagPath", implicit(2), &PATH),
    optional("dataType", explicit(3), &ELEMENT_DATA_TYPE),
    required("required", implicit(4), &BOOLEAN),
    required("repeatable", implicit(5), &BOOLEAN),
    optional("description", explicit(6), &HUMAN_STRING),
]);

pub static PATH: ToplevelDeclaration =
    ToplevelDeclaration::new("Path", UNTAGGED, ASN1Type::SequenceOf(&PATH_ITEM));

sequence!(PATH_ITEM = "Path.item", UNTAGGED, [
    required("tagType", implicit(1), &INTEGER),
    required("tagValue", explicit(2), &STRING_OR_NUMERIC),
]);

choice!(ELEMENT_DATA_TYPE = "ElementDataType", UNTAGGED, [
    alternative("primitive", implicit(0), &PRIMITIVE_DATA_TYPE),
    alternative("structured", implicit(1), &ELEMENT_INFOS),
]);

pub static PRIMITIVE_DATA_TYPE: ToplevelDeclaration = ToplevelDeclaration::new(
    "PrimitiveDataType",
    UNTAGGED,
    ASN1Type::Integer(AsnInteger::named(&[
        (0, "octetString"),
        (1, "numeric"),
        (2, "date"),
        (3, "external"),
        (4, "string"),
        (5, "trueOrFalse"),
        (6, "oid"),
        (7, "intUnit"),
        (8, "empty"),
        (100, "noneOfTheAbove"),
    ])),
);

pub static HUMAN_STRING: ToplevelDeclaration =
    ToplevelDeclaration::new("HumanString", UNTAGGED, ASN1Type::SequenceOf(&HUMAN_STRING_ITEM));

sequence!(HUMAN_STRING_ITEM = "HumanString.item", UNTAGGED, [
    optional("language", implicit(0), &INTERNATIONAL_STRING),
    required("text", implicit(1), &INTERNATIONAL_STRING),
]);

sequence!(COMMON_INFO = "CommonInfo", UNTAGGED, [
    optional("dateAdded", implicit(0), &GENERALIZED_TIME),
    optional("dateChanged", implicit(1), &GENERALIZED_TIME),
    optional("expiry", implicit(2), &GENERALIZED_TIME),
    optional("humanString-Language", implicit(3), &INTERNATIONAL_STRING),
    optional("otherInfo", UNTAGGED, &OTHER_INFORMATION),
]);

sequence!(CATEGORY_LIST = "CategoryList", UNTAGGED, [
    optional("commonInfo", implicit(0), &COMMON_INFO),
    required("categories", implicit(1), &CATEGORY_INFOS),
]);

pub static CATEGORY_INFOS: ToplevelDeclaration =
    ToplevelDeclaration::new("SEQUENCE OF CategoryInfo", UNTAGGED, ASN1Type::SequenceOf(&CATEGORY_INFO));

sequence!(CATEGORY_INFO = "CategoryInfo", UNTAGGED, [
    required("category", implicit(1), &INTERNATIONAL_STRING),
    optional("originalCategory", implicit(2), &INTERNATIONAL_STRING),
    optional("description", explicit(3), &HUMAN_STRING),
    optional("asn1Module", implicit(4), &INTERNATIONAL_STRING),
]);

// SUTRS

pub static SUTRS_RECORD: ToplevelDeclaration = ToplevelDeclaration::new(
    "SutrsRecord",
    UNTAGGED,
    ASN1Type::CharacterString(CharacterStringType::GeneralString),
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SequenceMember;

    fn members(decl: &ToplevelDeclaration) -> &'static [SequenceMember] {
        match decl.r#type {
            ASN1Type::Sequence(s) => s.members,
            _ => panic!("{decl:?} is not a SEQUENCE"),
        }
    }

    #[test]
    fn tagged_elements_nest_through_subtrees() {
        let ASN1Type::Choice(data) = ELEMENT_DATA.r#type else {
            panic!("ElementData is not a CHOICE")
        };
        let subtree = data.option_for(&crate::AsnTag::context(6)).unwrap();
        let ASN1Type::SequenceOf(element) = subtree.r#type.r#type else {
            panic!("subtree is not a SEQUENCE OF")
        };
        assert!(core::ptr::eq(element, &TAGGED_ELEMENT));
        assert!(core::ptr::eq(members(&TAGGED_ELEMENT)[3].r#type, &ELEMENT_DATA));
    }

    #[test]
    fn element_infos_nest_through_structured_data_types() {
        let data_type = members(&ELEMENT_INFO)[2];
        assert_eq!(data_type.name, "dataType");
        let ASN1Type::Choice(choice) = data_type.r#type.r#type else {
            panic!("ElementDataType is not a CHOICE")
        };
        let ASN1Type::SequenceOf(element) = choice.options[1].r#type.r#type else {
            panic!("structured is not a SEQUENCE OF")
        };
        assert!(core::ptr::eq(element, &ELEMENT_INFO));
    }
}
