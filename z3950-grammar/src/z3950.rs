//! Type descriptors of the Z39.50-1995 APDU module (`Z39-50-APDU-1995`).
//!
//! Every declaration is a `static` so that CHOICEs and SEQUENCEs can
//! point at declarations that appear further down, or at themselves.
use crate::{
    explicit, implicit,
    types::{alternative, optional, required, AsnBitString, AsnInteger, DistinguishedValue},
    ASN1Type, CharacterStringType, Semantic, ToplevelDeclaration, UNTAGGED,
};

// Universal building blocks

pub static NULL: ToplevelDeclaration = ToplevelDeclaration::new("NULL", UNTAGGED, ASN1Type::Null);
pub static BOOLEAN: ToplevelDeclaration =
    ToplevelDeclaration::new("BOOLEAN", UNTAGGED, ASN1Type::Boolean);
pub static INTEGER: ToplevelDeclaration =
    ToplevelDeclaration::new("INTEGER", UNTAGGED, ASN1Type::Integer(AsnInteger::PLAIN));
pub static OCTET_STRING: ToplevelDeclaration = ToplevelDeclaration::new(
    "OCTET STRING",
    UNTAGGED,
    ASN1Type::CharacterString(CharacterStringType::OctetString),
);
pub static VISIBLE_STRING: ToplevelDeclaration = ToplevelDeclaration::new(
    "VisibleString",
    UNTAGGED,
    ASN1Type::CharacterString(CharacterStringType::VisibleString),
);
pub static INTERNATIONAL_STRING: ToplevelDeclaration = ToplevelDeclaration::new(
    "InternationalString",
    UNTAGGED,
    ASN1Type::CharacterString(CharacterStringType::GeneralString),
);
pub static OBJECT_DESCRIPTOR: ToplevelDeclaration = ToplevelDeclaration::new(
    "ObjectDescriptor",
    UNTAGGED,
    ASN1Type::CharacterString(CharacterStringType::ObjectDescriptor),
);
pub static OBJECT_IDENTIFIER: ToplevelDeclaration =
    ToplevelDeclaration::new("OBJECT IDENTIFIER", UNTAGGED, ASN1Type::ObjectIdentifier);
pub static GENERALIZED_TIME: ToplevelDeclaration =
    ToplevelDeclaration::new("GeneralizedTime", UNTAGGED, ASN1Type::GeneralizedTime);
pub static BIT_STRING: ToplevelDeclaration = ToplevelDeclaration::new(
    "BIT STRING",
    UNTAGGED,
    ASN1Type::BitString(AsnBitString {
        distinguished_values: None,
    }),
);
pub static EXTERNAL: ToplevelDeclaration =
    ToplevelDeclaration::new("EXTERNAL", UNTAGGED, ASN1Type::External);
pub static ANY: ToplevelDeclaration = ToplevelDeclaration::new("ANY", UNTAGGED, ASN1Type::Any);

/// Declares an untagged INTEGER with named numbers.
const fn named_integer(
    name: &'static str,
    values: &'static [DistinguishedValue],
) -> ToplevelDeclaration {
    ToplevelDeclaration::new(name, UNTAGGED, ASN1Type::Integer(AsnInteger::named(values)))
}

/// `SEQUENCE OF decl`
const fn sequence_of(
    name: &'static str,
    element: &'static ToplevelDeclaration,
) -> ToplevelDeclaration {
    ToplevelDeclaration::new(name, UNTAGGED, ASN1Type::SequenceOf(element))
}

// Protocol data units

choice!(
    /// The outermost CHOICE of every Z39.50 message.
    PDU = "PDU", UNTAGGED, [
    alternative("initRequest", implicit(20), &INITIALIZE_REQUEST),
    alternative("initResponse", implicit(21), &INITIALIZE_RESPONSE),
    alternative("searchRequest", implicit(22), &SEARCH_REQUEST),
    alternative("searchResponse", implicit(23), &SEARCH_RESPONSE),
    alternative("presentRequest", implicit(24), &PRESENT_REQUEST),
    alternative("presentResponse", implicit(25), &PRESENT_RESPONSE),
    alternative("deleteResultSetRequest", implicit(26), &DELETE_RESULT_SET_REQUEST),
    alternative("deleteResultSetResponse", implicit(27), &DELETE_RESULT_SET_RESPONSE),
    alternative("accessControlRequest", implicit(28), &ACCESS_CONTROL_REQUEST),
    alternative("accessControlResponse", implicit(29), &ACCESS_CONTROL_RESPONSE),
    alternative("resourceControlRequest", implicit(30), &RESOURCE_CONTROL_REQUEST),
    alternative("resourceControlResponse", implicit(31), &RESOURCE_CONTROL_RESPONSE),
    alternative("triggerResourceControlRequest", implicit(32), &TRIGGER_RESOURCE_CONTROL_REQUEST),
    alternative("resourceReportRequest", implicit(33), &RESOURCE_REPORT_REQUEST),
    alternative("resourceReportResponse", implicit(34), &RESOURCE_REPORT_RESPONSE),
    alternative("scanRequest", implicit(35), &SCAN_REQUEST),
    alternative("scanResponse", implicit(36), &SCAN_RESPONSE),
    alternative("sortRequest", implicit(43), &SORT_REQUEST),
    alternative("sortResponse", implicit(44), &SORT_RESPONSE),
    alternative("segmentRequest", implicit(45), &SEGMENT),
    alternative("extendedServicesRequest", implicit(46), &EXTENDED_SERVICES_REQUEST),
    alternative("extendedServicesResponse", implicit(47), &EXTENDED_SERVICES_RESPONSE),
    alternative("close", implicit(48), &CLOSE),
]);

// Initialize

sequence!(INITIALIZE_REQUEST = "InitializeRequest", UNTAGGED, [
    optional("referenceId", UNTAGGED, &REFERENCE_ID),
    required("protocolVersion", UNTAGGED, &PROTOCOL_VERSION),
    required("options", UNTAGGED, &OPTIONS),
    required("preferredMessageSize", UNTAGGED, &PREFERRED_MESSAGE_SIZE),
    required("exceptionalRecordSize", UNTAGGED, &EXCEPTIONAL_RECORD_SIZE),
    optional("idAuthentication", explicit(7), &ID_AUTHENTICATION),
    optional("implementationId", implicit(110), &INTERNATIONAL_STRING),
    optional("implementationName", implicit(111), &INTERNATIONAL_STRING),
    optional("implementationVersion", implicit(112), &INTERNATIONAL_STRING),
    optional("userInformationField", explicit(11), &EXTERNAL),
    optional("otherInfo", UNTAGGED, &OTHER_INFORMATION),
]);

choice!(ID_AUTHENTICATION = "IdAuthentication", UNTAGGED, [
    alternative("open", UNTAGGED, &VISIBLE_STRING),
    alternative("idPass", UNTAGGED, &ID_PASS),
    alternative("anonymous", UNTAGGED, &NULL),
    alternative("other", UNTAGGED, &EXTERNAL),
]);

sequence!(ID_PASS = "IdAuthentication.idPass", UNTAGGED, [
    optional("groupId", implicit(0), &INTERNATIONAL_STRING),
    optional("userId", implicit(1), &INTERNATIONAL_STRING),
    optional("password", implicit(2), &INTERNATIONAL_STRING),
]);

sequence!(INITIALIZE_RESPONSE = "InitializeResponse", UNTAGGED, [
    optional("referenceId", UNTAGGED, &REFERENCE_ID),
    required("protocolVersion", UNTAGGED, &PROTOCOL_VERSION),
    required("options", UNTAGGED, &OPTIONS),
    required("preferredMessageSize", UNTAGGED, &PREFERRED_MESSAGE_SIZE),
    required("exceptionalRecordSize", UNTAGGED, &EXCEPTIONAL_RECORD_SIZE),
    required("result", implicit(12), &BOOLEAN),
    optional("implementationId", implicit(110), &INTERNATIONAL_STRING),
    optional("implementationName", implicit(111), &INTERNATIONAL_STRING),
    optional("implementationVersion", implicit(112), &INTERNATIONAL_STRING),
    optional("userInformationField", explicit(11), &EXTERNAL),
    optional("otherInfo", UNTAGGED, &OTHER_INFORMATION),
]);

pub const PROTOCOL_VERSIONS: &[DistinguishedValue] =
    &[(0, "version-1"), (1, "version-2"), (2, "version-3")];

pub static PROTOCOL_VERSION: ToplevelDeclaration = ToplevelDeclaration::new(
    "ProtocolVersion",
    implicit(3),
    ASN1Type::BitString(AsnBitString {
        distinguished_values: Some(PROTOCOL_VERSIONS),
    }),
);

pub const PROTOCOL_OPTIONS: &[DistinguishedValue] = &[
    (0, "search"),
    (1, "present"),
    (2, "delSet"),
    (3, "resourceReport"),
    (4, "triggerResourceCtrl"),
    (5, "resourceCtrl"),
    (6, "accessCtrl"),
    (7, "scan"),
    (8, "sort"),
    (10, "extendedServices"),
    (11, "level-1Segmentation"),
    (12, "level-2Segmentation"),
    (13, "concurrentOperations"),
    (14, "namedResultSets"),
];

pub static OPTIONS: ToplevelDeclaration = ToplevelDeclaration::new(
    "Options",
    implicit(4),
    ASN1Type::BitString(AsnBitString {
        distinguished_values: Some(PROTOCOL_OPTIONS),
    }),
);

pub static PREFERRED_MESSAGE_SIZE: ToplevelDeclaration = ToplevelDeclaration::new(
    "PreferredMessageSize",
    implicit(5),
    ASN1Type::Integer(AsnInteger::PLAIN),
);

pub static EXCEPTIONAL_RECORD_SIZE: ToplevelDeclaration = ToplevelDeclaration::new(
    "ExceptionalRecordSize",
    implicit(6),
    ASN1Type::Integer(AsnInteger::PLAIN),
);

pub static REFERENCE_ID: ToplevelDeclaration = ToplevelDeclaration::new(
    "ReferenceId",
    implicit(2),
    ASN1Type::CharacterString(CharacterStringType::OctetString),
)
.with_semantic(Semantic::ReferenceId);

// Search

sequence!(SEARCH_REQUEST = "SearchRequest", UNTAGGED, [
    optional("referenceId", UNTAGGED, &REFERENCE_ID),
    required("smallSetUpperBound", implicit(13), &INTEGER),
    required("largeSetLowerBound", implicit(14), &INTEGER),
    required("mediumSetPresentNumber", implicit(15), &INTEGER),
    required("replaceIndicator", implicit(16), &BOOLEAN),
    required("resultSetName", implicit(17), &INTERNATIONAL_STRING),
    required("databaseNames", implicit(18), &DATABASE_NAMES),
    optional("smallSetElementSetNames", explicit(100), &ELEMENT_SET_NAMES),
    optional("mediumSetElementSetNames", explicit(101), &ELEMENT_SET_NAMES),
    optional("preferredRecordSyntax", implicit(104), &OBJECT_IDENTIFIER),
    required("query", explicit(21), &QUERY),
    optional("additionalSearchInfo", implicit(203), &OTHER_INFORMATION),
    optional("otherInfo", UNTAGGED, &OTHER_INFORMATION),
]);

pub static DATABASE_NAMES: ToplevelDeclaration = sequence_of("DatabaseNames", &DATABASE_NAME);

choice!(QUERY = "Query", UNTAGGED, [
    alternative("type-0", explicit(0), &ANY),
    alternative("type-1", implicit(1), &RPN_QUERY),
    alternative("type-2", explicit(2), &OCTET_STRING),
    alternative("type-100", explicit(100), &OCTET_STRING),
    alternative("type-101", implicit(101), &RPN_QUERY),
    alternative("type-102", explicit(102), &OCTET_STRING),
]);

sequence!(RPN_QUERY = "RPNQuery", UNTAGGED, [
    required("attributeSet", UNTAGGED, &ATTRIBUTE_SET_ID),
    required("rpn", UNTAGGED, &RPN_STRUCTURE),
]);

choice!(RPN_STRUCTURE = "RPNStructure", UNTAGGED, [
    alternative("op", explicit(0), &OPERAND),
    alternative("rpnRpnOp", implicit(1), &RPN_RPN_OP),
]);

sequence!(RPN_RPN_OP = "RPNStructure.rpnRpnOp", UNTAGGED, [
    required("rpn1", UNTAGGED, &RPN_STRUCTURE),
    required("rpn2", UNTAGGED, &RPN_STRUCTURE),
    required("op", UNTAGGED, &OPERATOR),
]);

choice!(OPERAND = "Operand", UNTAGGED, [
    alternative("attrTerm", UNTAGGED, &ATTRIBUTES_PLUS_TERM),
    alternative("resultSet", UNTAGGED, &RESULT_SET_ID),
    alternative("resultAttr", UNTAGGED, &RESULT_SET_PLUS_ATTRIBUTES),
]);

sequence!(ATTRIBUTES_PLUS_TERM = "AttributesPlusTerm", implicit(102), [
    required("attributes", UNTAGGED, &ATTRIBUTE_LIST),
    required("term", UNTAGGED, &TERM),
]);

sequence!(RESULT_SET_PLUS_ATTRIBUTES = "ResultSetPlusAttributes", implicit(214), [
    required("resultSet", UNTAGGED, &RESULT_SET_ID),
    required("attributes", UNTAGGED, &ATTRIBUTE_LIST),
]);

pub static ATTRIBUTE_LIST: ToplevelDeclaration = ToplevelDeclaration::new(
    "AttributeList",
    implicit(44),
    ASN1Type::SequenceOf(&ATTRIBUTE_ELEMENT),
);

choice!(TERM = "Term", UNTAGGED, [
    alternative("general", implicit(45), &GENERAL_TERM),
    alternative("numeric", implicit(215), &INTEGER),
    alternative("characterString", implicit(216), &INTERNATIONAL_STRING),
    alternative("oid", implicit(217), &OBJECT_IDENTIFIER),
    alternative("dateTime", implicit(218), &GENERALIZED_TIME),
    alternative("external", implicit(219), &EXTERNAL),
    alternative("integerAndUnit", implicit(220), &INT_UNIT),
    alternative("null", implicit(221), &NULL),
]);

/// Search terms are opaque octets that are usually text.
pub static GENERAL_TERM: ToplevelDeclaration = ToplevelDeclaration::new(
    "OCTET STRING",
    UNTAGGED,
    ASN1Type::CharacterString(CharacterStringType::OctetString),
)
.with_semantic(Semantic::PrintableOctets);

choice!(OPERATOR = "Operator", explicit(46), [
    alternative("and", implicit(0), &NULL),
    alternative("or", implicit(1), &NULL),
    alternative("and-not", implicit(2), &NULL),
    alternative("prox", implicit(3), &PROXIMITY_OPERATOR),
]);

pub static ATTRIBUTE_SET_ID: ToplevelDeclaration =
    ToplevelDeclaration::new("AttributeSetId", UNTAGGED, ASN1Type::ObjectIdentifier)
        .with_semantic(Semantic::AttributeSetId);

sequence!(ATTRIBUTE_ELEMENT = "AttributeElement", UNTAGGED, [
    optional("attributeSet", implicit(1), &ATTRIBUTE_SET_ID),
    required("attributeType", implicit(120), &ATTRIBUTE_TYPE),
    required("attributeValue", UNTAGGED, &ATTRIBUTE_VALUE),
]);

pub static ATTRIBUTE_TYPE: ToplevelDeclaration =
    ToplevelDeclaration::new("INTEGER", UNTAGGED, ASN1Type::Integer(AsnInteger::PLAIN))
        .with_semantic(Semantic::AttributeType);

pub static ATTRIBUTE_VALUE_NUMERIC: ToplevelDeclaration =
    ToplevelDeclaration::new("INTEGER", UNTAGGED, ASN1Type::Integer(AsnInteger::PLAIN))
        .with_semantic(Semantic::AttributeValue);

choice!(ATTRIBUTE_VALUE = "AttributeElement.attributeValue", UNTAGGED, [
    alternative("numeric", implicit(121), &ATTRIBUTE_VALUE_NUMERIC),
    alternative("complex", implicit(224), &COMPLEX_ATTRIBUTE),
]);

sequence!(COMPLEX_ATTRIBUTE = "AttributeElement.attributeValue.complex", UNTAGGED, [
    required("list", implicit(1), &STRING_OR_NUMERIC_LIST),
    optional("semanticAction", implicit(2), &INTEGER_LIST),
]);

pub static STRING_OR_NUMERIC_LIST: ToplevelDeclaration =
    sequence_of("SEQUENCE OF StringOrNumeric", &STRING_OR_NUMERIC);
pub static INTEGER_LIST: ToplevelDeclaration = sequence_of("SEQUENCE OF INTEGER", &INTEGER);

sequence!(PROXIMITY_OPERATOR = "ProximityOperator", UNTAGGED, [
    optional("exclusion", implicit(1), &BOOLEAN),
    required("distance", implicit(2), &INTEGER),
    required("ordered", implicit(3), &BOOLEAN),
    required("relationType", implicit(4), &RELATION_TYPE),
    required("proximityUnitCode", explicit(5), &PROX_UNIT_CODE),
]);

pub static RELATION_TYPE: ToplevelDeclaration = named_integer(
    "ProximityOperator.relationType",
    &[
        (1, "lessThan"),
        (2, "lessThanOrEqual"),
        (3, "equal"),
        (4, "greaterThanOrEqual"),
        (5, "greaterThan"),
        (6, "notEqual"),
    ],
);

choice!(PROX_UNIT_CODE = "ProxUnitCode", UNTAGGED, [
    alternative("known", implicit(1), &KNOWN_PROXIMITY_UNIT),
    alternative("private", implicit(2), &INTEGER),
]);

pub static KNOWN_PROXIMITY_UNIT: ToplevelDeclaration = named_integer(
    "KnownProximityUnit",
    &[
        (1, "character"),
        (2, "word"),
        (3, "sentence"),
        (4, "paragraph"),
        (5, "section"),
        (6, "chapter"),
        (7, "document"),
        (8, "element"),
        (9, "subelement"),
        (10, "elementType"),
        (11, "byte"),
    ],
);

pub static RESULT_SET_ID: ToplevelDeclaration = ToplevelDeclaration::new(
    "ResultSetId",
    implicit(31),
    ASN1Type::CharacterString(CharacterStringType::GeneralString),
);

sequence!(SEARCH_RESPONSE = "SearchResponse", UNTAGGED, [
    optional("referenceId", UNTAGGED, &REFERENCE_ID),
    required("resultCount", implicit(23), &INTEGER),
    required("numberOfRecordsReturned", implicit(24), &INTEGER),
    required("nextResultSetPosition", implicit(25), &INTEGER),
    required("searchStatus", implicit(22), &BOOLEAN),
    optional("resultSetStatus", implicit(26), &RESULT_SET_STATUS),
    optional("presentStatus", UNTAGGED, &PRESENT_STATUS),
    optional("records", UNTAGGED, &RECORDS),
    optional("additionalSearchInfo", implicit(203), &OTHER_INFORMATION),
    optional("otherInfo", UNTAGGED, &OTHER_INFORMATION),
]);

pub static RESULT_SET_STATUS: ToplevelDeclaration = named_integer(
    "SearchResponse.resultSetStatus",
    &[(1, "subset"), (2, "interim"), (3, "none")],
);

// Retrieval

sequence!(PRESENT_REQUEST = "PresentRequest", UNTAGGED, [
    optional("referenceId", UNTAGGED, &REFERENCE_ID),
    required("resultSetId", UNTAGGED, &RESULT_SET_ID),
    required("resultSetStartPoint", implicit(30), &INTEGER),
    required("numberOfRecordsRequested", implicit(29), &INTEGER),
    optional("additionalRanges", implicit(212), &RANGES),
    optional("recordComposition", UNTAGGED, &RECORD_COMPOSITION),
    optional("preferredRecordSyntax", implicit(104), &OBJECT_IDENTIFIER),
    optional("maxSegmentCount", implicit(204), &INTEGER),
    optional("maxRecordSize", implicit(206), &INTEGER),
    optional("maxSegmentSize", implicit(207), &INTEGER),
    optional("otherInfo", UNTAGGED, &OTHER_INFORMATION),
]);

pub static RANGES: ToplevelDeclaration = sequence_of("SEQUENCE OF Range", &RANGE);

sequence!(RANGE = "Range", UNTAGGED, [
    required("startingPosition", implicit(1), &INTEGER),
    required("numberOfRecords", implicit(2), &INTEGER),
]);

choice!(RECORD_COMPOSITION = "PresentRequest.recordComposition", UNTAGGED, [
    alternative("simple", explicit(19), &ELEMENT_SET_NAMES),
    alternative("complex", implicit(209), &COMP_SPEC),
]);

choice!(ELEMENT_SET_NAMES = "ElementSetNames", UNTAGGED, [
    alternative("genericElementSetName", implicit(0), &INTERNATIONAL_STRING),
    alternative("databaseSpecific", implicit(1), &DATABASE_SPECIFIC_NAMES),
]);

pub static DATABASE_SPECIFIC_NAMES: ToplevelDeclaration =
    sequence_of("ElementSetNames.databaseSpecific", &DATABASE_SPECIFIC_NAME);

sequence!(DATABASE_SPECIFIC_NAME = "ElementSetNames.databaseSpecific.item", UNTAGGED, [
    required("dbName", UNTAGGED, &DATABASE_NAME),
    required("esn", UNTAGGED, &ELEMENT_SET_NAME),
]);

pub static DATABASE_NAME: ToplevelDeclaration = ToplevelDeclaration::new(
    "DatabaseName",
    implicit(105),
    ASN1Type::CharacterString(CharacterStringType::GeneralString),
);

pub static ELEMENT_SET_NAME: ToplevelDeclaration = ToplevelDeclaration::new(
    "ElementSetName",
    implicit(103),
    ASN1Type::CharacterString(CharacterStringType::GeneralString),
);

pub const PRESENT_STATUS_VALUES: &[DistinguishedValue] = &[
    (0, "success"),
    (1, "partial-1"),
    (2, "partial-2"),
    (3, "partial-3"),
    (4, "partial-4"),
    (5, "failure"),
];

pub static PRESENT_STATUS: ToplevelDeclaration = ToplevelDeclaration::new(
    "PresentStatus",
    implicit(27),
    ASN1Type::Integer(AsnInteger::named(PRESENT_STATUS_VALUES)),
);

sequence!(COMP_SPEC = "CompSpec", UNTAGGED, [
    required("selectAlternativeSyntax", implicit(1), &BOOLEAN),
    optional("generic", implicit(2), &SPECIFICATION),
    optional("dbSpecific", implicit(3), &DB_SPECIFICATIONS),
    optional("recordSyntax", implicit(4), &OBJECT_IDENTIFIER_LIST),
]);

pub static DB_SPECIFICATIONS: ToplevelDeclaration =
    sequence_of("CompSpec.dbSpecific", &DB_SPECIFICATION);

sequence!(DB_SPECIFICATION = "CompSpec.dbSpecific.item", UNTAGGED, [
    required("db", explicit(1), &DATABASE_NAME),
    required("spec", implicit(2), &SPECIFICATION),
]);

pub static OBJECT_IDENTIFIER_LIST: ToplevelDeclaration =
    sequence_of("SEQUENCE OF OBJECT IDENTIFIER", &OBJECT_IDENTIFIER);

sequence!(SPECIFICATION = "Specification", UNTAGGED, [
    optional("schema", implicit(1), &OBJECT_IDENTIFIER),
    optional("elementSpec", explicit(2), &ELEMENT_SPEC),
]);

choice!(ELEMENT_SPEC = "Specification.elementSpec", UNTAGGED, [
    alternative("elementSetName", implicit(1), &INTERNATIONAL_STRING),
    alternative("externalEspec", implicit(2), &EXTERNAL),
]);

sequence!(PRESENT_RESPONSE = "PresentResponse", UNTAGGED, [
    optional("referenceId", UNTAGGED, &REFERENCE_ID),
    required("numberOfRecordsReturned", implicit(24), &INTEGER),
    required("nextResultSetPosition", implicit(25), &INTEGER),
    required("presentStatus", UNTAGGED, &PRESENT_STATUS),
    optional("records", UNTAGGED, &RECORDS),
    optional("otherInfo", UNTAGGED, &OTHER_INFORMATION),
]);

sequence!(SEGMENT = "Segment", UNTAGGED, [
    optional("referenceId", UNTAGGED, &REFERENCE_ID),
    required("numberOfRecordsReturned", implicit(24), &INTEGER),
    required("segmentRecords", implicit(0), &NAME_PLUS_RECORDS),
    optional("otherInfo", UNTAGGED, &OTHER_INFORMATION),
]);

choice!(RECORDS = "Records", UNTAGGED, [
    alternative("responseRecords", implicit(28), &NAME_PLUS_RECORDS),
    alternative("nonSurrogateDiagnostic", implicit(130), &DEFAULT_DIAG_FORMAT),
    alternative("multipleNonSurDiagnostics", implicit(205), &DIAG_RECS),
]);

pub static NAME_PLUS_RECORDS: ToplevelDeclaration =
    sequence_of("SEQUENCE OF NamePlusRecord", &NAME_PLUS_RECORD);

sequence!(NAME_PLUS_RECORD = "NamePlusRecord", UNTAGGED, [
    optional("name", implicit(0), &DATABASE_NAME),
    required("record", explicit(1), &RECORD),
]);

choice!(RECORD = "NamePlusRecord.record", UNTAGGED, [
    alternative("retrievalRecord", explicit(1), &EXTERNAL),
    alternative("surrogateDiagnostic", explicit(2), &DIAG_REC),
    alternative("startingFragment", explicit(3), &FRAGMENT_SYNTAX),
    alternative("intermediateFragment", explicit(4), &FRAGMENT_SYNTAX),
    alternative("finalFragment", explicit(5), &FRAGMENT_SYNTAX),
]);

choice!(FRAGMENT_SYNTAX = "FragmentSyntax", UNTAGGED, [
    alternative("externallyTagged", UNTAGGED, &EXTERNAL),
    alternative("notExternallyTagged", UNTAGGED, &OCTET_STRING),
]);

pub static DIAG_RECS: ToplevelDeclaration = sequence_of("SEQUENCE OF DiagRec", &DIAG_REC);

choice!(DIAG_REC = "DiagRec", UNTAGGED, [
    alternative("defaultFormat", UNTAGGED, &DEFAULT_DIAG_FORMAT),
    alternative("externallyDefined", UNTAGGED, &EXTERNAL),
]);

sequence!(DEFAULT_DIAG_FORMAT = "DefaultDiagFormat", UNTAGGED, [
    required("diagnosticSetId", UNTAGGED, &DIAGNOSTIC_SET_ID),
    required("condition", UNTAGGED, &DIAGNOSTIC_CONDITION),
    required("addinfo", UNTAGGED, &ADD_INFO),
]);

pub static DIAGNOSTIC_SET_ID: ToplevelDeclaration =
    ToplevelDeclaration::new("OBJECT IDENTIFIER", UNTAGGED, ASN1Type::ObjectIdentifier)
        .with_semantic(Semantic::DiagnosticSetId);

pub static DIAGNOSTIC_CONDITION: ToplevelDeclaration =
    ToplevelDeclaration::new("INTEGER", UNTAGGED, ASN1Type::Integer(AsnInteger::PLAIN))
        .with_semantic(Semantic::DiagnosticCondition);

choice!(ADD_INFO = "DefaultDiagFormat.addinfo", UNTAGGED, [
    alternative("v2Addinfo", UNTAGGED, &VISIBLE_STRING),
    alternative("v3Addinfo", UNTAGGED, &INTERNATIONAL_STRING),
]);

// Result set deletion

sequence!(DELETE_RESULT_SET_REQUEST = "DeleteResultSetRequest", UNTAGGED, [
    optional("referenceId", UNTAGGED, &REFERENCE_ID),
    required("deleteFunction", implicit(32), &DELETE_FUNCTION),
    optional("resultSetList", UNTAGGED, &RESULT_SET_LIST),
    optional("otherInfo", UNTAGGED, &OTHER_INFORMATION),
]);

pub static DELETE_FUNCTION: ToplevelDeclaration =
    named_integer("DeleteResultSetRequest.deleteFunction", &[(0, "list"), (1, "all")]);

pub static RESULT_SET_LIST: ToplevelDeclaration =
    sequence_of("SEQUENCE OF ResultSetId", &RESULT_SET_ID);

sequence!(DELETE_RESULT_SET_RESPONSE = "DeleteResultSetResponse", UNTAGGED, [
    optional("referenceId", UNTAGGED, &REFERENCE_ID),
    required("deleteOperationStatus", implicit(0), &DELETE_SET_STATUS),
    optional("deleteListStatuses", implicit(1), &LIST_STATUSES),
    optional("numberNotDeleted", implicit(34), &INTEGER),
    optional("bulkStatuses", implicit(35), &LIST_STATUSES),
    optional("deleteMessage", implicit(36), &INTERNATIONAL_STRING),
    optional("otherInfo", UNTAGGED, &OTHER_INFORMATION),
]);

pub static LIST_STATUSES: ToplevelDeclaration = sequence_of("ListStatuses", &LIST_STATUS);

sequence!(LIST_STATUS = "ListStatuses.item", UNTAGGED, [
    required("id", UNTAGGED, &RESULT_SET_ID),
    required("status", UNTAGGED, &DELETE_SET_STATUS),
]);

pub static DELETE_SET_STATUS: ToplevelDeclaration = ToplevelDeclaration::new(
    "DeleteSetStatus",
    implicit(33),
    ASN1Type::Integer(AsnInteger::named(&[
        (0, "success"),
        (1, "resultSetDidNotExist"),
        (2, "previouslyDeletedByTarget"),
        (3, "systemProblemAtTarget"),
        (4, "accessNotAllowed"),
        (5, "resourceControlAtOrigin"),
        (6, "resourceControlAtTarget"),
        (7, "bulkDeleteNotSupported"),
        (8, "notAllRsltSetsDeletedOnBulkDlte"),
        (9, "notAllRequestedResultSetsDeleted"),
        (10, "resultSetInUse"),
    ])),
);

// Access and resource control

sequence!(ACCESS_CONTROL_REQUEST = "AccessControlRequest", UNTAGGED, [
    optional("referenceId", UNTAGGED, &REFERENCE_ID),
    required("securityChallenge", UNTAGGED, &SECURITY_CHALLENGE),
    optional("otherInfo", UNTAGGED, &OTHER_INFORMATION),
]);

choice!(SECURITY_CHALLENGE = "AccessControlRequest.securityChallenge", UNTAGGED, [
    alternative("simpleForm", implicit(37), &OCTET_STRING),
    alternative("externallyDefined", explicit(0), &EXTERNAL),
]);

sequence!(ACCESS_CONTROL_RESPONSE = "AccessControlResponse", UNTAGGED, [
    optional("referenceId", UNTAGGED, &REFERENCE_ID),
    optional("securityChallengeResponse", UNTAGGED, &SECURITY_CHALLENGE_RESPONSE),
    optional("diagnostic", explicit(223), &DIAG_REC),
    optional("otherInfo", UNTAGGED, &OTHER_INFORMATION),
]);

choice!(SECURITY_CHALLENGE_RESPONSE = "AccessControlResponse.securityChallengeResponse", UNTAGGED, [
    alternative("simpleForm", implicit(38), &OCTET_STRING),
    alternative("externallyDefined", explicit(0), &EXTERNAL),
]);

sequence!(RESOURCE_CONTROL_REQUEST = "ResourceControlRequest", UNTAGGED, [
    optional("referenceId", UNTAGGED, &REFERENCE_ID),
    optional("suspendedFlag", implicit(39), &BOOLEAN),
    optional("resourceReport", explicit(40), &EXTERNAL),
    optional("partialResultsAvailable", implicit(41), &RESULT_SET_STATUS),
    required("responseRequired", implicit(42), &BOOLEAN),
    optional("triggeredRequestFlag", implicit(43), &BOOLEAN),
    optional("otherInfo", UNTAGGED, &OTHER_INFORMATION),
]);

sequence!(RESOURCE_CONTROL_RESPONSE = "ResourceControlResponse", UNTAGGED, [
    optional("referenceId", UNTAGGED, &REFERENCE_ID),
    required("continueFlag", implicit(44), &BOOLEAN),
    optional("resultSetWanted", implicit(45), &BOOLEAN),
    optional("otherInfo", UNTAGGED, &OTHER_INFORMATION),
]);

sequence!(TRIGGER_RESOURCE_CONTROL_REQUEST = "TriggerResourceControlRequest", UNTAGGED, [
    optional("referenceId", UNTAGGED, &REFERENCE_ID),
    required("requestedAction", implicit(46), &REQUESTED_ACTION),
    optional("prefResourceReportFormat", implicit(47), &OBJECT_IDENTIFIER),
    optional("resultSetWanted", implicit(48), &BOOLEAN),
    optional("otherInfo", UNTAGGED, &OTHER_INFORMATION),
]);

pub static REQUESTED_ACTION: ToplevelDeclaration = named_integer(
    "TriggerResourceControlRequest.requestedAction",
    &[(1, "resourceReport"), (2, "resourceControl"), (3, "cancel")],
);

sequence!(RESOURCE_REPORT_REQUEST = "ResourceReportRequest", UNTAGGED, [
    optional("referenceId", UNTAGGED, &REFERENCE_ID),
    optional("opId", implicit(210), &REFERENCE_ID),
    optional("prefResourceReportFormat", implicit(49), &OBJECT_IDENTIFIER),
    optional("otherInfo", UNTAGGED, &OTHER_INFORMATION),
]);

sequence!(RESOURCE_REPORT_RESPONSE = "ResourceReportResponse", UNTAGGED, [
    optional("referenceId", UNTAGGED, &REFERENCE_ID),
    required("resourceReportStatus", implicit(50), &RESOURCE_REPORT_STATUS),
    optional("resourceReport", explicit(51), &EXTERNAL),
    optional("otherInfo", UNTAGGED, &OTHER_INFORMATION),
]);

pub static RESOURCE_REPORT_STATUS: ToplevelDeclaration = named_integer(
    "ResourceReportResponse.resourceReportStatus",
    &[
        (0, "success"),
        (1, "partial"),
        (2, "failure-1"),
        (3, "failure-2"),
        (4, "failure-3"),
        (5, "failure-4"),
        (6, "failure-5"),
        (7, "failure-6"),
    ],
);

// Scan

sequence!(SCAN_REQUEST = "ScanRequest", UNTAGGED, [
    optional("referenceId", UNTAGGED, &REFERENCE_ID),
    required("databaseNames", implicit(3), &DATABASE_NAMES),
    optional("attributeSet", UNTAGGED, &ATTRIBUTE_SET_ID),
    required("termListAndStartPoint", UNTAGGED, &ATTRIBUTES_PLUS_TERM),
    optional("stepSize", implicit(5), &INTEGER),
    required("numberOfTermsRequested", implicit(6), &INTEGER),
    optional("preferredPositionInResponse", implicit(7), &INTEGER),
    optional("otherInfo", UNTAGGED, &OTHER_INFORMATION),
]);

sequence!(SCAN_RESPONSE = "ScanResponse", UNTAGGED, [
    optional("referenceId", UNTAGGED, &REFERENCE_ID),
    optional("stepSize", implicit(3), &INTEGER),
    required("scanStatus", implicit(4), &SCAN_STATUS),
    required("numberOfEntriesReturned", implicit(5), &INTEGER),
    optional("positionOfTerm", implicit(6), &INTEGER),
    optional("entries", implicit(7), &LIST_ENTRIES),
    optional("attributeSet", implicit(8), &ATTRIBUTE_SET_ID),
    optional("otherInfo", UNTAGGED, &OTHER_INFORMATION),
]);

pub static SCAN_STATUS: ToplevelDeclaration = named_integer(
    "ScanResponse.scanStatus",
    &[
        (0, "success"),
        (1, "partial-1"),
        (2, "partial-2"),
        (3, "partial-3"),
        (4, "partial-4"),
        (5, "partial-5"),
        (6, "failure"),
    ],
);

sequence!(LIST_ENTRIES = "ListEntries", UNTAGGED, [
    optional("entries", implicit(1), &ENTRIES),
    optional("nonsurrogateDiagnostics", implicit(2), &DIAG_RECS),
]);

pub static ENTRIES: ToplevelDeclaration = sequence_of("SEQUENCE OF Entry", &ENTRY);

choice!(ENTRY = "Entry", UNTAGGED, [
    alternative("termInfo", implicit(1), &TERM_INFO),
    alternative("surrogateDiagnostic", explicit(2), &DIAG_REC),
]);

sequence!(TERM_INFO = "TermInfo", UNTAGGED, [
    required("term", UNTAGGED, &TERM),
    optional("displayTerm", implicit(0), &INTERNATIONAL_STRING),
    optional("suggestedAttributes", UNTAGGED, &ATTRIBUTE_LIST),
    optional("alternativeTerm", implicit(4), &ALTERNATIVE_TERMS),
    optional("globalOccurrences", implicit(2), &INTEGER),
    optional("byAttributes", implicit(3), &OCCURRENCE_BY_ATTRIBUTES),
    optional("otherTermInfo", UNTAGGED, &OTHER_INFORMATION),
]);

pub static ALTERNATIVE_TERMS: ToplevelDeclaration =
    sequence_of("SEQUENCE OF AttributesPlusTerm", &ATTRIBUTES_PLUS_TERM);

pub static OCCURRENCE_BY_ATTRIBUTES: ToplevelDeclaration =
    sequence_of("OccurrenceByAttributes", &OCCURRENCE_BY_ATTRIBUTES_ITEM);

sequence!(OCCURRENCE_BY_ATTRIBUTES_ITEM = "OccurrenceByAttributes.item", UNTAGGED, [
    required("attributes", explicit(1), &ATTRIBUTE_LIST),
    optional("occurrences", UNTAGGED, &OCCURRENCES),
    optional("otherOccurInfo", UNTAGGED, &OTHER_INFORMATION),
]);

choice!(OCCURRENCES = "OccurrenceByAttributes.item.occurrences", UNTAGGED, [
    alternative("global", explicit(2), &INTEGER),
    alternative("byDatabase", implicit(3), &OCCURRENCES_BY_DATABASE),
]);

pub static OCCURRENCES_BY_DATABASE: ToplevelDeclaration =
    sequence_of("OccurrenceByAttributes.item.occurrences.byDatabase", &DATABASE_OCCURRENCE);

sequence!(DATABASE_OCCURRENCE = "OccurrenceByAttributes.item.occurrences.byDatabase.item", UNTAGGED, [
    required("db", UNTAGGED, &DATABASE_NAME),
    optional("num", implicit(1), &INTEGER),
    optional("otherDbInfo", UNTAGGED, &OTHER_INFORMATION),
]);

// Sort

sequence!(SORT_REQUEST = "SortRequest", UNTAGGED, [
    optional("referenceId", UNTAGGED, &REFERENCE_ID),
    required("inputResultSetNames", implicit(3), &INTERNATIONAL_STRINGS),
    required("sortedResultSetName", implicit(4), &INTERNATIONAL_STRING),
    required("sortSequence", implicit(5), &SORT_SEQUENCE),
    optional("otherInfo", UNTAGGED, &OTHER_INFORMATION),
]);

pub static INTERNATIONAL_STRINGS: ToplevelDeclaration =
    sequence_of("SEQUENCE OF InternationalString", &INTERNATIONAL_STRING);

pub static SORT_SEQUENCE: ToplevelDeclaration = sequence_of("SEQUENCE OF SortKeySpec", &SORT_KEY_SPEC);

sequence!(SORT_RESPONSE = "SortResponse", UNTAGGED, [
    optional("referenceId", UNTAGGED, &REFERENCE_ID),
    required("sortStatus", implicit(3), &SORT_STATUS),
    optional("resultSetStatus", implicit(4), &SORT_RESULT_SET_STATUS),
    optional("diagnostics", implicit(5), &DIAG_RECS),
    optional("resultCount", implicit(6), &INTEGER),
    optional("otherInfo", UNTAGGED, &OTHER_INFORMATION),
]);

pub static SORT_STATUS: ToplevelDeclaration = named_integer(
    "SortResponse.sortStatus",
    &[(0, "success"), (1, "partial-1"), (2, "failure")],
);

pub static SORT_RESULT_SET_STATUS: ToplevelDeclaration = named_integer(
    "SortResponse.resultSetStatus",
    &[(1, "empty"), (2, "interim"), (3, "unchanged"), (4, "none")],
);

sequence!(SORT_KEY_SPEC = "SortKeySpec", UNTAGGED, [
    required("sortElement", UNTAGGED, &SORT_ELEMENT),
    required("sortRelation", implicit(1), &SORT_RELATION),
    required("caseSensitivity", implicit(2), &CASE_SENSITIVITY),
    optional("missingValueAction", explicit(3), &MISSING_VALUE_ACTION),
]);

pub static SORT_RELATION: ToplevelDeclaration = named_integer(
    "SortKeySpec.sortRelation",
    &[
        (0, "ascending"),
        (1, "descending"),
        (3, "ascendingByFrequency"),
        (4, "descendingByfrequency"),
    ],
);

pub static CASE_SENSITIVITY: ToplevelDeclaration = named_integer(
    "SortKeySpec.caseSensitivity",
    &[(0, "caseSensitive"), (1, "caseInsensitive")],
);

choice!(MISSING_VALUE_ACTION = "SortKeySpec.missingValueAction", UNTAGGED, [
    alternative("abort", implicit(1), &NULL),
    alternative("null", implicit(2), &NULL),
    alternative("missingValueData", implicit(3), &OCTET_STRING),
]);

choice!(SORT_ELEMENT = "SortElement", UNTAGGED, [
    alternative("generic", explicit(1), &SORT_KEY),
    alternative("datbaseSpecific", implicit(2), &DATABASE_SORT_KEYS),
]);

pub static DATABASE_SORT_KEYS: ToplevelDeclaration =
    sequence_of("SortElement.datbaseSpecific", &DATABASE_SORT_KEY);

sequence!(DATABASE_SORT_KEY = "SortElement.datbaseSpecific.item", UNTAGGED, [
    required("databaseName", UNTAGGED, &DATABASE_NAME),
    required("dbSort", UNTAGGED, &SORT_KEY),
]);

choice!(SORT_KEY = "SortKey", UNTAGGED, [
    alternative("sortfield", implicit(0), &INTERNATIONAL_STRING),
    alternative("elementSpec", implicit(1), &SPECIFICATION),
    alternative("sortAttributes", implicit(2), &SORT_ATTRIBUTES),
]);

sequence!(SORT_ATTRIBUTES = "SortKey.sortAttributes", UNTAGGED, [
    required("id", UNTAGGED, &ATTRIBUTE_SET_ID),
    required("list", UNTAGGED, &ATTRIBUTE_LIST),
]);

// Extended services

sequence!(EXTENDED_SERVICES_REQUEST = "ExtendedServicesRequest", UNTAGGED, [
    optional("referenceId", UNTAGGED, &REFERENCE_ID),
    required("function", implicit(3), &ES_FUNCTION),
    required("packageType", implicit(4), &OBJECT_IDENTIFIER),
    optional("packageName", implicit(5), &INTERNATIONAL_STRING),
    optional("userId", implicit(6), &INTERNATIONAL_STRING),
    optional("retentionTime", implicit(7), &INT_UNIT),
    optional("permissions", implicit(8), &PERMISSIONS),
    optional("description", implicit(9), &INTERNATIONAL_STRING),
    optional("taskSpecificParameters", implicit(10), &EXTERNAL),
    required("waitAction", implicit(11), &WAIT_ACTION),
    optional("elements", UNTAGGED, &ELEMENT_SET_NAME),
    optional("otherInfo", UNTAGGED, &OTHER_INFORMATION),
]);

pub static ES_FUNCTION: ToplevelDeclaration = named_integer(
    "ExtendedServicesRequest.function",
    &[(1, "create"), (2, "delete"), (3, "modify")],
);

pub static WAIT_ACTION: ToplevelDeclaration = named_integer(
    "ExtendedServicesRequest.waitAction",
    &[
        (1, "wait"),
        (2, "waitIfPossible"),
        (3, "dontWait"),
        (4, "dontReturnPackage"),
    ],
);

pub static PERMISSIONS: ToplevelDeclaration = sequence_of("Permissions", &PERMISSION);

sequence!(PERMISSION = "Permissions.item", UNTAGGED, [
    required("userId", implicit(1), &INTERNATIONAL_STRING),
    required("allowableFunctions", implicit(2), &ALLOWABLE_FUNCTIONS),
]);

pub static ALLOWABLE_FUNCTIONS: ToplevelDeclaration =
    sequence_of("Permissions.item.allowableFunctions", &ALLOWABLE_FUNCTION);

pub static ALLOWABLE_FUNCTION: ToplevelDeclaration = named_integer(
    "INTEGER",
    &[
        (1, "delete"),
        (2, "modifyContents"),
        (3, "modifyPermissions"),
        (4, "present"),
        (5, "invoke"),
    ],
);

sequence!(EXTENDED_SERVICES_RESPONSE = "ExtendedServicesResponse", UNTAGGED, [
    optional("referenceId", UNTAGGED, &REFERENCE_ID),
    required("operationStatus", implicit(3), &OPERATION_STATUS),
    optional("diagnostics", implicit(4), &DIAG_RECS),
    optional("taskPackage", implicit(5), &EXTERNAL),
    optional("otherInfo", UNTAGGED, &OTHER_INFORMATION),
]);

pub static OPERATION_STATUS: ToplevelDeclaration = named_integer(
    "ExtendedServicesResponse.operationStatus",
    &[(1, "done"), (2, "accepted"), (3, "failure")],
);

// Close

sequence!(CLOSE = "Close", UNTAGGED, [
    optional("referenceId", UNTAGGED, &REFERENCE_ID),
    required("closeReason", UNTAGGED, &CLOSE_REASON),
    optional("diagnosticInformation", implicit(3), &INTERNATIONAL_STRING),
    optional("resourceReportFormat", implicit(4), &OBJECT_IDENTIFIER),
    optional("resourceReport", explicit(5), &EXTERNAL),
    optional("otherInfo", UNTAGGED, &OTHER_INFORMATION),
]);

pub const CLOSE_REASONS: &[DistinguishedValue] = &[
    (0, "finished"),
    (1, "shutdown"),
    (2, "systemProblem"),
    (3, "costLimit"),
    (4, "resources"),
    (5, "securityViolation"),
    (6, "protocolError"),
    (7, "lackOfActivity"),
    (8, "peerAbort"),
    (9, "unspecified"),
];

pub static CLOSE_REASON: ToplevelDeclaration = ToplevelDeclaration::new(
    "CloseReason",
    implicit(211),
    ASN1Type::Integer(AsnInteger::named(CLOSE_REASONS)),
);

// Shared auxiliary types

pub static OTHER_INFORMATION: ToplevelDeclaration = ToplevelDeclaration::new(
    "OtherInformation",
    implicit(201),
    ASN1Type::SequenceOf(&OTHER_INFORMATION_ITEM),
);

sequence!(OTHER_INFORMATION_ITEM = "OtherInformation.item", UNTAGGED, [
    optional("category", implicit(1), &INFO_CATEGORY),
    required("information", UNTAGGED, &INFORMATION),
]);

choice!(INFORMATION = "OtherInformation.item.information", UNTAGGED, [
    alternative("characterInfo", implicit(2), &INTERNATIONAL_STRING),
    alternative("binaryInfo", implicit(3), &OCTET_STRING),
    alternative("externallyDefinedInfo", implicit(4), &EXTERNAL),
    alternative("oid", implicit(5), &OBJECT_IDENTIFIER),
]);

sequence!(INFO_CATEGORY = "InfoCategory", UNTAGGED, [
    optional("categoryTypeId", implicit(1), &OBJECT_IDENTIFIER),
    required("categoryValue", implicit(2), &INTEGER),
]);

sequence!(INT_UNIT = "IntUnit", UNTAGGED, [
    required("value", implicit(1), &INTEGER),
    required("unitUsed", implicit(2), &UNIT),
]);

sequence!(UNIT = "Unit", UNTAGGED, [
    optional("unitSystem", explicit(1), &INTERNATIONAL_STRING),
    optional("unitType", explicit(2), &STRING_OR_NUMERIC),
    optional("unit", explicit(3), &STRING_OR_NUMERIC),
    optional("scaleFactor", implicit(4), &INTEGER),
]);

choice!(STRING_OR_NUMERIC = "StringOrNumeric", UNTAGGED, [
    alternative("string", implicit(1), &INTERNATIONAL_STRING),
    alternative("numeric", implicit(2), &INTEGER),
]);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AsnTag, TagClass};

    #[test]
    fn pdu_alternatives_use_context_tags() {
        let ASN1Type::Choice(pdu) = PDU.r#type else {
            panic!("PDU is not a CHOICE")
        };
        assert_eq!(pdu.options.len(), 23);
        for option in pdu.options {
            let tag = option.tag.tag().unwrap();
            assert_eq!(tag.tag_class, TagClass::ContextSpecific);
            assert!((20..=36).contains(&tag.id) || (43..=48).contains(&tag.id));
        }
        assert_eq!(
            pdu.option_for(&AsnTag::context(22)).map(|o| o.name),
            Some("searchRequest")
        );
        assert!(pdu.option_for(&AsnTag::context(37)).is_none());
    }

    #[test]
    fn term_alternatives_are_distinct() {
        let ASN1Type::Choice(term) = TERM.r#type else {
            panic!("Term is not a CHOICE")
        };
        for id in [45, 215, 216, 217, 218, 219, 220, 221] {
            assert!(term.option_for(&AsnTag::context(id)).is_some(), "[{id}]");
        }
    }

    #[test]
    fn diag_rec_dispatches_on_universal_tags() {
        assert!(DIAG_REC.accepts(&AsnTag::SEQUENCE));
        assert!(DIAG_REC.accepts(&AsnTag::EXTERNAL));
        assert!(!DIAG_REC.accepts(&AsnTag::OCTET_STRING));
    }
}
