//! Registered object identifiers and the named-value tables used to
//! annotate decoded values: bib-1 attributes, diag-1 conditions and
//! the record syntax registry of Z39.50.
use crate::types::DistinguishedValue;

pub type ObjectIdentifierArcs = &'static [u128];

pub const Z3950_ROOT: ObjectIdentifierArcs = &[1, 2, 840, 10003];

pub const BIB_1: ObjectIdentifierArcs = &[1, 2, 840, 10003, 3, 1];
pub const EXP_1: ObjectIdentifierArcs = &[1, 2, 840, 10003, 3, 2];
pub const EXT_1: ObjectIdentifierArcs = &[1, 2, 840, 10003, 3, 3];
pub const CCL_1: ObjectIdentifierArcs = &[1, 2, 840, 10003, 3, 4];
pub const GILS: ObjectIdentifierArcs = &[1, 2, 840, 10003, 3, 5];
pub const STAS: ObjectIdentifierArcs = &[1, 2, 840, 10003, 3, 6];
pub const COLLECTIONS_1: ObjectIdentifierArcs = &[1, 2, 840, 10003, 3, 7];
pub const CIMI_1: ObjectIdentifierArcs = &[1, 2, 840, 10003, 3, 8];
pub const GEO_1: ObjectIdentifierArcs = &[1, 2, 840, 10003, 3, 9];
pub const ZBIG: ObjectIdentifierArcs = &[1, 2, 840, 10003, 3, 10];
pub const UTIL: ObjectIdentifierArcs = &[1, 2, 840, 10003, 3, 11];
pub const XD_1: ObjectIdentifierArcs = &[1, 2, 840, 10003, 3, 12];
pub const ZTHES: ObjectIdentifierArcs = &[1, 2, 840, 10003, 3, 13];
pub const FIN_1: ObjectIdentifierArcs = &[1, 2, 840, 10003, 3, 14];
pub const DAN_1: ObjectIdentifierArcs = &[1, 2, 840, 10003, 3, 15];
pub const HOLDINGS: ObjectIdentifierArcs = &[1, 2, 840, 10003, 3, 16];
pub const MARC_ATTRIBUTES: ObjectIdentifierArcs = &[1, 2, 840, 10003, 3, 17];
pub const BIB_2: ObjectIdentifierArcs = &[1, 2, 840, 10003, 3, 18];
pub const ZEEREX: ObjectIdentifierArcs = &[1, 2, 840, 10003, 3, 19];

pub const DIAG_1: ObjectIdentifierArcs = &[1, 2, 840, 10003, 4, 1];
pub const DIAG_ES: ObjectIdentifierArcs = &[1, 2, 840, 10003, 4, 2];
pub const DIAG_GENERAL: ObjectIdentifierArcs = &[1, 2, 840, 10003, 4, 3];

pub const UNIMARC: ObjectIdentifierArcs = &[1, 2, 840, 10003, 5, 1];
pub const INTERMARC: ObjectIdentifierArcs = &[1, 2, 840, 10003, 5, 2];
pub const CCF: ObjectIdentifierArcs = &[1, 2, 840, 10003, 5, 3];
pub const USMARC: ObjectIdentifierArcs = &[1, 2, 840, 10003, 5, 10];
pub const UKMARC: ObjectIdentifierArcs = &[1, 2, 840, 10003, 5, 11];
pub const NORMARC: ObjectIdentifierArcs = &[1, 2, 840, 10003, 5, 12];
pub const DANMARC: ObjectIdentifierArcs = &[1, 2, 840, 10003, 5, 14];
pub const CANMARC: ObjectIdentifierArcs = &[1, 2, 840, 10003, 5, 17];
pub const MAB: ObjectIdentifierArcs = &[1, 2, 840, 10003, 5, 16];
pub const EXPLAIN: ObjectIdentifierArcs = &[1, 2, 840, 10003, 5, 100];
pub const SUTRS: ObjectIdentifierArcs = &[1, 2, 840, 10003, 5, 101];
pub const OPAC: ObjectIdentifierArcs = &[1, 2, 840, 10003, 5, 102];
pub const SUMMARY: ObjectIdentifierArcs = &[1, 2, 840, 10003, 5, 103];
pub const GRS_0: ObjectIdentifierArcs = &[1, 2, 840, 10003, 5, 104];
pub const GRS_1: ObjectIdentifierArcs = &[1, 2, 840, 10003, 5, 105];
pub const ES_RECORD: ObjectIdentifierArcs = &[1, 2, 840, 10003, 5, 106];
pub const FRAGMENT: ObjectIdentifierArcs = &[1, 2, 840, 10003, 5, 107];
pub const XML_B: ObjectIdentifierArcs = &[1, 2, 840, 10003, 5, 109, 10];
pub const RESOURCE_1: ObjectIdentifierArcs = &[1, 2, 840, 10003, 7, 1];
pub const RESOURCE_2: ObjectIdentifierArcs = &[1, 2, 840, 10003, 7, 2];
pub const ACCESS_CONTROL_PROMPT_1: ObjectIdentifierArcs = &[1, 2, 840, 10003, 8, 1];
pub const ACCESS_CONTROL_DES_1: ObjectIdentifierArcs = &[1, 2, 840, 10003, 8, 2];
pub const ACCESS_CONTROL_KRB_1: ObjectIdentifierArcs = &[1, 2, 840, 10003, 8, 3];
pub const ES_PERSISTENT_RESULT_SET: ObjectIdentifierArcs = &[1, 2, 840, 10003, 9, 1];
pub const ES_PERSISTENT_QUERY: ObjectIdentifierArcs = &[1, 2, 840, 10003, 9, 2];
pub const ES_PERIODIC_QUERY_SCHEDULE: ObjectIdentifierArcs = &[1, 2, 840, 10003, 9, 3];
pub const ES_ITEM_ORDER: ObjectIdentifierArcs = &[1, 2, 840, 10003, 9, 4];
pub const ES_DATABASE_UPDATE: ObjectIdentifierArcs = &[1, 2, 840, 10003, 9, 5];
pub const ES_EXPORT_SPECIFICATION: ObjectIdentifierArcs = &[1, 2, 840, 10003, 9, 6];
pub const ES_EXPORT_INVOCATION: ObjectIdentifierArcs = &[1, 2, 840, 10003, 9, 7];
pub const USER_INFO_1: ObjectIdentifierArcs = &[1, 2, 840, 10003, 10, 3];
pub const CHARSET_NEGOTIATION: ObjectIdentifierArcs = &[1, 2, 840, 10003, 15, 3];

/// Display names of the registered object identifiers.
pub const OBJECT_IDENTIFIERS: &[(ObjectIdentifierArcs, &str)] = &[
    (BIB_1, "bib-1"),
    (EXP_1, "exp-1"),
    (EXT_1, "ext-1"),
    (CCL_1, "ccl-1"),
    (GILS, "gils"),
    (STAS, "stas"),
    (COLLECTIONS_1, "collections-1"),
    (CIMI_1, "cimi-1"),
    (GEO_1, "geo-1"),
    (ZBIG, "ZBIG"),
    (UTIL, "util"),
    (XD_1, "xd-1"),
    (ZTHES, "Zthes"),
    (FIN_1, "Fin-1"),
    (DAN_1, "Dan-1"),
    (HOLDINGS, "Holdings"),
    (MARC_ATTRIBUTES, "MARC"),
    (BIB_2, "bib-2"),
    (ZEEREX, "ZeeRex"),
    (DIAG_1, "bib-1 diagnostics"),
    (DIAG_ES, "diag-es"),
    (DIAG_GENERAL, "diag-general"),
    (UNIMARC, "UNIMARC"),
    (INTERMARC, "INTERMARC"),
    (CCF, "CCF"),
    (USMARC, "MARC21"),
    (UKMARC, "UKMARC"),
    (NORMARC, "NORMARC"),
    (DANMARC, "DANMARC"),
    (MAB, "MAB"),
    (CANMARC, "CANMARC"),
    (EXPLAIN, "Explain"),
    (SUTRS, "SUTRS"),
    (OPAC, "OPAC"),
    (SUMMARY, "Summary"),
    (GRS_0, "GRS-0"),
    (GRS_1, "GRS-1"),
    (ES_RECORD, "ES"),
    (FRAGMENT, "Fragment"),
    (XML_B, "XML-b"),
    (RESOURCE_1, "Resource-1"),
    (RESOURCE_2, "Resource-2"),
    (ACCESS_CONTROL_PROMPT_1, "Prompt-1"),
    (ACCESS_CONTROL_DES_1, "DES-1"),
    (ACCESS_CONTROL_KRB_1, "KRB-1"),
    (ES_PERSISTENT_RESULT_SET, "Persistent result set"),
    (ES_PERSISTENT_QUERY, "Persistent query"),
    (ES_PERIODIC_QUERY_SCHEDULE, "Periodic query schedule"),
    (ES_ITEM_ORDER, "Item order"),
    (ES_DATABASE_UPDATE, "Database update"),
    (ES_EXPORT_SPECIFICATION, "Export specification"),
    (ES_EXPORT_INVOCATION, "Export invocation"),
    (USER_INFO_1, "UserInfo-1"),
    (CHARSET_NEGOTIATION, "Character set and language negotiation"),
];

pub fn object_identifier_name(arcs: &[u128]) -> Option<&'static str> {
    OBJECT_IDENTIFIERS
        .iter()
        .find_map(|(oid, name)| (*oid == arcs).then_some(*name))
}

pub const BIB_1_ATTRIBUTE_TYPES: &[DistinguishedValue] = &[
    (1, "Use"),
    (2, "Relation"),
    (3, "Position"),
    (4, "Structure"),
    (5, "Truncation"),
    (6, "Completeness"),
    (7, "Sorting"),
    (8, "Hits"),
    (9, "Content authority"),
];

pub const BIB_1_USE: &[DistinguishedValue] = &[
    (1, "Personal-name"),
    (2, "Corporate-name"),
    (3, "Conference-name"),
    (4, "Title"),
    (5, "Title-series"),
    (6, "Title-uniform"),
    (7, "ISBN"),
    (8, "ISSN"),
    (9, "LC-card-number"),
    (10, "BNB-card-number"),
    (11, "BGF-number"),
    (12, "Local-number"),
    (13, "Dewey-classification"),
    (14, "UDC-classification"),
    (15, "Bliss-classification"),
    (16, "LC-call-number"),
    (17, "NLM-call-number"),
    (18, "NAL-call-number"),
    (19, "MOS-call-number"),
    (20, "Local-classification"),
    (21, "Subject-heading"),
    (22, "Subject-Rameau"),
    (23, "BDI-index-subject"),
    (24, "INSPEC-subject"),
    (25, "MESH-subject"),
    (26, "PA-subject"),
    (27, "LC-subject-heading"),
    (28, "RVM-subject-heading"),
    (29, "Local-subject-index"),
    (30, "Date"),
    (31, "Date-of-publication"),
    (32, "Date-of-acquisition"),
    (33, "Title-key"),
    (34, "Title-collective"),
    (35, "Title-parallel"),
    (36, "Title-cover"),
    (37, "Title-added-title-page"),
    (38, "Title-caption"),
    (39, "Title-running"),
    (40, "Title-spine"),
    (41, "Title-other-variant"),
    (42, "Title-former"),
    (43, "Title-abbreviated"),
    (44, "Title-expanded"),
    (45, "Subject-precis"),
    (46, "Subject-rswk"),
    (47, "Subject-subdivision"),
    (48, "Number-natl-biblio"),
    (49, "Number-legal-deposit"),
    (50, "Number-govt-pub"),
    (51, "Number-music-publisher"),
    (52, "Number-db"),
    (53, "Number-local-call"),
    (54, "Code-language"),
    (55, "Code-geographic-area"),
    (56, "Code-institution"),
    (57, "Name-and-title"),
    (58, "Name-geographic"),
    (59, "Place-publication"),
    (60, "CODEN"),
    (61, "Microform-generation"),
    (62, "Abstract"),
    (63, "Note"),
    (1000, "Author-title"),
    (1001, "Record-type"),
    (1002, "Name"),
    (1003, "Author"),
    (1004, "Author-name-personal"),
    (1005, "Author-name-corporate"),
    (1006, "Author-name-conference"),
    (1007, "Identifier-standard"),
    (1008, "Subject-LC-childrens"),
    (1009, "Subject-name-personal"),
    (1010, "Body-of-text"),
    (1011, "Date/time-added-to-db"),
    (1012, "Date/time-last-modified"),
    (1013, "Authority/format-id"),
    (1014, "Concept-text"),
    (1015, "Concept-reference"),
    (1016, "Any"),
    (1017, "Server-choice"),
    (1018, "Publisher"),
    (1019, "Record-source"),
    (1020, "Editor"),
    (1021, "Bib-level"),
    (1022, "Geographic-class"),
    (1023, "Indexed-by"),
    (1024, "Map-scale"),
    (1025, "Music-key"),
    (1026, "Related-periodical"),
    (1027, "Report-number"),
    (1028, "Stock-number"),
    (1030, "Thematic-number"),
    (1031, "Material-type"),
    (1032, "Doc-id"),
    (1033, "Host-item"),
    (1034, "Content-type"),
    (1035, "Anywhere"),
    (1036, "Author-Title-Subject"),
];

pub const BIB_1_RELATION: &[DistinguishedValue] = &[
    (1, "Less than"),
    (2, "Less than or equal"),
    (3, "Equal"),
    (4, "Greater or equal"),
    (5, "Greater than"),
    (6, "Not equal"),
    (100, "Phonetic"),
    (101, "Stem"),
    (102, "Relevance"),
    (103, "AlwaysMatches"),
];

pub const BIB_1_POSITION: &[DistinguishedValue] = &[
    (1, "First in field"),
    (2, "First in subfield"),
    (3, "Any position in field"),
];

pub const BIB_1_STRUCTURE: &[DistinguishedValue] = &[
    (1, "Phrase"),
    (2, "Word"),
    (3, "Key"),
    (4, "Year"),
    (5, "Date (normalized)"),
    (6, "Word list"),
    (100, "Date (un-normalized)"),
    (101, "Name (normalized)"),
    (102, "Name (un-normalized)"),
    (103, "Structure"),
    (104, "Urx"),
    (105, "Free-form-text"),
    (106, "Document-text"),
    (107, "Local-number"),
    (108, "String"),
    (109, "Numeric-string"),
];

pub const BIB_1_TRUNCATION: &[DistinguishedValue] = &[
    (1, "Right truncation"),
    (2, "Left truncation"),
    (3, "Left and right truncation"),
    (100, "Do not truncate"),
    (101, "Process # in search term"),
    (102, "RegExpr-1"),
    (103, "RegExpr-2"),
    (104, "Z39.58"),
];

pub const BIB_1_COMPLETENESS: &[DistinguishedValue] = &[
    (1, "Incomplete subfield"),
    (2, "Complete subfield"),
    (3, "Complete field"),
];

/// The value table that applies to a bib-1 attribute type.
pub fn bib_1_attribute_values(attribute_type: i64) -> Option<&'static [DistinguishedValue]> {
    match attribute_type {
        1 => Some(BIB_1_USE),
        2 => Some(BIB_1_RELATION),
        3 => Some(BIB_1_POSITION),
        4 => Some(BIB_1_STRUCTURE),
        5 => Some(BIB_1_TRUNCATION),
        6 => Some(BIB_1_COMPLETENESS),
        _ => None,
    }
}

pub const DIAG_1_CONDITIONS: &[DistinguishedValue] = &[
    (1, "Permanent system error"),
    (2, "Temporary system error"),
    (3, "Unsupported search"),
    (4, "Terms only exclusion (stop) words"),
    (5, "Too many argument words"),
    (6, "Too many boolean operators"),
    (7, "Too many truncated words"),
    (8, "Too many incomplete subfields"),
    (9, "Truncated words too short"),
    (10, "Invalid format for record number (search term)"),
    (11, "Too many characters in search statement"),
    (12, "Too many records retrieved"),
    (13, "Present request out-of-range"),
    (14, "System error in presenting records"),
    (15, "Record not authorized to be sent intersystem"),
    (16, "Record exceeds Preferred-message-size"),
    (17, "Record exceeds Exceptional-record-size"),
    (18, "Result set not supported as a search term"),
    (19, "Only single result set as search term supported"),
    (20, "Only ANDing of a single result set as search term"),
    (21, "Result set exists and replace indicator off"),
    (22, "Result set naming not supported"),
    (23, "Specified combination of databases not supported"),
    (24, "Element set names not supported"),
    (25, "Specified element set name not valid for specified database"),
    (26, "Only generic form of element set name supported"),
    (27, "Result set no longer exists - unilaterally deleted by target"),
    (28, "Result set is in use"),
    (29, "One of the specified databases is locked"),
    (30, "Specified result set does not exist"),
    (31, "Resources exhausted - no results available"),
    (32, "Resources exhausted - unpredictable partial results available"),
    (33, "Resources exhausted - valid subset of results available"),
    (100, "Unspecified error"),
    (101, "Access-control failure"),
    (102, "Challenge required, could not be issued - operation terminated"),
    (103, "Challenge required, could not be issued - record not included"),
    (104, "Challenge failed - record not included"),
    (105, "Terminated at origin request"),
    (106, "No abstract syntaxes agreed to for this record"),
    (107, "Query type not supported"),
    (108, "Malformed query"),
    (109, "Database unavailable"),
    (110, "Operator unsupported"),
    (111, "Too many databases specified"),
    (112, "Too many result sets created"),
    (113, "Unsupported attribute type"),
    (114, "Unsupported Use attribute"),
    (115, "Unsupported term value for Use attribute"),
    (116, "Use attribute required but not supplied"),
    (117, "Unsupported Relation attribute"),
    (118, "Unsupported Structure attribute"),
    (119, "Unsupported Position attribute"),
    (120, "Unsupported Truncation attribute"),
    (121, "Unsupported Attribute Set"),
    (122, "Unsupported Completeness attribute"),
    (123, "Unsupported attribute combination"),
    (124, "Unsupported coded value for term"),
    (125, "Malformed search term"),
    (126, "Illegal term value for attribute"),
    (127, "Unparsable format for un-normalized value"),
    (128, "Illegal result set name"),
    (129, "Proximity search of sets not supported"),
    (130, "Illegal result set in proximity search"),
    (131, "Unsupported proximity relation"),
    (132, "Unsupported proximity unit code"),
    (201, "Proximity not supported with this attribute combination"),
    (202, "Unsupported distance for proximity"),
    (203, "Ordered flag not supported for proximity"),
    (205, "Only zero step size supported for Scan"),
    (206, "Specified step size not supported for Scan"),
    (207, "Cannot sort according to sequence"),
    (208, "No result set name supplied on Sort"),
    (209, "Generic sort not supported (database-specific sort only supported)"),
    (210, "Database specific sort not supported"),
    (211, "Too many sort keys"),
    (212, "Duplicate sort keys"),
    (213, "Unsupported missing data action"),
    (214, "Illegal sort relation"),
    (215, "Illegal case value"),
    (216, "Illegal missing data action"),
    (217, "Segmentation: Cannot guarantee records will fit in specified segments"),
    (218, "ES: Package name already in use"),
    (219, "ES: no such package, on modify/delete"),
    (220, "ES: quota exceeded"),
    (221, "ES: extended service type not supported"),
    (222, "ES: permission denied on ES - id not authorized"),
    (223, "ES: permission denied on ES - cannot modify or delete"),
    (224, "ES: immediate execution failed"),
    (225, "ES: immediate execution not supported for this service"),
    (226, "ES: immediate execution not supported for these parameters"),
    (227, "No data available in requested record syntax"),
    (228, "Scan: malformed scan"),
    (229, "Term type not supported"),
    (230, "Sort: too many input results"),
    (231, "Sort: incompatible record formats"),
    (232, "Scan: term list not supported"),
    (233, "Scan: unsupported value of position-in-response"),
    (234, "Too many index terms processed"),
    (235, "Database does not exist"),
    (236, "Access to specified database denied"),
    (237, "Sort: illegal sort"),
    (238, "Record not available in requested syntax"),
    (239, "Record syntax not supported"),
    (240, "Scan: Resources exhausted looking for satisfying terms"),
    (241, "Scan: Beginning or end of term list"),
    (242, "Segmentation: max-segment-size too small to segment record"),
    (243, "Present: additional-ranges parameter not supported"),
    (244, "Present: comp-spec parameter not supported"),
    (245, "Type-1 query: restriction ('resultAttr') operand not supported"),
    (246, "Type-1 query: 'complex' attributeValue not supported"),
    (247, "Type-1 query: 'attributeSet' as part of AttributeElement not supported"),
    (1001, "Malformed APDU"),
    (1002, "ES: EXTERNAL form of Item Order request not supported"),
    (1003, "ES: Result set item form of Item Order request not supported"),
    (1004, "ES: Extended services not supported unless access control is in effect"),
    (1005, "Response records in Search response not supported"),
    (1006, "Response records in Search response not possible for specified database (or database combination)"),
    (1007, "No Explain server"),
    (1008, "ES: missing mandatory parameter for specified function"),
    (1009, "ES: Item Order, unsupported OID in itemRequest"),
    (1010, "Init/AC: Bad Userid"),
    (1011, "Init/AC: Bad Userid and/or Password"),
    (1012, "Init/AC: No searches remaining (pre-purchased searches exhausted)"),
    (1013, "Init/AC: Incorrect interface type (specified id valid only when used with a particular access method or client)"),
    (1014, "Init/AC: Authentication System error"),
    (1015, "Init/AC: Maximum number of simultaneous sessions for Userid"),
    (1016, "Init/AC: Blocked network address"),
    (1017, "Init/AC: No databases available for specified userId"),
    (1018, "Init/AC: System temporarily out of resources"),
    (1019, "Init/AC: System not available due to maintenance"),
    (1020, "Init/AC: System temporarily unavailable"),
    (1021, "Init/AC: Account has expired"),
    (1022, "Init/AC: Password has expired so a new one must be supplied"),
    (1023, "Init/AC: Password has been changed by an administrator so a new one must be supplied"),
    (1024, "Unsupported Attribute"),
    (1025, "Service not supported for this database"),
    (1026, "Record cannot be opened because it is locked"),
    (1027, "SQL error"),
    (1028, "Record deleted"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::distinguished_name;

    #[test]
    fn names_registered_object_identifiers() {
        assert_eq!(object_identifier_name(&[1, 2, 840, 10003, 3, 1]), Some("bib-1"));
        assert_eq!(object_identifier_name(USMARC), Some("MARC21"));
        assert_eq!(object_identifier_name(&[1, 2, 3]), None);
    }

    #[test]
    fn looks_up_bib_1_values() {
        assert_eq!(distinguished_name(BIB_1_ATTRIBUTE_TYPES, 1), Some("Use"));
        assert_eq!(
            bib_1_attribute_values(1).and_then(|t| distinguished_name(t, 4)),
            Some("Title")
        );
        assert_eq!(
            bib_1_attribute_values(2).and_then(|t| distinguished_name(t, 3)),
            Some("Equal")
        );
        assert!(bib_1_attribute_values(42).is_none());
    }
}
