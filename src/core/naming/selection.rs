//! Picking the identifier an image is named after.

use super::{BaseFilename, RESERVED_PREFIX};
use crate::core::decoder::DecodedBarcode;
use std::cmp::Ordering;
use std::path::Path;

/// Separator between several specimen identifiers on one sheet
const IDENTIFIER_SEPARATOR: &str = "-";

/// Which payload(s) an image will be named after
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Specimen identifiers, already in numeric order
    Reserved(Vec<String>),
    /// No specimen identifier; the first payload the decoder reported
    Fallback(String),
}

impl Selection {
    /// The identifier text, before sanitizing
    pub fn identifier(&self) -> String {
        match self {
            Selection::Reserved(ids) => ids.join(IDENTIFIER_SEPARATOR),
            Selection::Fallback(payload) => payload.clone(),
        }
    }
}

/// Apply the selection policy to the payloads of one image
///
/// Returns `None` when no payload carries any text.
pub fn select_identifier(barcodes: &[DecodedBarcode]) -> Option<Selection> {
    let mut reserved: Vec<String> = Vec::new();
    for text in barcodes.iter().map(|b| b.text.trim()) {
        // The same label is sometimes read twice
        if text.starts_with(RESERVED_PREFIX) && !reserved.iter().any(|r| r == text) {
            reserved.push(text.to_string());
        }
    }

    if !reserved.is_empty() {
        reserved.sort_by(|a, b| compare_specimen_ids(a, b));
        return Some(Selection::Reserved(reserved));
    }

    barcodes
        .iter()
        .map(|b| b.text.trim())
        .find(|text| !text.is_empty())
        .map(|text| Selection::Fallback(text.to_string()))
}

/// Build the base file name for `source` from a selection
///
/// The extension keeps its original case. Returns `None` if the identifier
/// has nothing left after sanitizing.
pub fn base_filename(selection: &Selection, source: &Path) -> Option<BaseFilename> {
    let stem = sanitize_identifier(&selection.identifier());
    if stem.is_empty() {
        return None;
    }

    let extension = source
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    Some(BaseFilename::new(stem, extension))
}

/// Make a payload safe to use as a file name within the same directory
///
/// Path separators, characters Windows rejects in names, and control
/// characters become `_`. Surrounding whitespace is dropped.
pub fn sanitize_identifier(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// Digits after the prefix with leading zeros removed, if all numeric
fn specimen_number(id: &str) -> Option<&str> {
    let digits = id.get(RESERVED_PREFIX.len()..)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(digits.trim_start_matches('0'))
}

/// Numeric order on the specimen number, without integer overflow
///
/// Identifiers with a non-numeric tail sort after numeric ones.
fn compare_specimen_ids(a: &str, b: &str) -> Ordering {
    match (specimen_number(a), specimen_number(b)) {
        (Some(x), Some(y)) => x.len().cmp(&y.len()).then_with(|| x.cmp(y)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payloads(texts: &[&str]) -> Vec<DecodedBarcode> {
        texts.iter().map(|t| DecodedBarcode::new(*t)).collect()
    }

    fn name_for(texts: &[&str], source: &str) -> Option<String> {
        let selection = select_identifier(&payloads(texts))?;
        base_filename(&selection, Path::new(source)).map(|b| b.to_string())
    }

    #[test]
    fn single_specimen_id_names_the_file() {
        assert_eq!(name_for(&["NBGW42"], "IMG_0001.jpg").as_deref(), Some("NBGW42.jpg"));
    }

    #[test]
    fn specimen_ids_sort_numerically() {
        assert_eq!(
            name_for(&["NBGW100", "NBGW7"], "IMG_0001.jpg").as_deref(),
            Some("NBGW7-NBGW100.jpg")
        );
        assert_eq!(
            name_for(&["NBGW12", "NBGW100", "NBGW3"], "a.tif").as_deref(),
            Some("NBGW3-NBGW12-NBGW100.tif")
        );
    }

    #[test]
    fn specimen_ids_beat_earlier_payloads() {
        assert_eq!(
            name_for(&["https://example.org/label", "NBGW9"], "a.jpg").as_deref(),
            Some("NBGW9.jpg")
        );
    }

    #[test]
    fn first_payload_is_the_fallback() {
        assert_eq!(name_for(&["XYZ123"], "a.jpg").as_deref(), Some("XYZ123.jpg"));
        assert_eq!(
            name_for(&["XYZ123", "ABC999"], "a.jpg").as_deref(),
            Some("XYZ123.jpg")
        );
    }

    #[test]
    fn blank_payloads_are_ignored() {
        assert_eq!(name_for(&["", "  ", "XYZ123"], "a.jpg").as_deref(), Some("XYZ123.jpg"));
        assert!(select_identifier(&payloads(&["", " "])).is_none());
        assert!(select_identifier(&[]).is_none());
    }

    #[test]
    fn repeated_reads_of_one_label_collapse() {
        assert_eq!(
            select_identifier(&payloads(&["NBGW5", "NBGW5"])),
            Some(Selection::Reserved(vec!["NBGW5".to_string()]))
        );
    }

    #[test]
    fn extension_case_is_preserved() {
        assert_eq!(name_for(&["NBGW42"], "IMG_0001.CR2").as_deref(), Some("NBGW42.CR2"));
        assert_eq!(name_for(&["NBGW42"], "no_extension").as_deref(), Some("NBGW42"));
    }

    #[test]
    fn huge_specimen_numbers_do_not_overflow() {
        let big = "NBGW123456789012345678901234567890";
        assert_eq!(
            select_identifier(&payloads(&[big, "NBGW2"])),
            Some(Selection::Reserved(vec!["NBGW2".to_string(), big.to_string()]))
        );
    }

    #[test]
    fn leading_zeros_compare_by_value() {
        assert_eq!(compare_specimen_ids("NBGW007", "NBGW10"), Ordering::Less);
        assert_eq!(compare_specimen_ids("NBGW007", "NBGW7"), Ordering::Equal);
    }

    #[test]
    fn non_numeric_ids_sort_last() {
        assert_eq!(
            name_for(&["NBGW12A", "NBGW900", "NBGW"], "a.jpg").as_deref(),
            Some("NBGW900-NBGW-NBGW12A.jpg")
        );
    }

    #[test]
    fn separators_never_escape_the_directory() {
        assert_eq!(name_for(&["../etc/passwd"], "a.jpg").as_deref(), Some(".._etc_passwd.jpg"));
        assert_eq!(sanitize_identifier(" a\\b:c\n "), "a_b_c");
    }

    #[test]
    fn identifier_of_only_whitespace_yields_nothing() {
        let selection = Selection::Fallback("\t".to_string());
        assert!(base_filename(&selection, Path::new("a.jpg")).is_none());
    }
}
