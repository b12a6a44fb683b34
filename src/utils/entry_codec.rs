//! Flat text encoding for CV experience/education blocks.
//!
//! Each entry is its four fields joined by `|`; entries are joined by `|||`.
//! `company|position|period|description|||school|degree|period|description`
//!
//! Because every entry carries exactly four fields, splitting the whole text
//! on `|` yields `4n + 2(n - 1)` tokens and decoding never has to guess where
//! an empty field ends.

use crate::models::cv::CvEntry;

pub const FIELD_DELIMITER: char = '|';
pub const ENTRY_DELIMITER: &str = "|||";

const FIELDS_PER_ENTRY: usize = 4;
const SEPARATOR_TOKENS: usize = ENTRY_DELIMITER.len() - 1;

pub fn encode(entries: &[CvEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            [
                entry.organization.as_str(),
                entry.title.as_str(),
                entry.period.as_str(),
                entry.description.as_str(),
            ]
            .join("|")
        })
        .collect::<Vec<_>>()
        .join(ENTRY_DELIMITER)
}

/// Decodes stored text. Legacy free text without delimiters becomes a single
/// entry whose first field holds the text; missing trailing fields are empty.
pub fn decode(raw: &str) -> Vec<CvEntry> {
    if raw.is_empty() {
        return Vec::new();
    }

    let mut tokens = raw.split(FIELD_DELIMITER).peekable();
    let mut entries = Vec::new();

    while tokens.peek().is_some() {
        let mut fields: [String; FIELDS_PER_ENTRY] = Default::default();
        for field in fields.iter_mut() {
            match tokens.next() {
                Some(token) => *field = token.to_string(),
                None => break,
            }
        }
        let [organization, title, period, description] = fields;
        entries.push(CvEntry {
            organization,
            title,
            period,
            description,
        });

        for _ in 0..SEPARATOR_TOKENS {
            match tokens.peek() {
                Some(token) if token.is_empty() => {
                    tokens.next();
                }
                _ => break,
            }
        }
    }

    entries
}

/// Returns the first field value that would corrupt the encoding.
pub fn find_delimiter(entries: &[CvEntry]) -> Option<&str> {
    entries
        .iter()
        .flat_map(|entry| {
            [
                entry.organization.as_str(),
                entry.title.as_str(),
                entry.period.as_str(),
                entry.description.as_str(),
            ]
        })
        .find(|field| field.contains(FIELD_DELIMITER))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(organization: &str, title: &str, period: &str, description: &str) -> CvEntry {
        CvEntry {
            organization: organization.to_string(),
            title: title.to_string(),
            period: period.to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn encodes_in_pipe_format() {
        let entries = vec![
            entry("Acme", "Engineer", "2019-2021", "Built APIs"),
            entry("Globex", "Lead", "2021-", "Ran the team"),
        ];
        assert_eq!(
            encode(&entries),
            "Acme|Engineer|2019-2021|Built APIs|||Globex|Lead|2021-|Ran the team"
        );
    }

    #[test]
    fn round_trip_preserves_entries() {
        let entries = vec![
            entry("HCMUS", "BSc Computer Science", "2015-2019", "Graduated with honours"),
            entry("Acme", "Intern", "Summer 2018", "Line one\nLine two"),
            entry("Globex", "Engineer", "2019-2023", ""),
        ];
        let encoded = encode(&entries);
        assert_eq!(decode(&encoded), entries);
        assert_eq!(encode(&decode(&encoded)), encoded);
    }

    #[test]
    fn round_trip_keeps_empty_fields_in_place() {
        let entries = vec![
            entry("", "", "", ""),
            entry("A", "", "", "d"),
            entry("", "b", "", ""),
            entry("x", "y", "z", ""),
        ];
        assert_eq!(decode(&encode(&entries)), entries);
    }

    #[test]
    fn empty_text_is_no_entries() {
        assert_eq!(encode(&[]), "");
        assert!(decode("").is_empty());
    }

    #[test]
    fn legacy_free_text_decodes_to_one_entry() {
        assert_eq!(decode("1 year"), vec![entry("1 year", "", "", "")]);
        assert_eq!(decode("Acme|Dev"), vec![entry("Acme", "Dev", "", "")]);
    }

    #[test]
    fn detects_fields_containing_the_delimiter() {
        let clean = vec![entry("Acme", "Dev", "2020", "ok")];
        assert_eq!(find_delimiter(&clean), None);

        let dirty = vec![entry("Acme", "Dev|Ops", "2020", "ok")];
        assert_eq!(find_delimiter(&dirty), Some("Dev|Ops"));
    }
}
