use std::sync::LazyLock;

use regex::Regex;

static ENTRY_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#(\d+) \| (.+)").expect("entry title pattern is valid"));

/// Dataset id and filename carried in a feed entry title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryTitle {
    pub dataset_id: String,
    pub filename: String,
}

/// Parse a feed entry title of the form `#<digits> | <filename>`.
///
/// Returns `None` if the title does not carry both parts.
pub fn parse_entry_title(title: &str) -> Option<EntryTitle> {
    let captures = ENTRY_TITLE.captures(title)?;
    let dataset_id = captures.get(1)?.as_str().to_string();
    let filename = captures.get(2)?.as_str().trim();
    if filename.is_empty() {
        return None;
    }
    Some(EntryTitle {
        dataset_id,
        filename: filename.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_keeps_inner_separators() {
        let parsed = parse_entry_title("#7 | a | b.nc").unwrap();
        assert_eq!(parsed.dataset_id, "7");
        assert_eq!(parsed.filename, "a | b.nc");
    }

    #[test]
    fn blank_filename_is_rejected() {
        assert_eq!(parse_entry_title("#7 |   "), None);
    }
}
