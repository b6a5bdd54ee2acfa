/// Leading marker of every file this tool writes.
pub const CANONICAL_PREFIX: &str = "HALO-DB";

/// Suffix of in-flight downloads. A file carrying it is never complete.
pub const PARTIAL_SUFFIX: &str = ".partial";

/// Local file name for a dataset release:
/// `HALO-DB_dataset{id}_release{release}_{filename}`.
///
/// The name is a pure function of its inputs and doubles as the record that the
/// release has been fetched in full.
pub fn canonical_filename(dataset_id: &str, release: &str, filename: &str) -> String {
    format!(
        "{CANONICAL_PREFIX}_dataset{}_release{}_{}",
        sanitize_component(dataset_id),
        sanitize_component(release),
        sanitize_component(filename)
    )
}

/// Sibling name used while a download is still in progress.
pub fn partial_filename(canonical: &str) -> String {
    format!("{canonical}{PARTIAL_SUFFIX}")
}

fn sanitize_component(input: &str) -> String {
    input
        .trim()
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect()
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}
