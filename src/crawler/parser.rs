//! Raw content parsing for link extraction and text extraction
//!
//! Both passes are literal scans over the raw markup. Malformed markup never
//! raises; it degrades to fewer links or imperfect text.

/// Literal marker opening a hyperlink reference
const LINK_MARKER: &str = "<a href=";

/// Extracted information from a raw document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDocument {
    /// Plain text with all `<...>` markup removed
    pub text: String,

    /// Outbound link targets in document order, duplicates kept
    pub links: Vec<String>,
}

/// Parses raw content into plain text and outbound links
///
/// # Example
///
/// ```
/// use ripple_search::crawler::parse_document;
///
/// let parsed = parse_document(r#"<p>Hello <a href="/next">world</a></p>"#);
/// assert_eq!(parsed.text, "Hello world");
/// assert_eq!(parsed.links, vec!["/next".to_string()]);
/// ```
pub fn parse_document(raw: &str) -> ParsedDocument {
    ParsedDocument {
        text: to_plain_text(raw),
        links: extract_links(raw),
    }
}

/// Returns the URL of every hyperlink reference in `raw`, in document order
///
/// # Link Extraction Rules
///
/// - Scan for the literal `<a href=` marker
/// - Take the text between the first two `"` characters after it
/// - Resume scanning at the closing quote
///
/// Extraction stops at the first marker without two following quotes or with
/// an empty value between them; links found before that are returned.
pub fn extract_links(raw: &str) -> Vec<String> {
    let mut links = Vec::new();
    let mut rest = raw;

    while let Some((url, end)) = next_target(rest) {
        links.push(url.to_string());
        rest = &rest[end..];
    }

    links
}

/// Finds the next link target, returning it with the offset of its closing quote
fn next_target(page: &str) -> Option<(&str, usize)> {
    let start = page.find(LINK_MARKER)?;
    let open = start + page[start..].find('"')?;
    let close = open + 1 + page[open + 1..].find('"')?;

    let url = &page[open + 1..close];
    if url.is_empty() {
        return None;
    }

    Some((url, close))
}

/// Removes all markup delimited by `<...>`
///
/// The content is split on `>`; of every segment only the part before its
/// first `<` is kept. Segments without `<` are kept whole.
pub fn to_plain_text(raw: &str) -> String {
    raw.split('>')
        .map(|segment| match segment.find('<') {
            Some(pos) => &segment[..pos],
            None => segment,
        })
        .collect()
}
