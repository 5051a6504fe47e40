//! Text normalization helpers shared by the ingestion pipeline.

use scraper::Html;
use url::Url;

/// Extract the visible text of a markup fragment. Inputs without both
/// markup delimiters are returned unchanged; malformed markup is parsed
/// best-effort (the parser is lenient and never fails).
pub fn extract_plain_text(raw: &str) -> String {
    if !(raw.contains('<') && raw.contains('>')) {
        return raw.to_string();
    }
    let fragment = Html::parse_fragment(raw);
    let text: Vec<&str> = fragment.root_element().text().collect();
    text.join(" ").split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Host name of a URL with a leading `www.` removed. Unparseable or
/// host-less URLs yield an empty string.
pub fn host_of(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => {
            let host = parsed.host_str().unwrap_or("");
            host.strip_prefix("www.").unwrap_or(host).to_string()
        }
        Err(_) => String::new(),
    }
}
