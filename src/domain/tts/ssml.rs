use super::model::Prosody;
use regex::Regex;
use std::sync::OnceLock;

const SENTENCE_PAUSE: &str = r#"<break time="500ms"/>"#;
const CLAUSE_PAUSE: &str = r#"<break time="300ms"/>"#;

fn sentence_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"([.!?])\s+").expect("valid sentence pattern"))
}

fn clause_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r",\s+").expect("valid clause pattern"))
}

/// Escape characters that are significant in XML
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Insert short pauses after sentences and commas
pub fn add_pauses(text: &str) -> String {
    let with_sentences =
        sentence_pattern().replace_all(text, format!("${{1}}{} ", SENTENCE_PAUSE));
    clause_pattern()
        .replace_all(&with_sentences, format!(",{} ", CLAUSE_PAUSE))
        .into_owned()
}

/// Render plain text as an SSML document with pauses and prosody
pub fn render(text: &str, prosody: Prosody) -> String {
    let body = add_pauses(&escape(text));
    format!(
        r#"<speak><prosody rate="{}" pitch="{}">{}</prosody></speak>"#,
        prosody.rate.as_str(),
        prosody.pitch.as_str(),
        body
    )
}
