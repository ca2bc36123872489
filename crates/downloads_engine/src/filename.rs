const MAX_STEM_CHARS: usize = 80;
const MAX_EXTENSION_CHARS: usize = 8;

/// Portable filename for a downloaded transcript: `{title}_transcript.txt`.
pub fn transcript_filename(title: &str) -> String {
    format!("{}_transcript.txt", sanitize_filename(title))
}

/// Extracts the `filename=` parameter of a `Content-Disposition` header.
pub fn content_disposition_filename(header: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .filter_map(|param| param.split_once('='))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("filename"))
        .map(|(_, value)| value.trim().trim_matches('"').to_string())
        .filter(|value| !value.is_empty())
}

/// Makes `input` safe to use as a filename on Windows, macOS and Linux.
///
/// Path separators, reserved punctuation and control characters become `_`
/// (runs collapse to one), leading/trailing `_`, spaces and dots are dropped,
/// and the stem is capped at 80 characters with a short extension kept.
/// Never returns an empty name.
pub fn sanitize_filename(input: &str) -> String {
    let mut cleaned = String::with_capacity(input.len());
    for c in input.chars() {
        let c = if is_forbidden(c) { '_' } else { c };
        if c == '_' && cleaned.ends_with('_') {
            continue;
        }
        cleaned.push(c);
    }
    let cleaned = cleaned.trim_matches(&['_', ' ', '.'][..]);
    if cleaned.is_empty() {
        return "untitled".to_string();
    }

    let (stem, extension) = match cleaned.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && ext.chars().count() <= MAX_EXTENSION_CHARS => {
            (stem, Some(ext))
        }
        _ => (cleaned, None),
    };
    let mut name: String = stem.chars().take(MAX_STEM_CHARS).collect();
    if is_reserved_windows_name(&name) {
        name.push('_');
    }
    if let Some(ext) = extension {
        name.push('.');
        name.push_str(ext);
    }
    name
}

fn is_forbidden(c: char) -> bool {
    c.is_control() || matches!(c, '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|')
}

fn is_reserved_windows_name(stem: &str) -> bool {
    const DEVICES: [&str; 4] = ["CON", "PRN", "AUX", "NUL"];
    if DEVICES.iter().any(|device| device.eq_ignore_ascii_case(stem)) {
        return true;
    }
    // COM1..COM9, LPT1..LPT9
    let upper = stem.to_ascii_uppercase();
    matches!(
        (upper.get(..3), upper.get(3..)),
        (Some("COM" | "LPT"), Some(digit)) if matches!(digit.as_bytes(), [b'1'..=b'9'])
    )
}
