//! Flat key-value `.properties` files
//!
//! Reading follows the usual line-oriented rules:
//! - `#` and `!` start comment lines, blank lines are skipped
//! - the key ends at the first unescaped `=`, `:` or whitespace
//! - a trailing odd run of backslashes continues the entry on the next line
//! - `\t`, `\n`, `\r`, `\f`, `\uXXXX` and `\<char>` escapes are decoded
//!
//! Writing escapes keys and values so that reading the output reproduces
//! the same pairs. Entries keep insertion order; setting an existing key
//! replaces its value in place.

/// An ordered set of string properties
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: Vec<(String, String)>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse properties text. Duplicate keys keep the last value.
    pub fn parse(input: &str) -> Self {
        let mut props = Self::new();
        for line in logical_lines(input) {
            let (key, value) = split_entry(&line);
            props.set(key, value);
        }
        props
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Insert or replace a property
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render the properties with a `#`-prefixed header comment.
    ///
    /// Every line of `header` becomes one comment line; an empty header
    /// writes no comment at all.
    pub fn store(&self, header: &str) -> String {
        let mut out = String::new();
        if !header.is_empty() {
            for line in header.lines() {
                out.push('#');
                out.push_str(line);
                out.push('\n');
            }
        }
        for (key, value) in &self.entries {
            out.push_str(&escape(key, true));
            out.push('=');
            out.push_str(&escape(value, false));
            out.push('\n');
        }
        out
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut props = Self::new();
        for (key, value) in iter {
            props.set(key, value);
        }
        props
    }
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

/// Join continued lines and drop comments and blank lines.
fn logical_lines(input: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut continuing = false;

    // Lines end at `\r\n`, `\r` or `\n`
    let normalized = input.replace("\r\n", "\n").replace('\r', "\n");

    for raw in normalized.lines() {
        let trimmed = raw.trim_start_matches(is_blank);
        let is_comment = trimmed.starts_with(|c: char| c == '#' || c == '!');
        if !continuing && (trimmed.is_empty() || is_comment) {
            continue;
        }

        let trailing = trimmed.chars().rev().take_while(|&c| c == '\\').count();
        if trailing % 2 == 1 {
            current.push_str(&trimmed[..trimmed.len() - 1]);
            continuing = true;
        } else {
            current.push_str(trimmed);
            lines.push(std::mem::take(&mut current));
            continuing = false;
        }
    }

    if continuing {
        lines.push(current);
    }
    lines
}

/// Split a logical line into its decoded key and value.
fn split_entry(line: &str) -> (String, String) {
    let chars: Vec<char> = line.chars().collect();
    let len = chars.len();

    let mut key_end = len;
    let mut has_separator = false;
    let mut i = 0;
    while i < len {
        match chars[i] {
            '\\' => {
                i += 2;
                continue;
            }
            '=' | ':' => {
                key_end = i;
                has_separator = true;
                break;
            }
            c if is_blank(c) => {
                key_end = i;
                break;
            }
            _ => i += 1,
        }
    }

    let mut value_start = key_end;
    if has_separator {
        value_start += 1;
    } else {
        while value_start < len && is_blank(chars[value_start]) {
            value_start += 1;
        }
        if value_start < len && matches!(chars[value_start], '=' | ':') {
            value_start += 1;
        }
    }
    while value_start < len && is_blank(chars[value_start]) {
        value_start += 1;
    }

    (
        unescape(&chars[..key_end]),
        unescape(&chars[value_start.min(len)..]),
    )
}

fn unescape(chars: &[char]) -> String {
    let mut out = String::with_capacity(chars.len());
    let mut units: Vec<u16> = Vec::new();
    let mut iter = chars.iter().copied().peekable();

    while let Some(c) = iter.next() {
        if c == '\\' && iter.peek() == Some(&'u') {
            iter.next();
            let digits: String = iter.by_ref().take(4).collect();
            let well_formed = digits.len() == 4 && digits.chars().all(|c| c.is_ascii_hexdigit());
            match u16::from_str_radix(&digits, 16) {
                Ok(unit) if well_formed => units.push(unit),
                _ => {
                    flush_units(&mut units, &mut out);
                    out.push('u');
                    out.push_str(&digits);
                }
            }
            continue;
        }

        flush_units(&mut units, &mut out);
        if c != '\\' {
            out.push(c);
            continue;
        }
        match iter.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some(other) => out.push(other),
            None => {}
        }
    }

    flush_units(&mut units, &mut out);
    out
}

/// Decode pending `\uXXXX` code units, pairing surrogates where possible.
fn flush_units(units: &mut Vec<u16>, out: &mut String) {
    if units.is_empty() {
        return;
    }
    out.extend(
        char::decode_utf16(units.drain(..)).map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER)),
    );
}

fn escape(text: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, c) in text.chars().enumerate() {
        match c {
            ' ' if is_key || i == 0 => out.push_str("\\ "),
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x0c' => out.push_str("\\f"),
            '=' | ':' | '#' | '!' => {
                out.push('\\');
                out.push(c);
            }
            c if c < ' ' || c > '~' => {
                let mut buf = [0u16; 2];
                for unit in c.encode_utf16(&mut buf) {
                    out.push_str(&format!("\\u{:04X}", unit));
                }
            }
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_pairs() {
        let props = Properties::parse("a=1\nb = two\nc:3\nd 4\n");
        assert_eq!(props.get("a"), Some("1"));
        assert_eq!(props.get("b"), Some("two"));
        assert_eq!(props.get("c"), Some("3"));
        assert_eq!(props.get("d"), Some("4"));
        assert_eq!(props.len(), 4);
    }

    #[test]
    fn test_comments_and_blank_lines_skipped() {
        let props =
            Properties::parse("# comment\n! also comment\n\n   \nkey=value\n  # indented\n");
        assert_eq!(props.len(), 1);
        assert_eq!(props.get("key"), Some("value"));
    }

    #[test]
    fn test_value_keeps_trailing_whitespace() {
        let props = Properties::parse("key=  padded  \n");
        assert_eq!(props.get("key"), Some("padded  "));
    }

    #[test]
    fn test_empty_value_and_bare_key() {
        let props = Properties::parse("empty=\nbare\n");
        assert_eq!(props.get("empty"), Some(""));
        assert_eq!(props.get("bare"), Some(""));
    }

    #[test]
    fn test_last_duplicate_wins() {
        let props = Properties::parse("k=1\nk=2\n");
        assert_eq!(props.get("k"), Some("2"));
        assert_eq!(props.len(), 1);
    }

    #[test]
    fn test_line_continuation() {
        let props = Properties::parse("list=alice,\\\n      bob,\\\n  carol\nnext=x\n");
        assert_eq!(props.get("list"), Some("alice,bob,carol"));
        assert_eq!(props.get("next"), Some("x"));
    }

    #[test]
    fn test_even_backslashes_do_not_continue() {
        let props = Properties::parse("path=c:\\\\\nother=1\n");
        assert_eq!(props.get("path"), Some("c:\\"));
        assert_eq!(props.get("other"), Some("1"));
    }

    #[test]
    fn test_escapes_decoded() {
        let props = Properties::parse("my\\ key=tab\\there\\nnew \\u00e9\\=\n");
        assert_eq!(props.get("my key"), Some("tab\there\nnew é="));
    }

    #[test]
    fn test_surrogate_pair_escape() {
        let props = Properties::parse("smile=\\uD83D\\uDE00\n");
        assert_eq!(props.get("smile"), Some("😀"));
    }

    #[test]
    fn test_malformed_unicode_escape_kept_literally() {
        let props = Properties::parse("bad=\\uZZ\n");
        assert_eq!(props.get("bad"), Some("uZZ"));
    }

    #[test]
    fn test_signed_unicode_escape_kept_literally() {
        let props = Properties::parse("k=\\u+041\n");
        assert_eq!(props.get("k"), Some("u+041"));
    }

    #[test]
    fn test_cr_only_line_endings() {
        let props = Properties::parse("kick-timeout=45\rkick-message=Bye\r#note\rlist=a,\\\r  b\r");
        assert_eq!(props.len(), 3);
        assert_eq!(props.get("kick-timeout"), Some("45"));
        assert_eq!(props.get("kick-message"), Some("Bye"));
        assert_eq!(props.get("list"), Some("a,b"));
    }

    #[test]
    fn test_mixed_line_endings() {
        let props = Properties::parse("a=1\r\nb=2\rc=3\n");
        assert_eq!(props.get("a"), Some("1"));
        assert_eq!(props.get("b"), Some("2"));
        assert_eq!(props.get("c"), Some("3"));
    }

    #[test]
    fn test_crlf_line_endings() {
        let props = Properties::parse("a=1\r\nb=2\r\n");
        assert_eq!(props.get("a"), Some("1"));
        assert_eq!(props.get("b"), Some("2"));
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut props = Properties::new();
        assert!(props.is_empty());
        props.set("first", "1");
        props.set("second", "2");
        props.set("first", "3");

        let keys: Vec<&str> = props.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["first", "second"]);
        assert_eq!(props.get("first"), Some("3"));
    }

    #[test]
    fn test_store_writes_header_and_entries() {
        let props: Properties = [("kick-timeout", "30"), ("kick-message", "Bye")]
            .into_iter()
            .collect();
        let text = props.store("line one\nline two");

        assert_eq!(
            text,
            "#line one\n#line two\nkick-timeout=30\nkick-message=Bye\n"
        );
    }

    #[test]
    fn test_store_escapes_special_characters() {
        let props: Properties = [("a key", " lead: #1 é\\")].into_iter().collect();
        let text = props.store("");

        assert_eq!(text, "a\\ key=\\ lead\\: \\#1 \\u00E9\\\\\n");
        assert_eq!(Properties::parse(&text), props);
    }

    #[test]
    fn test_stored_text_reads_back() {
        let props: Properties = [
            ("kick-message", "Kicked for idling."),
            ("exempt-players", "name1,name2,name3"),
            ("multi", "line\nbreak\ttab"),
            ("empty", ""),
        ]
        .into_iter()
        .collect();

        let parsed = Properties::parse(&props.store("header"));
        assert_eq!(parsed, props);
    }
}
