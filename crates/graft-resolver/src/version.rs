//! Version parsing and the segment comparator behind "newest wins".
//!
//! Versions are split into segments at every non-alphanumeric character and
//! at every transition between digits and letters:
//! - numeric segments compare as unbounded integers
//! - other segments compare as byte strings
//! - a numeric segment is greater than a non-numeric one
//! - trailing zero segments are ignored, so `1.0` equals `1.0.0`
//!
//! After trailing zeros are dropped, segment sequences compare
//! lexicographically and a proper prefix sorts first: `1.0 < 1.0.1` and
//! `1.0 < 1.0.rc`.

use std::cmp::Ordering;
use std::fmt;

/// A parsed version with comparable segments.
#[derive(Debug, Clone)]
pub struct Version {
    original: String,
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
enum Segment {
    /// Decimal digits with leading zeros stripped.
    Numeric(String),
    Text(String),
}

impl Version {
    pub fn parse(version: &str) -> Self {
        let mut segments = parse_segments(version);
        while segments
            .last()
            .is_some_and(|s| matches!(s, Segment::Numeric(n) if n.is_empty()))
        {
            segments.pop();
        }
        Self {
            original: version.to_string(),
            segments,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.original
    }
}

/// Compare two version strings.
pub fn compare(a: &str, b: &str) -> Ordering {
    Version::parse(a).cmp(&Version::parse(b))
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        for (a, b) in self.segments.iter().zip(&other.segments) {
            let ord = compare_two_segments(a, b);
            if ord != Ordering::Equal {
                return ord;
            }
        }
        self.segments.len().cmp(&other.segments.len())
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn compare_two_segments(a: &Segment, b: &Segment) -> Ordering {
    match (a, b) {
        // Without leading zeros a longer digit string is a larger number.
        (Segment::Numeric(a), Segment::Numeric(b)) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
        (Segment::Numeric(_), Segment::Text(_)) => Ordering::Greater,
        (Segment::Text(_), Segment::Numeric(_)) => Ordering::Less,
        (Segment::Text(a), Segment::Text(b)) => a.as_bytes().cmp(b.as_bytes()),
    }
}

fn parse_segments(version: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut current = String::new();

    for ch in version.chars() {
        if !ch.is_alphanumeric() {
            flush(&mut current, &mut segments);
            continue;
        }
        let boundary = current
            .chars()
            .last()
            .is_some_and(|prev| prev.is_ascii_digit() != ch.is_ascii_digit());
        if boundary {
            flush(&mut current, &mut segments);
        }
        current.push(ch);
    }
    flush(&mut current, &mut segments);

    segments
}

fn flush(current: &mut String, segments: &mut Vec<Segment>) {
    if current.is_empty() {
        return;
    }
    let segment = if current.bytes().all(|b| b.is_ascii_digit()) {
        Segment::Numeric(current.trim_start_matches('0').to_string())
    } else {
        Segment::Text(current.clone())
    };
    segments.push(segment);
    current.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s)
    }

    #[test]
    fn basic_ordering() {
        assert!(v("1.0") < v("2.0"));
        assert!(v("1.0.0") < v("1.0.1"));
        assert!(v("1.0.1") < v("1.1.0"));
    }

    #[test]
    fn numeric_segments_compare_as_integers() {
        assert!(v("1.9") < v("1.10"));
        assert!(v("2") < v("10"));
        assert_eq!(v("1.01"), v("1.1"));
    }

    #[test]
    fn huge_numbers_do_not_overflow() {
        assert!(v("1.99999999999999999999999") < v("1.100000000000000000000000"));
    }

    #[test]
    fn trailing_zeros_equal() {
        assert_eq!(v("1.0"), v("1.0.0"));
        assert_eq!(v("1"), v("1.0.0.0"));
        assert_eq!(compare("1.0", "1.0.0"), Ordering::Equal);
    }

    #[test]
    fn fewer_segments_sort_first() {
        assert!(v("1.0") < v("1.0.1"));
        assert!(v("1.0") < v("1.0.rc"));
        assert!(v("1.0") < v("1.0-beta"));
    }

    #[test]
    fn numeric_beats_text() {
        assert!(v("1.0.a") < v("1.0.0.1"));
        assert!(v("1.rc") < v("1.1"));
        assert!(v("1.0.a") > v("1"));
    }

    #[test]
    fn text_segments_compare_bytewise() {
        assert!(v("1.0-alpha") < v("1.0-beta"));
        assert!(v("1.0-RC") < v("1.0-rc"));
    }

    #[test]
    fn digit_letter_transitions_split() {
        assert_eq!(v("1.0rc1"), v("1.0.rc.1"));
        assert!(v("1.0rc1") < v("1.0rc2"));
    }

    #[test]
    fn separators_are_interchangeable() {
        assert_eq!(v("1-2_3+4"), v("1.2.3.4"));
    }

    #[test]
    fn empty_version_is_smallest() {
        assert!(v("") < v("0.1"));
        assert_eq!(v(""), v("0"));
    }

    #[test]
    fn display_keeps_original() {
        assert_eq!(v("1.8.0-jre").to_string(), "1.8.0-jre");
    }
}
