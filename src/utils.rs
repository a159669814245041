//! Display-title cleanup and natural ordering helpers.

use std::cmp::Ordering;

use crate::constants::titles::{EXAMINATION_NOTE_PREFIX, FALLBACK_TITLE};
use crate::record::PaperRecord;

/// Derive a human-readable title for a record.
///
/// Prefers an explicit title; otherwise cleans the URL's file name: the
/// `.pdf` extension, underscore/percent-encoded separators, any
/// `(for examination from NNNN)` note, and a leading syllabus-code number
/// are stripped. Records with neither title nor URL fall back to
/// `"Resource"`.
pub fn clean_title(record: &PaperRecord) -> String {
    if let Some(title) = &record.title {
        return title.clone();
    }
    if record.url.is_empty() {
        return FALLBACK_TITLE.to_string();
    }
    let filename = record.url.rsplit('/').next().unwrap_or(&record.url);
    let stem = filename.strip_suffix(".pdf").unwrap_or(filename);
    let spaced = stem.replace('_', " ").replace("%20", " ");
    let without_note = strip_examination_note(&spaced);
    strip_leading_code(without_note.trim()).trim().to_string()
}

/// Natural string comparison: digit runs compare by numeric value, other
/// runs character by character, so `"2"` orders before `"10"`.
pub fn numeric_compare(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();
    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                if x.is_ascii_digit() && y.is_ascii_digit() {
                    let run_a = take_digit_run(&mut left);
                    let run_b = take_digit_run(&mut right);
                    let ordering = compare_digit_runs(&run_a, &run_b);
                    if ordering != Ordering::Equal {
                        return ordering;
                    }
                } else {
                    if x != y {
                        return x.cmp(&y);
                    }
                    left.next();
                    right.next();
                }
            }
        }
    }
}

fn take_digit_run(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(ch) = chars.peek().copied() {
        if !ch.is_ascii_digit() {
            break;
        }
        run.push(ch);
        chars.next();
    }
    run
}

fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a_trimmed = a.trim_start_matches('0');
    let b_trimmed = b.trim_start_matches('0');
    a_trimmed
        .len()
        .cmp(&b_trimmed.len())
        .then_with(|| a_trimmed.cmp(b_trimmed))
}

fn strip_examination_note(text: &str) -> String {
    let Some(start) = text.find(EXAMINATION_NOTE_PREFIX) else {
        return text.to_string();
    };
    let tail = &text[start + EXAMINATION_NOTE_PREFIX.len()..];
    let Some(close) = tail.find(')') else {
        return text.to_string();
    };
    let inner = &tail[..close];
    if inner.is_empty() || !inner.chars().all(|ch| ch.is_ascii_digit()) {
        return text.to_string();
    }
    let mut cleaned = String::with_capacity(text.len());
    cleaned.push_str(&text[..start]);
    cleaned.push_str(&tail[close + 1..]);
    cleaned
}

fn strip_leading_code(text: &str) -> &str {
    let digits = text.chars().take_while(|ch| ch.is_ascii_digit()).count();
    if digits == 0 {
        return text;
    }
    let rest = &text[digits..];
    match rest.strip_prefix(' ') {
        Some(stripped) => stripped,
        None => text,
    }
}
