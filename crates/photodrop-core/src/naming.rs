//! Field sanitization and deterministic artifact naming.
//!
//! Every textual form field goes through [`clean`] before any further use,
//! so no path separator or filesystem-reserved character can reach a remote
//! path. Artifact names are fully determined by the cleaned fields plus the
//! server-local date.

use chrono::NaiveDate;

/// Extensions accepted for upload, compared after lower-casing.
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Characters that are reserved on common filesystems, replaced by `_`.
const RESERVED_CHARS: [char; 9] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Normalize a form field: trim surrounding whitespace, collapse internal
/// whitespace runs to a single space, and replace each filesystem-reserved
/// character with an underscore. Idempotent.
pub fn clean(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_whitespace = false;
    for c in raw.trim().chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                out.push(' ');
                in_whitespace = true;
            }
        } else {
            in_whitespace = false;
            out.push(if RESERVED_CHARS.contains(&c) { '_' } else { c });
        }
    }
    out
}

/// Extension of the original filename: the trailing `.<ascii alphanumerics>`
/// suffix, lower-cased. Defaults to `jpg` when the name has no usable suffix.
pub fn extension_of(filename: &str) -> String {
    match filename.rsplit_once('.') {
        Some((_, ext))
            if !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            ext.to_ascii_lowercase()
        }
        _ => "jpg".to_string(),
    }
}

pub fn is_allowed_extension(ext: &str) -> bool {
    ALLOWED_EXTENSIONS.contains(&ext)
}

/// Server-local date as an 8-digit `YYYYMMDD` string.
pub fn today_ymd() -> String {
    ymd(chrono::Local::now().date_naive())
}

pub fn ymd(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// Base artifact name: `patient[_owner]_date_title`. The owner segment and
/// its separator are omitted entirely when the owner is empty.
pub fn artifact_base_name(patient: &str, owner: &str, date: &str, title: &str) -> String {
    if owner.is_empty() {
        format!("{patient}_{date}_{title}")
    } else {
        format!("{patient}_{owner}_{date}_{title}")
    }
}

/// Join a remote folder and a file name with a single slash.
pub fn join_remote_path(folder: &str, file_name: &str) -> String {
    format!("{}/{}", folder.trim_end_matches('/'), file_name)
}
