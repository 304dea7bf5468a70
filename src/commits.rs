use serde::Serialize;

/// Length of a full SHA-1 commit id as printed by `%H`.
const FULL_HASH_LEN: usize = 40;

/// Abbreviated hash length used in reports.
const SHORT_HASH_LEN: usize = 7;

/// One commit as reported by the branch log query. Immutable once parsed;
/// the branch records which query first returned the commit.
#[derive(Clone, Debug, Serialize)]
pub struct CommitRecord {
    pub hash: String,
    pub short_hash: String,
    pub date: String,
    pub author: String,
    pub message: String,
    pub branch: String,
}

/// Parse pipe-delimited log lines (`hash|date|author|subject`) into
/// records, preserving input order.
///
/// Lines with fewer than four fields are dropped, as are lines whose
/// first field is not a full-length hash. The split is capped at four
/// parts so subjects containing `|` survive intact. Empty input yields
/// an empty vec, not an error.
pub fn parse_log(text: &str, branch: &str) -> Vec<CommitRecord> {
    let mut records = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut parts = line.splitn(4, '|');
        let (Some(hash), Some(date), Some(author), Some(message)) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            continue;
        };
        if hash.len() != FULL_HASH_LEN {
            continue;
        }
        records.push(CommitRecord {
            hash: hash.to_string(),
            short_hash: hash[..SHORT_HASH_LEN].to_string(),
            date: date.to_string(),
            author: author.to_string(),
            message: message.to_string(),
            branch: branch.to_string(),
        });
    }
    records
}

#[cfg(test)]
#[path = "commits_test.rs"]
mod tests;
