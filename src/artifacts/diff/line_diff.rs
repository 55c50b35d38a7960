use bytes::Bytes;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineChange {
    Removed(String),
    Added(String),
}

impl LineChange {
    pub fn text(&self) -> &str {
        match self {
            LineChange::Removed(text) | LineChange::Added(text) => text,
        }
    }
}

/// Split content into lines, tolerating invalid UTF-8
pub fn split_lines(content: &Bytes) -> Vec<String> {
    String::from_utf8_lossy(content)
        .lines()
        .map(str::to_string)
        .collect()
}

/// Compare two versions line by line at equal positions
///
/// Equal lines are skipped; differing lines yield the old line as a removal
/// followed by the new line as an addition. Lines past the end of the
/// shorter side are pure removals or additions.
pub fn line_diff(old: &[String], new: &[String]) -> Vec<LineChange> {
    let mut changes = Vec::new();

    for position in 0..old.len().max(new.len()) {
        match (old.get(position), new.get(position)) {
            (Some(old_line), Some(new_line)) if old_line == new_line => {}
            (old_line, new_line) => {
                if let Some(old_line) = old_line {
                    changes.push(LineChange::Removed(old_line.clone()));
                }
                if let Some(new_line) = new_line {
                    changes.push(LineChange::Added(new_line.clone()));
                }
            }
        }
    }

    changes
}
