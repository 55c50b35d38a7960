use bytes::Bytes;

pub const OURS_MARKER: &str = "<<<<<<< our changes";
pub const SEPARATOR_MARKER: &str = "=======";
pub const THEIRS_MARKER: &str = ">>>>>>> their changes";

/// Content written in place of a conflicted file
///
/// A side that deleted the file contributes an empty section.
pub fn conflict_markers(ours: &[u8], theirs: &[u8]) -> Bytes {
    let mut content = Vec::with_capacity(ours.len() + theirs.len() + 64);

    content.extend_from_slice(OURS_MARKER.as_bytes());
    content.push(b'\n');
    push_section(&mut content, ours);
    content.extend_from_slice(SEPARATOR_MARKER.as_bytes());
    content.push(b'\n');
    push_section(&mut content, theirs);
    content.extend_from_slice(THEIRS_MARKER.as_bytes());
    content.push(b'\n');

    Bytes::from(content)
}

fn push_section(content: &mut Vec<u8>, section: &[u8]) {
    content.extend_from_slice(section);
    if !section.is_empty() && !section.ends_with(b"\n") {
        content.push(b'\n');
    }
}
