//! Path shape helpers shared by validation and rendering

use std::path::Path;

/// Split a path at its last `/` or `\` separator into (parent, file name).
///
/// Returns `None` when the path has no separator. A leading separator
/// yields the filesystem root as parent.
pub fn split_parent(path: &str) -> Option<(&str, &str)> {
    let index = path.rfind(['/', '\\'])?;
    let parent = if index == 0 { &path[..1] } else { &path[..index] };
    Some((parent, &path[index + 1..]))
}

/// True when the file name carries a `.` with at least one character on each side
pub fn has_extension(file_name: &str) -> bool {
    file_name
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < file_name.len())
}

/// True when `path` names an existing parent directory plus a file name with extension
pub fn is_output_path(path: &str) -> bool {
    match split_parent(path) {
        Some((parent, name)) => has_extension(name) && Path::new(parent).is_dir(),
        None => false,
    }
}

/// Null sink the first encoding pass writes to
pub fn null_sink() -> &'static str {
    if cfg!(windows) {
        "NUL"
    } else {
        "/dev/null"
    }
}
