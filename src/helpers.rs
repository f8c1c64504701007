//! I/O error helpers.
//!
//! Turns a bare io::Error into a message naming the operation, the path and a
//! short hint for the failures operators actually hit while sampling a photo
//! folder (permissions, cross-partition rename, read-only media).
//!
//! Usage:
//!   fs::create_dir_all(dir).map_err(io_error_with_help("create output dir", dir))?;

use anyhow::anyhow;
use std::io;
use std::path::Path;

/// Hint keyed on the raw OS code, when one is available.
fn os_hint(code: i32) -> Option<&'static str> {
    #[cfg(unix)]
    {
        match code {
            libc::EACCES | libc::EPERM => {
                Some("permission denied; check ownership and write permissions")
            }
            libc::EXDEV => Some("cross-partition; input and output must be on the same volume"),
            libc::ENOENT => Some("path not found; was it moved by another process?"),
            libc::EEXIST => Some("already exists"),
            libc::ENOSPC => Some("no space left on device"),
            libc::EROFS => Some("read-only filesystem"),
            libc::ENAMETOOLONG => Some("filename or path too long"),
            libc::EMFILE | libc::ENFILE => Some("too many open files"),
            _ => None,
        }
    }
    #[cfg(windows)]
    {
        match code {
            5 => Some("access denied; check permissions"),
            17 => Some("not same device; input and output must be on the same volume"),
            32 => Some("sharing violation; file is open in another program"),
            2 | 3 => Some("path not found; was it moved by another process?"),
            80 | 183 => Some("already exists"),
            112 => Some("disk full"),
            19 => Some("write protected media"),
            _ => None,
        }
    }
    #[cfg(not(any(unix, windows)))]
    {
        let _ = code;
        None
    }
}

/// Hint keyed on the portable error kind.
fn kind_hint(kind: io::ErrorKind) -> Option<&'static str> {
    match kind {
        io::ErrorKind::PermissionDenied => {
            Some("permission denied; check ownership and write permissions")
        }
        io::ErrorKind::NotFound => Some("path not found"),
        io::ErrorKind::AlreadyExists => Some("already exists"),
        _ => None,
    }
}

/// "<op> '<path>': <error> (<hint>) [os code: N]"
pub fn describe_io_error(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);
    let hint = match e.raw_os_error() {
        Some(code) => os_hint(code),
        None => kind_hint(e.kind()),
    };
    if let Some(h) = hint {
        msg.push_str(&format!(" ({h})"));
    }
    if let Some(code) = e.raw_os_error() {
        msg.push_str(&format!(" [os code: {code}]"));
    }
    msg
}

/// Adapter for anyhow::Result code: `.map_err(io_error_with_help("op", path))`.
pub fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> anyhow::Error + 'a {
    move |e: io::Error| anyhow!(describe_io_error(op, path, &e))
}

/// True for EXDEV / ERROR_NOT_SAME_DEVICE.
pub fn is_cross_device(e: &io::Error) -> bool {
    match e.raw_os_error() {
        #[cfg(unix)]
        Some(code) => code == libc::EXDEV,
        #[cfg(windows)]
        Some(code) => code == 17,
        #[cfg(not(any(unix, windows)))]
        Some(_) => false,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_op_and_path() {
        let e = io::Error::new(io::ErrorKind::PermissionDenied, "nope");
        let msg = describe_io_error("rename", Path::new("/x/a.JPG"), &e);
        assert!(msg.starts_with("rename '/x/a.JPG': nope"), "{msg}");
        assert!(msg.contains("permission denied"), "{msg}");
    }

    #[cfg(unix)]
    #[test]
    fn cross_device_is_detected() {
        let e = io::Error::from_raw_os_error(libc::EXDEV);
        assert!(is_cross_device(&e));
        let msg = describe_io_error("rename", Path::new("/x"), &e);
        assert!(msg.contains("same volume"), "{msg}");
        assert!(!is_cross_device(&io::Error::from_raw_os_error(libc::EACCES)));
    }
}
