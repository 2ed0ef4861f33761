use std::fs::{File, OpenOptions};
use std::io;
use std::os::fd::{AsRawFd, RawFd};
use std::os::unix::fs::OpenOptionsExt;

use nix::errno::Errno;
use nix::libc;

use crate::parser::Redirect;

/// Open the file behind a redirection and return it with the standard
/// descriptor it should replace.
pub fn open_redirect(redirect: &Redirect) -> io::Result<(File, RawFd)> {
    match redirect {
        Redirect::Output(path) => {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o644)
                .open(path)?;
            Ok((file, libc::STDOUT_FILENO))
        }
        Redirect::Input(path) => Ok((File::open(path)?, libc::STDIN_FILENO)),
    }
}

/// Make `fd` the process's descriptor `target`.
///
/// The caller keeps ownership of `fd` and releases it afterwards.
pub fn replace_stream(fd: &impl AsRawFd, target: RawFd) -> nix::Result<()> {
    Errno::result(unsafe { libc::dup2(fd.as_raw_fd(), target) }).map(drop)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::os::unix::fs::PermissionsExt;

    #[test]
    fn test_output_creates_and_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        std::fs::write(&path, "old contents that are longer").unwrap();

        let redirect = Redirect::Output(path.to_string_lossy().into_owned());
        let (mut file, target) = open_redirect(&redirect).unwrap();
        assert_eq!(target, libc::STDOUT_FILENO);
        file.write_all(b"new").unwrap();
        drop(file);

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_output_mode_on_create() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fresh.txt");

        let redirect = Redirect::Output(path.to_string_lossy().into_owned());
        let (file, _) = open_redirect(&redirect).unwrap();
        drop(file);

        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        // the process umask can only remove bits
        assert_eq!(mode & !0o644, 0);
    }

    #[test]
    fn test_input_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");

        let redirect = Redirect::Input(path.to_string_lossy().into_owned());
        let err = open_redirect(&redirect).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
