//! Reading real OS descriptors
#![cfg(unix)]

use nextline::{Config, LineReader, ReadError, ReadOutcome, SystemDescriptors};
use std::fs::{self, File};
use std::io::Write;
use std::os::unix::io::{AsRawFd, FromRawFd, OwnedFd};
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

fn pipe() -> (File, File) {
    let mut fds = [0; 2];
    // SAFETY: `fds` has room for the two descriptors pipe(2) writes.
    let rc = unsafe { libc::pipe(fds.as_mut_ptr()) };
    assert_eq!(rc, 0, "pipe failed: {}", std::io::Error::last_os_error());
    // SAFETY: both descriptors were just created and are owned by nobody else.
    unsafe {
        (
            File::from(OwnedFd::from_raw_fd(fds[0])),
            File::from(OwnedFd::from_raw_fd(fds[1])),
        )
    }
}

fn reader(chunk_size: usize) -> LineReader<SystemDescriptors> {
    let config = Config::builder().chunk_size(chunk_size).build().unwrap();
    LineReader::with_config(SystemDescriptors, config)
}

#[test]
fn test_read_file_lines() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("lines.txt");
    fs::write(&file_path, "hello\nworld").unwrap();

    let file = File::open(&file_path).unwrap();
    let fd = file.as_raw_fd();
    let mut reader = reader(5);

    assert_eq!(reader.read_line(fd).into_line().unwrap(), "hello\n");
    assert_eq!(reader.read_line(fd).into_line().unwrap(), "world");
    assert_eq!(reader.read_line(fd), ReadOutcome::EndOfStream);
}

#[test]
fn test_empty_file() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("empty.txt");
    File::create(&file_path).unwrap();

    let file = File::open(&file_path).unwrap();
    let mut reader = reader(1024);

    assert_eq!(reader.read_line(file.as_raw_fd()), ReadOutcome::EndOfStream);
}

#[test]
fn test_two_files_interleaved() {
    let temp_dir = TempDir::new().unwrap();
    let path_a = temp_dir.path().join("a.txt");
    let path_b = temp_dir.path().join("b.txt");
    fs::write(&path_a, "A1\nA2\n").unwrap();
    fs::write(&path_b, "B1\nB2\n").unwrap();

    let file_a = File::open(&path_a).unwrap();
    let file_b = File::open(&path_b).unwrap();
    let (a, b) = (file_a.as_raw_fd(), file_b.as_raw_fd());
    let mut reader = reader(4);

    assert_eq!(reader.read_line(a).into_line().unwrap(), "A1\n");
    assert_eq!(reader.read_line(b).into_line().unwrap(), "B1\n");
    assert_eq!(reader.read_line(a).into_line().unwrap(), "A2\n");
    assert_eq!(reader.read_line(b).into_line().unwrap(), "B2\n");
    assert_eq!(reader.read_line(a), ReadOutcome::EndOfStream);
    assert_eq!(reader.read_line(b), ReadOutcome::EndOfStream);
}

#[test]
fn test_pipe_data_arrives_later() {
    let (read_end, mut write_end) = pipe();
    let fd = read_end.as_raw_fd();
    let mut reader = reader(8);

    write_end.write_all(b"partial").unwrap();
    let writer = thread::spawn(move || {
        thread::sleep(Duration::from_millis(20));
        write_end.write_all(b" line\nrest").unwrap();
    });

    // Blocks until the rest of the line shows up
    assert_eq!(reader.read_line(fd).into_line().unwrap(), "partial line\n");
    writer.join().unwrap();

    assert_eq!(reader.read_line(fd).into_line().unwrap(), "rest");
    assert_eq!(reader.read_line(fd), ReadOutcome::EndOfStream);
}

#[test]
fn test_bad_descriptor_is_an_error() {
    let fd = i32::MAX;
    let mut reader = reader(16);

    match reader.read_line(fd) {
        ReadOutcome::Error(ReadError::Io { descriptor, .. }) => assert_eq!(descriptor, fd),
        other => panic!("expected an I/O error, got {other:?}"),
    }
    assert_eq!(reader.tracked(), 0);
}

#[test]
fn test_write_only_descriptor_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let file = File::create(temp_dir.path().join("out.txt")).unwrap();

    let mut reader = reader(16);
    assert!(reader.read_line(file.as_raw_fd()).is_error());
}
