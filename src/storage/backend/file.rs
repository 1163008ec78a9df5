//! Flat-file store
//!
//! The file holds line pairs: a key line followed by its value line, each
//! terminated by `\n`. There is no index; `add` and `get` rewind to the start
//! of the file and scan every pair, so both cost O(records) and keep only one
//! record in memory at a time.
//!
//! Values are written verbatim. A value containing `\n` breaks the pairing of
//! every record after it; escaping it would change the on-disk format.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::errors::{Result, ShortenerError};
use crate::storage::{Storer, encoder};

pub struct FileStore {
    path: PathBuf,
    file: Option<File>,
}

impl FileStore {
    /// Open `path` for reading and writing, creating it if absent.
    /// Existing records are kept.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|e| {
                ShortenerError::open(format!(
                    "cannot open file store '{}': {}",
                    path.display(),
                    e
                ))
            })?;

        Ok(Self {
            path,
            file: Some(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn file_mut(&mut self) -> Result<&mut File> {
        let path = &self.path;
        self.file.as_mut().ok_or_else(|| {
            ShortenerError::closed(format!("file store '{}' is closed", path.display()))
        })
    }

    /// Rewind and walk every (key, value) pair until `matches` accepts one.
    fn scan<F>(&mut self, mut matches: F) -> Result<Option<(String, String)>>
    where
        F: FnMut(&str, &str) -> bool,
    {
        let file = self.file_mut()?;
        file.seek(SeekFrom::Start(0))
            .map_err(|e| ShortenerError::read(format!("cannot rewind file store: {}", e)))?;

        let mut reader = BufReader::new(file);
        let mut key = String::new();
        let mut value = String::new();

        loop {
            key.clear();
            value.clear();

            if !read_line(&mut reader, &mut key)? {
                return Ok(None);
            }
            if !read_line(&mut reader, &mut value)? {
                return Err(ShortenerError::read(format!(
                    "truncated record: key '{}' has no value line",
                    key
                )));
            }

            if matches(&key, &value) {
                return Ok(Some((std::mem::take(&mut key), std::mem::take(&mut value))));
            }
        }
    }
}

/// Read one newline-terminated line into `buf` without its terminator.
/// Returns `false` at a clean end of file.
fn read_line<R: BufRead>(reader: &mut R, buf: &mut String) -> Result<bool> {
    let n = reader
        .read_line(buf)
        .map_err(|e| ShortenerError::read(format!("cannot read file store: {}", e)))?;
    if n == 0 {
        return Ok(false);
    }
    if !buf.ends_with('\n') {
        return Err(ShortenerError::read(format!(
            "truncated record: unterminated line '{}'",
            buf
        )));
    }

    // 只去掉 '\n'，其余字节原样保留
    buf.pop();
    Ok(true)
}

/// Append `record` at the end of `writer` in one `write_all` and flush.
///
/// On failure `truncate` is called with the previous length so the file
/// never keeps half a record.
fn append_record<W, T>(writer: &mut W, record: &[u8], truncate: T) -> Result<()>
where
    W: Write + Seek,
    T: FnOnce(&mut W, u64) -> std::io::Result<()>,
{
    let end = writer
        .seek(SeekFrom::End(0))
        .map_err(|e| ShortenerError::write(format!("cannot seek to end of file store: {}", e)))?;

    // 一次写入完整的 key/value 对，失败时截断回原长度
    if let Err(e) = writer.write_all(record).and_then(|_| writer.flush()) {
        return Err(match truncate(writer, end) {
            Ok(()) => ShortenerError::write(format!("cannot append record: {}", e)),
            Err(rollback) => ShortenerError::write(format!(
                "cannot append record: {}; rollback to {} bytes failed: {}",
                e, end, rollback
            )),
        });
    }

    Ok(())
}

impl Storer for FileStore {
    fn add(&mut self, value: &str) -> Result<String> {
        if let Some((key, _)) = self.scan(|_, v| v == value)? {
            return Ok(key);
        }

        let key = encoder::encode(value);
        let mut record = String::with_capacity(key.len() + value.len() + 2);
        record.push_str(&key);
        record.push('\n');
        record.push_str(value);
        record.push('\n');

        let file = self.file_mut()?;
        append_record(file, record.as_bytes(), |file, len| file.set_len(len))?;

        Ok(key)
    }

    fn get(&mut self, key: &str) -> Result<String> {
        match self.scan(|k, _| k == key)? {
            Some((_, value)) => Ok(value),
            None => Err(ShortenerError::not_found(format!(
                "no URL stored for key '{}'",
                key
            ))),
        }
    }

    /// Flush the handle to disk and release it. Closing twice is a no-op;
    /// any other operation after close fails with `Closed`.
    fn close(&mut self) -> Result<()> {
        match self.file.take() {
            Some(file) => file.sync_all().map_err(|e| {
                ShortenerError::close(format!(
                    "cannot close file store '{}': {}",
                    self.path.display(),
                    e
                ))
            }),
            None => Ok(()),
        }
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}
