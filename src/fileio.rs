//! Text file I/O for holiday tables and setup files.
//!
//! Both functions assume UTF-8 encoding for input and output.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Reads a UTF-8 text file and returns its lines.
///
/// A leading byte order mark is removed, and both `\n` and `\r\n` line
/// breaks are accepted. An empty file yields no lines.
///
/// ```no_run
/// use koyomi::fileio::do_read;
///
/// # fn main() -> std::io::Result<()> {
/// for line in do_read("holidays.txt")? {
///     println!("{line}");
/// }
/// # Ok(())
/// # }
/// ```
pub fn do_read<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
    let content = fs::read_to_string(filename)?;
    let content = content.strip_prefix('\u{FEFF}').unwrap_or(&content);
    Ok(content.lines().map(str::to_string).collect())
}

/// Writes `lines` to `filename`, one per line.
pub fn do_write<P, I, S>(filename: P, lines: I) -> io::Result<()>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut file = io::BufWriter::new(fs::File::create(filename)?);
    for line in lines {
        file.write_all(line.as_ref().as_bytes())?;
        file.write_all(b"\n")?;
    }
    file.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("koyomi-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_read_strips_bom_and_crlf() {
        let path = temp_path("bom.txt");
        fs::write(&path, "\u{FEFF}first\r\nsecond\n").unwrap();
        assert_eq!(do_read(&path).unwrap(), ["first", "second"]);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_then_read() {
        let path = temp_path("lines.txt");
        do_write(&path, ["2024-01-01: 元日", "2024-01-08: 成人の日"]).unwrap();
        assert_eq!(
            do_read(&path).unwrap(),
            ["2024-01-01: 元日", "2024-01-08: 成人の日"]
        );
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(do_read(temp_path("does-not-exist.txt")).is_err());
    }
}
