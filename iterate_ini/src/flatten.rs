//! Reading a resolved file and flattening it into records.

use std::io;
use std::path::Path;

use crate::error::{LookupError, LookupResult, read_error};
use crate::ini::{IniDocument, ParseOptions, SyntaxError};
use crate::record::ConfigRecord;

/// Flattens the file at `path` using the default [`ParseOptions`].
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::Path;
///
/// # fn run() -> iterate_ini::LookupResult<()> {
/// for record in iterate_ini::flatten(Path::new("files/app.ini"))? {
///     println!("{}.{} = {}", record.section, record.option, record.value);
/// }
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns [`LookupError::Read`] if the file cannot be read as UTF-8 text
/// and [`LookupError::Parse`] if its contents are malformed.
pub fn flatten(path: &Path) -> LookupResult<Vec<ConfigRecord>> {
    flatten_with(path, &ParseOptions::default())
}

/// Flattens the file at `path` using `options`.
///
/// The file is read fully and closed before parsing begins.
///
/// # Errors
///
/// Returns [`LookupError::Read`] if the file cannot be read as UTF-8 text
/// and [`LookupError::Parse`] if its contents are malformed.
pub fn flatten_with(path: &Path, options: &ParseOptions) -> LookupResult<Vec<ConfigRecord>> {
    let text = std::fs::read_to_string(path).map_err(|err| read_error(path, err))?;
    let document = IniDocument::parse(&text, options).map_err(|err| parse_error(path, err))?;
    Ok(document.records())
}

fn parse_error(path: &Path, err: SyntaxError) -> LookupError {
    LookupError::Parse {
        path: path.to_path_buf(),
        line: err.line,
        message: err.message,
    }
}

/// Returns `true` when `err` came from undecodable file contents rather than
/// a failed read.
#[must_use]
pub fn is_encoding_error(err: &LookupError) -> bool {
    matches!(err, LookupError::Read { source, .. } if source.kind() == io::ErrorKind::InvalidData)
}

#[cfg(test)]
mod tests {
    use anyhow::{Result, anyhow, ensure};
    use rstest::{fixture, rstest};
    use test_helpers::tree::FileTree;

    use super::*;

    #[fixture]
    fn tree() -> Result<FileTree> {
        FileTree::new()
    }

    #[rstest]
    fn flattens_file_on_disk(tree: Result<FileTree>) -> Result<()> {
        let files = tree?;
        let path = files.write("app.ini", "[db]\nHost = localhost\n")?;
        let records = flatten(&path).map_err(|err| anyhow!(err))?;
        ensure!(
            records == vec![ConfigRecord::new("db", "Host", "localhost")],
            "unexpected records: {records:?}"
        );
        Ok(())
    }

    #[rstest]
    fn parse_failure_names_the_file(tree: Result<FileTree>) -> Result<()> {
        let files = tree?;
        let path = files.write("broken.ini", "[ok]\na = 1\n\norphan\n")?;
        let Err(err) = flatten(&path) else {
            return Err(anyhow!("expected parse failure"));
        };
        let LookupError::Parse { path: reported, line, .. } = &err else {
            return Err(anyhow!("expected Parse, got {err:?}"));
        };
        ensure!(reported == &path, "wrong path {}", reported.display());
        ensure!(*line == 4, "wrong line {line}");
        Ok(())
    }

    #[rstest]
    fn missing_file_is_a_read_error(tree: Result<FileTree>) -> Result<()> {
        let files = tree?;
        let Err(err) = flatten(&files.join("gone.ini")) else {
            return Err(anyhow!("expected read failure"));
        };
        ensure!(
            matches!(&err, LookupError::Read { source, .. } if source.kind() == io::ErrorKind::NotFound),
            "unexpected error {err:?}"
        );
        ensure!(!is_encoding_error(&err), "not an encoding error");
        Ok(())
    }

    #[rstest]
    fn invalid_utf8_is_an_encoding_error(tree: Result<FileTree>) -> Result<()> {
        let files = tree?;
        let path = files.write_bytes("latin1.ini", b"[s]\nname = caf\xe9\n")?;
        let Err(err) = flatten(&path) else {
            return Err(anyhow!("expected decoding failure"));
        };
        ensure!(is_encoding_error(&err), "unexpected error {err:?}");
        Ok(())
    }

    #[rstest]
    fn options_are_honoured(tree: Result<FileTree>) -> Result<()> {
        let files = tree?;
        let path = files.write("dup.ini", "[a]\nx = 1\nx = 2\n")?;
        let merged = flatten(&path).map_err(|err| anyhow!(err))?;
        ensure!(merged.len() == 1, "default options merge duplicates");
        let strict = flatten_with(&path, &ParseOptions::new().strict(true));
        ensure!(
            strict.as_ref().is_err_and(LookupError::is_parse),
            "strict options reject duplicates"
        );
        Ok(())
    }
}
