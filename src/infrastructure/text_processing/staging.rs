use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::application::ports::FileLoaderError;
use crate::domain::DocumentFormat;

/// Writes an upload to a named temp file for parsers that need file access.
/// The file is deleted when the returned handle drops, whichever way the
/// caller exits.
pub(crate) fn stage_upload(
    data: &[u8],
    format: DocumentFormat,
    temp_dir: Option<&Path>,
) -> Result<NamedTempFile, FileLoaderError> {
    let suffix = format!(".{}", format.extension());
    let mut builder = tempfile::Builder::new();
    builder.prefix("lexdoc-").suffix(&suffix);

    let created = match temp_dir {
        Some(dir) => builder.tempfile_in(dir),
        None => builder.tempfile(),
    };
    let mut temp_file = created.map_err(|e| {
        FileLoaderError::ExtractionFailed(format!("failed to create temp file: {e}"))
    })?;

    temp_file
        .write_all(data)
        .and_then(|_| temp_file.flush())
        .map_err(|e| FileLoaderError::ExtractionFailed(format!("failed to write temp file: {e}")))?;

    Ok(temp_file)
}
