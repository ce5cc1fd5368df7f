//! Reading command input from files or stdin.

use std::path::Path;

use anyhow::Context;
use tokio::io::AsyncReadExt;

/// Read `path` as text; `-` reads stdin.
///
/// Bytes that are not valid UTF-8 become U+FFFD.
pub(crate) async fn read_input(path: &Path) -> anyhow::Result<String> {
    let bytes = if path.as_os_str() == "-" {
        let mut bytes = Vec::new();
        tokio::io::stdin()
            .read_to_end(&mut bytes)
            .await
            .context("Failed to read stdin")?;
        bytes
    } else {
        tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?
    };
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_read_file() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "<p>hello</p>").unwrap();
        assert_eq!(read_input(file.path()).await.unwrap(), "<p>hello</p>");
    }

    #[tokio::test]
    async fn test_latin1_file_is_decoded_lossily() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), b"<label>Caf\xe9 Sports</label>").unwrap();
        assert_eq!(
            read_input(file.path()).await.unwrap(),
            "<label>Caf\u{FFFD} Sports</label>"
        );
    }

    #[tokio::test]
    async fn test_missing_file_names_path() {
        let err = read_input(Path::new("/nonexistent/page.html")).await.unwrap_err();
        assert!(err.to_string().contains("/nonexistent/page.html"));
    }
}
