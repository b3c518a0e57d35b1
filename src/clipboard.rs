//! System clipboard sink for section and title copies.

use std::io;

/// Write `text` to the system clipboard.
///
/// # Errors
///
/// Returns an error when the clipboard is unavailable (e.g. no display
/// server) or rejects the write.
pub fn copy(text: &str) -> io::Result<()> {
    let mut clipboard = arboard::Clipboard::new().map_err(io::Error::other)?;
    clipboard.set_text(text).map_err(io::Error::other)?;
    Ok(())
}
