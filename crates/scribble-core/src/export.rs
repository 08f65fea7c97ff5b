//! PNG download payloads.

/// MIME type of downloaded images.
pub const PNG_MIME: &str = "image/png";

/// An encoded image ready to hand to a save dialog or browser download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PngDownload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// `<title>.png`, using `fallback` for blank titles.
///
/// Path separators are replaced so the name is always a single file name.
pub fn download_file_name(title: &str, fallback: &str) -> String {
    let title = title.trim();
    let title = if title.is_empty() { fallback.trim() } else { title };
    let safe: String = title
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    format!("{}.png", safe)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_from_title() {
        assert_eq!(download_file_name("Sunset", "Untitled"), "Sunset.png");
    }

    #[test]
    fn test_blank_title_uses_fallback() {
        assert_eq!(
            download_file_name("   ", "Untitled Drawing"),
            "Untitled Drawing.png"
        );
    }

    #[test]
    fn test_separators_replaced() {
        assert_eq!(download_file_name("a/b\\c", "x"), "a_b_c.png");
    }
}
