//! Writing downloads to disk or handing them to the browser.

use scribble_core::PngDownload;
use thiserror::Error;

/// File operation errors.
#[derive(Debug, Error)]
pub enum FileOpsError {
    #[error("Failed to write file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Browser download failed: {0}")]
    Browser(String),
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::export_png;

#[cfg(target_arch = "wasm32")]
pub use web::export_png;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use super::FileOpsError;
    use scribble_core::PngDownload;

    /// Export PNG to file using native file dialog.
    ///
    /// Cancelling the dialog is not an error.
    #[cfg(feature = "native")]
    pub fn export_png(download: &PngDownload) -> Result<(), FileOpsError> {
        let dialog = rfd::FileDialog::new()
            .set_title("Download PNG")
            .set_file_name(&download.file_name)
            .add_filter("PNG Image", &["png"]);

        match dialog.save_file() {
            Some(path) => {
                std::fs::write(&path, &download.bytes)?;
                log::info!("Exported PNG to: {:?}", path);
            }
            None => log::info!("PNG export cancelled"),
        }
        Ok(())
    }

    /// Without a file dialog, write into the working directory.
    #[cfg(not(feature = "native"))]
    pub fn export_png(download: &PngDownload) -> Result<(), FileOpsError> {
        std::fs::write(&download.file_name, &download.bytes)?;
        log::info!("Exported PNG to: {}", download.file_name);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
mod web {
    use super::FileOpsError;
    use scribble_core::{PNG_MIME, PngDownload};
    use wasm_bindgen::JsCast;

    /// Trigger a browser download of the PNG.
    pub fn export_png(download: &PngDownload) -> Result<(), FileOpsError> {
        download_binary_file(&download.file_name, &download.bytes, PNG_MIME)?;
        log::info!("Downloaded PNG: {}", download.file_name);
        Ok(())
    }

    fn download_binary_file(filename: &str, data: &[u8], mime_type: &str) -> Result<(), FileOpsError> {
        let browser = |what: &str| FileOpsError::Browser(what.to_string());

        let window = web_sys::window().ok_or_else(|| browser("no window"))?;
        let document = window.document().ok_or_else(|| browser("no document"))?;

        // Create Uint8Array from data
        let uint8_array = js_sys::Uint8Array::from(data);
        let blob_parts = js_sys::Array::new();
        blob_parts.push(&uint8_array);

        let options = web_sys::BlobPropertyBag::new();
        options.set_type(mime_type);

        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&blob_parts, &options)
            .map_err(|e| FileOpsError::Browser(format!("failed to create blob: {:?}", e)))?;

        // Create download URL
        let url = web_sys::Url::create_object_url_with_blob(&blob)
            .map_err(|e| FileOpsError::Browser(format!("failed to create URL: {:?}", e)))?;

        // Create and click download link
        let a = document
            .create_element("a")
            .map_err(|e| FileOpsError::Browser(format!("failed to create element: {:?}", e)))?
            .dyn_into::<web_sys::HtmlAnchorElement>()
            .map_err(|_| browser("element is not an anchor"))?;

        a.set_href(&url);
        a.set_download(filename);
        a.click();

        // Clean up
        web_sys::Url::revoke_object_url(&url).ok();
        Ok(())
    }
}

/// Human-readable summary of a finished download, for the status line.
pub fn download_status(download: &PngDownload) -> String {
    format!("Downloaded {}", download.file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_status() {
        let download = PngDownload {
            file_name: "Cat.png".to_string(),
            bytes: vec![1, 2, 3],
        };
        assert_eq!(download_status(&download), "Downloaded Cat.png");
    }

    #[test]
    fn test_io_error_message() {
        let err = FileOpsError::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert_eq!(err.to_string(), "Failed to write file: denied");
    }
}
