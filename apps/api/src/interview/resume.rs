//! Resume upload → plain text for question tailoring.

use tracing::debug;

use crate::errors::AppError;

const PDF_MAGIC: &[u8] = b"%PDF";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResumeFormat {
    Pdf,
    PlainText,
}

fn detect_format(
    file_name: Option<&str>,
    content_type: Option<&str>,
    bytes: &[u8],
) -> Option<ResumeFormat> {
    let extension = file_name
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase());

    if bytes.starts_with(PDF_MAGIC)
        || content_type == Some("application/pdf")
        || extension.as_deref() == Some("pdf")
    {
        return Some(ResumeFormat::Pdf);
    }

    let declared_text = content_type.is_some_and(|ct| ct.starts_with("text/"))
        || matches!(extension.as_deref(), Some("txt" | "md"));
    if declared_text || (content_type.is_none() && extension.is_none()) {
        return Some(ResumeFormat::PlainText);
    }

    None
}

/// Extracts resume text from an uploaded PDF or plain-text file.
pub fn extract_resume_text(
    file_name: Option<&str>,
    content_type: Option<&str>,
    bytes: &[u8],
) -> Result<String, AppError> {
    let format = detect_format(file_name, content_type, bytes).ok_or_else(|| {
        AppError::Validation(
            "Unsupported resume format; upload a PDF or plain-text file".to_string(),
        )
    })?;

    let text = match format {
        ResumeFormat::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| AppError::Validation(format!("Could not read PDF: {e}")))?,
        ResumeFormat::PlainText => String::from_utf8(bytes.to_vec())
            .map_err(|_| AppError::Validation("Resume text is not valid UTF-8".to_string()))?,
    };

    let text = normalize(&text);
    if text.is_empty() {
        return Err(AppError::Validation(
            "No text could be extracted from the resume".to_string(),
        ));
    }

    debug!("Extracted {} characters from {format:?} resume", text.chars().count());
    Ok(text)
}

/// Trims every line and drops blank ones.
fn normalize(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_resume() {
        let text = extract_resume_text(
            Some("resume.txt"),
            Some("text/plain"),
            b"  Jane Doe\n\n\n  Rust engineer, 5 years  \n",
        )
        .unwrap();
        assert_eq!(text, "Jane Doe\nRust engineer, 5 years");
    }

    #[test]
    fn test_pdf_detected_by_magic_bytes() {
        assert_eq!(
            detect_format(Some("upload.bin"), None, b"%PDF-1.7 ..."),
            Some(ResumeFormat::Pdf)
        );
        assert_eq!(
            detect_format(Some("CV.PDF"), None, b"anything"),
            Some(ResumeFormat::Pdf)
        );
    }

    #[test]
    fn test_unsupported_format_rejected() {
        let result = extract_resume_text(
            Some("resume.docx"),
            Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
            b"PK\x03\x04",
        );
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_blank_text_rejected() {
        let result = extract_resume_text(Some("empty.txt"), None, b" \n \n");
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_invalid_utf8_rejected() {
        let result = extract_resume_text(None, Some("text/plain"), &[0xff, 0xfe, 0xfd]);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
