use std::path::Path;

use derive_more::Display;

/// Attachment types accepted by the resource form.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttachmentType {
    #[display(fmt = "PDF")]
    Pdf,
    #[display(fmt = "DOCX")]
    Docx,
    #[display(fmt = "PPTX")]
    Pptx,
}

impl AttachmentType {
    pub const ALLOWED: [AttachmentType; 3] = [Self::Pdf, Self::Docx, Self::Pptx];

    pub const PDF_MIME: &'static str = "application/pdf";
    pub const DOCX_MIME: &'static str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
    pub const PPTX_MIME: &'static str =
        "application/vnd.openxmlformats-officedocument.presentationml.presentation";

    pub fn as_mime(&self) -> &'static str {
        match self {
            AttachmentType::Pdf => Self::PDF_MIME,
            AttachmentType::Docx => Self::DOCX_MIME,
            AttachmentType::Pptx => Self::PPTX_MIME,
        }
    }

    pub fn from_mime(mime: &str) -> Option<Self> {
        Self::ALLOWED
            .into_iter()
            .find(|ty| ty.as_mime().eq_ignore_ascii_case(mime.trim()))
    }

    /// Guess the type from a file extension, as a file picker would.
    pub fn from_path(path: &str) -> Option<Self> {
        let ext = Path::new(path).extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "pptx" => Some(Self::Pptx),
            _ => None,
        }
    }
}
