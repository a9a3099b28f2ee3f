//! Adjuntos de cierre de trabajo
//!
//! Fotos y documentos llegan en base64. Solo se guardan sus metadatos.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use uuid::Uuid;
use validator::ValidationError;

use crate::dto::service_request_dto::AttachmentInput;
use crate::models::completion::StoredAttachment;

const IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp", "image/heic"];
const DOCUMENT_TYPES: &[&str] = &["application/pdf"];

/// Fotos admitidas en una sola subida (cierre de trabajo, informe)
pub const MAX_PHOTOS_PER_UPLOAD: usize = 6;

/// Margen para el resto del JSON que acompaña a los adjuntos
const BODY_HEADROOM: usize = 64 * 1024;

/// Límite del cuerpo de las rutas con adjuntos: todas las fotos y un
/// documento al tamaño máximo, codificados en base64, más el margen
pub fn attachment_body_limit(max_attachment_bytes: usize) -> usize {
    max_attachment_bytes
        .div_ceil(3)
        .saturating_mul(4)
        .saturating_mul(MAX_PHOTOS_PER_UPLOAD + 1)
        .saturating_add(BODY_HEADROOM)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    /// Foto de inspección: solo imágenes
    Photo,
    /// Documento de garantía: PDF o imagen
    Document,
}

impl AttachmentKind {
    fn accepts(&self, content_type: &str) -> bool {
        let content_type = content_type.trim().to_lowercase();
        match self {
            AttachmentKind::Photo => IMAGE_TYPES.contains(&content_type.as_str()),
            AttachmentKind::Document => {
                IMAGE_TYPES.contains(&content_type.as_str())
                    || DOCUMENT_TYPES.contains(&content_type.as_str())
            }
        }
    }
}

fn attachment_error(code: &'static str, file_name: &str, message: String) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error.add_param("file_name".into(), &file_name.to_string());
    error
}

/// Decodifica y valida un adjunto, devolviendo sus metadatos
pub fn inspect(
    kind: AttachmentKind,
    file_name: &str,
    content_type: &str,
    data_base64: &str,
    max_bytes: usize,
) -> Result<StoredAttachment, ValidationError> {
    if !kind.accepts(content_type) {
        return Err(attachment_error(
            "content_type",
            file_name,
            format!("Unsupported content type '{}'", content_type),
        ));
    }

    let bytes = STANDARD
        .decode(data_base64.trim())
        .map_err(|e| attachment_error("base64", file_name, format!("Invalid base64 data: {}", e)))?;

    if bytes.is_empty() {
        return Err(attachment_error("empty", file_name, "Attachment is empty".to_string()));
    }
    if bytes.len() > max_bytes {
        return Err(attachment_error(
            "too_large",
            file_name,
            format!("Attachment is {} bytes, limit is {}", bytes.len(), max_bytes),
        ));
    }

    Ok(StoredAttachment {
        id: Uuid::new_v4(),
        file_name: file_name.to_string(),
        content_type: content_type.trim().to_lowercase(),
        size_bytes: bytes.len(),
        checksum: format!("{:x}", md5::compute(&bytes)),
    })
}

pub fn inspect_input(
    kind: AttachmentKind,
    input: &AttachmentInput,
    max_bytes: usize,
) -> Result<StoredAttachment, ValidationError> {
    inspect(
        kind,
        &input.file_name,
        &input.content_type,
        &input.data_base64,
        max_bytes,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(bytes: &[u8]) -> String {
        STANDARD.encode(bytes)
    }

    #[test]
    fn test_photo_metadata() {
        let stored = inspect(AttachmentKind::Photo, "brakes.jpg", "image/jpeg", &encode(b"hello"), 1024).unwrap();
        assert_eq!(stored.size_bytes, 5);
        assert_eq!(stored.checksum, "5d41402abc4b2a76b9719d911017c592");
    }

    #[test]
    fn test_photo_must_be_image() {
        let err = inspect(AttachmentKind::Photo, "invoice.pdf", "application/pdf", &encode(b"%PDF"), 1024).unwrap_err();
        assert_eq!(err.code, "content_type");
        assert!(inspect(AttachmentKind::Document, "invoice.pdf", "application/pdf", &encode(b"%PDF"), 1024).is_ok());
    }

    #[test]
    fn test_size_and_encoding_limits() {
        let err = inspect(AttachmentKind::Photo, "big.png", "image/png", &encode(&[0u8; 64]), 32).unwrap_err();
        assert_eq!(err.code, "too_large");
        let err = inspect(AttachmentKind::Photo, "bad.png", "image/png", "***", 32).unwrap_err();
        assert_eq!(err.code, "base64");
    }

    #[test]
    fn test_body_limit_fits_every_attachment() {
        let max = 5 * 1024 * 1024;
        let limit = attachment_body_limit(max);
        let one_encoded = encode(&vec![0u8; max]).len();
        assert!(limit >= one_encoded * (MAX_PHOTOS_PER_UPLOAD + 1));
        assert!(limit > 2 * 1024 * 1024);
    }
}
