//! アートワーク集約の値オブジェクト
//!
//! 保存された画像ファイルへの参照を定義

use crate::domain::artwork::entities::ArtworkId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// 推測できない場合に使う既定の拡張子とコンテンツタイプ
const FALLBACK_EXTENSION: &str = "bin";
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// 保存済み画像への参照を表す値オブジェクト
///
/// 画像のバイト列そのものは `ImageStore` が保持し、集約には
/// ファイル名とコンテンツタイプ、チェックサムのみを残す。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: u64,
    pub checksum: String,
}

impl ImageRef {
    /// アップロードされた画像から参照を作成
    ///
    /// ファイル名は `<artwork id>.<拡張子>` に正規化する。拡張子は元の
    /// ファイル名を優先し、無ければコンテンツタイプから推測する。
    pub fn for_upload(
        id: &ArtworkId,
        original_file_name: Option<&str>,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> Self {
        let extension = original_file_name
            .and_then(extension_of)
            .or_else(|| content_type.and_then(extension_for_content_type))
            .unwrap_or_else(|| FALLBACK_EXTENSION.to_string());

        let content_type = content_type
            .map(|ct| ct.split(';').next().unwrap_or(ct).trim().to_string())
            .filter(|ct| !ct.is_empty())
            .or_else(|| original_file_name.map(guess_content_type))
            .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string());

        Self::from_stored_parts(&format!("{id}.{extension}"), &content_type, bytes)
    }

    /// ファイル名とコンテンツタイプを指定して参照を作成
    pub fn from_stored_parts(file_name: &str, content_type: &str, bytes: &[u8]) -> Self {
        Self {
            file_name: file_name.to_string(),
            content_type: content_type.to_string(),
            size_bytes: bytes.len() as u64,
            checksum: format!("{:x}", md5::compute(bytes)),
        }
    }

    /// HTTPのETagヘッダ値として取得
    pub fn etag(&self) -> String {
        format!("\"{}\"", self.checksum)
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {} bytes)", self.file_name, self.content_type, self.size_bytes)
    }
}

/// ファイル名から正規化した拡張子を取り出す
fn extension_of(file_name: &str) -> Option<String> {
    let ext = Path::new(file_name).extension()?.to_str()?.to_lowercase();
    // 異常に長い拡張子や記号混じりはファイル名としては扱わない
    if ext.is_empty() || ext.len() > 8 || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext)
}

/// コンテンツタイプから拡張子を推測
fn extension_for_content_type(content_type: &str) -> Option<String> {
    let essence = content_type.split(';').next().unwrap_or(content_type).trim();
    mime_guess::get_mime_extensions_str(essence)
        .and_then(|exts| exts.first())
        .map(|ext| ext.to_string())
}

/// ファイル名からコンテンツタイプを推測
fn guess_content_type(file_name: &str) -> String {
    mime_guess::from_path(file_name)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_upload_prefers_file_name_extension() {
        let id = ArtworkId::generate();
        let image = ImageRef::for_upload(&id, Some("Sunset.JPG"), Some("image/jpeg"), b"data");

        assert_eq!(image.file_name, format!("{id}.jpg"));
        assert_eq!(image.content_type, "image/jpeg");
        assert_eq!(image.size_bytes, 4);
    }

    #[test]
    fn test_for_upload_falls_back_to_content_type() {
        let id = ArtworkId::generate();
        let image = ImageRef::for_upload(&id, None, Some("image/png"), b"data");

        assert_eq!(image.file_name, format!("{id}.png"));
        assert_eq!(image.content_type, "image/png");
    }

    #[test]
    fn test_for_upload_without_hints() {
        let id = ArtworkId::generate();
        let image = ImageRef::for_upload(&id, None, None, b"data");

        assert_eq!(image.file_name, format!("{id}.{FALLBACK_EXTENSION}"));
        assert_eq!(image.content_type, FALLBACK_CONTENT_TYPE);
    }

    #[test]
    fn test_content_type_guessed_from_file_name() {
        let id = ArtworkId::generate();
        let image = ImageRef::for_upload(&id, Some("piece.png"), None, b"data");

        assert_eq!(image.content_type, "image/png");
    }

    #[test]
    fn test_checksum_and_etag_are_stable() {
        let a = ImageRef::from_stored_parts("a.png", "image/png", b"same bytes");
        let b = ImageRef::from_stored_parts("b.png", "image/png", b"same bytes");
        let c = ImageRef::from_stored_parts("c.png", "image/png", b"other bytes");

        assert_eq!(a.checksum, b.checksum);
        assert_ne!(a.checksum, c.checksum);
        assert_eq!(a.etag(), format!("\"{}\"", a.checksum));
    }

    #[test]
    fn test_rejects_suspicious_extensions() {
        assert_eq!(extension_of("photo.png"), Some("png".to_string()));
        assert_eq!(extension_of("photo"), None);
        assert_eq!(extension_of("photo.verylongext"), None);
        assert_eq!(extension_of("photo.p g"), None);
    }
}
