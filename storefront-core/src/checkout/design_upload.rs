//! Design upload gate
//!
//! Visiting-card orders require print-ready artwork before checkout may
//! proceed. One upload is held per session (keyed singleton): selecting a
//! new file overwrites the previous one, removal returns checkout to the
//! blocking state. The file content is stored inline as a base64 `data:`
//! URI.
//!
//! The checkout page enforces the gate itself; this module only answers
//! "is an upload required" and "is one stored".

use crate::cart::{CartService, rules};
use crate::catalog::ProductStore;
use crate::storage::{KvStore, keys};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::Utc;
use shared::models::cart::CartItem;
use shared::models::design::DesignUpload;
use std::path::Path;
use thiserror::Error;

/// Accepted artwork file extensions (lowercase, no dot)
pub const ACCEPTED_DESIGN_EXTENSIONS: [&str; 6] = ["pdf", "png", "jpg", "jpeg", "ai", "cdr"];

/// Encoded uploads above this size would blow the storage quota
const MAX_DESIGN_FILE_BYTES: u64 = 8 * 1024 * 1024;

/// Design upload errors
#[derive(Debug, Error)]
pub enum DesignUploadError {
    #[error("Failed to read design file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Design file too large: {size} bytes (max {max})")]
    TooLarge { size: u64, max: u64 },
}

/// Extension allow-list check
///
/// Case-insensitive suffix match on the file name only; the content is
/// not sniffed.
pub fn is_accepted_design_file(file_name: &str) -> bool {
    let lower = file_name.to_lowercase();
    ACCEPTED_DESIGN_EXTENSIONS
        .iter()
        .any(|ext| lower.ends_with(&format!(".{ext}")))
}

/// Session-scoped design upload storage
#[derive(Debug, Clone)]
pub struct DesignUploadService {
    store: KvStore,
    cart: CartService,
    catalog: ProductStore,
}

impl DesignUploadService {
    pub fn new(store: KvStore, cart: CartService, catalog: ProductStore) -> Self {
        Self {
            store,
            cart,
            catalog,
        }
    }

    /// Encode a file and store it as the session's design upload
    ///
    /// Overwrites any prior upload. Fails when the file cannot be read or
    /// exceeds the size cap; the caller surfaces that as a retry message.
    pub async fn persist_design_upload(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<DesignUpload, DesignUploadError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let size = bytes.len() as u64;
        if size > MAX_DESIGN_FILE_BYTES {
            return Err(DesignUploadError::TooLarge {
                size,
                max: MAX_DESIGN_FILE_BYTES,
            });
        }

        let mime = mime_guess::from_path(path).first_or_octet_stream();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let upload = DesignUpload {
            name,
            size,
            mime_type: mime.essence_str().to_string(),
            data_url: format!("data:{};base64,{}", mime.essence_str(), BASE64.encode(&bytes)),
            uploaded_at: Utc::now(),
        };
        self.store.write(keys::DESIGN_UPLOAD, &upload);
        tracing::debug!(name = %upload.name, size, "Design upload stored");
        Ok(upload)
    }

    /// The stored upload, if any
    pub fn stored_design_upload(&self) -> Option<DesignUpload> {
        self.store.read(keys::DESIGN_UPLOAD, None)
    }

    /// Remove the stored upload
    pub fn clear_design_upload(&self) {
        self.store.remove(keys::DESIGN_UPLOAD);
    }

    /// Whether the checkout flow must pass through the upload step
    ///
    /// Evaluates the supplied items, or the live cart when `None`.
    pub fn is_design_upload_required(&self, items: Option<&[CartItem]>) -> bool {
        let catalog = self.catalog.all_products_with_extras();
        match items {
            Some(items) => rules::cart_has_visiting_card(items, &catalog),
            None => rules::cart_has_visiting_card(&self.cart.items(), &catalog),
        }
    }
}
