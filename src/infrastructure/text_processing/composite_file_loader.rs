use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{Document, DocumentFormat};

/// Routes each document to the adapter registered for its format.
pub struct CompositeFileLoader {
    adapters: HashMap<DocumentFormat, Arc<dyn FileLoader>>,
}

impl CompositeFileLoader {
    pub fn new(adapters: Vec<(DocumentFormat, Arc<dyn FileLoader>)>) -> Self {
        Self {
            adapters: adapters.into_iter().collect(),
        }
    }

    pub fn supports(&self, format: DocumentFormat) -> bool {
        self.adapters.contains_key(&format)
    }
}

#[async_trait]
impl FileLoader for CompositeFileLoader {
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        let adapter = self.adapters.get(&document.format).ok_or_else(|| {
            FileLoaderError::UnsupportedFormat(document.format.extension().to_string())
        })?;

        adapter.extract_text(data, document).await
    }
}
