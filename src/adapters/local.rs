use crate::core::{Catalog, Label, LabeledItem, ObjectStorage, VisionLabeler};
use crate::utils::error::{Result, ServiceError};
use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;

/// Writes objects as files under `base_path`, keyed by relative path.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn object_path(&self, key: &str) -> Result<PathBuf> {
        let relative = Path::new(key);
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(ServiceError::storage(format!(
                "object key '{}' must be a plain relative path",
                key
            )));
        }
        Ok(self.base_path.join(relative))
    }
}

impl ObjectStorage for LocalStorage {
    async fn put_object(&self, key: &str, content_type: &str, data: &[u8]) -> Result<()> {
        let full_path = self.object_path(key)?;

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ServiceError::storage(format!("{}: {}", parent.display(), e)))?;
        }

        fs::write(&full_path, data)
            .await
            .map_err(|e| ServiceError::storage(format!("{}: {}", full_path.display(), e)))?;

        tracing::debug!(
            "Wrote {} bytes ({}) to {}",
            data.len(),
            content_type,
            full_path.display()
        );
        Ok(())
    }
}

/// Catalog kept as a JSON array in a single file. A missing file is an empty catalog.
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl JsonFileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(format!(".{}.tmp", std::process::id()));
        self.path.with_file_name(name)
    }

    async fn read_items(&self) -> Result<Vec<LabeledItem>> {
        let content = match fs::read(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(ServiceError::persistence(format!(
                    "{}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        // A record with a missing or null `labels` field is a corrupt catalog, not an empty item.
        serde_json::from_slice(&content).map_err(|e| {
            ServiceError::invalid_argument(format!("{}: {}", self.path.display(), e))
        })
    }
}

#[async_trait]
impl Catalog for JsonFileCatalog {
    async fn scan_all(&self) -> Result<Vec<LabeledItem>> {
        let _guard = self.lock.lock().await;
        self.read_items().await
    }

    async fn put(&self, item: &LabeledItem) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut items = self.read_items().await?;

        // Same key replaces, like a DynamoDB PutItem on the partition key.
        match items.iter_mut().find(|existing| existing.key == item.key) {
            Some(existing) => *existing = item.clone(),
            None => items.push(item.clone()),
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ServiceError::persistence(e.to_string()))?;
        }
        let json = serde_json::to_vec_pretty(&items)?;

        // Write beside the catalog and rename over it so readers never see a partial file.
        let staging = self.staging_path();
        fs::write(&staging, json)
            .await
            .map_err(|e| ServiceError::persistence(format!("{}: {}", staging.display(), e)))?;
        fs::rename(&staging, &self.path)
            .await
            .map_err(|e| ServiceError::persistence(format!("{}: {}", self.path.display(), e)))?;
        Ok(())
    }
}

/// Returns a fixed label list for every image. Used where no vision service is available.
#[derive(Debug, Clone, Default)]
pub struct StaticLabeler {
    labels: Vec<Label>,
}

impl StaticLabeler {
    pub fn new(labels: Vec<Label>) -> Self {
        Self { labels }
    }

    /// Every name gets full confidence.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            names
                .into_iter()
                .map(|name| Label::new(name, 100.0))
                .collect(),
        )
    }
}

#[async_trait]
impl VisionLabeler for StaticLabeler {
    async fn detect_labels(
        &self,
        image: &[u8],
        _min_confidence: f32,
        _max_labels: usize,
    ) -> Result<Vec<Label>> {
        if image.is_empty() {
            return Err(ServiceError::inference("image is empty"));
        }
        Ok(self.labels.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn item(key: &str, names: &[&str]) -> LabeledItem {
        LabeledItem::new(key, names.iter().map(|n| n.to_string()).collect())
    }

    #[tokio::test]
    async fn test_local_storage_writes_nested_key() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());

        storage
            .put_object("uploads/cat.jpg", "image/jpeg", b"jpeg")
            .await
            .unwrap();

        let written = std::fs::read(dir.path().join("uploads/cat.jpg")).unwrap();
        assert_eq!(written, b"jpeg");
    }

    #[tokio::test]
    async fn test_local_storage_rejects_escaping_keys() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());

        let err = storage
            .put_object("../outside.jpg", "image/jpeg", b"x")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::StorageError { .. }));

        assert!(storage.put_object("/abs.jpg", "image/jpeg", b"x").await.is_err());
    }

    #[tokio::test]
    async fn test_json_catalog_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let catalog = JsonFileCatalog::new(dir.path().join("catalog.json"));

        assert!(catalog.scan_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_json_catalog_put_appends_and_replaces() {
        let dir = TempDir::new().unwrap();
        let catalog = JsonFileCatalog::new(dir.path().join("nested/catalog.json"));

        catalog.put(&item("a", &["cat"])).await.unwrap();
        catalog.put(&item("b", &["dog"])).await.unwrap();
        catalog.put(&item("a", &["cat", "pet"])).await.unwrap();

        let items = catalog.scan_all().await.unwrap();
        assert_eq!(items, vec![item("a", &["cat", "pet"]), item("b", &["dog"])]);
    }

    #[tokio::test]
    async fn test_json_catalog_put_replaces_file_atomically() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");
        let catalog = JsonFileCatalog::new(&path);

        // Leftover from an interrupted write must not affect the catalog.
        std::fs::write(catalog.staging_path(), b"[{\"key\": \"trunc").unwrap();
        catalog.put(&item("a", &["cat"])).await.unwrap();
        catalog.put(&item("b", &["dog"])).await.unwrap();

        assert!(!catalog.staging_path().exists());
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);

        let on_disk: Vec<LabeledItem> =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(on_disk, vec![item("a", &["cat"]), item("b", &["dog"])]);
    }

    #[tokio::test]
    async fn test_json_catalog_rejects_null_labels() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, r#"[{"key": "a", "labels": null}]"#).unwrap();

        let err = JsonFileCatalog::new(&path).scan_all().await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidArgument { .. }));
    }

    #[tokio::test]
    async fn test_static_labeler() {
        let labeler = StaticLabeler::from_names(["Cat", "Pet"]);

        let labels = labeler.detect_labels(b"img", 65.0, 30).await.unwrap();
        assert_eq!(labels, vec![Label::new("Cat", 100.0), Label::new("Pet", 100.0)]);

        assert!(matches!(
            labeler.detect_labels(b"", 65.0, 30).await,
            Err(ServiceError::InferenceError { .. })
        ));
    }
}
