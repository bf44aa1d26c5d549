use std::future::Future;
use std::path::{Path, PathBuf};

use ixmaps_types::dateline::split_dateline_features;
use ixmaps_types::FeatureCollection;
use log::debug;

use crate::error::LayerError;
use crate::layer::LayerName;

/// External store of raw layer geometry in WGS84.
///
/// Any data source (spatial database, files, remote API) can implement it.
pub trait LayerSource {
    /// Loads the whole layer.
    fn fetch_raw_layer(
        &self,
        layer: LayerName,
    ) -> impl Future<Output = Result<FeatureCollection, LayerError>> + Send;
}

/// Reads layers from GeoJSON files named `<layer>.geojson` in a folder.
#[derive(Debug, Clone)]
pub struct FileLayerSource {
    folder_path: PathBuf,
    split_dateline: bool,
}

impl FileLayerSource {
    /// Creates a new instance reading from the given folder.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            folder_path: path.as_ref().into(),
            split_dateline: false,
        }
    }

    /// If set, features crossing the antimeridian are split into separate parts after loading.
    pub fn with_dateline_split(mut self, split_dateline: bool) -> Self {
        self.split_dateline = split_dateline;
        self
    }

    fn get_file_path(&self, layer: LayerName) -> PathBuf {
        self.folder_path.join(format!("{layer}.geojson"))
    }
}

impl LayerSource for FileLayerSource {
    async fn fetch_raw_layer(&self, layer: LayerName) -> Result<FeatureCollection, LayerError> {
        let file_path = self.get_file_path(layer);
        debug!("Loading layer {layer} from {file_path:?}");

        let contents = tokio::fs::read_to_string(&file_path).await?;
        let collection: FeatureCollection = contents.parse()?;

        if self.split_dateline {
            Ok(split_dateline_features(&collection))
        } else {
            Ok(collection)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use ixmaps_types::Geometry;

    fn temp_folder(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("ixmaps-{name}-{}", std::process::id()));
        std::fs::create_dir_all(&path).unwrap();
        path
    }

    #[tokio::test]
    async fn reads_layer_file() {
        let folder = temp_folder("read");
        std::fs::write(
            folder.join("lakes.geojson"),
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","id":1,"properties":{},"geometry":{"type":"Point","coordinates":[1,2]}}
            ]}"#,
        )
        .unwrap();

        let collection = FileLayerSource::new(&folder)
            .fetch_raw_layer(LayerName::Lakes)
            .await
            .unwrap();

        assert_eq!(collection.len(), 1);
        assert_matches!(collection.features[0].geometry, Some(Geometry::Point(_)));
    }

    #[tokio::test]
    async fn splits_dateline_when_enabled() {
        let folder = temp_folder("split");
        std::fs::write(
            folder.join("political.geojson"),
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","properties":{"id":"fiji"},"geometry":{"type":"MultiPolygon","coordinates":[[[
                    [177,-16],[179.5,-16],[179.8,-17],[-179.8,-17],[-179.5,-16.5],[-179.9,-16],[177,-16]
                ]]]}}
            ]}"#,
        )
        .unwrap();

        let source = FileLayerSource::new(&folder);
        let raw = source.fetch_raw_layer(LayerName::Political).await.unwrap();
        assert_eq!(raw.len(), 1);

        let split = source
            .with_dateline_split(true)
            .fetch_raw_layer(LayerName::Political)
            .await
            .unwrap();
        assert_eq!(split.len(), 2);
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let folder = temp_folder("missing");
        assert_matches!(
            FileLayerSource::new(&folder)
                .fetch_raw_layer(LayerName::Rivers)
                .await,
            Err(LayerError::Io(_))
        );
    }
}
