use std::path::Path;

use serde::Deserialize;

/// Store connection settings; every field can also come from a
/// `S3CONCAT_*` environment variable.
#[derive(Default, Clone, Deserialize, Debug)]
pub struct S3ConcatConfig {
    /// Custom endpoint for S3-compatible stores (minio and friends); the
    /// SDK's own resolution applies when unset.
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    /// Path-style addressing, required by most non-AWS endpoints.
    #[serde(default)]
    pub force_path_style: bool,
}

impl S3ConcatConfig {
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let builder = match path {
            Some(path) => config::Config::builder().add_source(config::File::from(path)),
            None => config::Config::builder()
                .add_source(config::File::with_name("s3concat").required(false)),
        };
        let settings = builder
            .add_source(config::Environment::with_prefix("S3CONCAT"))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}
