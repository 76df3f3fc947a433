//! Asynchronous image asset loading.

use flightviz_core::{AssetError, AssetKind, AssetState, Sprite};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::task::JoinSet;

use crate::config::Config;

/// Decode the image at `path` on a blocking worker.
///
/// Never fails: errors and timeouts come back as [`AssetState::Failed`].
pub async fn load_asset(kind: AssetKind, path: PathBuf, timeout: Duration) -> AssetState {
    match tokio::time::timeout(timeout, decode(kind, path.clone())).await {
        Ok(Ok(sprite)) => {
            tracing::debug!(
                "Loaded {} asset {} ({}x{})",
                kind,
                path.display(),
                sprite.width(),
                sprite.height()
            );
            AssetState::Ready(sprite)
        }
        Ok(Err(e)) => {
            tracing::warn!("Failed to load {} asset {}: {}", kind, path.display(), e);
            AssetState::Failed(e.to_string())
        }
        Err(_) => {
            let e = AssetError::Timeout(timeout.as_millis() as u64);
            tracing::warn!("Failed to load {} asset {}: {}", kind, path.display(), e);
            AssetState::Failed(e.to_string())
        }
    }
}

async fn decode(kind: AssetKind, path: PathBuf) -> Result<Sprite, AssetError> {
    let pixels = tokio::task::spawn_blocking(move || image::open(&path).map(|img| img.to_rgba8()))
        .await
        .map_err(|e| AssetError::Task(e.to_string()))??;
    Ok(Sprite::new(kind, pixels))
}

/// Start loading all three assets. Completions arrive in any order.
pub fn spawn_asset_loads(config: &Config) -> JoinSet<(AssetKind, AssetState)> {
    let mut loads = JoinSet::new();
    for kind in AssetKind::ALL {
        let path = asset_path(config, kind).to_path_buf();
        let timeout = config.asset_timeout;
        loads.spawn(async move { (kind, load_asset(kind, path, timeout).await) });
    }
    loads
}

pub fn asset_path(config: &Config, kind: AssetKind) -> &Path {
    match kind {
        AssetKind::Map => &config.map_path,
        AssetKind::Drone => &config.drone_path,
        AssetKind::Marker => &config.marker_path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("flightviz-{}-{}", std::process::id(), name))
    }

    #[tokio::test]
    async fn test_load_png() {
        let path = temp_path("drone.png");
        RgbaImage::from_pixel(6, 4, Rgba([255, 0, 0, 255]))
            .save(&path)
            .expect("write png");

        let state = load_asset(AssetKind::Drone, path.clone(), Duration::from_secs(5)).await;
        let sprite = state.sprite().expect("ready");
        assert_eq!((sprite.width(), sprite.height()), (6, 4));
        assert_eq!(sprite.kind, AssetKind::Drone);

        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn test_missing_file_is_failed() {
        let state = load_asset(
            AssetKind::Map,
            PathBuf::from("/nonexistent/map.png"),
            Duration::from_secs(5),
        )
        .await;
        assert!(matches!(state, AssetState::Failed(_)));
    }

    #[tokio::test]
    async fn test_undecodable_file_is_failed() {
        let path = temp_path("broken.png");
        std::fs::write(&path, b"definitely not a png").expect("write file");

        let state = load_asset(AssetKind::Marker, path.clone(), Duration::from_secs(5)).await;
        assert!(matches!(state, AssetState::Failed(_)));

        let _ = std::fs::remove_file(path);
    }
}
