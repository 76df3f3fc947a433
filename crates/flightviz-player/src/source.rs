//! Flight data source.
//!
//! The data is fetched once. Failures are logged and produce no flight at
//! all, which leaves playback permanently unstartable without taking the
//! process down. An empty but valid document is still a flight.

use anyhow::{Context, Result};
use flightviz_core::{parse_flight_data, FlightSample};

/// Load samples from a file path or an http(s) URL; `None` when the load failed.
pub async fn load_flight_data(source: &str) -> Option<Vec<FlightSample>> {
    match fetch_flight_data(source).await {
        Ok(samples) => {
            tracing::info!("Loaded {} flight samples from {}", samples.len(), source);
            Some(samples)
        }
        Err(e) => {
            tracing::error!("Failed to load flight data from {}: {:#}", source, e);
            None
        }
    }
}

/// Like [`load_flight_data`] but reports the failure.
pub async fn fetch_flight_data(source: &str) -> Result<Vec<FlightSample>> {
    let body = if is_url(source) {
        reqwest::get(source)
            .await
            .with_context(|| format!("request to {source} failed"))?
            .error_for_status()?
            .text()
            .await?
    } else {
        tokio::fs::read_to_string(source)
            .await
            .with_context(|| format!("cannot read {source}"))?
    };

    Ok(parse_flight_data(&body)?)
}

fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("flightviz-{}-{}", std::process::id(), name));
        std::fs::write(&path, contents).expect("write temp file");
        path
    }

    #[test]
    fn test_is_url() {
        assert!(is_url("http://localhost:8000/flightData.json"));
        assert!(is_url("https://example.com/data.json"));
        assert!(!is_url("flightData.json"));
        assert!(!is_url("/tmp/http.json"));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let path = temp_file(
            "ok.json",
            r#"[{"timestamp": 0, "speed": "10", "direction": "0"},
                {"timestamp": 60, "speed": "12", "direction": "45"}]"#,
        );

        let samples = load_flight_data(path.to_str().unwrap()).await.unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[1].direction, 45.0);

        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn test_missing_file_yields_no_flight() {
        assert!(load_flight_data("/nonexistent/flightData.json").await.is_none());
    }

    #[tokio::test]
    async fn test_malformed_document_yields_no_flight() {
        let path = temp_file("bad.json", r#"{"not": "an array"}"#);

        assert!(fetch_flight_data(path.to_str().unwrap()).await.is_err());
        assert!(load_flight_data(path.to_str().unwrap()).await.is_none());

        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn test_empty_document_is_an_empty_flight() {
        let path = temp_file("empty.json", "[]");

        let samples = load_flight_data(path.to_str().unwrap()).await;
        assert_eq!(samples, Some(Vec::new()));

        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn test_null_reading_still_loads() {
        let path = temp_file(
            "null.json",
            r#"[{"timestamp": 0, "speed": null, "direction": "0"},
                {"timestamp": 3600, "speed": "5", "direction": "0"}]"#,
        );

        let samples = load_flight_data(path.to_str().unwrap()).await.unwrap();
        assert_eq!(samples.len(), 2);
        assert!(samples[0].speed.is_nan());

        let _ = std::fs::remove_file(path);
    }
}
