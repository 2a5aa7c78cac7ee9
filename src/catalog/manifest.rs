use futures::future::LocalBoxFuture;
use log::{info, warn};
use serde_json::Value;

use crate::error::SoundboardError;

pub trait ManifestProvider {
    /// Raw manifest body.
    fn fetch_manifest(&self) -> LocalBoxFuture<'static, Result<String, SoundboardError>>;
}

/// Parses a JSON array of file names. Non-string entries are skipped.
pub fn parse_manifest(body: &str) -> Result<Vec<String>, SoundboardError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| SoundboardError::Manifest(e.to_string()))?;
    let Value::Array(entries) = value else {
        return Err(SoundboardError::Manifest(
            "manifest is not a list".to_string(),
        ));
    };

    let mut files = Vec::with_capacity(entries.len());
    for entry in entries {
        match entry {
            Value::String(name) => files.push(name),
            other => warn!("Skipping manifest entry {}", other),
        }
    }
    Ok(files)
}

/// Ordered catalog from the provider, or `fallback` when it cannot be loaded.
pub async fn resolve_catalog<M: ManifestProvider + ?Sized>(
    provider: &M,
    fallback: &[String],
) -> Vec<String> {
    let loaded = match provider.fetch_manifest().await {
        Ok(body) => parse_manifest(&body),
        Err(err) => Err(err),
    };
    match loaded {
        Ok(files) => {
            info!("Loaded {} sounds from manifest", files.len());
            files
        }
        Err(err) => {
            warn!("{}; falling back to defaults", err);
            fallback.to_vec()
        }
    }
}

#[cfg(test)]
mod tests {
    use futures::{FutureExt, executor::block_on};

    use super::*;

    struct StaticManifest(Result<String, SoundboardError>);

    impl ManifestProvider for StaticManifest {
        fn fetch_manifest(&self) -> LocalBoxFuture<'static, Result<String, SoundboardError>> {
            let result = self.0.clone();
            async move { result }.boxed_local()
        }
    }

    fn fallback() -> Vec<String> {
        vec!["beep.wav".into(), "ding.wav".into(), "pop.wav".into()]
    }

    #[test]
    fn test_parse_list() {
        let files = parse_manifest(r#"["a.wav", "b c.mp3"]"#).unwrap();
        assert_eq!(files, vec!["a.wav", "b c.mp3"]);
    }

    #[test]
    fn test_parse_skips_non_strings() {
        let files = parse_manifest(r#"["a.wav", 3, null, {"x": 1}, "b.wav"]"#).unwrap();
        assert_eq!(files, vec!["a.wav", "b.wav"]);
    }

    #[test]
    fn test_parse_rejects_non_list() {
        assert!(matches!(
            parse_manifest(r#"{"sounds": ["a.wav"]}"#),
            Err(SoundboardError::Manifest(_))
        ));
        assert!(parse_manifest("not json").is_err());
    }

    #[test]
    fn test_provider_failure_uses_fallback() {
        let provider = StaticManifest(Err(SoundboardError::Manifest("HTTP 404".into())));
        let files = block_on(resolve_catalog(&provider, &fallback()));
        assert_eq!(files, vec!["beep.wav", "ding.wav", "pop.wav"]);
    }

    #[test]
    fn test_non_list_body_uses_fallback() {
        let provider = StaticManifest(Ok(r#""beep.wav""#.into()));
        let files = block_on(resolve_catalog(&provider, &fallback()));
        assert_eq!(files, fallback());
    }

    #[test]
    fn test_manifest_order_is_kept() {
        let provider = StaticManifest(Ok(r#"["z.wav", "a.wav", "m.wav"]"#.into()));
        let files = block_on(resolve_catalog(&provider, &fallback()));
        assert_eq!(files, vec!["z.wav", "a.wav", "m.wav"]);
    }

    #[test]
    fn test_empty_manifest_is_not_replaced() {
        let provider = StaticManifest(Ok("[]".into()));
        let files = block_on(resolve_catalog(&provider, &fallback()));
        assert!(files.is_empty());
    }
}
