use futures::{FutureExt, future::LocalBoxFuture};
use js_sys::Uint8Array;
use log::debug;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestCache, RequestInit, Response};

use super::resolve_url;
use crate::{
    audio::platform::{AssetResponse, AssetTransport},
    catalog::manifest::ManifestProvider,
    error::{SoundboardError, js_error_text},
};

async fn fetch_response(path: &str, cache: RequestCache) -> Result<Response, String> {
    let window = web_sys::window().ok_or_else(|| "no window".to_string())?;
    let url = match window.location().href() {
        Ok(base) => resolve_url(&base, path)
            .map(|u| u.to_string())
            .map_err(|e| e.to_string())?,
        Err(_) => path.to_string(),
    };
    debug!("GET {}", url);

    let init = RequestInit::new();
    init.set_method("GET");
    init.set_cache(cache);
    let request = Request::new_with_str_and_init(&url, &init).map_err(|e| js_error_text(&e))?;

    let value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| js_error_text(&e))?;
    value
        .dyn_into::<Response>()
        .map_err(|_| "fetch did not return a Response".to_string())
}

async fn read_body(response: &Response) -> Result<Vec<u8>, JsValue> {
    let buffer = JsFuture::from(response.array_buffer()?).await?;
    Ok(Uint8Array::new(&buffer).to_vec())
}

/// Asset transport over `window.fetch`.
pub struct HttpTransport;

impl AssetTransport for HttpTransport {
    fn fetch(&self, path: &str) -> LocalBoxFuture<'static, Result<AssetResponse, String>> {
        let path = path.to_string();
        async move {
            let response = fetch_response(&path, RequestCache::Default).await?;
            if !response.ok() {
                return Ok(AssetResponse {
                    status: response.status(),
                    body: Vec::new(),
                });
            }
            let body = read_body(&response).await.map_err(|e| js_error_text(&e))?;
            Ok(AssetResponse {
                status: response.status(),
                body,
            })
        }
        .boxed_local()
    }
}

/// Loads the manifest body, bypassing the HTTP cache.
pub struct HttpManifest {
    url: String,
}

impl HttpManifest {
    pub fn new(url: &str) -> Self {
        HttpManifest {
            url: url.to_string(),
        }
    }
}

impl ManifestProvider for HttpManifest {
    fn fetch_manifest(&self) -> LocalBoxFuture<'static, Result<String, SoundboardError>> {
        let url = self.url.clone();
        async move {
            let response = fetch_response(&url, RequestCache::NoCache)
                .await
                .map_err(SoundboardError::Manifest)?;
            if !response.ok() {
                return Err(SoundboardError::Manifest(format!(
                    "HTTP {} for {}",
                    response.status(),
                    url
                )));
            }
            let text = response
                .text()
                .map_err(|e| SoundboardError::Manifest(js_error_text(&e)))?;
            let text = JsFuture::from(text)
                .await
                .map_err(|e| SoundboardError::Manifest(js_error_text(&e)))?;
            text.as_string()
                .ok_or_else(|| SoundboardError::Manifest("manifest body is not text".to_string()))
        }
        .boxed_local()
    }
}
