use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use log::debug;

use crate::error::{describe_js, LoadError};
use crate::loader::PostSource;
use crate::post::{parse_posts, Post};

/// Loads the collection with a browser `fetch` GET.
pub struct FetchConnection {
    url: String,
}

impl FetchConnection {
    pub fn new(url: &str) -> Self {
        FetchConnection {
            url: url.to_owned(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl PostSource for FetchConnection {
    async fn fetch_posts(&self) -> Result<Vec<Post>, LoadError> {
        let window =
            web_sys::window().ok_or_else(|| LoadError::Network("no global window".into()))?;

        let response = JsFuture::from(window.fetch_with_str(&self.url))
            .await
            .map_err(network_error)?;
        let response: Response = response.dyn_into().map_err(network_error)?;

        if !response.ok() {
            return Err(LoadError::Status(response.status()));
        }

        let text = JsFuture::from(response.text().map_err(network_error)?)
            .await
            .map_err(network_error)?;
        let payload = text
            .as_string()
            .ok_or_else(|| LoadError::Malformed("response body is not text".into()))?;

        debug!("got posts payload from {}: {} bytes", self.url, payload.len());
        Ok(parse_posts(&payload)?)
    }
}

fn network_error(value: JsValue) -> LoadError {
    LoadError::Network(describe_js(&value))
}
