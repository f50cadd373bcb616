//! Browser listing of posts: fetch the collection once, then search, filter
//! by author and sort it client-side.
//!
//! Data flows one way. [`loader`] fills the raw collection of a
//! [`session::ListingSession`], [`derivation`] turns the raw collection plus
//! the [`criteria`] into the visible sequence, [`view`] describes the page and
//! [`render`] patches the DOM. Everything up to [`view`] is plain Rust and is
//! tested natively; [`app`], [`connection`] and [`render`] need a browser.
extern crate console_error_panic_hook;
extern crate serde;
#[macro_use]
extern crate serde_derive;

pub mod app;
pub mod config;
pub mod connection;
pub mod criteria;
pub mod derivation;
pub mod error;
pub mod keyed;
pub mod loader;
pub mod logging;
pub mod post;
pub mod render;
pub mod session;
pub mod view;

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

use crate::app::MountedListing;
use crate::config::ListingConfig;
use crate::connection::FetchConnection;
use crate::error::DomError;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = log)]
    pub fn console_log(contents: &str);
}

/// Handle returned to JS by [`bootstrap`]. Freeing it detaches the listing
/// but leaves the page content in place.
#[wasm_bindgen]
pub struct ListingHandle {
    mounted: Option<MountedListing>,
}

#[wasm_bindgen]
impl ListingHandle {
    /// Detaches the listing; a load still in flight is ignored when it lands.
    pub fn unmount(&mut self) {
        if let Some(mounted) = self.mounted.take() {
            mounted.unmount();
        }
    }
}

#[wasm_bindgen]
pub fn bootstrap() -> Result<ListingHandle, JsValue> {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));

    let defaults = ListingConfig::default();
    logging::init_logger(defaults.log_level);

    start(defaults).map_err(|err| {
        log::error!("could not start posts listing: {}", err);
        JsValue::from_str(&err.to_string())
    })
}

fn start(defaults: ListingConfig) -> Result<ListingHandle, DomError> {
    let (document, root) = document_and_root(&defaults.root_selector)?;
    let config = defaults.from_root(&root);
    logging::init_logger(config.log_level);
    let connection = FetchConnection::new(&config.posts_url);
    log::info!("posts listing starting, source {}", connection.url());

    let mounted = app::mount_listing(document, root, connection)?;
    Ok(ListingHandle {
        mounted: Some(mounted),
    })
}

pub fn document_and_root(selector: &str) -> Result<(Document, Element), DomError> {
    let window = web_sys::window().ok_or(DomError::NoWindow)?;
    let document = window.document().ok_or(DomError::NoDocument)?;
    let root = document
        .query_selector(selector)?
        .ok_or_else(|| DomError::MissingRoot(selector.to_owned()))?;

    Ok((document, root))
}
