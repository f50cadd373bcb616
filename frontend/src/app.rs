use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, error, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event};

use crate::criteria::{author_from_value, SortMode};
use crate::error::DomError;
use crate::loader::{load_posts, PostSource};
use crate::render::{ListingPage, RETRY_BUTTON_CLASS};
use crate::session::{ListingSession, LoadTicket, Msg};
use crate::view::ListingView;

/// Wires a session to its page: messages in, renders out.
struct Controller<S> {
    session: Rc<RefCell<ListingSession>>,
    page: Rc<RefCell<ListingPage>>,
    source: S,
}

impl<S: PostSource + 'static> Controller<S> {
    fn dispatch(&self, msg: Msg) {
        let changed = self.session.borrow_mut().update(msg);
        if changed {
            self.render();
        }
    }

    fn render(&self) {
        let view = ListingView::from_session(&self.session.borrow());
        if let Err(err) = self.page.borrow_mut().render(&view) {
            error!("failed to render listing: {}", err);
        }
    }

    fn start_load(self: &Rc<Self>, ticket: LoadTicket) {
        let controller = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if load_posts(&controller.session, &controller.source, ticket).await {
                controller.render();
            }
        });
    }

    fn retry(self: &Rc<Self>) {
        self.dispatch(Msg::RetryRequested);
        let ticket = self.session.borrow_mut().take_pending_ticket();
        if let Some(ticket) = ticket {
            self.start_load(ticket);
        }
    }
}

/// An event handler registered on one element, removed again on drop.
struct Listener {
    target: Element,
    event_type: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Drop for Listener {
    fn drop(&mut self) {
        let removed = self.target.remove_event_listener_with_callback(
            self.event_type,
            self.closure.as_ref().unchecked_ref(),
        );
        if let Err(err) = removed {
            warn!(
                "could not remove {} listener: {}",
                self.event_type,
                DomError::from(err)
            );
        }
    }
}

/// A listing attached to the page.
///
/// Dropping it tears the session down and unregisters every listener, so an
/// outstanding load lands nowhere and the controls go inert. The DOM stays in
/// place unless [`unmount`] is used.
///
/// [`unmount`]: MountedListing::unmount
pub struct MountedListing {
    session: Rc<RefCell<ListingSession>>,
    page: Rc<RefCell<ListingPage>>,
    _listeners: Vec<Listener>,
}

impl MountedListing {
    /// Detaches the listing and empties the root element.
    pub fn unmount(self) {
        self.page.borrow_mut().clear();
    }
}

impl Drop for MountedListing {
    fn drop(&mut self) {
        self.session.borrow_mut().teardown();
        debug!("detached listing");
    }
}

/// Builds the page under `root`, renders the loading state and issues the
/// one load of this activation.
pub fn mount_listing<S: PostSource + 'static>(
    document: Document,
    root: Element,
    source: S,
) -> Result<MountedListing, DomError> {
    let page = Rc::new(RefCell::new(ListingPage::mount(document, root)?));
    let session = Rc::new(RefCell::new(ListingSession::new()));
    let controller = Rc::new(Controller {
        session: session.clone(),
        page: page.clone(),
        source,
    });

    let mut listeners = Vec::new();
    {
        let page_ref = page.borrow();

        let search_input = page_ref.search_input().clone();
        let search_controller = controller.clone();
        listeners.push(listen(page_ref.search_input(), "input", move |_event| {
            search_controller.dispatch(Msg::SearchChanged(search_input.value()));
        })?);

        let author_select = page_ref.author_select().clone();
        let author_controller = controller.clone();
        listeners.push(listen(page_ref.author_select(), "change", move |_event| {
            author_controller.dispatch(Msg::AuthorSelected(author_from_value(
                &author_select.value(),
            )));
        })?);

        let sort_select = page_ref.sort_select().clone();
        let sort_controller = controller.clone();
        listeners.push(listen(page_ref.sort_select(), "change", move |_event| {
            sort_controller.dispatch(Msg::SortSelected(SortMode::from_value(
                &sort_select.value(),
            )));
        })?);

        let retry_controller = controller.clone();
        listeners.push(listen(page_ref.body(), "click", move |event: Event| {
            let on_retry = event
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .map(|element| {
                    element
                        .class_name()
                        .split_whitespace()
                        .any(|class| class == RETRY_BUTTON_CLASS)
                })
                .unwrap_or(false);
            if on_retry {
                retry_controller.retry();
            }
        })?);
    }

    controller.render();

    let ticket = session.borrow_mut().activate();
    if let Some(ticket) = ticket {
        controller.start_load(ticket);
    }

    Ok(MountedListing {
        session,
        page,
        _listeners: listeners,
    })
}

fn listen(
    element: &Element,
    event_type: &'static str,
    handler: impl FnMut(Event) + 'static,
) -> Result<Listener, DomError> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    element.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
    Ok(Listener {
        target: element.clone(),
        event_type,
        closure,
    })
}
