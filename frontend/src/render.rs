use std::collections::HashMap;

use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement, HtmlOptionElement, HtmlSelectElement};

use crate::error::DomError;
use crate::keyed;
use crate::post::PostId;
use crate::view::{self, Body, Card, ListingView, SelectOption};

pub const RETRY_BUTTON_CLASS: &str = "retry-button";

/// The listing's DOM, built once on mount and patched on every render.
pub struct ListingPage {
    document: Document,
    root: Element,
    search_input: HtmlInputElement,
    author_select: HtmlSelectElement,
    sort_select: HtmlSelectElement,
    body: Element,
    grid: Option<Element>,
    cards: HashMap<PostId, (Card, Element)>,
    author_options: Vec<SelectOption>,
}

impl ListingPage {
    pub fn mount(document: Document, root: Element) -> Result<Self, DomError> {
        root.set_inner_html("");

        let container = create_element(&document, "div", "container")?;
        root.append_child(&container)?;

        let heading = document.create_element("h1")?;
        heading.set_text_content(Some(view::HEADING));
        container.append_child(&heading)?;

        let controls = create_element(&document, "div", "controls")?;
        container.append_child(&controls)?;

        let search_input: HtmlInputElement = create_typed(&document, "input", "search-input")?;
        search_input.set_placeholder(view::SEARCH_PLACEHOLDER);
        controls.append_child(&search_input)?;

        let author_select: HtmlSelectElement = create_typed(&document, "select", "dropdown")?;
        controls.append_child(&author_select)?;

        let sort_select: HtmlSelectElement = create_typed(&document, "select", "dropdown")?;
        fill_options(&sort_select, &view::sort_options())?;
        controls.append_child(&sort_select)?;

        let body = document.create_element("div")?;
        container.append_child(&body)?;

        debug!("mounted listing page");

        Ok(ListingPage {
            document,
            root,
            search_input,
            author_select,
            sort_select,
            body,
            grid: None,
            cards: HashMap::new(),
            author_options: Vec::new(),
        })
    }

    pub fn search_input(&self) -> &HtmlInputElement {
        &self.search_input
    }

    pub fn author_select(&self) -> &HtmlSelectElement {
        &self.author_select
    }

    pub fn sort_select(&self) -> &HtmlSelectElement {
        &self.sort_select
    }

    pub fn body(&self) -> &Element {
        &self.body
    }

    /// Element currently rendered for a post, if any.
    pub fn card_element(&self, key: PostId) -> Option<&Element> {
        self.cards.get(&key).map(|(_, element)| element)
    }

    pub fn render(&mut self, listing: &ListingView) -> Result<(), DomError> {
        self.render_controls(listing)?;

        let body = &listing.body;
        if let Body::Cards(cards) = body {
            return self.render_cards(cards);
        }
        self.show_message(message_class(body), body.message().unwrap_or_default())?;

        if let Body::Failed { detail } = body {
            let detail_line = create_element(&self.document, "p", "error-detail")?;
            detail_line.set_text_content(Some(detail.as_str()));
            self.body.append_child(&detail_line)?;

            let retry = create_element(&self.document, "button", RETRY_BUTTON_CLASS)?;
            retry.set_text_content(Some(view::RETRY_LABEL));
            self.body.append_child(&retry)?;
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.root.set_inner_html("");
        self.cards.clear();
        self.grid = None;
        debug!("cleared listing page");
    }

    fn render_controls(&mut self, listing: &ListingView) -> Result<(), DomError> {
        let controls = &listing.controls;

        // rewriting an unchanged value would move the caret
        if self.search_input.value() != controls.search_value {
            self.search_input.set_value(&controls.search_value);
        }

        if self.author_options != controls.author_options {
            self.author_select.set_inner_html("");
            fill_options(&self.author_select, &controls.author_options)?;
            self.author_options = controls.author_options.clone();
        }
        self.author_select.set_value(&controls.author_value);
        self.sort_select.set_value(&controls.sort_value);
        Ok(())
    }

    fn show_message(&mut self, class: &str, text: &str) -> Result<(), DomError> {
        self.body.set_inner_html("");
        self.cards.clear();
        self.grid = None;

        let message = create_element(&self.document, "p", class)?;
        message.set_text_content(Some(text));
        self.body.append_child(&message)?;
        Ok(())
    }

    fn render_cards(&mut self, cards: &[Card]) -> Result<(), DomError> {
        let grid = match self.grid.clone() {
            Some(grid) => grid,
            None => {
                self.body.set_inner_html("");
                let grid = create_element(&self.document, "div", "posts-grid")?;
                self.body.append_child(&grid)?;
                self.grid = Some(grid.clone());
                grid
            }
        };

        let keys: Vec<PostId> = cards.iter().map(|card| card.key).collect();
        let plan = keyed::plan(self.cards.keys().copied(), &keys);

        for key in &plan.removed {
            if let Some((_, element)) = self.cards.remove(key) {
                element.remove();
            }
        }

        for card in cards {
            let stale = match self.cards.get(&card.key) {
                Some((rendered, _)) => rendered != card,
                None => true,
            };
            if stale {
                if let Some((_, element)) = self.cards.remove(&card.key) {
                    element.remove();
                }
                let element = self.create_card(card)?;
                self.cards.insert(card.key, (card.clone(), element));
            }
        }

        // appending an attached node moves it
        for key in &plan.order {
            if let Some((_, element)) = self.cards.get(key) {
                grid.append_child(element)?;
            }
        }

        debug!(
            "rendered {} cards ({} new, {} removed)",
            plan.order.len(),
            plan.created.len(),
            plan.removed.len()
        );
        Ok(())
    }

    fn create_card(&self, card: &Card) -> Result<Element, DomError> {
        let element = create_element(&self.document, "div", "post-card")?;
        element.set_attribute("data-key", &card.key.to_string())?;

        for (tag, class, text) in [
            ("h2", "post-title", &card.title),
            ("p", "post-body", &card.body),
            ("p", "post-user", &card.author_line),
        ] {
            let child = create_element(&self.document, tag, class)?;
            child.set_text_content(Some(text.as_str()));
            element.append_child(&child)?;
        }

        Ok(element)
    }
}

fn message_class(body: &Body) -> &'static str {
    match body {
        Body::Loading => "loading-message",
        Body::Failed { .. } => "error-message",
        Body::Empty | Body::Cards(_) => "no-posts-message",
    }
}

fn create_element(document: &Document, tag: &str, class: &str) -> Result<Element, DomError> {
    let element = document.create_element(tag)?;
    element.set_class_name(class);
    Ok(element)
}

fn create_typed<T: JsCast>(
    document: &Document,
    tag: &'static str,
    class: &str,
) -> Result<T, DomError> {
    create_element(document, tag, class)?
        .dyn_into::<T>()
        .map_err(|_| DomError::ElementType(tag))
}

fn fill_options(select: &HtmlSelectElement, options: &[SelectOption]) -> Result<(), DomError> {
    for option in options {
        let element = HtmlOptionElement::new_with_text_and_value(&option.label, &option.value)?;
        select.append_child(&element)?;
    }
    Ok(())
}
