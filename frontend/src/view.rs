//! Render-ready description of the page, built from a session without any
//! DOM access.

use crate::criteria::{author_value, SortMode};
use crate::post::{AuthorId, Post, PostId};
use crate::session::{ListingSession, LoadState};

pub const HEADING: &str = "Posts";
pub const SEARCH_PLACEHOLDER: &str = "Search by title...";
pub const ALL_AUTHORS_LABEL: &str = "All Users";
pub const LOADING_MESSAGE: &str = "Loading posts...";
pub const EMPTY_MESSAGE: &str = "No posts found.";
pub const FAILED_MESSAGE: &str = "Failed to load posts.";
pub const RETRY_LABEL: &str = "Retry";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    fn new(value: &str, label: &str) -> Self {
        SelectOption {
            value: value.to_owned(),
            label: label.to_owned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Controls {
    pub search_value: String,
    pub author_options: Vec<SelectOption>,
    pub author_value: String,
    pub sort_options: Vec<SelectOption>,
    pub sort_value: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    pub key: PostId,
    pub title: String,
    pub body: String,
    pub author_line: String,
}

impl Card {
    pub fn from_post(post: &Post) -> Self {
        Card {
            key: post.id,
            title: post.title.clone(),
            body: post.body.clone(),
            author_line: format!("User ID: {}", post.user_id),
        }
    }
}

/// What sits under the controls. Exactly one of these is shown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Body {
    Loading,
    Failed { detail: String },
    Empty,
    Cards(Vec<Card>),
}

impl Body {
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Body::Loading => Some(LOADING_MESSAGE),
            Body::Failed { .. } => Some(FAILED_MESSAGE),
            Body::Empty => Some(EMPTY_MESSAGE),
            Body::Cards(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListingView {
    pub controls: Controls,
    pub body: Body,
}

impl ListingView {
    pub fn from_session(session: &ListingSession) -> Self {
        let criteria = session.criteria();

        ListingView {
            controls: Controls {
                search_value: criteria.search_query.clone(),
                author_options: author_options(&session.authors()),
                author_value: author_value(criteria.author_filter),
                sort_options: sort_options(),
                sort_value: criteria.sort_mode.value().to_owned(),
            },
            body: body_for(session.load_state(), session.view()),
        }
    }
}

/// Loading wins over everything, then failure, then the empty state.
pub fn body_for(load_state: &LoadState, view: &[Post]) -> Body {
    match load_state {
        LoadState::Loading => Body::Loading,
        LoadState::Failed(err) => Body::Failed {
            detail: err.to_string(),
        },
        LoadState::Ready if view.is_empty() => Body::Empty,
        LoadState::Ready => Body::Cards(view.iter().map(Card::from_post).collect()),
    }
}

pub fn author_options(authors: &[AuthorId]) -> Vec<SelectOption> {
    let mut options = vec![SelectOption::new("", ALL_AUTHORS_LABEL)];
    options.extend(
        authors
            .iter()
            .map(|id| SelectOption::new(&id.to_string(), &format!("User {}", id))),
    );
    options
}

pub fn sort_options() -> Vec<SelectOption> {
    SortMode::ALL
        .into_iter()
        .map(|mode| SelectOption::new(mode.value(), mode.label()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadError;

    #[test]
    fn author_options_lead_with_all_users() {
        let options = author_options(&[3, 1]);
        let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
        let values: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(labels, vec!["All Users", "User 3", "User 1"]);
        assert_eq!(values, vec!["", "3", "1"]);
    }

    #[test]
    fn five_sort_options() {
        let labels: Vec<String> = sort_options().into_iter().map(|o| o.label).collect();
        assert_eq!(
            labels,
            vec![
                "Sort By",
                "Title (A-Z)",
                "Title (Z-A)",
                "User ID (Asc)",
                "User ID (Desc)"
            ]
        );
    }

    #[test]
    fn body_precedence() {
        let posts = vec![Post::new(4, 9, "t", "b")];

        assert_eq!(body_for(&LoadState::Loading, &posts), Body::Loading);
        assert_eq!(
            body_for(&LoadState::Failed(LoadError::Status(404)), &posts),
            Body::Failed {
                detail: "server responded with status 404".into()
            }
        );
        assert_eq!(body_for(&LoadState::Ready, &[]), Body::Empty);
        assert_eq!(
            body_for(&LoadState::Ready, &posts),
            Body::Cards(vec![Card {
                key: 4,
                title: "t".into(),
                body: "b".into(),
                author_line: "User ID: 9".into(),
            }])
        );
    }

    #[test]
    fn messages() {
        assert_eq!(Body::Loading.message(), Some("Loading posts..."));
        assert_eq!(Body::Empty.message(), Some("No posts found."));
        assert_eq!(Body::Cards(Vec::new()).message(), None);
    }
}
