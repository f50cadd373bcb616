use std::cmp::{Ordering, Reverse};

use crate::criteria::{Criteria, SortMode};
use crate::post::Post;

/// Recomputes the visible sequence from the raw collection.
///
/// Stages run in a fixed order: title search, author filter, then a stable
/// sort. The raw collection is never touched and no state is carried between
/// calls, so identical inputs always give identical output.
pub fn derive_view(raw: &[Post], criteria: &Criteria) -> Vec<Post> {
    let mut view = raw.to_vec();

    if !criteria.search_query.is_empty() {
        let needle = criteria.search_query.to_lowercase();
        view.retain(|post| post.title.to_lowercase().contains(&needle));
    }

    if let Some(author) = criteria.author_filter {
        view.retain(|post| post.user_id == author);
    }

    sort_posts(&mut view, criteria.sort_mode);
    view
}

/// Stable in every mode: equal keys keep their incoming relative order,
/// including the descending ones.
pub fn sort_posts(posts: &mut [Post], mode: SortMode) {
    match mode {
        SortMode::None => {}
        SortMode::TitleAsc => posts.sort_by(|a, b| collate(&a.title, &b.title)),
        SortMode::TitleDesc => posts.sort_by(|a, b| collate(&b.title, &a.title)),
        SortMode::AuthorAsc => posts.sort_by_key(|post| post.user_id),
        SortMode::AuthorDesc => posts.sort_by_key(|post| Reverse(post.user_id)),
    }
}

/// Case-insensitive ordinal collation: titles are compared code point by
/// code point on their lower-case form. Titles differing only in case are
/// equal keys.
pub fn collate(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}
