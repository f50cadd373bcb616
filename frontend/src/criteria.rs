use crate::post::AuthorId;

/// Ordering applied as the last derivation stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortMode {
    #[default]
    None,
    TitleAsc,
    TitleDesc,
    AuthorAsc,
    AuthorDesc,
}

impl SortMode {
    pub const ALL: [SortMode; 5] = [
        SortMode::None,
        SortMode::TitleAsc,
        SortMode::TitleDesc,
        SortMode::AuthorAsc,
        SortMode::AuthorDesc,
    ];

    /// Value carried by the sort selector option.
    pub fn value(self) -> &'static str {
        match self {
            SortMode::None => "",
            SortMode::TitleAsc => "title-asc",
            SortMode::TitleDesc => "title-desc",
            SortMode::AuthorAsc => "userId-asc",
            SortMode::AuthorDesc => "userId-desc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortMode::None => "Sort By",
            SortMode::TitleAsc => "Title (A-Z)",
            SortMode::TitleDesc => "Title (Z-A)",
            SortMode::AuthorAsc => "User ID (Asc)",
            SortMode::AuthorDesc => "User ID (Desc)",
        }
    }

    /// Unknown values fall back to no sorting.
    pub fn from_value(value: &str) -> SortMode {
        SortMode::ALL
            .into_iter()
            .find(|mode| mode.value() == value)
            .unwrap_or_default()
    }
}

/// The three user-controlled inputs of the derived view.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Criteria {
    pub search_query: String,
    pub author_filter: Option<AuthorId>,
    pub sort_mode: SortMode,
}

/// Empty or non-numeric selector values mean "all authors".
pub fn author_from_value(value: &str) -> Option<AuthorId> {
    value.trim().parse().ok()
}

pub fn author_value(author: Option<AuthorId>) -> String {
    author.map(|id| id.to_string()).unwrap_or_default()
}
