use log::{warn, LevelFilter};
use web_sys::Element;

pub const DEFAULT_POSTS_URL: &str = "https://jsonplaceholder.typicode.com/posts";
pub const DEFAULT_ROOT_SELECTOR: &str = "#posts_root";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

pub const POSTS_URL_ATTRIBUTE: &str = "data-posts-url";
pub const LOG_LEVEL_ATTRIBUTE: &str = "data-log-level";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListingConfig {
    pub posts_url: String,
    pub root_selector: String,
    pub log_level: LevelFilter,
}

impl Default for ListingConfig {
    fn default() -> Self {
        ListingConfig {
            posts_url: DEFAULT_POSTS_URL.to_owned(),
            root_selector: DEFAULT_ROOT_SELECTOR.to_owned(),
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl ListingConfig {
    /// Blank values are ignored; an unparsable level keeps the current one.
    pub fn with_overrides(mut self, posts_url: Option<String>, log_level: Option<String>) -> Self {
        if let Some(url) = posts_url.filter(|url| !url.trim().is_empty()) {
            self.posts_url = url.trim().to_owned();
        }

        if let Some(level) = log_level.filter(|level| !level.trim().is_empty()) {
            match level.trim().parse::<LevelFilter>() {
                Ok(parsed) => self.log_level = parsed,
                Err(_) => warn!("ignoring unknown log level {:?}", level),
            }
        }

        self
    }

    /// Reads overrides from the root element's data attributes.
    pub fn from_root(self, root: &Element) -> Self {
        self.with_overrides(
            root.get_attribute(POSTS_URL_ATTRIBUTE),
            root.get_attribute(LOG_LEVEL_ATTRIBUTE),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ListingConfig::default();
        assert_eq!(config.posts_url, "https://jsonplaceholder.typicode.com/posts");
        assert_eq!(config.root_selector, "#posts_root");
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn overrides_apply() {
        let config = ListingConfig::default().with_overrides(
            Some(" http://127.0.0.1:5050/posts ".into()),
            Some("DEBUG".into()),
        );
        assert_eq!(config.posts_url, "http://127.0.0.1:5050/posts");
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn blank_or_bad_overrides_are_ignored() {
        let config = ListingConfig::default()
            .with_overrides(Some("   ".into()), Some("chatty".into()));
        assert_eq!(config, ListingConfig::default());
    }
}
