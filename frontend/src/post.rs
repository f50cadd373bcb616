use std::rc::Rc;

pub type PostId = u64;
pub type AuthorId = u64;

/// A single post as served by the posts endpoint.
#[derive(Hash, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    #[serde(rename = "userId")]
    pub user_id: AuthorId,
    pub title: String,
    pub body: String,
}

impl Post {
    pub fn new(id: PostId, user_id: AuthorId, title: &str, body: &str) -> Self {
        Post {
            id,
            user_id,
            title: title.to_owned(),
            body: body.to_owned(),
        }
    }
}

/// Immutable snapshot of the collection in server order.
pub type PostSnapshot = Rc<[Post]>;

pub fn parse_posts(payload: &str) -> Result<Vec<Post>, serde_json::Error> {
    serde_json::from_str(payload)
}

/// Distinct author ids in order of first appearance.
pub fn distinct_authors(posts: &[Post]) -> Vec<AuthorId> {
    let mut authors: Vec<AuthorId> = Vec::new();
    for post in posts {
        if !authors.contains(&post.user_id) {
            authors.push(post.user_id);
        }
    }
    authors
}
