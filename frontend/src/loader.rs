use std::cell::RefCell;
use std::rc::Rc;

use log::{info, warn};

use crate::error::LoadError;
use crate::post::Post;
use crate::session::{ListingSession, LoadTicket, Msg};

/// Where the posts collection comes from.
///
/// Implementations fetch the whole collection in one go; there is no
/// pagination contract.
#[allow(async_fn_in_trait)]
pub trait PostSource {
    async fn fetch_posts(&self) -> Result<Vec<Post>, LoadError>;
}

/// Runs one load and hands its outcome to the session.
///
/// The session is only borrowed after the fetch resolves, so the page stays
/// interactive while the request is outstanding. Returns whether the session
/// accepted the result.
pub async fn load_posts<S: PostSource>(
    session: &Rc<RefCell<ListingSession>>,
    source: &S,
    ticket: LoadTicket,
) -> bool {
    info!("loading posts (load {})", ticket.generation());
    let result = source.fetch_posts().await;

    match &result {
        Ok(posts) => info!("load {} returned {} posts", ticket.generation(), posts.len()),
        Err(err) => warn!("load {} failed: {}", ticket.generation(), err),
    }

    session
        .borrow_mut()
        .update(Msg::LoadFinished(ticket, result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    struct Fixed(Result<Vec<Post>, LoadError>);

    impl PostSource for Fixed {
        async fn fetch_posts(&self) -> Result<Vec<Post>, LoadError> {
            self.0.clone()
        }
    }

    #[test]
    fn successful_load_lands_in_session() {
        let session = Rc::new(RefCell::new(ListingSession::new()));
        let ticket = session.borrow_mut().activate().unwrap();
        let source = Fixed(Ok(vec![Post::new(1, 1, "a", "b")]));

        assert!(block_on(load_posts(&session, &source, ticket)));
        assert!(!session.borrow().is_loading());
        assert_eq!(session.borrow().view().len(), 1);
    }

    #[test]
    fn failed_load_is_reported() {
        let session = Rc::new(RefCell::new(ListingSession::new()));
        let ticket = session.borrow_mut().activate().unwrap();
        let source = Fixed(Err(LoadError::Network("offline".into())));

        assert!(block_on(load_posts(&session, &source, ticket)));
        assert!(session.borrow_mut().update(Msg::RetryRequested));
        assert!(session.borrow_mut().take_pending_ticket().is_some());
    }
}
