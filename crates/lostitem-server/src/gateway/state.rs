use std::sync::Arc;

use lostitem::embedding::EmbeddingProvider;
use lostitem::matcher::Matcher;

/// Shared handler state: one matcher (and so one match cache) per server.
pub struct HandlerState<P: EmbeddingProvider + 'static> {
    pub matcher: Arc<Matcher<P>>,
}

impl<P: EmbeddingProvider + 'static> Clone for HandlerState<P> {
    fn clone(&self) -> Self {
        Self {
            matcher: Arc::clone(&self.matcher),
        }
    }
}

impl<P: EmbeddingProvider + 'static> HandlerState<P> {
    pub fn new(matcher: Arc<Matcher<P>>) -> Self {
        Self { matcher }
    }
}
