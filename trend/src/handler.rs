use async_trait::async_trait;

/// Completion notification capability registered with a runner at start time.
///
/// Exactly one of the two methods fires per run. `on_complete` receives back
/// the context value supplied at registration, `on_failure` a human readable
/// description of why no report was produced.
#[async_trait]
pub trait CompletionHandler<C: Send + 'static>: Send + Sync {
    async fn on_complete(&self, context: C);
    async fn on_failure(&self, message: &str);
}
