use std::future::Future;

use atelier_models::contact::ContactMessage;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactMessageRepository<Txn: Send + Sync + 'static>: Send + Sync + 'static {
    /// Persists a fully formed contact message.
    ///
    /// The record is expected to already carry its id and creation
    /// timestamp; the repository never assigns either.
    fn create(
        &self,
        txn: &mut Txn,
        message: &ContactMessage,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;

    /// Returns all stored contact messages, oldest first.
    fn list(&self, txn: &mut Txn) -> impl Future<Output = anyhow::Result<Vec<ContactMessage>>> + Send;
}

#[cfg(feature = "mock")]
impl<Txn: Send + Sync + 'static> MockContactMessageRepository<Txn> {
    pub fn with_create(mut self, message: ContactMessage, result: anyhow::Result<()>) -> Self {
        self.expect_create()
            .once()
            .withf(move |_, msg| *msg == message)
            .return_once(|_, _| Box::pin(std::future::ready(result)));
        self
    }
}
