//! Chain collaborator traits: submission, bulk read, confirmations

use crate::confirmation::{ConfirmationEvent, ConfirmationFilter};
use crate::counter::CounterRecord;
use crate::errors::{ChainReadError, SubmitError, SubscribeError};
use crate::identifiers::{AccountAddress, CorrelationToken, CounterId};
use crate::operation::OperationRequest;
use async_trait::async_trait;
use futures::stream::BoxStream;
use std::sync::Arc;

/// Submission and read interface of the counter contract.
///
/// The signer behind `submit` knows the connected account; the bulk read is
/// explicit about the owner because it can be queried for any address.
#[async_trait]
pub trait ChainEffects: Send + Sync {
    /// Submit an operation for signing and broadcast.
    ///
    /// Returns the correlation token (transaction hash) the moment the
    /// signer accepts; confirmation arrives later through the subscription.
    async fn submit(&self, request: OperationRequest) -> Result<CorrelationToken, SubmitError>;

    /// Bulk-read the owner's active counters as parallel id/record arrays.
    async fn read_active_counters(
        &self,
        owner: &AccountAddress,
    ) -> Result<(Vec<CounterId>, Vec<CounterRecord>), ChainReadError>;
}

/// Stream half of a confirmation subscription.
pub type ConfirmationStream = BoxStream<'static, ConfirmationEvent>;

/// Teardown half of a confirmation subscription.
///
/// Must be called exactly once, on normal teardown or on account change.
/// Dropping without unsubscribing leaks the collaborator-side registration.
pub trait ConfirmationSubscription: Send + Sync {
    /// Stop delivery of further events.
    fn unsubscribe(self: Box<Self>);
}

/// Push-style confirmation delivery.
#[async_trait]
pub trait ConfirmationEffects: Send + Sync {
    /// Subscribe to confirmation events for one account.
    ///
    /// Events carry no ordering guarantee across distinct operations.
    async fn subscribe(
        &self,
        filter: ConfirmationFilter,
    ) -> Result<(ConfirmationStream, Box<dyn ConfirmationSubscription>), SubscribeError>;
}

#[async_trait]
impl<T: ChainEffects + ?Sized> ChainEffects for Arc<T> {
    async fn submit(&self, request: OperationRequest) -> Result<CorrelationToken, SubmitError> {
        (**self).submit(request).await
    }

    async fn read_active_counters(
        &self,
        owner: &AccountAddress,
    ) -> Result<(Vec<CounterId>, Vec<CounterRecord>), ChainReadError> {
        (**self).read_active_counters(owner).await
    }
}

#[async_trait]
impl<T: ConfirmationEffects + ?Sized> ConfirmationEffects for Arc<T> {
    async fn subscribe(
        &self,
        filter: ConfirmationFilter,
    ) -> Result<(ConfirmationStream, Box<dyn ConfirmationSubscription>), SubscribeError> {
        (**self).subscribe(filter).await
    }
}
