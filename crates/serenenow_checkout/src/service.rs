//! [`CheckoutProvider`] implementation backed by the hosted checkout client.

use tracing::info;

use serenenow_common::{BoxFuture, CheckoutOutcome, CheckoutProvider, CoreError};

use crate::client::{outcome_from_session, HostedCheckoutClient};
use crate::error::CheckoutError;

impl CheckoutProvider for HostedCheckoutClient {
    fn complete_checkout(
        &self,
        payment_session_id: &str,
        order_id: &str,
    ) -> BoxFuture<'_, CheckoutOutcome, CoreError> {
        let session_id = payment_session_id.to_string();
        let order_id = order_id.to_string();
        Box::pin(async move {
            let session = self
                .fetch_session(&session_id)
                .await
                .map_err(CoreError::from)?;

            // The session must belong to the order being settled;
            // a mismatch means a stale or spoofed return URL.
            if let Some(reference) = session.order_reference.as_deref() {
                if reference != order_id {
                    return Err(CheckoutError::OrderMismatch {
                        session_id,
                        order_id,
                    }
                    .into());
                }
            }

            let outcome = outcome_from_session(&session);
            info!(
                "Checkout session {} resolved with outcome {:?}",
                session.id, outcome
            );
            Ok(outcome)
        })
    }
}
