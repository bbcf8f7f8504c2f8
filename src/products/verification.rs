//! Identity verification.
//!
//! [`Verification::verify`] runs a verification synchronously, or
//! asynchronously when the request carries a callback URL. Asynchronous
//! transactions are followed up with [`Verification::transaction_status`]
//! and [`Verification::partial_result`], and stored transactions are read
//! back with [`Verification::transaction_record`].

use std::io::Cursor;

use tokio_util::sync::CancellationToken;

use crate::clients::{Context, DownloadedDocument, HttpError, Namespace, ResourceAddress};
use crate::models::{TransactionRecordResult, TransactionStatus, VerifyRequest, VerifyResult, VerifyResultPartial};

const NAMESPACE: Namespace = Namespace::from_static("verifications");

/// Identity verification and transaction retrieval.
#[derive(Clone, Copy, Debug)]
pub struct Verification<'a> {
    context: &'a Context,
}

impl<'a> Verification<'a> {
    pub(crate) const fn new(context: &'a Context) -> Self {
        Self { context }
    }

    /// Verifies the identity described by `request`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::BadRequest`] for malformed input, or any other
    /// [`HttpError`] if the request fails.
    pub async fn verify(
        &self,
        request: &VerifyRequest,
        cancel: Option<&CancellationToken>,
    ) -> Result<VerifyResult, HttpError> {
        self.context
            .post(&NAMESPACE, &ResourceAddress::new(["verify"]), Some(request), cancel)
            .await
    }

    /// Fetches a stored transaction record.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::ResourceNotFound`] for an unknown id.
    pub async fn transaction_record(
        &self,
        transaction_record_id: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<TransactionRecordResult, HttpError> {
        let resource = ResourceAddress::new(["transactionrecord", transaction_record_id]);
        self.context.get(&NAMESPACE, &resource, None, cancel).await
    }

    /// Fetches the status of an asynchronous transaction.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn transaction_status(
        &self,
        transaction_id: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<TransactionStatus, HttpError> {
        let resource = ResourceAddress::new(["transaction", transaction_id, "status"]);
        self.context.get(&NAMESPACE, &resource, None, cancel).await
    }

    /// Fetches what an asynchronous transaction has produced so far.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn partial_result(
        &self,
        transaction_id: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<VerifyResultPartial, HttpError> {
        let resource = ResourceAddress::new(["transaction", transaction_id, "partialresult"]);
        self.context.get(&NAMESPACE, &resource, None, cancel).await
    }

    /// Downloads a document attached to a transaction record.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn document_download(
        &self,
        transaction_record_id: &str,
        field_name: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<DownloadedDocument, HttpError> {
        let resource = ResourceAddress::new(["documentdownload", transaction_record_id, field_name]);
        self.context
            .get_with(&NAMESPACE, &resource, None, DownloadedDocument::from_response, cancel)
            .await
    }

    /// Reads the raw bytes of a document field from a transaction record.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn transaction_record_document(
        &self,
        transaction_record_id: &str,
        field_name: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<Cursor<Vec<u8>>, HttpError> {
        let resource = ResourceAddress::new(["transactionrecord", transaction_record_id, field_name]);
        self.context.get_stream(&NAMESPACE, &resource, None, cancel).await
    }
}
