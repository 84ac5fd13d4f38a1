//! API client
//!
//! [`Client::send`] and the typed helpers are the async surface. [`Client::submit`]
//! is the callback surface built on top of it: it spawns one task per request
//! and invokes the completion exactly once, unless the returned [`Submission`]
//! is cancelled first.

use crate::builder::RequestBuilder;
use crate::codec;
use crate::config::ClientConfig;
use crate::error::{ApiError, ConfigError, Result};
use crate::models::{decode_object, ApiObject, Capability, Charge, Customer, Source, Token};
use crate::requests::{
    ApiRequest, CapabilityRequest, ChargeRequest, CustomerRequest, Request, SourceRequest,
    TokenLookup, TokenRequest,
};
use crate::transport::{ReqwestTransport, Transport, TransportError, TransportResponse};
use crate::types::ChargeStatus;
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::AbortHandle;
use tracing::{debug, info_span, warn, Instrument};
use uuid::Uuid;

const OPEN: u8 = 0;
const DELIVERING: u8 = 1;
const DONE: u8 = 2;
const CANCELLED: u8 = 3;

/// Client for the Omise API
#[derive(Clone)]
pub struct Client {
    builder: Arc<RequestBuilder>,
    transport: Arc<dyn Transport>,
    runtime: Option<Handle>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", self.builder.config())
            .field("transport", &"<transport>")
            .finish()
    }
}

impl Client {
    /// Create a client over HTTPS
    pub fn new(config: ClientConfig) -> std::result::Result<Self, ConfigError> {
        let transport = ReqwestTransport::new(config.timeout).map_err(|e| ConfigError::other(e.to_string()))?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client from `OMISE_*` environment variables
    pub fn from_env() -> std::result::Result<Self, ConfigError> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Create a client over a custom transport
    pub fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
    ) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            builder: Arc::new(RequestBuilder::new(config)),
            transport,
            runtime: None,
        })
    }

    /// Spawn submissions on this runtime instead of the caller's
    pub fn with_runtime(mut self, handle: Handle) -> Self {
        self.runtime = Some(handle);
        self
    }

    pub fn config(&self) -> &ClientConfig {
        self.builder.config()
    }

    /// Execute a typed request
    pub async fn send<R: ApiRequest>(&self, request: R) -> Result<R::Output> {
        let response = self.execute(&request.into()).await?;
        codec::decode(&response.body).map_err(|failure| {
            warn!(kind = ?R::KIND, field = %failure.field, "Failed to decode response: {}", failure.reason);
            ApiError::from(failure)
        })
    }

    /// Execute any request, decoding through the kind's decoder
    pub async fn send_request(&self, request: Request) -> Result<ApiObject> {
        let kind = request.kind();
        let response = self.execute(&request).await?;
        decode_object(kind.output(), &response.body).map_err(|failure| {
            warn!(?kind, field = %failure.field, "Failed to decode response: {}", failure.reason);
            ApiError::from(failure)
        })
    }

    pub async fn create_token(&self, request: TokenRequest) -> Result<Token> {
        self.send(request).await
    }

    pub async fn retrieve_token(&self, id: impl Into<String>) -> Result<Token> {
        self.send(TokenLookup::new(id)).await
    }

    pub async fn create_source(&self, request: SourceRequest) -> Result<Source> {
        self.send(request).await
    }

    pub async fn create_charge(&self, request: ChargeRequest) -> Result<Charge> {
        self.send(request).await
    }

    pub async fn create_customer(&self, request: CustomerRequest) -> Result<Customer> {
        self.send(request).await
    }

    pub async fn capability(&self) -> Result<Capability> {
        self.send(CapabilityRequest).await
    }

    /// Poll a token until the charge made with it reaches a final status.
    ///
    /// Makes at most `max_attempts` lookups, `interval` apart, and returns the
    /// first final status or the last status seen. A failed lookup ends the
    /// polling with its error.
    pub async fn observe_charge_status(
        &self,
        token_id: impl Into<String>,
        interval: Duration,
        max_attempts: u32,
    ) -> Result<ChargeStatus> {
        if max_attempts == 0 {
            return Err(ApiError::invalid_request("max attempts must be at least one"));
        }
        let token_id = token_id.into();
        let mut attempt = 1;
        loop {
            let status = self.retrieve_token(token_id.clone()).await?.charge_status;
            if status.is_final() || attempt >= max_attempts {
                debug!(%token_id, %status, attempt, "Observed charge status");
                return Ok(status);
            }
            attempt += 1;
            tokio::time::sleep(interval).await;
        }
    }

    async fn execute(&self, request: &Request) -> Result<TransportResponse> {
        let transport_request = self.builder.build(request).map_err(|failure| {
            warn!(kind = ?request.kind(), "Rejected invalid request: {}", failure.reason);
            ApiError::from(failure)
        })?;
        let kind = transport_request.kind;
        debug!(?kind, method = %transport_request.method, path = transport_request.url.path(), "Sending request");

        let deadline = self.builder.config().timeout;
        let response = match tokio::time::timeout(deadline, self.transport.execute(transport_request)).await {
            Err(_) => Err(ApiError::Timeout),
            Ok(Err(error)) => Err(classify_transport_error(error)),
            Ok(Ok(response)) => Ok(response),
        }
        .inspect_err(|error| warn!(?kind, code = error.code(), "Request failed: {}", error))?;

        debug!(?kind, status = response.status, "Received response");
        if !response.is_success() {
            let error = ApiError::from_status(response.status, &response.body);
            warn!(?kind, status = response.status, code = error.code(), "Request rejected: {}", error);
            return Err(error);
        }
        Ok(response)
    }

    /// Execute a request in the background and report the result through `on_complete`.
    ///
    /// `on_complete` runs exactly once with either the decoded object or an
    /// [`ApiError`], on the runtime worker that finished the call, unless
    /// [`Submission::cancel`] succeeds first. Without a runtime it runs
    /// immediately on the calling thread with [`ApiError::Unknown`], and a task
    /// dropped by a shutting-down runtime also reports [`ApiError::Unknown`].
    pub fn submit<R, F>(&self, request: R, on_complete: F) -> Submission
    where
        R: ApiRequest,
        F: FnOnce(Result<R::Output>) + Send + 'static,
    {
        let id = Uuid::new_v4();
        let state = Arc::new(AtomicU8::new(OPEN));
        let mut completion = Completion::<R::Output>::new(Arc::clone(&state), on_complete);

        let Some(handle) = self.runtime.clone().or_else(|| Handle::try_current().ok()) else {
            warn!(%id, kind = ?R::KIND, "No async runtime available for submission");
            completion.deliver(Err(ApiError::unknown("no async runtime available")));
            return Submission { id, state, task: None };
        };

        let client = self.clone();
        let span = info_span!("submission", %id, kind = ?R::KIND);
        let task = handle.spawn(
            async move {
                let mut completion = completion;
                let result = client.send(request).await;
                if !completion.deliver(result) {
                    debug!("Submission cancelled before completion");
                }
            }
            .instrument(span),
        );

        Submission {
            id,
            state,
            task: Some(task.abort_handle()),
        }
    }
}

fn classify_transport_error(error: TransportError) -> ApiError {
    match error {
        TransportError::Timeout => ApiError::Timeout,
        TransportError::Connection(reason) => ApiError::connection_failure(reason),
        TransportError::Other(reason) => ApiError::unknown(reason),
    }
}

type Callback<T> = Box<dyn FnOnce(Result<T>) + Send>;

/// Owns the callback of one submission. If the task is dropped before it
/// delivers, the drop delivers `Unknown` instead.
struct Completion<T> {
    state: Arc<AtomicU8>,
    callback: Option<Callback<T>>,
}

impl<T> Completion<T> {
    fn new(state: Arc<AtomicU8>, callback: impl FnOnce(Result<T>) + Send + 'static) -> Self {
        Self {
            state,
            callback: Some(Box::new(callback)),
        }
    }

    /// Run the callback unless the submission was cancelled. Returns whether it ran.
    fn deliver(&mut self, result: Result<T>) -> bool {
        let Some(callback) = self.callback.take() else {
            return false;
        };
        if self
            .state
            .compare_exchange(OPEN, DELIVERING, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return false;
        }
        callback(result);
        self.state.store(DONE, Ordering::Release);
        true
    }
}

impl<T> Drop for Completion<T> {
    fn drop(&mut self) {
        if self.deliver(Err(ApiError::unknown("submission dropped before completion"))) {
            warn!("Submission dropped before completion");
        }
    }
}

/// Handle to a submitted request.
///
/// Dropping the handle does not cancel the request.
#[derive(Debug)]
pub struct Submission {
    id: Uuid,
    state: Arc<AtomicU8>,
    task: Option<AbortHandle>,
}

impl Submission {
    /// Identifier attached to this submission's log events
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Cancel the submission.
    ///
    /// Returns `true` if the completion is guaranteed never to run. Returns
    /// `false` if it already ran or is running. The service may still process
    /// a request that was already sent.
    pub fn cancel(&self) -> bool {
        let cancelled = self
            .state
            .compare_exchange(OPEN, CANCELLED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if cancelled {
            if let Some(task) = &self.task {
                task.abort();
            }
        }
        cancelled
    }

    /// Whether the completion has finished running
    pub fn is_completed(&self) -> bool {
        self.state.load(Ordering::Acquire) == DONE
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.load(Ordering::Acquire) == CANCELLED
    }
}
