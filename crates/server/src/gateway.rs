//! Event dispatch between socket connections and the auth service.

use std::sync::Arc;

use service::auth::errors::AuthError;
use service::auth::repository::AccountStore;
use service::auth::AuthService;
use tracing::{debug, error, instrument};
use uuid::Uuid;

use crate::observability;
use crate::protocol::{InboundEvent, ProtocolError, ResponseEvent};

/// Connection identity, assigned when the socket is upgraded.
pub type ConnId = Uuid;

/// Label used in metrics for frames that never resolved to an event.
const UNDECODED: &str = "undecoded";

/// Turns one inbound event into exactly one response event.
pub struct Gateway<R: AccountStore> {
    auth: Arc<AuthService<R>>,
}

impl<R: AccountStore> Gateway<R> {
    pub fn new(auth: Arc<AuthService<R>>) -> Self {
        Self { auth }
    }

    pub fn auth(&self) -> &Arc<AuthService<R>> {
        &self.auth
    }

    #[instrument(skip(self, event), fields(event = event.name()))]
    pub async fn dispatch(&self, conn: ConnId, event: InboundEvent) -> ResponseEvent {
        let name = event.name();
        let response = match event {
            InboundEvent::Register(input) => match self.auth.register(input).await {
                Ok(()) => ResponseEvent::RegistrationSuccess,
                Err(e) => reject(e),
            },
            InboundEvent::Login(input) => match self.auth.login(input).await {
                Ok(profile) => ResponseEvent::LoginSuccess(profile),
                Err(e) => reject(e),
            },
        };
        observability::record_request(name, response.is_success());
        debug!(response = response.name(), "responding");
        response
    }

    /// Decode a text frame and dispatch it. Frames that fail to decode still
    /// get their one `error` reply.
    pub async fn handle_text(&self, conn: ConnId, text: &str) -> ResponseEvent {
        match InboundEvent::decode(text) {
            Ok(event) => self.dispatch(conn, event).await,
            Err(e) => self.reject_frame(conn, e),
        }
    }

    pub fn reject_frame(&self, conn: ConnId, e: ProtocolError) -> ResponseEvent {
        debug!(%conn, error = %e, "frame rejected");
        observability::record_request(UNDECODED, false);
        ResponseEvent::Error(e.client_message())
    }
}

fn reject(e: AuthError) -> ResponseEvent {
    if e.is_client_error() {
        debug!(code = e.code(), error = %e, "request rejected");
    } else {
        error!(code = e.code(), error = %e, "auth request failed internally");
    }
    ResponseEvent::Error(e.client_message())
}
