//! WebSocket client implementation.
//!
//! Provides [`DerivWs`], which multiplexes tagged requests and their responses
//! over one socket.

use std::fmt;
use std::sync::Arc;

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use serde::Serialize;
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::sync::{oneshot, Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};

use super::config::{WsConfig, REQ_ID_FIELD};
use super::error::WsError;
use super::messages::{json_kind, Response};
use super::metrics::MuxMetrics;
use super::pending::ResponseHandler;
use super::router::{GlobalHandler, Router};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<WsStream, Message>;
type WsSource = SplitStream<WsStream>;

/// Multiplexed connection to the Deriv WebSocket API.
///
/// Every request gets a fresh `req_id`; the reply carrying the same id is
/// handed to the callback registered with that request. Messages are also
/// passed to the global handler, if one is set.
pub struct DerivWs {
    config: WsConfig,
    sink: Arc<Mutex<Option<WsSink>>>,
    router: Arc<Router>,
    connected: Arc<RwLock<bool>>,
    reader: Mutex<Option<JoinHandle<()>>>,
}

impl fmt::Debug for DerivWs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivWs")
            .field("config", &self.config)
            .field("router", &self.router)
            .finish_non_exhaustive()
    }
}

impl DerivWs {
    /// Opens a connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the connection
    /// fails. No retry is attempted.
    pub async fn connect(config: WsConfig) -> Result<Self, WsError> {
        config.validate()?;

        let url = config.connection_url();
        let (ws_stream, _) = tokio_tungstenite::connect_async(url.as_str())
            .await
            .map_err(|e| WsError::Connection(e.to_string()))?;

        info!("Connected to {}", config.url);

        let (sink, source) = ws_stream.split();

        let client = Self {
            config,
            sink: Arc::new(Mutex::new(Some(sink))),
            router: Arc::new(Router::new(Arc::new(MuxMetrics::new()))),
            connected: Arc::new(RwLock::new(true)),
            reader: Mutex::new(None),
        };

        let reader = client.spawn_reader(source);
        *client.reader.lock().await = Some(reader);

        Ok(client)
    }

    /// Connects with the default endpoint for `app_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection fails.
    pub async fn with_app_id(app_id: impl Into<String>) -> Result<Self, WsError> {
        Self::connect(WsConfig::new(app_id)).await
    }

    /// Returns the client configuration.
    #[must_use]
    pub fn config(&self) -> &WsConfig {
        &self.config
    }

    /// Returns the traffic metrics.
    #[must_use]
    pub fn metrics(&self) -> Arc<MuxMetrics> {
        self.router.metrics()
    }

    /// Returns true if connected.
    pub async fn is_connected(&self) -> bool {
        *self.connected.read().await
    }

    /// Returns the number of requests still waiting for a response.
    pub async fn pending_count(&self) -> usize {
        self.router.pending().len().await
    }

    /// Spawns the message reader task.
    fn spawn_reader(&self, mut source: WsSource) -> JoinHandle<()> {
        let router = Arc::clone(&self.router);
        let connected = Arc::clone(&self.connected);

        tokio::spawn(async move {
            while let Some(result) = source.next().await {
                match result {
                    Ok(Message::Text(text)) => router.dispatch_text(&text).await,
                    Ok(Message::Close(frame)) => {
                        info!("Server closed connection: {:?}", frame);
                        break;
                    }
                    Err(e) => {
                        warn!("WebSocket error: {}", e);
                        break;
                    }
                    _ => {}
                }
            }

            *connected.write().await = false;
            let abandoned = router.abandon_pending().await;
            if abandoned > 0 {
                debug!("Abandoned {} pending requests", abandoned);
            }
        })
    }

    /// Sends a request.
    ///
    /// The request must serialize to a JSON object. A fresh `req_id` is
    /// written into it, overwriting any caller-supplied value. When
    /// `on_response` is given it is registered under that id and invoked once
    /// with the matching response; otherwise the request is fire-and-forget.
    ///
    /// Returns the assigned request id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be serialized, is not an
    /// object, the client is not connected, or the frame cannot be written.
    /// On error no handler remains registered.
    pub async fn send<T>(
        &self,
        request: &T,
        on_response: Option<ResponseHandler>,
    ) -> Result<u64, WsError>
    where
        T: Serialize + ?Sized,
    {
        let mut value =
            serde_json::to_value(request).map_err(|e| WsError::Serialization(e.to_string()))?;
        if !value.is_object() {
            return Err(WsError::InvalidRequest(format!(
                "expected JSON object, got {}",
                json_kind(&value)
            )));
        }

        let mut sink_guard = self.sink.lock().await;
        let sink = sink_guard.as_mut().ok_or(WsError::NotConnected)?;

        let pending = self.router.pending();
        let id = pending.next_id();
        if let Some(object) = value.as_object_mut() {
            object.insert(REQ_ID_FIELD.to_string(), Value::from(id));
        }
        let json = value.to_string();

        // Registered before the write so a fast reply cannot miss its handler.
        let registered = on_response.is_some();
        if let Some(handler) = on_response {
            pending.insert(id, handler).await;
        }

        if let Err(e) = sink.send(Message::Text(json.into())).await {
            if registered {
                pending.take(id).await;
            }
            return Err(WsError::SendFailed(e.to_string()));
        }

        self.router.metrics().record_frame_sent();
        debug!(req_id = id, registered, "Request sent");

        Ok(id)
    }

    /// Sends a request with a callback.
    ///
    /// # Errors
    ///
    /// See [`DerivWs::send`].
    pub async fn send_with<T, F>(&self, request: &T, on_response: F) -> Result<u64, WsError>
    where
        T: Serialize + ?Sized,
        F: FnOnce(Response) + Send + 'static,
    {
        let handler: ResponseHandler = Box::new(on_response);
        self.send(request, Some(handler)).await
    }

    /// Sends a request and waits for its response.
    ///
    /// Application errors are returned as part of the `Response`; inspect
    /// [`Response::error`].
    ///
    /// # Errors
    ///
    /// Returns [`WsError::Closed`] if the connection goes away before the
    /// response arrives, or any error of [`DerivWs::send`].
    pub async fn request<T>(&self, request: &T) -> Result<Response, WsError>
    where
        T: Serialize + ?Sized,
    {
        let (tx, rx) = oneshot::channel();
        self.send_with(request, move |response| {
            let _ = tx.send(response);
        })
        .await?;

        rx.await.map_err(|_| WsError::Closed)
    }

    /// Registers the observer for every incoming message, replacing any
    /// previous one.
    pub async fn set_global_handler<F>(&self, on_message: F)
    where
        F: Fn(&Response) + Send + Sync + 'static,
    {
        let handler: GlobalHandler = Arc::new(on_message);
        self.router.set_global_handler(handler).await;
    }

    /// Removes the global observer.
    pub async fn clear_global_handler(&self) {
        self.router.clear_global_handler().await;
    }

    /// Closes the connection.
    ///
    /// Pending handlers are dropped without being invoked.
    ///
    /// # Errors
    ///
    /// Returns an error if the close fails.
    pub async fn close(&self) -> Result<(), WsError> {
        *self.connected.write().await = false;

        if let Some(mut sink) = self.sink.lock().await.take() {
            let _ = sink.send(Message::Close(None)).await;
        }

        if let Some(reader) = self.reader.lock().await.take() {
            reader.abort();
        }

        let abandoned = self.router.abandon_pending().await;
        info!("Connection closed, {} pending requests abandoned", abandoned);

        Ok(())
    }
}

impl Drop for DerivWs {
    fn drop(&mut self) {
        if let Some(reader) = self.reader.get_mut().take() {
            reader.abort();
        }
    }
}
