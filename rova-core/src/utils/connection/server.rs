//! HTTP Server Module
//!
//! A single TCP socket accepts one connection at a time, takes one bounded
//! read of the request, dispatches it through the [`Controller`] and answers
//! before the next connection is accepted. No request can overlap another,
//! which is what lets the controller state go unlocked.
//!
//! The request is whatever the first read returns. A request split across
//! several TCP segments is handled on its first fragment only.

use embassy_net::{tcp::TcpSocket, Stack};
use embedded_io_async::{Read, Write};

use super::http::Response;
use crate::utils::{
    config::{ServerConfig, RECV_LIMIT},
    controllers::{Controller, Wheel},
};

const SOCKET_RX: usize = 1024;
const SOCKET_TX: usize = 2048;

/// Transport failure while serving one connection.
#[derive(Debug)]
pub enum ServeError<E> {
    Read(E),
    Write(E),
}

impl<E: core::fmt::Debug> core::fmt::Display for ServeError<E> {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        match self {
            ServeError::Read(e) => write!(f, "reading request failed: {:?}", e),
            ServeError::Write(e) => write!(f, "writing response failed: {:?}", e),
        }
    }
}

/// Serve one request on an accepted transport.
///
/// Reads once into `buf`, applies the request and writes the response.
/// Returns `Ok(None)` when the peer closed without sending anything. The
/// caller owns the transport and closes it afterwards on every outcome.
pub async fn serve_connection<T, M, const L: usize, const R: usize>(
    transport: &mut T,
    controller: &mut Controller<M, L, R>,
    buf: &mut [u8],
) -> Result<Option<Response>, ServeError<T::Error>>
where
    T: Read + Write,
    M: Wheel,
{
    let len = transport.read(buf).await.map_err(ServeError::Read)?;
    if len == 0 {
        tracing::debug!("peer closed before sending a request");
        return Ok(None);
    }

    let response = controller.handle(&buf[..len]);
    response.send(transport).await.map_err(ServeError::Write)?;
    transport.flush().await.map_err(ServeError::Write)?;
    Ok(Some(response))
}

/// Run the accept loop forever.
///
/// `config` falls back to [`ServerConfig::default`]: port 80, no read timeout.
pub async fn run<M, const L: usize, const R: usize>(
    stack: Stack<'static>,
    controller: &mut Controller<M, L, R>,
    config: Option<&ServerConfig>,
) -> !
where
    M: Wheel,
{
    let default_config = ServerConfig::default();
    let config = config.unwrap_or(&default_config);
    let port = config.port;

    if let Some(ip_cfg) = stack.config_v4() {
        tracing::info!("HTTP server on http://{}:{}", ip_cfg.address.address(), port);
    } else {
        tracing::warn!("Starting HTTP server on port {port}, but no IPv4 address is assigned yet!");
    }

    let (mut rx_buffer, mut tx_buffer, mut request) = ([0u8; SOCKET_RX], [0u8; SOCKET_TX], [0u8; RECV_LIMIT]);
    let request = &mut request[..config.effective_recv_limit()];
    let mut socket = TcpSocket::new(stack, &mut rx_buffer, &mut tx_buffer);

    loop {
        socket.set_timeout(config.read_timeout);

        if let Err(error) = socket.accept(port).await {
            tracing::warn!(?error, "accept failed");
            release(&mut socket).await;
            continue;
        }
        tracing::info!(peer = ?socket.remote_endpoint(), "connection accepted");

        match serve_connection(&mut socket, controller, request).await {
            Ok(Some(response)) => tracing::debug!(?response, "response sent"),
            Ok(None) => {}
            Err(error) => tracing::error!(%error, "request aborted"),
        }

        release(&mut socket).await;
    }
}

/// Close the connection so the socket can accept again.
async fn release(socket: &mut TcpSocket<'_>) {
    socket.close();
    if let Err(error) = socket.flush().await {
        tracing::warn!(?error, "flush on close failed");
    }
    socket.abort();
    let _ = socket.flush().await;
}
