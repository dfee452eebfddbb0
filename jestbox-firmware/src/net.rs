//! CYW43 association and plain HTTP over embassy-net
//!
//! [`Cyw43Link`] drives the radio through the cyw43 control handle and
//! reports the DHCP result from the embassy-net stack.
//! [`TcpTransport`] resolves the host, opens a TCP socket, sends one
//! `Connection: close` request and reads until the peer hangs up.

use alloc::string::String;
use alloc::vec::Vec;

use cyw43::{Control, JoinOptions, PowerManagementMode};
use defmt::*;
use embassy_net::dns::DnsQueryType;
use embassy_net::tcp::{ConnectError, TcpSocket};
use embassy_net::{IpAddress, Stack};
use embassy_time::{with_timeout, Duration};
use embedded_io_async::Write;

use jestbox_hal::{
    HttpResponse, HttpTransport, LinkConfig, LinkError, NetworkLink, TransportError,
};
use jestbox_protocol::{encode_request, HttpError, ResponseHead, Url, UrlError};

/// Per-socket buffer size
const SOCKET_BUF: usize = 1024;

/// Largest response accepted, headers included
const MAX_RESPONSE: usize = 16 * 1024;

/// Idle timeout on the socket
const SOCKET_TIMEOUT: Duration = Duration::from_secs(10);

/// Deadline for a whole request
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Wi-Fi station on the Pico W radio
pub struct Cyw43Link {
    control: Control<'static>,
    stack: Stack<'static>,
    clm: &'static [u8],
}

impl Cyw43Link {
    pub fn new(control: Control<'static>, stack: Stack<'static>, clm: &'static [u8]) -> Self {
        Self {
            control,
            stack,
            clm,
        }
    }
}

impl NetworkLink for Cyw43Link {
    async fn activate(&mut self) -> Result<(), LinkError> {
        self.control.init(self.clm).await;
        self.control
            .set_power_management(PowerManagementMode::PowerSave)
            .await;
        Ok(())
    }

    async fn connect(&mut self, ssid: &str, password: &str) -> Result<(), LinkError> {
        self.control
            .join(ssid, JoinOptions::new(password.as_bytes()))
            .await
            .map_err(|e| {
                warn!("Join failed: status {}", e.status);
                LinkError::Join(e.status)
            })
    }

    fn is_connected(&self) -> bool {
        self.stack.is_link_up() && self.stack.is_config_up()
    }

    fn config(&self) -> Option<LinkConfig> {
        let v4 = self.stack.config_v4()?;
        Some(LinkConfig {
            address: v4.address.address().octets(),
            prefix_len: v4.address.prefix_len(),
            gateway: v4.gateway.map(|gw| gw.octets()),
            dns: v4.dns_servers.first().map(|dns| dns.octets()),
        })
    }
}

/// HTTP/1.1 client on the embassy-net stack
pub struct TcpTransport {
    stack: Stack<'static>,
}

impl TcpTransport {
    pub fn new(stack: Stack<'static>) -> Self {
        Self { stack }
    }

    async fn resolve(&self, host: &str) -> Result<IpAddress, TransportError> {
        let addresses = self
            .stack
            .dns_query(host, DnsQueryType::A)
            .await
            .map_err(|e| {
                warn!("DNS lookup for {} failed: {:?}", host, e);
                TransportError::Dns
            })?;
        addresses.first().copied().ok_or(TransportError::Dns)
    }

    async fn request(
        &self,
        url: &Url<'_>,
        headers: &[(&str, &str)],
    ) -> Result<HttpResponse, TransportError> {
        let address = self.resolve(url.host).await?;
        debug!("GET {}:{}{}", url.host, url.port, url.path);

        let mut rx_buf = [0u8; SOCKET_BUF];
        let mut tx_buf = [0u8; SOCKET_BUF];
        let mut socket = TcpSocket::new(self.stack, &mut rx_buf, &mut tx_buf);
        socket.set_timeout(Some(SOCKET_TIMEOUT));

        let result = exchange(&mut socket, address, url, headers).await;
        socket.abort();
        result
    }
}

impl HttpTransport for TcpTransport {
    async fn get(
        &mut self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> Result<HttpResponse, TransportError> {
        let url = Url::parse(url).map_err(|e| match e {
            UrlError::UnsupportedScheme => TransportError::UnsupportedScheme,
            _ => TransportError::InvalidUrl,
        })?;

        if !self.stack.is_config_up() {
            return Err(TransportError::NotConnected);
        }

        with_timeout(REQUEST_TIMEOUT, self.request(&url, headers))
            .await
            .map_err(|_| TransportError::Timeout)?
    }
}

async fn exchange(
    socket: &mut TcpSocket<'_>,
    address: IpAddress,
    url: &Url<'_>,
    headers: &[(&str, &str)],
) -> Result<HttpResponse, TransportError> {
    socket
        .connect((address, url.port))
        .await
        .map_err(|e| match e {
            ConnectError::TimedOut => TransportError::Timeout,
            _ => TransportError::Connect,
        })?;

    let request = encode_request(url, headers);
    socket
        .write_all(request.as_bytes())
        .await
        .map_err(|_| TransportError::Write)?;
    socket.flush().await.map_err(|_| TransportError::Write)?;

    let raw = read_to_end(socket).await?;

    let (head, header_len) = ResponseHead::parse(&raw)
        .map_err(malformed)?
        .ok_or(TransportError::MalformedResponse)?;
    let body = head.body(&raw[header_len..]).map_err(malformed)?;

    debug!("HTTP {} ({} bytes)", head.status, body.len());

    Ok(HttpResponse {
        status: head.status,
        text: String::from_utf8_lossy(&body).into_owned(),
    })
}

fn malformed(e: HttpError) -> TransportError {
    warn!("Bad HTTP response: {}", Display2Format(&e));
    TransportError::MalformedResponse
}

async fn read_to_end(socket: &mut TcpSocket<'_>) -> Result<Vec<u8>, TransportError> {
    let mut raw = Vec::new();
    let mut chunk = [0u8; 512];

    loop {
        let n = socket
            .read(&mut chunk)
            .await
            .map_err(|_| TransportError::Read)?;
        if n == 0 {
            return Ok(raw);
        }
        if raw.len() + n > MAX_RESPONSE {
            return Err(TransportError::ResponseTooLarge);
        }
        raw.extend_from_slice(&chunk[..n]);
    }
}
