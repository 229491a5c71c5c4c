//! Listener port selection

use std::io;
use std::net::TcpListener;

/// First port probed when none is configured
pub const PORT_RANGE_START: u16 = 8080;
/// Last port probed when none is configured
pub const PORT_RANGE_END: u16 = 8089;

/// Resolve the listen port
///
/// A configured port is used as-is. Otherwise the fixed range is probed
/// and the first bindable port wins.
pub fn select_port(host: &str, configured: Option<u16>) -> io::Result<u16> {
    if let Some(port) = configured {
        return Ok(port);
    }

    for port in PORT_RANGE_START..=PORT_RANGE_END {
        if TcpListener::bind((host, port)).is_ok() {
            return Ok(port);
        }
    }

    Err(io::Error::new(
        io::ErrorKind::AddrInUse,
        format!(
            "no free port in {}-{} on {}",
            PORT_RANGE_START, PORT_RANGE_END, host
        ),
    ))
}
