use std::io;
use std::net::TcpListener;

/// Point-in-time check that a host port can be bound.
///
/// A successful probe is not a reservation: the port is released before
/// `probe` returns and another process may claim it afterwards.
pub trait PortProbe {
    fn probe(&self, port: u16) -> io::Result<()>;
}

/// Probes by binding a TCP listener on the host and dropping it.
///
/// Checks both 127.0.0.1 and 0.0.0.0. On macOS, binding to 127.0.0.1 can
/// succeed even when 0.0.0.0 is in use, and docker publishes on 0.0.0.0,
/// so a port only counts as free when both binds succeed. The binds are
/// sequential because on Linux holding 127.0.0.1:PORT makes 0.0.0.0:PORT
/// fail with EADDRINUSE.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoopbackProbe;

impl PortProbe for LoopbackProbe {
    fn probe(&self, port: u16) -> io::Result<()> {
        drop(TcpListener::bind(("127.0.0.1", port))?);
        drop(TcpListener::bind(("0.0.0.0", port))?);
        Ok(())
    }
}
