use std::io;
use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};
use std::time::Duration;

/// Datagram endpoint towards the external PCU. Plain blocking socket with a
/// bounded read timeout so the inbound pump can observe shutdown.
pub struct PcuSocket {
    socket: UdpSocket,
    remote: SocketAddr,
}

impl PcuSocket {
    pub fn new<A: ToSocketAddrs, B: ToSocketAddrs>(
        local: A,
        remote: B,
        read_timeout: Duration,
    ) -> io::Result<PcuSocket> {
        let socket = UdpSocket::bind(local)?;
        socket.set_read_timeout(Some(read_timeout))?;
        let remote = remote
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "no remote address"))?;
        Ok(PcuSocket { socket, remote })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    pub fn remote_addr(&self) -> SocketAddr {
        self.remote
    }

    pub fn send(&self, buf: &[u8]) -> io::Result<()> {
        self.socket.send_to(buf, self.remote)?;
        Ok(())
    }

    /// Receive the next datagram into `buf`. `Ok(None)` on read timeout;
    /// the pump uses the timeout to poll for shutdown.
    pub fn recv(&self, buf: &mut [u8]) -> io::Result<Option<usize>> {
        match self.socket.recv_from(buf) {
            Ok((len, _from)) => Ok(Some(len)),
            Err(e) if e.kind() == io::ErrorKind::WouldBlock || e.kind() == io::ErrorKind::TimedOut => {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_recv_pair() {
        let a = PcuSocket::new("127.0.0.1:0", "127.0.0.1:9", Duration::from_millis(200)).unwrap();
        let b = PcuSocket::new(
            "127.0.0.1:0",
            a.local_addr().unwrap(),
            Duration::from_millis(200),
        )
        .unwrap();

        b.send(&[1, 2, 3]).unwrap();

        let mut buf = [0u8; 64];
        let len = a.recv(&mut buf).unwrap().unwrap();
        assert_eq!(&buf[..len], &[1, 2, 3]);
    }

    #[test]
    fn test_recv_timeout_yields_none() {
        let a = PcuSocket::new("127.0.0.1:0", "127.0.0.1:9", Duration::from_millis(50)).unwrap();
        let mut buf = [0u8; 64];
        assert_eq!(a.recv(&mut buf).unwrap(), None);
    }
}
