use std::net::{Ipv4Addr, UdpSocket};

/// Address used to discover the outbound interface. No datagram is sent.
const PROBE_TARGET: (Ipv4Addr, u16) = (Ipv4Addr::new(9, 9, 9, 9), 80);

pub const FALLBACK_INTERNAL_IP: &str = "127.0.0.1";

/// Host facts the materialized environment depends on.
pub trait HostProbe {
    /// CPU architecture in container-platform naming (`amd64`, `arm64`, ...).
    fn architecture(&self) -> String;

    /// Address of the interface used for outbound traffic. Never fails; falls
    /// back to loopback.
    fn internal_ip(&self) -> String;
}

/// Probes the running machine.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProbe;

impl HostProbe for SystemProbe {
    fn architecture(&self) -> String {
        platform_arch(std::env::consts::ARCH).to_string()
    }

    fn internal_ip(&self) -> String {
        match outbound_ip() {
            Ok(ip) => ip,
            Err(e) => {
                tracing::warn!(error = %e, "could not determine internal ip, using {FALLBACK_INTERNAL_IP}");
                FALLBACK_INTERNAL_IP.to_string()
            }
        }
    }
}

fn outbound_ip() -> std::io::Result<String> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))?;
    socket.connect(PROBE_TARGET)?;
    Ok(socket.local_addr()?.ip().to_string())
}

/// Map a Rust target arch to the name container registries use.
pub fn platform_arch(arch: &str) -> &str {
    match arch {
        "x86_64" => "amd64",
        "aarch64" => "arm64",
        "x86" => "386",
        "powerpc64" if cfg!(target_endian = "little") => "ppc64le",
        "powerpc64" => "ppc64",
        "loongarch64" => "loong64",
        other => other,
    }
}

/// Returns fixed values. Useful for offline runs and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticProbe {
    pub architecture: String,
    pub internal_ip: String,
}

impl StaticProbe {
    pub fn new(architecture: impl Into<String>, internal_ip: impl Into<String>) -> Self {
        Self {
            architecture: architecture.into(),
            internal_ip: internal_ip.into(),
        }
    }
}

impl HostProbe for StaticProbe {
    fn architecture(&self) -> String {
        self.architecture.clone()
    }

    fn internal_ip(&self) -> String {
        self.internal_ip.clone()
    }
}
