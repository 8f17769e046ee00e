//! Listener Config

use clap::Args;

/// Where the HTTP server listens.
#[derive(Debug, Args)]
pub struct ListenConfig {
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(short, long, env = "SERVER_PORT", default_value_t = 8698)]
    pub port: u16,
}

impl ListenConfig {
    /// `host:port`, bracketing IPv6 hosts.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ipv4_host_is_joined_with_port() {
        let config = ListenConfig {
            host: "127.0.0.1".to_owned(),
            port: 8080,
        };

        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn ipv6_host_is_bracketed() {
        let config = ListenConfig {
            host: "::1".to_owned(),
            port: 8698,
        };

        assert_eq!(config.bind_addr(), "[::1]:8698");
    }
}
