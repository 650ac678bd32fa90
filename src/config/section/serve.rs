//! `[serve]`: the local preview started by `folio serve`.
//!
//! ```toml
//! [serve]
//! interface = "127.0.0.1"
//! port = 5277
//! watch = true        # rebuild when sections, theme.yaml or folio.toml change
//! ```

use std::net::{IpAddr, Ipv4Addr};

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServeConfig {
    pub interface: IpAddr,
    /// First port tried; later attempts count upward from here.
    pub port: u16,
    pub watch: bool,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            interface: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 5277,
            watch: true,
        }
    }
}

impl ServeConfig {
    pub const FIELD_INTERFACE: FieldPath = FieldPath::new("serve.interface");
    pub const FIELD_PORT: FieldPath = FieldPath::new("serve.port");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.port == 0 {
            diag.error_with_hint(
                Self::FIELD_PORT,
                "port 0 leaves the preview address unknown",
                "pick a fixed port such as 5277",
            );
        }
        if !self.interface.is_loopback() {
            diag.warn(
                Self::FIELD_INTERFACE,
                format!(
                    "{} exposes unpublished sections to the network",
                    self.interface
                ),
            );
        }
    }
}
