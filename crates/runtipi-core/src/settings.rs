//! User-editable `state/settings.json`.
//!
//! The document is hand-edited, so port fields accept either a JSON string or
//! a JSON integer. Anything else in a port field is treated as unset rather
//! than rejected.

use crate::error::{Result, RuntipiError};
use crate::io;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// PortValue
// ---------------------------------------------------------------------------

/// A port as written in settings.json. Variants are tried in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PortValue {
    Text(String),
    Number(i64),
    Other(serde_json::Value),
}

impl From<&str> for PortValue {
    fn from(s: &str) -> Self {
        PortValue::Text(s.to_owned())
    }
}

impl From<i64> for PortValue {
    fn from(n: i64) -> Self {
        PortValue::Number(n)
    }
}

impl PortValue {
    /// Canonical string form, or `None` if the value is not usable as a port.
    pub fn as_port_string(&self) -> Option<String> {
        match self {
            PortValue::Text(s) => Some(s.clone()),
            PortValue::Number(n) => Some(n.to_string()),
            PortValue::Other(v) => {
                tracing::warn!(value = %v, "ignoring unsupported port value in settings");
                None
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_data_path: Option<String>,
    /// Deprecated in favour of `appDataPath`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nginx_port: Option<PortValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nginx_ssl_port: Option<PortValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postgres_port: Option<PortValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_domain: Option<String>,

    // Names used by older releases. Only consulted when the current field is empty.
    #[serde(default, rename = "listenIp", skip_serializing_if = "Option::is_none")]
    pub legacy_internal_ip: Option<String>,
    #[serde(default, rename = "port", skip_serializing_if = "Option::is_none")]
    pub legacy_nginx_port: Option<PortValue>,
    #[serde(default, rename = "sslPort", skip_serializing_if = "Option::is_none")]
    pub legacy_nginx_ssl_port: Option<PortValue>,
}

impl Settings {
    /// Load settings from `path`. A missing or blank file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let Some(content) = io::read_optional(path)? else {
            return Ok(Self::default());
        };
        Self::parse(&content).map_err(|source| RuntipiError::Settings {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(content: &str) -> std::result::Result<Self, serde_json::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(content)
    }

    /// Configured app data location: `appDataPath`, then `storagePath`.
    pub fn data_path(&self) -> Option<&str> {
        non_empty(self.app_data_path.as_deref()).or(non_empty(self.storage_path.as_deref()))
    }

    /// Configured internal ip, falling back to the legacy `listenIp`.
    pub fn internal_ip(&self) -> String {
        non_empty(self.internal_ip.as_deref())
            .or(non_empty(self.legacy_internal_ip.as_deref()))
            .unwrap_or_default()
            .to_string()
    }

    pub fn nginx_port(&self) -> String {
        port_or_legacy(self.nginx_port.as_ref(), self.legacy_nginx_port.as_ref())
    }

    pub fn nginx_ssl_port(&self) -> String {
        port_or_legacy(
            self.nginx_ssl_port.as_ref(),
            self.legacy_nginx_ssl_port.as_ref(),
        )
    }

    pub fn postgres_port(&self) -> String {
        port_string(self.postgres_port.as_ref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn port_string(value: Option<&PortValue>) -> String {
    value.and_then(PortValue::as_port_string).unwrap_or_default()
}

fn port_or_legacy(current: Option<&PortValue>, legacy: Option<&PortValue>) -> String {
    let port = port_string(current);
    if port.is_empty() {
        port_string(legacy)
    } else {
        port
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn numeric_and_string_ports_normalize_identically() {
        let numeric = Settings::parse(r#"{"nginxPort": 8080}"#).unwrap();
        let text = Settings::parse(r#"{"nginxPort": "8080"}"#).unwrap();
        assert_eq!(numeric.nginx_port(), "8080");
        assert_eq!(text.nginx_port(), "8080");
    }

    #[test]
    fn unusable_ports_are_empty() {
        let s = Settings::parse(
            r#"{"nginxPort": 80.5, "nginxSslPort": true, "postgresPort": null}"#,
        )
        .unwrap();
        assert_eq!(s.nginx_port(), "");
        assert_eq!(s.nginx_ssl_port(), "");
        assert_eq!(s.postgres_port(), "");
    }

    #[test]
    fn unset_ports_are_empty() {
        let s = Settings::parse("{}").unwrap();
        assert_eq!(s.nginx_port(), "");
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn legacy_field_names_are_accepted() {
        let s = Settings::parse(r#"{"listenIp": "10.0.0.4", "port": 81, "sslPort": "444"}"#)
            .unwrap();
        assert_eq!(s.internal_ip(), "10.0.0.4");
        assert_eq!(s.nginx_port(), "81");
        assert_eq!(s.nginx_ssl_port(), "444");
    }

    #[test]
    fn current_names_win_over_legacy_names() {
        let s = Settings::parse(
            r#"{"nginxPort": 8080, "port": 80, "sslPort": 444, "nginxSslPort": "",
                "internalIp": "10.0.0.9", "listenIp": "10.0.0.4"}"#,
        )
        .unwrap();
        assert_eq!(s.nginx_port(), "8080");
        assert_eq!(s.nginx_ssl_port(), "444");
        assert_eq!(s.internal_ip(), "10.0.0.9");
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let s = Settings::parse(r#"{"domain": "a.test", "forwardAuthUrl": "http://x"}"#).unwrap();
        assert_eq!(s.domain.as_deref(), Some("a.test"));
    }

    #[test]
    fn data_path_prefers_app_data_path() {
        let s = Settings::parse(r#"{"appDataPath": "/data", "storagePath": "/old"}"#).unwrap();
        assert_eq!(s.data_path(), Some("/data"));

        let s = Settings::parse(r#"{"appDataPath": "", "storagePath": "/old"}"#).unwrap();
        assert_eq!(s.data_path(), Some("/old"));

        assert_eq!(Settings::default().data_path(), None);
    }

    #[test]
    fn missing_and_blank_files_are_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        assert_eq!(Settings::load(&path).unwrap(), Settings::default());

        std::fs::write(&path, "  \n").unwrap();
        assert_eq!(Settings::load(&path).unwrap(), Settings::default());
    }

    #[test]
    fn malformed_document_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{\"domain\": ").unwrap();
        let err = Settings::load(&path).unwrap_err();
        assert!(matches!(err, RuntipiError::Settings { .. }));
        assert!(err.to_string().contains("settings.json"));
    }

    #[test]
    fn wrong_type_for_text_field_is_error() {
        assert!(Settings::parse(r#"{"domain": 42}"#).is_err());
        assert!(Settings::parse(r#""just a string""#).is_err());
    }
}
