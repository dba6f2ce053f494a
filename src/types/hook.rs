use std::time::Duration;

use reqwest::Url;
use serde::Serialize;

use crate::error::WxError;

/// Where the server should push intercepted messages, and for how long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookSyncMsgOption {
    local_url: Url,
    url_text: String,
    timeout: Duration,
}

impl HookSyncMsgOption {
    /// Build from a parsed URL; the wire `url` is its serialized form.
    pub fn new(local_url: Url, timeout: Duration) -> Self {
        Self {
            url_text: local_url.to_string(),
            local_url,
            timeout,
        }
    }

    /// Build from the callback URL text, which is sent back verbatim.
    ///
    /// # Errors
    /// Returns `WxError::Config` if `local_url` is not a valid URL
    pub fn parse(local_url: &str, timeout: Duration) -> Result<Self, WxError> {
        let parsed = Url::parse(local_url)
            .map_err(|e| WxError::Config(format!("invalid hook url {local_url:?}: {e}")))?;
        Ok(Self {
            local_url: parsed,
            url_text: local_url.to_string(),
            timeout,
        })
    }

    pub fn local_url(&self) -> &Url {
        &self.local_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Translate into the body `/api/hookSyncMsg` expects.
    ///
    /// The timeout is whole seconds multiplied by 100, sent as a string.
    /// `port` is empty unless the URL names a non-default port.
    pub fn to_wire(&self) -> HookSyncMsgRequest {
        let ip = self
            .local_url
            .host_str()
            .unwrap_or_default()
            .trim_start_matches('[')
            .trim_end_matches(']')
            .to_string();
        let port = self
            .local_url
            .port()
            .map(|p| p.to_string())
            .unwrap_or_default();

        HookSyncMsgRequest {
            url: self.url_text.clone(),
            enable_http: 1,
            timeout: self.timeout.as_secs().saturating_mul(100).to_string(),
            ip,
            port,
        }
    }
}

/// Wire form of [`HookSyncMsgOption`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HookSyncMsgRequest {
    pub url: String,
    pub enable_http: u8,
    pub timeout: String,
    pub ip: String,
    pub port: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(url: &str, secs: u64) -> HookSyncMsgOption {
        HookSyncMsgOption::parse(url, Duration::from_secs(secs)).unwrap()
    }

    #[test]
    fn test_timeout_is_seconds_times_hundred() {
        let wire = option("http://192.168.1.5:8080/callback", 30).to_wire();
        assert_eq!(wire.timeout, "3000");
    }

    #[test]
    fn test_sub_second_timeout_truncates() {
        let opt = HookSyncMsgOption::new(
            Url::parse("http://127.0.0.1:9000/").unwrap(),
            Duration::from_millis(1999),
        );
        assert_eq!(opt.to_wire().timeout, "100");
    }

    #[test]
    fn test_ip_and_port_split_from_url() {
        let wire = option("http://192.168.1.5:8080/callback", 10).to_wire();
        assert_eq!(wire.ip, "192.168.1.5");
        assert_eq!(wire.port, "8080");
        assert_eq!(wire.url, "http://192.168.1.5:8080/callback");
        assert_eq!(wire.enable_http, 1);
    }

    #[test]
    fn test_default_port_and_ipv6_host() {
        let wire = option("http://[::1]/hook", 1).to_wire();
        assert_eq!(wire.ip, "::1");
        assert_eq!(wire.port, "");
    }

    #[test]
    fn test_missing_port_sent_empty() {
        let wire = option("http://192.168.1.5/callback", 30).to_wire();
        assert_eq!(wire.ip, "192.168.1.5");
        assert_eq!(wire.port, "");
        assert_eq!(wire.timeout, "3000");
    }

    #[test]
    fn test_url_text_sent_verbatim() {
        let wire = option("http://192.168.1.5:8000", 30).to_wire();
        assert_eq!(wire.url, "http://192.168.1.5:8000");
        assert_eq!(wire.port, "8000");
    }

    #[test]
    fn test_new_uses_serialized_url() {
        let opt = HookSyncMsgOption::new(
            Url::parse("http://192.168.1.5:8000").unwrap(),
            Duration::from_secs(1),
        );
        assert_eq!(opt.to_wire().url, "http://192.168.1.5:8000/");
        assert_eq!(opt.timeout(), Duration::from_secs(1));
    }

    #[test]
    fn test_parse_rejects_invalid_url() {
        let err = HookSyncMsgOption::parse("not a url", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, WxError::Config(_)));
    }

    #[test]
    fn test_wire_json_field_names() {
        let wire = option("http://10.0.0.2:19099/", 5).to_wire();
        let value = serde_json::to_value(&wire).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "url": "http://10.0.0.2:19099/",
                "enableHttp": 1,
                "timeout": "500",
                "ip": "10.0.0.2",
                "port": "19099"
            })
        );
    }
}
