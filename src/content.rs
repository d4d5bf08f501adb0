//! Payload formatting for the common QR content types.

use crate::error::StyleError;
use std::fmt;

/// Security tag used when a WiFi payload names none
pub const DEFAULT_WIFI_SECURITY: &str = "WPA";

/// Kind of content a raw command-line string describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PayloadKind {
    /// Free text, encoded as is
    #[default]
    Text,
    /// URL, encoded as is
    Url,
    /// `SSID:password`
    Wifi,
    /// `name:phone[:email[:org]]`
    VCard,
}

/// Content to encode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Free text
    Text(String),
    /// URL
    Url(String),
    /// WiFi network credentials
    Wifi {
        /// Network name
        ssid: String,
        /// Network password
        password: String,
        /// Security tag (`WPA`, `WEP`, `nopass`)
        security: String,
    },
    /// Contact card
    VCard {
        /// Full name
        name: String,
        /// Phone number
        phone: String,
        /// Optional email
        email: Option<String>,
        /// Optional organization
        org: Option<String>,
    },
}

impl Payload {
    /// WiFi payload with the default security tag
    pub fn wifi(ssid: impl Into<String>, password: impl Into<String>) -> Self {
        Payload::Wifi {
            ssid: ssid.into(),
            password: password.into(),
            security: DEFAULT_WIFI_SECURITY.to_string(),
        }
    }

    /// URL payload; `https://` is prepended when neither `http://` nor
    /// `https://` is present
    pub fn url(raw: &str) -> Self {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Payload::Url(raw.to_string())
        } else {
            Payload::Url(format!("https://{raw}"))
        }
    }

    /// Build a payload from a raw string of the given kind
    pub fn parse(kind: PayloadKind, raw: &str) -> Result<Self, StyleError> {
        match kind {
            PayloadKind::Text => Ok(Payload::Text(raw.to_string())),
            PayloadKind::Url => Ok(Payload::url(raw)),
            PayloadKind::Wifi => {
                let (ssid, password) = raw.split_once(':').ok_or_else(|| {
                    StyleError::Payload("wifi content must be 'SSID:password'".to_string())
                })?;
                Ok(Payload::wifi(ssid, password))
            }
            PayloadKind::VCard => {
                let parts: Vec<&str> = raw.split(':').collect();
                if parts.len() < 2 {
                    return Err(StyleError::Payload(
                        "vcard content must be 'name:phone[:email[:org]]'".to_string(),
                    ));
                }
                let optional = |i: usize| {
                    parts
                        .get(i)
                        .filter(|s| !s.is_empty())
                        .map(|s| s.to_string())
                };
                Ok(Payload::VCard {
                    name: parts[0].to_string(),
                    phone: parts[1].to_string(),
                    email: optional(2),
                    org: optional(3),
                })
            }
        }
    }

    /// String handed to the encoder
    pub fn encode(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Text(text) | Payload::Url(text) => f.write_str(text),
            Payload::Wifi {
                ssid,
                password,
                security,
            } => write!(f, "WIFI:T:{security};S:{ssid};P:{password};;"),
            Payload::VCard {
                name,
                phone,
                email,
                org,
            } => {
                write!(f, "BEGIN:VCARD\nVERSION:3.0\nFN:{name}\nTEL:{phone}")?;
                if let Some(email) = email {
                    write!(f, "\nEMAIL:{email}")?;
                }
                if let Some(org) = org {
                    write!(f, "\nORG:{org}")?;
                }
                f.write_str("\nEND:VCARD")
            }
        }
    }
}

impl std::str::FromStr for PayloadKind {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(PayloadKind::Text),
            "url" => Ok(PayloadKind::Url),
            "wifi" => Ok(PayloadKind::Wifi),
            "vcard" => Ok(PayloadKind::VCard),
            other => Err(StyleError::Payload(format!("unknown content type {other:?}"))),
        }
    }
}
