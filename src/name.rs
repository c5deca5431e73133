use std::fmt::Display;
use std::net::IpAddr;

/// A hostname used as a cache key
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Name {
    /// Lowercased, without the trailing root dot
    /// E.g. "WWW.Example.com." is stored as www.example.com
    name: String,
}

impl Name {
    pub fn new(name: &str) -> Self {
        let name = name.strip_suffix('.').unwrap_or(name);

        Self {
            name: name.to_ascii_lowercase(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// The address this name spells out, if it is an IP literal
    /// Bracketed IPv6 literals ("[::1]") are accepted too
    pub fn as_ip(&self) -> Option<IpAddr> {
        let literal = self
            .name
            .strip_prefix('[')
            .and_then(|s| s.strip_suffix(']'))
            .unwrap_or(&self.name);

        literal.parse().ok()
    }
}

impl Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for Name {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Name {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.name
    }
}
