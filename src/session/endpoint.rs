//! Server endpoint and credentials
//!
//! The server is addressed either as a base URI plus a server-instance
//! name, or as a single pre-combined service URI.

use crate::common::{Error, Result};

/// Fully resolved service URI (base address joined with the instance)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoint(String);

impl ServiceEndpoint {
    /// Build an endpoint from a server address and an instance name.
    ///
    /// The address gets a default `https` scheme if none is present and
    /// trailing slashes are normalized before the instance is joined.
    pub fn from_parts(server_uri: &str, server_instance: &str) -> Result<Self> {
        let instance = server_instance.trim_matches('/');
        if instance.is_empty() {
            return Err(Error::Endpoint("server instance is empty".to_string()));
        }

        let base = Self::from_uri(server_uri)?;
        Ok(Self(format!("{}/{}", base.0, instance)))
    }

    /// Build an endpoint from a pre-combined service URI
    pub fn from_uri(service_uri: &str) -> Result<Self> {
        let trimmed = service_uri.trim();
        if trimmed.is_empty() {
            return Err(Error::Endpoint("server address is empty".to_string()));
        }

        let with_scheme = if trimmed.contains("://") {
            trimmed.to_string()
        } else {
            format!("https://{}", trimmed)
        };

        let host_part = match with_scheme.split_once("://") {
            Some((_, rest)) => rest,
            None => with_scheme.as_str(),
        };
        if host_part.trim_matches('/').is_empty() {
            return Err(Error::Endpoint(format!("'{}' has no host", service_uri)));
        }

        Ok(Self(with_scheme.trim_end_matches('/').to_string()))
    }

    /// The full service URI
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ServiceEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Username/password credential for the session
#[derive(Clone)]
pub struct Credential {
    pub username: String,
    password: String,
}

impl Credential {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

// Keep the password out of logs
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts() {
        let endpoint = ServiceEndpoint::from_parts("https://bc.example.com/", "BC220").unwrap();
        assert_eq!(endpoint.as_str(), "https://bc.example.com/BC220");
    }

    #[test]
    fn test_default_scheme() {
        let endpoint = ServiceEndpoint::from_parts("bc.example.com:7085", "Sandbox").unwrap();
        assert_eq!(endpoint.as_str(), "https://bc.example.com:7085/Sandbox");
    }

    #[test]
    fn test_instance_slashes_trimmed() {
        let endpoint = ServiceEndpoint::from_parts("http://localhost:8080", "/BC/").unwrap();
        assert_eq!(endpoint.as_str(), "http://localhost:8080/BC");
    }

    #[test]
    fn test_from_uri_precombined() {
        let endpoint = ServiceEndpoint::from_uri("https://bc.example.com/BC220/").unwrap();
        assert_eq!(endpoint.as_str(), "https://bc.example.com/BC220");
    }

    #[test]
    fn test_empty_address_rejected() {
        assert!(ServiceEndpoint::from_uri("  ").is_err());
        assert!(ServiceEndpoint::from_uri("https://").is_err());
        assert!(ServiceEndpoint::from_parts("bc.example.com", "").is_err());
    }

    #[test]
    fn test_credential_debug_redacts_password() {
        let credential = Credential::new("admin", "hunter2");
        let debug = format!("{:?}", credential);
        assert!(debug.contains("admin"));
        assert!(!debug.contains("hunter2"));
    }
}
