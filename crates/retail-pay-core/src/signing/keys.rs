//! Key newtypes.
//!
//! The application secret and the session key are both plain strings on the
//! wire, so they get distinct types here to keep them from being swapped.

/// Long-lived per-integration secret keying the pay signature.
#[derive(Clone, PartialEq, Eq)]
pub struct AppSecret(String);

/// Per-user secret from the login exchange, keying the user signature.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionKey(String);

macro_rules! secret_newtype {
    ($name:ident) => {
        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            /// Raw key material.
            pub fn expose(&self) -> &str {
                &self.0
            }

            pub(crate) fn as_bytes(&self) -> &[u8] {
                self.0.as_bytes()
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_tuple(stringify!($name)).field(&"[REDACTED]").finish()
            }
        }
    };
}

secret_newtype!(AppSecret);
secret_newtype!(SessionKey);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts() {
        let secret = AppSecret::new("very-secret");
        let session = SessionKey::from("session-secret");

        assert_eq!(format!("{:?}", secret), "AppSecret(\"[REDACTED]\")");
        assert!(!format!("{:?}", session).contains("session-secret"));
    }

    #[test]
    fn test_empty() {
        assert!(SessionKey::new("").is_empty());
        assert!(!AppSecret::from("k".to_string()).is_empty());
        assert_eq!(AppSecret::new("k").expose(), "k");
    }
}
