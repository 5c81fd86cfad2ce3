use std::fmt::{self, Debug, Display};

/// A configuration value that must never leak into logs.
///
/// The wrapper is deliberately restrictive: no `Deref`, no serde support, and the only ways at the inner value
/// are [`Secret::reveal`] and [`Secret::into_inner`], so every use of a secret is visible at the call site.
/// Both `Debug` and `Display` render as `****`.
pub struct Secret<T> {
    value: T,
}

impl<T> Secret<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }

    pub fn reveal(&self) -> &T {
        &self.value
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

impl Secret<String> {
    /// True when the secret holds an empty string, the placeholder the env loaders store when the variable is
    /// not set. Clients use this to warn at construction time rather than failing on the first request.
    pub fn is_unset(&self) -> bool {
        self.value.is_empty()
    }
}

impl<T: Clone> Clone for Secret<T> {
    fn clone(&self) -> Self {
        Self { value: self.value.clone() }
    }
}

impl<T: Default> Default for Secret<T> {
    fn default() -> Self {
        Self { value: T::default() }
    }
}

impl<T> Debug for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("****")
    }
}

impl<T> Display for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("****")
    }
}

#[cfg(test)]
mod test {
    use super::Secret;

    #[test]
    fn formatting_is_redacted() {
        let secret = Secret::new("APP_USR-1234567890".to_string());
        assert_eq!(format!("{secret}"), "****");
        assert_eq!(format!("{secret:?}"), "****");
        assert_eq!(secret.reveal().as_str(), "APP_USR-1234567890");
        assert_eq!(secret.into_inner(), "APP_USR-1234567890");
    }

    #[test]
    fn empty_string_counts_as_unset() {
        assert!(Secret::<String>::default().is_unset());
        assert!(!Secret::new("key".to_string()).is_unset());
    }
}
