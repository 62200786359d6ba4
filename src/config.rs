//! Resolver configuration

/// Output policy when a translation key resolves to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingKeys {
    /// Return the key itself. Keeps missing translations visible during
    /// development.
    #[default]
    Key,
    /// Return an empty string. Avoids leaking raw keys to end users.
    Empty,
}

/// Cookie value persisted for roughly three years.
pub const DEFAULT_COOKIE_MAX_AGE: i64 = 3 * 365 * 24 * 60 * 60;

/// Locale resolution configuration.
#[derive(Debug, Clone)]
pub struct I18nConfig {
    /// Persist the resolved locale in a cookie.
    pub persist: bool,

    /// Name of the persistence cookie.
    pub cookie_name: String,

    /// Cookie path attribute.
    pub cookie_path: String,

    /// Cookie Max-Age attribute, in seconds.
    pub cookie_max_age: i64,

    /// Policy for keys with no translation.
    pub missing_keys: MissingKeys,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            persist: true,
            cookie_name: "locale".to_string(),
            cookie_path: "/".to_string(),
            cookie_max_age: DEFAULT_COOKIE_MAX_AGE,
            missing_keys: MissingKeys::default(),
        }
    }
}

impl I18nConfig {
    /// Create a configuration with the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable cookie persistence.
    pub fn with_persist(mut self, persist: bool) -> Self {
        self.persist = persist;
        self
    }

    /// Set the persistence cookie name.
    pub fn with_cookie_name(mut self, name: impl Into<String>) -> Self {
        self.cookie_name = name.into();
        self
    }

    /// Set the cookie path attribute.
    pub fn with_cookie_path(mut self, path: impl Into<String>) -> Self {
        self.cookie_path = path.into();
        self
    }

    /// Set the cookie Max-Age attribute in seconds.
    pub fn with_cookie_max_age(mut self, seconds: i64) -> Self {
        self.cookie_max_age = seconds;
        self
    }

    /// Set the missing-translation policy.
    pub fn with_missing_keys(mut self, policy: MissingKeys) -> Self {
        self.missing_keys = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = I18nConfig::default();
        assert!(config.persist);
        assert_eq!(config.cookie_name, "locale");
        assert_eq!(config.cookie_path, "/");
        assert_eq!(config.cookie_max_age, 94_608_000);
        assert_eq!(config.missing_keys, MissingKeys::Key);
    }

    #[test]
    fn builder_setters() {
        let config = I18nConfig::new()
            .with_persist(false)
            .with_cookie_name("lang")
            .with_missing_keys(MissingKeys::Empty);
        assert!(!config.persist);
        assert_eq!(config.cookie_name, "lang");
        assert_eq!(config.missing_keys, MissingKeys::Empty);
    }
}
