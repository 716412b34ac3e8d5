/// The institutional email domain whose addresses are verified on registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustedDomain(String);

impl TrustedDomain {
    /// A leading `@` is accepted and ignored, so `"asu.edu"` and `"@asu.edu"` are equivalent.
    pub fn new(domain: impl Into<String>) -> Self {
        let domain = domain.into();
        Self(domain.trim_start_matches('@').to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Should a voter registering with this email be verified immediately?
    ///
    /// Total and deterministic: a malformed email (no `@`, several `@`, empty local
    /// part or empty domain) is simply not verified. The domain must match exactly,
    /// ignoring ASCII case; subdomains do not count.
    pub fn verifies(&self, email: &str) -> bool {
        let mut parts = email.split('@');
        let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
            return false;
        };
        !local.is_empty() && !domain.is_empty() && domain.eq_ignore_ascii_case(&self.0)
    }
}

/// Example data for tests.
#[cfg(test)]
mod examples {
    use super::*;

    impl TrustedDomain {
        pub fn example() -> Self {
            Self::new("asu.edu")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trusted_addresses_verify() {
        let domain = TrustedDomain::example();
        assert!(domain.verifies("alice@asu.edu"));
        assert!(domain.verifies("Alice.Smith@ASU.EDU"));
        assert_eq!(TrustedDomain::new("@asu.edu"), domain);
    }

    #[test]
    fn other_addresses_do_not_verify() {
        let domain = TrustedDomain::example();
        assert!(!domain.verifies("bob@example.com"));
        assert!(!domain.verifies("bob@cs.asu.edu"));
        assert!(!domain.verifies("bob@asu.edu.evil.com"));
        assert!(!domain.verifies("bob@notasu.edu"));
    }

    #[test]
    fn malformed_addresses_do_not_verify() {
        let domain = TrustedDomain::example();
        for email in [
            "",
            "asu.edu",
            "1234567890",
            "@asu.edu",
            "alice@",
            "alice@@asu.edu",
            "alice@asu.edu@asu.edu",
            " alice@asu.edu ",
        ] {
            assert!(!domain.verifies(email), "{email:?} should not verify");
        }
    }

    #[test]
    fn empty_trusted_domain_never_verifies() {
        let domain = TrustedDomain::new("");
        assert!(!domain.verifies("alice@"));
        assert!(!domain.verifies("alice@asu.edu"));
    }
}
