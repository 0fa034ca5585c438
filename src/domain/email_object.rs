use validator::ValidateEmail;

/// A normalized email address: trimmed, lower-cased and shape-checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailObject(String);

impl EmailObject {
    pub fn parse(s: String) -> Result<EmailObject, String> {
        let normalized = s.trim().to_lowercase();
        if normalized.validate_email() {
            Ok(Self(normalized))
        } else {
            Err(format!("{} is not a valid email address.", s.trim()))
        }
    }

    pub fn get(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EmailObject {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EmailObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
