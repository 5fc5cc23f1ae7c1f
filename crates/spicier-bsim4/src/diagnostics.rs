//! Non-fatal diagnostics collected while deriving parameters.

/// Warnings raised by one stage of the pipeline.
///
/// Every message goes to the `log` facade at warn level, prefixed by the
/// owning model or instance, and is kept so callers can inspect it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    owner: String,
    messages: Vec<String>,
}

impl Diagnostics {
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            messages: Vec::new(),
        }
    }

    /// Name of the model or instance the messages belong to.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Record and log a warning.
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::warn!("{}: {}", self.owner, message);
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Whether any message contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.messages.iter().any(|m| m.contains(needle))
    }

    /// Append messages already logged elsewhere.
    pub fn absorb(&mut self, other: &Diagnostics) {
        self.messages.extend(other.messages.iter().cloned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_messages() {
        let mut d = Diagnostics::new("M1");
        assert!(d.is_empty());
        d.warn("Warning: eu has been negative; reset to 0.0.");
        d.warn(format!("Ijthsfwd reset to {}.", 0.0));
        assert_eq!(d.len(), 2);
        assert!(d.contains("Ijthsfwd reset to 0."));
        assert_eq!(d.owner(), "M1");
    }

    #[test]
    fn test_absorb_keeps_order() {
        let mut a = Diagnostics::new("nch");
        a.warn("first");
        let mut b = Diagnostics::new("M1");
        b.warn("second");
        b.absorb(&a);
        assert_eq!(b.messages(), &["second".to_string(), "first".to_string()]);
    }
}
