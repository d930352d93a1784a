//! Call context
//!
//! Identity and authority of the entity invoking a ledger operation. The
//! caller is threaded explicitly through every operation instead of being
//! read from ambient runtime state, which keeps the core testable without a
//! blockchain host.

/// Identity and authority of the current caller.
///
/// `write_access` models the host's deployment-authority check; it is only
/// consulted at construction time (ledger deployment, coordinator creation),
/// never for ordinary transfers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallContext {
    /// Address of the invoking entity
    pub caller: String,
    /// Whether the execution context may initialize persistent state
    pub write_access: bool,
}

impl CallContext {
    /// Context for an ordinary call (no deployment authority)
    pub fn new(caller: impl Into<String>) -> Self {
        Self {
            caller: caller.into(),
            write_access: false,
        }
    }

    /// Context for a deployment call
    pub fn with_write_access(caller: impl Into<String>) -> Self {
        Self {
            caller: caller.into(),
            write_access: true,
        }
    }

    /// Address of the invoking entity
    pub fn caller(&self) -> &str {
        &self.caller
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_construction() {
        let ctx = CallContext::new("alice");
        assert_eq!(ctx.caller(), "alice");
        assert!(!ctx.write_access);

        let ctx = CallContext::with_write_access("deployer");
        assert_eq!(ctx.caller(), "deployer");
        assert!(ctx.write_access);
    }
}
