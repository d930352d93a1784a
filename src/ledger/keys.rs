//! Storage key layout
//!
//! Every ledger instance owns a namespace prefix; all of its keys are built
//! by joining the namespace with a field name (and, for balances and
//! allowances, the addresses involved). Two ledgers with distinct namespaces
//! can therefore share one store without colliding.

/// Instance-scoped key prefix for one deployed ledger.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Namespace(String);

impl Namespace {
    /// Create a namespace from a prefix string
    pub fn new(prefix: impl Into<String>) -> Self {
        Self(prefix.into())
    }

    /// The raw prefix
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Build a key for a namespaced field
    fn field(&self, name: &str) -> Vec<u8> {
        format!("{}:{}", self.0, name).into_bytes()
    }

    /// Key of the token name
    pub fn name_key(&self) -> Vec<u8> {
        self.field("name")
    }

    /// Key of the token symbol
    pub fn symbol_key(&self) -> Vec<u8> {
        self.field("symbol")
    }

    /// Key of the decimals field
    pub fn decimals_key(&self) -> Vec<u8> {
        self.field("decimals")
    }

    /// Key of the total supply
    pub fn total_supply_key(&self) -> Vec<u8> {
        self.field("total_supply")
    }

    /// Key of the administrative owner address
    pub fn owner_key(&self) -> Vec<u8> {
        self.field("owner")
    }

    /// Key of an address's balance
    pub fn balance_key(&self, address: &str) -> Vec<u8> {
        self.field(&format!("balance:{}", address))
    }

    /// Key of the allowance granted by `owner` to `spender`
    pub fn allowance_key(&self, owner: &str, spender: &str) -> Vec<u8> {
        self.field(&format!("allowance:{}:{}", owner, spender))
    }
}

impl std::fmt::Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_layout() {
        let ns = Namespace::new("token1");
        assert_eq!(ns.name_key(), b"token1:name".to_vec());
        assert_eq!(ns.decimals_key(), b"token1:decimals".to_vec());
        assert_eq!(ns.balance_key("alice"), b"token1:balance:alice".to_vec());
        assert_eq!(
            ns.allowance_key("alice", "bob"),
            b"token1:allowance:alice:bob".to_vec()
        );
    }

    #[test]
    fn test_namespaces_do_not_collide() {
        let a = Namespace::new("token1");
        let b = Namespace::new("token2");
        assert_ne!(a.balance_key("alice"), b.balance_key("alice"));
        assert_ne!(a.total_supply_key(), b.total_supply_key());
    }

    #[test]
    fn test_allowance_key_is_directional() {
        let ns = Namespace::new("t");
        assert_ne!(ns.allowance_key("a", "b"), ns.allowance_key("b", "a"));
    }
}
