use rst_common::standard::async_trait::async_trait;

use lineage_core::graph::connection::types::{
    AccessPolicyBuilder, ConnectionError, OwnerId,
};

/// `OperatorPolicy` is the config-backed authorization predicate
///
/// Identities listed as operators hold both capabilities: managing
/// connection types and creating connections. When `allow_parent_owner` is
/// set, the owner of a parent token may also create connections for that
/// token without an operator grant
#[derive(Clone, Debug)]
pub struct OperatorPolicy {
    operators: Vec<OwnerId>,
    allow_parent_owner: bool,
}

impl OperatorPolicy {
    pub fn new(operators: Vec<OwnerId>, allow_parent_owner: bool) -> Self {
        Self {
            operators,
            allow_parent_owner,
        }
    }

    fn is_operator(&self, caller: &OwnerId) -> bool {
        self.operators.iter().any(|operator| operator == caller)
    }
}

#[async_trait]
impl AccessPolicyBuilder for OperatorPolicy {
    async fn authorize_type_management(&self, caller: &OwnerId) -> Result<(), ConnectionError> {
        if self.is_operator(caller) {
            return Ok(());
        }

        Err(ConnectionError::Unauthorized(format!(
            "caller {} may not manage connection types",
            caller
        )))
    }

    async fn authorize_connection_creation(
        &self,
        caller: &OwnerId,
        parent_owner: &OwnerId,
    ) -> Result<(), ConnectionError> {
        if self.is_operator(caller) {
            return Ok(());
        }

        if self.allow_parent_owner && caller == parent_owner {
            return Ok(());
        }

        Err(ConnectionError::Unauthorized(format!(
            "caller {} may not create connections",
            caller
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rst_common::with_tokio::tokio;

    const OPERATOR: &str = "did:lineage:operator";
    const ALICE: &str = "did:lineage:alice";
    const BOB: &str = "did:lineage:bob";

    fn generate_policy(allow_parent_owner: bool) -> OperatorPolicy {
        OperatorPolicy::new(vec![OwnerId::from(OPERATOR)], allow_parent_owner)
    }

    #[tokio::test]
    async fn test_operator_holds_both_capabilities() {
        let policy = generate_policy(false);

        let types = policy
            .authorize_type_management(&OwnerId::from(OPERATOR))
            .await;
        assert!(!types.is_err());

        let creation = policy
            .authorize_connection_creation(&OwnerId::from(OPERATOR), &OwnerId::from(ALICE))
            .await;
        assert!(!creation.is_err())
    }

    #[tokio::test]
    async fn test_non_operator_may_not_manage_types() {
        let policy = generate_policy(true);

        let types = policy
            .authorize_type_management(&OwnerId::from(ALICE))
            .await;
        assert!(types.is_err());
        assert!(matches!(
            types.unwrap_err(),
            ConnectionError::Unauthorized(_)
        ))
    }

    #[tokio::test]
    async fn test_parent_owner_creation_follows_deployment_flag() {
        let permissive = generate_policy(true);
        let creation = permissive
            .authorize_connection_creation(&OwnerId::from(ALICE), &OwnerId::from(ALICE))
            .await;
        assert!(!creation.is_err());

        let strict = generate_policy(false);
        let creation = strict
            .authorize_connection_creation(&OwnerId::from(ALICE), &OwnerId::from(ALICE))
            .await;
        assert!(creation.is_err());

        let stranger = generate_policy(true);
        let creation = stranger
            .authorize_connection_creation(&OwnerId::from(BOB), &OwnerId::from(ALICE))
            .await;
        assert!(creation.is_err())
    }
}
