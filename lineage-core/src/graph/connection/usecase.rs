use std::sync::Arc;

use rst_common::standard::async_trait::async_trait;
use rst_common::with_tokio::tokio::sync::RwLock;

use super::connection::Connection;
use super::store::ConnectionStore;
use super::table::ConnectionType;
use super::types::{
    AccessPolicyBuilder, ConnectionError, ConnectionId, ConnectionTypeId,
    CreateConnectionParams, OwnerId, OwnershipOracleBuilder, RegistryAPI, RepoBuilder, TokenId,
    UsecaseBuilder,
};

/// `Usecase` is the [`RegistryAPI`] implementation: the authorization
/// boundary and the orchestration around [`ConnectionStore`]
///
/// The arena lives behind a write lock that serializes every mutation, which
/// restores the single-threaded execution guarantee the state machine
/// assumes. Each mutation follows a stage-persist-commit discipline: the
/// arena is cloned, the clone is mutated, the journal write must succeed and
/// only then does the clone replace the shared state. A failed journal write
/// therefore leaves nothing behind, in memory or on disk
///
/// Owner identities are resolved through the injected oracle immediately
/// before each decision, never cached across calls
#[derive(Clone)]
pub struct Usecase<TRepo, TOracle, TPolicy>
where
    TRepo: RepoBuilder<EntityAccessor = Connection> + Clone + Send + Sync,
    TOracle: OwnershipOracleBuilder + Clone + Send + Sync,
    TPolicy: AccessPolicyBuilder + Clone + Send + Sync,
{
    store: Arc<RwLock<ConnectionStore>>,
    repo: TRepo,
    oracle: TOracle,
    policy: TPolicy,
}

impl<TRepo, TOracle, TPolicy> Usecase<TRepo, TOracle, TPolicy>
where
    TRepo: RepoBuilder<EntityAccessor = Connection> + Clone + Send + Sync,
    TOracle: OwnershipOracleBuilder + Clone + Send + Sync,
    TPolicy: AccessPolicyBuilder + Clone + Send + Sync,
{
    pub fn new(repo: TRepo, oracle: TOracle, policy: TPolicy) -> Self {
        Self {
            store: Arc::new(RwLock::new(ConnectionStore::new())),
            repo,
            oracle,
            policy,
        }
    }

    /// `load` builds the usecase with its arena rehydrated from the journal
    pub async fn load(
        repo: TRepo,
        oracle: TOracle,
        policy: TPolicy,
    ) -> Result<Self, ConnectionError> {
        let types = repo.list_types().await?;
        let connections = repo.list_connections().await?;
        let store = ConnectionStore::hydrate(types, connections)?;

        Ok(Self {
            store: Arc::new(RwLock::new(store)),
            repo,
            oracle,
            policy,
        })
    }
}

#[async_trait]
impl<TRepo, TOracle, TPolicy> RegistryAPI for Usecase<TRepo, TOracle, TPolicy>
where
    TRepo: RepoBuilder<EntityAccessor = Connection> + Clone + Send + Sync,
    TOracle: OwnershipOracleBuilder + Clone + Send + Sync,
    TPolicy: AccessPolicyBuilder + Clone + Send + Sync,
{
    type EntityAccessor = Connection;

    async fn add_connection_type(
        &self,
        caller: OwnerId,
        type_id: ConnectionTypeId,
        reciprocal_id: ConnectionTypeId,
    ) -> Result<ConnectionType, ConnectionError> {
        self.policy.authorize_type_management(&caller).await?;

        let mut guard = self.store.write().await;
        let mut staged = guard.clone();

        let conn_type = staged.register_type(type_id, reciprocal_id)?;
        self.repo.save_type(&conn_type).await?;

        *guard = staged;
        Ok(conn_type)
    }

    async fn add_connection(
        &self,
        caller: OwnerId,
        params: CreateConnectionParams,
    ) -> Result<(ConnectionId, ConnectionId), ConnectionError> {
        let parent_owner = self.oracle.owner_of(params.parent_token_id).await?;
        let child_owner = self.oracle.owner_of(params.child_token_id).await?;

        self.policy
            .authorize_connection_creation(&caller, &parent_owner)
            .await?;

        let mut guard = self.store.write().await;
        let mut staged = guard.clone();

        let (left_id, right_id) = staged.create_pair(&params, &parent_owner, &child_owner)?;
        let left = staged.get_by_id(left_id)?.to_owned();
        let right = staged.get_by_id(right_id)?.to_owned();

        self.repo.save_pair(&left, &right).await?;

        *guard = staged;
        Ok((left_id, right_id))
    }

    async fn approve_connection(
        &self,
        caller: OwnerId,
        token_id: TokenId,
        type_id: ConnectionTypeId,
    ) -> Result<(), ConnectionError> {
        let token_owner = self.oracle.owner_of(token_id).await?;
        if token_owner != caller {
            return Err(ConnectionError::Unauthorized(format!(
                "caller {} is not the owner of token {}",
                caller, token_id
            )));
        }

        let mut guard = self.store.write().await;
        let mut staged = guard.clone();

        let (matched_id, pair_id) = staged.approve(token_id, type_id)?;
        let matched = staged.get_by_id(matched_id)?.to_owned();
        let pair = staged.get_by_id(pair_id)?.to_owned();

        self.repo.save_pair(&matched, &pair).await?;

        *guard = staged;
        Ok(())
    }

    async fn get_connection(
        &self,
        id: ConnectionId,
    ) -> Result<Self::EntityAccessor, ConnectionError> {
        let guard = self.store.read().await;
        let record = guard.get_by_id(id)?;
        Ok(record.to_owned())
    }
}

impl<TRepo, TOracle, TPolicy> UsecaseBuilder<Connection> for Usecase<TRepo, TOracle, TPolicy>
where
    TRepo: RepoBuilder<EntityAccessor = Connection> + Clone + Send + Sync,
    TOracle: OwnershipOracleBuilder + Clone + Send + Sync,
    TPolicy: AccessPolicyBuilder + Clone + Send + Sync,
{
    type RepoImplementer = TRepo;
    type OracleImplementer = TOracle;
    type PolicyImplementer = TPolicy;

    fn repo(&self) -> Self::RepoImplementer {
        self.repo.clone()
    }

    fn oracle(&self) -> Self::OracleImplementer {
        self.oracle.clone()
    }

    fn policy(&self) -> Self::PolicyImplementer {
        self.policy.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::mock;

    use rst_common::standard::async_trait::async_trait;
    use rst_common::standard::chrono::{Duration, Utc};
    use rst_common::with_tokio::tokio;

    use crate::graph::connection::types::ConnectionEntityAccessor;

    const ALICE: &str = "did:lineage:alice";
    const BOB: &str = "did:lineage:bob";

    mock!(
        FakeRepo{}

        impl Clone for FakeRepo {
            fn clone(&self) -> Self;
        }

        #[async_trait]
        impl RepoBuilder for FakeRepo {
            type EntityAccessor = Connection;

            async fn save_type(&self, conn_type: &ConnectionType) -> Result<(), ConnectionError>;
            async fn save_pair(
                &self,
                left: &Connection,
                right: &Connection,
            ) -> Result<(), ConnectionError>;
            async fn list_types(&self) -> Result<Vec<ConnectionType>, ConnectionError>;
            async fn list_connections(&self) -> Result<Vec<Connection>, ConnectionError>;
        }
    );

    mock!(
        FakeOracle{}

        impl Clone for FakeOracle {
            fn clone(&self) -> Self;
        }

        #[async_trait]
        impl OwnershipOracleBuilder for FakeOracle {
            async fn owner_of(&self, token_id: TokenId) -> Result<OwnerId, ConnectionError>;
        }
    );

    mock!(
        FakePolicy{}

        impl Clone for FakePolicy {
            fn clone(&self) -> Self;
        }

        #[async_trait]
        impl AccessPolicyBuilder for FakePolicy {
            async fn authorize_type_management(
                &self,
                caller: &OwnerId,
            ) -> Result<(), ConnectionError>;
            async fn authorize_connection_creation(
                &self,
                caller: &OwnerId,
                parent_owner: &OwnerId,
            ) -> Result<(), ConnectionError>;
        }
    );

    fn bootstrap_types() -> Vec<ConnectionType> {
        vec![
            ConnectionType::new(ConnectionTypeId::from(0), ConnectionTypeId::from(2)),
            ConnectionType::new(ConnectionTypeId::from(1), ConnectionTypeId::from(1)),
            ConnectionType::new(ConnectionTypeId::from(2), ConnectionTypeId::from(0)),
            ConnectionType::new(ConnectionTypeId::from(3), ConnectionTypeId::from(3)),
        ]
    }

    // tokens 0 and 1 belong to alice, token 2 belongs to bob
    fn generate_oracle() -> MockFakeOracle {
        let mut oracle = MockFakeOracle::new();
        oracle.expect_owner_of().returning(|token_id| {
            match token_id.value() {
                0 | 1 => Ok(OwnerId::from(ALICE)),
                2 => Ok(OwnerId::from(BOB)),
                _ => Err(ConnectionError::UnknownToken(token_id)),
            }
        });

        oracle
    }

    fn generate_open_policy() -> MockFakePolicy {
        let mut policy = MockFakePolicy::new();
        policy
            .expect_authorize_type_management()
            .returning(|_| Ok(()));
        policy
            .expect_authorize_connection_creation()
            .returning(|_, _| Ok(()));

        policy
    }

    fn generate_params(parent: u64, child: u64, type_id: u64) -> CreateConnectionParams {
        let start = Utc::now();
        let end = start + Duration::days(14);

        CreateConnectionParams {
            parent_token_id: TokenId::from(parent),
            child_token_id: TokenId::from(child),
            type_id: ConnectionTypeId::from(type_id),
            start_date: start,
            end_date: end,
        }
    }

    async fn generate_usecase(
        repo: MockFakeRepo,
        oracle: MockFakeOracle,
        policy: MockFakePolicy,
    ) -> Usecase<MockFakeRepo, MockFakeOracle, MockFakePolicy> {
        Usecase::load(repo, oracle, policy).await.unwrap()
    }

    fn generate_repo_with_bootstrap() -> MockFakeRepo {
        let mut repo = MockFakeRepo::new();
        repo.expect_list_types().returning(|| Ok(bootstrap_types()));
        repo.expect_list_connections().returning(|| Ok(Vec::new()));
        repo
    }

    #[tokio::test]
    async fn test_add_connection_type_success() {
        let mut repo = generate_repo_with_bootstrap();
        repo.expect_save_type().returning(|_| Ok(()));

        let uc = generate_usecase(repo, generate_oracle(), generate_open_policy()).await;

        let registered = uc
            .add_connection_type(
                OwnerId::from(ALICE),
                ConnectionTypeId::from(7),
                ConnectionTypeId::from(8),
            )
            .await;
        assert!(!registered.is_err());

        let conn_type = registered.unwrap();
        assert_eq!(conn_type.get_id(), ConnectionTypeId::from(7));
        assert_eq!(conn_type.get_reciprocal_id(), ConnectionTypeId::from(8))
    }

    #[tokio::test]
    async fn test_add_connection_type_unauthorized() {
        let repo = generate_repo_with_bootstrap();
        let oracle = generate_oracle();

        let mut policy = MockFakePolicy::new();
        policy.expect_authorize_type_management().returning(|caller| {
            Err(ConnectionError::Unauthorized(format!(
                "caller {} may not manage types",
                caller
            )))
        });

        let uc = generate_usecase(repo, oracle, policy).await;

        let registered = uc
            .add_connection_type(
                OwnerId::from(BOB),
                ConnectionTypeId::from(7),
                ConnectionTypeId::from(8),
            )
            .await;
        assert!(registered.is_err());
        assert!(matches!(
            registered.unwrap_err(),
            ConnectionError::Unauthorized(_)
        ))
    }

    #[tokio::test]
    async fn test_add_connection_type_duplicate() {
        let repo = generate_repo_with_bootstrap();
        let uc = generate_usecase(repo, generate_oracle(), generate_open_policy()).await;

        let registered = uc
            .add_connection_type(
                OwnerId::from(ALICE),
                ConnectionTypeId::from(0),
                ConnectionTypeId::from(2),
            )
            .await;
        assert!(registered.is_err());
        assert_eq!(
            registered.unwrap_err(),
            ConnectionError::DuplicateType(ConnectionTypeId::from(0))
        )
    }

    #[tokio::test]
    async fn test_add_connection_auto_activated() {
        let mut repo = generate_repo_with_bootstrap();
        repo.expect_save_pair().returning(|_, _| Ok(()));

        let uc = generate_usecase(repo, generate_oracle(), generate_open_policy()).await;

        let created = uc
            .add_connection(OwnerId::from(ALICE), generate_params(0, 1, 0))
            .await;
        assert!(!created.is_err());

        let (left_id, right_id) = created.unwrap();
        assert_eq!(left_id, ConnectionId::from(0));
        assert_eq!(right_id, ConnectionId::from(1));

        let left = uc.get_connection(left_id).await.unwrap();
        assert_eq!(left.get_parent_token_id(), TokenId::from(0));
        assert_eq!(left.get_child_token_id(), TokenId::from(1));
        assert_eq!(left.get_type_id(), ConnectionTypeId::from(0));
        assert!(left.get_is_active());

        let right = uc.get_connection(right_id).await.unwrap();
        assert_eq!(right.get_parent_token_id(), TokenId::from(1));
        assert_eq!(right.get_child_token_id(), TokenId::from(0));
        assert_eq!(right.get_type_id(), ConnectionTypeId::from(2));
        assert!(right.get_is_active())
    }

    #[tokio::test]
    async fn test_add_connection_pending_then_approved() {
        let mut repo = generate_repo_with_bootstrap();
        repo.expect_save_pair().returning(|_, _| Ok(()));

        let uc = generate_usecase(repo, generate_oracle(), generate_open_policy()).await;

        let (left_id, right_id) = uc
            .add_connection(OwnerId::from(ALICE), generate_params(0, 2, 0))
            .await
            .unwrap();

        assert!(!uc.get_connection(left_id).await.unwrap().get_is_active());
        assert!(!uc.get_connection(right_id).await.unwrap().get_is_active());

        let approved = uc
            .approve_connection(
                OwnerId::from(BOB),
                TokenId::from(2),
                ConnectionTypeId::from(0),
            )
            .await;
        assert!(!approved.is_err());

        assert!(uc.get_connection(left_id).await.unwrap().get_is_active());
        assert!(uc.get_connection(right_id).await.unwrap().get_is_active())
    }

    #[tokio::test]
    async fn test_approve_connection_unauthorized() {
        let mut repo = generate_repo_with_bootstrap();
        repo.expect_save_pair().returning(|_, _| Ok(()));

        let uc = generate_usecase(repo, generate_oracle(), generate_open_policy()).await;

        let (left_id, _) = uc
            .add_connection(OwnerId::from(ALICE), generate_params(0, 2, 0))
            .await
            .unwrap();

        // alice tries to approve on behalf of bob's token
        let approved = uc
            .approve_connection(
                OwnerId::from(ALICE),
                TokenId::from(2),
                ConnectionTypeId::from(0),
            )
            .await;
        assert!(approved.is_err());
        assert!(matches!(
            approved.unwrap_err(),
            ConnectionError::Unauthorized(_)
        ));

        // state must be left untouched
        assert!(!uc.get_connection(left_id).await.unwrap().get_is_active())
    }

    #[tokio::test]
    async fn test_add_connection_unknown_token() {
        let repo = generate_repo_with_bootstrap();
        let uc = generate_usecase(repo, generate_oracle(), generate_open_policy()).await;

        let created = uc
            .add_connection(OwnerId::from(ALICE), generate_params(0, 9, 0))
            .await;
        assert!(created.is_err());
        assert_eq!(
            created.unwrap_err(),
            ConnectionError::UnknownToken(TokenId::from(9))
        )
    }

    #[tokio::test]
    async fn test_add_connection_storage_failure_leaves_state_untouched() {
        let mut repo = generate_repo_with_bootstrap();
        repo.expect_save_pair()
            .returning(|_, _| Err(ConnectionError::StorageError("journal down".to_string())));

        let uc = generate_usecase(repo, generate_oracle(), generate_open_policy()).await;

        let created = uc
            .add_connection(OwnerId::from(ALICE), generate_params(0, 1, 0))
            .await;
        assert!(created.is_err());
        assert!(matches!(
            created.unwrap_err(),
            ConnectionError::StorageError(_)
        ));

        // nothing was committed to the arena
        let record = uc.get_connection(ConnectionId::from(0)).await;
        assert!(record.is_err());
        assert_eq!(
            record.unwrap_err(),
            ConnectionError::UnknownConnection(ConnectionId::from(0))
        )
    }

    #[tokio::test]
    async fn test_get_connection_unknown() {
        let repo = generate_repo_with_bootstrap();
        let uc = generate_usecase(repo, generate_oracle(), generate_open_policy()).await;

        let record = uc.get_connection(ConnectionId::from(0)).await;
        assert!(record.is_err());
        assert_eq!(
            record.unwrap_err(),
            ConnectionError::UnknownConnection(ConnectionId::from(0))
        )
    }
}
