use std::fmt::Debug;

use rst_common::standard::async_trait::async_trait;
use rst_common::standard::chrono::serde::ts_seconds;
use rst_common::standard::chrono::{DateTime, Utc};
use rst_common::standard::serde::{self, Deserialize, Serialize};
use rst_common::with_errors::thiserror::{self, Error};

use rstdev_domain::entity::ToJSON;

use derive_more::{Display, From};

use super::table::ConnectionType;

/// `ConnectionError` is a base error types for the connection graph domain
///
/// It contains the protocol conditions a caller is expected to assert on
/// (duplicate types, unknown tokens, missing pendings and friends) plus the
/// ambient wrappers used when an injected collaborator fails
#[derive(Debug, PartialEq, Error, Clone)]
pub enum ConnectionError {
    #[error("duplicate connection type: {0}")]
    DuplicateType(ConnectionTypeId),

    #[error("unknown connection type: {0}")]
    UnknownType(ConnectionTypeId),

    #[error("unknown token: {0}")]
    UnknownToken(TokenId),

    #[error("unknown connection: {0}")]
    UnknownConnection(ConnectionId),

    #[error("no pending connection for token {token_id} with type {type_id}")]
    NoPendingConnection {
        token_id: TokenId,
        type_id: ConnectionTypeId,
    },

    #[error("connection for token {token_id} with type {type_id} already active")]
    AlreadyActive {
        token_id: TokenId,
        type_id: ConnectionTypeId,
    },

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("invalid time window: start date is after end date")]
    InvalidTimeWindow,

    #[error("entity error: {0}")]
    EntityError(String),

    #[error("storage error: {0}")]
    StorageError(String),

    #[error("oracle error: {0}")]
    OracleError(String),
}

/// `TokenId` identifies an identity token issued by the external token
/// registry. The graph never mints or owns tokens, it only references them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Serialize, Deserialize,
)]
#[serde(crate = "self::serde")]
pub struct TokenId(u64);

impl TokenId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// `ConnectionId` identifies a single connection record. Ids are assigned
/// monotonically in creation order and double as the record's index inside
/// the arena, so they are never reassigned or reused.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Serialize, Deserialize,
)]
#[serde(crate = "self::serde")]
pub struct ConnectionId(u64);

impl ConnectionId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// `ConnectionTypeId` identifies a registered connection type. The value is
/// caller-assigned at registration time.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Serialize, Deserialize,
)]
#[serde(crate = "self::serde")]
pub struct ConnectionTypeId(u64);

impl ConnectionTypeId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// `OwnerId` is the controlling identity of a token as reported by the
/// ownership oracle. In deployments this is a DID-style URI; the graph only
/// ever compares it for equality and never parses it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(crate = "self::serde")]
pub struct OwnerId(String);

impl From<String> for OwnerId {
    fn from(value: String) -> Self {
        OwnerId(value)
    }
}

impl From<&str> for OwnerId {
    fn from(value: &str) -> Self {
        OwnerId(value.to_string())
    }
}

impl OwnerId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// `CreateConnectionParams` is the input of the pair-creation operation. The
/// same shape travels over RPC, which is why it carries its own serde codec
/// with seconds-precision timestamps.
///
/// The validity window is caller-supplied metadata: the registry checks that
/// `start_date <= end_date` at creation and never evaluates the window
/// against the clock afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(crate = "self::serde")]
pub struct CreateConnectionParams {
    pub parent_token_id: TokenId,
    pub child_token_id: TokenId,
    pub type_id: ConnectionTypeId,

    #[serde(with = "ts_seconds")]
    pub start_date: DateTime<Utc>,

    #[serde(with = "ts_seconds")]
    pub end_date: DateTime<Utc>,
}

/// `ConnectionEntityAccessor` it's a special trait used to access main
/// `Connection` entity property fields
///
/// The entity protects its properties from direct manipulation; outer layers
/// read them through this trait and serialize them through the inherited
/// codec bounds
pub trait ConnectionEntityAccessor:
    Clone + Debug + ToJSON + TryInto<Vec<u8>> + TryFrom<Vec<u8>>
{
    fn get_id(&self) -> ConnectionId;
    fn get_parent_token_id(&self) -> TokenId;
    fn get_child_token_id(&self) -> TokenId;
    fn get_type_id(&self) -> ConnectionTypeId;
    fn get_start_date(&self) -> DateTime<Utc>;
    fn get_end_date(&self) -> DateTime<Utc>;
    fn get_is_active(&self) -> bool;
    fn get_pair_id(&self) -> ConnectionId;
    fn get_created_at(&self) -> DateTime<Utc>;
    fn get_updated_at(&self) -> DateTime<Utc>;
}

/// `OwnershipOracleBuilder` resolves the current controlling identity of a
/// token
///
/// The oracle is authoritative and its answers must never be cached across
/// calls: ownership can change between calls in the host environment, so the
/// registry re-queries at every decision point. A token that does not exist
/// fails with [`ConnectionError::UnknownToken`]; transport failures map to
/// [`ConnectionError::OracleError`]
#[async_trait]
pub trait OwnershipOracleBuilder {
    async fn owner_of(&self, token_id: TokenId) -> Result<OwnerId, ConnectionError>;
}

/// `AccessPolicyBuilder` is the injected authorization predicate guarding the
/// registry's mutating operations
///
/// Deployments decide what each capability means: a static operator list, a
/// remote role store, or anything else. The registry only asks the questions.
#[async_trait]
pub trait AccessPolicyBuilder {
    /// Guards connection-type registration. Fails with
    /// [`ConnectionError::Unauthorized`] when the caller may not manage types
    async fn authorize_type_management(&self, caller: &OwnerId) -> Result<(), ConnectionError>;

    /// Guards pair creation. The resolved owner of the parent token is given
    /// so policies may allow owners to create edges for their own tokens
    async fn authorize_connection_creation(
        &self,
        caller: &OwnerId,
        parent_owner: &OwnerId,
    ) -> Result<(), ConnectionError>;
}

/// `RepoBuilder` is the persistence journal behind the in-memory arena
///
/// The arena is authoritative at runtime; the repository exists so state
/// survives restarts. `save_pair` persists both legs of one pair in a single
/// call so a pair is always journaled together, and the list methods replay
/// everything at boot for [`super::ConnectionStore::hydrate`]
#[async_trait]
pub trait RepoBuilder {
    type EntityAccessor: ConnectionEntityAccessor;

    async fn save_type(&self, conn_type: &ConnectionType) -> Result<(), ConnectionError>;
    async fn save_pair(
        &self,
        left: &Self::EntityAccessor,
        right: &Self::EntityAccessor,
    ) -> Result<(), ConnectionError>;
    async fn list_types(&self) -> Result<Vec<ConnectionType>, ConnectionError>;
    async fn list_connections(&self) -> Result<Vec<Self::EntityAccessor>, ConnectionError>;
}

/// `RegistryAPI` is main entrypoint to communicate with the connection graph
/// domain
///
/// Mutating operations take the caller's resolved identity as their first
/// argument; resolving and authenticating that identity is the transport's
/// concern. Reads are unauthenticated.
#[async_trait]
pub trait RegistryAPI: Clone {
    type EntityAccessor: ConnectionEntityAccessor;

    /// `add_connection_type` registers a connection type together with the
    /// type used to describe the same relationship from the other endpoint's
    /// perspective. The mapping is immutable once registered and no back
    /// mapping is created: symmetry requires two explicit registrations
    async fn add_connection_type(
        &self,
        caller: OwnerId,
        type_id: ConnectionTypeId,
        reciprocal_id: ConnectionTypeId,
    ) -> Result<ConnectionType, ConnectionError>;

    /// `add_connection` proposes a relationship between two tokens and
    /// returns the ids of the created pair `(left, right)`. The pair starts
    /// active when both tokens share an owner, pending otherwise
    async fn add_connection(
        &self,
        caller: OwnerId,
        params: CreateConnectionParams,
    ) -> Result<(ConnectionId, ConnectionId), ConnectionError>;

    /// `approve_connection` is the counterparty consent call: the caller must
    /// be the current owner of `token_id`, and the earliest pending record
    /// matching `(token_id, type_id)` is activated together with its pair
    async fn approve_connection(
        &self,
        caller: OwnerId,
        token_id: TokenId,
        type_id: ConnectionTypeId,
    ) -> Result<(), ConnectionError>;

    /// `get_connection` reads a single record by its sequential id
    async fn get_connection(
        &self,
        id: ConnectionId,
    ) -> Result<Self::EntityAccessor, ConnectionError>;
}

/// `UsecaseBuilder` is a trait behavior that exposes the composed
/// collaborators behind a [`RegistryAPI`] implementation
pub trait UsecaseBuilder<TEntityAccessor>: RegistryAPI<EntityAccessor = TEntityAccessor>
where
    TEntityAccessor: ConnectionEntityAccessor,
{
    type RepoImplementer: RepoBuilder<EntityAccessor = TEntityAccessor>;
    type OracleImplementer: OwnershipOracleBuilder;
    type PolicyImplementer: AccessPolicyBuilder;

    fn repo(&self) -> Self::RepoImplementer;
    fn oracle(&self) -> Self::OracleImplementer;
    fn policy(&self) -> Self::PolicyImplementer;
}
