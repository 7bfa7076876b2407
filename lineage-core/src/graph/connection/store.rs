use std::collections::{HashMap, VecDeque};

use super::connection::Connection;
use super::table::{ConnectionType, TypeTable};
use super::types::{
    ConnectionError, ConnectionEntityAccessor, ConnectionId, ConnectionTypeId,
    CreateConnectionParams, OwnerId, TokenId,
};

/// `ConnectionStore` owns the append-only list of connection records and
/// implements the pairing and consent algorithm
///
/// The store is an arena: a record's id equals its index in the list, ids
/// grow monotonically and are never reused, and records are never deleted.
/// The only mutation after creation is the activation flag, which always
/// flips on both legs of a pair inside a single call
///
/// Alongside the arena the store maintains a pending index keyed by
/// `(child_token, type)` holding inactive record ids in creation order. Only
/// the proposal leg of a pair is indexed: its child is the non-initiating
/// token, the one whose owner's consent is awaited, so the initiator cannot
/// activate a pair through the mirrored leg. The index is what makes
/// approval addressing by `(token, type)` unambiguous: when several pendings
/// match, the earliest one wins and the later ones stay queued for
/// subsequent approvals
///
/// The store performs no I/O. Owner identities are resolved by the caller
/// immediately before invocation, which keeps every mutation here a
/// synchronous critical section
#[derive(Debug, Clone, Default)]
pub struct ConnectionStore {
    types: TypeTable,
    connections: Vec<Connection>,
    pending: HashMap<(TokenId, ConnectionTypeId), VecDeque<ConnectionId>>,
}

impl ConnectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// `hydrate` rebuilds a store from journaled state: the registered types
    /// and every connection record in id order. The pending index is derived
    /// from the records' activation flags
    pub fn hydrate(
        types: Vec<ConnectionType>,
        connections: Vec<Connection>,
    ) -> Result<Self, ConnectionError> {
        let mut table = TypeTable::new();
        for conn_type in types.iter() {
            table.register(conn_type.get_id(), conn_type.get_reciprocal_id())?;
        }

        let mut store = Self {
            types: table,
            connections: Vec::with_capacity(connections.len()),
            pending: HashMap::new(),
        };

        for (index, record) in connections.into_iter().enumerate() {
            if record.get_id().value() != index as u64 {
                return Err(ConnectionError::StorageError(format!(
                    "connection id {} out of sequence at index {}",
                    record.get_id(),
                    index
                )));
            }

            store.index_pending(&record);
            store.connections.push(record);
        }

        Ok(store)
    }

    pub fn register_type(
        &mut self,
        type_id: ConnectionTypeId,
        reciprocal_id: ConnectionTypeId,
    ) -> Result<ConnectionType, ConnectionError> {
        self.types.register(type_id, reciprocal_id)?;
        Ok(ConnectionType::new(type_id, reciprocal_id))
    }

    /// `create_pair` appends the two mirrored records of one relationship and
    /// returns their ids, left leg first
    ///
    /// The left record carries the edge as proposed; the right record swaps
    /// the endpoints and uses the reciprocal type. Both legs share the
    /// validity window and the activation state: active immediately when the
    /// resolved owners are equal, pending otherwise
    ///
    /// Repeated proposals between the same endpoints are not deduplicated,
    /// each call appends a fresh pair
    pub fn create_pair(
        &mut self,
        params: &CreateConnectionParams,
        parent_owner: &OwnerId,
        child_owner: &OwnerId,
    ) -> Result<(ConnectionId, ConnectionId), ConnectionError> {
        if params.start_date > params.end_date {
            return Err(ConnectionError::InvalidTimeWindow);
        }

        let reciprocal_id = self.types.reciprocal_of(params.type_id)?;

        let left_id = ConnectionId::from(self.connections.len() as u64);
        let right_id = ConnectionId::from(self.connections.len() as u64 + 1);
        let is_active = parent_owner == child_owner;

        let left = Connection::new(
            left_id,
            params.parent_token_id,
            params.child_token_id,
            params.type_id,
            params.start_date,
            params.end_date,
            is_active,
            right_id,
        );

        let right = Connection::new(
            right_id,
            params.child_token_id,
            params.parent_token_id,
            reciprocal_id,
            params.start_date,
            params.end_date,
            is_active,
            left_id,
        );

        self.index_pending(&left);
        self.index_pending(&right);

        self.connections.push(left);
        self.connections.push(right);

        Ok((left_id, right_id))
    }

    /// `approve` activates the earliest pending record whose child token and
    /// type match, together with its pair, and returns both ids (matched leg
    /// first)
    ///
    /// When no pending record matches but an active one does, the approval is
    /// rejected with [`ConnectionError::AlreadyActive`]; when nothing matches
    /// at all it fails with [`ConnectionError::NoPendingConnection`]
    pub fn approve(
        &mut self,
        token_id: TokenId,
        type_id: ConnectionTypeId,
    ) -> Result<(ConnectionId, ConnectionId), ConnectionError> {
        let key = (token_id, type_id);
        let matched_id = {
            let popped = self.pending.get_mut(&key).and_then(|queue| queue.pop_front());
            match popped {
                Some(id) => id,
                None => return Err(self.classify_approval_miss(token_id, type_id)),
            }
        };

        if self
            .pending
            .get(&key)
            .map(|queue| queue.is_empty())
            .unwrap_or(false)
        {
            self.pending.remove(&key);
        }

        let pair_id = self.connections[matched_id.value() as usize].get_pair_id();

        self.connections[matched_id.value() as usize].activate();
        self.connections[pair_id.value() as usize].activate();

        Ok((matched_id, pair_id))
    }

    pub fn get_by_id(&self, id: ConnectionId) -> Result<&Connection, ConnectionError> {
        self.connections
            .get(id.value() as usize)
            .ok_or(ConnectionError::UnknownConnection(id))
    }

    pub fn contains_type(&self, id: ConnectionTypeId) -> bool {
        self.types.contains(id)
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    // only the proposal leg carries a pending entry: its pair points forward,
    // the mirrored leg points backward and never awaits consent on its own
    fn index_pending(&mut self, record: &Connection) {
        if record.get_is_active() || record.get_id() > record.get_pair_id() {
            return;
        }

        self.pending
            .entry((record.get_child_token_id(), record.get_type_id()))
            .or_default()
            .push_back(record.get_id());
    }

    fn classify_approval_miss(
        &self,
        token_id: TokenId,
        type_id: ConnectionTypeId,
    ) -> ConnectionError {
        let has_active = self.connections.iter().any(|record| {
            record.get_child_token_id() == token_id
                && record.get_type_id() == type_id
                && record.get_is_active()
        });

        if has_active {
            ConnectionError::AlreadyActive { token_id, type_id }
        } else {
            ConnectionError::NoPendingConnection { token_id, type_id }
        }
    }
}
