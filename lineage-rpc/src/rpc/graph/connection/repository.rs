use std::convert::TryInto;

use rst_common::standard::async_trait::async_trait;
use rst_common::standard::serde_json;

use rstdev_storage::engine::rocksdb::executor::Executor;
use rstdev_storage::engine::rocksdb::types::{
    Instruction as DbInstruction, OutputOpts as DbOutput,
};

use lineage_core::graph::connection::types::{
    ConnectionEntityAccessor, ConnectionError, ConnectionId, ConnectionTypeId, RepoBuilder,
};
use lineage_core::graph::connection::{Connection, ConnectionType};

const CONNECTION_KEY: &str = "graph_connection";
const CONNECTION_SEQ_KEY: &str = "graph_connection_seq";
const CONNECTION_TYPE_KEY: &str = "graph_connection_type";
const CONNECTION_TYPE_IDS_KEY: &str = "graph_connection_type_ids";

/// `Repository` journals the connection arena into RocksDB
///
/// Records live under `graph_connection:{id}`. The `graph_connection_seq`
/// watermark is written after the records of a pair and marks how many
/// sequential records are valid: a crash between the record writes and the
/// watermark leaves the torn pair invisible to hydration. The watermark only
/// moves forward, so rewriting an existing pair (activation) never shrinks
/// the visible arena
#[derive(Clone)]
pub struct Repository {
    db: Executor,
}

impl Repository {
    pub fn new(db: Executor) -> Self {
        Self { db }
    }

    fn build_connection_key(&self, id: ConnectionId) -> String {
        format!("{}:{}", CONNECTION_KEY, id)
    }

    fn build_type_key(&self, id: ConnectionTypeId) -> String {
        format!("{}:{}", CONNECTION_TYPE_KEY, id)
    }

    async fn get_bytes(&self, key: String) -> Result<Option<Vec<u8>>, ConnectionError> {
        let output = self
            .db
            .exec(DbInstruction::GetCf { key })
            .await
            .map_err(|err| ConnectionError::StorageError(err.to_string()))?;

        match output {
            DbOutput::SingleByte { value } => Ok(value),
            _ => Err(ConnectionError::StorageError(
                "unknown output type".to_string(),
            )),
        }
    }

    async fn save_bytes(&self, key: String, value: Vec<u8>) -> Result<(), ConnectionError> {
        let _ = self
            .db
            .exec(DbInstruction::SaveCf { key, value })
            .await
            .map_err(|err| ConnectionError::StorageError(err.to_string()))?;

        Ok(())
    }

    async fn get_watermark(&self) -> Result<u64, ConnectionError> {
        let value = self.get_bytes(CONNECTION_SEQ_KEY.to_string()).await?;
        match value {
            Some(bytes) => {
                let seq_str = String::from_utf8(bytes)
                    .map_err(|err| ConnectionError::StorageError(err.to_string()))?;

                seq_str
                    .parse::<u64>()
                    .map_err(|err| ConnectionError::StorageError(err.to_string()))
            }
            None => Ok(0),
        }
    }

    async fn save_watermark(&self, value: u64) -> Result<(), ConnectionError> {
        self.save_bytes(
            CONNECTION_SEQ_KEY.to_string(),
            value.to_string().into_bytes(),
        )
        .await
    }

    async fn get_type_ids(&self) -> Result<Vec<u64>, ConnectionError> {
        let value = self.get_bytes(CONNECTION_TYPE_IDS_KEY.to_string()).await?;
        match value {
            Some(bytes) => serde_json::from_slice(&bytes)
                .map_err(|err| ConnectionError::StorageError(err.to_string())),
            None => Ok(Vec::new()),
        }
    }
}

#[async_trait]
impl RepoBuilder for Repository {
    type EntityAccessor = Connection;

    async fn save_type(&self, conn_type: &ConnectionType) -> Result<(), ConnectionError> {
        let type_bytes: Vec<u8> = conn_type.to_owned().try_into().map_err(|_| {
            ConnectionError::StorageError("unable to convert connection type to bytes".to_string())
        })?;

        let _ = self
            .save_bytes(self.build_type_key(conn_type.get_id()), type_bytes)
            .await?;

        let mut ids = self.get_type_ids().await?;
        if !ids.contains(&conn_type.get_id().value()) {
            ids.push(conn_type.get_id().value());

            let ids_bytes = serde_json::to_vec(&ids)
                .map_err(|err| ConnectionError::StorageError(err.to_string()))?;

            let _ = self
                .save_bytes(CONNECTION_TYPE_IDS_KEY.to_string(), ids_bytes)
                .await?;
        }

        Ok(())
    }

    async fn save_pair(
        &self,
        left: &Connection,
        right: &Connection,
    ) -> Result<(), ConnectionError> {
        let left_bytes: Vec<u8> = left.to_owned().try_into().map_err(|_| {
            ConnectionError::StorageError("unable to convert connection to bytes".to_string())
        })?;

        let right_bytes: Vec<u8> = right.to_owned().try_into().map_err(|_| {
            ConnectionError::StorageError("unable to convert connection to bytes".to_string())
        })?;

        let _ = self
            .save_bytes(self.build_connection_key(left.get_id()), left_bytes)
            .await?;

        let _ = self
            .save_bytes(self.build_connection_key(right.get_id()), right_bytes)
            .await?;

        let current = self.get_watermark().await?;
        let next = left.get_id().value().max(right.get_id().value()) + 1;
        if next > current {
            let _ = self.save_watermark(next).await?;
        }

        Ok(())
    }

    async fn list_types(&self) -> Result<Vec<ConnectionType>, ConnectionError> {
        let ids = self.get_type_ids().await?;

        let mut types = Vec::with_capacity(ids.len());
        for id in ids {
            let key = self.build_type_key(ConnectionTypeId::from(id));
            let bytes = self.get_bytes(key).await?.ok_or(ConnectionError::StorageError(
                format!("connection type {} was missing", id),
            ))?;

            types.push(ConnectionType::try_from(bytes)?);
        }

        Ok(types)
    }

    async fn list_connections(&self) -> Result<Vec<Connection>, ConnectionError> {
        let watermark = self.get_watermark().await?;
        if watermark == 0 {
            return Ok(Vec::new());
        }

        let keys = (0..watermark)
            .map(|id| self.build_connection_key(ConnectionId::from(id)))
            .collect::<Vec<String>>();

        let output = self
            .db
            .exec(DbInstruction::MultiGetCf { keys })
            .await
            .map_err(|err| ConnectionError::StorageError(err.to_string()))?;

        let values = match output {
            DbOutput::MultiBytes { values } => values,
            _ => {
                return Err(ConnectionError::StorageError(
                    "unknown output type".to_string(),
                ))
            }
        };

        let mut connections = Vec::with_capacity(values.len());
        for (index, value) in values.into_iter().enumerate() {
            let bytes = value
                .map_err(|err| ConnectionError::StorageError(err.to_string()))?
                .ok_or(ConnectionError::StorageError(format!(
                    "connection {} was missing",
                    index
                )))?;

            connections.push(Connection::try_from(bytes)?);
        }

        Ok(connections)
    }
}
