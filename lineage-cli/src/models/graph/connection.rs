use cli_table::Table;

use rstdev_domain::entity::ToJSON;

use lineage_core::graph::connection::types::ConnectionEntityAccessor;
use lineage_core::graph::connection::Connection as CoreConnection;

use super::super::types::{AgentName, Key, KeyIdentifier, Model, ModelError, Value, ValueBuilder};

/// `ConnectionModel` is the locally cached copy of a fetched connection
/// record, keyed by the agent it was fetched from
pub struct ConnectionModel {
    record: CoreConnection,
}

impl ConnectionModel {
    pub fn new(record: CoreConnection) -> Self {
        Self { record }
    }

    pub fn record(&self) -> &CoreConnection {
        &self.record
    }
}

impl KeyIdentifier for ConnectionModel {
    fn key_name(&self, agent: AgentName) -> Key {
        Key::from(format!("{}:connection:{}", agent, self.record.get_id()))
    }
}

impl ValueBuilder for ConnectionModel {
    fn build_value(&self) -> Result<Value, ModelError> {
        let json = self
            .record
            .to_json()
            .map_err(|err| ModelError::BuildValueError(err.to_string()))?;

        Ok(Value::from(json))
    }
}

impl Model for ConnectionModel {}

/// `ConnectionRow` renders a connection record as a table row
#[derive(Table, Clone)]
pub struct ConnectionRow {
    #[table(title = "ID")]
    id: u64,

    #[table(title = "Parent Token")]
    parent_token_id: u64,

    #[table(title = "Child Token")]
    child_token_id: u64,

    #[table(title = "Type")]
    type_id: u64,

    #[table(title = "Active")]
    is_active: bool,

    #[table(title = "Pair ID")]
    pair_id: u64,

    #[table(title = "Start Date")]
    start_date: String,

    #[table(title = "End Date")]
    end_date: String,
}

impl From<&CoreConnection> for ConnectionRow {
    fn from(record: &CoreConnection) -> Self {
        Self {
            id: record.get_id().value(),
            parent_token_id: record.get_parent_token_id().value(),
            child_token_id: record.get_child_token_id().value(),
            type_id: record.get_type_id().value(),
            is_active: record.get_is_active(),
            pair_id: record.get_pair_id().value(),
            start_date: record.get_start_date().to_rfc3339(),
            end_date: record.get_end_date().to_rfc3339(),
        }
    }
}
