use rst_common::standard::serde::{self, Deserialize};

use crate::common::types::{CommonError, ToValidate};

use super::{App, Database, Oracle, Policy};

#[derive(Deserialize, Debug, Clone)]
#[serde(crate = "self::serde")]
pub struct Config {
    pub(super) database: Database,
    pub(super) app: App,
    pub(super) oracle: Oracle,
    pub(super) policy: Policy,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn db(&self) -> &Database {
        &self.database
    }

    pub fn oracle(&self) -> &Oracle {
        &self.oracle
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Database::default(),
            app: App::default(),
            oracle: Oracle::default(),
            policy: Policy::default(),
        }
    }
}

impl ToValidate for Config {
    fn validate(&self) -> Result<(), CommonError> {
        _ = self.app.validate()?;
        _ = self.database.validate()?;
        _ = self.oracle.validate()?;
        _ = self.policy.validate()?;

        Ok(())
    }
}
