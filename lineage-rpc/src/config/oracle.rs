use rst_common::standard::serde::{self, Deserialize};

use crate::common::types::{CommonError, ToValidate};

/// `Oracle` points at the token-registry agent answering ownership queries.
/// The address is the full RPC endpoint of that agent.
#[derive(Deserialize, Debug, Clone)]
#[serde(crate = "self::serde")]
pub struct Oracle {
    pub(super) addr: String,
}

impl Oracle {
    pub fn get_addr(&self) -> String {
        self.addr.to_owned()
    }
}

impl Default for Oracle {
    fn default() -> Self {
        Self {
            addr: "".to_string(),
        }
    }
}

impl ToValidate for Oracle {
    fn validate(&self) -> Result<(), CommonError> {
        if self.addr.is_empty() {
            return Err(CommonError::ValidationError(
                "config: oracle:addr is missing".to_string(),
            ));
        }

        Ok(())
    }
}
