use rst_common::standard::serde::{self, Deserialize};

use crate::common::types::{CommonError, ToValidate};

#[derive(Deserialize, Debug, Clone)]
#[serde(crate = "self::serde")]
pub struct App {
    pub(super) host: String,
    pub(super) port: String,
}

impl App {
    pub fn get_app_config(&self) -> (String, String) {
        (self.host.to_owned(), self.port.to_owned())
    }
}

impl Default for App {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: "8080".to_string(),
        }
    }
}

impl ToValidate for App {
    fn validate(&self) -> Result<(), CommonError> {
        if self.host.is_empty() {
            return Err(CommonError::ValidationError(
                "config: app:host is missing".to_string(),
            ));
        }

        if self.port.is_empty() {
            return Err(CommonError::ValidationError(
                "config: app:port is missing".to_string(),
            ));
        }

        Ok(())
    }
}
