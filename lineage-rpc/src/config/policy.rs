use rst_common::standard::serde::{self, Deserialize};

use crate::common::types::{CommonError, ToValidate};

/// `Policy` configures the registry's authorization predicate: the operator
/// identities allowed to manage connection types and create edges, and
/// whether the owner of a parent token may create edges for their own token
/// without an operator grant.
#[derive(Deserialize, Debug, Clone)]
#[serde(crate = "self::serde")]
pub struct Policy {
    pub(super) operators: Vec<String>,
    pub(super) allow_parent_owner: bool,
}

impl Policy {
    pub fn get_operators(&self) -> Vec<String> {
        self.operators.to_owned()
    }

    pub fn get_allow_parent_owner(&self) -> bool {
        self.allow_parent_owner
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            operators: Vec::new(),
            allow_parent_owner: true,
        }
    }
}

impl ToValidate for Policy {
    fn validate(&self) -> Result<(), CommonError> {
        if self.operators.is_empty() {
            return Err(CommonError::ValidationError(
                "config: policy:operators is missing".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::helpers;

    #[test]
    fn test_validation_failed() {
        let policy = Policy::default();
        let validation = helpers::validate(policy);
        assert!(validation.is_err());
        assert!(validation
            .unwrap_err()
            .to_string()
            .contains("policy:operators"))
    }
}
