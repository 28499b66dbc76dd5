//! Claims carried by a capability token

use capstore_core::Operation;
use serde::{Deserialize, Serialize};

/// Claims of a capability token.
///
/// Field names follow the wire format: `resourceType`, `operation`, `name`
/// plus the registered `iss`, `iat`, `nbf` and `exp` claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "resourceType")]
    pub resource_type: String,
    pub operation: Operation,
    pub name: String,
    pub iss: String,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
}

impl Claims {
    /// Whether the token is inside its validity window at `now`.
    ///
    /// The window is `nbf <= now < exp`; the expiry instant itself is
    /// already invalid.
    pub fn is_valid_at(&self, now: i64) -> bool {
        self.nbf <= now && now < self.exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims() -> Claims {
        Claims {
            resource_type: "object".to_string(),
            operation: Operation::Create,
            name: "x".to_string(),
            iss: "http://localhost:3000".to_string(),
            iat: 1000,
            nbf: 1000,
            exp: 1300,
        }
    }

    #[test]
    fn test_wire_field_names() {
        let value = serde_json::to_value(claims()).unwrap();
        assert_eq!(value["resourceType"], "object");
        assert_eq!(value["operation"], "create");
        assert_eq!(value["iss"], "http://localhost:3000");
        assert_eq!(value["exp"], 1300);
    }

    #[test]
    fn test_validity_window_bounds() {
        let claims = claims();
        assert!(!claims.is_valid_at(999));
        assert!(claims.is_valid_at(1000));
        assert!(claims.is_valid_at(1299));
        assert!(!claims.is_valid_at(1300));
    }
}
