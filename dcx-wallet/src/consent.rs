use serde::{Deserialize, Serialize};

use dcx_api::{ConnectorError, ConnectorResult, SessionMethod};

/// Stand-in for the interactive consent UI a real wallet extension runs.
/// The reference wallet resolves every prompt instantly from this policy,
/// which is what lets `UserRejected` paths run headless under test.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "policy", content = "methods", rename_all = "camelCase")]
pub enum ConsentPolicy {
    #[default]
    AllowAll,
    DenyAll,
    /// Allow everything except the listed methods.
    DenyMethods(Vec<SessionMethod>),
}

impl ConsentPolicy {
    pub fn allows_connect(&self) -> bool {
        !matches!(self, ConsentPolicy::DenyAll)
    }

    pub fn allows(&self, method: SessionMethod) -> bool {
        match self {
            ConsentPolicy::AllowAll => true,
            ConsentPolicy::DenyAll => false,
            ConsentPolicy::DenyMethods(denied) => !denied.contains(&method),
        }
    }

    pub fn ensure_allowed(&self, method: SessionMethod) -> ConnectorResult<()> {
        dcx_api::dcx_ensure!(self.allows(method), ConnectorError::UserRejected);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_allows_everything() {
        let policy = ConsentPolicy::default();
        assert!(policy.allows_connect());
        assert!(policy.allows(SessionMethod::SignData));
    }

    #[test]
    fn test_deny_list_is_selective() {
        let policy = ConsentPolicy::DenyMethods(vec![SessionMethod::SignData]);
        assert!(policy.allows_connect());
        assert!(!policy.allows(SessionMethod::SignData));
        assert!(policy.allows(SessionMethod::MakeTransfer));
        assert_eq!(
            policy.ensure_allowed(SessionMethod::SignData),
            Err(ConnectorError::UserRejected)
        );
    }

    #[test]
    fn test_policy_wire_shape() {
        let json = serde_json::to_string(&ConsentPolicy::AllowAll).unwrap();
        assert_eq!(json, r#"{"policy":"allowAll"}"#);

        let policy = ConsentPolicy::DenyMethods(vec![SessionMethod::GetTxHistory]);
        let json = serde_json::to_string(&policy).unwrap();
        assert_eq!(
            json,
            r#"{"policy":"denyMethods","methods":["getTxHistory"]}"#
        );
    }
}
