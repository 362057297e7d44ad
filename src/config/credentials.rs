//! Infisical machine-identity credentials.

use zeroize::Zeroizing;

use crate::errors::{EnvSyncError, Result};

/// Universal-auth credentials plus the project they unlock.
///
/// The client secret is wiped from memory on drop.
pub struct Credentials {
    pub client_id: String,
    pub client_secret: Zeroizing<String>,
    pub project_id: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("project_id", &self.project_id)
            .finish()
    }
}

impl Credentials {
    /// Assemble credentials, failing with `ConfigMissing` naming every
    /// absent value. Empty strings count as absent.
    pub fn resolve(
        client_id: Option<String>,
        client_secret: Option<Zeroizing<String>>,
        project_id: Option<String>,
    ) -> Result<Self> {
        let client_id = client_id.filter(|v| !v.is_empty());
        let client_secret = client_secret.filter(|v| !v.is_empty());
        let project_id = project_id.filter(|v| !v.is_empty());

        match (client_id, client_secret, project_id) {
            (Some(client_id), Some(client_secret), Some(project_id)) => Ok(Self {
                client_id,
                client_secret,
                project_id,
            }),
            (id, secret, project) => {
                let missing: Vec<&str> = [
                    (id.is_none(), "INFISICAL_CLIENT_ID (--client-id)"),
                    (secret.is_none(), "INFISICAL_CLIENT_SECRET (--client-secret)"),
                    (project.is_none(), "INFISICAL_PROJECT_ID (--project-id)"),
                ]
                .into_iter()
                .filter_map(|(absent, name)| absent.then_some(name))
                .collect();

                Err(EnvSyncError::ConfigMissing(missing.join(", ")))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(s: &str) -> Option<Zeroizing<String>> {
        Some(Zeroizing::new(s.to_string()))
    }

    #[test]
    fn resolves_when_all_present() {
        let creds =
            Credentials::resolve(Some("id".into()), secret("shh"), Some("proj".into())).unwrap();
        assert_eq!(creds.client_id, "id");
        assert_eq!(creds.client_secret.as_str(), "shh");
        assert_eq!(creds.project_id, "proj");
    }

    #[test]
    fn names_every_missing_value() {
        let err = Credentials::resolve(None, None, Some("proj".into())).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("INFISICAL_CLIENT_ID"), "{msg}");
        assert!(msg.contains("INFISICAL_CLIENT_SECRET"), "{msg}");
        assert!(!msg.contains("INFISICAL_PROJECT_ID"), "{msg}");
    }

    #[test]
    fn empty_values_count_as_missing() {
        let err =
            Credentials::resolve(Some(String::new()), secret("shh"), Some("proj".into()))
                .unwrap_err();
        assert!(matches!(err, EnvSyncError::ConfigMissing(_)));
    }

    #[test]
    fn debug_redacts_secret() {
        let creds =
            Credentials::resolve(Some("id".into()), secret("hunter2"), Some("proj".into()))
                .unwrap();
        let shown = format!("{creds:?}");
        assert!(!shown.contains("hunter2"));
        assert!(shown.contains("<redacted>"));
    }
}
