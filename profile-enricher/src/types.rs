//! Profile documents, identity triples and enrichment records.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A user's profile document.
///
/// Opaque apart from the two fields enrichment reads: `account` (declared
/// social proof claims) and `apps` (installed applications keyed by their
/// identifier). Everything else is carried through untouched so verifiers see
/// the full document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Profile(Value);

impl Profile {
    pub fn new(document: Value) -> Self {
        Self(document)
    }

    /// The raw profile document.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Declared proof claims. A missing or non-array `account` has no claims.
    pub fn accounts(&self) -> &[Value] {
        self.0
            .get("account")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Service names of the declared claims, skipping claims without a
    /// string `service`.
    pub fn claimed_services(&self) -> impl Iterator<Item = &str> {
        self.accounts()
            .iter()
            .filter_map(|claim| claim.get("service").and_then(Value::as_str))
    }

    /// Number of installed applications.
    pub fn app_count(&self) -> usize {
        self.0
            .get("apps")
            .and_then(Value::as_object)
            .map_or(0, |apps| apps.len())
    }

    /// Installed application identifiers, in document order.
    pub fn app_ids(&self) -> Vec<String> {
        self.0
            .get("apps")
            .and_then(Value::as_object)
            .map(|apps| apps.keys().cloned().collect())
            .unwrap_or_default()
    }
}

impl From<Value> for Profile {
    fn from(document: Value) -> Self {
        Self(document)
    }
}

/// One input unit: a fully-qualified name, its owning address and the
/// profile published for it (absent or `null` when the name has none).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityTriple {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub profile: Option<Profile>,
}

/// Result of enriching one identity triple.
///
/// `valid_proofs <= num_proofs` and `apps == app_list.len()` always hold for
/// records produced by the enricher. Deserialization is lenient so batches
/// written by older tooling still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichmentRecord {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub expired: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub num_proofs: usize,
    #[serde(default, deserialize_with = "null_as_default")]
    pub valid_proofs: usize,
    #[serde(default, deserialize_with = "null_as_default")]
    pub apps: usize,
    #[serde(default, deserialize_with = "null_as_default")]
    pub app_list: Vec<String>,
}

/// Explicit `null` decodes like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Outcome of verifying one declared proof claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofResult {
    pub service: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proof_url: Option<String>,
    pub valid: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_profile_accessors() {
        let profile = Profile::new(json!({
            "account": [
                {"service": "Twitter", "identifier": "bob"},
                {"service": 42},
                {"identifier": "no-service"}
            ],
            "apps": {"https://app1": {}, "http://localhost:3000": {}}
        }));

        assert_eq!(profile.accounts().len(), 3);
        assert_eq!(profile.claimed_services().collect::<Vec<_>>(), vec!["Twitter"]);
        assert_eq!(profile.app_count(), 2);
        assert_eq!(
            profile.app_ids(),
            vec!["https://app1".to_string(), "http://localhost:3000".to_string()]
        );
    }

    #[test]
    fn test_profile_shape_anomalies_default_to_empty() {
        let profile = Profile::new(json!({"account": "nope", "apps": ["a", "b"]}));

        assert!(profile.accounts().is_empty());
        assert_eq!(profile.app_count(), 0);
        assert!(profile.app_ids().is_empty());

        let empty = Profile::default();
        assert!(empty.accounts().is_empty());
        assert!(empty.app_ids().is_empty());
    }

    #[test]
    fn test_app_ids_keep_document_order() {
        let profile: Profile =
            serde_json::from_str(r#"{"apps": {"z.app": {}, "a.app": {}, "m.app": {}}}"#).unwrap();

        assert_eq!(profile.app_ids(), vec!["z.app", "a.app", "m.app"]);
    }

    #[test]
    fn test_triple_profile_null_or_missing() {
        let triples: Vec<IdentityTriple> = serde_json::from_str(
            r#"[
                {"name": "a.id", "address": "1A", "profile": null},
                {"name": "b.id", "address": "1B"}
            ]"#,
        )
        .unwrap();

        assert!(triples.iter().all(|t| t.profile.is_none()));
    }

    #[test]
    fn test_record_field_names() {
        let record = EnrichmentRecord {
            name: "bob.id".to_string(),
            address: "1Addr".to_string(),
            expired: true,
            num_proofs: 1,
            valid_proofs: 1,
            apps: 1,
            app_list: vec!["https://app1".to_string()],
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "bob.id",
                "address": "1Addr",
                "expired": true,
                "numProofs": 1,
                "validProofs": 1,
                "apps": 1,
                "appList": ["https://app1"]
            })
        );
    }

    #[test]
    fn test_record_lenient_deserialize() {
        let record: EnrichmentRecord =
            serde_json::from_str(r#"{"name": "old.id", "appList": null}"#).unwrap();

        assert_eq!(record.name, "old.id");
        assert!(record.app_list.is_empty());
        assert_eq!(record.num_proofs, 0);
        assert!(!record.expired);
    }

    #[test]
    fn test_record_null_fields_default() {
        let record: EnrichmentRecord = serde_json::from_str(
            r#"{"name": "x.id", "address": null, "expired": null, "numProofs": null,
                "validProofs": null, "apps": null, "appList": null}"#,
        )
        .unwrap();

        assert_eq!(
            record,
            EnrichmentRecord {
                name: "x.id".to_string(),
                address: String::new(),
                expired: false,
                num_proofs: 0,
                valid_proofs: 0,
                apps: 0,
                app_list: Vec::new(),
            }
        );
    }
}
