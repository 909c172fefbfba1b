//! data.gov.il datastore client.
//!
//! A thin fan-out over the open government vehicle datasets: one
//! `datastore_search` request per dataset, fields copied into a single
//! report. No state, no retries; callers decide what a missing dataset
//! means.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, warn};

use rechev_core::error::LookupError;

const BASE_URL: &str = "https://data.gov.il/api/3/action/datastore_search";

// Dataset resource IDs on data.gov.il.
const VEHICLE_REGISTRATION: &str = "053cea08-09bc-40ec-8f7a-156f0677aff3";
const WLTP_SPECS: &str = "142afde2-6228-49f9-8a29-9b6c3a0cbe40";
const STRUCTURAL_CHANGES: &str = "56063a99-8a3e-4ff4-912e-5966c0279bad";
const OWNERSHIP_HISTORY: &str = "bb2355dc-9ec7-4f06-9c3f-3344672171da";
const INACTIVE_VEHICLES: &str = "f6efe89a-fb3d-43a4-bb61-9bf12a9b9099";
const SCRAPPED_VEHICLES: &str = "851ecab1-0622-4dbe-a6c7-f950cf82abf9";
const RECALLS: &str = "36bf1404-0be4-49d2-82dc-2f1ead4a8b93";

#[derive(Debug, Deserialize)]
struct DatastoreResponse {
    success: bool,
    #[serde(default)]
    result: DatastoreResult,
}

#[derive(Debug, Default, Deserialize)]
struct DatastoreResult {
    #[serde(default)]
    records: Vec<Value>,
}

/// One ownership change, oldest first.
#[derive(Debug, Clone, Serialize)]
pub struct OwnershipEntry {
    /// Hand number (1 = first owner).
    pub yad: usize,
    /// Ownership type (private, company, rental...).
    pub sug_baalut: Option<String>,
    /// Change date as MM/YYYY.
    pub taarich: Option<String>,
}

/// A recall record, keys lowercased from the dataset's uppercase schema.
#[derive(Debug, Clone, Serialize)]
pub struct Recall {
    pub recall_id: Option<Value>,
    pub sug_recall: Option<Value>,
    pub sug_takala: Option<Value>,
    pub teur_takala: Option<Value>,
    pub taarich_pticha: Option<Value>,
}

/// Aggregated government data for one plate.
#[derive(Debug, Serialize)]
pub struct VehicleReport {
    pub plate: String,
    /// The registration record as returned by the datastore.
    pub registration: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wltp_specs: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structural_changes: Option<Value>,
    pub ownership_count: usize,
    pub ownership_history: Vec<OwnershipEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_ownership_change: Option<String>,
    pub inactive: bool,
    /// The license validity date (`tokef_dt`) has passed.
    pub service_overdue: bool,
    pub scrapped: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scrapped_date: Option<String>,
    pub recalls: Vec<Recall>,
}

/// Client for the data.gov.il vehicle datasets.
pub struct GovilClient {
    client: reqwest::Client,
    base_url: String,
}

impl GovilClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: BASE_URL.to_string(),
        }
    }

    async fn search(
        &self,
        resource_id: &str,
        filters: &Value,
        extra: &[(&str, &str)],
    ) -> Result<Vec<Value>, LookupError> {
        let filters = filters.to_string();
        let mut query = vec![("resource_id", resource_id), ("filters", filters.as_str())];
        query.extend_from_slice(extra);

        let response = self
            .client
            .get(&self.base_url)
            .query(&query)
            .send()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        let body: DatastoreResponse = response
            .json()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        if !body.success {
            return Err(LookupError::Unsuccessful(resource_id.to_string()));
        }

        debug!(resource_id, records = body.result.records.len(), "datastore query");
        Ok(body.result.records)
    }

    /// Query every dataset for `plate` and aggregate the results.
    ///
    /// Only the registration record is required; any other dataset that
    /// fails or is empty just leaves its slot unfilled.
    pub async fn vehicle_report(&self, plate: &str) -> Result<VehicleReport, LookupError> {
        let plate: String = plate.chars().filter(|c| c.is_ascii_digit()).collect();
        let plate_filter = json!({ "mispar_rechev": plate });

        let registration = self
            .search(VEHICLE_REGISTRATION, &plate_filter, &[])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| LookupError::NotRegistered(plate.clone()))?;

        // WLTP specs are keyed by manufacturer/model/year, not by plate.
        let wltp_specs = match (
            registration.get("tozeret_cd").cloned(),
            registration.get("degem_cd").cloned(),
        ) {
            (Some(tozeret), Some(degem)) => {
                let filters = json!({
                    "tozeret_cd": tozeret,
                    "degem_cd": degem,
                    "shnat_yitzur": registration.get("shnat_yitzur").cloned().unwrap_or(Value::Null),
                });
                self.first_or_none(WLTP_SPECS, &filters, &[("limit", "1")]).await
            }
            _ => None,
        };

        let structural_changes = self.first_or_none(STRUCTURAL_CHANGES, &plate_filter, &[]).await;

        let ownership_records = self
            .search(OWNERSHIP_HISTORY, &plate_filter, &[("sort", "baalut_dt asc")])
            .await
            .unwrap_or_default();
        let ownership_history: Vec<OwnershipEntry> = ownership_records
            .iter()
            .enumerate()
            .map(|(i, record)| OwnershipEntry {
                yad: i + 1,
                sug_baalut: record
                    .get("baalut")
                    .and_then(|v| v.as_str())
                    .map(str::to_string),
                taarich: record.get("baalut_dt").and_then(format_month_year),
            })
            .collect();
        let last_ownership_change = ownership_history.last().and_then(|e| e.taarich.clone());

        let inactive = self
            .first_or_none(INACTIVE_VEHICLES, &plate_filter, &[("limit", "1")])
            .await
            .is_some();

        let service_overdue = license_overdue(&registration, Utc::now().date_naive());

        let scrapped_record = self
            .first_or_none(SCRAPPED_VEHICLES, &plate_filter, &[("limit", "1")])
            .await;
        let scrapped_date = scrapped_record
            .as_ref()
            .and_then(|r| r.get("bitul_dt"))
            .and_then(|v| v.as_str())
            .map(str::to_string);

        // The recalls dataset uses an uppercase field schema.
        let recalls = self
            .search(RECALLS, &json!({ "MISPAR_RECHEV": plate }), &[])
            .await
            .unwrap_or_default()
            .into_iter()
            .map(|r| Recall {
                recall_id: r.get("RECALL_ID").cloned(),
                sug_recall: r.get("SUG_RECALL").cloned(),
                sug_takala: r.get("SUG_TAKALA").cloned(),
                teur_takala: r.get("TEUR_TAKALA").cloned(),
                taarich_pticha: r.get("TAARICH_PTICHA").cloned(),
            })
            .collect();

        Ok(VehicleReport {
            plate,
            registration,
            wltp_specs,
            structural_changes,
            ownership_count: ownership_history.len(),
            ownership_history,
            last_ownership_change,
            inactive,
            service_overdue,
            scrapped: scrapped_record.is_some(),
            scrapped_date,
            recalls,
        })
    }

    /// First record of a dataset, or `None` when the query fails or the
    /// dataset has nothing for the filter.
    async fn first_or_none(
        &self,
        resource_id: &str,
        filters: &Value,
        extra: &[(&str, &str)],
    ) -> Option<Value> {
        match self.search(resource_id, filters, extra).await {
            Ok(records) => records.into_iter().next(),
            Err(e) => {
                warn!(resource_id, "dataset query failed: {e}");
                None
            }
        }
    }
}

impl Default for GovilClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a datastore timestamp (`YYYY-MM-DD` with an optional time part)
/// down to its date.
fn parse_datastore_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.get(..10)?, "%Y-%m-%d").ok()
}

/// Whether the registration's license validity date is in the past.
fn license_overdue(registration: &Value, today: NaiveDate) -> bool {
    registration
        .get("tokef_dt")
        .and_then(|v| v.as_str())
        .and_then(parse_datastore_date)
        .is_some_and(|date| date < today)
}

/// Render a `baalut_dt` value (YYYYMM... as number or string) as MM/YYYY.
fn format_month_year(value: &Value) -> Option<String> {
    let digits: String = value
        .to_string()
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();
    if digits.len() < 6 {
        return None;
    }
    Some(format!("{}/{}", &digits[4..6], &digits[0..4]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_datastore_date() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        assert_eq!(parse_datastore_date("2025-01-31"), Some(date));
        assert_eq!(parse_datastore_date("2025-01-31T00:00:00"), Some(date));
        assert_eq!(parse_datastore_date("2025"), None);
        assert_eq!(parse_datastore_date("not a date"), None);
    }

    #[test]
    fn test_license_overdue() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let expired = json!({ "tokef_dt": "2025-01-31T00:00:00" });
        let valid = json!({ "tokef_dt": "2026-01-31T00:00:00" });
        let missing = json!({ "mispar_rechev": "1234567" });
        assert!(license_overdue(&expired, today));
        assert!(!license_overdue(&valid, today));
        assert!(!license_overdue(&missing, today));
    }

    #[test]
    fn test_format_month_year() {
        assert_eq!(format_month_year(&json!(20190301)), Some("03/2019".to_string()));
        assert_eq!(format_month_year(&json!("201907")), Some("07/2019".to_string()));
        assert_eq!(format_month_year(&json!("2019-03-01")), Some("03/2019".to_string()));
        assert_eq!(format_month_year(&json!(2019)), None);
        assert_eq!(format_month_year(&Value::Null), None);
    }
}
