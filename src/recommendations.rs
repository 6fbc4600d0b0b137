//! Dashboard: region form, `/recommendations` wire types and request flow.

use crate::api::{ApiClient, ApiResult, Validate, Verbatim};
use crate::i18n::{self, Language};
use crate::notification::{Notification, Notifications};
use crate::request_flow::{Dispatch, FlowState, RequestFlow};
use anyhow::bail;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// Karnataka districts offered by the district selector.
pub const DISTRICTS: [&str; 29] = [
    "Bagalkot",
    "Bangalore Rural",
    "Bangalore Urban",
    "Belgaum",
    "Bellary",
    "Bidar",
    "Chamarajanagar",
    "Chikkaballapur",
    "Chikkamagaluru",
    "Chitradurga",
    "Dakshina Kannada",
    "Davanagere",
    "Dharwad",
    "Gadag",
    "Gulbarga",
    "Hassan",
    "Haveri",
    "Kodagu",
    "Kolar",
    "Koppal",
    "Mandya",
    "Mysore",
    "Raichur",
    "Ramanagara",
    "Shimoga",
    "Tumkur",
    "Udupi",
    "Uttara Kannada",
    "Yadgir",
];

/// Values offered by the season selector.
pub const SEASONS: [&str; 3] = ["kharif", "rabi", "summer"];

// ==================== Form ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    District,
    Season,
    Rainfall,
    Fertilizer,
    Pesticide,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::District,
        FormField::Season,
        FormField::Rainfall,
        FormField::Fertilizer,
        FormField::Pesticide,
    ];

    /// Wire name of the field.
    pub fn name(&self) -> &'static str {
        match self {
            FormField::District => "district",
            FormField::Season => "season",
            FormField::Rainfall => "rainfall",
            FormField::Fertilizer => "fertilizer",
            FormField::Pesticide => "pesticide",
        }
    }

    /// Dictionary key of the field's label.
    pub fn label_key(&self) -> &'static str {
        match self {
            FormField::District => "field_district",
            FormField::Season => "field_season",
            FormField::Rainfall => "field_rainfall",
            FormField::Fertilizer => "field_fertilizer",
            FormField::Pesticide => "field_pesticide",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FormField {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match FormField::ALL.iter().find(|field| field.name() == s) {
            Some(field) => Ok(*field),
            None => bail!("Unknown field '{}'", s),
        }
    }
}

/// Region parameters as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionForm {
    pub district: String,
    pub season: String,
    pub rainfall: String,
    pub fertilizer: String,
    pub pesticide: String,
}

impl RegionForm {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::District => &self.district,
            FormField::Season => &self.season,
            FormField::Rainfall => &self.rainfall,
            FormField::Fertilizer => &self.fertilizer,
            FormField::Pesticide => &self.pesticide,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::District => &mut self.district,
            FormField::Season => &mut self.season,
            FormField::Rainfall => &mut self.rainfall,
            FormField::Fertilizer => &mut self.fertilizer,
            FormField::Pesticide => &mut self.pesticide,
        };
        *slot = value.into();
    }

    /// Fields that are empty after trimming.
    pub fn missing_fields(&self) -> Vec<FormField> {
        FormField::ALL
            .into_iter()
            .filter(|field| self.get(*field).trim().is_empty())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Immutable request payload, or `None` while any field is empty.
    ///
    /// Values are sent exactly as typed.
    pub fn snapshot(&self, language: Language) -> Option<RecommendationRequest> {
        if !self.is_complete() {
            return None;
        }

        Some(RecommendationRequest {
            district: self.district.clone(),
            season: self.season.clone(),
            rainfall: self.rainfall.clone(),
            fertilizer: self.fertilizer.clone(),
            pesticide: self.pesticide.clone(),
            language,
        })
    }
}

// ==================== Wire Types ====================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationRequest {
    pub district: String,
    pub season: String,
    pub rainfall: String,
    pub fertilizer: String,
    pub pesticide: String,
    pub language: Language,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub crop_diversity: f64,
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub soil_health: f64,
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub resilience: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarPoint {
    pub category: String,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CropCategory {
    #[default]
    Crop,
    Vegetable,
    Fruit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub name: String,
    #[serde(default)]
    pub category: CropCategory,
    pub confidence: f64,
    #[serde(rename = "yield")]
    pub expected_yield: String,
    pub profit: String,
    pub benefit: f64,
}

/// Typed view of a `/recommendations` body, used for validation and
/// rendering. The dashboard keeps the body itself next to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResult {
    pub metrics: Metrics,
    pub radar_data: Vec<RadarPoint>,
    pub recommendations: Vec<Recommendation>,
}

/// The model behind the service sometimes quotes its metric values.
fn number_or_numeric_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("expected a number, got '{}'", s))),
    }
}

fn check_percentage(what: &str, value: f64) -> Result<(), String> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(format!("{} {} is outside 0..=100", what, value));
    }
    Ok(())
}

impl Validate for RecommendationResult {
    fn validate(&self) -> Result<(), String> {
        let metrics = [
            ("cropDiversity", self.metrics.crop_diversity),
            ("soilHealth", self.metrics.soil_health),
            ("resilience", self.metrics.resilience),
        ];
        for (name, value) in metrics {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("metric {} is {}", name, value));
            }
        }

        for point in &self.radar_data {
            if point.category.trim().is_empty() {
                return Err("radar point without a category".to_string());
            }
            if !point.value.is_finite() {
                return Err(format!("radar value for {} is {}", point.category, point.value));
            }
        }

        for rec in &self.recommendations {
            if rec.name.trim().is_empty() {
                return Err("recommendation without a name".to_string());
            }
            check_percentage(&format!("confidence of {}", rec.name), rec.confidence)?;
            check_percentage(&format!("benefit of {}", rec.name), rec.benefit)?;
        }

        Ok(())
    }
}

/// POST the snapshot to `/recommendations`.
///
/// The body is validated through `RecommendationResult` and returned as
/// received.
pub async fn fetch_recommendations(
    client: &ApiClient,
    request: RecommendationRequest,
) -> ApiResult<Verbatim<RecommendationResult>> {
    client.post_json_verbatim("/recommendations", &request).await
}

// ==================== Dashboard ====================

/// Form plus the recommendation request flow.
///
/// Dropping the dashboard cancels its in-flight request.
pub struct Dashboard {
    client: ApiClient,
    form: Mutex<RegionForm>,
    flow: RequestFlow<Verbatim<RecommendationResult>>,
    notifications: Notifications,
}

impl Dashboard {
    pub fn new(client: ApiClient, notifications: Notifications) -> Self {
        Self {
            client,
            form: Mutex::new(RegionForm::default()),
            flow: RequestFlow::new("recommendations"),
            notifications,
        }
    }

    pub fn set_field(&self, field: FormField, value: impl Into<String>) {
        self.form
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .set(field, value);
    }

    pub fn form(&self) -> RegionForm {
        self.form
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether the submit trigger is enabled.
    pub fn can_submit(&self) -> bool {
        self.form().is_complete() && !self.flow.is_in_flight()
    }

    pub fn is_submitting(&self) -> bool {
        self.flow.is_in_flight()
    }

    pub fn state(&self) -> FlowState<Verbatim<RecommendationResult>> {
        self.flow.state()
    }

    /// The last successful response: its body unchanged, typed via `Deref`.
    pub fn result(&self) -> Option<Verbatim<RecommendationResult>> {
        self.flow.result()
    }

    /// Label of the submit trigger in `language`.
    pub fn submit_label(&self, language: Language) -> &'static str {
        if self.is_submitting() {
            i18n::lookup(language, "running_analysis")
        } else {
            i18n::lookup(language, "run_analysis")
        }
    }

    /// Submit the current form with `language`.
    ///
    /// Skipped while a field is empty or a request is in flight. Success and
    /// failure each queue one notification.
    pub async fn submit(&self, language: Language) -> Dispatch<Verbatim<RecommendationResult>> {
        let Some(request) = self.form().snapshot(language) else {
            debug!("recommendations: form incomplete, not submitting");
            return Dispatch::Skipped;
        };

        let dispatch = self
            .flow
            .run(fetch_recommendations(&self.client, request))
            .await;

        match &dispatch {
            Dispatch::Succeeded(_) => self.notifications.push(Notification::success(
                i18n::lookup(language, "analysis_complete_title"),
                i18n::lookup(language, "analysis_complete_description"),
            )),
            Dispatch::Failed(_) => self.notifications.push(Notification::failure(
                i18n::lookup(language, "analysis_failed_title"),
                i18n::lookup(language, "analysis_failed_description"),
            )),
            Dispatch::Skipped | Dispatch::Cancelled => {}
        }

        dispatch
    }

    /// Abort the in-flight request, if any.
    pub fn cancel(&self) {
        self.flow.cancel();
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        self.flow.cancel();
    }
}
