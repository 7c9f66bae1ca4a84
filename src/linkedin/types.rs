// src/linkedin/types.rs
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::utils::urn_id;

pub(crate) const JOB_CARDS_ENDPOINT: &str = "/voyagerJobsDashJobCards";
pub(crate) const ONSITE_APPLY_ENDPOINT: &str = "/voyagerJobsDashOnsiteApplyApplication";

pub(crate) const JOB_SEARCH_DECORATION_ID: &str =
    "com.linkedin.voyager.dash.deco.jobs.search.JobSearchCardsCollection-174";
pub(crate) const ONSITE_APPLY_DECORATION_ID: &str =
    "com.linkedin.voyager.dash.deco.jobs.OnsiteApplyApplication-67";

pub(crate) const NORMALIZED_JSON: &str = "application/vnd.linkedin.normalized+json+2.1";
pub(crate) const JOB_POSTING_TYPE: &str = "com.linkedin.voyager.dash.jobs.JobPosting";

/// A job posting from the search results, with every field LinkedIn returned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobResult {
    pub job_id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl JobResult {
    /// Keep `element` only when it is a job posting. The id comes from `trackingUrn`,
    /// falling back to `entityUrn`.
    pub(crate) fn from_element(element: Value) -> Option<Self> {
        let Value::Object(fields) = element else {
            return None;
        };

        if fields.get("$type").and_then(Value::as_str) != Some(JOB_POSTING_TYPE) {
            return None;
        }

        let Some(job_id) = ["trackingUrn", "entityUrn"]
            .iter()
            .find_map(|key| fields.get(*key).and_then(Value::as_str))
            .map(|urn| urn_id(urn).to_string())
        else {
            debug!("Dropping job posting without trackingUrn or entityUrn");
            return None;
        };

        Some(Self { job_id, fields })
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn title(&self) -> Option<&str> {
        self.get("title").and_then(Value::as_str)
    }
}

/// One field of an easy-apply form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    pub title: String,
    pub urn: String,
    #[serde(rename = "formComponentType")]
    pub component_type: String,
    #[serde(
        rename = "selectableOptions",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub selectable_options: Option<Vec<String>>,
}

impl FormField {
    pub(crate) fn from_element(item: &Value) -> Option<Self> {
        let component = item.get("formComponent")?.as_object()?;
        let (component_type, details) = component.iter().next()?;

        let urn = item
            .get("urn")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let title = item
            .get("title")
            .and_then(|title| title.get("text"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| urn.clone());

        // Two layouts exist upstream; the flat one wins when both are present
        let selectable_options =
            Self::flat_options(details).or_else(|| Self::nested_options(details));

        Some(Self {
            title,
            urn,
            component_type: component_type.clone(),
            selectable_options,
        })
    }

    // textSelectableOptions[].optionText.text
    fn flat_options(details: &Value) -> Option<Vec<String>> {
        let options = details.get("textSelectableOptions")?.as_array()?;
        Some(
            options
                .iter()
                .filter_map(|option| option.pointer("/optionText/text"))
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
        )
    }

    // selectableOptions[].textSelectableOption.optionText.text
    fn nested_options(details: &Value) -> Option<Vec<String>> {
        let options = details.get("selectableOptions")?.as_array()?;
        Some(
            options
                .iter()
                .filter_map(|option| option.pointer("/textSelectableOption/optionText/text"))
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
        )
    }
}
