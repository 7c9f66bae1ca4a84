// src/linkedin/easy_apply.rs
use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{error, info};

use super::types::{
    FormField, NORMALIZED_JSON, ONSITE_APPLY_DECORATION_ID, ONSITE_APPLY_ENDPOINT,
};
use crate::core::VoyagerApi;
use crate::utils::{
    cookie_header, csrf_token, encode_query, job_posting_urn, set_header, FORM_ENCODE_SET,
};

/// Fetch the easy-apply form of `job_id` and flatten it into its fields.
///
/// Only transport errors and a session without `JSESSIONID` are errors. An already
/// applied job (409), any other non-200 status and an unparsable body all yield an
/// empty list.
pub(crate) async fn get_fields_for_easy_apply<C>(
    client: &C,
    job_id: &str,
) -> Result<Vec<FormField>>
where
    C: VoyagerApi + ?Sized,
{
    let cookies = client.cookies();
    let csrf = csrf_token(&cookies).context("Session has no JSESSIONID cookie")?;

    let mut headers = client.default_headers();
    set_header(&mut headers, "Accept", NORMALIZED_JSON);
    set_header(&mut headers, "csrf-token", csrf);
    set_header(&mut headers, "Cookie", cookie_header(&cookies));
    set_header(&mut headers, "Connection", "keep-alive");

    let params = [
        ("decorationId", ONSITE_APPLY_DECORATION_ID.to_string()),
        ("jobPostingUrn", job_posting_urn(job_id)),
        ("q", "jobPosting".to_string()),
    ];
    let path = format!(
        "{}?{}",
        ONSITE_APPLY_ENDPOINT,
        encode_query(&params, FORM_ENCODE_SET)
    );

    let response = client.fetch(&path, &headers, Some(cookies.as_slice())).await?;

    match response.status {
        200 => {}
        409 => {
            error!(
                "Failed to fetch fields for easy apply job {} because already applied to this job",
                job_id
            );
            return Ok(Vec::new());
        }
        status => {
            error!(
                "Failed to fetch fields for easy apply job {} (status {})",
                job_id, status
            );
            return Ok(Vec::new());
        }
    }

    let data = match response.json() {
        Ok(data) => data,
        Err(e) => {
            error!("Failed to parse easy apply JSON response: {}", e);
            return Ok(Vec::new());
        }
    };

    let fields = flatten_form(&data);
    info!("Job {} has {} easy apply fields", job_id, fields.len());
    Ok(fields)
}

/// Every `included` element with a `formComponent`, in source order
pub(crate) fn flatten_form(data: &Value) -> Vec<FormField> {
    data.get("included")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(FormField::from_element).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::voyager::testing::MockVoyager;
    use serde_json::json;

    fn form_body() -> String {
        json!({
            "data": {"*elements": ["urn:li:fsd_onsiteApplyApplication:1"]},
            "included": [
                {
                    "$type": "com.linkedin.voyager.dash.jobs.OnsiteApplyApplication",
                    "entityUrn": "urn:li:fsd_onsiteApplyApplication:1"
                },
                {
                    "urn": "urn:li:fsu_formElement:email",
                    "title": {"text": "Email address"},
                    "formComponent": {
                        "singleTypeaheadEntityFormComponent": {
                            "selectableOptions": [
                                {"textSelectableOption": {"optionText": {"text": "me@example.com"}}}
                            ]
                        }
                    }
                },
                {
                    "urn": "urn:li:fsu_formElement:years",
                    "title": {"text": "Years of Rust"},
                    "formComponent": {"textEntityListFormComponent": {}}
                }
            ]
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_fields_in_source_order() {
        let client = MockVoyager::always(200, form_body());

        let fields = get_fields_for_easy_apply(&client, "987654").await.unwrap();

        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].title, "Email address");
        assert_eq!(fields[0].component_type, "singleTypeaheadEntityFormComponent");
        assert_eq!(
            fields[0].selectable_options,
            Some(vec!["me@example.com".to_string()])
        );
        assert_eq!(fields[1].urn, "urn:li:fsu_formElement:years");
        assert_eq!(fields[1].selectable_options, None);
    }

    #[tokio::test]
    async fn test_request_shape() {
        let client = MockVoyager::always(200, r#"{"included": []}"#);

        get_fields_for_easy_apply(&client, "987654").await.unwrap();

        let requests = client.requests();
        let request = &requests[0];
        assert_eq!(
            request.path,
            "/voyagerJobsDashOnsiteApplyApplication?decorationId=com.linkedin.voyager.dash.deco.jobs.OnsiteApplyApplication-67&jobPostingUrn=urn%3Ali%3Afsd_jobPosting%3A987654&q=jobPosting"
        );
        assert_eq!(request.header("accept"), Some(NORMALIZED_JSON));
        assert_eq!(request.header("csrf-token"), Some("ajax:0123"));
        assert_eq!(
            request.header("cookie"),
            Some("li_at=token; JSESSIONID=\"ajax:0123\"")
        );
        assert_eq!(request.header("connection"), Some("keep-alive"));
        assert_eq!(request.header("user-agent"), Some("test-agent"));
        assert_eq!(request.cookies.as_deref(), Some(client.cookies.as_slice()));
    }

    #[tokio::test]
    async fn test_already_applied_yields_empty_list() {
        let client = MockVoyager::always(409, form_body());
        assert!(get_fields_for_easy_apply(&client, "1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_server_error_yields_empty_list() {
        let client = MockVoyager::always(500, form_body());
        assert!(get_fields_for_easy_apply(&client, "1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unparsable_body_yields_empty_list() {
        let client = MockVoyager::always(200, "not json");
        assert!(get_fields_for_easy_apply(&client, "1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_session_cookie_is_an_error() {
        let mut client = MockVoyager::always(200, form_body());
        client.cookies.retain(|(name, _)| name != "JSESSIONID");

        assert!(get_fields_for_easy_apply(&client, "1").await.is_err());
        assert!(client.requests().is_empty());
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let client = MockVoyager::new(|_| anyhow::bail!("timed out"));
        assert!(get_fields_for_easy_apply(&client, "1").await.is_err());
    }

    #[test]
    fn test_flatten_skips_malformed_components() {
        let data = json!({
            "included": [
                {"urn": "urn:li:fsu_formElement:a", "formComponent": null},
                {"urn": "urn:li:fsu_formElement:b", "formComponent": {}},
                {"urn": "urn:li:fsu_formElement:c", "formComponent": {"checkboxFormComponent": {
                    "textSelectableOptions": [{"optionText": {"text": "Yes"}}, {"optionText": {}}]
                }}}
            ]
        });

        let fields = flatten_form(&data);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].title, "urn:li:fsu_formElement:c");
        assert_eq!(fields[0].selectable_options, Some(vec!["Yes".to_string()]));
    }

    #[test]
    fn test_flatten_without_included() {
        assert!(flatten_form(&json!({"data": {}})).is_empty());
    }
}
