use anyhow::Context;
use chrono::{NaiveDate, Utc};
use log::{debug, info};
use typed_builder::TypedBuilder;
use url::Url;

use crate::{chrono_util::QUERY_DATE_FORMAT, schema::SlotTypeId};

const RESULTS_URL: &str =
    "https://widgets.mindbodyonline.com/widgets/appointments/8f25324d818/results.json";
// The widget answers differently to clients that do not look like a browser.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/105.0.0.0 Safari/537.36";

#[derive(Clone, Debug, TypedBuilder)]
pub struct ScheduleQuery {
    start_date: NaiveDate,
    end_date: NaiveDate,
    #[builder(default)]
    slot_type: SlotTypeId,
}

impl ScheduleQuery {
    /// Builds the request URL with a fresh nonce and the current time.
    pub fn url(&self) -> anyhow::Result<Url> {
        self.url_with(rand::random(), Utc::now().timestamp_millis())
    }

    pub fn url_with(&self, nonce: u64, timestamp_millis: i64) -> anyhow::Result<Url> {
        let callback = format!("jQuery1810{nonce}_{timestamp_millis}");
        let slot_type = self.slot_type.to_string();
        let start_date = self.start_date.format(QUERY_DATE_FORMAT).to_string();
        let end_date = self.end_date.format(QUERY_DATE_FORMAT).to_string();
        let timestamp = timestamp_millis.to_string();
        Ok(Url::parse_with_params(
            RESULTS_URL,
            [
                ("callback", "?"),
                ("callback", callback.as_str()),
                ("utf8", "\u{2713}"),
                ("options[session_type_ids]", slot_type.as_str()),
                ("options[staff_ids][]", ""),
                ("options[start_date]", start_date.as_str()),
                ("options[end_date]", end_date.as_str()),
                ("_", timestamp.as_str()),
            ],
        )?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("regex failed")]
    PatternMismatch,
}

/// Pulls the `contents` string out of the JSONP wrapper and restores the HTML in it.
pub fn decode_response(body: &str) -> Result<String, DecodeError> {
    let captures = regex!(r#"^jQuery\d+_\d+\(\{"contents":"(.*)"\}\);"#)
        .captures(body)
        .ok_or(DecodeError::PatternMismatch)?;
    Ok(unescape_contents(&captures[1]))
}

/// Undoes only the escapes the widget is known to emit.
/// Anything else, `\/` or `\\` included, is left as is.
pub fn unescape_contents(contents: &str) -> String {
    contents
        .replace("\\u003c", "<")
        .replace("\\u003e", ">")
        .replace("\\n", "\n")
        .replace("\\\"", "\"")
}

pub struct WidgetClient {
    client: reqwest::Client,
}

impl WidgetClient {
    pub fn new() -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connection_verbose(true)
            .build()?;
        Ok(Self { client })
    }

    /// Returns the response body as is, still wrapped in the JSONP callback.
    pub async fn fetch_raw(&self, query: &ScheduleQuery) -> anyhow::Result<String> {
        let url = query.url()?;
        debug!("Requesting {url}");
        let response = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()
            .context("The widget returned an error status")?;
        let body = response.text().await?;
        info!("Received {} bytes from the widget.", body.len());
        Ok(body)
    }
}
