use std::time::Duration;

use tracing::{debug, info};

use crate::{
    point::Point,
    sink::{Sink, SinkError},
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for an InfluxDB v2 server.
///
/// Nothing is validated here; a missing URL or a bad token shows up as an
/// error from the first write.
#[derive(Debug, Clone, Default)]
pub struct InfluxDbConfig {
    pub url: String,

    pub token: String,

    pub org: String,

    pub bucket: String,
}

/// Writes each point through the InfluxDB v2 `/api/v2/write` endpoint.
pub struct InfluxDbSink {
    client: reqwest::Client,
    write_url: String,
    config: InfluxDbConfig,
}

impl InfluxDbSink {
    pub fn connect(config: InfluxDbConfig) -> Result<Self, SinkError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let write_url = write_url(&config.url);

        info!(
            url = %config.url,
            org = %config.org,
            bucket = %config.bucket,
            "opened InfluxDB client"
        );

        Ok(Self {
            client,
            write_url,
            config,
        })
    }
}

impl Sink for InfluxDbSink {
    fn name(&self) -> &'static str {
        "influxdb"
    }

    async fn write(&mut self, point: &Point) -> Result<(), SinkError> {
        let line = point.to_line_protocol();
        debug!(%line, "writing point");

        let response = self
            .client
            .post(&self.write_url)
            .query(&[
                ("org", self.config.org.as_str()),
                ("bucket", self.config.bucket.as_str()),
                ("precision", "ns"),
            ])
            .header("Authorization", format!("Token {}", self.config.token))
            .header("Content-Type", "text/plain; charset=utf-8")
            .body(line)
            .send()
            .await?;

        if response.status().is_success() {
            return Ok(());
        }

        let status = response.status().as_u16();
        let body = error_body(response.text().await);
        Err(SinkError::Server { status, body })
    }

    async fn close(self) {
        drop(self.client);
        info!(url = %self.config.url, "closed InfluxDB client");
    }
}

fn error_body(body: Result<String, reqwest::Error>) -> String {
    match body {
        Ok(body) => body,
        Err(err) => {
            debug!("failed to read error response body: {err}");
            "<unreadable response body>".to_string()
        }
    }
}

fn write_url(base_url: &str) -> String {
    format!("{}/api/v2/write", base_url.trim_end_matches('/'))
}
