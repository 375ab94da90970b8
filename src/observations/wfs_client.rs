use crate::observations::error::ObservationError;
use crate::types::feature::Feature;
use crate::types::month::ObservationWindow;
use futures_util::TryStreamExt;
use log::{debug, warn};
use reqwest::Client;
use url::Url;

/// Stored query resolving one feature for one place to a time-value-pair
/// document.
pub(crate) const STORED_QUERY_ID: &str = "fmi::observations::weather::timevaluepair";

// One observation per hour.
const TIMESTEP_MINUTES: &str = "60";

const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

#[derive(Debug)]
pub(crate) struct WfsClient {
    endpoint: Url,
    client: Client,
}

impl WfsClient {
    pub(crate) fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            client: Client::new(),
        }
    }

    /// Builds the GetFeature request URL for one (feature, place, window)
    /// query against the configured endpoint.
    pub(crate) fn stored_query_url(
        &self,
        feature: Feature,
        place: &str,
        window: &ObservationWindow,
    ) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("service", "WFS")
            .append_pair("version", "2.0.0")
            .append_pair("request", "GetFeature")
            .append_pair("storedquery_id", STORED_QUERY_ID)
            .append_pair("parameters", feature.name())
            .append_pair("place", place)
            .append_pair("timestep", TIMESTEP_MINUTES)
            .append_pair("starttime", &window.start.format(TIME_FORMAT).to_string())
            .append_pair("endtime", &window.end.format(TIME_FORMAT).to_string());
        url
    }

    /// Downloads the resource behind `url` into an owned buffer, streaming
    /// the body chunk by chunk. Fails before any download on a non-success
    /// status.
    pub(crate) async fn fetch(&self, url: Url) -> Result<Vec<u8>, ObservationError> {
        debug!("Downloading {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| ObservationError::NetworkRequest(url.to_string(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    ObservationError::HttpStatus {
                        url: url.to_string(),
                        status,
                        source: e,
                    }
                } else {
                    ObservationError::NetworkRequest(url.to_string(), e)
                });
            }
        };

        let mut stream = response.bytes_stream();
        let mut body = Vec::new();
        while let Some(chunk) = stream
            .try_next()
            .await
            .map_err(|e| ObservationError::BodyRead(url.to_string(), e))?
        {
            body.extend_from_slice(&chunk);
        }

        debug!("Downloaded {} bytes from {}", body.len(), url);
        Ok(body)
    }
}
