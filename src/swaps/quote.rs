/// Quoting service client
///
/// One read-only GET per quote, no retries at this step. The response carries
/// the unsigned swap transaction the rest of the flow signs and submits.
use super::types::{SwapRequest, SwapResponse};
use crate::constants::{QUOTE_TIMEOUT_SECS, SOL_MINT, SWAP_API_PATH};
use crate::errors::SwapError;
use crate::logger::{self, LogTag};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Numbers go out with six decimals, matching what the service was built against
fn format_decimal(value: f64) -> String {
    format!("{:.6}", value)
}

/// Build `<base>/swap?...` carrying every set request field exactly once
pub fn build_swap_url(base_url: &str, request: &SwapRequest) -> Result<Url, SwapError> {
    let endpoint = format!("{}/{}", base_url.trim_end_matches('/'), SWAP_API_PATH);
    let mut url = Url::parse(&endpoint)
        .map_err(|e| SwapError::config(format!("Invalid quote API URL '{}': {}", base_url, e)))?;

    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("from", &request.from)
            .append_pair("to", &request.to)
            .append_pair("fromAmount", &format_decimal(request.from_amount))
            .append_pair("slippage", &format_decimal(request.slippage))
            .append_pair("payer", &request.payer)
            .append_pair("forceLegacy", if request.force_legacy { "true" } else { "false" });

        if let Some(priority_fee) = request.priority_fee {
            query.append_pair("priorityFee", &format_decimal(priority_fee));
        }
    }

    Ok(url)
}

/// Short mint label for log lines
fn mint_label(mint: &str) -> &str {
    if mint == SOL_MINT {
        "SOL"
    } else {
        mint.get(..8).unwrap_or(mint)
    }
}

pub struct QuoteClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl QuoteClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, Duration::from_secs(QUOTE_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch swap instructions for `request`
    pub async fn fetch_quote(&self, request: &SwapRequest) -> Result<SwapResponse, SwapError> {
        request.validate()?;

        let url = build_swap_url(&self.base_url, request)?;
        let endpoint = format!("{}{}", url.origin().ascii_serialization(), url.path());

        logger::debug(
            LogTag::Quote,
            &format!(
                "Quote request: {} {} → {} (slippage: {}%, priority fee: {})",
                request.from_amount,
                mint_label(&request.from),
                mint_label(&request.to),
                request.slippage,
                request
                    .priority_fee
                    .map(|fee| format!("{} SOL", fee))
                    .unwrap_or_else(|| "none".to_string())
            ),
        );
        logger::verbose(LogTag::Quote, &format!("GET {}", url));

        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| SwapError::network("fetching swap quote", e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SwapError::network("reading swap quote response", e))?;

        if !status.is_success() {
            logger::warning(
                LogTag::Quote,
                &format!("Quote API returned HTTP {} from {}", status.as_u16(), endpoint),
            );
            return Err(SwapError::http_status(endpoint, status.as_u16(), &body));
        }

        let mut quote: SwapResponse = serde_json::from_str(&body)
            .map_err(|e| SwapError::decode("swap quote response", e))?;

        // The echoed flag is authoritative from our side
        quote.force_legacy = request.force_legacy;

        logger::debug(
            LogTag::Quote,
            &format!(
                "Quote received: {} bytes of transaction payload (legacy: {})",
                quote.txn.len(),
                quote.force_legacy
            ),
        );

        Ok(quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOL: &str = "So11111111111111111111111111111111111111112";
    const TOKEN: &str = "4k3Dyjzvzp8eMZWUXbBCjEvwSkkk59S5iCNLY3QrkX6R";

    fn pairs(url: &Url) -> Vec<(String, String)> {
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    fn count(pairs: &[(String, String)], key: &str) -> usize {
        pairs.iter().filter(|(k, _)| k == key).count()
    }

    #[test]
    fn test_query_contains_every_field_once() {
        let request = SwapRequest::new(SOL, TOKEN, 0.0001, 30.0, "PayerAddress111")
            .with_priority_fee(0.00005)
            .with_force_legacy(true);

        let url = build_swap_url("https://swap-v2.solanatracker.io", &request).unwrap();
        assert_eq!(url.path(), "/swap");

        let pairs = pairs(&url);
        for key in ["from", "to", "fromAmount", "slippage", "payer", "forceLegacy", "priorityFee"] {
            assert_eq!(count(&pairs, key), 1, "{} should appear exactly once", key);
        }
        assert_eq!(pairs.len(), 7);

        let get = |key: &str| pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str());
        assert_eq!(get("from"), Some(SOL));
        assert_eq!(get("to"), Some(TOKEN));
        assert_eq!(get("fromAmount"), Some("0.000100"));
        assert_eq!(get("slippage"), Some("30.000000"));
        assert_eq!(get("priorityFee"), Some("0.000050"));
        assert_eq!(get("forceLegacy"), Some("true"));
    }

    #[test]
    fn test_priority_fee_omitted_when_unset() {
        let request = SwapRequest::new(SOL, TOKEN, 1.5, 10.0, "payer");
        let url = build_swap_url("https://quote.test/", &request).unwrap();

        let pairs = pairs(&url);
        assert_eq!(count(&pairs, "priorityFee"), 0);
        assert_eq!(pairs.len(), 6);
        assert!(url.as_str().starts_with("https://quote.test/swap?"));
        assert!(url.as_str().contains("forceLegacy=false"));
    }

    #[test]
    fn test_values_are_url_encoded() {
        let request = SwapRequest::new("a&b=c", "d e", 1.0, 1.0, "p?q");
        let url = build_swap_url("https://quote.test", &request).unwrap();

        let query = url.query().unwrap();
        assert!(query.contains("from=a%26b%3Dc"));
        assert!(query.contains("to=d+e"));
        assert!(query.contains("payer=p%3Fq"));

        let pairs = pairs(&url);
        assert!(pairs.contains(&("from".to_string(), "a&b=c".to_string())));
    }

    #[test]
    fn test_invalid_base_url() {
        let request = SwapRequest::new(SOL, TOKEN, 1.0, 1.0, "payer");
        assert!(matches!(
            build_swap_url("not a url", &request),
            Err(SwapError::Config { .. })
        ));
    }
}
