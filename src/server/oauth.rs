//! OAuth 1.0a request signing (HMAC-SHA1) for the X API.

use base64::Engine;
use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::config::credentials::XCredentials;

type HmacSha1 = Hmac<Sha1>;

const SIGNATURE_METHOD: &str = "HMAC-SHA1";
const VERSION: &str = "1.0";

/// Per-request values that make a signature unique.
#[derive(Debug, Clone)]
pub struct Nonce {
    pub nonce: String,
    pub timestamp: i64,
}

impl Nonce {
    pub fn fresh() -> Self {
        Self {
            nonce: uuid::Uuid::new_v4().simple().to_string(),
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

fn encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

fn oauth_params(credentials: &XCredentials, nonce: &Nonce) -> Vec<(String, String)> {
    vec![
        ("oauth_consumer_key".into(), credentials.api_key.clone()),
        ("oauth_nonce".into(), nonce.nonce.clone()),
        ("oauth_signature_method".into(), SIGNATURE_METHOD.into()),
        ("oauth_timestamp".into(), nonce.timestamp.to_string()),
        ("oauth_token".into(), credentials.access_token.clone()),
        ("oauth_version".into(), VERSION.into()),
    ]
}

/// Signature base string: method, URL, and the sorted encoded parameters.
pub fn signature_base(method: &str, url: &str, params: &[(String, String)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(key, value)| (encode(key), encode(value)))
        .collect();
    encoded.sort();

    let joined = encoded
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        encode(url),
        encode(&joined)
    )
}

/// HMAC-SHA1 over `base`, keyed by both secrets, base64 encoded.
pub fn sign(
    base: &str,
    consumer_secret: &str,
    token_secret: &str,
) -> Result<String, hmac::digest::InvalidLength> {
    let key = format!("{}&{}", encode(consumer_secret), encode(token_secret));
    let mut mac = HmacSha1::new_from_slice(key.as_bytes())?;
    mac.update(base.as_bytes());
    Ok(base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes()))
}

/// Build the `Authorization` header value.
///
/// `extra_params` are query or form parameters that take part in the
/// signature. A JSON body never does.
pub fn authorization_header(
    credentials: &XCredentials,
    method: &str,
    url: &str,
    extra_params: &[(String, String)],
    nonce: &Nonce,
) -> Result<String, hmac::digest::InvalidLength> {
    let mut header_params = oauth_params(credentials, nonce);

    let mut signed = header_params.clone();
    signed.extend_from_slice(extra_params);
    let base = signature_base(method, url, &signed);
    let signature = sign(&base, &credentials.api_secret, &credentials.access_secret)?;
    header_params.push(("oauth_signature".into(), signature));
    header_params.sort();

    let fields = header_params
        .iter()
        .map(|(key, value)| format!("{}=\"{}\"", encode(key), encode(value)))
        .collect::<Vec<_>>()
        .join(", ");
    Ok(format!("OAuth {fields}"))
}
