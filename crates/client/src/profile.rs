//! Profile handle normalization and profile URL construction.

use followcount_core::Error;
use followcount_core::config::USER_PLACEHOLDER;
use url::{Url, form_urlencoded};

/// Normalize a caller-supplied handle for use in a profile URL.
///
/// Trims whitespace and strips one leading `@`. Case is preserved; cache keys
/// fold case separately.
pub fn normalize_handle(input: &str) -> String {
    let trimmed = input.trim();
    trimmed.strip_prefix('@').unwrap_or(trimmed).trim().to_string()
}

/// Build the profile page URL for `handle` from a `{user}` template.
///
/// The handle is percent-encoded before substitution. The resulting URL must
/// be http(s); its host is lowercased and any fragment dropped.
pub fn profile_url(template: &str, handle: &str) -> Result<Url, Error> {
    if handle.is_empty() {
        return Err(Error::InvalidInput("handle cannot be empty".into()));
    }

    let encoded = encode_component(handle);
    let raw = template.replace(USER_PLACEHOLDER, &encoded);

    let mut parsed = Url::parse(raw.trim()).map_err(|e| Error::InvalidUrl(format!("{raw}: {e}")))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => return Err(Error::InvalidUrl(format!("unsupported scheme: {scheme}"))),
    }

    if let Some(host) = parsed.host_str() {
        let lowered = host.to_lowercase();
        parsed
            .set_host(Some(&lowered))
            .map_err(|e| Error::InvalidUrl(e.to_string()))?;
    }

    parsed.set_fragment(None);

    Ok(parsed)
}

/// Percent-encode a single URL component, spaces as `%20`.
fn encode_component(input: &str) -> String {
    // form encoding writes spaces as '+' and escapes a literal '+' as %2B
    form_urlencoded::byte_serialize(input.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
