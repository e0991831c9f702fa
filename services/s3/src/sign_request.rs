// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::fmt::{Debug, Formatter, Write};

use log::debug;
use percent_encoding::{percent_decode_str, utf8_percent_encode};
use upsign_core::hash::{hex_hmac_sha256, hex_sha256, hmac_sha256, SHA256_LEN};
use upsign_core::{Error, Result};

use crate::constants::*;
use crate::{Credential, RequestDescription, SignedHeaders, Timestamp};

/// RequestSigner that implement AWS SigV4 for direct S3 uploads.
///
/// The signer is stateless: it keeps no credentials and caches no derived
/// keys, so one value (or a fresh one per call) can be shared freely across
/// threads.
///
/// - [Signature Version 4 signing process](https://docs.aws.amazon.com/general/latest/gr/signature-version-4.html)
#[derive(Debug, Default, Clone, Copy)]
pub struct RequestSigner;

impl RequestSigner {
    /// Create a new signer.
    pub fn new() -> Self {
        Self
    }

    /// Sign the request and return the headers it must be sent with.
    ///
    /// The payload is never hashed: both the canonical request and the
    /// `x-amz-content-sha256` header carry `UNSIGNED-PAYLOAD`.
    pub fn sign(
        &self,
        req: &RequestDescription,
        cred: &Credential,
        time: &Timestamp,
    ) -> Result<SignedHeaders> {
        // build canonical request and string to sign.
        let creq = canonical_request_string(req, time)?;
        debug!("calculated canonical request: {creq}");

        // Scope: "20220313/<region>/s3/aws4_request"
        let scope = credential_scope(time, &req.region);
        debug!("calculated scope: {scope}");

        let signing_key = generate_signing_key(&cred.secret_access_key, time, &req.region)?;

        let string_to_sign = string_to_sign(time, &scope, &creq);
        debug!("calculated string to sign: {string_to_sign}");

        let signature = signing_key.sign(&string_to_sign);

        assemble_headers(req, cred, time, &scope, &signature)
    }
}

/// Sign an S3 request from plain strings.
///
/// `amz_date` must be the current UTC time as `YYYYMMDDTHHMMSSZ`. The returned
/// headers hold exactly `Authorization`, `x-amz-date`, `x-amz-content-sha256`,
/// `Content-Type` and `Host`.
///
/// ```
/// let headers = upsign_s3::sign_s3(
///     "PUT",
///     "/media/cat.png",
///     "auto",
///     "account.r2.cloudflarestorage.com",
///     "AKID",
///     "SECRET",
///     "20230101T000000Z",
///     "image/png",
/// )?;
///
/// assert_eq!(headers.get("x-amz-content-sha256"), Some("UNSIGNED-PAYLOAD"));
/// assert_eq!(headers.signature().len(), 64);
/// # Ok::<(), upsign_core::Error>(())
/// ```
#[allow(clippy::too_many_arguments)]
pub fn sign_s3(
    method: &str,
    canonical_path: &str,
    region: &str,
    host: &str,
    access_key_id: &str,
    secret_access_key: &str,
    amz_date: &str,
    content_type: &str,
) -> Result<SignedHeaders> {
    let req = RequestDescription::new(method, canonical_path, host, region)
        .with_content_type(content_type);
    // Request errors take precedence over a malformed date.
    req.validate()?;
    let time = Timestamp::parse(amz_date)?;
    let cred = Credential::new(access_key_id, secret_access_key);

    RequestSigner::new().sign(&req, &cred, &time)
}

/// Build the canonical request:
///
/// ```text
/// <METHOD>
/// <CanonicalURI>
/// <CanonicalQueryString>
/// content-type:<content_type>
/// host:<host>
/// x-amz-content-sha256:UNSIGNED-PAYLOAD
/// x-amz-date:<amz_date>
///
/// content-type;host;x-amz-content-sha256;x-amz-date
/// UNSIGNED-PAYLOAD
/// ```
fn canonical_request_string(req: &RequestDescription, time: &Timestamp) -> Result<String> {
    req.validate()?;

    // 256 is specially chosen to avoid reallocation for most requests.
    let mut f = String::with_capacity(256);

    // Insert method
    writeln!(f, "{}", req.method)?;
    // Insert encoded path
    writeln!(f, "{}", canonical_uri(&req.canonical_path)?)?;
    // Insert query
    writeln!(f, "{}", canonical_query_string(&req.query))?;
    // Insert signed headers
    for (name, value) in canonical_headers(req, time) {
        writeln!(f, "{name}:{value}")?;
    }
    writeln!(f)?;
    writeln!(f, "{SIGNED_HEADERS}")?;
    write!(f, "{UNSIGNED_PAYLOAD}")?;

    Ok(f)
}

/// Signed headers as `(lower-case-name, normalized value)`, sorted by name.
fn canonical_headers(req: &RequestDescription, time: &Timestamp) -> Vec<(&'static str, String)> {
    let mut headers = vec![
        (X_AMZ_DATE, time.amz_date().to_string()),
        (X_AMZ_CONTENT_SHA_256, UNSIGNED_PAYLOAD.to_string()),
        ("host", normalize_header_value(&req.host)),
        ("content-type", normalize_header_value(&req.content_type)),
    ];
    headers.sort_unstable_by(|l, r| l.0.cmp(r.0));

    headers
}

/// Encode the path segment by segment.
///
/// Each segment is percent decoded first, so input that is already encoded
/// is not encoded twice.
pub(crate) fn canonical_uri(path: &str) -> Result<String> {
    let mut s = String::with_capacity(path.len());

    for (idx, segment) in path.split('/').enumerate() {
        if idx > 0 {
            s.push('/');
        }

        let segment = percent_decode_str(segment).decode_utf8().map_err(|e| {
            Error::request_invalid(format!("path segment {segment:?} is not valid utf-8"))
                .with_source(e)
        })?;
        // Segments never contain '/', an encoded one must stay encoded.
        s.extend(utf8_percent_encode(&segment, &AWS_QUERY_ENCODE_SET));
    }

    Ok(s)
}

/// Encode and sort the query, empty when there are no parameters.
fn canonical_query_string(query: &[(String, String)]) -> String {
    let mut query = query
        .iter()
        .map(|(k, v)| {
            (
                utf8_percent_encode(k, &AWS_QUERY_ENCODE_SET).to_string(),
                utf8_percent_encode(v, &AWS_QUERY_ENCODE_SET).to_string(),
            )
        })
        .collect::<Vec<_>>();
    // Sort by param name, then by value.
    query.sort();

    query
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Trim the value and collapse inner runs of whitespace into one space.
fn normalize_header_value(v: &str) -> String {
    v.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn credential_scope(time: &Timestamp, region: &str) -> String {
    format!(
        "{}/{}/{}/{}",
        time.date_stamp(),
        region,
        S3_SERVICE,
        AWS4_REQUEST
    )
}

/// StringToSign:
///
/// ```text
/// AWS4-HMAC-SHA256
/// 20220313T072004Z
/// 20220313/<region>/s3/aws4_request
/// <hashed_canonical_request>
/// ```
fn string_to_sign(time: &Timestamp, scope: &str, creq: &str) -> String {
    format!(
        "{AWS4_HMAC_SHA256}\n{}\n{scope}\n{}",
        time.amz_date(),
        hex_sha256(creq.as_bytes())
    )
}

/// Derived SigV4 signing key, only ever used to sign one string to sign.
struct SigningKey([u8; SHA256_LEN]);

impl SigningKey {
    /// Lower-case hex HMAC-SHA256 of the string to sign.
    fn sign(&self, string_to_sign: &str) -> String {
        hex_hmac_sha256(&self.0, string_to_sign.as_bytes())
    }
}

impl Debug for SigningKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("SigningKey(***)")
    }
}

fn generate_signing_key(secret: &str, time: &Timestamp, region: &str) -> Result<SigningKey> {
    if secret.is_empty() {
        return Err(Error::credential_invalid(
            "secret access key must not be empty",
        ));
    }

    Ok(derive_signing_key(secret, time.date_stamp(), region, S3_SERVICE))
}

fn derive_signing_key(secret: &str, date_stamp: &str, region: &str, service: &str) -> SigningKey {
    // Sign secret
    let secret = format!("AWS4{secret}");
    // Sign date
    let sign_date = hmac_sha256(secret.as_bytes(), date_stamp.as_bytes());
    // Sign region
    let sign_region = hmac_sha256(&sign_date, region.as_bytes());
    // Sign service
    let sign_service = hmac_sha256(&sign_region, service.as_bytes());
    // Sign request
    let sign_request = hmac_sha256(&sign_service, AWS4_REQUEST.as_bytes());

    SigningKey(sign_request)
}

fn assemble_headers(
    req: &RequestDescription,
    cred: &Credential,
    time: &Timestamp,
    scope: &str,
    signature: &str,
) -> Result<SignedHeaders> {
    if cred.access_key_id.is_empty() {
        return Err(Error::credential_invalid("access key id must not be empty"));
    }
    if let Some(c) = cred
        .access_key_id
        .chars()
        .find(|c| c.is_whitespace() || c.is_control())
    {
        return Err(Error::credential_invalid(format!(
            "access key id must not contain {c:?}"
        )));
    }

    let authorization = format!(
        "{AWS4_HMAC_SHA256} Credential={}/{scope}, SignedHeaders={SIGNED_HEADERS}, Signature={signature}",
        cred.access_key_id,
    );

    Ok(SignedHeaders::new(
        authorization,
        time.amz_date().to_string(),
        req.content_type.clone(),
        req.host.clone(),
    ))
}
