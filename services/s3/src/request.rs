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

use upsign_core::time::{format_iso8601, now, parse_iso8601, DateTime};
use upsign_core::{Error, Result};

use crate::constants::DEFAULT_CONTENT_TYPE;

/// Description of the request to sign.
///
/// Only the parts that take part in the signature are described here, the
/// body is never seen by the signer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescription {
    /// HTTP method, for example `PUT`.
    pub method: String,
    /// Absolute, slash-delimited URI path like `/bucket/key`.
    pub canonical_path: String,
    /// Query parameters in any order, not yet encoded.
    pub query: Vec<(String, String)>,
    /// Request authority, for example `<account>.r2.cloudflarestorage.com`.
    pub host: String,
    /// Region code the request is scoped to.
    pub region: String,
    /// MIME type sent in `Content-Type`.
    pub content_type: String,
}

impl RequestDescription {
    /// Create a new description with an empty query and the default content type.
    pub fn new(
        method: impl Into<String>,
        canonical_path: impl Into<String>,
        host: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            method: method.into(),
            canonical_path: canonical_path.into(),
            query: Vec::new(),
            host: host.into(),
            region: region.into(),
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
        }
    }

    /// Set the content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Push a query pair.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Check that every field the canonical request needs is present.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.method.is_empty() {
            return Err(Error::request_invalid("method must not be empty"));
        }
        if self.canonical_path.is_empty() {
            return Err(Error::request_invalid("canonical path must not be empty"));
        }
        if !self.canonical_path.starts_with('/') {
            return Err(Error::request_invalid(format!(
                "canonical path {:?} must be absolute",
                self.canonical_path
            )));
        }
        if self.host.is_empty() {
            return Err(Error::request_invalid("host must not be empty"));
        }
        if self.region.is_empty() {
            return Err(Error::request_invalid("region must not be empty"));
        }
        if let Some(c) = self.host.chars().find(|c| c.is_whitespace() || c.is_control()) {
            return Err(Error::request_invalid(format!(
                "host must not contain {c:?}"
            )));
        }
        if let Some(c) = self.region.chars().find(|c| c.is_whitespace() || c.is_control()) {
            return Err(Error::request_invalid(format!(
                "region must not contain {c:?}"
            )));
        }
        // Same rule as http::HeaderValue: tab is the only control char allowed.
        if let Some(c) = self
            .content_type
            .chars()
            .find(|c| c.is_ascii_control() && *c != '\t')
        {
            return Err(Error::request_invalid(format!(
                "content type must not contain {c:?}"
            )));
        }

        // Reject anything that is not a valid HTTP token.
        http::Method::from_bytes(self.method.as_bytes())?;

        Ok(())
    }
}

/// Signing time in the `YYYYMMDDTHHMMSSZ` layout.
///
/// The date stamp is always the first eight characters of the amz date, so
/// the two can never disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp {
    amz_date: String,
}

impl Timestamp {
    /// Timestamp of now.
    pub fn now() -> Result<Self> {
        Self::from_datetime(now())
    }

    /// Timestamp of the given time.
    ///
    /// Returns an error for years outside `0000..=9999`, which can't be
    /// written in the four digit layout.
    pub fn from_datetime(time: DateTime) -> Result<Self> {
        let amz_date = format_iso8601(time);
        check_amz_date_shape(&amz_date)?;

        Ok(Self { amz_date })
    }

    /// Parse a caller provided amz date like `20230101T000000Z`.
    pub fn parse(amz_date: &str) -> Result<Self> {
        check_amz_date_shape(amz_date)?;
        parse_iso8601(amz_date)?;

        Ok(Self {
            amz_date: amz_date.to_string(),
        })
    }

    /// The full amz date: `20230101T000000Z`
    pub fn amz_date(&self) -> &str {
        &self.amz_date
    }

    /// The date stamp: `20230101`
    pub fn date_stamp(&self) -> &str {
        &self.amz_date[..8]
    }
}

/// Check the `YYYYMMDDTHHMMSSZ` layout byte by byte.
///
/// Seconds stop at `59`: chrono accepts `60` as a leap second.
fn check_amz_date_shape(amz_date: &str) -> Result<()> {
    let well_formed = amz_date.len() == 16
        && amz_date.bytes().enumerate().all(|(idx, b)| match idx {
            8 => b == b'T',
            13 => matches!(b, b'0'..=b'5'),
            15 => b == b'Z',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(Error::request_invalid(format!(
            "amz date {amz_date:?} must be 16 characters in YYYYMMDDTHHMMSSZ form"
        )));
    }

    Ok(())
}
