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

use std::collections::HashMap;

use http::header;
use http::request::Parts;
use http::HeaderName;
use http::HeaderValue;
use upsign_core::Result;

use crate::constants::*;

/// Headers that must travel with a signed request.
///
/// Always holds exactly five entries: `Authorization`, `x-amz-date`,
/// `x-amz-content-sha256`, `Content-Type` and `Host`. The values can't be
/// changed once signed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    authorization: String,
    amz_date: String,
    content_type: String,
    host: String,
}

impl SignedHeaders {
    pub(crate) fn new(
        authorization: String,
        amz_date: String,
        content_type: String,
        host: String,
    ) -> Self {
        Self {
            authorization,
            amz_date,
            content_type,
            host,
        }
    }

    /// Value of the `Authorization` header.
    pub fn authorization(&self) -> &str {
        &self.authorization
    }

    /// Value of the `x-amz-date` header.
    pub fn amz_date(&self) -> &str {
        &self.amz_date
    }

    /// Value of the `x-amz-content-sha256` header, always `UNSIGNED-PAYLOAD`.
    pub fn content_sha256(&self) -> &str {
        UNSIGNED_PAYLOAD
    }

    /// Value of the `Content-Type` header.
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Value of the `Host` header.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The `Signature=` part of the `Authorization` header.
    pub fn signature(&self) -> &str {
        self.authorization
            .rsplit_once("Signature=")
            .map(|(_, sig)| sig)
            .unwrap_or_default()
    }

    /// Number of headers, always five.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        5
    }

    /// Get header value by its exact name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.iter().find(|(k, _)| *k == name).map(|(_, v)| v)
    }

    /// Iterate over `(name, value)` pairs in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            (AUTHORIZATION, self.authorization.as_str()),
            (X_AMZ_DATE, self.amz_date.as_str()),
            (X_AMZ_CONTENT_SHA_256, self.content_sha256()),
            (CONTENT_TYPE, self.content_type.as_str()),
            (HOST, self.host.as_str()),
        ]
        .into_iter()
    }

    /// Convert into an owned map keyed by header name.
    pub fn into_map(self) -> HashMap<String, String> {
        self.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    /// Apply the headers to http::request::Parts.
    ///
    /// Existing values for the same names are replaced. The authorization
    /// value is marked sensitive so it stays out of `Debug` output.
    pub fn apply(&self, parts: &mut Parts) -> Result<()> {
        for (name, value) in self.iter() {
            let name = HeaderName::from_bytes(name.as_bytes())?;
            let mut value = HeaderValue::from_str(value)?;
            if name == header::AUTHORIZATION {
                value.set_sensitive(true);
            }

            parts.headers.insert(name, value);
        }

        Ok(())
    }
}
