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

use upsign_core::Result;

use crate::sign_request::canonical_uri;
use crate::RequestDescription;

/// Object addressed in path style: `https://<host>/<bucket>/<key>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectTarget {
    /// Endpoint host.
    pub host: String,
    /// Bucket name.
    pub bucket: String,
    /// Object key inside the bucket.
    pub key: String,
}

impl ObjectTarget {
    /// Create a new target.
    pub fn new(host: impl Into<String>, bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Build an object key that is unique per upload time: `<millis>_<name>`.
    ///
    /// Every character of `file_name` outside `[A-Za-z0-9._-]` becomes `_`.
    pub fn object_key(file_name: &str, unix_millis: i64) -> String {
        let safe: String = file_name
            .chars()
            .map(|c| match c {
                'A'..='Z' | 'a'..='z' | '0'..='9' | '.' | '_' | '-' => c,
                _ => '_',
            })
            .collect();

        format!("{unix_millis}_{safe}")
    }

    /// Path as it is signed: `/<bucket>/<key>`.
    pub fn canonical_path(&self) -> String {
        format!("/{}/{}", self.bucket, self.key)
    }

    /// Full https url of the object.
    ///
    /// The path is encoded the same way it is signed, so the url always
    /// points at the signed path.
    pub fn url(&self) -> Result<String> {
        Ok(format!(
            "https://{}{}",
            self.host,
            canonical_uri(&self.canonical_path())?
        ))
    }

    /// Describe a request against this object.
    pub fn to_request(
        &self,
        method: &str,
        region: &str,
        content_type: &str,
    ) -> RequestDescription {
        RequestDescription::new(method, self.canonical_path(), self.host.as_str(), region)
            .with_content_type(content_type)
    }
}
