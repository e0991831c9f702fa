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
use std::env;
use std::fmt::{Debug, Formatter};

use log::debug;
use upsign_core::utils::Redact;
use upsign_core::{Error, Result};

use crate::constants::*;
use crate::{Credential, ObjectTarget};

/// Config for an S3-compatible bucket that accepts direct uploads.
///
/// Fields set explicitly always win over values loaded by [`Config::from_env`].
#[derive(Clone, Default)]
pub struct Config {
    /// `access_key_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_ACCESS_KEY_ID`]
    pub access_key_id: Option<String>,
    /// `secret_access_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_SECRET_ACCESS_KEY`]
    pub secret_access_key: Option<String>,
    /// `region` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_REGION`]
    /// - default to `auto`, the only region R2 reports
    pub region: Option<String>,
    /// `host` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`UPSIGN_S3_HOST`]
    /// - derived from `account_id` as `<account_id>.r2.cloudflarestorage.com`
    pub host: Option<String>,
    /// `account_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`UPSIGN_R2_ACCOUNT_ID`]
    pub account_id: Option<String>,
    /// `bucket` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`UPSIGN_S3_BUCKET`]
    pub bucket: Option<String>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("secret_access_key", &Redact::from(&self.secret_access_key))
            .field("region", &self.region)
            .field("host", &self.host)
            .field("account_id", &self.account_id)
            .field("bucket", &self.bucket)
            .finish()
    }
}

impl Config {
    /// Load config from env.
    pub fn from_env(self) -> Self {
        let envs = env::vars().collect::<HashMap<_, _>>();
        self.from_envs(&envs)
    }

    /// Load config from the given env map.
    pub fn from_envs(mut self, envs: &HashMap<String, String>) -> Self {
        let pick = |field: &mut Option<String>, key: &str| {
            if field.is_none() {
                if let Some(v) = envs.get(key) {
                    *field = Some(v.to_string());
                }
            }
        };

        pick(&mut self.access_key_id, AWS_ACCESS_KEY_ID);
        pick(&mut self.secret_access_key, AWS_SECRET_ACCESS_KEY);
        pick(&mut self.region, AWS_REGION);
        pick(&mut self.host, UPSIGN_S3_HOST);
        pick(&mut self.account_id, UPSIGN_R2_ACCOUNT_ID);
        pick(&mut self.bucket, UPSIGN_S3_BUCKET);

        debug!("config loaded from env: {self:?}");
        self
    }

    /// Build the credential if both access key id and secret are present
    /// and non-empty.
    pub fn credential(&self) -> Option<Credential> {
        let cred = match (&self.access_key_id, &self.secret_access_key) {
            (Some(ak), Some(sk)) => Credential::new(ak, sk),
            _ => return None,
        };
        if !cred.is_valid() {
            debug!("credential in config is incomplete, ignored");
            return None;
        }

        Some(cred)
    }

    /// Region to sign for.
    pub fn region(&self) -> &str {
        self.region.as_deref().unwrap_or(R2_REGION)
    }

    /// Host that receives the upload.
    pub fn endpoint_host(&self) -> Result<String> {
        if let Some(host) = self.host.as_deref().filter(|v| !v.is_empty()) {
            return Ok(host.to_string());
        }

        match self.account_id.as_deref().filter(|v| !v.is_empty()) {
            Some(account_id) => Ok(format!("{account_id}.{R2_HOST_SUFFIX}")),
            None => Err(Error::config_invalid(
                "neither host nor account_id is configured",
            )),
        }
    }

    /// Build the upload target for `key` in the configured bucket.
    pub fn object_target(&self, key: impl Into<String>) -> Result<ObjectTarget> {
        let bucket = self
            .bucket
            .as_deref()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::config_invalid("bucket is not configured"))?;

        Ok(ObjectTarget::new(self.endpoint_host()?, bucket, key))
    }
}
