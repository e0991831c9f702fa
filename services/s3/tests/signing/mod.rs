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

mod aws_sigv4_compat;
mod key_chain;

use upsign_s3::{sign_s3, SignedHeaders};

pub const AMZ_DATE: &str = "20230101T000000Z";

/// Inputs of a single sign call, in `sign_s3` argument order.
#[derive(Debug, Clone)]
pub struct SignInput {
    pub method: String,
    pub canonical_path: String,
    pub region: String,
    pub host: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub amz_date: String,
    pub content_type: String,
}

impl Default for SignInput {
    fn default() -> Self {
        Self {
            method: "GET".to_string(),
            canonical_path: "/test".to_string(),
            region: "us-east-1".to_string(),
            host: "test.s3.amazonaws.com".to_string(),
            access_key_id: "AKID".to_string(),
            secret_access_key: "SECRET".to_string(),
            amz_date: AMZ_DATE.to_string(),
            content_type: "application/json".to_string(),
        }
    }
}

impl SignInput {
    pub fn sign(&self) -> upsign_core::Result<SignedHeaders> {
        sign_s3(
            &self.method,
            &self.canonical_path,
            &self.region,
            &self.host,
            &self.access_key_id,
            &self.secret_access_key,
            &self.amz_date,
            &self.content_type,
        )
    }
}
