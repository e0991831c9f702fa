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

//! AWS SigV4 signer for uploads sent straight from a client device to an
//! S3-compatible bucket such as Cloudflare R2.
//!
//! Signing is a pure function of the request description, the credential and
//! the timestamp: no I/O happens, nothing is cached and the same input always
//! yields the same headers.
//!
//! ```
//! use upsign_s3::{Credential, RequestDescription, RequestSigner, Timestamp};
//!
//! let req = RequestDescription::new(
//!     "PUT",
//!     "/media/1700000000000_cat.png",
//!     "account.r2.cloudflarestorage.com",
//!     "auto",
//! )
//! .with_content_type("image/png");
//! let cred = Credential::new("AKID", "SECRET");
//! let time = Timestamp::parse("20230101T000000Z")?;
//!
//! let headers = RequestSigner::new().sign(&req, &cred, &time)?;
//! assert!(headers
//!     .authorization()
//!     .starts_with("AWS4-HMAC-SHA256 Credential=AKID/20230101/auto/s3/aws4_request"));
//! # Ok::<(), upsign_core::Error>(())
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

mod constants;
pub use constants::DEFAULT_CONTENT_TYPE;
pub use constants::R2_REGION;
pub use constants::UNSIGNED_PAYLOAD;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod headers;
pub use headers::SignedHeaders;

mod request;
pub use request::RequestDescription;
pub use request::Timestamp;

mod sign_request;
pub use sign_request::sign_s3;
pub use sign_request::RequestSigner;

mod target;
pub use target::ObjectTarget;
