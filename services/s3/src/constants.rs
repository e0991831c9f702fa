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

use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

// Signing algorithm and scope terminators.
pub const AWS4_HMAC_SHA256: &str = "AWS4-HMAC-SHA256";
pub const AWS4_REQUEST: &str = "aws4_request";
pub const S3_SERVICE: &str = "s3";

/// Payload hash token for bodies streamed with unknown length.
pub const UNSIGNED_PAYLOAD: &str = "UNSIGNED-PAYLOAD";

/// Content type used when the caller has nothing better.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Region reported by Cloudflare R2 for every bucket.
pub const R2_REGION: &str = "auto";
pub const R2_HOST_SUFFIX: &str = "r2.cloudflarestorage.com";

// Headers as they appear on the wire.
pub const AUTHORIZATION: &str = "Authorization";
pub const CONTENT_TYPE: &str = "Content-Type";
pub const HOST: &str = "Host";
pub const X_AMZ_CONTENT_SHA_256: &str = "x-amz-content-sha256";
pub const X_AMZ_DATE: &str = "x-amz-date";

/// Sorted, lower-cased names of every signed header.
pub const SIGNED_HEADERS: &str = "content-type;host;x-amz-content-sha256;x-amz-date";

// Env values used to build a config.
pub const AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
pub const AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
pub const AWS_REGION: &str = "AWS_REGION";
pub const UPSIGN_S3_HOST: &str = "UPSIGN_S3_HOST";
pub const UPSIGN_S3_BUCKET: &str = "UPSIGN_S3_BUCKET";
pub const UPSIGN_R2_ACCOUNT_ID: &str = "UPSIGN_R2_ACCOUNT_ID";

/// AsciiSet for [AWS UriEncode](https://docs.aws.amazon.com/AmazonS3/latest/API/sig-v4-header-based-auth.html)
///
/// - URI encode every byte except the unreserved characters: 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', and '~'.
/// - Used for query keys, query values and single path segments, so '/' is encoded as well.
pub static AWS_QUERY_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
