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

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use aws_credential_types::Credentials;
use aws_sigv4::http_request::PayloadChecksumKind;
use aws_sigv4::http_request::PercentEncodingMode;
use aws_sigv4::http_request::SignableBody;
use aws_sigv4::http_request::SignableRequest;
use aws_sigv4::http_request::SigningSettings;
use aws_sigv4::sign::v4;
use http::Request;
use pretty_assertions::assert_eq;
use upsign_s3::{Credential, RequestDescription, RequestSigner, Timestamp};

/// 2023-01-01T00:00:00Z
fn test_time() -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(1_672_531_200)
}

struct TestCase {
    name: &'static str,
    method: &'static str,
    /// Path exactly as sent on the wire.
    path: &'static str,
    /// Query exactly as sent on the wire, with the leading `?`.
    raw_query: &'static str,
    query: Vec<(&'static str, &'static str)>,
    content_type: &'static str,
    region: &'static str,
}

fn test_cases() -> Vec<TestCase> {
    vec![
        TestCase {
            name: "get_request",
            method: "GET",
            path: "/test",
            raw_query: "",
            query: vec![],
            content_type: "application/json",
            region: "us-east-1",
        },
        TestCase {
            name: "put_request_r2",
            method: "PUT",
            path: "/media/1700000000000_cat.png",
            raw_query: "",
            query: vec![],
            content_type: "image/png",
            region: "auto",
        },
        TestCase {
            name: "put_request_encoded_path",
            method: "PUT",
            path: "/media/my%20holiday%281%29.jpg",
            raw_query: "",
            query: vec![],
            content_type: "image/jpeg",
            region: "auto",
        },
        TestCase {
            name: "get_request_with_query",
            method: "GET",
            path: "/media",
            raw_query: "?prefix=photos%2F2024&list-type=2",
            query: vec![("prefix", "photos/2024"), ("list-type", "2")],
            content_type: "application/octet-stream",
            region: "eu-central-1",
        },
    ]
}

fn sign_with_aws_sigv4(
    method: &str,
    url: &str,
    host: &str,
    content_type: &str,
    region: &str,
) -> Result<String> {
    let mut ss = SigningSettings::default();
    ss.percent_encoding_mode = PercentEncodingMode::Single;
    ss.payload_checksum_kind = PayloadChecksumKind::XAmzSha256;
    let id = Credentials::new("AKID", "SECRET", None, None, "hardcoded-credentials").into();
    let sp = v4::SigningParams::builder()
        .identity(&id)
        .region(region)
        .name("s3")
        .time(test_time())
        .settings(ss)
        .build()
        .expect("signing params must be valid");

    let headers = [("content-type", content_type), ("host", host)];
    let output = aws_sigv4::http_request::sign(
        SignableRequest::new(
            method,
            url.to_string(),
            headers.into_iter(),
            SignableBody::UnsignedPayload,
        )?,
        &sp.into(),
    )?;
    let (aws_sig, _) = output.into_parts();

    let mut req = Request::builder().method(method).uri(url).body(())?;
    aws_sig.apply_to_request_http1x(&mut req);

    Ok(req.headers()[http::header::AUTHORIZATION]
        .to_str()?
        .to_string())
}

#[test]
fn test_authorization_matches_aws_sigv4() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();

    let host = "account.r2.cloudflarestorage.com";
    let time = Timestamp::parse(super::AMZ_DATE)?;
    let cred = Credential::new("AKID", "SECRET");

    for case in test_cases() {
        let url = format!("https://{host}{}{}", case.path, case.raw_query);
        let expected =
            sign_with_aws_sigv4(case.method, &url, host, case.content_type, case.region)?;

        let mut req = RequestDescription::new(case.method, case.path, host, case.region)
            .with_content_type(case.content_type);
        for (k, v) in case.query {
            req = req.with_query(k, v);
        }
        let actual = RequestSigner::new().sign(&req, &cred, &time)?;

        assert_eq!(
            expected,
            actual.authorization(),
            "{} authorization mismatch",
            case.name
        );
    }

    Ok(())
}
