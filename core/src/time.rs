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

//! Time related utils.

use crate::Error;
use chrono::NaiveDateTime;
use chrono::Utc;

/// DateTime is the alias for chrono::DateTime<Utc>.
pub type DateTime = chrono::DateTime<Utc>;

/// Time format for ISO 8601 basic: "20220313T072004Z"
const ISO8601: &str = "%Y%m%dT%H%M%SZ";

/// Create datetime of now.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format time into ISO 8601 basic: "20220313T072004Z"
pub fn format_iso8601(t: DateTime) -> String {
    t.format(ISO8601).to_string()
}

/// Parse time from ISO 8601 basic: "20220313T072004Z"
pub fn parse_iso8601(s: &str) -> crate::Result<DateTime> {
    let t = NaiveDateTime::parse_from_str(s, ISO8601).map_err(|e| {
        Error::request_invalid(format!("parse {s:?} as ISO 8601 basic time failed"))
            .with_source(e)
    })?;

    Ok(t.and_utc())
}
