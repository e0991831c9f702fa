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

//! Utility functions and types.

use std::fmt::Debug;

/// Redacts a value for `Debug` output so secrets never reach logs.
///
/// - Empty input renders as `EMPTY`.
/// - Input shorter than 12 bytes (or not valid to slice) renders as `***`.
/// - Longer input keeps only the first and last three characters.
///
/// Access key ids stay distinguishable while secrets stay hidden.
pub struct Redact<'a>(&'a str);

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact(value)
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact(value.as_str())
    }
}

impl<'a> From<&'a Option<String>> for Redact<'a> {
    fn from(value: &'a Option<String>) -> Self {
        match value {
            None => Redact(""),
            Some(v) => Redact(v),
        }
    }
}

impl Debug for Redact<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let length = self.0.len();
        if length == 0 {
            return f.write_str("EMPTY");
        }
        if length < 12 {
            return f.write_str("***");
        }

        match (self.0.get(..3), self.0.get(length - 3..)) {
            (Some(head), Some(tail)) => {
                f.write_str(head)?;
                f.write_str("***")?;
                f.write_str(tail)
            }
            _ => f.write_str("***"),
        }
    }
}
