// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Credentials shared by the metadata client and the direct session driver.

use std::collections::BTreeMap;
use std::fmt;

pub const AUTHORIZATION_HEADER: &str = "Authorization";
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Bearer token and/or API key. The token wins when both are set.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    token: Option<String>,
    api_key: Option<String>,
}

impl Credentials {
    pub fn new(token: Option<String>, api_key: Option<String>) -> Self {
        Self { token, api_key }
    }

    pub fn bearer(token: impl Into<String>) -> Self {
        Self::new(Some(token.into()), None)
    }

    pub fn api_key(api_key: impl Into<String>) -> Self {
        Self::new(None, Some(api_key.into()))
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.token.is_none() && self.api_key.is_none()
    }

    /// Authentication headers sent with every request
    pub fn headers(&self) -> BTreeMap<String, String> {
        let mut headers = BTreeMap::new();
        if let Some(token) = &self.token {
            headers.insert(AUTHORIZATION_HEADER.to_string(), format!("Bearer {}", token));
        } else if let Some(api_key) = &self.api_key {
            headers.insert(API_KEY_HEADER.to_string(), api_key.clone());
        }
        headers
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
