// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! How gateway targets are (de)serialized.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// On-disk representation of a gateway target.
pub trait Format {
    type Value;

    /// Value used when the target does not exist or is blank.
    fn empty() -> Self::Value;

    /// Parse stored bytes. The error is a human-readable reason.
    fn decode(bytes: &[u8]) -> Result<Self::Value, String>;

    fn encode(value: &Self::Value) -> Result<Vec<u8>, serde_json::Error>;
}

/// Structured JSON document of type `T`.
pub struct Json<T>(PhantomData<fn() -> T>);

impl<T> Format for Json<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    type Value = T;

    fn empty() -> T {
        T::default()
    }

    fn decode(bytes: &[u8]) -> Result<T, String> {
        serde_json::from_slice(bytes).map_err(|e| e.to_string())
    }

    fn encode(value: &T) -> Result<Vec<u8>, serde_json::Error> {
        let mut bytes = serde_json::to_vec_pretty(value)?;
        bytes.push(b'\n');
        Ok(bytes)
    }
}

/// Raw UTF-8 text.
pub struct Text;

impl Format for Text {
    type Value = String;

    fn empty() -> String {
        String::new()
    }

    fn decode(bytes: &[u8]) -> Result<String, String> {
        String::from_utf8(bytes.to_vec()).map_err(|e| e.to_string())
    }

    fn encode(value: &String) -> Result<Vec<u8>, serde_json::Error> {
        Ok(value.as_bytes().to_vec())
    }
}
