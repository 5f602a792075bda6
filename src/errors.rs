// Copyright 2025 astonbitecode
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::error::Error;
use std::ffi::NulError;
use std::sync::PoisonError;
use std::{fmt, result};

use cesu8::Cesu8DecodingError;

pub type Result<T> = result::Result<T, JPeerError>;

pub(crate) fn opt_to_res<T>(opt: Option<T>) -> Result<T> {
    opt.ok_or_else(|| {
        JPeerError::RustError("Option was found None while converting to result".to_string())
    })
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum JPeerError {
    GeneralError(String),
    JavaError(String),
    JniError(String),
    RustError(String),
    ParseError(String),
}

impl fmt::Display for JPeerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            JPeerError::GeneralError(message) => write!(f, "{}", message),
            JPeerError::JavaError(message) => write!(f, "{}", message),
            JPeerError::JniError(message) => write!(f, "{}", message),
            JPeerError::RustError(message) => write!(f, "{}", message),
            JPeerError::ParseError(message) => write!(f, "{}", message),
        }
    }
}

impl Error for JPeerError {
    fn description(&self) -> &str {
        match *self {
            JPeerError::GeneralError(_) => "A general error occured",
            JPeerError::JavaError(_) => "An error coming from Java occured",
            JPeerError::JniError(_) => "A JNI error occured",
            JPeerError::RustError(_) => "An error coming from Rust occured",
            JPeerError::ParseError(_) => "A parsing error occured",
        }
    }
}

impl From<NulError> for JPeerError {
    fn from(err: NulError) -> JPeerError {
        JPeerError::JniError(format!("{:?}", err))
    }
}

impl<T> From<PoisonError<T>> for JPeerError {
    fn from(err: PoisonError<T>) -> JPeerError {
        JPeerError::GeneralError(format!("{:?}", err))
    }
}

impl From<Cesu8DecodingError> for JPeerError {
    fn from(err: Cesu8DecodingError) -> JPeerError {
        JPeerError::ParseError(format!("{:?}", err))
    }
}

#[cfg(test)]
mod errors_unit_tests {
    use std::ffi::CString;

    use super::*;

    #[test]
    fn opt_to_res_conversions() {
        assert!(opt_to_res(Some(1)).is_ok());
        assert!(opt_to_res::<i32>(None).is_err());
    }

    #[test]
    fn nul_error_becomes_jni_error() {
        let nul = CString::new("a\0b").err().unwrap();
        match JPeerError::from(nul) {
            JPeerError::JniError(_) => {}
            other => panic!("Unexpected error variant: {:?}", other),
        }
    }

    #[test]
    fn display_prints_the_message() {
        let error = JPeerError::JavaError("boom".to_string());
        assert_eq!(format!("{}", error), "boom");
    }
}
