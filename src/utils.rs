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

use std::ffi::{CStr, CString};

use cesu8::{from_java_cesu8, to_java_cesu8};
use libc::c_char;

use crate::errors;

/// Decodes a Java modified UTF-8 (CESU-8) C string into a Rust `String`.
pub(crate) fn to_rust_string(pointer: *const c_char) -> errors::Result<String> {
    let slice = unsafe { CStr::from_ptr(pointer).to_bytes() };
    Ok(from_java_cesu8(slice)?.to_string())
}

/// Encodes a Rust string as a Java modified UTF-8 (CESU-8) `CString`,
/// suitable for passing to `NewStringUTF` and `FindClass`.
pub(crate) fn to_c_string_struct(string: &str) -> errors::Result<CString> {
    let enc = to_java_cesu8(string).into_owned();
    Ok(CString::new(enc)?)
}

#[cfg(test)]
mod utils_unit_tests {
    use super::*;

    #[test]
    fn string_conversion_survives_supplementary_characters() {
        // U+10400 encodes as a surrogate pair in modified UTF-8
        let original = "peer-\u{10400}";
        let c_string = to_c_string_struct(original).unwrap();
        let back = to_rust_string(c_string.as_ptr()).unwrap();
        assert_eq!(original, back);
    }

    #[test]
    fn interior_nul_uses_the_two_byte_form() {
        // Modified UTF-8 encodes U+0000 as 0xC0 0x80, so the CString stays intact
        let c_string = to_c_string_struct("a\0b").unwrap();
        assert_eq!(to_rust_string(c_string.as_ptr()).unwrap(), "a\0b");
    }
}
