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

use std::ptr;
use std::slice;

use jni_sys::{jchar, jstring};

use crate::api;
use crate::api::object::JObject;
use crate::errors::{opt_to_res, JPeerError};
use crate::{cache, errors, jni_utils, utils};

/// Holder of a global reference to a Java string, with conversions from and
/// to native strings.
///
/// Conversions go through Java's modified UTF-8 (CESU-8), so any `String`
/// round-trips, supplementary characters included.
pub struct JString {
    inner: JObject,
}

impl JString {
    /// Creates a new Java string with the contents of `string`.
    pub fn new(string: &str) -> errors::Result<JString> {
        let jni_env = api::env()?;
        let local: jstring = unsafe {
            let nsu = opt_to_res(cache::get_jni_new_string_utf())?;
            let c_string = utils::to_c_string_struct(string)?;
            (nsu)(jni_env, c_string.as_ptr())
        };
        if jni_utils::check_and_clear_exception(jni_env) || local.is_null() {
            return Err(JPeerError::JavaError(
                "An Exception was thrown by Java while creating a String".to_string(),
            ));
        }
        Ok(JString {
            inner: JObject::from_local_ref(local)?,
        })
    }

    /// Promotes a (possibly local) `jstring` reference to a global one and
    /// takes ownership of it.
    pub fn from_local_ref(string: jstring) -> errors::Result<JString> {
        Ok(JString {
            inner: JObject::from_local_ref(string)?,
        })
    }

    /// Takes ownership of an already global `jstring` reference.
    ///
    /// # Safety
    ///
    /// Same contract as [JObject::from_global_ref].
    pub unsafe fn from_global_ref(string: jstring) -> JString {
        JString {
            inner: JObject::from_global_ref(string),
        }
    }

    /// The raw `jstring`. Null if the holder is empty.
    pub fn as_jstring(&self) -> jstring {
        self.inner.as_obj()
    }

    pub fn instance(&self) -> &JObject {
        &self.inner
    }

    /// Copies the Java string into a Rust `String`.
    pub fn to_rust(&self) -> errors::Result<String> {
        let string = self.non_null()?;
        let jni_env = api::env()?;
        unsafe {
            let gsuc = opt_to_res(cache::get_jni_get_string_utf_chars())?;
            let rsuc = opt_to_res(cache::get_jni_release_string_utf_chars())?;

            let chars = (gsuc)(jni_env, string, ptr::null_mut());
            if jni_utils::check_and_clear_exception(jni_env) || chars.is_null() {
                return Err(JPeerError::JavaError(
                    "An Exception was thrown by Java while reading a String".to_string(),
                ));
            }
            let result = utils::to_rust_string(chars);
            (rsuc)(jni_env, string, chars);
            result
        }
    }

    /// The length of the string in modified UTF-8 bytes.
    pub fn utf_len(&self) -> errors::Result<usize> {
        let string = self.non_null()?;
        let jni_env = api::env()?;
        let length = unsafe {
            let gsul = opt_to_res(cache::get_jni_get_string_utf_length())?;
            (gsul)(jni_env, string)
        };
        Ok(length as usize)
    }

    /// The length of the string in UTF-16 units.
    pub fn len(&self) -> errors::Result<usize> {
        let string = self.non_null()?;
        let jni_env = api::env()?;
        let length = unsafe {
            let gsl = opt_to_res(cache::get_jni_get_string_length())?;
            (gsl)(jni_env, string)
        };
        Ok(length as usize)
    }

    pub fn is_empty(&self) -> errors::Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Copies the UTF-16 units of the Java string.
    pub fn chars(&self) -> errors::Result<Vec<jchar>> {
        let string = self.non_null()?;
        let jni_env = api::env()?;
        unsafe {
            let gsc = opt_to_res(cache::get_jni_get_string_chars())?;
            let rsc = opt_to_res(cache::get_jni_release_string_chars())?;
            let gsl = opt_to_res(cache::get_jni_get_string_length())?;

            let chars = (gsc)(jni_env, string, ptr::null_mut());
            if jni_utils::check_and_clear_exception(jni_env) || chars.is_null() {
                return Err(JPeerError::JavaError(
                    "An Exception was thrown by Java while reading the String characters"
                        .to_string(),
                ));
            }
            let length = (gsl)(jni_env, string);
            let copied = slice::from_raw_parts(chars, length as usize).to_vec();
            (rsc)(jni_env, string, chars);
            Ok(copied)
        }
    }

    fn non_null(&self) -> errors::Result<jstring> {
        if self.inner.is_null() {
            Err(JPeerError::JniError(
                "The JString holds no Java string".to_string(),
            ))
        } else {
            Ok(self.inner.as_obj())
        }
    }
}

#[cfg(test)]
mod string_unit_tests {
    use super::*;

    #[test]
    fn accessors_of_an_empty_holder_do_not_reach_the_jvm() {
        let string = unsafe { JString::from_global_ref(ptr::null_mut()) };
        assert!(string.to_rust().is_err());
        assert!(string.utf_len().is_err());
        assert!(string.len().is_err());
        assert!(string.is_empty().is_err());
        assert!(string.chars().is_err());
        assert!(string.as_jstring().is_null());
    }

    #[test]
    fn a_null_local_ref_yields_an_empty_holder() {
        let string = JString::from_local_ref(ptr::null_mut()).unwrap();
        assert!(string.instance().is_null());
    }
}
