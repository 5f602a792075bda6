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

use jni_sys::jclass;

use crate::api;
use crate::api::object::JObject;
use crate::errors::{opt_to_res, JPeerError};
use crate::logger::debug;
use crate::{cache, errors, jni_utils, utils};

/// Holder of a global reference to a `jclass`.
pub struct JClass {
    inner: JObject,
    name: String,
}

impl JClass {
    /// Looks the class up with `FindClass` and keeps a global reference to it.
    ///
    /// `name` is a JNI class name, like `java/lang/String`.
    pub fn for_name(name: &str) -> errors::Result<JClass> {
        debug(&format!("Looking up class {}", name));
        let jni_env = api::env()?;
        let local = unsafe {
            let fc = opt_to_res(cache::get_jni_find_class())?;
            let c_name = utils::to_c_string_struct(name)?;
            (fc)(jni_env, c_name.as_ptr())
        };
        if jni_utils::check_and_clear_exception(jni_env) || local.is_null() {
            return Err(JPeerError::JavaError(format!(
                "Could not find the class {}",
                name
            )));
        }
        let global = jni_utils::create_global_ref_from_local_ref(local, jni_env)?;
        Ok(JClass {
            inner: unsafe { JObject::from_global_ref(global) },
            name: name.to_string(),
        })
    }

    /// The raw `jclass`.
    pub fn as_class(&self) -> jclass {
        self.inner.as_obj()
    }

    /// The JNI name the class was looked up with.
    pub fn name(&self) -> &str {
        self.name.as_ref()
    }

    pub fn instance(&self) -> &JObject {
        &self.inner
    }
}
