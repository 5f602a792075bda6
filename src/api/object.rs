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

use jni_sys::jobject;

use crate::api;
use crate::errors::{opt_to_res, JPeerError};
use crate::logger::{debug, error};
use crate::{cache, errors, jni_utils};

/// Owner of a global reference to a Java object.
///
/// The global reference is deleted exactly once, when the `JObject` is
/// dropped. Global references may cross threads, so the `JObject` is `Send`.
pub struct JObject {
    obj: jobject,
}

impl JObject {
    /// Creates a `JObject` that holds no Java object.
    ///
    /// Useful as the peer of a class on which only static methods are called.
    pub fn null() -> JObject {
        JObject {
            obj: ptr::null_mut(),
        }
    }

    /// Promotes `obj` to a global reference and takes ownership of it.
    ///
    /// If `obj` was a local reference, the local is deleted after the
    /// promotion. A null `obj` yields an empty holder.
    pub fn from_local_ref(obj: jobject) -> errors::Result<JObject> {
        if obj.is_null() {
            return Ok(JObject::null());
        }
        let jni_env = api::env()?;
        let global = jni_utils::create_global_ref_from_local_ref(obj, jni_env)?;
        Ok(JObject { obj: global })
    }

    /// Takes ownership of an already global reference.
    ///
    /// # Safety
    ///
    /// `obj` must be null or a global reference that is not owned elsewhere.
    /// Passing a local reference or a global reference that another owner
    /// will delete leads to a double free in the JVM.
    pub unsafe fn from_global_ref(obj: jobject) -> JObject {
        JObject { obj }
    }

    /// The raw `jobject`. Null if the holder is empty.
    pub fn as_obj(&self) -> jobject {
        self.obj
    }

    pub fn is_null(&self) -> bool {
        self.obj.is_null()
    }

    /// Creates a new global reference to the same Java object.
    pub fn try_clone(&self) -> errors::Result<JObject> {
        if self.obj.is_null() {
            return Ok(JObject::null());
        }
        let jni_env = api::env()?;
        let cloned = unsafe {
            let ngr = opt_to_res(cache::get_jni_new_global_ref())?;
            (ngr)(jni_env, self.obj)
        };
        // NewGlobalRef may return null without a pending exception, e.g. when
        // the JVM is out of memory
        if jni_utils::check_and_clear_exception(jni_env) || cloned.is_null() {
            Err(JPeerError::JavaError(
                "Could not clone a global ref... Please check the logs or the console.".to_string(),
            ))
        } else {
            Ok(JObject { obj: cloned })
        }
    }

    /// Releases ownership of the global reference without deleting it.
    /// The caller becomes responsible for deleting it.
    pub fn into_raw(mut self) -> jobject {
        let obj = self.obj;
        self.obj = ptr::null_mut();
        obj
    }
}

impl Drop for JObject {
    fn drop(&mut self) {
        if !self.obj.is_null() {
            debug("Dropping a global ref holder");
            match api::env() {
                Ok(jni_env) => {
                    jni_utils::delete_java_ref(jni_env, self.obj);
                    self.obj = ptr::null_mut();
                }
                Err(_) => {
                    error("Could not retrieve a JNIEnv to drop a global ref. This may lead to memory leaks");
                }
            }
        }
    }
}

// Global references are valid on any thread
unsafe impl Send for JObject {}

#[cfg(test)]
mod object_unit_tests {
    use super::*;

    #[test]
    fn a_null_holder_is_empty() {
        let object = JObject::null();
        assert!(object.is_null());
        assert!(object.as_obj().is_null());
    }

    #[test]
    fn dropping_a_null_holder_needs_no_jvm() {
        let object = JObject::null();
        drop(object);
    }

    #[test]
    fn into_raw_releases_ownership() {
        let object = unsafe { JObject::from_global_ref(ptr::null_mut()) };
        // No deletion happens on drop after into_raw
        assert!(object.into_raw().is_null());
    }

    #[test]
    fn cloning_a_null_holder_stays_null() {
        let object = JObject::null();
        let cloned = object.try_clone().unwrap();
        assert!(cloned.is_null());
    }

    #[test]
    fn cloning_errors_when_the_jvm_returns_a_null_ref() {
        unsafe extern "system" fn null_new_global_ref(
            _env: *mut jni_sys::JNIEnv,
            _lobj: jobject,
        ) -> jobject {
            ptr::null_mut()
        }

        // The env and the object are never dereferenced. The cache is
        // thread local, so other threads are not affected.
        cache::set_thread_local_env(Some(0x100 as *mut jni_sys::JNIEnv));
        cache::set_jni_new_global_ref(Some(null_new_global_ref));

        let object = unsafe { JObject::from_global_ref(0x200 as jobject) };
        assert!(object.try_clone().is_err());

        let _ = object.into_raw();
        cache::set_jni_new_global_ref(None);
        cache::set_thread_local_env(None);
    }

    #[test]
    fn from_local_ref_with_null_yields_an_empty_holder() {
        let object = JObject::from_local_ref(ptr::null_mut()).unwrap();
        assert!(object.is_null());
    }
}
