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

use jni_sys::{jint, jobject, jobjectRefType, JNIEnv, JNI_TRUE};

use crate::errors::{opt_to_res, JPeerError};
use crate::logger::error;
use crate::{cache, errors};

/// Promotes a reference to a global one and, if the input was a local
/// reference, deletes the local after the promotion.
pub(crate) fn create_global_ref_from_local_ref(
    local_ref: jobject,
    jni_env: *mut JNIEnv,
) -> errors::Result<jobject> {
    unsafe {
        let ngr = opt_to_res(cache::get_jni_new_global_ref())?;
        let dlr = opt_to_res(cache::get_jni_delete_local_ref())?;
        let gort = opt_to_res(cache::get_jni_get_object_ref_type())?;

        let global = (ngr)(jni_env, local_ref);
        // If local ref, delete it
        if (gort)(jni_env, local_ref) as jint == jobjectRefType::JNILocalRefType as jint {
            (dlr)(jni_env, local_ref);
        }
        if check_and_clear_exception(jni_env) {
            Err(JPeerError::JavaError(
                "An Exception was thrown by Java while creating a global ref... Please check the logs or the console.".to_string(),
            ))
        } else {
            Ok(global)
        }
    }
}

/// Deletes a global Java ref from the memory
pub(crate) fn delete_java_ref(jni_env: *mut JNIEnv, jinstance: jobject) {
    unsafe {
        match cache::get_jni_delete_global_ref() {
            Some(dgr) => {
                (dgr)(jni_env, jinstance);
                if check_and_clear_exception(jni_env) {
                    error("An Exception was thrown by Java while deleting a global ref... Please check the logs or the console.");
                }
            }
            None => {
                error("Could not retrieve the native functions to drop the Java ref. This may lead to memory leaks");
            }
        }
    }
}

/// Returns true if a Java exception was pending. The exception is described
/// and cleared, so the environment is usable again afterwards.
pub(crate) fn check_and_clear_exception(jni_env: *mut JNIEnv) -> bool {
    unsafe {
        match (
            cache::get_jni_exception_check(),
            cache::get_jni_exception_describe(),
            cache::get_jni_exception_clear(),
        ) {
            (Some(exc), Some(exd), Some(exclear)) => {
                if (exc)(jni_env) == JNI_TRUE {
                    (exd)(jni_env);
                    (exclear)(jni_env);
                    true
                } else {
                    false
                }
            }
            (_, _, _) => {
                error("Could not retrieve the native functions to check for Java exceptions.");
                false
            }
        }
    }
}

#[cfg(test)]
mod jni_utils_unit_tests {
    use std::ptr;

    use super::*;

    #[test]
    fn exception_check_without_cached_functions_reports_none() {
        // The cache is empty on this thread, so the environment is never
        // dereferenced.
        assert!(!check_and_clear_exception(ptr::null_mut()));
    }
}
