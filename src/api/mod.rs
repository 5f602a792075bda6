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

use std::os::raw::c_void;
use std::ptr;

use jni_sys::{
    jint, JNIEnv, JavaVM, JNI_EDETACHED, JNI_EEXIST, JNI_EINVAL, JNI_ENOMEM, JNI_ERR,
    JNI_EVERSION, JNI_OK, JNI_VERSION_1_6,
};

use crate::errors::JPeerError;
use crate::logger::debug;
use crate::{cache, errors};

pub(crate) mod class;
pub(crate) mod object;
pub(crate) mod peer;
pub(crate) mod string;

/// Registers the process-wide JavaVM. Should be called from `JNI_OnLoad`,
/// before any wrapper of this crate is used.
pub fn set_jvm(jvm: *mut JavaVM) -> errors::Result<()> {
    // Register the JavaVM atomically
    let _g = cache::MUTEX.lock()?;
    debug("Registering the JavaVM for the process");
    cache::set_jvm_handle(jvm)
}

/// Returns the JavaVM that was registered with [set_jvm].
pub fn jvm() -> errors::Result<*mut JavaVM> {
    match cache::get_jvm_handle()? {
        Some(jvm) => Ok(jvm),
        None => Err(JPeerError::JniError(
            "No JavaVM is registered. set_jvm should be called from JNI_OnLoad first".to_string(),
        )),
    }
}

/// Returns the JNI environment of the current thread.
///
/// The environment is cached in a thread local. If the thread is not yet
/// attached to the JVM, it gets attached and the JNI functions that this
/// crate uses are cached for the thread as well.
pub fn env() -> errors::Result<*mut JNIEnv> {
    if let Some(jni_env) = cache::get_thread_local_env_opt() {
        return Ok(jni_env);
    }

    let jvm = jvm()?;
    let jni_env = attach_current_thread(jvm)?;
    unsafe {
        init_thread_cache(jni_env);
    }
    cache::set_thread_local_env(Some(jni_env));
    Ok(jni_env)
}

/// Detaches the current thread from the JVM and forgets its cached
/// environment. Calling it on a thread that was never attached is a noop.
pub fn detach_thread() {
    if cache::get_thread_local_env_opt().is_some() {
        if let Ok(Some(jvm)) = cache::get_jvm_handle() {
            debug("Detaching the current thread from the JVM");
            unsafe {
                ((**jvm).v1_4.DetachCurrentThread)(jvm);
            }
        }
        cache::set_thread_local_env(None);
    }
}

fn attach_current_thread(jvm: *mut JavaVM) -> errors::Result<*mut JNIEnv> {
    let mut jni_env: *mut JNIEnv = ptr::null_mut();

    let result = unsafe {
        let get_env_result = ((**jvm).v1_4.GetEnv)(
            jvm,
            (&mut jni_env as *mut *mut JNIEnv) as *mut *mut c_void,
            JNI_VERSION_1_6,
        );
        match get_env_result {
            JNI_EDETACHED => {
                debug("The current thread is not attached to the JVM. Attaching it...");
                ((**jvm).v1_4.AttachCurrentThread)(
                    jvm,
                    (&mut jni_env as *mut *mut JNIEnv) as *mut *mut c_void,
                    ptr::null_mut(),
                )
            }
            other => other,
        }
    };

    if result != JNI_OK || jni_env.is_null() {
        Err(JPeerError::JniError(format!(
            "Could not attach the current thread to the JVM: {}",
            jni_error_message(result)
        )))
    } else {
        Ok(jni_env)
    }
}

// Caches the JNI functions that the wrappers use, so that the environment
// table is dereferenced once per thread.
unsafe fn init_thread_cache(jni_env: *mut JNIEnv) {
    let _ = cache::get_jni_find_class()
        .or_else(|| cache::set_jni_find_class(Some((**jni_env).v1_6.FindClass)));
    let _ = cache::get_jni_new_global_ref()
        .or_else(|| cache::set_jni_new_global_ref(Some((**jni_env).v1_6.NewGlobalRef)));
    let _ = cache::get_jni_delete_global_ref()
        .or_else(|| cache::set_jni_delete_global_ref(Some((**jni_env).v1_6.DeleteGlobalRef)));
    let _ = cache::get_jni_delete_local_ref()
        .or_else(|| cache::set_jni_delete_local_ref(Some((**jni_env).v1_6.DeleteLocalRef)));
    let _ = cache::get_jni_get_object_ref_type()
        .or_else(|| cache::set_jni_get_object_ref_type(Some((**jni_env).v1_6.GetObjectRefType)));
    let _ = cache::get_jni_new_string_utf()
        .or_else(|| cache::set_jni_new_string_utf(Some((**jni_env).v1_6.NewStringUTF)));
    let _ = cache::get_jni_get_string_utf_chars()
        .or_else(|| cache::set_jni_get_string_utf_chars(Some((**jni_env).v1_6.GetStringUTFChars)));
    let _ = cache::get_jni_release_string_utf_chars().or_else(|| {
        cache::set_jni_release_string_utf_chars(Some((**jni_env).v1_6.ReleaseStringUTFChars))
    });
    let _ = cache::get_jni_get_string_utf_length()
        .or_else(|| cache::set_jni_get_string_utf_length(Some((**jni_env).v1_6.GetStringUTFLength)));
    let _ = cache::get_jni_get_string_chars()
        .or_else(|| cache::set_jni_get_string_chars(Some((**jni_env).v1_6.GetStringChars)));
    let _ = cache::get_jni_release_string_chars()
        .or_else(|| cache::set_jni_release_string_chars(Some((**jni_env).v1_6.ReleaseStringChars)));
    let _ = cache::get_jni_get_string_length()
        .or_else(|| cache::set_jni_get_string_length(Some((**jni_env).v1_6.GetStringLength)));
    let _ = cache::get_jni_exception_check()
        .or_else(|| cache::set_jni_exception_check(Some((**jni_env).v1_6.ExceptionCheck)));
    let _ = cache::get_jni_exception_describe()
        .or_else(|| cache::set_jni_exception_describe(Some((**jni_env).v1_6.ExceptionDescribe)));
    let _ = cache::get_jni_exception_clear()
        .or_else(|| cache::set_jni_exception_clear(Some((**jni_env).v1_6.ExceptionClear)));
}

pub(crate) fn jni_error_message(code: jint) -> &'static str {
    match code {
        JNI_EDETACHED => "thread detached from the JVM",
        JNI_EEXIST => "JVM already created",
        JNI_EINVAL => "invalid arguments",
        JNI_ENOMEM => "not enough memory",
        JNI_ERR => "unknown error",
        JNI_EVERSION => "JNI version error",
        _ => "unknown JNI error value",
    }
}

#[cfg(test)]
mod api_unit_tests {
    use super::*;

    #[test]
    fn jni_error_messages_are_mapped() {
        assert_eq!(jni_error_message(JNI_EDETACHED), "thread detached from the JVM");
        assert_eq!(jni_error_message(JNI_EVERSION), "JNI version error");
        assert_eq!(jni_error_message(JNI_ENOMEM), "not enough memory");
        assert_eq!(jni_error_message(12345), "unknown JNI error value");
    }

    #[test]
    fn jvm_registration_round_trip() {
        // The only test that touches the process-wide JVM handle.
        // The pointer is never dereferenced.
        assert!(jvm().is_err());
        let fake_jvm = 0x2000 as *mut JavaVM;
        set_jvm(fake_jvm).unwrap();
        assert_eq!(jvm().unwrap(), fake_jvm);
    }

    #[test]
    fn detach_of_an_unattached_thread_is_a_noop() {
        detach_thread();
    }

    #[test]
    fn the_invocation_functions_are_reached_through_their_version_struct() {
        // Compile-time check only. The function pointers live in the
        // versioned part of the JNIInvokeInterface_ table.
        unsafe fn take(jvm: *mut JavaVM) {
            let _: unsafe extern "system" fn(*mut JavaVM, *mut *mut c_void, jint) -> jint =
                (**jvm).v1_4.GetEnv;
            let _: unsafe extern "system" fn(*mut JavaVM, *mut *mut c_void, *mut c_void) -> jint =
                (**jvm).v1_4.AttachCurrentThread;
            let _: unsafe extern "system" fn(*mut JavaVM) -> jint =
                (**jvm).v1_4.DetachCurrentThread;
        }
        let _ = take as unsafe fn(*mut JavaVM);
    }
}
