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

use std::cell::RefCell;
use std::sync::Mutex;

use jni_sys::{jboolean, jchar, jclass, jobject, jobjectRefType, jsize, jstring, JNIEnv, JavaVM};
use libc::c_char;

use crate::errors;

pub(crate) type JniFindClass =
    unsafe extern "system" fn(env: *mut JNIEnv, name: *const c_char) -> jclass;
pub(crate) type JniNewGlobalRef =
    unsafe extern "system" fn(env: *mut JNIEnv, lobj: jobject) -> jobject;
pub(crate) type JniDeleteGlobalRef = unsafe extern "system" fn(env: *mut JNIEnv, gref: jobject);
pub(crate) type JniDeleteLocalRef = unsafe extern "system" fn(env: *mut JNIEnv, obj: jobject);
pub(crate) type JniGetObjectRefType =
    unsafe extern "system" fn(env: *mut JNIEnv, obj: jobject) -> jobjectRefType;
pub(crate) type JniNewStringUTF =
    unsafe extern "system" fn(env: *mut JNIEnv, utf: *const c_char) -> jstring;
#[allow(non_snake_case)]
pub(crate) type JniGetStringUTFChars = unsafe extern "system" fn(
    env: *mut JNIEnv,
    str: jstring,
    isCopy: *mut jboolean,
) -> *const c_char;
pub(crate) type JniReleaseStringUTFChars =
    unsafe extern "system" fn(env: *mut JNIEnv, str: jstring, chars: *const c_char);
pub(crate) type JniGetStringUTFLength =
    unsafe extern "system" fn(env: *mut JNIEnv, str: jstring) -> jsize;
#[allow(non_snake_case)]
pub(crate) type JniGetStringChars = unsafe extern "system" fn(
    env: *mut JNIEnv,
    str: jstring,
    isCopy: *mut jboolean,
) -> *const jchar;
pub(crate) type JniReleaseStringChars =
    unsafe extern "system" fn(env: *mut JNIEnv, str: jstring, chars: *const jchar);
pub(crate) type JniGetStringLength =
    unsafe extern "system" fn(env: *mut JNIEnv, str: jstring) -> jsize;
pub(crate) type JniExceptionCheck = unsafe extern "system" fn(_: *mut JNIEnv) -> jboolean;
pub(crate) type JniExceptionDescribe = unsafe extern "system" fn(_: *mut JNIEnv);
pub(crate) type JniExceptionClear = unsafe extern "system" fn(_: *mut JNIEnv);

/// The process-wide JavaVM pointer. The JVM guarantees the pointed-to
/// invocation interface is valid for the lifetime of the VM.
pub(crate) struct JvmHandle(pub(crate) *mut JavaVM);

unsafe impl Send for JvmHandle {}

lazy_static! {
    // Synchronizes the registration of the JavaVM
    pub(crate) static ref MUTEX: Mutex<bool> = Mutex::new(false);
    // The JavaVM that was registered in JNI_OnLoad, for general use
    pub(crate) static ref JVM_HANDLE: Mutex<Option<JvmHandle>> = Mutex::new(None);
}

thread_local! {
    pub(crate) static JNI_ENV: RefCell<Option<*mut JNIEnv>> = RefCell::new(None);
    pub(crate) static JNI_FIND_CLASS: RefCell<Option<JniFindClass>> = RefCell::new(None);
    pub(crate) static JNI_NEW_GLOBAL_REF: RefCell<Option<JniNewGlobalRef>> = RefCell::new(None);
    pub(crate) static JNI_DELETE_GLOBAL_REF: RefCell<Option<JniDeleteGlobalRef>> = RefCell::new(None);
    pub(crate) static JNI_DELETE_LOCAL_REF: RefCell<Option<JniDeleteLocalRef>> = RefCell::new(None);
    pub(crate) static JNI_GET_OBJECT_REF_TYPE: RefCell<Option<JniGetObjectRefType>> = RefCell::new(None);
    pub(crate) static JNI_NEW_STRING_UTF: RefCell<Option<JniNewStringUTF>> = RefCell::new(None);
    pub(crate) static JNI_GET_STRING_UTF_CHARS: RefCell<Option<JniGetStringUTFChars>> = RefCell::new(None);
    pub(crate) static JNI_RELEASE_STRING_UTF_CHARS: RefCell<Option<JniReleaseStringUTFChars>> = RefCell::new(None);
    pub(crate) static JNI_GET_STRING_UTF_LENGTH: RefCell<Option<JniGetStringUTFLength>> = RefCell::new(None);
    pub(crate) static JNI_GET_STRING_CHARS: RefCell<Option<JniGetStringChars>> = RefCell::new(None);
    pub(crate) static JNI_RELEASE_STRING_CHARS: RefCell<Option<JniReleaseStringChars>> = RefCell::new(None);
    pub(crate) static JNI_GET_STRING_LENGTH: RefCell<Option<JniGetStringLength>> = RefCell::new(None);
    pub(crate) static JNI_EXCEPTION_CHECK: RefCell<Option<JniExceptionCheck>> = RefCell::new(None);
    pub(crate) static JNI_EXCEPTION_DESCRIBE: RefCell<Option<JniExceptionDescribe>> = RefCell::new(None);
    pub(crate) static JNI_EXCEPTION_CLEAR: RefCell<Option<JniExceptionClear>> = RefCell::new(None);
}

pub(crate) fn set_jvm_handle(jvm: *mut JavaVM) -> errors::Result<()> {
    let mut guard = JVM_HANDLE.lock()?;
    *guard = Some(JvmHandle(jvm));
    Ok(())
}

pub(crate) fn get_jvm_handle() -> errors::Result<Option<*mut JavaVM>> {
    let guard = JVM_HANDLE.lock()?;
    Ok(guard.as_ref().map(|handle| handle.0))
}

pub(crate) fn get_thread_local_env_opt() -> Option<*mut JNIEnv> {
    JNI_ENV.with(|existing_jni_env_opt| *existing_jni_env_opt.borrow())
}

pub(crate) fn set_thread_local_env(jni_env_opt: Option<*mut JNIEnv>) {
    JNI_ENV.with(|existing_jni_env_opt| {
        *existing_jni_env_opt.borrow_mut() = jni_env_opt;
    });
}

pub(crate) fn get_thread_local_env() -> errors::Result<*mut JNIEnv> {
    match get_thread_local_env_opt() {
        Some(env) => Ok(env),
        None => Err(errors::JPeerError::JniError(
            "Could not find the JNIEnv in the thread local".to_string(),
        )),
    }
}

pub(crate) fn set_jni_find_class(j: Option<JniFindClass>) -> Option<JniFindClass> {
    JNI_FIND_CLASS.with(|opt| {
        *opt.borrow_mut() = j;
    });
    get_jni_find_class()
}

pub(crate) fn get_jni_find_class() -> Option<JniFindClass> {
    JNI_FIND_CLASS.with(|opt| *opt.borrow())
}

pub(crate) fn set_jni_new_global_ref(j: Option<JniNewGlobalRef>) -> Option<JniNewGlobalRef> {
    JNI_NEW_GLOBAL_REF.with(|opt| {
        *opt.borrow_mut() = j;
    });
    get_jni_new_global_ref()
}

pub(crate) fn get_jni_new_global_ref() -> Option<JniNewGlobalRef> {
    JNI_NEW_GLOBAL_REF.with(|opt| *opt.borrow())
}

pub(crate) fn set_jni_delete_global_ref(
    j: Option<JniDeleteGlobalRef>,
) -> Option<JniDeleteGlobalRef> {
    JNI_DELETE_GLOBAL_REF.with(|opt| {
        *opt.borrow_mut() = j;
    });
    get_jni_delete_global_ref()
}

pub(crate) fn get_jni_delete_global_ref() -> Option<JniDeleteGlobalRef> {
    JNI_DELETE_GLOBAL_REF.with(|opt| *opt.borrow())
}

pub(crate) fn set_jni_delete_local_ref(j: Option<JniDeleteLocalRef>) -> Option<JniDeleteLocalRef> {
    JNI_DELETE_LOCAL_REF.with(|opt| {
        *opt.borrow_mut() = j;
    });
    get_jni_delete_local_ref()
}

pub(crate) fn get_jni_delete_local_ref() -> Option<JniDeleteLocalRef> {
    JNI_DELETE_LOCAL_REF.with(|opt| *opt.borrow())
}

pub(crate) fn set_jni_get_object_ref_type(
    j: Option<JniGetObjectRefType>,
) -> Option<JniGetObjectRefType> {
    JNI_GET_OBJECT_REF_TYPE.with(|opt| {
        *opt.borrow_mut() = j;
    });
    get_jni_get_object_ref_type()
}

pub(crate) fn get_jni_get_object_ref_type() -> Option<JniGetObjectRefType> {
    JNI_GET_OBJECT_REF_TYPE.with(|opt| *opt.borrow())
}

pub(crate) fn set_jni_new_string_utf(j: Option<JniNewStringUTF>) -> Option<JniNewStringUTF> {
    JNI_NEW_STRING_UTF.with(|opt| {
        *opt.borrow_mut() = j;
    });
    get_jni_new_string_utf()
}

pub(crate) fn get_jni_new_string_utf() -> Option<JniNewStringUTF> {
    JNI_NEW_STRING_UTF.with(|opt| *opt.borrow())
}

pub(crate) fn set_jni_get_string_utf_chars(
    j: Option<JniGetStringUTFChars>,
) -> Option<JniGetStringUTFChars> {
    JNI_GET_STRING_UTF_CHARS.with(|opt| {
        *opt.borrow_mut() = j;
    });
    get_jni_get_string_utf_chars()
}

pub(crate) fn get_jni_get_string_utf_chars() -> Option<JniGetStringUTFChars> {
    JNI_GET_STRING_UTF_CHARS.with(|opt| *opt.borrow())
}

pub(crate) fn set_jni_release_string_utf_chars(
    j: Option<JniReleaseStringUTFChars>,
) -> Option<JniReleaseStringUTFChars> {
    JNI_RELEASE_STRING_UTF_CHARS.with(|opt| {
        *opt.borrow_mut() = j;
    });
    get_jni_release_string_utf_chars()
}

pub(crate) fn get_jni_release_string_utf_chars() -> Option<JniReleaseStringUTFChars> {
    JNI_RELEASE_STRING_UTF_CHARS.with(|opt| *opt.borrow())
}

pub(crate) fn set_jni_get_string_utf_length(
    j: Option<JniGetStringUTFLength>,
) -> Option<JniGetStringUTFLength> {
    JNI_GET_STRING_UTF_LENGTH.with(|opt| {
        *opt.borrow_mut() = j;
    });
    get_jni_get_string_utf_length()
}

pub(crate) fn get_jni_get_string_utf_length() -> Option<JniGetStringUTFLength> {
    JNI_GET_STRING_UTF_LENGTH.with(|opt| *opt.borrow())
}

pub(crate) fn set_jni_get_string_chars(j: Option<JniGetStringChars>) -> Option<JniGetStringChars> {
    JNI_GET_STRING_CHARS.with(|opt| {
        *opt.borrow_mut() = j;
    });
    get_jni_get_string_chars()
}

pub(crate) fn get_jni_get_string_chars() -> Option<JniGetStringChars> {
    JNI_GET_STRING_CHARS.with(|opt| *opt.borrow())
}

pub(crate) fn set_jni_release_string_chars(
    j: Option<JniReleaseStringChars>,
) -> Option<JniReleaseStringChars> {
    JNI_RELEASE_STRING_CHARS.with(|opt| {
        *opt.borrow_mut() = j;
    });
    get_jni_release_string_chars()
}

pub(crate) fn get_jni_release_string_chars() -> Option<JniReleaseStringChars> {
    JNI_RELEASE_STRING_CHARS.with(|opt| *opt.borrow())
}

pub(crate) fn set_jni_get_string_length(
    j: Option<JniGetStringLength>,
) -> Option<JniGetStringLength> {
    JNI_GET_STRING_LENGTH.with(|opt| {
        *opt.borrow_mut() = j;
    });
    get_jni_get_string_length()
}

pub(crate) fn get_jni_get_string_length() -> Option<JniGetStringLength> {
    JNI_GET_STRING_LENGTH.with(|opt| *opt.borrow())
}

pub(crate) fn set_jni_exception_check(j: Option<JniExceptionCheck>) -> Option<JniExceptionCheck> {
    JNI_EXCEPTION_CHECK.with(|opt| {
        *opt.borrow_mut() = j;
    });
    get_jni_exception_check()
}

pub(crate) fn get_jni_exception_check() -> Option<JniExceptionCheck> {
    JNI_EXCEPTION_CHECK.with(|opt| *opt.borrow())
}

pub(crate) fn set_jni_exception_describe(
    j: Option<JniExceptionDescribe>,
) -> Option<JniExceptionDescribe> {
    JNI_EXCEPTION_DESCRIBE.with(|opt| {
        *opt.borrow_mut() = j;
    });
    get_jni_exception_describe()
}

pub(crate) fn get_jni_exception_describe() -> Option<JniExceptionDescribe> {
    JNI_EXCEPTION_DESCRIBE.with(|opt| *opt.borrow())
}

pub(crate) fn set_jni_exception_clear(j: Option<JniExceptionClear>) -> Option<JniExceptionClear> {
    JNI_EXCEPTION_CLEAR.with(|opt| {
        *opt.borrow_mut() = j;
    });
    get_jni_exception_clear()
}

pub(crate) fn get_jni_exception_clear() -> Option<JniExceptionClear> {
    JNI_EXCEPTION_CLEAR.with(|opt| *opt.borrow())
}

#[cfg(test)]
mod cache_unit_tests {
    use super::*;

    #[test]
    fn thread_local_env_is_initially_absent() {
        assert!(get_thread_local_env().is_err());
        assert!(get_thread_local_env_opt().is_none());
    }

    #[test]
    fn thread_local_env_set_and_clear() {
        // A dangling but never dereferenced pointer is enough for the cache
        let fake_env = 0x1000 as *mut JNIEnv;
        set_thread_local_env(Some(fake_env));
        assert_eq!(get_thread_local_env().unwrap(), fake_env);
        set_thread_local_env(None);
        assert!(get_thread_local_env_opt().is_none());
    }
}
