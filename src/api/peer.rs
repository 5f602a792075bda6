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

use jni_sys::{jobject, JNIEnv};

use crate::api;
use crate::api::object::JObject;
use crate::errors;

/// Base building block for generated "managed peer" types.
///
/// A managed peer mirrors one Java object (or none, when only static methods
/// of the peered class are called) and keeps it alive through a [JObject].
pub struct ManagedPeer {
    object: JObject,
}

impl ManagedPeer {
    /// Creates a peer with no Java object, for static-only use.
    pub fn new() -> ManagedPeer {
        ManagedPeer {
            object: JObject::null(),
        }
    }

    /// Creates a peer bound to the Java object `object`, promoting the
    /// reference to a global one.
    pub fn from_local_ref(object: jobject) -> errors::Result<ManagedPeer> {
        Ok(ManagedPeer {
            object: JObject::from_local_ref(object)?,
        })
    }

    /// The raw `jobject` of the peered Java object. Null for static-only
    /// peers.
    pub fn object(&self) -> jobject {
        self.object.as_obj()
    }

    pub fn instance(&self) -> &JObject {
        &self.object
    }

    /// Replaces the peered Java object. The previously held global reference
    /// is released.
    pub fn set_object(&mut self, object: jobject) -> errors::Result<()> {
        self.object = JObject::from_local_ref(object)?;
        Ok(())
    }

    /// The JNI environment for invoking Java methods of the peered object.
    pub fn env() -> errors::Result<*mut JNIEnv> {
        api::env()
    }
}

impl Default for ManagedPeer {
    fn default() -> ManagedPeer {
        ManagedPeer::new()
    }
}

#[cfg(test)]
mod peer_unit_tests {
    use std::ptr;

    use super::*;

    #[test]
    fn a_static_only_peer_has_no_object() {
        let peer = ManagedPeer::new();
        assert!(peer.object().is_null());
        assert!(peer.instance().is_null());
    }

    #[test]
    fn replacing_with_null_empties_the_peer() {
        let mut peer = ManagedPeer::default();
        peer.set_object(ptr::null_mut()).unwrap();
        assert!(peer.object().is_null());
    }
}
