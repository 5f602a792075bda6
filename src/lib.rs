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

extern crate cesu8;
extern crate jni_sys;
#[macro_use]
extern crate lazy_static;
extern crate libc;
#[macro_use]
extern crate log;

pub use api::class::JClass;
pub use api::object::JObject;
pub use api::peer::ManagedPeer;
pub use api::string::JString;
pub use api::{detach_thread, env, jvm, set_jvm};

mod api;
mod cache;
mod jni_utils;
mod logger;
mod utils;

pub mod errors;

#[cfg(test)]
mod lib_unit_tests {
    use super::*;

    #[test]
    fn the_wrappers_are_usable_without_a_java_object() {
        let object = JObject::null();
        let peer = ManagedPeer::new();
        assert!(object.is_null());
        assert!(peer.object().is_null());
    }
}
