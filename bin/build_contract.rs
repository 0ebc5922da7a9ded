//! Binary for building WASM contracts from odra modules.
#![doc = "Binary for building WASM contracts from odra modules."]

#[allow(unused_imports)]
use launchpad_contracts;

fn main() {
    // The actual compilation is handled by the odra-build crate
}
