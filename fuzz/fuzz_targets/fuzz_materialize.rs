#![no_main]

use libfuzzer_sys::fuzz_target;

use downline::{materialize, TreeQuery};

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Any snapshot that parses must materialize without panicking
        if let Ok(snapshot) = serde_json::from_str::<downline::RootSnapshot>(content) {
            let _ = materialize(&snapshot, &TreeQuery::new(snapshot.id));
        }
    }
});
