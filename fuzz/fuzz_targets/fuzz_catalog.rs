#![no_main]

use libfuzzer_sys::fuzz_target;

use trafficdeck_core::DatasetGroup;

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };
    // Accepted catalogs must serialize back into an accepted catalog
    if let Ok(catalog) = DatasetGroup::from_json(json) {
        assert!(!catalog.is_empty());
        if let Ok(out) = catalog.to_json() {
            let reparsed = DatasetGroup::from_json(&out);
            assert_eq!(reparsed.map(|c| c.len()).ok(), Some(catalog.len()));
        }
    }
});
