// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 athena contributors

#![no_main]

use athena::{parse_type_name, ExtensionConfig, UnknownTypePolicy};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    let strict = ExtensionConfig::default();
    let lenient = ExtensionConfig {
        unknown_type_policy: UnknownTypePolicy::Varchar,
        ..ExtensionConfig::default()
    };

    // Whatever parses must render without panicking
    if let Ok(ty) = parse_type_name(input, &strict) {
        let _ = ty.to_string();
    }
    let _ = parse_type_name(input, &lenient);
});
