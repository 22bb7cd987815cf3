// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Fingerprint properties

use proptest::prelude::*;
use serde_json::{Map, Value};

use shield_core::{canonical_json, fingerprint, RegionContent};

fn section(pairs: &[(String, String)], reversed: bool) -> Value {
    let mut map = Map::new();
    let iter: Box<dyn Iterator<Item = &(String, String)>> = if reversed {
        Box::new(pairs.iter().rev())
    } else {
        Box::new(pairs.iter())
    };
    for (key, value) in iter {
        map.insert(key.clone(), Value::String(value.clone()));
    }
    Value::Object(map)
}

fn content(active: &[String], pairs: &[(String, String)], reversed: bool) -> RegionContent {
    RegionContent {
        active: active.to_vec(),
        en: section(pairs, reversed),
        fr: section(pairs, !reversed),
        other_locales: Default::default(),
    }
}

proptest! {
    #[test]
    fn prop_fingerprint_ignores_key_order(
        active in prop::collection::vec("[A-Z]{2}", 0..5),
        pairs in prop::collection::btree_map("[A-Za-z]{1,8}", "[ -~]{0,16}", 0..8),
    ) {
        let pairs: Vec<(String, String)> = pairs.into_iter().collect();
        let forward = content(&active, &pairs, false);
        let backward = content(&active, &pairs, true);

        prop_assert_eq!(fingerprint(&forward).unwrap(), fingerprint(&backward).unwrap());
        prop_assert_eq!(canonical_json(&forward).unwrap(), canonical_json(&backward).unwrap());
    }

    #[test]
    fn prop_fingerprint_distinguishes_active_regions(
        active in prop::collection::vec("[A-Z]{2}", 1..5),
        extra in "[A-Z]{3}",
    ) {
        let base = content(&active, &[], false);
        let mut extended = base.clone();
        extended.active.push(extra);

        prop_assert_ne!(fingerprint(&base).unwrap(), fingerprint(&extended).unwrap());
    }

    #[test]
    fn prop_fingerprint_is_stable(text in "[ -~]{0,32}") {
        let doc = content(&["ON".to_string()], &[("Title".to_string(), text)], false);
        prop_assert_eq!(fingerprint(&doc).unwrap(), fingerprint(&doc.clone()).unwrap());
    }
}

#[test]
fn test_fingerprint_format() {
    let fp = fingerprint(&RegionContent::none()).unwrap();
    assert!(fp.as_str().starts_with("sha256:"));
    assert_eq!(fp.hex().len(), 64);
    assert_eq!(fp.to_string(), fp.as_str());
}

#[test]
fn test_text_change_changes_fingerprint() {
    let a = RegionContent::from_json(r#"{"Active":["ON"],"en":{"T":"a"},"fr":{"T":"a"}}"#).unwrap();
    let b = RegionContent::from_json(r#"{"Active":["ON"],"en":{"T":"b"},"fr":{"T":"a"}}"#).unwrap();
    assert_ne!(fingerprint(&a).unwrap(), fingerprint(&b).unwrap());
}
