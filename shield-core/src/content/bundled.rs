// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Bundled region content - compiled into the binary

use super::types::RegionContent;

const BUNDLED_REGION_JSON: &str = include_str!("../../assets/region.json");

/// The region document shipped with the app.
///
/// Used whenever no valid cached copy exists.
pub fn bundled_region_content() -> RegionContent {
    RegionContent::from_json(BUNDLED_REGION_JSON).unwrap_or_else(|_| RegionContent::none())
}
