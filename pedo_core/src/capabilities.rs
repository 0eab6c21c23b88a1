//! What a pedometer session can report.

use pedo_traits::SourceKind;
use serde::Serialize;

/// Capability report for the active step source.
///
/// Distance and floor counting are never provided by either source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    pub step_counting: bool,
    pub hardware_counter: bool,
    pub distance: bool,
    pub floor_counting: bool,
}

impl Capabilities {
    pub fn for_source(kind: SourceKind) -> Self {
        Self {
            step_counting: true,
            hardware_counter: kind == SourceKind::HardwareCounter,
            distance: false,
            floor_counting: false,
        }
    }
}
