//! Property-based tests for graph configuration
//!
//! Tests invariants that should hold for ALL possible inputs:
//! - Roundtrip: from_yaml_str(to_yaml(x)) == x
//! - Validity: every configurable level validates
//! - Ordering: granularity comparison follows the level order

use smg_core::config::*;
use smg_core::features::smg::{ClangSmg, MachineModel, SmgObject};
use smg_core::SmgError;
use proptest::prelude::*;
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use std::io::Write;

fn preset_of(idx: u8) -> Preset {
    match idx % 3 {
        0 => Preset::Production,
        1 => Preset::Debug,
        _ => Preset::Paranoid,
    }
}

fn level_of(idx: u8) -> RuntimeCheck {
    match idx % 4 {
        0 => RuntimeCheck::Forced,
        1 => RuntimeCheck::None,
        2 => RuntimeCheck::Half,
        _ => RuntimeCheck::Full,
    }
}

fn model_of(flag: bool) -> MachineModel {
    if flag {
        MachineModel::Linux64
    } else {
        MachineModel::Linux32
    }
}

// ============================================================================
// QuickCheck Tests (simpler, faster)
// ============================================================================

#[quickcheck]
fn qc_config_yaml_roundtrip(preset_idx: u8, checks: bool, level_idx: u8, linux64: bool) -> TestResult {
    let level = level_of(level_idx);
    if level == RuntimeCheck::Forced {
        return TestResult::discard();
    }

    let config = SmgConfig::preset(preset_of(preset_idx))
        .perform_checks(checks)
        .runtime_check(level)
        .machine_model(model_of(linux64));

    let yaml = match config.to_yaml() {
        Ok(yaml) => yaml,
        Err(_) => return TestResult::failed(),
    };

    // Invariant: YAML roundtrip preserves every field
    TestResult::from_bool(SmgConfig::from_yaml_str(&yaml).ok() == Some(config))
}

#[quickcheck]
fn qc_forced_is_never_a_configured_level(preset_idx: u8) -> bool {
    let config = SmgConfig::preset(preset_of(preset_idx)).runtime_check(RuntimeCheck::Forced);
    config.validate().is_err()
}

#[quickcheck]
fn qc_preset_name_roundtrip(preset_idx: u8) -> bool {
    let preset = preset_of(preset_idx);
    Preset::from_str(preset.as_str()).ok() == Some(preset)
        && Preset::from_str(&preset.as_str().to_uppercase()).ok() == Some(preset)
}

#[quickcheck]
fn qc_granularity_follows_level_order(a: u8, b: u8) -> bool {
    let (a, b) = (level_of(a), level_of(b));
    a.is_finer_or_equal_than(b) == (a >= b)
}

#[quickcheck]
fn qc_duplicate_objects_follow_perform_checks(checks: bool) -> bool {
    let mut smg = ClangSmg::with_config(SmgConfig::default().perform_checks(checks));
    let object = SmgObject::new(8, "twice");
    if smg.add_heap_object(object.clone()).is_err() {
        return false;
    }

    match smg.add_heap_object(object) {
        Err(SmgError::DuplicateHeapObject(_)) => checks,
        Ok(()) => !checks,
        Err(_) => false,
    }
}

// ============================================================================
// Proptest Tests (more complex, exhaustive)
// ============================================================================

proptest! {
    #[test]
    fn prop_unknown_preset_names_are_rejected(name in "[a-z]{1,12}") {
        prop_assume!(!["production", "debug", "paranoid"].contains(&name.as_str()));
        let is_unknown_preset = matches!(
            Preset::from_str(&name),
            Err(ConfigError::UnknownPreset(_))
        );
        prop_assert!(is_unknown_preset);
    }

    #[test]
    fn prop_yaml_file_loading(preset_idx in 0u8..3, checks in any::<bool>()) {
        let preset = preset_of(preset_idx);
        let document = format!(
            "version: 1\npreset: {}\noverrides:\n  perform_checks: {}\n",
            preset.as_str(),
            checks
        );
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(document.as_bytes()).unwrap();

        let config = SmgConfig::from_yaml(file.path()).unwrap();
        prop_assert_eq!(config.preset, preset);
        prop_assert_eq!(config.perform_checks, checks);
        prop_assert_eq!(config.runtime_check, preset.runtime_check());
    }
}
