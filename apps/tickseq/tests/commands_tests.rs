//! Tests for the CLI command implementations against real files.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use tickseq::cli::{
    cmd_classify, cmd_save_champion, cmd_save_init, cmd_save_show, cmd_save_warp, flag_names,
    run_intro,
};
use tickseq::config::TickseqConfig;
use tickseq_core::display::{DisplayEvent, SerialHandler};
use tickseq_core::{
    ClassifierSet, CopyrightEntry, MapLocation, Phase, SaveBlock, SaveStatus, SaveWarpFlags,
    TickseqError, save_from_bytes, save_to_bytes,
};

fn read_block(path: &std::path::Path) -> SaveBlock {
    save_from_bytes(&std::fs::read(path).unwrap()).unwrap()
}

// =============================================================================
// INTRO
// =============================================================================

#[test]
fn test_run_intro_from_boot() {
    let report = run_intro(CopyrightEntry::AfterBootup, None, 10_000).unwrap();

    assert_eq!(report.total_ticks, 155 + 268);
    assert_eq!(report.transitions.len(), 2);
    assert_eq!(report.transitions[0].to, Phase::FlagScene);
    assert_eq!(report.transitions[1].to, Phase::TitleScreen);
    assert_eq!(report.boot_status, Some(SaveStatus::Empty));
    assert_eq!(
        report
            .events
            .iter()
            .filter(|e| **e == DisplayEvent::SerialHandler(Some(SerialHandler::Link)))
            .count(),
        1
    );
}

#[test]
fn test_run_intro_loads_save() {
    let block = SaveBlock {
        location: MapLocation::new(10, 5),
        save_count: 9,
        ..SaveBlock::default()
    };
    let bytes = save_to_bytes(&block).unwrap();

    let report = run_intro(CopyrightEntry::AfterBootup, Some(bytes), 10_000).unwrap();

    assert_eq!(report.boot_status, Some(SaveStatus::Ok));
    assert_eq!(report.block, block);
}

#[test]
fn test_run_intro_after_title_skips_boot_hook() {
    let report = run_intro(CopyrightEntry::AfterTitleScreen, None, 10_000).unwrap();
    assert_eq!(report.boot_status, None);
}

#[test]
fn test_run_intro_budget_exhausted() {
    let result = run_intro(CopyrightEntry::AfterBootup, None, 100);
    assert!(matches!(result, Err(TickseqError::TickBudgetExhausted(100))));
}

// =============================================================================
// CLASSIFY
// =============================================================================

#[test]
fn test_classify_runs_with_default_config() {
    let config = TickseqConfig::default();
    cmd_classify(&config, true, 26, 1).unwrap();
    cmd_classify(&config, false, 0, 0).unwrap();
}

#[test]
fn test_flag_names() {
    let set = ClassifierSet::save_warp_defaults().unwrap();
    let flags = SaveWarpFlags(SaveWarpFlags::LOBBY | SaveWarpFlags::CHAMPION);
    assert_eq!(flag_names(flags, &set), vec!["reload", "champion"]);
}

// =============================================================================
// SAVE FILES
// =============================================================================

#[test]
fn test_save_init_then_show() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game.sav");

    cmd_save_init(&path, false, false).unwrap();

    assert_eq!(read_block(&path), SaveBlock::default());
    cmd_save_show(&TickseqConfig::default(), &path, true).unwrap();
}

#[test]
fn test_save_init_refuses_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game.sav");
    cmd_save_init(&path, false, false).unwrap();

    let result = cmd_save_init(&path, false, false);
    assert!(matches!(result, Err(TickseqError::IoError(_))));

    cmd_save_init(&path, false, true).unwrap();
}

#[test]
fn test_save_warp_recomputes_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game.sav");
    let config = TickseqConfig::default();
    cmd_save_init(&path, false, false).unwrap();

    cmd_save_warp(&config, &path, false, 10, 5).unwrap();
    let block = read_block(&path);
    assert_eq!(block.location, MapLocation::new(10, 5));
    assert_eq!(block.special_save_warp_flags.bits(), SaveWarpFlags::POKECENTER);
    assert_eq!(block.save_count, 1);

    cmd_save_warp(&config, &path, true, 26, 1).unwrap();
    let block = read_block(&path);
    assert_eq!(block.special_save_warp_flags.bits(), SaveWarpFlags::LOBBY);
    assert_eq!(block.save_count, 2);
}

#[test]
fn test_champion_survives_warp() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game.sav");
    let config = TickseqConfig::default();
    cmd_save_init(&path, false, false).unwrap();

    cmd_save_champion(&config, &path, false).unwrap();
    cmd_save_warp(&config, &path, false, 0, 9).unwrap();

    let block = read_block(&path);
    assert_eq!(block.special_save_warp_flags.bits(), SaveWarpFlags::CHAMPION);
}

#[test]
fn test_show_rejects_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("junk.sav");
    std::fs::write(&path, b"junk").unwrap();

    let result = cmd_save_show(&TickseqConfig::default(), &path, false);
    assert!(matches!(result, Err(TickseqError::DeserializationError(_))));
}

#[test]
fn test_show_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = cmd_save_show(&TickseqConfig::default(), &dir.path().join("none.sav"), false);
    assert!(matches!(result, Err(TickseqError::IoError(_))));
}
