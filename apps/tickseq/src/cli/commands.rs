//! # CLI Command Implementations
//!
//! Each `cmd_*` function prints either a text report or, in JSON mode, one
//! pretty-printed JSON object.

use crate::config::TickseqConfig;
use std::path::{Path, PathBuf};
use tickseq_core::display::{DisplayEvent, HeadlessDisplay};
use tickseq_core::formats::MAX_SAVE_SIZE;
use tickseq_core::{
    ClassifierSet, CopyrightEntry, FlagsDelta, IntroDirector, MapLocation, Phase, SaveBlock,
    SaveSlot, SaveStatus, SaveWarpFlags, TickseqError, Transition, derive_flags,
    save_from_bytes, save_to_bytes,
};

// =============================================================================
// FILE HELPERS
// =============================================================================

/// Read a save file, refusing anything larger than a save block can be.
fn read_save_file(path: &Path) -> Result<Vec<u8>, TickseqError> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        TickseqError::IoError(format!("Cannot read '{}': {}", path.display(), e))
    })?;
    if !metadata.is_file() {
        return Err(TickseqError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }
    if metadata.len() > MAX_SAVE_SIZE as u64 {
        return Err(TickseqError::DeserializationError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            MAX_SAVE_SIZE
        )));
    }
    std::fs::read(path)
        .map_err(|e| TickseqError::IoError(format!("Cannot read '{}': {}", path.display(), e)))
}

/// Validate the parent directory of an output path.
fn validate_output_path(path: &Path) -> Result<PathBuf, TickseqError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let canonical_parent = parent.canonicalize().map_err(|e| {
        TickseqError::IoError(format!(
            "Invalid output directory '{}': {}",
            parent.display(),
            e
        ))
    })?;

    let filename = path
        .file_name()
        .ok_or_else(|| TickseqError::IoError("Output path has no filename".to_string()))?;

    Ok(canonical_parent.join(filename))
}

fn write_save_file(path: &Path, block: &SaveBlock) -> Result<(), TickseqError> {
    let target = validate_output_path(path)?;
    let bytes = save_to_bytes(block)?;
    std::fs::write(&target, bytes)
        .map_err(|e| TickseqError::IoError(format!("Cannot write '{}': {}", target.display(), e)))
}

fn load_block(path: &Path) -> Result<SaveBlock, TickseqError> {
    save_from_bytes(&read_save_file(path)?)
}

fn print_json(value: &serde_json::Value) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

/// Names of the set bits: list names for list-driven bits, then `champion`.
pub fn flag_names(flags: SaveWarpFlags, set: &ClassifierSet) -> Vec<String> {
    let mut names: Vec<String> = set
        .entries()
        .iter()
        .filter(|e| flags.contains(e.mask()))
        .map(|e| e.list.name().to_string())
        .collect();
    if flags.contains(SaveWarpFlags::CHAMPION) {
        names.push("champion".to_string());
    }
    names
}

// =============================================================================
// INTRO COMMAND
// =============================================================================

/// Outcome of a headless intro run.
#[derive(Debug, Clone)]
pub struct IntroReport {
    pub total_ticks: u64,
    pub transitions: Vec<Transition>,
    pub boot_status: Option<SaveStatus>,
    /// Block held by the save slot after the run.
    pub block: SaveBlock,
    pub events: Vec<DisplayEvent>,
}

/// Drive the intro from the copyright screen to the title screen.
pub fn run_intro(
    entry: CopyrightEntry,
    save: Option<Vec<u8>>,
    max_ticks: u64,
) -> Result<IntroReport, TickseqError> {
    let mut director = IntroDirector::new(entry, HeadlessDisplay::new(), SaveSlot::new(save))?;
    let total_ticks = director.run_until(Phase::TitleScreen, max_ticks)?;
    let transitions = director.transitions().to_vec();
    let boot_status = director.boot_status();

    let (mut display, slot) = director.into_parts();
    Ok(IntroReport {
        total_ticks,
        transitions,
        boot_status,
        block: slot.into_block(),
        events: display.take_events(),
    })
}

fn transition_json(t: &Transition) -> serde_json::Value {
    serde_json::json!({
        "tick": t.tick,
        "from": t.from.to_string(),
        "to": t.to.to_string()
    })
}

/// Run the intro headless and print the hand-off timeline.
pub fn cmd_intro(
    config: &TickseqConfig,
    json_mode: bool,
    verbose: bool,
    after_title: bool,
    max_ticks: Option<u64>,
    save: Option<&Path>,
    events: bool,
) -> Result<(), TickseqError> {
    let entry = if after_title {
        CopyrightEntry::AfterTitleScreen
    } else {
        CopyrightEntry::AfterBootup
    };

    let raw = match save {
        Some(path) if path.exists() => Some(read_save_file(path)?),
        Some(path) => {
            tracing::warn!(path = %path.display(), "save file not found, booting without a save");
            None
        }
        None => None,
    };

    let budget = max_ticks.unwrap_or(config.intro.max_ticks);
    tracing::info!(?entry, budget, "running intro");
    let report = run_intro(entry, raw, budget)?;

    if json_mode {
        let transitions: Vec<_> = report.transitions.iter().map(transition_json).collect();
        let mut output = serde_json::json!({
            "entry": format!("{:?}", entry),
            "total_ticks": report.total_ticks,
            "transitions": transitions,
            "boot_status": report.boot_status.map(|s| format!("{:?}", s)),
        });
        if events {
            output["events"] = serde_json::to_value(&report.events)
                .map_err(|e| TickseqError::SerializationError(e.to_string()))?;
        }
        print_json(&output);
        return Ok(());
    }

    println!("Intro Timeline");
    println!("==============");
    println!("Entry: {:?}", entry);
    println!();
    for t in &report.transitions {
        println!("  tick {:>5}: {} -> {}", t.tick, t.from, t.to);
    }
    println!();
    println!("Total ticks: {}", report.total_ticks);

    if let Some(status) = report.boot_status {
        println!("Boot save:   {:?}", status);
        if verbose {
            println!("  Location:   {}", report.block.location);
            println!("  Flags:      {:#010b}", report.block.special_save_warp_flags.bits());
            println!("  Sound:      {:?}", report.block.sound);
            println!("  Save count: {}", report.block.save_count);
        }
    }

    if events {
        println!();
        println!("Display Events ({})", report.events.len());
        for (i, event) in report.events.iter().enumerate() {
            println!("  {:>5}  {:?}", i, event);
        }
    }

    Ok(())
}

// =============================================================================
// CLASSIFY COMMAND
// =============================================================================

fn delta_json(delta: FlagsDelta) -> serde_json::Value {
    serde_json::json!({
        "set": delta.set,
        "clear": delta.clear
    })
}

/// Show which location lists contain a map and the resulting flags delta.
pub fn cmd_classify(
    config: &TickseqConfig,
    json_mode: bool,
    group: u8,
    num: u8,
) -> Result<(), TickseqError> {
    let set = config.classifier_set()?;
    let location = MapLocation::new(group, num);
    let memberships = set.memberships(location);
    let delta = derive_flags(location, &set);

    if json_mode {
        let lists: Vec<_> = set
            .entries()
            .iter()
            .zip(&memberships)
            .map(|(entry, (name, member))| {
                serde_json::json!({
                    "name": name,
                    "bit": entry.bit,
                    "member": member
                })
            })
            .collect();
        print_json(&serde_json::json!({
            "group": group,
            "num": num,
            "packed": location.packed(),
            "lists": lists,
            "delta": delta_json(delta)
        }));
        return Ok(());
    }

    println!("Location {}", location);
    println!();
    for (entry, (name, member)) in set.entries().iter().zip(&memberships) {
        let mark = if *member { "yes" } else { "no" };
        println!("  bit {}  {:<12} {}", entry.bit, name, mark);
    }
    println!();
    println!("Set:   {:#010b}", delta.set);
    println!("Clear: {:#010b}", delta.clear);

    Ok(())
}

// =============================================================================
// SAVE COMMANDS
// =============================================================================

fn block_json(block: &SaveBlock, set: &ClassifierSet) -> serde_json::Value {
    serde_json::json!({
        "location": {
            "group": block.location.group,
            "num": block.location.num
        },
        "special_save_warp_flags": block.special_save_warp_flags.bits(),
        "flag_names": flag_names(block.special_save_warp_flags, set),
        "sound": format!("{:?}", block.sound),
        "save_count": block.save_count
    })
}

/// Write a fresh save block.
pub fn cmd_save_init(file: &Path, json_mode: bool, force: bool) -> Result<(), TickseqError> {
    if file.exists() && !force {
        return Err(TickseqError::IoError(format!(
            "'{}' already exists (use --force to overwrite)",
            file.display()
        )));
    }

    write_save_file(file, &SaveBlock::default())?;
    tracing::info!(path = %file.display(), "save initialized");

    if json_mode {
        print_json(&serde_json::json!({ "file": file.to_string_lossy(), "initialized": true }));
    } else {
        println!("Initialized save block at {}", file.display());
    }
    Ok(())
}

/// Print a save block.
pub fn cmd_save_show(
    config: &TickseqConfig,
    file: &Path,
    json_mode: bool,
) -> Result<(), TickseqError> {
    let set = config.classifier_set()?;
    let block = load_block(file)?;

    if json_mode {
        print_json(&block_json(&block, &set));
        return Ok(());
    }

    println!("Save Block");
    println!("==========");
    println!("File:       {}", file.display());
    println!("Location:   {}", block.location);
    println!(
        "Flags:      {:#010b} [{}]",
        block.special_save_warp_flags.bits(),
        flag_names(block.special_save_warp_flags, &set).join(", ")
    );
    println!("Sound:      {:?}", block.sound);
    println!("Save count: {}", block.save_count);
    Ok(())
}

/// Move the save to a map, recompute the save-warp flags and write it back.
pub fn cmd_save_warp(
    config: &TickseqConfig,
    file: &Path,
    json_mode: bool,
    group: u8,
    num: u8,
) -> Result<(), TickseqError> {
    let set = config.classifier_set()?;
    let mut block = load_block(file)?;
    let location = MapLocation::new(group, num);

    let delta = block.prepare_save(location, &set);
    write_save_file(file, &block)?;
    tracing::info!(
        location = %location,
        flags = block.special_save_warp_flags.bits(),
        "save relocated"
    );

    if json_mode {
        let mut output = block_json(&block, &set);
        output["delta"] = delta_json(delta);
        print_json(&output);
        return Ok(());
    }

    println!("Saved at {}", location);
    println!(
        "Flags: {:#010b} [{}]",
        block.special_save_warp_flags.bits(),
        flag_names(block.special_save_warp_flags, &set).join(", ")
    );
    Ok(())
}

/// Set the champion save-warp bit.
pub fn cmd_save_champion(
    config: &TickseqConfig,
    file: &Path,
    json_mode: bool,
) -> Result<(), TickseqError> {
    let set = config.classifier_set()?;
    let mut block = load_block(file)?;

    block.set_champion_save_warp();
    write_save_file(file, &block)?;
    tracing::info!(path = %file.display(), "champion save warp set");

    if json_mode {
        print_json(&block_json(&block, &set));
    } else {
        println!(
            "Champion bit set: {:#010b}",
            block.special_save_warp_flags.bits()
        );
    }
    Ok(())
}
