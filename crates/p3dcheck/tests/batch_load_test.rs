//! Integration tests for the batch loader.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use p3dcheck::{BatchConfig, BatchLoader};
use p3dcheck_format::Severity;
use p3dcheck_verify::Registry;

fn temp_model_dir() -> PathBuf {
    let id = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("test_p3d_batch_{id}"));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn put_u32(buf: &mut Vec<u8>, v: u32) {
    buf.extend_from_slice(&v.to_le_bytes());
}

/// One-LOD editable-variant stream with no geometry.
fn mlod_bytes(properties: &[(&str, &str)], resolution: f32) -> Vec<u8> {
    let mut buf = b"MLOD".to_vec();
    put_u32(&mut buf, 257); // version
    put_u32(&mut buf, 1); // lod count
    buf.extend_from_slice(b"P3DM");
    put_u32(&mut buf, 0x1c);
    put_u32(&mut buf, 0x100);
    put_u32(&mut buf, 0); // points
    put_u32(&mut buf, 0); // normals
    put_u32(&mut buf, 0); // faces
    put_u32(&mut buf, 0); // flags
    buf.extend_from_slice(b"TAGG");
    for &(key, value) in properties {
        buf.push(1);
        buf.extend_from_slice(b"#Property#\0");
        put_u32(&mut buf, 128);
        let mut field = [0u8; 64];
        field[..key.len()].copy_from_slice(key.as_bytes());
        buf.extend_from_slice(&field);
        let mut field = [0u8; 64];
        field[..value.len()].copy_from_slice(value.as_bytes());
        buf.extend_from_slice(&field);
    }
    buf.push(1);
    buf.extend_from_slice(b"#EndOfFile#\0");
    put_u32(&mut buf, 0);
    buf.extend_from_slice(&resolution.to_le_bytes());
    buf
}

fn write_model(dir: &Path, name: &str, properties: &[(&str, &str)]) {
    std::fs::write(dir.join(name), mlod_bytes(properties, 1.0)).unwrap();
}

/// A stream that announces one LOD and then ends.
fn write_truncated(dir: &Path, name: &str) {
    let mut buf = b"MLOD".to_vec();
    put_u32(&mut buf, 257);
    put_u32(&mut buf, 1);
    std::fs::write(dir.join(name), buf).unwrap();
}

fn drain(loader: &BatchLoader) -> Vec<p3dcheck_format::Model> {
    let mut models = Vec::new();
    while let Some(model) = loader.recv() {
        models.push(model);
    }
    models
}

#[test]
fn test_batch_loads_valid_files_and_drops_truncated_ones() {
    let dir = temp_model_dir();
    for i in 0..5 {
        write_model(&dir, &format!("ok_{i}.p3d"), &[("mass", "100")]);
    }
    write_truncated(&dir, "broken_a.p3d");
    write_truncated(&dir, "broken_b.p3d");

    let loader = BatchLoader::start(&dir, BatchConfig::default(), Arc::new(Registry::standard()));
    assert_eq!(loader.total(), 7);

    let models = drain(&loader);
    assert_eq!(models.len(), 5);
    assert_eq!(loader.progress(), 7);

    let stats = loader.stats();
    assert_eq!(stats.attempted, 7);
    assert_eq!(stats.loaded, 5);
    assert_eq!(stats.decode_failures, 2);
    assert_eq!(stats.io_failures, 0);

    // Completion order varies; the set of loaded files must not.
    let loaded: BTreeSet<String> = models
        .iter()
        .map(|m| m.path().file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    let expected: BTreeSet<String> = (0..5).map(|i| format!("ok_{i}.p3d")).collect();
    assert_eq!(loaded, expected);

    drop(loader);
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_unsupported_magic_is_isolated_like_any_failure() {
    let dir = temp_model_dir();
    write_model(&dir, "good.p3d", &[]);
    std::fs::write(dir.join("alien.p3d"), b"XXXXsomething").unwrap();

    let loader = BatchLoader::start(&dir, BatchConfig::default(), Arc::new(Registry::standard()));
    let models = drain(&loader);

    assert_eq!(models.len(), 1);
    assert!(models[0].path().ends_with("good.p3d"));
    assert_eq!(loader.stats().decode_failures, 1);

    drop(loader);
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_overstated_lod_count_is_isolated_like_any_failure() {
    let dir = temp_model_dir();
    write_model(&dir, "good.p3d", &[("mass", "150")]);
    // Compiled-variant header claiming more LODs than the file could hold;
    // the decoder must reject it without reserving for the claim.
    let mut bytes = b"ODOL".to_vec();
    put_u32(&mut bytes, 73); // version
    put_u32(&mut bytes, 0); // app id
    bytes.push(0); // muzzle flash
    put_u32(&mut bytes, 0xFFFF_FFFF);
    std::fs::write(dir.join("overstated.p3d"), &bytes).unwrap();

    let loader = BatchLoader::start(&dir, BatchConfig::default(), Arc::new(Registry::standard()));
    let models = drain(&loader);

    assert_eq!(models.len(), 1);
    assert!(models[0].path().ends_with("good.p3d"));
    let stats = loader.stats();
    assert_eq!(stats.decode_failures, 1);
    assert_eq!(stats.loaded, 1);

    drop(loader);
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_verification_runs_inside_the_batch() {
    let dir = temp_model_dir();
    write_model(&dir, "odd.p3d", &[("steamengine", "1")]);

    let loader = BatchLoader::start(&dir, BatchConfig::default(), Arc::new(Registry::standard()));
    let models = drain(&loader);
    assert_eq!(models.len(), 1);

    let (_, lod) = models[0].lods().iter().next().unwrap();
    assert_eq!(lod.diagnostics().len(), 1);
    assert_eq!(lod.diagnostics()[0].message, "Unknown Property");
    assert_eq!(lod.diagnostics()[0].severity, Severity::Warning);

    drop(loader);
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_no_verify_skips_the_pass() {
    let dir = temp_model_dir();
    write_model(&dir, "odd.p3d", &[("steamengine", "1")]);

    let config = BatchConfig {
        verify: false,
        ..BatchConfig::default()
    };
    let loader = BatchLoader::start(&dir, config, Arc::new(Registry::standard()));
    let models = drain(&loader);
    assert_eq!(models.len(), 1);
    assert!(!models[0].has_diagnostics());

    drop(loader);
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_cancel_terminates_the_run() {
    let dir = temp_model_dir();
    for i in 0..12 {
        write_model(&dir, &format!("m_{i}.p3d"), &[]);
    }

    let config = BatchConfig {
        worker_count: 1,
        ..BatchConfig::default()
    };
    let loader = BatchLoader::start(&dir, config, Arc::new(Registry::standard()));
    loader.cancel();

    // The strong property is prompt termination: recv() must reach None
    // instead of waiting on the 12 files.
    let models = drain(&loader);
    let stats = loader.stats();
    assert!(models.len() <= 12);
    assert_eq!(stats.attempted, loader.progress());

    drop(loader);
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_drop_without_draining_does_not_hang() {
    let dir = temp_model_dir();
    // More files than the result buffer holds, so workers block on send
    // and only the drop path can release them.
    for i in 0..100 {
        write_model(&dir, &format!("m_{i}.p3d"), &[]);
    }

    let loader = BatchLoader::start(&dir, BatchConfig::default(), Arc::new(Registry::standard()));
    drop(loader);

    std::fs::remove_dir_all(&dir).ok();
}
