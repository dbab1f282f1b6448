use reqsmith::core::{
    EmitOptions, Emission, Manifest, ManifestEmitter, Operator, VersionConstraint,
};
use reqsmith::formatters::requirements::LINE_ENDING;
use reqsmith::formatters::{JsonFormatter, ManifestFormatter, RequirementsFormatter};
use reqsmith::ScanError;
use std::fs;

fn sample() -> Manifest {
    let mut manifest = Manifest::new();
    manifest.insert("requests", Some(VersionConstraint::new(Operator::Eq, "2.31.0")));
    manifest.insert("flask", None);
    manifest
}

#[test]
fn requirements_format_is_sorted_with_line_endings() {
    let text = RequirementsFormatter::new().render(&sample());
    assert_eq!(text, format!("flask{LINE_ENDING}requests==2.31.0{LINE_ENDING}"));
    assert_eq!(RequirementsFormatter::new().render(&Manifest::new()), "");
}

#[test]
fn json_format_maps_names_to_constraints() {
    let text = JsonFormatter::compact().render(&sample());
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert!(value["flask"].is_null());
    assert_eq!(value["requests"]["operator"], "==");
    assert_eq!(value["requests"]["version"], "2.31.0");
}

#[test]
fn writes_new_manifest() {
    let dir = tempfile::TempDir::new().unwrap();
    let target = dir.path().join("requirements.txt");
    let emitter = ManifestEmitter::new(EmitOptions::new(&target));

    let emission = emitter.emit(&sample(), &RequirementsFormatter::new()).unwrap();
    assert_eq!(emission, Emission::Written(target.clone()));
    assert_eq!(
        fs::read_to_string(&target).unwrap(),
        RequirementsFormatter::new().render(&sample())
    );
    // no temp files left behind
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn existing_target_without_override_is_untouched() {
    let dir = tempfile::TempDir::new().unwrap();
    let target = dir.path().join("requirements.txt");
    fs::write(&target, "django==4.2\n").unwrap();

    let emitter = ManifestEmitter::new(EmitOptions::new(&target));
    let err = emitter
        .emit(&sample(), &RequirementsFormatter::new())
        .unwrap_err();

    assert!(matches!(err, ScanError::TargetExists { path } if path == target));
    assert_eq!(fs::read_to_string(&target).unwrap(), "django==4.2\n");
}

#[test]
fn override_replaces_existing_target() {
    let dir = tempfile::TempDir::new().unwrap();
    let target = dir.path().join("requirements.txt");
    fs::write(&target, "django==4.2\n").unwrap();

    let emitter = ManifestEmitter::new(EmitOptions::new(&target).with_overwrite(true));
    emitter.emit(&sample(), &RequirementsFormatter::new()).unwrap();

    assert_eq!(
        fs::read_to_string(&target).unwrap(),
        format!("flask{LINE_ENDING}requests==2.31.0{LINE_ENDING}")
    );
}

#[test]
fn dry_run_previews_without_writing() {
    let dir = tempfile::TempDir::new().unwrap();
    let target = dir.path().join("requirements.txt");
    fs::write(&target, "django==4.2\n").unwrap();

    let emitter = ManifestEmitter::new(EmitOptions::new(&target).with_dry_run(true));
    let emission = emitter.emit(&sample(), &RequirementsFormatter::new()).unwrap();

    assert_eq!(
        emission,
        Emission::Previewed(RequirementsFormatter::new().render(&sample()))
    );
    assert_eq!(fs::read_to_string(&target).unwrap(), "django==4.2\n");
}
