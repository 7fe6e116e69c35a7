use std::collections::HashSet;
use std::path::PathBuf;

use super::*;

#[test]
fn all_is_the_union_of_groups() {
    let all = preset_variants(Preset::All);
    let sum: usize = [Preset::Web, Preset::Android, Preset::Ios, Preset::Windows]
        .into_iter()
        .map(|p| preset_variants(p).len())
        .sum();
    assert_eq!(all.len(), sum);
    assert_eq!(all.len(), 26);
}

#[test]
fn output_paths_are_unique() {
    let paths: HashSet<PathBuf> = preset_variants(Preset::All)
        .iter()
        .map(|v| v.output_path("logo"))
        .collect();
    assert_eq!(paths.len(), preset_variants(Preset::All).len());
}

#[test]
fn presets_are_width_only() {
    for v in preset_variants(Preset::All) {
        assert!(v.width.is_some());
        assert!(v.height.is_none());
    }
    let web = preset_variants(Preset::Web);
    assert_eq!(
        web[0].output_path("logo"),
        PathBuf::from("icons").join("web").join("logo_32x32.png")
    );
}
