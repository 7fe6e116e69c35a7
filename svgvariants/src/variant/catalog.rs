use crate::variant::spec::VariantSpec;

/// Built-in groups of icon sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preset {
    /// Favicon-style web icons.
    Web,
    /// Android drawable densities.
    Android,
    /// iOS app and settings icons.
    Ios,
    /// Windows Phone tiles.
    Windows,
    /// Every group above, in that order.
    All,
}

const WEB: &[(u32, &str)] = &[
    (32, "icons/web/{name}_32x32"),
    (64, "icons/web/{name}_64x64"),
];

const ANDROID: &[(u32, &str)] = &[
    (36, "icons/android/Resources/drawable-ldpi/{name}"),
    (48, "icons/android/Resources/drawable-mdpi/{name}"),
    (72, "icons/android/Resources/drawable-hdpi/{name}"),
    (96, "icons/android/Resources/drawable-xhdpi/{name}"),
    (96, "icons/android/Resources/drawable/{name}"),
];

const IOS: &[(u32, &str)] = &[
    (29, "icons/ios/Resources/{name}-small"),
    (58, "icons/ios/Resources/{name}-small@2x"),
    (57, "icons/ios/Resources/{name}-icon"),
    (114, "icons/ios/Resources/{name}-icon@2x"),
    (40, "icons/ios/Resources/{name}-40"),
    (80, "icons/ios/Resources/{name}-40@2x"),
    (50, "icons/ios/Resources/{name}-50"),
    (100, "icons/ios/Resources/{name}-50@2x"),
    (57, "icons/ios/Resources/{name}-57"),
    (114, "icons/ios/Resources/{name}-57@2x"),
    (60, "icons/ios/Resources/{name}-60"),
    (120, "icons/ios/Resources/{name}-60@2x"),
    (72, "icons/ios/Resources/{name}-72"),
    (144, "icons/ios/Resources/{name}-72@2x"),
    (76, "icons/ios/Resources/{name}-76"),
    (152, "icons/ios/Resources/{name}-76@2x"),
];

const WINDOWS: &[(u32, &str)] = &[
    (48, "icons/windows/Resources/{name}-48@2x"),
    (62, "icons/windows/Resources/{name}-62-tile"),
    (173, "icons/windows/Resources/{name}-173-tile"),
];

/// Width-only variants for `preset`. Heights are inferred from the document.
pub fn preset_variants(preset: Preset) -> Vec<VariantSpec> {
    let groups: &[&[(u32, &str)]] = match preset {
        Preset::Web => &[WEB],
        Preset::Android => &[ANDROID],
        Preset::Ios => &[IOS],
        Preset::Windows => &[WINDOWS],
        Preset::All => &[WEB, ANDROID, IOS, WINDOWS],
    };
    groups
        .iter()
        .flat_map(|g| g.iter())
        .map(|&(width, template)| VariantSpec::width(width, template))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/variant/catalog.rs"]
mod tests;
