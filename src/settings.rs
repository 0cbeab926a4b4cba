use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock};

pub const MIN_SENSITIVITY: u8 = 1;
pub const MAX_SENSITIVITY: u8 = 10;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum AudioQuality {
    Low,
    Medium,
    #[default]
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// 1 (least sensitive) to 10.
    pub pause_detection_sensitivity: u8,
    /// 1 (least sensitive) to 10.
    pub mistake_detection_sensitivity: u8,
    pub audio_quality: AudioQuality,
    pub preferred_voice: String,
    pub language: String,
    pub wake_word_enabled: bool,
    pub auto_advance: bool,
    pub haptic_feedback: bool,
    pub show_translation: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pause_detection_sensitivity: 5,
            mistake_detection_sensitivity: 5,
            audio_quality: AudioQuality::default(),
            preferred_voice: "default".into(),
            language: "ar".into(),
            wake_word_enabled: true,
            auto_advance: true,
            haptic_feedback: true,
            show_translation: false,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        let range = MIN_SENSITIVITY..=MAX_SENSITIVITY;
        if !range.contains(&self.pause_detection_sensitivity) {
            bail!(
                "pause detection sensitivity {} is outside {MIN_SENSITIVITY}-{MAX_SENSITIVITY}",
                self.pause_detection_sensitivity
            );
        }
        if !range.contains(&self.mistake_detection_sensitivity) {
            bail!(
                "mistake detection sensitivity {} is outside {MIN_SENSITIVITY}-{MAX_SENSITIVITY}",
                self.mistake_detection_sensitivity
            );
        }
        Ok(())
    }
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<Settings>,
}

impl SettingsStore {
    /// Open the store at `path`. A missing, unreadable or out-of-range file
    /// falls back to defaults.
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str::<Settings>(&contents)
                .ok()
                .filter(|settings| settings.validate().is_ok())
                .unwrap_or_else(|| {
                    log::warn!("Ignoring invalid settings file {}", path.display());
                    Settings::default()
                })
        } else {
            Settings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn get(&self) -> Settings {
        match self.data.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Validate, persist, then swap in `settings`. Nothing changes on error.
    pub fn update(&self, settings: Settings) -> Result<()> {
        settings.validate()?;
        let mut guard = match self.data.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        self.persist(&settings)?;
        *guard = settings;
        Ok(())
    }

    fn persist(&self, data: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create settings directory {}", parent.display())
            })?;
        }
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}
