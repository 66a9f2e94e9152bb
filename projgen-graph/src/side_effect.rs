use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// A file-system action a mapper defers to the persistence stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SideEffectDescriptor {
    File(FileDescriptor),
    Directory(DirectoryDescriptor),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SideEffectState {
    #[default]
    Present,
    Absent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescriptor {
    pub path: Utf8PathBuf,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contents: Option<Vec<u8>>,

    #[serde(default)]
    pub state: SideEffectState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryDescriptor {
    pub path: Utf8PathBuf,

    #[serde(default)]
    pub state: SideEffectState,
}
