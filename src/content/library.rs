//! Word library scanned from the video folder.
//!
//! Layout: `<video_dir>/<word>/<clip>.mp4|.mov|.webm`. The folder name is the
//! word (normalized); folders without clips are skipped.

use crate::error::Result;
use crate::models::Word;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const VIDEO_EXTENSIONS: [&str; 3] = ["mp4", "mov", "webm"];

#[derive(Clone, Debug, Default, PartialEq)]
pub struct WordLibrary {
    clips: BTreeMap<Word, Vec<PathBuf>>,
}

impl WordLibrary {
    pub fn new(clips: BTreeMap<Word, Vec<PathBuf>>) -> Self {
        Self {
            clips: clips.into_iter().filter(|(_, c)| !c.is_empty()).collect(),
        }
    }

    pub fn words(&self) -> Vec<Word> {
        self.clips.keys().cloned().collect()
    }

    pub fn clips_for(&self, word: &Word) -> &[PathBuf] {
        self.clips.get(word).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, word: &Word) -> bool {
        self.clips.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

fn is_video(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            VIDEO_EXTENSIONS
                .iter()
                .any(|v| ext.eq_ignore_ascii_case(v))
        })
        .unwrap_or(false)
}

/// Scans `video_dir`. A missing folder gives an empty library and a warning.
pub fn load_word_library(video_dir: &Path) -> Result<WordLibrary> {
    if !video_dir.is_dir() {
        tracing::warn!(path = %video_dir.display(), "video folder not found");
        return Ok(WordLibrary::default());
    }

    let mut clips: BTreeMap<Word, Vec<PathBuf>> = BTreeMap::new();
    for entry in fs::read_dir(video_dir)? {
        let entry = entry?;
        let word_dir = entry.path();
        if !word_dir.is_dir() {
            continue;
        }
        let word = Word::new(&entry.file_name().to_string_lossy());
        if word.is_empty() {
            continue;
        }

        let mut videos: Vec<PathBuf> = fs::read_dir(&word_dir)?
            .filter_map(|f| f.ok().map(|f| f.path()))
            .filter(|p| p.is_file() && is_video(p))
            .collect();
        videos.sort();

        if !videos.is_empty() {
            clips.entry(word).or_default().extend(videos);
        }
    }

    let library = WordLibrary::new(clips);
    tracing::info!(words = library.len(), path = %video_dir.display(), "loaded word library");
    Ok(library)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_scans_word_folders() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("Hello/a.mp4"));
        touch(&dir.path().join("Hello/b.MOV"));
        touch(&dir.path().join("Hello/notes.txt"));
        touch(&dir.path().join("bye/clip.webm"));
        fs::create_dir_all(dir.path().join("empty")).unwrap();
        touch(&dir.path().join("stray.mp4"));

        let library = load_word_library(dir.path()).unwrap();
        assert_eq!(library.len(), 2);
        assert_eq!(library.clips_for(&Word::from("hello")).len(), 2);
        assert_eq!(library.clips_for(&Word::from("bye")).len(), 1);
        assert!(!library.contains(&Word::from("empty")));
    }

    #[test]
    fn test_missing_folder_is_empty_library() {
        let dir = tempfile::tempdir().unwrap();
        let library = load_word_library(&dir.path().join("nope")).unwrap();
        assert!(library.is_empty());
    }
}
