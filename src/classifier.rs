/*!
 * Splits a directory listing into video and subtitle candidates.
 *
 * Classification only looks at file names. Anything that does not carry one
 * of the subtitle-like extensions is treated as a video, including files with
 * no extension at all; those fail the format check later on.
 */

use log::debug;
use std::path::Path;

/// The only container accepted for submissions
pub const CONTAINER_EXTENSION: &str = "mp4";

/// The only subtitle format accepted for submissions
pub const SUBTITLE_EXTENSION: &str = "srt";

/// Extensions of files that are taken to be subtitles, in any case.
///
/// Plain text, archives and XML are included because submitters use them to
/// ship captions in the wrong format.
pub const SUBTITLE_LIKE_EXTENSIONS: [&str; 5] = ["srt", "sbv", "txt", "zip", "xml"];

/// A single file from the input directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    // @field: File name as found on disk
    pub file_name: String,

    // @field: Lowercase extension without the dot, empty if there is none
    pub extension: String,

    // @field: Lowercase file name without its last extension
    pub stem: String,
}

impl MediaFile {
    /// Derive extension and stem from a bare file name
    pub fn from_file_name(file_name: &str) -> Self {
        let path = Path::new(file_name);

        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        let stem = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_lowercase())
            .unwrap_or_else(|| file_name.to_lowercase());

        Self {
            file_name: file_name.to_string(),
            extension,
            stem,
        }
    }

    /// Whether this file uses the accepted video container
    pub fn is_container(&self) -> bool {
        self.extension == CONTAINER_EXTENSION
    }

    /// Whether this file is in the accepted subtitle format
    pub fn is_srt(&self) -> bool {
        self.extension == SUBTITLE_EXTENSION
    }

    /// Whether this file is classified as a subtitle candidate
    pub fn is_subtitle_like(&self) -> bool {
        SUBTITLE_LIKE_EXTENSIONS.contains(&self.extension.as_str())
    }
}

/// Video and subtitle candidates, each in listing order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub videos: Vec<MediaFile>,
    pub subtitles: Vec<MediaFile>,
}

impl Classification {
    /// Number of video candidates that will be probed for duration
    pub fn container_count(&self) -> usize {
        self.videos.iter().filter(|v| v.is_container()).count()
    }
}

/// Partition a listing of file names into subtitle and video candidates
pub fn classify<S: AsRef<str>>(file_names: &[S]) -> Classification {
    let mut classification = Classification::default();

    for name in file_names {
        let file = MediaFile::from_file_name(name.as_ref());
        if file.is_subtitle_like() {
            debug!("Subtitle candidate: {}", file.file_name);
            classification.subtitles.push(file);
        } else {
            debug!("Video candidate: {}", file.file_name);
            classification.videos.push(file);
        }
    }

    classification
}
