/*!
 * Tests for video / subtitle classification
 */

use subcheck::classifier::{classify, MediaFile};

#[test]
fn test_from_file_name_withUppercaseName_shouldLowercaseStemAndExtension() {
    let file = MediaFile::from_file_name("Talk1.MP4");

    assert_eq!(file.file_name, "Talk1.MP4");
    assert_eq!(file.stem, "talk1");
    assert_eq!(file.extension, "mp4");
    assert!(file.is_container());
}

#[test]
fn test_from_file_name_withSeveralDots_shouldStripLastExtensionOnly() {
    let file = MediaFile::from_file_name("paper.42.en.srt");

    assert_eq!(file.stem, "paper.42.en");
    assert_eq!(file.extension, "srt");
    assert!(file.is_srt());
}

#[test]
fn test_from_file_name_withoutExtension_shouldHaveEmptyExtension() {
    let file = MediaFile::from_file_name("talk7");

    assert_eq!(file.stem, "talk7");
    assert_eq!(file.extension, "");
    assert!(!file.is_container());
    assert!(!file.is_subtitle_like());
}

#[test]
fn test_classify_withSubtitleLikeExtensions_shouldPutThemOnSubtitleSide() {
    let listing = ["a.srt", "b.SBV", "c.txt", "d.Zip", "e.xml", "f.mp4"];

    let classification = classify(&listing);

    let subtitles: Vec<&str> = classification.subtitles.iter().map(|f| f.file_name.as_str()).collect();
    assert_eq!(subtitles, vec!["a.srt", "b.SBV", "c.txt", "d.Zip", "e.xml"]);
    assert_eq!(classification.videos.len(), 1);
    assert_eq!(classification.videos[0].file_name, "f.mp4");
}

#[test]
fn test_classify_withUnknownExtensions_shouldTreatThemAsVideos() {
    let listing = ["talk.mov", "talk.vtt", "notes", "talk.mp4"];

    let classification = classify(&listing);

    let videos: Vec<&str> = classification.videos.iter().map(|f| f.file_name.as_str()).collect();
    assert_eq!(videos, vec!["talk.mov", "talk.vtt", "notes", "talk.mp4"]);
    assert!(classification.subtitles.is_empty());
    assert_eq!(classification.container_count(), 1);
}

#[test]
fn test_classify_withEmptyListing_shouldBeEmpty() {
    let listing: [&str; 0] = [];

    let classification = classify(&listing);

    assert!(classification.videos.is_empty());
    assert!(classification.subtitles.is_empty());
}
