use serde_json::{json, Value};
use tokio::fs;

use verset::config::Config;
use verset::scripture::AlignmentExport;
use verset::subtitle::read_srt;
use verset::transcript::TranscriptFormat;
use verset::workflow::Workflow;

const SERMON: &str = "Jésus dit dans Jean chapitre trois verset seize : « Car Dieu a tant aimé le monde \
                      qu'il a donné son Fils unique. » Que Dieu vous bénisse tous.";

/// OpenAI Whisper segment whose tokens last `step` seconds each
fn segment(id: u64, start: f64, step: f64, text: &str) -> Value {
    let words: Vec<Value> = text
        .split_whitespace()
        .enumerate()
        .map(|(i, w)| {
            json!({
                "word": format!(" {}", w),
                "start": start + i as f64 * step,
                "end": start + (i + 1) as f64 * step,
                "probability": 0.9
            })
        })
        .collect();
    let end = start + words.len() as f64 * step;
    json!({"id": id, "start": start, "end": end, "text": format!(" {}", text), "words": words})
}

#[tokio::test]
async fn test_transcript_to_aligned_verse_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let transcript_path = dir.path().join("sermon.json");
    let source_path = dir.path().join("sermon.txt");
    let srt_path = dir.path().join("sermon.srt");
    let corrected_path = dir.path().join("sermon_versets.srt");
    let metadata_path = dir.path().join("versets.json");

    let transcript = json!({
        "text": SERMON,
        "language": "fr",
        "segments": [
            segment(0, 0.0, 0.3, "Jésus dit dans Jean chapitre trois verset seize :"),
            segment(1, 3.0, 0.3, "Car Dieu a tant aimé le monde qu'il a donné son Fils unique."),
            segment(2, 8.0, 0.3, "Que Dieu vous bénisse tous."),
        ]
    });
    fs::write(&transcript_path, transcript.to_string()).await.unwrap();
    fs::write(&source_path, SERMON).await.unwrap();

    let workflow = Workflow::new(Config::default()).unwrap();

    let captions = workflow
        .generate_captions(&transcript_path, &srt_path, TranscriptFormat::OpenAI, Some(10.0))
        .await
        .unwrap();
    let texts: Vec<&str> = captions.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(
        texts,
        vec![
            "Jésus dit dans Jean chapitre",
            "trois verset seize :",
            "Car Dieu a tant aimé",
            "le monde qu'il a donné",
            "son Fils unique.",
            "Que Dieu vous bénisse tous.",
        ]
    );

    let export = workflow
        .align_verses(&source_path, &srt_path, &corrected_path, &metadata_path)
        .await
        .unwrap();
    assert_eq!(export.total_verses, 1);

    let saved = AlignmentExport::load(&metadata_path).await.unwrap();
    let verse = &saved.bible_verses[0];
    assert_eq!(verse.reference, "JEAN 3:16");
    assert_eq!(verse.text, "Car Dieu a tant aimé le monde qu'il a donné son Fils unique.");
    assert_eq!(verse.start_time_ms, 3000);
    assert_eq!(verse.end_time_ms, 7450);
    assert_eq!(verse.start_time, "00:00:03,000");

    let corrected = read_srt(&corrected_path).await.unwrap();
    assert_eq!(corrected[2].text, "« Car Dieu a tant aimé");
    assert_eq!(corrected[4].text, "son Fils unique. »");
    assert_eq!(corrected[5].text, "Que Dieu vous bénisse tous.");

    let references = workflow.list_references(&source_path).await.unwrap();
    assert_eq!(references.len(), 1);
    assert_eq!(references[0].reference, "JEAN 3:16");
}

#[tokio::test]
async fn test_whisper_cpp_transcript_uses_proportional_timing() {
    let dir = tempfile::tempdir().unwrap();
    let transcript_path = dir.path().join("culte.json");
    let srt_path = dir.path().join("culte.srt");

    let transcript = json!({
        "result": {"language": "fr"},
        "transcription": [
            {
                "timestamps": {"from": "00:00:00,000", "to": "00:00:06,000"},
                "offsets": {"from": 0, "to": 6000},
                "text": " L'Éternel est mon berger je ne manquerai de rien"
            }
        ]
    });
    fs::write(&transcript_path, transcript.to_string()).await.unwrap();

    let workflow = Workflow::new(Config::default()).unwrap();
    let captions = workflow
        .generate_captions(&transcript_path, &srt_path, TranscriptFormat::WhisperCpp, None)
        .await
        .unwrap();

    assert_eq!(captions.len(), 2);
    assert_eq!(captions[0].text, "L'Éternel est mon berger je");
    assert_eq!(captions[0].start, 0.0);
    // Five of nine words over six seconds
    assert!((captions[0].end - 6.0 * 5.0 / 9.0).abs() < 1e-9);
    assert_eq!(captions[1].text, "ne manquerai de rien");

    let written = read_srt(&srt_path).await.unwrap();
    assert_eq!(written.len(), 2);
    assert_eq!(written[1].end_ms(), 6000);
}
