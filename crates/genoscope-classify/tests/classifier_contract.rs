use burn::backend::NdArray;
use genoscope_classify::{
    Classify, ClassifierArtifacts, DisorderClassifierConfig, SequenceClassifier, UNKNOWN_LABEL,
    TOKENIZER_FILE,
};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

type TestBackend = NdArray;

fn write_tokenizer_json(dir: &Path) {
    let vocab = serde_json::json!({
        "[PAD]": 0,
        "[UNK]": 1,
        "AC": 2,
        "CG": 3,
        "GT": 4,
        "TA": 5,
        "TT": 6,
    });
    let tokenizer_json = serde_json::json!({
        "version": "1.0",
        "truncation": null,
        "padding": null,
        "added_tokens": [
            {"id": 0, "content": "[PAD]", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true},
            {"id": 1, "content": "[UNK]", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true}
        ],
        "normalizer": null,
        "pre_tokenizer": {"type": "Whitespace"},
        "post_processor": null,
        "decoder": null,
        "model": {
            "type": "WordLevel",
            "vocab": vocab,
            "unk_token": "[UNK]"
        }
    });
    fs::write(
        dir.join(TOKENIZER_FILE),
        serde_json::to_string_pretty(&tokenizer_json).expect("tokenizer json"),
    )
    .expect("write tokenizer");
}

fn write_reference_csv(path: &Path) {
    fs::write(
        path,
        "Sequence,Disorder\nACGT,Cystic Fibrosis\nTTTT,Sickle Cell Anemia\nGGGG,Tay-Sachs\n",
    )
    .expect("write reference");
}

fn fabricate_artifacts(dir: &Path, num_labels: usize) {
    let device = burn::backend::ndarray::NdArrayDevice::default();
    let config = DisorderClassifierConfig::new(16, 16, 8, 2, 1, 16, 0.0, num_labels);
    let artifacts = ClassifierArtifacts::new(dir);
    artifacts.save_config(&config).expect("save config");
    artifacts
        .save_model(config.init::<TestBackend>(&device))
        .expect("save model");
    write_tokenizer_json(dir);
}

fn load_classifier(dir: &Path, num_labels: usize) -> SequenceClassifier {
    fabricate_artifacts(dir, num_labels);
    let reference = dir.join("reference.csv");
    write_reference_csv(&reference);
    SequenceClassifier::from_artifacts(dir, &reference, 2).expect("load classifier")
}

#[test]
fn confidence_is_a_percentage_and_label_is_known() {
    let tmp = tempdir().expect("tempdir");
    let classifier = load_classifier(tmp.path(), 3);
    let result = classifier.classify("ACGTACGTTTTT").expect("classify");
    assert!(result.confidence >= 0.0 && result.confidence <= 100.0);
    let known: Vec<&str> = classifier
        .labels()
        .as_slice()
        .iter()
        .map(String::as_str)
        .collect();
    assert!(known.contains(&result.label.as_str()) || result.label == UNKNOWN_LABEL);
}

#[test]
fn classification_is_deterministic() {
    let tmp = tempdir().expect("tempdir");
    let classifier = load_classifier(tmp.path(), 3);
    let first = classifier.classify("ACGTACGT").expect("first");
    let second = classifier.classify("ACGTACGT").expect("second");
    assert_eq!(first, second);
}

#[test]
fn sequence_shorter_than_window_still_classifies() {
    let tmp = tempdir().expect("tempdir");
    let classifier = load_classifier(tmp.path(), 3);
    let result = classifier.classify("A").expect("classify");
    assert!(result.confidence >= 0.0 && result.confidence <= 100.0);
}

#[test]
fn head_wider_than_label_space_falls_back_to_sentinel_only_when_unmapped() {
    let tmp = tempdir().expect("tempdir");
    let classifier = load_classifier(tmp.path(), 5);
    let result = classifier.classify("ACGTACGT").expect("classify");
    if result.label_index >= classifier.labels().len() {
        assert_eq!(result.label, UNKNOWN_LABEL);
    } else {
        assert_eq!(
            result.label,
            classifier.labels().as_slice()[result.label_index]
        );
    }
}

#[test]
fn missing_artifacts_surface_as_errors() {
    let tmp = tempdir().expect("tempdir");
    let reference = tmp.path().join("reference.csv");
    write_reference_csv(&reference);
    let loaded = SequenceClassifier::from_artifacts(tmp.path(), &reference, 2);
    assert!(loaded.is_err());
}
