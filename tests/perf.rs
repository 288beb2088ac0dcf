use assert_cmd::Command;
use std::fs;
use std::time::Instant;
use tempfile::tempdir;

#[test]
fn perf_estimate_1mb_under_5s() {
    let text = "Grüße aus Köln, naïve café résumé! 世界 ".repeat(25_000);

    let start = Instant::now();
    let tokens = ai_tokenizer::estimate(&text);
    let elapsed = start.elapsed();

    assert!(tokens > 0);
    assert!(elapsed.as_secs_f32() < 5.0, "estimate took {:?}", elapsed);
}

#[test]
fn perf_estimate_200_files_under_5s() {
    let dir = tempdir().unwrap();
    for i in 0..200u32 {
        let file_path = dir.path().join(format!("file{}.txt", i));
        fs::write(file_path, "lorem ipsum dolor sit amet ".repeat(200)).unwrap();
    }

    let start = Instant::now();
    Command::cargo_bin("ai-tokenizer")
        .unwrap()
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .args(["estimate", "--heuristic", "--jobs", "4", "--file", "*.txt"])
        .assert()
        .success();
    let elapsed = start.elapsed();
    assert!(elapsed.as_secs_f32() < 5.0, "estimate took {:?}", elapsed);
}
