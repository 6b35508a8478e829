//! Binary-level tests for the pilon-tracks command line.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const WIG_FILES: [&str; 19] = [
    "Changes.wig",
    "Confirmed.wig",
    "CopyNumber.wig",
    "Coverage.wig",
    "CoverageSD.wig",
    "BadCoverage.wig",
    "BadCoverageSD.wig",
    "DeltaCoverage.wig",
    "DipCoverage.wig",
    "FragCoverage.wig",
    "PhysicalCoverage.wig",
    "PhysicalCoverageSD.wig",
    "GC.wig",
    "InsertSize.wig",
    "InsertSizeSD.wig",
    "PctBad.wig",
    "WeightedQual.wig",
    "WeightedMq.wig",
    "ClippedAlignments.wig",
];

fn pilon_tracks() -> Command {
    Command::cargo_bin("pilon-tracks").unwrap()
}

/// Genome FASTA and a matching SAM header in a fresh directory
fn inputs() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("genome.fa"),
        ">chr1\nACGTACGTGGCCAATT\n>chr2\nGGGGCCCC\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("frags.sam"),
        "@HD\tVN:1.6\n@SQ\tSN:chr1\tLN:16\n@SQ\tSN:chr2\tLN:8\n",
    )
    .unwrap();
    dir
}

fn file_count(dir: &Path) -> usize {
    fs::read_dir(dir).unwrap().count()
}

#[test]
fn test_no_inputs_prints_usage() {
    pilon_tracks()
        .assert()
        .success()
        .stdout(predicate::str::contains("--frags"));
}

#[test]
fn test_help() {
    pilon_tracks()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--genome").and(predicate::str::contains("--tracks")));
}

#[test]
fn test_version() {
    pilon_tracks()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_genome() {
    pilon_tracks()
        .args(["--frags", "frags.bam"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--genome"));
}

#[test]
fn test_unknown_flag() {
    pilon_tracks()
        .args(["--genome", "g.fa", "--frags", "a.bam", "--bogus"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--bogus"));
}

#[test]
fn test_bad_fix_token() {
    pilon_tracks()
        .args(["--genome", "g.fa", "--frags", "a.bam", "--fix", "bogus"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("bogus"));
}

#[test]
fn test_bad_fix_token_without_inputs() {
    pilon_tracks()
        .args(["--genome", "g.fa", "--fix", "bogus"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("bogus"));
}

#[test]
fn test_huge_chunk_size() {
    let dir = inputs();
    let out = dir.path().join("out");

    pilon_tracks()
        .arg("--genome")
        .arg(dir.path().join("genome.fa"))
        .arg("--frags")
        .arg(dir.path().join("frags.sam"))
        .arg("--outdir")
        .arg(&out)
        .args(["--chunksize", "18446744073709551615", "--tracks"])
        .assert()
        .success();

    let coverage = fs::read_to_string(out.join("pilonCoverage.wig")).unwrap();
    assert_eq!(coverage.matches("fixedStep").count(), 2);
}

#[test]
fn test_experimental_fix_warns_and_continues() {
    let dir = inputs();
    let genome = dir.path().join("genome.fa");
    let frags = dir.path().join("frags.sam");

    pilon_tracks()
        .arg("--genome")
        .arg(&genome)
        .arg("--frags")
        .arg(&frags)
        .args(["--fix", "bases,novel"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Experimental fix option: novel"));
}

#[test]
fn test_bad_number() {
    pilon_tracks()
        .args(["--genome", "g.fa", "--frags", "a.bam", "--mindepth", "deep"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("deep"));
}

#[test]
fn test_missing_genome_file_fails_run() {
    let dir = inputs();
    let frags = dir.path().join("frags.sam");

    pilon_tracks()
        .arg("--genome")
        .arg(dir.path().join("missing.fa"))
        .arg("--frags")
        .arg(&frags)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing.fa"));
}

#[test]
fn test_run_with_tracks_writes_all_files() {
    let dir = inputs();
    let out = dir.path().join("out");

    pilon_tracks()
        .arg("--genome")
        .arg(dir.path().join("genome.fa"))
        .arg("--frags")
        .arg(dir.path().join("frags.sam"))
        .arg("--outdir")
        .arg(&out)
        .args(["--output", "asm.", "--tracks"])
        .assert()
        .success();

    assert_eq!(file_count(&out), 20);
    assert!(out.join("asm.Pilon.bed").is_file());
    for name in WIG_FILES {
        assert!(out.join(format!("asm.{name}")).is_file(), "{name} missing");
    }

    let gc = fs::read_to_string(out.join("asm.GC.wig")).unwrap();
    let mut lines = gc.lines();
    assert!(lines.next().unwrap().starts_with("track type=wiggle_0"));
    assert_eq!(lines.next().unwrap(), "fixedStep chrom=chr1 start=1 step=1");

    let bed = fs::read_to_string(out.join("asm.Pilon.bed")).unwrap();
    assert_eq!(bed, "track name=\"Pilon\" itemRgb=\"On\"\n");
}

#[test]
fn test_run_without_tracks_writes_nothing() {
    let dir = inputs();
    let out = dir.path().join("out");

    pilon_tracks()
        .arg("--genome")
        .arg(dir.path().join("genome.fa"))
        .arg("--frags")
        .arg(dir.path().join("frags.sam"))
        .arg("--outdir")
        .arg(&out)
        .assert()
        .success();

    assert!(!out.exists());
}

#[test]
fn test_targets_restrict_output() {
    let dir = inputs();
    let out = dir.path().join("out");

    pilon_tracks()
        .arg("--genome")
        .arg(dir.path().join("genome.fa"))
        .arg("--unpaired")
        .arg(dir.path().join("frags.sam"))
        .arg("--outdir")
        .arg(&out)
        .args(["--targets", "chr2", "--tracks"])
        .assert()
        .success();

    let coverage = fs::read_to_string(out.join("pilonCoverage.wig")).unwrap();
    assert!(coverage.contains("fixedStep chrom=chr2 start=1 step=1"));
    assert!(!coverage.contains("chrom=chr1"));
}

#[test]
fn test_unknown_target_contig_fails() {
    let dir = inputs();

    pilon_tracks()
        .arg("--genome")
        .arg(dir.path().join("genome.fa"))
        .arg("--frags")
        .arg(dir.path().join("frags.sam"))
        .arg("--outdir")
        .arg(dir.path().join("out"))
        .args(["--targets", "chrX", "--tracks"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("chrX"));
}
