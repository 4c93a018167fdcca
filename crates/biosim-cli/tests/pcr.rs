use assert_cmd::Command;
use std::error::Error;
use std::path::PathBuf;

fn test_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(|p| p.parent())
        .expect("workspace root")
        .join("test_data")
}

#[test]
fn default_primer_extends_template() -> Result<(), Box<dyn Error>> {
    let out = Command::cargo_bin("biosim")?
        .current_dir(test_data_dir())
        .arg("pcr")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(out)?;
    let expected = "\
Original Dna: GGCTAATGCCGTTAGCATCGGATGCAATT
Primer Found: true
Extended Strand: ATGCCGTTAGCATCGGATGCAATT
";
    assert_eq!(text, expected);
    Ok(())
}

#[test]
fn absent_primer_is_reported() -> Result<(), Box<dyn Error>> {
    let input = test_data_dir().join("example_input.fasta");
    let out = Command::cargo_bin("biosim")?
        .args([
            "pcr",
            "--input",
            input.to_str().expect("utf8 path"),
            "--primer",
            "TTTTTT",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(out)?;
    assert!(text.contains("Primer Found: false"));
    assert!(text.contains("Extended Strand: Primer not found in sequence"));
    Ok(())
}

#[test]
fn missing_fasta_fails() -> Result<(), Box<dyn Error>> {
    let err = Command::cargo_bin("biosim")?
        .args(["pcr", "--input", "nope.fasta"])
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();
    let text = String::from_utf8(err)?;
    assert!(text.contains("reading FASTA from nope.fasta"));
    Ok(())
}
