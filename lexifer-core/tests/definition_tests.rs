//! Loading definition files from disk

use lexifer_core::text::{compose_paragraph, wrap};
use lexifer_core::{Definition, DefinitionError, Notation};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::io::Write;
use tempfile::NamedTempFile;

const SAMPLE: &str = "\
# A small language with sound changes
with: std-ipa-features std-assimilations coronal-metathesis
random-rate: 20
letters: a e i o u p t k b d g m n ŋ s l

C = p t k b d g m n s l
V = a i u e o
N = m n
$S = CV
words: $SN? $S$S $S$SN? V$S
number of words: 25

reject: ii uu
filter: aa > a; ([aeiou])\\1 > \\1

% m n
p - +
t + -
";

fn write_definition(source: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(source.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn loads_sample_definition() {
    let file = write_definition(SAMPLE);
    let mut rng = ChaCha8Rng::seed_from_u64(10);
    let def = Definition::from_file_with(file.path(), &mut rng);
    // The rust regex engine has no back-references in patterns
    assert!(matches!(def, Err(DefinitionError::Config(_))));

    let fixed = SAMPLE.replace("; ([aeiou])\\1 > \\1", "; (a)(e) > \\2\\1");
    let file = write_definition(&fixed);
    let def = Definition::from_file_with(file.path(), &mut rng).unwrap();

    assert_eq!(def.word_count, Some(25));
    assert_eq!(def.letters.len(), 16);
    assert!(def.warnings.is_empty(), "{:?}", def.warnings);
    assert_eq!(def.system.random_rate(), 20);
    assert_eq!(def.system.class_names(), ['C', 'V', 'N']);
    assert_eq!(def.system.rules().len(), 4);
    // reject x2, filter x2, cluster field: pm, tn
    assert_eq!(def.system.filters().len(), 6);
    assert_eq!(
        def.system.assimilator().unwrap().table().notation(),
        Notation::Ipa
    );
}

#[test]
fn generates_from_loaded_definition() {
    let source = SAMPLE.replace("; ([aeiou])\\1 > \\1", "");
    let file = write_definition(&source);
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let def = Definition::from_file_with(file.path(), &mut rng).unwrap();

    let words = def.system.generate_with(25, false, &mut rng).unwrap();
    assert!(!words.is_empty() && words.len() <= 25);
    for word in &words {
        assert!(!word.contains("ii") && !word.contains("uu"));
        assert!(!word.contains("pm") && !word.contains("tn"));
    }

    let paragraph = compose_paragraph(&def.system, 4, &mut rng).unwrap();
    assert!(wrap(&paragraph, 40).lines().all(|l| l.chars().count() <= 40));
}

#[test]
fn reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Definition::from_file(dir.path().join("nope.def")).unwrap_err();
    assert!(err.to_string().contains("nope.def"));
}

#[test]
fn reports_line_numbers() {
    let file = write_definition("V = a\n\nwords: V\nthis is wrong\n");
    match Definition::from_file(file.path()) {
        Err(DefinitionError::Parse { line, text }) => {
            assert_eq!(line, 4);
            assert_eq!(text, "this is wrong");
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}
