use std::fs;
use std::path::{Path, PathBuf};

use marioplay_game::{JavaRandom, ProbeConfig, ScriptedEngine, SimulationOutcome};
use marioplay_tester::{BatchDriver, Experiment, ExperimentStatus};
use sha2::{Digest, Sha256};

const LEVELS: [(&str, &str); 3] = [
    (
        "lvl_1.txt",
        "----?--?----\n--?Q?--E----\n-<>-----<>--\n-[]--bB-[]--\nXXXXXXXXXXXX\n",
    ),
    ("lvl_2.txt", "--?-?-?-?--\n-----E--E--\nXXXX--XXXXX\n"),
    (
        "lvl_3.txt",
        "-o-o-SSS?SS-\n------------\nXXXXXXXXXXXX\n",
    ),
];

const TRANSLATED_DIGEST: &str = "0a0af786b022c2966e1c398935e88db1fd48879bb080be526d2ed6421b895ef8";

fn temp_dir(label: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "marioplay-flow-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_levels(dir: &Path) {
    for (name, text) in LEVELS {
        fs::write(dir.join(name), text).unwrap();
    }
}

fn playable_column(csv: &str) -> Vec<String> {
    csv.lines()
        .skip(1)
        .map(|line| line.rsplit(',').next().unwrap().to_string())
        .collect()
}

#[test]
fn scripted_outcomes_produce_expected_csv() {
    let root = temp_dir("e2e");
    let levels = root.join("GA2014").join("levels_default");
    fs::create_dir_all(&levels).unwrap();
    write_levels(&levels);
    let out = temp_dir("e2e-out");

    let mut script = vec![0.5, 0.5, 1.0];
    script.extend([0.9; 10]);
    script.push(1.0);
    let mut driver = BatchDriver::new(
        ScriptedEngine::from_completions(&script),
        JavaRandom::new(1337),
        ProbeConfig::default(),
    );

    let experiment = Experiment::new("GA2014/levels_default", "Playability_default.csv");
    let summaries = driver.run_all(&root, &[experiment], &out).unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].evaluated, 3);
    assert_eq!(summaries[0].playable, 2);
    assert_eq!(
        summaries[0].status,
        ExperimentStatus::Written(out.join("Playability_default.csv"))
    );

    let engine = driver.into_engine();
    assert_eq!(engine.runs(), 14);
    assert_eq!(engine.remaining(), 0);

    let csv = fs::read_to_string(out.join("Playability_default.csv")).unwrap();
    assert!(csv.starts_with("Level,Playable\n"));
    assert_eq!(playable_column(&csv), vec!["1", "0", "1"]);
    let first_row = csv.lines().nth(1).unwrap();
    assert!(first_row.ends_with("lvl_1.txt,1"), "{first_row}");
}

#[test]
fn csv_rows_match_readable_levels() {
    let root = temp_dir("rows");
    write_levels(&root);
    fs::create_dir_all(root.join("nested")).unwrap();
    fs::write(root.join("nested").join("lvl_4.txt"), "--E--\nXXXXX\n").unwrap();
    let out = temp_dir("rows-out");

    let mut driver = BatchDriver::new(
        ScriptedEngine::from_completions(&[1.0, 0.2, 1.0, 1.0, 1.0, 1.0]),
        JavaRandom::new(3),
        ProbeConfig::with_max_trials(2),
    );
    let summaries = driver
        .run_all(&root, &[Experiment::new("", "Playability.csv")], &out)
        .unwrap();
    assert_eq!(summaries[0].evaluated, 4);

    let csv = fs::read_to_string(out.join("Playability.csv")).unwrap();
    let rows: Vec<_> = csv.lines().skip(1).collect();
    assert_eq!(rows.len(), 4);
    for row in rows {
        let flag = row.rsplit(',').next().unwrap();
        assert!(flag == "1" || flag == "0", "{row}");
    }
}

#[test]
fn seeded_translation_is_reproducible() {
    let root = temp_dir("digest");
    write_levels(&root);
    let files: Vec<PathBuf> = LEVELS.iter().map(|(name, _)| root.join(name)).collect();

    let mut driver = BatchDriver::new(
        ScriptedEngine::new((0..LEVELS.len()).map(|_| SimulationOutcome::with_completion(1.0))),
        JavaRandom::new(1337),
        ProbeConfig::default(),
    );
    driver.evaluate_files(&files).unwrap();

    let seen = driver.engine().levels_seen();
    assert_eq!(
        seen[0],
        "----@--@----\n--!D!--g----\n-tt-----tt--\n-tt--**-tt--\nXXXXXXXXXXXX\n"
    );
    let digest = Sha256::digest(seen.join("\n=\n").as_bytes());
    assert_eq!(format!("{digest:x}"), TRANSLATED_DIGEST);
}
