//! Lexicon-backed scorer
//!
//! Reads a VADER-format lexicon (`token<TAB>mean<TAB>stddev<TAB>ratings`) and
//! computes a compound score from summed token valences with booster, negation
//! and exclamation adjustments, normalized into `[-1, 1]`.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::SentimentError;

use super::{normalize_token, INTENSIFIERS};

/// Locations tried inside each NLTK data directory, in order: the archive
/// `nltk.download` writes, its unzipped form, then a bare text file.
pub const LEXICON_CANDIDATES: &[&str] = &[
    "sentiment/vader_lexicon.zip",
    "sentiment/vader_lexicon/vader_lexicon.txt",
    "sentiment/vader_lexicon.txt",
];

/// Entry holding the lexicon inside `vader_lexicon.zip`.
pub const ZIP_ENTRY: &str = "vader_lexicon/vader_lexicon.txt";

const BOOSTER_INCREMENT: f64 = 0.293;
const NEGATION_SCALAR: f64 = -0.74;
const EXCLAMATION_INCREMENT: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
const NORMALIZATION_ALPHA: f64 = 15.0;
const NEGATION_WINDOW: usize = 3;

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "nor", "none", "nothing", "nobody", "neither", "cannot",
];

#[derive(Debug, Clone)]
pub struct Lexicon {
    weights: HashMap<String, f64>,
}

impl Lexicon {
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            weights: entries
                .into_iter()
                .map(|(token, weight)| (token.into(), weight))
                .collect(),
        }
    }

    /// Parse lexicon text. Blank lines are skipped; any other line must carry a
    /// token and a numeric mean valence separated by a tab.
    pub fn parse(contents: &str) -> Result<Self, SentimentError> {
        let mut weights = HashMap::new();

        for (idx, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let mut fields = line.split('\t');
            let token = fields.next().unwrap_or_default().trim();
            if token.is_empty() {
                return Err(SentimentError::Lexicon {
                    line: idx + 1,
                    message: "missing token".to_string(),
                });
            }

            let weight = fields
                .next()
                .ok_or_else(|| SentimentError::Lexicon {
                    line: idx + 1,
                    message: format!("missing valence for '{}'", token),
                })?
                .trim()
                .parse::<f64>()
                .map_err(|e| SentimentError::Lexicon {
                    line: idx + 1,
                    message: format!("bad valence for '{}': {}", token, e),
                })?;

            weights.insert(token.to_lowercase(), weight);
        }

        Ok(Self { weights })
    }

    /// Load a plain lexicon file, or the lexicon entry of a `.zip` archive.
    pub fn load(path: &Path) -> Result<Self, SentimentError> {
        let contents = if path.extension().is_some_and(|ext| ext == "zip") {
            read_zip_entry(path)?
        } else {
            std::fs::read_to_string(path)?
        };
        let lexicon = Self::parse(&contents)?;
        if lexicon.is_empty() {
            return Err(SentimentError::Other(format!(
                "lexicon {} has no entries",
                path.display()
            )));
        }
        Ok(lexicon)
    }

    /// Try each search directory in order; return the first lexicon that loads.
    pub fn discover(search_paths: &[String]) -> Option<(PathBuf, Self)> {
        for raw in search_paths {
            let dir = match shellexpand::full(raw) {
                Ok(expanded) => PathBuf::from(expanded.as_ref()),
                Err(e) => {
                    tracing::warn!(path = %raw, error = %e, "Cannot expand lexicon search path");
                    continue;
                }
            };

            for relative in LEXICON_CANDIDATES {
                let candidate = dir.join(relative);
                if !candidate.is_file() {
                    continue;
                }

                match Self::load(&candidate) {
                    Ok(lexicon) => return Some((candidate, lexicon)),
                    Err(e) => {
                        tracing::warn!(
                            path = %candidate.display(),
                            error = %e,
                            "Skipping unreadable lexicon"
                        );
                    }
                }
            }
            tracing::debug!(path = %dir.display(), "No lexicon at search path");
        }
        None
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn weight(&self, token: &str) -> Option<f64> {
        self.weights.get(token).copied()
    }

    /// Normalized compound score. May be non-finite if the lexicon carries
    /// infinite weights; the caller rejects that.
    pub fn compound(&self, text: &str) -> f64 {
        let lowered = text.to_lowercase();
        let tokens: Vec<&str> = lowered.split_whitespace().map(strip_punctuation).collect();

        let mut sum = 0.0;
        for (i, token) in tokens.iter().enumerate() {
            let mut valence = match self.weight(token) {
                Some(v) if v != 0.0 => v,
                _ => continue,
            };

            if i > 0 && INTENSIFIERS.contains(&tokens[i - 1]) {
                valence += BOOSTER_INCREMENT.copysign(valence);
            }

            let window = &tokens[i.saturating_sub(NEGATION_WINDOW)..i];
            if window.iter().any(|w| is_negation(w)) {
                valence *= NEGATION_SCALAR;
            }

            sum += valence;
        }

        if sum != 0.0 {
            let bangs = text.matches('!').count().min(MAX_EXCLAMATIONS) as f64;
            sum += (bangs * EXCLAMATION_INCREMENT).copysign(sum);
        }

        normalize(sum)
    }
}

fn read_zip_entry(path: &Path) -> Result<String, SentimentError> {
    let mut archive = zip::ZipArchive::new(File::open(path)?)?;
    let mut entry = archive.by_name(ZIP_ENTRY)?;
    let mut contents = String::new();
    entry.read_to_string(&mut contents)?;
    Ok(contents)
}

fn strip_punctuation(token: &str) -> &str {
    let stripped = normalize_token(token);
    // keep emoticons and short tokens like ":)" intact
    if stripped.chars().count() <= 2 {
        token
    } else {
        stripped
    }
}

fn is_negation(token: &str) -> bool {
    NEGATIONS.contains(&token) || token.ends_with("n't")
}

fn normalize(sum: f64) -> f64 {
    if sum == 0.0 {
        return 0.0;
    }
    (sum / (sum * sum + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample() -> Lexicon {
        Lexicon::from_entries([
            ("fantastic", 2.6),
            ("good", 1.9),
            ("bad", -2.5),
            ("boring", -1.3),
            (":)", 2.0),
        ])
    }

    #[test]
    fn test_parse_vader_format() {
        let text = "good\t1.9\t0.9434\t[2, 1, 2, 3, 2, 2, 1, 3, 1, 2]\n\n$:\t-1.5\t0.80623\t[-1, -1]\n";
        let lexicon = Lexicon::parse(text).unwrap();
        assert_eq!(lexicon.len(), 2);
        assert_eq!(lexicon.weight("good"), Some(1.9));
        assert_eq!(lexicon.weight("$:"), Some(-1.5));
    }

    #[test]
    fn test_parse_rejects_missing_valence() {
        let err = Lexicon::parse("good\t1.9\nbad\n").unwrap_err();
        match err {
            SentimentError::Lexicon { line, .. } => assert_eq!(line, 2),
            other => panic!("Expected Lexicon error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_non_numeric_valence() {
        assert!(Lexicon::parse("good\tvery\n").is_err());
    }

    #[test]
    fn test_single_word_normalization() {
        let lexicon = sample();
        let expected = 1.9 / (1.9f64 * 1.9 + 15.0).sqrt();
        assert!((lexicon.compound("good") - expected).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_words_are_neutral() {
        assert_eq!(sample().compound("the film was two hours long"), 0.0);
    }

    #[test]
    fn test_booster_increases_magnitude() {
        let lexicon = sample();
        assert!(lexicon.compound("very good") > lexicon.compound("good"));
        assert!(lexicon.compound("really bad") < lexicon.compound("bad"));
    }

    #[test]
    fn test_negation_flips_polarity() {
        let lexicon = sample();
        assert!(lexicon.compound("not good") < 0.0);
        assert!(lexicon.compound("isn't bad") > 0.0);
        // negation reaches three tokens back
        assert!(lexicon.compound("never was it good") < 0.0);
    }

    #[test]
    fn test_exclamation_adds_emphasis() {
        let lexicon = sample();
        assert!(lexicon.compound("good!!") > lexicon.compound("good"));
        assert_eq!(
            lexicon.compound("good!!!!!!!!"),
            lexicon.compound("good!!!!"),
            "emphasis is capped at four marks"
        );
        assert_eq!(lexicon.compound("!!!"), 0.0);
    }

    #[test]
    fn test_short_tokens_keep_punctuation() {
        let lexicon = sample();
        assert!(lexicon.compound("loved it :)") > 0.0);
    }

    #[test]
    fn test_compound_stays_in_unit_range() {
        let lexicon = sample();
        let text = "fantastic ".repeat(200);
        let c = lexicon.compound(&text);
        assert!(c <= 1.0 && c > 0.99);
    }

    #[test]
    fn test_infinite_weight_yields_non_finite_compound() {
        let lexicon = Lexicon::from_entries([("broken", f64::INFINITY)]);
        assert!(!lexicon.compound("broken").is_finite());
    }

    const BARE_TEXT: &str = "sentiment/vader_lexicon.txt";
    const UNZIPPED: &str = "sentiment/vader_lexicon/vader_lexicon.txt";
    const ARCHIVE: &str = "sentiment/vader_lexicon.zip";

    fn write_text(dir: &Path, relative: &str, contents: &str) {
        let path = dir.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        let mut file = File::create(path).unwrap();
        write!(file, "{}", contents).unwrap();
    }

    fn write_archive(dir: &Path, entry: &str, contents: &str) {
        let path = dir.join(ARCHIVE);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        let mut writer = zip::ZipWriter::new(File::create(path).unwrap());
        writer
            .start_file(entry, zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(contents.as_bytes()).unwrap();
        writer.finish().unwrap();
    }

    #[test]
    fn test_discover_finds_first_loadable_lexicon() {
        let empty_dir = tempfile::tempdir().unwrap();
        let data_dir = tempfile::tempdir().unwrap();
        write_text(data_dir.path(), BARE_TEXT, "good\t1.9\n");

        let paths = vec![
            empty_dir.path().to_string_lossy().to_string(),
            data_dir.path().to_string_lossy().to_string(),
        ];
        let (path, lexicon) = Lexicon::discover(&paths).expect("lexicon should be found");
        assert!(path.starts_with(data_dir.path()));
        assert_eq!(lexicon.weight("good"), Some(1.9));
    }

    #[test]
    fn test_discover_skips_empty_lexicon() {
        let data_dir = tempfile::tempdir().unwrap();
        write_text(data_dir.path(), BARE_TEXT, "\n\n");

        let paths = vec![data_dir.path().to_string_lossy().to_string()];
        assert!(Lexicon::discover(&paths).is_none());
    }

    #[test]
    fn test_discover_reads_unzipped_nltk_layout() {
        let data_dir = tempfile::tempdir().unwrap();
        write_text(data_dir.path(), UNZIPPED, "good\t1.9\t0.9434\t[2, 1, 2]\n");

        let paths = vec![data_dir.path().to_string_lossy().to_string()];
        let (path, lexicon) = Lexicon::discover(&paths).expect("unzipped lexicon found");
        assert!(path.ends_with(UNZIPPED));
        assert_eq!(lexicon.weight("good"), Some(1.9));
    }

    #[test]
    fn test_discover_reads_nltk_zip_archive() {
        let data_dir = tempfile::tempdir().unwrap();
        write_archive(data_dir.path(), ZIP_ENTRY, "good\t1.9\nbad\t-2.5\n");

        let paths = vec![data_dir.path().to_string_lossy().to_string()];
        let (path, lexicon) = Lexicon::discover(&paths).expect("zipped lexicon found");
        assert!(path.ends_with(ARCHIVE));
        assert_eq!(lexicon.len(), 2);
        assert_eq!(lexicon.weight("bad"), Some(-2.5));
    }

    #[test]
    fn test_archive_preferred_over_unzipped_copy() {
        let data_dir = tempfile::tempdir().unwrap();
        write_archive(data_dir.path(), ZIP_ENTRY, "good\t2.0\n");
        write_text(data_dir.path(), UNZIPPED, "good\t1.0\n");

        let paths = vec![data_dir.path().to_string_lossy().to_string()];
        let (_, lexicon) = Lexicon::discover(&paths).unwrap();
        assert_eq!(lexicon.weight("good"), Some(2.0));
    }

    #[test]
    fn test_archive_without_lexicon_entry_falls_through() {
        let data_dir = tempfile::tempdir().unwrap();
        write_archive(data_dir.path(), "README", "not a lexicon");
        write_text(data_dir.path(), UNZIPPED, "good\t1.9\n");

        let err = Lexicon::load(&data_dir.path().join(ARCHIVE)).unwrap_err();
        assert!(matches!(err, SentimentError::Zip(_)));

        let paths = vec![data_dir.path().to_string_lossy().to_string()];
        let (path, _) = Lexicon::discover(&paths).unwrap();
        assert!(path.ends_with(UNZIPPED));
    }
}
